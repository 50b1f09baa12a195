use crate::config_file::ConfigFile;

pub fn render() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&schemars::schema_for!(ConfigFile))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render()?);
    Ok(())
}
