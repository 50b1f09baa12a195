use crate::config_file::{Overrides, resolve_config};
use doxtree_core::doxygen::{JsonRecords, XmlDirectory};
use doxtree_core::{DoxtreeError, Generator};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(
    config: &Path,
    records: Option<PathBuf>,
    overrides: Overrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(config, &overrides)?;
    info!(output = %config.output_dir.display(), "Generating documentation");
    let generator = Generator::new(config);

    let report = match records {
        Some(path) => {
            let compounds = JsonRecords::from_path(&path)?;
            let details = XmlDirectory::new(generator.config().detail_dir())
                .map_err(|e| DoxtreeError::Precondition(e.to_string()))?;
            generator.run(&compounds, &details)?
        }
        None => generator.run_doxygen()?,
    };

    for failure in &report.failures {
        warn!(unit = %failure.id, "{}", failure.message);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
