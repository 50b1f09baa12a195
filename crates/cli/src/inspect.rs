use crate::config_file::{Overrides, resolve_config};
use doxtree_core::doxygen::{IndexXml, JsonRecords, XmlDirectory};
use doxtree_core::{DoxtreeError, Generator};
use std::path::{Path, PathBuf};

/// Prints the reconstructed hierarchy without writing any document.
pub fn run(config: &Path, records: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(config, &Overrides::default())?;
    let details = XmlDirectory::new(config.detail_dir())
        .map_err(|e| DoxtreeError::Precondition(e.to_string()))?;
    let index_path = config.index_path.clone();
    let generator = Generator::new(config);

    let (graph, xrefs) = match records {
        Some(path) => generator.build_graph(&JsonRecords::from_path(&path)?, &details)?,
        None => generator.build_graph(&IndexXml::new(index_path), &details)?,
    };

    print!("{}", graph.outline());
    for (file, reason) in &xrefs.failures {
        eprintln!("unresolved: {file}: {reason}");
    }
    Ok(())
}
