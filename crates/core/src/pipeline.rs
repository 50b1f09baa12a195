//! End-to-end generation.
//!
//! Phases run in a fixed order: discovery, reparenting, cross-reference
//! resolution, file attachment, sorting, audit, emission. Only emission
//! touches the filesystem.

use crate::audit::audit;
use crate::config::Config;
use crate::discover::discover;
use crate::doxygen::{IndexXml, XmlDirectory};
use crate::emit::{Emitter, Renderer, RstRenderer, UnitFailure};
use crate::error::{DoxtreeError, Result};
use crate::model::SymbolGraph;
use crate::reparent;
use crate::sort::sort_graph;
use crate::xref::{self, XrefReport};
use doxtree_api::{CompoundSource, DetailSource};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// Outcome of a completed run. Recoverable failures end up here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub nodes: usize,
    pub documents: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
    /// Files whose detail document could not be read.
    pub unresolved_files: Vec<String>,
    /// Names of nodes not reachable from any collection root.
    pub unreachable: Vec<String>,
}

pub struct Generator {
    config: Config,
    renderer: Box<dyn Renderer>,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            renderer: Box::new(RstRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the fully linked and sorted graph without writing anything.
    pub fn build_graph(
        &self,
        compounds: &dyn CompoundSource,
        details: &dyn DetailSource,
    ) -> Result<(SymbolGraph, XrefReport)> {
        let records = compounds.compounds().map_err(|e| {
            error!(error = %e, "Unable to query the indexer");
            DoxtreeError::Upstream(e)
        })?;

        let mut graph = discover(&records)?;
        reparent::reparent_all(&mut graph)?;
        let xrefs = xref::resolve(&mut graph, details, &self.config.strip_from_path);
        reparent::attach_files(&mut graph)?;
        sort_graph(&mut graph);
        Ok((graph, xrefs))
    }

    pub fn run(
        &self,
        compounds: &dyn CompoundSource,
        details: &dyn DetailSource,
    ) -> Result<GenerationReport> {
        let (graph, xrefs) = self.build_graph(compounds, details)?;
        let audit = audit(&graph)?;

        let emitter = Emitter::new(&graph, &self.config, self.renderer.as_ref());
        let emitted = emitter.emit_all()?;

        let mut failures: Vec<UnitFailure> = xrefs
            .failures
            .iter()
            .map(|(file, message)| {
                let err = DoxtreeError::Detail {
                    file: file.clone(),
                    message: message.clone(),
                };
                UnitFailure {
                    id: file.clone(),
                    message: err.to_string(),
                }
            })
            .collect();
        failures.extend(emitted.failures);

        let report = GenerationReport {
            nodes: graph.len(),
            documents: emitted.written,
            failures,
            unresolved_files: xrefs.failures.into_iter().map(|(file, _)| file).collect(),
            unreachable: audit
                .unreachable
                .iter()
                .map(|&id| graph.name(id).to_string())
                .collect(),
        };
        info!(
            nodes = report.nodes,
            documents = report.documents.len(),
            failures = report.failures.len(),
            "Generation finished"
        );
        Ok(report)
    }

    /// Runs against a Doxygen XML tree rooted at the configured index file.
    pub fn run_doxygen(&self) -> Result<GenerationReport> {
        let index = IndexXml::new(&self.config.index_path);
        let details = XmlDirectory::new(self.config.detail_dir())
            .map_err(|e| DoxtreeError::Precondition(e.to_string()))?;
        self.run(&index, &details)
    }
}
