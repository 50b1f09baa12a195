//! Document emission.
//!
//! The emitter only reads the graph. Every document is built as a semantic
//! [`Document`] and serialized by a [`Renderer`]. A document that fails to
//! write is reported and skipped; ownership violations and failure to write
//! the output directory or root document abort the run.

pub mod document;
pub mod full_listing;
pub mod listing;
pub mod naming;
pub mod node_docs;
pub mod rst;
pub mod views;

pub use document::{Block, Document, HeadingLevel, Inline, ListItem};
pub use naming::{NameTable, NodeNames};
pub use rst::{Renderer, RstRenderer};

use crate::config::Config;
use crate::error::{DoxtreeError, Result};
use crate::model::{NodeId, SymbolGraph};
use crate::sort::sort_ids;
use doxtree_api::NodeKind;
use indexmap::IndexSet;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

pub const CLASS_VIEW_ID: &str = "class_view_hierarchy";
pub const DIRECTORY_VIEW_ID: &str = "directory_view_hierarchy";
pub const FULL_LISTING_ID: &str = "unabridged_api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

pub struct Emitter<'a> {
    graph: &'a SymbolGraph,
    config: &'a Config,
    renderer: &'a dyn Renderer,
    names: NameTable,
}

impl<'a> Emitter<'a> {
    pub fn new(graph: &'a SymbolGraph, config: &'a Config, renderer: &'a dyn Renderer) -> Self {
        Self {
            graph,
            config,
            renderer,
            names: NameTable::build(graph),
        }
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub(crate) fn anchor(&self, id: NodeId) -> &str {
        &self.names.get(id).anchor
    }

    pub(crate) fn sorted(&self, ids: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = ids.into_iter().collect();
        sort_ids(self.graph, &mut ids);
        ids
    }

    /// Nodes that get a leaf document: every class-like (nested included),
    /// enum, union, function, typedef, variable and define.
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        let c = &self.graph.collections;
        let class_like = self.graph.nested(&c.class_like, |k| k.is_class_like());
        let nested_enums = self.graph.nested(&c.class_like, |k| k == NodeKind::Enum);
        let nested_unions = self.graph.nested(&c.class_like, |k| k == NodeKind::Union);

        let mut leaves: IndexSet<NodeId> = IndexSet::new();
        leaves.extend(class_like);
        leaves.extend(c.enums.iter().copied());
        leaves.extend(nested_enums);
        leaves.extend(c.unions.iter().copied());
        leaves.extend(nested_unions);
        leaves.extend(c.functions.iter().copied());
        leaves.extend(c.typedefs.iter().copied());
        leaves.extend(c.variables.iter().copied());
        leaves.extend(c.defines.iter().copied());
        leaves.into_iter().collect()
    }

    pub fn emit_all(&self) -> Result<EmitReport> {
        std::fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            error!(dir = %self.config.output_dir.display(), error = %e, "Cannot create output directory");
            DoxtreeError::Io(e)
        })?;

        let mut report = EmitReport::default();
        let c = &self.graph.collections;

        for id in self.leaf_nodes() {
            let doc = self.leaf_document(id)?;
            self.write_unit(&doc, &mut report);
        }

        let namespaces = self.graph.nested(&c.namespaces, |k| k == NodeKind::Namespace);
        for id in namespaces {
            let doc = self.namespace_document(id);
            self.write_unit(&doc, &mut report);
        }

        for &id in &c.files {
            if let Some(doc) = self.program_listing_document(id) {
                self.write_unit(&doc, &mut report);
            }
            let doc = self.file_document(id);
            self.write_unit(&doc, &mut report);
        }

        let dirs = self.graph.nested(&c.dirs, |k| k == NodeKind::Dir);
        for id in dirs {
            let doc = self.directory_document(id);
            self.write_unit(&doc, &mut report);
        }

        self.write_unit(&self.class_view(), &mut report);
        self.write_unit(&self.directory_view(), &mut report);
        self.write_unit(&self.full_listing(), &mut report);

        let root = self.root_document();
        let path = self.write(&root).inspect_err(|e| {
            error!(error = %e, "Fatal error generating the root document");
        })?;
        report.written.push(path);

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "Documents emitted"
        );
        Ok(report)
    }

    pub fn root_document(&self) -> Document {
        let mut doc = Document::new(self.config.root_id()).titled(&self.config.root_file_title);
        if !self.config.after_title_description.is_empty() {
            doc.push(Block::Paragraph(vec![Inline::Text(
                self.config.after_title_description.clone(),
            )]));
        }
        doc.push(Block::Include(CLASS_VIEW_ID.to_string()));
        doc.push(Block::Include(DIRECTORY_VIEW_ID.to_string()));
        doc.push(Block::Include(FULL_LISTING_ID.to_string()));
        if !self.config.after_body_summary.is_empty() {
            doc.push(Block::Paragraph(vec![Inline::Text(
                self.config.after_body_summary.clone(),
            )]));
        }
        doc
    }

    fn write(&self, doc: &Document) -> Result<PathBuf> {
        let path = self
            .config
            .output_dir
            .join(format!("{}.{}", doc.id, self.renderer.extension()));
        std::fs::write(&path, self.renderer.render(doc)).map_err(|source| {
            DoxtreeError::Document {
                id: doc.id.clone(),
                source,
            }
        })?;
        Ok(path)
    }

    fn write_unit(&self, doc: &Document, report: &mut EmitReport) {
        match self.write(doc) {
            Ok(path) => report.written.push(path),
            Err(e) => {
                error!(document = %doc.id, error = %e, "Failed to generate document");
                report.failures.push(UnitFailure {
                    id: doc.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
}
