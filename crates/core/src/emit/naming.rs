//! Document ids, anchors and titles.
//!
//! Ids derive from the kind and a sanitized qualified name; files use their
//! sanitized location so same-named files in different directories stay apart.

use crate::model::{NodeId, SymbolGraph};
use crate::scope;
use doxtree_api::NodeKind;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeNames {
    pub doc_id: String,
    pub anchor: String,
    /// Title without the kind qualifier.
    pub label: String,
    /// `"<Qualifier> <label>"`.
    pub title: String,
    /// Program listing document id (files only), also its anchor.
    pub program: Option<String>,
}

pub fn safe_name(name: &str) -> String {
    name.replace([':', '/'], "_")
}

fn template_safe_name(name: &str) -> String {
    name.replace([':', '/', ' '], "_")
        .replace('<', "LT_")
        .replace('>', "_GT")
        .replace(',', "")
}

fn is_template(name: &str) -> bool {
    name.contains('<') && name.contains('>')
}

/// Converts an anchor to the id a browser sees in the rendered page.
pub fn html_anchor(anchor: &str) -> String {
    anchor.replace("__", "_").replace('_', "-")
}

fn label_for(graph: &SymbolGraph, id: NodeId) -> String {
    let node = graph.node(id);
    match node.kind {
        NodeKind::Dir => node.unqualified_name().to_string(),
        NodeKind::Variable | NodeKind::Typedef | NodeKind::Namespace | NodeKind::File => {
            node.name.clone()
        }
        kind => {
            let base = scope::last_component(&node.name).to_string();
            let nested_in_class = matches!(
                kind,
                NodeKind::Class | NodeKind::Struct | NodeKind::Enum | NodeKind::Union
            ) && graph
                .parent(id)
                .is_some_and(|p| graph.kind(p).is_class_like());
            match graph.parent(id) {
                Some(parent) if nested_in_class => {
                    format!("{}::{base}", scope::last_component(graph.name(parent)))
                }
                _ => base,
            }
        }
    }
}

pub fn names_for(graph: &SymbolGraph, id: NodeId) -> NodeNames {
    let node = graph.node(id);
    let safe = match node.kind {
        NodeKind::File if !node.location().is_empty() => safe_name(node.location()),
        _ if is_template(&node.name) => template_safe_name(&node.name),
        _ => safe_name(&node.name),
    };
    let label = label_for(graph, id);
    NodeNames {
        doc_id: format!("{}_{safe}", node.kind),
        anchor: format!("{}_{safe}", node.kind.qualifier().to_lowercase()),
        title: format!("{} {label}", node.kind.qualifier()),
        label,
        program: (node.kind == NodeKind::File).then(|| format!("program_listing_file_{safe}")),
    }
}

/// Names for every node, with numeric suffixes where two nodes would share a document.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: Vec<NodeNames>,
}

impl NameTable {
    pub fn build(graph: &SymbolGraph) -> Self {
        let mut taken: HashSet<String> = HashSet::new();
        let mut names = Vec::with_capacity(graph.len());
        for id in graph.ids() {
            let mut entry = names_for(graph, id);
            if !taken.insert(entry.doc_id.clone()) {
                let mut n = 2;
                while taken.contains(&format!("{}_{n}", entry.doc_id)) {
                    n += 1;
                }
                entry.doc_id = format!("{}_{n}", entry.doc_id);
                entry.anchor = format!("{}_{n}", entry.anchor);
                if let Some(program) = entry.program.as_mut() {
                    program.push_str(&format!("_{n}"));
                }
                taken.insert(entry.doc_id.clone());
            }
            names.push(entry);
        }
        Self { names }
    }

    pub fn get(&self, id: NodeId) -> &NodeNames {
        &self.names[id.index()]
    }
}
