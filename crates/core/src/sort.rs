//! Deterministic ordering of graph collections.

use crate::model::{Node, NodeId, SymbolGraph};
use doxtree_api::NodeKind;
use std::cmp::Ordering;
use tracing::debug;

/// Total order over nodes.
///
/// Class-likes sort before every other kind, structs before classes. Other
/// kinds group by kind tag. Within a kind names compare case-insensitively;
/// exact name and refid break the remaining ties.
pub fn node_order(a: &Node, b: &Node) -> Ordering {
    kind_order(a.kind, b.kind)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.refid.cmp(&b.refid))
}

fn kind_order(a: NodeKind, b: NodeKind) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match (a.is_class_like(), b.is_class_like()) {
        (true, true) => {
            if a == NodeKind::Struct {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.as_str().cmp(b.as_str()),
    }
}

pub fn sort_ids(graph: &SymbolGraph, ids: &mut [NodeId]) {
    ids.sort_by(|&a, &b| node_order(graph.node(a), graph.node(b)));
}

/// Sorts a slice and every owned subtree below it, plus file member lists.
pub fn deep_sort(graph: &mut SymbolGraph, ids: &mut [NodeId]) {
    sort_ids(graph, ids);
    let mut stack: Vec<NodeId> = ids.to_vec();
    while let Some(id) = stack.pop() {
        let mut children = graph.children(id).to_vec();
        sort_ids(graph, &mut children);
        stack.extend(children.iter().copied());
        graph.node_mut(id).children = children;

        let mut members = graph.members(id).to_vec();
        if !members.is_empty() {
            sort_ids(graph, &mut members);
            if let Some(slot) = graph.members_mut(id) {
                *slot = members;
            }
        }
    }
}

pub fn sort_graph(graph: &mut SymbolGraph) {
    macro_rules! flat {
        ($($field:ident),*) => {$(
            let mut ids = std::mem::take(&mut graph.collections.$field);
            sort_ids(graph, &mut ids);
            graph.collections.$field = ids;
        )*};
    }
    macro_rules! deep {
        ($($field:ident),*) => {$(
            let mut ids = std::mem::take(&mut graph.collections.$field);
            deep_sort(graph, &mut ids);
            graph.collections.$field = ids;
        )*};
    }

    flat!(defines, enums, enum_values, functions, groups, typedefs, variables);
    deep!(class_like, namespaces, unions, files, dirs);
    debug!(nodes = graph.len(), "Sorted graph collections");
}
