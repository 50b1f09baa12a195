//! Owner lookup by qualified name.
//!
//! Matching is plain string equality against the scope left after dropping the
//! last component. The first candidate in collection order wins.

use crate::model::{NodeId, SymbolGraph};
use crate::scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    ClassFirst,
    NamespaceFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    ClassLike(NodeId),
    Namespace(NodeId),
}

impl Owner {
    pub fn id(self) -> NodeId {
        match self {
            Owner::ClassLike(id) | Owner::Namespace(id) => id,
        }
    }
}

pub fn resolve_owner(graph: &SymbolGraph, qualified: &str, preference: Preference) -> Option<Owner> {
    let scope = scope::parent_scope(qualified)?;
    let class = || {
        find_named(graph, &graph.collections.class_like, scope).map(Owner::ClassLike)
    };
    let namespace = || {
        find_named(graph, &graph.collections.namespaces, scope).map(Owner::Namespace)
    };
    match preference {
        Preference::ClassFirst => class().or_else(namespace),
        Preference::NamespaceFirst => namespace().or_else(class),
    }
}

fn find_named(graph: &SymbolGraph, pool: &[NodeId], name: &str) -> Option<NodeId> {
    pool.iter().copied().find(|&id| graph.name(id) == name)
}
