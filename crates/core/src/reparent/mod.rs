//! Containment recovery.
//!
//! The five passes run in a fixed order; later passes read names and
//! attachments left by earlier ones:
//!
//! 1. unions to class-likes (preferred) or namespaces
//! 2. class-likes to namespaces (preferred) or enclosing class-likes
//! 3. directories to their parent directory
//! 4. namespace children renamed to carry the namespace prefix
//! 5. namespaces to their parent namespace
//!
//! Every pass is idempotent: attaching to an existing owner is a no-op.

pub mod owner;

use crate::error::Result;
use crate::model::{NodeId, SymbolGraph};
use crate::scope;
use doxtree_api::NodeKind;
use owner::{Owner, Preference, resolve_owner};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub unions: usize,
    pub class_like: usize,
    pub dirs: usize,
    pub renamed: usize,
    pub namespaces: usize,
}

impl PassStats {
    pub fn is_noop(&self) -> bool {
        *self == PassStats::default()
    }
}

pub fn reparent_all(graph: &mut SymbolGraph) -> Result<PassStats> {
    let stats = PassStats {
        unions: reparent_unions(graph)?,
        class_like: reparent_class_like(graph)?,
        dirs: reparent_directories(graph)?,
        renamed: rename_to_namespace_scopes(graph),
        namespaces: reparent_namespaces(graph)?,
    };
    info!(
        unions = stats.unions,
        class_like = stats.class_like,
        dirs = stats.dirs,
        renamed = stats.renamed,
        namespaces = stats.namespaces,
        "Reparenting complete"
    );
    Ok(stats)
}

/// Unions nested in a class-like leave the union collection; the owner documents them.
pub fn reparent_unions(graph: &mut SymbolGraph) -> Result<usize> {
    let mut attached = 0;
    let mut removals = Vec::new();
    for union in graph.collections.unions.clone() {
        match resolve_owner(graph, graph.name(union), Preference::ClassFirst) {
            Some(Owner::ClassLike(owner)) => {
                attached += usize::from(graph.attach(owner, union)?);
                removals.push(union);
            }
            Some(Owner::Namespace(owner)) => {
                attached += usize::from(graph.attach(owner, union)?);
            }
            None => {}
        }
    }
    for union in removals {
        graph.remove_from_collection(union);
    }
    Ok(attached)
}

/// Nested class-likes leave the class-like collection; namespace members stay.
pub fn reparent_class_like(graph: &mut SymbolGraph) -> Result<usize> {
    let mut attached = 0;
    let mut removals = Vec::new();
    for class in graph.collections.class_like.clone() {
        match resolve_owner(graph, graph.name(class), Preference::NamespaceFirst) {
            Some(Owner::Namespace(owner)) => {
                attached += usize::from(graph.attach(owner, class)?);
            }
            Some(Owner::ClassLike(owner)) => {
                attached += usize::from(graph.attach(owner, class)?);
                removals.push(class);
            }
            None => {}
        }
    }
    for class in removals {
        graph.remove_from_collection(class);
    }
    Ok(attached)
}

pub fn reparent_directories(graph: &mut SymbolGraph) -> Result<usize> {
    reparent_ranked(graph, NodeKind::Dir, |name| name.split('/').count(), scope::parent_path)
}

pub fn reparent_namespaces(graph: &mut SymbolGraph) -> Result<usize> {
    reparent_ranked(graph, NodeKind::Namespace, scope::depth, scope::parent_scope)
}

/// Prefixes each direct namespace child with `<namespace>::` unless already present.
pub fn rename_to_namespace_scopes(graph: &mut SymbolGraph) -> usize {
    let mut renamed = 0;
    for ns in graph.collections.namespaces.clone() {
        let prefix = format!("{}{}", graph.name(ns), scope::SEPARATOR);
        for child in graph.children(ns).to_vec() {
            let node = graph.node_mut(child);
            if !node.name.starts_with(&prefix) {
                debug!(from = %node.name, prefix = %prefix, "Qualifying namespace member");
                node.name = format!("{prefix}{}", node.name);
                renamed += 1;
            }
        }
    }
    renamed
}

/// Attaches each node of `kind` to the node one rank up whose name is its exact
/// parent name, deepest ranks first. Attached nodes leave the collection.
fn reparent_ranked(
    graph: &mut SymbolGraph,
    kind: NodeKind,
    rank_of: fn(&str) -> usize,
    parent_of: fn(&str) -> Option<&str>,
) -> Result<usize> {
    let mut ranked: Vec<(usize, NodeId)> = graph
        .collections
        .for_kind(kind)
        .iter()
        .map(|&id| (rank_of(graph.name(id)), id))
        .collect();
    ranked.sort_by_key(|&(rank, _)| rank);

    let mut attached = 0;
    let mut removals: Vec<NodeId> = Vec::new();
    for &(rank, id) in ranked.iter().rev() {
        if rank < 2 {
            break;
        }
        let parent = parent_of(graph.name(id)).and_then(|parent_name| {
            ranked
                .iter()
                .rev()
                .find(|&&(r, candidate)| r == rank - 1 && graph.name(candidate) == parent_name)
                .map(|&(_, candidate)| candidate)
        });
        if let Some(parent) = parent {
            attached += usize::from(graph.attach(parent, id)?);
            if !removals.contains(&id) {
                removals.push(id);
            }
        }
    }
    for id in removals {
        graph.remove_from_collection(id);
    }
    Ok(attached)
}

/// Makes each file owned by the directory named by its location's parent path.
///
/// Runs after cross-reference resolution, which supplies the locations. Files
/// stay in the file collection.
pub fn attach_files(graph: &mut SymbolGraph) -> Result<usize> {
    let mut attached = 0;
    for file in graph.collections.files.clone() {
        let dir = {
            let location = graph.node(file).location();
            scope::parent_path(location).and_then(|dir_path| {
                graph
                    .nodes()
                    .find(|(_, n)| n.kind == NodeKind::Dir && n.name == dir_path)
                    .map(|(id, _)| id)
            })
        };
        match dir {
            Some(dir) => attached += usize::from(graph.attach(dir, file)?),
            None => debug!(file = graph.name(file), "No directory for file location"),
        }
    }
    info!(attached, "Attached files to directories");
    Ok(attached)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(graph: &mut SymbolGraph, kind: NodeKind, name: &str) -> NodeId {
        graph.insert(kind, name, &format!("{kind}_{name}")).0
    }

    #[test]
    fn test_union_prefers_class_owner() {
        let mut graph = SymbolGraph::new();
        let ns = insert(&mut graph, NodeKind::Namespace, "ns");
        let widget = insert(&mut graph, NodeKind::Class, "ns::Widget");
        let color = insert(&mut graph, NodeKind::Union, "ns::Widget::Color");
        let value = insert(&mut graph, NodeKind::Union, "ns::Value");

        assert_eq!(reparent_unions(&mut graph).unwrap(), 2);
        assert_eq!(graph.parent(color), Some(widget));
        assert_eq!(graph.parent(value), Some(ns));
        assert_eq!(graph.collections.unions, vec![value]);
    }

    #[test]
    fn test_unmatched_class_stays_top_level() {
        let mut graph = SymbolGraph::new();
        let orphan = insert(&mut graph, NodeKind::Class, "missing::Thing");
        reparent_class_like(&mut graph).unwrap();
        assert_eq!(graph.parent(orphan), None);
        assert_eq!(graph.collections.class_like, vec![orphan]);
    }

    #[test]
    fn test_rename_skips_already_qualified() {
        let mut graph = SymbolGraph::new();
        let ns = insert(&mut graph, NodeKind::Namespace, "util");
        let var = insert(&mut graph, NodeKind::Variable, "helper");
        let cls = insert(&mut graph, NodeKind::Class, "util::Thing");
        graph.attach(ns, var).unwrap();
        graph.attach(ns, cls).unwrap();

        assert_eq!(rename_to_namespace_scopes(&mut graph), 1);
        assert_eq!(graph.name(var), "util::helper");
        assert_eq!(graph.name(cls), "util::Thing");
    }

    #[test]
    fn test_nested_namespaces_chain() {
        let mut graph = SymbolGraph::new();
        let a = insert(&mut graph, NodeKind::Namespace, "a");
        let b = insert(&mut graph, NodeKind::Namespace, "a::b");
        let c = insert(&mut graph, NodeKind::Namespace, "a::b::c");

        assert_eq!(reparent_namespaces(&mut graph).unwrap(), 2);
        assert_eq!(graph.parent(c), Some(b));
        assert_eq!(graph.parent(b), Some(a));
        assert_eq!(graph.collections.namespaces, vec![a]);
    }

    #[test]
    fn test_directory_without_parent_stays_top_level() {
        let mut graph = SymbolGraph::new();
        let a = insert(&mut graph, NodeKind::Dir, "a");
        let deep = insert(&mut graph, NodeKind::Dir, "a/b/c");
        reparent_directories(&mut graph).unwrap();
        assert_eq!(graph.parent(deep), None);
        assert_eq!(graph.collections.dirs, vec![a, deep]);
    }

    #[test]
    fn test_attach_files_uses_exact_directory() {
        let mut graph = SymbolGraph::new();
        let dir = insert(&mut graph, NodeKind::Dir, "include/core");
        insert(&mut graph, NodeKind::Dir, "include");
        let file = insert(&mut graph, NodeKind::File, "a.h");
        let loose = insert(&mut graph, NodeKind::File, "b.h");
        graph.node_mut(file).file_info_mut().unwrap().location = "include/core/a.h".into();
        graph.node_mut(loose).file_info_mut().unwrap().location = "b.h".into();

        assert_eq!(attach_files(&mut graph).unwrap(), 1);
        assert_eq!(graph.parent(file), Some(dir));
        assert_eq!(graph.parent(loose), None);
        assert_eq!(graph.collections.files, vec![file, loose]);
    }
}
