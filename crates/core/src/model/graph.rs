use super::node::{Node, NodeId};
use crate::error::{DoxtreeError, Result};
use doxtree_api::NodeKind;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Per-kind views over the arena.
///
/// A node leaves a view when it is confirmed owned elsewhere (nested unions,
/// nested class-likes, nested directories and namespaces); the node itself
/// stays in the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    pub class_like: Vec<NodeId>,
    pub namespaces: Vec<NodeId>,
    pub enums: Vec<NodeId>,
    pub enum_values: Vec<NodeId>,
    pub defines: Vec<NodeId>,
    pub files: Vec<NodeId>,
    pub dirs: Vec<NodeId>,
    pub functions: Vec<NodeId>,
    pub variables: Vec<NodeId>,
    pub groups: Vec<NodeId>,
    pub typedefs: Vec<NodeId>,
    pub unions: Vec<NodeId>,
}

impl Collections {
    pub fn for_kind(&self, kind: NodeKind) -> &Vec<NodeId> {
        match kind {
            NodeKind::Class | NodeKind::Struct => &self.class_like,
            NodeKind::Namespace => &self.namespaces,
            NodeKind::Enum => &self.enums,
            NodeKind::EnumValue => &self.enum_values,
            NodeKind::Define => &self.defines,
            NodeKind::File => &self.files,
            NodeKind::Dir => &self.dirs,
            NodeKind::Function => &self.functions,
            NodeKind::Variable => &self.variables,
            NodeKind::Group => &self.groups,
            NodeKind::Typedef => &self.typedefs,
            NodeKind::Union => &self.unions,
        }
    }

    pub fn for_kind_mut(&mut self, kind: NodeKind) -> &mut Vec<NodeId> {
        match kind {
            NodeKind::Class | NodeKind::Struct => &mut self.class_like,
            NodeKind::Namespace => &mut self.namespaces,
            NodeKind::Enum => &mut self.enums,
            NodeKind::EnumValue => &mut self.enum_values,
            NodeKind::Define => &mut self.defines,
            NodeKind::File => &mut self.files,
            NodeKind::Dir => &mut self.dirs,
            NodeKind::Function => &mut self.functions,
            NodeKind::Variable => &mut self.variables,
            NodeKind::Group => &mut self.groups,
            NodeKind::Typedef => &mut self.typedefs,
            NodeKind::Union => &mut self.unions,
        }
    }

    /// Every collection in a fixed order, labelled.
    pub fn labelled(&self) -> [(&'static str, &Vec<NodeId>); 12] {
        [
            ("Classes and Structs", &self.class_like),
            ("Defines", &self.defines),
            ("Enums", &self.enums),
            ("Enum Values", &self.enum_values),
            ("Functions", &self.functions),
            ("Files", &self.files),
            ("Directories", &self.dirs),
            ("Groups", &self.groups),
            ("Namespaces", &self.namespaces),
            ("Typedefs", &self.typedefs),
            ("Unions", &self.unions),
            ("Variables", &self.variables),
        ]
    }
}

/// The reconstructed symbol graph.
///
/// Two relations are kept apart: ownership (`Node::parent`/`Node::children`,
/// a forest) and file membership (`members`, many files may list symbols
/// they do not own).
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    nodes: Vec<Node>,
    by_refid: HashMap<String, NodeId>,
    members: HashMap<NodeId, Vec<NodeId>>,
    pub collections: Collections,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node unless its refid is already known.
    ///
    /// Returns the id and whether a new node was created.
    pub fn insert(&mut self, kind: NodeKind, name: &str, refid: &str) -> (NodeId, bool) {
        if let Some(&id) = self.by_refid.get(refid) {
            return (id, false);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, name, refid));
        self.by_refid.insert(refid.to_string(), id);
        self.collections.for_kind_mut(kind).push(id);
        (id, true)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn by_refid(&self, refid: &str) -> Option<NodeId> {
        self.by_refid.get(refid).copied()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Makes `parent` the owner of `child`.
    ///
    /// Attaching to the current owner again is a no-op and returns `false`;
    /// attaching to a different owner is an [`DoxtreeError::OwnershipConflict`].
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DoxtreeError::CycleDetected(self.name(child).to_string()));
        }
        match self.parent(child) {
            Some(current) if current == parent => Ok(false),
            Some(current) => Err(DoxtreeError::OwnershipConflict {
                node: self.name(child).to_string(),
                first: self.name(current).to_string(),
                second: self.name(parent).to_string(),
            }),
            None => {
                self.nodes[child.index()].parent = Some(parent);
                self.nodes[parent.index()].children.push(child);
                Ok(true)
            }
        }
    }

    /// True if `ancestor` appears on the owner chain of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = self.parent(id);
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Owner chain of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if out.contains(&current) {
                break;
            }
            out.push(current);
            cursor = self.parent(current);
        }
        out
    }

    /// Records `member` as a symbol declared in `file`. Returns `false` if already listed.
    pub fn add_member(&mut self, file: NodeId, member: NodeId) -> bool {
        let list = self.members.entry(file).or_default();
        if list.contains(&member) {
            return false;
        }
        list.push(member);
        true
    }

    pub fn members(&self, file: NodeId) -> &[NodeId] {
        self.members.get(&file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn members_mut(&mut self, file: NodeId) -> Option<&mut Vec<NodeId>> {
        self.members.get_mut(&file)
    }

    /// Files listing `id` as a member, in file collection order.
    pub fn files_listing(&self, id: NodeId) -> Vec<NodeId> {
        self.collections
            .files
            .iter()
            .copied()
            .filter(|&f| self.members(f).contains(&id))
            .collect()
    }

    /// Removes `id` from the view collection of its kind.
    pub fn remove_from_collection(&mut self, id: NodeId) {
        let kind = self.kind(id);
        self.collections.for_kind_mut(kind).retain(|&n| n != id);
    }

    /// Pre-order walk of the ownership subtree rooted at `root`, root included.
    pub fn subtree(&self, root: NodeId) -> Subtree<'_> {
        Subtree {
            graph: self,
            stack: vec![root],
        }
    }

    /// Every node of a kind accepted by `pred` under any of `roots`, roots included.
    pub fn nested<F>(&self, roots: &[NodeId], pred: F) -> Vec<NodeId>
    where
        F: Fn(NodeKind) -> bool,
    {
        let mut out = IndexSet::new();
        for &root in roots {
            out.extend(self.subtree(root).filter(|&id| pred(self.kind(id))));
        }
        out.into_iter().collect()
    }
}

pub struct Subtree<'a> {
    graph: &'a SymbolGraph,
    stack: Vec<NodeId>,
}

impl Iterator for Subtree<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.graph.children(id).iter().rev().copied());
        Some(id)
    }
}
