use doxtree_api::NodeKind;
use serde::Serialize;
use std::fmt;

/// Arena index of a [`Node`] inside a [`super::SymbolGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State only a `file` node carries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileInfo {
    pub location: String,
    pub includes: Vec<String>,
    /// `(refid, display name)` of every file including this one.
    pub included_by: Vec<(String, String)>,
    pub program_listing: Vec<String>,
    pub namespaces_used: Vec<NodeId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "payload", rename_all = "lowercase")]
pub enum Payload {
    Plain,
    File(FileInfo),
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    pub refid: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub payload: Payload,
}

impl Node {
    pub fn new(kind: NodeKind, name: impl Into<String>, refid: impl Into<String>) -> Self {
        let payload = match kind {
            NodeKind::File => Payload::File(FileInfo::default()),
            _ => Payload::Plain,
        };
        Self {
            kind,
            name: name.into(),
            refid: refid.into(),
            parent: None,
            children: Vec::new(),
            payload,
        }
    }

    /// The owning node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Owned children. For files this never includes members; see
    /// [`super::SymbolGraph::members`].
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn file_info(&self) -> Option<&FileInfo> {
        match &self.payload {
            Payload::File(info) => Some(info),
            Payload::Plain => None,
        }
    }

    pub fn file_info_mut(&mut self) -> Option<&mut FileInfo> {
        match &mut self.payload {
            Payload::File(info) => Some(info),
            Payload::Plain => None,
        }
    }

    /// Source location for files, empty otherwise.
    pub fn location(&self) -> &str {
        self.file_info().map(|f| f.location.as_str()).unwrap_or("")
    }

    /// Last component of the qualified name.
    pub fn unqualified_name(&self) -> &str {
        match self.kind {
            NodeKind::File | NodeKind::Dir => self.name.rsplit('/').next().unwrap_or(&self.name),
            _ => crate::scope::last_component(&self.name),
        }
    }
}
