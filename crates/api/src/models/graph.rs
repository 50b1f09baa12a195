use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of compound kinds an indexer can report.
///
/// Anything outside this set (pages, examples, concepts, ...) is not part of
/// the graph and is rejected by [`NodeKind::from_str`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Class,
    Struct,
    Function,
    Enum,
    EnumValue,
    Namespace,
    Define,
    Typedef,
    Variable,
    File,
    Dir,
    Union,
    Group,
}

impl NodeKind {
    pub const ALL: [NodeKind; 13] = [
        NodeKind::Class,
        NodeKind::Struct,
        NodeKind::Function,
        NodeKind::Enum,
        NodeKind::EnumValue,
        NodeKind::Namespace,
        NodeKind::Define,
        NodeKind::Typedef,
        NodeKind::Variable,
        NodeKind::File,
        NodeKind::Dir,
        NodeKind::Union,
        NodeKind::Group,
    ];

    /// The tag used by the indexer, also the sort key between unrelated kinds.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Struct => "struct",
            NodeKind::Function => "function",
            NodeKind::Enum => "enum",
            NodeKind::EnumValue => "enumvalue",
            NodeKind::Namespace => "namespace",
            NodeKind::Define => "define",
            NodeKind::Typedef => "typedef",
            NodeKind::Variable => "variable",
            NodeKind::File => "file",
            NodeKind::Dir => "dir",
            NodeKind::Union => "union",
            NodeKind::Group => "group",
        }
    }

    /// Human readable qualifier used in titles ("Class", "Directory", ...).
    pub fn qualifier(&self) -> &'static str {
        match self {
            NodeKind::Class => "Class",
            NodeKind::Struct => "Struct",
            NodeKind::Function => "Function",
            NodeKind::Enum => "Enum",
            NodeKind::EnumValue => "Enumvalue",
            NodeKind::Namespace => "Namespace",
            NodeKind::Define => "Define",
            NodeKind::Typedef => "Typedef",
            NodeKind::Variable => "Variable",
            NodeKind::File => "File",
            NodeKind::Dir => "Directory",
            NodeKind::Union => "Union",
            NodeKind::Group => "Group",
        }
    }

    /// Name of the directive that renders the indexer's own detail for this kind.
    pub fn directive(&self) -> Option<&'static str> {
        match self {
            NodeKind::Class => Some("doxygenclass"),
            NodeKind::Struct => Some("doxygenstruct"),
            NodeKind::Function => Some("doxygenfunction"),
            NodeKind::Enum => Some("doxygenenum"),
            NodeKind::EnumValue => Some("doxygenenumvalue"),
            NodeKind::Namespace => Some("doxygennamespace"),
            NodeKind::Define => Some("doxygendefine"),
            NodeKind::Typedef => Some("doxygentypedef"),
            NodeKind::Variable => Some("doxygenvariable"),
            NodeKind::File => Some("doxygenfile"),
            NodeKind::Union => Some("doxygenunion"),
            NodeKind::Group => Some("doxygengroup"),
            NodeKind::Dir => None,
        }
    }

    pub fn is_class_like(&self) -> bool {
        matches!(self, NodeKind::Class | NodeKind::Struct)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown compound kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("page".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_serde_uses_indexer_tags() {
        let json = serde_json::to_string(&NodeKind::EnumValue).unwrap();
        assert_eq!(json, "\"enumvalue\"");
        let kind: NodeKind = serde_json::from_str("\"dir\"").unwrap();
        assert_eq!(kind, NodeKind::Dir);
    }
}
