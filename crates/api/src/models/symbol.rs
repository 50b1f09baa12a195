use super::graph::NodeKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One flat, typed unit of information about a symbol, as the indexer reports it.
///
/// `members` is `None` for records that expose no children accessor at all,
/// which is distinct from an accessor that returns nothing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct CompoundRecord {
    pub kind: NodeKind,
    pub name: String,
    pub refid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<CompoundRecord>>,
}

impl CompoundRecord {
    pub fn new(kind: NodeKind, name: impl Into<String>, refid: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            refid: refid.into(),
            members: None,
        }
    }

    pub fn with_members(mut self, members: Vec<CompoundRecord>) -> Self {
        self.members = Some(members);
        self
    }

    pub fn push_member(&mut self, member: CompoundRecord) {
        self.members.get_or_insert_with(Vec::new).push(member);
    }
}
