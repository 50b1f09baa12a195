//! Graph discovery over the indexer's compound records.
//!
//! The traversal uses an explicit stack. A record's members are expanded at
//! most once (keyed by refid), and only members seen for the first time are
//! linked to the record. Members of class-like and union records are only
//! followed when they are nested enums or unions.

use crate::error::Result;
use crate::model::{NodeId, SymbolGraph};
use doxtree_api::{CompoundRecord, NodeKind};
use std::collections::HashSet;
use tracing::info;

/// Whether a member of kind `member` under an owner of kind `owner` becomes a node.
fn tracks_member(owner: NodeKind, member: NodeKind) -> bool {
    match owner {
        NodeKind::Class | NodeKind::Struct | NodeKind::Union => {
            matches!(member, NodeKind::Enum | NodeKind::Union)
        }
        _ => true,
    }
}

pub fn discover(records: &[CompoundRecord]) -> Result<SymbolGraph> {
    let mut graph = SymbolGraph::new();
    let mut expanded: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&CompoundRecord> = records.iter().collect();

    while let Some(record) = stack.pop() {
        let (id, _) = graph.insert(record.kind, &record.name, &record.refid);
        // Member stubs carry no members and must not block the full record.
        let Some(members) = &record.members else {
            continue;
        };
        if !expanded.insert(record.refid.as_str()) {
            continue;
        }

        for member in members {
            if !tracks_member(record.kind, member.kind) {
                continue;
            }
            let (child, created) = graph.insert(member.kind, &member.name, &member.refid);
            if !created {
                continue;
            }
            stack.push(member);
            link(&mut graph, id, child)?;
        }
    }

    info!(
        nodes = graph.len(),
        class_like = graph.collections.class_like.len(),
        namespaces = graph.collections.namespaces.len(),
        files = graph.collections.files.len(),
        dirs = graph.collections.dirs.len(),
        "Discovered symbol graph"
    );
    Ok(graph)
}

fn link(graph: &mut SymbolGraph, owner: NodeId, child: NodeId) -> Result<()> {
    // The owning enum of an enum value cannot be recovered from the index.
    if graph.kind(child) == NodeKind::EnumValue {
        return Ok(());
    }
    if graph.kind(owner) == NodeKind::File {
        graph.add_member(owner, child);
        return Ok(());
    }
    graph.attach(owner, child)?;
    Ok(())
}
