//! Structural checks run between sorting and emission.
//!
//! Ownership is mirrored into a petgraph digraph so cycle detection and
//! reachability use the library algorithms.

use crate::error::{DoxtreeError, Result};
use crate::model::{NodeId, SymbolGraph};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::Dfs;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Default, Clone)]
pub struct AuditReport {
    pub owned: usize,
    pub unreachable: Vec<NodeId>,
}

pub fn audit(graph: &SymbolGraph) -> Result<AuditReport> {
    let mut topology: StableDiGraph<NodeId, ()> = StableDiGraph::new();
    let index: Vec<NodeIndex> = graph.ids().map(|id| topology.add_node(id)).collect();
    for (id, node) in graph.nodes() {
        for &child in node.children() {
            topology.add_edge(index[id.index()], index[child.index()], ());
        }
    }

    if let Err(cycle) = toposort(&topology, None) {
        let id = topology[cycle.node_id()];
        return Err(DoxtreeError::CycleDetected(graph.name(id).to_string()));
    }

    let mut owned = 0;
    for id in graph.ids() {
        let owners: Vec<NodeId> = topology
            .neighbors_directed(index[id.index()], Direction::Incoming)
            .map(|ix| topology[ix])
            .collect();
        match owners.as_slice() {
            [] => {}
            [only] => {
                if graph.parent(id) != Some(*only) {
                    return Err(DoxtreeError::OwnershipConflict {
                        node: graph.name(id).to_string(),
                        first: graph.parent(id).map(|p| graph.name(p)).unwrap_or("<none>").to_string(),
                        second: graph.name(*only).to_string(),
                    });
                }
                owned += 1;
            }
            [first, second, ..] => {
                return Err(DoxtreeError::OwnershipConflict {
                    node: graph.name(id).to_string(),
                    first: graph.name(*first).to_string(),
                    second: graph.name(*second).to_string(),
                });
            }
        }
    }

    let mut reached: HashSet<NodeId> = HashSet::new();
    let mut dfs = Dfs::empty(&topology);
    for (_, roots) in graph.collections.labelled() {
        for &root in roots {
            dfs.move_to(index[root.index()]);
            while let Some(ix) = dfs.next(&topology) {
                reached.insert(topology[ix]);
            }
        }
    }

    let unreachable: Vec<NodeId> = graph.ids().filter(|id| !reached.contains(id)).collect();
    for &id in &unreachable {
        warn!(node = graph.name(id), kind = %graph.kind(id), "Node unreachable from any collection");
    }
    info!(owned, unreachable = unreachable.len(), "Ownership audit passed");

    Ok(AuditReport { owned, unreachable })
}
