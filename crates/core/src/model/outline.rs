use super::graph::SymbolGraph;
use super::node::NodeId;
use doxtree_api::NodeKind;
use std::fmt::Write;

impl SymbolGraph {
    /// Plain-text dump of every collection with its ownership subtrees.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (title, ids) in self.collections.labelled() {
            let _ = writeln!(out, "{title}");
            let _ = writeln!(out, "{}", "-".repeat(title.len()));
            for &id in ids {
                self.outline_node(&mut out, id, 0, true);
            }
            out.push('\n');
        }
        out
    }

    fn outline_node(&self, out: &mut String, id: NodeId, level: usize, expand: bool) {
        let node = self.node(id);
        let indent = "  ".repeat(level);
        let _ = writeln!(out, "{indent}- [{}]: {}", node.kind, node.name);
        if !expand {
            return;
        }
        let inner = "  ".repeat(level + 1);
        match node.kind {
            NodeKind::Dir => {
                for &child in node.children() {
                    self.outline_node(out, child, level + 1, false);
                }
            }
            NodeKind::File => {
                if let Some(info) = node.file_info() {
                    let _ = writeln!(out, "{inner}[[[ location=\"{}\" ]]]", info.location);
                    for include in &info.includes {
                        let _ = writeln!(out, "{inner}- #include <{include}>");
                    }
                    for (_, name) in &info.included_by {
                        let _ = writeln!(out, "{inner}- included by: [{name}]");
                    }
                    for &ns in &info.namespaces_used {
                        self.outline_node(out, ns, level + 1, false);
                    }
                }
                for &member in self.members(id) {
                    self.outline_node(out, member, level + 1, true);
                }
            }
            NodeKind::Class | NodeKind::Struct => {
                for &child in node.children() {
                    if matches!(
                        self.kind(child),
                        NodeKind::Class | NodeKind::Struct | NodeKind::Enum | NodeKind::Union
                    ) {
                        self.outline_node(out, child, level + 1, true);
                    }
                }
            }
            NodeKind::Union => {}
            _ => {
                for &child in node.children() {
                    self.outline_node(out, child, level + 1, true);
                }
            }
        }
    }
}
