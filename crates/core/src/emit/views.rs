//! Class and directory hierarchy views.
//!
//! Both views render as a nested reference list, or as raw HTML for a
//! collapsible tree widget where the final `<li>` of every list carries the
//! `lastChild` class. Nodes of the view's kinds that no root reaches are
//! appended at top level so nothing is left out.

use super::document::{Block, Document, ListItem};
use super::naming::html_anchor;
use super::{CLASS_VIEW_ID, DIRECTORY_VIEW_ID, Emitter};
use crate::model::NodeId;
use doxtree_api::NodeKind;
use std::collections::HashSet;

const CONTENT_INDENT: &str = "     ";

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Which hierarchy is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Class,
    Directory,
}

impl View {
    fn id(self) -> &'static str {
        match self {
            View::Class => CLASS_VIEW_ID,
            View::Directory => DIRECTORY_VIEW_ID,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            View::Class => "Class Hierarchy",
            View::Directory => "File Hierarchy",
        }
    }
}

#[derive(Default)]
struct ViewOut {
    items: Vec<ListItem>,
    lines: Vec<String>,
}

impl Emitter<'_> {
    /// Whether `id` shows up in `view`: leaf kinds directly, containers only
    /// when something below them does.
    fn in_view(&self, view: View, id: NodeId) -> bool {
        match (view, self.graph.kind(id)) {
            (View::Class, NodeKind::Namespace) | (View::Directory, NodeKind::Dir) => self
                .graph
                .children(id)
                .iter()
                .any(|&c| self.in_view(view, c)),
            (View::Class, kind) => {
                kind.is_class_like() || matches!(kind, NodeKind::Enum | NodeKind::Union)
            }
            (View::Directory, kind) => kind == NodeKind::File,
        }
    }

    /// Children of `id` rendered beneath it, in display order.
    fn view_children(&self, view: View, id: NodeId) -> Vec<NodeId> {
        let children = self.graph.children(id);
        let of = |pred: &dyn Fn(NodeKind) -> bool| {
            self.sorted(
                children
                    .iter()
                    .copied()
                    .filter(|&c| pred(self.graph.kind(c)) && self.in_view(view, c)),
            )
        };
        let mut out = Vec::new();
        match (view, self.graph.kind(id)) {
            (View::Class, NodeKind::Namespace) => {
                out.extend(of(&|k| k != NodeKind::Namespace));
                out.extend(of(&|k| k == NodeKind::Namespace));
            }
            (View::Class, kind) if kind.is_class_like() => {
                out.extend(of(&|k| k.is_class_like()));
                out.extend(of(&|k| k == NodeKind::Enum));
                out.extend(of(&|k| k == NodeKind::Union));
            }
            (View::Directory, NodeKind::Dir) => {
                out.extend(of(&|k| k == NodeKind::File));
                out.extend(of(&|k| k == NodeKind::Dir));
            }
            _ => {}
        }
        out
    }

    fn mark_placed(&self, view: View, root: NodeId, placed: &mut HashSet<NodeId>) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if placed.insert(id) {
                stack.extend(self.view_children(view, id));
            }
        }
    }

    /// Top-level entries: the roots that show up, then every node of the
    /// view's kinds that no earlier entry already covers.
    fn view_entries(&self, view: View) -> Vec<NodeId> {
        let c = &self.graph.collections;
        let (roots, candidates) = match view {
            View::Class => {
                let mut candidates = self.sorted(c.class_like.iter().copied());
                candidates.extend(self.sorted(c.enums.iter().copied()));
                candidates.extend(self.sorted(c.unions.iter().copied()));
                (&c.namespaces, candidates)
            }
            View::Directory => (&c.dirs, self.sorted(c.files.iter().copied())),
        };

        let mut placed = HashSet::new();
        let mut entries: Vec<NodeId> = self
            .sorted(roots.iter().copied())
            .into_iter()
            .filter(|&r| self.in_view(view, r))
            .collect();
        for &root in &entries {
            self.mark_placed(view, root, &mut placed);
        }
        for candidate in candidates {
            if !placed.contains(&candidate) {
                self.mark_placed(view, candidate, &mut placed);
                entries.push(candidate);
            }
        }
        entries
    }

    fn tree_link(&self, id: NodeId) -> String {
        let names = self.names.get(id);
        format!(
            "{} <a href=\"{}.html#{}\">{}</a>",
            self.graph.kind(id).qualifier(),
            names.doc_id,
            html_anchor(&names.anchor),
            escape_html(&names.label)
        )
    }

    fn render_view_node(&self, view: View, id: NodeId, level: usize, last: bool, out: &mut ViewOut) {
        let children = self.view_children(view, id);
        let mut item = ListItem::link(self.anchor(id));
        item.level = level;
        out.items.push(item);

        let indent = "    ".repeat(level);
        let opening = if last { "<li class=\"lastChild\">" } else { "<li>" };
        let link = self.tree_link(id);
        if children.is_empty() {
            out.lines.push(format!("{indent}{opening}{link}</li>"));
            return;
        }
        out.lines.push(format!("{indent}{opening}"));
        out.lines.push(format!("{indent}  {link}"));
        out.lines.push(format!("{indent}  <ul>"));
        let final_index = children.len() - 1;
        for (i, child) in children.into_iter().enumerate() {
            self.render_view_node(view, child, level + 1, i == final_index, out);
        }
        out.lines.push(format!("{indent}  </ul>"));
        out.lines.push(format!("{indent}</li>"));
    }

    fn view_document(&self, view: View) -> Document {
        let entries = self.view_entries(view);
        let mut out = ViewOut::default();
        let final_index = entries.len().saturating_sub(1);
        for (i, id) in entries.into_iter().enumerate() {
            self.render_view_node(view, id, 0, i == final_index, &mut out);
        }

        let mut doc = Document::new(view.id());
        doc.push(Block::section(view.heading()));
        if self.config.tree_view {
            let mut lines = vec![
                "<ul class=\"treeView\">".to_string(),
                "  <li>".to_string(),
                "    <ul class=\"collapsibleList\">".to_string(),
            ];
            lines.extend(out.lines.into_iter().map(|l| format!("{CONTENT_INDENT}{l}")));
            lines.push("    </ul><!-- collapsibleList -->".to_string());
            lines.push("  </li><!-- only tree view element -->".to_string());
            lines.push("</ul><!-- treeView -->".to_string());
            doc.push(Block::Raw {
                format: "html".to_string(),
                lines,
            });
        } else {
            doc.push(Block::List(out.items));
        }
        doc
    }

    pub fn class_view(&self) -> Document {
        self.view_document(View::Class)
    }

    pub fn directory_view(&self) -> Document {
        self.view_document(View::Directory)
    }
}
