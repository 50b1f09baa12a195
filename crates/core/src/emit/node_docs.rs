//! Per-node documents: leaves, namespaces, files and directories.

use super::document::{Block, Document, Inline, ListItem};
use super::Emitter;
use crate::error::{DoxtreeError, Result};
use crate::model::NodeId;
use doxtree_api::NodeKind;

impl Emitter<'_> {
    fn file_conflict(&self, node: NodeId, files: &[NodeId]) -> DoxtreeError {
        DoxtreeError::OwnershipConflict {
            node: self.graph.name(node).to_string(),
            first: self.graph.name(files[0]).to_string(),
            second: self.graph.name(files[1]).to_string(),
        }
    }

    /// The single file declaring `id`.
    ///
    /// Nested types no file lists fall back to the nearest listed ancestor.
    /// More than one file claiming the same node is fatal.
    pub fn defining_file(&self, id: NodeId) -> Result<Option<NodeId>> {
        let files = self.graph.files_listing(id);
        match files.len() {
            0 => {}
            1 => return Ok(Some(files[0])),
            _ => return Err(self.file_conflict(id, &files)),
        }

        let nested_in_class = self
            .graph
            .parent(id)
            .is_some_and(|p| self.graph.kind(p).is_class_like());
        if !nested_in_class {
            return Ok(None);
        }
        for ancestor in self.graph.ancestors(id) {
            let files = self.graph.files_listing(ancestor);
            match files.len() {
                0 => continue,
                1 => return Ok(Some(files[0])),
                _ => return Err(self.file_conflict(ancestor, &files)),
            }
        }
        Ok(None)
    }

    pub fn leaf_document(&self, id: NodeId) -> Result<Document> {
        let node = self.graph.node(id);
        let names = self.names.get(id);
        let mut doc = Document::new(&names.doc_id)
            .anchored(&names.anchor)
            .titled(&names.title);

        let mut header = Vec::new();
        if let Some(file) = self.defining_file(id)? {
            header.push(ListItem::new(vec![
                Inline::Text("Defined in ".to_string()),
                Inline::Ref(self.anchor(file).to_string()),
            ]));
        }
        if let Some(parent) = self.graph.parent(id) {
            if self.graph.kind(parent).is_class_like() {
                header.push(ListItem::new(vec![
                    Inline::Text("Nested type of ".to_string()),
                    Inline::Ref(self.anchor(parent).to_string()),
                ]));
            }
        }
        if !header.is_empty() {
            doc.push(Block::List(header));
        }

        if node.kind.is_class_like() {
            let mut nested: Vec<NodeId> = self
                .graph
                .nested(node.children(), |k| {
                    k.is_class_like() || matches!(k, NodeKind::Enum | NodeKind::Union)
                });
            if !nested.is_empty() {
                nested.sort_by(|&a, &b| self.graph.name(a).cmp(self.graph.name(b)));
                doc.push(Block::Paragraph(vec![
                    Inline::Strong("Nested Types".to_string()),
                    Inline::Text(":".to_string()),
                ]));
                doc.push(Block::List(
                    nested
                        .into_iter()
                        .map(|n| ListItem::link(self.anchor(n)))
                        .collect(),
                ));
            }
        }

        if let Some(directive) = node.kind.directive() {
            doc.push(Block::Directive {
                name: directive.to_string(),
                argument: node.name.clone(),
                options: self.config.content_hook.options(node.kind),
            });
        }
        Ok(doc)
    }

    /// A titled list of links, or nothing when `ids` is empty.
    fn link_section(&self, title: &str, ids: Vec<NodeId>, out: &mut Document) {
        if ids.is_empty() {
            return;
        }
        out.push(Block::section(title));
        out.push(Block::List(
            self.sorted(ids)
                .into_iter()
                .map(|id| ListItem::link(self.anchor(id)))
                .collect(),
        ));
    }

    pub fn namespace_document(&self, id: NodeId) -> Document {
        let names = self.names.get(id);
        let mut doc = Document::new(&names.doc_id)
            .anchored(&names.anchor)
            .titled(&names.title);

        let mut namespaces = Vec::new();
        let mut classes = Vec::new();
        let mut enums = Vec::new();
        let mut functions = Vec::new();
        let mut typedefs = Vec::new();
        let mut unions = Vec::new();
        let mut variables = Vec::new();
        for &child in self.graph.children(id) {
            match self.graph.kind(child) {
                NodeKind::Namespace => namespaces.push(child),
                NodeKind::Class | NodeKind::Struct => {
                    let subtree = [child];
                    classes.extend(self.graph.nested(&subtree, |k| k.is_class_like()));
                    enums.extend(self.graph.nested(&subtree, |k| k == NodeKind::Enum));
                    unions.extend(self.graph.nested(&subtree, |k| k == NodeKind::Union));
                }
                NodeKind::Enum => enums.push(child),
                NodeKind::Function => functions.push(child),
                NodeKind::Typedef => typedefs.push(child),
                NodeKind::Union => unions.push(child),
                NodeKind::Variable => variables.push(child),
                _ => {}
            }
        }

        self.link_section("Namespaces", namespaces, &mut doc);
        self.link_section("Classes", classes, &mut doc);
        self.link_section("Enums", enums, &mut doc);
        self.link_section("Functions", functions, &mut doc);
        self.link_section("Typedefs", typedefs, &mut doc);
        self.link_section("Unions", unions, &mut doc);
        self.link_section("Variables", variables, &mut doc);
        doc
    }

    pub fn file_document(&self, id: NodeId) -> Document {
        let node = self.graph.node(id);
        let names = self.names.get(id);
        let mut doc = Document::new(&names.doc_id)
            .anchored(&names.anchor)
            .titled(&names.title);
        let Some(info) = node.file_info() else {
            return doc;
        };

        if !info.location.is_empty() {
            doc.push(Block::section(format!("Definition (``{}``)", info.location)));
            if !info.program_listing.is_empty() {
                if let Some(program) = &names.program {
                    doc.push(Block::Toctree {
                        max_depth: 1,
                        entries: vec![program.clone()],
                    });
                }
            }
        }

        if !info.includes.is_empty() {
            let mut includes = info.includes.clone();
            includes.sort();
            let items = includes
                .into_iter()
                .map(|include| {
                    let local = self
                        .graph
                        .collections
                        .files
                        .iter()
                        .copied()
                        .find(|&f| self.graph.node(f).location().contains(include.as_str()));
                    let mut content = vec![Inline::Literal(include)];
                    if let Some(local) = local {
                        content.push(Inline::Text(" (".to_string()));
                        content.push(Inline::Ref(self.anchor(local).to_string()));
                        content.push(Inline::Text(")".to_string()));
                    }
                    ListItem::new(content)
                })
                .collect();
            doc.push(Block::section("Includes"));
            doc.push(Block::List(items));
        }

        if !info.included_by.is_empty() {
            let items = info
                .included_by
                .iter()
                .map(|(refid, name)| {
                    let including = self
                        .graph
                        .collections
                        .files
                        .iter()
                        .copied()
                        .find(|&f| self.graph.node(f).refid == *refid);
                    match including {
                        Some(f) => ListItem::link(self.anchor(f)),
                        None => ListItem::new(vec![Inline::Literal(name.clone())]),
                    }
                })
                .collect();
            doc.push(Block::section("Included By"));
            doc.push(Block::List(items));
        }

        let mut classes = Vec::new();
        let mut enums = Vec::new();
        let mut functions = Vec::new();
        let mut defines = Vec::new();
        let mut typedefs = Vec::new();
        let mut unions = Vec::new();
        let mut variables = Vec::new();
        for &member in self.graph.members(id) {
            match self.graph.kind(member) {
                NodeKind::Class | NodeKind::Struct => classes.push(member),
                NodeKind::Enum => enums.push(member),
                NodeKind::Function => functions.push(member),
                NodeKind::Define => defines.push(member),
                NodeKind::Typedef => typedefs.push(member),
                NodeKind::Union => unions.push(member),
                NodeKind::Variable => variables.push(member),
                _ => {}
            }
        }

        self.link_section("Namespaces", info.namespaces_used.clone(), &mut doc);
        self.link_section("Classes", classes, &mut doc);
        self.link_section("Enums", enums, &mut doc);
        self.link_section("Functions", functions, &mut doc);
        self.link_section("Defines", defines, &mut doc);
        self.link_section("Typedefs", typedefs, &mut doc);
        self.link_section("Unions", unions, &mut doc);
        self.link_section("Variables", variables, &mut doc);

        if self.config.append_file_directive {
            if let Some(directive) = NodeKind::File.directive() {
                doc.push(Block::section("Full File Listing"));
                doc.push(Block::Directive {
                    name: directive.to_string(),
                    argument: info.location.clone(),
                    options: self.config.content_hook.options(NodeKind::File),
                });
            }
        }
        doc
    }

    pub fn directory_document(&self, id: NodeId) -> Document {
        let names = self.names.get(id);
        let mut doc = Document::new(&names.doc_id)
            .anchored(&names.anchor)
            .titled(&names.title);

        let (dirs, files): (Vec<NodeId>, Vec<NodeId>) = self
            .graph
            .children(id)
            .iter()
            .copied()
            .filter(|&c| matches!(self.graph.kind(c), NodeKind::Dir | NodeKind::File))
            .partition(|&c| self.graph.kind(c) == NodeKind::Dir);

        self.link_section("Subdirectories", dirs, &mut doc);
        self.link_section("Files", files, &mut doc);
        doc
    }
}
