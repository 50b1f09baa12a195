use super::document::{Block, Document};
use super::{Emitter, FULL_LISTING_ID};
use crate::model::NodeId;
use doxtree_api::NodeKind;

impl Emitter<'_> {
    /// Every node per kind category, with nested namespaces, class-likes and
    /// directories expanded back out of their owners.
    pub fn full_listing(&self) -> Document {
        let c = &self.graph.collections;
        let categories: [(&str, Vec<NodeId>); 10] = [
            (
                "Namespaces",
                self.graph.nested(&c.namespaces, |k| k == NodeKind::Namespace),
            ),
            (
                "Classes and Structs",
                self.graph.nested(&c.class_like, |k| k.is_class_like()),
            ),
            ("Enums", c.enums.clone()),
            ("Unions", c.unions.clone()),
            ("Functions", c.functions.clone()),
            ("Variables", c.variables.clone()),
            ("Defines", c.defines.clone()),
            ("Typedefs", c.typedefs.clone()),
            ("Directories", self.graph.nested(&c.dirs, |k| k == NodeKind::Dir)),
            ("Files", c.files.clone()),
        ];

        let mut doc = Document::new(FULL_LISTING_ID);
        doc.push(Block::section("Full API"));
        for (title, ids) in categories {
            if ids.is_empty() {
                continue;
            }
            doc.push(Block::subsection(title));
            for id in self.sorted(ids) {
                doc.push(Block::Toctree {
                    max_depth: self.config.full_toctree_max_depth,
                    entries: vec![self.names.get(id).doc_id.clone()],
                });
            }
        }
        doc
    }

    /// Document ids listed by [`Emitter::full_listing`].
    pub fn listed_ids(&self) -> Vec<String> {
        self.full_listing()
            .blocks
            .into_iter()
            .filter_map(|block| match block {
                Block::Toctree { entries, .. } => Some(entries),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
