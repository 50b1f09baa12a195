use super::document::{Block, Document, Inline, ListItem};
use super::Emitter;
use crate::doxygen::unescape_xml;
use crate::model::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;

static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<]+?>").expect("valid tag pattern"));

/// Turns one captured listing line back into source text.
pub fn clean_line(line: &str) -> String {
    let spaced = line.replace("<sp/>", " ");
    let untagged = XML_TAG.replace_all(&spaced, "");
    unescape_xml(&untagged)
}

impl Emitter<'_> {
    /// Line-by-line source listing of a file, if any listing was recovered.
    pub fn program_listing_document(&self, file: NodeId) -> Option<Document> {
        let node = self.graph.node(file);
        let info = node.file_info()?;
        if info.program_listing.is_empty() {
            return None;
        }
        let names = self.names.get(file);
        let program = names.program.clone()?;

        let mut doc = Document::new(program.clone())
            .anchored(program)
            .titled(format!("Program Listing for {} {}", node.kind.qualifier(), node.name));
        doc.push(Block::List(vec![ListItem::new(vec![
            Inline::Text("Return to documentation for ".to_string()),
            Inline::Ref(names.anchor.clone()),
        ])]));
        doc.push(Block::CodeBlock {
            language: "cpp".to_string(),
            lines: info.program_listing.iter().map(|l| clean_line(l)).collect(),
        });
        Some(doc)
    }
}
