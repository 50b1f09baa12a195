use super::document::{Block, Document, HeadingLevel, Inline, ListItem};
use std::fmt::Write;

const UNDERLINE_WIDTH: usize = 88;
const INDENT: &str = "   ";

/// Serializes semantic documents into a concrete markup dialect.
pub trait Renderer: Send + Sync {
    /// File extension of rendered documents, without the dot.
    fn extension(&self) -> &str;
    fn render(&self, doc: &Document) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RstRenderer;

impl RstRenderer {
    fn inline(out: &mut String, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => out.push_str(text),
                Inline::Literal(text) => {
                    let _ = write!(out, "``{text}``");
                }
                Inline::Strong(text) => {
                    let _ = write!(out, "**{text}**");
                }
                Inline::Ref(anchor) => {
                    let _ = write!(out, ":ref:`{anchor}`");
                }
            }
        }
    }

    fn list(out: &mut String, items: &[ListItem]) {
        for item in items {
            out.push_str(&"    ".repeat(item.level));
            out.push_str("- ");
            Self::inline(out, &item.content);
            out.push('\n');
        }
        out.push('\n');
    }

    fn indented(out: &mut String, lines: &[String]) {
        for line in lines {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "{INDENT}{line}");
            }
        }
        out.push('\n');
    }

    fn block(out: &mut String, block: &Block) {
        match block {
            Block::Heading { text, level } => {
                let rule = match level {
                    HeadingLevel::Section => '-',
                    HeadingLevel::Subsection => '*',
                };
                let _ = writeln!(out, "{text}\n{}\n", rule.to_string().repeat(UNDERLINE_WIDTH));
            }
            Block::Paragraph(inlines) => {
                if inlines.is_empty() {
                    return;
                }
                Self::inline(out, inlines);
                out.push_str("\n\n");
            }
            Block::List(items) => {
                if !items.is_empty() {
                    Self::list(out, items);
                }
            }
            Block::Toctree { max_depth, entries } => {
                let _ = writeln!(out, ".. toctree::\n{INDENT}:maxdepth: {max_depth}\n");
                for entry in entries {
                    let _ = writeln!(out, "{INDENT}{entry}");
                }
                out.push('\n');
            }
            Block::Directive {
                name,
                argument,
                options,
            } => {
                let _ = writeln!(out, ".. {name}:: {argument}");
                for option in options {
                    let _ = writeln!(out, "{INDENT}{option}");
                }
                out.push('\n');
            }
            Block::CodeBlock { language, lines } => {
                let _ = writeln!(out, ".. code-block:: {language}\n");
                Self::indented(out, lines);
            }
            Block::Include(id) => {
                let _ = writeln!(out, ".. include:: {id}.rst\n");
            }
            Block::Raw { format, lines } => {
                let _ = writeln!(out, ".. raw:: {format}\n");
                Self::indented(out, lines);
            }
        }
    }
}

impl Renderer for RstRenderer {
    fn extension(&self) -> &str {
        "rst"
    }

    fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        if let Some(anchor) = &doc.anchor {
            let _ = writeln!(out, ".. _{anchor}:\n");
        }
        if let Some(title) = &doc.title {
            let _ = writeln!(out, "{title}\n{}\n", "=".repeat(UNDERLINE_WIDTH));
        }
        for block in &doc.blocks {
            Self::block(&mut out, block);
        }
        out
    }
}
