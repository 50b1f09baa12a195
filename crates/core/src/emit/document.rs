//! Markup-independent document contents.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Literal(String),
    Strong(String),
    /// Cross-reference to an anchor.
    Ref(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub level: usize,
    pub content: Vec<Inline>,
}

impl ListItem {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { level: 0, content }
    }

    pub fn link(anchor: impl Into<String>) -> Self {
        Self::new(vec![Inline::Ref(anchor.into())])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Section,
    Subsection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        text: String,
        level: HeadingLevel,
    },
    Paragraph(Vec<Inline>),
    List(Vec<ListItem>),
    /// Table of contents over document ids.
    Toctree {
        max_depth: usize,
        entries: Vec<String>,
    },
    Directive {
        name: String,
        argument: String,
        options: Vec<String>,
    },
    CodeBlock {
        language: String,
        lines: Vec<String>,
    },
    /// Inline inclusion of another document by id.
    Include(String),
    Raw {
        format: String,
        lines: Vec<String>,
    },
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Block::Heading {
            text: text.into(),
            level: HeadingLevel::Section,
        }
    }

    pub fn subsection(text: impl Into<String>) -> Self {
        Block::Heading {
            text: text.into(),
            level: HeadingLevel::Subsection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub anchor: Option<String>,
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            anchor: None,
            title: None,
            blocks: Vec::new(),
        }
    }

    pub fn anchored(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Every anchor this document links to, in order.
    pub fn references(&self) -> Vec<&str> {
        let mut inlines: Vec<&Inline> = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(content) => inlines.extend(content),
                Block::List(items) => inlines.extend(items.iter().flat_map(|item| &item.content)),
                _ => {}
            }
        }
        inlines
            .into_iter()
            .filter_map(|inline| match inline {
                Inline::Ref(anchor) => Some(anchor.as_str()),
                _ => None,
            })
            .collect()
    }
}
