//! Output document model: a reStructuredText-shaped tree.
//!
//! The builder assembles these nodes; rendering them to concrete reST text is left to an
//! external serializer. All types serialize to JSON via serde for that hand-off.

use serde::Serialize;

/// Root of a converted fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title(Title),
    Paragraph(Paragraph),
    BulletList(List),
    EnumeratedList(List),
    BlockQuote(BlockQuote),
    LiteralBlock(LiteralBlock),
    Table(GridTable),
    Transition,
}

/// A section title. Levels run 1 to 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub level: u8,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// Bullet or enumerated list, depending on the enclosing [`Block`] variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct List {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockQuote {
    pub blocks: Vec<Block>,
}

/// Preformatted text, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LiteralBlock {
    pub text: String,
}

/// Grid table. Also used for definition lists (term / description rows of two cells).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridTable {
    pub rows: Vec<TableRow>,
    /// True when the table was built from a definition list.
    pub definition_list: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableCell {
    pub header: bool,
    /// `0` means unspecified; the serializer treats it as a span of one.
    pub rowspan: u32,
    pub colspan: u32,
    pub blocks: Vec<Block>,
}

/// Inline nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Strong { text: String },
    Emphasis { text: String },
    /// Interpreted text (default role), used for monospace styling.
    Interpreted { text: String },
    /// Role-wrapped text such as `:sub:` and `:sup:`.
    Role { role: String, text: String },
    /// Inline literal (code span).
    Literal { text: String },
    LineBreak,
    /// Anonymous hyperlink to an external resource.
    Hyperlink { href: String, text: String },
    /// Reference to an anchor in the same document.
    AnchorReference { anchor: String, text: String },
    /// Internal target (anchor definition).
    Target { id: String },
    /// Symbolic cross-reference, resolved later against a symbol table.
    CrossReference {
        role: String,
        target: String,
        text: String,
    },
    /// Placeholder for markup the converter does not understand.
    Unrecognized { tag: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    /// Plain-text rendition, used for labels and assertions.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text { text }
            | Inline::Strong { text }
            | Inline::Emphasis { text }
            | Inline::Interpreted { text }
            | Inline::Role { text, .. }
            | Inline::Literal { text }
            | Inline::Hyperlink { text, .. }
            | Inline::AnchorReference { text, .. }
            | Inline::CrossReference { text, .. } => text.clone(),
            Inline::LineBreak => "\n".to_string(),
            Inline::Target { .. } | Inline::Unrecognized { .. } => String::new(),
        }
    }
}

/// Concatenated plain text of a run of inlines.
pub fn plain_text(content: &[Inline]) -> String {
    content.iter().map(Inline::plain_text).collect()
}

/// A title together with everything up to the next title of the same or a shallower level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    /// `None` for content that precedes the first title.
    pub title: Option<Title>,
    pub blocks: Vec<Block>,
    pub subsections: Vec<Section>,
}

impl Section {
    pub fn level(&self) -> u8 {
        self.title.as_ref().map(|t| t.level).unwrap_or(0)
    }
}
