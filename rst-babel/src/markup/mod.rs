//! Input model: the parsed markup tree handed to the converter.
//!
//! The tree is produced by an upstream parser (see [`html`] for the html5ever backed one) and is
//! read-only from here on. Element kinds form a small closed set; anything the converter does not
//! understand is carried as [`ElementKind::Unknown`] with its original tag name so it can be
//! reported.

pub mod html;

/// The closed set of element kinds the converter understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Root of the parsed fragment.
    Document,
    /// Transparent wrapper with no output meaning of its own (`html`, `body`, `div`, ...).
    Wrapper,
    /// Metadata-only subtree (`head`, `script`, `style`, ...), never visited.
    Head,
    Paragraph,
    /// Heading level, 1 to 6.
    Heading(u8),
    Bold,
    Italic,
    /// Monospace used as an inline style (`tt`, `kbd`, `samp`).
    Monospace,
    /// Inline code (`code`), flattened to a single literal.
    Code,
    Subscript,
    Superscript,
    LineBreak,
    HorizontalRule,
    Preformatted,
    BlockQuote,
    Anchor,
    OrderedList,
    UnorderedList,
    ListItem,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableDataCell,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    /// Anything else, keeping the source tag name.
    Unknown(String),
}

impl ElementKind {
    /// Map a (case-insensitive) HTML tag name onto an element kind.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        match tag.as_str() {
            "html" | "body" | "div" | "span" | "center" | "font" => ElementKind::Wrapper,
            "head" | "script" | "style" | "title" | "meta" | "link" => ElementKind::Head,
            "p" => ElementKind::Paragraph,
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "b" | "strong" => ElementKind::Bold,
            "i" | "em" | "cite" | "dfn" | "var" => ElementKind::Italic,
            "tt" | "kbd" | "samp" => ElementKind::Monospace,
            "code" => ElementKind::Code,
            "sub" => ElementKind::Subscript,
            "sup" => ElementKind::Superscript,
            "br" => ElementKind::LineBreak,
            "hr" => ElementKind::HorizontalRule,
            "pre" => ElementKind::Preformatted,
            "blockquote" => ElementKind::BlockQuote,
            "a" => ElementKind::Anchor,
            "ol" => ElementKind::OrderedList,
            "ul" => ElementKind::UnorderedList,
            "li" => ElementKind::ListItem,
            "table" => ElementKind::Table,
            "thead" => ElementKind::TableHead,
            "tbody" | "tfoot" => ElementKind::TableBody,
            "tr" => ElementKind::TableRow,
            "th" => ElementKind::TableHeaderCell,
            "td" => ElementKind::TableDataCell,
            "dl" => ElementKind::DefinitionList,
            "dt" => ElementKind::DefinitionTerm,
            "dd" => ElementKind::DefinitionDescription,
            _ => ElementKind::Unknown(tag),
        }
    }

    /// Human readable label, used for unrecognized placeholders and diagnostics.
    pub fn label(&self) -> String {
        match self {
            ElementKind::Document => "document".to_string(),
            ElementKind::Wrapper => "wrapper".to_string(),
            ElementKind::Head => "head".to_string(),
            ElementKind::Paragraph => "p".to_string(),
            ElementKind::Heading(level) => format!("h{level}"),
            ElementKind::Bold => "b".to_string(),
            ElementKind::Italic => "i".to_string(),
            ElementKind::Monospace => "tt".to_string(),
            ElementKind::Code => "code".to_string(),
            ElementKind::Subscript => "sub".to_string(),
            ElementKind::Superscript => "sup".to_string(),
            ElementKind::LineBreak => "br".to_string(),
            ElementKind::HorizontalRule => "hr".to_string(),
            ElementKind::Preformatted => "pre".to_string(),
            ElementKind::BlockQuote => "blockquote".to_string(),
            ElementKind::Anchor => "a".to_string(),
            ElementKind::OrderedList => "ol".to_string(),
            ElementKind::UnorderedList => "ul".to_string(),
            ElementKind::ListItem => "li".to_string(),
            ElementKind::Table => "table".to_string(),
            ElementKind::TableHead => "thead".to_string(),
            ElementKind::TableBody => "tbody".to_string(),
            ElementKind::TableRow => "tr".to_string(),
            ElementKind::TableHeaderCell => "th".to_string(),
            ElementKind::TableDataCell => "td".to_string(),
            ElementKind::DefinitionList => "dl".to_string(),
            ElementKind::DefinitionTerm => "dt".to_string(),
            ElementKind::DefinitionDescription => "dd".to_string(),
            ElementKind::Unknown(tag) => tag.clone(),
        }
    }

    /// List roots (not items): stray text directly under them is dropped.
    pub fn is_list(&self) -> bool {
        matches!(self, ElementKind::OrderedList | ElementKind::UnorderedList)
    }

    /// Styles that wrap runs of text inside a block.
    pub fn is_inline_style(&self) -> bool {
        matches!(
            self,
            ElementKind::Bold
                | ElementKind::Italic
                | ElementKind::Monospace
                | ElementKind::Subscript
                | ElementKind::Superscript
        )
    }
}

/// A node of the input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(Element),
    Text(TextNode),
}

impl MarkupNode {
    /// Concatenate the character data of every descendant text node, ignoring markup.
    pub fn flatten_text(&self) -> String {
        let mut output = String::new();
        collect_text(self, &mut output);
        output
    }
}

fn collect_text(node: &MarkupNode, output: &mut String) {
    match node {
        MarkupNode::Text(text) => output.push_str(&text.text),
        MarkupNode::Element(element) => {
            for child in &element.children {
                collect_text(child, output);
            }
        }
    }
}

/// An element with its attributes (unique keys, source order) and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: vec![],
            children: vec![],
        }
    }

    /// Builder-style attribute setter. Replaces an existing value for the same key.
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
        self
    }

    /// Builder-style child setter. Text children get their parent kind filled in.
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        let child = match child {
            MarkupNode::Text(mut text) => {
                text.parent = self.kind.clone();
                MarkupNode::Text(text)
            }
            element => element,
        };
        self.children.push(child);
        self
    }

    /// Append a text child whose parent kind is this element's kind.
    pub fn with_text(self, text: &str) -> Self {
        let kind = self.kind.clone();
        self.with_child(MarkupNode::Text(TextNode::new(text, kind)))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_node(self) -> MarkupNode {
        MarkupNode::Element(self)
    }
}

/// Raw character data plus the kind of the element that directly contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub parent: ElementKind,
}

impl TextNode {
    pub fn new(text: &str, parent: ElementKind) -> Self {
        Self {
            text: text.to_string(),
            parent,
        }
    }
}
