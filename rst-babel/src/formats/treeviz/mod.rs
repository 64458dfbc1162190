//! Treeviz: an indented Unicode tree for inspecting conversions
//!
//! Three trees can be rendered: the converted [`Document`], its [`Section`] grouping, and the
//! raw [`MarkupNode`] input. All of them go through the same small view type so the output looks
//! the same everywhere:
//!
//! ```text
//! ⧉ Document (2 blocks)
//! ├─ ⊤ h2 Overview
//! │ └─ ◦ Overview
//! └─ ¶ Returns the value…
//!   ├─ ◦ Returns the
//!   └─ ƒ value
//! ```
//!
//! Each line is `<prefix><connector> <icon> <label>`. Labels are flattened to one line (newlines
//! show as `↵`) and truncated to `max_label_width` characters.

use super::icons::get_icon;
use crate::ir::nodes::{plain_text, Block, Document, Inline, Section, TableCell};
use crate::markup::MarkupNode;

/// Default label truncation width.
pub const DEFAULT_MAX_LABEL_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreevizOptions {
    /// `0` disables truncation.
    pub max_label_width: usize,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            max_label_width: DEFAULT_MAX_LABEL_WIDTH,
        }
    }
}

/// A node as the tree printer sees it.
struct VisualNode {
    node_type: &'static str,
    label: String,
    children: Vec<VisualNode>,
}

impl VisualNode {
    fn leaf(node_type: &'static str, label: impl Into<String>) -> Self {
        Self {
            node_type,
            label: label.into(),
            children: vec![],
        }
    }

    fn with_children(mut self, children: Vec<VisualNode>) -> Self {
        self.children = children;
        self
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_options(doc, &TreevizOptions::default())
}

/// Render a converted document.
pub fn to_treeviz_str_with_options(doc: &Document, options: &TreevizOptions) -> String {
    let root = VisualNode::leaf("Document", format!("Document ({} blocks)", doc.blocks.len()))
        .with_children(doc.blocks.iter().map(visual_block).collect());
    render(&root, options)
}

/// Render a section tree under a synthetic document root.
pub fn sections_to_treeviz_str(sections: &[Section], options: &TreevizOptions) -> String {
    let root = VisualNode::leaf("Document", format!("Document ({} sections)", sections.len()))
        .with_children(sections.iter().map(visual_section).collect());
    render(&root, options)
}

/// Render the raw markup input.
pub fn markup_to_treeviz_str(node: &MarkupNode, options: &TreevizOptions) -> String {
    render(&visual_markup(node), options)
}

fn render(root: &VisualNode, options: &TreevizOptions) -> String {
    let mut output = format!(
        "{} {}\n",
        get_icon(root.node_type),
        truncate(&root.label, options.max_label_width)
    );
    format_children(&root.children, "", options, &mut output);
    output
}

fn format_children(children: &[VisualNode], prefix: &str, options: &TreevizOptions, output: &mut String) {
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == child_count - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!(
            "{}{} {} {}\n",
            prefix,
            connector,
            get_icon(child.node_type),
            truncate(&child.label, options.max_label_width)
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        format_children(&child.children, &child_prefix, options, output);
    }
}

fn truncate(label: &str, max_width: usize) -> String {
    let single_line = label.replace('\n', "↵");
    if max_width == 0 || single_line.chars().count() <= max_width {
        return single_line;
    }
    let mut truncated: String = single_line.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn visual_section(section: &Section) -> VisualNode {
    let label = match &section.title {
        Some(title) => format!("h{} {}", title.level, plain_text(&title.content)),
        None => "(untitled)".to_string(),
    };
    let mut children: Vec<VisualNode> = section.blocks.iter().map(visual_block).collect();
    children.extend(section.subsections.iter().map(visual_section));
    VisualNode::leaf("Section", label).with_children(children)
}

fn visual_block(block: &Block) -> VisualNode {
    match block {
        Block::Title(title) => VisualNode::leaf(
            "Title",
            format!("h{} {}", title.level, plain_text(&title.content)),
        )
        .with_children(visual_inlines(&title.content)),
        Block::Paragraph(paragraph) => {
            VisualNode::leaf("Paragraph", plain_text(&paragraph.content))
                .with_children(visual_inlines(&paragraph.content))
        }
        Block::BulletList(list) | Block::EnumeratedList(list) => {
            let node_type = if matches!(block, Block::BulletList(_)) {
                "BulletList"
            } else {
                "EnumeratedList"
            };
            let items = list
                .items
                .iter()
                .map(|item| {
                    VisualNode::leaf("ListItem", first_text(&item.blocks))
                        .with_children(item.blocks.iter().map(visual_block).collect())
                })
                .collect();
            VisualNode::leaf(node_type, format!("{} items", list.items.len())).with_children(items)
        }
        Block::BlockQuote(quote) => {
            VisualNode::leaf("BlockQuote", format!("{} blocks", quote.blocks.len()))
                .with_children(quote.blocks.iter().map(visual_block).collect())
        }
        Block::LiteralBlock(literal) => VisualNode::leaf("LiteralBlock", literal.text.clone()),
        Block::Table(table) => {
            let kind = if table.definition_list {
                "definition list"
            } else {
                "table"
            };
            let rows = table
                .rows
                .iter()
                .map(|row| {
                    VisualNode::leaf("TableRow", format!("{} cells", row.cells.len()))
                        .with_children(row.cells.iter().map(visual_cell).collect())
                })
                .collect();
            VisualNode::leaf("Table", format!("{kind}, {} rows", table.rows.len()))
                .with_children(rows)
        }
        Block::Transition => VisualNode::leaf("Transition", "transition"),
    }
}

fn visual_cell(cell: &TableCell) -> VisualNode {
    let mut label = if cell.header { "header" } else { "cell" }.to_string();
    if cell.rowspan > 0 {
        label.push_str(&format!(" rowspan={}", cell.rowspan));
    }
    if cell.colspan > 0 {
        label.push_str(&format!(" colspan={}", cell.colspan));
    }
    VisualNode::leaf("TableCell", label)
        .with_children(cell.blocks.iter().map(visual_block).collect())
}

/// Label for containers: the text of their first paragraph, if any.
fn first_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .find_map(|block| match block {
            Block::Paragraph(paragraph) => Some(plain_text(&paragraph.content)),
            _ => None,
        })
        .unwrap_or_default()
}

fn visual_inlines(content: &[Inline]) -> Vec<VisualNode> {
    content.iter().map(visual_inline).collect()
}

fn visual_inline(inline: &Inline) -> VisualNode {
    match inline {
        Inline::Text { text } => VisualNode::leaf("Text", text.clone()),
        Inline::Strong { text } => VisualNode::leaf("Strong", text.clone()),
        Inline::Emphasis { text } => VisualNode::leaf("Emphasis", text.clone()),
        Inline::Interpreted { text } => VisualNode::leaf("Interpreted", text.clone()),
        Inline::Role { role, text } => VisualNode::leaf("Role", format!(":{role}: {text}")),
        Inline::Literal { text } => VisualNode::leaf("Literal", text.clone()),
        Inline::LineBreak => VisualNode::leaf("LineBreak", "line break"),
        Inline::Hyperlink { href, text } => {
            VisualNode::leaf("Hyperlink", format!("{text} <{href}>"))
        }
        Inline::AnchorReference { anchor, text } => {
            VisualNode::leaf("AnchorReference", format!("{text} <#{anchor}>"))
        }
        Inline::Target { id } => VisualNode::leaf("Target", format!("_{id}")),
        Inline::CrossReference { role, target, text } => {
            VisualNode::leaf("CrossReference", format!(":{role}: {text} <{target}>"))
        }
        Inline::Unrecognized { tag } => VisualNode::leaf("Unrecognized", format!("<{tag}>")),
    }
}

fn visual_markup(node: &MarkupNode) -> VisualNode {
    match node {
        MarkupNode::Text(text) => VisualNode::leaf("Text", text.text.clone()),
        MarkupNode::Element(element) => {
            let mut label = element.kind.label();
            for (key, value) in &element.attributes {
                label.push_str(&format!(" {key}={value}"));
            }
            VisualNode::leaf("Element", label)
                .with_children(element.children.iter().map(visual_markup).collect())
        }
    }
}
