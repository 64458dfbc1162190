//! Shared icon mapping for tree visualizations
//!
//! Every tree view (document, sections, raw markup) goes through [`get_icon`] so the same node
//! kind always gets the same glyph.

/// Get the Unicode icon for a node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        // Blocks
        "Document" => "⧉",
        "Section" => "§",
        "Title" => "⊤",
        "Paragraph" => "¶",
        "BulletList" => "☰",
        "EnumeratedList" => "№",
        "ListItem" => "•",
        "BlockQuote" => "\"",
        "LiteralBlock" => "𝒱",
        "Table" => "▦",
        "TableRow" => "═",
        "TableCell" => "▢",
        "Transition" => "⎯",
        // Inlines
        "Text" => "◦",
        "Strong" => "𝐁",
        "Emphasis" => "𝐼",
        "Interpreted" => "`",
        "Role" => "ʳ",
        "Literal" => "ƒ",
        "LineBreak" => "↵",
        "Hyperlink" => "⊕",
        "AnchorReference" => "#",
        "Target" => "⌖",
        "CrossReference" => "†",
        "Unrecognized" => "∅",
        // Markup input
        "Element" => "◇",
        _ => "○",
    }
}
