//! HTML fragment → document scenarios
//!
//! These go through the whole pipeline: html5ever parsing, walking and building.

use rst_babel::ir::nodes::{Block, GridTable, Inline, LiteralBlock, Paragraph, Title};
use rst_babel::markup::{Element, ElementKind};
use rst_babel::{convert, convert_html, ConvertOptions, Diagnostic, Document};

fn html_to_doc(html: &str) -> Document {
    let conversion = convert_html(html, &ConvertOptions::default());
    assert!(
        conversion.is_clean(),
        "unexpected diagnostics: {:?}",
        conversion.diagnostics
    );
    conversion.document
}

fn para(content: Vec<Inline>) -> Block {
    Block::Paragraph(Paragraph { content })
}

fn first_table(doc: &Document) -> &GridTable {
    doc.blocks
        .iter()
        .find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
        .expect("Expected a table block")
}

#[test]
fn test_heading_becomes_title() {
    let doc = html_to_doc("<h2>Title</h2>");
    assert_eq!(
        doc.blocks,
        vec![Block::Title(Title {
            level: 2,
            content: vec![Inline::text("Title")],
        })]
    );
}

#[test]
fn test_bold_run_keeps_spaces_outside_emphasis() {
    let doc = html_to_doc("<p>A<b> bold </b>B</p>");
    assert_eq!(
        doc.blocks,
        vec![para(vec![
            Inline::text("A"),
            Inline::text(" "),
            Inline::Strong {
                text: "bold".to_string(),
            },
            Inline::text(" "),
            Inline::text("B"),
        ])]
    );
}

#[test]
fn test_simple_table() {
    let doc = html_to_doc("<table><tr><th>H</th><td>D</td></tr></table>");
    let table = first_table(&doc);
    assert!(!table.definition_list);
    assert_eq!(table.rows.len(), 1);

    let cells = &table.rows[0].cells;
    assert_eq!(cells.len(), 2);
    assert!(cells[0].header);
    assert_eq!(cells[0].blocks, vec![para(vec![Inline::text("H")])]);
    assert!(!cells[1].header);
    assert_eq!(cells[1].blocks, vec![para(vec![Inline::text("D")])]);
}

#[test]
fn test_row_without_table_is_dropped_with_one_diagnostic() {
    // html5ever would drop a stray <tr> itself, so build the tree by hand.
    let root = Element::new(ElementKind::Document)
        .with_child(
            Element::new(ElementKind::TableRow)
                .with_child(
                    Element::new(ElementKind::TableDataCell)
                        .with_text("orphan")
                        .into_node(),
                )
                .into_node(),
        )
        .into_node();

    let conversion = convert(&root, &ConvertOptions::default());
    assert!(conversion.document.is_empty());
    assert_eq!(conversion.diagnostics.len(), 1);
    assert!(matches!(
        conversion.diagnostics[0],
        Diagnostic::Structural { .. }
    ));
}

#[test]
fn test_anchor_reference() {
    let doc = html_to_doc(r##"<a href="#anchor1">Label</a>"##);
    assert_eq!(
        doc.blocks,
        vec![para(vec![Inline::AnchorReference {
            anchor: "anchor1".to_string(),
            text: "Label".to_string(),
        }])]
    );
}

#[test]
fn test_whitespace_only_fragment_is_empty() {
    let doc = html_to_doc("  \n\t  \n");
    assert!(doc.is_empty());

    let doc = html_to_doc("<p>   \n  </p><ul>\n  \n</ul>");
    assert!(doc.is_empty());
}

#[test]
fn test_preformatted_text_is_verbatim() {
    let doc = html_to_doc("<pre>  line one\n    line *two*_\n</pre>");
    assert_eq!(
        doc.blocks,
        vec![Block::LiteralBlock(LiteralBlock {
            text: "  line one\n    line *two*_\n".to_string(),
        })]
    );
}

#[test]
fn test_list_items_ignore_whitespace_between_them() {
    let doc = html_to_doc("<ul>\n  <li>one</li>\n  <li>two <code>x()</code></li>\n</ul>");
    let Block::BulletList(list) = &doc.blocks[0] else {
        panic!("Expected bullet list, got {:?}", doc.blocks[0]);
    };
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].blocks, vec![para(vec![Inline::text("one")])]);
    assert_eq!(
        list.items[1].blocks,
        vec![para(vec![
            Inline::text("two "),
            Inline::Literal {
                text: "x()".to_string(),
            },
        ])]
    );
}

#[test]
fn test_ordered_list_nested_in_table_cell() {
    let doc = html_to_doc("<table><tr><td><ol><li>a</li><li>b</li></ol></td></tr></table>");
    let cell = &first_table(&doc).rows[0].cells[0];
    let Block::EnumeratedList(list) = &cell.blocks[0] else {
        panic!("Expected enumerated list in cell, got {:?}", cell.blocks);
    };
    assert_eq!(list.items.len(), 2);
}

#[test]
fn test_link_classification() {
    let doc = html_to_doc(
        r#"<p><a href="http://example.com">site</a><a href="java.util.List#add(E)"> add </a></p>"#,
    );
    assert_eq!(
        doc.blocks,
        vec![para(vec![
            Inline::Hyperlink {
                href: "http://example.com".to_string(),
                text: "site".to_string(),
            },
            Inline::CrossReference {
                role: "any".to_string(),
                target: "java.util.List#add(E)".to_string(),
                text: "add".to_string(),
            },
        ])]
    );
}

#[test]
fn test_symbolic_role_is_configurable() {
    let options = ConvertOptions::default().with_symbolic_role("java:ref");
    let conversion = convert_html(r#"<a href="Foo">Foo</a>"#, &options);
    assert_eq!(
        conversion.document.blocks,
        vec![para(vec![Inline::CrossReference {
            role: "java:ref".to_string(),
            target: "Foo".to_string(),
            text: "Foo".to_string(),
        }])]
    );
}

#[test]
fn test_empty_link_keeps_display_text() {
    let doc = html_to_doc(r#"<p><a href="">plain</a></p>"#);
    assert_eq!(doc.blocks, vec![para(vec![Inline::text("plain")])]);
}

#[test]
fn test_named_anchor_becomes_target() {
    let doc = html_to_doc(r#"<p><a name="details">Details</a></p>"#);
    assert_eq!(
        doc.blocks,
        vec![para(vec![
            Inline::Target {
                id: "details".to_string(),
            },
            Inline::text("Details"),
        ])]
    );
}

#[test]
fn test_unknown_element_leaves_placeholder() {
    let conversion = convert_html(
        r#"<p>see<img src="x.png">here</p>"#,
        &ConvertOptions::default(),
    );
    assert_eq!(
        conversion.document.blocks,
        vec![para(vec![
            Inline::text("see"),
            Inline::Unrecognized {
                tag: "img".to_string(),
            },
            Inline::text("here"),
        ])]
    );
    assert_eq!(
        conversion.diagnostics,
        vec![Diagnostic::Unrecognized {
            tag: "img".to_string(),
        }]
    );
}

#[test]
fn test_definition_list() {
    let doc = html_to_doc("<dl>\n<dt>Key</dt>\n<dd>Value</dd>\n</dl>");
    let table = first_table(&doc);
    assert!(table.definition_list);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        table.rows[0].cells[0].blocks,
        vec![para(vec![Inline::text("Key")])]
    );
    assert_eq!(
        table.rows[0].cells[1].blocks,
        vec![para(vec![Inline::text("Value")])]
    );
}

#[test]
fn test_text_is_escaped_for_rst() {
    let doc = html_to_doc("<p>use *args and name_ &lt;T&gt;</p>");
    assert_eq!(
        doc.blocks,
        vec![para(vec![Inline::text(r"use \*args and name\_ <T>")])]
    );
}

#[test]
fn test_newlines_survive_collapsing() {
    let doc = html_to_doc("<p>first line   \n    second line</p>");
    assert_eq!(
        doc.blocks,
        vec![para(vec![Inline::text("first line\nsecond line")])]
    );
}

#[test]
fn test_transition_and_line_break() {
    let doc = html_to_doc("<p>a<br>b</p><hr><p>c</p>");
    assert_eq!(
        doc.blocks,
        vec![
            para(vec![Inline::text("a"), Inline::LineBreak, Inline::text("b")]),
            Block::Transition,
            para(vec![Inline::text("c")]),
        ]
    );
}

#[test]
fn test_superscript_becomes_role() {
    let doc = html_to_doc("<p>x<sup>2</sup></p>");
    assert_eq!(
        doc.blocks,
        vec![para(vec![
            Inline::text("x"),
            Inline::Role {
                role: "sup".to_string(),
                text: "2".to_string(),
            },
        ])]
    );
}

#[test]
fn test_spans_independent_by_default() {
    let html = r#"<table><tr><td colspan="2">wide</td></tr></table>"#;

    let doc = html_to_doc(html);
    let cell = &first_table(&doc).rows[0].cells[0];
    assert_eq!((cell.rowspan, cell.colspan), (0, 2));

    let legacy = ConvertOptions::default().with_bug_compatible_spans(true);
    let doc = convert_html(html, &legacy).document;
    let cell = &first_table(&doc).rows[0].cells[0];
    assert_eq!((cell.rowspan, cell.colspan), (0, 0));
}

#[test]
fn test_heading_inside_list_item_closes_list() {
    let doc = html_to_doc("<ul><li>item<h3>Inner</h3>after</li></ul>");
    assert_eq!(doc.blocks.len(), 3);
    assert!(matches!(doc.blocks[0], Block::BulletList(_)));
    assert!(matches!(
        &doc.blocks[1],
        Block::Title(Title { level: 3, .. })
    ));
    assert_eq!(doc.blocks[2], para(vec![Inline::text("after")]));
}

#[test]
fn test_head_content_is_skipped() {
    let doc = html_to_doc("<html><head><title>Page</title></head><body><p>Body</p></body></html>");
    assert_eq!(doc.blocks, vec![para(vec![Inline::text("Body")])]);
}

#[test]
fn test_preformatted_keeps_newlines_between_styled_runs() {
    let doc = html_to_doc("<pre><b>int a;</b>\n<b>int b;</b></pre>");
    assert_eq!(
        doc.blocks,
        vec![Block::LiteralBlock(LiteralBlock {
            text: "int a;\nint b;".to_string(),
        })]
    );

    let doc = html_to_doc("<pre>\n \n</pre>");
    assert!(doc.is_empty());
}

#[test]
fn test_escaped_entities_are_decoded_once() {
    let doc = html_to_doc("<p>write &amp;lt; for a less-than, &amp;amp; for &amp;</p>");
    assert_eq!(
        doc.blocks,
        vec![para(vec![Inline::text(
            "write &lt; for a less-than, &amp; for &"
        )])]
    );
}

#[test]
fn test_continuation_marker_still_decodes() {
    let doc = html_to_doc("<p>wrapped&cont;line</p>");
    assert_eq!(doc.blocks, vec![para(vec![Inline::text("wrappedline")])]);
}
