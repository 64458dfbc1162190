//! Snapshot tests for the treeviz views.

use insta::assert_snapshot;
use rst_babel::formats::{
    markup_to_treeviz_str, sections_to_treeviz_str, to_treeviz_str, to_treeviz_str_with_options,
    TreevizOptions,
};
use rst_babel::markup::html::parse_fragment;
use rst_babel::{convert_html, sectionize, ConvertOptions};

#[test]
fn test_document_tree() {
    let html = concat!(
        "<h2>Overview</h2>",
        "<ul><li>first</li><li><b>second</b></li></ul>",
        r#"<table><tr><th>Key</th><td rowspan="2">Value</td></tr></table>"#,
    );
    let doc = convert_html(html, &ConvertOptions::default()).document;

    assert_snapshot!(to_treeviz_str(&doc), @r"
    ⧉ Document (3 blocks)
    ├─ ⊤ h2 Overview
    │ └─ ◦ Overview
    ├─ ☰ 2 items
    │ ├─ • first
    │ │ └─ ¶ first
    │ │   └─ ◦ first
    │ └─ • second
    │   └─ ¶ second
    │     └─ 𝐁 second
    └─ ▦ table, 1 rows
      └─ ═ 2 cells
        ├─ ▢ header
        │ └─ ¶ Key
        │   └─ ◦ Key
        └─ ▢ cell rowspan=2
          └─ ¶ Value
            └─ ◦ Value
    ");
}

#[test]
fn test_section_tree() {
    let doc = convert_html(
        "<p>intro</p><h1>A</h1><p>a</p><h2>B</h2>",
        &ConvertOptions::default(),
    )
    .document;
    let sections = sectionize(&doc);

    assert_snapshot!(sections_to_treeviz_str(&sections, &TreevizOptions::default()), @r"
    ⧉ Document (2 sections)
    ├─ § (untitled)
    │ └─ ¶ intro
    │   └─ ◦ intro
    └─ § h1 A
      ├─ ¶ a
      │ └─ ◦ a
      └─ § h2 B
    ");
}

#[test]
fn test_markup_tree() {
    let root = parse_fragment(r##"<p><a href="#x">there</a></p>"##);

    assert_snapshot!(markup_to_treeviz_str(&root, &TreevizOptions::default()), @r"
    ◇ document
    └─ ◇ wrapper
      ├─ ◇ head
      └─ ◇ wrapper
        └─ ◇ p
          └─ ◇ a href=#x
            └─ ◦ there
    ");
}

#[test]
fn test_labels_are_truncated() {
    let doc = convert_html("<p>abcdefghijklmnop</p>", &ConvertOptions::default()).document;
    let options = TreevizOptions { max_label_width: 10 };

    assert_snapshot!(to_treeviz_str_with_options(&doc, &options), @r"
    ⧉ Document …
    └─ ¶ abcdefghi…
      └─ ◦ abcdefghi…
    ");
}
