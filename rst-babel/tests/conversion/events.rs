//! Tests at the walker/builder seam.

use rst_babel::ir::events::{replay, EmphasisKind, Event};
use rst_babel::markup::html::parse_fragment;
use rst_babel::{convert, to_events, ConvertOptions, DocumentBuilder, Reference};

#[test]
fn test_heading_event_sequence() {
    let events = to_events(&parse_fragment("<h2>Title</h2>"), &ConvertOptions::default());
    assert_eq!(
        events,
        vec![
            Event::StartDocument,
            Event::StartHeading(2),
            Event::Text("Title".to_string()),
            Event::EndHeading(2),
            Event::EndDocument,
        ]
    );
}

#[test]
fn test_emphasis_event_sequence() {
    let events = to_events(
        &parse_fragment("<p>A<b> bold </b>B</p>"),
        &ConvertOptions::default(),
    );
    assert_eq!(
        events,
        vec![
            Event::StartDocument,
            Event::StartParagraph,
            Event::Text("A".to_string()),
            Event::StartEmphasis(EmphasisKind::Bold),
            Event::Text(" bold ".to_string()),
            Event::EndEmphasis(EmphasisKind::Bold),
            Event::Text("B".to_string()),
            Event::EndParagraph,
            Event::EndDocument,
        ]
    );
}

#[test]
fn test_link_event_carries_classification() {
    let events = to_events(
        &parse_fragment(r##"<a href="#anchor1"><i>Label</i></a>"##),
        &ConvertOptions::default(),
    );
    assert_eq!(
        events[1],
        Event::Link(Reference::Anchor {
            id: "anchor1".to_string(),
            display: "Label".to_string(),
        })
    );
    assert_eq!(events.len(), 3);
}

#[test]
fn test_replaying_recorded_events_matches_direct_conversion() {
    let html = "<h1>Doc</h1><p>Intro <code>x</code></p>\
                <table><tr><th>K</th><td rowspan=\"2\"><ul><li>v</li></ul></td></tr></table>\
                <dl><dt>t</dt><dd>d</dd></dl><blockquote><pre>  raw\n</pre></blockquote>";
    let root = parse_fragment(html);
    let options = ConvertOptions::default();

    let direct = convert(&root, &options);

    let mut builder = DocumentBuilder::new();
    replay(to_events(&root, &options), &mut builder);
    let replayed = builder.finalize();

    assert!(direct.is_clean(), "{:?}", direct.diagnostics);
    assert_eq!(direct, replayed);
    assert_eq!(direct.document.blocks.len(), 5);
}

#[test]
fn test_builder_never_panics_on_unbalanced_stream() {
    let events = vec![
        Event::EndListItem,
        Event::StartDataCell {
            rowspan: 1,
            colspan: 1,
        },
        Event::Text("x".to_string()),
        Event::EndTable,
        Event::EndEmphasis(EmphasisKind::Italic),
        Event::HeaderCell("h".to_string()),
        Event::StartDefinitionDescription,
        Event::EndDocument,
        Event::EndDocument,
    ];

    let mut builder = DocumentBuilder::new();
    replay(events, &mut builder);
    let conversion = builder.finalize();

    assert!(conversion.document.is_empty());
    assert!(!conversion.is_clean());
}
