//! Property tests for whitespace handling, entity decoding and link classification.

use proptest::prelude::*;
use rst_babel::common::text::{escape_target_specials, unescape_entities};
use rst_babel::ir::events::Event;
use rst_babel::ir::nodes::{Block, LiteralBlock};
use rst_babel::markup::{Element, ElementKind};
use rst_babel::{classify, convert, to_events, ConvertOptions, Diagnostic, Reference};

fn in_document(child: Element) -> rst_babel::MarkupNode {
    Element::new(ElementKind::Document)
        .with_child(child.into_node())
        .into_node()
}

proptest! {
    #[test]
    fn preformatted_text_is_preserved(text in "[a-z \t\n]{1,60}") {
        prop_assume!(!text.trim().is_empty());

        let root = in_document(Element::new(ElementKind::Preformatted).with_text(&text));
        let conversion = convert(&root, &ConvertOptions::default());

        prop_assert!(conversion.is_clean());
        prop_assert_eq!(
            conversion.document.blocks,
            vec![Block::LiteralBlock(LiteralBlock { text })]
        );
    }

    #[test]
    fn blank_text_emits_nothing(text in "[ \t\r\n]{0,30}") {
        let root = in_document(Element::new(ElementKind::Paragraph).with_text(&text));
        let options = ConvertOptions::default();

        let events = to_events(&root, &options);
        prop_assert!(!events.iter().any(|e| matches!(e, Event::Text(_))));

        let conversion = convert(&root, &options);
        prop_assert!(conversion.is_clean());
        prop_assert!(conversion.document.is_empty());
    }

    #[test]
    fn entity_decoding_round_trips_literals(text in "[<>&a-z ]{0,40}") {
        let decoded = unescape_entities(&escape_target_specials(&unescape_entities(&text)));
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn hash_href_is_always_anchor(id in "\\PC{0,20}", display in "\\PC{0,20}") {
        let href = format!("#{id}");
        match classify(Some(&href), &display) {
            // Only surrounding whitespace of the whole href is dropped.
            Reference::Anchor { id: anchor, .. } => {
                prop_assert_eq!(anchor.as_str(), id.trim_end())
            }
            other => prop_assert!(false, "expected anchor, got {:?}", other),
        }
    }

    #[test]
    fn arbitrary_trees_always_finalize(depth in 0usize..6, kinds in prop::collection::vec(0usize..8, 1..8)) {
        let pool = [
            ElementKind::Paragraph,
            ElementKind::UnorderedList,
            ElementKind::ListItem,
            ElementKind::Table,
            ElementKind::TableRow,
            ElementKind::TableDataCell,
            ElementKind::DefinitionDescription,
            ElementKind::Heading(2),
        ];
        let mut node = Element::new(ElementKind::Bold).with_text("leaf");
        for (i, k) in kinds.iter().enumerate().take(depth + 1) {
            node = Element::new(pool[*k].clone())
                .with_text(&format!("t{i}"))
                .with_child(node.into_node());
        }

        // Walker output is balanced, so nothing is ever left open at the end.
        let conversion = convert(&in_document(node), &ConvertOptions::default());
        let has_unclosed = conversion
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Unclosed { .. }));
        prop_assert!(!has_unclosed);
    }
}
