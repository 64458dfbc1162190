//! HTML fragment parsing (HTML → markup tree)
//!
//! Documentation comments carry loosely written HTML, so we lean on html5ever's browser-grade
//! error recovery and only translate the resulting `RcDom` into our own [`MarkupNode`] tree.
//! Comments, doctypes and processing instructions are dropped here.
//!
//! html5ever decodes character references while parsing. Text is re-encoded (`&` → `&amp;`) on
//! the way into the markup tree so that the converter's own entity decoding stays the only one.
//! The continuation marker is not an HTML entity and reaches us verbatim, so it is left alone.

use super::{Element, ElementKind, MarkupNode, TextNode};
use crate::common::text::CONTINUATION_MARKER;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment into a markup tree rooted at an [`ElementKind::Document`] element.
pub fn parse_fragment(source: &str) -> MarkupNode {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(source.as_bytes());

    let mut root = Element::new(ElementKind::Document);
    convert_children(&dom.document, &mut root);
    MarkupNode::Element(root)
}

fn convert_children(handle: &Handle, parent: &mut Element) {
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let mut element = Element::new(ElementKind::from_tag(name.local.as_ref()));
                for attr in attrs.borrow().iter() {
                    element = element.with_attribute(attr.name.local.as_ref(), &attr.value);
                }
                convert_children(child, &mut element);
                parent.children.push(MarkupNode::Element(element));
            }
            NodeData::Text { ref contents } => {
                let text = reencode_ampersands(&contents.borrow());
                parent
                    .children
                    .push(MarkupNode::Text(TextNode::new(&text, parent.kind.clone())));
            }
            _ => {}
        }
    }
}

fn reencode_ampersands(text: &str) -> String {
    text.split(CONTINUATION_MARKER)
        .map(|part| part.replace('&', "&amp;"))
        .collect::<Vec<_>>()
        .join(CONTINUATION_MARKER)
}
