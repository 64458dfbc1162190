//! Markup tree → event stream
//!
//! Depth-first, order-preserving traversal of the input tree. Each element kind has a handler
//! that decides which events to emit and whether to descend; the walker owns no output state
//! beyond knowing whether it is currently inside a preformatted block.
//!
//! Whitespace handling happens here, at the leaves:
//! - text directly under a list root (between items) is dropped
//! - outside preformatted blocks, horizontal space next to a newline collapses into the newline,
//!   and the first child of a block element loses its leading spaces (never its newlines)
//! - inside preformatted blocks text is passed through untouched, blank runs included
//! - outside them, text that is blank after that is not emitted at all

use crate::common::links::classify_with_role;
use crate::common::text::{collapse_whitespace, strip_leading_horizontal};
use crate::ir::events::{EmphasisKind, EventSink};
use crate::markup::{Element, ElementKind, MarkupNode, TextNode};
use crate::options::ConvertOptions;

/// Walk a tree with default options.
pub fn walk<S: EventSink + ?Sized>(root: &MarkupNode, sink: &mut S) {
    walk_with_options(root, sink, &ConvertOptions::default());
}

/// Walk a tree, emitting `start_document` first and `end_document` last.
pub fn walk_with_options<S: EventSink + ?Sized>(
    root: &MarkupNode,
    sink: &mut S,
    options: &ConvertOptions,
) {
    let mut walker = Walker {
        sink,
        options,
        preformatted_depth: 0,
    };
    walker.sink.start_document();
    walker.visit(root, true);
    walker.sink.end_document();
}

struct Walker<'a, S: ?Sized> {
    sink: &'a mut S,
    options: &'a ConvertOptions,
    preformatted_depth: usize,
}

impl<S: EventSink + ?Sized> Walker<'_, S> {
    fn in_preformatted(&self) -> bool {
        self.preformatted_depth > 0
    }

    fn visit(&mut self, node: &MarkupNode, first_child: bool) {
        match node {
            MarkupNode::Text(text) => self.visit_text(text, first_child),
            MarkupNode::Element(element) => self.visit_element(element),
        }
    }

    fn visit_children(&mut self, element: &Element) {
        for (i, child) in element.children.iter().enumerate() {
            self.visit(child, i == 0);
        }
    }

    fn visit_text(&mut self, node: &TextNode, first_child: bool) {
        if node.parent.is_list() {
            return;
        }

        if self.in_preformatted() {
            if !node.text.is_empty() {
                self.sink.text(node.text.clone());
            }
            return;
        }

        // Spaces at the edge of an inline style separate it from its neighbours.
        let collapsed = collapse_whitespace(&node.text, true);
        let text = if first_child && !node.parent.is_inline_style() {
            strip_leading_horizontal(&collapsed)
        } else {
            collapsed.as_str()
        };

        if !text.trim().is_empty() {
            self.sink.text(text.to_string());
        }
    }

    fn visit_element(&mut self, element: &Element) {
        match &element.kind {
            ElementKind::Document | ElementKind::Wrapper => self.visit_children(element),

            ElementKind::Head => {
                log::trace!("skipping metadata subtree");
            }

            ElementKind::Bold => self.visit_emphasis(element, EmphasisKind::Bold),
            ElementKind::Italic => self.visit_emphasis(element, EmphasisKind::Italic),
            ElementKind::Monospace => self.visit_emphasis(element, EmphasisKind::Monospace),
            ElementKind::Subscript => self.visit_emphasis(element, EmphasisKind::Subscript),
            ElementKind::Superscript => self.visit_emphasis(element, EmphasisKind::Superscript),

            ElementKind::Heading(level) => {
                self.sink.start_heading(*level);
                self.visit_children(element);
                self.sink.end_heading(*level);
            }

            ElementKind::LineBreak => self.sink.line_break(),
            ElementKind::HorizontalRule => self.sink.horizontal_rule(),

            ElementKind::Code => {
                let flattened = MarkupNode::Element(element.clone()).flatten_text();
                let code = if self.in_preformatted() {
                    flattened
                } else {
                    collapse_whitespace(&flattened, false).trim().to_string()
                };
                if !code.is_empty() {
                    self.sink.code(code);
                }
            }

            ElementKind::Paragraph => {
                self.sink.start_paragraph();
                self.visit_children(element);
                self.sink.end_paragraph();
            }

            ElementKind::BlockQuote => {
                self.sink.start_block_quote();
                self.visit_children(element);
                self.sink.end_block_quote();
            }

            ElementKind::Preformatted => {
                self.sink.start_preformatted();
                self.preformatted_depth += 1;
                self.visit_children(element);
                self.preformatted_depth -= 1;
                self.sink.end_preformatted();
            }

            ElementKind::OrderedList | ElementKind::UnorderedList => {
                let ordered = element.kind == ElementKind::OrderedList;
                self.sink.start_list(ordered);
                self.visit_children(element);
                self.sink.end_list(ordered);
            }

            ElementKind::ListItem => {
                self.sink.start_list_item();
                self.visit_children(element);
                self.sink.end_list_item();
            }

            ElementKind::Anchor => self.visit_anchor(element),

            ElementKind::Table => {
                self.sink.start_table();
                self.visit_table_rows(element);
                self.sink.end_table();
            }

            // Table parts outside a table still produce their events; the builder reports them.
            ElementKind::TableHead | ElementKind::TableBody => self.visit_table_rows(element),
            ElementKind::TableRow => self.visit_row(element),
            ElementKind::TableHeaderCell | ElementKind::TableDataCell => self.visit_cell(element),

            ElementKind::DefinitionList => {
                self.sink.start_definition_list();
                for child in element_children(element) {
                    match child.kind {
                        ElementKind::DefinitionTerm | ElementKind::DefinitionDescription => {
                            self.visit_element(child)
                        }
                        _ => log::debug!("ignoring <{}> inside <dl>", child.kind.label()),
                    }
                }
                self.sink.end_definition_list();
            }

            ElementKind::DefinitionTerm => {
                self.sink.start_definition_term();
                self.visit_children(element);
                self.sink.end_definition_term();
            }

            ElementKind::DefinitionDescription => {
                self.sink.start_definition_description();
                self.visit_children(element);
                self.sink.end_definition_description();
            }

            ElementKind::Unknown(_) => self.sink.unrecognized(element.kind.label()),
        }
    }

    fn visit_emphasis(&mut self, element: &Element, kind: EmphasisKind) {
        self.sink.start_emphasis(kind);
        self.visit_children(element);
        self.sink.end_emphasis(kind);
    }

    fn visit_anchor(&mut self, anchor: &Element) {
        let href = anchor.attribute("href");

        if href.is_none_or(|h| h.trim().is_empty()) {
            let id = anchor
                .attribute("name")
                .or_else(|| anchor.attribute("id"))
                .map(str::trim)
                .filter(|id| !id.is_empty());
            if let Some(id) = id {
                self.sink.target(id.to_string());
                self.visit_children(anchor);
                return;
            }
        }

        let flattened = MarkupNode::Element(anchor.clone()).flatten_text();
        let display = collapse_whitespace(&flattened, false);
        let reference = classify_with_role(href, display.trim(), &self.options.symbolic_role);
        self.sink.link(reference);
    }

    fn visit_table_rows(&mut self, element: &Element) {
        for child in element_children(element) {
            match child.kind {
                ElementKind::TableHead | ElementKind::TableBody => {
                    for row in element_children(child) {
                        if row.kind == ElementKind::TableRow {
                            self.visit_row(row);
                        }
                    }
                }
                ElementKind::TableRow => self.visit_row(child),
                _ => log::debug!("ignoring <{}> inside table", child.kind.label()),
            }
        }
    }

    fn visit_row(&mut self, row: &Element) {
        self.sink.start_table_row();
        for cell in element_children(row) {
            match cell.kind {
                ElementKind::TableHeaderCell | ElementKind::TableDataCell => self.visit_cell(cell),
                _ => log::debug!("ignoring <{}> inside <tr>", cell.kind.label()),
            }
        }
        self.sink.end_table_row();
    }

    fn visit_cell(&mut self, cell: &Element) {
        if cell.kind == ElementKind::TableHeaderCell {
            let flattened = MarkupNode::Element(cell.clone()).flatten_text();
            let text = collapse_whitespace(&flattened, false).trim().to_string();
            self.sink.header_cell(text);
            return;
        }

        let (rowspan, colspan) = cell_spans(cell, self.options);
        self.sink.start_data_cell(rowspan, colspan);
        self.visit_children(cell);
        self.sink.end_data_cell();
    }
}

fn element_children(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|child| match child {
        MarkupNode::Element(e) => Some(e),
        MarkupNode::Text(_) => None,
    })
}

/// Read `rowspan` / `colspan`; `0` when absent or unparsable.
fn cell_spans(cell: &Element, options: &ConvertOptions) -> (u32, u32) {
    let rowspan_attr = cell.attribute("rowspan");
    let rowspan = parse_span(rowspan_attr);
    let colspan = if options.bug_compatible_spans && rowspan_attr.is_none() {
        0
    } else {
        parse_span(cell.attribute("colspan"))
    };
    (rowspan, colspan)
}

fn parse_span(value: Option<&str>) -> u32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}
