//! Event stream → output document
//!
//! # The High-Level Concept
//!
//! The builder rebuilds a tree from the walker's flat events. It keeps a stack of *open*
//! containers: a begin event pushes one, the matching end event pops it and folds the finished
//! node into the container underneath. The bottom of the stack is the document root and is never
//! popped.
//!
//! Two small side stacks ride along:
//! - the emphasis stack: styles currently in effect; only the innermost one is applied to a text
//!   run
//! - the pending heading slot: headings never go on the container stack, their content is
//!   collected into a title until the heading ends
//!
//! # Closing
//!
//! `close_until(kind)` scans the stack for the nearest open container of that kind and pops
//! everything above it (inclusive), folding each node into its parent. Containers popped this way
//! without their own end event are remembered as *orphans*, so their late end events are consumed
//! quietly instead of being reported. Headings force-close all the way back to the root.
//!
//! # Recovery
//!
//! Nothing here fails. An event the stack cannot accept is reported as a [`Diagnostic`] and
//! ignored; when that event is a begin, a placeholder swallows everything up to its matching end
//! so one bad construct costs exactly one diagnostic.

use crate::common::links::Reference;
use crate::common::text::{normalize_inline, split_surrounding_whitespace, unescape_entities};
use crate::error::Diagnostic;
use crate::ir::events::{EmphasisKind, EventSink};
use crate::ir::nodes::{
    Block, BlockQuote, Document, GridTable, Inline, List, ListItem, LiteralBlock, Paragraph,
    TableCell, TableRow, Title,
};
use crate::Conversion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Document,
    Paragraph,
    List,
    ListItem,
    BlockQuote,
    Preformatted,
    Table,
    Row,
    Cell,
    Discarded,
}

impl ContainerKind {
    fn label(self) -> &'static str {
        match self {
            ContainerKind::Document => "document",
            ContainerKind::Paragraph => "paragraph",
            ContainerKind::List => "list",
            ContainerKind::ListItem => "list item",
            ContainerKind::BlockQuote => "block quote",
            ContainerKind::Preformatted => "preformatted block",
            ContainerKind::Table => "table",
            ContainerKind::Row => "table row",
            ContainerKind::Cell => "table cell",
            ContainerKind::Discarded => "discarded construct",
        }
    }
}

/// An open container on the stack.
#[derive(Debug)]
enum Container {
    Document {
        blocks: Vec<Block>,
    },
    /// `implicit` paragraphs were opened by loose inline content, not by a begin event.
    Paragraph {
        content: Vec<Inline>,
        implicit: bool,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    ListItem {
        blocks: Vec<Block>,
        implicit: bool,
    },
    BlockQuote {
        blocks: Vec<Block>,
    },
    Preformatted {
        text: String,
    },
    Table {
        rows: Vec<TableRow>,
        definition_list: bool,
    },
    Row {
        cells: Vec<TableCell>,
        /// Opened on behalf of a definition term or description.
        implicit: bool,
    },
    Cell {
        rowspan: u32,
        colspan: u32,
        blocks: Vec<Block>,
    },
    /// A rejected begin event. Counts nested begins so it pops on the matching end.
    Discarded {
        depth: usize,
    },
}

impl Container {
    fn kind(&self) -> ContainerKind {
        match self {
            Container::Document { .. } => ContainerKind::Document,
            Container::Paragraph { .. } => ContainerKind::Paragraph,
            Container::List { .. } => ContainerKind::List,
            Container::ListItem { .. } => ContainerKind::ListItem,
            Container::BlockQuote { .. } => ContainerKind::BlockQuote,
            Container::Preformatted { .. } => ContainerKind::Preformatted,
            Container::Table { .. } => ContainerKind::Table,
            Container::Row { .. } => ContainerKind::Row,
            Container::Cell { .. } => ContainerKind::Cell,
            Container::Discarded { .. } => ContainerKind::Discarded,
        }
    }

    /// Whether a begin event opened this container (and an end event is expected for it).
    fn is_explicit(&self) -> bool {
        !matches!(
            self,
            Container::Document { .. }
                | Container::Paragraph { implicit: true, .. }
                | Container::ListItem { implicit: true, .. }
                | Container::Row { implicit: true, .. }
        )
    }

    fn accepts_blocks(&self) -> bool {
        matches!(
            self,
            Container::Document { .. }
                | Container::ListItem { .. }
                | Container::BlockQuote { .. }
                | Container::Cell { .. }
        )
    }

    fn paragraph(implicit: bool) -> Self {
        Container::Paragraph {
            content: vec![],
            implicit,
        }
    }

    fn list_item(implicit: bool) -> Self {
        Container::ListItem {
            blocks: vec![],
            implicit,
        }
    }
}

#[derive(Debug)]
enum PendingHeading {
    Title(Title),
    /// Level outside 1 to 6: content is dropped.
    Unsupported,
}

/// The event sink that assembles a [`Document`].
///
/// One builder converts one fragment. Feed it events (usually through
/// [`walk`](crate::common::walker::walk)), then call [`finalize`](Self::finalize).
#[derive(Debug)]
pub struct DocumentBuilder {
    stack: Vec<Container>,
    emphasis: Vec<EmphasisKind>,
    heading: Option<PendingHeading>,
    /// Headings flushed early by block content; their end events are expected.
    interrupted_headings: usize,
    orphans: Vec<ContainerKind>,
    started: bool,
    finished: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![Container::Document { blocks: vec![] }],
            emphasis: vec![],
            heading: None,
            interrupted_headings: 0,
            orphans: vec![],
            started: false,
            finished: false,
            diagnostics: vec![],
        }
    }

    /// Finish the conversion.
    ///
    /// If `end_document` never arrived, the stack is force-closed here exactly as it would have
    /// been then.
    pub fn finalize(mut self) -> Conversion {
        if !self.finished {
            self.finish();
        }

        let blocks = match self.stack.pop() {
            Some(Container::Document { blocks }) => blocks,
            _ => vec![],
        };

        Conversion {
            document: Document { blocks },
            diagnostics: self.diagnostics,
        }
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn after_end(&mut self, event: &str) -> bool {
        if self.finished {
            self.record(Diagnostic::structural(event, "document already ended"));
        }
        self.finished
    }

    fn swallowing(&self) -> bool {
        matches!(self.stack.last(), Some(Container::Discarded { .. }))
    }

    fn swallow_begin(&mut self) -> bool {
        match self.stack.last_mut() {
            Some(Container::Discarded { depth }) => {
                *depth += 1;
                true
            }
            _ => false,
        }
    }

    fn swallow_end(&mut self) -> bool {
        match self.stack.last_mut() {
            Some(Container::Discarded { depth }) => {
                *depth -= 1;
                if *depth == 0 {
                    self.stack.pop();
                }
                true
            }
            _ => false,
        }
    }

    fn reject(&mut self, event: &str, reason: &str) {
        self.record(Diagnostic::structural(event, reason));
        self.stack.push(Container::Discarded { depth: 1 });
    }

    fn top(&self) -> Option<&Container> {
        self.stack.last()
    }

    /// Pop the top container and fold it into its parent. The root is never popped.
    fn pop_into_parent(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(container) = self.stack.pop() else {
            return;
        };

        match container {
            Container::Document { .. } | Container::Discarded { .. } => {}
            Container::Paragraph { content, .. } => {
                if !content.is_empty() {
                    self.push_block(Block::Paragraph(Paragraph { content }));
                }
            }
            Container::List { ordered, items } => {
                if !items.is_empty() {
                    let list = List { items };
                    self.push_block(if ordered {
                        Block::EnumeratedList(list)
                    } else {
                        Block::BulletList(list)
                    });
                }
            }
            Container::ListItem { blocks, .. } => match self.stack.last_mut() {
                Some(Container::List { items, .. }) => items.push(ListItem { blocks }),
                _ => self.record(Diagnostic::structural("end_list_item", "no open list")),
            },
            Container::BlockQuote { blocks } => {
                if !blocks.is_empty() {
                    self.push_block(Block::BlockQuote(BlockQuote { blocks }));
                }
            }
            Container::Preformatted { text } => {
                if !text.trim().is_empty() {
                    self.push_block(Block::LiteralBlock(LiteralBlock { text }));
                }
            }
            Container::Table {
                rows,
                definition_list,
            } => {
                if !rows.is_empty() {
                    self.push_block(Block::Table(GridTable {
                        rows,
                        definition_list,
                    }));
                }
            }
            Container::Row { cells, .. } => match self.stack.last_mut() {
                Some(Container::Table { rows, .. }) => rows.push(TableRow { cells }),
                _ => self.record(Diagnostic::structural("end_table_row", "no open table")),
            },
            Container::Cell {
                rowspan,
                colspan,
                blocks,
            } => match self.stack.last_mut() {
                Some(Container::Row { cells, .. }) => cells.push(TableCell {
                    header: false,
                    rowspan,
                    colspan,
                    blocks,
                }),
                _ => self.record(Diagnostic::structural("end_data_cell", "no open table row")),
            },
        }
    }

    /// Pop a container that did not get its own end event.
    fn force_pop(&mut self) {
        if let Some(container) = self.stack.last() {
            if container.is_explicit() && container.kind() != ContainerKind::Discarded {
                log::debug!("force-closing {}", container.kind().label());
                self.orphans.push(container.kind());
            }
        }
        self.pop_into_parent();
    }

    /// Close everything above and including the nearest open container of `kind`.
    ///
    /// Returns false (and changes nothing) if no such container is open.
    fn close_until(&mut self, kind: ContainerKind, event: &str) -> bool {
        let Some(position) = self.stack.iter().rposition(|c| c.kind() == kind) else {
            if let Some(i) = self.orphans.iter().position(|k| *k == kind) {
                self.orphans.remove(i);
            } else {
                let reason = format!("no open {}", kind.label());
                self.record(Diagnostic::structural(event, reason));
            }
            return false;
        };
        if position == 0 {
            return false;
        }

        while self.stack.len() > position + 1 {
            self.force_pop();
        }
        self.pop_into_parent();
        true
    }

    fn close_to_root(&mut self) {
        while self.stack.len() > 1 {
            self.force_pop();
        }
    }

    fn close_paragraph(&mut self) {
        if matches!(self.top(), Some(Container::Paragraph { .. })) {
            self.force_pop();
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(
                Container::Document { blocks }
                | Container::ListItem { blocks, .. }
                | Container::BlockQuote { blocks }
                | Container::Cell { blocks, .. },
            ) => blocks.push(block),
            Some(Container::List { items, .. }) => items.push(ListItem {
                blocks: vec![block],
            }),
            _ => self.record(Diagnostic::structural(
                "block",
                "no open container accepts block content",
            )),
        }
    }

    /// Open a block-level container below the current position.
    fn open_block(&mut self, container: Container, event: &str) {
        self.leave_heading();
        self.close_paragraph();
        if matches!(self.top(), Some(Container::List { .. })) {
            self.stack.push(Container::list_item(true));
        }

        if self.top().is_some_and(Container::accepts_blocks) {
            self.stack.push(container);
        } else {
            self.reject(event, "no open container accepts block content");
        }
    }

    /// Block content inside a heading ends the title early.
    fn leave_heading(&mut self) {
        if self.heading.is_some() {
            self.flush_heading();
            self.interrupted_headings += 1;
        }
    }

    fn flush_heading(&mut self) {
        let Some(PendingHeading::Title(mut title)) = self.heading.take() else {
            return;
        };

        trim_title(&mut title.content);
        if !title.content.is_empty() {
            self.push_block(Block::Title(title));
        }
    }

    fn push_inline(&mut self, inline: Inline, event: &str) {
        match &mut self.heading {
            Some(PendingHeading::Title(title)) => {
                title.content.push(inline);
                return;
            }
            Some(PendingHeading::Unsupported) => return,
            None => {}
        }

        match self.stack.last_mut() {
            Some(Container::Paragraph { content, .. }) => content.push(inline),
            Some(Container::Preformatted { text }) => text.push_str(&inline.plain_text()),
            Some(Container::List { .. }) => {
                self.stack.push(Container::list_item(true));
                self.open_inline_paragraph(inline);
            }
            Some(container) if container.accepts_blocks() => self.open_inline_paragraph(inline),
            _ => self.record(Diagnostic::structural(
                event,
                "no open container accepts inline content",
            )),
        }
    }

    fn open_inline_paragraph(&mut self, inline: Inline) {
        self.stack.push(Container::Paragraph {
            content: vec![inline],
            implicit: true,
        });
    }

    /// Split off surrounding whitespace and apply the innermost style to the core.
    fn styled_runs(&self, text: &str) -> Vec<Inline> {
        let Some(&kind) = self.emphasis.last() else {
            return vec![Inline::text(normalize_inline(text))];
        };

        let (leading, core, trailing) = split_surrounding_whitespace(text);
        let mut runs = vec![];
        if !leading.is_empty() {
            runs.push(Inline::text(leading));
        }
        if !core.is_empty() {
            runs.push(emphasized(kind, normalize_inline(core)));
        }
        if !trailing.is_empty() {
            runs.push(Inline::text(trailing));
        }
        runs
    }

    /// Force-close the stack at end of document.
    fn finish(&mut self) {
        if self.heading.is_some() {
            self.flush_heading();
        }

        let unclosed = self.stack[1..]
            .iter()
            .filter(|c| c.is_explicit())
            .count();
        self.close_to_root();
        self.orphans.clear();
        self.emphasis.clear();

        if unclosed > 0 {
            self.record(Diagnostic::Unclosed { count: unclosed });
        }
        self.finished = true;
    }
}

fn emphasized(kind: EmphasisKind, text: String) -> Inline {
    match kind {
        EmphasisKind::Bold => Inline::Strong { text },
        EmphasisKind::Italic => Inline::Emphasis { text },
        EmphasisKind::Monospace => Inline::Interpreted { text },
        EmphasisKind::Subscript => Inline::Role {
            role: "sub".to_string(),
            text,
        },
        EmphasisKind::Superscript => Inline::Role {
            role: "sup".to_string(),
            text,
        },
    }
}

/// Titles are single-line: trim the outer text runs and drop runs left empty.
fn trim_title(content: &mut Vec<Inline>) {
    if let Some(Inline::Text { text }) = content.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Inline::Text { text }) = content.last_mut() {
        *text = text.trim_end().to_string();
    }
    content.retain(|inline| !matches!(inline, Inline::Text { text } if text.is_empty()));
}

impl EventSink for DocumentBuilder {
    fn start_document(&mut self) {
        if self.after_end("start_document") {
            return;
        }
        if self.started {
            self.record(Diagnostic::structural(
                "start_document",
                "document already started",
            ));
            return;
        }
        self.started = true;
    }

    fn end_document(&mut self) {
        if self.after_end("end_document") {
            return;
        }
        self.finish();
    }

    fn start_paragraph(&mut self) {
        if self.after_end("start_paragraph") || self.swallow_begin() || self.heading.is_some() {
            return;
        }
        self.open_block(Container::paragraph(false), "start_paragraph");
    }

    fn end_paragraph(&mut self) {
        if self.after_end("end_paragraph") || self.swallow_end() || self.heading.is_some() {
            return;
        }
        self.close_until(ContainerKind::Paragraph, "end_paragraph");
    }

    fn start_heading(&mut self, level: u8) {
        if self.after_end("start_heading") || self.swallow_begin() {
            return;
        }
        if self.heading.is_some() {
            self.flush_heading();
            self.interrupted_headings += 1;
        }

        self.close_to_root();

        if (1..=6).contains(&level) {
            self.heading = Some(PendingHeading::Title(Title {
                level,
                content: vec![],
            }));
        } else {
            self.record(Diagnostic::structural(
                "start_heading",
                format!("unsupported heading level {level}"),
            ));
            self.heading = Some(PendingHeading::Unsupported);
        }
    }

    fn end_heading(&mut self, _level: u8) {
        if self.after_end("end_heading") || self.swallow_end() {
            return;
        }
        if self.heading.is_some() {
            self.flush_heading();
        } else if self.interrupted_headings > 0 {
            self.interrupted_headings -= 1;
        } else {
            self.record(Diagnostic::structural("end_heading", "no open heading"));
        }
    }

    fn start_emphasis(&mut self, kind: EmphasisKind) {
        if self.after_end("start_emphasis") || self.swallow_begin() {
            return;
        }
        self.emphasis.push(kind);
    }

    fn end_emphasis(&mut self, kind: EmphasisKind) {
        if self.after_end("end_emphasis") || self.swallow_end() {
            return;
        }
        match self.emphasis.iter().rposition(|k| *k == kind) {
            Some(i) if i + 1 == self.emphasis.len() => {
                self.emphasis.pop();
            }
            Some(i) => {
                self.emphasis.remove(i);
                self.record(Diagnostic::structural(
                    "end_emphasis",
                    format!("{kind:?} closed out of order"),
                ));
            }
            None => self.record(Diagnostic::structural(
                "end_emphasis",
                format!("no open {kind:?} emphasis"),
            )),
        }
    }

    fn start_block_quote(&mut self) {
        if self.after_end("start_block_quote") || self.swallow_begin() {
            return;
        }
        self.open_block(Container::BlockQuote { blocks: vec![] }, "start_block_quote");
    }

    fn end_block_quote(&mut self) {
        if self.after_end("end_block_quote") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::BlockQuote, "end_block_quote");
    }

    fn start_preformatted(&mut self) {
        if self.after_end("start_preformatted") || self.swallow_begin() {
            return;
        }
        self.open_block(
            Container::Preformatted {
                text: String::new(),
            },
            "start_preformatted",
        );
    }

    fn end_preformatted(&mut self) {
        if self.after_end("end_preformatted") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::Preformatted, "end_preformatted");
    }

    fn start_list(&mut self, ordered: bool) {
        if self.after_end("start_list") || self.swallow_begin() {
            return;
        }
        self.open_block(
            Container::List {
                ordered,
                items: vec![],
            },
            "start_list",
        );
    }

    fn end_list(&mut self, _ordered: bool) {
        if self.after_end("end_list") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::List, "end_list");
    }

    fn start_list_item(&mut self) {
        if self.after_end("start_list_item") || self.swallow_begin() {
            return;
        }
        self.leave_heading();
        self.close_paragraph();
        if matches!(
            self.top(),
            Some(Container::ListItem { implicit: true, .. })
        ) {
            self.pop_into_parent();
        }

        if matches!(self.top(), Some(Container::List { .. })) {
            self.stack.push(Container::list_item(false));
        } else {
            self.reject("start_list_item", "no open list");
        }
    }

    fn end_list_item(&mut self) {
        if self.after_end("end_list_item") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::ListItem, "end_list_item");
    }

    fn start_table(&mut self) {
        if self.after_end("start_table") || self.swallow_begin() {
            return;
        }
        self.open_block(
            Container::Table {
                rows: vec![],
                definition_list: false,
            },
            "start_table",
        );
    }

    fn end_table(&mut self) {
        if self.after_end("end_table") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::Table, "end_table");
    }

    fn start_table_row(&mut self) {
        if self.after_end("start_table_row") || self.swallow_begin() {
            return;
        }
        self.leave_heading();
        if matches!(self.top(), Some(Container::Table { .. })) {
            self.stack.push(Container::Row {
                cells: vec![],
                implicit: false,
            });
        } else {
            self.reject("start_table_row", "no open table");
        }
    }

    fn end_table_row(&mut self) {
        if self.after_end("end_table_row") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::Row, "end_table_row");
    }

    fn header_cell(&mut self, text: String) {
        if self.after_end("header_cell") || self.swallowing() {
            return;
        }
        match self.stack.last_mut() {
            Some(Container::Row { cells, .. }) => {
                let blocks = if text.is_empty() {
                    vec![]
                } else {
                    vec![Block::Paragraph(Paragraph {
                        content: vec![Inline::text(normalize_inline(&text))],
                    })]
                };
                cells.push(TableCell {
                    header: true,
                    rowspan: 0,
                    colspan: 0,
                    blocks,
                });
            }
            _ => self.record(Diagnostic::structural("header_cell", "no open table row")),
        }
    }

    fn start_data_cell(&mut self, rowspan: u32, colspan: u32) {
        if self.after_end("start_data_cell") || self.swallow_begin() {
            return;
        }
        if matches!(self.top(), Some(Container::Row { .. })) {
            self.stack.push(Container::Cell {
                rowspan,
                colspan,
                blocks: vec![],
            });
        } else {
            self.reject("start_data_cell", "no open table row");
        }
    }

    fn end_data_cell(&mut self) {
        if self.after_end("end_data_cell") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::Cell, "end_data_cell");
    }

    fn start_definition_list(&mut self) {
        if self.after_end("start_definition_list") || self.swallow_begin() {
            return;
        }
        self.open_block(
            Container::Table {
                rows: vec![],
                definition_list: true,
            },
            "start_definition_list",
        );
    }

    fn end_definition_list(&mut self) {
        if self.after_end("end_definition_list") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::Table, "end_definition_list");
    }

    fn start_definition_term(&mut self) {
        if self.after_end("start_definition_term") || self.swallow_begin() {
            return;
        }
        self.leave_heading();
        // A term without description leaves its row open.
        if matches!(self.top(), Some(Container::Row { .. })) {
            self.pop_into_parent();
        }

        if matches!(
            self.top(),
            Some(Container::Table {
                definition_list: true,
                ..
            })
        ) {
            self.stack.push(Container::Row {
                cells: vec![],
                implicit: true,
            });
            self.stack.push(Container::Cell {
                rowspan: 0,
                colspan: 0,
                blocks: vec![],
            });
        } else {
            self.reject("start_definition_term", "no open definition list");
        }
    }

    fn end_definition_term(&mut self) {
        if self.after_end("end_definition_term") || self.swallow_end() {
            return;
        }
        self.close_until(ContainerKind::Cell, "end_definition_term");
    }

    fn start_definition_description(&mut self) {
        if self.after_end("start_definition_description") || self.swallow_begin() {
            return;
        }
        self.leave_heading();
        match self.top() {
            Some(Container::Row { .. }) => {}
            Some(Container::Table {
                definition_list: true,
                ..
            }) => {
                // Description without a term: keep the two-column shape.
                self.stack.push(Container::Row {
                    cells: vec![TableCell::default()],
                    implicit: true,
                });
            }
            _ => {
                self.reject("start_definition_description", "no open definition list");
                return;
            }
        }
        self.stack.push(Container::Cell {
            rowspan: 0,
            colspan: 0,
            blocks: vec![],
        });
    }

    fn end_definition_description(&mut self) {
        if self.after_end("end_definition_description") || self.swallow_end() {
            return;
        }
        if self.close_until(ContainerKind::Cell, "end_definition_description")
            && matches!(self.top(), Some(Container::Row { .. }))
        {
            self.pop_into_parent();
        }
    }

    fn text(&mut self, text: String) {
        if self.after_end("text") || self.swallowing() {
            return;
        }

        if matches!(self.heading, Some(PendingHeading::Title(_))) {
            self.push_inline(Inline::text(normalize_inline(&text)), "text");
            return;
        }
        if self.heading.is_none() {
            if let Some(Container::Preformatted { text: buffer }) = self.stack.last_mut() {
                buffer.push_str(&unescape_entities(&text));
                return;
            }
        }

        for run in self.styled_runs(&text) {
            self.push_inline(run, "text");
        }
    }

    fn line_break(&mut self) {
        if self.after_end("line_break") || self.swallowing() {
            return;
        }
        if self.heading.is_some() {
            self.push_inline(Inline::text(" "), "line_break");
            return;
        }
        let breakable = matches!(
            self.top(),
            Some(Container::Paragraph { .. } | Container::Preformatted { .. })
        );
        // Nothing to break yet otherwise.
        if breakable {
            self.push_inline(Inline::LineBreak, "line_break");
        }
    }

    fn horizontal_rule(&mut self) {
        if self.after_end("horizontal_rule") || self.swallowing() {
            return;
        }
        if self.heading.is_some() || matches!(self.top(), Some(Container::Preformatted { .. })) {
            return;
        }

        self.close_paragraph();
        if matches!(self.top(), Some(Container::List { .. })) {
            self.stack.push(Container::list_item(true));
        }
        if self.top().is_some_and(Container::accepts_blocks) {
            self.push_block(Block::Transition);
        } else {
            self.record(Diagnostic::structural(
                "horizontal_rule",
                "no open container accepts block content",
            ));
        }
    }

    fn code(&mut self, code: String) {
        if self.after_end("code") || self.swallowing() || code.is_empty() {
            return;
        }
        let text = unescape_entities(&code);
        self.push_inline(Inline::Literal { text }, "code");
    }

    fn link(&mut self, reference: Reference) {
        if self.after_end("link") || self.swallowing() {
            return;
        }
        let inline = match reference {
            Reference::Inert { display } => {
                if display.is_empty() {
                    return;
                }
                Inline::text(normalize_inline(&display))
            }
            Reference::External { href, display } => Inline::Hyperlink {
                href,
                text: normalize_inline(&display),
            },
            Reference::Anchor { id, display } => Inline::AnchorReference {
                anchor: id,
                text: normalize_inline(&display),
            },
            Reference::Symbolic {
                role,
                target,
                display,
            } => Inline::CrossReference {
                role,
                target,
                text: normalize_inline(&display),
            },
        };
        self.push_inline(inline, "link");
    }

    fn target(&mut self, id: String) {
        if self.after_end("target") || self.swallowing() {
            return;
        }
        self.push_inline(Inline::Target { id }, "target");
    }

    fn unrecognized(&mut self, label: String) {
        if self.after_end("unrecognized") || self.swallowing() {
            return;
        }
        log::debug!("placeholder for unrecognized element <{label}>");
        self.record(Diagnostic::Unrecognized { tag: label.clone() });
        self.push_inline(Inline::Unrecognized { tag: label }, "unrecognized");
    }
}
