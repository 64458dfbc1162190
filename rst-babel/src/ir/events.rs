//! Defines the flat event stream between the markup walker and the document builder.
//!
//! The walker never builds output itself: it calls into an [`EventSink`], one method per
//! structural event. The builder is the production sink; `Vec<Event>` is a recording sink used
//! for inspection and tests, and [`replay`] feeds a recorded (or hand written) sequence into any
//! other sink.

use crate::common::links::Reference;

/// Inline style kinds that wrap character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisKind {
    Bold,
    Italic,
    Monospace,
    Subscript,
    Superscript,
}

/// Represents a single event in the conversion stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartDocument,
    EndDocument,
    StartParagraph,
    EndParagraph,
    StartHeading(u8),
    EndHeading(u8),
    StartEmphasis(EmphasisKind),
    EndEmphasis(EmphasisKind),
    StartBlockQuote,
    EndBlockQuote,
    StartPreformatted,
    EndPreformatted,
    StartList { ordered: bool },
    EndList { ordered: bool },
    StartListItem,
    EndListItem,
    StartTable,
    EndTable,
    StartTableRow,
    EndTableRow,
    HeaderCell(String),
    StartDataCell { rowspan: u32, colspan: u32 },
    EndDataCell,
    StartDefinitionList,
    EndDefinitionList,
    StartDefinitionTerm,
    EndDefinitionTerm,
    StartDefinitionDescription,
    EndDefinitionDescription,
    Text(String),
    LineBreak,
    HorizontalRule,
    Code(String),
    Link(Reference),
    Target(String),
    Unrecognized(String),
}

impl Event {
    /// Deliver this event to a sink.
    pub fn apply<S: EventSink + ?Sized>(self, sink: &mut S) {
        match self {
            Event::StartDocument => sink.start_document(),
            Event::EndDocument => sink.end_document(),
            Event::StartParagraph => sink.start_paragraph(),
            Event::EndParagraph => sink.end_paragraph(),
            Event::StartHeading(level) => sink.start_heading(level),
            Event::EndHeading(level) => sink.end_heading(level),
            Event::StartEmphasis(kind) => sink.start_emphasis(kind),
            Event::EndEmphasis(kind) => sink.end_emphasis(kind),
            Event::StartBlockQuote => sink.start_block_quote(),
            Event::EndBlockQuote => sink.end_block_quote(),
            Event::StartPreformatted => sink.start_preformatted(),
            Event::EndPreformatted => sink.end_preformatted(),
            Event::StartList { ordered } => sink.start_list(ordered),
            Event::EndList { ordered } => sink.end_list(ordered),
            Event::StartListItem => sink.start_list_item(),
            Event::EndListItem => sink.end_list_item(),
            Event::StartTable => sink.start_table(),
            Event::EndTable => sink.end_table(),
            Event::StartTableRow => sink.start_table_row(),
            Event::EndTableRow => sink.end_table_row(),
            Event::HeaderCell(text) => sink.header_cell(text),
            Event::StartDataCell { rowspan, colspan } => sink.start_data_cell(rowspan, colspan),
            Event::EndDataCell => sink.end_data_cell(),
            Event::StartDefinitionList => sink.start_definition_list(),
            Event::EndDefinitionList => sink.end_definition_list(),
            Event::StartDefinitionTerm => sink.start_definition_term(),
            Event::EndDefinitionTerm => sink.end_definition_term(),
            Event::StartDefinitionDescription => sink.start_definition_description(),
            Event::EndDefinitionDescription => sink.end_definition_description(),
            Event::Text(text) => sink.text(text),
            Event::LineBreak => sink.line_break(),
            Event::HorizontalRule => sink.horizontal_rule(),
            Event::Code(code) => sink.code(code),
            Event::Link(reference) => sink.link(reference),
            Event::Target(id) => sink.target(id),
            Event::Unrecognized(label) => sink.unrecognized(label),
        }
    }
}

/// The seam between walker and builder. One method per structural event.
pub trait EventSink {
    fn start_document(&mut self);
    fn end_document(&mut self);
    fn start_paragraph(&mut self);
    fn end_paragraph(&mut self);
    fn start_heading(&mut self, level: u8);
    fn end_heading(&mut self, level: u8);
    fn start_emphasis(&mut self, kind: EmphasisKind);
    fn end_emphasis(&mut self, kind: EmphasisKind);
    fn start_block_quote(&mut self);
    fn end_block_quote(&mut self);
    fn start_preformatted(&mut self);
    fn end_preformatted(&mut self);
    fn start_list(&mut self, ordered: bool);
    fn end_list(&mut self, ordered: bool);
    fn start_list_item(&mut self);
    fn end_list_item(&mut self);
    fn start_table(&mut self);
    fn end_table(&mut self);
    fn start_table_row(&mut self);
    fn end_table_row(&mut self);
    /// Header cells arrive as one flattened text leaf.
    fn header_cell(&mut self, text: String);
    /// `0` means the span was not specified.
    fn start_data_cell(&mut self, rowspan: u32, colspan: u32);
    fn end_data_cell(&mut self);
    fn start_definition_list(&mut self);
    fn end_definition_list(&mut self);
    fn start_definition_term(&mut self);
    fn end_definition_term(&mut self);
    fn start_definition_description(&mut self);
    fn end_definition_description(&mut self);
    fn text(&mut self, text: String);
    fn line_break(&mut self);
    fn horizontal_rule(&mut self);
    /// Inline code, already flattened.
    fn code(&mut self, code: String);
    fn link(&mut self, reference: Reference);
    fn target(&mut self, id: String);
    fn unrecognized(&mut self, label: String);
}

/// Records the stream as-is.
impl EventSink for Vec<Event> {
    fn start_document(&mut self) {
        self.push(Event::StartDocument);
    }
    fn end_document(&mut self) {
        self.push(Event::EndDocument);
    }
    fn start_paragraph(&mut self) {
        self.push(Event::StartParagraph);
    }
    fn end_paragraph(&mut self) {
        self.push(Event::EndParagraph);
    }
    fn start_heading(&mut self, level: u8) {
        self.push(Event::StartHeading(level));
    }
    fn end_heading(&mut self, level: u8) {
        self.push(Event::EndHeading(level));
    }
    fn start_emphasis(&mut self, kind: EmphasisKind) {
        self.push(Event::StartEmphasis(kind));
    }
    fn end_emphasis(&mut self, kind: EmphasisKind) {
        self.push(Event::EndEmphasis(kind));
    }
    fn start_block_quote(&mut self) {
        self.push(Event::StartBlockQuote);
    }
    fn end_block_quote(&mut self) {
        self.push(Event::EndBlockQuote);
    }
    fn start_preformatted(&mut self) {
        self.push(Event::StartPreformatted);
    }
    fn end_preformatted(&mut self) {
        self.push(Event::EndPreformatted);
    }
    fn start_list(&mut self, ordered: bool) {
        self.push(Event::StartList { ordered });
    }
    fn end_list(&mut self, ordered: bool) {
        self.push(Event::EndList { ordered });
    }
    fn start_list_item(&mut self) {
        self.push(Event::StartListItem);
    }
    fn end_list_item(&mut self) {
        self.push(Event::EndListItem);
    }
    fn start_table(&mut self) {
        self.push(Event::StartTable);
    }
    fn end_table(&mut self) {
        self.push(Event::EndTable);
    }
    fn start_table_row(&mut self) {
        self.push(Event::StartTableRow);
    }
    fn end_table_row(&mut self) {
        self.push(Event::EndTableRow);
    }
    fn header_cell(&mut self, text: String) {
        self.push(Event::HeaderCell(text));
    }
    fn start_data_cell(&mut self, rowspan: u32, colspan: u32) {
        self.push(Event::StartDataCell { rowspan, colspan });
    }
    fn end_data_cell(&mut self) {
        self.push(Event::EndDataCell);
    }
    fn start_definition_list(&mut self) {
        self.push(Event::StartDefinitionList);
    }
    fn end_definition_list(&mut self) {
        self.push(Event::EndDefinitionList);
    }
    fn start_definition_term(&mut self) {
        self.push(Event::StartDefinitionTerm);
    }
    fn end_definition_term(&mut self) {
        self.push(Event::EndDefinitionTerm);
    }
    fn start_definition_description(&mut self) {
        self.push(Event::StartDefinitionDescription);
    }
    fn end_definition_description(&mut self) {
        self.push(Event::EndDefinitionDescription);
    }
    fn text(&mut self, text: String) {
        self.push(Event::Text(text));
    }
    fn line_break(&mut self) {
        self.push(Event::LineBreak);
    }
    fn horizontal_rule(&mut self) {
        self.push(Event::HorizontalRule);
    }
    fn code(&mut self, code: String) {
        self.push(Event::Code(code));
    }
    fn link(&mut self, reference: Reference) {
        self.push(Event::Link(reference));
    }
    fn target(&mut self, id: String) {
        self.push(Event::Target(id));
    }
    fn unrecognized(&mut self, label: String) {
        self.push(Event::Unrecognized(label));
    }
}

/// Feed a sequence of events into a sink, in order.
pub fn replay<S, I>(events: I, sink: &mut S)
where
    S: EventSink + ?Sized,
    I: IntoIterator<Item = Event>,
{
    for event in events {
        event.apply(sink);
    }
}
