//! HTML documentation fragments → reStructuredText document model
//!
//!     This crate turns the loosely written HTML found in documentation comments into a
//!     reST-shaped document tree. It does not render reST text: the resulting tree (serializable
//!     as JSON) is handed to a serializer elsewhere.
//!
//!     This is a pure lib: no printing, no env vars, no files. The rst-cli crate is the shell.
//!
//! Architecture
//!
//!     Conversion is a one-way pipeline:
//!
//!         markup tree ──walk──▶ events ──EventSink──▶ DocumentBuilder ──finalize──▶ Document
//!
//!     The walker and the builder only meet at the EventSink trait (./ir/events.rs). That makes
//!     either side replaceable, and lets the builder be tested with hand written event sequences.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # Diagnostic
//!     ├── options.rs              # ConvertOptions
//!     ├── markup                  # Input model
//!     │   └── html.rs             # html5ever adapter
//!     ├── ir
//!     │   ├── events.rs           # Event, EventSink, replay
//!     │   └── nodes.rs            # Output document model
//!     ├── common
//!     │   ├── text.rs             # Whitespace, entities, escaping
//!     │   ├── links.rs            # Reference classification
//!     │   ├── walker.rs           # Markup tree → events
//!     │   ├── builder.rs          # Events → document
//!     │   └── sections.rs         # Flat titles → nested sections
//!     └── formats
//!         └── treeviz             # Debug tree views
//!
//! Core Algorithms
//!
//!     The interesting work is in the builder (./common/builder.rs): a stack of open containers
//!     with a close-until rule, a side stack for inline styles, and a pending-title slot for
//!     headings. It never fails. Input it cannot place is reported as a Diagnostic and skipped,
//!     and the conversion always produces a document.
//!
//! Testing
//!
//!     Unit tests live next to the code. Scenario, property and snapshot tests live in tests/,
//!     gathered by tests/lib.rs since rust does not discover tests in subdirectories.

pub mod common;
pub mod error;
pub mod formats;
pub mod ir;
pub mod markup;
pub mod options;

pub use common::builder::DocumentBuilder;
pub use common::links::{classify, classify_with_role, Reference};
pub use common::sections::sectionize;
pub use common::walker::{walk, walk_with_options};
pub use error::Diagnostic;
pub use ir::events::{Event, EventSink};
pub use ir::nodes::Document;
pub use markup::MarkupNode;
pub use options::ConvertOptions;

/// The outcome of converting one fragment: always a document, plus whatever went wrong on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// True when no diagnostic was recorded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Convert a markup tree.
pub fn convert(root: &MarkupNode, options: &ConvertOptions) -> Conversion {
    let mut builder = DocumentBuilder::new();
    walk_with_options(root, &mut builder, options);
    builder.finalize()
}

/// Parse an HTML fragment and convert it.
pub fn convert_html(source: &str, options: &ConvertOptions) -> Conversion {
    convert(&markup::html::parse_fragment(source), options)
}

/// The event stream the walker produces for a tree, recorded.
pub fn to_events(root: &MarkupNode, options: &ConvertOptions) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    walk_with_options(root, &mut events, options);
    events
}
