//! CLI-specific transforms
//!
//! This module defines the inspection views available in the CLI.
//! Each transform is a stage + format combination (e.g., "markup-treeviz", "doc-json").
//!
//! ## Transform Pipeline
//!
//! A fragment passes through three stages:
//!
//! 1. **Parsing** - HTML text → markup tree
//!    - `markup-treeviz`: Element tree with attributes
//!
//! 2. **Walking** - markup tree → flat event stream
//!    - `events`: One event per line, indented by nesting
//!
//! 3. **Building** - events → reStructuredText document
//!    - `doc-treeviz`: Tree visualization with Unicode icons
//!    - `doc-json`: JSON representation
//!    - `sections-treeviz`: Document grouped under its titles

use crate::Error;
use rst_babel::formats::{
    markup_to_treeviz_str, sections_to_treeviz_str, to_treeviz_str_with_options, TreevizOptions,
};
use rst_babel::ir::events::Event;
use rst_babel::markup::html::parse_fragment;
use rst_babel::{convert, sectionize, to_events, ConvertOptions};

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "markup-treeviz",
    "events",
    "doc-treeviz",
    "doc-json",
    "sections-treeviz",
];

/// Execute a named transform on a source fragment
///
/// # Arguments
///
/// * `source` - The HTML fragment to transform
/// * `transform_name` - The transform to apply (e.g., "events", "doc-json")
/// * `options` - Conversion options (symbolic role, span handling)
/// * `treeviz` - Rendering options for the tree views
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    options: &ConvertOptions,
    treeviz: &TreevizOptions,
) -> Result<String, Error> {
    let root = parse_fragment(source);

    match transform_name {
        "markup-treeviz" => Ok(markup_to_treeviz_str(&root, treeviz)),
        "events" => Ok(events_to_text(&to_events(&root, options))),
        "doc-treeviz" => {
            let conversion = convert(&root, options);
            Ok(to_treeviz_str_with_options(&conversion.document, treeviz))
        }
        "doc-json" => {
            let conversion = convert(&root, options);
            let mut json = serde_json::to_string_pretty(&conversion.document)?;
            json.push('\n');
            Ok(json)
        }
        "sections-treeviz" => {
            let conversion = convert(&root, options);
            Ok(sections_to_treeviz_str(
                &sectionize(&conversion.document),
                treeviz,
            ))
        }
        _ => Err(Error::UnknownTransform(transform_name.to_string())),
    }
}

/// +1 for events that open a scope, -1 for events that close one.
fn nesting(event: &Event) -> i32 {
    match event {
        Event::StartDocument
        | Event::StartParagraph
        | Event::StartHeading(_)
        | Event::StartEmphasis(_)
        | Event::StartBlockQuote
        | Event::StartPreformatted
        | Event::StartList { .. }
        | Event::StartListItem
        | Event::StartTable
        | Event::StartTableRow
        | Event::StartDataCell { .. }
        | Event::StartDefinitionList
        | Event::StartDefinitionTerm
        | Event::StartDefinitionDescription => 1,
        Event::EndDocument
        | Event::EndParagraph
        | Event::EndHeading(_)
        | Event::EndEmphasis(_)
        | Event::EndBlockQuote
        | Event::EndPreformatted
        | Event::EndList { .. }
        | Event::EndListItem
        | Event::EndTable
        | Event::EndTableRow
        | Event::EndDataCell
        | Event::EndDefinitionList
        | Event::EndDefinitionTerm
        | Event::EndDefinitionDescription => -1,
        _ => 0,
    }
}

fn events_to_text(events: &[Event]) -> String {
    let mut output = String::new();
    let mut depth: i32 = 0;
    for event in events {
        let delta = nesting(event);
        if delta < 0 {
            depth = (depth - 1).max(0);
        }
        output.push_str(&"  ".repeat(depth as usize));
        output.push_str(&format!("{event:?}"));
        output.push('\n');
        if delta > 0 {
            depth += 1;
        }
    }
    output
}
