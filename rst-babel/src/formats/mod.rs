//! Output views over converted documents
//!
//! Serializing to reST text is not done here; these are inspection formats.

pub mod icons;
pub mod treeviz;

pub use treeviz::{
    markup_to_treeviz_str, sections_to_treeviz_str, to_treeviz_str, to_treeviz_str_with_options,
    TreevizOptions,
};
