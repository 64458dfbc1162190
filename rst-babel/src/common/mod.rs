//! The conversion core: text normalization, link classification, the walker and the builder.

pub mod builder;
pub mod links;
pub mod sections;
pub mod text;
pub mod walker;
