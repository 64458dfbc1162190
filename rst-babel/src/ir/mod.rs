//! Intermediate and output representations.
//!
//! `events` is the flat stream between walker and builder, `nodes` the finished document tree.

pub mod events;
pub mod nodes;
