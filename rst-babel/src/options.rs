//! Conversion options

use crate::common::links::DEFAULT_SYMBOLIC_ROLE;

/// Knobs for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Role tag attached to every symbolic cross-reference.
    pub symbolic_role: String,
    /// Legacy span parsing: `colspan` is only read when a `rowspan` attribute is present too.
    pub bug_compatible_spans: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            symbolic_role: DEFAULT_SYMBOLIC_ROLE.to_string(),
            bug_compatible_spans: false,
        }
    }
}

impl ConvertOptions {
    pub fn with_symbolic_role(mut self, role: impl Into<String>) -> Self {
        self.symbolic_role = role.into();
        self
    }

    pub fn with_bug_compatible_spans(mut self, enabled: bool) -> Self {
        self.bug_compatible_spans = enabled;
        self
    }
}
