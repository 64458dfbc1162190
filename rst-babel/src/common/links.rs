//! Hyperlink classification.
//!
//! Documentation links come in three shapes and each maps onto a different reST construct:
//! - external resources (`http:`, `mailto:`, generated `.html` pages) → anonymous hyperlinks
//! - same-document anchors (`#name`) → internal anchor references
//! - anything else (`Type#member`, `package.Type`) → symbolic cross-references, resolved later
//!
//! Classification is purely syntactic. Nothing here looks identifiers up, and a reference that
//! fits no recognized scheme simply falls through to a cross-reference.

/// Role attached to symbolic cross-references unless configured otherwise.
pub const DEFAULT_SYMBOLIC_ROLE: &str = "any";

const EXTERNAL_SCHEMES: &[&str] = &["mailto:", "http:", "https:", "file:"];

/// A classified hyperlink reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// No target at all: the display text is kept as plain text.
    Inert { display: String },
    External { href: String, display: String },
    Anchor { id: String, display: String },
    Symbolic {
        role: String,
        target: String,
        display: String,
    },
}

/// Classify with the default symbolic role.
pub fn classify(href: Option<&str>, text: &str) -> Reference {
    classify_with_role(href, text, DEFAULT_SYMBOLIC_ROLE)
}

/// Classify a reference given its target attribute and display text.
///
/// Rules, in order:
/// 1. empty or missing href → [`Reference::Inert`]
/// 2. href starts with `#` → [`Reference::Anchor`], the id being the rest of the href (even
///    when that id happens to contain `.html`)
/// 3. lower-cased href starts with an external scheme or contains `.html` → [`Reference::External`]
/// 4. otherwise → [`Reference::Symbolic`] with the given role
///
/// Empty display text falls back to the href, anchor id or target.
pub fn classify_with_role(href: Option<&str>, text: &str, role: &str) -> Reference {
    let href = href.unwrap_or_default().trim();
    let display = text.trim();

    if href.is_empty() {
        return Reference::Inert {
            display: display.to_string(),
        };
    }

    if let Some(id) = href.strip_prefix('#') {
        return Reference::Anchor {
            id: id.to_string(),
            display: display_or(display, id),
        };
    }

    let lowered = href.to_lowercase();
    if EXTERNAL_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
        || lowered.contains(".html")
    {
        return Reference::External {
            href: href.to_string(),
            display: display_or(display, href),
        };
    }

    Reference::Symbolic {
        role: role.to_string(),
        target: href.to_string(),
        display: display_or(display, href),
    }
}

fn display_or(display: &str, fallback: &str) -> String {
    if display.is_empty() {
        fallback.to_string()
    } else {
        display.to_string()
    }
}
