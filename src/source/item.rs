//! The entry type shared by every grid.
//!
//! Grid JSON is loosely shaped: any field may be missing, `null`, or a
//! number where a string was expected.  `Item` reads one raw JSON value
//! into the handful of fields a card needs and quietly drops the rest, so
//! a sloppy data file degrades to emptier cards instead of a failed load.
//!
//! ## For contributors
//!
//! Kind inference looks at the raw value (key presence), not at `Item`,
//! because `"date": null` still counts as a dated entry.

use serde_json::Value;

/// A single grid entry, read leniently from the fetched array.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Item {
    /// Card headline; also the slug fallback.
    pub title: Option<String>,

    /// Short description shown under the title.
    pub desc: Option<String>,

    /// Thumbnail URL.
    pub image: Option<String>,

    /// Publication date as written in the file (ISO date or timestamp).
    pub date: Option<String>,

    /// Explicit detail-page identifier.
    ///
    /// An empty string is kept as given; only a missing or `null` slug
    /// falls back to the slugified title.
    pub slug: Option<String>,
}

impl Item {
    /// Read the known fields from one array entry.
    ///
    /// Non-object entries yield an empty item.
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: text_field(value, "title"),
            desc: text_field(value, "desc"),
            image: text_field(value, "image"),
            date: text_field(value, "date"),
            slug: text_field(value, "slug"),
        }
    }
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else counts as absent.
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
