//! Grid attributes.
//!
//! A grid is configured the same way whether it comes from a `[[grid]]`
//! table in the site file, from command-line flags, or from
//! [`DataGrid::set_attribute`](super::DataGrid::set_attribute) at runtime.

use serde::Deserialize;

/// Heading used when the page does not set one.
pub const DEFAULT_HEADING: &str = "Latest";

/// The attributes an embedding page can set on a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// URL of the JSON array; loading only starts once this is set.
    pub src: Option<String>,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    /// Maximum number of cards; `0` shows everything.
    #[serde(default)]
    pub show: usize,
    /// Explicit "view all" target.
    #[serde(rename = "all-href", alias = "all_href")]
    pub all_href: Option<String>,
}

/// Attribute names a grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Src,
    Heading,
    Subheading,
    Show,
    AllHref,
}

impl Attr {
    /// Map an attribute name to the attribute, ignoring unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "src" => Some(Attr::Src),
            "heading" => Some(Attr::Heading),
            "subheading" => Some(Attr::Subheading),
            "show" => Some(Attr::Show),
            "all-href" => Some(Attr::AllHref),
            _ => None,
        }
    }
}

impl GridConfig {
    /// Non-empty `src`, if any.
    pub fn src(&self) -> Option<&str> {
        non_empty(&self.src)
    }

    pub fn heading(&self) -> &str {
        self.heading.as_deref().unwrap_or(DEFAULT_HEADING)
    }

    pub fn subheading(&self) -> Option<&str> {
        non_empty(&self.subheading)
    }

    /// Non-empty explicit "view all" target, if any.
    pub fn all_href(&self) -> Option<&str> {
        non_empty(&self.all_href)
    }

    /// Apply one attribute change; `None` removes the attribute.
    pub fn set(&mut self, attr: Attr, value: Option<&str>) {
        let value = value.map(str::to_string);
        match attr {
            Attr::Src => self.src = value,
            Attr::Heading => self.heading = value,
            Attr::Subheading => self.subheading = value,
            Attr::Show => self.show = value.as_deref().map(parse_show).unwrap_or(0),
            Attr::AllHref => self.all_href = value,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Read a `show` attribute the lenient way pages write it.
///
/// Leading digits count (`"3 cards"` is 3); negative, empty or
/// non-numeric values mean "no cap".
pub fn parse_show(raw: &str) -> usize {
    let digits: String = raw
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(if digits.is_empty() { 0 } else { usize::MAX })
}
