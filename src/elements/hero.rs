use serde::Deserialize;

use super::Link;

/// Banner at the top of a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: String,
    /// Fills the `bullets` slot.
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Fills the `cta` slot.
    pub cta: Option<Link>,
}
