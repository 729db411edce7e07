//! The static site elements: header, hero and footer.
//!
//! Each element is configured from its table in the site file and keeps
//! whatever small amount of state it needs (the header's menu).  HTML
//! output lives in [`crate::markup`]; the terminal preview draws the same
//! structs in [`crate::ui`].

mod footer;
mod header;
mod hero;

pub use footer::{FooterConfig, FooterLink, Icon, SiteFooter, SocialLink};
pub use header::{HeaderConfig, SiteHeader};
pub use hero::Hero;

use serde::Deserialize;

/// A plain navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}
