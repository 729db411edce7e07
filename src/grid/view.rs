//! What a grid currently shows.
//!
//! A [`GridView`] is the grid's rendered content in typed form.  The HTML
//! writer in [`crate::markup`] and the terminal preview both draw from it,
//! so neither has to know about load states.

use chrono::{DateTime, NaiveDate};

use super::kind::Kind;
use crate::source::Item;

/// Rendered content of one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub heading: String,
    pub subheading: Option<String>,
    pub body: GridBody,
    pub view_all: Option<ViewAll>,
}

/// The part of the grid below the heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridBody {
    /// Shell state: nothing has settled yet.
    Loading,
    /// The source loaded fine but held no entries.
    Empty,
    /// The source could not be loaded.
    Failed { src: String, reason: String },
    Cards(Vec<Card>),
}

impl GridBody {
    /// Placeholder text for every state except [`GridBody::Cards`].
    pub fn placeholder(&self) -> Option<String> {
        match self {
            GridBody::Loading => Some("Loading…".into()),
            GridBody::Empty => Some("Nothing to show yet.".into()),
            GridBody::Failed { src, reason } => {
                Some(format!("Could not load data from {src} ({reason})."))
            }
            GridBody::Cards(_) => None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            GridBody::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// "View all →" link under the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAll {
    pub href: String,
    /// `true` when derived from the batch kind rather than configured.
    pub automatic: bool,
}

/// One clickable preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub href: String,
    pub title: String,
    pub desc: Option<String>,
    pub image: Option<String>,
    /// Display date; only posts carry one.
    pub date: Option<String>,
}

impl Card {
    pub fn from_item(item: &Item, kind: Kind) -> Self {
        let date = match kind {
            Kind::Post => item
                .date
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(format_date),
            Kind::Project => None,
        };

        Self {
            href: kind.detail_href(item),
            title: item.title.clone().unwrap_or_default(),
            desc: item.desc.clone().filter(|d| !d.is_empty()),
            image: item.image.clone().filter(|i| !i.is_empty()),
            date,
        }
    }
}

/// Show an ISO date or RFC 3339 timestamp as `Jan 02, 2024`.
///
/// Anything unparseable is shown as written.
pub fn format_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%b %d, %Y").to_string(),
        None => raw.to_string(),
    }
}
