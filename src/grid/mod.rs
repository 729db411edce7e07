//! Data-driven card grid.
//!
//! A [`DataGrid`] shows a heading right away, fetches a JSON array in the
//! background, and then fills itself with up to `show` cards plus a
//! "view all" link when it had to leave entries out.
//!
//! ```text
//!  connect() ──► render() shell ──► load() ──► Loader task
//!                                                  │ Settled
//!                  populate() ◄── settle() ◄───────┘
//! ```
//!
//! ## Load state
//!
//! There is one fetch in flight per grid at most.  [`DataGrid::load`] is a
//! no-op when `src` is empty, when the same `src` already loaded or failed,
//! and while any fetch is running.  Every fetch gets a ticket;
//! [`DataGrid::settle`] only commits a result whose ticket is the one the
//! grid is waiting for.

mod config;
mod kind;
mod view;

pub use config::{Attr, GridConfig};
pub use kind::{slugify, Kind};
pub use view::{Card, GridBody, GridView, ViewAll};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::loader::{GridId, Loader, Settled};
use crate::source::Item;

/// Where a grid is in its fetch lifecycle.
#[derive(Debug)]
pub enum LoadState {
    Idle,
    Loading { src: String, ticket: u64 },
    Loaded { src: String, items: Vec<Value> },
    Failed { src: String, error: LoadError },
}

impl LoadState {
    /// The `src` this state belongs to.
    pub fn src(&self) -> Option<&str> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading { src, .. }
            | LoadState::Loaded { src, .. }
            | LoadState::Failed { src, .. } => Some(src),
        }
    }
}

pub struct DataGrid {
    id: GridId,
    config: GridConfig,
    loader: Loader,
    state: LoadState,
    connected: bool,
    last_ticket: u64,
    view: GridView,
}

impl DataGrid {
    pub fn new(id: GridId, config: GridConfig, loader: Loader) -> Self {
        let view = shell(&config);
        Self {
            id,
            config,
            loader,
            state: LoadState::Idle,
            connected: false,
            last_ticket: 0,
            view,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn view(&self) -> &GridView {
        &self.view
    }

    // -- lifecycle -----------------------------------------------------------

    /// Attach the grid to the page: show the shell and start loading.
    pub fn connect(&mut self) {
        self.connected = true;
        self.render();
        self.load();
    }

    /// Detach the grid.  Loaded items are dropped.  A fetch still in flight
    /// keeps the grid `Loading`, so reattaching does not start a second
    /// one; its result is discarded if the grid is still detached when it
    /// settles.
    pub fn disconnect(&mut self) {
        self.connected = false;
        if !matches!(self.state, LoadState::Loading { .. }) {
            self.state = LoadState::Idle;
        }
        self.render();
    }

    /// Change one attribute by name.  Unknown names are ignored.
    ///
    /// A new `src` starts a load (when attached); display attributes
    /// re-render the shell and re-populate from data already loaded.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        let Some(attr) = Attr::from_name(name) else {
            debug!(grid = self.id, name, "ignoring unknown attribute");
            return;
        };
        self.config.set(attr, value);

        match attr {
            Attr::Src => {
                if self.connected {
                    self.load();
                }
            }
            Attr::Heading | Attr::Subheading | Attr::Show | Attr::AllHref => self.refresh(),
        }
    }

    // -- rendering -----------------------------------------------------------

    /// Replace the content with the data-independent shell.
    pub fn render(&mut self) {
        self.view = shell(&self.config);
    }

    /// Re-render the shell and put the current load state back into it.
    pub fn refresh(&mut self) {
        self.render();
        if matches!(self.state, LoadState::Loaded { .. }) {
            self.populate();
        } else if let LoadState::Failed { src, error } = &self.state {
            self.view.body = failed_body(src, error);
        }
    }

    /// Derive the cards from the full loaded list.  Does nothing until a
    /// load has succeeded.
    pub fn populate(&mut self) {
        let LoadState::Loaded { src, items } = &self.state else {
            return;
        };

        self.view.view_all = explicit_view_all(&self.config);

        if items.is_empty() {
            self.view.body = GridBody::Empty;
            return;
        }

        let kind = Kind::infer(src, items);
        let visible = match self.config.show {
            0 => &items[..],
            cap => &items[..cap.min(items.len())],
        };

        let cards = visible
            .iter()
            .map(|value| Card::from_item(&Item::from_value(value), kind))
            .collect();
        self.view.body = GridBody::Cards(cards);

        if self.view.view_all.is_none() && items.len() > visible.len() {
            self.view.view_all = Some(ViewAll {
                href: kind.index_href().to_string(),
                automatic: true,
            });
        }

        debug!(
            grid = self.id,
            shown = visible.len(),
            total = items.len(),
            ?kind,
            "populated grid"
        );
    }

    // -- loading -------------------------------------------------------------

    /// Start fetching the configured `src` unless that would duplicate or
    /// overlap a previous load.
    pub fn load(&mut self) {
        let Some(src) = self.config.src().map(str::to_string) else {
            return;
        };

        match &self.state {
            LoadState::Loading { src: pending, .. } => {
                debug!(grid = self.id, %pending, requested = %src, "fetch in flight; load dropped");
                return;
            }
            LoadState::Loaded { src: done, .. } | LoadState::Failed { src: done, .. }
                if *done == src =>
            {
                return;
            }
            _ => {}
        }

        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.loader.spawn(self.id, ticket, &src);

        self.state = LoadState::Loading { src, ticket };
        self.view.body = GridBody::Loading;
        self.view.view_all = explicit_view_all(&self.config);
    }

    /// Commit the result of a fetch this grid started.
    ///
    /// Results for an outdated ticket are discarded.  A result for a `src`
    /// the page has since replaced is discarded too, and the fetch for the
    /// current `src` starts in its place.
    pub fn settle(&mut self, settled: Settled) {
        let waiting = matches!(
            &self.state,
            LoadState::Loading { ticket, .. } if *ticket == settled.ticket
        );
        if !waiting {
            warn!(grid = self.id, ticket = settled.ticket, src = %settled.src, "discarding stale response");
            return;
        }

        if !self.connected {
            debug!(grid = self.id, src = %settled.src, "grid detached; discarding response");
            self.state = LoadState::Idle;
            return;
        }

        if self.config.src() != Some(settled.src.as_str()) {
            warn!(
                grid = self.id,
                stale = %settled.src,
                current = ?self.config.src(),
                "src changed during fetch; discarding response"
            );
            self.state = LoadState::Idle;
            self.render();
            if self.config.src().is_some() {
                self.load();
            } else {
                self.view.body = GridBody::Empty;
            }
            return;
        }

        let Settled { src, outcome, .. } = settled;
        match outcome {
            Ok(items) => {
                self.state = LoadState::Loaded { src, items };
                self.populate();
            }
            Err(error) => {
                warn!(grid = self.id, %src, %error, "could not load grid data");
                self.view.body = failed_body(&src, &error);
                self.state = LoadState::Failed { src, error };
            }
        }
    }
}

/// Shell for a configuration: heading, optional subheading, loading
/// placeholder and the configured "view all" link.
pub fn shell(config: &GridConfig) -> GridView {
    GridView {
        heading: config.heading().to_string(),
        subheading: config.subheading().map(str::to_string),
        body: GridBody::Loading,
        view_all: explicit_view_all(config),
    }
}

fn explicit_view_all(config: &GridConfig) -> Option<ViewAll> {
    config.all_href().map(|href| ViewAll {
        href: href.to_string(),
        automatic: false,
    })
}

fn failed_body(src: &str, error: &LoadError) -> GridBody {
    GridBody::Failed {
        src: src.to_string(),
        reason: error.summary(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::{base, FakeSource};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::sync::mpsc::UnboundedReceiver;

    const POSTS: &str = r#"[
        {"title":"Post A","date":"2024-01-01"},
        {"title":"Post B","date":"2024-01-02"},
        {"title":"Post C"}
    ]"#;

    fn grid_with(
        source: &Arc<FakeSource>,
        config: GridConfig,
    ) -> (DataGrid, UnboundedReceiver<Settled>) {
        let (loader, rx) = Loader::new(source.clone(), base(), Handle::current());
        (DataGrid::new(0, config, loader), rx)
    }

    fn config(src: &str) -> GridConfig {
        GridConfig {
            src: Some(src.to_string()),
            ..Default::default()
        }
    }

    async fn settle_next(grid: &mut DataGrid, rx: &mut UnboundedReceiver<Settled>) {
        let settled = rx.recv().await.expect("fetch should settle");
        grid.settle(settled);
    }

    fn titles(grid: &DataGrid) -> Vec<&str> {
        grid.view()
            .body
            .cards()
            .iter()
            .map(|c| c.title.as_str())
            .collect()
    }

    // -- render --------------------------------------------------------------

    #[tokio::test]
    async fn shell_renders_before_any_data() {
        let source = FakeSource::new();
        let (mut grid, _rx) = grid_with(
            &source,
            GridConfig {
                heading: Some("Writing".into()),
                subheading: Some("Notes".into()),
                all_href: Some("/post/".into()),
                ..Default::default()
            },
        );

        grid.render();
        grid.render();

        let view = grid.view();
        assert_eq!(view.heading, "Writing");
        assert_eq!(view.subheading.as_deref(), Some("Notes"));
        assert_eq!(view.body, GridBody::Loading);
        assert_eq!(view.view_all.as_ref().unwrap().href, "/post/");
        assert_eq!(source.requests(), 0);
    }

    // -- load guard ----------------------------------------------------------

    #[tokio::test]
    async fn connect_without_src_does_nothing() {
        let source = FakeSource::new();
        let (mut grid, _rx) = grid_with(&source, GridConfig::default());

        grid.connect();
        grid.set_attribute("src", Some(""));

        assert!(matches!(grid.state(), LoadState::Idle));
        assert_eq!(source.requests(), 0);
    }

    #[tokio::test]
    async fn repeated_load_issues_one_request() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));

        grid.connect();
        grid.load();
        settle_next(&mut grid, &mut rx).await;
        grid.load();
        grid.set_attribute("src", Some("/posts.json"));

        assert_eq!(source.requests(), 1);
        assert!(rx.try_recv().is_err());
        assert!(matches!(grid.state(), LoadState::Loaded { .. }));
    }

    #[tokio::test]
    async fn new_src_replaces_loaded_items() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        source.serve("/more-posts.json", r#"[{"title":"Only"}]"#);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));

        grid.connect();
        settle_next(&mut grid, &mut rx).await;
        assert_eq!(titles(&grid), ["Post A", "Post B", "Post C"]);

        grid.set_attribute("src", Some("/more-posts.json"));
        assert_eq!(grid.view().body, GridBody::Loading);
        settle_next(&mut grid, &mut rx).await;

        assert_eq!(source.requests(), 2);
        assert_eq!(titles(&grid), ["Only"]);
        assert_eq!(grid.state().src(), Some("/more-posts.json"));
    }

    #[tokio::test]
    async fn src_change_mid_flight_loads_the_new_src() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        source.serve("/projects.json", r#"[{"title":"Tool"}]"#);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));

        grid.connect();
        grid.set_attribute("src", Some("/projects.json"));
        assert!(
            matches!(grid.state(), LoadState::Loading { src, .. } if src == "/posts.json"),
            "second load is dropped while in flight"
        );

        // The posts response is stale; settling it starts the projects fetch.
        settle_next(&mut grid, &mut rx).await;
        assert!(matches!(grid.state(), LoadState::Loading { src, .. } if src == "/projects.json"));

        settle_next(&mut grid, &mut rx).await;
        assert_eq!(source.requests(), 2);
        assert_eq!(titles(&grid), ["Tool"]);
        assert_eq!(grid.view().body.cards()[0].href, "projects/?p=tool");
    }

    #[tokio::test]
    async fn response_after_disconnect_is_discarded() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));

        grid.connect();
        grid.disconnect();
        assert!(matches!(grid.state(), LoadState::Loading { .. }));
        settle_next(&mut grid, &mut rx).await;

        assert!(matches!(grid.state(), LoadState::Idle));
        assert_eq!(grid.view().body, GridBody::Loading);

        // Reattaching fetches again under a fresh ticket.
        grid.connect();
        settle_next(&mut grid, &mut rx).await;
        assert_eq!(source.requests(), 2);
        assert_eq!(titles(&grid).len(), 3);
    }

    #[tokio::test]
    async fn quick_reattach_reuses_the_fetch_in_flight() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));

        grid.connect();
        grid.disconnect();
        grid.connect();
        assert_eq!(grid.view().body, GridBody::Loading);

        settle_next(&mut grid, &mut rx).await;
        assert_eq!(titles(&grid).len(), 3);

        let second = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(second.is_err(), "only one fetch should have been spawned");
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn src_removed_mid_flight_stops_loading() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));

        grid.connect();
        grid.set_attribute("src", None);
        settle_next(&mut grid, &mut rx).await;

        assert!(matches!(grid.state(), LoadState::Idle));
        assert_eq!(grid.view().body, GridBody::Empty);
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn set_src_while_detached_waits_for_connect() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, GridConfig::default());

        grid.set_attribute("src", Some("/posts.json"));
        assert_eq!(source.requests(), 0);

        grid.connect();
        settle_next(&mut grid, &mut rx).await;
        assert_eq!(titles(&grid).len(), 3);
    }

    // -- populate ------------------------------------------------------------

    #[tokio::test]
    async fn show_caps_cards_and_adds_view_all() {
        let source = FakeSource::new();
        source.serve("/feed.json", POSTS);
        let (mut grid, mut rx) = grid_with(
            &source,
            GridConfig {
                show: 2,
                ..config("/feed.json")
            },
        );

        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        let cards = grid.view().body.cards();
        assert_eq!(titles(&grid), ["Post A", "Post B"]);
        assert_eq!(cards[0].href, "post/?p=post-a");
        assert_eq!(cards[1].href, "post/?p=post-b");
        assert_eq!(cards[0].date.as_deref(), Some("Jan 01, 2024"));
        assert_eq!(
            grid.view().view_all,
            Some(ViewAll {
                href: "post/".into(),
                automatic: true
            })
        );
    }

    #[tokio::test]
    async fn card_count_follows_show() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));
        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        for (show, expected) in [("0", 3), ("1", 1), ("3", 3), ("10", 3), ("nope", 3)] {
            grid.set_attribute("show", Some(show));
            assert_eq!(grid.view().body.cards().len(), expected, "show={show}");
            let truncated = expected < 3;
            assert_eq!(grid.view().view_all.is_some(), truncated, "show={show}");
        }
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn explicit_all_href_always_shown() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(
            &source,
            GridConfig {
                all_href: Some("/archive/".into()),
                ..config("/posts.json")
            },
        );
        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        let expected = Some(ViewAll {
            href: "/archive/".into(),
            automatic: false,
        });
        assert_eq!(grid.view().view_all, expected);

        grid.set_attribute("show", Some("1"));
        assert_eq!(grid.view().view_all, expected);
        assert_eq!(grid.view().body.cards().len(), 1);
    }

    #[tokio::test]
    async fn heading_change_keeps_cards() {
        let source = FakeSource::new();
        source.serve("/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));
        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        grid.set_attribute("heading", Some("Recent writing"));
        assert_eq!(grid.view().heading, "Recent writing");
        assert_eq!(titles(&grid).len(), 3);
    }

    #[tokio::test]
    async fn empty_array_shows_nothing_yet() {
        let source = FakeSource::new();
        source.serve("/projects.json", "[]");
        let (mut grid, mut rx) = grid_with(
            &source,
            GridConfig {
                heading: Some("Projects".into()),
                ..config("/projects.json")
            },
        );
        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        let view = grid.view();
        assert_eq!(view.heading, "Projects");
        assert_eq!(view.body, GridBody::Empty);
        assert_eq!(view.view_all, None);
    }

    // -- failures ------------------------------------------------------------

    #[tokio::test]
    async fn non_array_json_fails_in_place() {
        let source = FakeSource::new();
        source.serve("/posts.json", r#"{"title":"not a list"}"#);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));
        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        assert!(matches!(
            grid.state(),
            LoadState::Failed { error: LoadError::NotArray, .. }
        ));
        let text = grid.view().body.placeholder().unwrap();
        assert!(text.starts_with("Could not load"));
        assert!(text.contains("/posts.json"));
    }

    #[tokio::test]
    async fn status_error_is_reported_and_not_retried() {
        let source = FakeSource::new();
        source.fail("/posts.json", 503);
        let (mut grid, mut rx) = grid_with(&source, config("/posts.json"));
        grid.connect();
        settle_next(&mut grid, &mut rx).await;

        assert!(grid.view().body.placeholder().unwrap().contains("503"));

        grid.load();
        grid.set_attribute("heading", Some("Still broken"));
        assert_eq!(source.requests(), 1);
        assert!(matches!(grid.view().body, GridBody::Failed { .. }));
    }

    #[tokio::test]
    async fn network_error_then_recovery_on_new_src() {
        let source = FakeSource::new();
        source.serve("/backup/posts.json", POSTS);
        let (mut grid, mut rx) = grid_with(&source, config("/offline/posts.json"));

        grid.connect();
        settle_next(&mut grid, &mut rx).await;
        let text = grid.view().body.placeholder().unwrap();
        assert!(text.contains("/offline/posts.json"));

        grid.set_attribute("src", Some("/backup/posts.json"));
        settle_next(&mut grid, &mut rx).await;
        assert_eq!(titles(&grid).len(), 3);
        assert!(matches!(grid.state(), LoadState::Loaded { .. }));
    }
}
