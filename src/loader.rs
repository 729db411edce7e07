//! Background grid fetching.
//!
//! Grids never wait on the network themselves.  [`Loader::spawn`] starts a
//! task on the tokio runtime that resolves the source URL, fetches it and
//! decodes the array; the outcome comes back to the owner of the grids as
//! a [`Settled`] message over an unbounded channel.  The owner drains that
//! channel (the preview loop does so every tick) and hands each message to
//! the grid it names.
//!
//! ## For contributors
//!
//! There is no cancellation: a task always runs to completion and always
//! sends exactly one message.  Deciding whether a late result is still
//! wanted is the grid's job (see [`DataGrid::settle`](crate::grid::DataGrid::settle)).

use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

use crate::error::LoadError;
use crate::source::{self, JsonSource};

/// Identifies a grid among those sharing one loader.
pub type GridId = usize;

/// Outcome of one fetch, sent from the fetch task to the grid owner.
#[derive(Debug)]
pub struct Settled {
    /// Grid that asked for the fetch.
    pub grid: GridId,
    /// Ticket the grid handed out when the fetch started.
    pub ticket: u64,
    /// The `src` attribute as it was when the fetch started.
    pub src: String,
    /// Decoded array, or why there is none.
    pub outcome: Result<Vec<Value>, LoadError>,
}

/// Spawns fetch tasks and reports their results.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn JsonSource>,
    base: Url,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Settled>,
}

impl Loader {
    /// Create a loader and the receiver its results arrive on.
    ///
    /// `base` is the page URL relative sources are resolved against.
    pub fn new(
        source: Arc<dyn JsonSource>,
        base: Url,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<Settled>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            source,
            base,
            runtime,
            tx,
        };
        (loader, rx)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Start fetching `src` for `grid`.  Returns immediately.
    pub fn spawn(&self, grid: GridId, ticket: u64, src: &str) {
        let source = Arc::clone(&self.source);
        let base = self.base.clone();
        let tx = self.tx.clone();
        let src = src.to_string();

        info!(grid, ticket, %src, source = source.name(), "loading grid data");

        self.runtime.spawn(async move {
            let outcome = fetch_items(source.as_ref(), &base, &src).await;
            // The receiver is gone once the owner shut down; nothing to report to.
            if tx
                .send(Settled {
                    grid,
                    ticket,
                    src,
                    outcome,
                })
                .is_err()
            {
                warn!(grid, ticket, "grid owner dropped before fetch settled");
            }
        });
    }
}

async fn fetch_items(
    source: &dyn JsonSource,
    base: &Url,
    src: &str,
) -> Result<Vec<Value>, LoadError> {
    let url = source::resolve(src, base)?;
    let body = source.fetch(&url).await?;
    source::parse_items(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
