//! One page worth of elements, built from a [`SiteConfig`].

use tracing::warn;

use crate::config::SiteConfig;
use crate::elements::{Hero, SiteFooter, SiteHeader};
use crate::grid::{DataGrid, LoadState};
use crate::keymap::Keymap;
use crate::loader::{Loader, Settled};
use crate::markup;
use crate::theme::Theme;

pub struct Page {
    pub header: Option<SiteHeader>,
    pub hero: Option<Hero>,
    pub grids: Vec<DataGrid>,
    pub footer: Option<SiteFooter>,
}

impl Page {
    /// Build every element.  Grids are numbered in site-file order and all
    /// share `loader`.
    pub fn new(site: SiteConfig, loader: &Loader) -> Self {
        let grids = site
            .grids
            .into_iter()
            .enumerate()
            .map(|(id, config)| DataGrid::new(id, config, loader.clone()))
            .collect();

        Self {
            header: site.header.map(SiteHeader::new),
            hero: site.hero,
            grids,
            footer: site.footer.map(|f| SiteFooter::new(f, loader.base())),
        }
    }

    /// Attach every element: the header takes its key bindings and the
    /// grids start loading.
    pub fn mount(&mut self, keymap: &Keymap) {
        if let Some(header) = &mut self.header {
            header.mount(keymap);
        }
        for grid in &mut self.grids {
            grid.connect();
        }
    }

    pub fn unmount(&mut self) {
        if let Some(header) = &mut self.header {
            header.unmount();
        }
        for grid in &mut self.grids {
            grid.disconnect();
        }
    }

    /// Hand a fetch result to the grid that asked for it.
    pub fn settle(&mut self, settled: Settled) {
        match self.grids.get_mut(settled.grid) {
            Some(grid) => grid.settle(settled),
            None => warn!(grid = settled.grid, "result for unknown grid"),
        }
    }

    /// Number of grids still waiting on a fetch.
    pub fn pending(&self) -> usize {
        self.grids
            .iter()
            .filter(|g| matches!(g.state(), LoadState::Loading { .. }))
            .count()
    }

    /// Re-render every grid from its current state.
    pub fn refresh(&mut self) {
        for grid in &mut self.grids {
            grid.refresh();
        }
    }

    /// Markup of every element in page order.
    pub fn to_html(&self, theme: Theme) -> String {
        let mut parts = Vec::new();
        if let Some(header) = &self.header {
            parts.push(markup::header(header, theme));
        }
        if let Some(hero) = &self.hero {
            parts.push(markup::hero(hero));
        }
        parts.extend(self.grids.iter().map(|g| markup::grid(g.view())));
        if let Some(footer) = &self.footer {
            parts.push(markup::footer(footer));
        }
        parts.join("\n")
    }
}
