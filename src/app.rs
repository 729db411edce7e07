//! Terminal preview state.
//!
//! [`App`] owns the page, the theme store (it is the only writer) and the
//! key subscriptions.  The page is flattened into [`Row`]s for display;
//! the list selection moves over those rows.

use ratatui::widgets::ListState;
use tracing::warn;

use crate::grid::{Card, GridBody, LoadState};
use crate::keymap::{Action, Keymap};
use crate::loader::Settled;
use crate::page::Page;
use crate::theme::{Theme, ThemeStore};

/// One line-ish unit of the previewed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    HeroTitle(String),
    Text(String),
    Heading(String),
    Subheading(String),
    Card(Card),
    Placeholder(String),
    ViewAll(String),
    Footer(String),
}

pub struct App {
    pub page: Page,
    store: ThemeStore,
    theme: Theme,
    // Held so the header's subscriptions have a live registry.
    keymap: Keymap,
    /// Selection over [`App::rows`].
    pub list_state: ListState,
    /// Selection inside the open mobile menu.
    pub menu_state: ListState,
    pub quit: bool,
    /// Last load / action status message.
    pub status: String,
}

impl App {
    pub fn new(page: Page, store: ThemeStore, theme: Theme, keymap: Keymap) -> Self {
        Self {
            page,
            store,
            theme,
            keymap,
            list_state: ListState::default(),
            menu_state: ListState::default(),
            quit: false,
            status: "Loading…".into(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    // -- loading -------------------------------------------------------------

    /// Route a fetch result and report what it did.
    pub fn settle(&mut self, settled: Settled) {
        let id = settled.grid;
        self.page.settle(settled);

        let Some(grid) = self.page.grids.get(id) else {
            return;
        };
        self.status = match grid.state() {
            LoadState::Loaded { src, items } => format!("Loaded {} items from {src}", items.len()),
            LoadState::Failed { src, error } => format!("Error: {src}: {}", error.summary()),
            LoadState::Loading { src, .. } => format!("Loading {src}…"),
            LoadState::Idle => return,
        };
    }

    /// Re-render every grid from its current data.
    pub fn refresh(&mut self) {
        self.page.refresh();
        self.status = "Refreshed".into();
    }

    // -- rows ----------------------------------------------------------------

    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();

        if let Some(hero) = &self.page.hero {
            rows.push(Row::HeroTitle(hero.title.clone()));
            if !hero.intro.is_empty() {
                rows.push(Row::Text(hero.intro.clone()));
            }
            rows.extend(hero.bullets.iter().map(|b| Row::Text(format!("• {b}"))));
            if let Some(cta) = &hero.cta {
                rows.push(Row::Text(format!("→ {} ({})", cta.label, cta.href)));
            }
        }

        for grid in &self.page.grids {
            let view = grid.view();
            rows.push(Row::Heading(view.heading.clone()));
            if let Some(sub) = &view.subheading {
                rows.push(Row::Subheading(sub.clone()));
            }
            match &view.body {
                GridBody::Cards(cards) => rows.extend(cards.iter().cloned().map(Row::Card)),
                body => rows.push(Row::Placeholder(body.placeholder().unwrap_or_default())),
            }
            if let Some(all) = &view.view_all {
                rows.push(Row::ViewAll(all.href.clone()));
            }
        }

        if let Some(footer) = &self.page.footer {
            rows.push(Row::Footer(format!("{}  {}", footer.brand, footer.copyright())));
        }

        rows
    }

    pub fn card_count(&self) -> usize {
        self.page
            .grids
            .iter()
            .map(|g| g.view().body.cards().len())
            .sum()
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.rows().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.rows().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.rows().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    // -- header --------------------------------------------------------------

    pub fn toggle_theme(&mut self) {
        let Some(header) = &self.page.header else {
            return;
        };
        match header.toggle_theme(&mut self.store) {
            Ok(theme) => {
                self.theme = theme;
                self.status = format!("Theme: {}", theme.as_str());
            }
            Err(err) => {
                // Applied but not saved.
                self.theme = self.store.applied().unwrap_or_default();
                warn!(error = %err, "theme not persisted");
                self.status = format!("Theme: {} (not saved)", self.theme.as_str());
            }
        }
    }

    pub fn menu_open(&self) -> bool {
        self.page
            .header
            .as_ref()
            .is_some_and(|h| h.is_menu_open())
    }

    pub fn open_menu(&mut self) {
        if let Some(header) = &mut self.page.header {
            header.open_menu();
            let first = (!header.links().is_empty()).then_some(0);
            self.menu_state.select(first);
        }
    }

    pub fn menu_next(&mut self) {
        let len = self.menu_len();
        if len == 0 {
            return;
        }
        let i = self.menu_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.menu_state.select(Some(i));
    }

    pub fn menu_previous(&mut self) {
        if self.menu_len() == 0 {
            return;
        }
        let i = self.menu_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.menu_state.select(Some(i));
    }

    /// Follow the highlighted menu link (the panel closes).
    pub fn choose_menu_link(&mut self) {
        let Some(index) = self.menu_state.selected() else {
            return;
        };
        let Some(header) = &mut self.page.header else {
            return;
        };
        if let Some(link) = header.choose_link(index) {
            self.status = format!("Open {} ({})", link.label, link.href);
        }
    }

    fn menu_len(&self) -> usize {
        self.page.header.as_ref().map_or(0, |h| h.links().len())
    }

    /// Run an action delivered through a key subscription.  Returns whether
    /// the key was consumed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::CloseMenu => self
                .page
                .header
                .as_mut()
                .is_some_and(|h| h.on_escape()),
        }
    }
}
