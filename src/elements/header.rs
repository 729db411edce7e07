//! Site header with theme switch and mobile menu.
//!
//! The header owns the menu panel state.  While mounted it holds an
//! Escape subscription; Escape closes the panel only when it is open.

use anyhow::Result;
use crossterm::event::KeyCode;
use serde::Deserialize;
use tracing::debug;

use super::Link;
use crate::keymap::{Action, Keymap, Subscription};
use crate::theme::{Theme, ThemeStore};

pub const DEFAULT_BRAND: &str = "✦";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaderConfig {
    pub brand: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug)]
pub struct SiteHeader {
    brand: String,
    links: Vec<Link>,
    menu_open: bool,
    escape: Option<Subscription>,
}

impl SiteHeader {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            brand: config.brand.unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            links: config.links,
            menu_open: false,
            escape: None,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Links shown in the desktop row; the mobile panel lists the same.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    // -- mounting ------------------------------------------------------------

    /// Put the header on screen and take the Escape binding.
    pub fn mount(&mut self, keymap: &Keymap) {
        if self.escape.is_none() {
            self.escape = Some(keymap.subscribe(KeyCode::Esc, Action::CloseMenu));
        }
    }

    /// Take the header off screen, releasing its binding.
    pub fn unmount(&mut self) {
        self.escape = None;
        self.menu_open = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.escape.is_some()
    }

    // -- menu ----------------------------------------------------------------

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Page scrolling is locked while the panel covers it.
    pub fn scroll_locked(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        debug!("menu opened");
        self.menu_open = true;
    }

    pub fn close_menu(&mut self) {
        if self.menu_open {
            debug!("menu closed");
        }
        self.menu_open = false;
    }

    /// Escape handler.  Returns whether the key closed the panel.
    pub fn on_escape(&mut self) -> bool {
        if !self.menu_open {
            return false;
        }
        self.close_menu();
        true
    }

    /// A click that lands on the panel backdrop rather than its card.
    pub fn backdrop_click(&mut self) {
        self.close_menu();
    }

    /// Follow a link from the mobile panel; the panel closes.
    pub fn choose_link(&mut self, index: usize) -> Option<&Link> {
        let link = self.links.get(index)?;
        self.menu_open = false;
        Some(link)
    }

    // -- theme ---------------------------------------------------------------

    /// Flip the theme switch, writing through the store.
    pub fn toggle_theme(&self, store: &mut ThemeStore) -> Result<Theme> {
        let next = store.get().toggled();
        store.set(next)?;
        Ok(next)
    }
}
