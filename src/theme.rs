//! Light/dark theme preference.
//!
//! The preference is process-wide and has exactly one writer: whoever owns
//! the [`ThemeStore`] (the preview [`App`](crate::app::App)).  Everything
//! else reads the theme it is handed.  The chosen theme is persisted to a
//! small TOML file so the next session starts where the last one ended.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// On-disk shape of the preference file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Prefs {
    theme: Option<Theme>,
}

/// Owner of the theme preference.
#[derive(Debug)]
pub struct ThemeStore {
    /// `None` keeps the preference in memory only.
    path: Option<PathBuf>,
    /// Theme currently applied to the page.
    applied: Option<Theme>,
}

impl ThemeStore {
    /// Store backed by `<config dir>/folio/prefs.toml`.
    pub fn open_default() -> Self {
        let path = dirs::config_dir().map(|dir| dir.join("folio").join("prefs.toml"));
        if path.is_none() {
            warn!("no config directory; theme preference will not persist");
        }
        Self {
            path,
            applied: None,
        }
    }

    /// Store backed by a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            applied: None,
        }
    }

    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            applied: None,
        }
    }

    /// Theme last persisted, if any.  Unreadable files count as unset.
    pub fn saved(&self) -> Option<Theme> {
        let path = self.path.as_deref()?;
        match read_prefs(path) {
            Ok(prefs) => prefs.theme,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no saved theme");
                None
            }
        }
    }

    /// Theme currently applied to the page, if one was set.
    pub fn applied(&self) -> Option<Theme> {
        self.applied
    }

    /// Applied theme, else the saved preference, else light.
    pub fn get(&self) -> Theme {
        self.applied.or_else(|| self.saved()).unwrap_or_default()
    }

    /// Apply and persist a theme.
    ///
    /// The theme is applied even when persisting fails; the error is
    /// returned so the caller can surface it.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.applied = Some(theme);
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        write_prefs(path, &Prefs { theme: Some(theme) })
            .with_context(|| format!("Failed to save theme to {}", path.display()))
    }

    /// Apply the saved theme, or dark when the system prefers it.
    ///
    /// With neither, nothing is applied and [`get`](Self::get) reports
    /// light.
    pub fn init_from_system_preference(&mut self, prefers_dark: bool) -> Result<Theme> {
        if let Some(saved) = self.saved() {
            self.applied = Some(saved);
        } else if prefers_dark {
            self.set(Theme::Dark)?;
        }
        Ok(self.get())
    }
}

fn read_prefs(path: &Path) -> Result<Prefs> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn write_prefs(path: &Path, prefs: &Prefs) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string(prefs)?)?;
    Ok(())
}

/// Guess whether the terminal has a dark background.
///
/// Reads `COLORFGBG` (`"fg;bg"`, set by rxvt, Konsole and friends); the
/// low ANSI colours other than 7 are dark backgrounds.
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_is_dark)
        .unwrap_or(false)
}

fn background_is_dark(colorfgbg: &str) -> Option<bool> {
    let bg: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
