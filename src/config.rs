//! Site configuration.
//!
//! A site file describes one page: an optional header, hero and footer
//! plus any number of grids.
//!
//! ```toml
//! [header]
//! brand = "✦ Katerina"
//! links = [{ label = "Blog", href = "/post/" }]
//!
//! [[grid]]
//! src = "/posts.json"
//! heading = "Latest posts"
//! show = 3
//!
//! [http]
//! timeout_secs = 10
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::elements::{FooterConfig, HeaderConfig, Hero};
use crate::grid::GridConfig;
use crate::source::HttpOptions;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    pub header: Option<HeaderConfig>,
    pub hero: Option<Hero>,
    #[serde(default, rename = "grid")]
    pub grids: Vec<GridConfig>,
    pub footer: Option<FooterConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// No timeout when unset.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl HttpConfig {
    pub fn options(&self) -> HttpOptions {
        HttpOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl SiteConfig {
    /// Load a site file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse site file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML")
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.hero.is_none() && self.grids.is_empty() && self.footer.is_none()
    }
}
