//! Site footer with decorated social links.
//!
//! Links get an icon when the site file names one or when their host
//! gives it away.  Only decorated links are touched: they become icon
//! buttons with an `aria-label`, and absolute web links open in a new tab.

use chrono::{Datelike, Local};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BRAND: &str = "✦ Katerina";
pub const DEFAULT_NAME: &str = "Katerina Lazari";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FooterConfig {
    pub brand: Option<String>,
    pub name: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub links: Vec<SocialLink>,
}

/// A social link as written in the site file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    pub href: String,
    #[serde(default)]
    pub label: String,
    /// Explicit icon key (`github`).
    pub icon: Option<String>,
    #[serde(rename = "aria-label", alias = "aria_label")]
    pub aria_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    GitHub,
}

impl Icon {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "github" => Some(Icon::GitHub),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Icon::GitHub => "github",
        }
    }

    /// Guess from the link host; unresolvable hrefs get no icon.
    fn infer(href: &str, base: &Url) -> Option<Self> {
        let host = base.join(href).ok()?.host_str()?.to_lowercase();
        host.contains("github").then_some(Icon::GitHub)
    }
}

/// A link after decoration, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub href: String,
    pub label: String,
    pub icon: Option<Icon>,
    pub aria_label: Option<String>,
    /// Opens in a new tab.
    pub external: bool,
}

impl FooterLink {
    fn decorate(link: SocialLink, base: &Url) -> Self {
        let icon = match link.icon.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => Icon::from_key(key),
            None => Icon::infer(&link.href, base),
        };

        let Some(icon) = icon else {
            return Self {
                href: link.href,
                label: link.label,
                icon: None,
                aria_label: link.aria_label,
                external: false,
            };
        };

        let href = link.href.to_lowercase();
        let external = href.starts_with("http://") || href.starts_with("https://");
        Self {
            aria_label: Some(
                link.aria_label
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| icon.key().to_string()),
            ),
            href: link.href,
            label: link.label,
            icon: Some(icon),
            external,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteFooter {
    pub brand: String,
    pub name: String,
    pub year: i32,
    pub links: Vec<FooterLink>,
}

impl SiteFooter {
    /// Build the footer; relative link hrefs resolve against `base`.
    pub fn new(config: FooterConfig, base: &Url) -> Self {
        Self {
            brand: config.brand.unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            name: config.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            year: config.year.unwrap_or_else(|| Local::now().year()),
            links: config
                .links
                .into_iter()
                .map(|link| FooterLink::decorate(link, base))
                .collect(),
        }
    }

    pub fn copyright(&self) -> String {
        format!("© {} {}", self.year, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://katerina.example/").unwrap()
    }

    fn link(href: &str) -> SocialLink {
        SocialLink {
            href: href.into(),
            label: "link".into(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let footer = SiteFooter::new(
            FooterConfig {
                year: Some(2025),
                ..Default::default()
            },
            &base(),
        );
        assert_eq!(footer.brand, "✦ Katerina");
        assert_eq!(footer.copyright(), "© 2025 Katerina Lazari");
    }

    #[test]
    fn year_defaults_to_now() {
        let footer = SiteFooter::new(FooterConfig::default(), &base());
        assert_eq!(footer.year, Local::now().year());
    }

    #[test]
    fn github_host_is_decorated() {
        let footer = SiteFooter::new(
            FooterConfig {
                links: vec![link("https://github.com/katerina")],
                ..Default::default()
            },
            &base(),
        );
        let link = &footer.links[0];
        assert_eq!(link.icon, Some(Icon::GitHub));
        assert_eq!(link.aria_label.as_deref(), Some("github"));
        assert!(link.external);
    }

    #[test]
    fn explicit_icon_and_label_win() {
        let decorated = FooterLink::decorate(
            SocialLink {
                href: "/code".into(),
                icon: Some("GitHub".into()),
                aria_label: Some("My code".into()),
                ..Default::default()
            },
            &base(),
        );
        assert_eq!(decorated.icon, Some(Icon::GitHub));
        assert_eq!(decorated.aria_label.as_deref(), Some("My code"));
        assert!(!decorated.external, "relative links stay in the tab");
    }

    #[test]
    fn plain_links_are_untouched() {
        let decorated = FooterLink::decorate(link("https://mastodon.social/@k"), &base());
        assert_eq!(decorated.icon, None);
        assert_eq!(decorated.aria_label, None);
        assert!(!decorated.external);

        let unknown = FooterLink::decorate(
            SocialLink {
                icon: Some("instagram".into()),
                ..link("https://github.com/k")
            },
            &base(),
        );
        assert_eq!(unknown.icon, None, "explicit unknown key disables inference");
    }
}
