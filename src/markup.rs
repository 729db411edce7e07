//! HTML fragments for every element.
//!
//! Each function returns the inner markup of one element, the same
//! fragment the element would place inside itself on a page.  All text
//! and attribute values pass through [`html_escape`].

use crate::elements::{FooterLink, Hero, Icon, SiteFooter, SiteHeader};
use crate::grid::{Card, GridBody, GridView};
use crate::theme::Theme;

const SUN_SVG: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.8" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="4"/><path d="M12 2v2M12 20v2M4 12H2M22 12h-2M5 5l-1.5-1.5M20.5 20.5L19 19M5 19l-1.5 1.5M20.5 3.5L19 5"/></svg>"#;
const MOON_SVG: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.8" stroke-linecap="round" stroke-linejoin="round"><path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"/></svg>"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

pub fn grid(view: &GridView) -> String {
    let mut html = format!(
        "<section class=\"stack container\">\n<h2>{}</h2>\n",
        html_escape(&view.heading)
    );

    if let Some(sub) = &view.subheading {
        html.push_str(&format!("<p class=\"muted\">{}</p>\n", html_escape(sub)));
    }

    html.push_str("<div class=\"grid\" part=\"grid\">");
    match &view.body {
        GridBody::Cards(cards) => {
            for c in cards {
                html.push_str(&card(c));
            }
        }
        body => {
            let text = body.placeholder().unwrap_or_default();
            html.push_str(&format!("<p class=\"muted\">{}</p>", html_escape(&text)));
        }
    }
    html.push_str("</div>\n");

    if let Some(all) = &view.view_all {
        let auto = if all.automatic { " data-auto=\"1\"" } else { "" };
        html.push_str(&format!(
            "<p><a class=\"view-more-btn\" href=\"{}\"{auto}>View all →</a></p>\n",
            html_escape(&all.href)
        ));
    }

    html.push_str("</section>");
    html
}

pub fn card(card: &Card) -> String {
    let thumb = match &card.image {
        Some(src) => {
            let alt = if card.title.is_empty() {
                "Post image"
            } else {
                &card.title
            };
            format!(
                "<img src=\"{}\" alt=\"{}\">",
                html_escape(src),
                html_escape(alt)
            )
        }
        None => "<div class=\"thumb-ph\">No image</div>".to_string(),
    };

    let mut meta = format!("<h3>{}</h3>", html_escape(&card.title));
    if let Some(date) = &card.date {
        meta.push_str(&format!(
            "<p class=\"muted small\">{}</p>",
            html_escape(date)
        ));
    }
    if let Some(desc) = &card.desc {
        meta.push_str(&format!("<p>{}</p>", html_escape(desc)));
    }

    format!(
        "<a class=\"card project-card\" href=\"{}\" target=\"_self\" rel=\"noopener\"><div class=\"thumb\">{}</div><div class=\"meta\">{}</div></a>",
        html_escape(&card.href),
        thumb,
        meta
    )
}

// ---------------------------------------------------------------------------
// Header, hero, footer
// ---------------------------------------------------------------------------

pub fn header(header: &SiteHeader, theme: Theme) -> String {
    let links: String = header
        .links()
        .iter()
        .map(|l| {
            format!(
                "<a href=\"{}\">{}</a>",
                html_escape(&l.href),
                html_escape(&l.label)
            )
        })
        .collect();

    let (checked, knob) = match theme {
        Theme::Dark => (" checked", MOON_SVG),
        Theme::Light => ("", SUN_SVG),
    };
    let open = header.is_menu_open();

    format!(
        "<header class=\"site-header\">\n\
<nav class=\"nav container\">\n\
<a class=\"brand\" href=\"/\">{brand}</a>\n\
<div class=\"actions\">\n\
<div class=\"links\">{links}</div>\n\
<label class=\"theme-switch\"><input type=\"checkbox\" id=\"theme-toggle\"{checked} /><span class=\"track\"></span><span class=\"knob\">{knob}</span></label>\n\
<button class=\"menu-btn\" aria-label=\"Open menu\" aria-expanded=\"{open}\">☰</button>\n\
</div>\n\
</nav>\n\
</header>\n\
<div id=\"menu-panel\" class=\"menu-panel\"{hidden}>\n\
<div class=\"menu-card\">\n\
<button class=\"menu-close\" aria-label=\"Close menu\">✕</button>\n\
<nav class=\"menu-links\" aria-label=\"Mobile\">{links}</nav>\n\
</div>\n\
</div>",
        brand = html_escape(header.brand()),
        hidden = if open { "" } else { " hidden" },
    )
}

pub fn hero(hero: &Hero) -> String {
    let mut html = format!(
        "<section class=\"hero container\">\n<h1>{}</h1>\n<p>{}</p>\n",
        html_escape(&hero.title),
        html_escape(&hero.intro)
    );

    if !hero.bullets.is_empty() {
        html.push_str("<ul slot=\"bullets\">");
        for bullet in &hero.bullets {
            html.push_str(&format!("<li>{}</li>", html_escape(bullet)));
        }
        html.push_str("</ul>\n");
    }

    if let Some(cta) = &hero.cta {
        html.push_str(&format!(
            "<p><a slot=\"cta\" href=\"{}\">{}</a></p>\n",
            html_escape(&cta.href),
            html_escape(&cta.label)
        ));
    }

    html.push_str("</section>");
    html
}

pub fn footer(footer: &SiteFooter) -> String {
    let social: String = footer.links.iter().map(social_link).collect();
    format!(
        "<footer class=\"site-footer\">\n\
<div class=\"container footer-row\">\n\
<div class=\"footer-left\">\n\
<a class=\"footer-brand\" href=\"/\">{}</a>\n\
<span class=\"divider\" aria-hidden=\"true\"></span>\n\
<span class=\"copyright\">{}</span>\n\
</div>\n\
<nav class=\"social\" aria-label=\"Social links\">{}</nav>\n\
</div>\n\
</footer>",
        html_escape(&footer.brand),
        html_escape(&footer.copyright()),
        social
    )
}

fn social_link(link: &FooterLink) -> String {
    let href = html_escape(&link.href);
    let Some(icon) = link.icon else {
        let aria = link
            .aria_label
            .as_deref()
            .map(|l| format!(" aria-label=\"{}\"", html_escape(l)))
            .unwrap_or_default();
        return format!("<a href=\"{href}\"{aria}>{}</a>", html_escape(&link.label));
    };

    let target = if link.external {
        " target=\"_blank\" rel=\"noopener\""
    } else {
        ""
    };
    format!(
        "<a class=\"icon-btn\" href=\"{href}\" aria-label=\"{}\"{target}>{}</a>",
        html_escape(link.aria_label.as_deref().unwrap_or(icon.key())),
        icon_html(icon)
    )
}

fn icon_html(icon: Icon) -> &'static str {
    match icon {
        Icon::GitHub => {
            r#"<img src="/images/github-mark-white.svg" alt="GitHub" width="18" height="18" />"#
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{FooterConfig, HeaderConfig, Link, SocialLink};
    use crate::grid::ViewAll;
    use url::Url;

    fn sample_card() -> Card {
        Card {
            href: "post/?p=post-a".into(),
            title: "Post A".into(),
            desc: Some("Fish & chips".into()),
            image: None,
            date: Some("Jan 01, 2024".into()),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn card_markup() {
        let html = card(&sample_card());
        assert!(html.starts_with(r#"<a class="card project-card" href="post/?p=post-a""#));
        assert!(html.contains("<div class=\"thumb-ph\">No image</div>"));
        assert!(html.contains("<h3>Post A</h3><p class=\"muted small\">Jan 01, 2024</p><p>Fish &amp; chips</p>"));
    }

    #[test]
    fn card_image_alt_falls_back() {
        let html = card(&Card {
            title: String::new(),
            image: Some("/img/a.png".into()),
            desc: None,
            date: None,
            ..sample_card()
        });
        assert!(html.contains(r#"<img src="/img/a.png" alt="Post image">"#));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn grid_placeholder_and_view_all() {
        let view = GridView {
            heading: "Latest".into(),
            subheading: None,
            body: GridBody::Empty,
            view_all: None,
        };
        let html = grid(&view);
        assert!(html.contains("<h2>Latest</h2>"));
        assert!(html.contains("Nothing to show yet."));
        assert!(!html.contains("view-more-btn"));
        assert!(!html.contains("class=\"muted\">Latest"));

        let view = GridView {
            subheading: Some("Notes".into()),
            body: GridBody::Cards(vec![sample_card()]),
            view_all: Some(ViewAll {
                href: "post/".into(),
                automatic: true,
            }),
            ..view
        };
        let html = grid(&view);
        assert!(html.contains("<p class=\"muted\">Notes</p>"));
        assert_eq!(html.matches("class=\"card project-card\"").count(), 1);
        assert!(html.contains(
            "<a class=\"view-more-btn\" href=\"post/\" data-auto=\"1\">View all →</a>"
        ));

        let view = GridView {
            view_all: Some(ViewAll {
                href: "/archive/".into(),
                automatic: false,
            }),
            ..view
        };
        assert!(grid(&view).contains("<a class=\"view-more-btn\" href=\"/archive/\">View all →</a>"));
    }

    #[test]
    fn header_reflects_theme_and_menu() {
        let mut h = SiteHeader::new(HeaderConfig {
            brand: Some("✦ K".into()),
            links: vec![Link::new("Blog", "/post/")],
        });

        let html = header(&h, Theme::Light);
        assert_eq!(html.matches("<a href=\"/post/\">Blog</a>").count(), 2);
        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains("class=\"menu-panel\" hidden"));
        assert!(!html.contains(" checked"));

        h.open_menu();
        let html = header(&h, Theme::Dark);
        assert!(html.contains("aria-expanded=\"true\""));
        assert!(!html.contains(" hidden"));
        assert!(html.contains("id=\"theme-toggle\" checked"));
        assert!(html.contains("M21 12.79"));
    }

    #[test]
    fn hero_slots() {
        let html = hero(&Hero {
            title: "Hi, I'm K".into(),
            intro: "I build <things>".into(),
            bullets: vec!["Rust".into()],
            cta: Some(Link::new("Contact", "mailto:k@example.com")),
        });
        assert!(html.contains("<h1>Hi, I'm K</h1>"));
        assert!(html.contains("I build &lt;things&gt;"));
        assert!(html.contains("<li>Rust</li>"));
        assert!(html.contains("href=\"mailto:k@example.com\">Contact</a>"));
    }

    #[test]
    fn footer_decorates_icons() {
        let base = Url::parse("https://k.example/").unwrap();
        let f = SiteFooter::new(
            FooterConfig {
                year: Some(2024),
                links: vec![
                    SocialLink {
                        href: "https://github.com/k".into(),
                        ..Default::default()
                    },
                    SocialLink {
                        href: "/cv.pdf".into(),
                        label: "CV".into(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            &base,
        );

        let html = footer(&f);
        assert!(html.contains("© 2024 Katerina Lazari"));
        assert!(html.contains(
            "<a class=\"icon-btn\" href=\"https://github.com/k\" aria-label=\"github\" target=\"_blank\" rel=\"noopener\"><img src=\"/images/github-mark-white.svg\""
        ));
        assert!(html.contains("<a href=\"/cv.pdf\">CV</a>"));
    }
}
