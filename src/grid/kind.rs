//! Post vs. project classification and link shapes.

use serde_json::Value;

use crate::source::Item;

/// Fields whose presence on the first entry marks a batch as posts.
const POST_FIELDS: [&str; 3] = ["date", "body", "slug"];

/// What a loaded batch contains.  Decided once per load, never per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Post,
    Project,
}

impl Kind {
    /// Classify a batch from its source URL, falling back to the shape of
    /// the first entry.
    pub fn infer(src: &str, items: &[Value]) -> Self {
        let src = src.to_lowercase();
        if src.contains("post") {
            return Kind::Post;
        }
        if src.contains("project") {
            return Kind::Project;
        }

        let dated = items
            .first()
            .and_then(Value::as_object)
            .is_some_and(|first| POST_FIELDS.iter().any(|key| first.contains_key(*key)));
        if dated {
            Kind::Post
        } else {
            Kind::Project
        }
    }

    /// Listing page linked from the automatic "view all" button.
    pub fn index_href(self) -> &'static str {
        match self {
            Kind::Post => "post/",
            Kind::Project => "projects/",
        }
    }

    /// Detail page for one entry.
    pub fn detail_href(self, item: &Item) -> String {
        let slug = match &item.slug {
            Some(slug) => slug.clone(),
            None => slugify(item.title.as_deref().unwrap_or_default()),
        };
        format!("{}?p={slug}", self.index_href())
    }
}

/// Turn a title into a URL-safe identifier.
///
/// Lowercases, collapses every run of characters outside `a-z0-9` into a
/// single `-`, and trims separators from both ends.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slugify_basic_cases() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  A  B  "), "a-b");
        assert_eq!(slugify("Rust 2024 -- Edition"), "rust-2024-edition");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Über"), "caf-ber");
    }

    #[test]
    fn src_marker_wins_over_item_shape() {
        let dated = [json!({ "title": "x", "date": "2024-01-01" })];
        assert_eq!(Kind::infer("/data/Posts.json", &[]), Kind::Post);
        assert_eq!(Kind::infer("/projects.json", &dated), Kind::Project);
    }

    #[test]
    fn post_marker_checked_before_project_marker() {
        assert_eq!(Kind::infer("/project-posts.json", &[]), Kind::Post);
    }

    #[test]
    fn first_item_decides_without_marker() {
        let with_date = [json!({ "title": "x", "date": null }), json!({ "title": "y" })];
        let with_body = [json!({ "body": "..." })];
        let plain = [json!({ "title": "x" }), json!({ "date": "2024-01-01" })];

        assert_eq!(Kind::infer("/feed.json", &with_date), Kind::Post);
        assert_eq!(Kind::infer("/feed.json", &with_body), Kind::Post);
        assert_eq!(Kind::infer("/feed.json", &plain), Kind::Project);
        assert_eq!(Kind::infer("/feed.json", &[]), Kind::Project);
    }

    #[test]
    fn detail_href_prefers_slug() {
        let item = Item {
            title: Some("Hello, World!".into()),
            slug: Some("hi".into()),
            ..Default::default()
        };
        assert_eq!(Kind::Post.detail_href(&item), "post/?p=hi");

        let item = Item {
            title: Some("Hello, World!".into()),
            ..Default::default()
        };
        assert_eq!(Kind::Project.detail_href(&item), "projects/?p=hello-world");
        assert_eq!(Kind::Post.detail_href(&Item::default()), "post/?p=");
    }
}
