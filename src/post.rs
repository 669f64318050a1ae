//! Defines the [`Post`] record that every listing computation consumes, and
//! the date ordering used to sort posts before they are paginated.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Reverse;

/// A single blog post as supplied by the content loader
/// ([`crate::parser`]). Nothing in the listing logic mutates a [`Post`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier, e.g. `rust/ownership` for
    /// `{posts_directory}/rust/ownership.md`.
    #[serde(default)]
    pub slug: String,

    /// Site-relative path of the post page, e.g. `blog/rust/ownership`.
    #[serde(default)]
    pub path: String,

    /// ISO-8601 date (`2024-03-01` or RFC 3339). Empty when the frontmatter
    /// omits it.
    #[serde(default)]
    pub date: String,

    pub title: String,

    #[serde(default)]
    pub summary: String,

    /// Tag names in frontmatter order. Case is significant.
    #[serde(default, deserialize_with = "nullable_seq")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub draft: bool,
}

impl Post {
    /// Parses [`Post::date`] into a point in time. Plain dates are taken as
    /// midnight; RFC 3339 timestamps are normalized to UTC. Returns `None`
    /// for empty or unparseable dates.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
            return Some(dt.naive_utc());
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

/// Sorts posts by date, most recent first. The sort is stable, and posts
/// without a parseable date land after every dated post.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| Reverse(p.timestamp()));
}

// `tags: ~` in frontmatter means the same thing as leaving `tags` out.
fn nullable_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn post(slug: &str, date: &str, tags: &[&str]) -> Post {
    Post {
        slug: slug.to_owned(),
        path: format!("blog/{}", slug),
        date: date.to_owned(),
        title: slug.to_owned(),
        summary: String::new(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        draft: false,
    }
}
