//! Defines the [`Tag`] badge type and the tag-frequency ranking that drives
//! the home page's tag list and the list layout's sidebar.

use crate::paginate::strip_page_suffix;
use crate::post::Post;
use serde::ser::{Serialize, Serializer};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Represents a [`Post`] tag as it is rendered: the name as written in the
/// frontmatter plus its slug and the URL of the tag's list page.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Tag {
    /// The tag's name as written by the author.
    pub name: String,

    /// The slugified name. `macOS` and `MacOS` share a slug and therefore a
    /// list page.
    pub slug: String,

    /// `/tags/{slug}`.
    pub url: String,
}

impl From<&str> for Tag {
    fn from(name: &str) -> Tag {
        let slug = slug::slugify(name);
        Tag {
            name: name.to_owned(),
            url: format!("/tags/{}", slug),
            slug,
        }
    }
}

impl Hash for Tag {
    /// Implements [`Hash`] for [`Tag`] by delegating directly to the `slug`
    /// field.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slug.hash(state)
    }
}

impl PartialEq for Tag {
    /// Implements [`PartialEq`] and [`Eq`] for [`Tag`] by delegating directly
    /// to the `slug` field.
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}
impl Eq for Tag {}

/// Returns the list page URL for a tag name.
pub fn tag_url(name: &str) -> String {
    format!("/tags/{}", slug::slugify(name))
}

/// A tag name and the number of non-draft posts carrying it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tag occurrence counts, kept in the order each tag was first seen. The
/// order matters: [`TagCounts::ranked`] breaks ties between equal counts by
/// it.
#[derive(Clone, Debug, Default)]
pub struct TagCounts {
    counts: Vec<TagCount>,
    index: HashMap<String, usize>,
}

impl TagCounts {
    /// Records one occurrence of `tag`.
    pub fn add(&mut self, tag: &str) {
        match self.index.get(tag) {
            Some(&i) => self.counts[i].count += 1,
            None => {
                self.index.insert(tag.to_owned(), self.counts.len());
                self.counts.push(TagCount {
                    tag: tag.to_owned(),
                    count: 1,
                });
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<usize> {
        self.index.get(tag).map(|&i| self.counts[i].count)
    }

    /// The number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The number of (post, tag) pairs counted.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Iterates in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &TagCount> {
        self.counts.iter()
    }

    /// Every tag, most frequent first. Equal counts keep first-appearance
    /// order.
    pub fn ranked(&self) -> Vec<TagCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// The first `n` entries of [`TagCounts::ranked`].
    pub fn top(&self, n: usize) -> Vec<TagCount> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for TagCounts {
    /// Serializes as a `{tag: count}` map in rank order. This is the shape
    /// of `tag-data.json`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.ranked().into_iter().map(|c| (c.tag, c.count)))
    }
}

/// Counts tags across every post whose `draft` flag is unset.
pub fn count_tags(posts: &[Post]) -> TagCounts {
    let mut counts = TagCounts::default();
    for post in posts.iter().filter(|p| !p.draft) {
        for tag in &post.tags {
            counts.add(tag);
        }
    }
    counts
}

/// Ranks the tags of non-draft posts by frequency and keeps the first
/// `top_n`.
pub fn rank(posts: &[Post], top_n: usize) -> Vec<TagCount> {
    count_tags(posts).top(top_n)
}

/// Selects the posts carrying a tag whose slug is `slug`, in input order.
pub fn posts_with_tag<'a>(posts: &'a [Post], slug: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| p.tags.iter().any(|t| slug::slugify(t) == slug))
        .collect()
}

/// Selects the posts of a list page: every post for `/blog`, or the posts
/// tagged `slug`. Returns `None` when no post carries the tag, since such a
/// tag has no list page.
pub fn posts_for_list<'a>(posts: &'a [Post], slug: Option<&str>) -> Option<Vec<&'a Post>> {
    match slug {
        None => Some(posts.iter().collect()),
        Some(slug) => {
            let tagged = posts_with_tag(posts, slug);
            if tagged.is_empty() {
                None
            } else {
                Some(tagged)
            }
        }
    }
}

/// Extracts the tag slug from a request path such as `/tags/rust` or
/// `/tags/rust/page/2/`.
pub fn selected_tag(pathname: &str) -> Option<&str> {
    let rest = pathname.split("/tags/").nth(1)?;
    let rest = strip_page_suffix(rest).trim_end_matches('/');
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}
