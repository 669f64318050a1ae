//! View models for the two listing surfaces: the home page and the list
//! layout shared by `/blog` and `/tags/{tag}`. Renderers consume these
//! directly; nothing here knows about markup.

use crate::paginate::Pagination;
use crate::post::Post;
use crate::tag::{selected_tag, Tag, TagCounts};
use serde::Serialize;
use tracing::warn;

/// The home page: the latest posts and whether an "All Posts" link is
/// needed to reach the rest.
#[derive(Debug, Serialize)]
pub struct Home<'a> {
    pub posts: &'a [Post],
    pub has_more: bool,
}

impl<'a> Home<'a> {
    pub fn new(posts: &'a [Post], max_display: usize) -> Home<'a> {
        Home {
            posts: &posts[..posts.len().min(max_display)],
            has_more: posts.len() > max_display,
        }
    }

    /// True when there is nothing to show ("No posts found.").
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// One sidebar entry of the list layout.
#[derive(Debug, Serialize)]
pub struct SidebarTag {
    #[serde(flatten)]
    pub tag: Tag,
    pub count: usize,
    pub selected: bool,
}

/// The list layout: a titled list of posts, the tag sidebar, and an
/// optional pagination bar.
#[derive(Debug, Serialize)]
pub struct ListLayout<'a> {
    pub title: String,
    pub posts: Vec<&'a Post>,
    pub pagination: Option<Pagination>,
    pub sidebar: Vec<SidebarTag>,

    /// Whether the "All Posts" entry is the current page rather than a
    /// link.
    pub all_posts_selected: bool,
}

impl<'a> ListLayout<'a> {
    /// Builds the layout for the page at `pathname`. `display_posts` is the
    /// current page's slice; when it is empty the layout lists all of
    /// `posts`.
    pub fn new(
        title: &str,
        posts: Vec<&'a Post>,
        display_posts: Vec<&'a Post>,
        pagination: Option<Pagination>,
        counts: &TagCounts,
        pathname: &str,
    ) -> ListLayout<'a> {
        let selected = selected_tag(pathname);
        let sidebar = counts
            .ranked()
            .into_iter()
            .filter_map(|c| {
                let tag = Tag::from(c.tag.as_str());
                if tag.slug.is_empty() {
                    warn!(tag = %tag.name, "leaving tag out of the sidebar: empty slug");
                    return None;
                }
                Some(SidebarTag {
                    selected: selected == Some(tag.slug.as_str()),
                    count: c.count,
                    tag,
                })
            })
            .collect();

        ListLayout {
            title: title.to_owned(),
            posts: if display_posts.is_empty() {
                posts
            } else {
                display_posts
            },
            pagination,
            sidebar,
            all_posts_selected: pathname.starts_with("/blog") && !pathname.contains("/tags/"),
        }
    }

    /// The pagination to render, if any. Single-page lists have none.
    pub fn pagination_bar(&self) -> Option<&Pagination> {
        self.pagination.as_ref().filter(|p| p.is_shown())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::post;
    use crate::tag::count_tags;

    #[test]
    fn test_home_caps_at_max_display() {
        let posts: Vec<Post> = (0..7).map(|i| post(&i.to_string(), "", &[])).collect();
        let home = Home::new(&posts, 5);
        assert_eq!(home.posts.len(), 5);
        assert!(home.has_more);

        let home = Home::new(&posts[..5], 5);
        assert!(!home.has_more);
        assert!(Home::new(&[], 5).is_empty());
    }

    #[test]
    fn test_list_layout_for_tag_page() {
        let posts = vec![
            post("p1", "", &["Rust", "web"]),
            post("p2", "", &["web"]),
            post("p3", "", &["Next JS"]),
        ];
        let counts = count_tags(&posts);
        let all: Vec<&Post> = posts.iter().collect();
        let layout = ListLayout::new(
            "Next JS",
            all,
            vec![&posts[2]],
            None,
            &counts,
            "/tags/next-js",
        );

        assert_eq!(layout.posts.len(), 1);
        assert!(!layout.all_posts_selected);
        let sidebar: Vec<(&str, usize, bool)> = layout
            .sidebar
            .iter()
            .map(|s| (s.tag.name.as_str(), s.count, s.selected))
            .collect();
        assert_eq!(
            sidebar,
            vec![("web", 2, false), ("Rust", 1, false), ("Next JS", 1, true)]
        );
        assert_eq!(layout.sidebar[2].tag.url, "/tags/next-js");
    }

    #[test]
    fn test_list_layout_for_blog_page() {
        let posts = vec![post("p1", "", &["a"]), post("p2", "", &["b"])];
        let counts = count_tags(&posts);
        let all: Vec<&Post> = posts.iter().collect();
        let pagination = Pagination {
            current_page: 1,
            total_pages: 1,
        };
        let layout = ListLayout::new(
            "All Posts",
            all,
            Vec::new(),
            Some(pagination),
            &counts,
            "/blog",
        );

        assert_eq!(layout.posts.len(), 2);
        assert!(layout.all_posts_selected);
        assert!(layout.sidebar.iter().all(|s| !s.selected));
        assert_eq!(layout.pagination_bar(), None);
    }

    #[test]
    fn test_sidebar_leaves_out_tags_without_a_slug() {
        let posts = vec![post("p1", "", &["!!!", "rust"]), post("p2", "", &["!!!"])];
        let counts = count_tags(&posts);
        let all: Vec<&Post> = posts.iter().collect();
        let layout = ListLayout::new("All Posts", all, Vec::new(), None, &counts, "/blog");
        let names: Vec<&str> = layout.sidebar.iter().map(|s| s.tag.name.as_str()).collect();
        assert_eq!(names, vec!["rust"]);
    }
}
