//! Splits an already sorted collection into fixed-size pages and derives the
//! previous/next navigation for a page. The collection is never reordered
//! or copied; a [`Page`] borrows a sub-slice of it.

use regex::Regex;
use serde::Serialize;
use std::convert::TryFrom;
use std::num::NonZeroUsize;
use std::sync::OnceLock;
use thiserror::Error;

/// The position of a page within its collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based.
    pub current_page: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a list should render its pagination bar at all.
    pub fn is_shown(&self) -> bool {
        self.total_pages > 1
    }

    /// The href of the previous page under `base` (see [`base_path`]). The
    /// first page of a list lives at the list root rather than `page/1`.
    pub fn prev_href(&self, base: &str) -> Option<String> {
        if !self.has_prev() {
            return None;
        }
        Some(match self.current_page - 1 {
            1 => format!("/{}/", base),
            n => format!("/{}/page/{}", base, n),
        })
    }

    /// The href of the next page under `base` (see [`base_path`]).
    pub fn next_href(&self, base: &str) -> Option<String> {
        if !self.has_next() {
            return None;
        }
        Some(format!("/{}/page/{}", base, self.current_page + 1))
    }
}

/// One page of a collection.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub pagination: Pagination,
}

/// `ceil(len / page_size)`; zero for an empty collection.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    let page_size = page_size.get();
    match len % page_size {
        0 => len / page_size,
        _ => len / page_size + 1,
    }
}

/// Returns page `requested` of `items`, where `requested` is the raw route
/// parameter (e.g. the `2` of `/blog/page/2`). Anything that is not a
/// base-10 integer is [`Error::NotFound`].
///
/// Page 1 of an empty collection is a valid, empty page with zero total
/// pages; every other page of an empty collection is not found.
pub fn paginate<'a, T>(
    items: &'a [T],
    page_size: NonZeroUsize,
    requested: &str,
) -> Result<Page<'a, T>> {
    match requested.trim().parse::<i64>() {
        Ok(n) => paginate_number(items, page_size, n),
        Err(_) => Err(Error::NotFound {
            requested: requested.to_owned(),
        }),
    }
}

/// Like [`paginate`], for callers that already hold a page number.
pub fn paginate_number<T>(
    items: &[T],
    page_size: NonZeroUsize,
    requested: i64,
) -> Result<Page<'_, T>> {
    let total = total_pages(items.len(), page_size);
    let not_found = || Error::NotFound {
        requested: requested.to_string(),
    };

    let current = usize::try_from(requested).map_err(|_| not_found())?;
    if current == 0 || current > total.max(1) {
        return Err(not_found());
    }

    let start = (page_size.get() * (current - 1)).min(items.len());
    let end = (start + page_size.get()).min(items.len());
    Ok(Page {
        items: &items[start..end],
        pagination: Pagination {
            current_page: current,
            total_pages: total,
        },
    })
}

/// The page numbers a list is statically generated for: `"1"` through
/// `"{total_pages}"`.
pub fn page_params(total_pages: usize) -> Vec<String> {
    (1..=total_pages).map(|n| n.to_string()).collect()
}

fn page_suffix() -> &'static Regex {
    static PAGE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    PAGE_SUFFIX.get_or_init(|| Regex::new(r"/page/\d+/?$").expect("page suffix pattern"))
}

/// Removes a trailing `/page/{n}` (with or without a final slash).
pub fn strip_page_suffix(path: &str) -> &str {
    match page_suffix().find(path) {
        Some(m) => &path[..m.start()],
        None => path,
    }
}

/// Derives a list's base path from the request path: `/blog/page/3` and
/// `/blog/` both become `blog`, `/tags/rust/page/2` becomes `tags/rust`.
pub fn base_path(pathname: &str) -> &str {
    let path = pathname.strip_prefix('/').unwrap_or(pathname);
    let path = strip_page_suffix(path);
    path.strip_suffix('/').unwrap_or(path)
}

/// The result of a fallible pagination.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a page request that can't be served.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Returned for non-numeric, non-positive, and past-the-end page
    /// requests. Callers render their "page not found" response.
    #[error("page `{requested}` not found")]
    NotFound { requested: String },
}

#[cfg(test)]
mod test {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn not_found(requested: &str) -> Error {
        Error::NotFound {
            requested: requested.to_owned(),
        }
    }

    #[test]
    fn test_twelve_posts_five_per_page() {
        let posts: Vec<u32> = (0..12).collect();
        assert_eq!(total_pages(posts.len(), size(5)), 3);

        let page = paginate(&posts, size(5), "1").unwrap();
        assert_eq!(page.items, &posts[0..5]);
        assert_eq!(
            page.pagination,
            Pagination {
                current_page: 1,
                total_pages: 3
            }
        );
        assert_eq!(paginate(&posts, size(5), "2").unwrap().items, &posts[5..10]);

        let last = paginate(&posts, size(5), "3").unwrap();
        assert_eq!(last.items, &posts[10..12]);
        assert_eq!(last.items.len(), 2);

        assert_eq!(paginate(&posts, size(5), "4"), Err(not_found("4")));
    }

    #[test]
    fn test_out_of_range_and_malformed_requests() {
        let posts: Vec<u32> = (0..7).collect();
        let total = total_pages(posts.len(), size(3));
        for n in &[0, -1, total as i64 + 1, i64::MAX, i64::MIN] {
            assert_eq!(
                paginate_number(&posts, size(3), *n),
                Err(not_found(&n.to_string()))
            );
        }
        for raw in &["", "abc", "2.5", "1e2", "99999999999999999999"] {
            assert_eq!(paginate(&posts, size(3), raw), Err(not_found(raw)));
        }
        assert_eq!(paginate(&posts, size(3), " 2 ").unwrap().items, &[3, 4, 5]);
    }

    #[test]
    fn test_pages_partition_the_collection() {
        for len in 1..=23usize {
            let posts: Vec<usize> = (0..len).collect();
            for page_size in 1..=8 {
                let total = total_pages(len, size(page_size));
                let mut joined = Vec::new();
                for n in 1..=total {
                    let page = paginate_number(&posts, size(page_size), n as i64).unwrap();
                    assert!(!page.items.is_empty());
                    assert!(page.items.len() <= page_size);
                    joined.extend_from_slice(page.items);
                }
                assert_eq!(joined, posts);
            }
        }
    }

    #[test]
    fn test_empty_collection_has_an_empty_first_page() {
        let posts: Vec<u32> = Vec::new();
        let page = paginate(&posts, size(5), "1").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(
            page.pagination,
            Pagination {
                current_page: 1,
                total_pages: 0
            }
        );
        assert!(!page.pagination.has_prev());
        assert!(!page.pagination.has_next());
        assert_eq!(paginate(&posts, size(5), "2"), Err(not_found("2")));
        assert_eq!(paginate(&posts, size(5), "0"), Err(not_found("0")));
    }

    #[test]
    fn test_navigation() {
        let first = Pagination {
            current_page: 1,
            total_pages: 3,
        };
        let second = Pagination {
            current_page: 2,
            total_pages: 3,
        };
        let last = Pagination {
            current_page: 3,
            total_pages: 3,
        };

        assert_eq!(first.prev_href("blog"), None);
        assert_eq!(first.next_href("blog"), Some("/blog/page/2".to_owned()));
        assert_eq!(second.prev_href("blog"), Some("/blog/".to_owned()));
        assert_eq!(second.next_href("blog"), Some("/blog/page/3".to_owned()));
        assert_eq!(last.prev_href("tags/rust"), Some("/tags/rust/page/2".to_owned()));
        assert_eq!(last.next_href("tags/rust"), None);

        assert!(first.is_shown());
        let single = Pagination {
            current_page: 1,
            total_pages: 1,
        };
        assert!(!single.is_shown());
        assert!(!single.has_prev() && !single.has_next());
    }

    #[test]
    fn test_base_path() {
        assert_eq!(base_path("/blog"), "blog");
        assert_eq!(base_path("/blog/"), "blog");
        assert_eq!(base_path("/blog/page/3"), "blog");
        assert_eq!(base_path("/blog/page/3/"), "blog");
        assert_eq!(base_path("/tags/rust/page/12"), "tags/rust");
        assert_eq!(base_path("/blog/page/next"), "blog/page/next");
        assert_eq!(base_path("/"), "");
    }

    #[test]
    fn test_page_params() {
        assert_eq!(page_params(3), vec!["1", "2", "3"]);
        assert!(page_params(0).is_empty());
    }
}
