//! Exports the [`build_site`] function which stitches together the high-level
//! steps of indexing the blog: parsing the posts ([`crate::parser`]),
//! counting their tags ([`crate::tag`]), paginating the `/blog` list and every
//! `/tags/{tag}` list ([`crate::paginate`]), and writing the results to the
//! output directory as `tag-data.json` and `site.json`.

use crate::config::Config;
use crate::listing::{Home, ListLayout};
use crate::paginate::{
    self, base_path, page_params, paginate, paginate_number, total_pages, Pagination,
};
use crate::parser::{self, Parser};
use crate::post::Post;
use crate::tag::{count_tags, posts_with_tag, Tag, TagCount, TagCounts};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Post pages live under this path prefix, e.g. `blog/hello`.
pub const POSTS_PATH: &str = "blog";

/// Builds the site index from a [`Config`] object. Drafts are dropped from
/// every listing unless [`Config::include_drafts`] is set.
pub fn build_site(config: &Config) -> Result<()> {
    let mut posts = Parser::new(POSTS_PATH).parse_posts(&config.posts_directory)?;
    let parsed = posts.len();
    if !config.include_drafts {
        posts.retain(|p| !p.draft);
    }
    info!(
        parsed,
        published = posts.len(),
        directory = %config.posts_directory.display(),
        "loaded posts"
    );

    let counts = count_tags(&posts);
    let site = Site::new(&posts, &counts, config)?;

    fs::create_dir_all(&config.output_directory).map_err(|err| Error::Io {
        path: config.output_directory.clone(),
        err,
    })?;
    write_json(&config.output_directory.join("tag-data.json"), &counts)?;
    write_json(&config.output_directory.join("site.json"), &site)?;
    info!(
        routes = site.routes.len(),
        tags = counts.len(),
        output = %config.output_directory.display(),
        "wrote site index"
    );
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|err| Error::Io {
        path: path.to_owned(),
        err,
    })?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Everything a renderer needs to produce the listing pages.
#[derive(Debug, Serialize)]
pub struct Site<'a> {
    pub home: Home<'a>,

    /// The tags ranked on the home page.
    pub top_tags: Vec<TagCount>,

    /// Every generated list page, `/blog` first and then each tag in rank
    /// order.
    pub routes: Vec<Route>,
}

impl<'a> Site<'a> {
    /// `posts` must already be sorted and have drafts removed.
    pub fn new(posts: &'a [Post], counts: &TagCounts, config: &Config) -> Result<Site<'a>> {
        let all: Vec<&Post> = posts.iter().collect();
        let mut routes = list_routes(
            POSTS_PATH,
            "All Posts",
            &all,
            counts,
            config.posts_per_page,
        )?;

        let mut seen: HashSet<Tag> = HashSet::new();
        for TagCount { tag, .. } in counts.ranked() {
            let tag = Tag::from(tag.as_str());
            if tag.slug.is_empty() {
                warn!(tag = %tag.name, "skipping tag list: tag has an empty slug");
                continue;
            }
            if !seen.insert(tag.clone()) {
                continue;
            }
            let tagged = posts_with_tag(posts, &tag.slug);
            routes.extend(list_routes(
                &format!("tags/{}", tag.slug),
                &capitalize(&tag.name),
                &tagged,
                counts,
                config.posts_per_page,
            )?);
        }

        Ok(Site {
            home: Home::new(posts, config.max_display),
            top_tags: counts.top(config.top_tags),
            routes,
        })
    }
}

/// A single generated list page.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    /// The request path, e.g. `/blog/page/2`.
    pub path: String,
    pub title: String,

    /// Slugs of the posts shown on the page.
    pub posts: Vec<String>,
    pub pagination: Option<Pagination>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub selected_tag: Option<String>,
}

impl Route {
    fn new(path: String, layout: &ListLayout) -> Route {
        let base = base_path(&path);
        let bar = layout.pagination_bar();
        Route {
            title: layout.title.clone(),
            posts: layout.posts.iter().map(|p| p.slug.clone()).collect(),
            pagination: layout.pagination,
            prev: bar.and_then(|p| p.prev_href(base)),
            next: bar.and_then(|p| p.next_href(base)),
            selected_tag: layout
                .sidebar
                .iter()
                .find(|s| s.selected)
                .map(|s| s.tag.slug.clone()),
            path,
        }
    }
}

/// Builds the list root (`/{base}`) and one route per page
/// (`/{base}/page/{n}`).
fn list_routes(
    base: &str,
    title: &str,
    posts: &[&Post],
    counts: &TagCounts,
    page_size: NonZeroUsize,
) -> Result<Vec<Route>> {
    let total = total_pages(posts.len(), page_size);
    let mut routes = Vec::with_capacity(total + 1);

    let mut push = |path: String, page: paginate::Page<&Post>| {
        let layout = ListLayout::new(
            title,
            posts.to_vec(),
            page.items.to_vec(),
            Some(page.pagination),
            counts,
            &path,
        );
        debug!(path = %path, posts = layout.posts.len(), "built route");
        routes.push(Route::new(path, &layout));
    };

    push(format!("/{}", base), paginate_number(posts, page_size, 1)?);
    for param in page_params(total) {
        push(
            format!("/{}/page/{}", base, param),
            paginate(posts, page_size, &param)?,
        );
    }
    Ok(routes)
}

/// Uppercases the first character, the way tag list titles are shown.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The result of a fallible build step.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site index. Errors can be during parsing,
/// pagination, serialization, and other I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for errors during parsing.
    #[error(transparent)]
    Parse(#[from] parser::Error),

    /// Returned when a generated page turns out to be out of range.
    #[error(transparent)]
    Paginate(#[from] paginate::Error),

    /// Returned for errors serializing the index files.
    #[error("writing index: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned for I/O problems creating output files.
    #[error("writing `{}`: {}", .path.display(), .err)]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
