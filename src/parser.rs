//! Defines the [`Parser`] and [`Error`] types: the logic for loading
//! [`Post`] records from a directory of markdown files with YAML
//! frontmatter.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::post::{sort_posts, Post};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];
const BUNDLE_INDEX: &str = "index";

/// Loads [`Post`] objects from source files.
pub struct Parser<'a> {
    /// `path_prefix` prefixes every post's [`Post::path`] (i.e., the path for
    /// a post with slug `foo/bar` is `{path_prefix}/foo/bar`).
    path_prefix: &'a str,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(path_prefix: &'a str) -> Parser<'a> {
        Parser { path_prefix }
    }

    /// Parses a single [`Post`] from its slug and its source text.
    pub fn parse_str(&self, slug: &str, input: &str) -> Result<Post> {
        fn frontmatter_indices(input: &str) -> Result<(usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            match input[FENCE.len()..].find(FENCE) {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),          // yaml_start
                    FENCE.len() + offset, // yaml_stop
                )),
            }
        }

        let (yaml_start, yaml_stop) = frontmatter_indices(input)?;
        let mut post: Post = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;
        post.slug = slug.to_owned();
        post.path = format!("{}/{}", self.path_prefix.trim_end_matches('/'), slug);
        Ok(post)
    }

    fn parse_file(&self, slug: &str, full_path: &Path) -> Result<Post> {
        let mut contents = String::new();
        File::open(full_path)
            .and_then(|mut f| f.read_to_string(&mut contents))
            .map_err(|err| Error::Annotated(full_path.to_owned(), Box::new(err.into())))?;
        self.parse_str(slug, &contents)
            .map_err(|err| Error::Annotated(full_path.to_owned(), Box::new(err)))
    }

    /// Walks `source_directory` for post files (extension `.md` or `.mdx`)
    /// and returns the posts sorted by date (most recent first). A file's
    /// slug is its path relative to `source_directory` without the
    /// extension; a bundle (`{dir}/index.md`) takes the directory's path.
    /// Each post file must be structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with field `title`, and optionally `date`,
    ///    `tags`, `summary`, and `draft`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Post body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// date: 2021-04-16
    /// tags: [greet]
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for result in WalkDir::new(source_directory).sort_by_file_name() {
            let entry = result?;
            if !entry.file_type().is_file() {
                continue;
            }
            // strip_prefix() should never fail
            let relative = match entry.path().strip_prefix(source_directory) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            match slug_for(relative) {
                Some(slug) => {
                    let post = self.parse_file(&slug, entry.path())?;
                    debug!(slug = %post.slug, date = %post.date, "parsed post");
                    posts.push(post);
                }
                None => warn!(path = %entry.path().display(), "skipping non-markdown file"),
            }
        }

        sort_posts(&mut posts);
        Ok(posts)
    }
}

/// Derives a slug from a path relative to the posts directory. Returns
/// `None` for files that aren't markdown.
fn slug_for(relative: &Path) -> Option<String> {
    let extension = relative.extension()?.to_str()?;
    if !MARKDOWN_EXTENSIONS.contains(&extension) {
        return None;
    }
    let stem = relative.with_extension("");
    let stem = match stem.file_name() {
        Some(name) if name == BUNDLE_INDEX => stem.parent()?.to_owned(),
        _ => stem,
    };
    let parts: Vec<&str> = stem
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    #[error("post must begin with `---`")]
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one was
    /// missing).
    #[error("missing closing `---`")]
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    #[error(transparent)]
    DeserializeYaml(#[from] serde_yaml::Error),

    /// Returned for other I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Returned for WalkDir I/O errors.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// An error annotated with the post file it came from.
    #[error("parsing post `{}`: {}", .0.display(), .1)]
    Annotated(PathBuf, Box<Error>),
}
