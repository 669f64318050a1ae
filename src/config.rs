//! Loads the `blogdex.yaml` project file.

use serde::Deserialize;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The name of the project file [`Config::from_directory`] searches for.
pub const PROJECT_FILE: &str = "blogdex.yaml";

#[derive(Deserialize)]
struct PageSize(usize);
impl Default for PageSize {
    fn default() -> Self {
        PageSize(5)
    }
}

#[derive(Deserialize)]
struct MaxDisplay(usize);
impl Default for MaxDisplay {
    fn default() -> Self {
        MaxDisplay(5)
    }
}

#[derive(Deserialize)]
struct TopTags(usize);
impl Default for TopTags {
    fn default() -> Self {
        TopTags(10)
    }
}

fn default_posts_directory() -> PathBuf {
    PathBuf::from("posts")
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Project {
    #[serde(default = "default_posts_directory")]
    posts_directory: PathBuf,

    #[serde(default)]
    posts_per_page: PageSize,

    #[serde(default)]
    max_display: MaxDisplay,

    #[serde(default)]
    top_tags: TopTags,

    #[serde(default)]
    include_drafts: bool,
}

/// Resolved project configuration. Relative paths in the project file are
/// resolved against the directory containing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub posts_directory: PathBuf,
    pub output_directory: PathBuf,
    pub posts_per_page: NonZeroUsize,

    /// The number of posts on the home page.
    pub max_display: usize,

    /// The number of tags ranked on the home page.
    pub top_tags: usize,
    pub include_drafts: bool,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for [`PROJECT_FILE`].
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.is_file() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(Error::NotFound),
            }
        }
    }

    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        let project_root = path
            .parent()
            .ok_or_else(|| Error::NoParent(path.to_owned()))?;
        Ok(Config {
            posts_directory: project_root.join(project.posts_directory),
            output_directory: output_directory.to_owned(),
            posts_per_page: NonZeroUsize::new(project.posts_per_page.0)
                .ok_or(Error::ZeroPageSize)?,
            max_display: project.max_display.0,
            top_tags: project.top_tags.0,
            include_drafts: project.include_drafts,
        })
    }
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading the project file.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when no directory up to the filesystem root holds a
    /// project file.
    #[error("could not find `{}` in any parent directory", PROJECT_FILE)]
    NotFound,

    /// Returned when the project file can't be opened.
    #[error("opening project file `{}`: {}", .path.display(), .err)]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("can't get parent directory for project file `{}`", .0.display())]
    NoParent(PathBuf),

    /// Returned when the project file isn't valid YAML or has unknown keys.
    #[error("loading configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`posts_per_page` must be greater than zero")]
    ZeroPageSize,
}
