//! The library code for the `blogdex` blog indexer. The architecture can be
//! generally broken down into two distinct steps:
//!
//! 1. Loading posts from source files on disk ([`crate::parser`])
//! 2. Deriving the listing pages from the posts ([`crate::build`])
//!
//! Of the two, the second step is the more involved. It is itself composed of
//! three distinct sub-steps:
//!
//! 1. Counting and ranking tags ([`crate::tag`])
//! 2. Paginating the main list and one list per tag ([`crate::paginate`])
//! 3. Assembling the home page and list layouts ([`crate::listing`])
//!
//! Tag counting and pagination are pure functions over an already sorted
//! slice of [`post::Post`]s, so renderers can call them directly instead of
//! going through [`build::build_site`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod listing;
pub mod logging;
pub mod paginate;
pub mod parser;
pub mod post;
pub mod tag;
