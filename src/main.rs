use anyhow::Result;
use blogdex::build::{build_site, POSTS_PATH};
use blogdex::config::Config;
use blogdex::logging::init_logging;
use blogdex::paginate::paginate;
use blogdex::parser::Parser;
use blogdex::post::Post;
use blogdex::tag::{count_tags, posts_for_list};
use clap::{crate_version, value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::{Path, PathBuf};
use tracing::debug;

fn main() -> Result<()> {
    let config_arg = Arg::with_name("config")
        .short("c")
        .long("config")
        .takes_value(true)
        .help("Path to the project file (default: search for blogdex.yaml upwards)");

    let matches = App::new("blogdex")
        .version(crate_version!())
        .about("Ranks tags and paginates the post lists of a static blog")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Raises log verbosity (repeatable)"),
        )
        .subcommand(
            SubCommand::with_name("build")
                .about("Writes tag-data.json and site.json")
                .arg(config_arg.clone())
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .default_value("_site")
                        .help("Output directory"),
                ),
        )
        .subcommand(
            SubCommand::with_name("tags")
                .about("Prints tags ranked by frequency")
                .arg(config_arg.clone())
                .arg(
                    Arg::with_name("top")
                        .short("n")
                        .long("top")
                        .takes_value(true)
                        .help("Number of tags to print (default: top_tags)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("page")
                .about("Prints the posts on one page of a list")
                .arg(config_arg)
                .arg(Arg::with_name("PAGE").required(true).help("1-based page number"))
                .arg(
                    Arg::with_name("tag")
                        .long("tag")
                        .takes_value(true)
                        .help("Paginate the list for this tag slug instead of all posts"),
                ),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    match matches.subcommand() {
        ("build", Some(matches)) => {
            let output = PathBuf::from(matches.value_of("output").unwrap_or("_site"));
            build_site(&load_config(matches, &output)?)?;
        }
        ("tags", Some(matches)) => {
            let config = load_config(matches, Path::new("."))?;
            let top = match matches.value_of("top") {
                Some(_) => value_t!(matches, "top", usize)?,
                None => config.top_tags,
            };
            let posts = load_posts(&config)?;
            for c in count_tags(&posts).top(top) {
                println!("{}\t{}", c.tag, c.count);
            }
        }
        ("page", Some(matches)) => {
            let config = load_config(matches, Path::new("."))?;
            let posts = load_posts(&config)?;
            let tag = matches.value_of("tag");
            let listed = match posts_for_list(&posts, tag) {
                Some(listed) => listed,
                None => {
                    eprintln!("404: tag `{}` not found", tag.unwrap_or_default());
                    std::process::exit(1);
                }
            };
            let requested = matches.value_of("PAGE").unwrap_or_default();
            match paginate(&listed, config.posts_per_page, requested) {
                Ok(page) => {
                    for post in page.items {
                        println!("{}", post.slug);
                    }
                    println!(
                        "{} of {}",
                        page.pagination.current_page, page.pagination.total_pages
                    );
                }
                Err(err) => {
                    eprintln!("404: {}", err);
                    std::process::exit(1);
                }
            }
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn load_config(matches: &ArgMatches, output_directory: &Path) -> Result<Config> {
    Ok(match matches.value_of("config") {
        Some(path) => Config::from_project_file(Path::new(path), output_directory)?,
        None => Config::from_directory(&std::env::current_dir()?, output_directory)?,
    })
}

fn load_posts(config: &Config) -> Result<Vec<Post>> {
    let mut posts = Parser::new(POSTS_PATH).parse_posts(&config.posts_directory)?;
    if !config.include_drafts {
        posts.retain(|p| !p.draft);
    }
    debug!(posts = posts.len(), "loaded posts");
    Ok(posts)
}
