//! Logging initialization. Log lines go to stderr through `tracing`; the
//! `BLOGDEX_LOG` environment variable (an `EnvFilter` directive such as
//! `blogdex=debug`) overrides the level chosen on the command line.

use tracing_subscriber::EnvFilter;

/// The environment variable consulted by [`init_logging`].
pub const LOG_ENV: &str = "BLOGDEX_LOG";

/// Maps a `-v` count to a tracing directive: 0 → `warn`, 1 → `info`,
/// 2 → `debug`, 3+ → `trace`.
pub fn verbosity_to_directive(verbosity: u64) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Uses `try_init()` so calling this more
/// than once (e.g. in tests) is harmless.
pub fn init_logging(verbosity: u64) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_verbosity_to_directive() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(u64::MAX), "trace");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(0);
        init_logging(3);
    }
}
