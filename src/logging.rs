//! Logging setup using tracing.
//!
//! Output goes to stderr so it never mixes with command output. The
//! filter comes from `OPENMATE_LOG` when set, otherwise from the
//! verbosity count.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "OPENMATE_LOG";

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "openmate=warn",
        1 => "openmate=info",
        2 => "openmate=debug",
        _ => "openmate=trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "openmate=warn");
        assert_eq!(default_directive(2), "openmate=debug");
        assert_eq!(default_directive(9), "openmate=trace");
    }
}
