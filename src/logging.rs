//! Logging setup
//!
//! Diagnostics go to stderr so stdout only ever carries results. `PUPIL_LOG`
//! takes an `EnvFilter` directive string and overrides the `-v` count.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the filter directives
pub const LOG_ENV_VAR: &str = "PUPIL_LOG";

/// Default directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "pupil_tools=info,warn",
        2 => "pupil_tools=debug,info",
        _ => "pupil_tools=trace,debug",
    }
}

/// Build the filter from `PUPIL_LOG`, falling back to the verbosity default
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity >= 2),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "pupil_tools=info,warn");
        assert_eq!(default_directive(9), "pupil_tools=trace,debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
        tracing::debug!("after init");
    }
}
