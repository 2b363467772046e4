#![deny(missing_docs)]
//! Shared logging utilities for the clinixa workspace.
//!
//! The `clinixa_*` macros go through the `log` re-export below, so callers do
//! not need a direct `log` dependency. Tests share [`initialize_for_tests`],
//! whose level can be overridden with `CLINIXA_TEST_LOG`.

#[doc(hidden)]
pub use log;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! clinixa_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! clinixa_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! clinixa_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! clinixa_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! clinixa_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Environment variable that overrides the test logger level (`off`, `warn`, `trace`, ...).
pub const TEST_LOG_ENV: &str = "CLINIXA_TEST_LOG";

/// Target prefix shared by every workspace crate; other targets are filtered out.
pub const TARGET_PREFIX: &str = "clinixa";

/// Picks the test logger level from an optional override.
///
/// Unparseable overrides fall back to debug in debug builds and info otherwise.
pub fn test_level(requested: Option<&str>) -> log::LevelFilter {
    let fallback = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    requested
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(fallback)
}

/// Initializes a stderr logger for tests, limited to `clinixa*` targets so
/// HTTP mock server chatter stays out of test output.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let requested = std::env::var(TEST_LOG_ENV).ok();
    let config = ConfigBuilder::new()
        .add_filter_allow_str(TARGET_PREFIX)
        .build();

    // Another test may have set the logger already.
    let _ = TermLogger::init(
        test_level(requested.as_deref()),
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}
