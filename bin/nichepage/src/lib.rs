//! Nichepage CLI Library
//!
//! This library provides the command implementations for the Nichepage landing
//! page generator. The binary entry point only parses arguments and dispatches.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, init, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use nichepage::cmd;
//!
//! // Write a starter template and niche list into the current directory
//! cmd::init::run(Path::new("."), false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use nichepage_core::{Config, Product};
pub use nichepage_generator::{BuildStats, SiteBuilder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
