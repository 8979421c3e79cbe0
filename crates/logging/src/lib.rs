// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Kindred's Logging Framework
//!
//! This crate initializes the logging framework for Kindred.  It uses the [`log`] crate for
//! logging and [`env_logger`] to read logging configuration from the environment.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds. This can be overridden by setting the `RUST_LOG`
//! environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=kindred=debug,kindred_layout=debug cargo run -- <tree-id>
//! ```

/// The level used when `RUST_LOG` is not set: [`Info`](log::LevelFilter::Info) in debug builds
/// and [`Warn`](log::LevelFilter::Warn) in release builds.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Initializes logging for the given crates at the [`default_level`].
///
/// Returns `false` if a logger was already installed, which leaves that logger in place.
pub fn init(crates: &[&str]) -> bool {
    init_with_level(crates, default_level())
}

/// Initializes logging for the given crates at `log_level`, unless `RUST_LOG` is set.
pub fn init_with_level(crates: &[&str], log_level: log::LevelFilter) -> bool {
    let filter = filter_string(crates, log_level);

    // Use env_logger's builder API to avoid unsafe set_var call
    let result = if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&filter))
            .try_init()
    } else {
        env_logger::try_init()
    };
    result.is_ok()
}

/// Builds the filter string that would have been set in `RUST_LOG`, e.g.
/// `kindred=info,kindred_graph=info`.
pub fn filter_string(crates: &[&str], log_level: log::LevelFilter) -> String {
    let level_str = match log_level {
        log::LevelFilter::Off => "off",
        log::LevelFilter::Error => "error",
        log::LevelFilter::Warn => "warn",
        log::LevelFilter::Info => "info",
        log::LevelFilter::Debug => "debug",
        log::LevelFilter::Trace => "trace",
    };
    crates
        .iter()
        .map(|pkg_name| format!("{}={}", pkg_name, level_str))
        .collect::<Vec<_>>()
        .join(",")
}

/// A module which is typically glob imported.
pub mod prelude {
    pub use super::init as init_logging;
}


// End of File
