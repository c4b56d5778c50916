//! Logging helper
//!
//! Used by binaries and test harnesses of `fluvia` to log consistently.
//!
//! Configured through the environment:
//! - `RUST_LOG`: filter directives, defaulting to `info`.
//! - `RUST_LOG_COLOR`: whether to use ANSI colors (`1`, `yes` or `true`). Enabled when unset.

// Imports
use {
	anyhow::Context,
	std::env,
	tracing::level_filters::LevelFilter,
	tracing_subscriber::prelude::*,
};

/// Initializes logging
///
/// # Panics
/// Panics if a global subscriber was already installed.
pub fn init() {
	if let Err(err) = self::try_init() {
		panic!("Unable to initialize logging: {err:?}");
	}
}

/// Initializes logging, returning an error if a global subscriber was already installed.
pub fn try_init() -> Result<(), anyhow::Error> {
	let filter = tracing_subscriber::EnvFilter::builder()
		.with_default_directive(LevelFilter::INFO.into())
		.from_env_lossy();
	let layer = tracing_subscriber::fmt::layer()
		.with_ansi(self::use_color())
		.with_filter(filter);

	tracing_subscriber::registry()
		.with(layer)
		.try_init()
		.context("Unable to set global subscriber")
}

/// Returns whether to use colors, according to `RUST_LOG_COLOR`
fn use_color() -> bool {
	env::var("RUST_LOG_COLOR").map_or(true, |value| self::parse_bool(&value))
}

/// Parses a boolean environment value
fn parse_bool(value: &str) -> bool {
	matches!(value.trim().to_uppercase().as_str(), "1" | "YES" | "TRUE")
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn parse_color() {
		assert!(parse_bool("1"));
		assert!(parse_bool(" yes "));
		assert!(parse_bool("True"));
		assert!(!parse_bool("0"));
		assert!(!parse_bool("no"));
		assert!(!parse_bool(""));
	}

	#[test]
	fn second_init_fails() {
		// Note: Other tests in this binary don't install a subscriber, so whichever
		//       of these calls runs first succeeds.
		let first = try_init();
		let second = try_init();
		assert!(first.is_ok());
		assert!(second.is_err(), "Installed a global subscriber twice");
	}
}
