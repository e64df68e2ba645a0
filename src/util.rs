// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::path::Path;


/// Declares the `dayNN` modules and a `run_day` dispatching to their `run`s.
macro_rules! mod_days { ( $( $day:literal ),* $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )*

	const DAYS: &[u8] = &[$( $day ),*];

	fn run_day(day: u8, input: &str, args: &Args)
	-> Result<[String; 2], Box<dyn std::error::Error>> {
		match day {
			$( $day => [<day $day>]::run(input, args), )*
			_ => Err(format!("No solution for day {day}").into()),
		}
	}
} } }

pub(crate) use mod_days;


/// Reads the whole puzzle input from `path`, or from stdin if `path` is `-`.
pub(crate) fn read_input(path: &Path) -> std::io::Result<String> {
	use {std::io::Read as _, either::Either};

	let mut reader = if path == Path::new("-") {
		Either::Left(std::io::stdin())
	} else {
		Either::Right(std::fs::File::open(path).map_err(|e|
			std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))?)
	};

	let mut input = String::new();
	reader.read_to_string(&mut input)?;
	Ok(input)
}


/// Warnings only by default; each `verbosity` step enables one more level.
fn level_filter(verbosity: u8) -> tracing::level_filters::LevelFilter {
	use tracing::level_filters::LevelFilter;
	match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	}
}

/// Logs to stderr at the level given by `verbosity`, unless `RUST_LOG` says otherwise.
pub(crate) fn init_logging(verbosity: u8) {
	use tracing_subscriber::{prelude::*, EnvFilter};

	let fmt_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(true);
	let filter_layer = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::default().add_directive(level_filter(verbosity).into()));

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(fmt_layer)
		.init();
}


#[test]
fn verbosity_levels() {
	use tracing::level_filters::LevelFilter;
	assert_eq!(level_filter(0), LevelFilter::WARN);
	assert_eq!(level_filter(1), LevelFilter::INFO);
	assert_eq!(level_filter(2), LevelFilter::DEBUG);
	assert_eq!(level_filter(3), LevelFilter::TRACE);
	assert_eq!(level_filter(u8::MAX), LevelFilter::TRACE);
	assert!(level_filter(1) >= LevelFilter::WARN);
}
