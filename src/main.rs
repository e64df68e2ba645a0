// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod util;
util::mod_days![12, 13];

use std::path::PathBuf;


/// Solves the Advent of Code 2022 hill climbing (12) and distress signal (13) puzzles.
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Day to solve
	day: u8,

	/// Puzzle input, `-` for stdin [default: inputs/dayDD.txt]
	#[arg(short, long)]
	input: Option<PathBuf>,

	/// Day 12, part 2: search backwards from the goal once, instead of from every lowest square
	#[arg(long)]
	reverse: bool,

	/// Log more (repeatable)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	use clap::Parser as _;

	let args = Args::parse();
	util::init_logging(args.verbose);

	if !DAYS.contains(&args.day) {
		return Err(format!("No solution for day {}; try one of {DAYS:?}", args.day).into())
	}

	let path = args.input.clone()
		.unwrap_or_else(|| format!("inputs/day{:02}.txt", args.day).into());
	tracing::info!("Reading input from {}", path.display());
	let input = util::read_input(&path)?;

	let [part1, part2] = run_day(args.day, &input, &args)?;
	println!("Day {}; part 1: {part1}, part 2: {part2}", args.day);
	Ok(())
}
