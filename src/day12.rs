// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use advent22_core::heightmap::{Heightmap, HeightmapError};


fn part1_impl(heightmap: &Heightmap) -> Result<Option<usize>, HeightmapError> {
	heightmap.find_shortest_path(heightmap.start())
}


fn part2_impl(heightmap: &Heightmap, reverse: bool) -> Result<Option<usize>, HeightmapError> {
	let sources = heightmap.positions_at_lowest_elevation();
	if reverse {
		Ok(heightmap.steps_to_goal().min_from_any(sources))
	} else {
		heightmap.find_shortest_path_from_any(sources)
	}
}


fn answer(steps: Option<usize>) -> String {
	steps.map_or_else(|| "no path".to_owned(), |steps| steps.to_string())
}

pub(crate) fn run(input: &str, args: &crate::Args) -> Result<[String; 2], Box<dyn std::error::Error>> {
	let heightmap = input.parse::<Heightmap>()?;
	tracing::info!("Heightmap of {}x{}, from {} to {}",
		heightmap.height(), heightmap.width(), heightmap.start(), heightmap.goal());
	Ok([answer(part1_impl(&heightmap)?), answer(part2_impl(&heightmap, args.reverse)?)])
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Sabqponm
		abcryxxl
		accszExk
		acctuvwj
		abdefghi
	" };
	let heightmap = INPUT.parse().unwrap();
	assert_eq!(part1_impl(&heightmap).unwrap(), Some(31));
	assert_eq!(part2_impl(&heightmap, false).unwrap(), Some(29));
	assert_eq!(part2_impl(&heightmap, true).unwrap(), Some(29));

	let heightmap = format!("{INPUT}\n").parse().unwrap();
	assert_eq!(part1_impl(&heightmap).unwrap(), Some(31));

	const WALLED: &str = indoc::indoc! { "
		Sac
		ccc
		ccE
	" };
	let heightmap = WALLED.parse().unwrap();
	assert_eq!(answer(part1_impl(&heightmap).unwrap()), "no path");
	assert_eq!(answer(part2_impl(&heightmap, false).unwrap()), "no path");
	assert_eq!(answer(part2_impl(&heightmap, true).unwrap()), "no path");
}
