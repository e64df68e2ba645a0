// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! Fewest-steps searches over a heightmap where every step may climb at most
//! one level (but may descend any number of levels).


/// The height that [`Elevation::Goal`] stands in for (`z`).
pub const HIGHEST: u8 = 25;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Elevation {
	/// `S`; as high as `a`.
	Start,
	/// `E`; as high as `z`.
	Goal,
	/// `a` through `z` as `0..=25`.
	Level(u8),
}

impl Elevation {
	/// The height with the start and goal markers substituted.
	pub fn height(self) -> u8 {
		match self {
			Elevation::Start => 0,
			Elevation::Goal => HIGHEST,
			Elevation::Level(height) => height,
		}
	}

	fn is_lowest(self) -> bool {
		self.height() == 0
	}
}

/// Whether a single step from `from` onto `to` is allowed. Note that this is
/// directional: descending is always allowed, climbing only by one level.
pub fn is_climbable(from: Elevation, to: Elevation) -> bool {
	to.height() <= from.height() + 1
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
	pub row: usize,
	pub column: usize,
}

impl Pos {
	pub fn new(row: usize, column: usize) -> Self {
		Pos { row, column }
	}
}

impl std::fmt::Display for Pos {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{},{}", self.row, self.column)
	}
}


/// The immutable layout of a search problem. Searches never write to it; each
/// one allocates its own [`SearchState`].
#[derive(Debug)]
pub struct Heightmap {
	elevations: Vec<Elevation>,
	stride: usize,
	start: usize,
	goal: usize,
}

/// Per-run bookkeeping, indexed like the heightmap's cells.
struct SearchState {
	distances: Vec<Option<usize>>,
	visited: Vec<bool>,
}

impl SearchState {
	fn new(len: usize) -> Self {
		SearchState { distances: vec![None; len], visited: vec![false; len] }
	}
}

impl Heightmap {
	/// Builds a heightmap from row-major `elevations`, `width` cells per row.
	pub fn new(width: usize, elevations: Vec<Elevation>) -> Result<Self, HeightmapError> {
		use HeightmapError as E;
		if width == 0 || elevations.is_empty() { return Err(E::Empty) }
		if elevations.len() % width != 0 {
			return Err(E::NotRectangular { width, len: elevations.len() })
		}

		let pos = |i: usize| Pos::new(i / width, i % width);
		let (mut start, mut goal) = (None, None);
		for (i, elevation) in elevations.iter().enumerate() {
			match elevation {
				Elevation::Start if start.is_some() => return Err(E::DuplicateStart(pos(i))),
				Elevation::Start => start = Some(i),
				Elevation::Goal if goal.is_some() => return Err(E::DuplicateGoal(pos(i))),
				Elevation::Goal => goal = Some(i),
				Elevation::Level(height) if *height > HIGHEST =>
					return Err(E::InvalidLevel { pos: pos(i), found: *height }),
				Elevation::Level(_) => (),
			}
		}

		Ok(Heightmap {
			elevations,
			stride: width,
			start: start.ok_or(E::NoStart)?,
			goal: goal.ok_or(E::NoGoal)?,
		})
	}

	pub fn width(&self) -> usize {
		self.stride
	}

	pub fn height(&self) -> usize {
		self.elevations.len() / self.stride
	}

	pub fn start(&self) -> Pos {
		self.pos(self.start)
	}

	pub fn goal(&self) -> Pos {
		self.pos(self.goal)
	}

	pub fn elevation(&self, pos: Pos) -> Option<Elevation> {
		self.index(pos).map(|i| self.elevations[i])
	}

	fn index(&self, pos: Pos) -> Option<usize> {
		(pos.row < self.height() && pos.column < self.stride)
			.then(|| pos.row * self.stride + pos.column)
	}

	fn pos(&self, index: usize) -> Pos {
		Pos::new(index / self.stride, index % self.stride)
	}

	fn index_in_bounds(&self, pos: Pos) -> Result<usize, HeightmapError> {
		self.index(pos).ok_or(HeightmapError::OutOfBounds(pos))
	}

	/// Returns an [`Iterator`] over the (up to four) orthogonal neighbors of `index`.
	fn adjacent(&self, index: usize) -> impl Iterator<Item = usize> {
		let (s, len) = (self.stride, self.elevations.len());
		let above = (index >= s).then(|| index - s);
		let left = (index % s > 0).then(|| index - 1);
		let right = (index % s < s - 1).then(|| index + 1);
		let below = (index < len - s).then(|| index + s);
		[above, left, right, below].into_iter().flatten()
	}

	/// Neighbors that can be stepped onto from `index`.
	fn climbable_adjacent(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
		let from = self.elevations[index];
		self.adjacent(index).filter(move |&i| is_climbable(from, self.elevations[i]))
	}

	/// Neighbors from which `index` can be stepped onto.
	fn reaching_adjacent(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
		let to = self.elevations[index];
		self.adjacent(index).filter(move |&i| is_climbable(self.elevations[i], to))
	}

	/// All positions as low as `a`, the start included.
	pub fn positions_at_lowest_elevation(&self) -> impl Iterator<Item = Pos> + '_ {
		use itertools::Itertools as _;
		self.elevations.iter()
			.positions(|elevation| elevation.is_lowest())
			.map(|i| self.pos(i))
	}

	/// The fewest steps from `source` to the goal, or `None` if the goal
	/// cannot be reached from there. Fails if `source` lies outside the heightmap.
	pub fn find_shortest_path(&self, source: Pos) -> Result<Option<usize>, HeightmapError> {
		Ok(self.search(self.index_in_bounds(source)?, |_| false))
	}

	/// The fewest steps from whichever of `sources` is closest to the goal, or
	/// `None` if none of them reach it (or there are none).
	///
	/// Every source gets its own search, run in parallel. A search never steps
	/// onto another source: the path from that other source is always shorter.
	/// Fails, before searching at all, if any of `sources` lies outside the heightmap.
	pub fn find_shortest_path_from_any(&self, sources: impl IntoIterator<Item = Pos>)
	-> Result<Option<usize>, HeightmapError> {
		use rayon::prelude::{IntoParallelIterator as _, ParallelIterator as _};

		let sources = sources.into_iter()
			.map(|pos| self.index_in_bounds(pos))
			.collect::<Result<Vec<_>, _>>()?;
		let mut is_source = vec![false; self.elevations.len()];
		for &i in &sources { is_source[i] = true }

		tracing::debug!("Finding the shortest path for {} sources", sources.len());

		let is_source = &is_source;
		Ok(sources.into_par_iter()
			.filter_map(|from| {
				tracing::trace!("Finding the shortest path from {}", self.pos(from));
				self.search(from, move |i| i != from && is_source[i])
			})
			.min())
	}

	/// Breadth-first search; with every step costing one, the FIFO frontier
	/// always yields the unvisited cell with the fewest known steps.
	fn search(&self, from: usize, is_pruned: impl Fn(usize) -> bool) -> Option<usize> {
		use std::collections::VecDeque;

		let mut state = SearchState::new(self.elevations.len());
		let mut frontier = VecDeque::new();
		state.distances[from] = Some(0);
		frontier.push_back((from, 0));

		while let Some((current, steps)) = frontier.pop_front() {
			if std::mem::replace(&mut state.visited[current], true) { continue }

			tracing::trace!("{} @ {steps}: {:?}", self.pos(current), self.elevations[current]);

			if current == self.goal { return Some(steps) }

			for next in self.climbable_adjacent(current) {
				if state.visited[next] || is_pruned(next) { continue }
				if state.distances[next].map_or(true, |known| known > steps + 1) {
					state.distances[next] = Some(steps + 1);
					frontier.push_back((next, steps + 1));
				}
			}
		}

		None
	}

	/// One backwards search from the goal, yielding the fewest steps to the goal
	/// from every position at once.
	pub fn steps_to_goal(&self) -> StepsToGoal {
		use std::collections::VecDeque;

		let mut state = SearchState::new(self.elevations.len());
		let mut frontier = VecDeque::new();
		frontier.push_back((self.goal, 0));

		while let Some((current, steps)) = frontier.pop_front() {
			if std::mem::replace(&mut state.visited[current], true) { continue }
			state.distances[current] = Some(steps);
			for prev in self.reaching_adjacent(current) {
				if !state.visited[prev] { frontier.push_back((prev, steps + 1)) }
			}
		}

		StepsToGoal { steps: state.distances, stride: self.stride }
	}
}


/// Result of [`Heightmap::steps_to_goal`].
pub struct StepsToGoal {
	steps: Vec<Option<usize>>,
	stride: usize,
}

impl StepsToGoal {
	/// `None` if the goal cannot be reached from `pos` (or `pos` lies outside the heightmap).
	pub fn get(&self, pos: Pos) -> Option<usize> {
		if pos.column >= self.stride { return None }
		self.steps.get(pos.row * self.stride + pos.column).copied().flatten()
	}

	/// Like [`Heightmap::find_shortest_path_from_any`].
	pub fn min_from_any(&self, sources: impl IntoIterator<Item = Pos>) -> Option<usize> {
		sources.into_iter().filter_map(|pos| self.get(pos)).min()
	}
}


#[derive(Debug)]
pub enum HeightmapError {
	Empty,
	NotRectangular { width: usize, len: usize },
	LineLen { line: usize, len: usize, found: usize },
	InvalidByte { line: usize, column: usize, found: u8 },
	InvalidLevel { pos: Pos, found: u8 },
	OutOfBounds(Pos),
	DuplicateStart(Pos),
	DuplicateGoal(Pos),
	NoStart,
	NoGoal,
}

impl std::fmt::Display for HeightmapError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use HeightmapError::*;
		match self {
			Empty => write!(f, "empty heightmap"),
			NotRectangular { width, len } =>
				write!(f, "{len} cells do not fill rows of width {width}"),
			LineLen { line, len, found } =>
				write!(f, "line {line}: expected {len} cells, found {found}"),
			InvalidByte { line, column, found } =>
				write!(f, "line {line}, column {column}: invalid elevation {:?}", *found as char),
			InvalidLevel { pos, found } =>
				write!(f, "{pos}: level {found} above {HIGHEST}"),
			OutOfBounds(pos) => write!(f, "{pos}: outside the heightmap"),
			DuplicateStart(pos) => write!(f, "{pos}: second start marker"),
			DuplicateGoal(pos) => write!(f, "{pos}: second goal marker"),
			NoStart => write!(f, "no start marker"),
			NoGoal => write!(f, "no goal marker"),
		}
	}
}

impl std::error::Error for HeightmapError {}


mod parsing {
	use std::str::FromStr;
	use super::{Elevation, Heightmap, HeightmapError};

	impl FromStr for Heightmap {
		type Err = HeightmapError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut elevations = vec![];
			let mut width = None;

			// Trailing blank lines end the input
			let s = s.trim_end_matches(&['\n', '\r'][..]);
			for (l, line) in s.lines().enumerate() {
				match width {
					None => width = Some(line.len()),
					Some(len) if line.len() != len =>
						return Err(HeightmapError::LineLen { line: l + 1, len, found: line.len() }),
					Some(_) => (),
				}

				for (c, b) in line.bytes().enumerate() {
					elevations.push(match b {
						b'S' => Elevation::Start,
						b'E' => Elevation::Goal,
						b'a'..=b'z' => Elevation::Level(b - b'a'),
						found => return Err(HeightmapError::InvalidByte {
							line: l + 1, column: c + 1, found }),
					});
				}
			}

			Heightmap::new(width.unwrap_or(0), elevations)
		}
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	const EXAMPLE: &str = indoc::indoc! { "
		Sabqponm
		abcryxxl
		accszExk
		acctuvwj
		abdefghi
	" };

	fn heightmap(s: &str) -> Heightmap {
		s.parse().unwrap()
	}

	#[test]
	fn example() {
		let heightmap = heightmap(EXAMPLE);
		assert_eq!(heightmap.start(), Pos::new(0, 0));
		assert_eq!(heightmap.goal(), Pos::new(2, 5));
		assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), Some(31));
		assert_eq!(heightmap.find_shortest_path_from_any(heightmap.positions_at_lowest_elevation()).unwrap(), Some(29));
		assert_eq!(heightmap.steps_to_goal().min_from_any(heightmap.positions_at_lowest_elevation()), Some(29));
	}

	#[test]
	fn repeated_searches_agree() {
		let heightmap = heightmap(EXAMPLE);
		let first = heightmap.find_shortest_path(heightmap.start()).unwrap();
		for _ in 0..3 {
			assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), first);
			assert_eq!(heightmap.find_shortest_path_from_any(heightmap.positions_at_lowest_elevation()).unwrap(), Some(29));
		}
	}

	#[test_case(Elevation::Level(0), Elevation::Level(1) => true)]
	#[test_case(Elevation::Level(1), Elevation::Level(0) => true)]
	#[test_case(Elevation::Level(0), Elevation::Level(2) => false)]
	#[test_case(Elevation::Level(25), Elevation::Level(0) => true)]
	#[test_case(Elevation::Start, Elevation::Level(1) => true)]
	#[test_case(Elevation::Start, Elevation::Level(2) => false)]
	#[test_case(Elevation::Level(23), Elevation::Goal => false)]
	#[test_case(Elevation::Level(24), Elevation::Goal => true)]
	#[test_case(Elevation::Level(3), Elevation::Start => true)]
	fn climbable(from: Elevation, to: Elevation) -> bool {
		is_climbable(from, to)
	}

	#[test]
	fn climbing_is_directional() {
		let heightmap = heightmap("SazzE\n");
		let [a, z] = [Pos::new(0, 1), Pos::new(0, 2)]
			.map(|pos| heightmap.elevation(pos).unwrap());
		assert!(is_climbable(z, a));
		assert!(!is_climbable(a, z));
		assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), None);
		assert_eq!(heightmap.find_shortest_path(Pos::new(0, 2)).unwrap(), Some(2));
	}

	#[test]
	fn cliff_blocks_only_the_climb() {
		let heightmap = heightmap(indoc::indoc! { "
			aaaaS
			zzzzz
			Eaaaa
		" });
		assert_eq!(heightmap.find_shortest_path(Pos::new(1, 4)).unwrap(), Some(5));
		assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), None);
	}

	#[test]
	fn walled_off_goal_is_unreachable() {
		let heightmap = heightmap(indoc::indoc! { "
			Saaaa
			accca
			acEca
			accca
			aaaaa
		" });
		assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), None);
		assert_eq!(heightmap.find_shortest_path_from_any(heightmap.positions_at_lowest_elevation()).unwrap(), None);
		assert_eq!(heightmap.steps_to_goal().get(heightmap.start()), None);
	}

	#[test]
	fn nearest_of_many_sources_wins() {
		let heightmap = heightmap(indoc::indoc! { "
			yyyyyyyyyyyyyE
			Saaaaaaaaaaaaa
		" });
		let [far, near] = [Pos::new(0, 3), Pos::new(0, 10)];
		assert_eq!(heightmap.find_shortest_path(far).unwrap(), Some(10));
		assert_eq!(heightmap.find_shortest_path(near).unwrap(), Some(3));
		assert_eq!(heightmap.find_shortest_path_from_any([far, near]).unwrap(), Some(3));
		assert_eq!(heightmap.find_shortest_path_from_any([near, far]).unwrap(), Some(3));
		assert_eq!(heightmap.steps_to_goal().min_from_any([far, near]), Some(3));
	}

	#[test]
	fn no_sources_means_no_path() {
		let heightmap = heightmap(EXAMPLE);
		assert_eq!(heightmap.find_shortest_path_from_any(Vec::<Pos>::new()).unwrap(), None);
	}

	#[test]
	fn uniform_grid_takes_manhattan_distance() {
		let heightmap = heightmap(indoc::indoc! { "
			zzzzz
			zzzzz
			zzzzz
			zzzzz
			SzzzE
		" });
		assert_eq!(heightmap.find_shortest_path(Pos::new(0, 0)).unwrap(), Some(8));
	}

	#[test]
	fn goal_counts_as_highest() {
		let heightmap = heightmap(indoc::indoc! { "
			Saaaa
			aaaaa
			aaaaa
			aaaaa
			aaaaE
		" });
		assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), None);
	}

	#[test]
	fn pruning_other_sources_keeps_minimum() {
		let heightmap = heightmap(EXAMPLE);
		let sources = heightmap.positions_at_lowest_elevation().collect::<Vec<_>>();
		let unpruned = sources.iter()
			.filter_map(|&pos| heightmap.find_shortest_path(pos).unwrap())
			.min();
		assert_eq!(heightmap.find_shortest_path_from_any(sources.iter().copied()).unwrap(), unpruned);
	}

	#[test]
	fn steps_to_goal_matches_forward_searches() {
		let heightmap = heightmap(EXAMPLE);
		let steps = heightmap.steps_to_goal();
		for row in 0..heightmap.height() {
			for column in 0..heightmap.width() {
				let pos = Pos::new(row, column);
				assert_eq!(steps.get(pos), heightmap.find_shortest_path(pos).unwrap(), "from {pos}");
			}
		}
	}

	#[test]
	fn source_outside_is_an_error() {
		let heightmap = heightmap(EXAMPLE);
		assert!(matches!(
			heightmap.find_shortest_path(Pos::new(5, 0)),
			Err(HeightmapError::OutOfBounds(Pos { row: 5, column: 0 }))));
		assert!(matches!(
			heightmap.find_shortest_path(Pos::new(0, 8)),
			Err(HeightmapError::OutOfBounds(Pos { row: 0, column: 8 }))));
		assert!(matches!(
			heightmap.find_shortest_path_from_any([heightmap.start(), Pos::new(9, 9)]),
			Err(HeightmapError::OutOfBounds(Pos { row: 9, column: 9 }))));
	}

	#[test]
	fn trailing_blank_lines() {
		let heightmap = heightmap("Sab\nabE\n\n");
		assert_eq!((heightmap.height(), heightmap.width()), (2, 3));
		assert_eq!(heightmap.goal(), Pos::new(1, 2));
		assert!("Sab\r\nabE\r\n\r\n".parse::<Heightmap>().is_ok());
		assert!(matches!(
			"Sab\n\nabE\n".parse::<Heightmap>(),
			Err(HeightmapError::LineLen { line: 2, len: 3, found: 0 })));
	}

	#[test]
	fn parse_errors() {
		macro_rules! assert_err { ( $s:expr, $pat:pat ) => {
			let result = $s.parse::<Heightmap>();
			assert!(matches!(result, Err($pat)), "{result:?}");
		} }
		assert_err!("", HeightmapError::Empty);
		assert_err!("Sab\nabcd\nabE\n", HeightmapError::LineLen { line: 2, len: 3, found: 4 });
		assert_err!("Sab\na.E\n", HeightmapError::InvalidByte { line: 2, column: 2, found: b'.' });
		assert_err!("SaS\nabE\n", HeightmapError::DuplicateStart(Pos { row: 0, column: 2 }));
		assert_err!("SaE\nEbc\n", HeightmapError::DuplicateGoal(Pos { row: 1, column: 0 }));
		assert_err!("aab\nabE\n", HeightmapError::NoStart);
		assert_err!("Sab\nabc\n", HeightmapError::NoGoal);
	}

	#[test]
	fn new_validates_shape() {
		use Elevation::*;
		assert!(matches!(
			Heightmap::new(2, vec![Start, Level(0), Goal]),
			Err(HeightmapError::NotRectangular { width: 2, len: 3 })));
		assert!(matches!(
			Heightmap::new(2, vec![Start, Level(26)]),
			Err(HeightmapError::InvalidLevel { found: 26, .. })));
		let heightmap = Heightmap::new(2, vec![Start, Level(1), Level(24), Goal]).unwrap();
		assert_eq!(heightmap.find_shortest_path(heightmap.start()).unwrap(), None);
		assert_eq!(heightmap.find_shortest_path(Pos::new(1, 0)).unwrap(), Some(1));
	}
}
