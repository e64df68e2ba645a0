// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use advent22_core::packet::{NestedValue, Packet, packet_pairs_from_str};


fn part1_impl(pairs: &[[Packet; 2]]) -> usize {
	pairs.iter()
		.enumerate()
		.filter_map(|(i, [left, right])| (left < right).then_some(i + 1))
		.sum()
}


fn divider(int: u32) -> Packet {
	Packet(vec![NestedValue::Sequence(vec![NestedValue::Scalar(int)])])
}

fn part2_impl(pairs: Vec<[Packet; 2]>) -> usize {
	use itertools::Itertools as _;
	pairs.into_iter()
		.flatten()
		.map(|packet| (packet, false))
		// Stable sort, so dividers come after any equal packet
		.chain([divider(2), divider(6)].map(|packet| (packet, true)))
		.sorted_by(|(left, _), (right, _)| left.cmp(right))
		.enumerate()
		.filter_map(|(i, (_, is_divider))| is_divider.then_some(i + 1))
		.product()
}


pub(crate) fn run(input: &str, _args: &crate::Args) -> Result<[String; 2], Box<dyn std::error::Error>> {
	let pairs = packet_pairs_from_str(input)?;
	tracing::info!("{} packet pairs", pairs.len());
	Ok([part1_impl(&pairs).to_string(), part2_impl(pairs).to_string()])
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		[1,1,3,1,1]
		[1,1,5,1,1]

		[[1],[2,3,4]]
		[[1],4]

		[9]
		[[8,7,6]]

		[[4,4],4,4]
		[[4,4],4,4,4]

		[7,7,7,7]
		[7,7,7]

		[]
		[3]

		[[[]]]
		[[]]

		[1,[2,[3,[4,[5,6,7]]]],8,9]
		[1,[2,[3,[4,[5,6,0]]]],8,9]
	" };
	let pairs = packet_pairs_from_str(INPUT).unwrap();
	assert_eq!(part1_impl(&pairs), 13);
	assert_eq!(part2_impl(pairs), 140);

	let pairs = packet_pairs_from_str("[[2]]\n[3]\n").unwrap();
	assert_eq!(part1_impl(&pairs), 1);
	assert_eq!(part2_impl(pairs), 2 * 4);
}
