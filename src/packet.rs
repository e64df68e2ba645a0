// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! Nested integer lists and their ordering.

use std::cmp::Ordering;


#[derive(Clone, Debug)]
pub enum NestedValue {
	Scalar(u32),
	Sequence(Vec<NestedValue>),
}

/// Scalars compare numerically, sequences lexicographically (a prefix being
/// less), and a scalar compared to a sequence is treated as a one-element
/// sequence.
pub fn compare(left: &NestedValue, right: &NestedValue) -> Ordering {
	use NestedValue::*;
	match (left, right) {
		(Scalar(left), Scalar(right)) => left.cmp(right),
		(Sequence(left), Sequence(right)) => left.iter().cmp(right.iter()),
		(Scalar(_), Sequence(right)) => std::slice::from_ref(left).iter().cmp(right.iter()),
		(Sequence(left), Scalar(_)) => left.iter().cmp(std::slice::from_ref(right).iter()),
	}
}

impl Ord for NestedValue {
	fn cmp(&self, other: &Self) -> Ordering {
		compare(self, other)
	}
}

impl PartialOrd for NestedValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

// Equality follows `compare`, so `5` equals `[5]` (and `[[5]]`).
impl PartialEq for NestedValue {
	fn eq(&self, other: &Self) -> bool {
		compare(self, other).is_eq()
	}
}

impl Eq for NestedValue {}

impl std::fmt::Display for NestedValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use itertools::Itertools as _;
		match self {
			NestedValue::Scalar(int) => write!(f, "{int}"),
			NestedValue::Sequence(values) => write!(f, "[{}]", values.iter().format(",")),
		}
	}
}


/// A top-level list, one per line of input.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Packet(pub Vec<NestedValue>);

impl From<Packet> for NestedValue {
	fn from(packet: Packet) -> Self {
		NestedValue::Sequence(packet.0)
	}
}

impl std::fmt::Display for Packet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use itertools::Itertools as _;
		write!(f, "[{}]", self.0.iter().format(","))
	}
}


pub use parsing::{ValueError, PacketError, PacketsError, packet_pairs_from_str};

mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{NestedValue, Packet};

	#[derive(Debug)]
	pub enum ValueError {
		Int { column: usize, source: ParseIntError },
		InvalidByte { column: usize, found: u8 },
		TrailingInput { column: usize },
		EndOfString,
	}

	impl std::fmt::Display for ValueError {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			match self {
				ValueError::Int { column, source } => write!(f, "column {column}: {source}"),
				ValueError::InvalidByte { column, found } =>
					write!(f, "column {column}: unexpected {:?}", *found as char),
				ValueError::TrailingInput { column } =>
					write!(f, "column {column}: input continues after value"),
				ValueError::EndOfString => write!(f, "unexpected end of input"),
			}
		}
	}

	impl std::error::Error for ValueError {
		fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
			match self {
				ValueError::Int { source, .. } => Some(source),
				_ => None,
			}
		}
	}

	impl FromStr for NestedValue {
		type Err = ValueError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use ValueError as E;

			let bytes = s.as_bytes();
			// Open lists, innermost last
			let mut stack: Vec<Vec<NestedValue>> = vec![];
			let mut complete = None;
			let mut c = 0;

			while c < bytes.len() {
				if complete.is_some() { return Err(E::TrailingInput { column: c + 1 }) }

				let value = match bytes[c] {
					b'[' => {
						stack.push(vec![]);
						c += 1;
						continue
					}
					b']' if !stack.is_empty() => {
						c += 1;
						NestedValue::Sequence(stack.pop().unwrap_or_default())
					}
					b'0'..=b'9' => {
						let len = bytes[c..].iter().take_while(|b| b.is_ascii_digit()).count();
						let int = s[c..c + len].parse()
							.map_err(|e| E::Int { column: c + 1, source: e })?;
						c += len;
						NestedValue::Scalar(int)
					}
					found => return Err(E::InvalidByte { column: c + 1, found }),
				};

				let Some(values) = stack.last_mut() else {
					complete = Some(value);
					continue
				};
				values.push(value);

				match bytes.get(c) {
					Some(b',') => match bytes.get(c + 1) {
						Some(b'[' | b'0'..=b'9') => c += 1,
						Some(&found) => return Err(E::InvalidByte { column: c + 2, found }),
						None => return Err(E::EndOfString),
					},
					Some(b']') => (),
					Some(&found) => return Err(E::InvalidByte { column: c + 1, found }),
					None => return Err(E::EndOfString),
				}
			}

			complete.ok_or(E::EndOfString)
		}
	}

	#[derive(Debug)]
	pub enum PacketError {
		NotAList,
		Value(ValueError),
	}

	impl std::fmt::Display for PacketError {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			match self {
				PacketError::NotAList => write!(f, "packet is not a list"),
				PacketError::Value(e) => std::fmt::Display::fmt(e, f),
			}
		}
	}

	impl std::error::Error for PacketError {
		fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
			match self {
				PacketError::NotAList => None,
				PacketError::Value(e) => Some(e),
			}
		}
	}

	impl FromStr for Packet {
		type Err = PacketError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if !s.starts_with('[') { return Err(PacketError::NotAList) }
			match s.parse().map_err(PacketError::Value)? {
				NestedValue::Sequence(values) => Ok(Packet(values)),
				NestedValue::Scalar(_) => Err(PacketError::NotAList),
			}
		}
	}

	#[derive(Debug)]
	pub enum PacketsError {
		Packet { line: usize, source: PacketError },
		/// A blank-line separated group that does not hold exactly two packets.
		Unpaired { line: usize, found: usize },
	}

	impl std::fmt::Display for PacketsError {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			match self {
				PacketsError::Packet { line, source } => write!(f, "line {line}: {source}"),
				PacketsError::Unpaired { line, found } =>
					write!(f, "line {line}: expected a pair of packets, found {found}"),
			}
		}
	}

	impl std::error::Error for PacketsError {
		fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
			match self {
				PacketsError::Packet { source, .. } => Some(source),
				PacketsError::Unpaired { .. } => None,
			}
		}
	}

	/// Parses pairs of packets, one per line, with pairs separated by blank lines.
	pub fn packet_pairs_from_str(s: &str) -> Result<Vec<[Packet; 2]>, PacketsError> {
		let mut pairs = vec![];
		let mut group = vec![];
		let mut group_line = 1;

		let mut flush = |group: &mut Vec<Packet>, line: usize| -> Result<(), PacketsError> {
			match <[Packet; 2]>::try_from(std::mem::take(group)) {
				Ok(pair) => { pairs.push(pair); Ok(()) }
				Err(group) if group.is_empty() => Ok(()),
				Err(group) => Err(PacketsError::Unpaired { line, found: group.len() }),
			}
		};

		for (l, line) in s.lines().enumerate() {
			if line.is_empty() {
				flush(&mut group, group_line)?;
				group_line = l + 2;
				continue
			}
			group.push(line.parse()
				.map_err(|e| PacketsError::Packet { line: l + 1, source: e })?);
		}
		flush(&mut group, group_line)?;

		Ok(pairs)
	}
}
