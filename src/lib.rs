// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! The two algorithmic pieces of the 2022 puzzles: fewest-steps searches over a
//! heightmap (day 12), and the ordering of nested integer lists (day 13).

pub mod heightmap;
pub mod packet;
