//! Square grid coordinate system.
//!
//! This module provides the foundational position types for the tile grid:
//! - `Coordinate`: Identifies the cell a tile is placed on
//! - `Bearing`: One of the four edges of a tile (and the direction to its neighbor)
//! - `Bearings`: A compact set of bearings, used for a tile's internal connectivity
//!
//! North increases `y`, East increases `x`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four edges of a square tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bearing {
    /// Top edge
    North,
    /// Right edge
    East,
    /// Bottom edge
    South,
    /// Left edge
    West,
}

impl Bearing {
    /// All bearings in clockwise order starting from North
    pub const ALL: [Bearing; 4] = [Bearing::North, Bearing::East, Bearing::South, Bearing::West];

    /// The edge a neighboring tile presents towards this one
    pub const fn opposite(self) -> Bearing {
        match self {
            Bearing::North => Bearing::South,
            Bearing::East => Bearing::West,
            Bearing::South => Bearing::North,
            Bearing::West => Bearing::East,
        }
    }

    /// Rotate clockwise by the given number of quarter turns
    pub const fn rotated_clockwise(self, quarter_turns: u8) -> Bearing {
        Self::ALL[(self.index() + quarter_turns as usize) % 4]
    }

    /// Position in [`Bearing::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bearing::North => "north",
            Bearing::East => "east",
            Bearing::South => "south",
            Bearing::West => "west",
        };
        f.write_str(name)
    }
}

/// Position of a tile on the board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Coordinate {
    /// Column (increases going east)
    pub x: i32,
    /// Row (increases going north)
    pub y: i32,
}

impl Coordinate {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Get the neighbor across a specific edge.
    ///
    /// `None` past the edge of the `i32` grid.
    pub fn neighbor(&self, bearing: Bearing) -> Option<Coordinate> {
        match bearing {
            Bearing::North => self.offset(0, 1),
            Bearing::East => self.offset(1, 0),
            Bearing::South => self.offset(0, -1),
            Bearing::West => self.offset(-1, 0),
        }
    }

    /// The edge-sharing neighbors in clockwise order starting from North
    pub fn neighbors(&self) -> impl Iterator<Item = Coordinate> {
        let origin = *self;
        Bearing::ALL
            .into_iter()
            .filter_map(move |bearing| origin.neighbor(bearing))
    }

    /// Surrounding cells, diagonals included (eight away from the grid edge)
    pub fn surrounding(&self) -> impl Iterator<Item = Coordinate> {
        const OFFSETS: [(i32, i32); 8] = [
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 1),
        ];

        let origin = *self;
        OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| origin.offset(dx, dy))
    }

    fn offset(&self, dx: i32, dy: i32) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
        ))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A set of bearings stored as a bit mask.
///
/// Serialized as a list of bearings so board files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Bearing>", into = "Vec<Bearing>")]
pub struct Bearings(u8);

impl Bearings {
    /// The empty set
    pub const EMPTY: Bearings = Bearings(0);

    /// Build a set from a slice of bearings
    pub fn of(bearings: &[Bearing]) -> Self {
        bearings.iter().copied().collect()
    }

    pub fn contains(&self, bearing: Bearing) -> bool {
        self.0 & bearing.bit() != 0
    }

    pub fn insert(&mut self, bearing: Bearing) {
        self.0 |= bearing.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in clockwise order starting from North
    pub fn iter(&self) -> impl Iterator<Item = Bearing> + '_ {
        Bearing::ALL.into_iter().filter(|b| self.contains(*b))
    }

    /// Rotate every member clockwise by the given number of quarter turns
    pub fn rotated_clockwise(&self, quarter_turns: u8) -> Bearings {
        self.iter().map(|b| b.rotated_clockwise(quarter_turns)).collect()
    }
}

impl FromIterator<Bearing> for Bearings {
    fn from_iter<I: IntoIterator<Item = Bearing>>(iter: I) -> Self {
        let mut set = Bearings::EMPTY;
        for bearing in iter {
            set.insert(bearing);
        }
        set
    }
}

impl From<Vec<Bearing>> for Bearings {
    fn from(bearings: Vec<Bearing>) -> Self {
        bearings.into_iter().collect()
    }
}

impl From<Bearings> for Vec<Bearing> {
    fn from(set: Bearings) -> Self {
        set.iter().collect()
    }
}
