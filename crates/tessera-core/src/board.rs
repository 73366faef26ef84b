//! Board representation: placed tiles indexed by coordinate.
//!
//! This module contains:
//! - The `TileMap` accessor trait the feature resolver reads through
//! - The `Board` itself, with placement validation
//! - Placement boundary queries (open positions, valid rotations)
//! - A JSON-friendly board representation

use crate::coord::{Bearing, Coordinate};
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Read access to placed tiles.
///
/// Feature resolution and scoring only ever ask "which tile is here, if any",
/// so anything that can answer that can be scored.
pub trait TileMap {
    /// The tile placed at `coord`, or `None` for empty space
    fn tile_at(&self, coord: Coordinate) -> Option<&Tile>;
}

/// Reasons a tile cannot be placed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlacementError {
    #[error("A tile is already placed at {0}")]
    Occupied(Coordinate),

    #[error("Position {0} does not touch any placed tile")]
    NotAdjacent(Coordinate),

    #[error("Face on the {bearing} edge does not match the neighboring tile")]
    EdgeMismatch { bearing: Bearing },
}

/// The game board
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// All placed tiles indexed by coordinate
    tiles: HashMap<Coordinate, Tile>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    /// Create a board with a single tile at the origin
    pub fn with_starting_tile(tile: Tile) -> Self {
        let mut board = Self::new();
        board.tiles.insert(Coordinate::default(), tile);
        board
    }

    /// Build a board directly from a coordinate to tile mapping.
    ///
    /// No placement rule is checked, which makes this the way to set up
    /// fixtures that could never arise in play (mismatched edges, islands).
    pub fn from_tiles<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = (Coordinate, Tile)>,
    {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    // ==================== Query Methods ====================

    /// Get the tile at a coordinate
    pub fn get_tile(&self, coord: &Coordinate) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// Iterate over all placed tiles
    pub fn tiles(&self) -> impl Iterator<Item = (&Coordinate, &Tile)> {
        self.tiles.iter()
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Empty positions edge-adjacent to at least one placed tile, sorted.
    ///
    /// On an empty board the origin is the only open position.
    pub fn open_positions(&self) -> Vec<Coordinate> {
        if self.tiles.is_empty() {
            return vec![Coordinate::default()];
        }

        let mut open = HashSet::new();
        for coord in self.tiles.keys() {
            for neighbor in coord.neighbors() {
                if !self.tiles.contains_key(&neighbor) {
                    open.insert(neighbor);
                }
            }
        }

        let mut open: Vec<Coordinate> = open.into_iter().collect();
        open.sort();
        open
    }

    // ==================== Validation Methods ====================

    /// Check whether `tile` may be placed at `coord` as it is currently rotated.
    ///
    /// Rules:
    /// 1. Position must be empty
    /// 2. Position must touch a placed tile, unless the board is empty
    /// 3. Every face touching a neighbor must match the neighbor's opposite face
    pub fn can_place(&self, coord: Coordinate, tile: &Tile) -> Result<(), PlacementError> {
        if self.tiles.contains_key(&coord) {
            return Err(PlacementError::Occupied(coord));
        }
        if self.tiles.is_empty() {
            return Ok(());
        }

        let mut has_neighbor = false;
        for bearing in Bearing::ALL {
            let Some(neighbor) = coord.neighbor(bearing).and_then(|c| self.tiles.get(&c)) else {
                continue;
            };

            has_neighbor = true;
            if neighbor.face(bearing.opposite()) != tile.face(bearing) {
                return Err(PlacementError::EdgeMismatch { bearing });
            }
        }

        if has_neighbor {
            Ok(())
        } else {
            Err(PlacementError::NotAdjacent(coord))
        }
    }

    /// Quarter turns (0-3) under which `tile` fits at `coord`
    pub fn valid_rotations(&self, coord: Coordinate, tile: &Tile) -> Vec<u8> {
        (0..4u8)
            .filter(|turns| self.can_place(coord, &tile.rotated(*turns)).is_ok())
            .collect()
    }

    /// Check if a tile fits anywhere on the board under some rotation
    pub fn has_valid_placement(&self, tile: &Tile) -> bool {
        self.open_positions()
            .into_iter()
            .any(|coord| !self.valid_rotations(coord, tile).is_empty())
    }

    // ==================== Mutation Methods ====================

    /// Place a tile after validating it against the placement rules
    pub fn place(&mut self, coord: Coordinate, tile: Tile) -> Result<(), PlacementError> {
        self.can_place(coord, &tile)?;
        self.tiles.insert(coord, tile);
        Ok(())
    }

    /// Convert to a JSON-friendly representation with an array instead of a HashMap.
    /// This is needed because JSON doesn't support complex types as keys
    pub fn to_json_friendly(&self) -> BoardJson {
        let mut tiles: Vec<TileJson> = self
            .tiles
            .iter()
            .map(|(coord, tile)| TileJson {
                x: coord.x,
                y: coord.y,
                tile: tile.clone(),
            })
            .collect();
        tiles.sort_by_key(|t| (t.x, t.y));
        BoardJson { tiles }
    }
}

impl TileMap for Board {
    fn tile_at(&self, coord: Coordinate) -> Option<&Tile> {
        self.tiles.get(&coord)
    }
}

impl FromIterator<(Coordinate, Tile)> for Board {
    fn from_iter<I: IntoIterator<Item = (Coordinate, Tile)>>(iter: I) -> Self {
        Self::from_tiles(iter)
    }
}

/// JSON-friendly board representation with an array instead of a HashMap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardJson {
    pub tiles: Vec<TileJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
}

impl BoardJson {
    /// Rebuild the board. Later entries win when a coordinate repeats.
    pub fn into_board(self) -> Board {
        self.tiles
            .into_iter()
            .map(|t| (Coordinate::new(t.x, t.y), t.tile))
            .collect()
    }
}
