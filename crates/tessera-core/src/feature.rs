//! Discovered features: connected cities and roads, and cloisters.
//!
//! A `Feature` is a snapshot taken by the resolver. It records every
//! (coordinate, bearing) edge occurrence that belongs to it and whether it
//! was complete at the moment it was resolved. It is never updated; resolve
//! again after the board changes.

use crate::coord::{Bearing, Coordinate};
use crate::tile::FeatureType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// One edge occurrence belonging to a feature.
///
/// `bearing` is `None` only for the single cell of a cloister, which sits in
/// the center of its tile rather than on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coordinate,
    pub bearing: Option<Bearing>,
}

impl Cell {
    /// A cell on a tile edge
    pub const fn edge(coord: Coordinate, bearing: Bearing) -> Self {
        Self {
            coord,
            bearing: Some(bearing),
        }
    }

    /// The center cell of a cloister tile
    pub const fn center(coord: Coordinate) -> Self {
        Self {
            coord,
            bearing: None,
        }
    }
}

/// How far a feature extends, by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Extent {
    /// City or road: edges with no matching neighbor
    Edges { open_ends: usize },
    /// Cloister: placed tiles among the eight surrounding cells
    Cloister { occupied: usize },
}

/// A connected city or road, or a single cloister
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    feature_type: FeatureType,
    cells: HashSet<Cell>,
    extent: Extent,
}

impl Feature {
    /// A city or road made of the given cells with `open_ends` dangling edges
    pub(crate) fn edges(feature_type: FeatureType, cells: HashSet<Cell>, open_ends: usize) -> Self {
        debug_assert!(!cells.is_empty());
        debug_assert!(feature_type != FeatureType::Cloister);
        Self {
            feature_type,
            cells,
            extent: Extent::Edges { open_ends },
        }
    }

    /// A cloister at `coord` with `occupied` of its eight surrounding cells filled
    pub(crate) fn cloister(coord: Coordinate, occupied: usize) -> Self {
        Self {
            feature_type: FeatureType::Cloister,
            cells: HashSet::from([Cell::center(coord)]),
            extent: Extent::Cloister { occupied },
        }
    }

    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    /// Every edge occurrence belonging to this feature
    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    /// Distinct coordinates this feature touches, sorted
    pub fn coordinates(&self) -> BTreeSet<Coordinate> {
        self.cells.iter().map(|cell| cell.coord).collect()
    }

    /// Tile count used for scoring.
    ///
    /// For a city or road, the number of distinct tiles it spans. For a
    /// cloister, the number of occupied surrounding tiles (0-8); the
    /// cloister's own tile is not counted.
    pub fn number_of_tiles(&self) -> usize {
        match self.extent {
            Extent::Edges { .. } => self.coordinates().len(),
            Extent::Cloister { occupied } => occupied,
        }
    }

    /// Whether the feature is finished.
    ///
    /// A city or road is complete when none of its edges is open; a cloister
    /// when all eight surrounding cells hold a tile.
    pub fn is_complete(&self) -> bool {
        match self.extent {
            Extent::Edges { open_ends } => open_ends == 0,
            Extent::Cloister { occupied } => occupied == 8,
        }
    }

    /// Number of edges facing empty space or a mismatched face (always 0 for cloisters)
    pub fn open_ends(&self) -> usize {
        match self.extent {
            Extent::Edges { open_ends } => open_ends,
            Extent::Cloister { .. } => 0,
        }
    }

    /// True iff this exact (coordinate, bearing) edge belongs to the feature
    pub fn contains(&self, coord: Coordinate, bearing: Bearing) -> bool {
        self.cells.contains(&Cell::edge(coord, bearing))
    }

    /// True if both features share any cell, i.e. they are the same physical feature
    pub fn overlaps(&self, other: &Feature) -> bool {
        self.feature_type == other.feature_type && !self.cells.is_disjoint(&other.cells)
    }
}
