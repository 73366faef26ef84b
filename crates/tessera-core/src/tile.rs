//! Tile representation: edge faces, internal connectivity, and rotation.
//!
//! A tile has four faces (North/East/South/West), each carrying City, Road or
//! Grass, and optionally a cloister in its center. Faces of the same type that
//! are joined inside the tile form a *segment*; a feature entering the tile on
//! one bearing of a segment continues out through every other bearing of it.

use crate::coord::{Bearing, Bearings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What occupies one edge of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Part of a city
    City,
    /// A road leaving through this edge
    Road,
    /// Nothing scorable
    Grass,
}

impl Face {
    /// The scorable feature this face belongs to, if any
    pub fn feature_type(&self) -> Option<FeatureType> {
        match self {
            Face::City => Some(FeatureType::City),
            Face::Road => Some(FeatureType::Road),
            Face::Grass => None,
        }
    }
}

/// Kind of scorable feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureType {
    City,
    Road,
    Cloister,
}

/// Errors from declaring a tile's internal connectivity
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TileError {
    #[error("Segment has no bearings")]
    EmptySegment,

    #[error("Segment includes the grass face at {0}")]
    GrassInSegment(Bearing),

    #[error("Segment joins faces of different types")]
    MixedSegment,

    #[error("Bearing {0} belongs to more than one segment")]
    OverlappingSegments(Bearing),
}

/// A tile as it lies on the board, rotation already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTile", into = "RawTile")]
pub struct Tile {
    /// Faces indexed by [`Bearing::index`]
    faces: [Face; 4],
    /// Whether a cloister sits in the center
    cloister: bool,
    /// Groups of same-type bearings joined inside the tile
    segments: Vec<Bearings>,
}

impl Tile {
    /// Create a tile with the default connectivity.
    ///
    /// All city faces form one city. Exactly two road faces form one road
    /// passing through; any other number of road faces meet at a junction,
    /// so each of them ends on this tile.
    pub fn new(faces: [Face; 4], cloister: bool) -> Self {
        let segments = default_segments(&faces);
        Self {
            faces,
            cloister,
            segments,
        }
    }

    /// Create a tile with explicitly declared segments.
    ///
    /// Non-grass faces not named by any segment become single-edge segments.
    pub fn with_segments(
        faces: [Face; 4],
        cloister: bool,
        mut segments: Vec<Bearings>,
    ) -> Result<Self, TileError> {
        let mut covered = Bearings::EMPTY;

        for segment in &segments {
            let first = segment.iter().next().ok_or(TileError::EmptySegment)?;
            let face = faces[first.index()];

            for bearing in segment.iter() {
                let this_face = faces[bearing.index()];
                if this_face == Face::Grass {
                    return Err(TileError::GrassInSegment(bearing));
                }
                if this_face != face {
                    return Err(TileError::MixedSegment);
                }
                if covered.contains(bearing) {
                    return Err(TileError::OverlappingSegments(bearing));
                }
                covered.insert(bearing);
            }
        }

        for bearing in Bearing::ALL {
            if faces[bearing.index()] != Face::Grass && !covered.contains(bearing) {
                segments.push(Bearings::of(&[bearing]));
            }
        }

        Ok(Self {
            faces,
            cloister,
            segments,
        })
    }

    /// Face on the given edge
    pub fn face(&self, bearing: Bearing) -> Face {
        self.faces[bearing.index()]
    }

    /// Whether a cloister sits in the center of this tile
    pub fn has_cloister(&self) -> bool {
        self.cloister
    }

    /// Internal segments of this tile
    pub fn segments(&self) -> &[Bearings] {
        &self.segments
    }

    /// Bearings joined with `bearing` inside this tile, itself included.
    ///
    /// Empty for a grass face.
    pub fn connected(&self, bearing: Bearing) -> Bearings {
        self.segments
            .iter()
            .find(|segment| segment.contains(bearing))
            .copied()
            .unwrap_or(Bearings::EMPTY)
    }

    /// Whether this tile has anything to score: a city, a road, or a cloister
    pub fn has_features(&self) -> bool {
        self.cloister || self.faces.iter().any(|face| *face != Face::Grass)
    }

    /// Rotate clockwise by the given number of quarter turns.
    ///
    /// The North face moves to East after one turn.
    pub fn rotated(&self, quarter_turns: u8) -> Tile {
        let mut faces = [Face::Grass; 4];
        for bearing in Bearing::ALL {
            faces[bearing.rotated_clockwise(quarter_turns).index()] = self.faces[bearing.index()];
        }

        Tile {
            faces,
            cloister: self.cloister,
            segments: self
                .segments
                .iter()
                .map(|segment| segment.rotated_clockwise(quarter_turns))
                .collect(),
        }
    }
}

fn default_segments(faces: &[Face; 4]) -> Vec<Bearings> {
    let with_face = |face: Face| -> Bearings {
        Bearing::ALL
            .into_iter()
            .filter(|b| faces[b.index()] == face)
            .collect()
    };

    let mut segments = Vec::new();

    let cities = with_face(Face::City);
    if !cities.is_empty() {
        segments.push(cities);
    }

    let roads = with_face(Face::Road);
    if roads.len() == 2 {
        segments.push(roads);
    } else {
        segments.extend(roads.iter().map(|b| Bearings::of(&[b])));
    }

    segments
}

/// Wire form of a tile; `segments` may be omitted to use the default connectivity
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTile {
    faces: [Face; 4],
    #[serde(default)]
    cloister: bool,
    #[serde(default)]
    segments: Option<Vec<Bearings>>,
}

impl TryFrom<RawTile> for Tile {
    type Error = TileError;

    fn try_from(raw: RawTile) -> Result<Self, Self::Error> {
        match raw.segments {
            Some(segments) => Tile::with_segments(raw.faces, raw.cloister, segments),
            None => Ok(Tile::new(raw.faces, raw.cloister)),
        }
    }
}

impl From<Tile> for RawTile {
    fn from(tile: Tile) -> Self {
        RawTile {
            faces: tile.faces,
            cloister: tile.cloister,
            segments: Some(tile.segments),
        }
    }
}
