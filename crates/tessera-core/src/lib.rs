//! Tessera - feature resolution and scoring for a Carcassonne-style tile game
//!
//! This crate provides the rules engine for a tile-placement board game:
//! - Coordinate system and bearings for the square tile grid
//! - Tiles with edge faces, internal connectivity, and rotation
//! - The board, with placement validation
//! - Feature resolution: walking connected cities and roads across tiles
//! - Scoring of a placement
//!
//! # Architecture
//!
//! Resolution and scoring read the board only through the [`TileMap`] trait,
//! so they work on any tile storage. The engine is pure computation and never
//! mutates the board it scores. It can be compiled to:
//! - Native Rust for servers and tools
//! - WebAssembly for in-browser scoring (feature `wasm`)
//!
//! # Modules
//!
//! - [`coord`]: Coordinates and bearings
//! - [`tile`]: Tile faces, segments and rotation
//! - [`board`]: Board storage and placement rules
//! - [`feature`]: Discovered features and their completion state
//! - [`resolver`]: Graph traversal that discovers features
//! - [`scoring`]: Point rules for a placement
//! - [`catalog`]: Base game tiles and the draw deck

pub mod board;
pub mod catalog;
pub mod coord;
pub mod feature;
pub mod resolver;
pub mod scoring;
pub mod tile;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardJson, PlacementError, TileJson, TileMap};
pub use catalog::{Deck, TileKind, STARTING_TILE};
pub use coord::{Bearing, Bearings, Coordinate};
pub use feature::{Cell, Feature};
pub use resolver::{create_cloister, create_feature, create_features, FeatureError};
pub use scoring::{
    calculate_score, dedup_features, feature_points, score_placement, FeatureScore, PlacementScore,
};
pub use tile::{Face, FeatureType, Tile, TileError};
