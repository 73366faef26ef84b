//! Feature resolution: walking the board to find the full extent of a feature.
//!
//! The board forms an implicit graph whose nodes are (coordinate, bearing)
//! edge occurrences. A node is joined to the other bearings of its tile's
//! segment, and to the opposite bearing of the neighboring tile when both
//! faces are of the same type. A feature is the connected component that
//! contains the starting node.

use crate::board::TileMap;
use crate::coord::{Bearing, Coordinate};
use crate::feature::{Cell, Feature};
use crate::tile::FeatureType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised when a resolution request is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FeatureError {
    #[error("No tile placed at {0}")]
    EmptyCoordinate(Coordinate),

    #[error("The {bearing} edge of the tile at {coord} is grass")]
    GrassFace { coord: Coordinate, bearing: Bearing },

    #[error("The tile at {0} has no city, road or cloister")]
    NoFeatures(Coordinate),
}

/// Resolve the feature that the `bearing` edge of the tile at `coord` belongs to.
///
/// City and road edges are traced across the board. A grass edge on a
/// cloister tile resolves to that cloister.
pub fn create_feature<M>(map: &M, coord: Coordinate, bearing: Bearing) -> Result<Feature, FeatureError>
where
    M: TileMap + ?Sized,
{
    let tile = map.tile_at(coord).ok_or(FeatureError::EmptyCoordinate(coord))?;
    if !tile.has_features() {
        return Err(FeatureError::NoFeatures(coord));
    }

    match tile.face(bearing).feature_type() {
        Some(feature_type) => Ok(trace_edges(map, coord, bearing, feature_type)),
        None if tile.has_cloister() => create_cloister(map, coord),
        None => Err(FeatureError::GrassFace { coord, bearing }),
    }
}

/// Resolve the cloister in the center of the tile at `coord`
pub fn create_cloister<M>(map: &M, coord: Coordinate) -> Result<Feature, FeatureError>
where
    M: TileMap + ?Sized,
{
    let tile = map.tile_at(coord).ok_or(FeatureError::EmptyCoordinate(coord))?;
    if !tile.has_cloister() {
        return Err(FeatureError::NoFeatures(coord));
    }

    let occupied = coord
        .surrounding()
        .filter(|neighbor| map.tile_at(*neighbor).is_some())
        .count();

    debug!(%coord, occupied, "resolved cloister");
    Ok(Feature::cloister(coord, occupied))
}

/// Resolve every distinct feature touched by the tile at `coord`.
///
/// Edges already covered by a feature found earlier in this call are not
/// traced again, so a city entering the tile twice yields one feature. A
/// cloister, if present, comes last. An all-grass tile yields no features.
pub fn create_features<M>(map: &M, coord: Coordinate) -> Result<Vec<Feature>, FeatureError>
where
    M: TileMap + ?Sized,
{
    let tile = map.tile_at(coord).ok_or(FeatureError::EmptyCoordinate(coord))?;

    let mut features: Vec<Feature> = Vec::new();
    for bearing in Bearing::ALL {
        let Some(feature_type) = tile.face(bearing).feature_type() else {
            continue;
        };
        if features.iter().any(|f| f.contains(coord, bearing)) {
            continue;
        }
        features.push(trace_edges(map, coord, bearing, feature_type));
    }

    if tile.has_cloister() {
        features.push(create_cloister(map, coord)?);
    }

    Ok(features)
}

/// Walk the feature graph from (start, bearing) over edges of `feature_type`
fn trace_edges<M>(
    map: &M,
    start: Coordinate,
    bearing: Bearing,
    feature_type: FeatureType,
) -> Feature
where
    M: TileMap + ?Sized,
{
    let mut cells: HashSet<Cell> = HashSet::new();
    let mut worklist = vec![Cell::edge(start, bearing)];

    while let Some(cell) = worklist.pop() {
        if !cells.insert(cell) {
            continue;
        }
        let Some(bearing) = cell.bearing else {
            continue;
        };
        let Some(tile) = map.tile_at(cell.coord) else {
            continue;
        };
        trace!(coord = %cell.coord, %bearing, "visit");

        // Other edges of the same segment on this tile
        for joined in tile.connected(bearing).iter() {
            let next = Cell::edge(cell.coord, joined);
            if !cells.contains(&next) {
                worklist.push(next);
            }
        }

        // Across the edge onto the neighboring tile
        let Some(neighbor) = cell.coord.neighbor(bearing) else {
            continue;
        };
        if shows(map, neighbor, bearing.opposite(), feature_type) {
            let next = Cell::edge(neighbor, bearing.opposite());
            if !cells.contains(&next) {
                worklist.push(next);
            }
        }
    }

    let open_ends = count_open_ends(map, &cells, feature_type);

    debug!(
        %start,
        %bearing,
        ?feature_type,
        cells = cells.len(),
        open_ends,
        "resolved feature"
    );
    Feature::edges(feature_type, cells, open_ends)
}

/// Count edges whose far side is empty, shows a different face, or was not
/// reached by the walk. Computed after the walk so the result does not
/// depend on visiting order.
fn count_open_ends<M>(map: &M, cells: &HashSet<Cell>, feature_type: FeatureType) -> usize
where
    M: TileMap + ?Sized,
{
    cells
        .iter()
        .filter_map(|cell| cell.bearing.map(|bearing| (cell.coord, bearing)))
        .filter(|(coord, bearing)| {
            let closed = coord.neighbor(*bearing).is_some_and(|neighbor| {
                shows(map, neighbor, bearing.opposite(), feature_type)
                    && cells.contains(&Cell::edge(neighbor, bearing.opposite()))
            });
            !closed
        })
        .count()
}

/// Whether a tile sits at `coord` with a `feature_type` face on `bearing`
fn shows<M>(map: &M, coord: Coordinate, bearing: Bearing, feature_type: FeatureType) -> bool
where
    M: TileMap + ?Sized,
{
    map.tile_at(coord)
        .is_some_and(|tile| tile.face(bearing).feature_type() == Some(feature_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::coord::Bearings;
    use crate::tile::Face::{City as C, Grass as G, Road as R};
    use crate::tile::Tile;

    fn at(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_two_tile_city_is_complete() {
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([C, G, G, G], false)),
            (at(0, 1), Tile::new([G, G, C, G], false)),
        ]);

        let feature = create_feature(&board, at(0, 1), Bearing::South).unwrap();
        assert_eq!(feature.feature_type(), FeatureType::City);
        assert_eq!(feature.cells().len(), 2);
        assert_eq!(feature.number_of_tiles(), 2);
        assert!(feature.is_complete());
    }

    #[test]
    fn test_open_edge_makes_feature_incomplete() {
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([C, G, G, G], false)),
            (at(0, 1), Tile::new([C, G, C, G], false)),
        ]);

        let feature = create_feature(&board, at(0, 0), Bearing::North).unwrap();
        assert_eq!(feature.number_of_tiles(), 2);
        assert_eq!(feature.open_ends(), 1);
        assert!(!feature.is_complete());
    }

    #[test]
    fn test_mismatched_neighbor_leaves_edge_open() {
        // Only constructible by bypassing placement rules
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([R, G, G, G], false)),
            (at(0, 1), Tile::new([G, G, C, G], false)),
        ]);

        let road = create_feature(&board, at(0, 0), Bearing::North).unwrap();
        assert_eq!(road.feature_type(), FeatureType::Road);
        assert_eq!(road.number_of_tiles(), 1);
        assert!(!road.is_complete());
    }

    #[test]
    fn test_junction_stops_road() {
        // Straight road into a T-junction
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([G, R, G, R], false)),
            (at(1, 0), Tile::new([R, G, R, R], false)),
        ]);

        let road = create_feature(&board, at(0, 0), Bearing::East).unwrap();
        assert_eq!(road.number_of_tiles(), 2);
        assert!(!road.contains(at(1, 0), Bearing::North));
        assert!(!road.contains(at(1, 0), Bearing::South));
        // Only the west end of the straight piece dangles
        assert_eq!(road.open_ends(), 1);
    }

    #[test]
    fn test_feature_at_grid_edge_stays_open() {
        // Stepping east from i32::MAX must not wrap to i32::MIN
        let board = Board::from_tiles([
            (at(i32::MAX, 0), Tile::new([G, C, G, G], false)),
            (at(i32::MIN, 0), Tile::new([G, G, G, C], false)),
        ]);

        let city = create_feature(&board, at(i32::MAX, 0), Bearing::East).unwrap();
        assert_eq!(city.number_of_tiles(), 1);
        assert_eq!(city.open_ends(), 1);
        assert!(!city.contains(at(i32::MIN, 0), Bearing::West));
    }

    #[test]
    fn test_cloister_at_grid_corner_counts_existing_cells() {
        let corner = at(i32::MAX, i32::MAX);
        let mut tiles = vec![(corner, Tile::new([G, G, G, G], true))];
        tiles.extend(corner.surrounding().map(|c| (c, Tile::new([G, G, G, G], false))));
        let board = Board::from_tiles(tiles);

        let cloister = create_cloister(&board, corner).unwrap();
        assert_eq!(cloister.number_of_tiles(), 3);
        assert!(!cloister.is_complete());
    }

    #[test]
    fn test_grass_edge_is_rejected() {
        let board = Board::from_tiles([(at(0, 0), Tile::new([C, G, G, G], false))]);
        assert_eq!(
            create_feature(&board, at(0, 0), Bearing::South),
            Err(FeatureError::GrassFace {
                coord: at(0, 0),
                bearing: Bearing::South
            })
        );
    }

    #[test]
    fn test_empty_coordinate_is_rejected() {
        let board = Board::new();
        assert_eq!(
            create_feature(&board, at(3, 3), Bearing::North),
            Err(FeatureError::EmptyCoordinate(at(3, 3)))
        );
        assert_eq!(
            create_features(&board, at(3, 3)),
            Err(FeatureError::EmptyCoordinate(at(3, 3)))
        );
    }

    #[test]
    fn test_featureless_tile_is_distinct_error() {
        let board = Board::from_tiles([(at(0, 0), Tile::new([G, G, G, G], false))]);
        assert_eq!(
            create_feature(&board, at(0, 0), Bearing::North),
            Err(FeatureError::NoFeatures(at(0, 0)))
        );
        assert_eq!(create_features(&board, at(0, 0)), Ok(vec![]));
    }

    #[test]
    fn test_grass_edge_of_cloister_tile_resolves_cloister() {
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([G, G, G, G], true)),
            (at(1, 1), Tile::new([G, G, G, G], false)),
        ]);

        let cloister = create_feature(&board, at(0, 0), Bearing::East).unwrap();
        assert_eq!(cloister.feature_type(), FeatureType::Cloister);
        assert_eq!(cloister.number_of_tiles(), 1);
        assert!(!cloister.is_complete());
    }

    #[test]
    fn test_create_features_separates_unjoined_cities() {
        let split = Tile::with_segments(
            [C, G, C, G],
            false,
            vec![Bearings::of(&[Bearing::North]), Bearings::of(&[Bearing::South])],
        )
        .unwrap();
        let board = Board::from_tiles([(at(0, 0), split)]);

        let features = create_features(&board, at(0, 0)).unwrap();
        assert_eq!(features.len(), 2);
        assert!(features.iter().all(|f| f.number_of_tiles() == 1));
        assert!(!features[0].overlaps(&features[1]));
    }

    #[test]
    fn test_create_features_merges_joined_edges() {
        // City N-W curve plus road E-S curve, with a cloister in the middle
        let board = Board::from_tiles([(at(0, 0), Tile::new([C, R, R, C], true))]);

        let features = create_features(&board, at(0, 0)).unwrap();
        let types: Vec<_> = features.iter().map(|f| f.feature_type()).collect();
        assert_eq!(
            types,
            vec![FeatureType::City, FeatureType::Road, FeatureType::Cloister]
        );
        assert_eq!(features[0].cells().len(), 2);
        assert_eq!(features[1].cells().len(), 2);
    }

    #[test]
    fn test_create_feature_is_idempotent() {
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([C, C, G, G], false)),
            (at(0, 1), Tile::new([G, G, C, G], false)),
        ]);

        let first = create_feature(&board, at(0, 0), Bearing::East).unwrap();
        let second = create_feature(&board, at(0, 0), Bearing::East).unwrap();
        assert_eq!(first, second);
    }
}
