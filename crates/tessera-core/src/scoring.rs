//! Scoring a placement.
//!
//! Point rules:
//! - City: 2 per tile when complete, 1 per tile otherwise
//! - Road: 1 per tile, complete or not
//! - Cloister: 1 for its own tile plus 1 per occupied surrounding tile
//!
//! The service reports the value at the moment it is called. Whether an
//! incomplete feature should be paid out yet (end of game) is up to the caller.

use crate::board::TileMap;
use crate::coord::Coordinate;
use crate::feature::Feature;
use crate::resolver::{create_features, FeatureError};
use crate::tile::FeatureType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Points per tile of a completed city
const COMPLETE_CITY_POINTS: u32 = 2;

/// Points per tile of an unfinished city
const INCOMPLETE_CITY_POINTS: u32 = 1;

/// Points per tile of a road, finished or not
const ROAD_POINTS: u32 = 1;

/// Score of one feature touched by a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureScore {
    pub feature_type: FeatureType,
    /// Tile count the points were derived from
    pub tiles: u32,
    pub complete: bool,
    pub points: u32,
}

/// Breakdown of everything a placement scores
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementScore {
    pub coord: Coordinate,
    pub features: Vec<FeatureScore>,
    pub total: u32,
}

/// Points a single feature is worth right now
pub fn feature_points(feature: &Feature) -> u32 {
    let tiles = feature.number_of_tiles() as u32;
    match feature.feature_type() {
        FeatureType::City if feature.is_complete() => COMPLETE_CITY_POINTS * tiles,
        FeatureType::City => INCOMPLETE_CITY_POINTS * tiles,
        FeatureType::Road => ROAD_POINTS * tiles,
        FeatureType::Cloister => 1 + tiles,
    }
}

/// Drop features that share a cell with one kept earlier
pub fn dedup_features(features: Vec<Feature>) -> Vec<Feature> {
    let mut distinct: Vec<Feature> = Vec::with_capacity(features.len());
    for feature in features {
        if !distinct.iter().any(|kept| kept.overlaps(&feature)) {
            distinct.push(feature);
        }
    }
    distinct
}

/// Score every distinct feature touched by the tile just placed at `coord`
pub fn score_placement<M>(map: &M, coord: Coordinate) -> Result<PlacementScore, FeatureError>
where
    M: TileMap + ?Sized,
{
    let features = dedup_features(create_features(map, coord)?);

    let features: Vec<FeatureScore> = features
        .iter()
        .map(|feature| FeatureScore {
            feature_type: feature.feature_type(),
            tiles: feature.number_of_tiles() as u32,
            complete: feature.is_complete(),
            points: feature_points(feature),
        })
        .collect();
    let total = features.iter().map(|f| f.points).sum();

    debug!(%coord, features = features.len(), total, "scored placement");
    Ok(PlacementScore {
        coord,
        features,
        total,
    })
}

/// Total points for the tile just placed at `coord`
pub fn calculate_score<M>(map: &M, coord: Coordinate) -> Result<u32, FeatureError>
where
    M: TileMap + ?Sized,
{
    score_placement(map, coord).map(|score| score.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::coord::Bearing;
    use crate::resolver::create_feature;
    use crate::tile::Face::{City as C, Grass as G, Road as R};
    use crate::tile::Tile;

    fn at(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_city_points_depend_on_completion() {
        let open = Board::from_tiles([
            (at(0, 0), Tile::new([C, G, G, G], false)),
            (at(0, 1), Tile::new([C, G, C, G], false)),
        ]);
        assert_eq!(calculate_score(&open, at(0, 1)), Ok(2));

        let closed = Board::from_tiles([
            (at(0, 0), Tile::new([C, G, G, G], false)),
            (at(0, 1), Tile::new([G, G, C, G], false)),
        ]);
        assert_eq!(calculate_score(&closed, at(0, 1)), Ok(4));
    }

    #[test]
    fn test_road_points_ignore_completion() {
        let open = Board::from_tiles([
            (at(0, 0), Tile::new([G, R, G, R], false)),
            (at(1, 0), Tile::new([G, R, G, R], false)),
        ]);
        assert_eq!(calculate_score(&open, at(1, 0)), Ok(2));

        // Junctions at both ends close the road
        let closed = Board::from_tiles([
            (at(-1, 0), Tile::new([R, R, R, G], false)),
            (at(0, 0), Tile::new([G, R, G, R], false)),
            (at(1, 0), Tile::new([R, G, R, R], false)),
        ]);
        let road = create_feature(&closed, at(0, 0), Bearing::East).unwrap();
        assert!(road.is_complete());
        assert_eq!(feature_points(&road), 3);
    }

    #[test]
    fn test_cloister_points_include_own_tile() {
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([G, G, G, G], true)),
            (at(0, 1), Tile::new([G, G, G, G], false)),
            (at(1, 1), Tile::new([G, G, G, G], false)),
        ]);
        assert_eq!(calculate_score(&board, at(0, 0)), Ok(3));
    }

    #[test]
    fn test_all_grass_scores_zero() {
        let board = Board::from_tiles([(at(0, 0), Tile::new([G, G, G, G], false))]);
        let score = score_placement(&board, at(0, 0)).unwrap();
        assert!(score.features.is_empty());
        assert_eq!(score.total, 0);
    }

    #[test]
    fn test_empty_coordinate_propagates() {
        let board = Board::from_tiles([(at(0, 0), Tile::new([C, G, G, G], false))]);
        let missing = FeatureError::EmptyCoordinate(at(4, 4));
        assert_eq!(score_placement(&board, at(4, 4)), Err(missing.clone()));
        assert_eq!(calculate_score(&board, at(4, 4)), Err(missing));
    }

    #[test]
    fn test_dedup_keeps_first_of_overlapping() {
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([C, C, G, G], false)),
            (at(0, 1), Tile::new([G, G, C, G], false)),
        ]);
        let from_north = create_feature(&board, at(0, 0), Bearing::North).unwrap();
        let from_east = create_feature(&board, at(0, 0), Bearing::East).unwrap();
        let from_above = create_feature(&board, at(0, 1), Bearing::South).unwrap();

        let distinct = dedup_features(vec![from_north.clone(), from_east, from_above]);
        assert_eq!(distinct, vec![from_north]);
    }

    #[test]
    fn test_breakdown_lists_each_feature() {
        // City cap north, road passing east-west
        let board = Board::from_tiles([
            (at(0, 0), Tile::new([C, R, G, R], false)),
            (at(0, 1), Tile::new([G, G, C, G], false)),
            (at(1, 0), Tile::new([G, G, G, R], false)),
        ]);

        let score = score_placement(&board, at(0, 0)).unwrap();
        assert_eq!(
            score.features,
            vec![
                FeatureScore {
                    feature_type: FeatureType::City,
                    tiles: 2,
                    complete: true,
                    points: 4,
                },
                FeatureScore {
                    feature_type: FeatureType::Road,
                    tiles: 2,
                    complete: false,
                    points: 2,
                },
            ]
        );
        assert_eq!(score.total, 6);
    }
}
