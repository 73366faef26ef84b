//! Base game tile catalog (24 kinds, 72 tiles) and the draw deck.

use crate::coord::{Bearing, Bearings};
use crate::tile::{Face, Tile};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Kind of the tile the game starts with
pub const STARTING_TILE: TileKind = TileKind::D;

/// The 24 tile kinds of the base game, lettered as in the rulebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
}

impl TileKind {
    /// All tile kinds in rulebook order
    pub const ALL: [TileKind; 24] = [
        TileKind::A,
        TileKind::B,
        TileKind::C,
        TileKind::D,
        TileKind::E,
        TileKind::F,
        TileKind::G,
        TileKind::H,
        TileKind::I,
        TileKind::J,
        TileKind::K,
        TileKind::L,
        TileKind::M,
        TileKind::N,
        TileKind::O,
        TileKind::P,
        TileKind::Q,
        TileKind::R,
        TileKind::S,
        TileKind::T,
        TileKind::U,
        TileKind::V,
        TileKind::W,
        TileKind::X,
    ];

    /// Faces in N, E, S, W order
    fn faces(&self) -> [Face; 4] {
        use Face::{City as C, Grass as G, Road as R};

        match self {
            // Cloister with road south
            TileKind::A => [G, G, R, G],
            // Cloister
            TileKind::B => [G, G, G, G],
            TileKind::C => [C, C, C, C],
            // City N, road E-W
            TileKind::D => [C, R, G, R],
            TileKind::E => [C, G, G, G],
            // City E-W connected
            TileKind::F => [G, C, G, C],
            // City N-S connected
            TileKind::G => [C, G, C, G],
            // City N and city S, not connected
            TileKind::H => [C, G, C, G],
            // City N and city W, not connected
            TileKind::I => [C, G, G, C],
            // City N, road E-S curve
            TileKind::J => [C, R, R, G],
            // City N, road S-W curve
            TileKind::K => [C, G, R, R],
            // City N, road T-junction E-S-W
            TileKind::L => [C, R, R, R],
            TileKind::M | TileKind::N => [C, G, G, C],
            TileKind::O | TileKind::P => [C, R, R, C],
            TileKind::Q | TileKind::S => [C, C, G, C],
            TileKind::R | TileKind::T => [C, C, R, C],
            TileKind::U => [R, G, R, G],
            TileKind::V => [G, G, R, R],
            // T-junction N-S-W
            TileKind::W => [R, G, R, R],
            // Crossroads
            TileKind::X => [R, R, R, R],
        }
    }

    /// The tile in its unrotated orientation
    pub fn tile(&self) -> Tile {
        let faces = self.faces();
        let cloister = matches!(self, TileKind::A | TileKind::B);

        match self {
            TileKind::H => separate_cities(faces, Bearing::North, Bearing::South),
            TileKind::I => separate_cities(faces, Bearing::North, Bearing::West),
            _ => Tile::new(faces, cloister),
        }
    }

    /// Number of copies in the base game
    pub fn count(&self) -> usize {
        match self {
            TileKind::A => 2,
            TileKind::B => 4,
            TileKind::C => 1,
            TileKind::D => 4,
            TileKind::E => 5,
            TileKind::F => 2,
            TileKind::G => 1,
            TileKind::H => 3,
            TileKind::I => 2,
            TileKind::J => 3,
            TileKind::K => 3,
            TileKind::L => 3,
            TileKind::M => 2,
            TileKind::N => 3,
            TileKind::O => 2,
            TileKind::P => 3,
            TileKind::Q => 2,
            TileKind::R => 2,
            TileKind::S => 2,
            TileKind::T => 1,
            TileKind::U => 8,
            TileKind::V => 9,
            TileKind::W => 4,
            TileKind::X => 1,
        }
    }
}

fn separate_cities(faces: [Face; 4], first: Bearing, second: Bearing) -> Tile {
    Tile::with_segments(
        faces,
        false,
        vec![Bearings::of(&[first]), Bearings::of(&[second])],
    )
    .expect("catalog city segments must name city faces")
}

/// Shuffled stack of tiles still to be drawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    kinds: Vec<TileKind>,
}

impl Deck {
    /// The full base game deck minus one starting tile, randomly shuffled
    pub fn standard() -> Self {
        let mut rng = rand::thread_rng();
        Self::standard_with_rng(&mut rng)
    }

    /// The standard deck shuffled with a provided RNG.
    /// This allows for deterministic deals when needed
    pub fn standard_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut kinds: Vec<TileKind> = TileKind::ALL
            .iter()
            .flat_map(|kind| {
                let copies = if *kind == STARTING_TILE {
                    kind.count() - 1
                } else {
                    kind.count()
                };
                std::iter::repeat(*kind).take(copies)
            })
            .collect();

        kinds.shuffle(rng);
        Self { kinds }
    }

    /// Draw the next tile, if any remain
    pub fn draw(&mut self) -> Option<(TileKind, Tile)> {
        self.kinds.pop().map(|kind| (kind, kind.tile()))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
