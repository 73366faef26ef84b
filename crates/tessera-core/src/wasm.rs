//! WebAssembly bindings for the tessera scoring engine.
//!
//! This module exposes the board and scoring to JavaScript through wasm-bindgen.
//! Tiles and results cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::coord::Coordinate;
use crate::scoring::score_placement;
use crate::tile::Tile;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed board wrapper
#[wasm_bindgen]
pub struct WasmBoard {
    board: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create an empty board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard {
            board: Board::new(),
        }
    }

    /// Place a tile from JSON after checking the placement rules
    #[wasm_bindgen(js_name = placeTile)]
    pub fn place_tile(&mut self, x: i32, y: i32, tile_json: &str) -> Result<(), JsValue> {
        let tile: Tile = serde_json::from_str(tile_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid tile JSON: {}", e)))?;

        self.board
            .place(Coordinate::new(x, y), tile)
            .map_err(|e| JsValue::from_str(&format!("Placement failed: {}", e)))
    }

    /// Get the placement boundary as a JSON array of coordinates
    #[wasm_bindgen(js_name = openPositions)]
    pub fn open_positions(&self) -> String {
        serde_json::to_string(&self.board.open_positions()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Score the tile at (x, y), returning the breakdown as JSON
    #[wasm_bindgen(js_name = scoreAt)]
    pub fn score_at(&self, x: i32, y: i32) -> Result<String, JsValue> {
        let score = score_placement(&self.board, Coordinate::new(x, y))
            .map_err(|e| JsValue::from_str(&format!("Scoring failed: {}", e)))?;
        serde_json::to_string(&score).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get board state as JSON (for rendering)
    /// Uses JSON-friendly representation with arrays instead of HashMaps
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        let board_json = self.board.to_json_friendly();
        serde_json::to_string(&board_json).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}
