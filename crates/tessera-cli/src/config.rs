//! Scorer configuration from environment variables and arguments.
//!
//! Arguments win over the environment:
//! - `TESSERA_BOARD` or argument 1: path to a board JSON file
//! - `TESSERA_AT` (`x,y`) or arguments 2 and 3: coordinate to score

use std::fs;
use std::path::PathBuf;
use tessera_core::{Board, BoardJson, Coordinate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No board file given (set TESSERA_BOARD or pass a path)")]
    MissingBoard,

    #[error("No coordinate given (set TESSERA_AT=x,y or pass x y)")]
    MissingCoordinate,

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Cannot read board file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where to find the board and which placement to score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerConfig {
    pub board_path: PathBuf,
    pub at: Coordinate,
}

impl ScorerConfig {
    /// Build the configuration from the process environment and `args`
    pub fn from_env_and_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::resolve(
            std::env::var("TESSERA_BOARD").ok(),
            std::env::var("TESSERA_AT").ok(),
            args,
        )
    }

    fn resolve<I>(env_board: Option<String>, env_at: Option<String>, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let board_path = args
            .next()
            .or(env_board)
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingBoard)?;

        let at = match (args.next(), args.next()) {
            (Some(x), Some(y)) => parse_coordinate(&x, &y)?,
            (Some(x), None) => return Err(ConfigError::InvalidCoordinate(x)),
            _ => {
                let raw = env_at.ok_or(ConfigError::MissingCoordinate)?;
                let (x, y) = raw
                    .split_once(',')
                    .ok_or_else(|| ConfigError::InvalidCoordinate(raw.clone()))?;
                parse_coordinate(x, y)?
            }
        };

        Ok(Self { board_path, at })
    }

    /// Read and decode the board file
    pub fn load_board(&self) -> Result<Board, ConfigError> {
        let text = fs::read_to_string(&self.board_path)?;
        let board: BoardJson = serde_json::from_str(&text)?;
        Ok(board.into_board())
    }
}

fn parse_coordinate(x: &str, y: &str) -> Result<Coordinate, ConfigError> {
    let parse = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidCoordinate(format!("{},{}", x, y)))
    };
    Ok(Coordinate::new(parse(x)?, parse(y)?))
}
