//! Configuration for a guessing session.

use std::path::PathBuf;

/// Default location of the character database.
pub const DEFAULT_DATA_PATH: &str = "data/characters.json";

/// Configuration for a guessing session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// JSON file backing the character database.
    pub data_path: PathBuf,
    /// RNG seed for reproducible guesses; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Largest candidate count at which the engine risks a random guess.
    pub guess_pool: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            seed: None,
            guess_pool: 3,
        }
    }
}

impl GameConfig {
    /// Set the database path.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the guess pool size (at least 2).
    pub fn with_guess_pool(mut self, pool: usize) -> Self {
        self.guess_pool = pool.max(2);
        self
    }
}
