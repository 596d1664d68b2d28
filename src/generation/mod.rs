//! # Generation Module
//!
//! Procedural maze generation: configuration, the generator trait, and the
//! room-and-corridor builder.
//!
//! A run is driven by a [`GenerationConfig`] and a single random source that is
//! borrowed for the whole run, so the same seed and configuration always
//! produce the same grid.

pub mod dungeon;

pub use dungeon::*;

use crate::config::{
    DEFAULT_MAX_ROOM_SIZE, DEFAULT_ROOM_TRIES, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH,
};
use crate::{BurrowError, BurrowResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for maze generation.
///
/// Every option has its own default, applied independently: a partially
/// specified configuration (in code, through serde, or on the command line)
/// keeps the defaults of whatever it leaves out.
///
/// # Examples
///
/// ```
/// use burrow::GenerationConfig;
///
/// let config = GenerationConfig::default().with_room_tries(20);
/// assert_eq!(config.world_width, 80);
/// assert_eq!(config.world_height, 80);
/// assert_eq!(config.max_room_size, 10);
/// assert_eq!(config.room_tries, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Width of the world in tiles
    pub world_width: u32,
    /// Height of the world in tiles
    pub world_height: u32,
    /// Rooms are between 3 and `max_room_size + 2` tiles on each side
    pub max_room_size: u32,
    /// Number of room placement attempts (not successes)
    pub room_tries: u32,
    /// Random seed for reproducible generation; `None` draws from entropy
    pub seed: Option<u64>,
}

impl GenerationConfig {
    /// Creates a configuration with every option at its default.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            max_room_size: DEFAULT_MAX_ROOM_SIZE,
            room_tries: DEFAULT_ROOM_TRIES,
            seed: None,
        }
    }

    /// Creates a configuration for testing with a small, seeded world.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            world_width: 40,
            world_height: 40,
            max_room_size: 6,
            room_tries: 50,
            seed: Some(seed),
        }
    }

    pub fn with_world_width(mut self, world_width: u32) -> Self {
        self.world_width = world_width;
        self
    }

    pub fn with_world_height(mut self, world_height: u32) -> Self {
        self.world_height = world_height;
        self
    }

    pub fn with_max_room_size(mut self, max_room_size: u32) -> Self {
        self.max_room_size = max_room_size;
        self
    }

    pub fn with_room_tries(mut self, room_tries: u32) -> Self {
        self.room_tries = room_tries;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Largest room side this configuration can produce.
    pub fn max_room_side(&self) -> u32 {
        self.max_room_size.saturating_add(2)
    }

    /// Checks that every option is in a usable range.
    ///
    /// The largest possible room must leave at least one valid origin on each
    /// axis, so `max_room_size + 2` has to be strictly smaller than both world
    /// dimensions.
    pub fn validate(&self) -> BurrowResult<()> {
        if self.world_width == 0 || self.world_height == 0 {
            return Err(BurrowError::InvalidConfig(format!(
                "world dimensions must be positive, got {}x{}",
                self.world_width, self.world_height
            )));
        }

        if self.max_room_size == 0 {
            return Err(BurrowError::InvalidConfig(
                "max room size must be at least 1".to_string(),
            ));
        }

        let side = self.max_room_side();
        if side >= self.world_width || side >= self.world_height {
            return Err(BurrowError::InvalidConfig(format!(
                "max room size {} allows {}-tile rooms, which do not fit a {}x{} world",
                self.max_room_size, side, self.world_width, self.world_height
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for procedural generators.
///
/// Generators take a configuration and a borrowed random source and produce
/// content; `validate` checks produced content against the configuration.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BurrowResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::{Grid, TileKind};
    use rand::SeedableRng;

    /// Creates the random number generator for a run.
    ///
    /// Seeded configurations always yield the same stream; unseeded ones draw
    /// from entropy.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Checks that a finished grid keeps the maze invariants.
    ///
    /// Every room interior is floor, no two rooms collide, and every closed
    /// door has walls on both sides along at least one axis.
    pub fn validate_grid(grid: &Grid) -> BurrowResult<()> {
        for (i, room) in grid.rooms().iter().enumerate() {
            if let Some(pos) = room
                .all_positions()
                .into_iter()
                .find(|&pos| grid.get_at(pos) != TileKind::Floor)
            {
                return Err(BurrowError::GenerationFailed(format!(
                    "room {} has a non-floor cell at ({}, {})",
                    i, pos.x, pos.y
                )));
            }

            if let Some(j) = grid.rooms()[i + 1..]
                .iter()
                .position(|other| room.collides(other))
            {
                return Err(BurrowError::GenerationFailed(format!(
                    "rooms {} and {} collide",
                    i,
                    i + 1 + j
                )));
            }
        }

        for (pos, tile) in grid.positions() {
            if tile == TileKind::ClosedDoor && !is_wall_flanked(grid, pos) {
                return Err(BurrowError::GenerationFailed(format!(
                    "door at ({}, {}) is not flanked by walls",
                    pos.x, pos.y
                )));
            }
        }

        Ok(())
    }

    /// Checks whether both neighbours along one axis are walls.
    pub fn is_wall_flanked(grid: &Grid, pos: crate::Position) -> bool {
        let (west, east) = pos.horizontal_neighbours();
        let (north, south) = pos.vertical_neighbours();

        (grid.get_at(west) == TileKind::Wall && grid.get_at(east) == TileKind::Wall)
            || (grid.get_at(north) == TileKind::Wall && grid.get_at(south) == TileKind::Wall)
    }
}
