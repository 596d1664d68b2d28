//! # Burrow
//!
//! Room-and-corridor maze generation for tile-based roguelikes.
//!
//! ## Architecture Overview
//!
//! Burrow is split into a small core and a thin presentation layer:
//!
//! - **World**: the tile grid, rooms and positions the generator mutates
//! - **Generation**: configuration, the room placement loop, corridor growth
//!   and door insertion
//! - **Rendering**: glyph and color mapping for each tile kind
//!
//! ## Example
//!
//! ```
//! use burrow::{GenerationConfig, TileKind, WorldBuilder};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = GenerationConfig::default().with_seed(7);
//! let mut rng = StdRng::seed_from_u64(7);
//! let grid = WorldBuilder::new(config, &mut rng).unwrap().create();
//!
//! assert_eq!(grid.width(), 80);
//! assert!(!grid.rooms().is_empty());
//! assert_eq!(grid.get(-1, 0), TileKind::OutOfBounds);
//! ```

pub mod generation;
pub mod rendering;
pub mod world;

// Core module re-exports
pub use generation::*;
pub use rendering::*;
pub use world::*;

/// Core error type for the Burrow generator.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generation option is outside its usable range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A generated grid broke one of its invariants
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation defaults.
pub mod config {
    /// Default world width in tiles
    pub const DEFAULT_WORLD_WIDTH: u32 = 80;

    /// Default world height in tiles
    pub const DEFAULT_WORLD_HEIGHT: u32 = 80;

    /// Default maximum room size; rooms span 3 to this plus 2 tiles per side
    pub const DEFAULT_MAX_ROOM_SIZE: u32 = 10;

    /// Default number of room placement attempts
    pub const DEFAULT_ROOM_TRIES: u32 = 100;

    /// Smallest room side the generator produces
    pub const MIN_ROOM_SIDE: u32 = 3;
}
