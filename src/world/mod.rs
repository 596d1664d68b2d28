//! # World Module
//!
//! The tile grid and room bookkeeping that generation mutates.
//!
//! This module contains the data model shared by the generator and by anything
//! that consumes a finished maze:
//! - Positions and tile kinds
//! - Rectangular rooms and their collision rules
//! - The bounds-safe tile grid

pub mod grid;
pub mod room;

pub use grid::*;
pub use room::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the grid.
///
/// Coordinates are signed so that neighbours of edge cells can be expressed
/// and looked up without special cases; the grid reports them as out of bounds.
///
/// # Examples
///
/// ```
/// use burrow::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let (west, east) = pos.horizontal_neighbours();
/// assert_eq!(west, Position::new(9, 5));
/// assert_eq!(east, Position::new(11, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The two neighbours along the horizontal axis, west then east.
    pub fn horizontal_neighbours(self) -> (Position, Position) {
        (
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
        )
    }

    /// The two neighbours along the vertical axis, north then south.
    pub fn vertical_neighbours(self) -> (Position, Position) {
        (
            Position::new(self.x, self.y - 1),
            Position::new(self.x, self.y + 1),
        )
    }
}

/// The kind of a single grid cell.
///
/// This is a plain enumeration; how each kind is drawn is decided by the
/// rendering module. `OutOfBounds` is never stored in a grid, it is only
/// returned by lookups that fall off the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable floor of a room or corridor
    Floor,
    /// Solid rock
    Wall,
    /// A closed door between a room and a corridor
    ClosedDoor,
    /// An open door (never produced by the generator)
    OpenDoor,
    /// Sentinel for coordinates outside the grid
    OutOfBounds,
}

impl TileKind {
    /// Every variant, in declaration order.
    pub const ALL: [TileKind; 5] = [
        TileKind::Floor,
        TileKind::Wall,
        TileKind::ClosedDoor,
        TileKind::OpenDoor,
        TileKind::OutOfBounds,
    ];
}
