//! # Rooms
//!
//! Axis-aligned rectangular rooms and the collision rule used when placing them.

use crate::Position;
use serde::{Deserialize, Serialize};

/// Represents a rectangular room on the grid.
///
/// The rectangle covers `width × height` cells starting at `top_left`; every
/// one of those cells is carved to floor when the room is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room in cells
    pub width: u32,
    /// Height of the room in cells
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Position, Room};
    ///
    /// let room = Room::new(Position::new(5, 5), 10, 8);
    /// assert_eq!(room.width, 10);
    /// assert_eq!(room.height, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// ```
    pub fn new(top_left: Position, width: u32, height: u32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Column one past the right edge.
    pub fn right(&self) -> i32 {
        self.top_left.x + self.width as i32
    }

    /// Row one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.height as i32
    }

    /// Gets the center position of the room, truncating odd sizes.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.right()
            && pos.y < self.bottom()
    }

    /// Checks whether this room collides with another.
    ///
    /// Two rooms collide unless one lies strictly to the left, right, above or
    /// below the other. The far edge is inclusive, so rooms that merely touch
    /// collide and accepted rooms always keep a wall line between them.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Position, Room};
    ///
    /// let a = Room::new(Position::new(0, 0), 4, 4);
    /// let touching = Room::new(Position::new(4, 0), 4, 4);
    /// let separated = Room::new(Position::new(5, 0), 4, 4);
    /// assert!(a.collides(&touching));
    /// assert!(!a.collides(&separated));
    /// ```
    pub fn collides(&self, other: &Room) -> bool {
        !(self.top_left.x > other.right()
            || self.right() < other.top_left.x
            || self.top_left.y > other.bottom()
            || self.bottom() < other.top_left.y)
    }

    /// Gets all positions within this room.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in self.top_left.y..self.bottom() {
            for x in self.top_left.x..self.right() {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Cells of the row directly above and the row directly below the room.
    pub fn north_south_border(&self) -> Vec<Position> {
        let north = self.top_left.y - 1;
        let south = self.bottom();

        (self.top_left.x..self.right())
            .flat_map(|x| [Position::new(x, north), Position::new(x, south)])
            .collect()
    }

    /// Cells of the column directly right of and the column directly left of the room.
    pub fn east_west_border(&self) -> Vec<Position> {
        let east = self.right();
        let west = self.top_left.x - 1;

        (self.top_left.y..self.bottom())
            .flat_map(|y| [Position::new(east, y), Position::new(west, y)])
            .collect()
    }
}
