//! # Display Mapping
//!
//! Glyph/color styles for tile kinds and text rendering of grids.

use crate::{Grid, TileKind};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Terminal colors used by tile styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Black,
    White,
    Red,
    Yellow,
    Blue,
}

impl TileColor {
    /// ANSI SGR foreground code for this color.
    pub fn ansi_code(self) -> u8 {
        match self {
            TileColor::Black => 30,
            TileColor::Red => 31,
            TileColor::Yellow => 33,
            TileColor::Blue => 34,
            TileColor::White => 37,
        }
    }
}

/// How a single tile kind is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileStyle {
    /// Character shown for the tile
    pub glyph: char,
    /// Foreground color of the character
    pub color: TileColor,
}

impl TileStyle {
    /// Gets the style for a tile kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{TileColor, TileKind, TileStyle};
    ///
    /// let wall = TileStyle::for_tile(TileKind::Wall);
    /// assert_eq!(wall.glyph, '#');
    /// assert_eq!(wall.color, TileColor::White);
    /// ```
    pub fn for_tile(tile: TileKind) -> Self {
        let (glyph, color) = match tile {
            TileKind::Floor => (' ', TileColor::Black),
            TileKind::Wall => ('#', TileColor::White),
            TileKind::ClosedDoor => ('X', TileColor::Red),
            TileKind::OpenDoor => ('/', TileColor::Yellow),
            TileKind::OutOfBounds => ('.', TileColor::Blue),
        };

        Self { glyph, color }
    }

    /// Writes the glyph wrapped in ANSI color codes.
    pub fn write_colored(&self, out: &mut String) {
        // Writing into a String cannot fail
        let _ = write!(out, "\x1b[{}m{}\x1b[0m", self.color.ansi_code(), self.glyph);
    }
}

/// Renders a grid as text, one line per row.
///
/// With `colored` set every glyph is wrapped in ANSI color codes.
///
/// # Examples
///
/// ```
/// use burrow::{render_grid, Grid, Position, Room};
///
/// let mut grid = Grid::new(5, 3);
/// grid.try_insert_room(Room::new(Position::new(1, 1), 3, 1));
/// assert_eq!(render_grid(&grid, false), "#####\n#   #\n#####\n");
/// ```
pub fn render_grid(grid: &Grid, colored: bool) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);

    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let style = TileStyle::for_tile(grid.get(x, y));
            if colored {
                style.write_colored(&mut out);
            } else {
                out.push(style.glyph);
            }
        }
        out.push('\n');
    }

    out
}
