//! # Tile Grid
//!
//! Dense tile storage with bounds-safe access and room bookkeeping.
//!
//! Every lookup and write is checked against the grid bounds. Lookups that fall
//! off the edge answer [`TileKind::OutOfBounds`] and writes there do nothing, so
//! code walking room borders and corridor ends never needs its own bounds tests.

use crate::{Position, Room, TileKind};
use log::trace;

/// A fixed-size grid of tiles plus the rooms carved into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width of the grid in tiles
    width: u32,
    /// Height of the grid in tiles
    height: u32,
    /// Row-major tile storage, `width * height` long
    tiles: Vec<TileKind>,
    /// Accepted rooms in placement order
    rooms: Vec<Room>,
}

impl Grid {
    /// Creates a grid filled with walls and no rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Grid, TileKind};
    ///
    /// let grid = Grid::new(20, 10);
    /// assert_eq!(grid.width(), 20);
    /// assert_eq!(grid.height(), 10);
    /// assert_eq!(grid.get(0, 0), TileKind::Wall);
    /// assert_eq!(grid.get(20, 0), TileKind::OutOfBounds);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; width as usize * height as usize],
            rooms: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Accepted rooms, in the order they were placed.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Checks if the coordinates fall inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Gets the tile at the given coordinates, or `OutOfBounds` off the grid.
    pub fn get(&self, x: i32, y: i32) -> TileKind {
        self.index(x, y)
            .map_or(TileKind::OutOfBounds, |idx| self.tiles[idx])
    }

    /// Gets the tile at a position.
    pub fn get_at(&self, pos: Position) -> TileKind {
        self.get(pos.x, pos.y)
    }

    /// Sets the tile at the given coordinates.
    ///
    /// Writes outside the grid, and writes of the `OutOfBounds` sentinel, are
    /// ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: TileKind) {
        if tile == TileKind::OutOfBounds {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            self.tiles[idx] = tile;
        }
    }

    /// Sets the tile at a position.
    pub fn set_at(&mut self, pos: Position, tile: TileKind) {
        self.set(pos.x, pos.y, tile);
    }

    /// Overwrites every cell with the given tile.
    pub fn fill(&mut self, tile: TileKind) {
        if tile == TileKind::OutOfBounds {
            return;
        }
        self.tiles.fill(tile);
    }

    /// Counts cells holding the given tile kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    /// Iterates over every position with its tile, row by row.
    pub fn positions(&self) -> impl Iterator<Item = (Position, TileKind)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(idx, &tile)| {
            (
                Position::new((idx % width) as i32, (idx / width) as i32),
                tile,
            )
        })
    }

    /// Checks whether a room lies entirely within the grid.
    pub fn room_fits(&self, room: &Room) -> bool {
        room.width > 0
            && room.height > 0
            && room.width <= self.width
            && room.height <= self.height
            && self.in_bounds(room.top_left.x, room.top_left.y)
            && self.in_bounds(room.right() - 1, room.bottom() - 1)
    }

    /// Attempts to add a room, carving its interior to floor on success.
    ///
    /// The room is rejected, leaving the grid unchanged, when it does not fit
    /// on the grid, when it collides with an accepted room, or when any cell
    /// on the lines just outside it is already floor. The border lines are
    /// only inspected when all four lie on the grid; a room touching the edge
    /// can only be rejected by a collision.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Grid, Position, Room, TileKind};
    ///
    /// let mut grid = Grid::new(20, 20);
    /// assert!(grid.try_insert_room(Room::new(Position::new(2, 2), 4, 4)));
    /// assert_eq!(grid.get(3, 3), TileKind::Floor);
    ///
    /// // Overlaps the first room
    /// assert!(!grid.try_insert_room(Room::new(Position::new(4, 4), 4, 4)));
    /// assert_eq!(grid.rooms().len(), 1);
    /// ```
    pub fn try_insert_room(&mut self, room: Room) -> bool {
        if !self.room_fits(&room) {
            trace!("Room {:?} rejected: outside grid", room);
            return false;
        }

        if self.rooms.iter().any(|existing| existing.collides(&room)) {
            trace!("Room {:?} rejected: collides with a placed room", room);
            return false;
        }

        let borders_on_grid = self.in_bounds(room.top_left.x - 1, room.top_left.y - 1)
            && self.in_bounds(room.right(), room.bottom());
        let touches_floor = borders_on_grid
            && room
                .north_south_border()
                .into_iter()
                .chain(room.east_west_border())
                .any(|pos| self.get_at(pos) == TileKind::Floor);
        if touches_floor {
            trace!("Room {:?} rejected: floor along its border", room);
            return false;
        }

        self.carve_room(&room);
        self.rooms.push(room);
        true
    }

    /// Converts every cell of the room to floor.
    fn carve_room(&mut self, room: &Room) {
        for pos in room.all_positions() {
            self.set_at(pos, TileKind::Floor);
        }
    }
}
