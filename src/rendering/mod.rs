//! # Rendering Module
//!
//! Presentation of finished grids: glyph and color for every tile kind, and
//! plain-text rendering of a whole grid.
//!
//! The generator never looks at any of this; it only emits [`crate::TileKind`]s.

pub mod display;

pub use display::*;
