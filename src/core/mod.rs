//! Core grid primitives.
//!
//! Directions, cell coordinates, dense grids and content hashing. Nothing in
//! here knows about terrain rules.

pub mod direction;
pub mod point;
pub mod grid;
pub mod hash;

// Re-export core types
pub use direction::Direction;
pub use point::{Point, distance};
pub use grid::Grid;
pub use hash::{ContentHasher, Fingerprint, fingerprint_hex};
