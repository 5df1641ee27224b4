//! Movement Resolution
//!
//! The single authority on whether a step is legal and what it does.
//!
//! ## Module Structure
//!
//! - `passability`: direction/state dependent collider table
//! - `step`: single-step evaluation and application
//! - `forced`: ice slides and conveyor chains
//! - `interact`: adjacency check for talking to NPCs
//! - `walk`: step plus any forced movement it triggers

pub mod passability;
pub mod step;
pub mod forced;
pub mod interact;
pub mod walk;

use serde::{Serialize, Deserialize};

use crate::core::point::Point;

pub use passability::is_passable;
pub use forced::{ForcedMove, ForcedMoveLimits, ForcedStop};
pub use walk::WalkOutcome;

/// Classification of one attempted step.
///
/// Distinct from whether the step is applied: only `Fail` leaves the
/// traveller in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveResult {
    /// Plain move
    Success,
    /// Blocked
    Fail,
    /// Hopped a ledge
    Jump,
    /// Stepped out of the water
    NoLongerSurfing,
    /// Landed back on the ground
    OnGround,
    /// Left the ground
    NoLongerOnGround,
    /// Stepped onto a conveyor
    Sliding,
    /// Stepped onto ice
    Icing,
}

impl MoveResult {
    /// Whether the step is rejected.
    #[inline]
    pub fn is_fail(self) -> bool {
        self == MoveResult::Fail
    }
}

/// HM abilities available to the traveller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Abilities {
    /// Can clear cuttable obstacles (collider 11)
    pub can_cut: bool,
    /// Can clear smashable obstacles (collider 13)
    pub can_smash: bool,
}

impl Abilities {
    /// No abilities.
    pub const NONE: Self = Self { can_cut: false, can_smash: false };

    /// Both abilities.
    pub const ALL: Self = Self { can_cut: true, can_smash: true };
}

/// Position and elevation flags of a traveller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionState {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    /// On the ground rather than on an elevated layer
    pub on_ground: bool,
    /// Surfing
    pub surfing: bool,
}

impl MotionState {
    /// Walking on the ground at `(x, y)`.
    pub const fn on_ground_at(x: i32, y: i32) -> Self {
        Self { x, y, on_ground: true, surfing: false }
    }

    /// Current cell.
    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
