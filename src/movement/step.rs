//! Single-Step Resolution
//!
//! [`Map::evaluate_step`] classifies one step; [`Map::apply_step`] turns a
//! classification into a state change.

use crate::core::direction::Direction;
use crate::map::tiles::Collider;
use crate::map::Map;
use super::passability::is_passable;
use super::{Abilities, MotionState, MoveResult};

impl Map {
    /// Classify a step in `direction` onto `(dest_x, dest_y)`.
    ///
    /// Checks, in order: grid bounds, blocking NPCs, leaving a counter
    /// upwards, the passability table. A legal step is then classified as
    /// Jump, NoLongerOnGround, OnGround, NoLongerSurfing, Icing, Sliding or
    /// Success, first match wins.
    pub fn evaluate_step(
        &self,
        direction: Direction,
        dest_x: i32,
        dest_y: i32,
        is_on_ground: bool,
        is_surfing: bool,
        abilities: Abilities,
    ) -> MoveResult {
        if !self.in_grid(dest_x, dest_y) {
            return MoveResult::Fail;
        }
        if self.npcs().blocks(dest_x, dest_y) {
            return MoveResult::Fail;
        }
        // The cell below an upward destination is the one being left.
        if direction == Direction::Up
            && self.collider_kind(dest_x, dest_y.saturating_add(1)) == Some(Collider::Counter)
        {
            return MoveResult::Fail;
        }

        let Some(collider) = self.collider_kind(dest_x, dest_y) else {
            return MoveResult::Fail;
        };
        if !is_passable(direction, collider, is_on_ground, is_surfing, abilities) {
            return MoveResult::Fail;
        }

        if collider.is_ledge() {
            MoveResult::Jump
        } else if is_on_ground && collider == Collider::GroundLift {
            MoveResult::NoLongerOnGround
        } else if !is_on_ground && collider == Collider::GroundLand {
            MoveResult::OnGround
        } else if is_surfing && !collider.is_water() {
            MoveResult::NoLongerSurfing
        } else if self.is_ice(dest_x, dest_y) {
            MoveResult::Icing
        } else if self.slider_at(dest_x, dest_y).is_some() {
            MoveResult::Sliding
        } else {
            MoveResult::Success
        }
    }

    /// Apply `result` to `state`, which holds the step's destination.
    ///
    /// A jump carries the traveller one cell further for Down, Left and
    /// Right; upward ledges do not exist. Returns `false` and leaves `state`
    /// untouched for `Fail`.
    pub fn apply_step(&self, direction: Direction, result: MoveResult, state: &mut MotionState) -> bool {
        match result {
            MoveResult::Fail => return false,
            MoveResult::Success | MoveResult::Sliding | MoveResult::Icing => {}
            MoveResult::Jump => {
                if direction != Direction::Up {
                    (state.x, state.y) = direction.apply(state.x, state.y);
                }
            }
            MoveResult::OnGround => state.on_ground = true,
            MoveResult::NoLongerOnGround => state.on_ground = false,
            MoveResult::NoLongerSurfing => state.surfing = false,
        }
        true
    }
}
