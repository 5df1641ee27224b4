//! Walking
//!
//! One requested move as a client performs it: the step itself, then any
//! forced movement the destination sets off.

use serde::{Serialize, Deserialize};

use crate::core::direction::Direction;
use crate::map::Map;
use super::forced::{ForcedMove, ForcedMoveLimits};
use super::{Abilities, MotionState, MoveResult};

/// What one [`Map::walk`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOutcome {
    /// Classification of the requested step
    pub result: MoveResult,
    /// Whether the requested step was committed
    pub moved: bool,
    /// Ice slide or conveyor chain that followed, if any
    pub forced: Option<ForcedMove>,
}

impl WalkOutcome {
    /// Whether the walk ended in a forced-movement failure.
    pub fn forced_failed(&self) -> bool {
        self.forced.is_some_and(|forced| forced.stop.is_fail())
    }
}

impl Map {
    /// Move one cell in `direction`, then resolve ice or conveyors.
    pub fn walk(&self, direction: Direction, state: &mut MotionState, abilities: Abilities) -> WalkOutcome {
        self.walk_with(direction, state, abilities, &ForcedMoveLimits::default())
    }

    /// [`Map::walk`] with an explicit forced-movement guard.
    pub fn walk_with(
        &self,
        direction: Direction,
        state: &mut MotionState,
        abilities: Abilities,
        limits: &ForcedMoveLimits,
    ) -> WalkOutcome {
        let (x, y) = direction.apply(state.x, state.y);
        let result = self.evaluate_step(direction, x, y, state.on_ground, state.surfing, abilities);

        let mut next = MotionState { x, y, ..*state };
        let moved = self.apply_step(direction, result, &mut next);
        if moved {
            *state = next;
        }

        let forced = match result {
            MoveResult::Icing => Some(self.resolve_ice_slide_with(direction, state, limits)),
            MoveResult::Sliding => Some(self.resolve_slider_chain_with(state, limits)),
            _ => None,
        };
        WalkOutcome { result, moved, forced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::forced::ForcedStop;
    use crate::map::encode::MapEncoder;
    use crate::map::tiles::Slider;

    fn decode(enc: &MapEncoder) -> Map {
        Map::from_bytes(&enc.encode().unwrap()).unwrap()
    }

    #[test]
    fn test_plain_walk() {
        let map = decode(&MapEncoder::new(4, 4));
        let mut state = MotionState::on_ground_at(1, 1);
        let outcome = map.walk(Direction::Down, &mut state, Abilities::NONE);
        assert_eq!(outcome, WalkOutcome { result: MoveResult::Success, moved: true, forced: None });
        assert_eq!(state.position(), (1, 2).into());
    }

    #[test]
    fn test_blocked_walk_stays() {
        let mut enc = MapEncoder::new(4, 4);
        enc.collider(2, 1, 1);
        let map = decode(&enc);
        let mut state = MotionState::on_ground_at(1, 1);
        let outcome = map.walk(Direction::Right, &mut state, Abilities::NONE);
        assert!(!outcome.moved);
        assert_eq!(outcome.result, MoveResult::Fail);
        assert_eq!(state, MotionState::on_ground_at(1, 1));
    }

    #[test]
    fn test_ledge_jump_lands_past_ledge() {
        let mut enc = MapEncoder::new(4, 5);
        enc.collider(1, 2, 2);
        let map = decode(&enc);
        let mut state = MotionState::on_ground_at(1, 1);
        let outcome = map.walk(Direction::Down, &mut state, Abilities::NONE);
        assert_eq!(outcome.result, MoveResult::Jump);
        assert_eq!(state.position(), (1, 3).into());
    }

    #[test]
    fn test_walk_onto_ice_slides() {
        let mut enc = MapEncoder::new(6, 3);
        enc.ice(1, 1).ice(2, 1).collider(3, 1, 1);
        let map = decode(&enc);
        let mut state = MotionState::on_ground_at(0, 1);
        let outcome = map.walk(Direction::Right, &mut state, Abilities::NONE);
        assert_eq!(outcome.result, MoveResult::Icing);
        assert_eq!(outcome.forced.map(|f| f.stop), Some(ForcedStop::Blocked));
        assert_eq!(state.position(), (2, 1).into());
    }

    #[test]
    fn test_walk_onto_conveyor_follows_chain() {
        let mut enc = MapEncoder::new(6, 4);
        enc.slider(1, 1, Slider::Push(Direction::Down));
        enc.slider(1, 2, Slider::Push(Direction::Right));
        let map = decode(&enc);
        let mut state = MotionState::on_ground_at(0, 1);
        let outcome = map.walk(Direction::Right, &mut state, Abilities::NONE);
        assert_eq!(outcome.result, MoveResult::Sliding);
        assert_eq!(state.position(), (2, 2).into());
        assert!(!outcome.forced_failed());
    }

    #[test]
    fn test_walk_reports_conveyor_cycle() {
        let mut enc = MapEncoder::new(5, 3);
        enc.slider(1, 1, Slider::Push(Direction::Right));
        enc.slider(2, 1, Slider::Push(Direction::Left));
        let map = decode(&enc);
        let mut state = MotionState::on_ground_at(1, 0);
        let outcome = map.walk(Direction::Down, &mut state, Abilities::NONE);
        assert!(outcome.forced_failed());
        assert_eq!(outcome.forced.map(|f| f.stop), Some(ForcedStop::CycleDetected));
    }

    #[test]
    fn test_leaving_water() {
        let mut enc = MapEncoder::new(4, 4);
        enc.collider(1, 1, 5);
        let map = decode(&enc);
        let mut state = MotionState { x: 1, y: 1, on_ground: true, surfing: true };
        let outcome = map.walk(Direction::Left, &mut state, Abilities::NONE);
        assert_eq!(outcome.result, MoveResult::NoLongerSurfing);
        assert!(!state.surfing);
        assert_eq!(state.position(), (0, 1).into());
    }
}
