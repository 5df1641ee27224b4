//! Forced Movement
//!
//! Ice keeps a traveller going in the direction they entered it; conveyors
//! push them wherever the tile under them points. Both loops evaluate as a
//! walker without surf or abilities, since ice and conveyor fields are never
//! water and never hide obstacles.
//!
//! Each loop is bounded. Ice only ever moves in one direction, so the grid
//! edge ends it; conveyors can point at each other, so the chain also keeps
//! the cells it has left and stops on the first revisit.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::core::direction::Direction;
use crate::map::Map;
use super::{Abilities, MotionState, MoveResult};

/// Why a forced movement loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedStop {
    /// Came to rest: off the ice, or on a cell with no conveyor direction
    Settled,
    /// The next step failed; the traveller stays where they were
    Blocked,
    /// A conveyor loop brought the traveller back to a cell already left
    CycleDetected,
    /// The step guard ran out
    StepLimit,
}

impl ForcedStop {
    /// Whether the loop ended abnormally.
    #[inline]
    pub fn is_fail(self) -> bool {
        matches!(self, ForcedStop::CycleDetected | ForcedStop::StepLimit)
    }
}

/// Summary of one forced movement loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedMove {
    /// Committed steps
    pub steps: usize,
    /// Why the loop ended
    pub stop: ForcedStop,
    /// Classification of the last evaluated step
    pub last_result: Option<MoveResult>,
}

/// Iteration guard for forced movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedMoveLimits {
    /// Maximum committed steps; `None` derives `dimension_x * dimension_y + 1`
    pub max_steps: Option<usize>,
}

impl ForcedMoveLimits {
    /// Guard with an explicit step budget.
    pub const fn with_max_steps(max_steps: usize) -> Self {
        Self { max_steps: Some(max_steps) }
    }

    /// Step budget on `map`.
    pub fn max_steps_for(&self, map: &Map) -> usize {
        self.max_steps.unwrap_or_else(|| {
            let cells = (map.dimension_x().max(0) as usize).saturating_mul(map.dimension_y().max(0) as usize);
            cells.saturating_add(1)
        })
    }
}

impl Map {
    /// Slide across ice in `direction` until the traveller comes to rest.
    pub fn resolve_ice_slide(&self, direction: Direction, state: &mut MotionState) -> ForcedMove {
        self.resolve_ice_slide_with(direction, state, &ForcedMoveLimits::default())
    }

    /// [`Map::resolve_ice_slide`] with an explicit guard.
    ///
    /// Every successful step is committed; the loop continues while the
    /// committed step classified as Icing. Surf state is left untouched.
    pub fn resolve_ice_slide_with(
        &self,
        direction: Direction,
        state: &mut MotionState,
        limits: &ForcedMoveLimits,
    ) -> ForcedMove {
        let max_steps = limits.max_steps_for(self);
        let mut steps = 0;
        let mut last_result = None;

        let stop = loop {
            if steps >= max_steps {
                warn!(x = state.x, y = state.y, max_steps, "ice slide hit its step guard");
                break ForcedStop::StepLimit;
            }

            let result = self.forced_step(direction, state);
            last_result = Some(result);
            if result.is_fail() {
                break ForcedStop::Blocked;
            }
            steps += 1;
            if result != MoveResult::Icing {
                break ForcedStop::Settled;
            }
        };

        debug!(%direction, steps, ?stop, x = state.x, y = state.y, "ice slide resolved");
        ForcedMove { steps, stop, last_result }
    }

    /// Follow conveyors from the current cell until the traveller comes to
    /// rest.
    pub fn resolve_slider_chain(&self, state: &mut MotionState) -> ForcedMove {
        self.resolve_slider_chain_with(state, &ForcedMoveLimits::default())
    }

    /// [`Map::resolve_slider_chain`] with an explicit guard.
    ///
    /// The conveyor under the traveller picks each step's direction. Any
    /// non-Fail step is committed, whatever it classified as; the chain ends
    /// on a cell without a conveyor direction, on a failed step, or on
    /// returning to a cell already left.
    pub fn resolve_slider_chain_with(&self, state: &mut MotionState, limits: &ForcedMoveLimits) -> ForcedMove {
        let max_steps = limits.max_steps_for(self);
        let mut visited = BTreeSet::new();
        let mut steps = 0;
        let mut last_result = None;

        let stop = loop {
            let Some(direction) = self.slider_direction(state.x, state.y) else {
                break ForcedStop::Settled;
            };
            if !visited.insert((state.x, state.y, state.on_ground)) {
                warn!(x = state.x, y = state.y, steps, "conveyor cycle detected");
                break ForcedStop::CycleDetected;
            }
            if steps >= max_steps {
                warn!(x = state.x, y = state.y, max_steps, "conveyor chain hit its step guard");
                break ForcedStop::StepLimit;
            }

            let result = self.forced_step(direction, state);
            last_result = Some(result);
            if result.is_fail() {
                break ForcedStop::Blocked;
            }
            steps += 1;
        };

        debug!(steps, ?stop, x = state.x, y = state.y, "conveyor chain resolved");
        ForcedMove { steps, stop, last_result }
    }

    /// One forced step: evaluate, apply, and commit position and ground flag
    /// unless the step failed.
    fn forced_step(&self, direction: Direction, state: &mut MotionState) -> MoveResult {
        let (x, y) = direction.apply(state.x, state.y);
        let result = self.evaluate_step(direction, x, y, state.on_ground, false, Abilities::NONE);

        let mut next = MotionState { x, y, on_ground: state.on_ground, surfing: false };
        if self.apply_step(direction, result, &mut next) {
            #[cfg(feature = "debug-tracing")]
            tracing::trace!(%direction, ?result, x = next.x, y = next.y, "forced step");
            state.x = next.x;
            state.y = next.y;
            state.on_ground = next.on_ground;
        }
        result
    }
}
