//! Interaction Check

use crate::core::point::distance;
use crate::map::tiles::Collider;
use crate::map::Map;

impl Map {
    /// Whether a traveller at `(player_x, player_y)` can talk to whatever
    /// stands at `(target_x, target_y)`.
    ///
    /// The two cells must be adjacent, diagonals included. Counters only
    /// allow talking across them sideways: when both cells are counters they
    /// must share a row, and a lone counter on either side blocks.
    pub fn can_interact(&self, player_x: i32, player_y: i32, target_x: i32, target_y: i32) -> bool {
        if distance(player_x, player_y, target_x, target_y) != 1 {
            return false;
        }

        let is_counter = |x, y| self.collider_kind(x, y) == Some(Collider::Counter);
        match (is_counter(player_x, player_y), is_counter(target_x, target_y)) {
            (true, true) => player_y == target_y,
            (false, false) => true,
            _ => false,
        }
    }
}
