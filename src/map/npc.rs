//! NPC Roster
//!
//! NPC records decoded from a map, and the roster that tracks them at
//! runtime. The template snapshot never changes after load; the live roster
//! is rewritten by session-sync events and can be reset from the template.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::direction::Direction;
use crate::core::point::Point;

/// NPCs with a sight line this long patrol the map and never block.
pub const PATROL_LOS_THRESHOLD: u8 = 100;

/// NPC identifier as stored in the map file.
pub type NpcId = i32;

/// A single NPC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Map-assigned identifier
    pub id: NpcId,
    /// Display name
    pub name: String,
    /// Challenges the player to a battle on sight
    pub is_battler: bool,
    /// Sprite/type code
    pub npc_type: i16,
    /// Current cell
    pub position: Point,
    /// Facing direction
    pub direction: Direction,
    /// Line-of-sight length in cells
    pub los_length: u8,
    /// Patrol path descriptor
    pub path: String,
    /// Currently walking between cells
    pub is_moving: bool,
    /// Occupies its cell for collision purposes
    pub can_block_player: bool,
}

impl Npc {
    /// Create a stationary, blocking NPC.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: NpcId,
        name: impl Into<String>,
        is_battler: bool,
        npc_type: i16,
        position: Point,
        direction: Direction,
        los_length: u8,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            is_battler,
            npc_type,
            position,
            direction,
            los_length,
            path: path.into(),
            is_moving: false,
            can_block_player: true,
        }
    }

    /// Whether this NPC stops a traveller entering `(x, y)`.
    ///
    /// Patrolling NPCs (long sight lines), NPCs mid-move and NPCs flagged
    /// non-blocking are walked through.
    #[inline]
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        self.position.x == x
            && self.position.y == y
            && self.los_length < PATROL_LOS_THRESHOLD
            && !self.is_moving
            && self.can_block_player
    }
}

/// Roster mutation reported by the session-sync collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterEvent {
    /// A new NPC appeared, or a known one was re-announced
    Added(Npc),
    /// A known NPC changed position or flags
    Updated(Npc),
    /// An NPC left the map
    Removed(NpcId),
}

/// Template plus live NPC roster of one map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NpcRoster {
    template: Vec<Npc>,
    live: Vec<Npc>,
}

impl NpcRoster {
    /// Build a roster whose live list starts as a copy of `template`.
    pub fn new(template: Vec<Npc>) -> Self {
        let live = template.clone();
        Self { template, live }
    }

    /// The NPCs as loaded from the map file.
    pub fn template(&self) -> &[Npc] {
        &self.template
    }

    /// The NPCs as currently known.
    pub fn live(&self) -> &[Npc] {
        &self.live
    }

    /// Find a live NPC by id.
    pub fn get(&self, id: NpcId) -> Option<&Npc> {
        self.live.iter().find(|npc| npc.id == id)
    }

    /// Mutable access to a live NPC.
    pub fn get_mut(&mut self, id: NpcId) -> Option<&mut Npc> {
        self.live.iter_mut().find(|npc| npc.id == id)
    }

    /// Whether any live NPC blocks `(x, y)`.
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        self.live.iter().any(|npc| npc.blocks(x, y))
    }

    /// Restore the live roster from the template.
    pub fn reset(&mut self) {
        self.live.clone_from(&self.template);
        debug!(npcs = self.live.len(), "npc roster reset from template");
    }

    /// Drop every live NPC (the session will repopulate).
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Apply a session event.
    ///
    /// `Added` replaces an NPC with the same id or appends a new one.
    /// `Updated` for an unknown id is treated as an add. Returns `false`
    /// only for a `Removed` of an unknown id.
    pub fn apply(&mut self, event: RosterEvent) -> bool {
        match event {
            RosterEvent::Added(npc) | RosterEvent::Updated(npc) => {
                let id = npc.id;
                match self.get_mut(id) {
                    Some(existing) => *existing = npc,
                    None => self.live.push(npc),
                }
                debug!(npc_id = id, "npc roster upsert");
                true
            }
            RosterEvent::Removed(id) => {
                let before = self.live.len();
                self.live.retain(|npc| npc.id != id);
                let removed = self.live.len() != before;
                debug!(npc_id = id, removed, "npc roster remove");
                removed
            }
        }
    }
}
