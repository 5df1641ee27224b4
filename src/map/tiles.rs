//! Terrain Codes
//!
//! Named forms of the collider codes and the tile-layer code sets the
//! terrain queries look for.

use serde::{Serialize, Deserialize};
use crate::core::direction::Direction;

// =============================================================================
// COLLIDERS
// =============================================================================

/// Per-cell passability class stored in the collider layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Collider {
    /// Open, walkable ground
    Open = 0,
    /// Impassable from every side
    Wall = 1,
    /// Ledge that can be hopped while travelling down
    LedgeDown = 2,
    /// Ledge that can be hopped while travelling right
    LedgeRight = 3,
    /// Ledge that can be hopped while travelling left
    LedgeLeft = 4,
    /// Surfable water
    Water = 5,
    /// Ground variant
    Ground6 = 6,
    /// Ground variant that lifts an on-ground traveller off the ground
    GroundLift = 7,
    /// Ground variant that puts an off-ground traveller back on the ground
    GroundLand = 8,
    /// Ground variant
    Ground9 = 9,
    /// Passable only while off the ground
    Elevated = 10,
    /// Obstacle cleared by Cut
    Cuttable = 11,
    /// Water that can also be crossed off the ground
    ElevatedWater = 12,
    /// Obstacle cleared by Rock Smash
    Smashable = 13,
    /// Service counter
    Counter = 14,
}

impl Collider {
    /// Sentinel returned by collider lookups outside the grid.
    pub const NONE: i32 = -1;

    /// Decode a raw collider byte.
    pub fn from_code(code: u8) -> Option<Collider> {
        match code {
            0 => Some(Collider::Open),
            1 => Some(Collider::Wall),
            2 => Some(Collider::LedgeDown),
            3 => Some(Collider::LedgeRight),
            4 => Some(Collider::LedgeLeft),
            5 => Some(Collider::Water),
            6 => Some(Collider::Ground6),
            7 => Some(Collider::GroundLift),
            8 => Some(Collider::GroundLand),
            9 => Some(Collider::Ground9),
            10 => Some(Collider::Elevated),
            11 => Some(Collider::Cuttable),
            12 => Some(Collider::ElevatedWater),
            13 => Some(Collider::Smashable),
            14 => Some(Collider::Counter),
            _ => None,
        }
    }

    /// Raw code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Surfable water (5 or 12).
    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, Collider::Water | Collider::ElevatedWater)
    }

    /// Plain ground codes {0, 6, 7, 8, 9}.
    #[inline]
    pub const fn is_ground(self) -> bool {
        matches!(
            self,
            Collider::Open
                | Collider::Ground6
                | Collider::GroundLift
                | Collider::GroundLand
                | Collider::Ground9
        )
    }

    /// One of the three directional ledges.
    #[inline]
    pub const fn is_ledge(self) -> bool {
        matches!(self, Collider::LedgeDown | Collider::LedgeRight | Collider::LedgeLeft)
    }

    /// Direction a ledge can be hopped in.
    pub const fn ledge_direction(self) -> Option<Direction> {
        match self {
            Collider::LedgeDown => Some(Direction::Down),
            Collider::LedgeRight => Some(Direction::Right),
            Collider::LedgeLeft => Some(Direction::Left),
            _ => None,
        }
    }
}

// =============================================================================
// TILE LAYER CODES
// =============================================================================

/// Tile codes marking tall grass (layers 2 and 3).
pub const GRASS_TILES: [i32; 7] = [6, 14, 15, 55, 248, 249, 250];

/// Tile codes marking ice (layers 1, 2 and 3).
pub const ICE_TILES: [i32; 2] = [17577, 17580];

/// Tile code of the landmark (the healing PC) on layers 2 and 3.
pub const LANDMARK_TILE: i32 = 5437;

/// Conveyor entry in the slider table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slider {
    /// Pushes the occupant one cell in a direction
    Push(Direction),
    /// End of a conveyor line; classifies as sliding but pushes nowhere
    Stop,
}

impl Slider {
    /// Direction the slider pushes, if any.
    #[inline]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Slider::Push(direction) => Some(direction),
            Slider::Stop => None,
        }
    }
}

/// Tile code → slider table.
pub const SLIDER_TILES: [(i32, Slider); 7] = [
    (6662, Slider::Push(Direction::Up)),
    (6663, Slider::Push(Direction::Down)),
    (6670, Slider::Push(Direction::Left)),
    (6671, Slider::Push(Direction::Right)),
    (6686, Slider::Stop),
    (6718, Slider::Stop),
    (6719, Slider::Stop),
];

/// Look up a tile code in the slider table.
pub fn slider_for_tile(tile: i32) -> Option<Slider> {
    SLIDER_TILES
        .iter()
        .find(|(code, _)| *code == tile)
        .map(|(_, slider)| *slider)
}

/// Tile code that produces `slider`, for building maps.
pub fn tile_for_slider(slider: Slider) -> i32 {
    SLIDER_TILES
        .iter()
        .find(|(_, s)| *s == slider)
        .map(|(code, _)| *code)
        .unwrap_or(6686)
}
