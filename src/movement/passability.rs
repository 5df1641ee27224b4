//! Passability Table
//!
//! Whether a traveller may enter a cell with a given collider, by travel
//! direction, elevation and surf state.

use crate::core::direction::Direction;
use crate::map::tiles::Collider;
use super::Abilities;

/// Decide if `collider` can be entered.
///
/// | collider | on ground | off ground |
/// |---|---|---|
/// | 0, 6, 7, 8, 9 | always | 7, 8, 9 only |
/// | 2 / 3 / 4 ledges | Down / Right / Left only | never |
/// | 5, 12 water | while surfing | 12 only |
/// | 10 elevated | never | always |
/// | 14 counter | not Down | not Down |
/// | 11 / 13 | with Cut / Rock Smash | with Cut / Rock Smash |
/// | 1 wall | never | never |
pub fn is_passable(
    direction: Direction,
    collider: Collider,
    on_ground: bool,
    surfing: bool,
    abilities: Abilities,
) -> bool {
    match collider {
        Collider::Wall => false,
        Collider::Cuttable => abilities.can_cut,
        Collider::Smashable => abilities.can_smash,
        Collider::Counter => direction != Direction::Down,
        _ if on_ground => passable_on_ground(direction, collider, surfing),
        _ => passable_off_ground(collider),
    }
}

fn passable_on_ground(direction: Direction, collider: Collider, surfing: bool) -> bool {
    if collider.is_ground() {
        return true;
    }
    if collider.is_water() {
        return surfing;
    }
    collider.ledge_direction() == Some(direction)
}

fn passable_off_ground(collider: Collider) -> bool {
    matches!(
        collider,
        Collider::GroundLift
            | Collider::GroundLand
            | Collider::Ground9
            | Collider::Elevated
            | Collider::ElevatedWater
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_colliders() -> impl Iterator<Item = Collider> {
        (0..=14u8).filter_map(Collider::from_code)
    }

    #[test]
    fn test_wall_blocks_everything() {
        for direction in Direction::ALL {
            for on_ground in [true, false] {
                for surfing in [true, false] {
                    assert!(!is_passable(direction, Collider::Wall, on_ground, surfing, Abilities::ALL));
                }
            }
        }
    }

    #[test]
    fn test_ability_obstacles_ignore_direction_and_elevation() {
        for direction in Direction::ALL {
            for on_ground in [true, false] {
                let cut = Abilities { can_cut: true, can_smash: false };
                let smash = Abilities { can_cut: false, can_smash: true };
                assert!(is_passable(direction, Collider::Cuttable, on_ground, false, cut));
                assert!(!is_passable(direction, Collider::Cuttable, on_ground, false, smash));
                assert!(is_passable(direction, Collider::Smashable, on_ground, false, smash));
                assert!(!is_passable(direction, Collider::Smashable, on_ground, false, cut));
            }
        }
    }

    #[test]
    fn test_ledges_only_one_way() {
        let pass = |d, c| is_passable(d, c, true, false, Abilities::NONE);
        assert!(pass(Direction::Down, Collider::LedgeDown));
        assert!(pass(Direction::Right, Collider::LedgeRight));
        assert!(pass(Direction::Left, Collider::LedgeLeft));

        for ledge in [Collider::LedgeDown, Collider::LedgeRight, Collider::LedgeLeft] {
            assert!(!pass(Direction::Up, ledge));
            assert!(!is_passable(Direction::Down, ledge, false, false, Abilities::NONE));
        }
        assert!(!pass(Direction::Left, Collider::LedgeDown));
        assert!(!pass(Direction::Down, Collider::LedgeRight));
        assert!(!pass(Direction::Right, Collider::LedgeLeft));
    }

    #[test]
    fn test_counter_rejects_down_only() {
        for on_ground in [true, false] {
            assert!(!is_passable(Direction::Down, Collider::Counter, on_ground, false, Abilities::NONE));
            for direction in [Direction::Up, Direction::Left, Direction::Right] {
                assert!(is_passable(direction, Collider::Counter, on_ground, false, Abilities::NONE));
            }
        }
    }

    #[test]
    fn test_water_needs_surf_on_ground() {
        for water in [Collider::Water, Collider::ElevatedWater] {
            assert!(!is_passable(Direction::Up, water, true, false, Abilities::NONE));
            assert!(is_passable(Direction::Up, water, true, true, Abilities::NONE));
        }
        assert!(is_passable(Direction::Left, Collider::ElevatedWater, false, false, Abilities::NONE));
        assert!(!is_passable(Direction::Left, Collider::Water, false, true, Abilities::NONE));
    }

    #[test]
    fn test_ground_sets() {
        let on: Vec<_> = all_colliders()
            .filter(|&c| is_passable(Direction::Up, c, true, false, Abilities::NONE))
            .map(Collider::code)
            .collect();
        assert_eq!(on, vec![0, 6, 7, 8, 9, 14]);

        let off: Vec<_> = all_colliders()
            .filter(|&c| is_passable(Direction::Up, c, false, false, Abilities::NONE))
            .map(Collider::code)
            .collect();
        assert_eq!(off, vec![7, 8, 9, 10, 12, 14]);
    }
}
