//! Property-based tests for terrain queries and movement resolution.
//!
//! Maps are generated from random collider and tile codes drawn from the
//! known tables, so every property also exercises the loader.
//! Run with: cargo test --release prop_movement

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use pro_terrain::map::MapEncoder;
use pro_terrain::movement::is_passable;
use pro_terrain::{Abilities, Collider, Direction, Map, MotionState, MoveResult};

const SPECIAL_TILES: [i32; 11] = [0, 6, 248, 17577, 17580, 6662, 6663, 6670, 6671, 6686, 5437];

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn abilities() -> impl Strategy<Value = Abilities> {
    (any::<bool>(), any::<bool>()).prop_map(|(can_cut, can_smash)| Abilities { can_cut, can_smash })
}

fn collider() -> impl Strategy<Value = Collider> {
    (0u8..=14).prop_map(|code| Collider::from_code(code).unwrap())
}

/// Random map up to 12×12 with arbitrary colliders and tile codes.
fn random_map() -> impl Strategy<Value = Map> {
    (2usize..12, 2usize..12).prop_flat_map(|(w, h)| {
        let cells = w * h;
        (
            Just((w, h)),
            prop::collection::vec(0u8..=14, cells),
            prop::collection::vec((1usize..=3, prop::sample::select(SPECIAL_TILES.to_vec())), cells),
        )
            .prop_map(|((w, h), colliders, tiles)| {
                let mut enc = MapEncoder::new(w, h);
                for (i, (code, (layer, tile))) in colliders.into_iter().zip(tiles).enumerate() {
                    let (x, y) = ((i % w) as i32, (i / w) as i32);
                    enc.collider(x, y, code).tile(layer, x, y, tile);
                }
                Map::from_bytes(&enc.encode().unwrap()).unwrap()
            })
    })
}

fn near_grid(map: &Map, state: &MotionState) -> bool {
    (-1..=map.dimension_x()).contains(&state.x) && (-1..=map.dimension_y()).contains(&state.y)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Queries never panic and answer "absent" off the map.
    #[test]
    fn prop_queries_total(map in random_map(), x in -20i32..20, y in -20i32..20) {
        let inside = map.in_grid(x, y);
        let code = map.collider(x, y);
        prop_assert_eq!(code == -1, !inside);
        if !inside {
            prop_assert!(!map.has_link(x, y));
            prop_assert!(!map.is_ice(x, y));
            prop_assert!(!map.is_grass(x, y));
            prop_assert!(map.slider_at(x, y).is_none());
        }
        if !map.in_tile_bounds(x, y) {
            prop_assert!(!map.is_water(x, y));
            prop_assert!(!map.is_landmark(x, y));
            prop_assert!(!map.is_normal_ground(x, y));
        }
    }

    /// Step evaluation is a pure function of its inputs.
    #[test]
    fn prop_evaluate_deterministic(
        map in random_map(),
        d in direction(),
        x in -2i32..14,
        y in -2i32..14,
        ground in any::<bool>(),
        surf in any::<bool>(),
        ab in abilities(),
    ) {
        let first = map.evaluate_step(d, x, y, ground, surf, ab);
        let second = map.evaluate_step(d, x, y, ground, surf, ab);
        prop_assert_eq!(first, second);
        if !map.in_grid(x, y) {
            prop_assert_eq!(first, MoveResult::Fail);
        }
    }

    /// Walls are never passable.
    #[test]
    fn prop_wall_blocks(d in direction(), ground in any::<bool>(), surf in any::<bool>(), ab in abilities()) {
        prop_assert!(!is_passable(d, Collider::Wall, ground, surf, ab));
    }

    /// Cuttable and smashable cells depend on exactly one ability each.
    #[test]
    fn prop_ability_obstacles(d in direction(), ground in any::<bool>(), surf in any::<bool>(), ab in abilities()) {
        prop_assert_eq!(is_passable(d, Collider::Cuttable, ground, surf, ab), ab.can_cut);
        prop_assert_eq!(is_passable(d, Collider::Smashable, ground, surf, ab), ab.can_smash);
    }

    /// Downward travel never enters a counter.
    #[test]
    fn prop_counter_rejects_down(c in collider(), ground in any::<bool>(), surf in any::<bool>(), ab in abilities()) {
        if c == Collider::Counter {
            prop_assert!(!is_passable(Direction::Down, c, ground, surf, ab));
        }
    }

    /// Ice slides end near the grid after a bounded number of steps.
    #[test]
    fn prop_ice_slide_terminates(map in random_map(), d in direction(), x in 0i32..12, y in 0i32..12) {
        let (x, y) = (x % map.dimension_x(), y % map.dimension_y());
        let mut state = MotionState::on_ground_at(x, y);
        let outcome = map.resolve_ice_slide(d, &mut state);

        // a ledge jump can carry one cell past the last legal step
        prop_assert!(near_grid(&map, &state));
        let limit = (map.dimension_x() * map.dimension_y() + 1) as usize;
        prop_assert!(outcome.steps <= limit);
        // sliding is a straight line unless a ledge jump nudged it
        let (dx, dy) = d.delta();
        let travelled = (state.x - x, state.y - y);
        prop_assert!(travelled.0 * dy == 0 && travelled.1 * dx == 0);
    }

    /// Conveyor chains always end, including on cyclic layouts.
    #[test]
    fn prop_slider_chain_terminates(map in random_map(), x in 0i32..12, y in 0i32..12, ground in any::<bool>()) {
        let (x, y) = (x % map.dimension_x(), y % map.dimension_y());
        let mut state = MotionState { x, y, on_ground: ground, surfing: false };
        let outcome = map.resolve_slider_chain(&mut state);
        prop_assert!(near_grid(&map, &state));
        prop_assert!(outcome.steps <= (map.dimension_x() * map.dimension_y() * 2 + 1) as usize);
    }

    /// A failed walk never changes the traveller's state.
    #[test]
    fn prop_failed_walk_is_noop(
        map in random_map(),
        d in direction(),
        x in 0i32..12,
        y in 0i32..12,
        ground in any::<bool>(),
        surf in any::<bool>(),
        ab in abilities(),
    ) {
        let (x, y) = (x % map.dimension_x(), y % map.dimension_y());
        let start = MotionState { x, y, on_ground: ground, surfing: surf };
        let mut state = start;
        let outcome = map.walk(d, &mut state, ab);
        if outcome.result == MoveResult::Fail {
            prop_assert!(!outcome.moved);
            prop_assert_eq!(state, start);
        }
    }
}
