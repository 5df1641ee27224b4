//! Terrain Query Surface
//!
//! Read-only classification of map cells. Every query is total: coordinates
//! outside the map yield the "absent" answer instead of failing, because
//! movement code routinely looks at neighbours past the edges.
//!
//! Collider and link lookups cover the full `dimension_x × dimension_y`
//! grid. Grass, water, normal-ground, ice and landmark checks only cover the
//! semantic `width × height` extent, one row and column smaller.

use crate::core::direction::Direction;
use crate::core::point::Point;
use crate::map::tiles::{Collider, Slider, GRASS_TILES, ICE_TILES, LANDMARK_TILE, slider_for_tile};
use crate::map::Map;

impl Map {
    /// Collider code at `(x, y)`, or [`Collider::NONE`] (-1) outside the grid.
    #[inline]
    pub fn collider(&self, x: i32, y: i32) -> i32 {
        self.raw_collider(x, y).map_or(Collider::NONE, i32::from)
    }

    /// Typed collider at `(x, y)`.
    #[inline]
    pub fn collider_kind(&self, x: i32, y: i32) -> Option<Collider> {
        self.raw_collider(x, y).and_then(Collider::from_code)
    }

    /// Whether `(x, y)` triggers a map transition.
    #[inline]
    pub fn has_link(&self, x: i32, y: i32) -> bool {
        self.links.get(x, y).copied().unwrap_or(false)
    }

    /// Tall grass on layer 2 or 3.
    pub fn is_grass(&self, x: i32, y: i32) -> bool {
        self.in_tile_bounds(x, y)
            && [2, 3]
                .iter()
                .filter_map(|&layer| self.tile(layer, x, y))
                .any(|tile| GRASS_TILES.contains(&tile))
    }

    /// Surfable water (collider 5 or 12).
    pub fn is_water(&self, x: i32, y: i32) -> bool {
        self.in_tile_bounds(x, y) && self.collider_kind(x, y).is_some_and(Collider::is_water)
    }

    /// Plain walkable ground that is not a link cell.
    pub fn is_normal_ground(&self, x: i32, y: i32) -> bool {
        self.in_tile_bounds(x, y)
            && self.collider_kind(x, y).is_some_and(Collider::is_ground)
            && !self.has_link(x, y)
    }

    /// Ice on any of layers 1-3.
    pub fn is_ice(&self, x: i32, y: i32) -> bool {
        self.in_tile_bounds(x, y)
            && [1, 2, 3]
                .iter()
                .filter_map(|&layer| self.tile(layer, x, y))
                .any(|tile| ICE_TILES.contains(&tile))
    }

    /// Landmark tile on layer 2 or 3.
    pub fn is_landmark(&self, x: i32, y: i32) -> bool {
        self.in_tile_bounds(x, y)
            && (self.tile(2, x, y) == Some(LANDMARK_TILE) || self.tile(3, x, y) == Some(LANDMARK_TILE))
    }

    /// First landmark cell in row-major order.
    ///
    /// Scans the grid on every call. Maps are expected to hold at most one.
    pub fn landmark(&self) -> Option<Point> {
        (0..self.height())
            .flat_map(|y| (0..self.width()).map(move |x| Point::new(x, y)))
            .find(|p| self.is_landmark(p.x, p.y))
    }

    /// Slider table entry at `(x, y)`; layer 1 wins over 2, 2 over 3.
    pub fn slider_at(&self, x: i32, y: i32) -> Option<Slider> {
        [1, 2, 3]
            .iter()
            .filter_map(|&layer| self.tile(layer, x, y))
            .find_map(slider_for_tile)
    }

    /// Direction a conveyor at `(x, y)` pushes in, if any.
    #[inline]
    pub fn slider_direction(&self, x: i32, y: i32) -> Option<Direction> {
        self.slider_at(x, y).and_then(Slider::direction)
    }

    /// Destinations of link group `name`, nearest first.
    ///
    /// Ordering is stable, so equally distant targets keep their
    /// registration order. `None` for an unregistered group.
    pub fn nearest_link_targets(&self, name: &str, x: i32, y: i32) -> Option<Vec<Point>> {
        let mut targets = self.link_destinations.get(name)?.clone();
        let origin = Point::new(x, y);
        targets.sort_by_key(|target| origin.distance_to(*target));
        Some(targets)
    }

    /// Whether a traveller at `(x, y)` can start surfing onto a neighbour.
    ///
    /// Only on the ground. Water above only counts when the current cell is
    /// not a counter.
    pub fn can_surf_from(&self, x: i32, y: i32, is_on_ground: bool) -> bool {
        if !is_on_ground {
            return false;
        }
        let water = |x: i32, y: i32| self.collider_kind(x, y).is_some_and(Collider::is_water);
        let on_counter = self.collider_kind(x, y) == Some(Collider::Counter);

        (water(x, y - 1) && !on_counter)
            || water(x, y + 1)
            || water(x - 1, y)
            || water(x + 1, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::encode::MapEncoder;

    fn decode(enc: &MapEncoder) -> Map {
        Map::from_bytes(&enc.encode().unwrap()).unwrap()
    }

    #[test]
    fn test_collider_sentinel() {
        let mut enc = MapEncoder::new(3, 3);
        enc.collider(1, 1, 1);
        let map = decode(&enc);

        assert_eq!(map.collider(1, 1), 1);
        assert_eq!(map.collider(0, 0), 0);
        assert_eq!(map.collider(2, 2), 0);
        assert_eq!(map.collider(3, 0), -1);
        assert_eq!(map.collider(0, -1), -1);
        assert_eq!(map.collider_kind(1, 1), Some(Collider::Wall));
        assert_eq!(map.collider_kind(9, 9), None);
    }

    #[test]
    fn test_links_cover_full_grid() {
        let mut enc = MapEncoder::new(3, 3);
        enc.link(2, 2);
        let map = decode(&enc);
        assert!(map.has_link(2, 2));
        assert!(!map.has_link(1, 1));
        assert!(!map.has_link(3, 3));
    }

    #[test]
    fn test_semantic_extent_is_one_smaller() {
        let mut enc = MapEncoder::new(3, 3);
        enc.collider(2, 0, 5).collider(1, 1, 5);
        enc.tile(2, 2, 1, 6).tile(3, 0, 0, 248);
        let map = decode(&enc);

        assert!(map.is_water(1, 1));
        // column 2 is in the collider grid but outside the semantic extent
        assert!(!map.is_water(2, 0));
        assert!(!map.is_grass(2, 1));
        assert!(map.is_grass(0, 0));
        assert!(!map.is_normal_ground(2, 2));
    }

    #[test]
    fn test_normal_ground_excludes_links() {
        let mut enc = MapEncoder::new(4, 4);
        enc.collider(1, 0, 7).collider(2, 0, 10).link(0, 1);
        let map = decode(&enc);

        assert!(map.is_normal_ground(0, 0));
        assert!(map.is_normal_ground(1, 0));
        assert!(!map.is_normal_ground(2, 0));
        assert!(!map.is_normal_ground(0, 1));
    }

    #[test]
    fn test_ice_layers() {
        let mut enc = MapEncoder::new(4, 4);
        enc.tile(1, 0, 0, 17577).tile(2, 1, 0, 17580).tile(3, 2, 0, 17577).tile(4, 0, 1, 17577);
        let map = decode(&enc);

        assert!(map.is_ice(0, 0));
        assert!(map.is_ice(1, 0));
        assert!(map.is_ice(2, 0));
        // layer 4 never counts
        assert!(!map.is_ice(0, 1));
    }

    #[test]
    fn test_landmark_scan() {
        let mut enc = MapEncoder::new(5, 5);
        assert_eq!(decode(&enc).landmark(), None);

        enc.tile(3, 3, 1, LANDMARK_TILE).tile(2, 1, 2, LANDMARK_TILE);
        let map = decode(&enc);
        assert!(map.is_landmark(3, 1));
        assert_eq!(map.landmark(), Some(Point::new(3, 1)));
    }

    #[test]
    fn test_slider_layer_precedence() {
        let mut enc = MapEncoder::new(3, 3);
        enc.tile(3, 0, 0, 6663).tile(2, 0, 0, 6670);
        enc.tile(3, 1, 0, 6662);
        enc.tile(1, 2, 0, 6719);
        let map = decode(&enc);

        assert_eq!(map.slider_direction(0, 0), Some(Direction::Left));
        assert_eq!(map.slider_direction(1, 0), Some(Direction::Up));
        assert_eq!(map.slider_at(2, 0), Some(Slider::Stop));
        assert_eq!(map.slider_direction(2, 0), None);
        assert_eq!(map.slider_at(1, 1), None);
        assert_eq!(map.slider_at(-4, 100), None);
    }

    #[test]
    fn test_nearest_link_targets() {
        let mut map = decode(&MapEncoder::new(2, 2));
        assert_eq!(map.nearest_link_targets("Route 2", 0, 0), None);

        map.set_link_destinations(
            "Route 2",
            vec![Point::new(10, 10), Point::new(3, 1), Point::new(1, 3), Point::new(0, 1)],
        );
        let ordered = map.nearest_link_targets("Route 2", 0, 0).unwrap();
        assert_eq!(
            ordered,
            vec![Point::new(0, 1), Point::new(3, 1), Point::new(1, 3), Point::new(10, 10)]
        );
    }

    #[test]
    fn test_can_surf_from() {
        let mut enc = MapEncoder::new(5, 5);
        enc.collider(2, 1, 5);
        let map = decode(&enc);
        assert!(map.can_surf_from(2, 2, true));
        assert!(!map.can_surf_from(2, 2, false));
        assert!(!map.can_surf_from(0, 0, true));

        // water above a counter does not count
        enc.collider(2, 2, 14);
        let map = decode(&enc);
        assert!(!map.can_surf_from(2, 2, true));

        // water below a counter still does
        enc.collider(2, 3, 12);
        let map = decode(&enc);
        assert!(map.can_surf_from(2, 2, true));
    }
}
