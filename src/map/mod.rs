//! Map Model
//!
//! The decoded grid model of a single map and its supporting pieces.
//!
//! ## Module Structure
//!
//! - `tiles`: collider enumeration and tile-code tables
//! - `npc`: NPC records and the template/live roster
//! - `loader`: binary decoding
//! - `encode`: binary encoding (fixtures and tooling)
//! - `resource`: named resource providers
//! - `query`: terrain query surface

pub mod tiles;
pub mod npc;
pub mod loader;
pub mod encode;
pub mod resource;
pub mod query;

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::grid::Grid;
use crate::core::hash::{ContentHasher, Fingerprint, fingerprint_hex};
use crate::core::point::Point;

pub use tiles::{Collider, Slider};
pub use npc::{Npc, NpcId, NpcRoster, RosterEvent, PATROL_LOS_THRESHOLD};
pub use loader::{LoaderOptions, MapFormatError};
pub use encode::{MapEncodeError, MapEncoder};
pub use resource::{DirectoryResources, MapLoadError, MemoryResources, ResourceError, ResourceProvider, load_map};

/// Number of tile layers stored per map.
pub const TILE_LAYERS: usize = 4;

/// A loaded map.
///
/// Grids and metadata are fixed at load; only the NPC roster and the link
/// destination registry change afterwards.
#[derive(Clone, Debug)]
pub struct Map {
    dimension_x: i32,
    dimension_y: i32,
    colliders: Grid<u8>,
    tiles: [Grid<i32>; TILE_LAYERS],
    links: Grid<bool>,
    link_destinations: BTreeMap<String, Vec<Point>>,
    weather: String,
    is_outside: bool,
    region: String,
    npcs: NpcRoster,
}

/// Everything the loader decodes, before it becomes a [`Map`].
pub(crate) struct MapParts {
    pub colliders: Grid<u8>,
    pub tiles: [Grid<i32>; TILE_LAYERS],
    pub links: Grid<bool>,
    pub weather: String,
    pub is_outside: bool,
    pub region: String,
    pub npcs: Vec<Npc>,
}

impl Map {
    pub(crate) fn from_parts(parts: MapParts) -> Self {
        let dimension_x = parts.colliders.width() as i32;
        let dimension_y = parts.colliders.height() as i32;
        Self {
            dimension_x,
            dimension_y,
            colliders: parts.colliders,
            tiles: parts.tiles,
            links: parts.links,
            link_destinations: BTreeMap::new(),
            weather: parts.weather,
            is_outside: parts.is_outside,
            region: parts.region,
            npcs: NpcRoster::new(parts.npcs),
        }
    }

    /// Decode a map with default (strict) loader options.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MapFormatError> {
        loader::decode(bytes, &LoaderOptions::default())
    }

    /// Decode a map with explicit loader options.
    pub fn from_bytes_with(bytes: &[u8], options: &LoaderOptions) -> Result<Self, MapFormatError> {
        loader::decode(bytes, options)
    }

    /// Collider/link grid columns.
    #[inline]
    pub fn dimension_x(&self) -> i32 {
        self.dimension_x
    }

    /// Collider/link grid rows.
    #[inline]
    pub fn dimension_y(&self) -> i32 {
        self.dimension_y
    }

    /// Semantic tile extent (one less than `dimension_x`).
    #[inline]
    pub fn width(&self) -> i32 {
        self.dimension_x - 1
    }

    /// Semantic tile extent (one less than `dimension_y`).
    #[inline]
    pub fn height(&self) -> i32 {
        self.dimension_y - 1
    }

    /// Whether `(x, y)` lies in the collider/link grid.
    #[inline]
    pub fn in_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.dimension_x && y >= 0 && y < self.dimension_y
    }

    /// Whether `(x, y)` lies in the semantic tile extent.
    #[inline]
    pub fn in_tile_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    /// Weather identifier.
    pub fn weather(&self) -> &str {
        &self.weather
    }

    /// Outdoor map flag.
    pub fn is_outside(&self) -> bool {
        self.is_outside
    }

    /// Region name.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Tile layer `layer` (1-based, 1..=4).
    pub fn tile_layer(&self, layer: usize) -> Option<&Grid<i32>> {
        layer.checked_sub(1).and_then(|i| self.tiles.get(i))
    }

    #[inline]
    pub(crate) fn tile(&self, layer: usize, x: i32, y: i32) -> Option<i32> {
        self.tiles[layer - 1].get(x, y).copied()
    }

    #[inline]
    pub(crate) fn raw_collider(&self, x: i32, y: i32) -> Option<u8> {
        self.colliders.get(x, y).copied()
    }

    /// NPC roster.
    pub fn npcs(&self) -> &NpcRoster {
        &self.npcs
    }

    /// Mutable NPC roster, for the session-sync collaborator.
    pub fn npcs_mut(&mut self) -> &mut NpcRoster {
        &mut self.npcs
    }

    /// Registered link destinations by group name.
    pub fn link_destinations(&self) -> &BTreeMap<String, Vec<Point>> {
        &self.link_destinations
    }

    /// Append a destination to a link group.
    pub fn register_link_destination(&mut self, name: impl Into<String>, target: Point) {
        self.link_destinations.entry(name.into()).or_default().push(target);
    }

    /// Replace a link group's destinations.
    pub fn set_link_destinations(&mut self, name: impl Into<String>, targets: Vec<Point>) {
        self.link_destinations.insert(name.into(), targets);
    }

    /// Number of link cells.
    pub fn link_count(&self) -> usize {
        self.links.cells().iter().filter(|&&link| link).count()
    }

    /// SHA-256 over the decoded content.
    ///
    /// Covers grids, metadata and the NPC template; the live roster and link
    /// registry are runtime state and are left out.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = ContentHasher::for_map();
        hasher.update_i32(self.dimension_x);
        hasher.update_i32(self.dimension_y);
        hasher.update_bytes(self.colliders.cells());
        for layer in &self.tiles {
            hasher.update_i32_grid(layer);
        }
        for link in self.links.cells() {
            hasher.update_bool(*link);
        }
        hasher.update_str(&self.weather);
        hasher.update_bool(self.is_outside);
        hasher.update_str(&self.region);
        hasher.update_u32(self.npcs.template().len() as u32);
        for npc in self.npcs.template() {
            hasher.update_i32(npc.id);
            hasher.update_str(&npc.name);
            hasher.update_bool(npc.is_battler);
            hasher.update_i32(i32::from(npc.npc_type));
            hasher.update_i32(npc.position.x);
            hasher.update_i32(npc.position.y);
            hasher.update_u8(npc.direction.to_number());
            hasher.update_u8(npc.los_length);
            hasher.update_str(&npc.path);
        }
        hasher.finalize()
    }

    /// Overview for logs and tooling.
    pub fn summary(&self, name: &str) -> MapSummary {
        MapSummary {
            name: name.to_string(),
            dimension_x: self.dimension_x,
            dimension_y: self.dimension_y,
            weather: self.weather.clone(),
            is_outside: self.is_outside,
            region: self.region.clone(),
            links: self.link_count(),
            npcs: self.npcs.template().len(),
            landmark: self.landmark(),
            fingerprint: fingerprint_hex(&self.fingerprint()),
        }
    }
}

/// Serializable overview of a loaded map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    /// Resource name the map was loaded under
    pub name: String,
    /// Collider grid columns
    pub dimension_x: i32,
    /// Collider grid rows
    pub dimension_y: i32,
    /// Weather identifier
    pub weather: String,
    /// Outdoor flag
    pub is_outside: bool,
    /// Region name
    pub region: String,
    /// Link cell count
    pub links: usize,
    /// NPCs in the template roster
    pub npcs: usize,
    /// First landmark cell, if any
    pub landmark: Option<Point>,
    /// Hex content fingerprint
    pub fingerprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::direction::Direction;

    fn sample() -> MapEncoder {
        let mut enc = MapEncoder::new(4, 3);
        enc.weather("rain").region("Kanto").outside(true);
        enc.link(1, 1);
        enc.npc(Npc::new(3, "Nurse", false, 1, Point::new(2, 1), Direction::Down, 0, ""));
        enc
    }

    #[test]
    fn test_extents() {
        let map = Map::from_bytes(&sample().encode().unwrap()).unwrap();
        assert_eq!(map.dimension_x(), 4);
        assert_eq!(map.dimension_y(), 3);
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert!(map.in_grid(3, 2));
        assert!(!map.in_tile_bounds(3, 2));
        assert!(map.tile_layer(0).is_none());
        assert!(map.tile_layer(4).is_some());
        assert!(map.tile_layer(5).is_none());
    }

    #[test]
    fn test_fingerprint_stable_and_content_sensitive() {
        let a = Map::from_bytes(&sample().encode().unwrap()).unwrap();
        let b = Map::from_bytes(&sample().encode().unwrap()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut other = sample();
        other.collider(0, 0, 1);
        let c = Map::from_bytes(&other.encode().unwrap()).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_runtime_state() {
        let mut map = Map::from_bytes(&sample().encode().unwrap()).unwrap();
        let before = map.fingerprint();
        map.npcs_mut().clear();
        map.register_link_destination("Route 1", Point::new(4, 4));
        assert_eq!(map.fingerprint(), before);
    }

    #[test]
    fn test_link_registry() {
        let mut map = Map::from_bytes(&sample().encode().unwrap()).unwrap();
        assert!(map.link_destinations().is_empty());
        map.register_link_destination("Cave", Point::new(1, 1));
        map.register_link_destination("Cave", Point::new(2, 2));
        assert_eq!(map.link_destinations()["Cave"].len(), 2);
        map.set_link_destinations("Cave", vec![Point::new(0, 0)]);
        assert_eq!(map.link_destinations()["Cave"], vec![Point::new(0, 0)]);
    }

    #[test]
    fn test_summary() {
        let map = Map::from_bytes(&sample().encode().unwrap()).unwrap();
        let summary = map.summary("Test Map");
        assert_eq!(summary.links, 1);
        assert_eq!(summary.npcs, 1);
        assert_eq!(summary.weather, "rain");
        assert!(summary.is_outside);
        assert_eq!(summary.fingerprint.len(), 64);
    }
}
