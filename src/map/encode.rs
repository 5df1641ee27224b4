//! Map Encoding
//!
//! Writes the binary map layout the loader reads. Used to synthesize
//! fixtures for tests and benches, and by tooling that patches maps.

use thiserror::Error;

use crate::core::grid::Grid;
use crate::map::npc::{Npc, NpcId};
use crate::map::tiles::{Collider, Slider, ICE_TILES, tile_for_slider};
use crate::map::TILE_LAYERS;

/// Content that does not fit the binary layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapEncodeError {
    /// Grid extents exceed the i32 header fields.
    #[error("{width}x{height} grid does not fit the map header")]
    GridTooLarge {
        /// Grid columns
        width: usize,
        /// Grid rows
        height: usize,
    },
    /// Table longer than its i16 count allows.
    #[error("{len} {section} entries exceed the i16 count")]
    TooManyEntries {
        /// Table being encoded
        section: &'static str,
        /// Entry count
        len: usize,
    },
    /// NPC coordinate outside the i16 range.
    #[error("npc {id} coordinate {value} does not fit an i16")]
    CoordinateOutOfRange {
        /// NPC identifier
        id: NpcId,
        /// Offending coordinate
        value: i32,
    },
    /// String longer than its u16 prefix allows.
    #[error("{section} string of {units} UTF-16 units exceeds the u16 prefix")]
    StringTooLong {
        /// Field being encoded
        section: &'static str,
        /// Length in UTF-16 code units
        units: usize,
    },
}

/// Builder for a map resource in its binary form.
///
/// Starts as open ground with empty tile layers, no links and no NPCs.
#[derive(Clone, Debug)]
pub struct MapEncoder {
    colliders: Grid<u8>,
    tiles: [Grid<i32>; TILE_LAYERS],
    weather: String,
    region: String,
    is_outside: bool,
    links: Vec<(i16, i16)>,
    npcs: Vec<Npc>,
}

impl MapEncoder {
    /// Blank map with the given collider grid extents.
    pub fn new(dimension_x: usize, dimension_y: usize) -> Self {
        let layer = Grid::filled(dimension_x, dimension_y, 0i32);
        Self {
            colliders: Grid::filled(dimension_x, dimension_y, Collider::Open.code()),
            tiles: [layer.clone(), layer.clone(), layer.clone(), layer],
            weather: String::new(),
            region: String::new(),
            is_outside: false,
            links: Vec::new(),
            npcs: Vec::new(),
        }
    }

    /// Set a raw collider code. Out-of-grid cells are ignored.
    pub fn collider(&mut self, x: i32, y: i32, code: u8) -> &mut Self {
        if let Some(cell) = self.colliders.get_mut(x, y) {
            *cell = code;
        }
        self
    }

    /// Set every collider to `code`.
    pub fn fill_colliders(&mut self, code: u8) -> &mut Self {
        let (w, h) = (self.colliders.width(), self.colliders.height());
        self.colliders = Grid::filled(w, h, code);
        self
    }

    /// Set a tile code on `layer` (1..=4). Out-of-range input is ignored.
    pub fn tile(&mut self, layer: usize, x: i32, y: i32, code: i32) -> &mut Self {
        if let Some(grid) = layer.checked_sub(1).and_then(|i| self.tiles.get_mut(i)) {
            if let Some(cell) = grid.get_mut(x, y) {
                *cell = code;
            }
        }
        self
    }

    /// Mark a cell as ice on layer 1.
    pub fn ice(&mut self, x: i32, y: i32) -> &mut Self {
        self.tile(1, x, y, ICE_TILES[0])
    }

    /// Place a slider tile on layer 1.
    pub fn slider(&mut self, x: i32, y: i32, slider: Slider) -> &mut Self {
        self.tile(1, x, y, tile_for_slider(slider))
    }

    /// Weather identifier.
    pub fn weather(&mut self, weather: &str) -> &mut Self {
        self.weather = weather.to_string();
        self
    }

    /// Region name.
    pub fn region(&mut self, region: &str) -> &mut Self {
        self.region = region.to_string();
        self
    }

    /// Outdoor flag.
    pub fn outside(&mut self, is_outside: bool) -> &mut Self {
        self.is_outside = is_outside;
        self
    }

    /// Add a link entry. Coordinates are written as given.
    pub fn link(&mut self, x: i16, y: i16) -> &mut Self {
        self.links.push((x, y));
        self
    }

    /// Add an NPC record.
    pub fn npc(&mut self, npc: Npc) -> &mut Self {
        self.npcs.push(npc);
        self
    }

    /// Produce the resource bytes.
    ///
    /// Fails when a count, coordinate or string does not fit its field.
    pub fn encode(&self) -> Result<Vec<u8>, MapEncodeError> {
        let (width, height) = (self.colliders.width(), self.colliders.height());
        let grid_too_large = || MapEncodeError::GridTooLarge { width, height };
        let dimension_x = i32::try_from(width).map_err(|_| grid_too_large())?;
        let dimension_y = i32::try_from(height).map_err(|_| grid_too_large())?;

        let mut out = Vec::new();
        put_i32(&mut out, dimension_y);
        put_i32(&mut out, dimension_x);

        out.extend_from_slice(self.colliders.cells());
        for layer in &self.tiles {
            for tile in layer.cells() {
                put_i32(&mut out, *tile);
            }
        }

        put_string(&mut out, &self.weather, "weather")?;
        put_i16(&mut out, 0);
        put_i16(&mut out, 0);
        out.push(u8::from(self.is_outside));
        out.push(0);
        put_string(&mut out, &self.region, "region")?;

        put_i16(&mut out, entry_count(self.links.len(), "links")?);
        for (x, y) in &self.links {
            put_i16(&mut out, *x);
            put_i16(&mut out, *y);
        }

        put_i16(&mut out, entry_count(self.npcs.len(), "npcs")?);
        for npc in &self.npcs {
            let coordinate = |value: i32| {
                i16::try_from(value).map_err(|_| MapEncodeError::CoordinateOutOfRange { id: npc.id, value })
            };
            put_string(&mut out, &npc.name, "npc name")?;
            put_i16(&mut out, coordinate(npc.position.x)?);
            put_i16(&mut out, coordinate(npc.position.y)?);
            out.push(npc.direction.to_number());
            out.push(npc.los_length);
            put_i16(&mut out, npc.npc_type);
            put_string(&mut out, &npc.path, "npc path")?;
            put_i16(&mut out, i16::from(npc.is_battler));
            put_i32(&mut out, npc.id);
        }
        Ok(out)
    }
}

fn entry_count(len: usize, section: &'static str) -> Result<i16, MapEncodeError> {
    i16::try_from(len).map_err(|_| MapEncodeError::TooManyEntries { section, len })
}

fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// u16 length in UTF-16 code units followed by the UTF-8 bytes.
fn put_string(out: &mut Vec<u8>, value: &str, section: &'static str) -> Result<(), MapEncodeError> {
    let units = value.encode_utf16().count();
    let prefix = u16::try_from(units).map_err(|_| MapEncodeError::StringTooLong { section, units })?;
    out.extend_from_slice(&prefix.to_le_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}
