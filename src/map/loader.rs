//! Binary Map Loader
//!
//! Decodes one map resource into a [`Map`]. The layout is fixed and
//! little-endian:
//!
//! ```text
//! i32 dimension_y, i32 dimension_x
//! u8  colliders[dimension_y][dimension_x]
//! i32 tiles1..tiles4[dimension_y][dimension_x]
//! str weather, i16 reserved, i16 reserved, u8 is_outside, u8 reserved
//! str region
//! i16 link_count,  link_count  × (i16 x, i16 y)
//! i16 npc_count,   npc_count   × npc record
//! ```
//!
//! `str` is a u16 character count followed by that many UTF-8 characters.
//! Any deviation fails the whole load; a partially decoded map is never
//! returned.

use std::io::{self, Cursor, Read};
use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;
use tracing::debug;

use crate::core::direction::Direction;
use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::map::npc::Npc;
use crate::map::tiles::Collider;
use crate::map::{Map, MapParts, TILE_LAYERS};

/// Bytes each cell occupies across the collider and tile layers.
const BYTES_PER_CELL: usize = 1 + TILE_LAYERS * 4;

/// Malformed map data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapFormatError {
    /// Buffer ended inside a section.
    #[error("map data truncated while reading {section}")]
    Truncated {
        /// Section being decoded
        section: &'static str,
    },
    /// Negative grid dimension in the header.
    #[error("negative map dimensions {dimension_x}x{dimension_y}")]
    NegativeDimension {
        /// Declared columns
        dimension_x: i32,
        /// Declared rows
        dimension_y: i32,
    },
    /// Declared grid does not fit in the buffer.
    #[error("{dimension_x}x{dimension_y} grid needs more than the {remaining} bytes left")]
    GridTooLarge {
        /// Declared columns
        dimension_x: i32,
        /// Declared rows
        dimension_y: i32,
        /// Bytes after the header
        remaining: usize,
    },
    /// Negative entry count.
    #[error("negative {section} count {count}")]
    NegativeCount {
        /// Table being decoded
        section: &'static str,
        /// Declared count
        count: i16,
    },
    /// Collider byte outside the known code set.
    #[error("unknown collider code {code} at ({x}, {y})")]
    UnknownCollider {
        /// Raw byte
        code: u8,
        /// Column
        x: i32,
        /// Row
        y: i32,
    },
    /// Link entry outside the collider grid.
    #[error("link ({x}, {y}) lies outside the {dimension_x}x{dimension_y} grid")]
    LinkOutOfBounds {
        /// Column
        x: i32,
        /// Row
        y: i32,
        /// Grid columns
        dimension_x: i32,
        /// Grid rows
        dimension_y: i32,
    },
    /// NPC facing byte is not a direction.
    #[error("npc record {index} has invalid direction {value}")]
    InvalidDirection {
        /// Record index in the NPC table
        index: usize,
        /// Raw byte
        value: u8,
    },
    /// String payload is not valid UTF-8.
    #[error("invalid UTF-8 in {section}")]
    InvalidString {
        /// Field being decoded
        section: &'static str,
    },
    /// Data left over after the NPC table.
    #[error("{count} trailing bytes after the npc table")]
    TrailingBytes {
        /// Unread byte count
        count: usize,
    },
}

/// Loader behaviour switches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Reject data after the NPC table.
    pub strict_trailing_bytes: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            strict_trailing_bytes: true,
        }
    }
}

/// Cursor over the resource bytes that tags failures with a section name.
struct MapReader<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> MapReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(bytes),
        }
    }

    fn remaining(&self) -> usize {
        let len = self.inner.get_ref().len() as u64;
        len.saturating_sub(self.inner.position()) as usize
    }

    fn read_u8(&mut self, section: &'static str) -> Result<u8, MapFormatError> {
        self.inner.read_u8().map_err(truncated(section))
    }

    fn read_i16(&mut self, section: &'static str) -> Result<i16, MapFormatError> {
        self.inner.read_i16::<LittleEndian>().map_err(truncated(section))
    }

    fn read_u16(&mut self, section: &'static str) -> Result<u16, MapFormatError> {
        self.inner.read_u16::<LittleEndian>().map_err(truncated(section))
    }

    fn read_i32(&mut self, section: &'static str) -> Result<i32, MapFormatError> {
        self.inner.read_i32::<LittleEndian>().map_err(truncated(section))
    }

    fn read_bytes(&mut self, len: usize, section: &'static str) -> Result<Vec<u8>, MapFormatError> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf).map_err(truncated(section))?;
        Ok(buf)
    }

    fn read_count(&mut self, section: &'static str) -> Result<usize, MapFormatError> {
        let count = self.read_i16(section)?;
        usize::try_from(count).map_err(|_| MapFormatError::NegativeCount { section, count })
    }

    /// u16 length in UTF-16 code units, then the UTF-8 encoded characters.
    ///
    /// Characters outside the BMP use two units of the count. A character
    /// that would run past the count is rejected.
    fn read_string(&mut self, section: &'static str) -> Result<String, MapFormatError> {
        let count = usize::from(self.read_u16(section)?);
        let mut out = String::with_capacity(count);
        let mut units = 0;
        let mut buf = [0u8; 4];
        while units < count {
            buf[0] = self.read_u8(section)?;
            let len = utf8_len(buf[0]).ok_or(MapFormatError::InvalidString { section })?;
            self.inner.read_exact(&mut buf[1..len]).map_err(truncated(section))?;
            let ch = std::str::from_utf8(&buf[..len])
                .ok()
                .and_then(|s| s.chars().next())
                .ok_or(MapFormatError::InvalidString { section })?;
            units += ch.len_utf16();
            if units > count {
                return Err(MapFormatError::InvalidString { section });
            }
            out.push(ch);
        }
        Ok(out)
    }
}

fn truncated(section: &'static str) -> impl Fn(io::Error) -> MapFormatError {
    move |_| MapFormatError::Truncated { section }
}

/// Encoded length of a UTF-8 sequence from its leading byte.
fn utf8_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

/// Decode a full map resource.
pub fn decode(bytes: &[u8], options: &LoaderOptions) -> Result<Map, MapFormatError> {
    let mut reader = MapReader::new(bytes);

    let dimension_y = reader.read_i32("header")?;
    let dimension_x = reader.read_i32("header")?;
    let (width, height) = match (usize::try_from(dimension_x), usize::try_from(dimension_y)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(MapFormatError::NegativeDimension { dimension_x, dimension_y }),
    };

    let remaining = reader.remaining();
    let cells = width
        .checked_mul(height)
        .filter(|cells| cells.checked_mul(BYTES_PER_CELL).is_some_and(|n| n <= remaining))
        .ok_or(MapFormatError::GridTooLarge { dimension_x, dimension_y, remaining })?;

    let raw = reader.read_bytes(cells, "colliders")?;
    for (i, &code) in raw.iter().enumerate() {
        if Collider::from_code(code).is_none() {
            return Err(MapFormatError::UnknownCollider {
                code,
                x: (i % width) as i32,
                y: (i / width) as i32,
            });
        }
    }
    let colliders = Grid::from_cells(width, height, raw)
        .ok_or(MapFormatError::Truncated { section: "colliders" })?;

    let tiles = [
        read_tile_layer(&mut reader, width, height, "tiles1")?,
        read_tile_layer(&mut reader, width, height, "tiles2")?,
        read_tile_layer(&mut reader, width, height, "tiles3")?,
        read_tile_layer(&mut reader, width, height, "tiles4")?,
    ];
    debug!(dimension_x, dimension_y, "map grids decoded");

    let weather = reader.read_string("weather")?;
    reader.read_i16("metadata")?;
    reader.read_i16("metadata")?;
    let is_outside = reader.read_u8("metadata")? != 0;
    reader.read_u8("metadata")?;
    let region = reader.read_string("region")?;

    let mut links = Grid::filled(width, height, false);
    let link_count = reader.read_count("links")?;
    for _ in 0..link_count {
        let x = i32::from(reader.read_i16("links")?);
        let y = i32::from(reader.read_i16("links")?);
        let cell = links.get_mut(x, y).ok_or(MapFormatError::LinkOutOfBounds {
            x,
            y,
            dimension_x,
            dimension_y,
        })?;
        *cell = true;
    }

    let npc_count = reader.read_count("npcs")?;
    let mut npcs = Vec::with_capacity(npc_count);
    for index in 0..npc_count {
        npcs.push(read_npc(&mut reader, index)?);
    }
    debug!(links = link_count, npcs = npc_count, "map tables decoded");

    let trailing = reader.remaining();
    if options.strict_trailing_bytes && trailing > 0 {
        return Err(MapFormatError::TrailingBytes { count: trailing });
    }

    Ok(Map::from_parts(MapParts {
        colliders,
        tiles,
        links,
        weather,
        is_outside,
        region,
        npcs,
    }))
}

fn read_tile_layer(
    reader: &mut MapReader<'_>,
    width: usize,
    height: usize,
    section: &'static str,
) -> Result<Grid<i32>, MapFormatError> {
    let mut cells = Vec::with_capacity(width * height);
    for _ in 0..width * height {
        cells.push(reader.read_i32(section)?);
    }
    Grid::from_cells(width, height, cells).ok_or(MapFormatError::Truncated { section })
}

fn read_npc(reader: &mut MapReader<'_>, index: usize) -> Result<Npc, MapFormatError> {
    let name = reader.read_string("npc name")?;
    let x = i32::from(reader.read_i16("npcs")?);
    let y = i32::from(reader.read_i16("npcs")?);
    let value = reader.read_u8("npcs")?;
    let direction = Direction::from_number(value)
        .ok_or(MapFormatError::InvalidDirection { index, value })?;
    let los_length = reader.read_u8("npcs")?;
    let npc_type = reader.read_i16("npcs")?;
    let path = reader.read_string("npc path")?;
    let is_battler = reader.read_i16("npcs")? != 0;
    let id = reader.read_i32("npcs")?;

    Ok(Npc::new(id, name, is_battler, npc_type, Point::new(x, y), direction, los_length, path))
}
