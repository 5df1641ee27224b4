//! # PRO Terrain
//!
//! Offline map-collision and tile-interaction rules for PRO maps, so movement
//! can be planned and simulated without asking the server about every step.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        PRO TERRAIN                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Primitives                               │
//! │  ├── direction.rs - Cardinal directions                      │
//! │  ├── point.rs     - Grid cells and Chebyshev distance        │
//! │  ├── grid.rs      - Row-major 2D storage                     │
//! │  └── hash.rs      - Content fingerprints                     │
//! │                                                              │
//! │  map/             - Map model (loaded once, read-mostly)     │
//! │  ├── tiles.rs     - Collider codes and tile tables           │
//! │  ├── npc.rs       - NPC records and roster                   │
//! │  ├── loader.rs    - Binary decoding                          │
//! │  ├── encode.rs    - Binary encoding                          │
//! │  ├── resource.rs  - Named resource providers                 │
//! │  └── query.rs     - Terrain query surface                    │
//! │                                                              │
//! │  movement/        - Movement resolution                      │
//! │  ├── passability.rs - Collider passability table             │
//! │  ├── step.rs      - Single-step evaluation                   │
//! │  ├── forced.rs    - Ice slides and conveyor chains           │
//! │  ├── interact.rs  - NPC interaction check                    │
//! │  └── walk.rs      - Step plus forced movement                │
//! │                                                              │
//! │  config.rs        - Engine configuration                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Queries are total: out-of-map coordinates answer "absent"
//! - Movement illegality is a [`MoveResult::Fail`], never an error
//! - Forced movement always terminates
//! - No HashMap (BTreeMap for sorted iteration)
//!
//! The engine is synchronous. A [`Map`]'s grids can be shared freely; the
//! NPC roster needs a single writer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod map;
pub mod movement;
pub mod config;

// Re-export commonly used types
pub use crate::core::direction::Direction;
pub use crate::core::point::{distance, Point};
pub use map::{Collider, LoaderOptions, Map, MapFormatError, MapLoadError, MapSummary, Npc, NpcRoster, RosterEvent};
pub use map::resource::{load_map, DirectoryResources, MemoryResources, ResourceError, ResourceProvider};
pub use movement::{Abilities, ForcedMove, ForcedMoveLimits, ForcedStop, MotionState, MoveResult, WalkOutcome};
pub use config::EngineConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
