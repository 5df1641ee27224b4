//! Map Resources
//!
//! Maps are addressed by name and fetched through a [`ResourceProvider`], so
//! the loader does not care whether they live on disk, in an archive or in
//! memory.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::map::loader::{LoaderOptions, MapFormatError};
use crate::map::Map;

/// Resource store errors.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource under this name.
    #[error("map resource not found: {0}")]
    NotFound(String),
    /// The store failed while reading.
    #[error("failed to read map resource {name}: {source}")]
    Io {
        /// Resource name
        name: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Map loading errors.
#[derive(Debug, Error)]
pub enum MapLoadError {
    /// Fetching the bytes failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// The bytes are not a valid map.
    #[error("map {name} is malformed: {source}")]
    Format {
        /// Resource name
        name: String,
        /// Decoder error
        #[source]
        source: MapFormatError,
    },
}

/// Named store of raw map resources.
pub trait ResourceProvider {
    /// Whether a resource exists under `name`.
    fn exists(&self, name: &str) -> bool;

    /// Raw bytes of the resource.
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Fetch and decode the map called `name`.
pub fn load_map<P>(provider: &P, name: &str, options: &LoaderOptions) -> Result<Map, MapLoadError>
where
    P: ResourceProvider + ?Sized,
{
    let bytes = provider.load(name)?;
    debug!(map = name, bytes = bytes.len(), "map resource fetched");

    let map = Map::from_bytes_with(&bytes, options).map_err(|source| MapLoadError::Format {
        name: name.to_string(),
        source,
    })?;

    info!(
        map = name,
        dimension_x = map.dimension_x(),
        dimension_y = map.dimension_y(),
        links = map.link_count(),
        npcs = map.npcs().template().len(),
        "map loaded"
    );
    Ok(map)
}

// =============================================================================
// DIRECTORY PROVIDER
// =============================================================================

/// Resources stored as `<root>/<name>.<extension>` files.
#[derive(Clone, Debug)]
pub struct DirectoryResources {
    root: PathBuf,
    extension: String,
}

impl DirectoryResources {
    /// Default file extension for map resources.
    pub const DEFAULT_EXTENSION: &'static str = "dat";

    /// Provider over `root` with the default extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, Self::DEFAULT_EXTENSION)
    }

    /// Provider over `root` with a custom extension.
    pub fn with_extension(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Directory the provider reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a resource name maps to.
    ///
    /// Returns `None` for names that would escape the root directory.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return None;
        }
        Some(self.root.join(format!("{}.{}", name, self.extension)))
    }
}

impl ResourceProvider for DirectoryResources {
    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_some_and(|path| path.is_file())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self
            .path_for(name)
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))?;
        std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ResourceError::NotFound(name.to_string()),
            _ => ResourceError::Io {
                name: name.to_string(),
                source,
            },
        })
    }
}

// =============================================================================
// MEMORY PROVIDER
// =============================================================================

/// Resources held in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryResources {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryResources {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }

    /// Resource names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ResourceProvider for MemoryResources {
    fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }
}
