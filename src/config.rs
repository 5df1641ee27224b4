//! Engine Configuration
//!
//! Where maps are read from and how strictly they are decoded, plus the
//! forced-movement guard. Read from the environment by the binary; library
//! callers usually build it directly.

use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use crate::map::loader::LoaderOptions;
use crate::map::resource::DirectoryResources;
use crate::movement::forced::ForcedMoveLimits;

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding map resources.
    pub resources_dir: PathBuf,
    /// File extension of map resources, without the dot.
    pub resource_extension: String,
    /// Reject bytes after the NPC table.
    pub strict_trailing_bytes: bool,
    /// Forced-movement step guard. 0 derives it from the map size.
    pub max_forced_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("Resources"),
            resource_extension: DirectoryResources::DEFAULT_EXTENSION.to_string(),
            strict_trailing_bytes: true,
            max_forced_steps: 0,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            resources_dir: lookup("TERRAIN_RESOURCES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.resources_dir),
            resource_extension: lookup("TERRAIN_RESOURCE_EXT")
                .map(|v| v.trim_start_matches('.').to_string())
                .unwrap_or(defaults.resource_extension),
            strict_trailing_bytes: lookup("TERRAIN_STRICT")
                .map(|v| !(v == "false" || v == "0"))
                .unwrap_or(defaults.strict_trailing_bytes),
            max_forced_steps: lookup("TERRAIN_MAX_FORCED_STEPS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_forced_steps),
        }
    }

    /// Loader switches.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            strict_trailing_bytes: self.strict_trailing_bytes,
        }
    }

    /// Forced-movement guard.
    pub fn forced_limits(&self) -> ForcedMoveLimits {
        match self.max_forced_steps {
            0 => ForcedMoveLimits::default(),
            n => ForcedMoveLimits::with_max_steps(n),
        }
    }

    /// Directory provider rooted at `resources_dir`.
    pub fn resources(&self) -> DirectoryResources {
        DirectoryResources::with_extension(self.resources_dir.clone(), self.resource_extension.clone())
    }
}
