//! Sandbox Manifest
//!
//! TOML description of the mounts a sandbox starts with:
//!
//! ```toml
//! compression_level = 9
//!
//! [[mount]]
//! path = "/skills/demo"
//! dir = "skills/demo"
//!
//! [[mount]]
//! path = "/etc"
//! files = { motd = "hello" }
//! ```
//!
//! Relative `dir` entries are resolved against the manifest's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fs::{FsError, SnapshotOptions};
use crate::sandbox::{MountOptions, SandboxOptions};
use crate::source::{DirectorySource, InMemorySource};

/// Manifest errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read manifest '{path}': {message}")]
    Read { path: String, message: String },

    #[error("invalid manifest: {0}")]
    Parse(String),

    #[error("mount '{path}': {reason}")]
    InvalidMount { path: String, reason: String },

    #[error(transparent)]
    Fs(#[from] FsError),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MountConfig {
    pub path: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub files: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SandboxConfig {
    #[serde(default)]
    pub compression_level: Option<u32>,
    #[serde(default, rename = "mount")]
    pub mounts: Vec<MountConfig>,
}

impl SandboxConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text)
    }

    /// Build sandbox options, resolving relative directories against `base_dir`.
    pub fn into_options(self, base_dir: &Path) -> Result<SandboxOptions, ConfigError> {
        let mut snapshot = SnapshotOptions::default();
        if let Some(level) = self.compression_level {
            if level > 9 {
                return Err(ConfigError::Parse(format!(
                    "compression_level must be 0-9, got {}",
                    level
                )));
            }
            snapshot.compression_level = level;
        }

        let mounts = self
            .mounts
            .into_iter()
            .map(|m| m.into_mount(base_dir))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SandboxOptions { mounts, snapshot })
    }
}

impl MountConfig {
    fn into_mount(self, base_dir: &Path) -> Result<MountOptions, ConfigError> {
        match (self.dir, self.files) {
            (Some(dir), None) => {
                let root = if dir.is_absolute() { dir } else { base_dir.join(dir) };
                Ok(MountOptions::new(self.path, DirectorySource::new(root)?))
            }
            (None, Some(files)) => Ok(MountOptions::new(self.path, InMemorySource::from_files(files)?)),
            (Some(_), Some(_)) => Err(ConfigError::InvalidMount {
                path: self.path,
                reason: "set either `dir` or `files`, not both".to_string(),
            }),
            (None, None) => Err(ConfigError::InvalidMount {
                path: self.path,
                reason: "one of `dir` or `files` is required".to_string(),
            }),
        }
    }
}
