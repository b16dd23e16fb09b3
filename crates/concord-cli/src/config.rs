//! TOML group configuration.
//!
//! ```toml
//! quiet_paths = ['^\.[/\\]?$', '\.git']
//!
//! [[groups]]
//! name = "ports"
//! include_paths = ['services/']
//!
//! [[groups.members]]
//! filename = "configuration.json"
//! level_keys = { 1 = ["config"], 2 = ["port"] }
//! ```

use concord_kernel::{JsonsGroup, JsonsGroupSpec, KernelError};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Ignored paths matching these are not listed in the human report.
pub const DEFAULT_QUIET_PATHS: [&str; 3] = [r"^\.[/\\]?$", r"\.git", r"\.vscode"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("group {name:?}: {source}")]
    Group {
        name: String,
        #[source]
        source: KernelError,
    },

    #[error("invalid quiet path regex {pattern:?}: {source}")]
    InvalidQuietPath {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate group name: {0}")]
    DuplicateGroup(String),

    #[error("no groups configured in {0}")]
    NoGroups(PathBuf),

    #[error("unknown group: {0}")]
    UnknownGroup(String),
}

fn default_quiet_paths() -> Vec<String> {
    DEFAULT_QUIET_PATHS.iter().map(|p| p.to_string()).collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default = "default_quiet_paths")]
    quiet_paths: Vec<String>,
    #[serde(default)]
    groups: Vec<JsonsGroupSpec>,
}

/// Validated configuration: compiled groups in file order.
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    quiet_paths: Vec<Regex>,
    groups: Vec<JsonsGroup>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        if file.groups.is_empty() {
            return Err(ConfigError::NoGroups(path.to_path_buf()));
        }

        let quiet_paths = file
            .quiet_paths
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidQuietPath {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = BTreeSet::new();
        let mut groups = Vec::with_capacity(file.groups.len());
        for spec in &file.groups {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateGroup(spec.name.clone()));
            }
            let group = JsonsGroup::from_spec(spec).map_err(|source| ConfigError::Group {
                name: spec.name.clone(),
                source,
            })?;
            groups.push(group);
        }

        Ok(Self {
            path: path.to_path_buf(),
            quiet_paths,
            groups,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn groups(&self) -> &[JsonsGroup] {
        &self.groups
    }

    /// Groups named in `names`, in configuration order; all groups when
    /// `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<&JsonsGroup>, ConfigError> {
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.groups.iter().any(|group| group.name() == **name))
        {
            return Err(ConfigError::UnknownGroup(unknown.clone()));
        }
        Ok(self
            .groups
            .iter()
            .filter(|group| names.is_empty() || names.iter().any(|name| name == group.name()))
            .collect())
    }

    pub fn is_quiet(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.quiet_paths.iter().any(|re| re.is_match(&path))
    }
}
