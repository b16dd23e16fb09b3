//! Level schemas: which keys to follow at each nesting depth.

use crate::error::KernelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from 1-based nesting level to the keys expected at that level.
///
/// Level 1 names keys directly under the document root; level `n + 1` names
/// keys under every value reached through a level-`n` key. Sequences do not
/// consume a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct LevelSchema {
    levels: BTreeMap<usize, Vec<String>>,
}

impl LevelSchema {
    /// Builds a schema, rejecting level 0, empty key lists, and schemas
    /// without a level 1 entry.
    pub fn new<I, K, S>(levels: I) -> Result<Self, KernelError>
    where
        I: IntoIterator<Item = (usize, K)>,
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = BTreeMap::new();
        for (level, keys) in levels {
            if level == 0 {
                return Err(KernelError::InvalidSchema(
                    "levels are 1-based; level 0 is not allowed".to_string(),
                ));
            }
            let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
            if keys.is_empty() {
                return Err(KernelError::InvalidSchema(format!(
                    "level {level} declares no keys"
                )));
            }
            if out.insert(level, keys).is_some() {
                return Err(KernelError::InvalidSchema(format!(
                    "level {level} declared twice"
                )));
            }
        }
        if !out.contains_key(&1) {
            return Err(KernelError::InvalidSchema(
                "level 1 keys are required".to_string(),
            ));
        }
        Ok(Self { levels: out })
    }

    /// Keys expected at `level`, if the schema describes it.
    pub fn keys_at(&self, level: usize) -> Option<&[String]> {
        self.levels.get(&level).map(Vec::as_slice)
    }

    /// Deepest level the schema describes.
    pub fn depth(&self) -> usize {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    pub fn levels(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.levels.iter().map(|(level, keys)| (*level, keys.as_slice()))
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for LevelSchema {
    type Error = KernelError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut levels = Vec::with_capacity(raw.len());
        for (level, keys) in raw {
            let parsed = level.trim().parse::<usize>().map_err(|_| {
                KernelError::InvalidSchema(format!(
                    "level key must be a positive integer: {level:?}"
                ))
            })?;
            levels.push((parsed, keys));
        }
        Self::new(levels)
    }
}

impl From<LevelSchema> for BTreeMap<String, Vec<String>> {
    fn from(schema: LevelSchema) -> Self {
        schema
            .levels
            .into_iter()
            .map(|(level, keys)| (level.to_string(), keys))
            .collect()
    }
}
