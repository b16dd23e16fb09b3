//! Group configuration: which files must agree, and under which policy.
//!
//! `*Spec` types are the serde surface (plain strings, defaults applied).
//! [`GroupMember`] and [`JsonsGroup`] are the validated, compiled forms the
//! verdict engine consumes. Both are immutable once built.

use crate::directory::PathDisposition;
use crate::error::KernelError;
use crate::item::StructuralErrorKind;
use crate::schema::LevelSchema;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const DEFAULT_INCLUDE_PATH: &str = r".*";
pub const DEFAULT_EXCLUDE_PATH: &str = r"\.git";

/// How strictly a file's occurrences are compared to the group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    /// Every value must occur exactly `expected_occurrence` times.
    #[default]
    Default,
    /// The file may omit values the rest of the group declares.
    IsSubset,
}

impl CheckType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::IsSubset => "is_subset",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_expected_occurrence() -> usize {
    1
}

/// Serde form of one group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupMemberSpec {
    pub filename: String,
    pub level_keys: LevelSchema,
    #[serde(default)]
    pub check_type: CheckType,
    #[serde(default = "default_expected_occurrence")]
    pub expected_occurrence: usize,
    #[serde(default)]
    pub missing_value_filters: Vec<String>,
    #[serde(default)]
    pub json_error_filters: Vec<StructuralErrorKind>,
}

/// Serde form of one named group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonsGroupSpec {
    pub name: String,
    #[serde(default)]
    pub include_paths: Vec<String>,
    #[serde(default)]
    pub exclude_paths: Vec<String>,
    pub members: Vec<GroupMemberSpec>,
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, KernelError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| KernelError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// One file of a group, with its compiled policy.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub filename: String,
    pub level_schema: LevelSchema,
    pub check_type: CheckType,
    pub expected_occurrence: usize,
    pub missing_value_filters: Vec<Regex>,
    pub json_error_filters: BTreeSet<StructuralErrorKind>,
}

impl GroupMember {
    /// A member with default policy: exact match, one occurrence, no filters.
    pub fn new(filename: impl Into<String>, level_schema: LevelSchema) -> Self {
        Self {
            filename: filename.into(),
            level_schema,
            check_type: CheckType::Default,
            expected_occurrence: 1,
            missing_value_filters: Vec::new(),
            json_error_filters: BTreeSet::new(),
        }
    }

    pub fn from_spec(spec: &GroupMemberSpec) -> Result<Self, KernelError> {
        Ok(Self {
            filename: spec.filename.clone(),
            level_schema: spec.level_keys.clone(),
            check_type: spec.check_type,
            expected_occurrence: spec.expected_occurrence,
            missing_value_filters: compile_patterns(&spec.missing_value_filters)?,
            json_error_filters: spec.json_error_filters.iter().copied().collect(),
        })
    }

    pub fn to_spec(&self) -> GroupMemberSpec {
        GroupMemberSpec {
            filename: self.filename.clone(),
            level_keys: self.level_schema.clone(),
            check_type: self.check_type,
            expected_occurrence: self.expected_occurrence,
            missing_value_filters: self
                .missing_value_filters
                .iter()
                .map(|re| re.as_str().to_string())
                .collect(),
            json_error_filters: self.json_error_filters.iter().copied().collect(),
        }
    }

    pub fn with_check_type(mut self, check_type: CheckType) -> Self {
        self.check_type = check_type;
        self
    }

    pub fn with_expected_occurrence(mut self, expected_occurrence: usize) -> Self {
        self.expected_occurrence = expected_occurrence;
        self
    }

    pub fn with_missing_value_filters<I, S>(mut self, patterns: I) -> Result<Self, KernelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        self.missing_value_filters = compile_patterns(&patterns)?;
        Ok(self)
    }

    pub fn with_json_error_filters(
        mut self,
        kinds: impl IntoIterator<Item = StructuralErrorKind>,
    ) -> Self {
        self.json_error_filters = kinds.into_iter().collect();
        self
    }

    /// True if the string form of a value matches any missing-value filter.
    pub fn filters_missing_value(&self, value: &str) -> bool {
        self.missing_value_filters
            .iter()
            .any(|filter| filter.is_match(value))
    }

    pub fn filters_json_error(&self, kind: StructuralErrorKind) -> bool {
        self.json_error_filters.contains(&kind)
    }
}

/// A validated, named set of files expected to declare consistent values.
#[derive(Debug, Clone)]
pub struct JsonsGroup {
    name: String,
    members: Vec<GroupMember>,
    include_paths: Vec<Regex>,
    exclude_paths: Vec<Regex>,
}

impl JsonsGroup {
    /// Validates membership: at least one member, unique filenames, positive
    /// expected occurrences. Path filters take their defaults.
    pub fn new(name: impl Into<String>, members: Vec<GroupMember>) -> Result<Self, KernelError> {
        let name = name.into();
        if members.is_empty() {
            return Err(KernelError::EmptyGroup(name));
        }
        let mut seen = BTreeSet::new();
        for member in &members {
            if !seen.insert(member.filename.as_str()) {
                return Err(KernelError::DuplicateFilename {
                    group: name,
                    filename: member.filename.clone(),
                });
            }
            if member.expected_occurrence == 0 {
                return Err(KernelError::InvalidExpectedOccurrence {
                    filename: member.filename.clone(),
                    value: member.expected_occurrence,
                });
            }
        }
        Ok(Self {
            name,
            members,
            include_paths: compile_patterns(&[DEFAULT_INCLUDE_PATH.to_string()])?,
            exclude_paths: compile_patterns(&[DEFAULT_EXCLUDE_PATH.to_string()])?,
        })
    }

    /// Replaces path filters. Empty lists fall back to the defaults.
    pub fn with_paths(
        mut self,
        include_paths: &[String],
        exclude_paths: &[String],
    ) -> Result<Self, KernelError> {
        if !include_paths.is_empty() {
            self.include_paths = compile_patterns(include_paths)?;
        }
        if !exclude_paths.is_empty() {
            self.exclude_paths = compile_patterns(exclude_paths)?;
        }
        Ok(self)
    }

    pub fn from_spec(spec: &JsonsGroupSpec) -> Result<Self, KernelError> {
        let members = spec
            .members
            .iter()
            .map(GroupMember::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(spec.name.clone(), members)?.with_paths(&spec.include_paths, &spec.exclude_paths)
    }

    pub fn to_spec(&self) -> JsonsGroupSpec {
        JsonsGroupSpec {
            name: self.name.clone(),
            include_paths: self
                .include_paths
                .iter()
                .map(|re| re.as_str().to_string())
                .collect(),
            exclude_paths: self
                .exclude_paths
                .iter()
                .map(|re| re.as_str().to_string())
                .collect(),
            members: self.members.iter().map(GroupMember::to_spec).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn filenames(&self) -> Vec<String> {
        self.members.iter().map(|m| m.filename.clone()).collect()
    }

    /// Exclusion wins over inclusion; anything else is omitted.
    pub fn classify(&self, path: &str) -> PathDisposition {
        if self.exclude_paths.iter().any(|re| re.is_match(path)) {
            PathDisposition::Excluded
        } else if self.include_paths.iter().any(|re| re.is_match(path)) {
            PathDisposition::Included
        } else {
            PathDisposition::Omitted
        }
    }
}
