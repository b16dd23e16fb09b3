//! Directory orchestration: one group, one directory, one verdict.
//!
//! Every call owns a fresh [`OccurrenceTable`]; nothing is shared between
//! directories, so callers may evaluate directories in any order.

use crate::error::KernelError;
use crate::extract::{Document, extract};
use crate::group::JsonsGroup;
use crate::table::OccurrenceTable;
use crate::verdict::{Verdict, evaluate};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source of decoded documents, keyed by directory and filename.
///
/// Loading never fails from the kernel's point of view: anything unusable is
/// reported as `None` and becomes a `NO_FILE` item.
pub trait DocumentLoader {
    fn load(&self, directory: &Path, filename: &str) -> Document;
}

impl<F> DocumentLoader for F
where
    F: Fn(&Path, &str) -> Document,
{
    fn load(&self, directory: &Path, filename: &str) -> Document {
        self(directory, filename)
    }
}

/// In-memory loader for embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<(PathBuf, String), Value>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        directory: impl Into<PathBuf>,
        filename: impl Into<String>,
        document: Value,
    ) -> &mut Self {
        self.documents
            .insert((directory.into(), filename.into()), document);
        self
    }

    pub fn with(
        mut self,
        directory: impl Into<PathBuf>,
        filename: impl Into<String>,
        document: Value,
    ) -> Self {
        self.insert(directory, filename, document);
        self
    }
}

impl DocumentLoader for MemoryLoader {
    fn load(&self, directory: &Path, filename: &str) -> Document {
        self.documents
            .get(&(directory.to_path_buf(), filename.to_string()))
            .cloned()
    }
}

/// Result of checking one directory against one group.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub table: OccurrenceTable,
    pub verdict: Verdict,
}

impl DirectoryReport {
    pub fn mismatch(&self) -> bool {
        self.verdict.mismatch
    }
}

/// How a walked directory relates to a group's path filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathDisposition {
    Included,
    Excluded,
    Omitted,
}

impl PathDisposition {
    pub fn label(self) -> &'static str {
        match self {
            Self::Included => "included path",
            Self::Excluded => "excluded path",
            Self::Omitted => "omitted path",
        }
    }
}

/// A walked directory that was not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub disposition: PathDisposition,
}

/// Result of checking every included directory of a tree against one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub mismatch: bool,
    pub directories: Vec<DirectoryReport>,
    pub skipped: Vec<SkippedPath>,
}

impl GroupReport {
    pub fn mismatched_directories(&self) -> impl Iterator<Item = &DirectoryReport> {
        self.directories.iter().filter(|report| report.mismatch())
    }
}

/// Loads, extracts and counts every member of `group` in `directory`, then
/// evaluates the group once.
pub fn check_directory(
    loader: &impl DocumentLoader,
    directory: &Path,
    group: &JsonsGroup,
) -> Result<DirectoryReport, KernelError> {
    let mut table = OccurrenceTable::new(group.filenames());
    for member in group.members() {
        let document = loader.load(directory, &member.filename);
        debug!(
            directory = %directory.display(),
            file = %member.filename,
            present = document.is_some(),
            "extracting"
        );
        table.accumulate(
            &member.filename,
            extract(document.as_ref(), &member.level_schema),
        )?;
    }
    let verdict = evaluate(&table, group.members());
    debug!(
        directory = %directory.display(),
        items = table.len(),
        mismatch = verdict.mismatch,
        "directory evaluated"
    );
    Ok(DirectoryReport {
        directory: directory.to_path_buf(),
        table,
        verdict,
    })
}

/// Checks every walked directory the group's path filters include.
pub fn check_tree<I>(
    loader: &impl DocumentLoader,
    directories: I,
    group: &JsonsGroup,
) -> Result<GroupReport, KernelError>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    for directory in directories {
        match group.classify(&directory.to_string_lossy()) {
            PathDisposition::Included => {
                reports.push(check_directory(loader, &directory, group)?);
            }
            disposition => skipped.push(SkippedPath {
                path: directory,
                disposition,
            }),
        }
    }
    let mismatch = reports.iter().any(DirectoryReport::mismatch);
    info!(
        group = group.name(),
        checked = reports.len(),
        skipped = skipped.len(),
        mismatch,
        "group evaluated"
    );
    Ok(GroupReport {
        group: group.name().to_string(),
        mismatch,
        directories: reports,
        skipped,
    })
}
