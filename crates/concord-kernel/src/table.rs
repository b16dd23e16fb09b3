//! Occurrence table: item → (filename → count) for one directory of a group.

use crate::error::KernelError;
use crate::item::ExtractedItem;
use serde::Serialize;
use std::collections::HashMap;

/// Counts of one item across every file of the group, in group order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceRow {
    pub item: ExtractedItem,
    pub counts: Vec<usize>,
}

/// Per-directory occurrence counts.
///
/// Columns are the group's filenames in member order. A row is created with
/// an explicit zero for every file the first time any file yields its item,
/// so "absent" is always a zero rather than a missing key. Rows keep
/// first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct OccurrenceTable {
    filenames: Vec<String>,
    rows: Vec<OccurrenceRow>,
    #[serde(skip)]
    index: HashMap<ExtractedItem, usize>,
}

impl OccurrenceTable {
    pub fn new(filenames: Vec<String>) -> Self {
        Self {
            filenames,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn rows(&self) -> &[OccurrenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, filename: &str) -> Option<usize> {
        self.filenames.iter().position(|name| name == filename)
    }

    /// Adds one file's extracted items to the table.
    pub fn accumulate(
        &mut self,
        filename: &str,
        items: impl IntoIterator<Item = ExtractedItem>,
    ) -> Result<(), KernelError> {
        let column = self
            .column(filename)
            .ok_or_else(|| KernelError::UnknownFile(filename.to_string()))?;
        let width = self.filenames.len();
        for item in items {
            let row = match self.index.get(&item) {
                Some(row) => *row,
                None => {
                    self.index.insert(item.clone(), self.rows.len());
                    self.rows.push(OccurrenceRow {
                        item,
                        counts: vec![0; width],
                    });
                    self.rows.len() - 1
                }
            };
            self.rows[row].counts[column] += 1;
        }
        Ok(())
    }

    /// Count of `item` in `filename`, or `None` if either is unknown.
    pub fn count(&self, item: &ExtractedItem, filename: &str) -> Option<usize> {
        let row = self.index.get(item)?;
        let column = self.column(filename)?;
        Some(self.rows[*row].counts[column])
    }

    /// True if any file of the group produced any structural error.
    pub fn has_structural_error(&self) -> bool {
        self.rows.iter().any(|row| row.item.is_error())
    }
}
