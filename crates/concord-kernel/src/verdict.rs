//! Cross-file mismatch evaluation over an occurrence table.
//!
//! Every (row, member) pair resolves to either "suppressed" or "issue"; there
//! is no undecidable case and evaluation never fails.
//!
//! Structural error rows are issues for a member unless the member filters
//! that kind or never produced it. Value rows are issues unless one of:
//!
//! 1. the value's string form matches a missing-value filter of the member;
//! 2. the member has zero occurrences and the group has any structural error;
//! 3. the member has zero occurrences and is a subset member;
//! 4. the member has exactly its expected occurrence count.
//!
//! Rule 2 lets one broken file explain the absence of values elsewhere. It
//! applies group-wide, so a single structural error also hides genuine value
//! drift in unrelated files of the same directory.

use crate::group::{CheckType, GroupMember};
use crate::item::ExtractedItem;
use crate::table::OccurrenceTable;
use serde::Serialize;
use tracing::trace;

/// Issues found for one file, in table row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileIssues {
    pub filename: String,
    pub items: Vec<ExtractedItem>,
}

/// Outcome of evaluating one directory's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub mismatch: bool,
    /// Structural errors that were not suppressed, per member in group order.
    pub structural_issues: Vec<FileIssues>,
    /// Values with a missing or extra occurrence, per member in group order.
    pub missing_values: Vec<FileIssues>,
    /// Indices of table rows that produced at least one issue.
    pub mismatched_rows: Vec<usize>,
}

impl Verdict {
    pub fn structural_issues_for(&self, filename: &str) -> &[ExtractedItem] {
        issues_for(&self.structural_issues, filename)
    }

    pub fn missing_values_for(&self, filename: &str) -> &[ExtractedItem] {
        issues_for(&self.missing_values, filename)
    }
}

fn issues_for<'a>(issues: &'a [FileIssues], filename: &str) -> &'a [ExtractedItem] {
    issues
        .iter()
        .find(|file| file.filename == filename)
        .map(|file| file.items.as_slice())
        .unwrap_or(&[])
}

fn value_suppressed(
    member: &GroupMember,
    item: &ExtractedItem,
    count: usize,
    group_has_structural_error: bool,
) -> bool {
    if member.filters_missing_value(&item.to_string()) {
        return true;
    }
    if count == 0 && group_has_structural_error {
        return true;
    }
    if count == 0 && member.check_type == CheckType::IsSubset {
        return true;
    }
    count == member.expected_occurrence
}

/// Decides, per row and per member, whether the group is consistent.
pub fn evaluate(table: &OccurrenceTable, members: &[GroupMember]) -> Verdict {
    let group_has_structural_error = table.has_structural_error();
    let columns: Vec<Option<usize>> = members
        .iter()
        .map(|member| table.column(&member.filename))
        .collect();

    let mut structural_issues: Vec<FileIssues> = members
        .iter()
        .map(|member| FileIssues {
            filename: member.filename.clone(),
            items: Vec::new(),
        })
        .collect();
    let mut missing_values = structural_issues.clone();
    let mut mismatched_rows = Vec::new();

    for (row_index, row) in table.rows().iter().enumerate() {
        let mut row_mismatch = false;
        for (member_index, member) in members.iter().enumerate() {
            let count = columns[member_index]
                .map(|column| row.counts[column])
                .unwrap_or(0);

            match row.item.as_error() {
                Some(kind) => {
                    if member.filters_json_error(kind) || count == 0 {
                        continue;
                    }
                    structural_issues[member_index].items.push(row.item.clone());
                }
                None => {
                    if value_suppressed(member, &row.item, count, group_has_structural_error) {
                        continue;
                    }
                    missing_values[member_index].items.push(row.item.clone());
                }
            }
            trace!(file = %member.filename, item = %row.item, count, "occurrence mismatch");
            row_mismatch = true;
        }
        if row_mismatch {
            mismatched_rows.push(row_index);
        }
    }

    Verdict {
        mismatch: !mismatched_rows.is_empty(),
        structural_issues,
        missing_values,
        mismatched_rows,
    }
}
