//! Rendering of check results: the JSON payload and the human report.

use concord_kernel::{DirectoryReport, ExtractedItem, FileIssues, GroupReport};
use serde::Serialize;
use std::path::Path;

pub const CHECK_KIND: &str = "concord.consistency_check.v1";
pub const CHECK_SCHEMA: u32 = 1;

const BANNER: &str = "======================================================================";
const RULE: &str = "----------------------------------------------------------------------";
const TABLE_TITLE: &str = "occurrence of value in files:";
const MIN_FIRST_COLUMN: usize = 35;

/// Every group checked in one invocation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub schema: u32,
    pub check_kind: &'static str,
    pub root: String,
    pub config: String,
    pub result: &'static str,
    pub groups: Vec<GroupReport>,
}

impl RunReport {
    pub fn new(root: &Path, config: &Path, groups: Vec<GroupReport>) -> Self {
        let mismatch = groups.iter().any(|group| group.mismatch);
        Self {
            schema: CHECK_SCHEMA,
            check_kind: CHECK_KIND,
            root: root.display().to_string(),
            config: config.display().to_string(),
            result: if mismatch { "rejected" } else { "accepted" },
            groups,
        }
    }

    pub fn mismatch(&self) -> bool {
        self.result != "accepted"
    }
}

fn cell(item: &ExtractedItem) -> String {
    match item {
        ExtractedItem::Value(value) => format!("\"{value}\""),
        ExtractedItem::Error(kind) => kind.to_string(),
    }
}

fn item_list(items: &[ExtractedItem]) -> String {
    let cells: Vec<String> = items.iter().map(cell).collect();
    format!("[{}]", cells.join(", "))
}

fn issue_lines(lines: &mut Vec<String>, issues: &[FileIssues], what: &str) {
    for file in issues.iter().filter(|file| !file.items.is_empty()) {
        lines.push(format!(
            "Error: {} has {what}: {}",
            file.filename,
            item_list(&file.items)
        ));
    }
}

/// Occurrence table of the mismatched rows and the per-file issue lines.
/// Consistent directories render as nothing.
pub fn render_directory(report: &DirectoryReport) -> Vec<String> {
    if !report.mismatch() {
        return Vec::new();
    }
    let width = TABLE_TITLE.len().max(MIN_FIRST_COLUMN);
    let filenames = report.table.filenames();
    let mut lines = vec![
        format!("Directory: {}", report.directory.display()),
        String::new(),
    ];

    let mut title = format!("{TABLE_TITLE:<width$} |");
    for filename in filenames {
        title.push_str(&format!(" {filename} |"));
    }
    lines.push(title);

    for &index in &report.verdict.mismatched_rows {
        let row = &report.table.rows()[index];
        let mut line = format!("{:<width$} |", cell(&row.item));
        for (filename, count) in filenames.iter().zip(&row.counts) {
            line.push_str(&format!(" {count:>column$} |", column = filename.len()));
        }
        lines.push(line);
    }

    lines.push(String::new());
    issue_lines(&mut lines, &report.verdict.structural_issues, "issues");
    issue_lines(&mut lines, &report.verdict.missing_values, "missing values");
    lines.push(RULE.to_string());
    lines
}

/// Full human block for one group. Skipped paths for which `is_quiet`
/// holds are not listed.
pub fn render_group(report: &GroupReport, is_quiet: impl Fn(&Path) -> bool) -> String {
    let mut lines = vec![
        BANNER.to_string(),
        format!(
            "Checking values definitions consistency for group \"{}\"...",
            report.group
        ),
        String::new(),
    ];

    for directory in report.mismatched_directories() {
        lines.extend(render_directory(directory));
        lines.push(String::new());
    }

    let listed: Vec<String> = report
        .skipped
        .iter()
        .filter(|skip| !is_quiet(&skip.path))
        .map(|skip| {
            let label = skip.disposition.label();
            format!("{label}: {}", skip.path.display())
        })
        .collect();
    if !listed.is_empty() {
        lines.extend(listed);
        lines.push(String::new());
    }

    let status = if report.mismatch {
        "mismatch [ERROR]"
    } else {
        "valid [OK]"
    };
    lines.push(format!(
        "Group \"{}\": values definitions {status}",
        report.group
    ));
    lines.join("\n")
}

pub fn render_summary(mismatch: bool) -> &'static str {
    if mismatch {
        "SUMMARY: Values definitions consistency check ERROR!"
    } else {
        "SUMMARY: Values definitions consistency check OK!"
    }
}
