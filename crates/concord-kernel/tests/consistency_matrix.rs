//! Integration tests: the example matrix of group policies.
//!
//! Each group names files `fileA.json` … `fileD.json` whose level-1 key is
//! `A1` … `D1`. A file given `None` is absent from the directory.

use concord_kernel::{
    CheckType, DirectoryReport, ExtractedItem, GroupMember, JsonsGroup, LevelSchema, MemoryLoader,
    StructuralErrorKind, check_directory,
};
use serde_json::{Map, Value, json};
use std::path::Path;

const DIR: &str = "./fixture";
const LETTERS: [&str; 4] = ["A", "B", "C", "D"];

fn schema(letter: &str, depth: usize) -> LevelSchema {
    LevelSchema::new((1..=depth).map(|level| (level, vec![format!("{letter}{level}")])))
        .expect("fixture schema should build")
}

fn member(letter: &str, depth: usize) -> GroupMember {
    GroupMember::new(format!("file{letter}.json"), schema(letter, depth))
}

fn keyed(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}

fn group(members: Vec<GroupMember>) -> JsonsGroup {
    JsonsGroup::new("fixture", members).expect("fixture group should build")
}

fn plain_group(files: usize, depth: usize) -> JsonsGroup {
    group(
        LETTERS[..files]
            .iter()
            .map(|letter| member(letter, depth))
            .collect(),
    )
}

/// `{"X1": list}` for every provided list; missing entries stay absent.
fn run(group: &JsonsGroup, lists: &[Option<Value>]) -> DirectoryReport {
    let mut loader = MemoryLoader::new();
    for (letter, list) in LETTERS.iter().zip(lists) {
        if let Some(list) = list {
            loader.insert(
                DIR,
                format!("file{letter}.json"),
                keyed(format!("{letter}1"), list.clone()),
            );
        }
    }
    check_directory(&loader, Path::new(DIR), group).expect("check should run")
}

fn run_documents(group: &JsonsGroup, documents: &[Option<Value>]) -> DirectoryReport {
    let mut loader = MemoryLoader::new();
    for (letter, document) in LETTERS.iter().zip(documents) {
        if let Some(document) = document {
            loader.insert(DIR, format!("file{letter}.json"), document.clone());
        }
    }
    check_directory(&loader, Path::new(DIR), group).expect("check should run")
}

/// `[{"X2": v}, …]` for a two-level schema.
fn nested(letter: &str, values: &[i64]) -> Option<Value> {
    Some(Value::Array(
        values
            .iter()
            .map(|v| keyed(format!("{letter}2"), json!(v)))
            .collect(),
    ))
}

fn flat(values: &[i64]) -> Option<Value> {
    Some(json!(values))
}

// ── Exact match (two-level nesting) ────────────────────────────────────────

#[test]
fn identical_files_pass() {
    let report = run(
        &plain_group(3, 2),
        &[
            nested("A", &[1, 2, 3]),
            nested("B", &[1, 2, 3]),
            nested("C", &[1, 2, 3]),
        ],
    );
    assert!(!report.mismatch());
}

#[test]
fn one_missing_value_fails_and_names_the_file() {
    let report = run(
        &plain_group(3, 2),
        &[
            nested("A", &[1, 2]),
            nested("B", &[1, 2, 3]),
            nested("C", &[1, 2, 3]),
        ],
    );
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.missing_values_for("fileA.json"),
        &[ExtractedItem::from(3)]
    );
    assert!(report.verdict.missing_values_for("fileB.json").is_empty());
}

#[test]
fn one_extra_value_fails() {
    let report = run(
        &plain_group(3, 2),
        &[
            nested("A", &[1, 2, 3, 4]),
            nested("B", &[1, 2, 3]),
            nested("C", &[1, 2, 3]),
        ],
    );
    assert!(report.mismatch());
    // The peers lack 4 as far as the exact-match policy is concerned.
    assert_eq!(
        report.verdict.missing_values_for("fileB.json"),
        &[ExtractedItem::from(4)]
    );
}

#[test]
fn repeated_value_fails_for_the_repeating_file() {
    let report = run(
        &plain_group(3, 2),
        &[
            nested("A", &[1, 2, 3, 1]),
            nested("B", &[1, 2, 3]),
            nested("C", &[1, 2, 3]),
        ],
    );
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.missing_values_for("fileA.json"),
        &[ExtractedItem::from(1)]
    );
    assert_eq!(
        report.table.count(&ExtractedItem::from(1), "fileA.json"),
        Some(2)
    );
}

// ── Subset members ─────────────────────────────────────────────────────────

fn subset_group(files: usize) -> JsonsGroup {
    let mut members = vec![member("A", 2).with_check_type(CheckType::IsSubset)];
    members.extend(LETTERS[1..files].iter().map(|letter| member(letter, 2)));
    group(members)
}

#[test]
fn subset_member_may_hold_fewer_values() {
    let report = run(
        &subset_group(2),
        &[nested("A", &[1, 2, 3]), nested("B", &[1, 2, 3, 4, 5])],
    );
    assert!(!report.mismatch());
}

#[test]
fn subset_member_with_agreeing_full_members_passes() {
    let report = run(
        &subset_group(3),
        &[
            nested("A", &[1, 2, 3]),
            nested("B", &[1, 2, 3, 4, 5]),
            nested("C", &[1, 2, 3, 4, 5]),
        ],
    );
    assert!(!report.mismatch());
}

#[test]
fn full_members_must_still_agree_with_each_other() {
    let report = run(
        &subset_group(3),
        &[
            nested("A", &[1, 2, 3]),
            nested("B", &[1, 2, 3, 4, 5, 6]),
            nested("C", &[1, 2, 3, 4, 5]),
        ],
    );
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.missing_values_for("fileC.json"),
        &[ExtractedItem::from(6)]
    );
    assert!(report.verdict.missing_values_for("fileA.json").is_empty());
}

#[test]
fn duplicates_in_full_members_fail_but_subset_member_is_clean() {
    let report = run(
        &subset_group(3),
        &[
            nested("A", &[1, 2, 3]),
            nested("B", &[1, 2, 3, 4, 5, 5]),
            nested("C", &[1, 2, 3, 4, 5, 5]),
        ],
    );
    assert!(report.mismatch());
    assert!(report.verdict.missing_values_for("fileA.json").is_empty());
    assert_eq!(
        report.verdict.missing_values_for("fileB.json"),
        &[ExtractedItem::from(5)]
    );
    assert_eq!(
        report.verdict.missing_values_for("fileC.json"),
        &[ExtractedItem::from(5)]
    );
}

#[test]
fn subset_member_with_a_duplicate_is_still_flagged() {
    let report = run(
        &subset_group(2),
        &[nested("A", &[1, 1]), nested("B", &[1, 2])],
    );
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.missing_values_for("fileA.json"),
        &[ExtractedItem::from(1)]
    );
}

#[test]
fn subset_member_below_expected_occurrence_is_flagged() {
    let fourfold = group(vec![
        member("A", 2)
            .with_check_type(CheckType::IsSubset)
            .with_expected_occurrence(4),
        member("B", 2).with_expected_occurrence(4),
    ]);
    let report = run(
        &fourfold,
        &[nested("A", &[7, 7]), nested("B", &[7, 7, 7, 7])],
    );
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.missing_values_for("fileA.json"),
        &[ExtractedItem::from(7)]
    );
    assert!(report.verdict.missing_values_for("fileB.json").is_empty());
}

// ── Three-level and one-level nesting ──────────────────────────────────────

fn three_level(letter: &str, values: &[i64]) -> Option<Value> {
    Some(Value::Array(
        values
            .iter()
            .map(|v| {
                let leaf = keyed(format!("{letter}3"), json!(v));
                keyed(format!("{letter}2"), json!([leaf]))
            })
            .collect(),
    ))
}

#[test]
fn three_level_identical_files_pass() {
    let report = run(
        &plain_group(2, 3),
        &[three_level("A", &[1, 2, 3]), three_level("B", &[1, 2, 3])],
    );
    assert!(!report.mismatch());
}

#[test]
fn three_level_missing_value_fails() {
    let report = run(
        &plain_group(2, 3),
        &[three_level("A", &[1, 2]), three_level("B", &[1, 2, 3])],
    );
    assert!(report.mismatch());
}

#[test]
fn one_level_lists_compare() {
    let group = plain_group(2, 1);
    assert!(!run(&group, &[flat(&[1]), flat(&[1])]).mismatch());
    assert!(run(&group, &[flat(&[1]), flat(&[1, 2])]).mismatch());
}

// ── Structural errors ──────────────────────────────────────────────────────

#[test]
fn absent_file_fails() {
    let report = run(&plain_group(2, 2), &[nested("A", &[1]), None]);
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.structural_issues_for("fileB.json"),
        &[ExtractedItem::Error(StructuralErrorKind::NoFile)]
    );
}

#[test]
fn empty_files_fail() {
    let report = run_documents(&plain_group(2, 2), &[Some(json!({})), Some(json!({}))]);
    assert!(report.mismatch());
    let file_empty = ExtractedItem::Error(StructuralErrorKind::FileEmpty);
    assert_eq!(report.table.count(&file_empty, "fileA.json"), Some(1));
    assert_eq!(report.table.count(&file_empty, "fileB.json"), Some(1));
}

#[test]
fn empty_field_fails() {
    let report = run(&plain_group(2, 2), &[nested("A", &[1]), flat(&[])]);
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.structural_issues_for("fileB.json"),
        &[ExtractedItem::Error(StructuralErrorKind::FieldEmpty)]
    );
}

#[test]
fn wrong_keys_fail_and_are_counted_for_the_offending_file_only() {
    let report = run(
        &plain_group(2, 2),
        &[nested("A", &[1]), Some(json!([{"Y2": 1}]))],
    );
    assert!(report.mismatch());
    let wrong_keys = ExtractedItem::Error(StructuralErrorKind::WrongKeys);
    assert_eq!(report.table.count(&wrong_keys, "fileA.json"), Some(0));
    assert_eq!(report.table.count(&wrong_keys, "fileB.json"), Some(1));
}

#[test]
fn nesting_deeper_than_schema_fails() {
    let report = run(
        &plain_group(2, 2),
        &[three_level("A", &[1]), three_level("B", &[1])],
    );
    assert!(report.mismatch());
    let missing_nested = ExtractedItem::Error(StructuralErrorKind::MissingNestedKey);
    assert_eq!(
        report.verdict.structural_issues_for("fileA.json"),
        std::slice::from_ref(&missing_nested)
    );
    assert_eq!(
        report.verdict.structural_issues_for("fileB.json"),
        &[missing_nested]
    );
}

// ── Error filters and error dominance ──────────────────────────────────────

fn filtered_group() -> JsonsGroup {
    group(vec![
        member("A", 1),
        member("B", 1).with_check_type(CheckType::IsSubset),
        member("C", 1)
            .with_check_type(CheckType::IsSubset)
            .with_json_error_filters([StructuralErrorKind::NoFile]),
        member("D", 1)
            .with_check_type(CheckType::IsSubset)
            .with_json_error_filters([StructuralErrorKind::NoFile]),
    ])
}

#[test]
fn filtered_group_with_all_files_present_passes() {
    let report = run(
        &filtered_group(),
        &[flat(&[1]), flat(&[1]), flat(&[1]), flat(&[1])],
    );
    assert!(!report.mismatch());
}

#[test]
fn unfiltered_absent_file_fails() {
    for absent in 0..2 {
        let mut lists = vec![flat(&[1]), flat(&[1]), flat(&[1]), flat(&[1])];
        lists[absent] = None;
        let report = run(&filtered_group(), &lists);
        assert!(report.mismatch(), "file {} absent", LETTERS[absent]);
    }
}

#[test]
fn unfiltered_structural_errors_fail_in_subset_member() {
    let documents = [
        json!({}),
        json!({"B1": []}),
        json!({"Y1": [1]}),
        json!({"B1": [{"B2": 1}]}),
    ];
    for document in documents {
        let report = run_documents(
            &filtered_group(),
            &[
                Some(json!({"A1": [1]})),
                Some(document.clone()),
                Some(json!({"C1": [1]})),
                Some(json!({"D1": [1]})),
            ],
        );
        assert!(report.mismatch(), "document {document:?}");
        assert_eq!(report.verdict.structural_issues_for("fileB.json").len(), 1);
    }
}

#[test]
fn filtered_absent_file_passes() {
    for absent in 2..4 {
        let mut lists = vec![flat(&[1]), flat(&[1]), flat(&[1]), flat(&[1])];
        lists[absent] = None;
        let report = run(&filtered_group(), &lists);
        assert!(!report.mismatch(), "file {} absent", LETTERS[absent]);
    }
}

#[test]
fn filtered_absent_default_member_masks_all_missing_values() {
    let group = group(vec![
        member("A", 1),
        member("B", 1),
        member("C", 1),
        member("D", 1).with_json_error_filters([StructuralErrorKind::NoFile]),
    ]);
    let report = run(&group, &[flat(&[1, 2]), flat(&[1, 2]), flat(&[1, 2]), None]);
    assert!(!report.mismatch());
}

// ── Missing-value filters ──────────────────────────────────────────────────

fn value_filter_group() -> JsonsGroup {
    group(vec![
        member("A", 1),
        member("B", 1)
            .with_missing_value_filters([r"4", r"5"])
            .expect("filters should compile"),
    ])
}

#[test]
fn value_filters_identical_files_pass() {
    let report = run(&value_filter_group(), &[flat(&[1, 2, 3]), flat(&[1, 2, 3])]);
    assert!(!report.mismatch());
}

#[test]
fn filtered_values_may_be_missing() {
    let report = run(
        &value_filter_group(),
        &[flat(&[1, 2, 3, 4, 5]), flat(&[1, 2, 3])],
    );
    assert!(!report.mismatch());
}

#[test]
fn filters_do_not_apply_to_peers() {
    let report = run(
        &value_filter_group(),
        &[flat(&[1, 2, 3]), flat(&[1, 2, 3, 4, 5])],
    );
    assert!(report.mismatch());
    assert_eq!(
        report.verdict.missing_values_for("fileA.json"),
        &[ExtractedItem::from(4), ExtractedItem::from(5)]
    );
}

// ── Reporting ──────────────────────────────────────────────────────────────

fn summary(report: &DirectoryReport) -> String {
    let mut lines = Vec::new();
    for index in &report.verdict.mismatched_rows {
        let row = &report.table.rows()[*index];
        let counts: Vec<String> = row.counts.iter().map(usize::to_string).collect();
        lines.push(format!("{} -> [{}]", row.item, counts.join(", ")));
    }
    for file in &report.verdict.structural_issues {
        for item in &file.items {
            lines.push(format!("{} has issue {item}", file.filename));
        }
    }
    for file in &report.verdict.missing_values {
        for item in &file.items {
            lines.push(format!("{} has missing value {item}", file.filename));
        }
    }
    lines.join("\n")
}

#[test]
fn mismatch_summary_lists_rows_in_first_seen_order() {
    let report = run(
        &plain_group(3, 2),
        &[
            nested("A", &[1, 2]),
            Some(json!([{"B2": 1}, {"B2": 2}, {"B2": 3}, {"Y2": 4}])),
            nested("C", &[1, 2, 3]),
        ],
    );
    insta::assert_snapshot!(summary(&report), @r"
    WRONG_KEYS -> [0, 1, 0]
    fileB.json has issue WRONG_KEYS
    ");
}
