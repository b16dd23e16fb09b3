//! # Concord Kernel
//!
//! A logically single value (a port, an id, a queue name) is often declared
//! redundantly across several structured files. This crate decides whether
//! such a group of files still agrees.
//!
//! Structural problems are not faults here. A missing file, an empty field or
//! a document nested deeper than its schema all become [`StructuralErrorKind`]
//! items that are counted and cross-checked exactly like ordinary values.
//!
//! ## Architecture
//!
//! ```text
//! Document              ← Option<serde_json::Value>, produced by a loader
//!     │
//! extract()             ← LevelSchema-guided walk → ExtractedItem stream
//!     │
//! OccurrenceTable       ← item → (filename → count), one per directory
//!     │
//! evaluate()            ← member policies → Verdict
//!     │
//! check_directory()     ← drives the above for one directory of a group
//! ```

pub mod directory;
pub mod error;
pub mod extract;
pub mod group;
pub mod item;
pub mod schema;
pub mod table;
pub mod verdict;

pub use directory::{
    DirectoryReport, DocumentLoader, GroupReport, MemoryLoader, PathDisposition, SkippedPath,
    check_directory, check_tree,
};
pub use error::KernelError;
pub use extract::{Document, Extractor, extract};
pub use group::{CheckType, GroupMember, GroupMemberSpec, JsonsGroup, JsonsGroupSpec};
pub use item::{ExtractedItem, ScalarValue, StructuralErrorKind};
pub use schema::LevelSchema;
pub use table::{OccurrenceRow, OccurrenceTable};
pub use verdict::{FileIssues, Verdict, evaluate};
