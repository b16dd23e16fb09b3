//! Error types for Concord kernel operations.
//!
//! Only configuration and programmer errors live here. Problems with the
//! checked documents themselves are data, see [`crate::StructuralErrorKind`].

/// Errors arising from invalid group configuration or misuse of the kernel.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// A level schema is malformed.
    #[error("invalid level schema: {0}")]
    InvalidSchema(String),

    /// A filter or path pattern is not a valid regular expression.
    #[error("invalid regex {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two members of one group name the same file.
    #[error("duplicate filename in group {group}: {filename}")]
    DuplicateFilename { group: String, filename: String },

    /// A group was declared without members.
    #[error("group {0} has no members")]
    EmptyGroup(String),

    /// Expected occurrence must be at least one.
    #[error("expected occurrence for {filename} must be positive, got {value}")]
    InvalidExpectedOccurrence { filename: String, value: usize },

    /// Counts were accumulated for a file outside the table's group.
    #[error("file is not part of the group: {0}")]
    UnknownFile(String),
}
