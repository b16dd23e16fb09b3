use crate::repair::RepairStage;
use std::path::PathBuf;

/// Errors raised while reading documents or walking a tree.
///
/// [`crate::FsDocumentLoader`] folds document errors into absent documents;
/// only the walker surfaces errors to callers, and only for the root.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every attempted stage failed; `stage` is the last one tried.
    #[error("undecodable JSON after {stage} stage: {source}")]
    Decode {
        stage: RepairStage,
        #[source]
        source: serde_json::Error,
    },

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
