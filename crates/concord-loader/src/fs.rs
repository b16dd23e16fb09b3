use crate::error::LoaderError;
use crate::repair::{RepairStage, decode};
use concord_kernel::{Document, DocumentLoader};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Reads `directory/filename` from disk.
///
/// A missing file, empty or whitespace-only text, and text that stays
/// undecodable after repair all load as an absent document.
#[derive(Debug, Clone, Copy)]
pub struct FsDocumentLoader {
    max_stage: RepairStage,
}

impl Default for FsDocumentLoader {
    fn default() -> Self {
        Self::lenient()
    }
}

impl FsDocumentLoader {
    pub fn lenient() -> Self {
        Self {
            max_stage: RepairStage::QuotedTokens,
        }
    }

    pub fn strict() -> Self {
        Self {
            max_stage: RepairStage::Strict,
        }
    }

    /// Reads one document, surfacing why it is unusable.
    pub fn read(&self, path: &Path) -> Result<Document, LoaderError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LoaderError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        let decoded = decode(&text, self.max_stage)?;
        if decoded.stage != RepairStage::Strict {
            debug!(path = %path.display(), stage = %decoded.stage, "document repaired");
        }
        Ok(Some(decoded.value))
    }
}

impl DocumentLoader for FsDocumentLoader {
    fn load(&self, directory: &Path, filename: &str) -> Document {
        let path = directory.join(filename);
        match self.read(&path) {
            Ok(document) => {
                if document.is_none() {
                    debug!(path = %path.display(), "document absent or empty");
                }
                document
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "treating unusable document as absent");
                None
            }
        }
    }
}
