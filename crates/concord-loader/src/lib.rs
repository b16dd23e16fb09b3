//! Filesystem adapters for the Concord kernel.
//!
//! - [`FsDocumentLoader`] implements [`concord_kernel::DocumentLoader`] over
//!   real files, with staged lenient repair ([`repair`]).
//! - [`walk_directories`] enumerates the directories of a tree in a stable
//!   order for [`concord_kernel::check_tree`].

pub mod error;
pub mod fs;
pub mod repair;
pub mod walk;

pub use error::LoaderError;
pub use fs::FsDocumentLoader;
pub use repair::{Decoded, RepairStage, decode, decode_lenient};
pub use walk::walk_directories;
