//! # Source Layer
//!
//! Loading goes through the [`SourceReader`] trait so the collection never
//! touches the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileReader`]: reads real files.
//! - [`memory::InMemoryReader`]: serves canned bytes for tests.
//!
//! Any error from a reader means "skip this path" to the caller; the reader
//! itself just reports what went wrong.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Supplies the raw bytes behind a path.
pub trait SourceReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).read(path)
    }
}
