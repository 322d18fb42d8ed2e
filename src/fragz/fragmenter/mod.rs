//! # Fragmentation Collaborator
//!
//! Splitting a text into smaller pieces is delegated to an external process.
//! The [`Fragmenter`] trait is the boundary: one call per input text, returning
//! the pieces in order.
//!
//! ## Wire Contract
//!
//! The process is started as `<program> [args...] <mode> <target> <tolerance>`,
//! receives the text as its entire standard input, and on success prints a
//! UTF-8 JSON array to standard output:
//!
//! ```json
//! [{"text": "...", "is_successful": true, "word_count": 12}]
//! ```
//!
//! A non-zero exit, an I/O error, a timeout or malformed output all count as a
//! failed invocation.

use crate::error::Result;
use crate::model::FragmentMeta;

pub mod process;
#[cfg(any(test, feature = "test_utils"))]
pub mod stub;

/// Parameters passed through to the collaborator untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentParams {
    /// Splitting strategy understood by the collaborator (e.g. `size`, `row`).
    pub mode: String,
    /// Desired fragment size, in the collaborator's unit.
    pub target: i64,
    pub tolerance: i64,
}

impl FragmentParams {
    pub fn new(mode: impl Into<String>, target: i64, tolerance: i64) -> Self {
        Self {
            mode: mode.into(),
            target,
            tolerance,
        }
    }
}

pub trait Fragmenter {
    /// Splits one text. Errors must be `FragzError::FragmentationFailed`.
    fn fragment(&self, text: &str, params: &FragmentParams) -> Result<Vec<FragmentMeta>>;
}

impl<F: Fragmenter + ?Sized> Fragmenter for &F {
    fn fragment(&self, text: &str, params: &FragmentParams) -> Result<Vec<FragmentMeta>> {
        (**self).fragment(text, params)
    }
}
