use super::SourceReader;
use crate::error::{FragzError, Result};
use std::fs;
use std::path::Path;

/// Reads sources straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReader;

impl FileReader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceReader for FileReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(FragzError::Io)
    }
}
