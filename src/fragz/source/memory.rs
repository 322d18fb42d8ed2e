use super::SourceReader;
use crate::error::{FragzError, Result};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory sources for testing. Paths that were never added fail with
/// `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl InMemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }
}

impl SourceReader for InMemoryReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            FragzError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builds readers with numbered files named `file-<n>.txt`.
    pub struct ReaderFixture {
        pub reader: InMemoryReader,
        pub paths: Vec<String>,
    }

    impl Default for ReaderFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ReaderFixture {
        pub fn new() -> Self {
            Self {
                reader: InMemoryReader::new(),
                paths: Vec::new(),
            }
        }

        pub fn with_files(mut self, count: usize) -> Self {
            for _ in 0..count {
                let n = self.paths.len() + 1;
                let path = format!("file-{}.txt", n);
                self.reader.insert(&path, format!("Line number {}", n));
                self.paths.push(path);
            }
            self
        }

        pub fn with_file(mut self, path: &str, content: &str) -> Self {
            self.reader.insert(path, content);
            self.paths.push(path.to_string());
            self
        }

        /// Adds a path the reader cannot serve.
        pub fn with_missing(mut self, path: &str) -> Self {
            self.paths.push(path.to_string());
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_inserted_content() {
        let reader = InMemoryReader::new().with_file("a.txt", "abc");
        assert_eq!(reader.read(Path::new("a.txt")).unwrap(), b"abc");
    }

    #[test]
    fn unknown_path_is_not_found() {
        let reader = InMemoryReader::new();
        match reader.read(Path::new("missing.txt")) {
            Err(FragzError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
