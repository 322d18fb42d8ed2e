use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragzError {
    #[error("Index {index} out of range (collection has {len} fragments)")]
    OutOfRange { index: usize, len: usize },

    #[error("Page {page} out of range (total pages: {total})")]
    PageOutOfRange { page: String, total: usize },

    #[error("No fragments selected")]
    NoSelection,

    #[error("Fragmentation failed: {0}")]
    FragmentationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FragzError {
    pub fn page_out_of_range(page: impl ToString, total: usize) -> Self {
        FragzError::PageOutOfRange {
            page: page.to_string(),
            total,
        }
    }
}

pub type Result<T> = std::result::Result<T, FragzError>;
