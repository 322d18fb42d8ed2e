use serde::{Deserialize, Serialize};

/// A unit of text held by the collection.
///
/// Fragments are immutable once created: `word_count` and `display_name`
/// are computed at construction and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub id: String,
    pub source_path: String,
    pub content: String,
    pub word_count: usize,
    pub display_name: String,
}

impl Fragment {
    /// Builds a fragment from raw file content. The path doubles as the id.
    pub fn from_source(path: &str, raw: &str, display_width: usize) -> Self {
        let content = raw.trim().to_string();
        Self {
            id: crate::ident::source_id(path),
            source_path: path.to_string(),
            word_count: count_words(&content),
            display_name: crate::display::display_name(path, display_width),
            content,
        }
    }

    /// Builds a fragment returned by the fragmentation collaborator.
    ///
    /// The synthetic id is also used as the source path, and the word count
    /// reported by the collaborator is kept as-is.
    pub fn derived(id: String, meta: &FragmentMeta, position: usize) -> Self {
        Self {
            source_path: id.clone(),
            id,
            content: meta.text.clone(),
            word_count: meta.word_count,
            display_name: format!("Fragment {}", position),
        }
    }
}

/// One piece returned by the fragmentation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentMeta {
    pub text: String,
    pub is_successful: bool,
    pub word_count: usize,
}

impl FragmentMeta {
    pub fn new(text: impl Into<String>, is_successful: bool, word_count: usize) -> Self {
        Self {
            text: text.into(),
            is_successful,
            word_count,
        }
    }
}

/// Counts whitespace-delimited tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
