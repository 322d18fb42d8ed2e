use crate::collection::SkippedSource;
use crate::config::FragzConfig;
use crate::model::{Fragment, FragmentMeta};

pub mod config;
pub mod delete;
pub mod fragment;
pub mod get;
pub mod helpers;
pub mod load;
pub mod page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A fragment as shown in a page listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFragment {
    /// 1-based position in the whole collection
    pub position: usize,
    pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Zero-based
    pub current: usize,
    pub total: usize,
    pub items_per_page: usize,
    pub total_fragments: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_fragments: Vec<ListedFragment>,
    pub page: Option<PageInfo>,
    pub fragment: Option<Fragment>,
    pub derived: Vec<FragmentMeta>,
    pub skipped: Vec<SkippedSource>,
    pub config: Option<FragzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_page(mut self, listed: Vec<ListedFragment>, page: PageInfo) -> Self {
        self.listed_fragments = listed;
        self.page = Some(page);
        self
    }

    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.fragment = Some(fragment);
        self
    }

    pub fn with_derived(mut self, derived: Vec<FragmentMeta>) -> Self {
        self.derived = derived;
        self
    }

    pub fn with_skipped(mut self, skipped: Vec<SkippedSource>) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn with_config(mut self, config: FragzConfig) -> Self {
        self.config = Some(config);
        self
    }
}
