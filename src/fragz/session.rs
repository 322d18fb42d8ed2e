//! # Session
//!
//! A [`Session`] is the fragment collection manager: it owns the collection
//! and the page cursor, and every mutation goes through it so the cursor is
//! reset whenever the collection changes shape.
//!
//! There is no ambient state. Whoever drives the workflow (the CLI, a shell
//! loop, a test) owns one `Session` and passes it by `&mut` to each command.
//! It is not meant to be shared between concurrent callers.

use crate::collection::{FragmentCollection, LoadReport, ReplaceReport};
use crate::display::DEFAULT_DISPLAY_WIDTH;
use crate::error::Result;
use crate::model::{Fragment, FragmentMeta};
use crate::pagination::{Paginator, DEFAULT_ITEMS_PER_PAGE};
use crate::source::SourceReader;

#[derive(Debug, Clone)]
pub struct Session {
    collection: FragmentCollection,
    paginator: Paginator,
    display_width: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE, DEFAULT_DISPLAY_WIDTH)
    }
}

impl Session {
    pub fn new(items_per_page: usize, display_width: usize) -> Self {
        Self {
            collection: FragmentCollection::new(),
            paginator: Paginator::new(items_per_page),
            display_width,
        }
    }

    pub fn collection(&self) -> &FragmentCollection {
        &self.collection
    }

    pub fn items_per_page(&self) -> usize {
        self.paginator.items_per_page()
    }

    pub fn load<R, P>(&mut self, reader: &R, paths: &[P]) -> LoadReport
    where
        R: SourceReader + ?Sized,
        P: AsRef<str>,
    {
        let report = self.collection.load(reader, paths, self.display_width);
        self.paginator.reset();
        report
    }

    pub fn get(&self, index: usize) -> Result<&Fragment> {
        self.collection.get(index)
    }

    pub fn delete_by_ids<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let removed = self.collection.delete_by_ids(ids);
        self.paginator.reset();
        removed
    }

    pub fn replace_by_ids<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        derived: &[FragmentMeta],
    ) -> ReplaceReport {
        let report = self.collection.replace_by_ids(ids, derived);
        self.paginator.reset();
        report
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.collection.len())
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn set_page(&mut self, page: usize) -> Result<()> {
        self.paginator.set_page(page, self.collection.len())
    }

    pub fn current_window(&self) -> &[Fragment] {
        self.paginator.window(self.collection.fragments())
    }

    /// Collection position of the first fragment in the current window.
    pub fn window_offset(&self) -> usize {
        self.paginator.window_range(self.collection.len()).start
    }
}
