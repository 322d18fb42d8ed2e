//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for a presentation client. It owns the [`Session`] together
//! with the two collaborators the session needs: a [`SourceReader`] for
//! loading and a [`Fragmenter`] for splitting.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the matching `commands::*::run`
//! - **Normalizes inputs**: user selectors (positions, ranges, ids) become ids
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! ## Generic Over Collaborators
//!
//! `FragzApi<R, F>` is generic over both boundaries:
//! - Production: `FragzApi<FileReader, ProcessFragmenter>`
//! - Testing: `FragzApi<InMemoryReader, StubFragmenter>`

use crate::commands;
use crate::error::Result;
use crate::fragmenter::{FragmentParams, Fragmenter};
use crate::index::parse_selectors;
use crate::session::Session;
use crate::source::SourceReader;
use std::path::Path;

pub struct FragzApi<R: SourceReader, F: Fragmenter> {
    session: Session,
    reader: R,
    fragmenter: F,
}

impl<R: SourceReader, F: Fragmenter> FragzApi<R, F> {
    pub fn new(session: Session, reader: R, fragmenter: F) -> Self {
        Self {
            session,
            reader,
            fragmenter,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn fragmenter(&self) -> &F {
        &self.fragmenter
    }

    /// Loads `paths`, replacing everything, and returns the first page.
    pub fn load<P: AsRef<str>>(&mut self, paths: &[P]) -> commands::CmdResult {
        commands::load::run(&mut self.session, &self.reader, paths)
    }

    pub fn paginated_data(&self) -> commands::CmdResult {
        commands::page::run(&self.session)
    }

    pub fn current_page(&self) -> usize {
        self.session.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.session.total_pages()
    }

    pub fn set_page(&mut self, page: usize) -> Result<commands::CmdResult> {
        commands::page::set(&mut self.session, page)
    }

    pub fn next_page(&mut self) -> Result<commands::CmdResult> {
        commands::page::step(&mut self.session, 1)
    }

    pub fn prev_page(&mut self) -> Result<commands::CmdResult> {
        commands::page::step(&mut self.session, -1)
    }

    /// The fragment at zero-based `index`.
    pub fn get_text(&self, index: usize) -> Result<commands::CmdResult> {
        commands::get::run(&self.session, index)
    }

    /// Splits the fragments with the given ids.
    pub fn fragment_texts<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        params: &FragmentParams,
    ) -> Result<commands::CmdResult> {
        commands::fragment::run(&mut self.session, &self.fragmenter, ids, params)
    }

    /// Deletes the fragments with the given ids.
    pub fn delete_fragments<S: AsRef<str>>(&mut self, ids: &[S]) -> commands::CmdResult {
        commands::delete::run(&mut self.session, ids)
    }

    /// Like [`FragzApi::fragment_texts`] but takes user selectors.
    pub fn fragment_selected<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        params: &FragmentParams,
    ) -> Result<commands::CmdResult> {
        let ids = self.resolve(selectors)?;
        self.fragment_texts(&ids, params)
    }

    /// Like [`FragzApi::delete_fragments`] but takes user selectors.
    pub fn delete_selected<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
    ) -> Result<commands::CmdResult> {
        let ids = self.resolve(selectors)?;
        Ok(self.delete_fragments(&ids))
    }

    /// Every id in the collection, in order.
    pub fn all_ids(&self) -> Vec<String> {
        self.session
            .collection()
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }

    fn resolve<I: AsRef<str>>(&self, selectors: &[I]) -> Result<Vec<String>> {
        let selectors = parse_selectors(selectors, self.session.collection().len())?;
        commands::helpers::resolve_selectors(&self.session, &selectors)
    }
}

/// Reads or updates the configuration stored in `dir`.
///
/// Configuration lives outside any session, so this is a free function.
pub fn config(dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, ListedFragment, MessageLevel, PageInfo};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FragzError;
    use crate::fragmenter::stub::StubFragmenter;
    use crate::source::memory::fixtures::ReaderFixture;
    use crate::source::memory::InMemoryReader;

    fn api(count: usize) -> (FragzApi<InMemoryReader, StubFragmenter>, Vec<String>) {
        let fixture = ReaderFixture::new().with_files(count);
        let mut api = FragzApi::new(
            Session::new(10, 15),
            fixture.reader,
            StubFragmenter::per_word(),
        );
        api.load(&fixture.paths);
        (api, fixture.paths)
    }

    fn params() -> FragmentParams {
        FragmentParams::new("row", 0, 0)
    }

    #[test]
    fn load_dispatches_and_returns_first_page() {
        let (mut api, paths) = api(15);
        let result = api.load(&paths);
        assert_eq!(result.listed_fragments.len(), 10);
        assert_eq!(api.total_pages(), 2);
        assert_eq!(api.current_page(), 0);
    }

    #[test]
    fn page_navigation() {
        let (mut api, _) = api(25);
        assert_eq!(api.next_page().unwrap().page.unwrap().current, 1);
        assert_eq!(api.set_page(2).unwrap().listed_fragments.len(), 5);
        assert!(api.next_page().is_err());
        assert_eq!(api.prev_page().unwrap().page.unwrap().current, 1);
        assert_eq!(api.paginated_data().listed_fragments[0].position, 11);
    }

    #[test]
    fn get_text_by_index() {
        let (api, _) = api(3);
        let result = api.get_text(1).unwrap();
        assert_eq!(result.fragment.unwrap().content, "Line number 2");
        assert!(matches!(
            api.get_text(9),
            Err(FragzError::OutOfRange { .. })
        ));
    }

    #[test]
    fn fragment_selected_by_position() {
        let (mut api, _) = api(3);
        // "Line number 2" -> three single-word pieces
        let result = api.fragment_selected(&["2"], &params()).unwrap();
        assert_eq!(result.derived.len(), 3);
        assert_eq!(
            api.all_ids(),
            vec![
                "file-1.txt",
                "file-3.txt",
                "fragment_2_1",
                "fragment_2_2",
                "fragment_2_3"
            ]
        );
        assert_eq!(api.fragmenter().calls()[0].1, params());
    }

    #[test]
    fn fragment_selected_by_id() {
        let (mut api, _) = api(3);
        api.fragment_selected(&["file-3.txt"], &params()).unwrap();
        assert_eq!(api.session().collection().len(), 2 + 3);
    }

    #[test]
    fn selector_past_the_end_fails_before_dispatch() {
        let (mut api, _) = api(3);
        assert!(matches!(
            api.fragment_selected(&["4"], &params()),
            Err(FragzError::OutOfRange { .. })
        ));
        assert!(api.fragmenter().calls().is_empty());
    }

    #[test]
    fn oversized_range_is_out_of_range() {
        let (mut api, _) = api(3);
        assert!(matches!(
            api.delete_selected(&["2-400000000"]),
            Err(FragzError::OutOfRange { len: 3, .. })
        ));
        assert_eq!(api.session().collection().len(), 3);
    }

    #[test]
    fn delete_selected_range() {
        let (mut api, _) = api(5);
        api.delete_selected(&["2-4"]).unwrap();
        assert_eq!(api.all_ids(), vec!["file-1.txt", "file-5.txt"]);
    }
}
