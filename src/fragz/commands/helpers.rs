use crate::commands::{CmdResult, ListedFragment, PageInfo};
use crate::error::{FragzError, Result};
use crate::index::Selector;
use crate::session::Session;

/// The current window of `session`, numbered by collection position.
pub fn current_page(session: &Session) -> (Vec<ListedFragment>, PageInfo) {
    let offset = session.window_offset();
    let listed = session
        .current_window()
        .iter()
        .enumerate()
        .map(|(i, fragment)| ListedFragment {
            position: offset + i + 1,
            fragment: fragment.clone(),
        })
        .collect();

    let info = PageInfo {
        current: session.current_page(),
        total: session.total_pages(),
        items_per_page: session.items_per_page(),
        total_fragments: session.collection().len(),
    };
    (listed, info)
}

/// Attaches the current page to `result`.
pub fn with_current_page(session: &Session, result: CmdResult) -> CmdResult {
    let (listed, info) = current_page(session);
    result.with_page(listed, info)
}

/// Maps selectors to fragment ids.
///
/// Positions must exist; ids are passed through unchecked since unknown ids
/// are no-ops for every operation that takes them.
pub fn resolve_selectors(session: &Session, selectors: &[Selector]) -> Result<Vec<String>> {
    selectors
        .iter()
        .map(|sel| match sel {
            Selector::Position(n) => match n.checked_sub(1) {
                Some(index) => session.get(index).map(|f| f.id.clone()),
                None => Err(FragzError::OutOfRange {
                    index: 0,
                    len: session.collection().len(),
                }),
            },
            Selector::Id(id) => Ok(id.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::ReaderFixture;

    fn session(count: usize, per_page: usize) -> Session {
        let fixture = ReaderFixture::new().with_files(count);
        let mut s = Session::new(per_page, 15);
        s.load(&fixture.reader, &fixture.paths);
        s
    }

    #[test]
    fn page_listing_uses_collection_positions() {
        let mut s = session(5, 2);
        s.set_page(1).unwrap();
        let (listed, info) = current_page(&s);
        let positions: Vec<_> = listed.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![3, 4]);
        assert_eq!(listed[0].fragment.id, "file-3.txt");
        assert_eq!(
            info,
            PageInfo {
                current: 1,
                total: 3,
                items_per_page: 2,
                total_fragments: 5
            }
        );
    }

    #[test]
    fn resolves_positions_and_ids() {
        let s = session(3, 10);
        let ids = resolve_selectors(
            &s,
            &[Selector::Position(3), Selector::Id("whatever".into())],
        )
        .unwrap();
        assert_eq!(ids, vec!["file-3.txt", "whatever"]);
    }

    #[test]
    fn unknown_position_is_out_of_range() {
        let s = session(3, 10);
        let err = resolve_selectors(&s, &[Selector::Position(4)]).unwrap_err();
        assert!(matches!(err, FragzError::OutOfRange { index: 3, len: 3 }));
    }
}
