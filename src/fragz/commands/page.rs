use crate::commands::CmdResult;
use crate::error::{FragzError, Result};
use crate::session::Session;

use super::helpers::with_current_page;

/// The current page, unchanged.
pub fn run(session: &Session) -> CmdResult {
    with_current_page(session, CmdResult::default())
}

/// Moves to `page` (zero-based) and returns it.
pub fn set(session: &mut Session, page: usize) -> Result<CmdResult> {
    session.set_page(page)?;
    Ok(run(session))
}

/// Moves by `delta` pages from the current one.
pub fn step(session: &mut Session, delta: isize) -> Result<CmdResult> {
    let current = session.current_page() as isize;
    let target = current + delta;
    if target < 0 {
        return Err(FragzError::page_out_of_range(
            target,
            session.total_pages(),
        ));
    }
    set(session, target as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::ReaderFixture;

    fn session(count: usize) -> Session {
        let fixture = ReaderFixture::new().with_files(count);
        let mut s = Session::new(10, 15);
        s.load(&fixture.reader, &fixture.paths);
        s
    }

    #[test]
    fn set_returns_requested_window() {
        let mut s = session(25);
        let result = set(&mut s, 2).unwrap();
        assert_eq!(result.listed_fragments.len(), 5);
        assert_eq!(result.listed_fragments[0].position, 21);
        assert_eq!(result.page.unwrap().current, 2);
    }

    #[test]
    fn set_out_of_range_keeps_page() {
        let mut s = session(25);
        set(&mut s, 1).unwrap();
        assert!(matches!(
            set(&mut s, 3),
            Err(FragzError::PageOutOfRange { .. })
        ));
        assert_eq!(run(&s).page.unwrap().current, 1);
    }

    #[test]
    fn step_moves_relative() {
        let mut s = session(25);
        assert_eq!(step(&mut s, 1).unwrap().page.unwrap().current, 1);
        assert_eq!(step(&mut s, 1).unwrap().page.unwrap().current, 2);
        assert!(step(&mut s, 1).is_err());
        assert_eq!(step(&mut s, -2).unwrap().page.unwrap().current, 0);
        assert!(step(&mut s, -1).is_err());
    }
}
