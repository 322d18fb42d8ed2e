use crate::commands::CmdResult;
use crate::error::Result;
use crate::session::Session;

/// The fragment at zero-based `index`.
pub fn run(session: &Session, index: usize) -> Result<CmdResult> {
    let fragment = session.get(index)?.clone();
    Ok(CmdResult::default().with_fragment(fragment))
}
