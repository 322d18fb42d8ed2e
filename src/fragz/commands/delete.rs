use crate::commands::{CmdMessage, CmdResult};
use crate::session::Session;

use super::helpers::with_current_page;

/// Removes the fragments with the given ids. Unknown ids are ignored, so the
/// command always succeeds; the first page is returned.
pub fn run<S: AsRef<str>>(session: &mut Session, ids: &[S]) -> CmdResult {
    let removed = session.delete_by_ids(ids);
    let mut result = CmdResult::default();
    if removed == 0 {
        result.add_message(CmdMessage::info("No matching fragments to delete"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Deleted {} fragment{}",
            removed,
            if removed == 1 { "" } else { "s" }
        )));
    }
    with_current_page(session, result)
}
