use crate::commands::{CmdMessage, CmdResult};
use crate::session::Session;
use crate::source::SourceReader;

use super::helpers::with_current_page;

/// Replaces the session's collection with `paths` and returns the first page.
///
/// Unreadable paths never fail the command; each one is reported as a
/// warning and listed in `skipped`.
pub fn run<R, P>(session: &mut Session, reader: &R, paths: &[P]) -> CmdResult
where
    R: SourceReader + ?Sized,
    P: AsRef<str>,
{
    let report = session.load(reader, paths);
    let mut result = CmdResult::default();

    for skipped in &report.skipped {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {}: {}",
            skipped.path, skipped.reason
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Loaded {} of {} files",
        report.loaded,
        paths.len()
    )));

    with_current_page(session, result.with_skipped(report.skipped))
}
