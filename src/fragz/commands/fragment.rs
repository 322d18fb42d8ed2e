//! # Fragmentation
//!
//! Replaces the selected fragments with the pieces the fragmentation
//! collaborator cuts them into. The run goes through four steps and stops at
//! the first failure:
//!
//! 1. **Resolve** the ids to contents, in collection order. Nothing matched
//!    means `NoSelection`.
//! 2. **Dispatch** each text to the collaborator, one at a time, in order.
//! 3. **Aggregate** the pieces into a single ordered list. Pieces flagged
//!    `is_successful == false` are kept; the flag is informational.
//! 4. **Commit** the replacement in one step.
//!
//! The collection is only touched in step 4, so a failure in step 2 leaves it
//! exactly as it was.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FragzError, Result};
use crate::fragmenter::{FragmentParams, Fragmenter};
use crate::model::FragmentMeta;
use crate::session::Session;

use super::helpers::with_current_page;

pub fn run<F, S>(
    session: &mut Session,
    fragmenter: &F,
    ids: &[S],
    params: &FragmentParams,
) -> Result<CmdResult>
where
    F: Fragmenter + ?Sized,
    S: AsRef<str>,
{
    let texts: Vec<String> = session
        .collection()
        .select(ids)
        .into_iter()
        .map(|f| f.content.clone())
        .collect();
    if texts.is_empty() {
        return Err(FragzError::NoSelection);
    }
    log::info!(
        "Fragmenting {} texts (mode={}, target={}, tolerance={})",
        texts.len(),
        params.mode,
        params.target,
        params.tolerance
    );

    let mut derived: Vec<FragmentMeta> = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let pieces = fragmenter.fragment(text, params).map_err(|e| match e {
            FragzError::FragmentationFailed(msg) => {
                FragzError::FragmentationFailed(format!("text {} of {}: {}", i + 1, texts.len(), msg))
            }
            other => FragzError::FragmentationFailed(other.to_string()),
        })?;
        derived.extend(pieces);
    }

    let report = session.replace_by_ids(ids, &derived);

    let mut result = CmdResult::default();
    let unsuccessful = derived.iter().filter(|d| !d.is_successful).count();
    result.add_message(CmdMessage::success(format!(
        "Split {} texts into {} fragments",
        report.removed,
        report.inserted.len()
    )));
    if unsuccessful > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} fragments are outside the requested size",
            unsuccessful
        )));
    }

    Ok(with_current_page(session, result.with_derived(derived)))
}
