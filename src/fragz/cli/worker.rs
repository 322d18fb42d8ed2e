//! `fragz split-worker`: the binary acting as its own fragmentation process.
//!
//! Reads the whole of stdin, splits it and prints the pieces as a JSON array.
//! Any problem is reported as `{"error": "..."}` on stdout with exit code 1,
//! which the calling side turns into a failed invocation.

use fragz::model::FragmentMeta;
use fragz::splitter::{split, SplitMode};
use std::io::Read;
use std::str::FromStr;

/// Runs the worker and returns the process exit code.
pub fn run(mode: &str, target: &str, tolerance: &str) -> i32 {
    let mut input = Vec::new();
    if let Err(e) = std::io::stdin().read_to_end(&mut input) {
        return fail(&format!("could not read input: {}", e));
    }
    let text = String::from_utf8_lossy(&input);

    match process(mode, target, tolerance, &text) {
        Ok(pieces) => match serde_json::to_string(&pieces) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => fail(&e.to_string()),
        },
        Err(msg) => fail(&msg),
    }
}

fn process(
    mode: &str,
    target: &str,
    tolerance: &str,
    text: &str,
) -> Result<Vec<FragmentMeta>, String> {
    let mode = SplitMode::from_str(mode).map_err(|e| e.to_string())?;
    let target: i64 = target
        .parse()
        .map_err(|_| format!("Invalid target: {}", target))?;
    let tolerance: i64 = tolerance
        .parse()
        .map_err(|_| format!("Invalid tolerance: {}", tolerance))?;
    log::debug!(
        "split-worker: mode={} target={} tolerance={} ({} bytes)",
        mode,
        target,
        tolerance,
        text.len()
    );
    split(mode, text, target, tolerance).map_err(|e| e.to_string())
}

fn fail(msg: &str) -> i32 {
    println!("{}", serde_json::json!({ "error": msg }));
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_mode_splits_lines() {
        let pieces = process("row", "0", "0", "one\n\ntwo words\n").unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].text, "two words");
        assert_eq!(pieces[1].word_count, 2);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = process("paragraph", "10", "2", "text").unwrap_err();
        assert!(err.contains("Unknown mode: paragraph"));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(process("size", "ten", "2", "text").is_err());
        assert!(process("size", "10", "", "text").is_err());
    }

    #[test]
    fn rejects_window_that_overflows() {
        let err = process("size", "9223372036854775807", "1", "One two. Three.").unwrap_err();
        assert!(err.contains("out of range"));
        assert!(process("size", "-9223372036854775808", "1", "One two.").is_err());
    }
}
