//! # Built-in Splitter
//!
//! The splitting logic behind `fragz split-worker`, the default fragmentation
//! collaborator. The collection manager never calls this directly: it only
//! talks to a process through [`crate::fragmenter::Fragmenter`]. Shipping a
//! worker means the process boundary works without any extra install.
//!
//! Two modes:
//!
//! - `size`: sentences (text up to `.`, `!` or `?` followed by whitespace) are
//!   packed greedily while the piece stays within `target + tolerance` words.
//!   A piece is successful when its word count lies in
//!   `[target - tolerance, target + tolerance]`.
//! - `row`: one piece per non-blank line, always successful.
//!
//! A `target` and `tolerance` whose window does not fit in an `i64` is an
//! error, not a wrapped value.

use crate::error::{FragzError, Result};
use crate::model::{count_words, FragmentMeta};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    Size,
    Row,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::Size => write!(f, "size"),
            SplitMode::Row => write!(f, "row"),
        }
    }
}

impl FromStr for SplitMode {
    type Err = FragzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "size" => Ok(SplitMode::Size),
            "row" => Ok(SplitMode::Row),
            other => Err(FragzError::Api(format!("Unknown mode: {}", other))),
        }
    }
}

pub fn split(
    mode: SplitMode,
    text: &str,
    target: i64,
    tolerance: i64,
) -> Result<Vec<FragmentMeta>> {
    match mode {
        SplitMode::Size => split_by_size(text, target, tolerance),
        SplitMode::Row => Ok(split_by_row(text)),
    }
}

pub fn split_by_size(text: &str, target: i64, tolerance: i64) -> Result<Vec<FragmentMeta>> {
    let (min_words, max_words) = match (
        target.checked_sub(tolerance),
        target.checked_add(tolerance),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(FragzError::Api(format!(
                "Target {} with tolerance {} is out of range",
                target, tolerance
            )))
        }
    };
    let within = |n: usize| (min_words..=max_words).contains(&(n as i64));

    let mut pieces = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut buffer_words = 0usize;

    for sentence in sentences(text.trim()) {
        let words = count_words(sentence);
        if ((buffer_words + words) as i64) <= max_words {
            buffer.push(sentence);
            buffer_words += words;
            continue;
        }
        if !buffer.is_empty() {
            pieces.push(FragmentMeta::new(
                buffer.join(" "),
                within(buffer_words),
                buffer_words,
            ));
        }
        buffer = vec![sentence];
        buffer_words = words;
    }

    if !buffer.is_empty() {
        pieces.push(FragmentMeta::new(
            buffer.join(" "),
            within(buffer_words),
            buffer_words,
        ));
    }
    Ok(pieces)
}

pub fn split_by_row(text: &str) -> Vec<FragmentMeta> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| FragmentMeta::new(line, true, count_words(line)))
        .collect()
}

/// Splits at whitespace runs that follow sentence-ending punctuation.
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    if text.is_empty() {
        return out;
    }

    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            out.push(&text[start..idx]);
            // swallow the rest of the whitespace run
            let mut next_start = idx + c.len_utf8();
            while let Some(&(j, w)) = chars.peek() {
                if !w.is_whitespace() {
                    break;
                }
                next_start = j + w.len_utf8();
                chars.next();
            }
            start = next_start;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!("size".parse::<SplitMode>().unwrap(), SplitMode::Size);
        assert_eq!("row".parse::<SplitMode>().unwrap(), SplitMode::Row);
        assert!("words".parse::<SplitMode>().is_err());
    }

    #[test]
    fn sentence_boundaries() {
        assert_eq!(
            sentences("One two. Three!  Four?\nFive"),
            vec!["One two.", "Three!", "Four?", "Five"]
        );
        assert_eq!(sentences("No end"), vec!["No end"]);
        assert_eq!(sentences("e.g.x stays"), vec!["e.g.x stays"]);
        assert!(sentences("").is_empty());
    }

    #[test]
    fn size_mode_packs_sentences() {
        // 2 + 2 + 3 + 1 words
        let text = "A b. C d. E f g. H.";
        let pieces = split_by_size(text, 4, 0).unwrap();
        let texts: Vec<_> = pieces.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["A b. C d.", "E f g. H."]);
        assert!(pieces.iter().all(|p| p.is_successful));
        assert_eq!(pieces[0].word_count, 4);
    }

    #[test]
    fn size_mode_flags_out_of_tolerance_pieces() {
        let text = "One. Two three four five six seven.";
        let pieces = split_by_size(text, 3, 1).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].text, "One.");
        assert!(!pieces[0].is_successful);
        // An oversized sentence stays whole
        assert_eq!(pieces[1].word_count, 6);
        assert!(!pieces[1].is_successful);
    }

    #[test]
    fn size_mode_on_blank_text_is_empty() {
        assert!(split_by_size("   \n", 10, 2).unwrap().is_empty());
    }

    #[test]
    fn size_mode_rejects_window_overflow() {
        assert!(split_by_size("One two.", i64::MAX, 1).is_err());
        assert!(split_by_size("One two.", i64::MIN, 1).is_err());
        assert!(split_by_size("One two.", 0, i64::MIN).is_err());
        assert_eq!(split_by_size("One two.", i64::MAX, 0).unwrap().len(), 1);
    }

    #[test]
    fn row_mode_skips_blank_lines() {
        let pieces = split_by_row("first line\n\n  second  line \r\n\t\nthird");
        let texts: Vec<_> = pieces.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first line", "second  line", "third"]);
        assert_eq!(pieces[1].word_count, 2);
        assert!(pieces.iter().all(|p| p.is_successful));
    }

    #[test]
    fn word_counts_match_text() {
        let text = "Alpha beta gamma. Delta epsilon. Zeta eta theta iota.";
        for mode in [SplitMode::Size, SplitMode::Row] {
            for piece in split(mode, text, 5, 1).unwrap() {
                assert_eq!(piece.word_count, count_words(&piece.text));
            }
        }
    }
}
