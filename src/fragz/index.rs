//! # Selection Input
//!
//! Users pick fragments either by their 1-based position in the collection
//! (what listings show in the left column) or by id. Positions accept ranges:
//!
//! - `3` selects the third fragment
//! - `3-5` expands to 3, 4, 5
//! - anything else (`notes/a.txt`, `fragment_4_1`) is a literal id
//!
//! Input is interpreted as a whole: when every word parses as a position or
//! range, all are positions; otherwise all are ids. This keeps a path such as
//! `2024-01` from being half-read as a range.
//!
//! Ranges are checked against the collection size before they are expanded.

use crate::error::{FragzError, Result};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// 1-based position in the collection
    Position(usize),
    Id(String),
}

/// A single position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub usize);

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid position: {}", s));
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Positions start at 1".to_string()),
            Ok(n) => Ok(Position(n)),
            Err(_) => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// Parses a single position or an inclusive range such as `3-5`.
pub fn parse_position_or_range(s: &str) -> std::result::Result<RangeInclusive<usize>, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = Position::from_str(&s[..dash_pos])?.0;
            let end = Position::from_str(&s[dash_pos + 1..])?.0;
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            return Ok(start..=end);
        }
    }
    Position::from_str(s).map(|p| p.0..=p.0)
}

/// Turns raw user words into selectors for a collection of `len` fragments,
/// see the module docs for the rules.
///
/// A position past `len` is `OutOfRange`; ids are not checked here.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I], len: usize) -> Result<Vec<Selector>> {
    let positions: std::result::Result<Vec<RangeInclusive<usize>>, String> = inputs
        .iter()
        .map(|s| parse_position_or_range(s.as_ref()))
        .collect();

    match positions {
        Ok(ranges) => {
            if let Some(end) = ranges.iter().map(|r| *r.end()).find(|end| *end > len) {
                return Err(FragzError::OutOfRange {
                    index: end - 1,
                    len,
                });
            }
            let mut seen = HashSet::new();
            Ok(ranges
                .into_iter()
                .flatten()
                .filter(|n| seen.insert(*n))
                .map(Selector::Position)
                .collect())
        }
        Err(_) => Ok(inputs
            .iter()
            .map(|s| Selector::Id(s.as_ref().to_string()))
            .collect()),
    }
}
