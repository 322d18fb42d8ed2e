//! # Fragment Identifiers
//!
//! Every fragment carries an opaque string id that is the only handle used for
//! selection, deletion and replacement. Two shapes exist:
//!
//! - **Source ids**: a freshly loaded fragment uses its file path verbatim.
//! - **Derived ids**: fragments produced by fragmentation are named
//!   `fragment_<position>_<ordinal>`, where `position` is the number of
//!   fragments retained after the replaced ones were removed and `ordinal` is
//!   the 1-based position inside the replacement batch.
//!
//! Successive replacements can produce a derived candidate that is still held
//! by a retained fragment (e.g. replacing the first of `[a, b, fragment_2_1]`
//! yields position 2 again). In that case a revision suffix is appended:
//! `fragment_<position>_<ordinal>_<k>` with the smallest free `k >= 2`.

use std::fmt;

const DERIVED_PREFIX: &str = "fragment_";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FragmentId {
    Source(String),
    Derived {
        position: usize,
        ordinal: usize,
        revision: Option<usize>,
    },
}

impl FragmentId {
    /// Parses any id string. Strings that do not match the derived pattern
    /// are source ids.
    pub fn parse(s: &str) -> Self {
        parse_derived(s).unwrap_or_else(|| FragmentId::Source(s.to_string()))
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, FragmentId::Derived { .. })
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentId::Source(path) => write!(f, "{}", path),
            FragmentId::Derived {
                position,
                ordinal,
                revision: None,
            } => write!(f, "{}{}_{}", DERIVED_PREFIX, position, ordinal),
            FragmentId::Derived {
                position,
                ordinal,
                revision: Some(k),
            } => write!(f, "{}{}_{}_{}", DERIVED_PREFIX, position, ordinal, k),
        }
    }
}

fn parse_derived(s: &str) -> Option<FragmentId> {
    let rest = s.strip_prefix(DERIVED_PREFIX)?;
    let parts: Vec<&str> = rest.split('_').collect();
    let number = |p: &str| -> Option<usize> {
        // digits only: usize::from_str accepts a leading '+'
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // "01" would print back as "1"
        if p.len() > 1 && p.starts_with('0') {
            return None;
        }
        p.parse().ok()
    };

    match parts.as_slice() {
        [position, ordinal] => Some(FragmentId::Derived {
            position: number(position)?,
            ordinal: number(ordinal)?,
            revision: None,
        }),
        [position, ordinal, revision] => Some(FragmentId::Derived {
            position: number(position)?,
            ordinal: number(ordinal)?,
            revision: Some(number(revision)?),
        }),
        _ => None,
    }
}

/// Id for a fragment loaded from `path`.
pub fn source_id(path: &str) -> String {
    FragmentId::Source(path.to_string()).to_string()
}

/// Id for the `ordinal`-th (1-based) fragment of a replacement batch that is
/// inserted after `position` retained fragments.
///
/// `is_taken` reports whether an id is already in use; the plain pattern is
/// returned whenever it is free.
pub fn derived_id<F>(position: usize, ordinal: usize, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let plain = FragmentId::Derived {
        position,
        ordinal,
        revision: None,
    }
    .to_string();
    if !is_taken(&plain) {
        return plain;
    }

    let mut k = 2;
    loop {
        let candidate = FragmentId::Derived {
            position,
            ordinal,
            revision: Some(k),
        }
        .to_string();
        if !is_taken(&candidate) {
            log::debug!("Derived id {} taken, using {}", plain, candidate);
            return candidate;
        }
        k += 1;
    }
}
