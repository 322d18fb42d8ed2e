//! # Fragment Collection
//!
//! The ordered store of fragments. Order is insertion order: loading appends
//! in path order, replacement appends the derived fragments after the
//! survivors, and nothing ever sorts.
//!
//! Ids are unique at all times. Loading ingests a repeated path once, and
//! derived ids get a revision suffix when their plain form is still taken
//! (see [`crate::ident`]).
//!
//! Mutations build the new sequence aside and swap it in, so a caller never
//! sees a half-applied replacement.

use crate::error::{FragzError, Result};
use crate::ident;
use crate::model::{Fragment, FragmentMeta};
use crate::source::SourceReader;
use std::collections::HashSet;
use std::path::Path;

/// A path that produced no fragment during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceReport {
    pub removed: usize,
    /// Ids of the derived fragments, in insertion order.
    pub inserted: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FragmentCollection {
    fragments: Vec<Fragment>,
}

impl FragmentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// Replaces the whole collection with the readable `paths`.
    ///
    /// Unreadable paths are skipped and listed in the report; they never fail
    /// the load.
    pub fn load<R, P>(&mut self, reader: &R, paths: &[P], display_width: usize) -> LoadReport
    where
        R: SourceReader + ?Sized,
        P: AsRef<str>,
    {
        let mut report = LoadReport::default();
        let mut fragments = Vec::with_capacity(paths.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            if !seen.insert(path) {
                report.skipped.push(SkippedSource {
                    path: path.to_string(),
                    reason: "duplicate path".to_string(),
                });
                continue;
            }

            match reader.read(Path::new(path)) {
                Ok(bytes) => {
                    let raw = String::from_utf8_lossy(&bytes);
                    fragments.push(Fragment::from_source(path, &raw, display_width));
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", path, e);
                    report.skipped.push(SkippedSource {
                        path: path.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.loaded = fragments.len();
        self.fragments = fragments;
        log::info!(
            "Loaded {} fragments ({} skipped)",
            report.loaded,
            report.skipped.len()
        );
        report
    }

    pub fn get(&self, index: usize) -> Result<&Fragment> {
        self.fragments.get(index).ok_or(FragzError::OutOfRange {
            index,
            len: self.fragments.len(),
        })
    }

    /// Fragments whose id is in `ids`, in collection order.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Fragment> {
        let wanted = id_set(ids);
        self.fragments
            .iter()
            .filter(|f| wanted.contains(f.id.as_str()))
            .collect()
    }

    /// Removes every fragment whose id is in `ids`. Unknown ids are ignored.
    /// Returns the number removed.
    pub fn delete_by_ids<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let wanted = id_set(ids);
        let before = self.fragments.len();
        self.fragments.retain(|f| !wanted.contains(f.id.as_str()));
        let removed = before - self.fragments.len();
        log::debug!("Deleted {} of {} requested ids", removed, wanted.len());
        removed
    }

    /// Removes the fragments in `ids` and appends one fragment per `derived`
    /// entry.
    ///
    /// New ids follow `fragment_<retained>_<ordinal>` and display names are
    /// `Fragment <n>`, `n` being the final 1-based position.
    pub fn replace_by_ids<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        derived: &[FragmentMeta],
    ) -> ReplaceReport {
        let wanted = id_set(ids);
        let mut next: Vec<Fragment> = Vec::with_capacity(self.fragments.len() + derived.len());
        next.extend(
            self.fragments
                .iter()
                .filter(|f| !wanted.contains(f.id.as_str()))
                .cloned(),
        );

        let retained = next.len();
        let removed = self.fragments.len() - retained;
        let mut taken: HashSet<String> = next.iter().map(|f| f.id.clone()).collect();
        let mut inserted = Vec::with_capacity(derived.len());

        for (i, meta) in derived.iter().enumerate() {
            let id = ident::derived_id(retained, i + 1, |candidate| taken.contains(candidate));
            taken.insert(id.clone());
            inserted.push(id.clone());
            next.push(Fragment::derived(id, meta, retained + i + 1));
        }

        self.fragments = next;
        log::info!(
            "Replaced {} fragments with {} derived fragments",
            removed,
            inserted.len()
        );
        ReplaceReport { removed, inserted }
    }
}

fn id_set<S: AsRef<str>>(ids: &[S]) -> HashSet<&str> {
    ids.iter().map(|s| s.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::count_words;
    use crate::source::memory::fixtures::ReaderFixture;
    use crate::source::memory::InMemoryReader;

    fn loaded(count: usize) -> FragmentCollection {
        let fixture = ReaderFixture::new().with_files(count);
        let mut c = FragmentCollection::new();
        c.load(&fixture.reader, &fixture.paths, 15);
        c
    }

    fn ids(c: &FragmentCollection) -> Vec<String> {
        c.iter().map(|f| f.id.clone()).collect()
    }

    fn metas(n: usize) -> Vec<FragmentMeta> {
        (1..=n)
            .map(|i| FragmentMeta::new(format!("derived {}", i), true, 2))
            .collect()
    }

    #[test]
    fn load_keeps_path_order_and_uses_path_as_id() {
        let c = loaded(3);
        assert_eq!(ids(&c), vec!["file-1.txt", "file-2.txt", "file-3.txt"]);
    }

    #[test]
    fn load_skips_unreadable_paths() {
        let fixture = ReaderFixture::new()
            .with_file("a.txt", "alpha")
            .with_missing("gone.txt")
            .with_file("b.txt", "beta");
        let mut c = FragmentCollection::new();
        let report = c.load(&fixture.reader, &fixture.paths, 15);

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, "gone.txt");
        assert_eq!(ids(&c), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn load_replaces_previous_contents() {
        let mut c = loaded(5);
        let reader = InMemoryReader::new().with_file("only.txt", "x");
        c.load(&reader, &["only.txt"], 15);
        assert_eq!(ids(&c), vec!["only.txt"]);
    }

    #[test]
    fn load_of_nothing_is_empty() {
        let mut c = loaded(2);
        let none: [&str; 0] = [];
        let report = c.load(&InMemoryReader::new(), &none, 15);
        assert_eq!(report, LoadReport::default());
        assert!(c.is_empty());
    }

    #[test]
    fn load_ingests_repeated_path_once() {
        let reader = InMemoryReader::new().with_file("a.txt", "alpha");
        let mut c = FragmentCollection::new();
        let report = c.load(&reader, &["a.txt", "a.txt"], 15);
        assert_eq!(c.len(), 1);
        assert_eq!(report.skipped[0].reason, "duplicate path");
    }

    #[test]
    fn loaded_word_counts_match_content() {
        let reader = InMemoryReader::new()
            .with_file("a.txt", "  one two  three\n")
            .with_file("b.txt", "single")
            .with_file("c.txt", "\n\n");
        let mut c = FragmentCollection::new();
        c.load(&reader, &["a.txt", "b.txt", "c.txt"], 15);
        for f in c.iter() {
            assert_eq!(f.word_count, count_words(&f.content));
        }
        assert_eq!(c.get(0).unwrap().word_count, 3);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let reader = InMemoryReader::new().with_file("bin.txt", vec![b'o', b'k', 0xff]);
        let mut c = FragmentCollection::new();
        c.load(&reader, &["bin.txt"], 15);
        assert_eq!(c.get(0).unwrap().content, "ok\u{fffd}");
    }

    #[test]
    fn get_out_of_range() {
        let c = loaded(2);
        assert_eq!(c.get(1).unwrap().id, "file-2.txt");
        assert!(matches!(
            c.get(2),
            Err(FragzError::OutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn select_follows_collection_order() {
        let c = loaded(4);
        let picked: Vec<_> = c
            .select(&["file-4.txt", "nope", "file-2.txt"])
            .into_iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(picked, vec!["file-2.txt", "file-4.txt"]);
    }

    #[test]
    fn delete_preserves_survivor_order() {
        let mut c = loaded(5);
        let removed = c.delete_by_ids(&["file-2.txt", "file-4.txt", "missing"]);
        assert_eq!(removed, 2);
        assert_eq!(ids(&c), vec!["file-1.txt", "file-3.txt", "file-5.txt"]);
    }

    #[test]
    fn delete_twice_is_a_noop() {
        let mut c = loaded(3);
        c.delete_by_ids(&["file-1.txt"]);
        let snapshot = c.fragments().to_vec();
        assert_eq!(c.delete_by_ids(&["file-1.txt"]), 0);
        assert_eq!(c.fragments(), snapshot.as_slice());
    }

    #[test]
    fn replace_appends_derived_fragments() {
        let mut c = loaded(6);
        let report = c.replace_by_ids(&["file-2.txt", "file-5.txt"], &metas(5));

        assert_eq!(report.removed, 2);
        assert_eq!(c.len(), 6 - 2 + 5);
        assert_eq!(
            report.inserted,
            vec![
                "fragment_4_1",
                "fragment_4_2",
                "fragment_4_3",
                "fragment_4_4",
                "fragment_4_5"
            ]
        );
        assert_eq!(
            &ids(&c)[..4],
            &["file-1.txt", "file-3.txt", "file-4.txt", "file-6.txt"]
        );
        let names: Vec<_> = c.iter().skip(4).map(|f| f.display_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Fragment 5",
                "Fragment 6",
                "Fragment 7",
                "Fragment 8",
                "Fragment 9"
            ]
        );
        assert_eq!(c.get(4).unwrap().content, "derived 1");
    }

    #[test]
    fn replace_keeps_ids_unique_across_rounds() {
        let mut c = loaded(3);
        c.replace_by_ids(&["file-3.txt"], &metas(1));
        assert_eq!(ids(&c), vec!["file-1.txt", "file-2.txt", "fragment_2_1"]);

        // Two survivors again, so the plain candidate is fragment_2_1 once more
        c.replace_by_ids(&["file-1.txt"], &metas(1));
        let all = ids(&c);
        assert_eq!(all, vec!["file-2.txt", "fragment_2_1", "fragment_2_1_2"]);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn replace_with_no_matches_only_appends() {
        let mut c = loaded(2);
        let report = c.replace_by_ids(&["unknown"], &metas(2));
        assert_eq!(report.removed, 0);
        assert_eq!(report.inserted, vec!["fragment_2_1", "fragment_2_2"]);
    }

    #[test]
    fn replace_with_empty_result_only_removes() {
        let mut c = loaded(3);
        let report = c.replace_by_ids(&["file-1.txt"], &[]);
        assert_eq!(report.removed, 1);
        assert!(report.inserted.is_empty());
        assert_eq!(ids(&c), vec!["file-2.txt", "file-3.txt"]);
    }
}
