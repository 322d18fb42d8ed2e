use super::{FragmentParams, Fragmenter};
use crate::error::{FragzError, Result};
use crate::model::{count_words, FragmentMeta};
use std::cell::RefCell;

type Script = Box<dyn Fn(usize, &str, &FragmentParams) -> Result<Vec<FragmentMeta>>>;

/// Scripted fragmenter for tests. Records every call it receives.
pub struct StubFragmenter {
    script: Script,
    calls: RefCell<Vec<(String, FragmentParams)>>,
}

impl StubFragmenter {
    /// `script` gets the 0-based call number, the text and the parameters.
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(usize, &str, &FragmentParams) -> Result<Vec<FragmentMeta>> + 'static,
    {
        Self {
            script: Box::new(script),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Splits every text into one piece per whitespace-separated word.
    pub fn per_word() -> Self {
        Self::new(|_, text, _| {
            Ok(text
                .split_whitespace()
                .map(|w| FragmentMeta::new(w, true, 1))
                .collect())
        })
    }

    /// Returns `pieces` fixed pieces for every text, labelled `<call>-<n>`.
    pub fn fixed(pieces: usize) -> Self {
        Self::new(move |call, _, _| {
            Ok((1..=pieces)
                .map(|n| {
                    let text = format!("piece {}-{}", call, n);
                    let words = count_words(&text);
                    FragmentMeta::new(text, n % 2 == 1, words)
                })
                .collect())
        })
    }

    /// Behaves like [`StubFragmenter::per_word`] but fails on call `failing_call`.
    pub fn failing_on(failing_call: usize) -> Self {
        Self::new(move |call, text, _| {
            if call == failing_call {
                return Err(FragzError::FragmentationFailed(format!(
                    "stub failure on call {}",
                    call
                )));
            }
            Ok(text
                .split_whitespace()
                .map(|w| FragmentMeta::new(w, true, 1))
                .collect())
        })
    }

    pub fn calls(&self) -> Vec<(String, FragmentParams)> {
        self.calls.borrow().clone()
    }
}

impl Fragmenter for StubFragmenter {
    fn fragment(&self, text: &str, params: &FragmentParams) -> Result<Vec<FragmentMeta>> {
        let call = {
            let mut calls = self.calls.borrow_mut();
            calls.push((text.to_string(), params.clone()));
            calls.len() - 1
        };
        (self.script)(call, text, params)
    }
}
