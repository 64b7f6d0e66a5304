//! Stopword sets over archigraphemic forms.
//!
//! A seed whose first token normalizes to a stopword is rejected: function
//! words are too common to anchor a quotation match. Stopwords are still
//! allowed *inside* an extended match.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;

use crate::letterblock::{normalize, NormForm};
use crate::types::StopwordPolicy;

const INTERNAL_LIST: &str = include_str!("../data/stopwords_internal.txt");
const LEEDS_LIST: &str = include_str!("../data/stopwords_leeds.txt");

/// An immutable set of archigraphemic forms unfit to anchor a match.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    forms: FxHashSet<NormForm>,
}

impl StopwordSet {
    /// Build a set from raw Arabic words. Each word is normalized, so
    /// spelling variants of the same rasm collapse into one entry; words
    /// that normalize to nothing are dropped.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let forms = words
            .into_iter()
            .map(normalize)
            .filter(|nf| !nf.is_empty())
            .collect();
        Self { forms }
    }

    /// The shipped set for a policy, built once per process on first use
    /// and shared by reference thereafter.
    pub fn shipped(policy: StopwordPolicy) -> &'static StopwordSet {
        static INTERNAL: OnceLock<StopwordSet> = OnceLock::new();
        static LEEDS: OnceLock<StopwordSet> = OnceLock::new();
        match policy {
            StopwordPolicy::Internal => INTERNAL.get_or_init(|| Self::parse(INTERNAL_LIST)),
            StopwordPolicy::Leeds => LEEDS.get_or_init(|| Self::parse(LEEDS_LIST)),
        }
    }

    /// Pure membership test.
    pub fn contains(&self, nf: &NormForm) -> bool {
        self.forms.contains(nf)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn parse(data: &str) -> Self {
        Self::from_words(
            data.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }
}
