//! Inverted index over normalized Quran word bigrams.
//!
//! Built once from a validated [`QuranText`] and immutable afterwards; the
//! tagger only reads it, so a host may share one index across threads.

use rustc_hash::FxHashMap;

use crate::letterblock::{normalize, NormForm};
use crate::quran::QuranText;
use crate::types::{QMeta, QPos};

/// Bigram index plus the normalized word sequence and position metadata.
pub struct QuranIndex {
    /// first form -> second form -> every QPos of the first word.
    bigrams: FxHashMap<NormForm, FxHashMap<NormForm, Vec<QPos>>>,
    norms: Vec<NormForm>,
    meta: Vec<QMeta>,
}

impl QuranIndex {
    /// Normalize every Quran word and index each consecutive pair. Pairs
    /// with an empty side (a word that lost all letters) are not indexed;
    /// verse boundaries do not break pairs, so matching may cross verses.
    pub fn build(quran: &QuranText) -> Self {
        let norms: Vec<NormForm> = quran.words().iter().map(|w| normalize(w)).collect();
        let mut bigrams: FxHashMap<NormForm, FxHashMap<NormForm, Vec<QPos>>> =
            FxHashMap::default();

        for (i, pair) in norms.windows(2).enumerate() {
            if pair[0].is_empty() || pair[1].is_empty() {
                continue;
            }
            bigrams
                .entry(pair[0].clone())
                .or_default()
                .entry(pair[1].clone())
                .or_default()
                .push(i as QPos);
        }

        Self {
            bigrams,
            norms,
            meta: quran.metas().to_vec(),
        }
    }

    /// Every Quran position whose word starts the bigram `(a, b)`.
    pub fn lookup(&self, a: &NormForm, b: &NormForm) -> &[QPos] {
        self.bigrams
            .get(a)
            .and_then(|m| m.get(b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The normalized form of the word at `pos`.
    pub fn norm(&self, pos: QPos) -> &NormForm {
        &self.norms[pos as usize]
    }

    pub fn meta(&self, pos: QPos) -> QMeta {
        self.meta[pos as usize]
    }

    /// Total number of Quran words.
    pub fn word_count(&self) -> usize {
        self.norms.len()
    }

    /// Number of distinct indexed bigrams.
    pub fn bigram_count(&self) -> usize {
        self.bigrams.values().map(|m| m.len()).sum()
    }

    /// Iterate all `(first, second) -> positions` entries. Used by tests to
    /// check index soundness.
    pub fn bigrams(&self) -> impl Iterator<Item = ((&NormForm, &NormForm), &[QPos])> {
        self.bigrams.iter().flat_map(|(a, inner)| {
            inner
                .iter()
                .map(move |(b, positions)| ((a, b), positions.as_slice()))
        })
    }
}
