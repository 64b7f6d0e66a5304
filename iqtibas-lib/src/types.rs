use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zero-based word offset into the Quran in canonical recitation order.
pub type QPos = u32;

/// Canonical position of a Quran word: (sura, verse, word-in-verse).
/// Word numbering starts at 1, following the Tanzil convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QMeta {
    pub sura: u16,
    pub verse: u16,
    pub word: u16,
}

impl fmt::Display for QMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.sura, self.verse, self.word)
    }
}

/// Which shipped stopword list rejects match anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwordPolicy {
    /// Small conservative list: bare particles, pronouns and relatives.
    Internal,
    /// Larger list derived from the Leeds quranic corpus POS annotations.
    #[default]
    Leeds,
}

impl FromStr for StopwordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(StopwordPolicy::Internal),
            "leeds" => Ok(StopwordPolicy::Leeds),
            other => Err(format!(
                "unknown stopword list '{other}' (expected 'internal' or 'leeds')"
            )),
        }
    }
}

/// Options for a single tag call.
#[derive(Debug, Clone)]
pub struct TagOptions {
    /// Minimum number of matched words to accept a candidate.
    pub min_blocks: usize,
    /// Stopword list used to reject seeds anchored at a function word.
    pub stopwords: StopwordPolicy,
    /// Allow one bounded gap of non-Quranic words inside a quotation.
    pub ellipsis: bool,
    /// Maximum gap width, in input words.
    pub ellipsis_window: usize,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            min_blocks: 2,
            stopwords: StopwordPolicy::default(),
            ellipsis: false,
            ellipsis_window: 2,
        }
    }
}

/// One identified quotation. Input and Quran spans are inclusive.
///
/// `length` counts matched input words; words inside an ellipsis gap are
/// part of the reported input span but excluded from the count, so in the
/// gap-free case `length == input_end - input_start + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuranMatch {
    pub input_start: usize,
    pub input_end: usize,
    pub quran_start: QPos,
    pub quran_end: QPos,
    pub length: usize,
    /// Skipped input ranges `[start, end)`, empty unless ellipsis fired.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<(usize, usize)>,
}

/// Structured warning events emitted alongside matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TagWarning {
    /// Two candidates of the same length overlapped; both were dropped
    /// rather than picking one arbitrarily.
    EqualLengthOverlap {
        first_input: (usize, usize),
        first_quran: QPos,
        second_input: (usize, usize),
        second_quran: QPos,
    },
}

impl fmt::Display for TagWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagWarning::EqualLengthOverlap {
                first_input,
                first_quran,
                second_input,
                second_quran,
            } => write!(
                f,
                "overlapping Quran quotations with same length: {}-{}(q{}) vs {}-{}(q{})",
                first_input.0,
                first_input.1,
                first_quran,
                second_input.0,
                second_input.1,
                second_quran
            ),
        }
    }
}

/// Result of one tag call: matches sorted by input start, plus warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tagging {
    pub matches: Vec<QuranMatch>,
    pub warnings: Vec<TagWarning>,
}

/// Failures while loading or validating the Quran corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed corpus line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("malformed corpus XML: {0}")]
    MalformedXml(String),
    #[error("corpus XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("word list has {words} entries but metadata has {meta}")]
    MetaMismatch { words: usize, meta: usize },
    #[error("corpus is empty")]
    Empty,
    #[error("metadata out of recitation order at word {qpos}")]
    OutOfOrder { qpos: usize },
}

/// Failures of a single tag call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("input token sequence is empty")]
    EmptyInput,
    #[error("min_blocks must be at least 1")]
    InvalidMinBlocks,
    #[error("tagging cancelled by host")]
    Cancelled,
}
