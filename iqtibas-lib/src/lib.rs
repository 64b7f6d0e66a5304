pub mod index;
pub mod letterblock;
pub mod output;
pub mod quran;
pub mod stopwords;
pub mod tagger;
pub mod types;

pub use index::QuranIndex;
pub use letterblock::{normalize, normalize_folded_ta, Letterblock, NormForm};
pub use quran::QuranText;
pub use stopwords::StopwordSet;
pub use tagger::{tag, tag_with_probe};
pub use types::{
    CorpusError, QMeta, QPos, QuranMatch, StopwordPolicy, TagError, TagOptions, TagWarning,
    Tagging,
};
