// Output formatting for tag results.

use serde::Serialize;

use crate::index::QuranIndex;
use crate::types::{QMeta, QPos, QuranMatch};

/// A match with its Quran endpoints resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedQuote {
    pub input: (usize, usize),
    pub quran: (QPos, QPos),
    pub from: QMeta,
    pub to: QMeta,
    pub length: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<(usize, usize)>,
}

/// Attach the (sura, verse, word) endpoints to a match.
pub fn resolve(m: &QuranMatch, index: &QuranIndex) -> TaggedQuote {
    TaggedQuote {
        input: (m.input_start, m.input_end),
        quran: (m.quran_start, m.quran_end),
        from: index.meta(m.quran_start),
        to: index.meta(m.quran_end),
        length: m.length,
        gaps: m.gaps.clone(),
    }
}

/// Render a match as a compact one-line reference:
/// `words 0..3 quran 1:1:1..1:1:4 (q0..q3)`.
pub fn to_ref(m: &QuranMatch, index: &QuranIndex) -> String {
    format!(
        "words {}..{} quran {}..{} (q{}..q{})",
        m.input_start,
        m.input_end,
        index.meta(m.quran_start),
        index.meta(m.quran_end),
        m.quran_start,
        m.quran_end
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quran::QuranText;

    fn index() -> QuranIndex {
        let quran = QuranText::from_tanzil_text(
            "1|1|بسم الله الرحمن الرحيم\n1|2|الحمد لله رب العالمين\n".as_bytes(),
        )
        .unwrap();
        QuranIndex::build(&quran)
    }

    fn sample_match() -> QuranMatch {
        QuranMatch {
            input_start: 0,
            input_end: 3,
            quran_start: 0,
            quran_end: 3,
            length: 4,
            gaps: vec![],
        }
    }

    #[test]
    fn test_resolve_endpoints() {
        let quote = resolve(&sample_match(), &index());
        assert_eq!(quote.from, QMeta { sura: 1, verse: 1, word: 1 });
        assert_eq!(quote.to, QMeta { sura: 1, verse: 1, word: 4 });
    }

    #[test]
    fn test_to_ref() {
        assert_eq!(
            to_ref(&sample_match(), &index()),
            "words 0..3 quran 1:1:1..1:1:4 (q0..q3)"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let quote = resolve(&sample_match(), &index());
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"input\":[0,3]"));
        assert!(json.contains("\"from\":{\"sura\":1,\"verse\":1,\"word\":1}"));
        // Gap list is omitted when empty.
        assert!(!json.contains("gaps"));
    }
}
