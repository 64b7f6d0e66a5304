//! The Quran corpus: a pre-tokenized word list with parallel positions.
//!
//! Loaders for the two Tanzil distribution formats are provided; both feed
//! the same validated [`QuranText`]. Validation failures are corpus build
//! errors and are raised before any tagging request is served.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::types::{CorpusError, QMeta, QPos};

/// The tokenized Quran in canonical recitation order.
#[derive(Debug)]
pub struct QuranText {
    words: Vec<String>,
    meta: Vec<QMeta>,
}

impl QuranText {
    /// Build from a parallel word/position list, validating that the two
    /// sides have equal length and that positions follow recitation order.
    pub fn new(words: Vec<String>, meta: Vec<QMeta>) -> Result<Self, CorpusError> {
        if words.len() != meta.len() {
            return Err(CorpusError::MetaMismatch {
                words: words.len(),
                meta: meta.len(),
            });
        }
        if words.is_empty() {
            return Err(CorpusError::Empty);
        }
        for (i, pair) in meta.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(CorpusError::OutOfOrder { qpos: i + 1 });
            }
        }
        Ok(Self { words, meta })
    }

    /// Parse the Tanzil plain-text edition: one `sura|aya|text` line per
    /// verse, `#` comment lines and blank lines ignored.
    pub fn from_tanzil_text<R: BufRead>(reader: R) -> Result<Self, CorpusError> {
        let mut words = Vec::new();
        let mut meta = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(3, '|');
            let (sura, verse, text) = match (parts.next(), parts.next(), parts.next()) {
                (Some(s), Some(v), Some(t)) => (s, v, t),
                _ => {
                    return Err(CorpusError::Malformed {
                        line: lineno + 1,
                        reason: "expected sura|aya|text".into(),
                    })
                }
            };
            let sura: u16 = parse_number(sura, lineno + 1)?;
            let verse: u16 = parse_number(verse, lineno + 1)?;
            push_verse(sura, verse, text, &mut words, &mut meta);
        }

        Self::new(words, meta)
    }

    /// Parse the Tanzil XML edition: `<sura index=..>` elements containing
    /// `<aya index=.. text=..>` elements.
    pub fn from_tanzil_xml(xml: &str) -> Result<Self, CorpusError> {
        let mut reader = Reader::from_str(xml);
        let mut words = Vec::new();
        let mut meta = Vec::new();
        let mut sura: Option<u16> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) | Event::Empty(ref e) => match e.name().as_ref() {
                    b"sura" => {
                        let index = attribute(e, b"index")
                            .ok_or_else(|| CorpusError::MalformedXml("sura without index".into()))?;
                        sura = Some(index.parse().map_err(|_| {
                            CorpusError::MalformedXml(format!("bad sura index '{index}'"))
                        })?);
                    }
                    b"aya" => {
                        let sura = sura
                            .ok_or_else(|| CorpusError::MalformedXml("aya outside sura".into()))?;
                        let index = attribute(e, b"index")
                            .ok_or_else(|| CorpusError::MalformedXml("aya without index".into()))?;
                        let verse: u16 = index.parse().map_err(|_| {
                            CorpusError::MalformedXml(format!("bad aya index '{index}'"))
                        })?;
                        let text = attribute(e, b"text")
                            .ok_or_else(|| CorpusError::MalformedXml("aya without text".into()))?;
                        push_verse(sura, verse, &text, &mut words, &mut meta);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Self::new(words, meta)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, pos: QPos) -> &str {
        &self.words[pos as usize]
    }

    pub fn meta(&self, pos: QPos) -> QMeta {
        self.meta[pos as usize]
    }

    pub fn metas(&self) -> &[QMeta] {
        &self.meta
    }
}

fn push_verse(sura: u16, verse: u16, text: &str, words: &mut Vec<String>, meta: &mut Vec<QMeta>) {
    for (i, word) in text.split_whitespace().enumerate() {
        words.push(word.to_string());
        meta.push(QMeta {
            sura,
            verse,
            word: i as u16 + 1,
        });
    }
}

fn parse_number(s: &str, line: usize) -> Result<u16, CorpusError> {
    s.trim().parse().map_err(|_| CorpusError::Malformed {
        line,
        reason: format!("bad number '{s}'"),
    })
}

fn attribute(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}
