//! Archigraphemic normalization of Arabic script.
//!
//! Every input word is reduced to a string of *letterblocks*: equivalence
//! classes over Arabic graphemes that collapse diacritics, hamza seats,
//! presentation forms and dotting variants into the bare rasm shape. Two
//! words are considered the same for matching iff their letterblock strings
//! are byte-equal. The class tables follow Thomas Milo's archigrapheme
//! analysis of the quranic script.

use std::fmt;

/// One letterblock class. Each variant has a stable ASCII symbol; a
/// [`NormForm`] is the string of those symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letterblock {
    Alif,
    /// The undotted tooth shape: ba, ta, tha and non-final nun/ya.
    Denticle,
    Gim,
    Dal,
    Ra,
    Sin,
    Sad,
    Tah,
    Ain,
    /// Fa, and non-final qaf (same denticulated loop in the rasm).
    Fa,
    /// Word-final qaf, which keeps a distinct tail.
    Qaf,
    Kaf,
    Lam,
    Mim,
    /// Word-final nun.
    Nun,
    Ha,
    /// Ta marbuta. Kept distinct from [`Letterblock::Ha`] by default; see
    /// [`normalize_folded_ta`].
    TaMarbuta,
    Waw,
    /// Word-final ya (dotted or dotless).
    Ya,
}

impl Letterblock {
    /// The ASCII symbol this block contributes to a [`NormForm`].
    pub fn symbol(self) -> char {
        match self {
            Letterblock::Alif => 'A',
            Letterblock::Denticle => 'B',
            Letterblock::Gim => 'G',
            Letterblock::Dal => 'D',
            Letterblock::Ra => 'R',
            Letterblock::Sin => 'S',
            Letterblock::Sad => 'C',
            Letterblock::Tah => 'T',
            Letterblock::Ain => 'E',
            Letterblock::Fa => 'F',
            Letterblock::Qaf => 'Q',
            Letterblock::Kaf => 'K',
            Letterblock::Lam => 'L',
            Letterblock::Mim => 'M',
            Letterblock::Nun => 'N',
            Letterblock::Ha => 'H',
            Letterblock::TaMarbuta => 'P',
            Letterblock::Waw => 'W',
            Letterblock::Ya => 'Y',
        }
    }

    /// Inverse of [`Letterblock::symbol`]. Lets already-normalized text pass
    /// through [`normalize`] unchanged, which makes normalization idempotent.
    pub fn from_symbol(c: char) -> Option<Letterblock> {
        Some(match c {
            'A' => Letterblock::Alif,
            'B' => Letterblock::Denticle,
            'G' => Letterblock::Gim,
            'D' => Letterblock::Dal,
            'R' => Letterblock::Ra,
            'S' => Letterblock::Sin,
            'C' => Letterblock::Sad,
            'T' => Letterblock::Tah,
            'E' => Letterblock::Ain,
            'F' => Letterblock::Fa,
            'Q' => Letterblock::Qaf,
            'K' => Letterblock::Kaf,
            'L' => Letterblock::Lam,
            'M' => Letterblock::Mim,
            'N' => Letterblock::Nun,
            'H' => Letterblock::Ha,
            'P' => Letterblock::TaMarbuta,
            'W' => Letterblock::Waw,
            'Y' => Letterblock::Ya,
            _ => return None,
        })
    }
}

/// The archigraphemic form of a token: one symbol per letterblock.
/// Byte equality on `NormForm` is the matching relation of the tagger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NormForm(String);

impl NormForm {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for tokens that lost all letters under normalization
    /// (punctuation, digits, isolated diacritics). Such tokens never
    /// participate in a bigram.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of letterblocks.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NormForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification of one character before the position pass. Qaf, nun and
/// ya fold into the fa/denticle classes everywhere except word-finally,
/// so their resolution is deferred until the whole token is scanned.
#[derive(Clone, Copy)]
enum Pending {
    Fixed(Letterblock),
    QafLike,
    NunLike,
    YaLike,
}

impl Pending {
    fn resolve(self, last: bool) -> Letterblock {
        match self {
            Pending::Fixed(b) => b,
            Pending::QafLike => {
                if last {
                    Letterblock::Qaf
                } else {
                    Letterblock::Fa
                }
            }
            Pending::NunLike => {
                if last {
                    Letterblock::Nun
                } else {
                    Letterblock::Denticle
                }
            }
            Pending::YaLike => {
                if last {
                    Letterblock::Ya
                } else {
                    Letterblock::Denticle
                }
            }
        }
    }
}

/// Reduce a token to its archigraphemic form.
///
/// Pure, deterministic and idempotent: `normalize(normalize(x)) ==
/// normalize(x)` for every input. Tokens with no Arabic letters reduce to
/// the empty form.
pub fn normalize(token: &str) -> NormForm {
    normalize_impl(token, false)
}

/// Like [`normalize`], but folds ta marbuta into the ha block, as texts
/// with loose orthography sometimes require.
pub fn normalize_folded_ta(token: &str) -> NormForm {
    normalize_impl(token, true)
}

fn normalize_impl(token: &str, fold_ta_marbuta: bool) -> NormForm {
    let mut pending: Vec<Pending> = Vec::with_capacity(token.len() / 2);
    for c in token.chars() {
        if let Some(p) = classify(c, fold_ta_marbuta) {
            pending.push(p);
        }
    }
    let count = pending.len();
    let symbols: String = pending
        .iter()
        .enumerate()
        .map(|(i, p)| p.resolve(i + 1 == count).symbol())
        .collect();
    NormForm(symbols)
}

/// Map one character to its letterblock class, or None for characters that
/// are stripped (diacritics, tatweel, punctuation, digits, non-Arabic).
fn classify(c: char, fold_ta_marbuta: bool) -> Option<Pending> {
    use Letterblock::*;
    let block = match c {
        // Alif and its hamza/madda/wasla seats.
        'ا' | 'أ' | 'إ' | 'آ' | 'ٱ' => Pending::Fixed(Alif),
        // Isolated hamza carries no rasm shape.
        'ء' => return None,
        // The denticle family: ba, ta, tha, peh and the initial-form ba
        // presentation character.
        'ب' | 'ت' | 'ث' | 'پ' | 'ﺑ' => Pending::Fixed(Denticle),
        'ج' | 'ح' | 'خ' | 'چ' | 'ځ' => Pending::Fixed(Gim),
        'د' | 'ذ' | 'ڈ' => Pending::Fixed(Dal),
        'ر' | 'ز' | 'ژ' => Pending::Fixed(Ra),
        'س' | 'ش' => Pending::Fixed(Sin),
        'ص' | 'ض' => Pending::Fixed(Sad),
        'ط' | 'ظ' => Pending::Fixed(Tah),
        'ع' | 'غ' => Pending::Fixed(Ain),
        'ف' | 'ڡ' => Pending::Fixed(Fa),
        'ق' => Pending::QafLike,
        'ك' | 'ک' | 'گ' | 'ﮐ' => Pending::Fixed(Kaf),
        'ل' | 'ﻟ' => Pending::Fixed(Lam),
        'م' => Pending::Fixed(Mim),
        // Nun, its retroflex variant, and the small high noon that the
        // Tanzil text uses for the assimilated noon in e.g. "nunji".
        'ن' | 'ں' | 'ۨ' => Pending::NunLike,
        'ه' | 'ہ' | 'ھ' | 'ﻫ' => Pending::Fixed(Ha),
        'ة' => {
            if fold_ta_marbuta {
                Pending::Fixed(Ha)
            } else {
                Pending::Fixed(TaMarbuta)
            }
        }
        'و' | 'ؤ' => Pending::Fixed(Waw),
        // Ya, alif maqsura, hamza-on-ya, Farsi yeh and the dotless tooth:
        // all share the ya shape finally and the denticle elsewhere.
        'ي' | 'ى' | 'ئ' | 'ی' | 'ٮ' => Pending::YaLike,
        _ => {
            // Already-normalized symbols pass through unchanged.
            if let Some(b) = Letterblock::from_symbol(c) {
                Pending::Fixed(b)
            } else {
                // Everything else is stripped: harakat, quranic annotation
                // signs, tatweel, punctuation, digits, foreign scripts.
                return None;
            }
        }
    };
    Some(block)
}
