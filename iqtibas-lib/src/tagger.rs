//! The matching engine: find Quranic quotations in a token stream.
//!
//! Candidate generation is seeded by bigram index hits, each seed is grown
//! in both directions while input and Quran agree under normalization, and
//! competing candidates are reconciled by longest-length preference. An
//! optional ellipsis pass lets a candidate bridge a short run of
//! non-Quranic filler.

use log::warn;
use rustc_hash::FxHashSet;

use crate::index::QuranIndex;
use crate::letterblock::{normalize, NormForm};
use crate::stopwords::StopwordSet;
use crate::types::{QPos, QuranMatch, TagError, TagOptions, TagWarning, Tagging};

/// A grown match before overlap resolution. Same shape as [`QuranMatch`];
/// kept separate so resolution can work on a value it owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Candidate {
    input_start: usize,
    input_end: usize,
    quran_start: QPos,
    quran_end: QPos,
    length: usize,
    gaps: Vec<(usize, usize)>,
}

impl Candidate {
    fn into_match(self) -> QuranMatch {
        QuranMatch {
            input_start: self.input_start,
            input_end: self.input_end,
            quran_start: self.quran_start,
            quran_end: self.quran_end,
            length: self.length,
            gaps: self.gaps,
        }
    }

    fn overlaps(&self, other: &Candidate) -> bool {
        self.input_start <= other.input_end && other.input_start <= self.input_end
    }
}

/// Tag a token sequence with Quranic quotations.
///
/// Returns the accepted matches sorted by `input_start` together with any
/// warnings raised during overlap resolution. Fails on an empty token
/// sequence or a zero `min_blocks`; finding no matches is not an error.
pub fn tag<S: AsRef<str>>(
    tokens: &[S],
    index: &QuranIndex,
    opts: &TagOptions,
) -> Result<Tagging, TagError> {
    tag_with_probe(tokens, index, opts, None)
}

/// Like [`tag`], with a cancellation probe consulted once per input token.
/// When the probe returns true the call stops with [`TagError::Cancelled`]
/// and produces no partial output.
pub fn tag_with_probe<S: AsRef<str>>(
    tokens: &[S],
    index: &QuranIndex,
    opts: &TagOptions,
    probe: Option<&dyn Fn() -> bool>,
) -> Result<Tagging, TagError> {
    if tokens.is_empty() {
        return Err(TagError::EmptyInput);
    }
    if opts.min_blocks == 0 {
        return Err(TagError::InvalidMinBlocks);
    }

    let stop = StopwordSet::shipped(opts.stopwords);

    let mut norms = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(probe) = probe {
            if probe() {
                return Err(TagError::Cancelled);
            }
        }
        norms.push(normalize(token.as_ref()));
    }

    // Seed on every consecutive bigram whose anchor is not a stopword.
    // Every seed inside one quotation grows to the same maximal span, so
    // duplicates are collapsed as they appear.
    let mut seen: FxHashSet<Candidate> = FxHashSet::default();
    let mut candidates = Vec::new();
    for i in 0..norms.len().saturating_sub(1) {
        let (a, b) = (&norms[i], &norms[i + 1]);
        if a.is_empty() || b.is_empty() || stop.contains(a) {
            continue;
        }
        for &j in index.lookup(a, b) {
            let mut cand = extend(i, j, &norms, index, opts);
            trim_leading_stopwords(&mut cand, &norms, stop);
            if cand.length >= opts.min_blocks && seen.insert(cand.clone()) {
                candidates.push(cand);
            }
        }
    }

    let (accepted, warnings) = resolve_overlaps(candidates);

    let mut matches: Vec<QuranMatch> = accepted.into_iter().map(Candidate::into_match).collect();
    matches.sort_by_key(|m| m.input_start);
    Ok(Tagging { matches, warnings })
}

/// True when input word `k` and Quran word `q` agree under normalization.
/// Tokens that normalized to nothing never match anything.
fn matches_at(norms: &[NormForm], k: usize, index: &QuranIndex, q: QPos) -> bool {
    let nf = &norms[k];
    !nf.is_empty() && nf == index.norm(q)
}

/// Grow the seed `(i, j)` into a maximal candidate. The seed itself covers
/// input words `i, i+1` aligned to Quran words `j, j+1`.
///
/// With ellipsis enabled, a stalled end may skip up to `ellipsis_window`
/// input words if matching resumes inside the window; the Quran cursor does
/// not advance over a gap. At most one gap per candidate, and the forward
/// end gets the first chance.
fn extend(i: usize, j: QPos, norms: &[NormForm], index: &QuranIndex, opts: &TagOptions) -> Candidate {
    let input_len = norms.len();
    let quran_len = index.word_count() as QPos;
    let mut gaps: Vec<(usize, usize)> = Vec::new();

    // Forward.
    let mut k = i + 2;
    let mut q = j + 2;
    loop {
        while k < input_len && q < quran_len && matches_at(norms, k, index, q) {
            k += 1;
            q += 1;
        }
        if !opts.ellipsis || !gaps.is_empty() || k >= input_len || q >= quran_len {
            break;
        }
        let resume = (1..=opts.ellipsis_window)
            .map(|d| k + d)
            .take_while(|&x| x < input_len)
            .find(|&x| matches_at(norms, x, index, q));
        match resume {
            Some(k2) => {
                gaps.push((k, k2));
                k = k2 + 1;
                q += 1;
            }
            None => break,
        }
    }
    let input_end = k - 1;
    let quran_end = q - 1;

    // Backward. Cursors go signed so they can rest one step out of bounds.
    let mut k = i as isize - 1;
    let mut q = j as i64 - 1;
    loop {
        while k >= 0 && q >= 0 && matches_at(norms, k as usize, index, q as QPos) {
            k -= 1;
            q -= 1;
        }
        if !opts.ellipsis || !gaps.is_empty() || k < 0 || q < 0 {
            break;
        }
        let resume = (1..=opts.ellipsis_window as isize)
            .map(|d| k - d)
            .take_while(|&x| x >= 0)
            .find(|&x| matches_at(norms, x as usize, index, q as QPos));
        match resume {
            Some(k2) => {
                gaps.insert(0, ((k2 + 1) as usize, (k + 1) as usize));
                k = k2 - 1;
                q -= 1;
            }
            None => break,
        }
    }
    let input_start = (k + 1) as usize;
    let quran_start = (q + 1) as QPos;

    let gap_words: usize = gaps.iter().map(|(s, e)| e - s).sum();
    let length = (input_end - input_start + 1) - gap_words;

    Candidate {
        input_start,
        input_end,
        quran_start,
        quran_end,
        length,
        gaps,
    }
}

/// Backward extension may leave a stopword at the start of the span; a
/// match must not begin with one, so leading stopwords are stripped before
/// the candidate meets the `min_blocks` threshold. A gap that ends up
/// leading the span is dropped with it.
fn trim_leading_stopwords(cand: &mut Candidate, norms: &[NormForm], stop: &StopwordSet) {
    loop {
        if let Some(&(gap_start, gap_end)) = cand.gaps.first() {
            if gap_start == cand.input_start {
                cand.input_start = gap_end;
                cand.gaps.remove(0);
                continue;
            }
        }
        if cand.input_start < cand.input_end && stop.contains(&norms[cand.input_start]) {
            cand.input_start += 1;
            cand.quran_start += 1;
            cand.length -= 1;
            continue;
        }
        break;
    }
}

/// Select a non-overlapping subset of candidates.
///
/// Candidates are visited longest first (ties by input start, then Quran
/// start). A candidate conflicting with an already accepted one is dropped
/// silently; two surviving candidates of equal length that overlap each
/// other are both dropped, with a warning naming the two Quran positions.
fn resolve_overlaps(mut cands: Vec<Candidate>) -> (Vec<Candidate>, Vec<TagWarning>) {
    cands.sort_by(|a, b| {
        b.length
            .cmp(&a.length)
            .then(a.input_start.cmp(&b.input_start))
            .then(a.input_end.cmp(&b.input_end))
            .then(a.quran_start.cmp(&b.quran_start))
    });

    let mut accepted: Vec<Candidate> = Vec::new();
    let mut warnings = Vec::new();
    let mut rejected = vec![false; cands.len()];

    for i in 0..cands.len() {
        if rejected[i] {
            continue;
        }
        if accepted.iter().any(|a| a.overlaps(&cands[i])) {
            rejected[i] = true;
            continue;
        }
        // Equal-length conflicts: the sort keeps same-length candidates
        // contiguous, so scanning forward until the length changes sees
        // every possible partner.
        let mut conflicted = false;
        for jj in (i + 1)..cands.len() {
            if cands[jj].length != cands[i].length {
                break;
            }
            if rejected[jj]
                || !cands[i].overlaps(&cands[jj])
                || accepted.iter().any(|a| a.overlaps(&cands[jj]))
            {
                continue;
            }
            let w = TagWarning::EqualLengthOverlap {
                first_input: (cands[i].input_start, cands[i].input_end),
                first_quran: cands[i].quran_start,
                second_input: (cands[jj].input_start, cands[jj].input_end),
                second_quran: cands[jj].quran_start,
            };
            warn!("{w}");
            warnings.push(w);
            rejected[jj] = true;
            conflicted = true;
        }
        if conflicted {
            rejected[i] = true;
        } else {
            accepted.push(cands[i].clone());
        }
    }

    (accepted, warnings)
}
