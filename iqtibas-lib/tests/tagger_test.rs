// Corpus tests: tag known token sequences against a bundled Tanzil excerpt
// and compare the reported spans with the expected Quran positions.
//
// Word offsets in the excerpt (zero-based):
//   1:1 starts at q0, 1:2 at q4, 1:3 at q8, 1:4 at q10, 1:5 at q13,
//   1:6 at q17, 1:7 at q20, 29:45 at q29, 40:77 at q50, 112:1 at q64,
//   112:2 at q68, 112:3 at q70, 112:4 at q74.

use iqtibas_lib::{tag, QMeta, QuranIndex, QuranText, StopwordPolicy, TagOptions, TagWarning};

const SAMPLE: &str = include_str!("data/tanzil_sample.txt");

fn index() -> QuranIndex {
    let quran = QuranText::from_tanzil_text(SAMPLE.as_bytes()).expect("sample corpus is valid");
    QuranIndex::build(&quran)
}

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[test]
fn two_word_quotation_is_found() {
    let idx = index();
    let tagging = tag(&tokens("نرينك بعض"), &idx, &TagOptions::default()).unwrap();

    assert_eq!(tagging.matches.len(), 1);
    let m = &tagging.matches[0];
    assert_eq!((m.input_start, m.input_end), (0, 1));
    assert_eq!((m.quran_start, m.quran_end), (56, 57));
    assert_eq!(m.length, 2);
    // 40:77, words 7 and 8.
    assert_eq!(idx.meta(m.quran_start), QMeta { sura: 40, verse: 77, word: 7 });
    assert_eq!(idx.meta(m.quran_end), QMeta { sura: 40, verse: 77, word: 8 });
}

#[test]
fn stopword_anchor_rejects_seed() {
    // "Allahu akbar" appears in 29:45, but the divine name is on the Leeds
    // list and may not anchor a match.
    let idx = index();
    let tagging = tag(&tokens("الله أكبر"), &idx, &TagOptions::default()).unwrap();
    assert!(tagging.matches.is_empty());
    assert!(tagging.warnings.is_empty());
}

#[test]
fn internal_list_admits_the_same_seed() {
    let idx = index();
    let opts = TagOptions { stopwords: StopwordPolicy::Internal, ..Default::default() };
    let tagging = tag(&tokens("الله أكبر"), &idx, &opts).unwrap();
    assert_eq!(tagging.matches.len(), 1);
    assert_eq!(
        (tagging.matches[0].quran_start, tagging.matches[0].quran_end),
        (44, 45)
    );
}

#[test]
fn quotation_inside_prose_covers_exactly_the_quoted_words() {
    // Ten words, the middle three copied from 112:1.
    let idx = index();
    let text = "ذهب الرجل الى السوق قل هو الله ثم رجع مسرعا";
    let tagging = tag(&tokens(text), &idx, &TagOptions::default()).unwrap();

    assert_eq!(tagging.matches.len(), 1);
    let m = &tagging.matches[0];
    assert_eq!((m.input_start, m.input_end), (4, 6));
    assert_eq!((m.quran_start, m.quran_end), (64, 66));
    assert_eq!(m.length, 3);
}

#[test]
fn longer_overlapping_quotation_wins_silently() {
    // The whole of 1:1-1:2 in one run. The repeated "al-rahman al-rahim"
    // of 1:3 yields a shorter competing candidate over words 2-3; the
    // eight-word match wins and no warning is raised.
    let idx = index();
    let text = "بسم الله الرحمن الرحيم الحمد لله رب العالمين";
    let tagging = tag(&tokens(text), &idx, &TagOptions::default()).unwrap();

    assert_eq!(tagging.matches.len(), 1);
    let m = &tagging.matches[0];
    assert_eq!((m.input_start, m.input_end), (0, 7));
    // Crosses the verse boundary: q0..q7 spans 1:1 and 1:2.
    assert_eq!((m.quran_start, m.quran_end), (0, 7));
    assert_eq!(m.length, 8);
    assert!(tagging.warnings.is_empty());
}

#[test]
fn equal_length_overlap_drops_both_with_warning() {
    // "al-rahman al-rahim" occurs at q2 (1:1) and q8 (1:3): two candidates
    // of the same length over the same input words. Neither is preferred;
    // both are dropped and the warning names both positions.
    let idx = index();
    let tagging = tag(&tokens("الرحمن الرحيم"), &idx, &TagOptions::default()).unwrap();

    assert!(tagging.matches.is_empty());
    assert_eq!(tagging.warnings.len(), 1);
    match &tagging.warnings[0] {
        TagWarning::EqualLengthOverlap { first_quran, second_quran, .. } => {
            assert_eq!((*first_quran, *second_quran), (2, 8));
        }
    }
}

#[test]
fn ellipsis_bridges_one_filler_word() {
    // 1:1, one word of filler, then 1:2. With ellipsis on the two verses
    // merge into one match with a recorded gap; off, they stay separate.
    let idx = index();
    let text = "بسم الله الرحمن الرحيم قال الحمد لله رب العالمين";

    let opts = TagOptions { ellipsis: true, ..Default::default() };
    let tagging = tag(&tokens(text), &idx, &opts).unwrap();
    assert_eq!(tagging.matches.len(), 1);
    let m = &tagging.matches[0];
    assert_eq!((m.input_start, m.input_end), (0, 8));
    assert_eq!((m.quran_start, m.quran_end), (0, 7));
    assert_eq!(m.gaps, vec![(4, 5)]);
    // Gap words do not count toward the matched length.
    assert_eq!(m.length, 8);

    let tagging = tag(&tokens(text), &idx, &TagOptions::default()).unwrap();
    assert_eq!(tagging.matches.len(), 2);
    assert_eq!(
        (tagging.matches[0].input_start, tagging.matches[0].input_end),
        (0, 3)
    );
    assert_eq!(
        (tagging.matches[1].input_start, tagging.matches[1].input_end),
        (5, 8)
    );
    assert!(tagging.matches.iter().all(|m| m.gaps.is_empty()));
}

#[test]
fn ellipsis_respects_the_window() {
    // Two filler words need a window of two; a window of one must not
    // bridge them.
    let idx = index();
    let text = "بسم الله الرحمن الرحيم قال يقول الحمد لله رب العالمين";

    let narrow = TagOptions { ellipsis: true, ellipsis_window: 1, ..Default::default() };
    let tagging = tag(&tokens(text), &idx, &narrow).unwrap();
    assert_eq!(tagging.matches.len(), 2);

    let wide = TagOptions { ellipsis: true, ellipsis_window: 2, ..Default::default() };
    let tagging = tag(&tokens(text), &idx, &wide).unwrap();
    assert_eq!(tagging.matches.len(), 1);
    let m = &tagging.matches[0];
    assert_eq!((m.input_start, m.input_end), (0, 9));
    assert_eq!(m.gaps, vec![(4, 6)]);
    assert_eq!(m.length, 8);
}

#[test]
fn min_blocks_threshold_filters_short_matches() {
    let idx = index();
    let opts = TagOptions { min_blocks: 3, ..Default::default() };
    let tagging = tag(&tokens("نرينك بعض"), &idx, &opts).unwrap();
    assert!(tagging.matches.is_empty());
}

#[test]
fn diacritized_input_matches_bare_corpus() {
    // The sample corpus is undiacritized; fully vocalized input must still
    // match through the archigraphemic normalization.
    let idx = index();
    let tagging = tag(
        &tokens("فَإِمَّا نُرِيَنَّكَ بَعْضَ ٱلَّذِى"),
        &idx,
        &TagOptions::default(),
    )
    .unwrap();
    assert_eq!(tagging.matches.len(), 1);
    let m = &tagging.matches[0];
    assert_eq!((m.input_start, m.input_end), (0, 3));
    assert_eq!((m.quran_start, m.quran_end), (55, 58));
}

#[test]
fn matches_are_reported_in_input_order() {
    // Two disjoint quotations out of Quran order: output is ordered by
    // input position, not Quran position.
    let idx = index();
    let text = "قرأ نرينك بعض وكتب مالك يوم الدين";
    let tagging = tag(&tokens(text), &idx, &TagOptions::default()).unwrap();

    assert_eq!(tagging.matches.len(), 2);
    assert_eq!(tagging.matches[0].input_start, 1);
    assert_eq!((tagging.matches[0].quran_start, tagging.matches[0].quran_end), (56, 57));
    assert_eq!(tagging.matches[1].input_start, 4);
    assert_eq!((tagging.matches[1].quran_start, tagging.matches[1].quran_end), (10, 12));
}
