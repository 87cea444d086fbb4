//! Text statistics.
//!
//! Everything here is a pure function of the input text. Counts are in
//! Unicode scalar values, matching how input length is limited elsewhere.

use std::cmp::Ordering;
use std::fmt;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Remaining-character threshold below which the input counts as near its limit.
pub const NEAR_LIMIT_THRESHOLD: usize = 1000;

/// Statistics for a piece of text, in report order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisReport {
    pub word_count: usize,
    pub char_count: usize,
    pub char_count_no_spaces: usize,
    pub line_count: usize,
    pub sentence_count: usize,
    /// Rounded to one decimal place; `0.0` when there are no sentences.
    pub average_words_per_sentence: f64,
    pub reading_time_minutes: usize,
}

impl AnalysisReport {
    /// Report rows as `(label, value)` pairs in their fixed order.
    pub fn entries(&self) -> [(&'static str, String); 7] {
        let average = if self.sentence_count > 0 {
            format!("{:.1}", self.average_words_per_sentence)
        } else {
            "0".to_string()
        };
        [
            ("Word Count", self.word_count.to_string()),
            ("Character Count", self.char_count.to_string()),
            ("Character Count (no spaces)", self.char_count_no_spaces.to_string()),
            ("Line Count", self.line_count.to_string()),
            ("Sentence Count", self.sentence_count.to_string()),
            ("Average Words per Sentence", average),
            ("Reading Time (min)", self.reading_time_minutes.to_string()),
        ]
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, value)) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

/// Analyze `text` into a full statistics report.
pub fn analyze(text: &str) -> AnalysisReport {
    let words = word_count(text);
    let sentences = sentence_count(text);

    AnalysisReport {
        word_count: words,
        char_count: text.chars().count(),
        char_count_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        line_count: line_count(text),
        sentence_count: sentences,
        average_words_per_sentence: average_tenths(words, sentences) as f64 / 10.0,
        reading_time_minutes: reading_time_minutes(words),
    }
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of `\n`-separated segments. The empty string has one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Number of non-blank segments between runs of `.`, `!` and `?`.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Whole minutes to read `words` words, never less than one.
pub const fn reading_time_minutes(words: usize) -> usize {
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    if minutes == 0 { 1 } else { minutes }
}

// Words per sentence in tenths. The ratio is taken as an f64 and rounded
// to the nearest tenth of its exact binary value, ties going up.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn average_tenths(words: usize, sentences: usize) -> u64 {
    if sentences == 0 || words == 0 {
        return 0;
    }
    let ratio = words as f64 / sentences as f64;
    let mut tenths = (ratio * 10.0).floor() as u64;
    // The product above is itself rounded, so settle on the exact neighbor.
    while tenths > 0 && compare_twentieths(ratio, 2 * tenths - 1) == Ordering::Less {
        tenths -= 1;
    }
    while compare_twentieths(ratio, 2 * tenths + 1) != Ordering::Less {
        tenths += 1;
    }
    tenths
}

/// Compare a finite, non-negative `value` with `twentieths / 20`, exactly.
fn compare_twentieths(value: f64, twentieths: u64) -> Ordering {
    let bits = value.to_bits();
    let biased_exp = i32::try_from((bits >> 52) & 0x7ff).unwrap_or(0);
    let fraction = bits & ((1 << 52) - 1);
    let (mantissa, exp) = if biased_exp == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased_exp - 1075)
    };

    // value * 20 = mantissa * 20 * 2^exp
    let lhs = u128::from(mantissa) * 20;
    let rhs = u128::from(twentieths);
    if exp >= 0 {
        lhs.checked_shl(exp.unsigned_abs())
            .map_or(Ordering::Greater, |scaled| scaled.cmp(&rhs))
    } else if exp.unsigned_abs() >= 64 {
        // lhs < 2^58, rhs is scaled by at least 2^64
        if twentieths == 0 { Ordering::Greater } else { Ordering::Less }
    } else {
        lhs.cmp(&(rhs << exp.unsigned_abs()))
    }
}

/// Live statistics shown next to the input panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputStats {
    pub char_count: usize,
    pub word_count: usize,
    /// Zero for empty input, unlike [`line_count`].
    pub line_count: usize,
    pub reading_time_minutes: usize,
    pub max_length: usize,
    pub remaining_chars: usize,
    pub is_over_limit: bool,
    pub is_near_limit: bool,
    pub has_text: bool,
}

impl InputStats {
    pub fn compute(text: &str, max_length: usize) -> Self {
        let char_count = text.chars().count();
        let words = word_count(text);
        let remaining = max_length.saturating_sub(char_count);

        Self {
            char_count,
            word_count: words,
            line_count: if text.is_empty() { 0 } else { line_count(text) },
            reading_time_minutes: reading_time_minutes(words),
            max_length,
            remaining_chars: remaining,
            is_over_limit: char_count > max_length,
            is_near_limit: remaining > 0 && remaining <= NEAR_LIMIT_THRESHOLD,
            has_text: !text.trim().is_empty(),
        }
    }
}
