//! src/generators/word_count.rs
//!
//! Trial generators for the word-count job. Every trial carries the result
//! the job is expected to produce, tallied from the generated parts rather
//! than from the assembled input.
use crate::functions::{Count, LineId, Word, WordCountPair};
use crate::generators::{
    Gen, bounded, constant, element_of, frequency, string_of, vec_of, zip,
};
use crate::job::MapInput;
use std::collections::BTreeMap;

const PRINTABLE_ASCII: &str = concat!(
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);
const BLANKS: [&str; 8] = ["", " ", "  ", "\t", " \t ", "\n", "\u{a0}", "\u{3000}"];
const VOCABULARY: [&str; 12] = [
    "the", "cat", "sat", "on", "a", "mat", "dog", "ran", "don't", "x1y", "naïve", "3.14",
];

pub const MAX_LINE_ID: u64 = 1_000_000;
pub const MAX_COUNT: u64 = 1_000;
/// Three counts this large can overflow a `u64` total.
pub const MAX_LARGE_COUNT: u64 = u64::MAX / 2;

/// Blank means empty or made only of whitespace; such words never reach the
/// mapper's output.
pub fn is_blank(word: &str) -> bool {
    word.chars().all(char::is_whitespace)
}

pub fn line_id() -> Gen<LineId> {
    bounded(0, MAX_LINE_ID).map(|id| LineId::new(*id))
}

/// Any character that is not whitespace: printable ASCII (letters first,
/// then digits and punctuation), then the BMP from Latin-1 up to the CJK
/// radicals, then emoji.
pub fn word_char() -> Gen<char> {
    frequency(vec![
        (6, element_of(PRINTABLE_ASCII.chars().collect())),
        (3, code_point(0xa1, 0x2fff)),
        (1, code_point(0x1f300, 0x1f64f)),
    ])
}

fn code_point(low: u32, high: u32) -> Gen<char> {
    bounded(low.into(), high.into()).map(|code| {
        u32::try_from(*code)
            .ok()
            .and_then(char::from_u32)
            .filter(|c| !c.is_whitespace())
            .unwrap_or('·')
    })
}

pub fn non_blank_word() -> Gen<String> {
    string_of(word_char(), 1, 10)
}

pub fn blank() -> Gen<String> {
    element_of(BLANKS.iter().map(|b| b.to_string()).collect())
}

/// A word that is blank about one time in five.
pub fn word() -> Gen<String> {
    frequency(vec![(4, non_blank_word()), (1, blank())])
}

/// Per-occurrence counts: mostly ones, like real mapper output, with some
/// counts far beyond what a narrow integer holds.
pub fn count() -> Gen<Count> {
    frequency(vec![
        (6, constant(1)),
        (3, bounded(0, MAX_COUNT)),
        (2, bounded(0, MAX_LARGE_COUNT)),
    ])
    .map(|c| Count::new(*c))
}

#[derive(Debug, Clone)]
pub struct WordTrial {
    pub key: LineId,
    pub word: String,
    pub expected: Vec<WordCountPair>,
}

impl WordTrial {
    pub fn input(&self) -> MapInput {
        MapInput::new(self.key, self.word.clone())
    }
}

pub fn single_word() -> Gen<WordTrial> {
    zip(line_id(), word()).map(|(key, word)| {
        let expected = if is_blank(word) {
            vec![]
        } else {
            vec![WordCountPair::new(Word::new(word.clone()), Count::ONE)]
        };
        WordTrial {
            key: *key,
            word: word.clone(),
            expected,
        }
    })
}

#[derive(Debug, Clone)]
pub struct LineTrial {
    pub key: LineId,
    pub words: Vec<String>,
    pub line: String,
    pub expected_count: usize,
    /// Non-blank words in sorted order, as a multiset.
    pub expected_words: Vec<Word>,
}

impl LineTrial {
    pub fn input(&self) -> MapInput {
        MapInput::new(self.key, self.line.clone())
    }
}

pub fn line() -> Gen<LineTrial> {
    zip(line_id(), vec_of(word(), 0, 20)).map(|(key, words)| {
        let mut expected_words: Vec<Word> = words
            .iter()
            .filter(|w| !is_blank(w))
            .map(|w| Word::new(w.clone()))
            .collect();
        expected_words.sort();
        LineTrial {
            key: *key,
            line: words.join(" "),
            expected_count: expected_words.len(),
            expected_words,
            words: words.clone(),
        }
    })
}

/// What reducing a group must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedTotal {
    /// Empty group: no output at all.
    Empty,
    Sum(Count),
    /// The total does not fit a count; the reducer must refuse the group.
    Overflow,
}

impl ExpectedTotal {
    pub fn of(counts: &[Count]) -> Self {
        if counts.is_empty() {
            return ExpectedTotal::Empty;
        }
        counts
            .iter()
            .try_fold(Count::new(0), |total, count| total.checked_add(*count))
            .map_or(ExpectedTotal::Overflow, ExpectedTotal::Sum)
    }
}

#[derive(Debug, Clone)]
pub struct CountsTrial {
    pub word: Word,
    pub counts: Vec<Count>,
    pub expected: ExpectedTotal,
}

pub fn counts_with_sum() -> Gen<CountsTrial> {
    // Empty groups are weighted up so every run sees several of them.
    let counts = frequency(vec![(1, constant(vec![])), (6, vec_of(count(), 1, 30))]);
    zip(non_blank_word(), counts).map(|(word, counts)| {
        let expected = ExpectedTotal::of(counts);
        CountsTrial {
            word: Word::new(word.clone()),
            counts: counts.clone(),
            expected,
        }
    })
}

#[derive(Debug, Clone)]
pub struct CorpusTrial {
    pub first_key: LineId,
    pub lines: Vec<Vec<String>>,
    /// Per-word totals, ordered by word.
    pub expected: Vec<WordCountPair>,
}

impl CorpusTrial {
    pub fn inputs(&self) -> Vec<MapInput> {
        self.lines
            .iter()
            .enumerate()
            .map(|(offset, words)| {
                MapInput::new(
                    LineId::new(self.first_key.get() + offset as u64),
                    words.join(" "),
                )
            })
            .collect()
    }
}

/// Words drawn from a small vocabulary so that they repeat across lines.
pub fn vocabulary_word() -> Gen<String> {
    frequency(vec![
        (5, element_of(VOCABULARY.iter().map(|w| w.to_string()).collect())),
        (1, blank()),
    ])
}

pub fn corpus() -> Gen<CorpusTrial> {
    let lines = vec_of(vec_of(vocabulary_word(), 0, 12), 0, 8);
    zip(line_id(), lines).map(|(first_key, lines)| {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for word in lines.iter().flatten().filter(|w| !is_blank(w)) {
            *totals.entry(word.as_str()).or_default() += 1;
        }
        let expected = totals
            .into_iter()
            .map(|(word, total)| WordCountPair::new(Word::new(word), Count::new(total)))
            .collect();
        CorpusTrial {
            first_key: *first_key,
            lines: lines.clone(),
            expected,
        }
    })
}
