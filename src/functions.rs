//! src/functions.rs
use std::fmt;

/// Ordinal identifying an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(u64);

impl LineId {
    pub fn new(id: u64) -> Self {
        LineId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(String);

impl Word {
    pub fn new(word: impl Into<String>) -> Self {
        Word(word.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(u64);

impl Count {
    pub const ONE: Count = Count(1);

    pub fn new(count: u64) -> Self {
        Count(count)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Count) -> Option<Count> {
        self.0.checked_add(other.0).map(Count)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `(word, count)` pair emitted by a mapper or a reducer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordCountPair {
    word: Word,
    count: Count,
}

impl WordCountPair {
    pub fn new(word: Word, count: Count) -> Self {
        WordCountPair { word, count }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn count(&self) -> Count {
        self.count
    }

    pub fn into_parts(self) -> (Word, Count) {
        (self.word, self.count)
    }
}

impl fmt::Display for WordCountPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.word, self.count)
    }
}

pub trait MapEmitter {
    fn emit(&mut self, word: Word, count: Count);
}

pub trait ReduceEmitter {
    fn emit(&mut self, word: Word, count: Count);
}

/// Turns one input line into `(word, count)` pairs.
///
/// Implementations are supplied by the job under test and must be callable
/// from several trial workers at once.
pub trait Mapper: Send + Sync {
    fn name(&self) -> &str;
    fn map(&self, key: LineId, value: &str, emitter: &mut dyn MapEmitter) -> anyhow::Result<()>;
}

/// Folds every count recorded for one word into at most one pair.
pub trait Reducer: Send + Sync {
    fn name(&self) -> &str;
    fn reduce(
        &self,
        key: &Word,
        values: &mut dyn Iterator<Item = Count>,
        emitter: &mut dyn ReduceEmitter,
    ) -> anyhow::Result<()>;
}

/// Buffers everything it is handed, in emission order.
#[derive(Debug, Default)]
pub struct CollectingEmitter {
    pairs: Vec<WordCountPair>,
}

impl CollectingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &[WordCountPair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<WordCountPair> {
        self.pairs
    }
}

impl MapEmitter for CollectingEmitter {
    fn emit(&mut self, word: Word, count: Count) {
        self.pairs.push(WordCountPair::new(word, count));
    }
}

impl ReduceEmitter for CollectingEmitter {
    fn emit(&mut self, word: Word, count: Count) {
        self.pairs.push(WordCountPair::new(word, count));
    }
}
