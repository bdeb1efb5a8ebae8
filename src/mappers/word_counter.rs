//! src/mappers/word_counter.rs
use crate::functions::{Count, LineId, MapEmitter, Mapper, Word};

/// Emits `(word, 1)` for every whitespace-separated token of a line.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCounter;

impl Mapper for WordCounter {
    fn name(&self) -> &str {
        "word_counter"
    }

    fn map(&self, _key: LineId, value: &str, emitter: &mut dyn MapEmitter) -> anyhow::Result<()> {
        // split_whitespace never yields empty tokens, so runs of separators
        // cannot produce blank words.
        for word in value.split_whitespace() {
            emitter.emit(Word::new(word), Count::ONE);
        }
        Ok(())
    }
}
