//! src/job.rs
use crate::error::UnitUnderTestError;
use crate::functions::{CollectingEmitter, Count, LineId, Mapper, Reducer, Word, WordCountPair};
use crate::mappers::WordCounter;
use crate::reducers::Adder;
use std::any::Any;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Once};

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInput {
    key: LineId,
    value: String,
}

impl MapInput {
    pub fn new(key: LineId, value: impl Into<String>) -> Self {
        MapInput {
            key,
            value: value.into(),
        }
    }

    pub fn key(&self) -> LineId {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceInput {
    key: Word,
    values: Vec<Count>,
}

impl ReduceInput {
    pub fn new(key: Word, values: Vec<Count>) -> Self {
        ReduceInput { key, values }
    }

    pub fn key(&self) -> &Word {
        &self.key
    }

    pub fn values(&self) -> &[Count] {
        &self.values
    }
}

/// Groups mapper output by word, keeping per-word emission order.
pub fn shuffle(pairs: impl IntoIterator<Item = WordCountPair>) -> Vec<ReduceInput> {
    let mut groups: BTreeMap<Word, Vec<Count>> = BTreeMap::new();
    for pair in pairs {
        let (word, count) = pair.into_parts();
        groups.entry(word).or_default().push(count);
    }
    groups
        .into_iter()
        .map(|(word, counts)| ReduceInput::new(word, counts))
        .collect()
}

/// The mapper/reducer pair under test, seen through a synchronous call
/// contract: hand over one input, get back every pair it emitted.
#[derive(Clone)]
pub struct WordCountJob {
    mapper: Arc<dyn Mapper>,
    reducer: Arc<dyn Reducer>,
}

impl std::fmt::Debug for WordCountJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCountJob")
            .field("mapper", &self.mapper.name())
            .field("reducer", &self.reducer.name())
            .finish()
    }
}

impl WordCountJob {
    pub fn new(mapper: Arc<dyn Mapper>, reducer: Arc<dyn Reducer>) -> Self {
        WordCountJob { mapper, reducer }
    }

    /// `WordCounter` followed by `Adder`.
    pub fn reference() -> Self {
        Self::new(Arc::new(WordCounter), Arc::new(Adder))
    }

    pub fn run_map(&self, input: &MapInput) -> Result<Vec<WordCountPair>, UnitUnderTestError> {
        let unit = self.mapper.name();
        let mut emitter = CollectingEmitter::new();
        let result = capture(|| self.mapper.map(input.key(), input.value(), &mut emitter));
        settle(unit, result)?;
        tracing::trace!(mapper = unit, key = %input.key(), emitted = emitter.pairs().len());
        Ok(emitter.into_pairs())
    }

    pub fn run_reduce(&self, input: &ReduceInput) -> Result<Vec<WordCountPair>, UnitUnderTestError> {
        let unit = self.reducer.name();
        let mut emitter = CollectingEmitter::new();
        let result = capture(|| {
            let mut values = input.values().iter().copied();
            self.reducer.reduce(input.key(), &mut values, &mut emitter)
        });
        settle(unit, result)?;
        tracing::trace!(reducer = unit, key = %input.key(), emitted = emitter.pairs().len());
        Ok(emitter.into_pairs())
    }

    /// Maps every record, groups the output by word and reduces each group.
    pub fn run_local(&self, inputs: &[MapInput]) -> Result<Vec<WordCountPair>, UnitUnderTestError> {
        let mut intermediate = Vec::new();
        for input in inputs {
            intermediate.extend(self.run_map(input)?);
        }
        let mut output = Vec::new();
        for group in shuffle(intermediate) {
            output.extend(self.run_reduce(&group)?);
        }
        Ok(output)
    }
}

/// Runs a unit under test, turning a panic into an `Err`.
///
/// Shrinking replays a panicking unit many times, so the default hook's
/// report is skipped while a unit runs on this thread. Other panics still
/// reach the previous hook.
fn capture(
    f: impl FnOnce() -> anyhow::Result<()>,
) -> Result<anyhow::Result<()>, Box<dyn Any + Send>> {
    static QUIET_HOOK: Once = Once::new();
    QUIET_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
            }
        }));
    });
    let outer = CAPTURING.with(|capturing| capturing.replace(true));
    let result = catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|capturing| capturing.set(outer));
    result
}

fn settle(
    unit: &str,
    result: Result<anyhow::Result<()>, Box<dyn Any + Send>>,
) -> Result<(), UnitUnderTestError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(UnitUnderTestError::Returned {
            unit: unit.to_string(),
            message: format!("{e:#}"),
        }),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::debug!(unit, %message, "Unit under test panicked");
            Err(UnitUnderTestError::Panicked {
                unit: unit.to_string(),
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
