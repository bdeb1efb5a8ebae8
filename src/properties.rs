//! src/properties.rs
//!
//! Properties of the word-count job. Each one compares the job's output with
//! the expectation its generator computed alongside the input.
use crate::error::TrialFailure;
use crate::functions::{Count, WordCountPair};
use crate::generators::word_count::{
    CorpusTrial, CountsTrial, ExpectedTotal, LineTrial, WordTrial, corpus, counts_with_sum, line,
    single_word,
};
use crate::job::{ReduceInput, WordCountJob};
use crate::property::{Property, PropertyDyn};
use crate::register_property;
use std::sync::Arc;

pub const MAPPER_SINGLE_WORD: &str = "mapper_single_word";
pub const MAPPER_LINE: &str = "mapper_line";
pub const REDUCER_SUMS: &str = "reducer_sums";
pub const MAP_REDUCE_ROUND_TRIP: &str = "map_reduce_round_trip";

/// A single token maps to `[(word, 1)]`, or to nothing when blank.
pub fn mapper_single_word(job: WordCountJob) -> Property<WordTrial> {
    Property::new(MAPPER_SINGLE_WORD, single_word(), move |trial: &WordTrial| {
        let actual = job.run_map(&trial.input())?;
        if trial.expected.is_empty() {
            if !actual.is_empty() {
                return Err(TrialFailure::mismatch(&trial.expected, &actual));
            }
        } else if actual != trial.expected {
            return Err(TrialFailure::mismatch(&trial.expected, &actual));
        }
        Ok(())
    })
}

/// A line maps to one `(word, 1)` per non-blank word, in any order.
pub fn mapper_line(job: WordCountJob) -> Property<LineTrial> {
    Property::new(MAPPER_LINE, line(), move |trial: &LineTrial| {
        let actual = job.run_map(&trial.input())?;
        if actual.len() != trial.expected_count {
            return Err(TrialFailure::Violated(format!(
                "expected {} pairs, got {}: {actual:?}",
                trial.expected_count,
                actual.len()
            )));
        }
        if let Some(pair) = actual.iter().find(|p| p.count() != Count::ONE) {
            return Err(TrialFailure::Violated(format!(
                "mapper emitted {pair}, every count must be 1"
            )));
        }
        let mut words: Vec<_> = actual.into_iter().map(|p| p.into_parts().0).collect();
        words.sort();
        if words != trial.expected_words {
            return Err(TrialFailure::mismatch(&trial.expected_words, &words));
        }
        Ok(())
    })
}

/// A group reduces to `[(word, sum)]`, or to nothing when empty. A group
/// whose total does not fit a count must be refused, not wrapped.
pub fn reducer_sums(job: WordCountJob) -> Property<CountsTrial> {
    Property::new(REDUCER_SUMS, counts_with_sum(), move |trial: &CountsTrial| {
        let input = ReduceInput::new(trial.word.clone(), trial.counts.clone());
        let expected = match trial.expected {
            ExpectedTotal::Empty => vec![],
            ExpectedTotal::Sum(total) => vec![WordCountPair::new(trial.word.clone(), total)],
            ExpectedTotal::Overflow => {
                return match job.run_reduce(&input) {
                    Err(_) => Ok(()),
                    Ok(actual) => Err(TrialFailure::Violated(format!(
                        "total overflows a count, but the reducer emitted {actual:?}"
                    ))),
                };
            }
        };
        let actual = job.run_reduce(&input)?;
        if actual != expected {
            return Err(TrialFailure::mismatch(&expected, &actual));
        }
        Ok(())
    })
}

/// Mapping, grouping and reducing a corpus yields the per-word totals
/// counted directly from the generated words.
pub fn map_reduce_round_trip(job: WordCountJob) -> Property<CorpusTrial> {
    Property::new(MAP_REDUCE_ROUND_TRIP, corpus(), move |trial: &CorpusTrial| {
        let mut actual = job.run_local(&trial.inputs())?;
        actual.sort();
        if actual != trial.expected {
            return Err(TrialFailure::mismatch(&trial.expected, &actual));
        }
        Ok(())
    })
}

/// Every word-count property, bound to `job`.
pub fn word_count_suite(job: &WordCountJob) -> Vec<Arc<dyn PropertyDyn>> {
    vec![
        Arc::new(mapper_single_word(job.clone())),
        Arc::new(mapper_line(job.clone())),
        Arc::new(reducer_sums(job.clone())),
        Arc::new(map_reduce_round_trip(job.clone())),
    ]
}

register_property!(MAPPER_SINGLE_WORD, mapper_single_word);
register_property!(MAPPER_LINE, mapper_line);
register_property!(REDUCER_SUMS, reducer_sums);
register_property!(MAP_REDUCE_ROUND_TRIP, map_reduce_round_trip);
