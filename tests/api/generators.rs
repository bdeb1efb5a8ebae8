//! tests/api/generators.rs
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use wordcount_harness::error::GenerationError;
use wordcount_harness::generators::word_count::{
    ExpectedTotal, corpus, counts_with_sum, line, non_blank_word,
};
use wordcount_harness::generators::{bounded, vec_of};
use wordcount_harness::job::WordCountJob;
use wordcount_harness::properties::word_count_suite;
use wordcount_harness::property::TrialOutcome;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

proptest! {
    #[test]
    fn bounded_values_and_shrinks_stay_in_range(
        seed in any::<u64>(),
        low in 0u64..10_000,
        span in 0u64..10_000,
    ) {
        let high = low + span;
        let tree = bounded(low, high).generate(&mut rng(seed)).unwrap();
        let value = *tree.value();
        prop_assert!((low..=high).contains(&value));
        for child in tree.children() {
            prop_assert!((low..value).contains(child.value()));
        }
    }

    #[test]
    fn inverted_bounds_never_produce_a_value(seed in any::<u64>(), high in 0u64..1000, gap in 1u64..1000) {
        let result = bounded(high + gap, high).generate(&mut rng(seed));
        prop_assert_eq!(
            result.unwrap_err(),
            GenerationError::InvalidBound { low: (high + gap).into(), high: high.into() }
        );
    }

    #[test]
    fn list_shrinks_respect_the_minimum_length(seed in any::<u64>(), min in 0usize..5, extra in 0usize..5) {
        let tree = vec_of(bounded(0, 9), min, min + extra).generate(&mut rng(seed)).unwrap();
        prop_assert!(tree.value().len() >= min);
        for child in tree.children() {
            prop_assert!(child.value().len() >= min);
        }
    }

    #[test]
    fn line_expectation_agrees_with_whitespace_tokenizing(seed in any::<u64>()) {
        let trial = line().sample(&mut rng(seed)).unwrap();
        prop_assert_eq!(trial.expected_count, trial.line.split_whitespace().count());
    }

    #[test]
    fn non_blank_words_hold_no_whitespace(seed in any::<u64>()) {
        let word = non_blank_word().sample(&mut rng(seed)).unwrap();
        prop_assert!(!word.is_empty());
        prop_assert_eq!(word.split_whitespace().collect::<Vec<_>>(), vec![word.as_str()]);
    }

    #[test]
    fn counts_expectation_is_the_sum(seed in any::<u64>()) {
        let trial = counts_with_sum().sample(&mut rng(seed)).unwrap();
        let total = trial
            .counts
            .iter()
            .try_fold(0u64, |total, c| total.checked_add(c.get()));
        match trial.expected {
            ExpectedTotal::Empty => prop_assert!(trial.counts.is_empty()),
            ExpectedTotal::Sum(expected) => prop_assert_eq!(Some(expected.get()), total),
            ExpectedTotal::Overflow => prop_assert_eq!(None, total),
        }
    }

    #[test]
    fn corpus_expectation_matches_a_direct_tally(seed in any::<u64>()) {
        let trial = corpus().sample(&mut rng(seed)).unwrap();
        let mut tally: BTreeMap<String, u64> = BTreeMap::new();
        for input in trial.inputs() {
            for word in input.value().split_whitespace() {
                *tally.entry(word.to_string()).or_default() += 1;
            }
        }
        let expected: BTreeMap<String, u64> = trial
            .expected
            .iter()
            .map(|p| (p.word().as_str().to_string(), p.count().get()))
            .collect();
        prop_assert_eq!(tally, expected);
    }

    #[test]
    fn reference_job_passes_every_trial_seed(seed in any::<u64>()) {
        for property in word_count_suite(&WordCountJob::reference()) {
            prop_assert_eq!(property.run_trial(seed), TrialOutcome::Passed);
        }
    }
}
