//! tests/api/word_count.rs
use crate::helpers::{
    CountingReducer, DroppingMapper, LettersOnlyMapper, NarrowReducer, SingleSpaceMapper,
    ZeroEmittingReducer, checker, with_mapper, with_reducer,
};
use claims::{assert_err, assert_ok, assert_some};
use std::sync::Arc;
use wordcount_harness::error::{CheckError, TrialFailure};
use wordcount_harness::job::WordCountJob;
use wordcount_harness::properties::{
    MAP_REDUCE_ROUND_TRIP, MAPPER_LINE, MAPPER_SINGLE_WORD, REDUCER_SUMS, map_reduce_round_trip,
    mapper_line, mapper_single_word, reducer_sums, word_count_suite,
};

#[tokio::test]
async fn reference_job_satisfies_every_property() {
    let checker = checker(1);
    let results = checker
        .check_all(word_count_suite(&WordCountJob::reference()))
        .await;
    assert_eq!(results.len(), 4);
    for result in results {
        let report = assert_ok!(result);
        assert_eq!(report.trials, 300);
    }
}

#[tokio::test]
async fn reference_job_satisfies_every_property_in_parallel() {
    let checker = checker(4);
    for result in checker
        .check_all(word_count_suite(&WordCountJob::reference()))
        .await
    {
        assert_ok!(result);
    }
}

#[tokio::test]
async fn dropped_words_shrink_to_a_single_letter() {
    let checker = checker(1);
    let property = Arc::new(mapper_single_word(with_mapper(DroppingMapper)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());

    assert_eq!(counterexample.property, MAPPER_SINGLE_WORD);
    assert!(counterexample.input.contains("key: LineId(0)"));
    assert!(counterexample.input.contains("word: \"a\""));
    assert!(matches!(counterexample.failure, TrialFailure::Mismatch { .. }));
}

#[tokio::test]
async fn blank_tokens_from_single_space_splitting_are_caught() {
    let checker = checker(1);
    let property = Arc::new(mapper_line(with_mapper(SingleSpaceMapper)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());

    assert_eq!(counterexample.property, MAPPER_LINE);
    assert!(counterexample.input.contains("words: []"));
    assert!(counterexample.input.contains("line: \"\""));
}

#[tokio::test]
async fn counting_instead_of_adding_is_caught() {
    let checker = checker(1);
    let property = Arc::new(reducer_sums(with_reducer(CountingReducer)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());

    assert_eq!(counterexample.property, REDUCER_SUMS);
    assert!(counterexample.input.contains("counts: [Count(0)]"));
}

#[tokio::test]
async fn zero_pairs_for_empty_groups_are_caught() {
    let checker = checker(1);
    let property = Arc::new(reducer_sums(with_reducer(ZeroEmittingReducer)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());

    assert!(counterexample.input.contains("counts: []"));
    assert!(counterexample.input.contains("expected: Empty"));
}

#[tokio::test]
async fn round_trip_catches_a_broken_reducer() {
    let checker = checker(1);
    let property = Arc::new(map_reduce_round_trip(with_reducer(ZeroEmittingReducer)));
    // Groups produced by shuffling are never empty, so this reducer is
    // indistinguishable from a correct one end to end.
    assert_ok!(checker.check(property).await);

    let property = Arc::new(map_reduce_round_trip(with_mapper(DroppingMapper)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());
    assert_eq!(counterexample.property, MAP_REDUCE_ROUND_TRIP);
}

#[tokio::test]
async fn failure_report_names_the_property_and_input() {
    let checker = checker(1);
    let property = Arc::new(mapper_single_word(with_mapper(DroppingMapper)));
    let error = assert_err!(checker.check(property).await);
    assert!(matches!(error, CheckError::Falsified(_)));

    let rendered = error.to_string();
    assert!(rendered.contains("Property 'mapper_single_word' falsified"));
    assert!(rendered.contains("seed 42"));
    assert!(rendered.contains("input: WordTrial"));
}

#[tokio::test]
async fn splitting_on_anything_but_whitespace_is_caught() {
    let checker = checker(1);
    let results = checker
        .check_all(word_count_suite(&with_mapper(LettersOnlyMapper)))
        .await;

    let failed: Vec<&str> = results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .filter_map(|e| e.counterexample())
        .map(|c| c.property.as_str())
        .collect();
    assert!(failed.contains(&MAPPER_SINGLE_WORD));
    assert!(failed.contains(&MAPPER_LINE));
}

#[tokio::test]
async fn single_word_counterexamples_shrink_to_one_non_letter() {
    let checker = checker(1);
    let property = Arc::new(mapper_single_word(with_mapper(LettersOnlyMapper)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());

    let word = counterexample
        .input
        .split("word: \"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("counterexample shows the word");
    assert_eq!(word.chars().count(), 1);
    assert!(!word.chars().all(char::is_alphabetic));
}

#[tokio::test]
async fn wrapping_in_a_narrow_integer_is_caught() {
    let checker = checker(1);
    let property = Arc::new(reducer_sums(with_reducer(NarrowReducer)));
    let error = assert_err!(checker.check(property).await);
    let counterexample = assert_some!(error.counterexample());

    assert_eq!(counterexample.property, REDUCER_SUMS);
    assert!(counterexample.input.contains("counts: [Count(65536)]"));
}
