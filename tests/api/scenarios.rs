//! tests/api/scenarios.rs
use claims::assert_ok;
use wordcount_harness::functions::{Count, LineId, Word, WordCountPair};
use wordcount_harness::job::{MapInput, ReduceInput, WordCountJob};

fn pair(word: &str, count: u64) -> WordCountPair {
    WordCountPair::new(Word::new(word), Count::new(count))
}

#[test]
fn the_cat_sat_maps_to_three_ones() {
    let job = WordCountJob::reference();
    let mut pairs = assert_ok!(job.run_map(&MapInput::new(LineId::new(0), "the cat sat")));
    pairs.sort();
    assert_eq!(pairs, vec![pair("cat", 1), pair("sat", 1), pair("the", 1)]);
}

#[test]
fn an_all_blank_line_maps_to_nothing() {
    let job = WordCountJob::reference();
    let pairs = assert_ok!(job.run_map(&MapInput::new(LineId::new(0), "  ")));
    assert!(pairs.is_empty());
}

#[test]
fn three_ones_reduce_to_three() {
    let job = WordCountJob::reference();
    let input = ReduceInput::new(Word::new("cat"), vec![Count::ONE; 3]);
    let pairs = assert_ok!(job.run_reduce(&input));
    assert_eq!(pairs, vec![pair("cat", 3)]);
}

#[test]
fn an_empty_group_reduces_to_nothing() {
    let job = WordCountJob::reference();
    let input = ReduceInput::new(Word::new("cat"), vec![]);
    let pairs = assert_ok!(job.run_reduce(&input));
    assert!(pairs.is_empty());
}
