//! src/property.rs
use crate::error::{GenerationError, TrialFailure};
use crate::generators::{Gen, Tree};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::fmt::Debug;
use std::sync::Arc;

/// Result of evaluating a property against one generated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    Passed,
    Failed(TrialFailure),
    Aborted(GenerationError),
}

/// A counterexample after shrinking. `steps` counts accepted shrinks.
#[derive(Debug, Clone)]
pub struct Shrunk {
    pub original: String,
    pub input: String,
    pub steps: usize,
    pub failure: TrialFailure,
}

/// Object-safe view of a [`Property`], so properties over different input
/// types can share a registry and an executor.
pub trait PropertyDyn: Send + Sync {
    fn name(&self) -> &str;

    fn run_trial(&self, seed: u64) -> TrialOutcome;

    /// Replays the trial generated from `seed` and shrinks it. `failure` is
    /// reported unchanged when the replay no longer fails.
    fn shrink(
        &self,
        seed: u64,
        max_shrinks: usize,
        failure: TrialFailure,
    ) -> Result<Shrunk, GenerationError>;
}

type Predicate<T> = dyn Fn(&T) -> Result<(), TrialFailure> + Send + Sync;

pub struct Property<T> {
    name: String,
    generator: Gen<T>,
    predicate: Arc<Predicate<T>>,
}

impl<T: Debug + 'static> Property<T> {
    pub fn new(
        name: impl Into<String>,
        generator: Gen<T>,
        predicate: impl Fn(&T) -> Result<(), TrialFailure> + Send + Sync + 'static,
    ) -> Self {
        Property {
            name: name.into(),
            generator,
            predicate: Arc::new(predicate),
        }
    }

    pub fn evaluate(&self, input: &T) -> Result<(), TrialFailure> {
        (self.predicate)(input)
    }

    fn replay(&self, seed: u64) -> Result<Tree<T>, GenerationError> {
        self.generator.generate(&mut StdRng::seed_from_u64(seed))
    }
}

impl<T: Debug + 'static> PropertyDyn for Property<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run_trial(&self, seed: u64) -> TrialOutcome {
        let tree = match self.replay(seed) {
            Ok(tree) => tree,
            Err(e) => return TrialOutcome::Aborted(e),
        };
        match self.evaluate(tree.value()) {
            Ok(()) => TrialOutcome::Passed,
            Err(failure) => TrialOutcome::Failed(failure),
        }
    }

    fn shrink(
        &self,
        seed: u64,
        max_shrinks: usize,
        reported: TrialFailure,
    ) -> Result<Shrunk, GenerationError> {
        let mut current = self.replay(seed)?;
        let original = format!("{:?}", current.value());
        let mut failure = match self.evaluate(current.value()) {
            Err(replayed) => replayed,
            Ok(()) => {
                tracing::warn!(property = %self.name, seed, "Failure did not reproduce on replay");
                return Ok(Shrunk {
                    input: original.clone(),
                    original,
                    steps: 0,
                    failure: reported,
                });
            }
        };
        let mut steps = 0;
        'search: while steps < max_shrinks {
            for candidate in current.children() {
                // A candidate is only accepted once it is seen failing.
                if let Err(candidate_failure) = self.evaluate(candidate.value()) {
                    current = candidate;
                    failure = candidate_failure;
                    steps += 1;
                    continue 'search;
                }
            }
            break;
        }
        tracing::debug!(property = %self.name, steps, "Shrinking finished");
        Ok(Shrunk {
            original,
            input: format!("{:?}", current.value()),
            steps,
            failure,
        })
    }
}

/// Derives the seed of trial `index` from the seed of the whole run.
///
/// Each `(run_seed, index)` pair keys its own `StdRng`, so trials can be
/// seeded in any order and from any worker.
pub fn trial_seed(run_seed: u64, index: usize) -> u64 {
    let mut key = <StdRng as SeedableRng>::Seed::default();
    key[..8].copy_from_slice(&run_seed.to_le_bytes());
    key[8..16].copy_from_slice(&(index as u64).to_le_bytes());
    StdRng::from_seed(key).random()
}
