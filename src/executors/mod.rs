//! src/executors/mod.rs
use crate::error::{GenerationError, TrialFailure};
use crate::property::{PropertyDyn, TrialOutcome, trial_seed};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

mod parallel;
pub use parallel::ParallelExecutor;

mod sequential;
pub use sequential::SequentialExecutor;

/// Runs the trials of one property and reports the first failure it saw.
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    async fn execute(
        &self,
        property: Arc<dyn PropertyDyn>,
        plan: TrialPlan,
    ) -> Result<Execution, anyhow::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialPlan {
    pub seed: u64,
    pub trials: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Falsified(TrialFailure),
    Generation(GenerationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTrial {
    pub trial: usize,
    pub seed: u64,
    pub kind: FailureKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub completed: usize,
    pub first_failure: Option<FailedTrial>,
}

/// State shared by every worker of one execution.
///
/// `first_failure` is write-once: later failures are dropped.
#[derive(Debug, Default)]
pub(crate) struct Progress {
    next: AtomicUsize,
    completed: AtomicUsize,
    first_failure: OnceLock<FailedTrial>,
}

impl Progress {
    fn claim(&self, trials: usize) -> Option<usize> {
        if self.first_failure.get().is_some() {
            return None;
        }
        let trial = self.next.fetch_add(1, Ordering::Relaxed);
        (trial < trials).then_some(trial)
    }

    fn record(&self, trial: usize, seed: u64, outcome: TrialOutcome) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        let kind = match outcome {
            TrialOutcome::Passed => return,
            TrialOutcome::Failed(failure) => FailureKind::Falsified(failure),
            TrialOutcome::Aborted(error) => FailureKind::Generation(error),
        };
        tracing::debug!(trial, seed, ?kind, "Trial failed");
        if self.first_failure.set(FailedTrial { trial, seed, kind }).is_err() {
            tracing::trace!(trial, "Discarding failure, another trial failed first");
        }
    }

    fn execution(&self) -> Execution {
        Execution {
            completed: self.completed.load(Ordering::Relaxed),
            first_failure: self.first_failure.get().cloned(),
        }
    }
}

/// Claims and runs trials until the plan is exhausted or a failure is known.
pub(crate) fn drain(property: &dyn PropertyDyn, plan: TrialPlan, progress: &Progress) {
    while let Some(trial) = progress.claim(plan.trials) {
        let seed = trial_seed(plan.seed, trial);
        progress.record(trial, seed, property.run_trial(seed));
    }
}
