//! src/checker.rs
use crate::configuration::CheckerSettings;
use crate::error::{CheckError, Counterexample};
use crate::executors::{Executor, FailureKind, ParallelExecutor, SequentialExecutor, TrialPlan};
use crate::property::PropertyDyn;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub property: String,
    pub run_id: Uuid,
    pub seed: u64,
    pub trials: usize,
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Property '{}' passed {} trials (seed {}, run {})",
            self.property, self.trials, self.seed, self.run_id
        )
    }
}

/// Drives properties through an executor and turns failures into shrunk
/// counterexamples.
pub struct Checker {
    settings: CheckerSettings,
    executor: Box<dyn Executor>,
}

impl Checker {
    pub fn new(settings: CheckerSettings, executor: Box<dyn Executor>) -> Self {
        Self { settings, executor }
    }

    /// Sequential for a single worker, parallel otherwise.
    pub fn from_settings(settings: CheckerSettings) -> Self {
        let executor: Box<dyn Executor> = if settings.workers > 1 {
            Box::new(ParallelExecutor::new(settings.workers))
        } else {
            Box::new(SequentialExecutor)
        };
        Self::new(settings, executor)
    }

    #[tracing::instrument(
        name = "Check property",
        skip_all,
        fields(property = %property.name(), run_id = tracing::field::Empty)
    )]
    pub async fn check(&self, property: Arc<dyn PropertyDyn>) -> Result<CheckReport, CheckError> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        let seed = self.settings.seed.unwrap_or_else(rand::random);
        let plan = TrialPlan {
            seed,
            trials: self.settings.trials,
        };

        let execution = self.executor.execute(Arc::clone(&property), plan).await?;

        let Some(failed) = execution.first_failure else {
            tracing::info!(seed, trials = execution.completed, "Property passed");
            return Ok(CheckReport {
                property: property.name().to_string(),
                run_id,
                seed,
                trials: execution.completed,
            });
        };

        let failure = match failed.kind {
            FailureKind::Generation(source) => {
                tracing::error!(trial = failed.trial, error = %source, "Generator failed");
                return Err(CheckError::Generation {
                    property: property.name().to_string(),
                    source,
                });
            }
            FailureKind::Falsified(failure) => failure,
        };

        let shrunk = property
            .shrink(failed.seed, self.settings.max_shrinks, failure)
            .map_err(|source| CheckError::Generation {
                property: property.name().to_string(),
                source,
            })?;
        tracing::warn!(
            trial = failed.trial,
            shrink_steps = shrunk.steps,
            input = %shrunk.input,
            "Property falsified"
        );
        Err(CheckError::Falsified(Box::new(Counterexample {
            property: property.name().to_string(),
            run_id,
            seed,
            trial: failed.trial,
            original_input: shrunk.original,
            input: shrunk.input,
            shrink_steps: shrunk.steps,
            failure: shrunk.failure,
        })))
    }

    /// Checks every property, continuing past failures.
    pub async fn check_all(
        &self,
        properties: impl IntoIterator<Item = Arc<dyn PropertyDyn>>,
    ) -> Vec<Result<CheckReport, CheckError>> {
        let mut results = Vec::new();
        for property in properties {
            results.push(self.check(property).await);
        }
        results
    }
}
