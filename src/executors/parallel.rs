//! src/executors/parallel.rs
use crate::executors::{Execution, Executor, Progress, TrialPlan, drain};
use crate::property::PropertyDyn;
use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Spreads trials over blocking worker tasks.
///
/// Workers pull trial indices from a shared counter, so which failure lands
/// in the first-failure slot depends on scheduling and may differ between
/// runs with the same seed. Every reported failure is a genuine one.
#[derive(Debug, Clone, Copy)]
pub struct ParallelExecutor {
    workers: usize,
}

impl ParallelExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

#[async_trait::async_trait]
impl Executor for ParallelExecutor {
    #[tracing::instrument(
        name = "Parallel trials",
        skip_all,
        fields(property = %property.name(), workers = self.workers)
    )]
    async fn execute(
        &self,
        property: Arc<dyn PropertyDyn>,
        plan: TrialPlan,
    ) -> Result<Execution, anyhow::Error> {
        let progress = Arc::new(Progress::default());
        let mut workers = JoinSet::new();
        for _ in 0..self.workers {
            let property = Arc::clone(&property);
            let progress = Arc::clone(&progress);
            workers.spawn_blocking(move || drain(property.as_ref(), plan, &progress));
        }
        while let Some(joined) = workers.join_next().await {
            joined.context("Trial worker panicked")?;
        }
        Ok(progress.execution())
    }
}
