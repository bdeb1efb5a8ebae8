//! src/executors/sequential.rs
use crate::executors::{Execution, Executor, Progress, TrialPlan, drain};
use crate::property::PropertyDyn;
use std::sync::Arc;

/// Runs trials in index order on the calling task. The reported failure is
/// always the lowest failing trial.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialExecutor;

#[async_trait::async_trait]
impl Executor for SequentialExecutor {
    #[tracing::instrument(name = "Sequential trials", skip_all, fields(property = %property.name()))]
    async fn execute(
        &self,
        property: Arc<dyn PropertyDyn>,
        plan: TrialPlan,
    ) -> Result<Execution, anyhow::Error> {
        let progress = Progress::default();
        drain(property.as_ref(), plan, &progress);
        Ok(progress.execution())
    }
}
