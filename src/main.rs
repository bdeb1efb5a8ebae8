//! src/main.rs
use anyhow::Context;
use std::process::ExitCode;
use std::sync::Arc;
use wordcount_harness::checker::Checker;
use wordcount_harness::configuration::get_configuration;
use wordcount_harness::property::PropertyDyn;
use wordcount_harness::registry;
use wordcount_harness::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let tracer_provider =
        init_tracing(&configuration.telemetry).context("Failed to setup tracing")?;

    let properties: Vec<Arc<dyn PropertyDyn>> = registry::all_properties()
        .into_iter()
        .map(Arc::from)
        .collect();
    tracing::info!(count = properties.len(), "Checking properties");

    let checker = Checker::from_settings(configuration.checker.clone());
    let results = checker.check_all(properties).await;

    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => println!("{report}"),
            Err(e) => {
                failed += 1;
                eprintln!("{e}");
            }
        }
    }

    if let Some(provider) = tracer_provider {
        provider
            .shutdown()
            .context("Failed to flush exported spans")?;
    }

    if failed > 0 {
        eprintln!("{failed} propert{} failed", if failed == 1 { "y" } else { "ies" });
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
