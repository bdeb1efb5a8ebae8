//! src/configuration.rs
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub checker: CheckerSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CheckerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub trials: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_shrinks: usize,
    /// `1` runs trials sequentially on the calling task.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub workers: usize,
    /// Fixed run seed. A fresh random seed is drawn per property when unset.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub seed: Option<u64>,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            trials: 100,
            max_shrinks: 1000,
            workers: 1,
            seed: None,
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TelemetrySettings {
    pub service_name: String,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            service_name: "wordcount-harness".into(),
            log_level: "info".into(),
            otlp_endpoint: None,
        }
    }
}

impl CheckerSettings {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.trials == 0 {
            return Err(config::ConfigError::Message(
                "checker.trials must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let config_dir = base_path.join("configuration");

    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::from(config_dir.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("HARNESS")
                .prefix_separator("_")
                .separator("__"),
        );
    load(builder)
}

fn with_defaults(builder: Builder) -> Result<Builder, config::ConfigError> {
    let checker = CheckerSettings::default();
    let telemetry = TelemetrySettings::default();
    builder
        .set_default("checker.trials", checker.trials as u64)?
        .set_default("checker.max_shrinks", checker.max_shrinks as u64)?
        .set_default("checker.workers", checker.workers as u64)?
        .set_default("telemetry.service_name", telemetry.service_name)?
        .set_default("telemetry.log_level", telemetry.log_level)
}

fn load(builder: Builder) -> Result<Settings, config::ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.checker.validate()?;
    Ok(settings)
}
