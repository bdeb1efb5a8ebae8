//! src/test_utils.rs
use crate::configuration::TelemetrySettings;
use crate::functions::{Count, LineId, MapEmitter, Mapper, ReduceEmitter, Reducer, Word};
use crate::telemetry::init_tracing;
use std::sync::LazyLock;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    let settings = TelemetrySettings {
        service_name: "tests::wordcount".into(),
        log_level: "warn".into(),
        otlp_endpoint: None,
    };
    init_tracing(&settings).expect("Failed to setup tracing");
});

pub fn init_test_tracing() {
    LazyLock::force(&TRACING);
}

/// Panics on any line holding a word.
pub struct ExplodingMapper;

impl Mapper for ExplodingMapper {
    fn name(&self) -> &str {
        "exploding_mapper"
    }

    fn map(&self, _key: LineId, value: &str, _emitter: &mut dyn MapEmitter) -> anyhow::Result<()> {
        if value.split_whitespace().next().is_some() {
            panic!("mapper exploded on {value:?}");
        }
        Ok(())
    }
}

/// Rejects every group.
pub struct FailingReducer;

impl Reducer for FailingReducer {
    fn name(&self) -> &str {
        "failing_reducer"
    }

    fn reduce(
        &self,
        key: &Word,
        _values: &mut dyn Iterator<Item = Count>,
        _emitter: &mut dyn ReduceEmitter,
    ) -> anyhow::Result<()> {
        anyhow::bail!("refusing to reduce {key}")
    }
}

/// Treats every non-alphabetic character as a separator.
pub struct AlphabeticMapper;

impl Mapper for AlphabeticMapper {
    fn name(&self) -> &str {
        "alphabetic_mapper"
    }

    fn map(&self, _key: LineId, value: &str, emitter: &mut dyn MapEmitter) -> anyhow::Result<()> {
        for word in value.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
            emitter.emit(Word::new(word), Count::ONE);
        }
        Ok(())
    }
}

/// Adds with wrap-around instead of refusing overflowing groups.
pub struct WrappingAdder;

impl Reducer for WrappingAdder {
    fn name(&self) -> &str {
        "wrapping_adder"
    }

    fn reduce(
        &self,
        key: &Word,
        values: &mut dyn Iterator<Item = Count>,
        emitter: &mut dyn ReduceEmitter,
    ) -> anyhow::Result<()> {
        let mut total = None;
        for value in values {
            total = Some(total.unwrap_or(0u64).wrapping_add(value.get()));
        }
        if let Some(total) = total {
            emitter.emit(key.clone(), Count::new(total));
        }
        Ok(())
    }
}
