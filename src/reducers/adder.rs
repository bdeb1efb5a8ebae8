//! src/reducers/adder.rs
use crate::functions::{Count, ReduceEmitter, Reducer, Word};

/// Sums the counts of a group. Empty groups produce no output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Adder;

impl Reducer for Adder {
    fn name(&self) -> &str {
        "adder"
    }

    fn reduce(
        &self,
        key: &Word,
        values: &mut dyn Iterator<Item = Count>,
        emitter: &mut dyn ReduceEmitter,
    ) -> anyhow::Result<()> {
        let Some(first) = values.next() else {
            return Ok(());
        };
        let mut total = first;
        for value in values {
            total = total
                .checked_add(value)
                .ok_or_else(|| anyhow::anyhow!("Count overflow while reducing {key}"))?;
        }
        emitter.emit(key.clone(), total);
        Ok(())
    }
}
