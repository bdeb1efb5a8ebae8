//! src/lib.rs
pub mod checker;
pub mod configuration;
pub mod error;
pub mod executors;
pub mod functions;
pub mod generators;
pub mod job;
pub mod mappers;
pub mod properties;
pub mod property;
pub mod reducers;
pub mod registry;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
