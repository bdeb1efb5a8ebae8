//! src/error.rs
use uuid::Uuid;

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// A generator was asked for a value outside of what its domain allows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Invalid bound: low {low} is greater than high {high}")]
    InvalidBound { low: i128, high: i128 },
    #[error("Cannot choose from an empty set of {0}")]
    EmptyChoice(&'static str),
    #[error("Frequency weights sum to zero")]
    ZeroWeight,
}

/// The job under test failed to produce an output at all.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitUnderTestError {
    #[error("{unit} returned an error: {message}")]
    Returned { unit: String, message: String },
    #[error("{unit} panicked: {message}")]
    Panicked { unit: String, message: String },
}

/// Why a single trial did not satisfy its property.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrialFailure {
    #[error("expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
    #[error("{0}")]
    Violated(String),
    #[error("Unit under test failed")]
    UnitUnderTest(#[from] UnitUnderTestError),
}

impl TrialFailure {
    pub fn mismatch(expected: impl std::fmt::Debug, actual: impl std::fmt::Debug) -> Self {
        TrialFailure::Mismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

/// A falsified property together with the input that falsified it.
#[derive(Debug, Clone)]
pub struct Counterexample {
    pub property: String,
    pub run_id: Uuid,
    pub seed: u64,
    pub trial: usize,
    pub original_input: String,
    pub input: String,
    pub shrink_steps: usize,
    pub failure: TrialFailure,
}

impl std::fmt::Display for Counterexample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Property '{}' falsified at trial {} (seed {}, run {})",
            self.property, self.trial, self.seed, self.run_id
        )?;
        writeln!(f, "  input: {}", self.input)?;
        if self.shrink_steps > 0 {
            writeln!(
                f,
                "  original input: {} (shrunk in {} steps)",
                self.original_input, self.shrink_steps
            )?;
        }
        write!(f, "  failure: {}", self.failure)?;
        if let TrialFailure::UnitUnderTest(cause) = &self.failure {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error)]
pub enum CheckError {
    #[error("Generator failed for property '{property}'")]
    Generation {
        property: String,
        #[source]
        source: GenerationError,
    },
    #[error("{0}")]
    Falsified(Box<Counterexample>),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

impl CheckError {
    pub fn counterexample(&self) -> Option<&Counterexample> {
        match self {
            CheckError::Falsified(counterexample) => Some(counterexample),
            _ => None,
        }
    }
}
