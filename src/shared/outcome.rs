//! Explicit per-step outcomes for best-effort sequences.
//!
//! Steps such as pushing a freshly created branch or setting a single
//! git-flow key may fail without aborting the surrounding sequence. Each
//! step reports a [`StepOutcome`], and [`StepLog::record`] decides whether
//! the sequence continues.

use tracing::warn;

#[derive(Debug)]
pub enum StepOutcome<E> {
    Success,
    /// The step failed but the sequence may continue.
    Warning(String),
    /// The step failed and the sequence must stop.
    Fatal(E),
}

impl<E> StepOutcome<E> {
    /// Any failure of `result` becomes a warning described by `describe`.
    pub fn tolerate<T, F>(result: Result<T, F>, describe: impl FnOnce(F) -> String) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::Warning(describe(e)),
        }
    }

    /// Any failure of `result` stops the sequence.
    pub fn require<T>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::Fatal(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Warned(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
}

/// Ordered record of the non-fatal steps of a sequence.
#[derive(Debug, Default)]
pub struct StepLog {
    records: Vec<StepRecord>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of `step`.
    ///
    /// Warnings are logged and recorded; the caller keeps going. A fatal
    /// outcome is returned as `Err` so the caller can stop with `?`.
    pub fn record<E>(&mut self, step: impl Into<String>, outcome: StepOutcome<E>) -> Result<(), E> {
        let name = step.into();
        let status = match outcome {
            StepOutcome::Success => StepStatus::Succeeded,
            StepOutcome::Warning(message) => {
                warn!(step = %name, "{message}");
                StepStatus::Warned(message)
            }
            StepOutcome::Fatal(e) => return Err(e),
        };
        self.records.push(StepRecord { name, status });
        Ok(())
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Names and messages of the steps that completed with a warning.
    pub fn warnings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().filter_map(|r| match &r.status {
            StepStatus::Warned(message) => Some((r.name.as_str(), message.as_str())),
            StepStatus::Succeeded => None,
        })
    }

    pub fn extend(&mut self, other: StepLog) {
        self.records.extend(other.records);
    }
}
