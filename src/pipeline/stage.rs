//! Stage abstraction for the two-phase classification pipeline.
//!
//! A stage consumes its input by value and hands back the next stage's input,
//! so stages only compose in the order their types allow:
//!
//! ```rust,ignore
//! boundary_stage  // Input: BoundaryContext, Output: DomainContext
//!   -> domain_stage  // Input: DomainContext, Output: (DomainContext, DomainOutcomes)
//!   -> secondary_stage  // same input and output, optional
//! ```

/// A pipeline stage that transforms data.
///
/// The error type is how a stage can stop early. Stages driven by a signal
/// that is never raised use `std::convert::Infallible`.
pub trait Stage {
    type Input;
    type Output;
    type Error;

    fn execute(&self, input: Self::Input) -> Result<StageOutput<Self::Output>, Self::Error>;

    /// Stage name for logging and spans.
    fn name(&self) -> &str;
}

/// Stage result plus the number of criterion faults swallowed while producing it.
#[derive(Debug, Clone)]
pub struct StageOutput<T> {
    pub value: T,
    pub fault_count: usize,
}

impl<T> StageOutput<T> {
    pub fn new(value: T, fault_count: usize) -> Self {
        Self { value, fault_count }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StageOutput<U> {
        StageOutput {
            value: f(self.value),
            fault_count: self.fault_count,
        }
    }
}
