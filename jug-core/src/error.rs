use crate::jug::JugLabel;

/// Errors returned by [`crate::solve`].
///
/// Both kinds are deterministic functions of the input; retrying the same
/// request always yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The target is larger than both jugs.
    #[error("can't measure {target} if it's bigger than jugs for {small} and {big}")]
    TargetExceedsCapacity { target: u64, small: u64, big: u64 },

    /// The gcd of the two capacities does not divide the target.
    #[error("there is no solution to measure {target} with jugs with {small} and {big}")]
    NoIntegerSolution { target: u64, small: u64, big: u64 },
}

/// Errors produced while decoding or replaying a serialized trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The `operation` field named an unknown kind.
    #[error("unknown operation kind '{0}'")]
    UnknownKind(String),

    /// A label field required by the operation kind was absent.
    #[error("step {step}: {kind} operation is missing field '{field}'")]
    MissingField {
        step: usize,
        kind: &'static str,
        field: &'static str,
    },

    /// A label field that the operation kind never carries was present.
    #[error("step {step}: {kind} operation must not set field '{field}'")]
    UnexpectedField {
        step: usize,
        kind: &'static str,
        field: &'static str,
    },

    /// A pour named the same jug as origin and destination.
    #[error("step {step}: cannot pour jug {jug} into itself")]
    SelfPour { step: usize, jug: JugLabel },

    /// Step numbers were not the sequence `1..=n`.
    #[error("expected step {expected}, found step {found}")]
    StepOutOfSequence { expected: usize, found: usize },

    /// `total_steps` disagreed with the number of operations.
    #[error("total_steps is {declared} but the trace holds {actual} operations")]
    StepCountMismatch { declared: usize, actual: usize },

    /// A fill or empty amount disagreed with the jug capacity during replay.
    #[error("step {step}: jug {jug} has capacity {capacity}, operation moved {amount}")]
    CapacityMismatch {
        step: usize,
        jug: JugLabel,
        capacity: u64,
        amount: u64,
    },

    /// A pour moved a different amount than the jugs allow during replay.
    #[error("step {step}: pour from {origin} to {destination} should move {expected}, moved {amount}")]
    PourMismatch {
        step: usize,
        origin: JugLabel,
        destination: JugLabel,
        expected: u64,
        amount: u64,
    },
}
