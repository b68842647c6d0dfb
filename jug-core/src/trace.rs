use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::jug::{JugLabel, Levels};
use crate::operation::{Action, Operation};

/// The ordered operations produced by one simulation, plus the jug that ends
/// up holding the target amount.
///
/// A trace is only built by the solver or by decoding a serialized trace;
/// both paths guarantee step numbers run `1..=total_steps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TraceRecord", try_from = "TraceRecord")]
pub struct Trace {
    operations: Vec<Operation>,
    jug: JugLabel,
}

impl Trace {
    /// The operations in execution order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The jug holding the target amount once every operation has run.
    #[must_use]
    pub fn jug(&self) -> JugLabel {
        self.jug
    }

    /// Number of operations in the trace.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.operations.len()
    }

    /// Returns the same trace with the x and y labels swapped.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            operations: self
                .operations
                .iter()
                .map(|op| Operation::new(op.step, op.action.mirrored()))
                .collect(),
            jug: self.jug.other(),
        }
    }

    /// Applies every operation to two initially empty jugs and returns the
    /// final levels.
    ///
    /// # Errors
    /// Returns [`RecordError::CapacityMismatch`] if a fill or empty amount
    /// differs from the jug's capacity, or [`RecordError::PourMismatch`] if a
    /// pour moves anything other than `min(origin level, destination room)`.
    pub fn replay(&self, x_capacity: u64, y_capacity: u64) -> Result<Levels, RecordError> {
        let capacity = |label| match label {
            JugLabel::X => x_capacity,
            JugLabel::Y => y_capacity,
        };
        let mut levels = Levels::default();

        for op in &self.operations {
            match op.action {
                Action::Fill { jug, amount } | Action::Empty { jug, amount } => {
                    if amount != capacity(jug) {
                        return Err(RecordError::CapacityMismatch {
                            step: op.step,
                            jug,
                            capacity: capacity(jug),
                            amount,
                        });
                    }
                    *levels.get_mut(jug) = if matches!(op.action, Action::Fill { .. }) {
                        amount
                    } else {
                        0
                    };
                }
                Action::Pour {
                    origin,
                    destination,
                    amount,
                } => {
                    let room = capacity(destination).saturating_sub(levels.get(destination));
                    let expected = levels.get(origin).min(room);
                    if amount != expected {
                        return Err(RecordError::PourMismatch {
                            step: op.step,
                            origin,
                            destination,
                            expected,
                            amount,
                        });
                    }
                    *levels.get_mut(origin) -= amount;
                    *levels.get_mut(destination) += amount;
                }
            }
        }

        Ok(levels)
    }
}

/// Accumulates operations for one simulation, numbering them as they arrive.
#[derive(Debug)]
pub(crate) struct TraceBuilder {
    operations: Vec<Operation>,
}

impl TraceBuilder {
    pub(crate) fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, action: Action) {
        let step = self.operations.len() + 1;
        self.operations.push(Operation::new(step, action));
    }

    pub(crate) fn finish(self, jug: JugLabel) -> Trace {
        Trace {
            operations: self.operations,
            jug,
        }
    }
}

// ── Wire record ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraceRecord {
    operations: Vec<Operation>,
    jug: JugLabel,
    total_steps: usize,
}

impl From<Trace> for TraceRecord {
    fn from(trace: Trace) -> Self {
        Self {
            total_steps: trace.total_steps(),
            operations: trace.operations,
            jug: trace.jug,
        }
    }
}

impl TryFrom<TraceRecord> for Trace {
    type Error = RecordError;

    fn try_from(record: TraceRecord) -> Result<Self, Self::Error> {
        if record.total_steps != record.operations.len() {
            return Err(RecordError::StepCountMismatch {
                declared: record.total_steps,
                actual: record.operations.len(),
            });
        }
        for (i, op) in record.operations.iter().enumerate() {
            if op.step != i + 1 {
                return Err(RecordError::StepOutOfSequence {
                    expected: i + 1,
                    found: op.step,
                });
            }
        }
        Ok(Self {
            operations: record.operations,
            jug: record.jug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut builder = TraceBuilder::new();
        builder.record(Action::Fill { jug: JugLabel::Y, amount: 5 });
        builder.record(Action::Pour {
            origin: JugLabel::Y,
            destination: JugLabel::X,
            amount: 3,
        });
        builder.finish(JugLabel::Y)
    }

    #[test]
    fn builder_numbers_steps_from_one() {
        let trace = sample();
        let steps: Vec<usize> = trace.operations().iter().map(|op| op.step).collect();
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(trace.total_steps(), 2);
    }

    #[test]
    fn serialized_trace_carries_total_steps() {
        let v = match serde_json::to_value(sample()) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(v["jug"], "y");
        assert_eq!(v["total_steps"], 2);
        assert_eq!(v["operations"][1]["jug_origin"], "y");
    }

    #[test]
    fn decode_rejects_step_count_mismatch() {
        let json = r#"{"operations":[{"operation":"fill","jug":"x","amount":3,"step":1}],"jug":"x","total_steps":2}"#;
        let msg = serde_json::from_str::<Trace>(json)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(msg.contains("total_steps is 2"), "unexpected error: {msg}");
    }

    #[test]
    fn decode_rejects_gap_in_steps() {
        let json = r#"{"operations":[
            {"operation":"fill","jug":"x","amount":3,"step":1},
            {"operation":"empty","jug":"x","amount":3,"step":3}
        ],"jug":"x","total_steps":2}"#;
        let msg = serde_json::from_str::<Trace>(json)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(msg.contains("expected step 2, found step 3"), "unexpected error: {msg}");
    }

    #[test]
    fn replay_reports_final_levels() {
        let levels = match sample().replay(3, 5) {
            Ok(l) => l,
            Err(e) => panic!("replay failed: {e}"),
        };
        assert_eq!(levels, Levels { x: 3, y: 2 });
    }

    #[test]
    fn replay_rejects_overfull_pour() {
        let mut builder = TraceBuilder::new();
        builder.record(Action::Fill { jug: JugLabel::Y, amount: 5 });
        builder.record(Action::Pour {
            origin: JugLabel::Y,
            destination: JugLabel::X,
            amount: 5,
        });
        let trace = builder.finish(JugLabel::Y);
        assert!(matches!(
            trace.replay(3, 5),
            Err(RecordError::PourMismatch { step: 2, expected: 3, amount: 5, .. })
        ));
    }

    #[test]
    fn replay_rejects_wrong_fill_amount() {
        let mut builder = TraceBuilder::new();
        builder.record(Action::Fill { jug: JugLabel::X, amount: 4 });
        let trace = builder.finish(JugLabel::X);
        assert!(matches!(
            trace.replay(3, 5),
            Err(RecordError::CapacityMismatch { capacity: 3, amount: 4, .. })
        ));
    }
}
