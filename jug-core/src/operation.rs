use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::jug::JugLabel;

/// The three kinds of state change a trace can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// A jug is filled to capacity from the tap.
    Fill,
    /// A jug is poured out onto the ground.
    Empty,
    /// Water moves from one jug to the other.
    Pour,
}

impl OperationKind {
    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OperationKind::Fill => "fill",
            OperationKind::Empty => "empty",
            OperationKind::Pour => "pour",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single step does to the jugs.
///
/// Fill and empty act on one jug; pour names both ends. The fields each
/// variant carries are exactly the fields it may serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Fill `jug` to its capacity, which is `amount`.
    Fill { jug: JugLabel, amount: u64 },
    /// Empty `jug`, whose capacity is `amount`.
    Empty { jug: JugLabel, amount: u64 },
    /// Move `amount` from `origin` into `destination`.
    Pour {
        origin: JugLabel,
        destination: JugLabel,
        amount: u64,
    },
}

impl Action {
    /// Returns the kind tag of this action.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Action::Fill { .. } => OperationKind::Fill,
            Action::Empty { .. } => OperationKind::Empty,
            Action::Pour { .. } => OperationKind::Pour,
        }
    }

    /// Returns the water amount set or moved by this action.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        match *self {
            Action::Fill { amount, .. } | Action::Empty { amount, .. } | Action::Pour { amount, .. } => {
                amount
            }
        }
    }

    /// Returns the same action with both jug labels swapped.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Action::Fill { jug, amount } => Action::Fill { jug: jug.other(), amount },
            Action::Empty { jug, amount } => Action::Empty { jug: jug.other(), amount },
            Action::Pour {
                origin,
                destination,
                amount,
            } => Action::Pour {
                origin: origin.other(),
                destination: destination.other(),
                amount,
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fill { jug, amount } => write!(f, "filling jug {jug} with {amount} capacity"),
            Action::Empty { jug, amount } => write!(f, "emptying jug {jug} with {amount} capacity"),
            Action::Pour {
                origin,
                destination,
                ..
            } => write!(f, "pouring water from jug {origin} to {destination}"),
        }
    }
}

/// One numbered step of a [`crate::Trace`].
///
/// Serializes to the flat `operation` / `jug` / `jug_origin` /
/// `jug_destination` / `amount` / `step` / `description` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "OperationRecord", try_from = "OperationRecord")]
pub struct Operation {
    /// 1-based position within the trace.
    pub step: usize,
    /// The state change performed at this step.
    pub action: Action,
}

impl Operation {
    /// Creates a new `Operation`.
    #[must_use]
    pub const fn new(step: usize, action: Action) -> Self {
        Self { step, action }
    }

    /// Returns the kind tag of the underlying action.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.action.kind()
    }

    /// Returns the water amount set or moved at this step.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.action.amount()
    }

    /// Human-readable description, e.g. `"pouring water from jug y to x"`.
    #[must_use]
    pub fn description(&self) -> String {
        self.action.to_string()
    }
}

// ── Wire record ──────────────────────────────────────────────────────────────

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &u64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OperationRecord {
    operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jug: Option<JugLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jug_origin: Option<JugLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jug_destination: Option<JugLabel>,
    #[serde(default, skip_serializing_if = "is_zero")]
    amount: u64,
    #[serde(default)]
    step: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

impl From<Operation> for OperationRecord {
    fn from(op: Operation) -> Self {
        let description = op.description();
        let (jug, jug_origin, jug_destination) = match op.action {
            Action::Fill { jug, .. } | Action::Empty { jug, .. } => (Some(jug), None, None),
            Action::Pour {
                origin,
                destination,
                ..
            } => (None, Some(origin), Some(destination)),
        };
        Self {
            operation: op.kind().as_str().to_owned(),
            jug,
            jug_origin,
            jug_destination,
            amount: op.amount(),
            step: op.step,
            description,
        }
    }
}

impl TryFrom<OperationRecord> for Operation {
    type Error = RecordError;

    fn try_from(record: OperationRecord) -> Result<Self, Self::Error> {
        let step = record.step;
        let kind = match record.operation.as_str() {
            "fill" => OperationKind::Fill,
            "empty" => OperationKind::Empty,
            "pour" => OperationKind::Pour,
            other => return Err(RecordError::UnknownKind(other.to_owned())),
        };
        let missing = |field| RecordError::MissingField {
            step,
            kind: kind.as_str(),
            field,
        };
        let unexpected = |field| RecordError::UnexpectedField {
            step,
            kind: kind.as_str(),
            field,
        };

        let action = match kind {
            OperationKind::Fill | OperationKind::Empty => {
                if record.jug_origin.is_some() {
                    return Err(unexpected("jug_origin"));
                }
                if record.jug_destination.is_some() {
                    return Err(unexpected("jug_destination"));
                }
                let jug = record.jug.ok_or_else(|| missing("jug"))?;
                if kind == OperationKind::Fill {
                    Action::Fill { jug, amount: record.amount }
                } else {
                    Action::Empty { jug, amount: record.amount }
                }
            }
            OperationKind::Pour => {
                if record.jug.is_some() {
                    return Err(unexpected("jug"));
                }
                let origin = record.jug_origin.ok_or_else(|| missing("jug_origin"))?;
                let destination = record
                    .jug_destination
                    .ok_or_else(|| missing("jug_destination"))?;
                if origin == destination {
                    return Err(RecordError::SelfPour { step, jug: origin });
                }
                Action::Pour {
                    origin,
                    destination,
                    amount: record.amount,
                }
            }
        };

        Ok(Operation::new(step, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_value(op: Operation) -> serde_json::Value {
        match serde_json::to_value(op) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        }
    }

    #[test]
    fn fill_serializes_only_jug_label() {
        let op = Operation::new(1, Action::Fill { jug: JugLabel::Y, amount: 5 });
        let v = to_value(op);
        assert_eq!(v["operation"], "fill");
        assert_eq!(v["jug"], "y");
        assert_eq!(v["amount"], 5);
        assert_eq!(v["step"], 1);
        assert_eq!(v["description"], "filling jug y with 5 capacity");
        assert!(v.get("jug_origin").is_none(), "fill must not carry jug_origin");
        assert!(v.get("jug_destination").is_none(), "fill must not carry jug_destination");
    }

    #[test]
    fn pour_serializes_origin_and_destination() {
        let op = Operation::new(
            2,
            Action::Pour {
                origin: JugLabel::Y,
                destination: JugLabel::X,
                amount: 3,
            },
        );
        let v = to_value(op);
        assert_eq!(v["operation"], "pour");
        assert_eq!(v["jug_origin"], "y");
        assert_eq!(v["jug_destination"], "x");
        assert_eq!(v["description"], "pouring water from jug y to x");
        assert!(v.get("jug").is_none(), "pour must not carry jug");
    }

    #[test]
    fn empty_description_names_capacity() {
        let op = Operation::new(3, Action::Empty { jug: JugLabel::X, amount: 3 });
        assert_eq!(op.description(), "emptying jug x with 3 capacity");
        assert_eq!(op.kind(), OperationKind::Empty);
    }

    #[test]
    fn zero_amount_is_omitted() {
        let op = Operation::new(
            4,
            Action::Pour {
                origin: JugLabel::X,
                destination: JugLabel::Y,
                amount: 0,
            },
        );
        assert!(to_value(op).get("amount").is_none(), "zero amount must be omitted");
    }

    #[test]
    fn decode_ignores_incoming_description() {
        let json = r#"{"operation":"empty","jug":"x","amount":3,"step":3,"description":"bogus"}"#;
        let op: Operation = match serde_json::from_str(json) {
            Ok(op) => op,
            Err(e) => panic!("decode failed: {e}"),
        };
        assert_eq!(op, Operation::new(3, Action::Empty { jug: JugLabel::X, amount: 3 }));
        assert_eq!(op.description(), "emptying jug x with 3 capacity");
    }

    #[test]
    fn decode_rejects_pour_without_origin() {
        let json = r#"{"operation":"pour","jug_destination":"x","amount":1,"step":2}"#;
        let err = serde_json::from_str::<Operation>(json).err();
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("missing field 'jug_origin'"), "unexpected error: {msg}");
    }

    #[test]
    fn decode_rejects_fill_with_destination() {
        let json = r#"{"operation":"fill","jug":"x","jug_destination":"y","amount":1,"step":1}"#;
        let msg = serde_json::from_str::<Operation>(json)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(msg.contains("must not set field 'jug_destination'"), "unexpected error: {msg}");
    }

    #[test]
    fn decode_rejects_unknown_kind_and_self_pour() {
        let unknown = r#"{"operation":"spill","jug":"x","step":1}"#;
        assert!(serde_json::from_str::<Operation>(unknown).is_err());

        let self_pour = r#"{"operation":"pour","jug_origin":"y","jug_destination":"y","amount":1,"step":1}"#;
        let msg = serde_json::from_str::<Operation>(self_pour)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(msg.contains("into itself"), "unexpected error: {msg}");
    }

    #[test]
    fn mirrored_swaps_every_label() {
        let pour = Action::Pour {
            origin: JugLabel::X,
            destination: JugLabel::Y,
            amount: 2,
        };
        assert_eq!(
            pour.mirrored(),
            Action::Pour {
                origin: JugLabel::Y,
                destination: JugLabel::X,
                amount: 2,
            }
        );
        assert_eq!(
            Action::Fill { jug: JugLabel::X, amount: 4 }.mirrored(),
            Action::Fill { jug: JugLabel::Y, amount: 4 }
        );
    }
}
