use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one of the two jugs named by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JugLabel {
    /// The jug whose capacity was passed as `x`.
    X,
    /// The jug whose capacity was passed as `y`.
    Y,
}

impl JugLabel {
    /// Returns the wire tag, `"x"` or `"y"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            JugLabel::X => "x",
            JugLabel::Y => "y",
        }
    }

    /// Returns the label of the other jug.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            JugLabel::X => JugLabel::Y,
            JugLabel::Y => JugLabel::X,
        }
    }
}

impl fmt::Display for JugLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A jug capacity paired with the caller's label for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JugSpec {
    /// Maximum amount of water the jug holds.
    pub capacity: u64,
    /// Which input jug this is.
    pub label: JugLabel,
}

impl JugSpec {
    /// Creates a new `JugSpec`.
    #[must_use]
    pub const fn new(capacity: u64, label: JugLabel) -> Self {
        Self { capacity, label }
    }
}

/// Water held by each jug at some point of a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Levels {
    /// Water in the x jug.
    pub x: u64,
    /// Water in the y jug.
    pub y: u64,
}

impl Levels {
    /// Returns the level of the jug named by `label`.
    #[must_use]
    pub const fn get(&self, label: JugLabel) -> u64 {
        match label {
            JugLabel::X => self.x,
            JugLabel::Y => self.y,
        }
    }

    pub(crate) fn get_mut(&mut self, label: JugLabel) -> &mut u64 {
        match label {
            JugLabel::X => &mut self.x,
            JugLabel::Y => &mut self.y,
        }
    }
}
