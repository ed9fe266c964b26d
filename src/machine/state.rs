//! Tracked machine state
//!
//! Plain data: nothing here interprets commands.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A positioning axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    B,
}

impl Axis {
    pub const ALL: [Axis; 5] = [Axis::X, Axis::Y, Axis::Z, Axis::A, Axis::B];

    /// Axis for an uppercase code letter, if the letter names one
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            'A' => Some(Axis::A),
            'B' => Some(Axis::B),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::A => 'A',
            Axis::B => 'B',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<String> for Axis {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Axis::from_code(c.to_ascii_uppercase()),
            _ => None,
        }
        .ok_or_else(|| format!("unknown axis '{name}'"))
    }
}

/// Last commanded coordinate per axis.
///
/// Sparse: an axis is present only once something set it, and keeps its
/// value until something sets it again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(BTreeMap<Axis, f64>);

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.0.get(&axis).copied()
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        self.0.insert(axis, value);
    }

    /// Overwrite the supplied axes, leaving the others untouched
    pub fn update(&mut self, values: impl IntoIterator<Item = (Axis, f64)>) {
        self.0.extend(values);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        self.0.iter().map(|(axis, value)| (*axis, *value))
    }
}

impl FromIterator<(Axis, f64)> for Position {
    fn from_iter<I: IntoIterator<Item = (Axis, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Toolhead motor state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolState {
    pub enabled: bool,
    /// `true` is forward
    pub direction: bool,
    pub speed: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: true,
            speed: 0.0,
        }
    }
}

/// Snapshot of everything the state machine tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MachineState {
    pub position: Position,
    /// Active coordinate frame / tool
    pub toolhead: u32,
    /// Active offset register group
    pub offset_register: u32,
    pub tool: ToolState,
    /// Reference coordinates used by M132
    pub home_position: Position,
}
