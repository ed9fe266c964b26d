//! Error types shared by the parser and the state machine.

use thiserror::Error;

use crate::machine::Axis;

/// Every way a single line can fail, from comment scanning to dispatch.
///
/// Errors are raised synchronously and never recovered internally. A line
/// that fails leaves the machine state exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A `)` closed an inline comment that was never opened.
    #[error("unbalanced ')' at column {column}")]
    Comment { column: usize },

    /// A token starts with something other than a recognized code letter.
    #[error("invalid code '{code}' in token '{token}'")]
    InvalidCode { code: char, token: String },

    /// The characters following a code letter are not a well-formed number.
    #[error("malformed value '{value}' for code {code}")]
    InvalidNumber { code: char, value: String },

    /// The same code letter appears more than once on a line.
    #[error("code {0} appears more than once")]
    RepeatCode(char),

    /// A G code and an M code share a line.
    #[error("a line may carry a G code or an M code, not both")]
    MultipleCommandCode,

    /// The primary code is not one the state machine knows how to replay.
    #[error("unrecognized command {0}")]
    UnrecognizedCode(String),

    /// A command needs a numeric register that is absent or a bare flag.
    #[error("{command} requires a numeric {register} value")]
    MissingParameter { command: String, register: char },

    /// An index register is negative or not a whole number.
    #[error("{command} expects a whole, non-negative {register}, got {value}")]
    InvalidIndex {
        command: String,
        register: char,
        value: f64,
    },

    /// Homing to the reference position on an axis with no configured home.
    #[error("no home position configured for axis {0}")]
    MissingHomeAxis(Axis),
}

pub type Result<T> = std::result::Result<T, Error>;
