//! Command tokenizer
//!
//! Turns the command text of a line (comments already removed) into a
//! register map: one entry per code letter, holding either a number or a
//! presence flag.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Code letters accepted at the start of a token.
pub const CODE_LETTERS: &[char] = &[
    'G', 'M', 'X', 'Y', 'Z', 'A', 'B', 'E', 'F', 'S', 'P', 'R', 'T', 'N',
];

/// Optional sign, digits, at most one decimal point.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid regex"));

/// Value stored in a register
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegisterValue {
    /// Code letter followed by a numeric literal, like `X10.5`
    Number(f64),
    /// Bare code letter, like the `Z` in `G161 Z`
    Flag,
}

impl RegisterValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Flag => None,
        }
    }
}

// Flags serialize as `true`, matching how they read in a program
impl Serialize for RegisterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Flag => serializer.serialize_bool(true),
        }
    }
}

impl From<f64> for RegisterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Registers parsed from one line, keyed by uppercase code letter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterMap(HashMap<char, RegisterValue>);

impl RegisterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: char) -> Option<RegisterValue> {
        self.0.get(&code).copied()
    }

    /// Numeric value of `code`, `None` when absent or a bare flag
    pub fn number(&self, code: char) -> Option<f64> {
        self.get(code).and_then(|value| value.as_number())
    }

    pub fn contains(&self, code: char) -> bool {
        self.0.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, RegisterValue)> + '_ {
        self.0.iter().map(|(code, value)| (*code, *value))
    }

    /// Insert a register, rejecting a code that is already present
    fn insert_unique(&mut self, code: char, value: RegisterValue) -> Result<()> {
        if self.0.insert(code, value).is_some() {
            return Err(Error::RepeatCode(code));
        }
        Ok(())
    }

    /// The G or M code selecting this line's semantics, if any.
    ///
    /// Fails when the primary code is a bare flag or not a whole,
    /// non-negative number, since such a code cannot be dispatched.
    pub fn command_code(&self) -> Result<Option<CommandCode>> {
        let (letter, value) = match (self.get('G'), self.get('M')) {
            (Some(value), None) => ('G', value),
            (None, Some(value)) => ('M', value),
            (None, None) => return Ok(None),
            (Some(_), Some(_)) => return Err(Error::MultipleCommandCode),
        };

        let number = match value {
            RegisterValue::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => {
                n as u32
            }
            RegisterValue::Number(n) => return Err(Error::UnrecognizedCode(format!("{letter}{n}"))),
            RegisterValue::Flag => return Err(Error::UnrecognizedCode(letter.to_string())),
        };

        Ok(Some(if letter == 'G' {
            CommandCode::G(number)
        } else {
            CommandCode::M(number)
        }))
    }
}

impl FromIterator<(char, RegisterValue)> for RegisterMap {
    fn from_iter<I: IntoIterator<Item = (char, RegisterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A dispatchable primary code, like `G1` or `M108`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    G(u32),
    M(u32),
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::G(n) => write!(f, "G{n}"),
            Self::M(n) => write!(f, "M{n}"),
        }
    }
}

/// Parse command text into a register map
///
/// Tokens are separated by whitespace. Each token is a code letter
/// (case-insensitive) optionally followed by a numeric literal. Empty input
/// yields an empty map.
pub fn parse_command(command: &str) -> Result<RegisterMap> {
    let mut registers = RegisterMap::new();

    for token in command.split_whitespace() {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            continue;
        };

        let code = first.to_ascii_uppercase();
        if !CODE_LETTERS.contains(&code) {
            return Err(Error::InvalidCode {
                code: first,
                token: token.to_string(),
            });
        }

        let value = parse_value(code, chars.as_str())?;
        registers.insert_unique(code, value)?;
    }

    if registers.contains('G') && registers.contains('M') {
        return Err(Error::MultipleCommandCode);
    }

    Ok(registers)
}

/// Strictly parse the text following a code letter
fn parse_value(code: char, text: &str) -> Result<RegisterValue> {
    if text.is_empty() {
        return Ok(RegisterValue::Flag);
    }

    let invalid = || Error::InvalidNumber {
        code,
        value: text.to_string(),
    };

    if !NUMBER.is_match(text) {
        return Err(invalid());
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(RegisterValue::Number(value)),
        _ => Err(invalid()),
    }
}
