//! GCode Parser
//!
//! Strict, line-at-a-time parsing: comments are separated out first, then
//! the remaining command text is tokenized into registers.

pub mod command;
pub mod comments;

use serde::Serialize;

use crate::error::Result;

pub use command::{parse_command, CommandCode, RegisterMap, RegisterValue, CODE_LETTERS};
pub use comments::extract_comments;

/// A parsed line of GCode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedLine {
    pub registers: RegisterMap,
    /// Comment text with delimiters removed, informational only
    pub comment: String,
}

/// Parse a single line of GCode into registers and comment text
///
/// This is the main entry point for parsing. Nothing here touches machine
/// state; see [`crate::machine::StateMachine::execute_line`] for that.
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let (command, comment) = comments::extract_comments(line)?;
    let registers = command::parse_command(&command)?;
    log::trace!("parsed {:?} into {:?}", line, registers);
    Ok(ParsedLine { registers, comment })
}
