//! GCode Machine
//!
//! Front end for driving a motion-control device from textual GCode.
//!
//! This library provides:
//! - Comment extraction and strict command tokenization
//! - A state machine replaying each line into tracked machine state
//! - Machine profile configuration
//! - A line-by-line program replay driver

pub mod config;
pub mod error;
pub mod machine;
pub mod parser;
pub mod replay;

// Re-exports for clean public API
pub use config::{Config, ErrorPolicy, MachineProfile};
pub use error::{Error, Result};
pub use machine::{Axis, MachineState, Position, StateMachine, ToolState};
pub use parser::{extract_comments, parse_command, parse_line, ParsedLine, RegisterMap, RegisterValue};
pub use replay::{replay, ReplayOptions, ReplaySummary};
