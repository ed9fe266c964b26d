//! Machine state tracking
//!
//! Replays command semantics line by line so that the tracked state is
//! correct after every line. Lines are strictly sequential: each one may
//! depend on everything before it.

pub mod state;

pub use state::{Axis, MachineState, Position, ToolState};

use crate::error::{Error, Result};
use crate::parser::{self, CommandCode, ParsedLine, RegisterMap};

/// Codes that are validated but leave tracked state alone
const PASS_THROUGH: &[CommandCode] = &[
    CommandCode::G(21),
    CommandCode::G(90),
    CommandCode::G(130),
    CommandCode::M(6),
    CommandCode::M(17),
    CommandCode::M(18),
    CommandCode::M(70),
    CommandCode::M(72),
    CommandCode::M(73),
    CommandCode::M(104),
    CommandCode::M(109),
    CommandCode::M(126),
    CommandCode::M(127),
    CommandCode::M(133),
    CommandCode::M(134),
    CommandCode::M(140),
    CommandCode::M(320),
];

/// Owns the tracked state and mutates it one line at a time
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    state: MachineState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a configured home position table
    pub fn with_home_position(home_position: Position) -> Self {
        let mut machine = Self::new();
        machine.set_home_position(home_position);
        machine
    }

    /// Current snapshot
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn position(&self) -> &Position {
        &self.state.position
    }

    /// Overwrite the supplied axes without going through a command
    pub fn set_position(&mut self, values: impl IntoIterator<Item = (Axis, f64)>) {
        self.state.position.update(values);
    }

    pub fn set_home_position(&mut self, home_position: Position) {
        self.state.home_position = home_position;
    }

    /// Parse `line` and apply it.
    ///
    /// Returns the parsed line so the caller can hand the registers and
    /// comment on downstream. On error the state is unchanged.
    pub fn execute_line(&mut self, line: &str) -> Result<ParsedLine> {
        let parsed = parser::parse_line(line)?;
        self.execute(&parsed.registers)?;
        Ok(parsed)
    }

    /// Apply an already parsed register map
    pub fn execute(&mut self, registers: &RegisterMap) -> Result<()> {
        let Some(code) = registers.command_code()? else {
            return Ok(());
        };

        // Work on a copy so a failing line cannot leave partial updates
        let mut next = self.state.clone();
        apply(&mut next, code, registers)?;
        self.state = next;
        Ok(())
    }
}

fn apply(state: &mut MachineState, code: CommandCode, registers: &RegisterMap) -> Result<()> {
    match code {
        // Moves and origin redefinition only differ downstream
        CommandCode::G(0) | CommandCode::G(1) | CommandCode::G(92) => {
            state.position.update(numeric_axes(registers));
            log::debug!("{code}: position -> {:?}", state.position);
        }
        CommandCode::G(4) => {
            require_number(code, registers, 'P')?;
        }
        CommandCode::G(10) => {
            let index = require_index(code, registers, 'P')?;
            state.offset_register = index;
            state.position.update(numeric_axes(registers));
            log::debug!(
                "{code}: offset register -> {index}, position -> {:?}",
                state.position
            );
        }
        CommandCode::G(54) => select_toolhead(state, code, 0),
        CommandCode::G(55) => select_toolhead(state, code, 1),
        CommandCode::G(161) | CommandCode::G(162) => {
            state.position.update(present_axes(registers).map(|axis| (axis, 0.0)));
            log::debug!("{code}: homed to {:?}", state.position);
        }
        CommandCode::M(101) => set_tool(state, code, true, Some(true)),
        CommandCode::M(102) => set_tool(state, code, true, Some(false)),
        CommandCode::M(103) => set_tool(state, code, false, None),
        CommandCode::M(108) => {
            state.tool.speed = require_number(code, registers, 'R')?;
            log::debug!("{code}: tool speed -> {}", state.tool.speed);
        }
        CommandCode::M(132) => {
            let homed = present_axes(registers)
                .map(|axis| {
                    state
                        .home_position
                        .get(axis)
                        .map(|value| (axis, value))
                        .ok_or(Error::MissingHomeAxis(axis))
                })
                .collect::<Result<Vec<_>>>()?;
            state.position.update(homed);
            log::debug!("{code}: recalled home {:?}", state.position);
        }
        CommandCode::M(135) => {
            let index = require_index(code, registers, 'T')?;
            select_toolhead(state, code, index);
        }
        code if PASS_THROUGH.contains(&code) => {
            log::trace!("{code}: no tracked state");
        }
        code => return Err(Error::UnrecognizedCode(code.to_string())),
    }

    Ok(())
}

fn select_toolhead(state: &mut MachineState, code: CommandCode, index: u32) {
    state.toolhead = index;
    log::debug!("{code}: toolhead -> {index}");
}

fn set_tool(state: &mut MachineState, code: CommandCode, enabled: bool, direction: Option<bool>) {
    state.tool.enabled = enabled;
    if let Some(direction) = direction {
        state.tool.direction = direction;
    }
    log::debug!("{code}: tool -> {:?}", state.tool);
}

/// Axes carrying a numeric value; bare flags are skipped
fn numeric_axes(registers: &RegisterMap) -> impl Iterator<Item = (Axis, f64)> + '_ {
    registers
        .iter()
        .filter_map(|(code, value)| Some((Axis::from_code(code)?, value.as_number()?)))
}

/// Axes present in any form
fn present_axes(registers: &RegisterMap) -> impl Iterator<Item = Axis> + '_ {
    registers.iter().filter_map(|(code, _)| Axis::from_code(code))
}

fn require_number(code: CommandCode, registers: &RegisterMap, register: char) -> Result<f64> {
    registers
        .number(register)
        .ok_or_else(|| Error::MissingParameter {
            command: code.to_string(),
            register,
        })
}

fn require_index(code: CommandCode, registers: &RegisterMap, register: char) -> Result<u32> {
    let value = require_number(code, registers, register)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(Error::InvalidIndex {
            command: code.to_string(),
            register,
            value,
        });
    }
    Ok(value as u32)
}
