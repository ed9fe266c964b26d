//! Program replay
//!
//! Feeds a program to the parser or the state machine one line at a time
//! and applies the error policy to failing lines.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::BufRead;

use crate::config::ErrorPolicy;
use crate::error::Error;
use crate::machine::StateMachine;
use crate::parser;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    pub on_error: ErrorPolicy,
    /// Run only the line parser, leaving the machine untouched
    pub parse_only: bool,
}

/// A line that failed, kept when the policy is [`ErrorPolicy::Continue`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineFailure {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub lines: usize,
    pub failures: Vec<LineFailure>,
}

impl ReplaySummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replay every line of `reader` in order
pub fn replay<R: BufRead>(
    mut reader: R,
    machine: &mut StateMachine,
    options: ReplayOptions,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .with_context(|| format!("failed to read line {}", summary.lines + 1))?;
        if read == 0 {
            break;
        }
        summary.lines += 1;

        // Slicers emit Latin-1 in comments; undecodable bytes become U+FFFD
        let text = String::from_utf8_lossy(&buffer);
        let line = text.trim_end_matches('\n').trim_end_matches('\r');
        let outcome: Result<(), Error> = if options.parse_only {
            parser::parse_line(line).map(|_| ())
        } else {
            machine.execute_line(line).map(|_| ())
        };

        if let Err(error) = outcome {
            match options.on_error {
                ErrorPolicy::Abort => {
                    return Err(anyhow::Error::new(error)
                        .context(format!("line {}: {:?}", summary.lines, line)));
                }
                ErrorPolicy::Continue => {
                    log::warn!("skipping line {}: {}", summary.lines, error);
                    summary.failures.push(LineFailure {
                        line: summary.lines,
                        text: line.to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }
    }

    log::info!(
        "replayed {} lines, {} failed",
        summary.lines,
        summary.failures.len()
    );
    Ok(summary)
}
