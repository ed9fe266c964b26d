//! Comment extraction
//!
//! Splits a raw line into the command text and the comment text. Two
//! comment syntaxes are recognized:
//! - `;` runs to the end of the line, taken verbatim
//! - `( ... )` inline comments, which may nest and may be left unterminated

use crate::error::{Error, Result};

/// Split `line` into `(command, comment)`.
///
/// The comment is the semicolon text followed by all inline comment text,
/// in that order regardless of where each appeared on the line. Parentheses
/// themselves are never emitted. An inline comment still open at the end of
/// the line closes silently.
pub fn extract_comments(line: &str) -> Result<(String, String)> {
    let mut command = String::new();
    let mut paren_comment = String::new();
    let mut semicolon_comment = String::new();
    let mut depth = 0usize;

    for (column, (idx, ch)) in line.char_indices().enumerate() {
        match ch {
            '(' => depth += 1,

            ')' => {
                if depth == 0 {
                    return Err(Error::Comment { column: column + 1 });
                }
                depth -= 1;
            }

            _ if depth > 0 => paren_comment.push(ch),

            // Rest of line is comment, nothing in it is reinterpreted
            ';' => {
                semicolon_comment.push_str(&line[idx + ch.len_utf8()..]);
                break;
            }

            _ => command.push(ch),
        }
    }

    semicolon_comment.push_str(&paren_comment);
    Ok((command, semicolon_comment))
}
