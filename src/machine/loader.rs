//! Program source loader.
//!
//! Programs are text files with one base-2 byte literal per line. Everything
//! after a `#` is a comment; blank lines (after trimming) are skipped.
//!
//! ```text
//! # print the number 8
//! 10000010 # LDI r0, 8
//! 00000000
//! 00001000
//! 01000111 # PRN r0
//! 00000000
//! 00000001 # HLT
//! ```

use crate::machine::errors::MachineError;
use std::fs;
use std::path::Path;

const COMMENT_CHAR: char = '#';

/// Parses program source text into its byte sequence.
///
/// Malformed literals fail with a line-numbered
/// [`MachineError::ParseError`]; line numbers are 1-based.
pub fn parse_source(source: &str) -> Result<Vec<u8>, MachineError> {
    let mut program = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let code = match line.split_once(COMMENT_CHAR) {
            Some((before, _)) => before,
            None => line,
        };
        let literal = code.trim();
        if literal.is_empty() {
            continue;
        }

        let byte = u8::from_str_radix(literal, 2).map_err(|_| MachineError::ParseError {
            line: index + 1,
            literal: literal.to_string(),
        })?;
        program.push(byte);
    }

    Ok(program)
}

/// Reads and parses the program file at `path`.
///
/// A missing or unreadable file is a load failure; callers abort before any
/// instruction executes.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, MachineError> {
    let source = fs::read_to_string(path).map_err(|e| MachineError::Io(e.to_string()))?;
    parse_source(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_literals() {
        let program = parse_source("10000010\n00000000\n00101010\n").unwrap();
        assert_eq!(program, vec![0b1000_0010, 0, 42]);
    }

    #[test]
    fn strips_comments_and_whitespace() {
        let source = "
            # full-line comment
            10000010 # LDI r0, 42
              00000000
            00101010# trailing comment, no space

            00000001
        ";
        let program = parse_source(source).unwrap();
        assert_eq!(program, vec![0b1000_0010, 0, 42, 1]);
    }

    #[test]
    fn empty_source_is_empty_program() {
        assert_eq!(parse_source("").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_source("# nothing but comments\n").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_non_binary_literal() {
        let err = parse_source("10000010\n2001\n").unwrap_err();
        assert_eq!(
            err,
            MachineError::ParseError {
                line: 2,
                literal: "2001".to_string()
            }
        );
    }

    #[test]
    fn rejects_literal_wider_than_a_byte() {
        let err = parse_source("111111111\n").unwrap_err();
        assert_eq!(
            err,
            MachineError::ParseError {
                line: 1,
                literal: "111111111".to_string()
            }
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file("no/such/program.m8").unwrap_err();
        assert!(matches!(err, MachineError::Io(_)));
    }
}
