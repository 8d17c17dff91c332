use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::{DefError, ErrorHint, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No grammar alternative matched a type token.
    UnknownDataType,
    /// A required keyword is missing where the grammar demands one.
    MissingKeyword,
    Syntax,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnknownDataType => f.write_str("unknown data type"),
            ParseErrorKind::MissingKeyword => f.write_str("missing keyword"),
            ParseErrorKind::Syntax => f.write_str("syntax error"),
        }
    }
}

/// A fatal definition-parse failure, carrying enough source context to point
/// the user at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} in {}, line {line}, column {column}: `{snippet}`", file.display())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub file: PathBuf,
    pub line: u32,
    pub column: usize,
    /// The rest of the offending source line, truncated.
    pub snippet: String,
}

const SNIPPET_LEN: usize = 40;

fn snippet_at(input: Span<'_>) -> String {
    let fragment = input.fragment();
    let line = fragment.lines().next().unwrap_or(fragment).trim_end();
    if line.len() > SNIPPET_LEN {
        let mut end = SNIPPET_LEN;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &line[..end])
    } else {
        line.to_owned()
    }
}

impl ParseError {
    pub(crate) fn from_def_error(error: &DefError<'_>, file: &std::path::Path) -> Self {
        let kind = match error.hint {
            Some(ErrorHint::UnknownDataType) => ParseErrorKind::UnknownDataType,
            Some(ErrorHint::MissingKeyword(_)) => ParseErrorKind::MissingKeyword,
            None => ParseErrorKind::Syntax,
        };
        ParseError {
            kind,
            file: file.to_owned(),
            line: error.input.location_line(),
            column: error.input.get_utf8_column(),
            snippet: snippet_at(error.input),
        }
    }

    pub(crate) fn syntax_at(input: Span<'_>, file: &std::path::Path) -> Self {
        ParseError {
            kind: ParseErrorKind::Syntax,
            file: file.to_owned(),
            line: input.location_line(),
            column: input.get_utf8_column(),
            snippet: snippet_at(input),
        }
    }
}
