//! Parser and type model for per-DBMS table definition files.
//!
//! A definition file declares one table: an ordered list of columns with
//! dialect-native type tokens and nullability, plus an optional trailing
//! `CONSTRAINT` clause. Parsing produces a [`TableDefinition`] whose column
//! types are members of one closed [`DataType`] enum; rendering back to DDL
//! text is dialect-driven through [`DialectDisplay`].

use std::fmt::{self, Debug, Formatter};

use nom::error::ErrorKind;
use nom::IResult;
use nom_locate::LocatedSpan;

pub use self::data_type::{
    CharLength, DataType, IntervalSpan, LengthSemantics, SampleGroup, SampleKind,
};
pub use self::definition::parse_table_definition;
pub use self::dialect::{Dialect, DialectDisplay, UnknownDialect};
pub use self::error::{ParseError, ParseErrorKind};
pub use self::literal::{literal_list, Literal};
pub use self::table::{
    ColumnDefinition, ColumnName, ConstraintDefinition, ConstraintKind, TableDefinition, TableName,
};

mod data_type;
pub mod definition;
mod dialect;
mod error;
mod literal;
mod table;
mod type_grammar;
pub mod whitespace;

/// Definition source threaded through every parser, carrying line and column
/// positions for error reporting.
pub type Span<'a> = LocatedSpan<&'a str>;

pub type DefResult<'a, O> = IResult<Span<'a>, O, DefError<'a>>;

/// A classification attached to a parse failure at the point where the
/// grammar knows what went wrong, so the top level can report an
/// [`UnknownDataType`](ParseErrorKind::UnknownDataType) or
/// [`MissingKeyword`](ParseErrorKind::MissingKeyword) condition instead of a
/// generic syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHint {
    UnknownDataType,
    MissingKeyword(&'static str),
}

#[derive(PartialEq, Eq)]
pub struct DefError<'a> {
    pub input: Span<'a>,
    pub kind: ErrorKind,
    pub hint: Option<ErrorHint>,
}

impl<'a> nom::error::ParseError<Span<'a>> for DefError<'a> {
    fn from_error_kind(input: Span<'a>, kind: ErrorKind) -> Self {
        Self {
            input,
            kind,
            hint: None,
        }
    }

    fn append(_input: Span<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: Span<'a>, _: char) -> Self {
        Self::from_error_kind(input, ErrorKind::Char)
    }

    /// Used by branching combinators when no branch succeeds. The error
    /// propagated is from the branch that made it furthest through the
    /// input; ties go to the branch tried last.
    fn or(self, other: Self) -> Self {
        if self.input.location_offset() > other.input.location_offset() {
            self
        } else {
            other
        }
    }
}

impl<'a, E> nom::error::FromExternalError<Span<'a>, E> for DefError<'a> {
    fn from_external_error(input: Span<'a>, kind: ErrorKind, _e: E) -> Self {
        DefError {
            input,
            kind,
            hint: None,
        }
    }
}

impl Debug for DefError<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefError")
            .field("input", self.input.fragment())
            .field("line", &self.input.location_line())
            .field("col", &self.input.get_utf8_column())
            .field("kind", &self.kind)
            .field("hint", &self.hint)
            .finish()
    }
}

/// Fails the surrounding parser irrecoverably, tagging the failure with a
/// hint so the file-level error report can name the condition.
pub(crate) fn fail_with<O>(input: Span<'_>, hint: ErrorHint) -> DefResult<'_, O> {
    Err(nom::Err::Failure(DefError {
        input,
        kind: ErrorKind::Fail,
        hint: Some(hint),
    }))
}

pub(crate) mod fmt_util {
    use std::fmt;

    /// Builds a `Display` impl from a closure, for rendering types that need
    /// extra context (such as a [`Dialect`](crate::Dialect)) at format time.
    pub(crate) fn fmt_with<F>(f: F) -> FmtWith<F>
    where
        F: Fn(&mut fmt::Formatter) -> fmt::Result,
    {
        FmtWith(f)
    }

    pub(crate) struct FmtWith<F>(F);

    impl<F> fmt::Display for FmtWith<F>
    where
        F: Fn(&mut fmt::Formatter) -> fmt::Result,
    {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            (self.0)(f)
        }
    }
}
