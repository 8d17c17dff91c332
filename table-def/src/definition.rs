//! Parser for whole table definition files.
//!
//! ```text
//! <table_name> (
//!   <col_name> <type_token> [NULL | NOT NULL],
//!   ...
//!   CONSTRAINT <name> PRIMARY KEY|UNIQUE|NON KEY (<col_name>[, ...])
//! );
//! ```
//!
//! The constraint clause is optional and must come last. Parse failures are
//! classified so the caller can report unknown-data-type and missing-keyword
//! conditions with the offending file position.

use std::path::Path;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::combinator::{map, opt, value};
use nom::error::ErrorKind;

use crate::type_grammar::{data_type, keyword, keyword2};
use crate::whitespace::{whitespace0, whitespace1};
use crate::{
    fail_with, ColumnDefinition, ColumnName, ConstraintDefinition, ConstraintKind, DefError,
    DefResult, Dialect, ErrorHint, ParseError, Span, TableDefinition,
};

fn identifier(i: Span) -> DefResult<&str> {
    map(
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        |s: Span| *s.fragment(),
    )(i)
}

/// Converts a recoverable failure into a classified, irrecoverable one.
fn expect<'a, O>(result: DefResult<'a, O>, at: Span<'a>, hint: ErrorHint) -> DefResult<'a, O> {
    match result {
        Err(nom::Err::Error(_)) => fail_with(at, hint),
        other => other,
    }
}

/// Parses the optional nullability suffix of a column entry. Anything other
/// than `NULL`, `NOT NULL`, a separator, or the end of the body is a
/// missing-keyword condition (`NOTNULL` being the classic case).
fn nullability(i: Span) -> DefResult<bool> {
    let (i, _) = whitespace0(i)?;
    if let Ok((rest, _)) = keyword("NOT")(i) {
        let (rest, _) = expect(whitespace1(rest), rest, ErrorHint::MissingKeyword("NULL"))?;
        let (rest, _) = expect(keyword("NULL")(rest), rest, ErrorHint::MissingKeyword("NULL"))?;
        return Ok((rest, false));
    }
    if let Ok((rest, _)) = keyword("NULL")(i) {
        return Ok((rest, true));
    }
    match i.fragment().chars().next() {
        None | Some(',') | Some(')') => Ok((i, true)),
        _ => fail_with(i, ErrorHint::MissingKeyword("NULL or NOT NULL")),
    }
}

fn column_definition(dialect: Dialect) -> impl Fn(Span) -> DefResult<ColumnDefinition> {
    move |i| {
        let (i, name) = identifier(i)?;
        let (i, _) = whitespace1(i)?;
        let (i, parsed_type) = expect(data_type(dialect)(i), i, ErrorHint::UnknownDataType)?;
        let (i, nullable) = nullability(i)?;
        Ok((
            i,
            ColumnDefinition {
                name: name.into(),
                data_type: parsed_type,
                nullable,
            },
        ))
    }
}

fn constraint_kind(i: Span) -> DefResult<ConstraintKind> {
    alt((
        value(ConstraintKind::PrimaryKey, keyword2("PRIMARY", "KEY")),
        value(ConstraintKind::Unique, keyword("UNIQUE")),
        value(ConstraintKind::NonKey, keyword2("NON", "KEY")),
    ))(i)
}

/// Parses the trailing constraint clause. `columns` are the table's already
/// parsed column definitions; a participating column that does not exist
/// among them fails at its own position.
fn constraint_definition<'a>(
    i: Span<'a>,
    columns: &[ColumnDefinition],
) -> DefResult<'a, ConstraintDefinition> {
    let (i, _) = keyword("CONSTRAINT")(i)?;
    let (i, _) = expect(
        whitespace1(i),
        i,
        ErrorHint::MissingKeyword("constraint name"),
    )?;
    let (i, name) = expect(
        identifier(i),
        i,
        ErrorHint::MissingKeyword("constraint name"),
    )?;
    let (i, _) = whitespace1(i)?;
    let (i, kind) = expect(
        constraint_kind(i),
        i,
        ErrorHint::MissingKeyword("PRIMARY KEY, UNIQUE or NON KEY"),
    )?;
    let (i, _) = whitespace0(i)?;
    let (mut rest, _) = tag("(")(i)?;
    let mut participating = Vec::new();
    loop {
        let (i, _) = whitespace0(rest)?;
        let at = i;
        let (i, column) = identifier(i)?;
        if !columns
            .iter()
            .any(|c| c.name.as_str().eq_ignore_ascii_case(column))
        {
            return Err(nom::Err::Failure(DefError {
                input: at,
                kind: ErrorKind::Verify,
                hint: None,
            }));
        }
        participating.push(ColumnName::from(column));
        let (i, _) = whitespace0(i)?;
        if let Ok((i, _)) = tag::<_, _, DefError>(",")(i) {
            rest = i;
            continue;
        }
        let (i, _) = tag(")")(i)?;
        rest = i;
        break;
    }
    Ok((
        rest,
        ConstraintDefinition {
            name: name.to_owned(),
            kind,
            columns: participating,
        },
    ))
}

fn table_definition(dialect: Dialect) -> impl Fn(Span) -> DefResult<TableDefinition> {
    move |i| {
        let (i, _) = whitespace0(i)?;
        let (i, name) = identifier(i)?;
        let (i, _) = whitespace0(i)?;
        let (mut rest, _) = tag("(")(i)?;

        let mut columns: Vec<ColumnDefinition> = Vec::new();
        let mut constraint = None;
        loop {
            let (i, _) = whitespace0(rest)?;
            if i.fragment().starts_with(')') {
                let (i, _) = tag(")")(i)?;
                rest = i;
                break;
            }
            if constraint.is_some() {
                // the constraint clause must be the last entry
                return Err(nom::Err::Failure(DefError {
                    input: i,
                    kind: ErrorKind::Verify,
                    hint: None,
                }));
            }
            if keyword("CONSTRAINT")(i).is_ok() {
                let (i, parsed) = constraint_definition(i, &columns)?;
                constraint = Some(parsed);
                let (i, _) = whitespace0(i)?;
                let (i, _) = opt(tag(","))(i)?;
                rest = i;
                continue;
            }
            let (i, column) = column_definition(dialect)(i)?;
            columns.push(column);
            let (i, _) = whitespace0(i)?;
            let (i, _) = opt(tag(","))(i)?;
            rest = i;
        }

        if columns.is_empty() {
            return Err(nom::Err::Failure(DefError {
                input: rest,
                kind: ErrorKind::Verify,
                hint: None,
            }));
        }

        let (i, _) = whitespace0(rest)?;
        let (i, _) = opt(tag(";"))(i)?;
        let (i, _) = whitespace0(i)?;
        if !i.fragment().is_empty() {
            return Err(nom::Err::Failure(DefError {
                input: i,
                kind: ErrorKind::Eof,
                hint: None,
            }));
        }

        Ok((
            i,
            TableDefinition {
                name: name.into(),
                columns,
                constraint,
            },
        ))
    }
}

/// Parses one table definition from `source`. `file` is only used for error
/// reporting.
pub fn parse_table_definition(
    dialect: Dialect,
    source: &str,
    file: &Path,
) -> Result<TableDefinition, ParseError> {
    match table_definition(dialect)(Span::new(source)) {
        Ok((_, table)) => Ok(table),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(ParseError::from_def_error(&e, file))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::syntax_at(Span::new(source), file)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataType, LengthSemantics, ParseErrorKind};

    fn parse(dialect: Dialect, source: &str) -> Result<TableDefinition, ParseError> {
        parse_table_definition(dialect, source, Path::new("TEST.def"))
    }

    const STRING_TEST: &str = "STRING_TEST (
  T_ID NUMBER NOT NULL,
  COL_CHAR CHAR(50 BYTE),
  COL_VARCHAR2 VARCHAR2(1000 BYTE),
  COL_LONG LONG,
  SEPARATE_COL NUMBER,
  CONSTRAINT STRING_TEST_PK PRIMARY KEY (T_ID)
);
";

    #[test]
    fn parses_full_definition() {
        let table = parse(Dialect::Oracle, STRING_TEST).unwrap();
        assert_eq!(table.name.as_str(), "STRING_TEST");
        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.identifier_column().name.as_str(), "T_ID");
        assert!(!table.identifier_column().nullable);
        assert_eq!(
            table.columns[1].data_type,
            DataType::Char {
                len: Some(50),
                semantics: Some(LengthSemantics::Byte)
            }
        );
        let constraint = table.constraint.unwrap();
        assert_eq!(constraint.name, "STRING_TEST_PK");
        assert_eq!(constraint.kind, ConstraintKind::PrimaryKey);
        assert_eq!(constraint.columns, vec![ColumnName::from("T_ID")]);
    }

    #[test]
    fn columns_default_to_nullable() {
        let table = parse(Dialect::MySQL, "T (ID BIGINT, V VARCHAR(10) NOT NULL)").unwrap();
        assert!(table.columns[0].nullable);
        assert!(!table.columns[1].nullable);
    }

    #[test]
    fn missing_space_in_not_null() {
        let err = parse(
            Dialect::Oracle,
            "T (\n  COL1 VARCHAR2(30) NOTNULL,\n  COL2 DATE\n);",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingKeyword);
        assert_eq!(err.file, Path::new("TEST.def"));
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 21);
        assert_eq!(err.snippet, "NOTNULL,");
    }

    #[test]
    fn unknown_type_token() {
        let err = parse(Dialect::Oracle, "T (COL1 TINYINT)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownDataType);
        assert_eq!(err.snippet, "TINYINT)");
    }

    #[test]
    fn non_key_constraint() {
        let table = parse(
            Dialect::MySQL,
            "T (ID BIGINT, CONSTRAINT T_PK NON KEY (ID));",
        )
        .unwrap();
        assert_eq!(table.constraint.unwrap().kind, ConstraintKind::NonKey);
    }

    #[test]
    fn unique_constraint_over_multiple_columns() {
        let table = parse(
            Dialect::PostgreSQL,
            "T (A BIGINT, B DATE, CONSTRAINT T_UK UNIQUE (A, B));",
        )
        .unwrap();
        let constraint = table.constraint.unwrap();
        assert_eq!(constraint.kind, ConstraintKind::Unique);
        assert_eq!(constraint.columns.len(), 2);
    }

    #[test]
    fn constraint_over_unknown_column_is_rejected() {
        let err = parse(
            Dialect::MySQL,
            "T (ID BIGINT, CONSTRAINT T_PK PRIMARY KEY (MISSING));",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
    }

    #[test]
    fn malformed_constraint_kind() {
        let err = parse(
            Dialect::MySQL,
            "T (ID BIGINT, CONSTRAINT T_PK FOREIGN KEY (ID));",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingKeyword);
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(parse(Dialect::MySQL, "T ()").is_err());
    }

    #[test]
    fn comments_are_ignored() {
        let table = parse(
            Dialect::MySQL,
            "-- benchmark table\nT (\n  ID BIGINT, /* identifier */\n  V VARCHAR(10)\n)",
        )
        .unwrap();
        assert_eq!(table.columns.len(), 2);
    }
}
