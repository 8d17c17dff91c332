//! Per-dialect type-token grammars.
//!
//! Each dialect exposes one ordered alternation of type parsers. Ordering
//! matters where one token is a textual prefix of another; the compound form
//! (`LONG RAW`, `DATETIME2`, `TIMESTAMP ... WITH TIME ZONE`) is always tried
//! before the shorter one. Every keyword match additionally requires a word
//! boundary, so `INT` never eats the front of `INTERVAL`.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::digit1;
use nom::combinator::{map_res, opt, recognize, value};
use nom::error::ErrorKind;
use nom::sequence::{delimited, preceded, tuple};

use crate::whitespace::{whitespace0, whitespace1};
use crate::{CharLength, DataType, DefResult, Dialect, IntervalSpan, LengthSemantics, Span};

/// Matches `word` case-insensitively, rejecting the match when it is
/// immediately followed by another identifier character.
pub(crate) fn keyword(word: &'static str) -> impl Fn(Span) -> DefResult<Span> {
    move |i| {
        let (rest, tok) = tag_no_case(word)(i)?;
        match rest.fragment().chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' => Err(nom::Err::Error(crate::DefError {
                input: i,
                kind: ErrorKind::Tag,
                hint: None,
            })),
            _ => Ok((rest, tok)),
        }
    }
}

/// Two keywords separated by whitespace, as one token.
pub(crate) fn keyword2(a: &'static str, b: &'static str) -> impl Fn(Span) -> DefResult<Span> {
    move |i| {
        let (i, tok) = keyword(a)(i)?;
        let (i, _) = whitespace1(i)?;
        let (i, _) = keyword(b)(i)?;
        Ok((i, tok))
    }
}

fn u16_literal(i: Span) -> DefResult<u16> {
    map_res(digit1, |d: Span| d.fragment().parse::<u16>())(i)
}

fn i8_literal(i: Span) -> DefResult<i8> {
    map_res(recognize(tuple((opt(tag("-")), digit1))), |d: Span| {
        d.fragment().parse::<i8>()
    })(i)
}

/// `( n )`
fn delimited_u16(i: Span) -> DefResult<u16> {
    delimited(
        tuple((tag("("), whitespace0)),
        u16_literal,
        tuple((whitespace0, tag(")"))),
    )(i)
}

fn opt_len(i: Span) -> DefResult<Option<u16>> {
    opt(preceded(whitespace0, delimited_u16))(i)
}

/// `( p [, s] )`
fn precision(i: Span) -> DefResult<(u16, Option<u16>)> {
    delimited(
        tuple((tag("("), whitespace0)),
        tuple((
            u16_literal,
            opt(preceded(
                tuple((whitespace0, tag(","), whitespace0)),
                u16_literal,
            )),
        )),
        tuple((whitespace0, tag(")"))),
    )(i)
}

fn opt_precision(i: Span) -> DefResult<Option<(u16, Option<u16>)>> {
    opt(preceded(whitespace0, precision))(i)
}

/// `( n | MAX )`
fn char_length(i: Span) -> DefResult<CharLength> {
    delimited(
        tuple((tag("("), whitespace0)),
        alt((
            map_res(digit1, |d: Span| {
                d.fragment().parse::<u16>().map(CharLength::Fixed)
            }),
            value(CharLength::Max, keyword("MAX")),
        )),
        tuple((whitespace0, tag(")"))),
    )(i)
}

pub(crate) fn data_type(dialect: Dialect) -> impl Fn(Span) -> DefResult<DataType> {
    move |i| match dialect {
        Dialect::Oracle => oracle_type(i),
        Dialect::MySQL => mysql_type(i),
        Dialect::SqlServer => sql_server_type(i),
        Dialect::PostgreSQL => postgres_type(i),
    }
}

// Oracle

fn length_semantics(i: Span) -> DefResult<LengthSemantics> {
    alt((
        value(LengthSemantics::Byte, keyword("BYTE")),
        value(LengthSemantics::Char, keyword("CHAR")),
    ))(i)
}

/// `( n [BYTE|CHAR] )`
fn oracle_char_len(i: Span) -> DefResult<(u16, Option<LengthSemantics>)> {
    delimited(
        tuple((tag("("), whitespace0)),
        tuple((u16_literal, opt(preceded(whitespace1, length_semantics)))),
        tuple((whitespace0, tag(")"))),
    )(i)
}

fn oracle_varchar2(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("VARCHAR2")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, (len, semantics)) = oracle_char_len(i)?;
    Ok((i, DataType::Varchar2 { len, semantics }))
}

fn oracle_char(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("CHAR")(i)?;
    let (i, spec) = opt(preceded(whitespace0, oracle_char_len))(i)?;
    let (len, semantics) = match spec {
        Some((len, semantics)) => (Some(len), semantics),
        None => (None, None),
    };
    Ok((i, DataType::Char { len, semantics }))
}

fn oracle_number(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("NUMBER")(i)?;
    let (i, precision) = opt(preceded(
        whitespace0,
        delimited(
            tuple((tag("("), whitespace0)),
            tuple((
                u16_literal,
                opt(preceded(
                    tuple((whitespace0, tag(","), whitespace0)),
                    i8_literal,
                )),
            )),
            tuple((whitespace0, tag(")"))),
        ),
    ))(i)?;
    Ok((i, DataType::Number(precision)))
}

fn oracle_interval_ym(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("INTERVAL")(i)?;
    let (i, _) = whitespace1(i)?;
    let (i, _) = keyword("YEAR")(i)?;
    let (i, precision) = opt_len(i)?;
    let (i, _) = whitespace1(i)?;
    let (i, _) = keyword("TO")(i)?;
    let (i, _) = whitespace1(i)?;
    let (i, _) = keyword("MONTH")(i)?;
    Ok((i, DataType::IntervalYearToMonth { precision }))
}

fn oracle_interval_ds(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("INTERVAL")(i)?;
    let (i, _) = whitespace1(i)?;
    let (i, _) = keyword("DAY")(i)?;
    let (i, day_precision) = opt_len(i)?;
    let (i, _) = whitespace1(i)?;
    let (i, _) = keyword("TO")(i)?;
    let (i, _) = whitespace1(i)?;
    let (i, _) = keyword("SECOND")(i)?;
    let (i, fractional) = opt_len(i)?;
    Ok((
        i,
        DataType::IntervalDayToSecond {
            day_precision,
            fractional,
        },
    ))
}

fn oracle_raw(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("RAW")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = delimited_u16(i)?;
    Ok((i, DataType::Raw(len)))
}

fn oracle_type(i: Span) -> DefResult<DataType> {
    alt((
        oracle_varchar2,
        nvarchar2_type,
        nchar_type,
        oracle_char,
        oracle_number,
        value(DataType::BinaryFloat, keyword("BINARY_FLOAT")),
        value(DataType::BinaryDouble, keyword("BINARY_DOUBLE")),
        oracle_interval_ym,
        oracle_interval_ds,
        timestamp_type,
        value(DataType::Date, keyword("DATE")),
        // LONG RAW shadows both LONG and RAW(n)
        value(DataType::LongRaw, keyword2("LONG", "RAW")),
        oracle_raw,
        value(DataType::Long, keyword("LONG")),
        value(DataType::NClob, keyword("NCLOB")),
        value(DataType::Clob, keyword("CLOB")),
        value(DataType::Blob, keyword("BLOB")),
        value(DataType::Rowid, keyword("ROWID")),
    ))(i)
}

fn nvarchar2_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("NVARCHAR2")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = delimited_u16(i)?;
    Ok((i, DataType::NVarchar2(len)))
}

fn nchar_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("NCHAR")(i)?;
    let (i, len) = opt_len(i)?;
    Ok((i, DataType::NChar(len)))
}

fn timestamp_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("TIMESTAMP")(i)?;
    let (i, precision) = opt_len(i)?;
    Ok((i, DataType::Timestamp { precision }))
}

// MySQL

fn int_qualifiers(i: Span) -> DefResult<(bool, bool)> {
    let (i, unsigned) = opt(preceded(whitespace1, keyword("UNSIGNED")))(i)?;
    let (i, zerofill) = opt(preceded(whitespace1, keyword("ZEROFILL")))(i)?;
    Ok((i, (unsigned.is_some(), zerofill.is_some())))
}

fn mysql_int(
    word: &'static str,
    ctor: fn(Option<u16>, bool, bool) -> DataType,
) -> impl Fn(Span) -> DefResult<DataType> {
    move |i| {
        let (i, _) = keyword(word)(i)?;
        let (i, width) = opt_len(i)?;
        let (i, (unsigned, zerofill)) = int_qualifiers(i)?;
        Ok((i, ctor(width, unsigned, zerofill)))
    }
}

fn mysql_integer(i: Span) -> DefResult<DataType> {
    let (i, _) = alt((keyword("INTEGER"), keyword("INT")))(i)?;
    let (i, width) = opt_len(i)?;
    let (i, (unsigned, zerofill)) = int_qualifiers(i)?;
    Ok((
        i,
        DataType::Int {
            width,
            unsigned,
            zerofill,
        },
    ))
}

fn mysql_varchar(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("VARCHAR")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = delimited_u16(i)?;
    Ok((i, DataType::Varchar(CharLength::Fixed(len))))
}

fn char_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("CHAR")(i)?;
    let (i, len) = opt_len(i)?;
    Ok((
        i,
        DataType::Char {
            len,
            semantics: None,
        },
    ))
}

fn mysql_decimal(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("DECIMAL")(i)?;
    let (i, precision) = opt_precision(i)?;
    let (i, (unsigned, zerofill)) = int_qualifiers(i)?;
    Ok((
        i,
        DataType::Decimal {
            precision,
            unsigned,
            zerofill,
        },
    ))
}

fn numeric_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("NUMERIC")(i)?;
    let (i, precision) = opt_precision(i)?;
    Ok((i, DataType::Numeric(precision)))
}

fn mysql_float(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("FLOAT")(i)?;
    let (i, precision) = opt_precision(i)?;
    let (i, (unsigned, zerofill)) = int_qualifiers(i)?;
    Ok((
        i,
        DataType::Float {
            precision,
            unsigned,
            zerofill,
        },
    ))
}

fn mysql_double(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("DOUBLE")(i)?;
    let (i, (unsigned, zerofill)) = int_qualifiers(i)?;
    Ok((i, DataType::Double { unsigned, zerofill }))
}

fn time_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("TIME")(i)?;
    let (i, precision) = opt_len(i)?;
    Ok((i, DataType::Time { precision }))
}

fn datetime_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("DATETIME")(i)?;
    let (i, precision) = opt_len(i)?;
    Ok((i, DataType::DateTime { precision }))
}

fn binary_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("BINARY")(i)?;
    let (i, len) = opt_len(i)?;
    Ok((i, DataType::Binary(len)))
}

fn varbinary_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("VARBINARY")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = char_length(i)?;
    Ok((i, DataType::VarBinary(len)))
}

fn bit_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("BIT")(i)?;
    let (i, len) = opt_len(i)?;
    Ok((i, DataType::Bit(len)))
}

fn mysql_type(i: Span) -> DefResult<DataType> {
    alt((
        alt((
            mysql_varchar,
            char_type,
            mysql_int("TINYINT", |w, u, z| DataType::TinyInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            mysql_int("SMALLINT", |w, u, z| DataType::SmallInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            mysql_int("MEDIUMINT", |w, u, z| DataType::MediumInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            mysql_int("BIGINT", |w, u, z| DataType::BigInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            mysql_integer,
            mysql_decimal,
            numeric_type,
            mysql_float,
            mysql_double,
            bit_type,
        )),
        alt((
            value(DataType::Date, keyword("DATE")),
            datetime_type,
            timestamp_type,
            time_type,
            value(DataType::Year, keyword("YEAR")),
            varbinary_type,
            binary_type,
            value(DataType::LongText, keyword("LONGTEXT")),
            value(DataType::MediumText, keyword("MEDIUMTEXT")),
            value(DataType::TinyText, keyword("TINYTEXT")),
            value(DataType::Text, keyword("TEXT")),
            value(DataType::LongBlob, keyword("LONGBLOB")),
            value(DataType::MediumBlob, keyword("MEDIUMBLOB")),
            value(DataType::TinyBlob, keyword("TINYBLOB")),
            value(DataType::Blob, keyword("BLOB")),
            value(DataType::Json, keyword("JSON")),
        )),
    ))(i)
}

// SQL Server

fn nvarchar_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("NVARCHAR")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = char_length(i)?;
    Ok((i, DataType::NVarchar(len)))
}

fn ss_varchar(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("VARCHAR")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = char_length(i)?;
    Ok((i, DataType::Varchar(len)))
}

fn plain_int(
    word: &'static str,
    ctor: fn(Option<u16>, bool, bool) -> DataType,
) -> impl Fn(Span) -> DefResult<DataType> {
    move |i| {
        let (i, _) = keyword(word)(i)?;
        Ok((i, ctor(None, false, false)))
    }
}

fn ss_decimal(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("DECIMAL")(i)?;
    let (i, precision) = opt_precision(i)?;
    Ok((
        i,
        DataType::Decimal {
            precision,
            unsigned: false,
            zerofill: false,
        },
    ))
}

fn ss_float(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("FLOAT")(i)?;
    let (i, mantissa) = opt_len(i)?;
    Ok((
        i,
        DataType::Float {
            precision: mantissa.map(|m| (m, None)),
            unsigned: false,
            zerofill: false,
        },
    ))
}

fn datetime2_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("DATETIME2")(i)?;
    let (i, precision) = opt_len(i)?;
    Ok((i, DataType::DateTime2 { precision }))
}

fn datetimeoffset_type(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("DATETIMEOFFSET")(i)?;
    let (i, precision) = opt_len(i)?;
    Ok((i, DataType::DateTimeOffset { precision }))
}

fn sql_server_type(i: Span) -> DefResult<DataType> {
    alt((
        alt((
            nvarchar_type,
            nchar_type,
            ss_varchar,
            char_type,
            value(DataType::Bit(None), keyword("BIT")),
            plain_int("TINYINT", |w, u, z| DataType::TinyInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            plain_int("SMALLINT", |w, u, z| DataType::SmallInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            plain_int("BIGINT", |w, u, z| DataType::BigInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            plain_int("INT", |w, u, z| DataType::Int {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            ss_decimal,
            numeric_type,
            value(DataType::SmallMoney, keyword("SMALLMONEY")),
            value(DataType::Money, keyword("MONEY")),
        )),
        alt((
            ss_float,
            value(DataType::Real, keyword("REAL")),
            datetimeoffset_type,
            datetime2_type,
            value(DataType::SmallDateTime, keyword("SMALLDATETIME")),
            datetime_type,
            value(DataType::Date, keyword("DATE")),
            time_type,
            varbinary_type,
            binary_type,
        )),
    ))(i)
}

// PostgreSQL

fn pg_interval(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("INTERVAL")(i)?;
    let (i, span) = opt(preceded(
        whitespace1,
        alt((
            value(
                IntervalSpan::YearToMonth,
                tuple((
                    keyword("YEAR"),
                    whitespace1,
                    keyword("TO"),
                    whitespace1,
                    keyword("MONTH"),
                )),
            ),
            value(
                IntervalSpan::DayToSecond,
                tuple((
                    keyword("DAY"),
                    whitespace1,
                    keyword("TO"),
                    whitespace1,
                    keyword("SECOND"),
                )),
            ),
        )),
    ))(i)?;
    let (i, precision) = opt_len(i)?;
    Ok((i, DataType::Interval { span, precision }))
}

fn pg_character_varying(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword2("CHARACTER", "VARYING")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = delimited_u16(i)?;
    Ok((i, DataType::Varchar(CharLength::Fixed(len))))
}

fn pg_character(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("CHARACTER")(i)?;
    let (i, len) = opt_len(i)?;
    Ok((
        i,
        DataType::Char {
            len,
            semantics: None,
        },
    ))
}

fn pg_varchar(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("VARCHAR")(i)?;
    let (i, _) = whitespace0(i)?;
    let (i, len) = delimited_u16(i)?;
    Ok((i, DataType::Varchar(CharLength::Fixed(len))))
}

fn pg_timestamp(i: Span) -> DefResult<DataType> {
    let (i, _) = keyword("TIMESTAMP")(i)?;
    let (i, precision) = opt_len(i)?;
    let (i, with_tz) = opt(preceded(
        whitespace1,
        alt((
            value(
                true,
                tuple((
                    keyword("WITH"),
                    whitespace1,
                    keyword("TIME"),
                    whitespace1,
                    keyword("ZONE"),
                )),
            ),
            value(
                false,
                tuple((
                    keyword("WITHOUT"),
                    whitespace1,
                    keyword("TIME"),
                    whitespace1,
                    keyword("ZONE"),
                )),
            ),
        )),
    ))(i)?;
    Ok((
        i,
        if with_tz == Some(true) {
            DataType::TimestampTz { precision }
        } else {
            DataType::Timestamp { precision }
        },
    ))
}

fn postgres_type(i: Span) -> DefResult<DataType> {
    alt((
        alt((
            pg_interval,
            plain_int("SMALLINT", |w, u, z| DataType::SmallInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            plain_int("BIGINT", |w, u, z| DataType::BigInt {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            plain_int("INTEGER", |w, u, z| DataType::Int {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            plain_int("INT", |w, u, z| DataType::Int {
                width: w,
                unsigned: u,
                zerofill: z,
            }),
            numeric_type,
            ss_decimal,
            value(DataType::Real, keyword("REAL")),
            value(DataType::DoublePrecision, keyword2("DOUBLE", "PRECISION")),
            value(DataType::Money, keyword("MONEY")),
        )),
        alt((
            pg_character_varying,
            pg_character,
            pg_varchar,
            char_type,
            value(DataType::Text, keyword("TEXT")),
            value(DataType::Bytea, keyword("BYTEA")),
            value(DataType::Date, keyword("DATE")),
            pg_timestamp,
            time_type,
        )),
    ))(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DialectDisplay;

    fn parse_type(dialect: Dialect, input: &str) -> DataType {
        let (rest, parsed) = data_type(dialect)(Span::new(input))
            .unwrap_or_else(|e| panic!("failed to parse `{}`: {:?}", input, e));
        assert_eq!(*rest.fragment(), "", "trailing input for `{}`", input);
        parsed
    }

    fn round_trips(dialect: Dialect, input: &str) {
        let parsed = parse_type(dialect, input);
        assert_eq!(parsed.display(dialect).to_string(), input);
    }

    mod oracle {
        use super::*;

        #[test]
        fn round_trip_tokens() {
            for token in [
                "CHAR(10)",
                "CHAR(10 CHAR)",
                "VARCHAR2(30)",
                "VARCHAR2(30 BYTE)",
                "NCHAR(5)",
                "NVARCHAR2(20)",
                "NUMBER",
                "NUMBER(10)",
                "NUMBER(10, 2)",
                "BINARY_FLOAT",
                "BINARY_DOUBLE",
                "DATE",
                "TIMESTAMP",
                "TIMESTAMP(6)",
                "INTERVAL YEAR(2) TO MONTH",
                "INTERVAL DAY(3) TO SECOND(6)",
                "RAW(100)",
                "LONG RAW",
                "LONG",
                "CLOB",
                "NCLOB",
                "BLOB",
                "ROWID",
            ] {
                round_trips(Dialect::Oracle, token);
            }
        }

        #[test]
        fn long_raw_never_parses_as_long() {
            assert_eq!(parse_type(Dialect::Oracle, "LONG RAW"), DataType::LongRaw);
            assert_eq!(parse_type(Dialect::Oracle, "LONG"), DataType::Long);
        }

        #[test]
        fn negative_number_scale() {
            assert_eq!(
                parse_type(Dialect::Oracle, "NUMBER(10, -2)"),
                DataType::Number(Some((10, Some(-2))))
            );
        }

        #[test]
        fn lowercase_tokens() {
            assert_eq!(
                parse_type(Dialect::Oracle, "varchar2(30 byte)"),
                DataType::Varchar2 {
                    len: 30,
                    semantics: Some(LengthSemantics::Byte)
                }
            );
        }

        #[test]
        fn unknown_type_is_rejected() {
            assert!(data_type(Dialect::Oracle)(Span::new("TINYINT")).is_err());
        }
    }

    mod mysql {
        use super::*;

        #[test]
        fn round_trip_tokens() {
            for token in [
                "CHAR(10)",
                "VARCHAR(50)",
                "TINYINT",
                "SMALLINT(5)",
                "MEDIUMINT",
                "INT(11) UNSIGNED",
                "BIGINT UNSIGNED ZEROFILL",
                "DECIMAL(10, 4)",
                "NUMERIC(8)",
                "FLOAT",
                "DOUBLE",
                "BIT",
                "BIT(1)",
                "DATE",
                "TIME",
                "DATETIME(6)",
                "TIMESTAMP",
                "YEAR",
                "BINARY(10)",
                "VARBINARY(100)",
                "TINYTEXT",
                "TEXT",
                "MEDIUMTEXT",
                "LONGTEXT",
                "TINYBLOB",
                "BLOB",
                "MEDIUMBLOB",
                "LONGBLOB",
                "JSON",
            ] {
                round_trips(Dialect::MySQL, token);
            }
        }

        #[test]
        fn integer_aliases_to_int() {
            assert_eq!(
                parse_type(Dialect::MySQL, "INTEGER"),
                DataType::Int {
                    width: None,
                    unsigned: false,
                    zerofill: false
                }
            );
        }

        #[test]
        fn timestamp_not_eaten_by_time() {
            assert_eq!(
                parse_type(Dialect::MySQL, "TIMESTAMP(3)"),
                DataType::Timestamp { precision: Some(3) }
            );
        }

        #[test]
        fn bit_width_is_kept() {
            assert_eq!(parse_type(Dialect::MySQL, "BIT(8)"), DataType::Bit(Some(8)));
            assert_eq!(parse_type(Dialect::MySQL, "BIT"), DataType::Bit(None));
        }
    }

    mod sql_server {
        use super::*;

        #[test]
        fn round_trip_tokens() {
            for token in [
                "CHAR(10)",
                "VARCHAR(50)",
                "VARCHAR(MAX)",
                "NCHAR(10)",
                "NVARCHAR(50)",
                "NVARCHAR(MAX)",
                "BIT",
                "TINYINT",
                "SMALLINT",
                "INT",
                "BIGINT",
                "DECIMAL(18, 2)",
                "NUMERIC(10)",
                "MONEY",
                "SMALLMONEY",
                "REAL",
                "DATE",
                "TIME(7)",
                "DATETIME",
                "DATETIME2(7)",
                "SMALLDATETIME",
                "DATETIMEOFFSET(7)",
                "BINARY(10)",
                "VARBINARY(100)",
                "VARBINARY(MAX)",
            ] {
                round_trips(Dialect::SqlServer, token);
            }
        }

        #[test]
        fn datetime2_never_parses_as_datetime() {
            assert_eq!(
                parse_type(Dialect::SqlServer, "DATETIME2"),
                DataType::DateTime2 { precision: None }
            );
            assert_eq!(
                parse_type(Dialect::SqlServer, "SMALLDATETIME"),
                DataType::SmallDateTime
            );
        }

        #[test]
        fn float_mantissa() {
            assert_eq!(
                parse_type(Dialect::SqlServer, "FLOAT(24)"),
                DataType::Float {
                    precision: Some((24, None)),
                    unsigned: false,
                    zerofill: false
                }
            );
        }
    }

    mod postgres {
        use super::*;

        #[test]
        fn round_trip_tokens() {
            for token in [
                "SMALLINT",
                "INT",
                "BIGINT",
                "NUMERIC(10, 2)",
                "REAL",
                "DOUBLE PRECISION",
                "MONEY",
                "CHAR(10)",
                "VARCHAR(50)",
                "TEXT",
                "BYTEA",
                "DATE",
                "TIME",
                "TIMESTAMP",
                "TIMESTAMP(6)",
                "TIMESTAMP WITH TIME ZONE",
                "INTERVAL",
                "INTERVAL YEAR TO MONTH",
                "INTERVAL DAY TO SECOND(6)",
            ] {
                round_trips(Dialect::PostgreSQL, token);
            }
        }

        #[test]
        fn interval_not_eaten_by_int() {
            assert_eq!(
                parse_type(Dialect::PostgreSQL, "INTERVAL"),
                DataType::Interval {
                    span: None,
                    precision: None
                }
            );
        }

        #[test]
        fn character_varying_is_varchar() {
            assert_eq!(
                parse_type(Dialect::PostgreSQL, "CHARACTER VARYING(50)"),
                DataType::Varchar(CharLength::Fixed(50))
            );
        }

        #[test]
        fn timestamp_without_time_zone() {
            assert_eq!(
                parse_type(Dialect::PostgreSQL, "TIMESTAMP WITHOUT TIME ZONE"),
                DataType::Timestamp { precision: None }
            );
        }
    }
}
