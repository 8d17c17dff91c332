use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fmt_util::fmt_with;
use crate::{Dialect, DialectDisplay};

/// Length unit qualifier for Oracle `CHAR` / `VARCHAR2` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthSemantics {
    Byte,
    Char,
}

impl fmt::Display for LengthSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthSemantics::Byte => f.write_str("BYTE"),
            LengthSemantics::Char => f.write_str("CHAR"),
        }
    }
}

/// Declared length of a variable-length character or binary type. `MAX`
/// (SQL Server) marks unbounded length and routes value generation toward
/// large-object sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharLength {
    Fixed(u16),
    Max,
}

impl fmt::Display for CharLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharLength::Fixed(n) => write!(f, "{}", n),
            CharLength::Max => f.write_str("MAX"),
        }
    }
}

/// Field span of an interval type, deciding which validation pattern sample
/// values must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalSpan {
    YearToMonth,
    DayToSecond,
}

/// A dialect-native column type, produced by the per-dialect type grammar.
///
/// One closed enum covers all four dialect families; each dialect's parser
/// only ever produces the variants its grammar names. Synthetic cases that
/// no driver type natively expresses (Oracle length-unit qualifiers,
/// `INTERVAL YEAR TO MONTH`, `LONG RAW`) are ordinary variants whose
/// rendering match arm emits the DBMS-specific syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    // Character
    Char {
        len: Option<u16>,
        semantics: Option<LengthSemantics>,
    },
    NChar(Option<u16>),
    Varchar(CharLength),
    Varchar2 {
        len: u16,
        semantics: Option<LengthSemantics>,
    },
    NVarchar(CharLength),
    NVarchar2(u16),
    TinyText,
    Text,
    MediumText,
    LongText,
    Clob,
    NClob,
    Long,

    // Numeric
    TinyInt {
        width: Option<u16>,
        unsigned: bool,
        zerofill: bool,
    },
    SmallInt {
        width: Option<u16>,
        unsigned: bool,
        zerofill: bool,
    },
    MediumInt {
        width: Option<u16>,
        unsigned: bool,
        zerofill: bool,
    },
    Int {
        width: Option<u16>,
        unsigned: bool,
        zerofill: bool,
    },
    BigInt {
        width: Option<u16>,
        unsigned: bool,
        zerofill: bool,
    },
    Decimal {
        precision: Option<(u16, Option<u16>)>,
        unsigned: bool,
        zerofill: bool,
    },
    Numeric(Option<(u16, Option<u16>)>),
    /// Oracle `NUMBER`; scale may be negative.
    Number(Option<(u16, Option<i8>)>),
    Float {
        precision: Option<(u16, Option<u16>)>,
        unsigned: bool,
        zerofill: bool,
    },
    Double {
        unsigned: bool,
        zerofill: bool,
    },
    DoublePrecision,
    Real,
    BinaryFloat,
    BinaryDouble,
    Money,
    SmallMoney,
    Bit(Option<u16>),
    Year,

    // Date and time
    Date,
    Time {
        precision: Option<u16>,
    },
    DateTime {
        precision: Option<u16>,
    },
    DateTime2 {
        precision: Option<u16>,
    },
    SmallDateTime,
    DateTimeOffset {
        precision: Option<u16>,
    },
    Timestamp {
        precision: Option<u16>,
    },
    TimestampTz {
        precision: Option<u16>,
    },

    // Intervals
    IntervalYearToMonth {
        precision: Option<u16>,
    },
    IntervalDayToSecond {
        day_precision: Option<u16>,
        fractional: Option<u16>,
    },
    /// PostgreSQL `INTERVAL`, optionally restricted to a field span.
    Interval {
        span: Option<IntervalSpan>,
        precision: Option<u16>,
    },

    // Binary
    Raw(u16),
    LongRaw,
    Binary(Option<u16>),
    VarBinary(CharLength),
    Bytea,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,

    // Misc
    Json,
    Rowid,
}

/// The candidate-pool key a column resolves to under the type-group data
/// selection strategy. Character types of one width class share a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleGroup {
    Char,
    Varchar,
    TextLob,
    Integer,
    Decimal,
    Float,
    Bit,
    Date,
    Time,
    DateTime,
    Timestamp,
    IntervalYearToMonth,
    IntervalDayToSecond,
    Binary,
    BinaryLob,
    Json,
    Rowid,
}

/// Which sampling operation a group's values are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Scalar,
    Binary,
    Lob,
    Interval(IntervalSpan),
}

impl SampleGroup {
    /// Upper-cased key under which the group's candidate pool is looked up
    /// in a sample-data file.
    pub fn key(self) -> &'static str {
        match self {
            SampleGroup::Char => "CHAR",
            SampleGroup::Varchar => "VARCHAR",
            SampleGroup::TextLob => "TEXT",
            SampleGroup::Integer => "INTEGER",
            SampleGroup::Decimal => "DECIMAL",
            SampleGroup::Float => "FLOAT",
            SampleGroup::Bit => "BIT",
            SampleGroup::Date => "DATE",
            SampleGroup::Time => "TIME",
            SampleGroup::DateTime => "DATETIME",
            SampleGroup::Timestamp => "TIMESTAMP",
            SampleGroup::IntervalYearToMonth => "INTERVAL_YM",
            SampleGroup::IntervalDayToSecond => "INTERVAL_DS",
            SampleGroup::Binary => "BINARY",
            SampleGroup::BinaryLob => "LOB",
            SampleGroup::Json => "JSON",
            SampleGroup::Rowid => "ROWID",
        }
    }

    pub fn kind(self) -> SampleKind {
        match self {
            SampleGroup::Binary => SampleKind::Binary,
            SampleGroup::TextLob | SampleGroup::BinaryLob => SampleKind::Lob,
            SampleGroup::IntervalYearToMonth => SampleKind::Interval(IntervalSpan::YearToMonth),
            SampleGroup::IntervalDayToSecond => SampleKind::Interval(IntervalSpan::DayToSecond),
            _ => SampleKind::Scalar,
        }
    }
}

impl DataType {
    /// Maps the type to its sample group. `MAX`-length markers and the LOB
    /// families route to large-object sampling rather than scalar sampling.
    pub fn sample_group(&self) -> SampleGroup {
        match *self {
            DataType::Varchar(CharLength::Max) | DataType::NVarchar(CharLength::Max) => {
                SampleGroup::TextLob
            }
            DataType::Char { .. } | DataType::NChar(_) => SampleGroup::Char,
            DataType::Varchar(_)
            | DataType::Varchar2 { .. }
            | DataType::NVarchar(_)
            | DataType::NVarchar2(_)
            | DataType::TinyText => SampleGroup::Varchar,
            DataType::Text
            | DataType::MediumText
            | DataType::LongText
            | DataType::Clob
            | DataType::NClob
            | DataType::Long => SampleGroup::TextLob,
            DataType::TinyInt { .. }
            | DataType::SmallInt { .. }
            | DataType::MediumInt { .. }
            | DataType::Int { .. }
            | DataType::BigInt { .. }
            | DataType::Year => SampleGroup::Integer,
            DataType::Decimal { .. }
            | DataType::Numeric(_)
            | DataType::Number(_)
            | DataType::Money
            | DataType::SmallMoney => SampleGroup::Decimal,
            DataType::Float { .. }
            | DataType::Double { .. }
            | DataType::DoublePrecision
            | DataType::Real
            | DataType::BinaryFloat
            | DataType::BinaryDouble => SampleGroup::Float,
            DataType::Bit(_) => SampleGroup::Bit,
            DataType::Date => SampleGroup::Date,
            DataType::Time { .. } => SampleGroup::Time,
            DataType::DateTime { .. }
            | DataType::DateTime2 { .. }
            | DataType::SmallDateTime => SampleGroup::DateTime,
            DataType::DateTimeOffset { .. }
            | DataType::Timestamp { .. }
            | DataType::TimestampTz { .. } => SampleGroup::Timestamp,
            DataType::IntervalYearToMonth { .. }
            | DataType::Interval {
                span: Some(IntervalSpan::YearToMonth),
                ..
            } => SampleGroup::IntervalYearToMonth,
            DataType::IntervalDayToSecond { .. } | DataType::Interval { .. } => {
                SampleGroup::IntervalDayToSecond
            }
            DataType::VarBinary(CharLength::Max) => SampleGroup::BinaryLob,
            DataType::Raw(_) | DataType::Binary(_) | DataType::VarBinary(_) | DataType::Bytea => {
                SampleGroup::Binary
            }
            DataType::LongRaw
            | DataType::TinyBlob
            | DataType::Blob
            | DataType::MediumBlob
            | DataType::LongBlob => SampleGroup::BinaryLob,
            DataType::Json => SampleGroup::Json,
            DataType::Rowid => SampleGroup::Rowid,
        }
    }
}

impl DialectDisplay for DataType {
    fn display(&self, _dialect: Dialect) -> impl fmt::Display + '_ {
        fmt_with(move |f| {
            let write_with_len = |f: &mut fmt::Formatter, name, len: Option<u16>| {
                write!(f, "{}", name)?;
                if let Some(len) = len {
                    write!(f, "({})", len)?;
                }
                Ok(())
            };
            let write_int = |f: &mut fmt::Formatter, name, width, unsigned, zerofill| {
                write_with_len(f, name, width)?;
                if unsigned {
                    write!(f, " UNSIGNED")?;
                }
                if zerofill {
                    write!(f, " ZEROFILL")?;
                }
                Ok(())
            };
            let write_precision =
                |f: &mut fmt::Formatter, name, precision: Option<(u16, Option<u16>)>| {
                    write!(f, "{}", name)?;
                    match precision {
                        Some((p, Some(s))) => write!(f, "({}, {})", p, s),
                        Some((p, None)) => write!(f, "({})", p),
                        None => Ok(()),
                    }
                };

            match *self {
                DataType::Char { len, semantics } => match (len, semantics) {
                    (Some(len), Some(unit)) => write!(f, "CHAR({} {})", len, unit),
                    _ => write_with_len(f, "CHAR", len),
                },
                DataType::NChar(len) => write_with_len(f, "NCHAR", len),
                DataType::Varchar(len) => write!(f, "VARCHAR({})", len),
                DataType::Varchar2 { len, semantics } => match semantics {
                    Some(unit) => write!(f, "VARCHAR2({} {})", len, unit),
                    None => write!(f, "VARCHAR2({})", len),
                },
                DataType::NVarchar(len) => write!(f, "NVARCHAR({})", len),
                DataType::NVarchar2(len) => write!(f, "NVARCHAR2({})", len),
                DataType::TinyText => write!(f, "TINYTEXT"),
                DataType::Text => write!(f, "TEXT"),
                DataType::MediumText => write!(f, "MEDIUMTEXT"),
                DataType::LongText => write!(f, "LONGTEXT"),
                DataType::Clob => write!(f, "CLOB"),
                DataType::NClob => write!(f, "NCLOB"),
                DataType::Long => write!(f, "LONG"),
                DataType::TinyInt {
                    width,
                    unsigned,
                    zerofill,
                } => write_int(f, "TINYINT", width, unsigned, zerofill),
                DataType::SmallInt {
                    width,
                    unsigned,
                    zerofill,
                } => write_int(f, "SMALLINT", width, unsigned, zerofill),
                DataType::MediumInt {
                    width,
                    unsigned,
                    zerofill,
                } => write_int(f, "MEDIUMINT", width, unsigned, zerofill),
                DataType::Int {
                    width,
                    unsigned,
                    zerofill,
                } => write_int(f, "INT", width, unsigned, zerofill),
                DataType::BigInt {
                    width,
                    unsigned,
                    zerofill,
                } => write_int(f, "BIGINT", width, unsigned, zerofill),
                DataType::Decimal {
                    precision,
                    unsigned,
                    zerofill,
                } => {
                    write_precision(f, "DECIMAL", precision)?;
                    if unsigned {
                        write!(f, " UNSIGNED")?;
                    }
                    if zerofill {
                        write!(f, " ZEROFILL")?;
                    }
                    Ok(())
                }
                DataType::Numeric(precision) => write_precision(f, "NUMERIC", precision),
                DataType::Number(precision) => {
                    write!(f, "NUMBER")?;
                    match precision {
                        Some((p, Some(s))) => write!(f, "({}, {})", p, s),
                        Some((p, None)) => write!(f, "({})", p),
                        None => Ok(()),
                    }
                }
                DataType::Float {
                    precision,
                    unsigned,
                    zerofill,
                } => {
                    write_precision(f, "FLOAT", precision)?;
                    if unsigned {
                        write!(f, " UNSIGNED")?;
                    }
                    if zerofill {
                        write!(f, " ZEROFILL")?;
                    }
                    Ok(())
                }
                DataType::Double { unsigned, zerofill } => {
                    write_int(f, "DOUBLE", None, unsigned, zerofill)
                }
                DataType::DoublePrecision => write!(f, "DOUBLE PRECISION"),
                DataType::Real => write!(f, "REAL"),
                DataType::BinaryFloat => write!(f, "BINARY_FLOAT"),
                DataType::BinaryDouble => write!(f, "BINARY_DOUBLE"),
                DataType::Money => write!(f, "MONEY"),
                DataType::SmallMoney => write!(f, "SMALLMONEY"),
                DataType::Bit(len) => write_with_len(f, "BIT", len),
                DataType::Year => write!(f, "YEAR"),
                DataType::Date => write!(f, "DATE"),
                DataType::Time { precision } => write_with_len(f, "TIME", precision),
                DataType::DateTime { precision } => write_with_len(f, "DATETIME", precision),
                DataType::DateTime2 { precision } => write_with_len(f, "DATETIME2", precision),
                DataType::SmallDateTime => write!(f, "SMALLDATETIME"),
                DataType::DateTimeOffset { precision } => {
                    write_with_len(f, "DATETIMEOFFSET", precision)
                }
                DataType::Timestamp { precision } => write_with_len(f, "TIMESTAMP", precision),
                DataType::TimestampTz { precision } => {
                    write_with_len(f, "TIMESTAMP", precision)?;
                    write!(f, " WITH TIME ZONE")
                }
                DataType::IntervalYearToMonth { precision } => {
                    write_with_len(f, "INTERVAL YEAR", precision)?;
                    write!(f, " TO MONTH")
                }
                DataType::IntervalDayToSecond {
                    day_precision,
                    fractional,
                } => {
                    write_with_len(f, "INTERVAL DAY", day_precision)?;
                    write!(f, " TO SECOND")?;
                    if let Some(fractional) = fractional {
                        write!(f, "({})", fractional)?;
                    }
                    Ok(())
                }
                DataType::Interval { span, precision } => {
                    write!(f, "INTERVAL")?;
                    match span {
                        Some(IntervalSpan::YearToMonth) => write!(f, " YEAR TO MONTH")?,
                        Some(IntervalSpan::DayToSecond) => write!(f, " DAY TO SECOND")?,
                        None => {}
                    }
                    if let Some(p) = precision {
                        write!(f, "({})", p)?;
                    }
                    Ok(())
                }
                DataType::Raw(len) => write!(f, "RAW({})", len),
                DataType::LongRaw => write!(f, "LONG RAW"),
                DataType::Binary(len) => write_with_len(f, "BINARY", len),
                DataType::VarBinary(len) => write!(f, "VARBINARY({})", len),
                DataType::Bytea => write!(f, "BYTEA"),
                DataType::TinyBlob => write!(f, "TINYBLOB"),
                DataType::Blob => write!(f, "BLOB"),
                DataType::MediumBlob => write!(f, "MEDIUMBLOB"),
                DataType::LongBlob => write!(f, "LONGBLOB"),
                DataType::Json => write!(f, "JSON"),
                DataType::Rowid => write!(f, "ROWID"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(ty: DataType, dialect: Dialect) -> String {
        ty.display(dialect).to_string()
    }

    #[test]
    fn synthetic_oracle_rendering() {
        assert_eq!(
            rendered(
                DataType::Varchar2 {
                    len: 30,
                    semantics: Some(LengthSemantics::Byte)
                },
                Dialect::Oracle
            ),
            "VARCHAR2(30 BYTE)"
        );
        assert_eq!(rendered(DataType::LongRaw, Dialect::Oracle), "LONG RAW");
        assert_eq!(
            rendered(
                DataType::IntervalYearToMonth { precision: Some(2) },
                Dialect::Oracle
            ),
            "INTERVAL YEAR(2) TO MONTH"
        );
        assert_eq!(
            rendered(
                DataType::IntervalDayToSecond {
                    day_precision: None,
                    fractional: Some(6)
                },
                Dialect::Oracle
            ),
            "INTERVAL DAY TO SECOND(6)"
        );
    }

    #[test]
    fn mysql_int_qualifiers() {
        assert_eq!(
            rendered(
                DataType::Int {
                    width: Some(11),
                    unsigned: true,
                    zerofill: false
                },
                Dialect::MySQL
            ),
            "INT(11) UNSIGNED"
        );
    }

    #[test]
    fn max_length_routes_to_lob() {
        assert_eq!(
            DataType::Varchar(CharLength::Max).sample_group(),
            SampleGroup::TextLob
        );
        assert_eq!(
            DataType::VarBinary(CharLength::Max).sample_group(),
            SampleGroup::BinaryLob
        );
        assert_eq!(
            DataType::VarBinary(CharLength::Fixed(100)).sample_group(),
            SampleGroup::Binary
        );
    }

    #[test]
    fn interval_groups_carry_span() {
        assert_eq!(
            DataType::IntervalYearToMonth { precision: None }
                .sample_group()
                .kind(),
            SampleKind::Interval(IntervalSpan::YearToMonth)
        );
        assert_eq!(
            DataType::Interval {
                span: None,
                precision: None
            }
            .sample_group()
            .kind(),
            SampleKind::Interval(IntervalSpan::DayToSecond)
        );
    }
}
