use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::fmt_util::fmt_with;
use crate::{Dialect, DialectDisplay};

/// A concrete value rendered inline into statement text.
///
/// Statements are executed over the text protocol with literals interpolated
/// directly, so rendering has to produce syntax every target backend accepts
/// for its own dialect. Byte content in particular differs per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Integer(i64),
    Double(f64),
    String(String),
    Blob(Vec<u8>),
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_owned())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<Vec<u8>> for Literal {
    fn from(value: Vec<u8>) -> Self {
        Literal::Blob(value)
    }
}

fn display_string(f: &mut fmt::Formatter, s: &str, dialect: Dialect) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("''")?,
            // The MySQL text protocol treats backslash as an escape
            // character inside string literals.
            '\\' if dialect == Dialect::MySQL => f.write_str("\\\\")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

fn display_bytes(f: &mut fmt::Formatter, bytes: &[u8], dialect: Dialect) -> fmt::Result {
    let encoded = hex::encode_upper(bytes);
    match dialect {
        Dialect::Oracle => write!(f, "HEXTORAW('{}')", encoded),
        Dialect::MySQL => write!(f, "X'{}'", encoded),
        Dialect::SqlServer => write!(f, "0x{}", encoded),
        Dialect::PostgreSQL => write!(f, "E'\\\\x{}'::bytea", encoded),
    }
}

impl DialectDisplay for Literal {
    fn display(&self, dialect: Dialect) -> impl fmt::Display + '_ {
        fmt_with(move |f| match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Double(d) => write!(f, "{}", d),
            Literal::String(s) => display_string(f, s, dialect),
            Literal::Blob(bytes) => display_bytes(f, bytes, dialect),
        })
    }
}

/// Renders a comma separated list of literals, as used in multi-row `VALUES`
/// tuples.
pub fn literal_list(literals: &[Literal], dialect: Dialect) -> impl fmt::Display + '_ {
    fmt_with(move |f| {
        write!(
            f,
            "{}",
            literals.iter().map(|l| l.display(dialect)).join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_escaping() {
        assert_eq!(
            Literal::from("it's").display(Dialect::Oracle).to_string(),
            "'it''s'"
        );
        assert_eq!(
            Literal::from("a\\b").display(Dialect::MySQL).to_string(),
            "'a\\\\b'"
        );
        assert_eq!(
            Literal::from("a\\b")
                .display(Dialect::PostgreSQL)
                .to_string(),
            "'a\\b'"
        );
    }

    #[test]
    fn byte_rendering_per_dialect() {
        let blob = Literal::Blob(vec![0xde, 0xad]);
        assert_eq!(
            blob.display(Dialect::Oracle).to_string(),
            "HEXTORAW('DEAD')"
        );
        assert_eq!(blob.display(Dialect::MySQL).to_string(), "X'DEAD'");
        assert_eq!(blob.display(Dialect::SqlServer).to_string(), "0xDEAD");
        assert_eq!(
            blob.display(Dialect::PostgreSQL).to_string(),
            "E'\\\\xDEAD'::bytea"
        );
    }

    #[test]
    fn null_and_numbers() {
        assert_eq!(Literal::Null.display(Dialect::MySQL).to_string(), "NULL");
        assert_eq!(
            Literal::Integer(-7).display(Dialect::MySQL).to_string(),
            "-7"
        );
        assert_eq!(
            literal_list(&[Literal::Integer(1), Literal::Null], Dialect::MySQL).to_string(),
            "1, NULL"
        );
    }
}
