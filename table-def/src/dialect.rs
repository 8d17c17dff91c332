use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Renders a value as DDL or statement text for a specific target [`Dialect`].
///
/// Most of the type model is dialect-independent once parsed, but rendering
/// is not: byte literals, length-unit qualifiers, and a handful of synthetic
/// types emit different syntax per DBMS family.
pub trait DialectDisplay {
    fn display(&self, dialect: Dialect) -> impl fmt::Display + '_;
}

/// The target DBMS family of a table definition.
///
/// Each dialect carries its own ordered type-token grammar and its own
/// rendering rules for literals and synthetic types.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Dialect {
    Oracle,

    MySQL,

    /// The SQL Server family (schema-qualified table names when a schema is
    /// configured).
    #[value(alias("mssql"))]
    SqlServer,

    /// The PostgreSQL family (schema-qualified table names when a schema is
    /// configured).
    #[value(alias("postgres"))]
    PostgreSQL,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("Unknown dialect `{0}`, expected one of oracle, mysql, sqlserver or postgresql")]
pub struct UnknownDialect(String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oracle" => Ok(Dialect::Oracle),
            "mysql" => Ok(Dialect::MySQL),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSQL),
            _ => Err(UnknownDialect(s.to_owned())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: &'static [Self] = &[
        Self::Oracle,
        Self::MySQL,
        Self::SqlServer,
        Self::PostgreSQL,
    ];

    /// Canonical lowercase name, also the per-dialect definition directory
    /// name on disk.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Oracle => "oracle",
            Dialect::MySQL => "mysql",
            Dialect::SqlServer => "sqlserver",
            Dialect::PostgreSQL => "postgresql",
        }
    }

    /// The expression used in `ORDER BY` to shuffle rows server-side when
    /// the workload driver selects random victims.
    pub fn random_order_expr(self) -> &'static str {
        match self {
            Dialect::Oracle => "DBMS_RANDOM.VALUE",
            Dialect::MySQL => "RAND()",
            Dialect::SqlServer => "NEWID()",
            Dialect::PostgreSQL => "RANDOM()",
        }
    }

    /// Whether table names are schema-qualified when a schema is configured.
    pub fn qualifies_schema(self) -> bool {
        matches!(self, Dialect::SqlServer | Dialect::PostgreSQL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_aliases() {
        assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSQL);
        assert_eq!("Oracle".parse::<Dialect>().unwrap(), Dialect::Oracle);
        assert!("db2".parse::<Dialect>().is_err());
    }

    #[test]
    fn name_round_trips() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), *dialect);
        }
    }
}
