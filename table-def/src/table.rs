use std::borrow::Borrow;
use std::fmt;

use derive_more::{Display, From, Into};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::fmt_util::fmt_with;
use crate::{DataType, Dialect, DialectDisplay};

/// The name of a table.
#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Clone,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct TableName(String);

impl TableName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the table name schema-qualified when the dialect requires it
    /// and a schema is configured.
    pub fn qualified<'a>(
        &'a self,
        dialect: Dialect,
        schema: Option<&'a str>,
    ) -> impl fmt::Display + 'a {
        fmt_with(move |f| match schema {
            Some(schema) if dialect.qualifies_schema() => write!(f, "{}.{}", schema, self.0),
            _ => write!(f, "{}", self.0),
        })
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        TableName(name.to_owned())
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The name of a column.
#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Clone,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased name, the key used by the column-name data selection
    /// strategy. Column names compare case-insensitively against data files.
    pub fn data_key(&self) -> String {
        self.0.to_uppercase()
    }
}

impl From<&str> for ColumnName {
    fn from(name: &str) -> Self {
        ColumnName(name.to_owned())
    }
}

impl Borrow<str> for ColumnName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One parsed column: name, resolved dialect-native type, nullability.
/// Columns default to nullable unless declared `NOT NULL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: ColumnName,
    pub data_type: DataType,
    pub nullable: bool,
}

impl DialectDisplay for ColumnDefinition {
    fn display(&self, dialect: Dialect) -> impl fmt::Display + '_ {
        fmt_with(move |f| {
            write!(f, "{} {}", self.name, self.data_type.display(dialect))?;
            if !self.nullable {
                write!(f, " NOT NULL")?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    /// Declared without any physical key. Backends that force a key on
    /// creation get the key dropped again right after `CREATE TABLE`.
    NonKey,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::PrimaryKey => f.write_str("PRIMARY KEY"),
            ConstraintKind::Unique => f.write_str("UNIQUE"),
            ConstraintKind::NonKey => f.write_str("NON KEY"),
        }
    }
}

/// The table's single key-constraint declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    pub name: String,
    pub kind: ConstraintKind,
    pub columns: Vec<ColumnName>,
}

impl ConstraintDefinition {
    /// Renders the constraint as a `CREATE TABLE` body entry. `NON KEY`
    /// renders as a primary key here; the declaration manager drops it
    /// after creation.
    pub fn create_clause(&self) -> impl fmt::Display + '_ {
        fmt_with(move |f| {
            write!(
                f,
                "CONSTRAINT {} PRIMARY KEY ({})",
                self.name,
                self.columns.iter().join(", ")
            )
        })
    }
}

/// A fully parsed table definition. The first column is always the
/// identifier column used for ranged DML and random row selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: TableName,
    pub columns: Vec<ColumnDefinition>,
    pub constraint: Option<ConstraintDefinition>,
}

impl TableDefinition {
    pub fn identifier_column(&self) -> &ColumnDefinition {
        &self.columns[0]
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|c| c.name.as_str().eq_ignore_ascii_case(name))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &ColumnName> {
        self.columns.iter().map(|c| &c.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names() {
        let name = TableName::from("STRING_TEST");
        assert_eq!(
            name.qualified(Dialect::PostgreSQL, Some("bench")).to_string(),
            "bench.STRING_TEST"
        );
        assert_eq!(
            name.qualified(Dialect::Oracle, Some("bench")).to_string(),
            "STRING_TEST"
        );
        assert_eq!(name.qualified(Dialect::SqlServer, None).to_string(), "STRING_TEST");
    }

    #[test]
    fn column_rendering() {
        let col = ColumnDefinition {
            name: "COL_NAME".into(),
            data_type: DataType::Varchar(crate::CharLength::Fixed(50)),
            nullable: false,
        };
        assert_eq!(
            col.display(Dialect::MySQL).to_string(),
            "COL_NAME VARCHAR(50) NOT NULL"
        );
    }

    #[test]
    fn case_insensitive_column_lookup() {
        let table = TableDefinition {
            name: "T".into(),
            columns: vec![ColumnDefinition {
                name: "Id".into(),
                data_type: DataType::Number(None),
                nullable: false,
            }],
            constraint: None,
        };
        assert!(table.column("ID").is_some());
        assert!(table.column("missing").is_none());
    }
}
