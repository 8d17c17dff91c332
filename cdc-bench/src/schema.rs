//! Schema declaration manager.
//!
//! Loads one definition file per (dialect, table), parses it once, and
//! caches the result in a [`SchemaModel`] the DML engine and workload
//! driver consume. The model also renders and executes the DDL for
//! create/drop/reset, including the constraint fixups some declarations
//! need after `CREATE TABLE`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use database_utils::DatabaseConnection;
use itertools::Itertools;
use table_def::{
    parse_table_definition, ConstraintKind, Dialect, DialectDisplay, ParseError, TableDefinition,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no {dialect} definition file for table {table}: {}", path.display())]
    MissingDefinition {
        table: String,
        dialect: Dialect,
        path: PathBuf,
    },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("table {table} is not part of the schema model")]
    UnknownTable { table: String },
}

/// One table of the model: its parsed definition plus the custom attributes
/// the engines consume. The identifier column is always the definition's
/// first column.
#[derive(Debug, Clone)]
pub struct TableAttributes {
    pub definition: TableDefinition,
}

impl TableAttributes {
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        self.definition.constraint.as_ref().map(|c| c.kind)
    }

    /// Whether the table carries the per-batch separator column.
    pub fn has_separator(&self) -> bool {
        self.definition.column(crate::generate::SEPARATOR_COLUMN).is_some()
    }
}

/// An in-memory schema for one dialect, built once per run and passed
/// around explicitly.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    dialect: Dialect,
    schema: Option<String>,
    tables: Vec<TableAttributes>,
}

impl SchemaModel {
    /// Loads and parses `<defs_dir>/<dialect>/<TABLE>.def` for every
    /// requested table. A requested table with no definition file is a
    /// fatal lookup error naming the table.
    pub fn build(
        dialect: Dialect,
        table_names: &[String],
        defs_dir: &Path,
        schema: Option<String>,
    ) -> Result<Self, SchemaError> {
        let mut tables = Vec::with_capacity(table_names.len());
        for name in table_names {
            let path = defs_dir
                .join(dialect.name())
                .join(format!("{}.def", name.to_uppercase()));
            if !path.exists() {
                return Err(SchemaError::MissingDefinition {
                    table: name.clone(),
                    dialect,
                    path,
                });
            }
            let source = std::fs::read_to_string(&path).map_err(|source| SchemaError::Io {
                path: path.clone(),
                source,
            })?;
            let definition = parse_table_definition(dialect, &source, &path)?;
            tables.push(TableAttributes { definition });
        }
        Ok(SchemaModel {
            dialect,
            schema,
            tables,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableAttributes> {
        self.tables.iter()
    }

    pub fn table(&self, name: &str) -> Result<&TableAttributes, SchemaError> {
        self.tables
            .iter()
            .find(|t| t.definition.name.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| SchemaError::UnknownTable {
                table: name.to_owned(),
            })
    }

    /// Schema-qualified name of a table, rendered for this model's dialect.
    pub fn qualified_name(&self, table: &TableAttributes) -> String {
        table
            .definition
            .name
            .qualified(self.dialect, self.schema.as_deref())
            .to_string()
    }

    pub fn create_table_statement(&self, table: &TableAttributes) -> String {
        let definition = &table.definition;
        let mut entries = definition
            .columns
            .iter()
            .map(|c| c.display(self.dialect).to_string())
            .collect::<Vec<_>>();
        if let Some(constraint) = &definition.constraint {
            entries.push(constraint.create_clause().to_string());
        }
        format!(
            "CREATE TABLE {} (\n  {}\n)",
            self.qualified_name(table),
            entries.iter().join(",\n  ")
        )
    }

    /// Constraint fixups run right after `CREATE TABLE`.
    ///
    /// `NON KEY` tables are created with a physical key (some backends
    /// force one) which is dropped again here. `UNIQUE` tables drop the
    /// primary key first, then add a unique constraint over the same
    /// columns, so a second pass never creates a duplicate constraint.
    pub fn post_create_statements(&self, table: &TableAttributes) -> Vec<String> {
        let Some(constraint) = &table.definition.constraint else {
            return vec![];
        };
        let name = self.qualified_name(table);
        let drop_key = match self.dialect {
            Dialect::MySQL => format!("ALTER TABLE {name} DROP PRIMARY KEY"),
            _ => format!("ALTER TABLE {name} DROP CONSTRAINT {}", constraint.name),
        };
        match constraint.kind {
            ConstraintKind::PrimaryKey => vec![],
            ConstraintKind::NonKey => vec![drop_key],
            ConstraintKind::Unique => vec![
                drop_key,
                format!(
                    "ALTER TABLE {name} ADD CONSTRAINT {} UNIQUE ({})",
                    constraint.name,
                    constraint.columns.iter().join(", ")
                ),
            ],
        }
    }

    pub fn drop_table_statement(&self, table: &TableAttributes) -> String {
        format!("DROP TABLE {}", self.qualified_name(table))
    }

    /// Creates every table in the model, with constraint fixups.
    pub async fn create_all(&self, conn: &mut DatabaseConnection) -> anyhow::Result<()> {
        for table in &self.tables {
            let name = self.qualified_name(table);
            conn.query_drop(self.create_table_statement(table))
                .await
                .with_context(|| format!("creating table {name}"))?;
            for stmt in self.post_create_statements(table) {
                conn.query_drop(stmt)
                    .await
                    .with_context(|| format!("adjusting constraints on {name}"))?;
            }
            info!(table = %name, "created");
        }
        Ok(())
    }

    /// Drops every table in the model.
    pub async fn drop_all(&self, conn: &mut DatabaseConnection) -> anyhow::Result<()> {
        for table in &self.tables {
            let name = self.qualified_name(table);
            conn.query_drop(self.drop_table_statement(table))
                .await
                .with_context(|| format!("dropping table {name}"))?;
            info!(table = %name, "dropped");
        }
        Ok(())
    }

    /// Drops (tolerating missing tables) then recreates every table.
    pub async fn reset(&self, conn: &mut DatabaseConnection) -> anyhow::Result<()> {
        for table in &self.tables {
            let name = self.qualified_name(table);
            if let Err(error) = conn.query_drop(self.drop_table_statement(table)).await {
                warn!(table = %name, %error, "drop failed, assuming the table did not exist");
            }
        }
        self.create_all(conn).await
    }
}
