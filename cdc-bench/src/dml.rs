//! DML execution engine.
//!
//! Runs INSERT/UPDATE/DELETE against a resolved table under commit-unit
//! batching: rows accumulate until the commit unit is reached, the batch is
//! sent, and the enclosing transaction is committed or rolled back per the
//! caller's rollback flag. A separate in-flight cap (`dml_array_size`)
//! force-flushes oversized buffers mid-batch without ending the
//! transaction; only commit-unit boundaries resolve transactions.
//!
//! Statement text is rendered with inline literals, so the exact SQL that
//! ran is what shows up in the debug log.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use database_utils::DatabaseConnection;
use indicatif::ProgressBar;
use itertools::Itertools;
use rand::Rng;
use table_def::{ColumnDefinition, Dialect, DialectDisplay, Literal, TableName};
use tracing::{debug, error, info};

use crate::generate::{insert_columns, update_columns, RowGenerator};
use crate::schema::{SchemaModel, TableAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum DmlKind {
    Insert,
    Update,
    Delete,
}

impl DmlKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DmlKind::Insert => "INSERT",
            DmlKind::Update => "UPDATE",
            DmlKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for DmlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run accumulator: affected rows per (table, DML kind), transaction
/// counters, start/end timestamps. Mutated only by the engine, read once at
/// the end to render the final report.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    rows: BTreeMap<(TableName, DmlKind), u64>,
    pub commits: u64,
    pub rollbacks: u64,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
}

impl Default for ExecutionSummary {
    fn default() -> Self {
        ExecutionSummary {
            rows: BTreeMap::new(),
            commits: 0,
            rollbacks: 0,
            started_at: Local::now(),
            finished_at: None,
        }
    }
}

impl ExecutionSummary {
    pub fn record(&mut self, table: &TableName, kind: DmlKind, rows: u64) {
        *self.rows.entry((table.clone(), kind)).or_default() += rows;
    }

    pub fn rows_for(&self, table: &str, kind: DmlKind) -> u64 {
        self.rows
            .iter()
            .filter(|((t, k), _)| t.as_str() == table && *k == kind)
            .map(|(_, rows)| rows)
            .sum()
    }

    pub fn total_rows(&self) -> u64 {
        self.rows.values().sum()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }
}

impl fmt::Display for ExecutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24} {:<7} {:>10}", "TABLE", "DML", "ROWS")?;
        for ((table, kind), rows) in &self.rows {
            writeln!(f, "{:<24} {:<7} {:>10}", table.as_str(), kind.as_str(), rows)?;
        }
        let end = self.finished_at.unwrap_or_else(Local::now);
        let elapsed = (end - self.started_at).to_std().unwrap_or_default();
        write!(
            f,
            "commits: {}  rollbacks: {}  elapsed: {:.3}s",
            self.commits,
            self.rollbacks,
            elapsed.as_secs_f64()
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DmlOptions {
    /// Rows accumulated before a batch is submitted and its transaction
    /// resolved.
    pub commit_unit: u64,
    /// Cap on rows buffered in memory before a forced mid-batch flush.
    pub dml_array_size: u64,
    /// Roll transactions back instead of committing them.
    pub rollback: bool,
}

impl Default for DmlOptions {
    fn default() -> Self {
        DmlOptions {
            commit_unit: 1000,
            dml_array_size: 10_000,
            rollback: false,
        }
    }
}

/// Phases of one engine run, logged at DEBUG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunPhase {
    Preparing,
    Executing,
    FlushingTail,
    Complete,
}

/// Splits `total` rows into commit-unit sized batches plus one partial
/// tail. `batch_sizes(2500, 1000)` is `[1000, 1000, 500]`.
pub fn batch_sizes(total: u64, commit_unit: u64) -> Vec<u64> {
    let unit = commit_unit.max(1);
    let mut sizes = vec![unit; (total / unit) as usize];
    if total % unit != 0 {
        sizes.push(total % unit);
    }
    sizes
}

fn insert_statement(
    dialect: Dialect,
    table: &str,
    columns: &[&ColumnDefinition],
    rows: &[Vec<Literal>],
) -> String {
    let values = rows
        .iter()
        .map(|row| {
            format!(
                "({})",
                row.iter().map(|v| v.display(dialect)).join(", ")
            )
        })
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.iter().map(|c| c.name.as_str()).join(", "),
        values
    )
}

fn set_clause(dialect: Dialect, columns: &[&ColumnDefinition], values: &[Literal]) -> String {
    columns
        .iter()
        .zip(values)
        .map(|(c, v)| format!("{} = {}", c.name, v.display(dialect)))
        .join(", ")
}

fn update_by_id_statement(
    dialect: Dialect,
    table: &str,
    columns: &[&ColumnDefinition],
    values: &[Literal],
    id_column: &str,
    id: i64,
) -> String {
    format!(
        "UPDATE {} SET {} WHERE {} = {}",
        table,
        set_clause(dialect, columns, values),
        id_column,
        id
    )
}

fn update_where_statement(
    dialect: Dialect,
    table: &str,
    columns: &[&ColumnDefinition],
    values: &[Literal],
    where_clause: Option<&str>,
) -> String {
    let mut stmt = format!("UPDATE {} SET {}", table, set_clause(dialect, columns, values));
    if let Some(clause) = where_clause {
        stmt.push_str(" WHERE ");
        stmt.push_str(clause);
    }
    stmt
}

fn delete_by_id_statement(table: &str, id_column: &str, id: i64) -> String {
    format!("DELETE FROM {table} WHERE {id_column} = {id}")
}

fn delete_in_statement(table: &str, id_column: &str, ids: &[i64]) -> String {
    format!(
        "DELETE FROM {} WHERE {} IN ({})",
        table,
        id_column,
        ids.iter().join(", ")
    )
}

fn delete_where_statement(table: &str, where_clause: Option<&str>) -> String {
    match where_clause {
        Some(clause) => format!("DELETE FROM {table} WHERE {clause}"),
        None => format!("DELETE FROM {table}"),
    }
}

fn max_query(table: &str, column: &str) -> String {
    format!("SELECT MAX({column}) FROM {table}")
}

fn count_query(table: &str, column: &str) -> String {
    format!("SELECT COUNT({column}) FROM {table}")
}

fn ids_in_range_query(table: &str, column: &str, start: i64, end: i64) -> String {
    format!("SELECT {column} FROM {table} WHERE {column} BETWEEN {start} AND {end} ORDER BY {column}")
}

/// Identifiers of `count` randomly selected rows, using the dialect's
/// random-ordering function.
fn random_ids_query(dialect: Dialect, table: &str, column: &str, count: u64) -> String {
    let expr = dialect.random_order_expr();
    match dialect {
        Dialect::SqlServer => {
            format!("SELECT TOP {count} {column} FROM {table} ORDER BY {expr}")
        }
        Dialect::Oracle => format!(
            "SELECT {column} FROM {table} ORDER BY {expr} FETCH FIRST {count} ROWS ONLY"
        ),
        Dialect::MySQL | Dialect::PostgreSQL => {
            format!("SELECT {column} FROM {table} ORDER BY {expr} LIMIT {count}")
        }
    }
}

pub struct DmlEngine<'a, R> {
    conn: &'a mut DatabaseConnection,
    model: &'a SchemaModel,
    generator: RowGenerator<'a>,
    options: DmlOptions,
    summary: ExecutionSummary,
    rng: R,
}

impl<'a, R: Rng> DmlEngine<'a, R> {
    pub fn new(
        conn: &'a mut DatabaseConnection,
        model: &'a SchemaModel,
        generator: RowGenerator<'a>,
        options: DmlOptions,
        rng: R,
    ) -> Self {
        DmlEngine {
            conn,
            model,
            generator,
            options,
            summary: ExecutionSummary::default(),
            rng,
        }
    }

    pub fn summary(&self) -> &ExecutionSummary {
        &self.summary
    }

    pub fn model(&self) -> &'a SchemaModel {
        self.model
    }

    pub fn options(&self) -> DmlOptions {
        self.options
    }

    pub fn into_summary(mut self) -> ExecutionSummary {
        self.summary.finish();
        self.summary
    }

    async fn execute_logged(&mut self, stmt: &str) -> anyhow::Result<u64> {
        debug!(stmt);
        match self.conn.execute(stmt).await {
            Ok(affected) => Ok(affected),
            Err(error) => {
                error!(stmt, %error, "statement failed");
                Err(error.into())
            }
        }
    }

    pub(crate) async fn begin_transaction(&mut self) -> anyhow::Result<()> {
        Ok(self.conn.start_transaction().await?)
    }

    /// Commits or rolls back the open transaction per the rollback flag.
    pub(crate) async fn resolve_transaction(&mut self) -> anyhow::Result<()> {
        if self.options.rollback {
            self.conn.rollback().await?;
            self.summary.rollbacks += 1;
        } else {
            self.conn.commit().await?;
            self.summary.commits += 1;
        }
        Ok(())
    }

    /// One plus the current maximum of `column`, or 1 for an empty table.
    async fn next_value(&mut self, table: &str, column: &str) -> anyhow::Result<i64> {
        let max = self.conn.query_scalar(max_query(table, column)).await?;
        Ok(max.unwrap_or(0) + 1)
    }

    /// Current row count of the table, counted over its identifier column.
    pub async fn row_count(&mut self, table: &TableAttributes) -> anyhow::Result<i64> {
        let name = self.model.qualified_name(table);
        let id = table.definition.identifier_column().name.as_str();
        Ok(self
            .conn
            .query_scalar(count_query(&name, id))
            .await?
            .unwrap_or(0))
    }

    /// Batched INSERT of `total` generated rows.
    ///
    /// `single_row` submits one statement per row; otherwise rows are
    /// buffered into multi-row statements. Either way, transactions resolve
    /// at commit-unit boundaries only.
    pub async fn insert(
        &mut self,
        table_name: &str,
        total: u64,
        single_row: bool,
        requested_columns: Option<&[String]>,
    ) -> anyhow::Result<()> {
        let model = self.model;
        let generator = self.generator;
        let table = model.table(table_name)?;
        let name = model.qualified_name(table);
        let columns = insert_columns(&table.definition, requested_columns)?;
        let id_column = table.definition.identifier_column().name.as_str();

        debug!(phase = ?RunPhase::Preparing, table = %name);
        let mut next_id = self.next_value(&name, id_column).await?;
        let mut separator = if table.has_separator() {
            self.next_value(&name, crate::generate::SEPARATOR_COLUMN)
                .await?
        } else {
            1
        };

        info!(table = %name, total, commit_unit = self.options.commit_unit, "insert run");
        let progress = ProgressBar::new(total);
        let batches = batch_sizes(total, self.options.commit_unit);
        let full_batches = (total / self.options.commit_unit.max(1)) as usize;

        debug!(phase = ?RunPhase::Executing);
        for (index, batch) in batches.iter().enumerate() {
            if index == full_batches {
                debug!(phase = ?RunPhase::FlushingTail, rows = batch);
            }
            self.conn.start_transaction().await?;

            if single_row {
                for _ in 0..*batch {
                    let row = generator.insert_row(
                        &table.definition,
                        &columns,
                        next_id,
                        separator,
                        &mut self.rng,
                    )?;
                    next_id += 1;
                    let stmt = insert_statement(model.dialect(), &name, &columns, &[row]);
                    let affected = self.execute_logged(&stmt).await?;
                    self.summary
                        .record(&table.definition.name, DmlKind::Insert, affected);
                }
            } else {
                let mut pending: Vec<Vec<Literal>> = Vec::new();
                for _ in 0..*batch {
                    let row = generator.insert_row(
                        &table.definition,
                        &columns,
                        next_id,
                        separator,
                        &mut self.rng,
                    )?;
                    next_id += 1;
                    pending.push(row);
                    // Forced flush keeps the transaction open.
                    if pending.len() as u64 >= self.options.dml_array_size {
                        let stmt =
                            insert_statement(model.dialect(), &name, &columns, &pending);
                        let affected = self.execute_logged(&stmt).await?;
                        self.summary
                            .record(&table.definition.name, DmlKind::Insert, affected);
                        pending.clear();
                    }
                }
                if !pending.is_empty() {
                    let stmt = insert_statement(model.dialect(), &name, &columns, &pending);
                    let affected = self.execute_logged(&stmt).await?;
                    self.summary
                        .record(&table.definition.name, DmlKind::Insert, affected);
                }
            }

            self.resolve_transaction().await?;
            separator += 1;
            progress.inc(*batch);
        }

        progress.finish_and_clear();
        debug!(phase = ?RunPhase::Complete);
        Ok(())
    }

    /// Ranged UPDATE over identifiers in `[start, end]`. Matching
    /// identifiers are fetched once, ascending, then each row is updated
    /// with freshly generated values under commit-unit batching.
    pub async fn update_range(
        &mut self,
        table_name: &str,
        start: i64,
        end: i64,
        requested_columns: Option<&[String]>,
    ) -> anyhow::Result<()> {
        let model = self.model;
        let generator = self.generator;
        let table = model.table(table_name)?;
        let name = model.qualified_name(table);
        let columns = update_columns(&table.definition, requested_columns)?;
        let id_column = table.definition.identifier_column().name.as_str();

        debug!(phase = ?RunPhase::Preparing, table = %name);
        let ids = self
            .conn
            .query_int_column(ids_in_range_query(&name, id_column, start, end))
            .await?;
        if ids.is_empty() {
            info!(table = %name, start, end, "no rows in range, nothing to update");
            return Ok(());
        }

        info!(table = %name, rows = ids.len(), "update run");
        debug!(phase = ?RunPhase::Executing);
        for chunk in ids.chunks(self.options.commit_unit.max(1) as usize) {
            self.conn.start_transaction().await?;
            for id in chunk {
                let values = generator.update_values(&columns, &mut self.rng)?;
                let stmt = update_by_id_statement(
                    model.dialect(),
                    &name,
                    &columns,
                    &values,
                    id_column,
                    *id,
                );
                let affected = self.execute_logged(&stmt).await?;
                self.summary
                    .record(&table.definition.name, DmlKind::Update, affected);
            }
            self.resolve_transaction().await?;
        }
        debug!(phase = ?RunPhase::Complete);
        Ok(())
    }

    /// Ranged DELETE over identifiers in `[start, end]`, same discipline as
    /// [`update_range`](Self::update_range).
    pub async fn delete_range(
        &mut self,
        table_name: &str,
        start: i64,
        end: i64,
    ) -> anyhow::Result<()> {
        let model = self.model;
        let table = model.table(table_name)?;
        let name = model.qualified_name(table);
        let id_column = table.definition.identifier_column().name.as_str();

        debug!(phase = ?RunPhase::Preparing, table = %name);
        let ids = self
            .conn
            .query_int_column(ids_in_range_query(&name, id_column, start, end))
            .await?;
        if ids.is_empty() {
            info!(table = %name, start, end, "no rows in range, nothing to delete");
            return Ok(());
        }

        info!(table = %name, rows = ids.len(), "delete run");
        debug!(phase = ?RunPhase::Executing);
        for chunk in ids.chunks(self.options.commit_unit.max(1) as usize) {
            self.conn.start_transaction().await?;
            for id in chunk {
                let stmt = delete_by_id_statement(&name, id_column, *id);
                let affected = self.execute_logged(&stmt).await?;
                self.summary
                    .record(&table.definition.name, DmlKind::Delete, affected);
            }
            self.resolve_transaction().await?;
        }
        debug!(phase = ?RunPhase::Complete);
        Ok(())
    }

    /// One UPDATE statement, optionally constrained by a raw WHERE
    /// fragment. No WHERE applies to the whole table.
    pub async fn update_where(
        &mut self,
        table_name: &str,
        where_clause: Option<&str>,
        requested_columns: Option<&[String]>,
    ) -> anyhow::Result<()> {
        let model = self.model;
        let generator = self.generator;
        let table = model.table(table_name)?;
        let name = model.qualified_name(table);
        let columns = update_columns(&table.definition, requested_columns)?;

        let values = generator.update_values(&columns, &mut self.rng)?;
        let stmt = update_where_statement(model.dialect(), &name, &columns, &values, where_clause);
        self.conn.start_transaction().await?;
        let affected = self.execute_logged(&stmt).await?;
        self.summary
            .record(&table.definition.name, DmlKind::Update, affected);
        self.resolve_transaction().await?;
        info!(table = %name, affected, "update");
        Ok(())
    }

    /// One DELETE statement, optionally constrained by a raw WHERE
    /// fragment.
    pub async fn delete_where(
        &mut self,
        table_name: &str,
        where_clause: Option<&str>,
    ) -> anyhow::Result<()> {
        let model = self.model;
        let table = model.table(table_name)?;
        let name = model.qualified_name(table);

        let stmt = delete_where_statement(&name, where_clause);
        self.conn.start_transaction().await?;
        let affected = self.execute_logged(&stmt).await?;
        self.summary
            .record(&table.definition.name, DmlKind::Delete, affected);
        self.resolve_transaction().await?;
        info!(table = %name, affected, "delete");
        Ok(())
    }

    /// Inserts `count` generated rows without touching transaction state;
    /// the caller owns the enclosing transaction. Used by the workload
    /// driver, which runs everything inside one transaction.
    pub async fn insert_batch(
        &mut self,
        table: &'a TableAttributes,
        count: u64,
    ) -> anyhow::Result<u64> {
        let model = self.model;
        let generator = self.generator;
        let name = model.qualified_name(table);
        let columns = insert_columns(&table.definition, None)?;
        let id_column = table.definition.identifier_column().name.as_str();

        let mut next_id = self.next_value(&name, id_column).await?;
        let separator = if table.has_separator() {
            self.next_value(&name, crate::generate::SEPARATOR_COLUMN)
                .await?
        } else {
            1
        };

        let mut total = 0;
        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(self.options.dml_array_size.max(1));
            let mut rows = Vec::with_capacity(chunk as usize);
            for _ in 0..chunk {
                rows.push(generator.insert_row(
                    &table.definition,
                    &columns,
                    next_id,
                    separator,
                    &mut self.rng,
                )?);
                next_id += 1;
            }
            let stmt = insert_statement(model.dialect(), &name, &columns, &rows);
            total += self.execute_logged(&stmt).await?;
            remaining -= chunk;
        }
        self.summary
            .record(&table.definition.name, DmlKind::Insert, total);
        Ok(total)
    }

    /// Updates `count` randomly selected rows with fresh values, one
    /// statement per matched row. Caller owns the transaction.
    pub async fn update_random(
        &mut self,
        table: &'a TableAttributes,
        count: u64,
    ) -> anyhow::Result<u64> {
        let model = self.model;
        let generator = self.generator;
        let name = model.qualified_name(table);
        let columns = update_columns(&table.definition, None)?;
        let id_column = table.definition.identifier_column().name.as_str();

        let ids = self
            .conn
            .query_int_column(random_ids_query(model.dialect(), &name, id_column, count))
            .await?;
        let mut total = 0;
        for id in ids {
            let values = generator.update_values(&columns, &mut self.rng)?;
            let stmt =
                update_by_id_statement(model.dialect(), &name, &columns, &values, id_column, id);
            total += self.execute_logged(&stmt).await?;
        }
        self.summary
            .record(&table.definition.name, DmlKind::Update, total);
        Ok(total)
    }

    /// Deletes `count` randomly selected rows with one IN-list statement.
    /// Caller owns the transaction.
    pub async fn delete_random(
        &mut self,
        table: &'a TableAttributes,
        count: u64,
    ) -> anyhow::Result<u64> {
        let model = self.model;
        let name = model.qualified_name(table);
        let id_column = table.definition.identifier_column().name.as_str();

        let ids = self
            .conn
            .query_int_column(random_ids_query(model.dialect(), &name, id_column, count))
            .await?;
        if ids.is_empty() {
            return Ok(0);
        }
        let stmt = delete_in_statement(&name, id_column, &ids);
        let total = self.execute_logged(&stmt).await?;
        self.summary
            .record(&table.definition.name, DmlKind::Delete, total);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use table_def::parse_table_definition;

    use super::*;

    #[test]
    fn batch_sizes_full_and_tail() {
        assert_eq!(batch_sizes(2500, 1000), vec![1000, 1000, 500]);
        assert_eq!(batch_sizes(11, 5), vec![5, 5, 1]);
        assert_eq!(batch_sizes(2000, 1000), vec![1000, 1000]);
        assert_eq!(batch_sizes(3, 10), vec![3]);
        assert!(batch_sizes(0, 10).is_empty());
    }

    #[test]
    fn batch_sizes_sum_to_total() {
        for total in [1u64, 7, 99, 1000, 2500] {
            for unit in [1u64, 3, 100, 1000] {
                let sizes = batch_sizes(total, unit);
                assert_eq!(sizes.iter().sum::<u64>(), total);
                assert_eq!(sizes.len() as u64, total.div_ceil(unit));
            }
        }
    }

    fn columns() -> Vec<ColumnDefinition> {
        let table = parse_table_definition(
            Dialect::MySQL,
            "T (
  T_ID INT NOT NULL,
  COL_TEXT VARCHAR(50),
  CONSTRAINT T_PK PRIMARY KEY (T_ID)
);
",
            Path::new("T.def"),
        )
        .unwrap();
        table.columns
    }

    #[test]
    fn multi_row_insert_statement() {
        let columns = columns();
        let refs: Vec<&ColumnDefinition> = columns.iter().collect();
        let rows = vec![
            vec![Literal::Integer(1), Literal::String("it's".to_owned())],
            vec![Literal::Integer(2), Literal::Null],
        ];
        assert_eq!(
            insert_statement(Dialect::MySQL, "T", &refs, &rows),
            "INSERT INTO T (T_ID, COL_TEXT) VALUES (1, 'it''s'), (2, NULL)"
        );
    }

    #[test]
    fn update_statements() {
        let columns = columns();
        let refs: Vec<&ColumnDefinition> = columns[1..].iter().collect();
        let values = vec![Literal::String("fresh".to_owned())];
        assert_eq!(
            update_by_id_statement(Dialect::PostgreSQL, "cdc.T", &refs, &values, "T_ID", 7),
            "UPDATE cdc.T SET COL_TEXT = 'fresh' WHERE T_ID = 7"
        );
        assert_eq!(
            update_where_statement(Dialect::PostgreSQL, "T", &refs, &values, None),
            "UPDATE T SET COL_TEXT = 'fresh'"
        );
        assert_eq!(
            update_where_statement(
                Dialect::PostgreSQL,
                "T",
                &refs,
                &values,
                Some("T_ID < 100")
            ),
            "UPDATE T SET COL_TEXT = 'fresh' WHERE T_ID < 100"
        );
    }

    #[test]
    fn delete_statements() {
        assert_eq!(
            delete_by_id_statement("T", "T_ID", 3),
            "DELETE FROM T WHERE T_ID = 3"
        );
        assert_eq!(
            delete_in_statement("T", "T_ID", &[1, 2, 3]),
            "DELETE FROM T WHERE T_ID IN (1, 2, 3)"
        );
        assert_eq!(delete_where_statement("T", None), "DELETE FROM T");
        assert_eq!(
            delete_where_statement("T", Some("SEPARATE_COL = 4")),
            "DELETE FROM T WHERE SEPARATE_COL = 4"
        );
    }

    #[test]
    fn lookup_queries() {
        assert_eq!(max_query("T", "T_ID"), "SELECT MAX(T_ID) FROM T");
        assert_eq!(count_query("T", "T_ID"), "SELECT COUNT(T_ID) FROM T");
        assert_eq!(
            ids_in_range_query("T", "T_ID", 10, 20),
            "SELECT T_ID FROM T WHERE T_ID BETWEEN 10 AND 20 ORDER BY T_ID"
        );
    }

    #[test]
    fn random_selection_per_dialect() {
        assert_eq!(
            random_ids_query(Dialect::MySQL, "T", "T_ID", 5),
            "SELECT T_ID FROM T ORDER BY RAND() LIMIT 5"
        );
        assert_eq!(
            random_ids_query(Dialect::PostgreSQL, "T", "T_ID", 5),
            "SELECT T_ID FROM T ORDER BY RANDOM() LIMIT 5"
        );
        assert_eq!(
            random_ids_query(Dialect::SqlServer, "T", "T_ID", 5),
            "SELECT TOP 5 T_ID FROM T ORDER BY NEWID()"
        );
        assert_eq!(
            random_ids_query(Dialect::Oracle, "T", "T_ID", 5),
            "SELECT T_ID FROM T ORDER BY DBMS_RANDOM.VALUE FETCH FIRST 5 ROWS ONLY"
        );
    }

    #[test]
    fn summary_accumulates_per_table_and_kind() {
        let mut summary = ExecutionSummary::default();
        let table = TableName::from("STRING_TEST");
        summary.record(&table, DmlKind::Insert, 1000);
        summary.record(&table, DmlKind::Insert, 1500);
        summary.record(&table, DmlKind::Delete, 11);
        summary.commits += 3;

        assert_eq!(summary.rows_for("STRING_TEST", DmlKind::Insert), 2500);
        assert_eq!(summary.rows_for("STRING_TEST", DmlKind::Delete), 11);
        assert_eq!(summary.total_rows(), 2511);

        let rendered = summary.to_string();
        assert!(rendered.contains("INSERT"));
        assert!(rendered.contains("2500"));
        assert!(rendered.contains("commits: 3"));
    }
}
