use mysql_async::prelude::Queryable;
use tracing::trace;
use {mysql_async as mysql, tokio_postgres as pgsql};

use crate::error::DatabaseError;
use crate::DatabaseType;

/// An enum wrapper around either a MySQL or PostgreSQL connection.
///
/// All statements go over the wire as plain text; values are rendered into
/// the statement rather than bound as parameters, so the same statement
/// strings can be logged, replayed by hand, or handed to a DBA unchanged.
pub enum DatabaseConnection {
    /// A MySQL database connection.
    MySQL(mysql::Conn),
    /// A PostgreSQL database connection, along with the task driving the
    /// underlying connection.
    PostgreSQL(
        pgsql::Client,
        tokio::task::JoinHandle<Result<(), DatabaseError>>,
    ),
}

/// The statement that opens an explicit transaction on a connection of the
/// given type.
pub fn begin_statement(database_type: DatabaseType) -> &'static str {
    match database_type {
        DatabaseType::MySQL => "START TRANSACTION",
        DatabaseType::PostgreSQL => "BEGIN",
    }
}

impl DatabaseConnection {
    /// Returns the type of the underlying connection.
    pub fn database_type(&self) -> DatabaseType {
        match self {
            DatabaseConnection::MySQL(_) => DatabaseType::MySQL,
            DatabaseConnection::PostgreSQL(..) => DatabaseType::PostgreSQL,
        }
    }

    /// Executes a statement, discarding any results it may produce.
    pub async fn query_drop<Q>(&mut self, stmt: Q) -> Result<(), DatabaseError>
    where
        Q: AsRef<str> + Send + Sync,
    {
        trace!(stmt = stmt.as_ref());
        match self {
            DatabaseConnection::MySQL(conn) => Ok(conn.query_drop(stmt.as_ref()).await?),
            DatabaseConnection::PostgreSQL(client, _jh) => {
                client.simple_query(stmt.as_ref()).await?;
                Ok(())
            }
        }
    }

    /// Executes a DML statement and returns the number of rows it affected.
    pub async fn execute<Q>(&mut self, stmt: Q) -> Result<u64, DatabaseError>
    where
        Q: AsRef<str> + Send + Sync,
    {
        trace!(stmt = stmt.as_ref());
        match self {
            DatabaseConnection::MySQL(conn) => {
                let result = conn.query_iter(stmt.as_ref()).await?;
                let affected = result.affected_rows();
                result.drop_result().await?;
                Ok(affected)
            }
            DatabaseConnection::PostgreSQL(client, _jh) => {
                Ok(client.execute(stmt.as_ref(), &[]).await?)
            }
        }
    }

    /// Runs a query expected to produce at most one row with a single
    /// integer column, such as `SELECT MAX(..)` or `SELECT COUNT(*)`.
    ///
    /// Returns `None` when the query produces no rows or a SQL NULL, which
    /// is what `MAX` over an empty table yields.
    pub async fn query_scalar<Q>(&mut self, query: Q) -> Result<Option<i64>, DatabaseError>
    where
        Q: AsRef<str> + Send + Sync,
    {
        trace!(query = query.as_ref());
        match self {
            DatabaseConnection::MySQL(conn) => {
                Ok(conn.query_first::<Option<i64>, _>(query.as_ref()).await?.flatten())
            }
            DatabaseConnection::PostgreSQL(client, _jh) => {
                let messages = client.simple_query(query.as_ref()).await?;
                for message in messages {
                    if let pgsql::SimpleQueryMessage::Row(row) = message {
                        return match row.try_get(0)? {
                            Some(text) => Ok(Some(parse_scalar(text)?)),
                            None => Ok(None),
                        };
                    }
                }
                Ok(None)
            }
        }
    }

    /// Runs a query whose first column is an integer and collects that
    /// column from every row, in the order the database returned them.
    pub async fn query_int_column<Q>(&mut self, query: Q) -> Result<Vec<i64>, DatabaseError>
    where
        Q: AsRef<str> + Send + Sync,
    {
        trace!(query = query.as_ref());
        match self {
            DatabaseConnection::MySQL(conn) => Ok(conn.query::<i64, _>(query.as_ref()).await?),
            DatabaseConnection::PostgreSQL(client, _jh) => {
                let messages = client.simple_query(query.as_ref()).await?;
                let mut out = Vec::new();
                for message in messages {
                    if let pgsql::SimpleQueryMessage::Row(row) = message {
                        match row.try_get(0)? {
                            Some(text) => out.push(parse_scalar(text)?),
                            None => continue,
                        }
                    }
                }
                Ok(out)
            }
        }
    }

    /// Opens an explicit transaction on this connection.
    ///
    /// The transaction stays open across an arbitrary number of
    /// [`execute`](Self::execute) calls until [`commit`](Self::commit) or
    /// [`rollback`](Self::rollback) ends it.
    pub async fn start_transaction(&mut self) -> Result<(), DatabaseError> {
        let stmt = begin_statement(self.database_type());
        self.query_drop(stmt).await
    }

    /// Commits the transaction currently open on this connection.
    pub async fn commit(&mut self) -> Result<(), DatabaseError> {
        self.query_drop("COMMIT").await
    }

    /// Rolls back the transaction currently open on this connection.
    pub async fn rollback(&mut self) -> Result<(), DatabaseError> {
        self.query_drop("ROLLBACK").await
    }
}

fn parse_scalar(text: &str) -> Result<i64, DatabaseError> {
    text.parse()
        .map_err(|_| DatabaseError::ScalarParse {
            value: text.to_owned(),
        })
}
