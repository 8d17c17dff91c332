use thiserror::Error;
use {mysql_async as mysql, tokio_postgres as pgsql};

/// Errors that can occur while connecting to or talking to a database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    MySQL(#[from] mysql::Error),

    #[error(transparent)]
    PostgreSQL(#[from] pgsql::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// A value read back from the database could not be interpreted as an
    /// integer.
    #[error("could not parse `{value}` as an integer scalar")]
    ScalarParse { value: String },
}

/// Errors that can occur while parsing a [`DatabaseURL`](crate::DatabaseURL).
#[derive(Debug, Error)]
pub enum DatabaseURLParseError {
    #[error("database URL must start with mysql:// or postgresql://")]
    InvalidFormat,

    #[error("scheme `{scheme}` is not executable; only mysql and postgresql connections are supported")]
    UnsupportedScheme { scheme: String },

    #[error(transparent)]
    InvalidMySQLUrl(#[from] mysql::UrlError),

    #[error("invalid PostgreSQL URL: {0}")]
    InvalidPostgresUrl(#[from] pgsql::Error),
}
