use std::str::FromStr;
use std::time::Duration;

use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, RuntimeErr,
    SqlxSqliteConnector, Statement,
};
use tracing::info;

use crate::config::db::{is_sqlite_memory, DbKind};
use crate::error::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool for `database_url`. Does NOT run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let kind = DbKind::from_url(database_url)?;
    if kind == DbKind::Sqlite && is_sqlite_memory(database_url) {
        return connect_sqlite_memory(database_url).await;
    }

    let mut opts = ConnectOptions::new(database_url.to_owned());
    opts.max_connections(kind.max_connections(database_url))
        .min_connections(1)
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Pool settings for an in-memory SQLite database: one connection that is
/// never reaped, since closing it drops every table.
fn sqlite_memory_pool() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(CONNECT_TIMEOUT)
        .max_lifetime(None)
        .idle_timeout(None)
}

// `sea_orm::ConnectOptions` cannot clear the sqlx lifetime defaults, so the
// pool is built here and handed to SeaORM.
async fn connect_sqlite_memory(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn_err = |e: sea_orm::sqlx::Error| DbErr::Conn(RuntimeErr::SqlxError(e));

    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(conn_err)?
        .disable_statement_logging();
    let pool = sqlite_memory_pool()
        .connect_with(opts)
        .await
        .map_err(conn_err)?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Single startup entrypoint: connect, apply pending migrations, ping.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;

    migration::migrate_up(&conn).await?;

    conn.query_one(Statement::from_string(
        conn.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await?;

    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}
