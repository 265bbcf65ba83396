//! Connection pool and schema setup for the SQLite catalog store.
//!
//! [`open_catalog`] is the single entry point used by the binary and the
//! integration tests: it builds the pool and brings the schema up to date.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{error, info};

use crate::repository::errors::{RepositoryError, RepositoryResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pragmas applied to every connection the pool hands out.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Enable write-ahead logging.
    pub enable_wal: bool,
    /// Product rows must reference existing brands and types.
    pub enable_foreign_keys: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionOptions {
    fn pragmas(&self) -> String {
        let mut sql = String::new();
        if let Some(timeout) = self.busy_timeout {
            sql.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        if self.enable_wal {
            sql.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if self.enable_foreign_keys {
            sql.push_str("PRAGMA foreign_keys = ON;");
        }
        sql
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.pragmas())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a pool over `database_url` with the given connection options.
pub fn establish_connection_pool(
    database_url: &str,
    options: ConnectionOptions,
) -> RepositoryResult<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(options))
        .build(manager)
        .map_err(|e| {
            error!("Failed to open catalog database {database_url}: {e}");
            RepositoryError::from(e)
        })
}

/// Retrieve a connection from the pool.
pub fn get_connection(pool: &DbPool) -> RepositoryResult<DbConnection> {
    pool.get().map_err(|e| {
        error!("Failed to get connection from pool: {e}");
        RepositoryError::from(e)
    })
}

/// Apply every embedded migration that has not run yet.
pub fn run_migrations(pool: &DbPool) -> RepositoryResult<usize> {
    let mut conn = get_connection(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::DatabaseError(format!("Migration failed: {e}")))?;
    if !applied.is_empty() {
        info!("Applied {} catalog migration(s)", applied.len());
    }
    Ok(applied.len())
}

/// Opens the catalog at `database_url` with default options and migrates it.
pub fn open_catalog(database_url: &str) -> RepositoryResult<DbPool> {
    let pool = establish_connection_pool(database_url, ConnectionOptions::default())?;
    run_migrations(&pool)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_timeout_is_set_before_switching_journal_mode() {
        let sql = ConnectionOptions::default().pragmas();
        let timeout = sql.find("busy_timeout = 30000").unwrap();
        let wal = sql.find("journal_mode = WAL").unwrap();
        assert!(timeout < wal);
        assert!(sql.contains("foreign_keys = ON"));
    }

    #[test]
    fn disabled_options_emit_no_pragmas() {
        let options = ConnectionOptions {
            enable_wal: false,
            enable_foreign_keys: false,
            busy_timeout: None,
        };
        assert!(options.pragmas().is_empty());
    }
}
