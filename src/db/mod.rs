pub mod rowset;
mod schema;
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "postgres")]
pub mod postgres_schema;

pub use rowset::{Rowset, Value};
pub use schema::{MIGRATIONS, SCHEMA};

use crate::catalog::{Dialect, Report};
use crate::config::DatabaseConfig;
#[cfg(feature = "postgres")]
use crate::config::DatabaseType;
use crate::error::{Error, Result};

/// Macro to dispatch a method call to the active backend variant.
macro_rules! dispatch {
    // No arguments beyond self
    ($self:expr, $method:ident()) => {
        match &$self.inner {
            DatabaseInner::Sqlite(db) => db.$method(),
            #[cfg(feature = "postgres")]
            DatabaseInner::Postgres(db) => db.$method(),
        }
    };
    // With arguments
    ($self:expr, $method:ident($($arg:expr),+ $(,)?)) => {
        match &$self.inner {
            DatabaseInner::Sqlite(db) => db.$method($($arg),+),
            #[cfg(feature = "postgres")]
            DatabaseInner::Postgres(db) => db.$method($($arg),+),
        }
    };
}

enum DatabaseInner {
    Sqlite(sqlite::SqliteDb),
    #[cfg(feature = "postgres")]
    Postgres(postgres::PgDb),
}

pub struct Database {
    inner: DatabaseInner,
}

impl Database {
    /// Open a database connection based on the provided configuration.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        #[cfg(feature = "postgres")]
        {
            if config.backend == DatabaseType::Postgresql {
                let url = config
                    .postgresql_url
                    .as_deref()
                    .ok_or_else(|| Error::Connection("PostgreSQL URL not configured".into()))?;
                let pool_size = config.pool_size.unwrap_or(10);
                let pg = postgres::PgDb::open(url, pool_size)?;
                return Ok(Self {
                    inner: DatabaseInner::Postgres(pg),
                });
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if matches!(config.backend, crate::config::DatabaseType::Postgresql) {
                return Err(Error::Connection(
                    "built without the postgres feature".into(),
                ));
            }
        }

        let db = sqlite::SqliteDb::open(&config.sqlite_path)?;
        Ok(Self {
            inner: DatabaseInner::Sqlite(db),
        })
    }

    /// In-memory SQLite database, used by the test suites.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            inner: DatabaseInner::Sqlite(sqlite::SqliteDb::open_in_memory()?),
        })
    }

    /// Apply the schema (CREATE TABLE IF NOT EXISTS) and best-effort
    /// migrations. A no-op on an already-populated database.
    pub fn initialize(&self) -> Result<()> {
        dispatch!(self, initialize())
    }

    /// The dialect statements are compiled for on this backend.
    pub fn dialect(&self) -> Dialect {
        match &self.inner {
            DatabaseInner::Sqlite(_) => Dialect::Sqlite,
            #[cfg(feature = "postgres")]
            DatabaseInner::Postgres(_) => Dialect::Postgres,
        }
    }

    // ========================================================================
    // Query execution
    // ========================================================================

    /// Run a catalog report. Same primitive as the free-text path.
    pub fn run_report(&self, report: Report) -> Result<Rowset> {
        tracing::debug!(report = report.key(), "running catalog report");
        self.run_sql(report.sql(self.dialect()))
    }

    /// Free-text passthrough. Engine rejections come back as
    /// `Error::Execution` with the engine's message intact.
    pub fn run_sql(&self, sql: &str) -> Result<Rowset> {
        dispatch!(self, run_sql(sql))
    }

    /// Script passthrough: schema setup and dataset snapshots.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        dispatch!(self, execute_batch(sql))
    }

    // ========================================================================
    // Table browsing
    // ========================================================================

    pub fn list_tables(&self) -> Result<Vec<String>> {
        dispatch!(self, list_tables())
    }

    pub fn table_contents(&self, table: &str, limit: usize) -> Result<Rowset> {
        dispatch!(self, table_contents(table, limit))
    }
}
