//! SQLite backend implementation.

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;

use super::rowset::{Rowset, Value};
use super::schema::{MIGRATIONS, SCHEMA};
use crate::error::{Error, Result};

pub struct SqliteDb {
    pub(crate) conn: Connection,
}

impl SqliteDb {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| Error::Connection(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// In-memory database, used by the test suites.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Connection(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.run_migrations()?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        for migration in MIGRATIONS {
            let _ = self.conn.execute(migration, []);
        }
        Ok(())
    }

    /// The single execution primitive: run one statement, collect the
    /// rowset. Both the catalog path and the free-text path land here.
    pub fn run_sql(&self, sql: &str) -> Result<Rowset> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let column_count = columns.len();

        let mut rowset = Rowset::new(columns);
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(match row.get_ref(idx)? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(v) => Value::Integer(v),
                    ValueRef::Real(v) => Value::Real(v),
                    ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
                    // The analytical schema carries no blob columns.
                    ValueRef::Blob(_) => Value::Null,
                });
            }
            rowset.rows.push(values);
        }
        Ok(rowset)
    }

    /// Script passthrough: schema setup and dataset snapshots.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    /// Dump a table's contents. The name is checked against the actual
    /// table list before it is spliced into the statement.
    pub fn table_contents(&self, table: &str, limit: usize) -> Result<Rowset> {
        if !self.list_tables()?.iter().any(|t| t == table) {
            return Err(Error::TableNotFound(table.to_string()));
        }
        self.run_sql(&format!("SELECT * FROM {} LIMIT {}", table, limit))
    }
}
