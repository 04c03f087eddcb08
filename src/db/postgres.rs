//! PostgreSQL backend implementation.

use postgres::types::Type;
use postgres::NoTls;
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;

use super::postgres_schema::POSTGRES_SCHEMA;
use super::rowset::{Rowset, Value};
use crate::error::{Error, Result};

pub struct PgDb {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl PgDb {
    pub fn open(url: &str, pool_size: u32) -> Result<Self> {
        let config = url
            .parse::<postgres::Config>()
            .map_err(|e| Error::Connection(e.to_string()))?;
        let manager = PostgresConnectionManager::new(config, NoTls);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;
        Ok(Self { pool })
    }

    pub fn initialize(&self) -> Result<()> {
        let mut client = self.pool.get()?;
        client.batch_execute(POSTGRES_SCHEMA)?;
        Ok(())
    }

    /// The single execution primitive, mirroring the SQLite backend.
    /// Prepared first so an empty result still carries its column names.
    pub fn run_sql(&self, sql: &str) -> Result<Rowset> {
        let mut client = self.pool.get()?;
        let stmt = client.prepare(sql)?;
        let columns: Vec<String> = stmt
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut rowset = Rowset::new(columns);
        let rows = client.query(&stmt, &[])?;
        for row in &rows {
            let mut values = Vec::with_capacity(row.len());
            for idx in 0..row.len() {
                values.push(pg_value(row, idx)?);
            }
            rowset.rows.push(values);
        }
        Ok(rowset)
    }

    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let mut client = self.pool.get()?;
        client.batch_execute(sql)?;
        Ok(())
    }

    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut client = self.pool.get()?;
        let rows = client.query(
            "SELECT tablename FROM pg_catalog.pg_tables WHERE schemaname = 'public' ORDER BY tablename",
            &[],
        )?;
        Ok(rows.iter().map(|r| r.get(0)).collect())
    }

    pub fn table_contents(&self, table: &str, limit: usize) -> Result<Rowset> {
        if !self.list_tables()?.iter().any(|t| t == table) {
            return Err(Error::TableNotFound(table.to_string()));
        }
        self.run_sql(&format!("SELECT * FROM {} LIMIT {}", table, limit))
    }
}

/// Typed cell extraction. Counts and ids arrive as int8, window ranks as
/// int8, guarded ratios as float8 (the dialect variants cast numerics
/// down); anything outside the contracted scalar set falls back to its
/// text form, else null.
fn pg_value(row: &postgres::Row, idx: usize) -> Result<Value> {
    let ty = row.columns()[idx].type_().clone();
    let value = if ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?
            .map(|v| Value::Integer(v as i64))
    } else if ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?
            .map(|v| Value::Integer(v as i64))
    } else if ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(Value::Integer)
    } else if ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)?
            .map(|v| Value::Real(v as f64))
    } else if ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)?.map(Value::Real)
    } else if ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?
            .map(|v| Value::Integer(v as i64))
    } else if ty == Type::TEXT || ty == Type::VARCHAR || ty == Type::BPCHAR || ty == Type::NAME {
        row.try_get::<_, Option<String>>(idx)?.map(Value::Text)
    } else {
        row.try_get::<_, Option<String>>(idx)
            .unwrap_or(None)
            .map(Value::Text)
    };
    Ok(value.unwrap_or(Value::Null))
}
