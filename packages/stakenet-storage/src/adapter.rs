//! Relational data store adapter
//!
//! One long-lived SQLite connection, acquired at construction and held
//! for the adapter's lifetime. All table access is schema-qualified.
//! Statements run in autocommit mode, so every insert commits
//! individually — a multi-record load is not atomic. Connectivity and
//! query failures propagate to the caller; this pipeline is batch and
//! does not retry.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::{params, params_from_iter, types::Value, Connection};
use tracing::debug;

use stakenet_core::InteractionRecord;

use crate::error::{Result, StorageError};
use crate::records::TableRecord;

const DEFAULT_SCHEMA: &str = "main";

/// Data store adapter over a single SQLite connection
///
/// Column sets are discovered once per table via `PRAGMA table_info`
/// and cached for the adapter's lifetime, never invalidated — schema
/// changes require a new adapter instance.
pub struct DataStore {
    conn: Connection,
    schema: String,
    columns: HashMap<String, HashSet<String>>,
}

impl DataStore {
    /// Open a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Open an in-memory database (tests, scratch runs)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            schema: DEFAULT_SCHEMA.to_owned(),
            columns: HashMap::new(),
        }
    }

    /// Use a different schema qualifier (e.g. an ATTACHed database)
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Raw connection, for callers that need ad hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the pipeline's tables if they do not exist
    pub fn create_tables(&self) -> Result<()> {
        let schema = &self.schema;
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {schema}.issue_comments (
                organization TEXT NOT NULL,
                package TEXT NOT NULL,
                issue_number INTEGER NOT NULL,
                user_id TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS {schema}.stakeholder_networks (
                organization TEXT NOT NULL,
                package TEXT NOT NULL,
                gini_coefficient REAL,
                avg_clustering REAL,
                avg_min_path REAL,
                crowd_pct REAL,
                nodes INTEGER,
                stakeholder_network BLOB,
                created_at TEXT
            );
            CREATE TABLE IF NOT EXISTS {schema}.network_centrality (
                organization TEXT NOT NULL,
                package TEXT NOT NULL,
                user_id TEXT NOT NULL,
                betweenness_centrality REAL
            );"
        ))?;
        Ok(())
    }

    /// Run a statement with no returned rows; commits immediately
    pub fn execute(&self, sql: &str) -> Result<usize> {
        Ok(self.conn.execute(sql, [])?)
    }

    /// Run a parameterized statement with no returned rows
    pub fn execute_params(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Known columns for a table, discovered once and cached
    fn table_columns(&mut self, table: &str) -> Result<&HashSet<String>> {
        if !self.columns.contains_key(table) {
            let discovered = {
                let mut stmt = self
                    .conn
                    .prepare(&format!("PRAGMA {}.table_info({})", self.schema, table))?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
                rows.collect::<rusqlite::Result<HashSet<String>>>()?
            };
            debug!(table, columns = discovered.len(), "discovered table columns");
            self.columns.insert(table.to_owned(), discovered);
        }
        Ok(&self.columns[table])
    }

    /// Insert one record, filtered against the table's live schema
    ///
    /// Record columns the table does not know are dropped before the
    /// parameterized insert is built. Commits on return.
    pub fn insert(&mut self, record: &dyn TableRecord, table: &str) -> Result<()> {
        let known = self.table_columns(table)?;
        let projected: Vec<(String, Value)> = record
            .columns()
            .into_iter()
            .filter(|(name, _)| known.contains(name))
            .collect();
        if projected.is_empty() {
            return Err(StorageError::database(format!(
                "no insertable columns for table {}.{}",
                self.schema, table
            )));
        }

        let names: Vec<&str> = projected.iter().map(|(name, _)| name.as_str()).collect();
        let placeholders: Vec<String> = (1..=projected.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {}.{} ({}) VALUES ({})",
            self.schema,
            table,
            names.join(", "),
            placeholders.join(", ")
        );

        let values: Vec<Value> = projected.into_iter().map(|(_, value)| value).collect();
        self.conn.execute(&sql, params_from_iter(values))?;
        Ok(())
    }

    /// Interaction records for one (organization, package) pair
    pub fn interactions(
        &self,
        organization: &str,
        package: &str,
    ) -> Result<Vec<InteractionRecord>> {
        let sql = format!(
            "SELECT issue_number, user_id FROM {}.issue_comments
             WHERE organization = ?1 AND package = ?2",
            self.schema
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![organization, package], |row| {
            Ok(InteractionRecord::new(
                organization,
                package,
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Most recent serialized graph blob for one (organization, package)
    pub fn network_blob(&self, organization: &str, package: &str) -> Result<Option<Vec<u8>>> {
        use rusqlite::OptionalExtension;

        let sql = format!(
            "SELECT stakeholder_network FROM {}.stakeholder_networks
             WHERE organization = ?1 AND package = ?2
             ORDER BY created_at DESC LIMIT 1",
            self.schema
        );
        let blob = self
            .conn
            .query_row(&sql, params![organization, package], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(blob)
    }
}
