use crate::domain::error::{DomainError, DomainResult};
use rusqlite::{Connection, Error as SqliteError};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

pub type SharedConnection = Arc<Mutex<Connection>>;

/// How long a connection waits for another connection's write lock on the
/// same database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the wallet database, creating parent directories as needed.
/// Without a path the database lives in memory.
pub fn open_connection(path: Option<&Path>) -> DomainResult<SharedConnection> {
    let connection = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            info!("Opening wallet database at {}", path.display());
            Connection::open(path)
        }
        None => Connection::open_in_memory(),
    }
    .map_err(|e| DomainError::InternalError(format!("Failed to open database: {}", e)))?;
    connection.busy_timeout(BUSY_TIMEOUT)?;

    Ok(Arc::new(Mutex::new(connection)))
}

#[async_trait::async_trait]
pub trait SqliteRepository
where
    Self: Send + Sync,
{
    /// Name of the table the repository owns
    fn table_name(&self) -> &str;

    /// `CREATE TABLE IF NOT EXISTS` statement for the table
    fn schema(&self) -> &str;

    /// Connection instance for database operations
    fn connection(&self) -> &SharedConnection;

    /// Default error mapping implementation
    fn map_db_error(&self, error: SqliteError) -> DomainError {
        DomainError::InternalError(format!("Database error: {}", error))
    }

    async fn ensure_schema(&self) -> DomainResult<()> {
        let conn = self.connection().lock().await;
        conn.execute(self.schema(), []).map_err(|e| {
            DomainError::InternalError(format!(
                "Failed to create table {}: {}",
                self.table_name(),
                e
            ))
        })?;
        Ok(())
    }

    /// Generic count operation
    async fn count(&self) -> DomainResult<i64> {
        let conn = self.connection().lock().await;
        let query = format!("SELECT COUNT(*) FROM {}", self.table_name());
        let count: i64 = conn
            .query_row(&query, [], |row| row.get(0))
            .map_err(|e| self.map_db_error(e))?;

        Ok(count)
    }
}
