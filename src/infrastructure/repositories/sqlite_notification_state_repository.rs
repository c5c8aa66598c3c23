use crate::domain::{
    error::DomainResult,
    repositories::{AcknowledgeOutcome, NotificationStateRepository},
};
use crate::infrastructure::repositories::sqlite_base::{SharedConnection, SqliteRepository};
use async_trait::async_trait;
use rusqlite::params;

#[derive(Debug)]
pub struct SqliteNotificationStateRepository {
    connection: SharedConnection,
}

impl SqliteNotificationStateRepository {
    pub async fn new(connection: SharedConnection) -> DomainResult<Self> {
        let repository = Self { connection };
        repository.ensure_schema().await?;
        Ok(repository)
    }
}

impl SqliteRepository for SqliteNotificationStateRepository {
    fn table_name(&self) -> &str {
        "acknowledged_notifications"
    }

    fn schema(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS acknowledged_notifications (
            person_code TEXT NOT NULL,
            identifier TEXT NOT NULL,
            acknowledged_at TEXT NOT NULL,
            PRIMARY KEY (person_code, identifier)
        )"
    }

    fn connection(&self) -> &SharedConnection {
        &self.connection
    }
}

#[async_trait]
impl NotificationStateRepository for SqliteNotificationStateRepository {
    async fn acknowledge(
        &self,
        person_identifier_code: &str,
        identifier: &str,
    ) -> DomainResult<AcknowledgeOutcome> {
        let conn = self.connection.lock().await;
        // The primary key turns the insert into a compare-and-set.
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO acknowledged_notifications
                    (person_code, identifier, acknowledged_at)
                 VALUES (?1, ?2, ?3)",
                params![
                    person_identifier_code,
                    identifier,
                    chrono::Utc::now().to_rfc3339()
                ],
            )
            .map_err(|e| self.map_db_error(e))?;

        Ok(if inserted == 0 {
            AcknowledgeOutcome::AlreadyAcknowledged
        } else {
            AcknowledgeOutcome::Acknowledged
        })
    }

    async fn is_acknowledged(
        &self,
        person_identifier_code: &str,
        identifier: &str,
    ) -> DomainResult<bool> {
        let conn = self.connection.lock().await;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM acknowledged_notifications
                 WHERE person_code = ?1 AND identifier = ?2",
                params![person_identifier_code, identifier],
                |row| row.get(0),
            )
            .map_err(|e| self.map_db_error(e))?;
        Ok(count > 0)
    }

    async fn acknowledged_identifiers(
        &self,
        person_identifier_code: &str,
    ) -> DomainResult<Vec<String>> {
        let conn = self.connection.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT identifier FROM acknowledged_notifications
                 WHERE person_code = ?1 ORDER BY acknowledged_at, identifier",
            )
            .map_err(|e| self.map_db_error(e))?;

        let rows = stmt
            .query_map(params![person_identifier_code], |row| row.get::<_, String>(0))
            .map_err(|e| self.map_db_error(e))?;

        let mut identifiers = Vec::new();
        for row in rows {
            identifiers.push(row.map_err(|e| self.map_db_error(e))?);
        }
        Ok(identifiers)
    }
}
