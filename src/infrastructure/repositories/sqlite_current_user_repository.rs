use crate::domain::{
    entities::PersonIdentifier,
    error::DomainResult,
    repositories::CurrentUserRepository,
};
use crate::infrastructure::repositories::sqlite_base::{SharedConnection, SqliteRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use tokio::sync::watch;
use tracing::info;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Single-row preference table. `set` and `clear` bump the change counter
/// observers listen on.
#[derive(Debug)]
pub struct SqliteCurrentUserRepository {
    connection: SharedConnection,
    changes: watch::Sender<u64>,
}

impl SqliteCurrentUserRepository {
    pub async fn new(connection: SharedConnection) -> DomainResult<Self> {
        let (changes, _) = watch::channel(0);
        let repository = Self {
            connection,
            changes,
        };
        repository.ensure_schema().await?;
        Ok(repository)
    }

    fn notify_changed(&self) {
        self.changes.send_modify(|version| *version += 1);
    }
}

impl SqliteRepository for SqliteCurrentUserRepository {
    fn table_name(&self) -> &str {
        "current_user"
    }

    fn schema(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS current_user (
            slot INTEGER PRIMARY KEY CHECK (slot = 0),
            name_tokens TEXT NOT NULL,
            date_of_birth TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )"
    }

    fn connection(&self) -> &SharedConnection {
        &self.connection
    }
}

#[async_trait]
impl CurrentUserRepository for SqliteCurrentUserRepository {
    async fn get(&self) -> DomainResult<Option<PersonIdentifier>> {
        let row = {
            let conn = self.connection.lock().await;
            conn.query_row(
                "SELECT name_tokens, date_of_birth FROM current_user WHERE slot = 0",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| self.map_db_error(e))?
        };

        let Some((name_tokens, date_of_birth)) = row else {
            return Ok(None);
        };

        let name_tokens: Vec<String> = serde_json::from_str(&name_tokens)?;
        let date_of_birth = NaiveDate::parse_from_str(&date_of_birth, DATE_FORMAT)?;
        Ok(Some(PersonIdentifier::from_parts(name_tokens, date_of_birth)))
    }

    async fn set(&self, person_identifier: PersonIdentifier) -> DomainResult<()> {
        let name_tokens = serde_json::to_string(person_identifier.name_tokens())?;
        {
            let conn = self.connection.lock().await;
            conn.execute(
                "INSERT OR REPLACE INTO current_user (slot, name_tokens, date_of_birth, updated_at)
                 VALUES (0, ?1, ?2, ?3)",
                params![
                    name_tokens,
                    person_identifier.date_of_birth().format(DATE_FORMAT).to_string(),
                    chrono::Utc::now().to_rfc3339()
                ],
            )
            .map_err(|e| self.map_db_error(e))?;
        }
        info!("Current user set to {}", person_identifier.code());
        self.notify_changed();
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        let removed = {
            let conn = self.connection.lock().await;
            conn.execute("DELETE FROM current_user WHERE slot = 0", [])
                .map_err(|e| self.map_db_error(e))?
        };
        if removed > 0 {
            info!("Current user cleared");
            self.notify_changed();
        }
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
