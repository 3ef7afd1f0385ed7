//! SQLite repository implementation.
//!
//! Implements [`IdentityRepository`] from `fakesso_core::storage` using SQLite.

use std::{path::Path, time::Duration};

use async_trait::async_trait;
use rusqlite::{OptionalExtension, TransactionBehavior};
use tokio_rusqlite::Connection;

use fakesso_core::identity::{provision_identity, Identity, Provisioned};
use fakesso_core::storage::{IdentityRepository, RepositoryError, Result};

use super::error::map_tokio_rusqlite_error;
use super::schema;

const ENTITY: &str = "Identity";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn row_to_identity(row: &rusqlite::Row<'_>) -> rusqlite::Result<Identity> {
    Ok(Identity {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

/// SQLite-based identity store.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) the database file at `path`.
    ///
    /// Missing parent directories are created. Schema tables are created
    /// automatically.
    pub async fn new(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RepositoryError::ConnectionFailed(format!(
                        "Cannot create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    ///
    /// Data is lost when the repository is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.busy_timeout(Duration::from_millis(schema::BUSY_TIMEOUT_MS))
                .map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))
    }
}

#[async_trait]
impl IdentityRepository for SqliteRepository {
    async fn exists(&self, id: &str) -> Result<bool> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::IDENTITY_EXISTS).map_err(wrap_err)?;
                stmt.query_row([&id_str], |row| row.get::<_, bool>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id))
    }

    async fn get_or_create(&self, id: &str) -> Result<Provisioned> {
        // The candidate is drawn up front; it is discarded when the row exists.
        let candidate = provision_identity(id)?;

        let (identity, created) = self
            .conn
            .call(move |conn| {
                let tx = conn
                    .transaction_with_behavior(TransactionBehavior::Immediate)
                    .map_err(wrap_err)?;

                let inserted = tx
                    .execute(
                        schema::INSERT_IDENTITY_IF_ABSENT,
                        [&candidate.id, &candidate.name, &candidate.email],
                    )
                    .map_err(wrap_err)?;
                let stored = tx
                    .query_row(
                        schema::SELECT_IDENTITY_BY_ID,
                        [&candidate.id],
                        row_to_identity,
                    )
                    .map_err(wrap_err)?;

                tx.commit().map_err(wrap_err)?;
                Ok((stored, inserted == 1))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id))?;

        Ok(if created {
            Provisioned::Created(identity)
        } else {
            Provisioned::Found(identity)
        })
    }

    async fn get_identity(&self, id: &str) -> Result<Identity> {
        let id_str = id.to_string();

        let identity = self
            .conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_IDENTITY_BY_ID, [&id_str], row_to_identity)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id))?;

        identity.ok_or_else(|| RepositoryError::NotFound {
            entity_type: ENTITY,
            id: id.to_string(),
        })
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_IDENTITY_IDS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], |row| row.get::<_, String>(0))
                    .map_err(wrap_err)?;

                let mut ids = Vec::new();
                for row_result in rows {
                    ids.push(row_result.map_err(wrap_err)?);
                }
                Ok(ids)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))
    }
}
