//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ncloud_core::error::{AppError, ErrorKind};
use ncloud_core::result::AppResult;
use ncloud_entity::file::{File, NewFile};
use ncloud_entity::store::FileStore;

/// Repository for file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ANY($1) AND owner_id = $2")
            .bind(ids)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find files", e))
    }

    async fn find_by_parent_ids(&self, parent_ids: &[Uuid]) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE parent_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(parent_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list files by parent", e)
        })
    }

    async fn insert_many(&self, files: &[NewFile]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for file in files {
            sqlx::query(
                "INSERT INTO files \
                 (id, name, owner_id, parent_id, mime_type, size_bytes, capability_key) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(file.id)
            .bind(&file.name)
            .bind(file.owner_id)
            .bind(file.parent_id)
            .bind(&file.mime_type)
            .bind(file.size_bytes)
            .bind(&file.capability_key)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to insert file {}", file.id),
                    e,
                )
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file insert", e)
        })
    }

    async fn delete_by_parent_ids(&self, parent_ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE parent_id = ANY($1)")
            .bind(parent_ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE id = ANY($1) AND owner_id = $2")
            .bind(ids)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;
        Ok(result.rows_affected())
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE files SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?;
        Ok(result.rows_affected())
    }

    async fn set_parent_conditional(
        &self,
        id: Uuid,
        origin: Uuid,
        destination: Uuid,
        capability_key: &str,
    ) -> AppResult<u64> {
        // Filtering on the declared origin parent closes the hole where
        // a caller holds a valid key for one directory and tries to move
        // a file that no longer lives there.
        let result = sqlx::query(
            "UPDATE files \
             SET parent_id = $3, previous_parent_id = $2, capability_key = $4, updated_at = NOW() \
             WHERE id = $1 AND parent_id = $2",
        )
        .bind(id)
        .bind(origin)
        .bind(destination)
        .bind(capability_key)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move file", e))?;
        Ok(result.rows_affected())
    }

    async fn restore_previous_parent(&self, id: Uuid, capability_key: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE files \
             SET parent_id = previous_parent_id, previous_parent_id = NULL, \
                 capability_key = $2, updated_at = NOW() \
             WHERE id = $1 AND previous_parent_id IS NOT NULL",
        )
        .bind(id)
        .bind(capability_key)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore file", e))?;
        Ok(result.rows_affected())
    }
}
