//! Directory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ncloud_core::error::{AppError, ErrorKind};
use ncloud_core::result::AppResult;
use ncloud_entity::directory::{Directory, NewDirectory};
use ncloud_entity::store::DirectoryStore;

/// Repository for directory records and tree-feed queries.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for DirectoryRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Directory>> {
        sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find directory", e))
    }

    async fn find_owned(&self, owner_id: Uuid) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list owned directories", e)
        })
    }

    async fn find_owned_children(&self, owner_id: Uuid) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories \
             WHERE owner_id = $1 AND parent_id IS NOT NULL ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child directories", e))
    }

    async fn find_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE id = ANY($1) AND owner_id = $2",
        )
        .bind(ids)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find directories", e))
    }

    async fn insert_many(&self, directories: &[NewDirectory]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for dir in directories {
            sqlx::query(
                "INSERT INTO directories (id, name, owner_id, parent_id, capability_key) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(dir.id)
            .bind(&dir.name)
            .bind(dir.owner_id)
            .bind(dir.parent_id)
            .bind(&dir.capability_key)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to insert directory {}", dir.id),
                    e,
                )
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit directory insert", e)
        })
    }

    async fn delete_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM directories WHERE id = ANY($1) AND owner_id = $2")
            .bind(ids)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete directories", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE directories SET name = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename directory", e))?;
        Ok(result.rows_affected())
    }

    async fn set_parent_bulk(
        &self,
        ids: &[Uuid],
        destination: Uuid,
        owner_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE directories SET parent_id = $2, updated_at = NOW() \
             WHERE id = ANY($1) AND owner_id = $3",
        )
        .bind(ids)
        .bind(destination)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move directories", e))?;
        Ok(result.rows_affected())
    }

    async fn set_parent_conditional(
        &self,
        id: Uuid,
        origin: Uuid,
        destination: Uuid,
    ) -> AppResult<u64> {
        // The optimistic parent check makes racing moves of the same
        // directory resolve to exactly one winner.
        let result = sqlx::query(
            "UPDATE directories \
             SET parent_id = $3, previous_parent_id = $2, updated_at = NOW() \
             WHERE id = $1 AND parent_id = $2",
        )
        .bind(id)
        .bind(origin)
        .bind(destination)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move directory", e))?;
        Ok(result.rows_affected())
    }

    async fn restore_previous_parent(&self, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE directories \
             SET parent_id = previous_parent_id, previous_parent_id = NULL, updated_at = NOW() \
             WHERE id = $1 AND previous_parent_id IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore directory", e))?;
        Ok(result.rows_affected())
    }
}
