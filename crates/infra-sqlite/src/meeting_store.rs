// SQLite MeetingStore Implementation

use crate::SqliteQueueTransaction;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use waitline_core::domain::{Meeting, MeetingId, MeetingKind, QueueId};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{MeetingStore, QueueTransaction, TransactionalMeetingStore};

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "5" | "261" | "517" => {
                        // SQLITE_BUSY family - a concurrent writer holds the
                        // queue state; the lifecycle manager retries these
                        AppError::Conflict(format!(
                            "Database busy: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "2067" | "1555" => {
                        // UNIQUE constraint failed
                        AppError::Database(format!(
                            "Unique constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "787" | "3850" => {
                        // FOREIGN KEY constraint failed
                        AppError::Database(format!(
                            "Foreign key constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}

pub(crate) fn row_to_meeting(row: &sqlx::sqlite::SqliteRow) -> Result<Meeting> {
    Ok(Meeting::new(
        row.try_get::<String, _>("id").map_err(map_sqlx_error)?,
        row.try_get::<String, _>("queue_id").map_err(map_sqlx_error)?,
        MeetingKind::new(row.try_get::<String, _>("kind").map_err(map_sqlx_error)?),
        row.try_get::<i64, _>("created_at").map_err(map_sqlx_error)?,
        row.try_get::<i64, _>("seq").map_err(map_sqlx_error)?,
    ))
}

pub struct SqliteMeetingStore {
    pool: SqlitePool,
}

impl SqliteMeetingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetingStore for SqliteMeetingStore {
    async fn active_meetings(&self, queue: &QueueId) -> Result<Vec<Meeting>> {
        let rows = sqlx::query(
            r#"
            SELECT id, queue_id, kind, created_at, seq
            FROM meetings
            WHERE queue_id = ?
            ORDER BY created_at, seq
            "#,
        )
        .bind(queue)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_meeting).collect()
    }

    async fn find_by_id(&self, id: &MeetingId) -> Result<Option<Meeting>> {
        let row = sqlx::query(
            "SELECT id, queue_id, kind, created_at, seq FROM meetings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_meeting).transpose()
    }
}

#[async_trait]
impl TransactionalMeetingStore for SqliteMeetingStore {
    async fn begin_transaction(&self, queue: &QueueId) -> Result<Box<dyn QueueTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteQueueTransaction::new(tx, queue.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use waitline_core::port::Transaction;

    async fn test_pool(name: &str) -> SqlitePool {
        let path = format!("/tmp/waitline_store_{}_{}.db", name, std::process::id());
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path, suffix));
        }
        let pool = create_pool(&path).await.unwrap();
        run_migrations(&pool).await.unwrap();

        // Seed the queue the tests insert into
        sqlx::query("INSERT INTO queues (id, name) VALUES ('advising', 'Advising')")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn insert_meeting(store: &SqliteMeetingStore, id: &str, created_at: i64) -> Meeting {
        let queue: QueueId = "advising".to_string();
        let mut tx = store.begin_transaction(&queue).await.unwrap();
        let seq = tx.next_seq().await.unwrap();
        let meeting = Meeting::new(id, &queue, MeetingKind::new("inperson"), created_at, seq);
        tx.insert(&meeting).await.unwrap();
        tx.commit().await.unwrap();
        meeting
    }

    #[tokio::test]
    async fn test_insert_and_query_ordering() {
        let pool = test_pool("ordering").await;
        let store = SqliteMeetingStore::new(pool);
        let queue: QueueId = "advising".to_string();

        insert_meeting(&store, "m2", 2000).await;
        insert_meeting(&store, "m1", 1000).await;

        let active = store.active_meetings(&queue).await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, "m1");
        assert_eq!(active[1].id, "m2");
    }

    #[tokio::test]
    async fn test_remove_is_hard_delete() {
        let pool = test_pool("remove").await;
        let store = SqliteMeetingStore::new(pool);
        let queue: QueueId = "advising".to_string();

        let m = insert_meeting(&store, "m1", 1000).await;

        let mut tx = store.begin_transaction(&queue).await.unwrap();
        assert!(tx.remove(&m.id).await.unwrap());
        tx.commit().await.unwrap();

        assert!(store.find_by_id(&m.id).await.unwrap().is_none());
        assert!(store.active_meetings(&queue).await.unwrap().is_empty());

        // Removing again reports absence
        let mut tx = store.begin_transaction(&queue).await.unwrap();
        assert!(!tx.remove(&m.id).await.unwrap());
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_seq_is_monotonic_across_removals() {
        let pool = test_pool("seq").await;
        let store = SqliteMeetingStore::new(pool);
        let queue: QueueId = "advising".to_string();

        let m1 = insert_meeting(&store, "m1", 1000).await;

        let mut tx = store.begin_transaction(&queue).await.unwrap();
        tx.remove(&m1.id).await.unwrap();
        tx.commit().await.unwrap();

        let m2 = insert_meeting(&store, "m2", 2000).await;
        assert!(m2.seq > m1.seq);
    }

    #[tokio::test]
    async fn test_rollback_discards_insert() {
        let pool = test_pool("rollback").await;
        let store = SqliteMeetingStore::new(pool);
        let queue: QueueId = "advising".to_string();

        let mut tx = store.begin_transaction(&queue).await.unwrap();
        let seq = tx.next_seq().await.unwrap();
        tx.insert(&Meeting::new(
            "m1",
            &queue,
            MeetingKind::new("inperson"),
            1000,
            seq,
        ))
        .await
        .unwrap();
        tx.rollback().await.unwrap();

        assert!(store.active_meetings(&queue).await.unwrap().is_empty());
    }
}
