// SQLite Queue Transaction Implementation

use crate::meeting_store::{map_sqlx_error, row_to_meeting};
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use waitline_core::domain::{Meeting, MeetingId, QueueId, SequenceNo};
use waitline_core::error::Result;
use waitline_core::port::{QueueTransaction, Transaction};

pub struct SqliteQueueTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
    queue: QueueId,
}

impl SqliteQueueTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>, queue: QueueId) -> Self {
        Self { tx, queue }
    }
}

#[async_trait]
impl Transaction for SqliteQueueTransaction {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl QueueTransaction for SqliteQueueTransaction {
    async fn active_meetings(&mut self) -> Result<Vec<Meeting>> {
        let rows = sqlx::query(
            r#"
            SELECT id, queue_id, kind, created_at, seq
            FROM meetings
            WHERE queue_id = ?
            ORDER BY created_at, seq
            "#,
        )
        .bind(&self.queue)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_meeting).collect()
    }

    async fn next_seq(&mut self) -> Result<SequenceNo> {
        // Bumping the counter takes the write lock, so a concurrent writer
        // on the same database surfaces as SQLITE_BUSY here
        sqlx::query("UPDATE counters SET value = value + 1 WHERE name = 'meeting_seq'")
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        let seq: i64 = sqlx::query_scalar("SELECT value FROM counters WHERE name = 'meeting_seq'")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(seq)
    }

    async fn insert(&mut self, meeting: &Meeting) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meetings (id, queue_id, kind, created_at, seq)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&meeting.id)
        .bind(&meeting.queue)
        .bind(meeting.kind.as_str())
        .bind(meeting.created_at)
        .bind(meeting.seq)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn remove(&mut self, meeting: &MeetingId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = ? AND queue_id = ?")
            .bind(meeting)
            .bind(&self.queue)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
