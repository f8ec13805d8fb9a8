// SQLite Directory Implementation
// Read side serves the Directory port; the write side is the seed surface
// the surrounding application uses to maintain people/queues/hosts/attendees

use crate::meeting_store::map_sqlx_error;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use waitline_core::domain::{Contact, MeetingId, Person, PersonId, QueueId};
use waitline_core::error::{AppError, Result};
use waitline_core::port::Directory;

pub struct SqliteDirectory {
    pool: SqlitePool,
}

fn row_to_person(row: &sqlx::sqlite::SqliteRow) -> Result<Person> {
    let id: String = row.try_get("id").map_err(map_sqlx_error)?;
    let phone: Option<String> = row.try_get("phone_number").map_err(map_sqlx_error)?;
    Ok(Person::new(id, phone.map(Contact::new)))
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or update a person and their contact address
    pub async fn upsert_person(&self, person: &Person) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO people (id, phone_number) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET phone_number = excluded.phone_number
            "#,
        )
        .bind(&person.id)
        .bind(person.contact.as_ref().map(|c| c.as_str().to_string()))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    /// Insert or rename a queue
    pub async fn create_queue(&self, queue: &QueueId, name: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO queues (id, name) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET name = excluded.name
            "#,
        )
        .bind(queue)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    /// Replace the host set of a queue
    pub async fn set_hosts(&self, queue: &QueueId, hosts: &[PersonId]) -> Result<()> {
        sqlx::query("DELETE FROM queue_hosts WHERE queue_id = ?")
            .bind(queue)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        for person in hosts {
            sqlx::query("INSERT INTO queue_hosts (queue_id, person_id) VALUES (?, ?)")
                .bind(queue)
                .bind(person)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        }

        Ok(())
    }

    /// Record the attendee snapshot of a meeting (taken at creation time)
    pub async fn set_attendees(&self, meeting: &MeetingId, attendees: &[PersonId]) -> Result<()> {
        sqlx::query("DELETE FROM meeting_attendees WHERE meeting_id = ?")
            .bind(meeting)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        for person in attendees {
            sqlx::query("INSERT INTO meeting_attendees (meeting_id, person_id) VALUES (?, ?)")
                .bind(meeting)
                .bind(person)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        }

        Ok(())
    }

    async fn queue_exists(&self, queue: &QueueId) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM queues WHERE id = ?")
            .bind(queue)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl Directory for SqliteDirectory {
    async fn hosts_of(&self, queue: &QueueId) -> Result<Vec<Person>> {
        if !self.queue_exists(queue).await? {
            return Err(AppError::NotFound(format!("Queue not found: {}", queue)));
        }

        let rows = sqlx::query(
            r#"
            SELECT p.id, p.phone_number
            FROM people p
            JOIN queue_hosts qh ON qh.person_id = p.id
            WHERE qh.queue_id = ?
            "#,
        )
        .bind(queue)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_person).collect()
    }

    async fn attendees_of(&self, meeting: &MeetingId) -> Result<Vec<Person>> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM meetings WHERE id = ?")
            .bind(meeting)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("Meeting not found: {}", meeting)));
        }

        let rows = sqlx::query(
            r#"
            SELECT p.id, p.phone_number
            FROM people p
            JOIN meeting_attendees ma ON ma.person_id = p.id
            WHERE ma.meeting_id = ?
            "#,
        )
        .bind(meeting)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_person).collect()
    }

    async fn queue_name(&self, queue: &QueueId) -> Result<String> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM queues WHERE id = ?")
            .bind(queue)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        name.ok_or_else(|| AppError::NotFound(format!("Queue not found: {}", queue)))
    }
}
