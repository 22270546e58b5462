//! Repository for the `contacts` and `contact_replies` tables.
//!
//! Every read and write is scoped to a participant (sender or receiver), so
//! a message the caller is not part of looks the same as a missing one.

use realty_core::contact::{CONTACT_READ, CONTACT_REPLIED, CONTACT_UNREAD};
use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, ContactReply, CreateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sender_id, receiver_id, property_id, subject, message, status, \
    is_deleted, created_at, updated_at";

const REPLY_COLUMNS: &str = "id, contact_id, sender_id, message, created_at";

/// Unique constraint allowing one message per sender and listing.
pub const ONE_MESSAGE_PER_PROPERTY_CONSTRAINT: &str = "uq_contacts_sender_property";

/// Provides messaging operations between buyers and listing agents.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new unread message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (sender_id, receiver_id, property_id, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(input.sender_id)
            .bind(input.receiver_id)
            .bind(input.property_id)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted message that `user_id` participates in.
    pub async fn find_for_participant(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts
             WHERE id = $1 AND (sender_id = $2 OR receiver_id = $2) AND NOT is_deleted"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Messages sent or received by `user_id`, newest first, optionally
    /// filtered by status.
    pub async fn list_for_participant(
        pool: &PgPool,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts
             WHERE (sender_id = $1 OR receiver_id = $1) AND NOT is_deleted
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Flip an unread message to `read` on behalf of its receiver.
    ///
    /// Returns `None` when the message was not unread or `receiver_id` is
    /// not its receiver.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        receiver_id: DbId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET status = $3
             WHERE id = $1 AND receiver_id = $2 AND status = $4 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(receiver_id)
            .bind(CONTACT_READ)
            .bind(CONTACT_UNREAD)
            .fetch_optional(pool)
            .await
    }

    /// Replies to a message, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        contact_id: DbId,
    ) -> Result<Vec<ContactReply>, sqlx::Error> {
        let query = format!(
            "SELECT {REPLY_COLUMNS} FROM contact_replies
             WHERE contact_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ContactReply>(&query)
            .bind(contact_id)
            .fetch_all(pool)
            .await
    }

    /// Append a reply and mark the message `replied` in one transaction.
    pub async fn add_reply(
        pool: &PgPool,
        contact_id: DbId,
        sender_id: DbId,
        message: &str,
    ) -> Result<ContactReply, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO contact_replies (contact_id, sender_id, message)
             VALUES ($1, $2, $3)
             RETURNING {REPLY_COLUMNS}"
        );
        let reply = sqlx::query_as::<_, ContactReply>(&query)
            .bind(contact_id)
            .bind(sender_id)
            .bind(message)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE contacts SET status = $2 WHERE id = $1")
            .bind(contact_id)
            .bind(CONTACT_REPLIED)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reply)
    }

    /// Set the status of a message received by `receiver_id`.
    pub async fn set_status_for_receiver(
        pool: &PgPool,
        id: DbId,
        receiver_id: DbId,
        status: &str,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET status = $3
             WHERE id = $1 AND receiver_id = $2 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(receiver_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a message for both participants.
    ///
    /// Returns `true` if `user_id` participates and the row was marked.
    pub async fn soft_delete_for_participant(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contacts SET is_deleted = true
             WHERE id = $1 AND (sender_id = $2 OR receiver_id = $2) AND NOT is_deleted",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
