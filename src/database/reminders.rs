// file: src/database/reminders.rs
use super::{filter, Database};
use crate::error::AppResult;
use crate::models::{Document, Reminder, ReminderPatch, Status};
use crate::provider::Query;
use crate::schema::collections::REMINDERS;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_UPCOMING_HOURS: i64 = 24;

pub async fn create(db: &Database, reminder: &Reminder) -> AppResult<Document<Reminder>> {
    db.create(REMINDERS, &reminder.base.user_id, reminder).await
}

pub async fn get_by_id(db: &Database, reminder_id: &str) -> AppResult<Document<Reminder>> {
    db.get(REMINDERS, reminder_id).await
}

pub async fn update(db: &Database, reminder_id: &str, patch: &ReminderPatch) -> AppResult<Document<Reminder>> {
    db.update(REMINDERS, reminder_id, patch).await
}

pub async fn delete(db: &Database, reminder_id: &str) -> AppResult<()> {
    db.delete(REMINDERS, reminder_id).await
}

/// The user's reminders. Unless `include_snoozed`, reminders snoozed past
/// the current time are left out.
pub async fn get_by_user(db: &Database, user_id: &str, include_snoozed: bool) -> AppResult<Vec<Document<Reminder>>> {
    let queries = vec![Query::equal("userId", user_id)];
    if include_snoozed {
        return db.list(REMINDERS, queries).await;
    }

    let now = Utc::now();
    db.list_filtered(REMINDERS, queries, |reminder| filter::is_awake(reminder, now))
        .await
}

/// Pending reminders starting in `(now, now + hours]`.
pub async fn get_upcoming(db: &Database, user_id: &str, hours: i64) -> AppResult<Vec<Document<Reminder>>> {
    let now = Utc::now();
    let until = now + Duration::hours(hours);

    db.list(
        REMINDERS,
        vec![
            Query::equal("userId", user_id),
            Query::equal("status", Status::Pending.as_str()),
            Query::greater_than("startDateTime", &now),
            Query::less_than_equal("startDateTime", &until),
        ],
    )
    .await
}

pub async fn snooze(db: &Database, reminder_id: &str, until: DateTime<Utc>) -> AppResult<Document<Reminder>> {
    let patch = ReminderPatch {
        snooze_until: Some(Some(until)),
        ..Default::default()
    };
    db.update(REMINDERS, reminder_id, &patch).await
}

pub async fn clear_snooze(db: &Database, reminder_id: &str) -> AppResult<Document<Reminder>> {
    let patch = ReminderPatch {
        snooze_until: Some(None),
        ..Default::default()
    };
    db.update(REMINDERS, reminder_id, &patch).await
}
