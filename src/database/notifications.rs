// file: src/database/notifications.rs
use super::{filter, Database};
use crate::error::AppResult;
use crate::models::{Document, Notification, NotificationPatch};
use crate::provider::Query;
use crate::schema::collections::NOTIFICATIONS;
use chrono::Utc;
use futures::future::try_join_all;
use log::info;

pub async fn create(db: &Database, notification: &Notification) -> AppResult<Document<Notification>> {
    db.create(NOTIFICATIONS, &notification.user_id, notification).await
}

/// Unread notifications, newest first.
pub async fn get_unread(db: &Database, user_id: &str) -> AppResult<Vec<Document<Notification>>> {
    db.list(
        NOTIFICATIONS,
        vec![
            Query::equal("userId", user_id),
            Query::equal("isRead", false),
            Query::order_desc("$createdAt"),
        ],
    )
    .await
}

pub async fn mark_as_read(db: &Database, notification_id: &str) -> AppResult<Document<Notification>> {
    let patch = NotificationPatch {
        is_read: Some(true),
        ..Default::default()
    };
    db.update(NOTIFICATIONS, notification_id, &patch).await
}

/// Marks every unread notification read, one update per notification.
///
/// Updates run concurrently; the first failure is returned and updates that
/// already landed stay applied.
pub async fn mark_all_as_read(db: &Database, user_id: &str) -> AppResult<usize> {
    let unread = get_unread(db, user_id).await?;
    let updated = try_join_all(unread.iter().map(|n| mark_as_read(db, &n.id))).await?;
    info!("Marked {} notifications read for user {}", updated.len(), user_id);
    Ok(updated.len())
}

/// Notifications scheduled at or before now that have not been sent.
pub async fn get_due(db: &Database, user_id: &str) -> AppResult<Vec<Document<Notification>>> {
    let now = Utc::now();
    db.list_filtered(
        NOTIFICATIONS,
        vec![Query::equal("userId", user_id), Query::less_than_equal("scheduledFor", &now)],
        filter::is_unsent,
    )
    .await
}

pub async fn mark_as_sent(db: &Database, notification_id: &str) -> AppResult<Document<Notification>> {
    let patch = NotificationPatch {
        sent_at: Some(Utc::now()),
        ..Default::default()
    };
    db.update(NOTIFICATIONS, notification_id, &patch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use chrono::Duration;

    fn notification(title: &str, scheduled_in: Duration) -> Notification {
        Notification::new(
            "user-1",
            "task-1",
            NotificationKind::Upcoming,
            title,
            "Starts soon",
            Utc::now() + scheduled_in,
        )
    }

    #[tokio::test]
    async fn test_unread_newest_first() {
        let db = Database::in_memory("focusflow-db");
        for title in ["first", "second", "third"] {
            create(&db, &notification(title, Duration::zero())).await.unwrap();
        }

        let unread = get_unread(&db, "user-1").await.unwrap();
        let titles: Vec<&str> = unread.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_mark_all_as_read() {
        let db = Database::in_memory("focusflow-db");
        for title in ["a", "b", "c"] {
            create(&db, &notification(title, Duration::zero())).await.unwrap();
        }
        let first = get_unread(&db, "user-1").await.unwrap().remove(0);
        mark_as_read(&db, &first.id).await.unwrap();

        assert_eq!(mark_all_as_read(&db, "user-1").await.unwrap(), 2);
        assert!(get_unread(&db, "user-1").await.unwrap().is_empty());
        assert_eq!(mark_all_as_read(&db, "user-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_due_excludes_sent_and_future() {
        let db = Database::in_memory("focusflow-db");
        let due = create(&db, &notification("due", -Duration::minutes(5))).await.unwrap();
        let sent = create(&db, &notification("sent", -Duration::minutes(10))).await.unwrap();
        create(&db, &notification("future", Duration::hours(1))).await.unwrap();

        let stamped = mark_as_sent(&db, &sent.id).await.unwrap();
        assert!(stamped.is_sent());

        let found = get_due(&db, "user-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due.id);
    }
}
