// file: src/database/items.rs
//
// Views across the three item collections. Each view issues its three list
// calls concurrently; one failing call fails the whole view.

use super::{filter, Database};
use crate::error::AppResult;
use crate::models::{Item, Meeting, Reminder, Status, Task};
use crate::provider::Query;
use crate::schema::collections::{MEETINGS, REMINDERS, TASKS};
use chrono::{DateTime, Utc};

/// Lists tasks, reminders and meetings concurrently and concatenates them in that order.
async fn fan_out(
    db: &Database,
    task_queries: Vec<Query>,
    reminder_queries: Vec<Query>,
    meeting_queries: Vec<Query>,
) -> AppResult<Vec<Item>> {
    let (tasks, reminders, meetings) = tokio::try_join!(
        db.list::<Task>(TASKS, task_queries),
        db.list::<Reminder>(REMINDERS, reminder_queries),
        db.list::<Meeting>(MEETINGS, meeting_queries),
    )?;

    Ok(tasks
        .into_iter()
        .map(Item::from)
        .chain(reminders.into_iter().map(Item::from))
        .chain(meetings.into_iter().map(Item::from))
        .collect())
}

/// Every item of the user, earliest start first. With both bounds set, only
/// items starting within `[start, end]`.
pub async fn get_all_items(
    db: &Database,
    user_id: &str,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<Item>> {
    let mut queries = vec![Query::equal("userId", user_id)];
    if let Some((start, end)) = range {
        queries.push(Query::greater_than_equal("startDateTime", &start));
        queries.push(Query::less_than_equal("startDateTime", &end));
    }

    let mut items = fan_out(db, queries.clone(), queries.clone(), queries).await?;
    filter::sort_by_start(&mut items);
    Ok(items)
}

/// Items with the given status, tasks then reminders then meetings.
pub async fn get_items_by_status(db: &Database, user_id: &str, status: Status) -> AppResult<Vec<Item>> {
    let queries = vec![Query::equal("userId", user_id), Query::equal("status", status.as_str())];
    fan_out(db, queries.clone(), queries.clone(), queries).await
}

/// Open items past due: tasks and reminders that have started, meetings that have ended.
pub async fn get_overdue_items(db: &Database, user_id: &str) -> AppResult<Vec<Item>> {
    let now = Utc::now();
    let started = vec![Query::equal("userId", user_id), Query::less_than("startDateTime", &now)];
    let ended = vec![Query::equal("userId", user_id), Query::less_than("endDateTime", &now)];

    let superset = fan_out(db, started.clone(), started, ended).await?;
    Ok(filter::filter_superset("items", superset, filter::is_open))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{meetings, reminders, tasks};
    use chrono::Duration;

    #[tokio::test]
    async fn test_items_by_status_keeps_collection_order() {
        let db = Database::in_memory("focusflow-db");
        let now = Utc::now();

        meetings::create(&db, &Meeting::new("user-1", "m", now, now + Duration::hours(1)))
            .await
            .unwrap();
        reminders::create(&db, &Reminder::new("user-1", "r", now)).await.unwrap();
        tasks::create(&db, &Task::new("user-1", "t", now)).await.unwrap();
        let mut done = Task::new("user-1", "done", now);
        done.base.status = Status::Completed;
        tasks::create(&db, &done).await.unwrap();

        let pending = get_items_by_status(&db, "user-1", Status::Pending).await.unwrap();
        let kinds: Vec<&str> = pending.iter().map(|i| i.item_type().as_str()).collect();
        assert_eq!(kinds, vec!["task", "reminder", "meeting"]);
    }

    #[tokio::test]
    async fn test_meeting_in_progress_is_not_overdue() {
        let db = Database::in_memory("focusflow-db");
        let now = Utc::now();

        meetings::create(
            &db,
            &Meeting::new("user-1", "running", now - Duration::minutes(10), now + Duration::minutes(20)),
        )
        .await
        .unwrap();
        meetings::create(
            &db,
            &Meeting::new("user-1", "over", now - Duration::hours(2), now - Duration::hours(1)),
        )
        .await
        .unwrap();

        let overdue = get_overdue_items(&db, "user-1").await.unwrap();
        let titles: Vec<&str> = overdue.iter().map(|i| i.base().title.as_str()).collect();
        assert_eq!(titles, vec!["over"]);
    }
}
