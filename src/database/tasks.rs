// file: src/database/tasks.rs
use super::{filter, Database};
use crate::error::{AppError, AppResult};
use crate::models::{Document, Status, Task, TaskPatch};
use crate::provider::Query;
use crate::schema::collections::TASKS;
use chrono::{DateTime, Utc};
use log::info;

pub const MAX_PROGRESS: u8 = 100;

pub async fn create(db: &Database, task: &Task) -> AppResult<Document<Task>> {
    db.create(TASKS, &task.base.user_id, task).await
}

pub async fn get_by_id(db: &Database, task_id: &str) -> AppResult<Document<Task>> {
    db.get(TASKS, task_id).await
}

pub async fn update(db: &Database, task_id: &str, patch: &TaskPatch) -> AppResult<Document<Task>> {
    db.update(TASKS, task_id, patch).await
}

pub async fn delete(db: &Database, task_id: &str) -> AppResult<()> {
    db.delete(TASKS, task_id).await
}

/// The user's tasks, optionally restricted to any of `statuses`.
pub async fn get_by_user(db: &Database, user_id: &str, statuses: &[Status]) -> AppResult<Vec<Document<Task>>> {
    let mut queries = vec![Query::equal("userId", user_id)];
    if !statuses.is_empty() {
        queries.push(Query::equal_any("status", statuses.iter().map(Status::as_str)));
    }
    db.list(TASKS, queries).await
}

/// Tasks starting within `[start, end]`.
pub async fn get_by_date_range(
    db: &Database,
    user_id: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<Document<Task>>> {
    db.list(
        TASKS,
        vec![
            Query::equal("userId", user_id),
            Query::greater_than_equal("startDateTime", start),
            Query::less_than_equal("startDateTime", end),
        ],
    )
    .await
}

/// Tasks listing `task_id` among their dependencies.
pub async fn get_dependent_tasks(db: &Database, task_id: &str, user_id: &str) -> AppResult<Vec<Document<Task>>> {
    db.list_filtered(
        TASKS,
        vec![Query::equal("userId", user_id), Query::contains("dependencies", task_id)],
        |task| filter::depends_on(task, task_id),
    )
    .await
}

/// Sets progress and the status derived from it; completion also stamps the end time.
/// Progress above 100 is rejected without writing.
pub async fn update_progress(db: &Database, task_id: &str, progress: u8) -> AppResult<Document<Task>> {
    if progress > MAX_PROGRESS {
        return Err(AppError::invalid_input(format!(
            "Progress must be between 0 and {}, got {}",
            MAX_PROGRESS, progress
        )));
    }
    let patch = TaskPatch::progress(progress, Utc::now());
    if let Some(status) = patch.item.status {
        info!("Task {} progress {}% -> {}", task_id, progress, status);
    }
    db.update(TASKS, task_id, &patch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn test_get_by_user_filters_status_set() {
        let db = Database::in_memory("focusflow-db");
        let now = Utc::now();
        for (title, status) in [
            ("a", Status::Pending),
            ("b", Status::InProgress),
            ("c", Status::Completed),
        ] {
            let mut task = Task::new("user-1", title, now);
            task.base.status = status;
            create(&db, &task).await.unwrap();
        }
        create(&db, &Task::new("user-2", "other", now)).await.unwrap();

        assert_eq!(get_by_user(&db, "user-1", &[]).await.unwrap().len(), 3);

        let open = get_by_user(&db, "user-1", &[Status::Pending, Status::InProgress])
            .await
            .unwrap();
        let mut titles: Vec<&str> = open.iter().map(|t| t.base.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let db = Database::in_memory("focusflow-db");
        let start = Utc.with_ymd_and_hms(2030, 3, 4, 9, 0, 0).unwrap();
        let end = start + Duration::hours(8);

        for (title, at) in [
            ("before", start - Duration::minutes(1)),
            ("at-start", start),
            ("at-end", end),
            ("after", end + Duration::minutes(1)),
        ] {
            create(&db, &Task::new("user-1", title, at)).await.unwrap();
        }

        let found = get_by_date_range(&db, "user-1", &start, &end).await.unwrap();
        let titles: Vec<&str> = found.iter().map(|t| t.base.title.as_str()).collect();
        assert_eq!(titles, vec!["at-start", "at-end"]);
    }

    #[tokio::test]
    async fn test_dependent_tasks_match_exact_ids() {
        let db = Database::in_memory("focusflow-db");
        let now = Utc::now();

        let mut exact = Task::new("user-1", "exact", now);
        exact.dependencies = vec!["task-1".to_string(), "task-7".to_string()];
        let mut prefix_only = Task::new("user-1", "prefix", now);
        prefix_only.dependencies = vec!["task-10".to_string()];
        create(&db, &exact).await.unwrap();
        create(&db, &prefix_only).await.unwrap();

        let found = get_dependent_tasks(&db, "task-1", "user-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].base.title, "exact");
    }

    #[tokio::test]
    async fn test_update_progress_rejects_out_of_range() {
        let db = Database::in_memory("focusflow-db");
        let created = create(&db, &Task::new("user-1", "Migrate billing", Utc::now())).await.unwrap();
        update_progress(&db, &created.id, 40).await.unwrap();

        for progress in [101, 150, u8::MAX] {
            let err = update_progress(&db, &created.id, progress).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }

        let stored = get_by_id(&db, &created.id).await.unwrap();
        assert_eq!(stored.progress, 40);
        assert_eq!(stored.base.status, Status::InProgress);
        assert!(stored.base.end_date_time.is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let db = Database::in_memory("focusflow-db");
        let created = create(&db, &Task::new("user-1", "temp", Utc::now())).await.unwrap();
        delete(&db, &created.id).await.unwrap();
        assert!(get_by_id(&db, &created.id).await.unwrap_err().is_not_found());
    }
}
