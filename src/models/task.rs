// file: src/models/task.rs
use super::item::{ItemBase, ItemPatch, ItemType, Status};
use super::json_field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, with = "json_field")]
    pub dependencies: Vec<String>,
    #[serde(default, with = "json_field")]
    pub subtasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub assigned_to: Option<Vec<String>>,
}

impl Task {
    pub fn new(user_id: &str, title: &str, start: DateTime<Utc>) -> Self {
        Self {
            base: ItemBase::new(ItemType::Task, user_id, title, start),
            estimated_hours: None,
            actual_hours: None,
            dependencies: Vec::new(),
            subtasks: Vec::new(),
            parent_task_id: None,
            progress: 0,
            assigned_to: None,
        }
    }

    pub fn depends_on(&self, task_id: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == task_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(flatten)]
    pub item: ItemPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub subtasks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub assigned_to: Option<Vec<String>>,
}

impl TaskPatch {
    /// Progress update with its derived status. Reaching 100 stamps the end time;
    /// any other value clears it.
    pub fn progress(progress: u8, now: DateTime<Utc>) -> Self {
        let status = Status::from_progress(progress);
        Self {
            item: ItemPatch {
                status: Some(status),
                end_date_time: Some((status == Status::Completed).then_some(now)),
                ..Default::default()
            },
            progress: Some(progress),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_progress_patch_completes_and_stamps_end() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let patch = TaskPatch::progress(100, now);

        assert_eq!(patch.item.status, Some(Status::Completed));
        assert_eq!(patch.item.end_date_time, Some(Some(now)));
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "status": "completed", "endDateTime": "2024-05-01T12:00:00Z", "progress": 100 })
        );
    }

    #[test]
    fn test_progress_patch_partial_and_zero() {
        let now = Utc::now();

        let partial = TaskPatch::progress(40, now);
        assert_eq!(partial.item.status, Some(Status::InProgress));
        assert_eq!(partial.item.end_date_time, Some(None));

        let zero = TaskPatch::progress(0, now);
        assert_eq!(zero.item.status, Some(Status::Pending));
        assert_eq!(
            serde_json::to_value(&zero).unwrap(),
            json!({ "status": "pending", "endDateTime": null, "progress": 0 })
        );
    }

    #[test]
    fn test_task_decodes_provider_document_shape() {
        let raw = json!({
            "userId": "user-1",
            "title": "Write report",
            "type": "task",
            "priority": "high",
            "status": "in-progress",
            "startDateTime": "2024-01-01T10:00:00.000+00:00",
            "endDateTime": null,
            "allDay": false,
            "timezone": "UTC",
            "tags": null,
            "reminders": "[{\"id\":\"r1\",\"type\":\"email\",\"minutesBefore\":15,\"isActive\":true}]",
            "dependencies": "[\"task-a\",\"task-b\"]",
            "subtasks": null,
            "progress": 30,
            "estimatedHours": 2.5
        });

        let task: Task = serde_json::from_value(raw).unwrap();
        assert_eq!(task.base.status, Status::InProgress);
        assert!(task.base.end_date_time.is_none());
        assert_eq!(task.base.reminders.len(), 1);
        assert_eq!(task.base.reminders[0].minutes_before, 15);
        assert!(task.depends_on("task-b"));
        assert!(!task.depends_on("task"));
        assert!(task.subtasks.is_empty());
        assert_eq!(task.estimated_hours, Some(2.5));
    }
}
