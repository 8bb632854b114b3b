// file: src/models/notification.rs
use super::item::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Reminder,
    Overdue,
    Upcoming,
    MeetingReminder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user_id: String,
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub scheduled_for: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    pub is_read: bool,
    pub priority: Priority,
}

impl Notification {
    pub fn new(
        user_id: &str,
        item_id: &str,
        kind: NotificationKind,
        title: &str,
        message: &str,
        scheduled_for: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            scheduled_for,
            sent_at: None,
            is_read: false,
            priority: Priority::Medium,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}
