// file: src/models/item.rs
use super::document::Document;
use super::json_field;
use super::{Meeting, Reminder, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Task,
    Reminder,
    Meeting,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Task => "task",
            ItemType::Reminder => "reminder",
            ItemType::Meeting => "meeting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    /// Statuses a reminder may take; reminders have no in-progress state.
    pub const REMINDER: [Status; 3] = [Status::Pending, Status::Completed, Status::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Status derived from task progress: exactly 100 completes, anything else above 0 is in progress.
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0 => Status::Pending,
            100 => Status::Completed,
            _ => Status::InProgress,
        }
    }

    /// Completed and cancelled items are closed; nothing else is.
    pub fn is_closed(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    Notification,
    Email,
    Sms,
}

/// Lead-time alert attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub channel: ReminderChannel,
    pub minutes_before: u32,
    pub is_active: bool,
}

/// Fields shared by tasks, reminders and meetings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub priority: Priority,
    pub status: Status,
    pub start_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_calendar_event_id: Option<String>,
    #[serde(default, with = "json_field")]
    pub tags: Vec<String>,
    #[serde(default, with = "json_field")]
    pub reminders: Vec<ReminderConfig>,
    #[serde(default, with = "json_field")]
    pub attachments: Vec<String>,
}

impl ItemBase {
    /// A pending, medium-priority, timed item in UTC.
    pub fn new(item_type: ItemType, user_id: &str, title: &str, start: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: None,
            item_type,
            priority: Priority::default(),
            status: Status::default(),
            start_date_time: start,
            end_date_time: None,
            all_day: false,
            timezone: "UTC".to_string(),
            google_calendar_event_id: None,
            tags: Vec::new(),
            reminders: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

/// Partial update of the shared item fields; `None` leaves the stored value alone.
/// The doubly optional fields can be cleared with `Some(None)`, which is sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_calendar_event_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub reminders: Option<Vec<ReminderConfig>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub attachments: Option<Vec<String>>,
}

/// Any of the three item kinds, as returned by cross-collection queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Task(Document<Task>),
    Reminder(Document<Reminder>),
    Meeting(Document<Meeting>),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Item::Task(doc) => &doc.id,
            Item::Reminder(doc) => &doc.id,
            Item::Meeting(doc) => &doc.id,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Task(doc) => &doc.base,
            Item::Reminder(doc) => &doc.base,
            Item::Meeting(doc) => &doc.base,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Item::Task(_) => ItemType::Task,
            Item::Reminder(_) => ItemType::Reminder,
            Item::Meeting(_) => ItemType::Meeting,
        }
    }

    pub fn status(&self) -> Status {
        self.base().status
    }

    pub fn start_date_time(&self) -> DateTime<Utc> {
        self.base().start_date_time
    }
}

impl From<Document<Task>> for Item {
    fn from(doc: Document<Task>) -> Self {
        Item::Task(doc)
    }
}

impl From<Document<Reminder>> for Item {
    fn from(doc: Document<Reminder>) -> Self {
        Item::Reminder(doc)
    }
}

impl From<Document<Meeting>> for Item {
    fn from(doc: Document<Meeting>) -> Self {
        Item::Meeting(doc)
    }
}
