// file: src/models/reminder.rs
use super::item::{ItemBase, ItemPatch, ItemType};
use super::json_field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    pub interval: u32,
    /// 0 = Sunday .. 6 = Saturday
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub recurring_pattern: Option<RecurrencePattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_until: Option<DateTime<Utc>>,
    pub is_recurring: bool,
}

impl Reminder {
    pub fn new(user_id: &str, title: &str, start: DateTime<Utc>) -> Self {
        Self {
            base: ItemBase::new(ItemType::Reminder, user_id, title, start),
            recurring_pattern: None,
            snooze_until: None,
            is_recurring: false,
        }
    }

    pub fn recurring(mut self, pattern: RecurrencePattern) -> Self {
        self.recurring_pattern = Some(pattern);
        self.is_recurring = true;
        self
    }

    /// Snoozed reminders are hidden until the snooze time has passed.
    pub fn is_snoozed_at(&self, now: DateTime<Utc>) -> bool {
        self.snooze_until.is_some_and(|until| until >= now)
    }
}

/// `snooze_until: Some(None)` clears the snooze.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    #[serde(flatten)]
    pub item: ItemPatch,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub recurring_pattern: Option<RecurrencePattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snooze_until: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}
