// file: src/models/user.rs
use super::json_field;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Calendar,
    Gantt,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String, // "HH:MM"
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub reminder_minutes: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub default_view: DefaultView,
    pub working_hours: WorkingHours,
    pub week_start: u8, // 0 = Sunday, 1 = Monday
    pub notifications: NotificationSettings,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_view: DefaultView::Calendar,
            working_hours: WorkingHours {
                start: "09:00".to_string(),
                end: "17:00".to_string(),
            },
            week_start: 1,
            notifications: NotificationSettings {
                email: true,
                push: true,
                reminder_minutes: vec![15, 30, 60],
            },
        }
    }
}

impl UserPreferences {
    pub fn week_starts_on_monday(&self) -> bool {
        self.week_start == 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub timezone: String,
    #[serde(default, with = "json_field")]
    pub preferences: UserPreferences,
}

impl User {
    pub fn new(email: &str, name: &str, timezone: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            google_id: None,
            avatar: None,
            timezone: timezone.to_string(),
            preferences: UserPreferences::default(),
        }
    }

    /// The user's timezone; unknown names fall back to UTC.
    pub fn time_zone(&self) -> chrono_tz::Tz {
        crate::utils::parse_timezone(&self.timezone)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub preferences: Option<UserPreferences>,
}
