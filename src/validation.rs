//! Record validation
//!
//! Checks run against loosely typed candidates (strings as submitted by a
//! form or API) and return every problem found as a human-readable message.
//! An empty list means the candidate is valid. Services never call these;
//! callers decide whether to block a write.

use crate::models::{ItemBase, Meeting, MeetingMode, Priority, Status, Task};
use crate::utils::parse_datetime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref EMAIL: Option<Regex> = Regex::new(r"\S+@\S+\.\S+").ok();
}

/// Something, an `@`, then a domain with at least one dot.
fn is_email(candidate: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(candidate))
}

/// Fields shared by every item kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCandidate {
    pub title: Option<String>,
    pub user_id: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCandidate {
    #[serde(flatten)]
    pub item: ItemCandidate,
    pub progress: Option<f64>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttendeeCandidate {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingCandidate {
    #[serde(flatten)]
    pub item: ItemCandidate,
    pub meeting_type: Option<String>,
    pub attendees: Option<Vec<AttendeeCandidate>>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn validate_item(item: &ItemCandidate) -> Vec<String> {
    let mut errors = Vec::new();

    if item.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
        errors.push("Title is required".to_string());
    }

    if present(&item.user_id).is_none() {
        errors.push("User ID is required".to_string());
    }

    let start = match present(&item.start_date_time) {
        None => {
            errors.push("Start date/time is required".to_string());
            None
        }
        Some(raw) => {
            let parsed = parse_datetime(raw);
            if parsed.is_none() {
                errors.push("Invalid start date/time format".to_string());
            }
            parsed
        }
    };

    if let Some(raw) = present(&item.end_date_time) {
        match parse_datetime(raw) {
            None => errors.push("Invalid end date/time format".to_string()),
            Some(end) => {
                if start.is_some_and(|start| end <= start) {
                    errors.push("End date/time must be after start date/time".to_string());
                }
            }
        }
    }

    if present(&item.priority).is_some_and(|p| Priority::parse(p).is_none()) {
        errors.push("Invalid priority value".to_string());
    }

    if present(&item.status).is_some_and(|s| Status::parse(s).is_none()) {
        errors.push("Invalid status value".to_string());
    }

    errors
}

pub fn validate_task(task: &TaskCandidate) -> Vec<String> {
    let mut errors = validate_item(&task.item);

    if task.progress.is_some_and(|p| !(0.0..=100.0).contains(&p)) {
        errors.push("Progress must be between 0 and 100".to_string());
    }
    if task.estimated_hours.is_some_and(|h| h < 0.0) {
        errors.push("Estimated hours cannot be negative".to_string());
    }
    if task.actual_hours.is_some_and(|h| h < 0.0) {
        errors.push("Actual hours cannot be negative".to_string());
    }

    errors
}

pub fn validate_meeting(meeting: &MeetingCandidate) -> Vec<String> {
    let mut errors = validate_item(&meeting.item);

    if present(&meeting.item.end_date_time).is_none() {
        errors.push("End date/time is required for meetings".to_string());
    }

    if present(&meeting.meeting_type).is_some_and(|m| MeetingMode::parse(m).is_none()) {
        errors.push("Invalid meeting type".to_string());
    }

    for (index, attendee) in meeting.attendees.iter().flatten().enumerate() {
        match present(&attendee.email) {
            None => errors.push(format!("Attendee {} email is required", index + 1)),
            Some(email) if !is_email(email) => {
                errors.push(format!("Attendee {} email is invalid", index + 1))
            }
            Some(_) => {}
        }
    }

    errors
}

impl From<&ItemBase> for ItemCandidate {
    fn from(base: &ItemBase) -> Self {
        Self {
            title: Some(base.title.clone()),
            user_id: Some(base.user_id.clone()),
            start_date_time: Some(base.start_date_time.to_rfc3339()),
            end_date_time: base.end_date_time.map(|end| end.to_rfc3339()),
            priority: Some(base.priority.as_str().to_string()),
            status: Some(base.status.as_str().to_string()),
        }
    }
}

impl From<&Task> for TaskCandidate {
    fn from(task: &Task) -> Self {
        Self {
            item: ItemCandidate::from(&task.base),
            progress: Some(f64::from(task.progress)),
            estimated_hours: task.estimated_hours,
            actual_hours: task.actual_hours,
        }
    }
}

impl From<&Meeting> for MeetingCandidate {
    fn from(meeting: &Meeting) -> Self {
        Self {
            item: ItemCandidate::from(&meeting.base),
            meeting_type: Some(meeting.meeting_mode.as_str().to_string()),
            attendees: Some(
                meeting
                    .attendees
                    .iter()
                    .map(|a| AttendeeCandidate { email: Some(a.email.clone()) })
                    .collect(),
            ),
        }
    }
}
