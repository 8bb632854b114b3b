// file: src/models/meeting.rs
use super::item::{ItemBase, ItemPatch, ItemType};
use super::json_field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeetingMode {
    #[serde(rename = "in-person")]
    InPerson,
    #[default]
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "hybrid")]
    Hybrid,
}

impl MeetingMode {
    pub const ALL: [MeetingMode; 3] = [MeetingMode::InPerson, MeetingMode::Online, MeetingMode::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingMode::InPerson => "in-person",
            MeetingMode::Online => "online",
            MeetingMode::Hybrid => "hybrid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Tentative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub response_status: ResponseStatus,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Attendee {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: None,
            response_status: ResponseStatus::Pending,
            is_optional: false,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConferenceSettings {
    pub create_meet: bool,
    pub allow_dial_in: bool,
    pub enable_recording: bool,
    pub moderation_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "meetingType")]
    pub meeting_mode: MeetingMode,
    #[serde(default, with = "json_field")]
    pub attendees: Vec<Attendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_meet_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub google_meet_settings: Option<VideoConferenceSettings>,
}

impl Meeting {
    pub fn new(user_id: &str, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let mut base = ItemBase::new(ItemType::Meeting, user_id, title, start);
        base.end_date_time = Some(end);
        Self {
            base,
            location: None,
            meeting_mode: MeetingMode::default(),
            attendees: Vec::new(),
            agenda: None,
            meeting_room: None,
            google_meet_url: None,
            google_meet_settings: None,
        }
    }

    pub fn is_happening_at(&self, now: DateTime<Utc>) -> bool {
        match self.base.end_date_time {
            Some(end) => now >= self.base.start_date_time && now <= end,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingPatch {
    #[serde(flatten)]
    pub item: ItemPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "meetingType", skip_serializing_if = "Option::is_none")]
    pub meeting_mode: Option<MeetingMode>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_meet_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "json_field::option")]
    pub google_meet_settings: Option<VideoConferenceSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_meeting_is_happening() {
        let now = Utc::now();
        let meeting = Meeting::new(
            "user-1",
            "Design review",
            now - Duration::minutes(15),
            now + Duration::minutes(45),
        );
        assert!(meeting.is_happening_at(now));
        assert!(!meeting.is_happening_at(now + Duration::hours(1)));
    }

    #[test]
    fn test_meeting_wire_shape() {
        let now = Utc::now();
        let mut meeting = Meeting::new("user-1", "Sync", now, now + Duration::hours(1));
        meeting.meeting_mode = MeetingMode::InPerson;
        meeting.attendees.push(Attendee::new("ana@example.com"));

        let value = serde_json::to_value(&meeting).unwrap();
        assert_eq!(value["meetingType"], json!("in-person"));
        assert!(value["attendees"].as_str().unwrap().contains("ana@example.com"));
        assert!(value.get("googleMeetSettings").is_none());
    }
}
