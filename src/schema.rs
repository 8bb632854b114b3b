//! Provisioning schema
//!
//! The six collections, their typed attributes and indexes. Attribute kinds
//! that the provider has no native type for are mapped in
//! [`AttributeSpec::native`]: JSON blobs become oversized strings.

use crate::provider::permission;
use serde_json::{json, Value};

pub const DATABASE_NAME: &str = "Task Manager Database";

/// Size of the string attribute backing a JSON blob.
pub const JSON_ATTRIBUTE_SIZE: u32 = 65_535;

pub mod collections {
    pub const USERS: &str = "users";
    pub const TASKS: &str = "tasks";
    pub const REMINDERS: &str = "reminders";
    pub const MEETINGS: &str = "meetings";
    pub const CATEGORIES: &str = "categories";
    pub const NOTIFICATIONS: &str = "notifications";
}

const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
const STATUSES: &[&str] = &["pending", "in-progress", "completed", "cancelled"];
const REMINDER_STATUSES: &[&str] = &["pending", "completed", "cancelled"];
const MEETING_MODES: &[&str] = &["in-person", "online", "hybrid"];
const NOTIFICATION_KINDS: &[&str] = &["reminder", "overdue", "upcoming", "meeting_reminder"];

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    String { size: u32 },
    Integer { min: Option<i64>, max: Option<i64> },
    Float { min: Option<f64>, max: Option<f64> },
    Boolean,
    Datetime,
    Url,
    Enum { elements: &'static [&'static str] },
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    pub key: &'static str,
    pub kind: AttributeKind,
    pub required: bool,
}

impl AttributeSpec {
    pub const fn string(key: &'static str, size: u32, required: bool) -> Self {
        Self { key, kind: AttributeKind::String { size }, required }
    }

    pub const fn integer(key: &'static str, min: i64, max: i64, required: bool) -> Self {
        Self { key, kind: AttributeKind::Integer { min: Some(min), max: Some(max) }, required }
    }

    pub const fn float(key: &'static str, required: bool) -> Self {
        Self { key, kind: AttributeKind::Float { min: None, max: None }, required }
    }

    pub const fn boolean(key: &'static str, required: bool) -> Self {
        Self { key, kind: AttributeKind::Boolean, required }
    }

    pub const fn datetime(key: &'static str, required: bool) -> Self {
        Self { key, kind: AttributeKind::Datetime, required }
    }

    pub const fn url(key: &'static str, required: bool) -> Self {
        Self { key, kind: AttributeKind::Url, required }
    }

    pub const fn enumeration(key: &'static str, elements: &'static [&'static str], required: bool) -> Self {
        Self { key, kind: AttributeKind::Enum { elements }, required }
    }

    pub const fn json(key: &'static str, required: bool) -> Self {
        Self { key, kind: AttributeKind::Json, required }
    }

    /// Provider attribute type (URL path segment) and request body.
    pub fn native(&self) -> (&'static str, Value) {
        let key = self.key;
        let required = self.required;
        match &self.kind {
            AttributeKind::String { size } => {
                ("string", json!({ "key": key, "size": size, "required": required }))
            }
            AttributeKind::Json => (
                "string",
                json!({ "key": key, "size": JSON_ATTRIBUTE_SIZE, "required": required }),
            ),
            AttributeKind::Integer { min, max } => {
                let mut body = json!({ "key": key, "required": required });
                insert_bound(&mut body, "min", min.map(Value::from));
                insert_bound(&mut body, "max", max.map(Value::from));
                ("integer", body)
            }
            AttributeKind::Float { min, max } => {
                let mut body = json!({ "key": key, "required": required });
                insert_bound(&mut body, "min", min.map(Value::from));
                insert_bound(&mut body, "max", max.map(Value::from));
                ("float", body)
            }
            AttributeKind::Boolean => ("boolean", json!({ "key": key, "required": required })),
            AttributeKind::Datetime => ("datetime", json!({ "key": key, "required": required })),
            AttributeKind::Url => ("url", json!({ "key": key, "required": required })),
            AttributeKind::Enum { elements } => (
                "enum",
                json!({ "key": key, "elements": elements, "required": required }),
            ),
        }
    }
}

fn insert_bound(body: &mut Value, name: &str, bound: Option<Value>) {
    if let (Some(map), Some(bound)) = (body.as_object_mut(), bound) {
        map.insert(name.to_string(), bound);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Key,
    Unique,
    Fulltext,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Key => "key",
            IndexKind::Unique => "unique",
            IndexKind::Fulltext => "fulltext",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpec {
    pub key: &'static str,
    pub kind: IndexKind,
    pub attributes: &'static [&'static str],
}

impl IndexSpec {
    pub const fn key(key: &'static str, attributes: &'static [&'static str]) -> Self {
        Self { key, kind: IndexKind::Key, attributes }
    }

    pub const fn unique(key: &'static str, attributes: &'static [&'static str]) -> Self {
        Self { key, kind: IndexKind::Unique, attributes }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub permissions: Vec<String>,
    /// Per-document permissions apply on top of the collection's.
    pub document_security: bool,
    pub attributes: Vec<AttributeSpec>,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    pub fn attribute(&self, key: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.key == key)
    }
}

/// Collection-level permissions: signed-in users may create; documents carry owner permissions.
fn member_permissions() -> Vec<String> {
    vec![permission::create("users")]
}

/// Attributes shared by the three item collections.
fn item_attributes(item_type: &'static [&'static str], statuses: &'static [&'static str], end_required: bool) -> Vec<AttributeSpec> {
    vec![
        AttributeSpec::string("userId", 36, true),
        AttributeSpec::string("title", 255, true),
        AttributeSpec::string("description", 2000, false),
        AttributeSpec::enumeration("type", item_type, true),
        AttributeSpec::enumeration("priority", PRIORITIES, true),
        AttributeSpec::enumeration("status", statuses, true),
        AttributeSpec::datetime("startDateTime", true),
        AttributeSpec::datetime("endDateTime", end_required),
        AttributeSpec::boolean("allDay", true),
        AttributeSpec::string("timezone", 100, true),
        AttributeSpec::json("tags", false),
        AttributeSpec::string("googleCalendarEventId", 255, false),
        AttributeSpec::json("reminders", false),
        AttributeSpec::json("attachments", false),
    ]
}

pub fn users() -> CollectionSpec {
    CollectionSpec {
        id: collections::USERS,
        name: "Users",
        permissions: vec![permission::read("any"), permission::create("users")],
        document_security: true,
        attributes: vec![
            AttributeSpec::string("email", 255, true),
            AttributeSpec::string("name", 255, true),
            AttributeSpec::string("googleId", 255, false),
            AttributeSpec::url("avatar", false),
            AttributeSpec::string("timezone", 100, true),
            AttributeSpec::json("preferences", true),
        ],
        indexes: vec![
            IndexSpec::unique("email", &["email"]),
            IndexSpec::key("googleId", &["googleId"]),
        ],
    }
}

pub fn tasks() -> CollectionSpec {
    let mut attributes = item_attributes(&["task"], STATUSES, false);
    attributes.extend([
        AttributeSpec::float("estimatedHours", false),
        AttributeSpec::float("actualHours", false),
        AttributeSpec::json("dependencies", false),
        AttributeSpec::json("subtasks", false),
        AttributeSpec::string("parentTaskId", 36, false),
        AttributeSpec::integer("progress", 0, 100, true),
        AttributeSpec::json("assignedTo", false),
    ]);

    CollectionSpec {
        id: collections::TASKS,
        name: "Tasks",
        permissions: member_permissions(),
        document_security: true,
        attributes,
        indexes: vec![
            IndexSpec::key("userId", &["userId"]),
            IndexSpec::key("status", &["status"]),
            IndexSpec::key("priority", &["priority"]),
            IndexSpec::key("startDateTime", &["startDateTime"]),
            IndexSpec::key("userStatus", &["userId", "status"]),
        ],
    }
}

pub fn reminders() -> CollectionSpec {
    let mut attributes = item_attributes(&["reminder"], REMINDER_STATUSES, false);
    attributes.extend([
        AttributeSpec::json("recurringPattern", false),
        AttributeSpec::datetime("snoozeUntil", false),
        AttributeSpec::boolean("isRecurring", true),
    ]);

    CollectionSpec {
        id: collections::REMINDERS,
        name: "Reminders",
        permissions: member_permissions(),
        document_security: true,
        attributes,
        indexes: vec![
            IndexSpec::key("userId", &["userId"]),
            IndexSpec::key("status", &["status"]),
            IndexSpec::key("startDateTime", &["startDateTime"]),
            IndexSpec::key("isRecurring", &["isRecurring"]),
        ],
    }
}

pub fn meetings() -> CollectionSpec {
    let mut attributes = item_attributes(&["meeting"], STATUSES, true);
    attributes.extend([
        AttributeSpec::url("googleMeetUrl", false),
        AttributeSpec::string("location", 255, false),
        AttributeSpec::enumeration("meetingType", MEETING_MODES, true),
        AttributeSpec::json("attendees", false),
        AttributeSpec::string("agenda", 5000, false),
        AttributeSpec::string("meetingRoom", 255, false),
        AttributeSpec::json("googleMeetSettings", false),
    ]);

    CollectionSpec {
        id: collections::MEETINGS,
        name: "Meetings",
        permissions: member_permissions(),
        document_security: true,
        attributes,
        indexes: vec![
            IndexSpec::key("userId", &["userId"]),
            IndexSpec::key("status", &["status"]),
            IndexSpec::key("startDateTime", &["startDateTime"]),
            IndexSpec::key("meetingType", &["meetingType"]),
        ],
    }
}

pub fn categories() -> CollectionSpec {
    CollectionSpec {
        id: collections::CATEGORIES,
        name: "Categories",
        permissions: member_permissions(),
        document_security: true,
        attributes: vec![
            AttributeSpec::string("userId", 36, true),
            AttributeSpec::string("name", 100, true),
            AttributeSpec::string("color", 7, true),
            AttributeSpec::string("icon", 50, false),
            AttributeSpec::boolean("isDefault", true),
        ],
        indexes: vec![IndexSpec::key("userId", &["userId"])],
    }
}

pub fn notifications() -> CollectionSpec {
    CollectionSpec {
        id: collections::NOTIFICATIONS,
        name: "Notifications",
        permissions: member_permissions(),
        document_security: true,
        attributes: vec![
            AttributeSpec::string("userId", 36, true),
            AttributeSpec::string("itemId", 36, true),
            AttributeSpec::enumeration("type", NOTIFICATION_KINDS, true),
            AttributeSpec::string("title", 255, true),
            AttributeSpec::string("message", 1000, true),
            AttributeSpec::datetime("scheduledFor", true),
            AttributeSpec::datetime("sentAt", false),
            AttributeSpec::boolean("isRead", true),
            AttributeSpec::enumeration("priority", PRIORITIES, true),
        ],
        indexes: vec![
            IndexSpec::key("userId", &["userId"]),
            IndexSpec::key("isRead", &["isRead"]),
            IndexSpec::key("scheduledFor", &["scheduledFor"]),
        ],
    }
}

/// All collections in provisioning order.
pub fn all_collections() -> Vec<CollectionSpec> {
    vec![users(), tasks(), reminders(), meetings(), categories(), notifications()]
}
