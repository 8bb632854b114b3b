// Declare modules
pub mod category;
pub mod document;
pub mod item;
pub mod json_field;
pub mod meeting;
pub mod notification;
pub mod reminder;
pub mod task;
pub mod user;

// Flatten the structure so imports like `use crate::models::Task` work.
pub use category::{Category, DEFAULT_CATEGORIES};
pub use document::{Document, DocumentList};
pub use item::{Item, ItemBase, ItemPatch, ItemType, Priority, ReminderChannel, ReminderConfig, Status};
pub use meeting::{Attendee, Meeting, MeetingMode, MeetingPatch, ResponseStatus, VideoConferenceSettings};
pub use notification::{Notification, NotificationKind, NotificationPatch};
pub use reminder::{Frequency, RecurrencePattern, Reminder, ReminderPatch};
pub use task::{Task, TaskPatch};
pub use user::{DefaultView, NotificationSettings, User, UserPatch, UserPreferences, WorkingHours};
