//! Local filtering for predicates the provider cannot express.
//!
//! The query language has no OR and no "attribute is unset", so list calls
//! fetch a superset with the expressible part and narrow it here.

use crate::models::{Document, Item, Notification, Reminder, Task};
use chrono::{DateTime, Utc};
use log::debug;

/// Keeps the documents `keep` accepts.
pub fn filter_superset<T, F>(collection: &str, superset: Vec<T>, keep: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    let fetched = superset.len();
    let kept: Vec<T> = superset.into_iter().filter(|doc| keep(doc)).collect();
    debug!("{}: kept {} of {} fetched documents", collection, kept.len(), fetched);
    kept
}

/// Not snoozed: no snooze time, or the snooze time has passed.
pub fn is_awake(reminder: &Reminder, now: DateTime<Utc>) -> bool {
    !reminder.is_snoozed_at(now)
}

/// Not yet completed or cancelled.
pub fn is_open(item: &Item) -> bool {
    !item.status().is_closed()
}

pub fn is_unsent(notification: &Document<Notification>) -> bool {
    !notification.is_sent()
}

/// `contains` is a substring match on the stored dependency text; this
/// confirms the id is an actual list entry.
pub fn depends_on(task: &Document<Task>, task_id: &str) -> bool {
    task.depends_on(task_id)
}

/// Stable sort by start time, earliest first.
pub fn sort_by_start(items: &mut [Item]) {
    items.sort_by_key(Item::start_date_time);
}
