// file: src/database/meetings.rs
use super::Database;
use crate::error::AppResult;
use crate::models::{Document, Meeting, MeetingPatch, Status};
use crate::provider::Query;
use crate::schema::collections::MEETINGS;
use crate::utils::{end_of_day, start_of_day};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

pub const DEFAULT_UPCOMING_HOURS: i64 = 2;

pub async fn create(db: &Database, meeting: &Meeting) -> AppResult<Document<Meeting>> {
    db.create(MEETINGS, &meeting.base.user_id, meeting).await
}

pub async fn get_by_id(db: &Database, meeting_id: &str) -> AppResult<Document<Meeting>> {
    db.get(MEETINGS, meeting_id).await
}

pub async fn update(db: &Database, meeting_id: &str, patch: &MeetingPatch) -> AppResult<Document<Meeting>> {
    db.update(MEETINGS, meeting_id, patch).await
}

pub async fn delete(db: &Database, meeting_id: &str) -> AppResult<()> {
    db.delete(MEETINGS, meeting_id).await
}

pub async fn get_by_user(db: &Database, user_id: &str) -> AppResult<Vec<Document<Meeting>>> {
    db.list(MEETINGS, vec![Query::equal("userId", user_id)]).await
}

/// Meetings starting within `[start, end]`.
pub async fn get_by_date_range(
    db: &Database,
    user_id: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<Document<Meeting>>> {
    db.list(
        MEETINGS,
        vec![
            Query::equal("userId", user_id),
            Query::greater_than_equal("startDateTime", start),
            Query::less_than_equal("startDateTime", end),
        ],
    )
    .await
}

/// Meetings starting today, where "today" is the current calendar day in `timezone`.
pub async fn get_todays_meetings(db: &Database, user_id: &str, timezone: Tz) -> AppResult<Vec<Document<Meeting>>> {
    let local_now = Utc::now().with_timezone(&timezone);
    get_by_date_range(db, user_id, &start_of_day(&local_now), &end_of_day(&local_now)).await
}

/// Meetings that are not cancelled and start in `(now, now + hours]`.
pub async fn get_upcoming_meetings(db: &Database, user_id: &str, hours: i64) -> AppResult<Vec<Document<Meeting>>> {
    let now = Utc::now();
    let until = now + Duration::hours(hours);

    db.list(
        MEETINGS,
        vec![
            Query::equal("userId", user_id),
            Query::not_equal("status", Status::Cancelled.as_str()),
            Query::greater_than("startDateTime", &now),
            Query::less_than_equal("startDateTime", &until),
        ],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attendee, MeetingMode};

    fn meeting(title: &str, start: DateTime<Utc>) -> Meeting {
        Meeting::new("user-1", title, start, start + Duration::minutes(30))
    }

    #[tokio::test]
    async fn test_upcoming_skips_cancelled_and_far_meetings() {
        let db = Database::in_memory("focusflow-db");
        let now = Utc::now();

        let mut cancelled = meeting("cancelled", now + Duration::minutes(30));
        cancelled.base.status = Status::Cancelled;
        for m in [
            meeting("soon", now + Duration::minutes(45)),
            meeting("later", now + Duration::hours(5)),
            meeting("started", now - Duration::minutes(5)),
            cancelled,
        ] {
            create(&db, &m).await.unwrap();
        }

        let upcoming = get_upcoming_meetings(&db, "user-1", DEFAULT_UPCOMING_HOURS).await.unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|m| m.base.title.as_str()).collect();
        assert_eq!(titles, vec!["soon"]);
    }

    #[tokio::test]
    async fn test_todays_meetings_use_local_day() {
        let db = Database::in_memory("focusflow-db");
        let tz: Tz = "America/New_York".parse().unwrap();
        let local_now = Utc::now().with_timezone(&tz);
        let day_start = start_of_day(&local_now);

        create(&db, &meeting("today", day_start + Duration::hours(10))).await.unwrap();
        create(&db, &meeting("yesterday", day_start - Duration::hours(1))).await.unwrap();
        create(&db, &meeting("tomorrow", day_start + Duration::hours(25))).await.unwrap();

        let today = get_todays_meetings(&db, "user-1", tz).await.unwrap();
        let titles: Vec<&str> = today.iter().map(|m| m.base.title.as_str()).collect();
        assert_eq!(titles, vec!["today"]);
    }

    #[tokio::test]
    async fn test_attendees_survive_storage() {
        let db = Database::in_memory("focusflow-db");
        let mut m = meeting("Planning", Utc::now() + Duration::days(1));
        m.meeting_mode = MeetingMode::Hybrid;
        m.attendees = vec![Attendee::new("ann@example.com"), Attendee::new("bob@example.com")];

        let created = create(&db, &m).await.unwrap();
        let fetched = get_by_id(&db, &created.id).await.unwrap();
        assert_eq!(fetched.attendees.len(), 2);
        assert_eq!(fetched.meeting_mode, MeetingMode::Hybrid);
        assert_eq!(get_by_user(&db, "user-1").await.unwrap().len(), 1);
    }
}
