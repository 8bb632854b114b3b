use chrono::{Duration, Utc};
use focusflow::database::{categories, items, meetings, notifications, reminders, tasks, users};
use focusflow::utils::start_of_day;
use focusflow::{Database, Item, Meeting, Notification, NotificationKind, Reminder, Status, Task, User};

fn create_test_database() -> Database {
    Database::in_memory("focusflow-db")
}

#[tokio::test]
async fn test_new_user_onboarding_workflow() {
    let db = create_test_database();

    // 1. Database answers the connection check
    db.check_connection().await.unwrap();

    // 2. Profile with default preferences
    let user = users::create(&db, "acct-1", &User::new("sam@example.com", "Sam", "Europe/Berlin"))
        .await
        .unwrap();
    assert_eq!(user.preferences, users::create_default_user_preferences());
    assert_eq!(user.permissions, vec!["read(\"user:acct-1\")", "write(\"user:acct-1\")"]);

    // 3. Seed categories
    let seeded = categories::create_default_categories(&db, &user.id).await.unwrap();
    assert_eq!(seeded.len(), 4);

    let stored = categories::get_by_user(&db, &user.id).await.unwrap();
    let names: Vec<&str> = stored.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Work", "Personal", "Health", "Learning"]);
    assert!(stored.iter().all(|c| c.is_default));
}

#[tokio::test]
async fn test_todays_meetings_in_profile_timezone() {
    let db = create_test_database();
    let user = users::create(&db, "acct-2", &User::new("kenji@example.com", "Kenji", "Asia/Tokyo"))
        .await
        .unwrap();
    let tz = user.time_zone();
    assert_eq!(tz, chrono_tz::Asia::Tokyo);

    let day_start = start_of_day(&Utc::now().with_timezone(&tz));
    for (title, start) in [
        ("standup", day_start + Duration::hours(9)),
        ("late review", day_start + Duration::hours(23)),
        ("yesterday", day_start - Duration::hours(2)),
        ("tomorrow", day_start + Duration::hours(24)),
    ] {
        meetings::create(&db, &Meeting::new(&user.id, title, start, start + Duration::minutes(30)))
            .await
            .unwrap();
    }

    let today = meetings::get_todays_meetings(&db, &user.id, tz).await.unwrap();
    let titles: Vec<&str> = today.iter().map(|m| m.base.title.as_str()).collect();
    assert_eq!(titles, vec!["standup", "late review"]);

    // An unknown zone name reads as UTC
    let drifter = User::new("drift@example.com", "Drift", "Mars/Olympus");
    assert_eq!(drifter.time_zone(), chrono_tz::UTC);
}

#[tokio::test]
async fn test_all_items_sorted_by_start() {
    let db = create_test_database();
    let now = Utc::now();

    tasks::create(&db, &Task::new("user-1", "task +3h", now + Duration::hours(3)))
        .await
        .unwrap();
    meetings::create(
        &db,
        &Meeting::new("user-1", "meeting +1h", now + Duration::hours(1), now + Duration::hours(2)),
    )
    .await
    .unwrap();
    reminders::create(&db, &Reminder::new("user-1", "reminder +2h", now + Duration::hours(2)))
        .await
        .unwrap();
    tasks::create(&db, &Task::new("user-1", "task -1h", now - Duration::hours(1)))
        .await
        .unwrap();
    tasks::create(&db, &Task::new("user-2", "someone else", now)).await.unwrap();

    let all = items::get_all_items(&db, "user-1", None).await.unwrap();
    let titles: Vec<&str> = all.iter().map(|i| i.base().title.as_str()).collect();
    assert_eq!(titles, vec!["task -1h", "meeting +1h", "reminder +2h", "task +3h"]);
    assert!(all.windows(2).all(|w| w[0].start_date_time() <= w[1].start_date_time()));

    let window = items::get_all_items(&db, "user-1", Some((now, now + Duration::minutes(150))))
        .await
        .unwrap();
    let kinds: Vec<&str> = window.iter().map(|i| i.item_type().as_str()).collect();
    assert_eq!(kinds, vec!["meeting", "reminder"]);
}

#[tokio::test]
async fn test_overdue_never_includes_closed_items() {
    let db = create_test_database();
    let past = Utc::now() - Duration::hours(3);

    for status in Status::ALL {
        let mut task = Task::new("user-1", &format!("task {}", status), past);
        task.base.status = status;
        tasks::create(&db, &task).await.unwrap();

        let mut meeting = Meeting::new("user-1", &format!("meeting {}", status), past, past + Duration::hours(1));
        meeting.base.status = status;
        meetings::create(&db, &meeting).await.unwrap();
    }
    for status in Status::REMINDER {
        let mut reminder = Reminder::new("user-1", &format!("reminder {}", status), past);
        reminder.base.status = status;
        reminders::create(&db, &reminder).await.unwrap();
    }
    tasks::create(&db, &Task::new("user-1", "future", Utc::now() + Duration::hours(1)))
        .await
        .unwrap();

    let overdue = items::get_overdue_items(&db, "user-1").await.unwrap();
    assert!(overdue.iter().all(|i| !i.status().is_closed()));

    let titles: Vec<&str> = overdue.iter().map(|i| i.base().title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "task pending",
            "task in-progress",
            "reminder pending",
            "meeting pending",
            "meeting in-progress",
        ]
    );
}

#[tokio::test]
async fn test_task_progress_lifecycle() {
    let db = create_test_database();
    let task = tasks::create(&db, &Task::new("user-1", "Quarterly report", Utc::now()))
        .await
        .unwrap();
    assert_eq!(task.base.status, Status::Pending);
    assert!(task.base.end_date_time.is_none());

    let halfway = tasks::update_progress(&db, &task.id, 50).await.unwrap();
    assert_eq!(halfway.progress, 50);
    assert_eq!(halfway.base.status, Status::InProgress);
    assert!(halfway.base.end_date_time.is_none());

    let before = Utc::now();
    let done = tasks::update_progress(&db, &task.id, 100).await.unwrap();
    assert_eq!(done.base.status, Status::Completed);
    let stamped = done.base.end_date_time.unwrap();
    assert!(stamped >= before);

    let reset = tasks::update_progress(&db, &task.id, 0).await.unwrap();
    assert_eq!(reset.base.status, Status::Pending);
    assert!(reset.base.end_date_time.is_none());
    assert_eq!(reset.base.title, "Quarterly report");

    // Out-of-range progress is refused and leaves the task untouched
    assert!(tasks::update_progress(&db, &task.id, 101).await.is_err());
    let stored = tasks::get_by_id(&db, &task.id).await.unwrap();
    assert_eq!(stored.progress, 0);
    assert_eq!(stored.base.status, Status::Pending);

    let completed = items::get_items_by_status(&db, "user-1", Status::Completed).await.unwrap();
    assert!(completed.is_empty());
}

#[tokio::test]
async fn test_snoozed_reminders_hidden_until_snooze_passes() {
    let db = create_test_database();
    let now = Utc::now();

    let reminder = reminders::create(&db, &Reminder::new("user-1", "Take medicine", now))
        .await
        .unwrap();
    reminders::create(&db, &Reminder::new("user-1", "Water plants", now))
        .await
        .unwrap();

    reminders::snooze(&db, &reminder.id, now + Duration::hours(1)).await.unwrap();
    let awake = reminders::get_by_user(&db, "user-1", false).await.unwrap();
    let titles: Vec<&str> = awake.iter().map(|r| r.base.title.as_str()).collect();
    assert_eq!(titles, vec!["Water plants"]);
    assert_eq!(reminders::get_by_user(&db, "user-1", true).await.unwrap().len(), 2);

    reminders::snooze(&db, &reminder.id, now - Duration::minutes(1)).await.unwrap();
    assert_eq!(reminders::get_by_user(&db, "user-1", false).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_notification_delivery_workflow() {
    let db = create_test_database();
    let now = Utc::now();

    let task = tasks::create(&db, &Task::new("user-1", "Submit expenses", now - Duration::hours(1)))
        .await
        .unwrap();
    let overdue = notifications::create(
        &db,
        &Notification::new(
            "user-1",
            &task.id,
            NotificationKind::Overdue,
            "Overdue",
            "Submit expenses is overdue",
            now - Duration::minutes(1),
        ),
    )
    .await
    .unwrap();

    // Due and unsent
    let due = notifications::get_due(&db, "user-1").await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].item_id, task.id);

    // Deliver it
    notifications::mark_as_sent(&db, &overdue.id).await.unwrap();
    assert!(notifications::get_due(&db, "user-1").await.unwrap().is_empty());

    // Still unread until the user opens it
    assert_eq!(notifications::get_unread(&db, "user-1").await.unwrap().len(), 1);
    let read = notifications::mark_as_read(&db, &overdue.id).await.unwrap();
    assert!(read.is_read);
    assert!(notifications::get_unread(&db, "user-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_item_variants_keep_their_fields() {
    let db = create_test_database();
    let now = Utc::now();

    let mut task = Task::new("user-1", "Ship release", now);
    task.estimated_hours = Some(6.0);
    task.base.tags = vec!["release".to_string()];
    tasks::create(&db, &task).await.unwrap();

    let all = items::get_all_items(&db, "user-1", None).await.unwrap();
    match &all[0] {
        Item::Task(doc) => {
            assert_eq!(doc.estimated_hours, Some(6.0));
            assert_eq!(doc.base.tags, vec!["release"]);
        }
        other => panic!("expected a task, got {:?}", other.item_type()),
    }
}
