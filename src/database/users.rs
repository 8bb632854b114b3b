// file: src/database/users.rs
use super::Database;
use crate::error::AppResult;
use crate::models::{Document, User, UserPatch, UserPreferences};
use crate::provider::Query;
use crate::schema::collections::USERS;

/// Stores a profile owned by the signed-in account `account_id`.
pub async fn create(db: &Database, account_id: &str, user: &User) -> AppResult<Document<User>> {
    db.create(USERS, account_id, user).await
}

pub async fn get_by_id(db: &Database, user_id: &str) -> AppResult<Document<User>> {
    db.get(USERS, user_id).await
}

pub async fn update(db: &Database, user_id: &str, patch: &UserPatch) -> AppResult<Document<User>> {
    db.update(USERS, user_id, patch).await
}

/// Email is unique, so this holds at most one profile.
pub async fn get_by_email(db: &Database, email: &str) -> AppResult<Vec<Document<User>>> {
    db.list(USERS, vec![Query::equal("email", email)]).await
}

pub fn create_default_user_preferences() -> UserPreferences {
    UserPreferences::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DefaultView;

    #[tokio::test]
    async fn test_create_then_find_by_email() {
        let db = Database::in_memory("focusflow-db");
        let created = create(&db, "acct-1", &User::new("ada@example.com", "Ada", "Europe/London"))
            .await
            .unwrap();

        let found = get_by_email(&db, "ada@example.com").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, created.id);
        assert_eq!(found[0].preferences, UserPreferences::default());
        assert!(get_by_email(&db, "bob@example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unpatched_fields() {
        let db = Database::in_memory("focusflow-db");
        let created = create(&db, "acct-1", &User::new("ada@example.com", "Ada", "UTC"))
            .await
            .unwrap();

        let mut prefs = create_default_user_preferences();
        prefs.default_view = DefaultView::List;
        let patch = UserPatch {
            name: Some("Ada L.".to_string()),
            preferences: Some(prefs),
            ..Default::default()
        };
        let updated = update(&db, &created.id, &patch).await.unwrap();

        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.preferences.default_view, DefaultView::List);
    }

    #[test]
    fn test_default_preferences() {
        let prefs = create_default_user_preferences();
        assert_eq!(prefs.default_view, DefaultView::Calendar);
        assert_eq!(prefs.working_hours.start, "09:00");
        assert_eq!(prefs.working_hours.end, "17:00");
        assert!(prefs.week_starts_on_monday());
        assert_eq!(prefs.notifications.reminder_minutes, vec![15, 30, 60]);
    }
}
