// file: src/database/categories.rs
use super::Database;
use crate::error::AppResult;
use crate::models::{Category, Document};
use crate::provider::Query;
use crate::schema::collections::CATEGORIES;
use log::info;

pub async fn create(db: &Database, category: &Category) -> AppResult<Document<Category>> {
    db.create(CATEGORIES, &category.user_id, category).await
}

pub async fn get_by_user(db: &Database, user_id: &str) -> AppResult<Vec<Document<Category>>> {
    db.list(CATEGORIES, vec![Query::equal("userId", user_id)]).await
}

/// Seeds Work, Personal, Health and Learning for `user_id`.
///
/// Creates one document per category in order and stops at the first
/// failure; categories created before it are kept. Calling it twice
/// creates a second set.
pub async fn create_default_categories(db: &Database, user_id: &str) -> AppResult<Vec<Document<Category>>> {
    let mut created = Vec::new();
    for category in Category::defaults_for(user_id) {
        created.push(create(db, &category).await?);
    }
    info!("Created {} default categories for user {}", created.len(), user_id);
    Ok(created)
}
