// file: src/models/category.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub user_id: String,
    pub name: String,
    pub color: String, // "#RRGGBB"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub is_default: bool,
}

/// Name, color, icon of the categories seeded for new users.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 4] = [
    ("Work", "#3B82F6", "briefcase"),
    ("Personal", "#10B981", "user"),
    ("Health", "#F59E0B", "heart"),
    ("Learning", "#8B5CF6", "book"),
];

impl Category {
    pub fn new(user_id: &str, name: &str, color: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            icon: None,
            is_default: false,
        }
    }

    pub fn defaults_for(user_id: &str) -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color, icon)| Category {
                icon: Some(icon.to_string()),
                is_default: true,
                ..Category::new(user_id, name, color)
            })
            .collect()
    }
}
