// FocusFlow Library
// Data access, validation, auth state and schema provisioning for the
// task/reminder/meeting backend

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod http_config;
pub mod models;
pub mod provider;
pub mod provisioning;
pub mod schema;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use auth::{AuthState, AuthStore, AuthUser};
pub use database::Database;
pub use error::{AppError, AppResult};
pub use models::*;
pub use provider::memory::MemoryStore;
pub use provider::{AccountApi, DocumentStore, Query, SchemaAdmin};
