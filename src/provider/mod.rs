//! Provider seam
//!
//! Everything the crate needs from the backend goes through the traits in
//! this module. [`client::AppwriteClient`] implements all of them over REST;
//! [`memory::MemoryStore`] implements document storage in-process.

pub mod client;
pub mod memory;
pub mod permission;
pub mod query;

use crate::error::AppResult;
use crate::models::DocumentList;
use crate::schema::{AttributeSpec, IndexSpec};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub use query::Query;

/// Document CRUD and list calls. Documents travel as raw JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
        permissions: Vec<String>,
    ) -> AppResult<Value>;

    async fn get_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> AppResult<Value>;

    /// Partial update: fields missing from `data` keep their stored values.
    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> AppResult<Value>;

    async fn delete_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> AppResult<()>;

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: Vec<Query>,
    ) -> AppResult<DocumentList>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeStatus {
    Available,
    Processing,
    Deleting,
    Stuck,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeState {
    pub key: String,
    pub status: AttributeStatus,
}

/// Administrative schema calls, used only by provisioning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaAdmin: Send + Sync {
    async fn create_database(&self, database_id: &str, name: &str) -> AppResult<Value>;

    async fn get_database(&self, database_id: &str) -> AppResult<Value>;

    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
        permissions: Vec<String>,
        document_security: bool,
    ) -> AppResult<Value>;

    async fn get_collection(&self, database_id: &str, collection_id: &str) -> AppResult<Value>;

    async fn create_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &AttributeSpec,
    ) -> AppResult<Value>;

    async fn list_attributes(&self, database_id: &str, collection_id: &str) -> AppResult<Vec<AttributeState>>;

    async fn create_index(&self, database_id: &str, collection_id: &str, index: &IndexSpec) -> AppResult<Value>;
}

/// Account as returned by the provider's account endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(rename = "emailVerification", default)]
    pub email_verified: bool,
    #[serde(default)]
    pub prefs: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub expire: Option<DateTime<Utc>>,
    #[serde(default)]
    pub provider: String,
}

/// Session-based account calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Account behind the current session; fails when nobody is signed in.
    async fn get(&self) -> AppResult<AccountInfo>;

    async fn create(&self, user_id: &str, email: &str, password: &str, name: &str) -> AppResult<AccountInfo>;

    async fn create_email_session(&self, email: &str, password: &str) -> AppResult<Session>;

    /// `"current"` deletes the active session.
    async fn delete_session(&self, session_id: &str) -> AppResult<()>;

    /// Browser URL that starts an OAuth login and returns to `success` or `failure`.
    fn oauth2_url(&self, provider: &str, success: &Url, failure: &Url) -> AppResult<Url>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_status_tolerates_new_states() {
        let states: Vec<AttributeState> = serde_json::from_value(json!([
            { "key": "title", "status": "available" },
            { "key": "tags", "status": "processing" },
            { "key": "agenda", "status": "something-new" }
        ]))
        .unwrap();

        assert_eq!(states[0].status, AttributeStatus::Available);
        assert_eq!(states[1].status, AttributeStatus::Processing);
        assert_eq!(states[2].status, AttributeStatus::Unknown);
    }

    #[test]
    fn test_account_info_decodes_provider_shape() {
        let info: AccountInfo = serde_json::from_value(json!({
            "$id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "emailVerification": true,
            "registration": "2024-01-01T00:00:00.000+00:00",
            "prefs": {}
        }))
        .unwrap();
        assert_eq!(info.id, "u1");
        assert!(info.email_verified);
    }
}
