//! REST client for the provider
//!
//! One `reqwest::Client` shared by the document, schema and account calls.
//! Error responses are decoded into [`AppError::Provider`] and returned as-is.

use super::{AccountApi, AccountInfo, AttributeState, DocumentStore, Query, SchemaAdmin, Session};
use crate::config::AppwriteConfig;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::DocumentList;
use crate::schema::{AttributeSpec, IndexSpec};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const RESPONSE_FORMAT_HEADER: &str = "X-Appwrite-Response-Format";
const RESPONSE_FORMAT: &str = "1.4.0";

#[derive(Debug, Deserialize)]
struct AttributeListResponse {
    #[serde(default)]
    attributes: Vec<AttributeState>,
}

#[derive(Clone)]
pub struct AppwriteClient {
    http: Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    pub fn new(config: &AppwriteConfig, http_config: &HttpConfig) -> AppResult<Self> {
        Ok(Self {
            http: http_config.build_client()?,
            endpoint: config.endpoint_base(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn collection_path(database_id: &str, collection_id: &str) -> String {
        format!("/databases/{}/collections/{}", database_id, collection_id)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(PROJECT_HEADER, &self.project_id)
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT);
        if let Some(key) = &self.api_key {
            builder = builder.header(KEY_HEADER, key);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Value> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::from_response(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DocumentStore for AppwriteClient {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
        permissions: Vec<String>,
    ) -> AppResult<Value> {
        let path = format!("{}/documents", Self::collection_path(database_id, collection_id));
        let body = json!({ "documentId": document_id, "data": data, "permissions": permissions });
        self.send(self.request(Method::POST, &path).json(&body)).await
    }

    async fn get_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> AppResult<Value> {
        let path = format!("{}/documents/{}", Self::collection_path(database_id, collection_id), document_id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> AppResult<Value> {
        let path = format!("{}/documents/{}", Self::collection_path(database_id, collection_id), document_id);
        self.send(self.request(Method::PATCH, &path).json(&json!({ "data": data })))
            .await
    }

    async fn delete_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> AppResult<()> {
        let path = format!("{}/documents/{}", Self::collection_path(database_id, collection_id), document_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: Vec<Query>,
    ) -> AppResult<DocumentList> {
        let path = format!("{}/documents", Self::collection_path(database_id, collection_id));
        let params: Vec<(&str, String)> = queries.iter().map(|q| ("queries[]", q.to_wire())).collect();
        let value = self.send(self.request(Method::GET, &path).query(&params)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl SchemaAdmin for AppwriteClient {
    async fn create_database(&self, database_id: &str, name: &str) -> AppResult<Value> {
        let body = json!({ "databaseId": database_id, "name": name });
        self.send(self.request(Method::POST, "/databases").json(&body)).await
    }

    async fn get_database(&self, database_id: &str) -> AppResult<Value> {
        self.send(self.request(Method::GET, &format!("/databases/{}", database_id)))
            .await
    }

    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
        permissions: Vec<String>,
        document_security: bool,
    ) -> AppResult<Value> {
        let path = format!("/databases/{}/collections", database_id);
        let body = json!({
            "collectionId": collection_id,
            "name": name,
            "permissions": permissions,
            "documentSecurity": document_security,
            "enabled": true,
        });
        self.send(self.request(Method::POST, &path).json(&body)).await
    }

    async fn get_collection(&self, database_id: &str, collection_id: &str) -> AppResult<Value> {
        self.send(self.request(Method::GET, &Self::collection_path(database_id, collection_id)))
            .await
    }

    async fn create_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &AttributeSpec,
    ) -> AppResult<Value> {
        let (kind, body) = attribute.native();
        let path = format!("{}/attributes/{}", Self::collection_path(database_id, collection_id), kind);
        self.send(self.request(Method::POST, &path).json(&body)).await
    }

    async fn list_attributes(&self, database_id: &str, collection_id: &str) -> AppResult<Vec<AttributeState>> {
        let path = format!("{}/attributes", Self::collection_path(database_id, collection_id));
        let value = self.send(self.request(Method::GET, &path)).await?;
        let list: AttributeListResponse = serde_json::from_value(value)?;
        Ok(list.attributes)
    }

    async fn create_index(&self, database_id: &str, collection_id: &str, index: &IndexSpec) -> AppResult<Value> {
        let path = format!("{}/indexes", Self::collection_path(database_id, collection_id));
        let body = json!({
            "key": index.key,
            "type": index.kind.as_str(),
            "attributes": index.attributes,
        });
        self.send(self.request(Method::POST, &path).json(&body)).await
    }
}

#[async_trait]
impl AccountApi for AppwriteClient {
    async fn get(&self) -> AppResult<AccountInfo> {
        let value = self.send(self.request(Method::GET, "/account")).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn create(&self, user_id: &str, email: &str, password: &str, name: &str) -> AppResult<AccountInfo> {
        let body = json!({ "userId": user_id, "email": email, "password": password, "name": name });
        let value = self.send(self.request(Method::POST, "/account").json(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn create_email_session(&self, email: &str, password: &str) -> AppResult<Session> {
        let body = json!({ "email": email, "password": password });
        let value = self
            .send(self.request(Method::POST, "/account/sessions/email").json(&body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        let path = format!("/account/sessions/{}", session_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    fn oauth2_url(&self, provider: &str, success: &Url, failure: &Url) -> AppResult<Url> {
        let raw = self.url(&format!("/account/sessions/oauth2/{}", provider));
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::config(format!("Invalid OAuth URL '{}': {}", raw, e)))?;
        url.query_pairs_mut()
            .append_pair("project", &self.project_id)
            .append_pair("success", success.as_str())
            .append_pair("failure", failure.as_str());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AppwriteClient {
        let config = AppwriteConfig::from_lookup(|name| match name {
            "PUBLIC_APPWRITE_ENDPOINT" => Some("https://appwrite.example.com/v1/".to_string()),
            "PUBLIC_APPWRITE_PROJECT_ID" => Some("proj-1".to_string()),
            _ => None,
        })
        .unwrap();
        AppwriteClient::new(&config, &HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_paths_join_without_double_slash() {
        let client = client();
        assert_eq!(
            client.url(&AppwriteClient::collection_path("db", "tasks")),
            "https://appwrite.example.com/v1/databases/db/collections/tasks"
        );
    }

    #[test]
    fn test_oauth2_url_carries_project_and_redirects() {
        let client = client();
        let success = Url::parse("https://app.example.com/dashboard").unwrap();
        let failure = Url::parse("https://app.example.com/auth/failure").unwrap();

        let url = client.oauth2_url("google", &success, &failure).unwrap();
        assert_eq!(url.path(), "/v1/account/sessions/oauth2/google");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("project".to_string(), "proj-1".to_string())));
        assert!(pairs.contains(&("success".to_string(), success.to_string())));
        assert!(pairs.contains(&("failure".to_string(), failure.to_string())));
    }
}
