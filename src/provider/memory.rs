//! In-process document store
//!
//! Behaves like the provider's document API closely enough for tests and
//! offline development: ids and timestamps are assigned on write, patches
//! merge into the stored document, and every [`Query`] variant is evaluated.

use super::permission::UNIQUE_ID;
use super::{DocumentStore, Query};
use crate::error::{AppError, AppResult};
use crate::models::DocumentList;
use crate::utils::{format_date_for_query, parse_datetime};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Collections {
    documents: HashMap<String, Vec<Map<String, Value>>>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Collections {
    /// Strictly increasing timestamps so creation order survives ordering by `$createdAt`.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored in a collection.
    pub async fn count(&self, database_id: &str, collection_id: &str) -> usize {
        let inner = self.inner.read().await;
        inner
            .documents
            .get(&collection_key(database_id, collection_id))
            .map_or(0, Vec::len)
    }
}

fn collection_key(database_id: &str, collection_id: &str) -> String {
    format!("{}/{}", database_id, collection_id)
}

fn not_found(document_id: &str) -> AppError {
    AppError::provider(
        404,
        "document_not_found",
        format!("Document with the requested ID '{}' could not be found.", document_id),
    )
}

fn into_object(data: Value) -> AppResult<Map<String, Value>> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(AppError::invalid_input(format!("Document data must be an object, got {}", other))),
    }
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => match (parse_datetime(a), parse_datetime(b)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => Some(a.cmp(b)),
        },
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    compare_values(left, right) == Some(Ordering::Equal)
}

fn contains(field: &Value, needle: &Value) -> bool {
    match (field, needle) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), needle) => items.iter().any(|item| values_equal(item, needle)),
        _ => false,
    }
}

fn matches(document: &Map<String, Value>, query: &Query) -> bool {
    let field = |attribute: &str| document.get(attribute).cloned().unwrap_or(Value::Null);
    let compares = |attribute: &str, value: &Value, accept: &[Ordering]| {
        compare_values(&field(attribute), value).is_some_and(|ord| accept.contains(&ord))
    };

    match query {
        Query::Equal(attribute, values) => {
            let current = field(attribute);
            values.iter().any(|v| values_equal(&current, v))
        }
        Query::NotEqual(attribute, value) => !values_equal(&field(attribute), value),
        Query::LessThan(attribute, value) => compares(attribute, value, &[Ordering::Less]),
        Query::LessThanEqual(attribute, value) => {
            compares(attribute, value, &[Ordering::Less, Ordering::Equal])
        }
        Query::GreaterThan(attribute, value) => compares(attribute, value, &[Ordering::Greater]),
        Query::GreaterThanEqual(attribute, value) => {
            compares(attribute, value, &[Ordering::Greater, Ordering::Equal])
        }
        Query::Contains(attribute, value) => contains(&field(attribute), value),
        Query::OrderAsc(_) | Query::OrderDesc(_) | Query::Limit(_) => true,
    }
}

/// Nulls sort first, like the provider.
fn order_by(left: &Map<String, Value>, right: &Map<String, Value>, attribute: &str) -> Ordering {
    match (left.get(attribute), right.get(attribute)) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
        permissions: Vec<String>,
    ) -> AppResult<Value> {
        let mut document = into_object(data)?;
        let mut inner = self.inner.write().await;
        let stamp = format_date_for_query(&inner.next_stamp());

        let id = if document_id == UNIQUE_ID {
            Uuid::new_v4().simple().to_string()
        } else {
            document_id.to_string()
        };

        let collection = inner
            .documents
            .entry(collection_key(database_id, collection_id))
            .or_default();
        if collection.iter().any(|doc| doc.get("$id") == Some(&Value::String(id.clone()))) {
            return Err(AppError::provider(
                409,
                "document_already_exists",
                "Document with the requested ID already exists.",
            ));
        }

        document.insert("$id".to_string(), Value::String(id));
        document.insert("$collectionId".to_string(), Value::String(collection_id.to_string()));
        document.insert("$databaseId".to_string(), Value::String(database_id.to_string()));
        document.insert("$createdAt".to_string(), Value::String(stamp.clone()));
        document.insert("$updatedAt".to_string(), Value::String(stamp));
        document.insert(
            "$permissions".to_string(),
            Value::Array(permissions.into_iter().map(Value::String).collect()),
        );

        collection.push(document.clone());
        Ok(Value::Object(document))
    }

    async fn get_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> AppResult<Value> {
        let inner = self.inner.read().await;
        inner
            .documents
            .get(&collection_key(database_id, collection_id))
            .and_then(|docs| docs.iter().find(|doc| doc.get("$id").and_then(Value::as_str) == Some(document_id)))
            .map(|doc| Value::Object(doc.clone()))
            .ok_or_else(|| not_found(document_id))
    }

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> AppResult<Value> {
        let patch = into_object(data)?;
        let mut inner = self.inner.write().await;
        let stamp = format_date_for_query(&inner.next_stamp());

        let document = inner
            .documents
            .get_mut(&collection_key(database_id, collection_id))
            .and_then(|docs| {
                docs.iter_mut()
                    .find(|doc| doc.get("$id").and_then(Value::as_str) == Some(document_id))
            })
            .ok_or_else(|| not_found(document_id))?;

        for (key, value) in patch {
            if !key.starts_with('$') {
                document.insert(key, value);
            }
        }
        document.insert("$updatedAt".to_string(), Value::String(stamp));
        Ok(Value::Object(document.clone()))
    }

    async fn delete_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let docs = inner
            .documents
            .get_mut(&collection_key(database_id, collection_id))
            .ok_or_else(|| not_found(document_id))?;

        let before = docs.len();
        docs.retain(|doc| doc.get("$id").and_then(Value::as_str) != Some(document_id));
        if docs.len() == before {
            return Err(not_found(document_id));
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: Vec<Query>,
    ) -> AppResult<DocumentList> {
        let inner = self.inner.read().await;
        let mut found: Vec<&Map<String, Value>> = inner
            .documents
            .get(&collection_key(database_id, collection_id))
            .map(|docs| docs.iter().filter(|doc| queries.iter().all(|q| matches(doc, q))).collect())
            .unwrap_or_default();

        let orders: Vec<(&str, bool)> = queries
            .iter()
            .filter_map(|q| match q {
                Query::OrderAsc(attribute) => Some((attribute.as_str(), false)),
                Query::OrderDesc(attribute) => Some((attribute.as_str(), true)),
                _ => None,
            })
            .collect();
        if !orders.is_empty() {
            found.sort_by(|a, b| {
                orders
                    .iter()
                    .map(|(attribute, descending)| {
                        let ord = order_by(a, b, attribute);
                        if *descending { ord.reverse() } else { ord }
                    })
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        let total = found.len() as u64;
        let limit = queries.iter().rev().find_map(|q| match q {
            Query::Limit(count) => Some(*count as usize),
            _ => None,
        });

        let documents = found
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|doc| Value::Object(doc.clone()))
            .collect();

        Ok(DocumentList { total, documents })
    }
}
