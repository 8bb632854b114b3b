//! Schema provisioning
//!
//! Creates the database, the six collections, their attributes and indexes.
//! Safe to re-run: resources that already exist are reused or skipped. Only
//! a failure to create or fetch the database or a collection aborts the run.

use crate::error::AppResult;
use crate::provider::{AttributeStatus, SchemaAdmin};
use crate::schema::{self, CollectionSpec, DATABASE_NAME};
use crate::utils::logging::log_provisioning_skip;
use crate::utils::retry::{poll_until_ready, RetryConfig};
use log::info;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Pause after each attribute call.
    pub attribute_delay: Duration,
    /// Pause after each index call.
    pub index_delay: Duration,
    /// Polling for attributes to become available before indexing.
    pub readiness: RetryConfig,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            attribute_delay: Duration::from_millis(100),
            index_delay: Duration::from_millis(200),
            readiness: RetryConfig::default(),
        }
    }
}

impl ProvisionOptions {
    /// No pacing and a single readiness check.
    pub fn immediate() -> Self {
        Self {
            attribute_delay: Duration::ZERO,
            index_delay: Duration::ZERO,
            readiness: RetryConfig::immediate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionReport {
    pub id: String,
    /// False when the collection already existed.
    pub created: bool,
    pub attributes_created: Vec<String>,
    pub attributes_skipped: Vec<String>,
    /// Every created or pre-existing attribute reported available before indexing.
    pub ready: bool,
    pub indexes_created: Vec<String>,
    pub indexes_skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionReport {
    pub database_id: String,
    pub database_created: bool,
    pub collections: Vec<CollectionReport>,
}

impl ProvisionReport {
    pub fn log_summary(&self) {
        info!(
            "Database '{}' {}",
            self.database_id,
            if self.database_created { "created" } else { "already existed" }
        );
        for c in &self.collections {
            info!(
                "  {}: {} | attributes {} created, {} skipped | indexes {} created, {} skipped{}",
                c.id,
                if c.created { "created" } else { "existing" },
                c.attributes_created.len(),
                c.attributes_skipped.len(),
                c.indexes_created.len(),
                c.indexes_skipped.len(),
                if c.ready { "" } else { " | attributes still processing" }
            );
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Creates the database, or confirms it exists. Returns whether it was created.
async fn ensure_database(admin: &dyn SchemaAdmin, database_id: &str) -> AppResult<bool> {
    match admin.create_database(database_id, DATABASE_NAME).await {
        Ok(_) => {
            info!("Created database '{}'", database_id);
            Ok(true)
        }
        Err(e) if e.is_conflict() => {
            admin.get_database(database_id).await?;
            info!("Database '{}' already exists", database_id);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

async fn ensure_collection(admin: &dyn SchemaAdmin, database_id: &str, spec: &CollectionSpec) -> AppResult<bool> {
    match admin
        .create_collection(database_id, spec.id, spec.name, spec.permissions.clone(), spec.document_security)
        .await
    {
        Ok(_) => {
            info!("Created collection '{}'", spec.id);
            Ok(true)
        }
        Err(e) if e.is_conflict() => {
            admin.get_collection(database_id, spec.id).await?;
            info!("Collection '{}' already exists", spec.id);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Whether every attribute in `keys` reports available.
async fn attributes_available(
    admin: &dyn SchemaAdmin,
    database_id: &str,
    collection_id: &str,
    keys: &[&str],
) -> AppResult<bool> {
    let states = admin.list_attributes(database_id, collection_id).await?;
    Ok(keys.iter().all(|key| {
        states
            .iter()
            .any(|s| s.key == *key && s.status == AttributeStatus::Available)
    }))
}

async fn provision_collection(
    admin: &dyn SchemaAdmin,
    database_id: &str,
    spec: &CollectionSpec,
    options: &ProvisionOptions,
) -> AppResult<CollectionReport> {
    let mut report = CollectionReport {
        id: spec.id.to_string(),
        created: ensure_collection(admin, database_id, spec).await?,
        ..Default::default()
    };

    // Only created or pre-existing attributes can become available.
    let mut awaited = Vec::new();
    for attribute in &spec.attributes {
        match admin.create_attribute(database_id, spec.id, attribute).await {
            Ok(_) => {
                report.attributes_created.push(attribute.key.to_string());
                awaited.push(attribute.key);
            }
            Err(e) => {
                log_provisioning_skip("Attribute", &format!("{}.{}", spec.id, attribute.key), &e);
                report.attributes_skipped.push(attribute.key.to_string());
                if e.is_conflict() {
                    awaited.push(attribute.key);
                }
            }
        }
        pause(options.attribute_delay).await;
    }

    let what = format!("Collection '{}' attributes", spec.id);
    report.ready = poll_until_ready(&options.readiness, &what, || {
        attributes_available(admin, database_id, spec.id, &awaited)
    })
    .await?;

    for index in &spec.indexes {
        match admin.create_index(database_id, spec.id, index).await {
            Ok(_) => report.indexes_created.push(index.key.to_string()),
            Err(e) => {
                log_provisioning_skip("Index", &format!("{}.{}", spec.id, index.key), &e);
                report.indexes_skipped.push(index.key.to_string());
            }
        }
        pause(options.index_delay).await;
    }

    Ok(report)
}

/// Provisions every collection in order, returning what was created or skipped.
pub async fn setup_database(
    admin: &dyn SchemaAdmin,
    database_id: &str,
    options: &ProvisionOptions,
) -> AppResult<ProvisionReport> {
    info!("Setting up database '{}'", database_id);
    let mut report = ProvisionReport {
        database_id: database_id.to_string(),
        database_created: ensure_database(admin, database_id).await?,
        collections: Vec::new(),
    };

    for spec in schema::all_collections() {
        report
            .collections
            .push(provision_collection(admin, database_id, &spec, options).await?);
    }

    info!("Database setup complete");
    Ok(report)
}
