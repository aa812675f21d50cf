//! Schema Provisioner
//!
//! Creates the target index with the network-log mapping. Safe to re-run:
//! an existing index counts as success and is left untouched, even if its
//! mapping differs.

use crate::client::{CreateIndexOutcome, SearchClient};
use crate::error::AppResult;
use crate::models::IndexMapping;

/// Ensure `index` exists with `mapping`
pub async fn provision(
    client: &SearchClient,
    index: &str,
    mapping: &IndexMapping,
) -> AppResult<CreateIndexOutcome> {
    // Reaching the root endpoint needs cluster monitor rights that an
    // index creator may lack; only the create request decides the outcome
    match client.ping().await {
        Ok(info) => tracing::info!(
            "Connected to {} (node '{}', cluster '{}', version {})",
            client.base_url(),
            info.name,
            info.cluster_name,
            info.version.number
        ),
        Err(e) => tracing::warn!("Cluster info unavailable, creating index anyway: {}", e),
    }

    let outcome = client.create_index(index, &mapping.to_request_body()).await?;
    match outcome {
        CreateIndexOutcome::Created => {
            tracing::info!("Index '{}' created with correct mappings", index)
        }
        CreateIndexOutcome::AlreadyExists => {
            tracing::info!("Index '{}' already exists; mapping left unchanged", index)
        }
    }
    Ok(outcome)
}
