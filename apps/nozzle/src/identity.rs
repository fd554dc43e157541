use async_trait::async_trait;
use gce_metadata_client::{MetadataClient, MetadataError};
use tracing::{debug, info};

use crate::config::DEFAULT_NOZZLE_IDENTITY;

/// Source of project and instance identity for the running host.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn project_id(&self) -> Result<String, MetadataError>;
    async fn on_gce(&self) -> bool;
    async fn instance_id(&self) -> Result<String, MetadataError>;
    async fn zone(&self) -> Result<String, MetadataError>;
    async fn instance_name(&self) -> Result<String, MetadataError>;
}

#[async_trait]
impl MetadataProvider for MetadataClient {
    async fn project_id(&self) -> Result<String, MetadataError> {
        MetadataClient::project_id(self).await
    }

    async fn on_gce(&self) -> bool {
        MetadataClient::on_gce(self).await
    }

    async fn instance_id(&self) -> Result<String, MetadataError> {
        MetadataClient::instance_id(self).await
    }

    async fn zone(&self) -> Result<String, MetadataError> {
        MetadataClient::zone(self).await
    }

    async fn instance_name(&self) -> Result<String, MetadataError> {
        MetadataClient::instance_name(self).await
    }
}

/// Labels attached to everything this nozzle reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NozzleIdentity {
    pub id: String,
    pub name: String,
    pub zone: String,
}

impl Default for NozzleIdentity {
    fn default() -> Self {
        Self {
            id: DEFAULT_NOZZLE_IDENTITY.to_string(),
            name: DEFAULT_NOZZLE_IDENTITY.to_string(),
            zone: DEFAULT_NOZZLE_IDENTITY.to_string(),
        }
    }
}

impl NozzleIdentity {
    /// Overwrites id, zone and name with the GCE instance values when running
    /// on GCE. Each lookup stands alone; a failed one keeps the current value.
    pub async fn enrich_from_host<P>(self, metadata: &P) -> Self
    where
        P: MetadataProvider + ?Sized,
    {
        if !metadata.on_gce().await {
            debug!("not running on GCE; keeping configured nozzle identity");
            return self;
        }
        let Self { id, name, zone } = self;
        let id = merge_lookup("nozzle_id", id, metadata.instance_id().await);
        let zone = merge_lookup("nozzle_zone", zone, metadata.zone().await);
        let name = merge_lookup("nozzle_name", name, metadata.instance_name().await);
        Self { id, name, zone }
    }
}

/// Keeps `current` unless `lookup` produced a value.
pub fn merge_lookup(
    field: &'static str,
    current: String,
    lookup: Result<String, MetadataError>,
) -> String {
    match lookup {
        Ok(value) => {
            info!(field, value = %value, "nozzle identity set from instance metadata");
            value
        }
        Err(error) => {
            debug!(field, %error, "instance metadata lookup failed; keeping configured value");
            current
        }
    }
}
