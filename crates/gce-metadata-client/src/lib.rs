//! Minimal client for the Google Compute Engine metadata server.
//!
//! Only the lookups the nozzle needs at startup are exposed: the current
//! project id, the instance identity (id, zone, name) and the "are we on
//! GCE" probe. Requests are never retried.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use thiserror::Error;
use tracing::debug;

pub const ENV_METADATA_HOST: &str = "GCE_METADATA_HOST";
pub const DEFAULT_METADATA_HOST: &str = "169.254.169.254";
pub const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";
pub const METADATA_FLAVOR_GOOGLE: &str = "Google";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;

const METADATA_API_PATH: &str = "/computeMetadata/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataClientConfig {
    /// Base URL including the `/computeMetadata/v1` prefix.
    pub base_url: String,
    /// URL probed by [`MetadataClient::on_gce`].
    pub probe_url: String,
    /// Set when the host came from `GCE_METADATA_HOST`; such a host is trusted
    /// without probing.
    pub host_from_env: bool,
    pub connect_timeout_ms: u64,
}

impl MetadataClientConfig {
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        let host = host.trim().trim_end_matches('/');
        Self {
            base_url: format!("http://{host}{METADATA_API_PATH}"),
            probe_url: format!("http://{host}"),
            host_from_env: false,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(ENV_METADATA_HOST)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            Some(host) => Self {
                host_from_env: true,
                ..Self::for_host(&host)
            },
            None => Self::for_host(DEFAULT_METADATA_HOST),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Default for MetadataClientConfig {
    fn default() -> Self {
        Self::for_host(DEFAULT_METADATA_HOST)
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata_base_url_missing")]
    BaseUrlMissing,
    #[error("metadata_client_build_failed:{message}")]
    Build { message: String },
    #[error("metadata_request_failed:{message}")]
    Request { message: String },
    #[error("metadata_read_failed:{message}")]
    Read { message: String },
    #[error("metadata_not_defined:{path}")]
    NotDefined { path: String },
    #[error("metadata_empty_value:{path}")]
    EmptyValue { path: String },
    #[error("metadata_http_{status}:{body}")]
    Http { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct MetadataClient {
    base_url: String,
    probe_url: String,
    host_from_env: bool,
    http: reqwest::Client,
}

impl MetadataClient {
    pub fn new(config: MetadataClientConfig) -> Result<Self, MetadataError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let probe_url = normalize_base_url(&config.probe_url)?;
        // Only the dial is bounded; value lookups wait as long as the server does.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms.max(1)))
            .build()
            .map_err(|error| MetadataError::Build {
                message: error.to_string(),
            })?;
        Ok(Self {
            base_url,
            probe_url,
            host_from_env: config.host_from_env,
            http,
        })
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.base_url, trimmed))
    }

    pub async fn project_id(&self) -> Result<String, MetadataError> {
        self.get_trimmed("project/project-id").await
    }

    pub async fn instance_id(&self) -> Result<String, MetadataError> {
        self.get_trimmed("instance/id").await
    }

    pub async fn instance_name(&self) -> Result<String, MetadataError> {
        self.get_trimmed("instance/name").await
    }

    /// Returns the bare zone name, e.g. `us-central1-b`.
    pub async fn zone(&self) -> Result<String, MetadataError> {
        let raw = self.get_trimmed("instance/zone").await?;
        let zone = zone_from_path(&raw);
        if zone.is_empty() {
            return Err(MetadataError::EmptyValue {
                path: "instance/zone".to_string(),
            });
        }
        Ok(zone.to_string())
    }

    /// Reports whether the process appears to run on a GCE host.
    pub async fn on_gce(&self) -> bool {
        if self.host_from_env {
            return true;
        }
        match self.http.get(self.probe_url.as_str()).send().await {
            Ok(response) => has_google_flavor(response.headers().get(METADATA_FLAVOR_HEADER)),
            Err(error) => {
                debug!(probe_url = %self.probe_url, %error, "metadata server probe failed");
                false
            }
        }
    }

    pub async fn get_trimmed(&self, path: &str) -> Result<String, MetadataError> {
        let url = self
            .endpoint(path)
            .ok_or_else(|| MetadataError::NotDefined {
                path: path.to_string(),
            })?;
        let response = self
            .http
            .get(url.as_str())
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_GOOGLE)
            .send()
            .await
            .map_err(|error| MetadataError::Request {
                message: error.to_string(),
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| MetadataError::Read {
                message: error.to_string(),
            })?;

        if status == StatusCode::NOT_FOUND {
            return Err(MetadataError::NotDefined {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(format_http_error(status, &bytes));
        }

        let value = String::from_utf8_lossy(&bytes).trim().to_string();
        if value.is_empty() {
            return Err(MetadataError::EmptyValue {
                path: path.to_string(),
            });
        }
        Ok(value)
    }
}

pub fn format_http_error(status: StatusCode, body: &[u8]) -> MetadataError {
    let body = String::from_utf8_lossy(body).trim().to_string();
    let body = if body.is_empty() {
        "<empty>".to_string()
    } else {
        body
    };
    MetadataError::Http { status, body }
}

/// `projects/123/zones/us-central1-b` -> `us-central1-b`
#[must_use]
pub fn zone_from_path(raw: &str) -> &str {
    raw.rsplit('/').next().unwrap_or(raw)
}

fn has_google_flavor(value: Option<&HeaderValue>) -> bool {
    value
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim() == METADATA_FLAVOR_GOOGLE)
}

fn normalize_base_url(base_url: &str) -> Result<String, MetadataError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(MetadataError::BaseUrlMissing);
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
