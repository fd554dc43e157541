use std::{env, fmt, num::ParseIntError, path::PathBuf};

use gce_metadata_client::MetadataError;
use thiserror::Error;
use tracing::{debug, info};

use crate::filter::EventFilterRules;
use crate::identity::{MetadataProvider, NozzleIdentity};

pub const ENV_FIREHOSE_ENDPOINT: &str = "FIREHOSE_ENDPOINT";
pub const ENV_FIREHOSE_EVENTS_TO_LOGGING: &str = "FIREHOSE_EVENTS_TO_STACKDRIVER_LOGGING";
pub const ENV_FIREHOSE_EVENTS_TO_MONITORING: &str = "FIREHOSE_EVENTS_TO_STACKDRIVER_MONITORING";
pub const ENV_FIREHOSE_USERNAME: &str = "FIREHOSE_USERNAME";
pub const ENV_FIREHOSE_PASSWORD: &str = "FIREHOSE_PASSWORD";
pub const ENV_FIREHOSE_SKIP_SSL: &str = "FIREHOSE_SKIP_SSL";
pub const ENV_FIREHOSE_SUBSCRIPTION_ID: &str = "FIREHOSE_SUBSCRIPTION_ID";
pub const ENV_FIREHOSE_NEWLINE_TOKEN: &str = "FIREHOSE_NEWLINE_TOKEN";
pub const ENV_GCP_PROJECT_ID: &str = "GCP_PROJECT_ID";
pub const ENV_LOGGING_BATCH_COUNT: &str = "LOGGING_BATCH_COUNT";
pub const ENV_LOGGING_BATCH_DURATION: &str = "LOGGING_BATCH_DURATION";
pub const ENV_LOGGING_REQUESTS_IN_FLIGHT: &str = "LOGGING_REQUESTS_IN_FLIGHT";
pub const ENV_HEARTBEAT_RATE: &str = "HEARTBEAT_RATE";
pub const ENV_METRICS_BUFFER_DURATION: &str = "METRICS_BUFFER_DURATION";
pub const ENV_METRICS_BATCH_SIZE: &str = "METRICS_BATCH_SIZE";
pub const ENV_METRIC_PATH_PREFIX: &str = "METRIC_PATH_PREFIX";
pub const ENV_FOUNDATION_NAME: &str = "FOUNDATION_NAME";
pub const ENV_RESOLVE_APP_METADATA: &str = "RESOLVE_APP_METADATA";
pub const ENV_NOZZLE_ID: &str = "NOZZLE_ID";
pub const ENV_NOZZLE_NAME: &str = "NOZZLE_NAME";
pub const ENV_NOZZLE_ZONE: &str = "NOZZLE_ZONE";
pub const ENV_DEBUG_NOZZLE: &str = "DEBUG_NOZZLE";
pub const ENV_RUNTIME_METRIC_REGEX: &str = "RUNTIME_METRIC_REGEX";
pub const ENV_ENABLE_CUMULATIVE_COUNTERS: &str = "ENABLE_CUMULATIVE_COUNTERS";
pub const ENV_ENABLE_APP_HTTP_METRICS: &str = "ENABLE_APP_HTTP_METRICS";
pub const ENV_COUNTER_TRACKER_TTL: &str = "COUNTER_TRACKER_TTL";
pub const ENV_EVENT_FILTER_FILE: &str = "EVENT_FILTER_FILE";

const DEFAULT_FIREHOSE_USERNAME: &str = "admin";
const DEFAULT_FIREHOSE_PASSWORD: &str = "admin";
const DEFAULT_LOGGING_BATCH_COUNT: usize = 1000;
const DEFAULT_LOGGING_BATCH_DURATION_SECONDS: u64 = 30;
const DEFAULT_LOGGING_REQUESTS_IN_FLIGHT: usize = 16;
const DEFAULT_HEARTBEAT_RATE_SECONDS: u64 = 30;
const DEFAULT_METRICS_BUFFER_DURATION_SECONDS: u64 = 30;
const DEFAULT_METRICS_BATCH_SIZE: usize = 200;
const DEFAULT_METRIC_PATH_PREFIX: &str = "firehose";
const DEFAULT_FOUNDATION_NAME: &str = "cf";
pub const DEFAULT_NOZZLE_IDENTITY: &str = "local-nozzle";
// Runtime metrics get `origin` as a label instead of a metric name prefix.
const DEFAULT_RUNTIME_METRIC_REGEX: &str = r"^(numCPUS|numGoRoutines|memoryStats\..*)$";
const DEFAULT_COUNTER_TRACKER_TTL_SECONDS: u64 = 130;

/// Nozzle settings, assembled once at startup by [`Config::load`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    // Firehose
    pub api_endpoint: String,
    pub logging_events: String,
    pub monitoring_events: String,
    pub username: String,
    pub password: String,
    pub skip_ssl: bool,
    pub subscription_id: String,
    pub newline_token: String,

    // Stackdriver
    pub project_id: String,
    pub logging_batch_count: usize,
    pub logging_batch_duration_seconds: u64,
    pub logging_requests_in_flight: usize,

    // Nozzle
    pub heartbeat_rate_seconds: u64,
    pub metrics_buffer_duration_seconds: u64,
    pub metrics_batch_size: usize,
    pub metric_path_prefix: String,
    pub foundation_name: String,
    pub resolve_app_metadata: bool,
    pub nozzle: NozzleIdentity,
    pub debug_nozzle: bool,
    pub runtime_metric_regex: String,
    /// Report CounterEvents as cumulative metrics instead of delta/total
    /// gauges. Requires every event of a given counter to reach the same
    /// nozzle process.
    pub enable_cumulative_counters: bool,
    pub enable_app_http_metrics: bool,
    pub counter_tracker_ttl_seconds: u64,

    // Blacklists and whitelists do not fit in env vars; they are templated
    // into a JSON file instead.
    pub event_filter_file: Option<PathBuf>,
    /// `None` means no filter file (or an empty one): every event goes to
    /// every sink.
    pub event_filter: Option<EventFilterRules>,
}

/// Pipeline stage at which [`Config::load`] gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStage {
    EnvLoad,
    Validate,
    ResolveProjectId,
    LoadEventFilter,
}

impl LoadStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnvLoad => "env_load",
            Self::Validate => "validate",
            Self::ResolveProjectId => "resolve_project_id",
            Self::LoadEventFilter => "load_event_filter",
        }
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("FIREHOSE_SUBSCRIPTION_ID is empty")]
    MissingSubscriptionId,
    #[error("FIREHOSE_ENDPOINT is empty")]
    MissingEndpoint,
    #[error(
        "FIREHOSE_EVENTS_TO_STACKDRIVER_LOGGING and FIREHOSE_EVENTS_TO_STACKDRIVER_MONITORING are empty"
    )]
    MissingEventSinks,
}

impl ValidationError {
    /// Variables named by this error. Setting any one of them clears it.
    #[must_use]
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::MissingSubscriptionId => &[ENV_FIREHOSE_SUBSCRIPTION_ID],
            Self::MissingEndpoint => &[ENV_FIREHOSE_ENDPOINT],
            Self::MissingEventSinks => {
                &[ENV_FIREHOSE_EVENTS_TO_LOGGING, ENV_FIREHOSE_EVENTS_TO_MONITORING]
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: expected true or false, got '{value}'")]
    InvalidBool { key: &'static str, value: String },
    #[error("invalid {key} value '{value}': {source}")]
    InvalidInteger {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to resolve project id from metadata server: {0}")]
    ProjectId(#[source] MetadataError),
    #[error("failed to read event filter file {}: {source}", .path.display())]
    FilterFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse event filter file {}: {source}", .path.display())]
    FilterFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn stage(&self) -> LoadStage {
        match self {
            Self::InvalidBool { .. } | Self::InvalidInteger { .. } => LoadStage::EnvLoad,
            Self::Validation(_) => LoadStage::Validate,
            Self::ProjectId(_) => LoadStage::ResolveProjectId,
            Self::FilterFileRead { .. } | Self::FilterFileParse { .. } => {
                LoadStage::LoadEventFilter
            }
        }
    }
}

impl Config {
    /// Runs the full startup pipeline: read, validate, resolve the project id,
    /// load the event filter, then label the nozzle with host metadata.
    pub async fn load<P>(
        lookup: impl Fn(&str) -> Option<String>,
        metadata: &P,
    ) -> Result<Self, ConfigError>
    where
        P: MetadataProvider + ?Sized,
    {
        let mut config = Self::from_lookup(lookup)?;
        config.validate()?;
        config.ensure_project_id(metadata).await?;
        config.load_event_filter()?;
        let nozzle = std::mem::take(&mut config.nozzle);
        config.nozzle = nozzle.enrich_from_host(metadata).await;
        Ok(config)
    }

    pub async fn from_env<P>(metadata: &P) -> Result<Self, ConfigError>
    where
        P: MetadataProvider + ?Sized,
    {
        Self::load(|key| env::var(key).ok(), metadata).await
    }

    /// Reads every field from `lookup`, applying defaults. Does not validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_endpoint: string_or(&lookup, ENV_FIREHOSE_ENDPOINT, ""),
            logging_events: string_or(&lookup, ENV_FIREHOSE_EVENTS_TO_LOGGING, ""),
            monitoring_events: string_or(&lookup, ENV_FIREHOSE_EVENTS_TO_MONITORING, ""),
            username: string_or(&lookup, ENV_FIREHOSE_USERNAME, DEFAULT_FIREHOSE_USERNAME),
            password: string_or(&lookup, ENV_FIREHOSE_PASSWORD, DEFAULT_FIREHOSE_PASSWORD),
            skip_ssl: parse_bool_lookup(&lookup, ENV_FIREHOSE_SKIP_SSL, false)?,
            subscription_id: string_or(&lookup, ENV_FIREHOSE_SUBSCRIPTION_ID, ""),
            newline_token: string_or(&lookup, ENV_FIREHOSE_NEWLINE_TOKEN, ""),
            project_id: string_or(&lookup, ENV_GCP_PROJECT_ID, ""),
            logging_batch_count: parse_int_lookup(
                &lookup,
                ENV_LOGGING_BATCH_COUNT,
                DEFAULT_LOGGING_BATCH_COUNT,
            )?,
            logging_batch_duration_seconds: parse_int_lookup(
                &lookup,
                ENV_LOGGING_BATCH_DURATION,
                DEFAULT_LOGGING_BATCH_DURATION_SECONDS,
            )?,
            logging_requests_in_flight: parse_int_lookup(
                &lookup,
                ENV_LOGGING_REQUESTS_IN_FLIGHT,
                DEFAULT_LOGGING_REQUESTS_IN_FLIGHT,
            )?,
            heartbeat_rate_seconds: parse_int_lookup(
                &lookup,
                ENV_HEARTBEAT_RATE,
                DEFAULT_HEARTBEAT_RATE_SECONDS,
            )?,
            metrics_buffer_duration_seconds: parse_int_lookup(
                &lookup,
                ENV_METRICS_BUFFER_DURATION,
                DEFAULT_METRICS_BUFFER_DURATION_SECONDS,
            )?,
            metrics_batch_size: parse_int_lookup(
                &lookup,
                ENV_METRICS_BATCH_SIZE,
                DEFAULT_METRICS_BATCH_SIZE,
            )?,
            metric_path_prefix: string_or(
                &lookup,
                ENV_METRIC_PATH_PREFIX,
                DEFAULT_METRIC_PATH_PREFIX,
            ),
            foundation_name: string_or(&lookup, ENV_FOUNDATION_NAME, DEFAULT_FOUNDATION_NAME),
            resolve_app_metadata: parse_bool_lookup(&lookup, ENV_RESOLVE_APP_METADATA, false)?,
            nozzle: NozzleIdentity {
                id: string_or(&lookup, ENV_NOZZLE_ID, DEFAULT_NOZZLE_IDENTITY),
                name: string_or(&lookup, ENV_NOZZLE_NAME, DEFAULT_NOZZLE_IDENTITY),
                zone: string_or(&lookup, ENV_NOZZLE_ZONE, DEFAULT_NOZZLE_IDENTITY),
            },
            debug_nozzle: parse_bool_lookup(&lookup, ENV_DEBUG_NOZZLE, false)?,
            runtime_metric_regex: string_or(
                &lookup,
                ENV_RUNTIME_METRIC_REGEX,
                DEFAULT_RUNTIME_METRIC_REGEX,
            ),
            enable_cumulative_counters: parse_bool_lookup(
                &lookup,
                ENV_ENABLE_CUMULATIVE_COUNTERS,
                false,
            )?,
            enable_app_http_metrics: parse_bool_lookup(
                &lookup,
                ENV_ENABLE_APP_HTTP_METRICS,
                false,
            )?,
            counter_tracker_ttl_seconds: parse_int_lookup(
                &lookup,
                ENV_COUNTER_TRACKER_TTL,
                DEFAULT_COUNTER_TRACKER_TTL_SECONDS,
            )?,
            event_filter_file: lookup(ENV_EVENT_FILTER_FILE)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            event_filter: None,
        })
    }

    /// Checks cross-field invariants, stopping at the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subscription_id.is_empty() {
            return Err(ValidationError::MissingSubscriptionId);
        }
        if self.api_endpoint.is_empty() {
            return Err(ValidationError::MissingEndpoint);
        }
        if self.logging_events.is_empty() && self.monitoring_events.is_empty() {
            return Err(ValidationError::MissingEventSinks);
        }
        Ok(())
    }

    /// Fills `project_id` from the metadata server when it was not configured.
    pub async fn ensure_project_id<P>(&mut self, metadata: &P) -> Result<(), ConfigError>
    where
        P: MetadataProvider + ?Sized,
    {
        if !self.project_id.is_empty() {
            debug!(project_id = %self.project_id, "using configured project id");
            return Ok(());
        }
        let project_id = metadata.project_id().await.map_err(ConfigError::ProjectId)?;
        info!(project_id = %project_id, "resolved project id from metadata server");
        self.project_id = project_id;
        Ok(())
    }

    /// Loads `event_filter_file`, if configured, into `event_filter`.
    pub fn load_event_filter(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.event_filter_file.as_ref() else {
            return Ok(());
        };
        let bytes = std::fs::read(path).map_err(|source| ConfigError::FilterFileRead {
            path: path.clone(),
            source,
        })?;
        let rules = EventFilterRules::from_json_slice(&bytes).map_err(|source| {
            ConfigError::FilterFileParse {
                path: path.clone(),
                source,
            }
        })?;
        match rules.as_ref() {
            Some(rules) => info!(
                path = %path.display(),
                blacklist = rules.blacklist.len(),
                whitelist = rules.whitelist.len(),
                "loaded event filter rules"
            ),
            None => info!(path = %path.display(), "event filter file is empty; filtering disabled"),
        }
        self.event_filter = rules;
        Ok(())
    }
}

fn non_empty_token(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// Strings pass through untouched; the default covers only an absent variable.
fn string_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_with_lookup<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    parser: impl FnOnce(String) -> Result<T, ConfigError>,
) -> Result<T, ConfigError> {
    match non_empty_token(lookup, key) {
        Some(raw) => parser(raw),
        None => Ok(default),
    }
}

fn parse_bool_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    parse_with_lookup(lookup, key, default, |raw| {
        match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConfigError::InvalidBool { key, value: raw }),
        }
    })
}

fn parse_int_lookup<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    parse_with_lookup(lookup, key, default, |raw| {
        raw.parse::<T>()
            .map_err(|source| ConfigError::InvalidInteger {
                key,
                value: raw,
                source,
            })
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(values: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let values = values.iter().copied().collect::<HashMap<_, _>>();
        Config::from_lookup(|key| values.get(key).map(ToString::to_string))
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).expect("config parse");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "admin");
        assert!(!config.skip_ssl);
        assert_eq!(config.logging_batch_count, 1000);
        assert_eq!(config.logging_batch_duration_seconds, 30);
        assert_eq!(config.logging_requests_in_flight, 16);
        assert_eq!(config.heartbeat_rate_seconds, 30);
        assert_eq!(config.metrics_buffer_duration_seconds, 30);
        assert_eq!(config.metrics_batch_size, 200);
        assert_eq!(config.metric_path_prefix, "firehose");
        assert_eq!(config.foundation_name, "cf");
        assert_eq!(config.nozzle.id, "local-nozzle");
        assert_eq!(config.nozzle.name, "local-nozzle");
        assert_eq!(config.nozzle.zone, "local-nozzle");
        assert_eq!(
            config.runtime_metric_regex,
            r"^(numCPUS|numGoRoutines|memoryStats\..*)$"
        );
        assert_eq!(config.counter_tracker_ttl_seconds, 130);
        assert!(config.project_id.is_empty());
        assert_eq!(config.event_filter_file, None);
        assert_eq!(config.event_filter, None);
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = config_from(&[
            (ENV_FIREHOSE_ENDPOINT, "https://api.sys.example.com"),
            (ENV_FIREHOSE_SUBSCRIPTION_ID, "stackdriver-nozzle"),
            (ENV_FIREHOSE_EVENTS_TO_LOGGING, "LogMessage,Error"),
            (ENV_FIREHOSE_SKIP_SSL, "TRUE"),
            (ENV_LOGGING_BATCH_COUNT, "50"),
            (ENV_METRICS_BATCH_SIZE, " 10 "),
            (ENV_NOZZLE_ZONE, "us-west1-a"),
            (ENV_EVENT_FILTER_FILE, "/var/vcap/jobs/nozzle/filters.json"),
        ])
        .expect("config parse");
        assert_eq!(config.api_endpoint, "https://api.sys.example.com");
        assert_eq!(config.subscription_id, "stackdriver-nozzle");
        assert_eq!(config.logging_events, "LogMessage,Error");
        assert!(config.skip_ssl);
        assert_eq!(config.logging_batch_count, 50);
        assert_eq!(config.metrics_batch_size, 10);
        assert_eq!(config.nozzle.zone, "us-west1-a");
        assert_eq!(
            config.event_filter_file,
            Some(PathBuf::from("/var/vcap/jobs/nozzle/filters.json"))
        );
    }

    #[test]
    fn booleans_accept_any_case() {
        for (raw, expected) in [("true", true), ("True", true), ("fAlSe", false), ("FALSE", false)] {
            let config = config_from(&[(ENV_DEBUG_NOZZLE, raw)]).expect("config parse");
            assert_eq!(config.debug_nozzle, expected, "{raw}");
        }
    }

    #[test]
    fn booleans_reject_other_tokens() {
        for raw in ["1", "yes", "on", "t", "truthy"] {
            let error = config_from(&[(ENV_ENABLE_CUMULATIVE_COUNTERS, raw)])
                .expect_err("invalid bool should fail");
            match &error {
                ConfigError::InvalidBool { key, value } => {
                    assert_eq!(*key, ENV_ENABLE_CUMULATIVE_COUNTERS);
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert!(error.to_string().contains(ENV_ENABLE_CUMULATIVE_COUNTERS));
            assert_eq!(error.stage(), LoadStage::EnvLoad);
        }
    }

    #[test]
    fn integers_reject_malformed_values() {
        for raw in ["ten", "-5", "1.5"] {
            let error = config_from(&[(ENV_HEARTBEAT_RATE, raw)])
                .expect_err("invalid integer should fail");
            match error {
                ConfigError::InvalidInteger { key, value, .. } => {
                    assert_eq!(key, ENV_HEARTBEAT_RATE);
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn blank_tokens_fall_back_to_defaults() {
        let config = config_from(&[
            (ENV_FIREHOSE_SKIP_SSL, ""),
            (ENV_LOGGING_BATCH_COUNT, " "),
            (ENV_EVENT_FILTER_FILE, ""),
        ])
        .expect("config parse");
        assert!(!config.skip_ssl);
        assert_eq!(config.logging_batch_count, 1000);
        assert_eq!(config.event_filter_file, None);
    }

    #[test]
    fn string_values_are_kept_verbatim() {
        let config = config_from(&[
            (ENV_FIREHOSE_PASSWORD, " s3cret "),
            (ENV_FIREHOSE_NEWLINE_TOKEN, " ∴ "),
        ])
        .expect("config parse");
        assert_eq!(config.password, " s3cret ");
        assert_eq!(config.newline_token, " ∴ ");

        let config = config_from(&[(ENV_FIREHOSE_PASSWORD, "   ")]).expect("config parse");
        assert_eq!(config.password, "   ");
    }

    #[test]
    fn explicit_empty_strings_override_defaults() {
        let config = config_from(&[
            (ENV_METRIC_PATH_PREFIX, ""),
            (ENV_FIREHOSE_USERNAME, ""),
            (ENV_NOZZLE_NAME, ""),
        ])
        .expect("config parse");
        assert_eq!(config.metric_path_prefix, "");
        assert_eq!(config.username, "");
        assert_eq!(config.nozzle.name, "");
        assert_eq!(config.foundation_name, "cf");
    }

    #[test]
    fn validation_reports_first_violation_in_order() {
        let empty = config_from(&[]).expect("config parse");
        assert_eq!(empty.validate(), Err(ValidationError::MissingSubscriptionId));

        let no_endpoint = config_from(&[(ENV_FIREHOSE_SUBSCRIPTION_ID, "sub")])
            .expect("config parse");
        assert_eq!(no_endpoint.validate(), Err(ValidationError::MissingEndpoint));

        let no_sinks = config_from(&[
            (ENV_FIREHOSE_SUBSCRIPTION_ID, "sub"),
            (ENV_FIREHOSE_ENDPOINT, "https://api.example.com"),
        ])
        .expect("config parse");
        assert_eq!(no_sinks.validate(), Err(ValidationError::MissingEventSinks));
    }

    #[test]
    fn either_event_sink_satisfies_validation() {
        for key in [ENV_FIREHOSE_EVENTS_TO_LOGGING, ENV_FIREHOSE_EVENTS_TO_MONITORING] {
            let config = config_from(&[
                (ENV_FIREHOSE_SUBSCRIPTION_ID, "sub"),
                (ENV_FIREHOSE_ENDPOINT, "https://api.example.com"),
                (key, "ValueMetric"),
            ])
            .expect("config parse");
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn validation_messages_name_the_variable() {
        assert_eq!(
            ValidationError::MissingSubscriptionId.to_string(),
            "FIREHOSE_SUBSCRIPTION_ID is empty"
        );
        assert_eq!(
            ValidationError::MissingEndpoint.to_string(),
            "FIREHOSE_ENDPOINT is empty"
        );
        assert_eq!(
            ValidationError::MissingEventSinks.to_string(),
            "FIREHOSE_EVENTS_TO_STACKDRIVER_LOGGING and FIREHOSE_EVENTS_TO_STACKDRIVER_MONITORING are empty"
        );
        assert_eq!(ValidationError::MissingEndpoint.keys(), &[ENV_FIREHOSE_ENDPOINT]);
        assert_eq!(
            ValidationError::MissingEventSinks.keys(),
            &[ENV_FIREHOSE_EVENTS_TO_LOGGING, ENV_FIREHOSE_EVENTS_TO_MONITORING]
        );
    }
}
