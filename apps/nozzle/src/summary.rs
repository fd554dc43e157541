use serde_json::{Map, Value};

use crate::config::Config;

/// Placeholder reported in place of secrets.
pub const REDACTED: &str = "<redacted>";

impl Config {
    /// Snapshot of the settings that is safe to log.
    ///
    /// Only the fields listed here are reported. The password is always
    /// replaced by [`REDACTED`].
    #[must_use]
    pub fn redacted_summary(&self) -> Map<String, Value> {
        let mut summary = Map::new();
        let mut put = |key: &str, value: Value| {
            summary.insert(key.to_string(), value);
        };
        put("api_endpoint", Value::from(self.api_endpoint.as_str()));
        put("username", Value::from(self.username.as_str()));
        put("password", Value::from(REDACTED));
        put(
            "events_to_stackdriver_monitoring",
            Value::from(self.monitoring_events.as_str()),
        );
        put(
            "events_to_stackdriver_logging",
            Value::from(self.logging_events.as_str()),
        );
        put("skip_ssl", Value::from(self.skip_ssl));
        put("project_id", Value::from(self.project_id.as_str()));
        put("logging_batch_count", Value::from(self.logging_batch_count));
        put(
            "logging_batch_duration_seconds",
            Value::from(self.logging_batch_duration_seconds),
        );
        put("heartbeat_rate_seconds", Value::from(self.heartbeat_rate_seconds));
        put("resolve_app_metadata", Value::from(self.resolve_app_metadata));
        put("subscription_id", Value::from(self.subscription_id.as_str()));
        put("debug_nozzle", Value::from(self.debug_nozzle));
        put("newline_token", Value::from(self.newline_token.as_str()));
        summary
    }
}
