use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A single blacklist or whitelist entry for firehose events.
///
/// Only the shape is checked here. Whether `event_type` names a known event,
/// whether `sink` is one of `monitoring`, `logging` or `all`, and whether
/// `regexp` compiles are all left to the filtering engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilterRule {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub sink: String,
    #[serde(default)]
    pub regexp: String,
}

impl fmt::Display for EventFilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} matches {:?}", self.sink, self.event_type, self.regexp)
    }
}

/// Blacklist and whitelist rules as loaded from the event filter file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilterRules {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blacklist: Vec<EventFilterRule>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub whitelist: Vec<EventFilterRule>,
}

impl EventFilterRules {
    /// Parses the filter file contents.
    ///
    /// Returns `Ok(None)` for an empty byte stream: an operator may template
    /// the file without any rules, which means "no filter", not a parse error.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Option<Self>, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let parsed = serde_json::from_slice::<Option<Self>>(bytes)?;
        Ok(Some(parsed.unwrap_or_default()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blacklist.is_empty() && self.whitelist.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<EventFilterRule>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<EventFilterRule>>::deserialize(deserializer)?.unwrap_or_default())
}
