#![forbid(unsafe_code)]

pub mod config;
pub mod filter;
pub mod identity;
pub mod summary;

pub use config::{Config, ConfigError, LoadStage, ValidationError};
pub use filter::{EventFilterRule, EventFilterRules};
pub use identity::{MetadataProvider, NozzleIdentity};
pub use summary::REDACTED;
