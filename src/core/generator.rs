//! Values for generated fields
//!
//! An element's `generator` names how its value is produced instead of being
//! typed in by a user. Tags that only storage can satisfy (e.g.
//! `autoincrement`) produce no value here.

use chrono::{SecondsFormat, Utc};
use ulid::Ulid;
use uuid::Uuid;

/// Produce a value for a generator tag, or `None` if the tag is left to storage
pub fn generate_value(tag: &str) -> Option<String> {
    match tag.to_lowercase().as_str() {
        "uuid" => Some(Uuid::new_v4().to_string()),
        "ulid" => Some(Ulid::new().to_string()),
        "timestamp" | "current_timestamp" | "created_timestamp" => {
            Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
        }
        "date" | "current_date" | "created_date" => {
            Some(Utc::now().date_naive().format("%Y-%m-%d").to_string())
        }
        _ => None,
    }
}

/// Whether the tag refers to a creation-time value that must not change on update
pub fn is_creation_tag(tag: &str) -> bool {
    tag.starts_with("created_")
}
