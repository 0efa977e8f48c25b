use serde::{Deserialize, Serialize};

/// One "object created" notification: the source bucket and object key.
///
/// Supplied by the trigger source and immutable for the duration of one
/// processing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub bucket: String,
    pub key: String,
}

impl EventRecord {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}
