//! Top-level layout of the store file.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The whole store as written to disk.
///
/// Each row is a flat, versioned record (it carries its own `version` field)
/// so accounts and profiles can migrate independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub accounts: Vec<JsonValue>,
    #[serde(default)]
    pub profiles: Vec<JsonValue>,
}
