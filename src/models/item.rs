//! Item model served by the demo repository.

use serde::{Deserialize, Serialize};

/// A stored item, serialized as the cached response content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}
