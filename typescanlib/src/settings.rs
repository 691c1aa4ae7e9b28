//! Discovery settings loaded from a JSON file.
//!
//! ```json
//! {
//!   "classes": ["com.example.User"],
//!   "classPatterns": ["com.example.dto.**"],
//!   "entryPoint": "com.example.App",
//!   "automaticEntryPoint": false,
//!   "excludeClasses": ["com.example.dto.Internal"],
//!   "excludeClassPatterns": ["**Test"]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::discover::DiscoveryRequest;
use crate::error::TypescanError;
use crate::filter::NameFilter;
use crate::Result;

/// Serializable form of a [`DiscoveryRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiscoverySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub automatic_entry_point: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_class_patterns: Vec<String>,
}

impl DiscoverySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TypescanError::Settings(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TypescanError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json)
            .map_err(|e| TypescanError::Settings(format!("{}: {e}", path.display())))
    }

    /// Build the request these settings describe.
    pub fn to_request(&self) -> DiscoveryRequest {
        let exclude = NameFilter::new()
            .exclude_names(&self.exclude_classes)
            .exclude_patterns(&self.exclude_class_patterns);

        DiscoveryRequest {
            class_names: self.classes.clone(),
            class_name_patterns: self.class_patterns.clone(),
            entry_point: self.entry_point.clone(),
            automatic_entry_point: self.automatic_entry_point,
            exclude,
        }
    }
}
