use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::path::split_path;

/// A domain record persisted as source text.
///
/// `classifier_path` names the record's schema (e.g.
/// `meta::pure::metamodel::type::Class`), `path` is its unique logical name and
/// `content` is the JSON payload whose shape the classifier defines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub path: String,
    pub classifier_path: String,
    #[serde(default)]
    pub content: Map<String, Value>,
}

impl Entity {
    pub fn new(
        path: impl Into<String>,
        classifier_path: impl Into<String>,
        content: Map<String, Value>,
    ) -> Self {
        Self {
            path: path.into(),
            classifier_path: classifier_path.into(),
            content,
        }
    }

    /// Package part of `path`, if the path is qualified.
    pub fn package(&self) -> Option<&str> {
        split_path(&self.path).0
    }

    /// Simple name part of `path`.
    pub fn name(&self) -> &str {
        split_path(&self.path).1
    }
}
