//! Resource simplification
//!
//! Removes noisy fields from a resource document according to a configured
//! list of patterns. The rule set is fixed:
//!
//! - `managedFields` in the list removes `metadata.managedFields`
//! - every annotation whose key starts with any pattern is removed, and an
//!   annotations map left empty is removed with it
//! - `status.conditions` in the list removes `status.conditions`
//!
//! Values are never rewritten, only elided.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::ResourceDocument;

/// Marker that hides `metadata.managedFields`
pub const MANAGED_FIELDS: &str = "managedFields";

/// Marker that hides `status.conditions`
pub const STATUS_CONDITIONS: &str = "status.conditions";

/// Configured deny-list driving [`RedactionPolicy::apply`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedactionPolicy {
    patterns: Vec<String>,
}

impl RedactionPolicy {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn lists(&self, marker: &str) -> bool {
        self.patterns.iter().any(|p| p == marker)
    }

    fn hides_annotation(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| key.starts_with(p.as_str()))
    }

    /// Redacted copy of `doc`; the input is left untouched
    pub fn apply(&self, doc: &ResourceDocument) -> ResourceDocument {
        self.apply_owned(doc.clone())
    }

    /// Redact a document the caller already owns
    pub fn apply_owned(&self, mut doc: ResourceDocument) -> ResourceDocument {
        let strip_managed_fields = self.lists(MANAGED_FIELDS);

        if let Some(metadata) = doc.section_mut("metadata") {
            if strip_managed_fields {
                metadata.remove("managedFields");
            }

            let annotations_empty = match metadata.get_mut("annotations") {
                Some(Value::Object(annotations)) => {
                    annotations.retain(|key, _| !self.hides_annotation(key));
                    annotations.is_empty()
                }
                _ => false,
            };
            if annotations_empty {
                metadata.remove("annotations");
            }
        }

        if self.lists(STATUS_CONDITIONS) {
            if let Some(status) = doc.section_mut("status") {
                status.remove("conditions");
            }
        }

        doc
    }
}
