//! YAML export of resource documents

use crate::document::ResourceDocument;
use crate::Result;

/// Render a document as YAML text
pub fn to_yaml(doc: &ResourceDocument) -> Result<String> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Download file name for a document, `<metadata.name>.yaml`
pub fn file_name(doc: &ResourceDocument) -> String {
    format!("{}.yaml", doc.name().unwrap_or("resource"))
}
