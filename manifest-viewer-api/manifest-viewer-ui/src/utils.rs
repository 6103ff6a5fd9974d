use manifest_viewer_common::{export, ResourceDocument};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlAnchorElement, Url};

/// Pretty JSON for a detail section
pub fn pretty_section(section: &Value) -> String {
    serde_json::to_string_pretty(section).unwrap_or_else(|_| section.to_string())
}

/// Titled Metadata/Spec/Status sections, skipping any that are absent or null
pub fn detail_sections(doc: &ResourceDocument) -> Vec<(&'static str, String)> {
    [
        ("Metadata", doc.metadata()),
        ("Spec", doc.spec()),
        ("Status", doc.status()),
    ]
    .into_iter()
    .filter_map(|(title, section)| match section {
        Some(Value::Null) | None => None,
        Some(value) => Some((title, pretty_section(value))),
    })
    .collect()
}

/// Whether two documents are the same object, matched by `metadata.uid`
pub fn same_resource(a: &ResourceDocument, b: &ResourceDocument) -> bool {
    matches!((a.uid(), b.uid()), (Some(x), Some(y)) if x == y)
}

/// Badge colors for a status phase
pub fn phase_class(phase: Option<&str>) -> &'static str {
    match phase {
        Some("Running") | Some("Active") | Some("Succeeded") => "bg-green-100 text-green-800",
        Some("Pending") => "bg-yellow-100 text-yellow-800",
        Some("Failed") | Some("Terminating") => "bg-red-100 text-red-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

/// Render the document as YAML and hand it to the browser as `<name>.yaml`
pub fn download_yaml(doc: &ResourceDocument) -> Result<(), String> {
    let yaml = export::to_yaml(doc).map_err(|e| e.to_string())?;
    download_text(&export::file_name(doc), &yaml)
        .map_err(|e| format!("Download failed: {:?}", e))
}

fn download_text(file_name: &str, contents: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(contents));

    let blob = Blob::new_with_str_sequence(&parts)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ResourceDocument {
        ResourceDocument::try_from(value).unwrap()
    }

    #[test]
    fn test_pretty_section() {
        let value = json!({"replicas": 2});
        assert_eq!(pretty_section(&value), "{\n  \"replicas\": 2\n}");
    }

    #[test]
    fn test_detail_sections_skip_missing() {
        let service = doc(json!({
            "metadata": {"name": "web"},
            "spec": {"ports": []},
            "status": null
        }));
        let titles: Vec<_> = detail_sections(&service).into_iter().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["Metadata", "Spec"]);

        let pod = doc(json!({"metadata": {}, "spec": {}, "status": {"phase": "Running"}}));
        let sections = detail_sections(&pod);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1], ("Spec", "{}".to_string()));
    }

    #[test]
    fn test_same_resource_matches_by_uid() {
        let a = doc(json!({"metadata": {"name": "web", "uid": "u-1"}}));
        let renamed = doc(json!({"metadata": {"name": "web-2", "uid": "u-1"}}));
        let other = doc(json!({"metadata": {"name": "web", "uid": "u-2"}}));
        let no_uid = doc(json!({"metadata": {"name": "web"}}));

        assert!(same_resource(&a, &renamed));
        assert!(!same_resource(&a, &other));
        assert!(!same_resource(&no_uid, &no_uid));
    }

    #[test]
    fn test_phase_class() {
        assert_eq!(phase_class(Some("Running")), "bg-green-100 text-green-800");
        assert_eq!(phase_class(None), "bg-gray-100 text-gray-800");
    }
}
