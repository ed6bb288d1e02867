//! Loading of provisioning documents with secret injection

use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::SecretsConfig;
use crate::search::{SearchError, SearchResult};

/// Which definition a provisioning document holds, decided by file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `data_source.json`: needs the blob connection string
    DataSource,
    /// `skillset.json`: needs the cognitive service key and the knowledge
    /// store connection string
    Skillset,
    /// Anything else is submitted as written
    Other,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Self {
        match path.file_name().and_then(|name| name.to_str()) {
            Some("data_source.json") => DocumentKind::DataSource,
            Some("skillset.json") => DocumentKind::Skillset,
            _ => DocumentKind::Other,
        }
    }
}

/// Read a JSON definition and fill in the secrets its kind requires
pub fn load_document(path: &Path, secrets: &SecretsConfig) -> SearchResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        SearchError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut document: Value = serde_json::from_str(&text).map_err(|e| {
        SearchError::Config(format!("{} is not valid JSON: {}", path.display(), e))
    })?;

    let kind = DocumentKind::from_path(path);
    debug!(path = %path.display(), kind = ?kind, "Loaded provisioning document");

    match kind {
        DocumentKind::DataSource => {
            set_secret(
                &mut document,
                &["credentials", "connectionString"],
                secrets.blob_connection_string.as_deref(),
            )?;
        }
        DocumentKind::Skillset => {
            set_secret(
                &mut document,
                &["cognitiveServices", "key"],
                secrets.cognitive_service_key.as_deref(),
            )?;
            set_secret(
                &mut document,
                &["knowledgeStore", "storageConnectionString"],
                secrets.blob_connection_string.as_deref(),
            )?;
        }
        DocumentKind::Other => {}
    }

    Ok(document)
}

/// Overwrite the field at `path`. Every object above it must already exist.
/// An unset secret is written as `null` and left for the service to reject.
fn set_secret(document: &mut Value, path: &[&str], secret: Option<&str>) -> SearchResult<()> {
    let dotted = path.join(".");
    let (field, parents) = path
        .split_last()
        .ok_or_else(|| SearchError::Config("empty field path".to_string()))?;

    let mut target = document;
    for key in parents {
        target = target
            .get_mut(*key)
            .ok_or_else(|| SearchError::Config(format!("document has no '{}' object", key)))?;
    }

    let object = target
        .as_object_mut()
        .ok_or_else(|| SearchError::Config(format!("cannot set '{}' on a non-object", dotted)))?;

    if secret.is_none() {
        warn!(field = %dotted, "Secret not configured, submitting null");
    }
    object.insert(
        field.to_string(),
        secret.map_or(Value::Null, |s| Value::String(s.to_string())),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_kind_from_path() {
        assert_eq!(
            DocumentKind::from_path(Path::new("data_source.json")),
            DocumentKind::DataSource
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("defs/skillset.json")),
            DocumentKind::Skillset
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("index.json")),
            DocumentKind::Other
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("data_source.json.bak")),
            DocumentKind::Other
        );
    }

    #[test]
    fn test_set_secret_overwrites_nested_field() {
        let mut document = json!({"credentials": {"connectionString": "placeholder"}, "name": "docs"});
        set_secret(&mut document, &["credentials", "connectionString"], Some("conn")).unwrap();

        assert_eq!(document["credentials"]["connectionString"], "conn");
        assert_eq!(document["name"], "docs");
    }

    #[test]
    fn test_set_secret_unset_writes_null() {
        let mut document = json!({"cognitiveServices": {"key": "x"}});
        set_secret(&mut document, &["cognitiveServices", "key"], None).unwrap();
        assert_eq!(document["cognitiveServices"]["key"], Value::Null);
    }

    #[test]
    fn test_set_secret_missing_parent() {
        let mut document = json!({"name": "docs"});
        let result = set_secret(&mut document, &["credentials", "connectionString"], Some("conn"));
        assert!(matches!(result, Err(SearchError::Config(_))));
    }
}
