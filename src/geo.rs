//! Geographic Boundary Loader
//!
//! Loads the state boundary GeoJSON used by the profit-by-state choropleth.
//! The document itself is never interpreted or modified: it is handed to the
//! chart renderer as-is. We only index the feature names found at the
//! feature-id key so that joins against state names can be diagnosed.

use crate::dataset::{LoadError, LoadResult};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Feature-id key of the bundled India states file
pub const DEFAULT_FEATURE_ID_KEY: &str = "properties.NAME_1";

/// Immutable boundary document plus its feature-name index
#[derive(Debug, Clone)]
pub struct BoundaryDocument {
    document: Value,
    feature_id_key: String,
    names: BTreeSet<String>,
}

impl BoundaryDocument {
    /// Load and validate a GeoJSON file
    pub fn load(path: &Path, feature_id_key: &str) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;

        let document: Value = serde_json::from_str(&content).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let boundaries = Self::from_value(document, feature_id_key)?;

        tracing::info!(
            path = %path.display(),
            features = boundaries.feature_count(),
            feature_id_key = %feature_id_key,
            "Loaded boundary document"
        );

        Ok(boundaries)
    }

    /// Wrap an already-parsed document
    ///
    /// The document must be a `FeatureCollection` with a `features` array.
    /// Features without a string at the feature-id key are kept in the
    /// document but cannot be joined.
    pub fn from_value(document: Value, feature_id_key: &str) -> LoadResult<Self> {
        let kind = document.get("type").and_then(Value::as_str);
        if kind != Some("FeatureCollection") {
            return Err(LoadError::Geometry(format!(
                "expected a FeatureCollection, found {}",
                kind.unwrap_or("no type")
            )));
        }

        let features = document
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| LoadError::Geometry("missing `features` array".to_string()))?;

        let pointer = key_to_pointer(feature_id_key);
        let names = features
            .iter()
            .filter_map(|feature| feature.pointer(&pointer))
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        Ok(Self {
            document,
            feature_id_key: feature_id_key.to_string(),
            names,
        })
    }

    /// An empty collection; every state is unmatched
    pub fn empty() -> Self {
        Self {
            document: serde_json::json!({ "type": "FeatureCollection", "features": [] }),
            feature_id_key: DEFAULT_FEATURE_ID_KEY.to_string(),
            names: BTreeSet::new(),
        }
    }

    /// The raw document, unmodified
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Dotted path of the join property, e.g. `properties.NAME_1`
    pub fn feature_id_key(&self) -> &str {
        &self.feature_id_key
    }

    /// Number of distinct joinable feature names
    pub fn feature_count(&self) -> usize {
        self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names with no matching geometry, in input order
    pub fn unmatched<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter(|n| !self.contains(n)).collect()
    }
}

/// `properties.NAME_1` -> `/properties/NAME_1`
fn key_to_pointer(key: &str) -> String {
    key.split('.')
        .map(|part| part.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut acc, part| {
            acc.push('/');
            acc.push_str(&part);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "NAME_1": "Kerala" }, "geometry": null },
                { "type": "Feature", "properties": { "NAME_1": "Goa" }, "geometry": null },
                { "type": "Feature", "properties": {}, "geometry": null }
            ]
        })
    }

    #[test]
    fn test_from_value_indexes_names() {
        let doc = BoundaryDocument::from_value(sample(), DEFAULT_FEATURE_ID_KEY).unwrap();
        assert_eq!(doc.feature_count(), 2);
        assert!(doc.contains("Kerala"));
        assert!(!doc.contains("Punjab"));
        assert_eq!(doc.unmatched(["Goa", "Punjab", "Kerala", "Delhi"]), vec!["Punjab", "Delhi"]);
    }

    #[test]
    fn test_document_passes_through_unchanged() {
        let doc = BoundaryDocument::from_value(sample(), DEFAULT_FEATURE_ID_KEY).unwrap();
        assert_eq!(doc.document(), &sample());
    }

    #[test]
    fn test_rejects_non_collection() {
        let err = BoundaryDocument::from_value(json!({ "type": "Feature" }), DEFAULT_FEATURE_ID_KEY)
            .unwrap_err();
        assert!(matches!(err, LoadError::Geometry(_)));

        let err = BoundaryDocument::from_value(
            json!({ "type": "FeatureCollection" }),
            DEFAULT_FEATURE_ID_KEY,
        )
        .unwrap_err();
        assert!(err.to_string().contains("features"));
    }

    #[test]
    fn test_top_level_id_key() {
        let doc = BoundaryDocument::from_value(
            json!({ "type": "FeatureCollection", "features": [{ "id": "KL" }] }),
            "id",
        )
        .unwrap();
        assert!(doc.contains("KL"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample().to_string().as_bytes()).unwrap();

        let doc = BoundaryDocument::load(file.path(), DEFAULT_FEATURE_ID_KEY).unwrap();
        assert_eq!(doc.feature_count(), 2);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = BoundaryDocument::load(file.path(), DEFAULT_FEATURE_ID_KEY).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_key_to_pointer() {
        assert_eq!(key_to_pointer("properties.NAME_1"), "/properties/NAME_1");
        assert_eq!(key_to_pointer("id"), "/id");
    }
}
