use std::{io, path::PathBuf};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Canonical JSON field names of a type. Incoming object keys are matched
/// against these ignoring case.
pub trait FieldNames {
    const FIELDS: &'static [&'static str];
}

/// A record type persisted in a JSON collection file.
pub trait Record: FieldNames + Serialize + DeserializeOwned {}

impl<T: FieldNames + Serialize + DeserializeOwned> Record for T {}

/// Rewrites object keys to their canonical spelling from `fields`, ignoring case.
/// Arrays are walked one level so a collection of records is handled too.
/// Unknown keys are kept as they are.
pub fn canonicalize_keys(value: Value, fields: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(canonicalize_object(map, fields)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(canonicalize_object(map, fields)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn canonicalize_object(map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let key = fields
            .iter()
            .find(|f| f.eq_ignore_ascii_case(&key))
            .map(|f| f.to_string())
            .unwrap_or(key);
        out.insert(key, value);
    }
    out
}

/// One collection persisted as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the whole collection. `Ok(None)` means the file does not exist,
    /// which is distinct from an existing empty collection.
    pub async fn load<T: Record>(&self) -> anyhow::Result<Option<Vec<T>>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        // Files written by other tools may carry a UTF-8 BOM.
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let raw: Value = serde_json::from_str(text)
            .with_context(|| format!("parse {}", self.path.display()))?;
        if raw.is_null() {
            return Ok(Some(Vec::new()));
        }
        let records: Vec<T> = serde_json::from_value(canonicalize_keys(raw, T::FIELDS))
            .with_context(|| format!("decode records in {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = records.len(), "collection loaded");
        Ok(Some(records))
    }

    /// Overwrites the file with the whole collection. The data goes to a sibling
    /// temp file first and is renamed into place, so readers see old or new, never partial.
    pub async fn save<T: Record>(&self, records: &[T]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create directory {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(records).context("serialize collection")?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e).with_context(|| format!("replace {}", self.path.display()));
        }
        debug!(path = %self.path.display(), count = records.len(), "collection saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".into());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        #[serde(rename = "itemID")]
        item_id: i32,
        #[serde(rename = "itemName")]
        item_name: String,
    }

    impl FieldNames for Item {
        const FIELDS: &'static [&'static str] = &["itemID", "itemName"];
    }

    #[test]
    fn canonicalize_keys_matches_any_casing() {
        let raw = json!([{ "ITEMID": 1, "itemname": "a", "extra": true }]);
        let fixed = canonicalize_keys(raw, Item::FIELDS);
        assert_eq!(fixed, json!([{ "itemID": 1, "itemName": "a", "extra": true }]));
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("items.json"));
        let loaded = file.load::<Item>().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn empty_array_and_null_are_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let file = JsonFile::new(&path);

        std::fs::write(&path, "[]").unwrap();
        assert_eq!(file.load::<Item>().await.unwrap(), Some(vec![]));

        std::fs::write(&path, "null").unwrap();
        assert_eq!(file.load::<Item>().await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn save_then_load_returns_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("nested").join("items.json"));
        let items = vec![
            Item { item_id: 3, item_name: "c".into() },
            Item { item_id: 1, item_name: "a".into() },
        ];

        file.save(&items).await.unwrap();
        let loaded = file.load::<Item>().await.unwrap().unwrap();
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("items.json"));
        file.save(&[Item { item_id: 1, item_name: "a".into() }]).await.unwrap();
        file.save(&[Item { item_id: 2, item_name: "b".into() }]).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["items.json".to_string()]);
    }

    #[tokio::test]
    async fn load_accepts_bom_and_mixed_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "\u{feff}[{\"ItemId\": 7, \"ITEMNAME\": \"x\"}]").unwrap();

        let loaded = JsonFile::new(&path).load::<Item>().await.unwrap().unwrap();
        assert_eq!(loaded, vec![Item { item_id: 7, item_name: "x".into() }]);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFile::new(&path).load::<Item>().await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
