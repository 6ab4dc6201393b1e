use crate::common::{FaceError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::fs;
use serde::{Serialize, Deserialize};

const STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct LabelFile {
    version: u32,
    labels: BTreeMap<i64, String>,
}

/// Student id to registered identifier, persisted as a bincode blob.
#[derive(Debug, Clone)]
pub struct LabelStore {
    path: PathBuf,
    labels: BTreeMap<i64, String>,
}

impl LabelStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, labels: BTreeMap::new() }
    }

    /// Opens the store at `path`, empty if the file does not exist yet.
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self::new(path);
        if store.path.exists() {
            store.reload()?;
        }
        Ok(store)
    }

    pub fn reload(&mut self) -> Result<()> {
        let data = fs::read(&self.path)?;
        let file: LabelFile = bincode::deserialize(&data)
            .map_err(|e| FaceError::Storage(format!("Failed to deserialize: {}", e)))?;

        if file.version > STORAGE_VERSION {
            return Err(FaceError::Storage(format!(
                "Label file version {} is newer than supported version {}",
                file.version, STORAGE_VERSION
            )));
        }
        // Older layouts only differ in version; the next save upgrades them
        if file.version < STORAGE_VERSION {
            tracing::debug!("Upgrading label file from version {}", file.version);
        }

        self.labels = file.labels;
        tracing::debug!("Loaded {} label(s) from {:?}", self.labels.len(), self.path);
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let file = LabelFile {
            version: STORAGE_VERSION,
            labels: self.labels.clone(),
        };
        let encoded = bincode::serialize(&file)
            .map_err(|e| FaceError::Storage(format!("Failed to serialize: {}", e)))?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    pub fn insert(&mut self, student_id: i64, value: String) -> Option<String> {
        self.labels.insert(student_id, value)
    }

    pub fn get(&self, student_id: i64) -> Option<&str> {
        self.labels.get(&student_id).map(String::as_str)
    }

    pub fn contains(&self, student_id: i64) -> bool {
        self.labels.contains_key(&student_id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.labels.iter().map(|(id, value)| (*id, value.as_str()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("classface-labels-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir.join("labels.bin")
    }

    #[test]
    fn missing_file_opens_empty() {
        let store = LabelStore::open(scratch("missing")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn labels_survive_reopen() {
        let path = scratch("reopen");
        let mut store = LabelStore::open(path.clone()).unwrap();
        store.insert(7, "7".into());
        store.insert(12, "012".into());
        store.save().unwrap();

        let reopened = LabelStore::open(path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert!(reopened.contains(7));
        assert_eq!(reopened.get(12), Some("012"));
        assert_eq!(reopened.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![7, 12]);
    }

    #[test]
    fn reinserting_overwrites_value() {
        let mut store = LabelStore::new(scratch("overwrite"));
        assert_eq!(store.insert(3, "3".into()), None);
        assert_eq!(store.insert(3, "03".into()), Some("3".into()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let path = scratch("corrupt");
        fs::write(&path, [0xFFu8; 3]).unwrap();
        assert!(matches!(LabelStore::open(path), Err(FaceError::Storage(_))));
    }

    fn write_version(path: &Path, version: u32) {
        let file = LabelFile {
            version,
            labels: BTreeMap::from([(4, "4".to_string())]),
        };
        fs::write(path, bincode::serialize(&file).unwrap()).unwrap();
    }

    #[test]
    fn newer_file_version_is_rejected() {
        let path = scratch("newer");
        write_version(&path, STORAGE_VERSION + 1);
        match LabelStore::open(path) {
            Err(FaceError::Storage(msg)) => assert!(msg.contains("newer than supported")),
            other => panic!("expected a storage error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn older_file_version_loads_and_upgrades_on_save() {
        let path = scratch("older");
        write_version(&path, 0);
        let store = LabelStore::open(path.clone()).unwrap();
        assert_eq!(store.get(4), Some("4"));

        store.save().unwrap();
        let file: LabelFile = bincode::deserialize(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(file.version, STORAGE_VERSION);
    }
}
