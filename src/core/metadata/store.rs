//! core::metadata::store
//!
//! Branch metadata storage in a shared JSON document.
//!
//! # Architecture
//!
//! One JSON document holds the metadata of many repositories. Its top level
//! is an object keyed by scope (the absolute working-directory path of a
//! repository); each value is the array of branch records for that scope.
//!
//! - [`MetadataFile`] owns the raw document. It is read once, hands out the
//!   [`BranchStore`] for one scope, and on persist replaces only that scope's
//!   entry before writing the whole document back. Other scopes are passed
//!   through as raw JSON and keep their key order.
//! - [`BranchStore`] is the in-memory keyed collection for one scope, with a
//!   secondary alias index.
//!
//! # Invariants
//!
//! - At most one entity per name; insertion order is preserved
//! - The alias index is exactly `{ e.alias -> e.name }` over all entities
//!   with an alias. When an alias is assigned to a second entity, the
//!   previous holder loses it (last write wins).
//!
//! # Concurrency
//!
//! There is no locking. Two invocations persisting the same document race
//! and the last writer wins.
//!
//! # Example
//!
//! ```no_run
//! use git_ass::core::metadata::schema::BranchUpdate;
//! use git_ass::core::metadata::store::MetadataFile;
//!
//! let mut file = MetadataFile::open("/tmp/git-ass.json").unwrap();
//! let mut store = file.load("/home/me/project").unwrap();
//!
//! store.add(BranchUpdate::new("feature/login").alias("login"), true).unwrap();
//! assert_eq!(store.find("login").map(|e| e.name.as_str()), Some("feature/login"));
//!
//! file.persist("/home/me/project", &store).unwrap();
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::schema::{BranchEntity, BranchUpdate};

/// Errors from metadata storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but could not be read.
    #[error("failed to read metadata file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid JSON of the expected shape.
    #[error("failed to parse metadata file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The document could not be written.
    #[error("failed to write metadata file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serializing the records failed.
    #[error("failed to serialize metadata: {0}")]
    Serialize(String),

    /// `add` without merge targeted a name that is already stored.
    #[error("branch already exists: {0}")]
    Duplicate(String),
}

/// Keyed collection of branch entities for one scope.
#[derive(Debug, Clone, Default)]
pub struct BranchStore {
    /// Names in insertion order.
    order: Vec<String>,
    /// Primary map: name -> entity.
    entities: HashMap<String, BranchEntity>,
    /// Secondary map: alias -> name.
    aliases: HashMap<String, String>,
}

impl BranchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, as `load` does.
    ///
    /// Alias collisions resolve in favor of the later record; the earlier
    /// holder's alias is dropped and a warning is logged. A repeated name
    /// replaces the earlier record outright.
    pub fn from_entities(entities: impl IntoIterator<Item = BranchEntity>) -> Self {
        let mut store = Self::new();
        for entity in entities {
            let name = entity.name.clone();
            if store.entities.contains_key(&name) {
                warn!(
                    branch = %name,
                    "duplicate branch name in metadata file, keeping the later record"
                );
            }
            if let Some(displaced) = store.install(entity) {
                warn!(
                    branch = %name,
                    previous = %displaced,
                    "duplicate alias in metadata file, keeping the later branch"
                );
            }
        }
        store
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BranchEntity> {
        self.order.iter().filter_map(|name| self.entities.get(name))
    }

    /// Entity with exactly this name.
    pub fn get(&self, name: &str) -> Option<&BranchEntity> {
        self.entities.get(name)
    }

    /// Name of the entity holding `alias`.
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// All aliases currently indexed.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// Look up by name, falling back to alias. Name lookup wins.
    pub fn find(&self, key: &str) -> Option<&BranchEntity> {
        self.entities.get(key).or_else(|| {
            self.aliases
                .get(key)
                .and_then(|name| self.entities.get(name))
        })
    }

    /// Add a branch, or merge into an existing one.
    ///
    /// Returns the resulting entity and the entity it replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the name exists and `merge` is false.
    pub fn add(
        &mut self,
        update: BranchUpdate,
        merge: bool,
    ) -> Result<(BranchEntity, Option<BranchEntity>), StoreError> {
        let previous = self.entities.get(&update.name).cloned();

        let next = match &previous {
            None => BranchEntity::from_update(update),
            Some(_) if !merge => return Err(StoreError::Duplicate(update.name)),
            Some(prev) => prev.merged(&update),
        };

        if let Some(displaced) = self.install(next.clone()) {
            debug!(alias = ?next.alias, from = %displaced, to = %next.name, "alias reassigned");
        }

        Ok((next, previous))
    }

    /// Remove a branch by name. Unknown names are a no-op.
    pub fn remove(&mut self, name: &str) -> Option<BranchEntity> {
        let entity = self.entities.remove(name)?;
        self.order.retain(|n| n != name);
        if let Some(alias) = &entity.alias {
            self.unindex_alias(alias, name);
        }
        Some(entity)
    }

    /// Drop the base link of a branch. Returns whether it had one.
    pub fn clear_base(&mut self, name: &str) -> bool {
        self.entities
            .get_mut(name)
            .and_then(|e| e.base.take())
            .is_some()
    }

    /// Serialized records in insertion order.
    pub fn dump(&self) -> Result<Vec<Value>, StoreError> {
        self.iter()
            .map(|e| serde_json::to_value(e).map_err(|e| StoreError::Serialize(e.to_string())))
            .collect()
    }

    /// Insert or replace an entity and index its alias.
    ///
    /// Returns the name of another entity that lost the alias, if any.
    fn install(&mut self, entity: BranchEntity) -> Option<String> {
        let mut displaced = None;

        let stale = self
            .entities
            .get(&entity.name)
            .and_then(|old| old.alias.clone())
            .filter(|old| entity.alias.as_ref() != Some(old));
        if let Some(old) = stale {
            self.unindex_alias(&old, &entity.name);
        }

        if let Some(alias) = &entity.alias {
            if let Some(holder) = self.aliases.get(alias).cloned() {
                if holder != entity.name {
                    if let Some(other) = self.entities.get_mut(&holder) {
                        other.alias = None;
                    }
                    displaced = Some(holder);
                }
            }
            self.aliases.insert(alias.clone(), entity.name.clone());
        }

        if !self.entities.contains_key(&entity.name) {
            self.order.push(entity.name.clone());
        }
        self.entities.insert(entity.name.clone(), entity);
        displaced
    }

    fn unindex_alias(&mut self, alias: &str, name: &str) {
        if self.aliases.get(alias).map(String::as_str) == Some(name) {
            self.aliases.remove(alias);
        }
    }
}

/// The shared metadata document on disk.
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
    raw: Map<String, Value>,
}

impl MetadataFile {
    /// Read the document at `path`. A missing file is an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or is not a
    /// JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "metadata file not found, starting empty");
                return Ok(Self {
                    path,
                    raw: Map::new(),
                });
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        if contents.trim().is_empty() {
            return Ok(Self {
                path,
                raw: Map::new(),
            });
        }

        let raw = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(StoreError::Parse {
                    path,
                    message: "top level is not an object".to_string(),
                })
            }
            Err(e) => {
                return Err(StoreError::Parse {
                    path,
                    message: e.to_string(),
                })
            }
        };

        Ok(Self { path, raw })
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scope keys present in the document.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.raw.keys().map(String::as_str)
    }

    /// Raw JSON stored for a scope.
    pub fn raw_scope(&self, scope: &str) -> Option<&Value> {
        self.raw.get(scope)
    }

    /// Build the store for `scope`. An absent scope yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] if the scope's value is not an array of
    /// branch records.
    pub fn load(&self, scope: &str) -> Result<BranchStore, StoreError> {
        let records = match self.raw.get(scope) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => {
                serde_json::from_value::<Vec<BranchEntity>>(value.clone()).map_err(|e| {
                    StoreError::Parse {
                        path: self.path.clone(),
                        message: format!("scope '{}': {}", scope, e),
                    }
                })?
            }
        };

        let store = BranchStore::from_entities(records);
        debug!(scope, branches = store.len(), "loaded branch metadata");
        Ok(store)
    }

    /// Replace `scope`'s entry with `store` and write the whole document.
    ///
    /// The write is atomic (temp file, then rename). Parent directories are
    /// created as needed.
    pub fn persist(&mut self, scope: &str, store: &BranchStore) -> Result<(), StoreError> {
        self.raw
            .insert(scope.to_string(), Value::Array(store.dump()?));

        let contents = serde_json::to_string_pretty(&self.raw)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.write_atomic(contents.as_bytes())?;

        debug!(
            scope,
            branches = store.len(),
            path = %self.path.display(),
            "persisted branch metadata"
        );
        Ok(())
    }

    fn write_atomic(&self, contents: &[u8]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&temp_path).map_err(write_err)?;
            file.write_all(contents).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        fs::rename(&temp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn update(name: &str) -> BranchUpdate {
        BranchUpdate::new(name)
    }

    fn assert_alias_index_consistent(store: &BranchStore) {
        let mut expected: Vec<(String, String)> = store
            .iter()
            .filter_map(|e| e.alias.clone().map(|a| (a, e.name.clone())))
            .collect();
        expected.sort();
        let mut actual: Vec<(String, String)> = store
            .aliases()
            .map(|a| (a.to_string(), store.resolve_alias(a).unwrap().to_string()))
            .collect();
        actual.sort();
        assert_eq!(expected, actual);
    }

    #[test]
    fn add_new_branch() {
        let mut store = BranchStore::new();
        let (entity, previous) = store.add(update("dev").alias("d"), true).unwrap();

        assert_eq!(entity.name, "dev");
        assert!(previous.is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("d").unwrap().name, "dev");
    }

    #[test]
    fn add_existing_without_merge_fails() {
        let mut store = BranchStore::new();
        store.add(update("dev"), true).unwrap();

        let err = store.add(update("dev").alias("d"), false).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(name) if name == "dev"));
        assert!(store.find("d").is_none());
    }

    #[test]
    fn add_merges_present_fields_only() {
        let mut store = BranchStore::new();
        store
            .add(update("dev").alias("d").description("first"), true)
            .unwrap();
        let (entity, previous) = store.add(update("dev").base("main"), true).unwrap();

        assert_eq!(previous.unwrap().base, None);
        assert_eq!(entity.alias.as_deref(), Some("d"));
        assert_eq!(entity.description.as_deref(), Some("first"));
        assert_eq!(entity.base.as_deref(), Some("main"));
        assert_eq!(store.get("dev"), Some(&entity));
    }

    #[test]
    fn changing_alias_drops_stale_mapping() {
        let mut store = BranchStore::new();
        store.add(update("dev").alias("old"), true).unwrap();
        store.add(update("dev").alias("new"), true).unwrap();

        assert!(store.find("old").is_none());
        assert_eq!(store.find("new").unwrap().name, "dev");
        assert_alias_index_consistent(&store);
    }

    #[test]
    fn clearing_alias_drops_mapping() {
        let mut store = BranchStore::new();
        store.add(update("dev").alias("d"), true).unwrap();
        store.add(update("dev").alias(""), true).unwrap();

        assert!(store.find("d").is_none());
        assert!(store.get("dev").unwrap().alias.is_none());
        assert_alias_index_consistent(&store);
    }

    #[test]
    fn alias_moves_to_latest_holder() {
        let mut store = BranchStore::new();
        store.add(update("x").alias("a"), true).unwrap();
        store.add(update("y").alias("a"), true).unwrap();

        assert_eq!(store.find("a").unwrap().name, "y");
        assert!(store.get("x").unwrap().alias.is_none());
        assert_alias_index_consistent(&store);

        // Removing the old holder must not unmap the new one.
        store.remove("x");
        assert_eq!(store.find("a").unwrap().name, "y");
    }

    #[test]
    fn find_prefers_name_over_alias() {
        let mut store = BranchStore::new();
        store.add(update("main"), true).unwrap();
        store.add(update("dev").alias("main"), true).unwrap();

        assert_eq!(store.find("main").unwrap().name, "main");
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = BranchStore::new();
        store.add(update("dev"), true).unwrap();
        assert!(store.remove("nope").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_drops_alias() {
        let mut store = BranchStore::new();
        store.add(update("dev").alias("d"), true).unwrap();
        let removed = store.remove("dev").unwrap();

        assert_eq!(removed.name, "dev");
        assert!(store.find("d").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn dump_preserves_insertion_order() {
        let mut store = BranchStore::new();
        for name in ["zeta", "alpha", "mid"] {
            store.add(update(name), true).unwrap();
        }
        store.add(update("alpha").description("x"), true).unwrap();

        let names: Vec<_> = store
            .dump()
            .unwrap()
            .into_iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn clear_base_reports_change() {
        let mut store = BranchStore::new();
        store.add(update("dev").base("main"), true).unwrap();
        assert!(store.clear_base("dev"));
        assert!(!store.clear_base("dev"));
        assert!(!store.clear_base("missing"));
        assert!(store.get("dev").unwrap().base.is_none());
    }

    #[test]
    fn load_collision_keeps_later_record() {
        let store = BranchStore::from_entities(vec![
            BranchEntity::from_update(update("x").alias("a")),
            BranchEntity::from_update(update("y").alias("a")),
        ]);
        assert_eq!(store.find("a").unwrap().name, "y");
        assert!(store.get("x").unwrap().alias.is_none());
        assert_alias_index_consistent(&store);
    }

    #[test]
    fn load_repeated_name_drops_earlier_alias() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(
            &path,
            r#"{"/r":[{"name":"x","alias":"a"},{"name":"x","alias":"b"}]}"#,
        )
        .unwrap();

        let store = MetadataFile::open(&path).unwrap().load("/r").unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.find("a").is_none());
        assert_eq!(store.find("b").unwrap().name, "x");
        assert_alias_index_consistent(&store);
    }

    #[test]
    fn open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let file = MetadataFile::open(temp.path().join("data.json")).unwrap();
        assert_eq!(file.scopes().count(), 0);
        assert!(file.load("/repo").unwrap().is_empty());
    }

    #[test]
    fn open_rejects_non_object() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            MetadataFile::open(&path),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn load_rejects_malformed_scope() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, r#"{"/repo": {"name": "dev"}}"#).unwrap();
        let file = MetadataFile::open(&path).unwrap();
        assert!(matches!(file.load("/repo"), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn persist_creates_parent_dirs_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/data.json");

        let mut file = MetadataFile::open(&path).unwrap();
        let mut store = file.load("/repo").unwrap();
        store
            .add(update("feature/x").alias("x").base("main").description("d"), true)
            .unwrap();
        store.add(update("main"), true).unwrap();
        file.persist("/repo", &store).unwrap();

        let reloaded = MetadataFile::open(&path).unwrap().load("/repo").unwrap();
        assert_eq!(
            reloaded.iter().cloned().collect::<Vec<_>>(),
            store.iter().cloned().collect::<Vec<_>>()
        );
        assert_eq!(reloaded.find("x").unwrap().name, "feature/x");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn persist_passes_other_scopes_through() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(
            &path,
            r#"{"/other":[{"name":"b","zeta":1,"alias":"bb"},{"name":"a"}],"/repo":[]}"#,
        )
        .unwrap();

        let mut file = MetadataFile::open(&path).unwrap();
        let before = serde_json::to_string(file.raw_scope("/other").unwrap()).unwrap();

        let mut store = file.load("/repo").unwrap();
        store.add(update("dev"), true).unwrap();
        file.persist("/repo", &store).unwrap();

        let reopened = MetadataFile::open(&path).unwrap();
        let after = serde_json::to_string(reopened.raw_scope("/other").unwrap()).unwrap();
        assert_eq!(before, after);
        assert_eq!(
            reopened.scopes().collect::<Vec<_>>(),
            vec!["/other", "/repo"]
        );
    }
}
