//! Resource store
//!
//! Resources are recorded as JSON in `resources.json`, next to the
//! configuration file. Mutations go through a [`StoreSession`]: the file is
//! loaded once, every change is applied in memory, and `commit` writes the
//! result back. A dry run is a session that is never committed, so each
//! object sees the effect of the objects before it exactly as a real run
//! would.

use std::path::PathBuf;
use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConfigManager;
use crate::error::{Error, Result};
use crate::resource::ResourceRef;
use crate::traits::{ObjectTyper, UnstructuredTyper};

/// Name of the store file inside the configuration directory
const STORE_FILE: &str = "resources.json";

/// A resource as recorded in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResource {
    /// Identity of the resource
    #[serde(flatten)]
    pub reference: ResourceRef,

    /// When the resource was first recorded
    pub created_at: Timestamp,

    /// The manifest as last written
    pub object: Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    resources: Vec<StoredResource>,
}

/// Result of applying a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The resource did not exist and was recorded
    Created,
    /// The resource existed and its manifest was replaced
    Configured,
    /// The resource existed with an identical manifest
    Unchanged,
}

impl ApplyOutcome {
    /// Past-tense verb describing the outcome
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Configured => "configured",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Manager for stored resources
pub struct ResourceStore {
    path: PathBuf,
    typer: Arc<dyn ObjectTyper>,
}

impl ResourceStore {
    /// Create a store living next to the given configuration file
    pub fn with_config_manager(config_manager: &ConfigManager) -> Self {
        Self {
            path: config_manager.config_dir().join(STORE_FILE),
            typer: Arc::new(UnstructuredTyper),
        }
    }

    /// Create a store using the default config location
    pub fn new() -> Result<Self> {
        Ok(Self::with_config_manager(&ConfigManager::new()?))
    }

    /// Replace the typer used to resolve manifests
    pub fn with_typer(mut self, typer: Arc<dyn ObjectTyper>) -> Self {
        self.typer = typer;
        self
    }

    /// Path of the store file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// List all stored resources in insertion order
    pub fn list(&self) -> Result<Vec<StoredResource>> {
        Ok(self.load()?.resources)
    }

    /// Load the store for a batch of mutations
    pub fn session(&self) -> Result<StoreSession<'_>> {
        Ok(StoreSession {
            store: self,
            file: self.load()?,
            dirty: false,
        })
    }

    fn load(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-memory view of the store, written back by [`commit`](Self::commit)
pub struct StoreSession<'a> {
    store: &'a ResourceStore,
    file: StoreFile,
    dirty: bool,
}

impl StoreSession<'_> {
    /// Resources as they stand in this session
    pub fn resources(&self) -> &[StoredResource] {
        &self.file.resources
    }

    /// Record a new resource
    ///
    /// Fails with `Error::AlreadyExists` if the resource is already recorded.
    pub fn create(&mut self, obj: &Value) -> Result<ResourceRef> {
        let reference = self.resolve(obj)?;

        if self.position(&reference).is_some() {
            return Err(Error::AlreadyExists(reference.to_string()));
        }

        self.file.resources.push(StoredResource {
            reference: reference.clone(),
            created_at: Timestamp::now(),
            object: obj.clone(),
        });
        self.dirty = true;

        tracing::debug!(resource = %reference, "created resource");
        Ok(reference)
    }

    /// Record a resource, creating it or replacing its manifest
    pub fn apply(&mut self, obj: &Value) -> Result<(ResourceRef, ApplyOutcome)> {
        let reference = self.resolve(obj)?;

        let outcome = match self.position(&reference) {
            Some(index) if self.file.resources[index].object == *obj => ApplyOutcome::Unchanged,
            Some(index) => {
                self.file.resources[index].object = obj.clone();
                ApplyOutcome::Configured
            }
            None => {
                self.file.resources.push(StoredResource {
                    reference: reference.clone(),
                    created_at: Timestamp::now(),
                    object: obj.clone(),
                });
                ApplyOutcome::Created
            }
        };

        if outcome != ApplyOutcome::Unchanged {
            self.dirty = true;
        }
        tracing::debug!(resource = %reference, outcome = outcome.verb(), "applied resource");
        Ok((reference, outcome))
    }

    /// Remove a resource, returning what was stored
    pub fn delete(&mut self, reference: &ResourceRef) -> Result<StoredResource> {
        let index = self
            .position(reference)
            .ok_or_else(|| Error::NotFound(reference.to_string()))?;

        let removed = self.file.resources.remove(index);
        self.dirty = true;

        tracing::debug!(resource = %removed.reference, "deleted resource");
        Ok(removed)
    }

    /// Write the session back to disk if anything changed
    pub fn commit(self) -> Result<()> {
        if self.dirty {
            self.store.save(&self.file)?;
        }
        Ok(())
    }

    fn position(&self, reference: &ResourceRef) -> Option<usize> {
        self.file
            .resources
            .iter()
            .position(|r| r.reference.matches(reference))
    }

    fn resolve(&self, obj: &Value) -> Result<ResourceRef> {
        let reference = self.store.typer.resolve(obj)?;
        if reference.kind().is_empty() {
            return Err(Error::Decode(format!(
                "missing kind for resource with name {}",
                reference.name
            )));
        }
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockObjectTyper;
    use serde_json::json;
    use tempfile::TempDir;

    fn temp_store() -> (ResourceStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));
        (ResourceStore::with_config_manager(&config_manager), temp_dir)
    }

    fn pod(name: &str) -> Value {
        json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": name}})
    }

    #[test]
    fn test_store_lives_next_to_config() {
        let (store, temp_dir) = temp_store();
        assert_eq!(store.path(), &temp_dir.path().join("resources.json"));
    }

    #[test]
    fn test_create_and_commit() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        let reference = session.create(&pod("foo")).unwrap();
        assert_eq!(reference.to_string(), "pod/foo");
        session.commit().unwrap();

        let stored = store.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].object, pod("foo"));
    }

    #[test]
    fn test_create_twice_conflicts() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        session.create(&pod("foo")).unwrap();
        let result = session.create(&pod("foo"));
        assert!(matches!(result.unwrap_err(), Error::AlreadyExists(_)));
    }

    #[test]
    fn test_create_conflicts_with_committed_resource() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        session.create(&pod("foo")).unwrap();
        session.commit().unwrap();

        let mut session = store.session().unwrap();
        let result = session.create(&pod("foo"));
        assert!(matches!(result.unwrap_err(), Error::AlreadyExists(_)));
    }

    #[test]
    fn test_uncommitted_session_does_not_persist() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        session.create(&pod("foo")).unwrap();
        assert_eq!(session.resources().len(), 1);
        drop(session);

        assert!(store.list().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_create_requires_kind() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        let result = session.create(&json!({"apiVersion": "v1", "metadata": {"name": "x"}}));
        assert!(matches!(result.unwrap_err(), Error::Decode(_)));
    }

    #[test]
    fn test_apply_outcomes() {
        let (store, _temp_dir) = temp_store();
        let mut session = store.session().unwrap();

        let (_, outcome) = session.apply(&pod("foo")).unwrap();
        assert_eq!(outcome, ApplyOutcome::Created);

        let (_, outcome) = session.apply(&pod("foo")).unwrap();
        assert_eq!(outcome, ApplyOutcome::Unchanged);

        let mut changed = pod("foo");
        changed["spec"] = json!({"image": "nginx"});
        let (_, outcome) = session.apply(&changed).unwrap();
        assert_eq!(outcome, ApplyOutcome::Configured);
        session.commit().unwrap();

        let stored = store.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].object, changed);
    }

    #[test]
    fn test_unchanged_apply_does_not_write() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        session.apply(&pod("foo")).unwrap();
        session.commit().unwrap();
        std::fs::remove_file(store.path()).unwrap();

        let mut session = store.session().unwrap();
        session.apply(&pod("foo")).unwrap();
        session.commit().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_delete() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        session.create(&pod("foo")).unwrap();
        let removed = session.delete(&ResourceRef::new("Pod", "", "foo")).unwrap();
        assert_eq!(removed.reference.name, "foo");
        session.commit().unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_twice_in_one_session() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        session.create(&pod("foo")).unwrap();
        session.commit().unwrap();

        let mut session = store.session().unwrap();
        let reference = ResourceRef::new("pod", "", "foo");
        session.delete(&reference).unwrap();
        let result = session.delete(&reference);
        assert!(matches!(result.unwrap_err(), Error::NotFound(_)));
    }

    #[test]
    fn test_delete_not_found() {
        let (store, _temp_dir) = temp_store();

        let mut session = store.session().unwrap();
        let result = session.delete(&ResourceRef::new("pod", "", "missing"));
        assert!(matches!(result.unwrap_err(), Error::NotFound(_)));
    }

    #[test]
    fn test_injected_typer() {
        let (store, _temp_dir) = temp_store();
        let mut typer = MockObjectTyper::new();
        typer
            .expect_resolve()
            .returning(|_| Ok(ResourceRef::new("Widget", "example.io", "w1")));
        let store = store.with_typer(Arc::new(typer));

        let mut session = store.session().unwrap();
        let reference = session.create(&json!({})).unwrap();
        assert_eq!(reference.to_string(), "widget.example.io/w1");
    }

    #[test]
    fn test_apply_outcome_verbs() {
        assert_eq!(ApplyOutcome::Created.verb(), "created");
        assert_eq!(ApplyOutcome::Configured.verb(), "configured");
        assert_eq!(ApplyOutcome::Unchanged.verb(), "unchanged");
    }
}
