//! Repository over a directory of base StructureDefinition files.

use crate::error::Result;
use crate::repository::BaseDefinitionRepository;
use lru::LruCache;
use snapgen_models::{ElementDefinition, StructureDefinition};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Default number of parsed definitions kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Reads `StructureDefinition-<Type>.json` snapshot files from a directory.
///
/// This is the layout of an extracted FHIR core package (`package/`), so a
/// `hl7.fhir.r4.core` checkout works as-is. Parsed element lists are kept in
/// an LRU cache; a missing file is not cached.
pub struct DirectoryRepository {
    root: PathBuf,
    cache: Mutex<LruCache<String, Arc<Vec<ElementDefinition>>>>,
}

impl DirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_capacity(root, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(root: impl Into<PathBuf>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            root: root.into(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the definition for `resource_type`.
    pub fn file_for(&self, resource_type: &str) -> PathBuf {
        self.root
            .join(format!("StructureDefinition-{resource_type}.json"))
    }

    fn load(&self, path: &Path) -> Result<Vec<ElementDefinition>> {
        let bytes = fs::read(path)?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        let sd = StructureDefinition::from_value(&value)?;
        Ok(sd.snapshot_elements()?.to_vec())
    }
}

impl BaseDefinitionRepository for DirectoryRepository {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>> {
        if let Some(hit) = self
            .cache
            .lock()
            .ok()
            .and_then(|mut c| c.get(resource_type).cloned())
        {
            return Ok(Some(hit));
        }

        let path = self.file_for(resource_type);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No base definition file");
            return Ok(None);
        }

        let elements = Arc::new(self.load(&path)?);
        tracing::debug!(
            resource_type,
            elements = elements.len(),
            "Loaded base definition"
        );

        if let Ok(mut c) = self.cache.lock() {
            c.put(resource_type.to_string(), Arc::clone(&elements));
        }
        Ok(Some(elements))
    }
}
