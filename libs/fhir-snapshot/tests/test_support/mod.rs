#![allow(dead_code)]

use serde_json::Value;
use snapgen_context::{BaseDefinitionRepository, InMemoryRepository, Result};
use snapgen_models::{ElementDefinition, StructureDefinition};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

pub fn load_json(name: &str) -> Value {
    let path = data_dir().join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

/// Repository holding the Patient base definition from `tests/data`.
pub fn patient_repository() -> InMemoryRepository {
    let sd = StructureDefinition::from_value(&load_json("StructureDefinition-Patient.json"))
        .expect("Patient base definition parses");
    let mut repo = InMemoryRepository::new();
    repo.insert_structure_definition(&sd)
        .expect("Patient base definition has a snapshot");
    repo
}

/// Wraps a repository and counts lookups.
pub struct CountingRepository<R> {
    inner: R,
    calls: AtomicUsize,
}

impl<R: BaseDefinitionRepository> CountingRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<R: BaseDefinitionRepository> BaseDefinitionRepository for CountingRepository<R> {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.base_elements(resource_type)
    }
}

pub fn snapshot_paths(document: &Value) -> Vec<String> {
    document["snapshot"]["element"]
        .as_array()
        .expect("snapshot.element should be an array")
        .iter()
        .map(|e| e["path"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub fn find_by_id<'a>(document: &'a Value, id: &str) -> Option<&'a Value> {
    document["snapshot"]["element"]
        .as_array()?
        .iter()
        .find(|e| e["id"].as_str() == Some(id))
}
