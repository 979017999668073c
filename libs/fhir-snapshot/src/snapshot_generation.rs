//! StructureDefinition-level snapshot generation
//!
//! Takes a differential-only StructureDefinition document, resolves its base
//! type through a [`BaseDefinitionRepository`], and returns the same document
//! with `snapshot` in place of `differential`.

use crate::error::{Error, Result};
use crate::generator::generate_snapshot_with_stats;
use crate::resource_type::extract_resource_type;
use crate::retrieval::{ensure_base_elements, retrieve_base_elements};
use serde_json::{Map, Value};
use snapgen_context::BaseDefinitionRepository;
use snapgen_models::{Differential, ElementDefinition, Snapshot};

/// Generates snapshots for StructureDefinition documents against one repository.
pub struct SnapshotMerger<'a> {
    repository: &'a dyn BaseDefinitionRepository,
}

impl<'a> SnapshotMerger<'a> {
    pub fn new(repository: &'a dyn BaseDefinitionRepository) -> Self {
        Self { repository }
    }

    /// Produce the snapshot document for `document`.
    ///
    /// Fails with [`Error::MissingDifferential`] before touching the repository
    /// when there is no `differential.element`, and with
    /// [`Error::BaseDefinitionNotFound`] when the base type cannot be resolved.
    pub fn generate_snapshot(&self, document: &Value) -> Result<Value> {
        let object = document.as_object().ok_or_else(|| {
            Error::MalformedInput("StructureDefinition must be a JSON object".to_string())
        })?;

        let differential = read_differential(object)?;

        let base_definition = object
            .get("baseDefinition")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let resource_type = extract_resource_type(base_definition);

        let base = retrieve_base_elements(self.repository, &resource_type);
        ensure_base_elements(&base, &resource_type)?;

        let (snapshot, _) = generate_snapshot_with_stats(&base, &differential);

        let url = object.get("url").and_then(|v| v.as_str()).unwrap_or_default();
        tracing::debug!(
            url,
            resource_type = %resource_type,
            elements = snapshot.element.len(),
            "Generated snapshot"
        );

        assemble_document(object, &snapshot)
    }
}

/// Convenience wrapper around [`SnapshotMerger::generate_snapshot`].
pub fn generate_structure_definition_snapshot(
    document: &Value,
    repository: &dyn BaseDefinitionRepository,
) -> Result<Value> {
    SnapshotMerger::new(repository).generate_snapshot(document)
}

fn read_differential(object: &Map<String, Value>) -> Result<Differential> {
    let elements = object
        .get("differential")
        .and_then(|d| d.get("element"))
        .filter(|e| !e.is_null())
        .ok_or(Error::MissingDifferential)?;

    let element: Vec<ElementDefinition> = serde_json::from_value(elements.clone())?;
    Ok(Differential { element })
}

/// Copy `document` in key order without `differential` and with `snapshot` set.
///
/// A pre-existing `snapshot` key keeps its position; otherwise it is appended.
pub fn assemble_document(document: &Map<String, Value>, snapshot: &Snapshot) -> Result<Value> {
    let mut result = Map::with_capacity(document.len() + 1);
    for (key, value) in document {
        if key != "differential" {
            result.insert(key.clone(), value.clone());
        }
    }
    result.insert("snapshot".to_string(), serde_json::to_value(snapshot)?);
    Ok(Value::Object(result))
}
