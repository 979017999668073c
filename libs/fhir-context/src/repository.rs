use crate::error::{Error, Result};
use snapgen_models::{ElementDefinition, StructureDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of base element definitions, keyed by resource type name.
///
/// Implementations return the type's snapshot elements in snapshot order, or
/// `Ok(None)` when the type is unknown. Returned data is shared and must be
/// treated as read-only; callers clone before mutating.
pub trait BaseDefinitionRepository: Send + Sync {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>>;
}

impl<R: BaseDefinitionRepository + ?Sized> BaseDefinitionRepository for Arc<R> {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>> {
        (**self).base_elements(resource_type)
    }
}

impl<R: BaseDefinitionRepository + ?Sized> BaseDefinitionRepository for &R {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>> {
        (**self).base_elements(resource_type)
    }
}

/// Repository backed by a map held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    definitions: HashMap<String, Arc<Vec<ElementDefinition>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the snapshot elements for a resource type, replacing any previous entry.
    pub fn insert(&mut self, resource_type: impl Into<String>, elements: Vec<ElementDefinition>) {
        self.definitions
            .insert(resource_type.into(), Arc::new(elements));
    }

    /// Register a base StructureDefinition under its `type`.
    pub fn insert_structure_definition(&mut self, sd: &StructureDefinition) -> Result<()> {
        let elements = sd.snapshot_elements().map_err(|_| {
            Error::InvalidStructureDefinition(format!("{} has no snapshot", sd.url))
        })?;
        self.insert(sd.type_.clone(), elements.to_vec());
        Ok(())
    }

    pub fn with(mut self, resource_type: impl Into<String>, elements: Vec<ElementDefinition>) -> Self {
        self.insert(resource_type, elements);
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl BaseDefinitionRepository for InMemoryRepository {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>> {
        Ok(self.definitions.get(resource_type).cloned())
    }
}
