//! Base element retrieval
//!
//! Repository failures are absorbed here: the merge layer only ever sees a
//! (possibly empty) element list and decides whether it is usable.

use crate::error::{Error, Result};
use snapgen_context::BaseDefinitionRepository;
use snapgen_models::ElementDefinition;

/// Fetch the snapshot elements for `resource_type`.
///
/// Returns an owned copy so the repository's data is never mutated. Unknown
/// types, empty definitions and repository errors all yield an empty list.
pub fn retrieve_base_elements(
    repository: &dyn BaseDefinitionRepository,
    resource_type: &str,
) -> Vec<ElementDefinition> {
    match repository.base_elements(resource_type) {
        Ok(Some(elements)) if !elements.is_empty() => elements.as_ref().clone(),
        Ok(Some(_)) => {
            tracing::warn!(resource_type, "Base definition has no snapshot elements");
            Vec::new()
        }
        Ok(None) => {
            tracing::warn!(resource_type, "No base definition for resource type");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(resource_type, error = %e, "Failed to load base definition");
            Vec::new()
        }
    }
}

/// Check that `elements` is a usable base for `resource_type`: non-empty and
/// rooted at an element whose path is exactly the type name.
pub fn ensure_base_elements(elements: &[ElementDefinition], resource_type: &str) -> Result<()> {
    match elements.first() {
        Some(root) if root.path == resource_type => Ok(()),
        _ => Err(Error::BaseDefinitionNotFound(resource_type.to_string())),
    }
}
