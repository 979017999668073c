//! Repository over a loaded FHIR NPM package.

use crate::error::{Error, Result};
use crate::repository::BaseDefinitionRepository;
use snapgen_models::{ElementDefinition, StructureDefinition};
use snapgen_package::FhirPackage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Serves base elements from the StructureDefinitions of a [`FhirPackage`].
///
/// Definitions are parsed lazily and memoized per resource type.
pub struct PackageRepository {
    package: FhirPackage,
    parsed: RwLock<HashMap<String, Arc<Vec<ElementDefinition>>>>,
}

impl PackageRepository {
    pub fn new(package: FhirPackage) -> Self {
        Self {
            package,
            parsed: RwLock::new(HashMap::new()),
        }
    }

    /// Load from an extracted package directory or a `.tgz` archive.
    pub fn open(path: &Path) -> Result<Self> {
        let package = if path.is_dir() {
            FhirPackage::from_directory(path)?
        } else {
            FhirPackage::from_tar_gz_file(path)?
        };
        tracing::info!(
            package = %package.manifest.name,
            version = %package.manifest.version,
            "Using FHIR package for base definitions"
        );
        Ok(Self::new(package))
    }

    pub fn package(&self) -> &FhirPackage {
        &self.package
    }
}

impl BaseDefinitionRepository for PackageRepository {
    fn base_elements(&self, resource_type: &str) -> Result<Option<Arc<Vec<ElementDefinition>>>> {
        if let Some(hit) = self
            .parsed
            .read()
            .ok()
            .and_then(|m| m.get(resource_type).cloned())
        {
            return Ok(Some(hit));
        }

        let Some(resource) = self.package.structure_definition_for_type(resource_type) else {
            return Ok(None);
        };

        let sd = StructureDefinition::from_value(resource)?;
        let elements = sd.snapshot_elements().map_err(|_| {
            Error::InvalidStructureDefinition(format!("{} has no snapshot", sd.url))
        })?;
        let elements = Arc::new(elements.to_vec());

        if let Ok(mut m) = self.parsed.write() {
            m.insert(resource_type.to_string(), Arc::clone(&elements));
        }
        Ok(Some(elements))
    }
}
