//! FHIR StructureDefinition Snapshot Generation
//!
//! This crate merges a StructureDefinition's differential onto the snapshot
//! elements of its base type and returns the document with a fully resolved,
//! ordered `snapshot` in place of the `differential`.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use snapgen_context::InMemoryRepository;
//! use snapgen_snapshot::{ElementDefinition, SnapshotMerger};
//!
//! let repository = InMemoryRepository::new().with(
//!     "Patient",
//!     vec![ElementDefinition::new("Patient"), ElementDefinition::new("Patient.name")],
//! );
//!
//! let profile = json!({
//!     "resourceType": "StructureDefinition",
//!     "url": "http://example.org/fhir/StructureDefinition/MyPatient",
//!     "baseDefinition": "http://hl7.org/fhir/StructureDefinition/Patient",
//!     "differential": { "element": [
//!         { "id": "Patient.name", "path": "Patient.name", "min": 1 }
//!     ] }
//! });
//!
//! let result = SnapshotMerger::new(&repository).generate_snapshot(&profile).unwrap();
//! assert!(result.get("differential").is_none());
//! assert_eq!(result["snapshot"]["element"][1]["min"], 1);
//! ```

pub mod error;
pub mod generator;
pub mod merge;
pub mod ordering;
pub mod resource_type;
pub mod retrieval;
pub mod snapshot_generation;

pub use error::{Error, Result};
pub use generator::{generate_snapshot, generate_snapshot_with_stats};
pub use merge::{MergeAction, MergeStats};
pub use resource_type::{extract_resource_type, FALLBACK_RESOURCE_TYPE};
pub use snapshot_generation::{generate_structure_definition_snapshot, SnapshotMerger};
pub use snapgen_models::{Differential, ElementDefinition, ElementDefinitionBase, Property, Snapshot};
