//! FHIR data models
//!
//! This crate provides strongly-typed Rust structures for the parts of a FHIR
//! StructureDefinition that snapshot generation works with.
//!
//! # Module Organization
//!
//! - `common`: Version-agnostic models for StructureDefinition and ElementDefinition
//!
//! # Design Philosophy
//!
//! - **Strongly-typed**: Every known ElementDefinition property is a named field
//! - **Lossless**: structured payloads stay raw JSON, explicit `null`s are kept
//!   apart from missing properties, and `extra` captures choice-typed
//!   (`fixed[x]`, `pattern[x]`, ...) and unknown properties in their original order
//! - **Compatible**: Works with existing `serde_json::Value`-based code
//!
//! # Example
//!
//! ```rust
//! use snapgen_models::common::{StructureDefinition, StructureDefinitionKind};
//! use serde_json::json;
//!
//! let sd_json = json!({
//!     "resourceType": "StructureDefinition",
//!     "id": "Patient",
//!     "url": "http://hl7.org/fhir/StructureDefinition/Patient",
//!     "version": "4.0.1",
//!     "name": "Patient",
//!     "status": "active",
//!     "kind": "resource",
//!     "abstract": false,
//!     "type": "Patient"
//! });
//!
//! let sd: StructureDefinition = serde_json::from_value(sd_json).unwrap();
//! assert_eq!(sd.name, "Patient");
//! assert_eq!(sd.kind, StructureDefinitionKind::Resource);
//! assert!(sd.snapshot.is_none());
//! ```

pub mod common;

// Re-export commonly used types
pub use common::*;
