//! Base definition repositories
//!
//! Snapshot generation needs the already-snapshotted element list of the type a
//! profile derives from. This crate provides the [`BaseDefinitionRepository`]
//! trait and the stores behind it: an in-memory map, a directory of
//! `StructureDefinition-<Type>.json` files, and a loaded FHIR package.

pub mod directory;
pub mod error;
pub mod package;
pub mod repository;

pub use directory::DirectoryRepository;
pub use error::{Error, Result};
pub use package::PackageRepository;
pub use repository::{BaseDefinitionRepository, InMemoryRepository};
