//! Version-agnostic FHIR models
//!
//! Types that work across FHIR R4 and R4B

pub mod element_definition;
pub mod error;
pub mod property;
pub mod structure_definition;

// Re-export commonly used types
pub use element_definition::*;
pub use error::{Error, Result};
pub use property::Property;
pub use structure_definition::*;
