//! Resource type command implementation.

use anyhow::Result;
use clap::Args;
use snapgen_snapshot::extract_resource_type;

/// Print the resource type a baseDefinition URL resolves to
#[derive(Args, Debug)]
pub struct ResourceTypeCommand {
    /// Canonical URL, e.g. http://hl7.org/fhir/StructureDefinition/Patient
    pub url: String,
}

impl ResourceTypeCommand {
    pub fn execute(&self) -> Result<()> {
        println!("{}", extract_resource_type(&self.url));
        Ok(())
    }
}
