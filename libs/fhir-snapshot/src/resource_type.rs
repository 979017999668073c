//! Resource type extraction from `baseDefinition` canonical URLs

use regex::Regex;
use std::sync::OnceLock;

/// Resource type used when the base definition URL has no recognizable type segment.
pub const FALLBACK_RESOURCE_TYPE: &str = "DomainResource";

fn base_definition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"StructureDefinition/([A-Za-z0-9_]+)$").expect("static pattern is valid")
    })
}

/// Extract the resource type from a `baseDefinition` URL.
///
/// `http://hl7.org/fhir/StructureDefinition/Patient` yields `Patient`. Anything
/// that does not end in `StructureDefinition/<word>` yields
/// [`FALLBACK_RESOURCE_TYPE`].
pub fn extract_resource_type(base_definition: &str) -> String {
    base_definition_pattern()
        .captures(base_definition)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_RESOURCE_TYPE.to_string())
}
