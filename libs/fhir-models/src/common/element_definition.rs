//! FHIR ElementDefinition model
//!
//! Version-agnostic model for ElementDefinition (used in StructureDefinition snapshots and differentials)
//!
//! Scalar properties are typed. Structured payloads (`type`, `binding`,
//! `slicing`, `constraint`, `mapping`, extensions, ...) are held as raw JSON so
//! they pass through a merge exactly as written, including sparse content and
//! nested extensions. Every property records whether it was absent, `null`, or set.

use super::property::Property;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR ElementDefinition - defines an element in a resource or data type structure
///
/// Serializes known properties in declaration order, then `extra` in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinition {
    /// Unique id for inter-element referencing
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub id: Property<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub extension: Property<Value>,

    /// Extensions that cannot be ignored
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub modifier_extension: Property<Value>,

    /// Path of the element in the hierarchy (e.g., "Patient.name")
    pub path: String,

    /// xmlAttr | xmlText | typeAttr | cdaText | xhtml
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub representation: Property<Value>,

    /// Name for this particular element (in a slice)
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub slice_name: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub slice_is_constraining: Property<bool>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub label: Property<String>,

    /// Corresponding codes in terminologies
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub code: Property<Value>,

    /// This element is sliced - slices follow
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub slicing: Property<Value>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub short: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub definition: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub comment: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub requirements: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub alias: Property<Value>,

    /// Minimum cardinality
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub min: Property<u32>,

    /// Maximum cardinality (a number or "*")
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub max: Property<String>,

    /// Base definition information
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub base: Property<ElementDefinitionBase>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub content_reference: Property<String>,

    /// Data type and profile for this element
    #[serde(rename = "type", default, skip_serializing_if = "Property::is_absent")]
    pub types: Property<Value>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub meaning_when_missing: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub order_meaning: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub example: Property<Value>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub max_length: Property<i32>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub condition: Property<Value>,

    /// Condition that must evaluate to true
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub constraint: Property<Value>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub must_support: Property<bool>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub is_modifier: Property<bool>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub is_modifier_reason: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub is_summary: Property<bool>,

    /// ValueSet details if this is coded
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub binding: Property<Value>,

    /// Map element to another set of definitions
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub mapping: Property<Value>,

    /// Choice-typed properties (`fixed[x]`, `pattern[x]`, `defaultValue[x]`,
    /// `minValue[x]`, `maxValue[x]`) and anything else not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where an element's cardinality was originally defined
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElementDefinitionBase {
    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub path: Property<String>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub min: Property<u32>,

    #[serde(default, skip_serializing_if = "Property::is_absent")]
    pub max: Property<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementDefinitionBase {
    pub fn new(path: impl Into<String>, min: u32, max: impl Into<String>) -> Self {
        Self {
            path: Property::Value(path.into()),
            min: Property::Value(min),
            max: Property::Value(max.into()),
            extra: Map::new(),
        }
    }
}

/// Snapshot - a set of elements that define the structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub element: Vec<ElementDefinition>,
}

/// Differential - a set of elements that define changes from the base
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Differential {
    pub element: Vec<ElementDefinition>,
}

impl ElementDefinition {
    /// Create an element with only `id` and `path` set to the given path
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: Property::Value(path.clone()),
            path,
            ..Default::default()
        }
    }

    /// Number of dot-separated segments in the path
    pub fn depth(&self) -> usize {
        self.path.split('.').count()
    }
}
