//! FHIR NPM package loading.
//!
//! Reads a package either from an extracted directory (`package/`) or from a
//! `.tgz` archive, and indexes its resources so base StructureDefinitions can
//! be found by canonical URL or id.

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;
use tar::Archive;
use thiserror::Error;

/// Canonical URL prefix of the core FHIR StructureDefinitions.
pub const CORE_STRUCTURE_DEFINITION_BASE: &str = "http://hl7.org/fhir/StructureDefinition/";

/// FHIR NPM Package manifest (`package/package.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fhir_versions: Vec<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub author: String,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// Package index (`.index.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIndex {
    #[serde(rename = "index-version")]
    pub index_version: u8,
    pub files: Vec<IndexedFile>,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// File entry in package index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFile {
    pub filename: String,
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
    #[error("Missing file: {0}")]
    MissingFile(String),
}

pub type PackageResult<T> = Result<T, PackageError>;

/// Loaded FHIR package with manifest, optional index, and resources.
///
/// Resources are indexed by ID and canonical URL for fast lookups.
#[derive(Debug, Clone)]
pub struct FhirPackage {
    pub manifest: PackageManifest,
    pub index: Option<PackageIndex>,
    pub resources: Vec<Value>,

    resources_by_id: HashMap<String, usize>,
    resources_by_url: HashMap<String, usize>,
}

impl FhirPackage {
    /// Create a new FHIR package from manifest and resources.
    pub fn new(manifest: PackageManifest, resources: Vec<Value>) -> Self {
        let mut package = Self {
            manifest,
            index: None,
            resources,
            resources_by_id: HashMap::new(),
            resources_by_url: HashMap::new(),
        };

        package.build_indices();
        package
    }

    /// Load package from tar.gz reader.
    pub fn from_tar_gz<R: Read>(mut reader: R) -> PackageResult<Self> {
        let mut decoder = GzDecoder::new(&mut reader);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;

        let mut archive = Archive::new(std::io::Cursor::new(decompressed));
        // Sorted so that resource order (and duplicate resolution) is stable.
        let mut file_map: BTreeMap<String, Vec<u8>> = BTreeMap::new();

        for entry in archive.entries()? {
            let mut entry = entry?;
            let path = entry.path()?.to_string_lossy().to_string();
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            file_map.insert(path, contents);
        }

        let manifest_path = "package/package.json";
        let manifest = file_map
            .get(manifest_path)
            .ok_or_else(|| PackageError::MissingFile(manifest_path.to_string()))
            .and_then(|bytes| Self::parse_json::<PackageManifest>(bytes))?;

        let index = file_map
            .get("package/.index.json")
            .and_then(|bytes| Self::parse_json::<PackageIndex>(bytes).ok());

        let resources = file_map
            .iter()
            .filter(|(path, _)| {
                path.starts_with("package/")
                    && !path["package/".len()..].contains('/')
                    && path.ends_with(".json")
                    && path.as_str() != manifest_path
                    && path.as_str() != "package/.index.json"
            })
            .map(|(_, contents)| Self::parse_json(contents))
            .collect::<PackageResult<Vec<Value>>>()?;

        tracing::debug!(
            package = %manifest.name,
            version = %manifest.version,
            resources = resources.len(),
            "Loaded FHIR package archive"
        );

        let mut package = Self::new(manifest, resources);
        package.index = index;
        Ok(package)
    }

    /// Load package from tar.gz bytes.
    pub fn from_tar_gz_bytes(bytes: &[u8]) -> PackageResult<Self> {
        Self::from_tar_gz(std::io::Cursor::new(bytes))
    }

    /// Load package from a `.tgz` file on disk.
    pub fn from_tar_gz_file(path: &Path) -> PackageResult<Self> {
        Self::from_tar_gz(fs::File::open(path)?)
    }

    /// Load package from directory (the extracted `package/` folder).
    pub fn from_directory(package_dir: &Path) -> PackageResult<Self> {
        let manifest_path = package_dir.join("package.json");
        if !manifest_path.exists() {
            return Err(PackageError::MissingFile(
                manifest_path.to_string_lossy().into(),
            ));
        }

        let manifest = Self::parse_json::<PackageManifest>(&fs::read(manifest_path)?)?;

        let index = package_dir
            .join(".index.json")
            .exists()
            .then(|| package_dir.join(".index.json"))
            .and_then(|p| fs::read(p).ok())
            .and_then(|bytes| Self::parse_json::<PackageIndex>(&bytes).ok());

        let resources =
            Self::load_resources_from_dir(package_dir, &["package.json", ".index.json"])?;

        tracing::debug!(
            package = %manifest.name,
            version = %manifest.version,
            resources = resources.len(),
            "Loaded FHIR package directory"
        );

        let mut package = Self::new(manifest, resources);
        package.index = index;
        Ok(package)
    }

    pub fn resource_by_id(&self, id: &str) -> Option<&Value> {
        self.resources_by_id.get(id).map(|&i| &self.resources[i])
    }

    pub fn resource_by_url(&self, url: &str) -> Option<&Value> {
        self.resources_by_url.get(url).map(|&i| &self.resources[i])
    }

    /// Find the StructureDefinition that defines `type_name`.
    ///
    /// Tries the core canonical URL first, then a StructureDefinition whose id
    /// equals the type name.
    pub fn structure_definition_for_type(&self, type_name: &str) -> Option<&Value> {
        let is_sd = |r: &&Value| {
            r.get("resourceType").and_then(Value::as_str) == Some("StructureDefinition")
        };

        self.resource_by_url(&format!("{CORE_STRUCTURE_DEFINITION_BASE}{type_name}"))
            .filter(is_sd)
            .or_else(|| self.resource_by_id(type_name).filter(is_sd))
    }

    fn build_indices(&mut self) {
        for (i, resource) in self.resources.iter().enumerate() {
            if resource.get("resourceType").and_then(Value::as_str).is_none() {
                continue;
            }
            if let Some(id) = resource.get("id").and_then(Value::as_str) {
                self.resources_by_id.insert(id.to_string(), i);
            }
            if let Some(url) = resource.get("url").and_then(Value::as_str) {
                self.resources_by_url.insert(url.to_string(), i);
            }
        }
    }

    fn parse_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> PackageResult<T> {
        let cleaned = Self::clean_bytes(bytes)?;
        Ok(serde_json::from_str(&cleaned)?)
    }

    fn load_resources_from_dir(dir: &Path, exclude: &[&str]) -> PackageResult<Vec<Value>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension() == Some("json".as_ref()) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if !exclude.contains(&name) {
                        paths.push(path);
                    }
                }
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| Self::parse_json(&fs::read(path)?))
            .collect()
    }

    fn clean_bytes(bytes: &[u8]) -> PackageResult<String> {
        let bytes = if bytes.len() >= 3 && &bytes[..3] == b"\xEF\xBB\xBF" {
            &bytes[3..]
        } else {
            bytes
        };

        let content = String::from_utf8(bytes.to_vec())
            .map_err(|e| PackageError::InvalidStructure(format!("Invalid UTF-8: {}", e)))?;

        Ok(content
            .chars()
            .filter(|&c| matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\x7F'))
            .collect::<String>()
            .trim()
            .to_string())
    }
}
