//! Resolved command settings

use anyhow::{bail, Context, Result};
use snapgen_context::{BaseDefinitionRepository, DirectoryRepository, PackageRepository};
use std::path::{Path, PathBuf};

/// Where base definitions are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionsSource {
    /// Directory of `StructureDefinition-<Type>.json` files
    Directory(PathBuf),
    /// FHIR NPM package, extracted or as a `.tgz`
    Package(PathBuf),
}

impl DefinitionsSource {
    /// Classify `path`.
    ///
    /// A directory with a `package.json` (directly or under `package/`) is a
    /// package; any other directory is read file by file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Definitions path does not exist: {}", path.display());
        }

        if path.is_dir() {
            if path.join("package.json").is_file() {
                return Ok(Self::Package(path.to_path_buf()));
            }
            let nested = path.join("package");
            if nested.join("package.json").is_file() {
                return Ok(Self::Package(nested));
            }
            return Ok(Self::Directory(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.ends_with(".tgz") || name.ends_with(".tar.gz") {
            return Ok(Self::Package(path.to_path_buf()));
        }

        bail!(
            "Definitions must be a directory or a .tgz package: {}",
            path.display()
        )
    }

    pub fn open(&self, cache_capacity: usize) -> Result<Box<dyn BaseDefinitionRepository>> {
        match self {
            Self::Directory(root) => {
                tracing::info!(root = %root.display(), "Using definitions directory");
                Ok(Box::new(DirectoryRepository::with_capacity(
                    root,
                    cache_capacity,
                )))
            }
            Self::Package(path) => {
                let repository = PackageRepository::open(path)
                    .with_context(|| format!("Failed to load package: {}", path.display()))?;
                Ok(Box::new(repository))
            }
        }
    }
}

/// Where generated snapshots are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Explicit file (single input only)
    File(PathBuf),
    /// Named file inside this directory
    Directory(PathBuf),
    /// Named file next to each input
    BesideInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub definitions: DefinitionsSource,
    pub cache_capacity: usize,
    pub output: OutputTarget,
}
