//! Snapshot command implementation.

use crate::config::{CliConfig, DefinitionsSource, OutputTarget};
use crate::io::{default_output_path, read_document, write_document};
use anyhow::{bail, Context, Result};
use clap::Args;
use snapgen_context::directory::DEFAULT_CACHE_CAPACITY;
use snapgen_context::BaseDefinitionRepository;
use snapgen_snapshot::SnapshotMerger;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Generate snapshots for differential StructureDefinitions
#[derive(Args, Debug)]
pub struct SnapshotCommand {
    /// Differential StructureDefinition JSON files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Directory for output files; defaults to each input's directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Base definitions: a directory of StructureDefinition-<Type>.json files,
    /// an extracted FHIR package, or a package .tgz
    #[arg(short, long, env = "SNAPGEN_DEFINITIONS")]
    pub definitions: PathBuf,

    /// Number of parsed base definitions kept in memory
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,
}

impl SnapshotCommand {
    pub fn config(&self) -> Result<CliConfig> {
        let output = match (&self.output, &self.out_dir) {
            (Some(_), _) if self.inputs.len() > 1 => {
                bail!("--output accepts a single input; use --out-dir for several")
            }
            (Some(file), _) => OutputTarget::File(file.clone()),
            (None, Some(dir)) => OutputTarget::Directory(dir.clone()),
            (None, None) => OutputTarget::BesideInput,
        };

        Ok(CliConfig {
            definitions: DefinitionsSource::from_path(&self.definitions)?,
            cache_capacity: self.cache_capacity,
            output,
        })
    }

    /// Execute the snapshot command
    pub fn execute(&self) -> Result<()> {
        for input in &self.inputs {
            if !input.exists() {
                bail!("Input path does not exist: {}", input.display());
            }
        }

        let config = self.config()?;
        let repository = config.definitions.open(config.cache_capacity)?;

        for input in &self.inputs {
            let written = process_file(input, repository.as_ref(), &config.output)?;
            println!("{}", written.display());
        }

        info!(files = self.inputs.len(), "Snapshot generation complete");
        Ok(())
    }
}

/// Generate the snapshot for one input file and write it. Returns the output path.
pub fn process_file(
    input: &Path,
    repository: &dyn BaseDefinitionRepository,
    output: &OutputTarget,
) -> Result<PathBuf> {
    let document = read_document(input)?;

    let snapshot = SnapshotMerger::new(repository)
        .generate_snapshot(&document)
        .with_context(|| format!("Failed to generate snapshot for {}", input.display()))?;

    let path = match output {
        OutputTarget::File(file) => file.clone(),
        OutputTarget::Directory(dir) => default_output_path(&document, input, Some(dir)),
        OutputTarget::BesideInput => default_output_path(&document, input, None),
    };

    if same_file(&path, input) {
        bail!(
            "Refusing to overwrite input {}; pass --output or --out-dir",
            input.display()
        );
    }

    write_document(&path, &snapshot)?;
    info!(input = %input.display(), output = %path.display(), "Wrote snapshot");
    Ok(path)
}

/// True when both paths name the same file. Paths that do not exist yet
/// only compare literally.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
