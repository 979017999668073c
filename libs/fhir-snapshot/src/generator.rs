//! Element-level snapshot generation

use crate::merge::{merge_differential, MergeStats};
use crate::ordering::sort_elements;
use snapgen_models::{Differential, ElementDefinition, Snapshot};

/// Merge `differential` onto a copy of `base` and sort the result.
///
/// `base` is never modified. No repository access and no validation of the
/// base happens here; see [`crate::SnapshotMerger`] for the full document flow.
pub fn generate_snapshot(base: &[ElementDefinition], differential: &Differential) -> Snapshot {
    generate_snapshot_with_stats(base, differential).0
}

/// Like [`generate_snapshot`], also reporting how many elements were updated
/// and how many were added.
pub fn generate_snapshot_with_stats(
    base: &[ElementDefinition],
    differential: &Differential,
) -> (Snapshot, MergeStats) {
    let mut working = base.to_vec();
    let stats = merge_differential(&mut working, &differential.element);
    sort_elements(&mut working);

    tracing::debug!(
        base_elements = base.len(),
        differential_elements = differential.element.len(),
        updated = stats.updated,
        added = stats.synthesized,
        snapshot_elements = working.len(),
        "Merged differential onto base"
    );

    (Snapshot { element: working }, stats)
}
