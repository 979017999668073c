//! Differential-onto-base element merge
//!
//! Each differential element either updates the first matching element of the
//! working list or is appended as a new element. Matching is by `id` first,
//! then by `path` for non-sliced differential elements. Nested payloads
//! (`type`, `binding`, `slicing`, `extension`, ...) are replaced wholesale.
//! A property the differential sets to `null` overwrites like any other value.

use snapgen_models::{ElementDefinition, ElementDefinitionBase, Property};

/// Outcome of applying one differential element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// An existing element at this index was updated
    Updated(usize),
    /// A new element was appended at this index
    Synthesized(usize),
}

/// Counts of what a merge pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub updated: usize,
    pub synthesized: usize,
}

/// Find the working element a differential element applies to.
///
/// 1. first element with the same `id` (only when the differential has one)
/// 2. first element with the same `path`, unless the differential is a slice
///
/// A `null` id or sliceName counts as unset.
pub fn find_target(working: &[ElementDefinition], diff: &ElementDefinition) -> Option<usize> {
    if let Some(id) = diff.id.as_str() {
        if let Some(index) = working.iter().position(|e| e.id.as_str() == Some(id)) {
            return Some(index);
        }
    }

    if diff.slice_name.as_value().is_none() {
        return working.iter().position(|e| e.path == diff.path);
    }

    None
}

fn overwrite<T: Clone>(slot: &mut Property<T>, value: &Property<T>) {
    if !value.is_absent() {
        *slot = value.clone();
    }
}

/// Copy every field present on `diff` onto `target`, `null` included.
///
/// Fields absent on `diff` are left as they are, including `base`.
pub fn apply_differential(target: &mut ElementDefinition, diff: &ElementDefinition) {
    // Destructured so a new model field cannot be silently left out.
    let ElementDefinition {
        id,
        extension,
        modifier_extension,
        path,
        representation,
        slice_name,
        slice_is_constraining,
        label,
        code,
        slicing,
        short,
        definition,
        comment,
        requirements,
        alias,
        min,
        max,
        base,
        content_reference,
        types,
        meaning_when_missing,
        order_meaning,
        example,
        max_length,
        condition,
        constraint,
        must_support,
        is_modifier,
        is_modifier_reason,
        is_summary,
        binding,
        mapping,
        extra,
    } = diff;

    overwrite(&mut target.id, id);
    target.path = path.clone();

    overwrite(&mut target.types, types);
    overwrite(&mut target.binding, binding);
    overwrite(&mut target.slicing, slicing);
    overwrite(&mut target.extension, extension);

    overwrite(&mut target.modifier_extension, modifier_extension);
    overwrite(&mut target.representation, representation);
    overwrite(&mut target.slice_name, slice_name);
    overwrite(&mut target.slice_is_constraining, slice_is_constraining);
    overwrite(&mut target.label, label);
    overwrite(&mut target.code, code);
    overwrite(&mut target.short, short);
    overwrite(&mut target.definition, definition);
    overwrite(&mut target.comment, comment);
    overwrite(&mut target.requirements, requirements);
    overwrite(&mut target.alias, alias);
    overwrite(&mut target.min, min);
    overwrite(&mut target.max, max);
    overwrite(&mut target.base, base);
    overwrite(&mut target.content_reference, content_reference);
    overwrite(&mut target.meaning_when_missing, meaning_when_missing);
    overwrite(&mut target.order_meaning, order_meaning);
    overwrite(&mut target.example, example);
    overwrite(&mut target.max_length, max_length);
    overwrite(&mut target.condition, condition);
    overwrite(&mut target.constraint, constraint);
    overwrite(&mut target.must_support, must_support);
    overwrite(&mut target.is_modifier, is_modifier);
    overwrite(&mut target.is_modifier_reason, is_modifier_reason);
    overwrite(&mut target.is_summary, is_summary);
    overwrite(&mut target.mapping, mapping);

    for (key, value) in extra {
        target.extra.insert(key.clone(), value.clone());
    }
}

/// Build a new snapshot element from a differential element with no match.
///
/// Adds `base` provenance (`min` defaults to 0, `max` to `*`) unless the
/// differential already carries one. A `null` base is replaced.
pub fn synthesize_element(diff: &ElementDefinition) -> ElementDefinition {
    let mut element = diff.clone();
    if element.base.as_value().is_none() {
        let min = diff.min.as_value().copied().unwrap_or(0);
        let max = diff.max.as_str().unwrap_or("*");
        element.base = ElementDefinitionBase::new(diff.path.clone(), min, max).into();
    }
    element
}

/// Apply one differential element to the working list.
pub fn merge_element(working: &mut Vec<ElementDefinition>, diff: &ElementDefinition) -> MergeAction {
    match find_target(working, diff) {
        Some(index) => {
            apply_differential(&mut working[index], diff);
            MergeAction::Updated(index)
        }
        None => {
            working.push(synthesize_element(diff));
            MergeAction::Synthesized(working.len() - 1)
        }
    }
}

/// Apply differential elements in order. Later entries see elements
/// synthesized by earlier ones.
pub fn merge_differential(
    working: &mut Vec<ElementDefinition>,
    differential: &[ElementDefinition],
) -> MergeStats {
    let mut stats = MergeStats::default();
    for diff in differential {
        match merge_element(working, diff) {
            MergeAction::Updated(index) => {
                tracing::trace!(path = %diff.path, index, "Updated element");
                stats.updated += 1;
            }
            MergeAction::Synthesized(index) => {
                tracing::trace!(path = %diff.path, index, "Added element");
                stats.synthesized += 1;
            }
        }
    }
    stats
}
