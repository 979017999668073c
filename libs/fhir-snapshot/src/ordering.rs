//! Snapshot element ordering
//!
//! Elements are ordered by path depth, then by a collation of the path that
//! follows root-locale rules. Punctuation sorts before digits and digits
//! before letters. Letters compare case- and accent-insensitively first, so
//! `é` sorts with `e`; remaining ties put lowercase before uppercase.

use snapgen_models::ElementDefinition;
use std::cmp::Ordering;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// ASCII punctuation and symbols in root collation order.
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

fn primary_weight(c: char) -> (u8, u32) {
    if let Some(index) = PUNCTUATION_ORDER.find(c) {
        (0, index as u32)
    } else if c.is_ascii_digit() {
        (1, c as u32)
    } else if c.is_alphabetic() {
        let folded = c.to_lowercase().next().unwrap_or(c);
        (2, folded as u32)
    } else {
        (3, c as u32)
    }
}

fn case_weight(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

/// Canonical decomposition with combining marks removed.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

/// Compare two element paths the way a locale-aware string comparison does.
///
/// Falls back to code point order, so only identical strings compare equal.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .map(primary_weight)
        .cmp(base_letters(b).map(primary_weight))
        .then_with(|| {
            base_letters(a)
                .map(case_weight)
                .cmp(base_letters(b).map(case_weight))
        })
        .then_with(|| a.cmp(b))
}

/// Depth first, then path collation.
pub fn compare_elements(a: &ElementDefinition, b: &ElementDefinition) -> Ordering {
    a.depth()
        .cmp(&b.depth())
        .then_with(|| compare_paths(&a.path, &b.path))
}

/// Stable sort; elements with equal paths keep their relative order.
pub fn sort_elements(elements: &mut [ElementDefinition]) {
    elements.sort_by(compare_elements);
}
