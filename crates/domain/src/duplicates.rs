//! Positional duplicate detection over sibling groups.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Find every position whose comparison key occurs more than once.
///
/// Callers build each member's key from its identity fields (trimmed name,
/// plus qualifier-like fields where the member kind has them) and pass
/// `None` for members whose trimmed name is empty; those positions are
/// never flagged. All occurrences of a repeated key are returned, not just
/// the later ones, so each positional sibling can carry its own error.
pub fn duplicate_indices<K>(keys: impl IntoIterator<Item = Option<K>>) -> BTreeSet<usize>
where
    K: Eq + Hash,
{
    let mut positions: HashMap<K, Vec<usize>> = HashMap::new();

    for (index, key) in keys.into_iter().enumerate() {
        if let Some(key) = key {
            positions.entry(key).or_default().push(index);
        }
    }

    positions
        .into_values()
        .filter(|indices| indices.len() > 1)
        .flatten()
        .collect()
}
