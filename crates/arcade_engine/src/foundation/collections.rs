//! Specialized collection types

pub use slotmap::{new_key_type, Key, SlotMap};

/// Collect the keys of a slot map up front so the map can be mutated while
/// the keys are walked.
///
/// Entries inserted during the walk are not visited and entries removed
/// during the walk are skipped by the caller's `get_mut` returning `None`.
pub fn snapshot_keys<K: Key, V>(map: &SlotMap<K, V>) -> Vec<K> {
    map.keys().collect()
}

/// Remove every entry matching `dead` and return the removed values in
/// slot order.
pub fn sweep<K: Key, V>(map: &mut SlotMap<K, V>, mut dead: impl FnMut(&V) -> bool) -> Vec<V> {
    let doomed: Vec<K> = map.iter().filter(|(_, v)| dead(v)).map(|(k, _)| k).collect();
    doomed.into_iter().filter_map(|key| map.remove(key)).collect()
}
