use std::collections::HashMap;

use super::record::PolyRecord;

/// The current reduced polygon set, keyed by content id.
///
/// Exclusively owned by one reduction pass. Live entries always have
/// pairwise-distinct ids; a superseded member is removed in the same
/// `replace` call that inserts the union that absorbed it, so there is no
/// window where both are observable.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, PolyRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of live records.
    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    /// Check if there are no live records.
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Look up a record by content id.
    #[inline] pub fn get(&self, id: &str) -> Option<&PolyRecord> { self.entries.get(id) }

    /// Insert a record under its content id. Byte-identical ring structures
    /// collide deterministically; the newcomer wins.
    pub fn insert(&mut self, record: PolyRecord) {
        self.entries.insert(record.id().to_string(), record);
    }

    /// Iterate over the live records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &PolyRecord> {
        self.entries.values()
    }

    /// Remove every id in `superseded`, then insert `merged`, as one step.
    pub fn replace(&mut self, superseded: &[String], merged: PolyRecord) {
        for id in superseded {
            self.entries.remove(id);
        }
        self.insert(merged);
    }

    /// Consume the registry, yielding the live records.
    pub fn into_records(self) -> Vec<PolyRecord> {
        self.entries.into_values().collect()
    }
}
