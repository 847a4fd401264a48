use std::collections::HashMap;
use std::hash::Hash;

/// Keyed tally that remembers first-seen order.
///
/// Rankings built on top of it sort stably, so equal counts stay in the
/// order their keys first appeared.
#[derive(Debug, Clone)]
pub struct OrderedTally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedTally<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V> OrderedTally<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_or_insert_with(&mut self, key: &K, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((key.clone(), init()));
                self.index.insert(key.clone(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|idx| &self.entries[*idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_iter().map(|(_, v)| v)
    }
}
