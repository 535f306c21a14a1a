use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Assigns sequential 1-based IDs to values, collapsing equal keys onto one ID.
///
/// Values are stored in first-seen order, so iterating the table yields them in ID order.
/// Equality is decided by the key's `Eq`/`Hash`, never by object identity: two separately
/// constructed but equal keys receive the same ID.
#[derive(Debug, Clone)]
pub struct IdTable<K, V = K> {
    seen: HashMap<K, usize>,
    by_id: Vec<V>,
}

impl<K, V> Default for IdTable<K, V> {
    fn default() -> Self {
        Self {
            seen: HashMap::new(),
            by_id: Vec::new(),
        }
    }
}

impl<K: Hash + Eq, V> IdTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ID of `key`, recording `value` under a fresh ID if the key is new.
    pub fn assign_with(&mut self, key: K, value: V) -> usize {
        match self.seen.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.by_id.push(value);
                let id = self.by_id.len();
                entry.insert(id);
                id
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<usize> {
        self.seen.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterates `(id, value)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.by_id.iter().enumerate().map(|(i, value)| (i + 1, value))
    }
}

impl<K: Hash + Eq + Clone> IdTable<K, K> {
    pub fn assign(&mut self, value: K) -> usize {
        self.assign_with(value.clone(), value)
    }
}

const ASYM_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the chain label for a 0-based chain index.
///
/// Labels run A..Z, then AA..ZZ, then AAA and so on (bijective base 26).
pub fn asym_id_for_index(index: usize) -> String {
    let base = ASYM_ALPHABET.len();
    let mut index = index;
    let mut label = Vec::new();
    while index >= base {
        label.push(ASYM_ALPHABET[index % base]);
        index = index / base - 1;
    }
    label.push(ASYM_ALPHABET[index]);
    label.reverse();
    label.into_iter().map(char::from).collect()
}

/// Lazy, never-ending sequence of chain labels. Create a new one to restart from `A`.
#[derive(Debug, Clone, Default)]
pub struct AsymIdGenerator {
    next: usize,
}

impl AsymIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for AsymIdGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let label = asym_id_for_index(self.next);
        self.next += 1;
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_table_assigns_sequential_ids_in_first_seen_order() {
        let mut table = IdTable::new();
        assert_eq!(table.assign("b"), 1);
        assert_eq!(table.assign("a"), 2);
        assert_eq!(table.assign("b"), 1);
        assert_eq!(table.assign("c"), 3);
        let values: Vec<_> = table.iter().collect();
        assert_eq!(values, vec![(1, &"b"), (2, &"a"), (3, &"c")]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn id_table_collapses_equal_but_distinct_values() {
        let mut table = IdTable::new();
        let first = String::from("repo");
        let second = String::from("repo");
        assert_eq!(table.assign(first), 1);
        assert_eq!(table.assign(second), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"repo".to_string()), Some(1));
        assert_eq!(table.get(&"other".to_string()), None);
    }

    #[test]
    fn id_table_keeps_first_value_for_a_key() {
        let mut table: IdTable<u8, &str> = IdTable::new();
        assert_eq!(table.assign_with(7, "first"), 1);
        assert_eq!(table.assign_with(7, "second"), 1);
        assert_eq!(table.iter().next(), Some((1, &"first")));
    }

    #[test]
    fn first_twenty_six_labels_are_single_letters() {
        let labels: Vec<String> = AsymIdGenerator::new().take(26).collect();
        let expected: Vec<String> = ('A'..='Z').map(String::from).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn labels_continue_with_two_then_three_letters() {
        assert_eq!(AsymIdGenerator::new().nth(26).unwrap(), "AA");
        assert_eq!(asym_id_for_index(27), "AB");
        assert_eq!(asym_id_for_index(51), "AZ");
        assert_eq!(asym_id_for_index(52), "BA");
        assert_eq!(asym_id_for_index(701), "ZZ");
        assert_eq!(asym_id_for_index(702), "AAA");
    }

    #[test]
    fn labels_never_repeat() {
        let labels: Vec<String> = AsymIdGenerator::new().take(1000).collect();
        let unique: HashSet<&String> = labels.iter().collect();
        assert_eq!(unique.len(), 1000);
    }

    #[test]
    fn generator_restarts_when_recreated() {
        let mut generator = AsymIdGenerator::new();
        generator.next();
        generator.next();
        assert_eq!(AsymIdGenerator::new().next().unwrap(), "A");
    }
}
