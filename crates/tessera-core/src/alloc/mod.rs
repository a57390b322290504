//! Collection types shared by the Tessera crates.
//!
//! - `HashMap`/`HashSet` aliases backed by AHash
//! - [`SparseSet`](sparse_set::SparseSet), the generational arena that backs
//!   object storage

pub mod sparse_set;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ahash_map_roundtrips_keys() {
        let mut map = HashMap::new();
        map.insert(7u64, "seven");
        assert_eq!(map.get(&7), Some(&"seven"));
        assert!(map.get(&8).is_none());
    }

    #[test]
    fn test_ahash_set_deduplicates() {
        let mut set = HashSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);
    }
}
