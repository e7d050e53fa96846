//! Keyed map <-> ordered list normalization
//!
//! The dashboard keeps entities keyed by id for lookup and needs them as a
//! deterministically ordered list for display. Both conversions are lossless
//! for collision-free input, so `key_by_id(map_to_list(m))` reproduces `m`.

use crate::entity::{by_id, Entity};
use ahash::AHashMap;

/// Entities keyed by id
pub type EntityMap<T> = AHashMap<String, T>;

/// Collect every value of a keyed mapping into a list ordered by id
///
/// Keys are ignored; the mapping's iteration order does not affect the
/// result.
pub fn map_to_list<K, T, I>(mapping: I) -> Vec<T>
where
    I: IntoIterator<Item = (K, T)>,
    T: Entity,
{
    let mut list: Vec<T> = mapping.into_iter().map(|(_, entity)| entity).collect();
    list.sort_by(|a, b| by_id(a, b));
    list
}

/// Collect every value of a keyed mapping into a list ordered for display
/// by name, falling back to id
pub fn map_to_list_by_name<K, T, I>(mapping: I) -> Vec<T>
where
    I: IntoIterator<Item = (K, T)>,
    T: Entity,
{
    let mut list: Vec<T> = mapping.into_iter().map(|(_, entity)| entity).collect();
    sort_by_name_or_id(&mut list);
    list
}

/// Key a list of entities by id
///
/// On id collisions the later entity wins.
pub fn key_by_id<T, I>(list: I) -> EntityMap<T>
where
    I: IntoIterator<Item = T>,
    T: Entity,
{
    let iter = list.into_iter();
    let mut map = EntityMap::with_capacity(iter.size_hint().0);
    for entity in iter {
        map.insert(entity.id().to_owned(), entity);
    }
    map
}

/// Sort in place for display: by name, falling back to id
///
/// [`by_name_or_id`] is not transitive once named and unnamed entities mix
/// (names are compared to names, ids to ids), so the sort key is the
/// display label (name, else id) with the id as tie-break. For lists where
/// every entity is named, or none is, the order matches [`by_name_or_id`].
pub fn sort_by_name_or_id<T: Entity>(list: &mut [T]) {
    list.sort_by(|a, b| {
        display_key(a)
            .cmp(display_key(b))
            .then_with(|| by_id(a, b))
    });
}

fn display_key<T: Entity>(entity: &T) -> &str {
    entity.name().unwrap_or_else(|| entity.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{by_name_or_id, Device, Folder};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;

    fn ids<T: Entity>(list: &[T]) -> Vec<&str> {
        list.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_map_to_list_orders_by_id() {
        let map = key_by_id(vec![Folder::new("b"), Folder::new("a"), Folder::new("c")]);

        let list = map_to_list(map);
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_map_to_list_ignores_iteration_order() {
        let mut folders: Vec<Folder> = (0..64).map(|i| Folder::new(format!("f{:03}", i))).collect();
        let expected: Vec<String> = folders.iter().map(|f| f.id.clone()).collect();

        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..5 {
            folders.shuffle(&mut rng);
            let list = map_to_list(folders.iter().cloned().map(|f| (f.id.clone(), f)));
            assert_eq!(ids(&list), expected);
        }
    }

    #[test]
    fn test_map_to_list_accepts_any_map() {
        let mut btree = BTreeMap::new();
        btree.insert("z", Folder::new("z"));
        btree.insert("m", Folder::new("m"));
        assert_eq!(ids(&map_to_list(btree)), vec!["m", "z"]);

        let mut std_map = HashMap::new();
        std_map.insert("2".to_string(), Device::new("2"));
        std_map.insert("1".to_string(), Device::new("1"));
        assert_eq!(ids(&map_to_list(std_map)), vec!["1", "2"]);

        let empty: EntityMap<Folder> = EntityMap::default();
        assert!(map_to_list(empty).is_empty());
    }

    #[test]
    fn test_round_trip_preserves_keys_and_values() {
        let mut original = EntityMap::default();
        for device in [
            Device::named("ABC", "laptop"),
            Device::new("DEF"),
            Device::named("GHI", "nas"),
        ] {
            original.insert(device.device_id.clone(), device);
        }

        let restored = key_by_id(map_to_list(original.clone()));
        assert_eq!(restored, original);
    }

    #[test]
    fn test_round_trip_preserves_identity() {
        let shared: Vec<Arc<Folder>> = ["x", "y"].iter().map(|id| Arc::new(Folder::new(*id))).collect();
        let map = key_by_id(shared.iter().cloned());

        let restored = key_by_id(map_to_list(map));
        for folder in &shared {
            assert!(Arc::ptr_eq(&restored[folder.id()], folder));
        }
    }

    #[test]
    fn test_key_by_id_last_write_wins() {
        let first = Device::named("A", "old");
        let second = Device::named("A", "new");

        let map = key_by_id(vec![first, second]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"].name.as_deref(), Some("new"));
    }

    #[test]
    fn test_map_to_list_by_name() {
        let map = key_by_id(vec![
            Device::named("1", "Bob"),
            Device::named("2", "Alice"),
        ]);

        let list = map_to_list_by_name(map);
        assert_eq!(ids(&list), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_by_name_breaks_ties_by_id() {
        let mut devices = vec![
            Device::named("c", "laptop"),
            Device::named("a", "laptop"),
            Device::named("b", "desktop"),
        ];

        sort_by_name_or_id(&mut devices);
        assert_eq!(ids(&devices), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_name_matches_comparator_when_all_named() {
        let mut devices = vec![
            Device::named("1", "carol"),
            Device::named("2", "alice"),
            Device::named("3", "bob"),
        ];
        let mut expected = devices.clone();
        expected.sort_by(|a, b| by_name_or_id(a, b));

        sort_by_name_or_id(&mut devices);
        assert_eq!(devices, expected);
    }

    #[test]
    fn test_sort_by_name_mixed_named_and_unnamed() {
        // Pairwise comparison is cyclic here: a < b and b < c by id,
        // but c < a by name
        let mut devices = vec![
            Device::named("a", "zeta"),
            Device::new("b"),
            Device::named("c", "alpha"),
        ];

        sort_by_name_or_id(&mut devices);
        assert_eq!(ids(&devices), vec!["c", "b", "a"]);
    }
}
