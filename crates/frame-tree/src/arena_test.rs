use crate::arena::{Arena, ArenaId};
use crate::ids::BodyId;

#[test]
fn test_insert_and_get() {
    let mut arena: Arena<BodyId, &str> = Arena::new();
    let earth = arena.insert("Earth");
    let moon = arena.insert("Moon");

    assert_eq!(arena.get(earth), Some(&"Earth"));
    assert_eq!(arena.get(moon), Some(&"Moon"));
    assert_eq!(arena.len(), 2);
    assert!(!arena.is_empty());
}

#[test]
fn test_removed_id_goes_stale() {
    let mut arena: Arena<BodyId, &str> = Arena::new();
    let earth = arena.insert("Earth");

    assert_eq!(arena.remove(earth), Some("Earth"));
    assert!(!arena.contains(earth));
    assert_eq!(arena.remove(earth), None);
    assert!(arena.is_empty());
}

#[test]
fn test_slot_reuse_bumps_generation() {
    let mut arena: Arena<BodyId, &str> = Arena::new();
    let earth = arena.insert("Earth");
    arena.remove(earth);

    let mars = arena.insert("Mars");
    assert_ne!(earth, mars);
    assert_eq!(mars.key().generation(), earth.key().generation() + 1);
    assert_eq!(arena.get(earth), None);
    assert_eq!(arena.get(mars), Some(&"Mars"));
}

#[test]
fn test_insert_with_sees_own_id() {
    let mut arena: Arena<BodyId, BodyId> = Arena::new();
    let id = arena.insert_with(|id| id);

    assert_eq!(arena.get(id), Some(&id));
}

#[test]
fn test_iter_skips_removed_entries() {
    let mut arena: Arena<BodyId, u32> = Arena::new();
    let ids: Vec<BodyId> = (0..4).map(|n| arena.insert(n)).collect();
    arena.remove(ids[1]);

    let live: Vec<(BodyId, u32)> = arena.iter().map(|(id, &value)| (id, value)).collect();
    assert_eq!(live, vec![(ids[0], 0), (ids[2], 2), (ids[3], 3)]);
}

#[test]
fn test_get_mut() {
    let mut arena: Arena<BodyId, f64> = Arena::new();
    let id = arena.insert(1.0);
    if let Some(value) = arena.get_mut(id) {
        *value = 2.0;
    }

    assert_eq!(arena.get(id), Some(&2.0));
}
