//! Generational slot storage addressed by typed ids.
//!
//! Stars, bodies and phases all live in arenas and refer to one another by
//! id rather than by pointer. Removing an entry bumps its slot's generation,
//! so stale ids held elsewhere resolve to nothing instead of to whatever
//! reuses the slot.

use std::fmt;
use std::marker::PhantomData;

/// Raw slot address: index plus the generation the slot had when the id was
/// handed out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    fn new(index: usize, generation: u32) -> Self {
        debug_assert!(index < u32::MAX as usize, "SlotKey overflow");
        SlotKey {
            index: index as u32,
            generation,
        }
    }

    fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// A typed wrapper around a [`SlotKey`]
pub trait ArenaId: Copy {
    fn from_key(key: SlotKey) -> Self;
    fn key(self) -> SlotKey;
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with free-list reuse.
#[derive(Clone)]
pub struct Arena<I, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _id: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _id: PhantomData,
        }
    }

    pub fn insert(&mut self, value: T) -> I {
        self.insert_with(|_| value)
    }

    /// Inserts a value that needs to know its own id
    pub fn insert_with(&mut self, make: impl FnOnce(I) -> T) -> I {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let id = I::from_key(SlotKey::new(index as usize, slot.generation));
                slot.value = Some(make(id));
                id
            }
            None => {
                let id = I::from_key(SlotKey::new(self.slots.len(), 0));
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(make(id)),
                });
                id
            }
        }
    }

    pub fn get(&self, id: I) -> Option<&T> {
        let key = id.key();
        self.slots
            .get(key.index())
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        let key = id.key();
        self.slots
            .get_mut(key.index())
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: I) -> Option<T> {
        let key = id.key();
        let slot = self.slots.get_mut(key.index())?;
        if slot.generation != key.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (I::from_key(SlotKey::new(index, slot.generation)), value))
        })
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T: fmt::Debug> fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().filter_map(|slot| slot.value.as_ref()))
            .finish()
    }
}
