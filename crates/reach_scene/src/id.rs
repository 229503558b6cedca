//! Object handles
//!
//! Handles carry a generation so that a handle kept after its object was
//! destroyed never resolves to whatever reuses the slot.

use std::fmt;

/// Handle to an object in a [`crate::Scene`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Slot storage with a free list
#[derive(Debug, Clone)]
pub(crate) struct Slots<T> {
    entries: Vec<Slot<T>>,
    free_list: Vec<u32>,
    alive: usize,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            alive: 0,
        }
    }
}

impl<T> Slots<T> {
    pub fn insert(&mut self, value: T) -> ObjectId {
        self.alive += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.entries[index as usize];
            slot.value = Some(value);
            ObjectId::new(index, slot.generation)
        } else {
            let index = self.entries.len() as u32;
            self.entries.push(Slot {
                generation: 0,
                value: Some(value),
            });
            ObjectId::new(index, 0)
        }
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        let slot = self.entries.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.alive -= 1;
        Some(value)
    }

    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.entries
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.entries
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.alive
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.entries.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (ObjectId::new(index as u32, slot.generation), value))
        })
    }
}
