use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::Error;

struct Slot<T> {
    // Bumped every time the element is taken, so a stale `(Handle, generation)` pair never
    // matches a slot that has since been reused.
    generation: u32,
    element: Option<T>,
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes sure the next [`alloc`](Self::alloc) will neither grow past `Handle::MAX` nor fail
    /// to grow the slot vector, or reports why it could not.
    pub(crate) fn try_reserve_one(&mut self) -> Result<(), Error> {
        if !self.free.is_empty() {
            return Ok(());
        }
        if self.slots.len() > Handle::MAX {
            return Err(Error::CapacityExceeded);
        }
        self.slots.try_reserve(1)?;
        Ok(())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()].element = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns the generation of the slot behind `handle`.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> u32 {
        self.slots[handle.to_index()].generation
    }

    /// Returns `true` if `handle` is occupied by the same element it held at `generation`.
    pub(crate) fn is_live(&self, handle: Handle, generation: u32) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.generation == generation && slot.element.is_some())
    }

    /// Bumps the generation of a live slot, retiring every `(Handle, generation)` pair taken
    /// before the call while the element stays in place.
    pub(crate) fn renew(&mut self, handle: Handle) {
        let slot = &mut self.slots[handle.to_index()];
        assert!(slot.element.is_some(), "`Arena::renew()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
        assert!(arena.is_empty());
    }

    #[test]
    fn take_bumps_generation_and_reuses_slot() {
        let mut arena: Arena<u32> = Arena::new();
        let first = arena.alloc(1);
        let generation = arena.generation(first);
        assert!(arena.is_live(first, generation));

        assert_eq!(arena.take(first), 1);
        assert!(!arena.is_live(first, generation));

        // The slot comes back with a new generation.
        let second = arena.alloc(2);
        assert_eq!(second, first);
        assert_ne!(arena.generation(second), generation);
        assert!(!arena.is_live(first, generation));
        assert!(arena.is_live(second, arena.generation(second)));
    }

    #[test]
    fn reserve_one_is_noop_with_free_slots() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(7);
        arena.take(handle);
        let capacity = arena.capacity();
        arena.try_reserve_one().unwrap();
        assert_eq!(arena.capacity(), capacity);
    }

    #[test]
    fn reserve_one_fails_at_handle_capacity() {
        let mut arena: Arena<usize> = Arena::new();
        for value in 0..=Handle::MAX {
            arena.try_reserve_one().unwrap();
            arena.alloc(value);
        }
        assert_eq!(arena.len(), Handle::MAX + 1);
        assert_eq!(arena.try_reserve_one(), Err(Error::CapacityExceeded));
        assert_eq!(arena.len(), Handle::MAX + 1);

        // A freed slot makes room again.
        arena.take(Handle::from_index(7));
        assert_eq!(arena.try_reserve_one(), Ok(()));
        assert_eq!(arena.alloc(7), Handle::from_index(7));
    }

    #[test]
    fn renew_retires_old_generation() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(1);
        let generation = arena.generation(handle);
        arena.renew(handle);
        assert!(!arena.is_live(handle, generation));
        assert!(arena.is_live(handle, arena.generation(handle)));
        assert_eq!(*arena.get(handle), 1);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(1);
        arena.take(handle);
        let _ = arena.get(handle);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32, u32)> = Vec::new();
            let mut retired: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        arena.try_reserve_one().unwrap();
                        let handle = arena.alloc(value);
                        model.push((handle, arena.generation(handle), value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].2 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (handle, generation, value) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), value);
                        retired.push((handle, generation));
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                        retired.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, generation, value) in &model {
                    prop_assert!(arena.is_live(handle, generation));
                    prop_assert_eq!(*arena.get(handle), value);
                }
                for &(handle, generation) in &retired {
                    prop_assert!(!arena.is_live(handle, generation));
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            10 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
