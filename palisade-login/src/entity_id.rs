//! Process-wide monotonic entity-id allocator.

use std::sync::atomic::{AtomicI32, Ordering};

/// A lock-free, process-wide counter handing out distinct 32-bit entity ids.
///
/// Starts at -1 internally so the first allocation yields 0.
pub struct EntityIdAllocator {
    next: AtomicI32,
}

impl EntityIdAllocator {
    /// Creates an allocator whose first `allocate()` call returns 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicI32::new(-1),
        }
    }

    /// Atomically allocates the next entity id.
    pub fn allocate(&self) -> i32 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn first_allocation_is_zero() {
        let alloc = EntityIdAllocator::new();
        assert_eq!(alloc.allocate(), 0);
        assert_eq!(alloc.allocate(), 1);
    }

    #[test]
    fn concurrent_allocations_are_unique() {
        let alloc = Arc::new(EntityIdAllocator::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let alloc = Arc::clone(&alloc);
            handles.push(thread::spawn(move || {
                (0..100).map(|_| alloc.allocate()).collect::<Vec<_>>()
            }));
        }

        let mut all_ids: Vec<i32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all_ids.sort_unstable();

        let expected: Vec<i32> = (0..800).collect();
        assert_eq!(all_ids, expected);
    }
}
