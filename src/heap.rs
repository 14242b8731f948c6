//! Array-backed binary min-heap whose ordering key is read through a fixed accessor.
//!
//! The accessor receives a context alongside each item, so a heap of indices can order them by
//! values living in some other table. Keys are read at comparison time and never cached, which
//! means the heap always sees the current value behind an index.
use crate::error::HeapError;

/// Binary min-heap over items of type `T`, keyed by `key(context, item)`.
///
/// Children of slot `i` live at `2i + 1` and `2i + 2`. Equal keys are not ordered further, so
/// the heap is not stable.
pub struct MinHeap<T, C: ?Sized, K> {
    heap: Vec<T>,
    key: fn(&C, &T) -> K,
}

impl<T, C: ?Sized, K> std::fmt::Debug for MinHeap<T, C, K>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinHeap").field("heap", &self.heap).finish()
    }
}

impl<T: Clone, C: ?Sized, K> Clone for MinHeap<T, C, K> {
    fn clone(&self) -> Self {
        MinHeap {
            heap: self.heap.clone(),
            key: self.key,
        }
    }
}

#[inline]
fn parent_ix(index: usize) -> usize {
    index.saturating_sub(1) >> 1
}

impl<T, C: ?Sized, K: PartialOrd> MinHeap<T, C, K> {
    pub fn new(key: fn(&C, &T) -> K) -> MinHeap<T, C, K> {
        MinHeap {
            heap: Vec::new(),
            key,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every item. The backing allocation is kept for the next round of inserts.
    pub fn reset(&mut self) {
        self.heap.clear();
    }

    /// Items in heap order, root first.
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    pub fn insert(&mut self, ctx: &C, item: T) {
        self.heap.push(item);
        self.sift_up(ctx, self.heap.len() - 1);
    }

    pub fn peek_min(&self) -> Result<&T, HeapError> {
        self.heap.first().ok_or(HeapError::EmptyQueue)
    }

    pub fn extract_min(&mut self, ctx: &C) -> Result<T, HeapError> {
        if self.heap.is_empty() {
            return Err(HeapError::EmptyQueue);
        }
        self.remove_at(ctx, 0)
    }

    /// Removes the item in slot `index`. The last item takes its place and is then moved in
    /// exactly one direction: down when it sits at the root or is keyed above its new parent,
    /// up otherwise.
    pub fn remove_at(&mut self, ctx: &C, index: usize) -> Result<T, HeapError> {
        let len = self.heap.len();
        if index >= len {
            return Err(HeapError::IndexOutOfRange { index, len });
        }
        let removed = self.heap.swap_remove(index);
        if index < self.heap.len() {
            if index == 0 || self.key_at(ctx, index) > self.key_at(ctx, parent_ix(index)) {
                self.sift_down(ctx, index);
            } else {
                self.sift_up(ctx, index);
            }
        }
        Ok(removed)
    }

    fn key_at(&self, ctx: &C, index: usize) -> K {
        (self.key)(ctx, &self.heap[index])
    }

    fn sift_up(&mut self, ctx: &C, mut index: usize) {
        while index > 0 {
            let parent = parent_ix(index);
            if self.key_at(ctx, index) < self.key_at(ctx, parent) {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, ctx: &C, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = (index << 1) + 1;
            let right = left + 1;
            let mut min = index;
            if left < len && self.key_at(ctx, left) < self.key_at(ctx, min) {
                min = left;
            }
            if right < len && self.key_at(ctx, right) < self.key_at(ctx, min) {
                min = right;
            }
            if min == index {
                break;
            }
            self.heap.swap(min, index);
            index = min;
        }
    }
}
