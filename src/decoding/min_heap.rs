use alloc::vec::Vec;

/// Anything that can be ordered by a weight in the [`MinHeap`].
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// Array backed binary min-heap, ordered only by [`Weighted::weight`].
///
/// Elements with equal weight are never reordered against each other on purpose:
/// a parent stays above a child of equal weight, and when sifting down the left
/// child is taken unless the right one is strictly lighter. Huffman trees built on
/// top of this heap therefore only depend on the insertion order.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Weighted> MinHeap<T> {
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
        let mut child = self.elements.len() - 1;

        while child > 0 {
            let parent = (child - 1) / 2;
            if self.elements[parent].weight() <= self.elements[child].weight() {
                return;
            }
            self.elements.swap(parent, child);
            child = parent;
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        // moves the last element into the root slot
        let min = self.elements.swap_remove(0);

        let len = self.elements.len();
        let mut parent = 0;
        let mut child = 1;
        while child < len {
            if child + 1 < len
                && self.elements[child + 1].weight() < self.elements[child].weight()
            {
                child += 1;
            }
            if self.elements[parent].weight() <= self.elements[child].weight() {
                break;
            }
            self.elements.swap(parent, child);
            parent = child;
            child = 2 * child + 1;
        }

        Some(min)
    }

    /// Checks that no parent is heavier than one of its children.
    pub fn is_valid(&self) -> bool {
        (1..self.elements.len())
            .all(|i| self.elements[(i - 1) / 2].weight() <= self.elements[i].weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Item {
        weight: u64,
        id: u32,
    }

    impl Weighted for Item {
        fn weight(&self) -> u64 {
            self.weight
        }
    }

    impl Weighted for u64 {
        fn weight(&self) -> u64 {
            *self
        }
    }

    fn drain<T: Weighted>(heap: &mut MinHeap<T>) -> Vec<T> {
        let mut out = vec![];
        while let Some(x) = heap.pop() {
            out.push(x);
        }
        out
    }

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = MinHeap::new();
        for x in [9u64, 3, 7, 1, 8, 2, 2, 6, 0, 5] {
            heap.push(x);
            assert!(heap.is_valid());
        }
        assert_eq!(heap.len(), 10);
        assert_eq!(heap.peek(), Some(&0));
        assert_eq!(drain(&mut heap), vec![0, 1, 2, 2, 3, 5, 6, 7, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn pop_on_empty() {
        let mut heap: MinHeap<u64> = MinHeap::default();
        assert_eq!(heap.pop(), None);
        heap.push(4);
        assert_eq!(heap.pop(), Some(4));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn parent_wins_ties_on_push() {
        let mut heap = MinHeap::new();
        heap.push(Item { weight: 1, id: 0 });
        heap.push(Item { weight: 1, id: 1 });
        heap.push(Item { weight: 1, id: 2 });
        assert_eq!(heap.pop().unwrap().id, 0);
    }

    #[test]
    fn left_child_wins_ties_on_pop() {
        // [a:1, b:2, c:2, d:3] -> pop moves d to the root, then the tie between
        // b (left) and c (right) must be resolved towards b
        let mut heap = MinHeap::new();
        heap.push(Item { weight: 1, id: 0 });
        heap.push(Item { weight: 2, id: 1 });
        heap.push(Item { weight: 2, id: 2 });
        heap.push(Item { weight: 3, id: 3 });

        assert_eq!(heap.pop().unwrap().id, 0);
        assert_eq!(heap.pop().unwrap().id, 1);
        assert_eq!(heap.pop().unwrap().id, 2);
        assert_eq!(heap.pop().unwrap().id, 3);
    }

    #[test]
    fn equal_weights_follow_heap_mechanics() {
        // Not FIFO: after the first pop the last element is moved to the root and
        // stays there, because the sift-down never swaps on equal weight.
        let mut heap = MinHeap::new();
        for id in 0..5 {
            heap.push(Item { weight: 7, id });
        }
        let ids: Vec<u32> = drain(&mut heap).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![0, 4, 3, 2, 1]);
    }

    #[test]
    fn same_pushes_same_order() {
        let input = [(4, 0), (1, 1), (4, 2), (1, 3), (2, 4), (4, 5), (2, 6)];
        let run = || {
            let mut heap = MinHeap::with_capacity(input.len());
            for (weight, id) in input {
                heap.push(Item { weight, id });
            }
            drain(&mut heap)
        };
        let first = run();
        assert_eq!(first, run());
        assert!(first.windows(2).all(|w| w[0].weight <= w[1].weight));
    }
}
