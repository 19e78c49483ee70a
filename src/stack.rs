use std::collections::VecDeque;

use super::error::PileError;

/// Double-ended ordered sequence, head at index 0 and tail at the end.
/// Tableau piles are stored in one of these with the bottom card at the head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence<T> {
    _items: Vec<T>,
}

/// Last-in-first-out pile. The top is the most recently pushed item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<T> {
    _items: Vec<T>,
}

/// First-in-first-out pile. The front is the oldest enqueued item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queue<T> {
    _items: VecDeque<T>,
}

impl<T: Clone> Sequence<T> {
    pub fn new() -> Sequence<T> {
        return Self { _items: Vec::new() };
    }

    pub fn is_empty(&self) -> bool {
        self._items.is_empty()
    }

    pub fn size(&self) -> usize {
        self._items.len()
    }

    pub fn insert_at_tail(&mut self, item: T) {
        self._items.push(item);
    }

    pub fn remove_tail(&mut self) -> Result<T, PileError> {
        self._items.pop().ok_or(PileError::EmptyContainer)
    }

    /// Removes the last `count` items and returns them head-to-tail, i.e. in
    /// the order they sat in the sequence.
    pub fn remove_tail_run(&mut self, count: usize) -> Result<Vec<T>, PileError> {
        if count > self._items.len() {
            return Err(PileError::IndexOutOfRange {
                index: count,
                size: self._items.len(),
            });
        }
        let split = self._items.len() - count;
        Ok(self._items.split_off(split))
    }

    pub fn get_last(&self) -> Result<&T, PileError> {
        self._items.last().ok_or(PileError::EmptyContainer)
    }

    pub fn get_last_mut(&mut self) -> Result<&mut T, PileError> {
        self._items.last_mut().ok_or(PileError::EmptyContainer)
    }

    pub fn get_node_at_index(&self, index: usize) -> Result<&T, PileError> {
        self._items.get(index).ok_or(PileError::IndexOutOfRange {
            index,
            size: self._items.len(),
        })
    }

    pub fn display(&self) -> &[T] {
        &self._items
    }

    pub fn clear(&mut self) {
        self._items.clear();
    }
}

impl<T: Clone> Stack<T> {
    pub fn new() -> Stack<T> {
        return Self { _items: Vec::new() };
    }

    pub fn is_empty(&self) -> bool {
        self._items.is_empty()
    }

    pub fn size(&self) -> usize {
        self._items.len()
    }

    pub fn push(&mut self, item: T) {
        self._items.push(item);
    }

    pub fn pop(&mut self) -> Result<T, PileError> {
        self._items.pop().ok_or(PileError::EmptyContainer)
    }

    /// `None` on an empty stack.
    pub fn peek(&self) -> Option<&T> {
        self._items.last()
    }

    /// Bottom to top.
    pub fn display(&self) -> &[T] {
        &self._items
    }

    pub fn clear(&mut self) {
        self._items.clear();
    }
}

impl<T: Clone> Queue<T> {
    pub fn new() -> Queue<T> {
        return Self {
            _items: VecDeque::new(),
        };
    }

    pub fn is_empty(&self) -> bool {
        self._items.is_empty()
    }

    pub fn size(&self) -> usize {
        self._items.len()
    }

    pub fn enqueue(&mut self, item: T) {
        self._items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Result<T, PileError> {
        self._items.pop_front().ok_or(PileError::EmptyContainer)
    }

    pub fn peek(&self) -> Result<&T, PileError> {
        self._items.front().ok_or(PileError::EmptyContainer)
    }

    /// Front to back.
    pub fn display(&self) -> Vec<T> {
        self._items.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self._items.clear();
    }
}

impl<T: Clone> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
