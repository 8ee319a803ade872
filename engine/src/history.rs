use serde::{Deserialize, Serialize};

/// A stack of visited values, oldest first, that never stores the same value twice in a row.
///
/// Non-adjacent repeats are kept: walking A -> B -> A records three entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<T> {
    entries: Vec<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialEq + Clone> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a history that already holds `initial`.
    pub fn seeded(initial: T) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    /// Appends `value` unless it equals the current tail. Returns whether it was stored.
    pub fn push(&mut self, value: T) -> bool {
        if self.entries.last() == Some(&value) {
            return false;
        }
        self.entries.push(value);
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// An independent copy of the entries, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
