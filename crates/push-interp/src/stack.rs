//! Generic LIFO stack with the Push language's lenient underflow contract.
//!
//! Underflow is never an error: manipulations on a too-shallow stack are
//! no-ops, and the value stacks hand back a type default on an empty pop.
//! The object stacks express "absent" through the bare [`Option`] instead.

use std::fmt;

/// LIFO container backing each of the six runtime stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T: Clone> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `value` as the new top.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Remove and return the top, or `None` on an empty stack.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The top element without removing it.
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    /// Current element count.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a copy of the top. No-op if empty.
    pub fn dup(&mut self) {
        if let Some(top) = self.items.last().cloned() {
            self.items.push(top);
        }
    }

    /// Exchange the top two elements. No-op with fewer than two.
    pub fn swap(&mut self) {
        let n = self.items.len();
        if n >= 2 {
            self.items.swap(n - 1, n - 2);
        }
    }

    /// Rotate the top three elements so the third-from-top becomes the top.
    /// No-op with fewer than three.
    pub fn rot(&mut self) {
        let n = self.items.len();
        if n >= 3 {
            let third = self.items.remove(n - 3);
            self.items.push(third);
        }
    }

    /// Clear all elements.
    pub fn flush(&mut self) {
        self.items.clear();
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone + Default> Stack<T> {
    /// Pop, with the type default standing in for an empty stack.
    pub fn pop_or_default(&mut self) -> T {
        self.items.pop().unwrap_or_default()
    }

    /// Top, with the type default standing in for an empty stack.
    pub fn top_or_default(&self) -> T {
        self.items.last().cloned().unwrap_or_default()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: fmt::Display> fmt::Display for Stack<T> {
    /// Bottom-to-top, space separated. Debug aid, not a machine format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
