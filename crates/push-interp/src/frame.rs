//! Frame isolation: a stack of snapshot-sets of the five non-exec stacks.
//!
//! When frames are enabled, each subtree execution gets a fresh set of stacks
//! while a single "argument" and "return" value of each type is threaded
//! across the boundary: pushing a frame hands the top of each caller stack to
//! the new frame, and popping hands the subtree's top values back.

use crate::stack::Stack;
use push_types::Atom;

/// One complete set of the five non-exec stacks.
#[derive(Debug, Default)]
pub struct Frame {
    pub int: Stack<i64>,
    pub float: Stack<f64>,
    pub boolean: Stack<bool>,
    pub code: Stack<Atom>,
    pub name: Stack<String>,
}

/// Arena of frames; the last element is always the current frame.
///
/// The bottom frame is never popped, so stack accessors always have a frame
/// to resolve against. With frames disabled (the default) the manager is
/// inert and the single bottom frame is shared throughout execution.
#[derive(Debug)]
pub struct FrameStack {
    frames: Vec<Frame>,
    enabled: bool,
}

impl FrameStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            enabled: false,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Number of live frames. Always at least one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The current (top) frame.
    pub fn current(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Frame {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    /// Enter a fresh frame. No-op unless enabled.
    ///
    /// The top of each caller stack is re-pushed into the new frame: the
    /// value stacks always (defaulted if empty), the object stacks only if
    /// they were non-empty.
    pub fn push_frame(&mut self) {
        if !self.enabled {
            return;
        }
        let current = self.current();
        let int_top = current.int.top_or_default();
        let float_top = current.float.top_or_default();
        let bool_top = current.boolean.top_or_default();
        let code_top = current.code.top().cloned();
        let name_top = current.name.top().cloned();

        self.frames.push(Frame::default());

        let frame = self.current_mut();
        frame.int.push(int_top);
        frame.float.push(float_top);
        frame.boolean.push(bool_top);
        if let Some(code) = code_top {
            frame.code.push(code);
        }
        if let Some(name) = name_top {
            frame.name.push(name);
        }
    }

    /// Discard the current frame, handing its top values back to the caller's
    /// stacks under the same default/non-default rule as [`Self::push_frame`].
    /// No-op unless enabled; the bottom frame is never popped.
    pub fn pop_frame(&mut self) {
        if !self.enabled || self.frames.len() < 2 {
            return;
        }
        let Some(discarded) = self.frames.pop() else {
            return;
        };
        let int_top = discarded.int.top_or_default();
        let float_top = discarded.float.top_or_default();
        let bool_top = discarded.boolean.top_or_default();
        let code_top = discarded.code.top().cloned();
        let name_top = discarded.name.top().cloned();

        let frame = self.current_mut();
        frame.int.push(int_top);
        frame.float.push(float_top);
        frame.boolean.push(bool_top);
        if let Some(code) = code_top {
            frame.code.push(code);
        }
        if let Some(name) = name_top {
            frame.name.push(name);
        }
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}
