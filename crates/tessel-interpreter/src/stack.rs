//! The shared value stack.
//!
//! Every live local of every active call sits in one flat vector. The
//! innermost call owns the tail starting at `base`; a local's slot number is
//! an offset from there. A call pushes its arguments, [`CallStack::enter`]s
//! (moving `base` back over them and padding the rest of the frame with
//! nulls), and [`CallStack::leave`]s, which restores the caller's base and
//! drops the whole frame.

use crate::value::Value;

/// Saved caller state for one active call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a frame must be passed back to `CallStack::leave`"]
pub struct Frame {
    /// Caller's base
    saved_base: usize,

    /// First slot this call owns
    base: usize,
}

/// Flat stack of local slots plus the current frame base.
#[derive(Debug, Default)]
pub struct CallStack {
    slots: Vec<Option<Value>>,
    base: usize,
    depth: usize,
}

impl CallStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one evaluated argument.
    pub fn push(&mut self, value: Option<Value>) {
        self.slots.push(value);
    }

    /// Starts a frame over the last `args` pushed values, padded to
    /// `locals` slots.
    ///
    /// The caller guarantees `args <= locals` and that `args` values were
    /// pushed.
    pub fn enter(&mut self, args: usize, locals: usize) -> Frame {
        let saved_base = self.base;
        self.base = self.slots.len() - args;
        self.slots.resize(self.base + locals, None);
        self.depth += 1;
        tessel_log::trace!("enter frame: base {} locals {} depth {}", self.base, locals, self.depth);
        Frame {
            saved_base,
            base: self.base,
        }
    }

    /// Ends a frame, restoring the caller's base and dropping every local.
    pub fn leave(&mut self, frame: Frame) {
        self.base = frame.saved_base;
        self.slots.truncate(frame.base);
        self.depth -= 1;
        tessel_log::trace!("leave frame: base {} depth {}", self.base, self.depth);
    }

    /// Reads a local as a new owning reference.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<Value> {
        self.slots.get(self.base + slot).cloned().flatten()
    }

    /// Overwrites a local, dropping its previous value.
    pub fn set(&mut self, slot: usize, value: Option<Value>) {
        let idx = self.base + slot;
        if let Some(cell) = self.slots.get_mut(idx) {
            *cell = value;
        }
    }

    /// Drops every slot above `len`. Used to discard arguments of a call
    /// that failed before its frame was entered.
    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    /// Current frame base.
    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of active calls.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total live slots across all frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slots are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_binds_arguments_and_pads() {
        let mut stack = CallStack::new();
        stack.push(Some(Value::Int(10)));
        stack.push(Some(Value::Int(20)));

        let frame = stack.enter(2, 4);
        assert_eq!(stack.base(), 0);
        assert_eq!(stack.len(), 4);
        assert!(matches!(stack.get(0), Some(Value::Int(10))));
        assert!(matches!(stack.get(1), Some(Value::Int(20))));
        assert!(stack.get(2).is_none());
        assert!(stack.get(3).is_none());

        stack.leave(frame);
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_nested_frames_restore_base() {
        let mut stack = CallStack::new();
        let outer = stack.enter(0, 2);
        stack.set(0, Some(Value::Int(1)));
        stack.set(1, Some(Value::str("outer")));

        stack.push(Some(Value::Int(99)));
        let inner = stack.enter(1, 1);
        assert_eq!(stack.base(), 2);
        assert!(matches!(stack.get(0), Some(Value::Int(99))));
        stack.set(0, Some(Value::Int(7)));
        stack.leave(inner);

        assert_eq!(stack.base(), 0);
        assert_eq!(stack.len(), 2);
        assert!(matches!(stack.get(0), Some(Value::Int(1))));
        assert_eq!(stack.get(1).unwrap().to_string(), "\"outer\"");

        stack.leave(outer);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_get_shares_and_leave_releases() {
        let list = Value::list(vec![]);
        let mut stack = CallStack::new();
        let frame = stack.enter(0, 1);

        stack.set(0, Some(list.clone()));
        assert_eq!(list.ref_count(), 2);

        let read = stack.get(0);
        assert_eq!(list.ref_count(), 3);
        drop(read);

        stack.leave(frame);
        assert_eq!(list.ref_count(), 1);
    }

    #[test]
    fn test_truncate_discards_pending_arguments() {
        let list = Value::list(vec![]);
        let mut stack = CallStack::new();
        let frame = stack.enter(0, 1);

        let mark = stack.len();
        stack.push(Some(list.clone()));
        stack.push(Some(Value::Int(1)));
        stack.truncate(mark);
        assert_eq!(stack.len(), 1);
        assert_eq!(list.ref_count(), 1);

        stack.leave(frame);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_set_drops_previous_value() {
        let list = Value::list(vec![]);
        let mut stack = CallStack::new();
        let frame = stack.enter(0, 1);

        stack.set(0, Some(list.clone()));
        stack.set(0, Some(Value::Int(0)));
        assert_eq!(list.ref_count(), 1);

        stack.leave(frame);
    }
}
