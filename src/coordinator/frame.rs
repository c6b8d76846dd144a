//! Pending-value accumulator for animation-frame batching.
//!
//! Pointer-move events arrive far more often than frames are drawn. Each
//! event folds its value into a single pending slot; only the first event
//! after a flush asks the host for a frame, and the frame callback drains the
//! slot in one go. However many events arrive between frames, the tree is
//! mutated at most once per frame.

/// Single-slot accumulator with a "frame already requested" flag
#[derive(Debug, Clone)]
pub struct FrameBatcher<T> {
    pending: Option<T>,
    scheduled: bool,
}

impl<T> FrameBatcher<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            scheduled: false,
        }
    }

    /// Fold `value` into the pending slot with `fold(previous, value)`
    ///
    /// Returns `true` when the caller must request an animation frame.
    pub fn push(&mut self, value: T, fold: impl FnOnce(T, T) -> T) -> bool {
        self.pending = Some(match self.pending.take() {
            Some(previous) => fold(previous, value),
            None => value,
        });
        let request = !self.scheduled;
        self.scheduled = true;
        request
    }

    /// Drain the pending value at a frame boundary
    pub fn take(&mut self) -> Option<T> {
        self.scheduled = false;
        self.pending.take()
    }

    /// Discard anything pending
    pub fn clear(&mut self) {
        self.pending = None;
        self.scheduled = false;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

impl<T> Default for FrameBatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}
