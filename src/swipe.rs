//! Horizontal swipe recognition and column stepping.
//!
//! `SwipeTracker` turns a press/drag/release sequence into at most one
//! `SwipeDirection`. A drag must first travel past the activation distance to
//! count as a swipe at all, and the release must land beyond the threshold.
//! Column stepping never wraps: swiping left from `done` or right from `todo`
//! yields nothing.

use crate::fields::{ColumnId, SwipeDirection};

/// Displacement a release must exceed to count as a swipe.
pub const SWIPE_THRESHOLD_PX: i32 = 60;
/// Displacement a drag must exceed before it is treated as a swipe.
pub const SWIPE_ACTIVATION_PX: i32 = 20;

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: i32,
    start_x: Option<i32>,
    active: bool,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: i32) -> Self {
        SwipeTracker {
            threshold,
            start_x: None,
            active: false,
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn press(&mut self, x: i32) {
        self.start_x = Some(x);
        self.active = false;
    }

    pub fn drag(&mut self, x: i32) {
        if let Some(start) = self.start_x {
            if (start - x).abs() > SWIPE_ACTIVATION_PX {
                self.active = true;
            }
        }
    }

    /// Finish the gesture. Resets the tracker in every case.
    pub fn release(&mut self, x: i32) -> Option<SwipeDirection> {
        let start = self.start_x.take();
        let active = std::mem::take(&mut self.active);
        let start = start.filter(|_| active)?;

        let delta = start - x;
        if delta.abs() > self.threshold {
            Some(if delta > 0 { SwipeDirection::Left } else { SwipeDirection::Right })
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
        self.active = false;
    }

    /// Whether a drag is in progress past the activation distance.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }
}

/// Column reached by swiping from `current`. Left advances, right goes back.
pub fn swipe_target(current: ColumnId, direction: SwipeDirection) -> Option<ColumnId> {
    match direction {
        SwipeDirection::Left => current.next(),
        SwipeDirection::Right => current.prev(),
    }
}

/// Tracks which column is shown when only one fits on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnNavigator {
    active: ColumnId,
}

impl ColumnNavigator {
    pub fn active(&self) -> ColumnId {
        self.active
    }

    pub fn select(&mut self, column: ColumnId) {
        self.active = column;
    }

    /// Step to the adjacent column. Returns `false` at either end.
    pub fn step(&mut self, direction: SwipeDirection) -> bool {
        match swipe_target(self.active, direction) {
            Some(column) => {
                self.active = column;
                true
            }
            None => false,
        }
    }

    /// Previous-column button. Same non-wrapping policy as swiping.
    pub fn prev(&mut self) -> bool {
        self.step(SwipeDirection::Right)
    }

    /// Next-column button.
    pub fn next(&mut self) -> bool {
        self.step(SwipeDirection::Left)
    }
}
