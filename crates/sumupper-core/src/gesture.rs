//! Horizontal swipe recognition for week paging.
//!
//! A swipe is a press, any number of moves, and a release. Only the horizontal
//! distance between press and release matters. A gesture that begins on an
//! interactive control (a button) is ignored entirely so that taps on
//! controls are never mistaken for swipes.

use crate::week::PageMove;

/// Minimum horizontal travel, in input units, for a swipe to page.
pub const SWIPE_THRESHOLD: f64 = 75.0;

/// Where a gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
  /// Background content: gestures are tracked.
  Surface,
  /// A button or other interactive control: gestures are ignored.
  Control,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
  start_x: f64,
  last_x:  f64,
}

/// Tracks one gesture at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
  threshold: f64,
  active:    Option<Track>,
}

impl Default for SwipeTracker {
  fn default() -> Self { Self::new(SWIPE_THRESHOLD) }
}

impl SwipeTracker {
  pub fn new(threshold: f64) -> Self { Self { threshold, active: None } }

  /// Begin a gesture at `x`. Replaces any unfinished gesture.
  pub fn press(&mut self, x: f64, target: Target) {
    self.active = match target {
      Target::Surface => Some(Track { start_x: x, last_x: x }),
      Target::Control => None,
    };
  }

  /// Record movement. No-op when no gesture is being tracked.
  pub fn drag(&mut self, x: f64) {
    if let Some(track) = self.active.as_mut() {
      track.last_x = x;
    }
  }

  /// End the gesture, returning the page transition it triggers, if any.
  ///
  /// Leftward travel beyond the threshold pages forward; rightward travel
  /// pages back. The tracker is reset either way.
  pub fn release(&mut self, x: f64) -> Option<PageMove> {
    let mut track = self.active.take()?;
    track.last_x = x;
    let delta = track.start_x - track.last_x;
    if delta > self.threshold {
      Some(PageMove::Next)
    } else if delta < -self.threshold {
      Some(PageMove::Prev)
    } else {
      None
    }
  }

  /// Abandon the current gesture without a transition.
  pub fn cancel(&mut self) { self.active = None; }

  pub fn is_tracking(&self) -> bool { self.active.is_some() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leftward_swipe_pages_forward_once() {
    let mut t = SwipeTracker::default();
    t.press(300.0, Target::Surface);
    t.drag(250.0);
    assert_eq!(t.release(200.0), Some(PageMove::Next));
    // Released: a second release does nothing.
    assert_eq!(t.release(100.0), None);
  }

  #[test]
  fn rightward_swipe_pages_back() {
    let mut t = SwipeTracker::default();
    t.press(100.0, Target::Surface);
    assert_eq!(t.release(200.0), Some(PageMove::Prev));
  }

  #[test]
  fn short_swipe_is_a_no_op() {
    let mut t = SwipeTracker::default();
    t.press(300.0, Target::Surface);
    t.drag(260.0);
    assert_eq!(t.release(250.0), None);
    assert!(!t.is_tracking());
  }

  #[test]
  fn exact_threshold_does_not_page() {
    let mut t = SwipeTracker::default();
    t.press(175.0, Target::Surface);
    assert_eq!(t.release(100.0), None);
  }

  #[test]
  fn gestures_starting_on_controls_are_ignored() {
    let mut t = SwipeTracker::default();
    t.press(300.0, Target::Control);
    t.drag(10.0);
    assert_eq!(t.release(0.0), None);
  }

  #[test]
  fn custom_threshold() {
    let mut t = SwipeTracker::new(3.0);
    t.press(10.0, Target::Surface);
    assert_eq!(t.release(6.0), Some(PageMove::Next));
  }
}
