// Drag gesture state machine, one session per press-move-release

/// Container rect sampled once when a session starts. Deliberately not
/// re-sampled per move, so it is stale if the container moves mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Strict containment. NaN coordinates count as outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }
}

/// Outcome of feeding one pointer position into a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Pointer still inside bounds: apply this offset for live feedback.
    Track { x: f64, y: f64 },
    /// Pointer left the bounds: commit this last in-bounds offset and
    /// detach the session's move listeners. The gesture ends early.
    Abort { x: f64, y: f64 },
    /// Session already over; the event carries no meaning.
    Ignored,
}

/// Ephemeral state between a press and its matching release. Holds the
/// pointer start position, the offset snapshot taken at press time, and
/// the last offset computed from an in-bounds move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    start_x: f64,
    start_y: f64,
    base_x: f64,
    base_y: f64,
    last_x: f64,
    last_y: f64,
    bounds: Bounds,
    done: bool,
}

impl DragSession {
    pub fn begin(start_x: f64, start_y: f64, base_x: f64, base_y: f64, bounds: Bounds) -> Self {
        Self {
            start_x,
            start_y,
            base_x,
            base_y,
            last_x: base_x,
            last_y: base_y,
            bounds,
            done: false,
        }
    }

    /// Feeds a pointer position into the session. Once the pointer leaves
    /// the sampled bounds the session is over for good: later moves are
    /// ignored even if the pointer re-enters before release.
    pub fn on_move(&mut self, x: f64, y: f64) -> DragUpdate {
        if self.done {
            return DragUpdate::Ignored;
        }
        if !self.bounds.contains(x, y) {
            self.done = true;
            return DragUpdate::Abort {
                x: self.last_x,
                y: self.last_y,
            };
        }
        let candidate_x = self.base_x + (x - self.start_x);
        let candidate_y = self.base_y + (y - self.start_y);
        // Degenerate arithmetic keeps the previous offset: no movement
        // rather than NaN propagation.
        if candidate_x.is_finite() && candidate_y.is_finite() {
            self.last_x = candidate_x;
            self.last_y = candidate_y;
        }
        DragUpdate::Track {
            x: self.last_x,
            y: self.last_y,
        }
    }

    /// Ends the session on release, returning the offset to commit. Equals
    /// the base offset when no move was ever processed.
    pub fn finish(&mut self) -> (f64, f64) {
        self.done = true;
        (self.last_x, self.last_y)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            left: 0.0,
            right: 400.0,
            top: 0.0,
            bottom: 300.0,
        }
    }

    #[test]
    fn drag_inside_bounds_tracks_relative_offset() {
        let mut s = DragSession::begin(50.0, 50.0, 10.0, 20.0, bounds());
        assert_eq!(s.on_move(80.0, 70.0), DragUpdate::Track { x: 40.0, y: 40.0 });
        assert_eq!(s.finish(), (40.0, 40.0));
    }

    #[test]
    fn press_then_release_keeps_base_offset() {
        let mut s = DragSession::begin(50.0, 50.0, 10.0, 20.0, bounds());
        assert_eq!(s.finish(), (10.0, 20.0));
    }

    #[test]
    fn leaving_bounds_commits_last_inbounds_offset() {
        let mut s = DragSession::begin(50.0, 50.0, 0.0, 0.0, bounds());
        assert_eq!(s.on_move(80.0, 70.0), DragUpdate::Track { x: 30.0, y: 20.0 });
        assert_eq!(s.on_move(500.0, 70.0), DragUpdate::Abort { x: 30.0, y: 20.0 });
        assert!(s.is_done());
        // Re-entering the bounds before release changes nothing.
        assert_eq!(s.on_move(80.0, 70.0), DragUpdate::Ignored);
        assert_eq!(s.finish(), (30.0, 20.0));
    }

    #[test]
    fn first_move_out_of_bounds_commits_base() {
        let mut s = DragSession::begin(50.0, 50.0, 10.0, 20.0, bounds());
        assert_eq!(s.on_move(1000.0, 1000.0), DragUpdate::Abort { x: 10.0, y: 20.0 });
    }

    #[test]
    fn bounds_edges_are_exclusive() {
        let b = bounds();
        assert!(b.contains(1.0, 1.0));
        assert!(!b.contains(0.0, 150.0));
        assert!(!b.contains(400.0, 150.0));
        assert!(!b.contains(200.0, 0.0));
        assert!(!b.contains(200.0, 300.0));
    }

    #[test]
    fn nan_pointer_aborts_with_finite_commit() {
        let mut s = DragSession::begin(50.0, 50.0, 0.0, 0.0, bounds());
        s.on_move(60.0, 60.0);
        assert_eq!(s.on_move(f64::NAN, 60.0), DragUpdate::Abort { x: 10.0, y: 10.0 });
    }

    #[test]
    fn non_finite_candidate_keeps_previous_offset() {
        // A session started from a non-finite pointer position cannot
        // produce finite candidates; the base offset must survive.
        let mut s = DragSession::begin(f64::INFINITY, 50.0, 10.0, 20.0, bounds());
        assert_eq!(s.on_move(80.0, 70.0), DragUpdate::Track { x: 10.0, y: 20.0 });
        let mut s = DragSession::begin(f64::NAN, f64::NAN, 10.0, 20.0, bounds());
        assert_eq!(s.on_move(80.0, 70.0), DragUpdate::Track { x: 10.0, y: 20.0 });
    }
}
