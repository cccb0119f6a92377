use std::time::Duration;

/// Interval of the repeating hit animation while interact is held.
pub const HIT_ANIM_INTERVAL: f32 = 0.4;

/// Seconds between two breaks of a block with the given resistance.
///
/// A non-positive interval means no break timer is started.
pub fn break_interval(resistance: f32) -> Option<Duration> {
    let seconds = (resistance / 100.0) / 2.0;
    if seconds > 0.0 && seconds.is_finite() {
        Some(Duration::from_secs_f32(seconds))
    } else {
        None
    }
}

/// Tracks which block is under the crosshair and whether it is being broken.
#[derive(Debug, Clone)]
pub struct TargetTracker<T> {
    pub current: Option<T>,
    pub breaking: bool,
}

impl<T> Default for TargetTracker<T> {
    fn default() -> Self {
        Self {
            current: None,
            breaking: false,
        }
    }
}

impl<T: Copy + PartialEq> TargetTracker<T> {
    /// Feed this frame's ray cast result.
    ///
    /// Returns the previously tracked block when its crack state must be reset.
    pub fn update(&mut self, hit: Option<T>) -> Option<T> {
        let mut reset = None;

        if hit != self.current && self.current.is_some() {
            reset = self.current;
        }

        let Some(hit) = hit else {
            self.current = None;
            return reset;
        };

        if self.current.is_some() && !self.breaking {
            reset = self.current;
        }
        self.current = Some(hit);
        reset
    }

    /// Interact pressed. Returns the block to start breaking, if any.
    pub fn begin_hit(&mut self) -> Option<T> {
        let target = self.current?;
        self.breaking = true;
        Some(target)
    }

    pub fn end_hit(&mut self) {
        self.breaking = false;
    }

    /// Block a break timer tick should damage.
    pub fn break_target(&self) -> Option<T> {
        if self.breaking { self.current } else { None }
    }
}
