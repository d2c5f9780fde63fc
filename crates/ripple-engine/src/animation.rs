//! Time-based radius interpolation.
//!
//! An [`AnimationRun`] never schedules itself. The host advances it from its
//! frame clock with [`AnimationRun::tick`], which keeps the engine
//! deterministic: tests feed synthetic timestamps instead of sleeping.

use std::time::Duration;

/// Easing curve applied to normalized progress `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, slow end: `1 - (1 - t)^(2 * factor)`.
    Decelerate(f64),
}

impl Easing {
    pub const DEFAULT_FACTOR: f64 = 3.0;

    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate(factor) => {
                // factor below 0.5 would accelerate instead
                let exponent = 2.0 * factor.max(0.5);
                1.0 - (1.0 - t).powf(exponent)
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Decelerate(Self::DEFAULT_FACTOR)
    }
}

/// Result of advancing a run by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub finished: bool,
}

/// One expand or shrink of the ripple radius.
///
/// The clock is anchored on the first tick, so the first frame after a toggle
/// always reports `from`.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    started_at: Option<Duration>,
    elapsed: Duration,
    value: f64,
    finished: bool,
}

impl AnimationRun {
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            started_at: None,
            elapsed: Duration::ZERO,
            value: from,
            finished: false,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Radius reached so far. Not snapped by [`cancel`](Self::cancel).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        !self.finished
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.started_at.is_some() { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Advances the run to the frame timestamp `now`.
    ///
    /// Timestamps earlier than the anchor count as zero elapsed time; a stalled
    /// clock simply holds the current value.
    pub fn tick(&mut self, now: Duration) -> Tick {
        if self.finished {
            return self.snapshot();
        }

        let started_at = *self.started_at.get_or_insert(now);
        self.elapsed = now.saturating_sub(started_at).min(self.duration);

        let t = self.progress();
        self.value = self.from + (self.to - self.from) * self.easing.evaluate(t);
        if t >= 1.0 {
            self.value = self.to;
            self.finished = true;
        }
        self.snapshot()
    }

    /// Moves the end value of a run in flight. Elapsed time is kept, so the
    /// curve continues from the same progress toward the new end.
    pub fn retarget(&mut self, to: f64) {
        if !self.finished {
            self.to = to;
        }
    }

    /// Stops the run where it is and returns the radius it reached.
    pub fn cancel(&mut self) -> f64 {
        self.finished = true;
        self.value
    }

    fn snapshot(&self) -> Tick {
        Tick {
            value: self.value,
            finished: self.finished,
        }
    }
}
