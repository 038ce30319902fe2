//! Animation toolkit: easing, eased values, keyframe tracks, and
//! redirectable property transitions.
//!
//! Everything here is driven by an explicit `update(dt)` clock so the
//! host event loop stays in control; nothing spawns threads or timers.

use crate::geometry::{Point, Rect};
use crate::Color;

// =============================================================================
// Easing
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

// =============================================================================
// EasedValue
// =============================================================================

/// An easing-based animated scalar.
#[derive(Debug, Clone)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl EasedValue {
    /// Create new eased animation.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        let eased = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Update animation.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

// =============================================================================
// Interpolate
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values at normalized time `t`.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

impl Interpolate for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f32::interpolate(&from.x, &to.x, t),
            y: f32::interpolate(&from.y, &to.y, t),
        }
    }
}

impl Interpolate for Rect {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f32::interpolate(&from.x, &to.x, t),
            y: f32::interpolate(&from.y, &to.y, t),
            width: f32::interpolate(&from.width, &to.width, t),
            height: f32::interpolate(&from.height, &to.height, t),
        }
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(to, t as f32)
    }
}

// =============================================================================
// Keyframes
// =============================================================================

/// A keyframe in an animation.
#[derive(Debug, Clone)]
pub struct Keyframe<T: Clone> {
    /// Time of this keyframe (0.0 to 1.0 normalized)
    pub time: f64,
    /// Value at this keyframe
    pub value: T,
}

impl<T: Clone> Keyframe<T> {
    /// Create new keyframe.
    #[must_use]
    pub fn new(time: f64, value: T) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            value,
        }
    }
}

/// Keyframe animation track with linear interpolation between frames.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Clone + Interpolate> {
    keyframes: Vec<Keyframe<T>>,
    /// Total duration in seconds
    pub duration: f64,
    /// Current elapsed time
    pub elapsed: f64,
}

impl<T: Clone + Interpolate> KeyframeTrack<T> {
    /// Create new keyframe track.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            keyframes: Vec::new(),
            duration,
            elapsed: 0.0,
        }
    }

    /// Create a track from equally spaced values.
    #[must_use]
    pub fn from_values(values: &[T], duration: f64) -> Self {
        let mut track = Self::new(duration);
        let last = values.len().saturating_sub(1).max(1) as f64;
        for (i, value) in values.iter().enumerate() {
            track.add_keyframe(Keyframe::new(i as f64 / last, value.clone()));
        }
        track
    }

    /// Add a keyframe, keeping the track sorted by time.
    pub fn add_keyframe(&mut self, keyframe: Keyframe<T>) {
        self.keyframes.push(keyframe);
        self.keyframes
            .sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Get value at current time.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        if self.keyframes.is_empty() {
            return None;
        }

        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let mut prev = &self.keyframes[0];
        for next in &self.keyframes {
            if next.time >= t {
                let segment = next.time - prev.time;
                let segment_t = if segment > 0.0 {
                    (t - prev.time) / segment
                } else {
                    1.0
                };
                return Some(T::interpolate(&prev.value, &next.value, segment_t));
            }
            prev = next;
        }
        Some(prev.value.clone())
    }

    /// Update animation.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Reset to start.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

// =============================================================================
// Transition
// =============================================================================

/// A cancellable in-flight transition between two values of an
/// interpolatable type.
///
/// Redirecting a transition while it is running samples the current
/// interpolated value as the new start point; transitions never queue.
#[derive(Debug, Clone)]
pub struct Transition<T: Clone + Interpolate> {
    from: T,
    to: T,
    progress: EasedValue,
}

impl<T: Clone + Interpolate + Default> Default for Transition<T> {
    fn default() -> Self {
        Self::settled(T::default())
    }
}

impl<T: Clone + Interpolate> Transition<T> {
    /// Create a settled transition holding `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            progress: EasedValue::new(0.0, 1.0, 0.0),
        }
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> T {
        T::interpolate(&self.from, &self.to, self.progress.value())
    }

    /// Final value this transition is heading toward.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }

    /// Begin animating toward `target`, starting from the current
    /// interpolated value (interrupt-and-redirect).
    pub fn animate_to(&mut self, target: T, duration: f64, easing: Easing) {
        self.from = self.value();
        self.to = target;
        self.progress = EasedValue::new(0.0, 1.0, duration).with_easing(easing);
    }

    /// Jump to `target` with no animation.
    pub fn snap_to(&mut self, target: T) {
        self.from = target.clone();
        self.to = target;
        self.progress = EasedValue::new(0.0, 1.0, 0.0);
    }

    /// Mutate both endpoints in place without animating.
    ///
    /// An in-flight transition keeps its timing, and the sampled value
    /// reflects the edit at every point along the way.
    pub fn override_with(&mut self, f: impl Fn(&mut T)) {
        f(&mut self.from);
        f(&mut self.to);
    }

    /// Advance the transition clock.
    pub fn update(&mut self, dt: f64) {
        self.progress.update(dt);
    }

    /// Whether the transition has reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }
}
