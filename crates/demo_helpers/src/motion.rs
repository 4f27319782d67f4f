//! Scalar animation primitives.
//!
//! [`Tween`] is a delayed, critically damped approach to a target over a fixed duration,
//! the equivalent of a zero-bounce spring transition. [`SpringValue`] is a free
//! damped harmonic spring integrated frame by frame, for values that keep getting
//! pushed around (drag tilt).

use core::time::Duration;

// Progress of a critically damped spring after the whole duration is 1 - (1 + k) e^-k
const SETTLE_RATE: f32 = 10.0;

// Integration step cap, keeps stiff springs stable on slow frames
const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

fn critically_damped(t: f32) -> f32 {
    let s = SETTLE_RATE * t.max(0.0);
    1.0 - (1.0 + s) * (-s).exp()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f32,
    target: f32,
    value: f32,
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    /// A tween resting on `value`.
    pub const fn settled(value: f32, duration: Duration) -> Self {
        Self {
            start: value,
            target: value,
            value,
            delay: Duration::ZERO,
            duration,
            elapsed: duration,
        }
    }

    /// Starts moving from the current value toward `target` once `delay` has passed.
    ///
    /// Retargeting mid-flight restarts from wherever the value currently is.
    pub fn retarget(&mut self, target: f32, delay: Duration) {
        self.start = self.value;
        self.target = target;
        self.delay = delay;
        self.elapsed = Duration::ZERO;
    }

    /// Moves the end point without restarting the motion. Used when the layout is
    /// rescaled while the value is animating.
    pub fn set_target(&mut self, target: f32) {
        if self.is_finished() {
            self.start = target;
            self.value = target;
        }
        self.target = target;
    }

    pub fn tick(&mut self, delta: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(delta);
        let running = self.elapsed.saturating_sub(self.delay);
        self.value = if running >= self.duration {
            self.target
        } else {
            let t = running.as_secs_f32() / self.duration.as_secs_f32();
            (self.target - self.start).mul_add(critically_damped(t), self.start)
        };
        self.value
    }

    pub const fn value(&self) -> f32 {
        self.value
    }

    pub const fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay.saturating_add(self.duration)
    }
}

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringValue {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
}

impl SpringValue {
    pub fn step(&mut self, spring: &Spring, delta: Duration) {
        let mut remaining = delta.as_secs_f32();
        while remaining > 0.0 {
            let dt = remaining.min(MAX_SPRING_STEP);
            let displacement = self.value - self.target;
            let force = (-spring.stiffness).mul_add(displacement, -spring.damping * self.velocity);
            self.velocity += force / spring.mass * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }
    }
}
