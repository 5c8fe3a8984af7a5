use crate::accel_control::{sign, Acceleration};

/// Bounds applied after each integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    /// Upper bound on forward speed, m/s.
    pub max_forward: f64,
    /// Upper bound on reverse speed magnitude, m/s.
    pub max_reverse: f64,
    /// Speeds with a smaller magnitude snap to zero.
    pub jitter_epsilon: f64,
}

impl SpeedLimits {
    pub fn new(max_forward: f64, max_reverse: f64, jitter_epsilon: f64) -> Self {
        Self {
            max_forward,
            max_reverse,
            jitter_epsilon,
        }
    }

    pub fn clamp(&self, speed: f64) -> f64 {
        speed.clamp(-self.max_reverse, self.max_forward)
    }
}

/// Integrates acceleration into speed. Strategy-agnostic apart from the
/// limits it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedIntegrator;

impl SpeedIntegrator {
    pub fn new() -> Self {
        Self
    }

    pub fn integrate(
        &self,
        speed: f64,
        accel: &Acceleration,
        time_delta_sec: f64,
        limits: &SpeedLimits,
    ) -> f64 {
        let mut next = speed + accel.value * time_delta_sec;

        // Resistance alone never carries the vehicle through a standstill.
        if accel.status.is_resistive() && sign(next) * sign(speed) < 0.0 {
            next = 0.0;
        }

        let next = limits.clamp(next);

        if next.abs() < limits.jitter_epsilon {
            0.0
        } else {
            next
        }
    }
}
