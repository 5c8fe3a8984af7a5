use serde::{Deserialize, Serialize};

/// Planar vehicle pose. The vehicle faces -Z at heading zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Accumulated yaw in radians, unbounded.
    pub heading: f64,
    pub x: f64,
    pub z: f64,
}

/// Result of advancing a pose by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseStep {
    pub pose: Pose,
    /// Distance travelled this frame; the renderer spins the wheels by it.
    pub wheel_spin_delta: f64,
}

/// Kinematic bicycle-style integrator: the steer angle scales a
/// rotation-per-distance term divided by `turn_rotation_loss`.
#[derive(Debug, Clone, Copy)]
pub struct PoseIntegrator {
    turn_rotation_loss: f64,
}

impl PoseIntegrator {
    pub fn new(turn_rotation_loss: f64) -> Self {
        debug_assert!(turn_rotation_loss > 0.0);
        Self { turn_rotation_loss }
    }

    pub fn turn_rotation_loss(&self) -> f64 {
        self.turn_rotation_loss
    }

    pub fn advance(
        &self,
        pose: Pose,
        speed: f64,
        steering_angle: f64,
        time_delta_sec: f64,
    ) -> PoseStep {
        let distance = speed * time_delta_sec;
        let heading = pose.heading + steering_angle * distance / self.turn_rotation_loss;

        // Displacement follows the already-rotated heading.
        let (sin, cos) = heading.sin_cos();
        let pose = Pose {
            heading,
            x: pose.x - sin * distance,
            z: pose.z - cos * distance,
        };

        PoseStep {
            pose,
            wheel_spin_delta: distance,
        }
    }
}
