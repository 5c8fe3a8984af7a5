//! Frame-driven vehicle motion model.
//!
//! Each frame, held driving actions and the current speed go through an
//! [`AccelerationStrategy`] (arcade priority rules or force superposition),
//! the result is integrated into a clamped speed, the steering angle chases
//! its edge-driven target, and the pose is advanced along the new heading.
//!
//! ```
//! use vehicle_motion::{InputActions, MotionConfig};
//!
//! let mut model = MotionConfig::default().build().unwrap();
//! let actions = InputActions {
//!     accelerate: true,
//!     ..Default::default()
//! };
//! let report = model.update(&actions, 1.0 / 60.0);
//! assert!(report.speed > 0.0);
//! ```

pub mod accel_control;
pub mod constants;
pub mod error;
pub mod input;
pub mod physics;
pub mod pose;
pub mod speed_control;
pub mod steer_control;
pub mod vehicle_control;

pub use accel_control::{
    Acceleration, AccelerationStrategy, ArcadeStrategy, ForceStrategy, Mode, MotionStatus,
};
pub use error::ConfigError;
pub use input::{InputActions, KeyTransition, TurnCommand, TurnEdgeDetector, TurnKeys, TurnSide};
pub use physics::{
    ArcadeParams, ForceParams, MotionConfig, ParamRange, SteeringParams, TunableParams,
};
pub use pose::{Pose, PoseIntegrator, PoseStep};
pub use speed_control::{SpeedIntegrator, SpeedLimits};
pub use steer_control::SteerController;
pub use vehicle_control::{Report, VehicleMotionModel, VehicleState};
