/// Speeds below this magnitude snap to zero under the arcade model.
pub const ARCADE_JITTER_EPSILON: f64 = 0.001;

/// Speeds below this magnitude snap to zero under the force-based model.
pub const FORCE_JITTER_EPSILON: f64 = 0.01;

/// Reverse speed cap of the force-based model as a fraction of its forward cap.
pub const FORCE_REVERSE_SPEED_RATIO: f64 = 0.5;

pub const DEFAULT_ARCADE_MAX_SPEED: f64 = 30.0;
pub const DEFAULT_ARCADE_ACCEL_RATE: f64 = 15.0;
pub const DEFAULT_ARCADE_REVERSE_ACCEL_RATE: f64 = 10.0;
pub const DEFAULT_ARCADE_BRAKE_RATE: f64 = 30.0;
pub const DEFAULT_ARCADE_FRICTION: f64 = 5.0;

pub const DEFAULT_FORCE_MASS: f64 = 1200.0;
pub const DEFAULT_FORCE_ENGINE_FORCE: f64 = 8000.0;
pub const DEFAULT_FORCE_REVERSE_FORCE: f64 = 4000.0;
pub const DEFAULT_FORCE_BRAKE_FORCE: f64 = 12000.0;
pub const DEFAULT_FORCE_DRAG_COEFFICIENT: f64 = 0.43;
pub const DEFAULT_FORCE_ROLLING_RESISTANCE: f64 = 150.0;
pub const DEFAULT_FORCE_MAX_SPEED: f64 = 50.0;

pub const DEFAULT_BOOST_MULTIPLIER: f64 = 1.5;

pub const DEFAULT_STEERING_ANGLE: f64 = 0.5;
pub const DEFAULT_STEERING_SPEED: f64 = 2.0;
pub const DEFAULT_STEER_APPROXIMATION: f64 = 0.01;
pub const DEFAULT_TURN_ROTATION_LOSS: f64 = 5.0;
