use crate::{
    constants::{ARCADE_JITTER_EPSILON, FORCE_JITTER_EPSILON, FORCE_REVERSE_SPEED_RATIO},
    input::InputActions,
    physics::{ArcadeParams, ForceParams},
    speed_control::SpeedLimits,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which acceleration strategy drives the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Arcade,
    Force,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Arcade => Mode::Force,
            Mode::Force => Mode::Arcade,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Arcade => write!(f, "arcade"),
            Mode::Force => write!(f, "force"),
        }
    }
}

/// What produced the acceleration of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionStatus {
    /// Standing still with nothing acting on the vehicle.
    Idle,
    /// A drive rule or force pushes in the chosen direction.
    Accelerating,
    /// Only passive resistance (friction, drag, rolling) acts.
    Coasting,
    /// The brake slows the vehicle.
    Braking,
    /// A drive input against the current motion slows the vehicle before it
    /// heads the other way.
    Reversing,
}

impl MotionStatus {
    /// Nothing drives the vehicle, so the speed may only shrink toward zero.
    pub fn is_resistive(&self) -> bool {
        !matches!(self, MotionStatus::Accelerating | MotionStatus::Reversing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    /// m/s², signed.
    pub value: f64,
    /// Net force in newtons. `None` for strategies that are not force-based.
    pub net_force: Option<f64>,
    pub status: MotionStatus,
}

impl Acceleration {
    fn rate(value: f64, status: MotionStatus) -> Self {
        Self {
            value,
            net_force: None,
            status,
        }
    }
}

/// Derives the instantaneous acceleration from held actions and speed.
///
/// Implementations are stateless; all parameters are fixed at build time.
pub trait AccelerationStrategy: fmt::Debug {
    fn mode(&self) -> Mode;

    fn compute(&self, actions: &InputActions, speed: f64) -> Acceleration;

    /// Speed bounds and jitter threshold for integrating this strategy's output.
    fn speed_limits(&self, actions: &InputActions) -> SpeedLimits;
}

/// Priority-rule model: the first matching rule alone decides the rate.
///
/// 1. brake
/// 2. accelerate (without reverse)
/// 3. reverse (without accelerate)
/// 4. friction
#[derive(Debug, Clone)]
pub struct ArcadeStrategy {
    params: ArcadeParams,
}

impl ArcadeStrategy {
    pub fn new(params: ArcadeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ArcadeParams {
        &self.params
    }
}

impl AccelerationStrategy for ArcadeStrategy {
    fn mode(&self) -> Mode {
        Mode::Arcade
    }

    fn compute(&self, actions: &InputActions, speed: f64) -> Acceleration {
        let ArcadeParams {
            accel_rate,
            reverse_accel_rate,
            brake_rate,
            friction,
            boost_multiplier,
            ..
        } = self.params;
        let boost = actions.boost_factor(boost_multiplier);

        if actions.brake {
            if speed == 0.0 {
                Acceleration::rate(0.0, MotionStatus::Idle)
            } else {
                Acceleration::rate(-sign(speed) * brake_rate, MotionStatus::Braking)
            }
        } else if actions.forward_only() {
            if speed >= 0.0 {
                Acceleration::rate(accel_rate * boost, MotionStatus::Accelerating)
            } else {
                Acceleration::rate(brake_rate, MotionStatus::Reversing)
            }
        } else if actions.reverse_only() {
            if speed <= 0.0 {
                Acceleration::rate(-reverse_accel_rate * boost, MotionStatus::Accelerating)
            } else {
                Acceleration::rate(-brake_rate, MotionStatus::Reversing)
            }
        } else if speed == 0.0 {
            Acceleration::rate(0.0, MotionStatus::Idle)
        } else {
            Acceleration::rate(-sign(speed) * friction, MotionStatus::Coasting)
        }
    }

    fn speed_limits(&self, actions: &InputActions) -> SpeedLimits {
        let ArcadeParams {
            max_speed,
            boost_multiplier,
            ..
        } = self.params;
        let max_speed = max_speed * actions.boost_factor(boost_multiplier);
        SpeedLimits::new(max_speed, max_speed, ARCADE_JITTER_EPSILON)
    }
}

/// Superposition model: every applicable force is summed, then divided by
/// mass.
#[derive(Debug, Clone)]
pub struct ForceStrategy {
    params: ForceParams,
}

impl ForceStrategy {
    pub fn new(params: ForceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ForceParams {
        &self.params
    }
}

impl AccelerationStrategy for ForceStrategy {
    fn mode(&self) -> Mode {
        Mode::Force
    }

    fn compute(&self, actions: &InputActions, speed: f64) -> Acceleration {
        let ForceParams {
            mass,
            engine_force,
            reverse_force,
            brake_force,
            drag_coefficient,
            rolling_resistance,
            boost_multiplier,
            ..
        } = self.params;
        let boost = actions.boost_factor(boost_multiplier);
        let direction = sign(speed);

        let mut net_force = 0.0;
        let mut propelled = false;
        let mut reversing = false;
        let mut braked = false;

        // Engine. Pushing forward while rolling backward brakes first.
        if actions.forward_only() {
            if speed >= 0.0 {
                net_force += engine_force * boost;
                propelled = true;
            } else {
                net_force += brake_force;
                reversing = true;
            }
        }

        if actions.reverse_only() {
            if speed <= 0.0 {
                net_force -= reverse_force * boost;
                propelled = true;
            } else {
                net_force -= brake_force;
                reversing = true;
            }
        }

        if actions.brake && direction != 0.0 {
            net_force -= brake_force * direction;
            braked = true;
        }

        net_force -= drag_coefficient * speed * speed * direction;
        net_force -= rolling_resistance * direction;

        let status = if propelled {
            MotionStatus::Accelerating
        } else if braked {
            MotionStatus::Braking
        } else if reversing {
            MotionStatus::Reversing
        } else if direction != 0.0 {
            MotionStatus::Coasting
        } else {
            MotionStatus::Idle
        };

        Acceleration {
            value: net_force / mass,
            net_force: Some(net_force),
            status,
        }
    }

    fn speed_limits(&self, _actions: &InputActions) -> SpeedLimits {
        let ForceParams { max_speed, .. } = self.params;
        SpeedLimits::new(
            max_speed,
            max_speed * FORCE_REVERSE_SPEED_RATIO,
            FORCE_JITTER_EPSILON,
        )
    }
}

/// Sign of `value`, with zero mapping to zero.
pub(crate) fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
