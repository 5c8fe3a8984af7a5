//! Tunable parameter sets for the two acceleration strategies and the
//! steering/pose response, plus the TOML-backed [`MotionConfig`] that bundles
//! them.
//!
//! Every parameter is a named `f64` with a documented range so an external
//! tuning panel can enumerate, read and write them without knowing the
//! concrete struct layout.

use crate::{
    accel_control::{ArcadeStrategy, ForceStrategy, Mode},
    constants::*,
    error::ConfigError,
    vehicle_control::VehicleMotionModel,
};
use noisy_float::types::R64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Range descriptor for one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    const fn new(name: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            name,
            min,
            max,
            step,
        }
    }

    pub fn check(&self, value: f64) -> Result<(), ConfigError> {
        let Self { name, min, max, .. } = *self;
        let in_range = R64::try_new(value)
            .map(|value| (min..=max).contains(&value.raw()))
            .unwrap_or(false);

        if in_range {
            Ok(())
        } else {
            Err(ConfigError::InvalidConfiguration {
                param: name,
                value,
                min,
                max,
            })
        }
    }
}

/// A parameter set whose fields are addressable by name.
pub trait TunableParams {
    /// One entry per field, in declaration order.
    const RANGES: &'static [ParamRange];

    fn get(&self, name: &str) -> Option<f64>;

    fn field_mut(&mut self, name: &str) -> Option<&mut f64>;

    fn range(name: &str) -> Option<&'static ParamRange> {
        Self::RANGES.iter().find(|range| range.name == name)
    }

    /// Writes one parameter. The struct is left untouched on error.
    fn set(&mut self, name: &str, value: f64) -> Result<(), ConfigError> {
        let range = Self::range(name).ok_or_else(|| ConfigError::UnknownParameter(name.into()))?;
        range.check(value)?;
        let field = self
            .field_mut(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.into()))?;
        *field = value;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for range in Self::RANGES {
            if let Some(value) = self.get(range.name) {
                range.check(value)?;
            }
        }
        Ok(())
    }
}

/// Parameters of the priority-rule arcade model. Rates are in m/s².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcadeParams {
    pub max_speed: f64,
    pub accel_rate: f64,
    pub reverse_accel_rate: f64,
    pub brake_rate: f64,
    pub friction: f64,
    pub boost_multiplier: f64,
}

impl Default for ArcadeParams {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_ARCADE_MAX_SPEED,
            accel_rate: DEFAULT_ARCADE_ACCEL_RATE,
            reverse_accel_rate: DEFAULT_ARCADE_REVERSE_ACCEL_RATE,
            brake_rate: DEFAULT_ARCADE_BRAKE_RATE,
            friction: DEFAULT_ARCADE_FRICTION,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
        }
    }
}

impl ArcadeParams {
    pub fn build(&self) -> ArcadeStrategy {
        ArcadeStrategy::new(self.clone())
    }
}

impl TunableParams for ArcadeParams {
    const RANGES: &'static [ParamRange] = &[
        ParamRange::new("max_speed", 1.0, 100.0, 0.5),
        ParamRange::new("accel_rate", 0.5, 100.0, 0.5),
        ParamRange::new("reverse_accel_rate", 0.5, 100.0, 0.5),
        ParamRange::new("brake_rate", 0.5, 200.0, 0.5),
        ParamRange::new("friction", 0.0, 50.0, 0.1),
        ParamRange::new("boost_multiplier", 1.0, 5.0, 0.1),
    ];

    fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "max_speed" => self.max_speed,
            "accel_rate" => self.accel_rate,
            "reverse_accel_rate" => self.reverse_accel_rate,
            "brake_rate" => self.brake_rate,
            "friction" => self.friction,
            "boost_multiplier" => self.boost_multiplier,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        let field = match name {
            "max_speed" => &mut self.max_speed,
            "accel_rate" => &mut self.accel_rate,
            "reverse_accel_rate" => &mut self.reverse_accel_rate,
            "brake_rate" => &mut self.brake_rate,
            "friction" => &mut self.friction,
            "boost_multiplier" => &mut self.boost_multiplier,
            _ => return None,
        };
        Some(field)
    }
}

/// Parameters of the force-based model. Forces are in newtons, mass in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForceParams {
    pub mass: f64,
    pub engine_force: f64,
    pub reverse_force: f64,
    pub brake_force: f64,
    /// Quadratic air resistance, N·s²/m².
    pub drag_coefficient: f64,
    /// Constant-magnitude rolling resistance, N.
    pub rolling_resistance: f64,
    pub max_speed: f64,
    pub boost_multiplier: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            mass: DEFAULT_FORCE_MASS,
            engine_force: DEFAULT_FORCE_ENGINE_FORCE,
            reverse_force: DEFAULT_FORCE_REVERSE_FORCE,
            brake_force: DEFAULT_FORCE_BRAKE_FORCE,
            drag_coefficient: DEFAULT_FORCE_DRAG_COEFFICIENT,
            rolling_resistance: DEFAULT_FORCE_ROLLING_RESISTANCE,
            max_speed: DEFAULT_FORCE_MAX_SPEED,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
        }
    }
}

impl ForceParams {
    pub fn build(&self) -> ForceStrategy {
        ForceStrategy::new(self.clone())
    }

    pub fn max_reverse_speed(&self) -> f64 {
        self.max_speed * FORCE_REVERSE_SPEED_RATIO
    }
}

impl TunableParams for ForceParams {
    const RANGES: &'static [ParamRange] = &[
        ParamRange::new("mass", 100.0, 10000.0, 10.0),
        ParamRange::new("engine_force", 0.0, 50000.0, 100.0),
        ParamRange::new("reverse_force", 0.0, 50000.0, 100.0),
        ParamRange::new("brake_force", 0.0, 100000.0, 100.0),
        ParamRange::new("drag_coefficient", 0.0, 5.0, 0.01),
        ParamRange::new("rolling_resistance", 0.0, 5000.0, 10.0),
        ParamRange::new("max_speed", 1.0, 150.0, 0.5),
        ParamRange::new("boost_multiplier", 1.0, 5.0, 0.1),
    ];

    fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "mass" => self.mass,
            "engine_force" => self.engine_force,
            "reverse_force" => self.reverse_force,
            "brake_force" => self.brake_force,
            "drag_coefficient" => self.drag_coefficient,
            "rolling_resistance" => self.rolling_resistance,
            "max_speed" => self.max_speed,
            "boost_multiplier" => self.boost_multiplier,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        let field = match name {
            "mass" => &mut self.mass,
            "engine_force" => &mut self.engine_force,
            "reverse_force" => &mut self.reverse_force,
            "brake_force" => &mut self.brake_force,
            "drag_coefficient" => &mut self.drag_coefficient,
            "rolling_resistance" => &mut self.rolling_resistance,
            "max_speed" => &mut self.max_speed,
            "boost_multiplier" => &mut self.boost_multiplier,
            _ => return None,
        };
        Some(field)
    }
}

/// Steering response, shared by both strategies. Angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SteeringParams {
    /// Target angle contributed by one held turn key.
    pub steering_angle: f64,
    /// Maximum angular rate of the wheels, rad/s.
    pub steering_speed: f64,
    /// Snap distance between current and target angle.
    pub steer_approximation: f64,
    /// Divisor on heading change per unit distance; larger turns lazier.
    pub turn_rotation_loss: f64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            steering_angle: DEFAULT_STEERING_ANGLE,
            steering_speed: DEFAULT_STEERING_SPEED,
            steer_approximation: DEFAULT_STEER_APPROXIMATION,
            turn_rotation_loss: DEFAULT_TURN_ROTATION_LOSS,
        }
    }
}

impl TunableParams for SteeringParams {
    const RANGES: &'static [ParamRange] = &[
        ParamRange::new("steering_angle", 0.01, 1.5, 0.01),
        ParamRange::new("steering_speed", 0.1, 20.0, 0.1),
        ParamRange::new("steer_approximation", 0.0, 0.1, 0.001),
        ParamRange::new("turn_rotation_loss", 0.1, 50.0, 0.1),
    ];

    fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "steering_angle" => self.steering_angle,
            "steering_speed" => self.steering_speed,
            "steer_approximation" => self.steer_approximation,
            "turn_rotation_loss" => self.turn_rotation_loss,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        let field = match name {
            "steering_angle" => &mut self.steering_angle,
            "steering_speed" => &mut self.steering_speed,
            "steer_approximation" => &mut self.steer_approximation,
            "turn_rotation_loss" => &mut self.turn_rotation_loss,
            _ => return None,
        };
        Some(field)
    }
}

/// Complete configuration of a [`VehicleMotionModel`].
///
/// ```toml
/// mode = "force"
///
/// [force]
/// mass = 900.0
///
/// [steering]
/// turn_rotation_loss = 4.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub mode: Mode,
    pub arcade: ArcadeParams,
    pub force: ForceParams,
    pub steering: SteeringParams,
}

impl MotionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), mode = ?config.mode, "loaded motion configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            ref arcade,
            ref force,
            ref steering,
            ..
        } = *self;
        arcade.validate()?;
        force.validate()?;
        steering.validate()?;
        Ok(())
    }

    pub fn build(&self) -> Result<VehicleMotionModel, ConfigError> {
        VehicleMotionModel::new(self.clone())
    }
}
