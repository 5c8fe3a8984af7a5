use crate::{input::TurnCommand, physics::SteeringParams};
use tracing::debug;

/// Rate-limited steering: the wheel angle chases a target that discrete
/// turn commands move in fixed increments.
#[derive(Debug, Clone)]
pub struct SteerController {
    current_steering_angle: f64,
    target_steering_angle: f64,
    /// Held left keys minus held right keys.
    held_turns: f64,
    steering_angle: f64,
    steering_speed: f64,
    steer_approximation: f64,
}

impl SteerController {
    pub fn from_params(params: &SteeringParams) -> Self {
        let SteeringParams {
            steering_angle,
            steering_speed,
            steer_approximation,
            ..
        } = *params;
        Self::new(steering_angle, steering_speed, steer_approximation)
    }

    pub fn new(steering_angle: f64, steering_speed: f64, steer_approximation: f64) -> Self {
        Self {
            current_steering_angle: 0.0,
            target_steering_angle: 0.0,
            held_turns: 0.0,
            steering_angle,
            steering_speed,
            steer_approximation,
        }
    }

    /// Adopts new response parameters. The target is rebuilt from the held
    /// keys so later releases remove exactly what is left of it.
    pub fn set_params(&mut self, params: &SteeringParams) {
        self.steering_angle = params.steering_angle;
        self.steering_speed = params.steering_speed;
        self.steer_approximation = params.steer_approximation;
        self.target_steering_angle = self.held_turns * self.steering_angle;
    }

    /// Adds the command's increment to the target. Each command must be
    /// applied exactly once.
    pub fn apply(&mut self, command: TurnCommand) {
        self.held_turns += command.direction();
        self.target_steering_angle = self.held_turns * self.steering_angle;
        debug!(
            ?command,
            target = self.target_steering_angle,
            "turn command applied"
        );
    }

    /// Moves the current angle toward the target by at most
    /// `steering_speed * time_delta_sec`, never past it.
    pub fn step(&mut self, time_delta_sec: f64) -> f64 {
        let Self {
            current_steering_angle: current,
            target_steering_angle: target,
            steering_speed,
            steer_approximation,
            ..
        } = *self;

        if current != target {
            let diff = target - current;
            let distance = diff.abs();
            let max_step = steering_speed * time_delta_sec;

            self.current_steering_angle = if distance <= steer_approximation || distance <= max_step
            {
                target
            } else {
                current + diff.signum() * max_step
            };
        }

        self.current_steering_angle
    }

    pub fn current_steering_angle(&self) -> f64 {
        self.current_steering_angle
    }

    pub fn target_steering_angle(&self) -> f64 {
        self.target_steering_angle
    }

    /// Centers both angles, dropping any accumulated turn commands.
    pub fn reset(&mut self) {
        self.current_steering_angle = 0.0;
        self.target_steering_angle = 0.0;
        self.held_turns = 0.0;
    }
}
