use crate::{
    accel_control::{
        Acceleration, AccelerationStrategy, ArcadeStrategy, ForceStrategy, Mode, MotionStatus,
    },
    error::ConfigError,
    input::{InputActions, TurnCommand},
    physics::MotionConfig,
    pose::{Pose, PoseIntegrator, PoseStep},
    speed_control::SpeedIntegrator,
    steer_control::SteerController,
};
use noisy_float::types::r64;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Snapshot of the simulated vehicle, read by the renderer after each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// m/s, positive is forward.
    pub speed: f64,
    /// Last computed acceleration, m/s². Diagnostic only.
    pub acceleration: f64,
    /// Last computed net force, N. Zero under the arcade strategy.
    pub net_force: f64,
    pub heading_angle: f64,
    pub position_x: f64,
    pub position_z: f64,
    pub current_steer_angle: f64,
    pub target_steer_angle: f64,
    pub wheel_spin_delta: f64,
}

impl VehicleState {
    pub fn pose(&self) -> Pose {
        Pose {
            heading: self.heading_angle,
            x: self.position_x,
            z: self.position_z,
        }
    }
}

/// Per-frame telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub mode: Mode,
    pub status: MotionStatus,
    pub speed: f64,
    pub acceleration: f64,
    /// Only reported by the force-based strategy.
    pub net_force: Option<f64>,
}

#[derive(Debug)]
pub struct VehicleMotionModel {
    config: MotionConfig,
    mode: Mode,
    arcade: ArcadeStrategy,
    force: ForceStrategy,
    speed_integrator: SpeedIntegrator,
    steer_controller: SteerController,
    pose_integrator: PoseIntegrator,
    state: VehicleState,
    last: Acceleration,
}

impl VehicleMotionModel {
    pub fn new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let MotionConfig {
            mode,
            ref arcade,
            ref force,
            ref steering,
        } = config;

        Ok(Self {
            mode,
            arcade: arcade.build(),
            force: force.build(),
            speed_integrator: SpeedIntegrator::new(),
            steer_controller: SteerController::from_params(steering),
            pose_integrator: PoseIntegrator::new(steering.turn_rotation_loss),
            state: VehicleState::default(),
            last: idle(),
            config,
        })
    }

    /// Replaces the parameters between frames. Vehicle state is kept unless
    /// the new configuration selects a different mode.
    pub fn set_config(&mut self, config: MotionConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let MotionConfig {
            mode,
            ref arcade,
            ref force,
            ref steering,
        } = config;
        self.arcade = arcade.build();
        self.force = force.build();
        self.steer_controller.set_params(steering);
        self.state.target_steer_angle = self.steer_controller.target_steering_angle();
        self.pose_integrator = PoseIntegrator::new(steering.turn_rotation_loss);
        self.config = config;
        self.set_mode(mode);
        Ok(())
    }

    /// Switches the acceleration strategy. Switching to a different strategy
    /// zeroes speed, acceleration and net force; selecting the active one
    /// does nothing.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }

        debug!(from = %self.mode, to = %mode, "switching acceleration strategy");
        self.mode = mode;
        self.config.mode = mode;
        self.state.speed = 0.0;
        self.state.acceleration = 0.0;
        self.state.net_force = 0.0;
        self.last = idle();
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn apply_turn(&mut self, command: TurnCommand) {
        self.steer_controller.apply(command);
        self.state.target_steer_angle = self.steer_controller.target_steering_angle();
    }

    /// Advances the vehicle by one frame.
    ///
    /// A zero, negative or non-finite `time_delta_sec` leaves the vehicle
    /// where it is.
    pub fn update(&mut self, actions: &InputActions, time_delta_sec: f64) -> Report {
        if !time_delta_sec.is_finite() || time_delta_sec <= 0.0 {
            debug!(time_delta_sec, "degenerate time delta, holding vehicle");
            self.state.wheel_spin_delta = 0.0;
            return self.report();
        }

        let speed = self.state.speed;
        let (accel, limits) = {
            let strategy = self.strategy();
            (
                strategy.compute(actions, speed),
                strategy.speed_limits(actions),
            )
        };
        let speed = self
            .speed_integrator
            .integrate(speed, &accel, time_delta_sec, &limits);

        let steer = self.steer_controller.step(time_delta_sec);

        let PoseStep {
            pose,
            wheel_spin_delta,
        } = self
            .pose_integrator
            .advance(self.state.pose(), speed, steer, time_delta_sec);

        self.state = VehicleState {
            speed: finite(speed),
            acceleration: finite(accel.value),
            net_force: finite(accel.net_force.unwrap_or(0.0)),
            heading_angle: finite(pose.heading),
            position_x: finite(pose.x),
            position_z: finite(pose.z),
            current_steer_angle: finite(steer),
            target_steer_angle: self.steer_controller.target_steering_angle(),
            wheel_spin_delta,
        };
        self.last = accel;

        trace!(
            mode = %self.mode,
            status = ?accel.status,
            speed,
            acceleration = accel.value,
            heading = pose.heading,
            steer,
            "frame"
        );

        self.report()
    }

    /// Puts the vehicle back at the origin, stopped and centered. Mode and
    /// parameters are kept.
    pub fn reset(&mut self) {
        self.steer_controller.reset();
        self.state = VehicleState::default();
        self.last = idle();
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn steer_controller(&self) -> &SteerController {
        &self.steer_controller
    }

    pub fn strategy(&self) -> &dyn AccelerationStrategy {
        match self.mode {
            Mode::Arcade => &self.arcade,
            Mode::Force => &self.force,
        }
    }

    fn report(&self) -> Report {
        let Acceleration {
            value,
            net_force,
            status,
        } = self.last;

        Report {
            mode: self.mode,
            status,
            speed: self.state.speed,
            acceleration: value,
            net_force,
        }
    }
}

fn idle() -> Acceleration {
    Acceleration {
        value: 0.0,
        net_force: None,
        status: MotionStatus::Idle,
    }
}

/// Non-finite state is a programming error; checked in debug builds only.
fn finite(value: f64) -> f64 {
    r64(value).raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::{KeyTransition, TurnEdgeDetector, TurnKeys, TurnSide},
        physics::{ArcadeParams, ForceParams, SteeringParams},
    };

    fn model(mode: Mode) -> VehicleMotionModel {
        MotionConfig {
            mode,
            ..Default::default()
        }
        .build()
        .unwrap()
    }

    fn accelerate() -> InputActions {
        InputActions {
            accelerate: true,
            ..Default::default()
        }
    }

    #[test]
    fn arcade_accelerates_to_max_speed() {
        let mut model = MotionConfig {
            arcade: ArcadeParams {
                accel_rate: 15.0,
                max_speed: 30.0,
                ..Default::default()
            },
            ..Default::default()
        }
        .build()
        .unwrap();

        let report = model.update(&accelerate(), 1.0);
        assert_eq!(report.speed, 15.0);
        assert_eq!(report.status, MotionStatus::Accelerating);
        assert_eq!(report.net_force, None);
        assert_eq!(model.update(&accelerate(), 1.0).speed, 30.0);
        for _ in 0..5 {
            assert_eq!(model.update(&accelerate(), 1.0).speed, 30.0);
        }
    }

    #[test]
    fn force_at_rest_stays_at_rest() {
        let mut model = model(Mode::Force);
        let report = model.update(&InputActions::default(), 1.0);
        assert_eq!(report.speed, 0.0);
        assert_eq!(report.net_force, Some(0.0));
        assert_eq!(model.state().position_z, 0.0);
    }

    #[test]
    fn force_coasts_down_to_zero_without_oscillating() {
        let mut model = model(Mode::Force);
        for _ in 0..300 {
            model.update(&accelerate(), 1.0 / 60.0);
        }
        let mut previous = model.state().speed;
        assert!(previous > 0.0);

        let mut frames = 0;
        while model.state().speed != 0.0 {
            let speed = model.update(&InputActions::default(), 1.0 / 60.0).speed;
            assert!(speed >= 0.0 && speed < previous, "{speed} after {previous}");
            previous = speed;
            frames += 1;
            assert!(frames < 100_000, "never stopped");
        }
        for _ in 0..10 {
            assert_eq!(model.update(&InputActions::default(), 1.0 / 60.0).speed, 0.0);
        }
    }

    #[test]
    fn arcade_friction_stops_without_oscillating() {
        let mut model = model(Mode::Arcade);
        for _ in 0..30 {
            model.update(&accelerate(), 1.0 / 60.0);
        }
        for _ in 0..600 {
            let speed = model.update(&InputActions::default(), 1.0 / 60.0).speed;
            assert!(speed >= 0.0);
        }
        assert_eq!(model.state().speed, 0.0);
        assert_eq!(model.update(&InputActions::default(), 0.1).status, MotionStatus::Idle);
    }

    #[test]
    fn straight_drive_moves_along_negative_z() {
        let mut model = model(Mode::Arcade);
        model.update(&accelerate(), 0.5);
        let state = *model.state();
        assert_eq!(state.heading_angle, 0.0);
        assert_eq!(state.position_x, 0.0);
        assert!(state.position_z < 0.0);
        assert_eq!(state.wheel_spin_delta, -state.position_z);
    }

    #[test]
    fn pose_uses_new_speed_and_new_steer() {
        let steering = SteeringParams::default();
        let mut model = model(Mode::Arcade);
        model.apply_turn(TurnCommand::new(TurnSide::Left, KeyTransition::Pressed));
        let report = model.update(&accelerate(), 0.1);

        let steer = steering.steering_speed * 0.1;
        let distance = report.speed * 0.1;
        let state = model.state();
        assert_eq!(state.current_steer_angle, steer);
        assert_eq!(state.target_steer_angle, steering.steering_angle);
        assert!((state.heading_angle - steer * distance / steering.turn_rotation_loss).abs() < 1e-12);
        assert!(state.position_x < 0.0);
    }

    #[test]
    fn degenerate_time_delta_holds_vehicle() {
        let mut model = model(Mode::Arcade);
        model.update(&accelerate(), 0.5);
        let before = *model.state();

        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let report = model.update(&accelerate(), dt);
            assert_eq!(report.speed, before.speed);
            assert_eq!(model.state().pose(), before.pose());
            assert_eq!(model.state().wheel_spin_delta, 0.0);
        }
    }

    #[test]
    fn mode_switch_resets_motion_but_not_pose() {
        let mut model = model(Mode::Arcade);
        model.update(&accelerate(), 0.5);
        let pose = model.state().pose();
        assert!(model.state().speed > 0.0);

        assert_eq!(model.toggle_mode(), Mode::Force);
        let state = model.state();
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.acceleration, 0.0);
        assert_eq!(state.net_force, 0.0);
        assert_eq!(state.pose(), pose);
        assert_eq!(model.config().mode, Mode::Force);
    }

    #[test]
    fn selecting_active_mode_keeps_speed() {
        let mut model = model(Mode::Force);
        model.update(&accelerate(), 0.5);
        let speed = model.state().speed;
        model.set_mode(Mode::Force);
        assert_eq!(model.state().speed, speed);
    }

    #[test]
    fn force_reverse_is_capped_at_half_max_speed() {
        let mut model = model(Mode::Force);
        let reverse = InputActions {
            reverse: true,
            boost: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            model.update(&reverse, 0.05);
        }
        let max_reverse = ForceParams::default().max_reverse_speed();
        assert!(model.state().speed >= -max_reverse);
    }

    #[test]
    fn edge_detector_feeds_target_angle() {
        let angle = SteeringParams::default().steering_angle;
        let mut model = model(Mode::Arcade);
        let mut detector = TurnEdgeDetector::new();

        let frames = [
            TurnKeys { left: true, right: false },
            TurnKeys { left: true, right: true },
            TurnKeys { left: false, right: true },
            TurnKeys { left: false, right: true },
        ];
        let targets = [angle, 0.0, -angle, -angle];

        for (keys, target) in frames.into_iter().zip(targets) {
            for command in detector.update(keys) {
                model.apply_turn(command);
            }
            model.update(&InputActions::default(), 1.0 / 60.0);
            assert_eq!(model.state().target_steer_angle, target);
        }
    }

    #[test]
    fn set_config_keeps_state_and_rejects_invalid() {
        let mut model = model(Mode::Arcade);
        model.update(&accelerate(), 0.5);
        let speed = model.state().speed;

        let mut config = model.config().clone();
        config.arcade.max_speed = 60.0;
        model.set_config(config).unwrap();
        assert_eq!(model.state().speed, speed);

        let mut config = model.config().clone();
        config.steering.turn_rotation_loss = 0.0;
        assert!(model.set_config(config).is_err());
        assert_eq!(model.config().arcade.max_speed, 60.0);
    }

    #[test]
    fn retuning_steering_mid_turn_recenters_on_release() {
        let mut model = model(Mode::Arcade);
        model.apply_turn(TurnCommand::new(TurnSide::Left, KeyTransition::Pressed));
        model.update(&InputActions::default(), 1.0 / 60.0);

        let mut config = model.config().clone();
        config.steering.steering_angle = 0.3;
        model.set_config(config).unwrap();
        assert_eq!(model.state().target_steer_angle, 0.3);

        model.apply_turn(TurnCommand::new(TurnSide::Left, KeyTransition::Released));
        for _ in 0..200 {
            model.update(&InputActions::default(), 1.0 / 60.0);
        }
        assert_eq!(model.state().target_steer_angle, 0.0);
        assert_eq!(model.state().current_steer_angle, 0.0);
    }

    #[test]
    fn arcade_accelerate_while_rolling_back_turns_around() {
        let mut model = model(Mode::Arcade);
        let reverse = InputActions {
            reverse: true,
            ..Default::default()
        };
        model.update(&reverse, 0.1);
        assert_eq!(model.state().speed, -1.0);

        let report = model.update(&accelerate(), 1.0);
        assert_eq!(report.status, MotionStatus::Reversing);
        assert_eq!(report.speed, -1.0 + ArcadeParams::default().brake_rate);
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut model = model(Mode::Force);
        model.apply_turn(TurnCommand::new(TurnSide::Right, KeyTransition::Pressed));
        for _ in 0..60 {
            model.update(&accelerate(), 1.0 / 60.0);
        }
        model.reset();
        assert_eq!(*model.state(), VehicleState::default());
        assert_eq!(model.mode(), Mode::Force);
        assert_eq!(model.steer_controller().target_steering_angle(), 0.0);
    }

    #[test]
    fn invalid_config_is_rejected_at_build() {
        let config = MotionConfig {
            force: ForceParams {
                mass: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.build().unwrap_err(),
            ConfigError::InvalidConfiguration { param: "mass", .. }
        ));
    }
}
