use anyhow::Result;
use clap::Parser;
use rand::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vehicle_motion::{InputActions, Mode, MotionConfig, TurnEdgeDetector, TurnKeys};

#[derive(Parser)]
struct Opts {
    /// TOML file with motion parameters.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Overrides the strategy selected in the configuration.
    #[clap(long, value_parser = parse_mode)]
    pub mode: Option<Mode>,
    #[clap(long, default_value = "600")]
    pub frames: usize,
    /// Frame time in seconds.
    #[clap(long, default_value = "0.016666")]
    pub dt: f64,
    /// Adds up to this many seconds of random jitter to each frame time.
    #[clap(long, default_value = "0.0")]
    pub jitter: f64,
    /// Switch strategy halfway through the run.
    #[clap(long)]
    pub toggle: bool,
}

fn parse_mode(text: &str) -> Result<Mode, String> {
    match text {
        "arcade" => Ok(Mode::Arcade),
        "force" => Ok(Mode::Force),
        _ => Err(format!("unknown mode '{text}', expected 'arcade' or 'force'")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Opts {
        config,
        mode,
        frames,
        dt,
        jitter,
        toggle,
    } = Opts::parse();

    // Load parameters
    let mut config = match config {
        Some(path) => MotionConfig::from_path(path)?,
        None => MotionConfig::default(),
    };
    if let Some(mode) = mode {
        config.mode = mode;
    }
    let mut model = config.build()?;
    let mut detector = TurnEdgeDetector::new();
    let mut rng = rand::thread_rng();

    for frame in 0..frames {
        if toggle && frame == frames / 2 {
            let mode = model.toggle_mode();
            info!(frame, %mode, "strategy toggled");
        }

        // Scripted driver: launch, hold a left turn, boost, then brake.
        let progress = frame as f64 / frames as f64;
        let actions = InputActions {
            accelerate: progress < 0.6,
            reverse: false,
            brake: progress >= 0.8,
            boost: (0.3..0.45).contains(&progress),
        };
        let keys = TurnKeys {
            left: (0.2..0.4).contains(&progress),
            right: (0.35..0.5).contains(&progress),
        };
        for command in detector.update(keys) {
            model.apply_turn(command);
        }

        let time_delta_sec = if jitter > 0.0 {
            dt + rng.gen_range(0.0..jitter)
        } else {
            dt
        };
        let report = model.update(&actions, time_delta_sec);

        if frame % 30 == 0 {
            let state = model.state();
            info!(
                frame,
                mode = %report.mode,
                status = ?report.status,
                speed = report.speed,
                accel = report.acceleration,
                heading = state.heading_angle,
                x = state.position_x,
                z = state.position_z,
                steer = state.current_steer_angle,
            );
        }
    }

    let state = model.state();
    info!(
        speed = state.speed,
        x = state.position_x,
        z = state.position_z,
        heading = state.heading_angle,
        "run finished"
    );

    Ok(())
}
