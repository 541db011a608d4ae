//! Start-up configuration: command-line flags and the frame thresholds
//! derived from them.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_CHARGE_SECS: f64 = 0.7;
pub const DEFAULT_COOLDOWN_SECS: f64 = 1.0;
/// How long a key counts as held after its last press or repeat, on
/// terminals that never report releases. Outlasts the ~500 ms OS repeat delay.
pub const HOLD_MILLIS: u64 = 600;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shoot arrows at a target from a bouncing bow", long_about = None)]
pub struct Args {
    /// Frames per second of the main loop.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seconds the shoot key must be held to reach full force.
    #[arg(long, default_value_t = DEFAULT_CHARGE_SECS)]
    pub charge_secs: f64,

    /// Seconds the bow needs after a shot before it can be drawn again.
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_SECS)]
    pub cooldown_secs: f64,

    /// Vertical acceleration applied to arrows every frame.
    #[arg(long, default_value_t = 0.0)]
    pub gravity: f32,

    #[arg(long, default_value = "archery.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 fps")]
    ZeroFps,

    #[error("charge duration of {secs}s is shorter than one frame at {fps} fps")]
    ChargeTooShort { secs: f64, fps: u32 },

    #[error("cooldown duration of {secs}s is shorter than one frame at {fps} fps")]
    CooldownTooShort { secs: f64, fps: u32 },
}

/// Frame-count thresholds, fixed for the whole run. Only `Timing::new` can
/// build one, so every threshold is at least one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    fps: u32,
    charge_frames: u32,
    cooldown_frames: u32,
    hold_frames: u64,
}

impl Timing {
    pub fn new(fps: u32, charge_secs: f64, cooldown_secs: f64) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        let charge_frames = secs_to_frames(charge_secs, fps);
        if charge_frames == 0 {
            return Err(ConfigError::ChargeTooShort { secs: charge_secs, fps });
        }
        let cooldown_frames = secs_to_frames(cooldown_secs, fps);
        if cooldown_frames == 0 {
            return Err(ConfigError::CooldownTooShort { secs: cooldown_secs, fps });
        }
        Ok(Timing {
            fps,
            charge_frames,
            cooldown_frames,
            hold_frames: (HOLD_MILLIS * fps as u64).div_ceil(1000),
        })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames of holding needed to reach `FORCE_MAX`.
    pub fn charge_frames(&self) -> u32 {
        self.charge_frames
    }

    /// Frames spent in Reload after a shot.
    pub fn cooldown_frames(&self) -> u32 {
        self.cooldown_frames
    }

    /// Frames without a press or repeat before a key counts as released.
    pub fn hold_frames(&self) -> u64 {
        self.hold_frames
    }
}

impl Default for Timing {
    fn default() -> Self {
        // 0.7 s, 1 s and 0.6 s at 30 fps
        Timing { fps: DEFAULT_FPS, charge_frames: 21, cooldown_frames: 30, hold_frames: 18 }
    }
}

/// Truncates like an integer cast; negative or NaN durations become 0.
fn secs_to_frames(secs: f64, fps: u32) -> u32 {
    (secs * fps as f64) as u32
}

/// Everything a game session needs to know about the run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameConfig {
    pub timing: Timing,
    pub gravity: f32,
}

impl GameConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        Ok(GameConfig {
            timing: Timing::new(args.fps, args.charge_secs, args.cooldown_secs)?,
            gravity: args.gravity,
        })
    }
}
