use serde::{Deserialize, Serialize};

use crate::camera::{HeadlessHost, NavigationController, Pose};
use crate::error::NoclipError;
use crate::input::InputEvent;
use crate::location::decode;
use crate::options::Options;
use crate::sync::{connect, MemoryHistory, StateSyncBridge};

/// Most simulated frames a single `advance` may run.
const MAX_ADVANCE_FRAMES: f64 = 1_000_000.0;

fn default_frame_dt() -> f64 {
    1.0 / 60.0
}

/// Scripted input session, loaded from TOML.
///
/// ```toml
/// start = "/noclip/acme.map1@0.000,0.000,0.000,0,0"
///
/// [[step]]
/// input = { type = "mouse_button", button = "left", pressed = true }
///
/// [[step]]
/// advance = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Initial URL (path plus optional query).
    pub start: String,
    /// Seconds per simulated frame while advancing.
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f64,
    /// Steps, in order.
    #[serde(default, rename = "step")]
    pub steps: Vec<ReplayStep>,
}

/// One scripted step: feed an input, advance time, or both (input first).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Input to deliver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputEvent>,
    /// Seconds of simulated frames to run afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance: Option<f64>,
}

/// Result of running a [`ReplayScript`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// URL after the last step.
    pub url: String,
    /// Number of location writes.
    pub writes: usize,
    /// Final camera pose as `[x, y, z, pitch, yaw]`.
    pub pose: [f64; 5],
    /// Errors the controller reported to its host.
    pub errors: Vec<String>,
}

impl ReplayScript {
    /// Parse a script.
    ///
    /// # Errors
    ///
    /// [`NoclipError::Script`] on malformed TOML, a non-positive frame
    /// step, or an `advance` that is negative, not finite, or longer than
    /// a million frames.
    pub fn from_toml(content: &str) -> Result<Self, NoclipError> {
        let script: Self =
            toml::from_str(content).map_err(|e| NoclipError::Script(e.to_string()))?;
        if !(script.frame_dt.is_finite() && script.frame_dt > 0.0) {
            return Err(NoclipError::Script(format!(
                "frame_dt must be positive, got {}",
                script.frame_dt
            )));
        }
        for (index, step) in script.steps.iter().enumerate() {
            let Some(seconds) = step.advance else {
                continue;
            };
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err(NoclipError::Script(format!(
                    "step {index}: advance must be finite and non-negative, got {seconds}"
                )));
            }
            if (seconds / script.frame_dt).ceil() > MAX_ADVANCE_FRAMES {
                return Err(NoclipError::Script(format!(
                    "step {index}: advance of {seconds}s exceeds {MAX_ADVANCE_FRAMES} frames"
                )));
            }
        }
        Ok(script)
    }

    /// Drive a headless controller and an in-memory history through the
    /// script. Lock requests are granted at the next step boundary, the way
    /// a browser reports them after the triggering event.
    ///
    /// # Errors
    ///
    /// [`NoclipError::InvalidLocationFormat`] when `start` does not decode.
    pub fn run(&self, options: &Options) -> Result<ReplayReport, NoclipError> {
        let location = decode(&self.start)?;
        let mut controller = NavigationController::new(HeadlessHost::default(), options);
        controller.set_pose(location.pose().unwrap_or_default());
        let bridge = connect(
            &mut controller,
            StateSyncBridge::for_location(MemoryHistory::new(&self.start), &location),
        );

        for step in &self.steps {
            if let Some(input) = &step.input {
                controller.handle_event(input.clone());
            }
            pump_lock(&mut controller);
            if let Some(seconds) = step.advance {
                advance(&mut controller, seconds, self.frame_dt);
            }
        }

        let (url, writes) = {
            let synced = bridge.borrow();
            (synced.history().url(), synced.history().writes())
        };
        let Pose {
            position,
            pitch,
            yaw,
        } = controller.pose();
        Ok(ReplayReport {
            url,
            writes,
            pose: [position.x, position.y, position.z, pitch, yaw],
            errors: controller.host().errors.clone(),
        })
    }
}

/// Run `seconds` of frames of at most `frame_dt` each; the last frame takes
/// the remainder.
fn advance(controller: &mut NavigationController<HeadlessHost>, seconds: f64, frame_dt: f64) {
    if !(seconds.is_finite() && seconds > 0.0) {
        return;
    }
    let frames = (seconds / frame_dt).ceil().min(MAX_ADVANCE_FRAMES) as u64;
    for frame in 0..frames {
        let elapsed = frame as f64 * frame_dt;
        let _ = controller.integrate((seconds - elapsed).min(frame_dt));
    }
}

fn pump_lock(controller: &mut NavigationController<HeadlessHost>) {
    while let Some(locked) = controller.host_mut().take_lock_change() {
        controller.on_lock_change(locked);
    }
}
