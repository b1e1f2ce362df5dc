//! `noclip` command-line tool: decode and encode location paths, and replay
//! scripted navigation sessions headlessly.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use noclip::location::{self, LocationState, Orientation, Position};
use noclip::options::Options;
use noclip::session::ReplayScript;

#[derive(Parser)]
#[command(name = "noclip", about = "Free-look camera location tools")]
struct Cli {
    /// Options preset (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a location path as JSON
    Decode {
        /// Path such as `/noclip/acme.map1@1.000,2.000,3.000,0,90`
        path: String,
    },
    /// Build a location path
    Encode {
        /// Organisation id
        #[arg(long)]
        org: String,
        /// Asset id
        #[arg(long)]
        asset: String,
        /// Position as `x,y,z` in metres
        #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
        position: Option<Vec<f64>>,
        /// Orientation as `pitch,yaw` in degrees
        #[arg(long, value_delimiter = ',', num_args = 2, allow_negative_numbers = true)]
        orientation: Option<Vec<f64>>,
    },
    /// Run a scripted input session and print the resulting location
    Replay {
        /// Script file (TOML)
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Decode { path } => {
            let state = location::decode(&path)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        }
        Command::Encode {
            org,
            asset,
            position,
            orientation,
        } => {
            let mut state = LocationState::new(org, asset);
            state.position = position.as_deref().and_then(|p| match p {
                [x, y, z] => Some(Position { x: *x, y: *y, z: *z }),
                _ => None,
            });
            state.orientation = orientation.as_deref().and_then(|o| match o {
                [pitch, yaw] => Some(Orientation {
                    pitch: pitch.to_radians(),
                    yaw: yaw.to_radians(),
                }),
                _ => None,
            });
            if state.has_orphan_orientation() {
                log::warn!("orientation without position is dropped");
            }
            writeln!(out, "{}", location::encode(&state))?;
        }
        Command::Replay { script } => {
            let options = match &cli.options {
                Some(path) => Options::load(path)?,
                None => Options::default(),
            };
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading {}", script.display()))?;
            let report = ReplayScript::from_toml(&text)?.run(&options)?;
            for error in &report.errors {
                log::error!("{error}");
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}
