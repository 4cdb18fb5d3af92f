//! Headless driving runs.
//!
//! Drives one vehicle over [`FlatGround`] with a scripted input, prints
//! telemetry every few ticks and the final state hash. Two runs with the same
//! arguments print the same hash.
//!
//! ```text
//! riftdrive-bench --scenario brake --seconds 4 --hz 120
//! RUST_LOG=riftdrive_vehicles=debug riftdrive-bench --config car.json
//! ```

mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use riftdrive_core::hex_digest;
use riftdrive_vehicles::{Assist, FlatGround, VehicleConfig, VehicleDynamics, VehicleEvent};
use scenario::Scenario;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scripted headless vehicle runs
#[derive(Parser, Debug)]
#[command(name = "riftdrive-bench", version, about, long_about = None)]
struct Cli {
    /// Vehicle config as JSON; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Driving script
    #[arg(long, value_enum, default_value_t = Scenario::Launch)]
    scenario: Scenario,

    /// Simulated duration (s)
    #[arg(long, default_value_t = 5.0)]
    seconds: f32,

    /// Tick rate (Hz)
    #[arg(long, default_value_t = 60)]
    hz: u32,

    /// Print telemetry every N ticks; 0 prints only the summary
    #[arg(long, default_value_t = 30)]
    print_every: u32,
}

fn load_config(path: Option<&PathBuf>) -> Result<VehicleConfig> {
    let Some(path) = path else { return Ok(VehicleConfig::default()) };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let cfg: VehicleConfig = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if cli.hz == 0 {
        bail!("--hz must be > 0");
    }
    if !(cli.seconds.is_finite() && cli.seconds >= 0.0) {
        bail!("--seconds must be a finite, non-negative number");
    }

    let cfg = load_config(cli.config.as_ref())?;
    let mut car = VehicleDynamics::new(cfg).context("building vehicle")?;
    let ground = FlatGround::default();
    let dt = 1.0 / cli.hz as f32;
    let ticks = (cli.seconds * cli.hz as f32).round() as u32;
    info!(scenario = ?cli.scenario, ticks, dt, "starting run");

    let mut abs_engaged = 0u32;
    for i in 0..ticks {
        car.set_input(cli.scenario.input(i as f32 * dt));
        let out = ground.step(&mut car, dt).with_context(|| format!("tick {}", i + 1))?;
        abs_engaged += out
            .events
            .iter()
            .filter(|e| matches!(e, VehicleEvent::AssistEngaged(Assist::Abs)))
            .count() as u32;

        if cli.print_every != 0 && out.tick % cli.print_every as u64 == 0 {
            let t = out.telemetry;
            println!(
                "tick {:5}  v={:6.2}  fwd={:6.2}  yaw={:+.3}  latG={:+.3}  tcs={} esc={} abs={}  pos=({:+.1},{:+.1})",
                out.tick,
                t.speed,
                t.forward_speed,
                t.yaw_rate,
                t.lateral_g,
                t.tcs_active as u8,
                t.esc_active as u8,
                t.abs_active as u8,
                out.pose.pos.x,
                out.pose.pos.z,
            );
        }
    }

    let snap = car.snapshot();
    println!(
        "done: {} ticks, speed {:.2} m/s, abs cycles {} (fired {}, engaged {}x)",
        snap.tick,
        car.telemetry().speed,
        snap.abs_cycles,
        snap.abs_fired,
        abs_engaged
    );
    println!("schedule = {}", hex_digest(&VehicleDynamics::schedule_digest()));
    println!("final hash = {}", hex_digest(&car.state_hash()));
    car.dispose();
    Ok(())
}
