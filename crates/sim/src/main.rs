//! Fight replay entry point.
//!
//! Run with: `cargo run -p rotation-sim -- --duration-secs 120 --disable wildfire`
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rotation_core::Category;
use rotation_sim::{SimConfig, Simulation};

/// Replay a simulated fight against the rotation engine
#[derive(Parser, Debug)]
#[command(name = "rotation-sim")]
#[command(about = "Replay a simulated fight against the rotation engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Milliseconds between engine ticks (overrides SIM_TICK_MS)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Fight length in seconds (overrides SIM_DURATION_SECS)
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Skip the scripted opener
    #[arg(long)]
    no_opener: bool,

    /// Kill the target after this many seconds
    #[arg(long)]
    target_lifetime_secs: Option<u64>,

    /// Categories to switch off, comma separated (e.g. `drill,wildfire`)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<Category>,
}

impl Cli {
    fn apply(self, mut config: SimConfig) -> SimConfig {
        if let Some(millis) = self.tick_ms {
            config.tick = Duration::from_millis(millis);
        }
        if let Some(secs) = self.duration_secs {
            config.duration = Duration::from_secs(secs);
        }
        if self.no_opener {
            config.use_opener = false;
        }
        if let Some(secs) = self.target_lifetime_secs {
            config.target_lifetime = Some(Duration::from_secs(secs));
        }
        config.disabled.extend(self.disable);
        config
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SIM_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().apply(SimConfig::from_env());
    tracing::info!(
        tick_ms = config.tick.as_millis() as u64,
        duration_secs = config.duration.as_secs(),
        opener = config.use_opener,
        disabled = ?config.disabled,
        "starting simulation"
    );

    let report = Simulation::new(config)?.run();
    print!("{report}");
    Ok(())
}
