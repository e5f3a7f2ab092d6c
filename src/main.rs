//! Trash Arcade entry point
//!
//! Headless native driver: runs one of the simulations with the built-in
//! autopilot and prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::{Parser, ValueEnum};
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    use trash_arcade::sim::{CatchSimulation, GameEvent, GamePhase, Simulation, StackSimulation};
    use trash_arcade::{CatchTuning, StackTuning};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum Mode {
        Deluxe,
        Classic,
        Stack,
    }

    /// Run a raccoon arcade game headlessly
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Which game to run
        #[arg(short, long, value_enum, default_value_t = Mode::Deluxe)]
        mode: Mode,

        /// RNG seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stop after this many frames even if the run is still going
        #[arg(short, long, default_value_t = 36_000)]
        frames: u32,

        /// Simulated frame duration in milliseconds
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f32,

        /// Tuning JSON laid over the mode's preset
        #[arg(short, long)]
        tuning: Option<PathBuf>,

        /// Leave the avatar where it is instead of steering with the autopilot
        #[arg(long)]
        manual: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let env = Env::default().default_filter_or(level.to_string());
        // Only fails if a logger is already installed
        let _ = Builder::from_env(env).try_init();
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        init_logging(args.verbose);

        let seed = args.seed.unwrap_or_else(time_seed);
        log::info!("Trash Arcade ({:?}) starting with seed {}", args.mode, seed);

        match args.mode {
            Mode::Deluxe | Mode::Classic => {
                let preset = if args.mode == Mode::Classic {
                    CatchTuning::classic()
                } else {
                    CatchTuning::deluxe()
                };
                let tuning = match &args.tuning {
                    Some(path) => CatchTuning::load_over(&preset, path)
                        .with_context(|| format!("loading catch tuning from {}", path.display()))?,
                    None => preset,
                };
                drive(CatchSimulation::with_seed(tuning, seed), &args)
            }
            Mode::Stack => {
                let tuning = match &args.tuning {
                    Some(path) => StackTuning::load(path)
                        .with_context(|| format!("loading stack tuning from {}", path.display()))?,
                    None => StackTuning::default(),
                };
                drive(StackSimulation::with_seed(tuning, seed), &args)
            }
        }
    }

    fn drive<S: Simulation>(mut sim: S, args: &Args) -> Result<()> {
        let mut frames = 0;
        while frames < args.frames && sim.phase() == GamePhase::Running {
            if !args.manual {
                if let Some(x) = sim.autopilot_target() {
                    sim.set_target_x(x);
                }
            }
            sim.update(args.frame_ms);
            frames += 1;

            for event in sim.drain_events() {
                log_event(&event);
            }
        }
        log::info!("Stopped after {} frames ({:?})", frames, sim.phase());

        let json = serde_json::to_string_pretty(&sim.snapshot()).context("serializing snapshot")?;
        println!("{json}");
        Ok(())
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::ItemCaught { id, kind, points } => {
                log::debug!("Caught #{} {:?} (+{})", id, kind, points)
            }
            GameEvent::ItemMissed { id, life_lost, .. } => {
                log::debug!("Missed #{} (life lost: {})", id, life_lost)
            }
            GameEvent::ItemLanded { stack_len, .. } => log::debug!("Stack is {} tall", stack_len),
            GameEvent::LevelUp { .. } | GameEvent::ModifierStarted(_) | GameEvent::ModifierExpired(_) => {}
            GameEvent::GameOver(stats) => {
                log::info!(
                    "Final score {} ({} caught, {} missed, {:.1}s)",
                    stats.final_score,
                    stats.items_caught,
                    stats.items_missed,
                    stats.elapsed_ms / 1000.0
                );
                if let Some(rank) = stats.rank {
                    log::info!("High score #{}", rank);
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the wasm surface; nothing to run here
}
