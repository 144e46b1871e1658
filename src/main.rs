//! Wire Breakout headless runner
//!
//! Plays a seeded level with a scripted paddle and logs what the sweep did.
//! Useful for reproducing stuck or capped configurations with custom tuning.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use env_logger::{Builder, Env};
    use log::LevelFilter;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use wire_breakout::Tuning;
    use wire_breakout::consts::*;
    use wire_breakout::sim::{GameState, SweepOutcome, TickInput, generate_level, tick};

    /// Run a headless Breakout session
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Level and input seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Number of fixed-timestep frames to simulate
        #[arg(short, long, default_value_t = 7200)]
        frames: u32,
        /// Brick rows
        #[arg(long, default_value_t = LEVEL_ROWS)]
        rows: u32,
        /// Brick columns
        #[arg(long, default_value_t = LEVEL_COLS)]
        cols: u32,
        /// Tuning JSON file (defaults are used if missing or invalid)
        #[arg(short, long)]
        tuning: Option<PathBuf>,
        /// Print the effective tuning as JSON and exit
        #[arg(long)]
        dump_tuning: bool,
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
        let _ = Builder::from_env(env).try_init();
    }

    pub fn run() -> Result<(), wire_breakout::ConfigError> {
        let args = Args::parse();
        init_logging(args.verbose);

        let tuning = args.tuning.as_ref().map(Tuning::load).unwrap_or_default();
        if args.dump_tuning {
            println!("{}", tuning.to_json()?);
            return Ok(());
        }

        log::info!("Wire Breakout (headless) seed {} for {} frames", args.seed, args.frames);
        let bricks = generate_level(args.seed, args.rows, args.cols);
        let mut state = GameState::with_bricks(args.seed, bricks).with_tuning(tuning);
        let mut rng = Pcg32::seed_from_u64(args.seed ^ 0x9e37_79b9_7f4a_7c15);

        let mut balls_lost = 0u32;
        let mut capped = 0u32;
        let mut input = TickInput::default();

        for frame in 0..args.frames {
            // Chase the ball, with some noise so runs differ per seed
            let aim = state.ball.pos.x + rng.random_range(-4.0f32..4.0);
            let offset = aim - state.paddle.position.x;
            input.move_left = offset < -1.0;
            input.move_right = offset > 1.0;
            input.launch = rng.random_bool(0.05);

            let events = tick(&mut state, &input, SIM_DT);
            if events.sweep == SweepOutcome::Capped {
                capped += 1;
            }
            if events.ball_lost {
                balls_lost += 1;
                log::info!("Frame {}: ball lost at {:?}", frame, state.ball.pos);
                state.reset_ball();
            }
            if events.level_cleared {
                log::info!("Frame {}: level cleared", frame);
                break;
            }
        }

        let stats = state.stats;
        log::info!(
            "Done after {} ticks: {} bricks broken, {} breakable left, {} balls lost",
            state.time_ticks,
            state.bricks_broken,
            state.breakable_remaining(),
            balls_lost
        );
        log::info!(
            "Sweep: {} steps, {} sub-sweeps, {} contacts, {} capped, {} paddle corrections",
            stats.steps,
            stats.sub_sweeps,
            stats.contacts,
            stats.capped_steps,
            stats.paddle_corrections
        );
        if capped > 0 {
            log::warn!("{} steps hit the sweep cap", capped);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only
}
