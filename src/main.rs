//! Horde Arena headless runner
//!
//! Runs a session in demo mode without a drawing surface and logs how it
//! went. Useful for checking tuning files and for soak-testing the sim.
//!
//! ```text
//! horde-arena [--seed N] [--ticks N] [--preset standard|damped] [--tuning file.json]
//! ```

use horde_arena::sim::{GameEvent, GameState, build_render_frame, demo_input, tick};
use horde_arena::{SimError, Tuning, TuningPreset};

/// Frames between progress log lines (10 seconds at 60 Hz)
const PROGRESS_EVERY: u64 = 600;
/// Demo autopilot fires every this many frames
const FIRE_EVERY: u64 = 12;

struct Options {
    seed: u64,
    ticks: u64,
    preset: TuningPreset,
    tuning_path: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            ticks: 60 * 60 * 5,
            preset: TuningPreset::Standard,
            tuning_path: None,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{name} needs a value"));
        match arg.as_str() {
            "--seed" => {
                opts.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("bad --seed: {e}"))?;
            }
            "--ticks" => {
                opts.ticks = value("--ticks")?
                    .parse()
                    .map_err(|e| format!("bad --ticks: {e}"))?;
            }
            "--preset" => {
                let name = value("--preset")?;
                opts.preset =
                    TuningPreset::from_str(&name).ok_or(format!("unknown preset `{name}`"))?;
            }
            "--tuning" => opts.tuning_path = Some(value("--tuning")?),
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(opts)
}

fn load_tuning(opts: &Options) -> Result<Tuning, SimError> {
    match &opts.tuning_path {
        Some(path) => Tuning::from_path(path),
        None => {
            let tuning = Tuning::from_preset(opts.preset);
            tuning.validate()?;
            Ok(tuning)
        }
    }
}

#[derive(Default)]
struct Tally {
    spawned: u32,
    skipped: u32,
    shot_down: u32,
    despawned: u32,
    hits_taken: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HostileSpawned { .. } => self.spawned += 1,
            GameEvent::SpawnSkipped => self.skipped += 1,
            GameEvent::HostileShot { .. } => self.shot_down += 1,
            GameEvent::HostileDespawned { .. } => self.despawned += 1,
            GameEvent::ActorHit { .. } => self.hits_taken += 1,
            _ => {}
        }
    }
}

fn run(opts: &Options) -> Result<(), SimError> {
    let tuning = load_tuning(opts)?;
    let mut state = GameState::with_tuning(opts.seed, tuning);
    let mut tally = Tally::default();

    log::info!(
        "Starting session: seed={} preset={} ticks={}",
        opts.seed,
        opts.preset.as_str(),
        opts.ticks
    );

    while state.frame < opts.ticks && !state.is_terminal() {
        let input = demo_input(&state, FIRE_EVERY);
        tick(&mut state, &input);
        for event in &state.events {
            tally.record(event);
        }

        if state.frame.is_multiple_of(PROGRESS_EVERY) {
            let view = build_render_frame(&state);
            log::info!(
                "frame {}: health={} hostiles={} projectiles={}",
                view.frame,
                view.actor.health,
                view.hostiles.len(),
                view.projectiles.len()
            );
        }
    }

    let outcome = if state.is_terminal() {
        "actor down"
    } else {
        "survived"
    };
    println!("Outcome: {outcome} after {} frames", state.frame);
    println!("  health:     {}", state.actor.health);
    println!("  spawned:    {} ({} skipped)", tally.spawned, tally.skipped);
    println!("  shot hits:  {}", tally.shot_down);
    println!("  despawned:  {}", tally.despawned);
    println!("  hits taken: {}", tally.hits_taken);
    Ok(())
}

fn main() {
    env_logger::init();

    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!(
                "usage: horde-arena [--seed N] [--ticks N] [--preset standard|damped] [--tuning file.json]"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&opts) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
