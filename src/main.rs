//! Jet Strike headless driver
//!
//! Runs the simulation in demo mode at a fixed 60 Hz and prints the final
//! frame as JSON. Usage: `jet-strike [seed|-] [tuning.json|-] [low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
use jet_strike::sim::{FrameInput, Session, SessionPhase};
#[cfg(not(target_arch = "wasm32"))]
use jet_strike::{QualityPreset, Settings, Tuning};

/// Simulated duration of the demo run
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: u32 = 120;
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Jet Strike (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().filter(|s| s.as_str() != "-").map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => Some(seed),
        Some(Err(e)) => {
            log::warn!("Ignoring bad seed argument: {}", e);
            None
        }
        None => None,
    };
    let tuning = args
        .next()
        .filter(|s| s.as_str() != "-")
        .map(|path| load_tuning(&path))
        .unwrap_or_default();
    let quality = match args.next() {
        Some(name) => QualityPreset::parse(&name).unwrap_or_else(|| {
            log::warn!("Unknown quality preset {:?}, using Medium", name);
            QualityPreset::default()
        }),
        None => QualityPreset::default(),
    };
    let settings = Settings::from_preset(quality);

    let mut session = match seed {
        Some(seed) => Session::with_config(seed, tuning, settings),
        None => Session::from_entropy(tuning, settings),
    };
    let input = FrameInput {
        autopilot: true,
        ..Default::default()
    };

    let mut games = 0;
    let mut last_phase = session.phase;
    for frame in 0..DEMO_SECONDS * 60 {
        session.update(FRAME_DT, &input);

        if session.phase != last_phase {
            if session.phase == SessionPhase::GameOver {
                games += 1;
            }
            last_phase = session.phase;
        }
        if frame % 600 == 0 {
            let hud = session.hud();
            log::info!(
                "t={:.0}s score={} level={} lives={} hp={} kills={}",
                session.elapsed,
                hud.score,
                hud.level,
                hud.lives,
                hud.health,
                hud.kills
            );
        }
    }

    log::info!(
        "Finished: {} game(s) over, high score {}",
        games,
        session.hud().high_score
    );
    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Tuning {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Could not read {}: {}, using defaults", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&text) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Invalid tuning in {}: {}, using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
