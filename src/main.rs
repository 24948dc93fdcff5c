//! Mini Runner entry point
//!
//! The browser build is a library (`MiniGameWidget`); natively this runs
//! the engine headless against a recording canvas.
//!
//! `MINI_RUNNER_TUNING` (JSON) and `MINI_RUNNER_QUALITY` (preset name)
//! override the defaults.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mini_runner::consts::SIM_DT;
    use mini_runner::renderer::DrawList;
    use mini_runner::{Engine, GameMode, QualityPreset, Settings, Tuning};

    env_logger::init();
    log::info!("Mini Runner (headless) starting...");

    // Same inputs a host page passes at mount time
    let tuning = Tuning::from_json_or_default(std::env::var("MINI_RUNNER_TUNING").ok().as_deref());
    let settings = match std::env::var("MINI_RUNNER_QUALITY") {
        Ok(name) => match QualityPreset::parse(&name) {
            Some(preset) => Settings::from_preset(preset),
            None => {
                log::warn!("Unknown quality preset {name:?}, using defaults");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };
    log::info!("Quality: {}", settings.quality.as_str());

    const SEED: u64 = 0x5eed;
    const DEMO_FRAMES: u32 = 600;
    const PLAY_FRAMES: u32 = 3600;
    const JUMP_EVERY: u32 = 45;

    let mut engine = Engine::with_tuning(SEED, tuning, settings);
    let mut canvas = DrawList::new();

    for _ in 0..DEMO_FRAMES {
        engine.frame(SIM_DT);
    }
    canvas.clear();
    engine.draw(&mut canvas);
    log::info!(
        "Demo: {} obstacles on screen, {} draw calls",
        engine.state().obstacles.len(),
        canvas.len()
    );

    engine.start();
    let mut frames = 0;
    while frames < PLAY_FRAMES && engine.mode() == GameMode::Playing {
        if frames % JUMP_EVERY == 0 {
            engine.jump();
        }
        engine.frame(SIM_DT);
        if let Some(change) = engine.take_change() {
            log::debug!("{change:?}");
        }
        frames += 1;
    }
    canvas.clear();
    engine.draw(&mut canvas);

    let snapshot = engine.snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(json) => log::info!("Played {frames} frames: {json}"),
        Err(e) => log::error!("Snapshot serialization failed: {e}"),
    }
    println!("{}", canvas.texts().join(" | "));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is MiniGameWidget::mount, this is just to satisfy the compiler
}
