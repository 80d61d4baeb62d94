//! Prism Backdrop entry point
//!
//! In the browser this starts the animated background on `#bg3d`. Natively it
//! runs the scene headless on a recording surface and prints a JSON snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Another module on the page may already own the logger
    let _ = console_log::init_with_level(log::Level::Info);

    prism_backdrop::platform::web::start(prism_backdrop::consts::DEFAULT_CANVAS_ID)
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use prism_backdrop::platform::run_frames;
    use prism_backdrop::renderer::RecordingSurface;
    use prism_backdrop::{QualityPreset, Scene, SceneConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();

    // Usage: prism-backdrop [frames] [quality]
    let mut args = std::env::args().skip(1);
    let frames = args.next().and_then(|a| a.parse().ok()).unwrap_or(600);
    let quality = args
        .next()
        .and_then(|q| QualityPreset::from_str(&q))
        .unwrap_or_default();

    log::info!("Prism Backdrop (headless) - {} frames, {} quality", frames, quality.as_str());

    let mut scene = Scene::new(
        RecordingSurface::new(1280, 720),
        SceneConfig::from_preset(quality),
        Pcg32::seed_from_u64(0x5eed),
    );
    let stats = run_frames(&mut scene, frames);
    log::info!(
        "Last frame painted {} primitives",
        scene.surface().commands().len()
    );

    match serde_json::to_string_pretty(&scene.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Snapshot failed: {}", e),
    }

    if stats.failed > 0 {
        std::process::exit(1);
    }
}
