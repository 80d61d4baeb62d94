//! Browser driver
//!
//! Finds the backdrop canvas, sizes it to the viewport, and runs the scene
//! from requestAnimationFrame until the page goes away. A missing canvas or
//! 2d context is a silent no-op.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::LoopStats;
use crate::renderer::CanvasSurface;
use crate::scene::Scene;
use crate::settings::SceneConfig;

/// Scene plus the running frame counts of this page
struct Backdrop {
    scene: Scene<CanvasSurface, Pcg32>,
    stats: LoopStats,
}

/// Attribute on the canvas holding optional JSON scene configuration
const CONFIG_ATTRIBUTE: &str = "data-scene";

/// Start the backdrop on the canvas with the given element id
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let Some(canvas) = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::debug!("No canvas #{}; backdrop disabled", canvas_id);
        return Ok(());
    };

    let config = load_config(&canvas);
    let Some(mut surface) = CanvasSurface::new(canvas) else {
        log::debug!("Canvas #{} has no 2d context; backdrop disabled", canvas_id);
        return Ok(());
    };
    let (width, height) = viewport_size(&window);
    crate::renderer::Surface::resize(&mut surface, width, height);

    let seed = js_sys::Date::now() as u64;
    log::info!("Backdrop starting with seed {}", seed);
    let backdrop = Rc::new(RefCell::new(Backdrop {
        scene: Scene::new(surface, config, Pcg32::seed_from_u64(seed)),
        stats: LoopStats::default(),
    }));

    setup_resize_handler(&window, backdrop.clone())?;
    request_animation_frame(backdrop);
    Ok(())
}

fn load_config(canvas: &HtmlCanvasElement) -> SceneConfig {
    let Some(json) = canvas.get_attribute(CONFIG_ATTRIBUTE) else {
        return SceneConfig::default();
    };
    match SceneConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded scene config ({} quality)", config.quality.as_str());
            config
        }
        Err(e) => {
            log::warn!("Ignoring invalid {}: {}", CONFIG_ATTRIBUTE, e);
            SceneConfig::default()
        }
    }
}

fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn setup_resize_handler(
    window: &web_sys::Window,
    backdrop: Rc<RefCell<Backdrop>>,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = viewport_size(&window);
        // Resize lands between frames: rAF callbacks and events never overlap
        if let Ok(mut backdrop) = backdrop.try_borrow_mut() {
            backdrop.scene.on_resize(width, height);
        }
    });
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn request_animation_frame(backdrop: Rc<RefCell<Backdrop>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        frame_loop(backdrop);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn frame_loop(backdrop: Rc<RefCell<Backdrop>>) {
    // Schedule first so a trap inside `step` cannot end the loop
    request_animation_frame(backdrop.clone());

    // A frame that trapped mid-step leaves the cell borrowed; later frames skip
    let Ok(mut b) = backdrop.try_borrow_mut() else {
        return;
    };
    let result = b.scene.step();
    b.stats.record(result);
}
