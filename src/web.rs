//! Browser entry point: a canvas-bound animation driven by the page's
//! `requestAnimationFrame`.
//!
//! ```javascript
//! import init, { GridmorphCanvas, FrameResult, createRenderer }
//!     from './gridmorph.js';
//!
//! await init();
//! const anim = await new GridmorphCanvas(canvas, csvText, optionsJson);
//! async function step(now) {
//!     const result = anim.frame(now);
//!     if (result === FrameResult.ContextLost) {
//!         anim.restoreContext(await createRenderer(canvas, anim.capacity));
//!     }
//!     if (result !== FrameResult.Finished) requestAnimationFrame(step);
//! }
//! requestAnimationFrame(step);
//! ```

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::data::read_csv;
use crate::engine::{AnimationBuilder, AnimationEngine, FrameStatus};
use crate::error::GridmorphError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::GpuPointRenderer;
use crate::options::Options;

/// Install the console logger and panic hook.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized when the module is instantiated twice.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(e: &GridmorphError) -> JsError {
    JsError::new(&e.to_string())
}

fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    (canvas.width().max(1), canvas.height().max(1))
}

/// Outcome of [`GridmorphCanvas::frame`].
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// A frame was drawn.
    Drawn,
    /// The sequence ended; stop requesting frames.
    Finished,
    /// The WebGPU/WebGL context is gone; call `createRenderer` and
    /// `restoreContext`.
    ContextLost,
}

/// A GPU point renderer not yet attached to an animation.
#[wasm_bindgen]
pub struct PointRenderer {
    inner: GpuPointRenderer,
}

/// Create a renderer on `canvas` with room for `capacity` points.
///
/// # Errors
///
/// Fails if no GPU context can be created on the canvas.
#[wasm_bindgen(js_name = createRenderer)]
pub async fn create_renderer(
    canvas: HtmlCanvasElement,
    capacity: usize,
) -> Result<PointRenderer, JsError> {
    let size = canvas_size(&canvas);
    let target = wgpu::SurfaceTarget::Canvas(canvas);
    let context = RenderContext::new(target, size)
        .await
        .map_err(|e| js_error(&GridmorphError::from(e)))?;
    Ok(PointRenderer {
        inner: GpuPointRenderer::new(context, capacity),
    })
}

/// An animation bound to a canvas.
#[wasm_bindgen]
pub struct GridmorphCanvas {
    engine: AnimationEngine<GpuPointRenderer>,
}

#[wasm_bindgen]
impl GridmorphCanvas {
    /// Parse `records_csv` (`x,y,value` columns) and the optional JSON
    /// options, then set up the GPU context on `canvas`.
    ///
    /// # Errors
    ///
    /// Fails on malformed records or options, an invalid configuration,
    /// or when no GPU context can be created.
    #[wasm_bindgen(constructor)]
    pub async fn new(
        canvas: HtmlCanvasElement,
        records_csv: String,
        options_json: Option<String>,
    ) -> Result<GridmorphCanvas, JsError> {
        let records =
            read_csv(records_csv.as_bytes()).map_err(|e| js_error(&e))?;
        let options: Options = match options_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsError::new(&format!("options: {e}")))?,
            None => Options::default(),
        };
        log::info!("gridmorph: {} records", records.len());

        let size = canvas_size(&canvas);
        let engine = AnimationBuilder::new()
            .with_records(records)
            .with_options(options)
            .build_gpu(wgpu::SurfaceTarget::Canvas(canvas), size)
            .await
            .map_err(|e| js_error(&e))?;
        Ok(Self { engine })
    }

    /// Advance to `now` (the `requestAnimationFrame` timestamp) and draw.
    ///
    /// # Errors
    ///
    /// Fails if the frame could not be presented for a reason other than
    /// context loss.
    pub fn frame(&mut self, now: f64) -> Result<FrameResult, JsError> {
        match self.engine.frame(now) {
            Ok(FrameStatus::Drawn(_)) => Ok(FrameResult::Drawn),
            Ok(FrameStatus::Finished) => Ok(FrameResult::Finished),
            Err(GridmorphError::ContextLost) => Ok(FrameResult::ContextLost),
            Err(e) => Err(js_error(&e)),
        }
    }

    /// Attach a freshly created renderer after context loss.
    #[wasm_bindgen(js_name = restoreContext)]
    pub fn restore_context(&mut self, renderer: PointRenderer) {
        self.engine.restore_context(renderer.inner);
    }

    /// Points animated, for `createRenderer`.
    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> usize {
        self.engine.controller().points().len()
    }

    /// Match the canvas's new pixel size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }

    /// Whether the legend should be shown this frame.
    #[wasm_bindgen(js_name = showLegend)]
    pub fn show_legend(&self) -> bool {
        self.engine.overlay().legend
    }

    /// Whether the bin labels should be shown this frame.
    #[wasm_bindgen(js_name = showBinLabels)]
    pub fn show_bin_labels(&self) -> bool {
        self.engine.overlay().bin_labels
    }

    /// Legend as JSON: `{title, entries: [{threshold, color, label}]}`,
    /// entries highest class first. `color` is a CSS `rgb()` string.
    pub fn legend(&self) -> String {
        let entries: Vec<serde_json::Value> = self
            .engine
            .legend()
            .into_iter()
            .map(|entry| {
                serde_json::json!({
                    "threshold": entry.threshold,
                    "color": css_rgb(entry.color),
                    "label": entry.label,
                })
            })
            .collect();
        serde_json::json!({
            "title": self.engine.legend_title(),
            "entries": entries,
        })
        .to_string()
    }

    /// Bin labels as JSON: `[{value, count, x, y, text}]` in stage pixels.
    #[wasm_bindgen(js_name = binLabels)]
    pub fn bin_labels(&self) -> String {
        let labels: Vec<serde_json::Value> = self
            .engine
            .bin_labels()
            .into_iter()
            .map(|label| {
                serde_json::json!({
                    "value": label.value,
                    "count": label.count,
                    "x": label.position.x,
                    "y": label.position.y,
                    "text": label.text,
                })
            })
            .collect();
        serde_json::Value::Array(labels).to_string()
    }
}

fn css_rgb(color: [f32; 3]) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({r}, {g}, {b})")
}
