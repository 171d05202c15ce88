//! Standalone animation window backed by winit.
//!
//! ```no_run
//! # use gridmorph::{Viewer, data::Record};
//! Viewer::builder()
//!     .with_records(vec![Record::new(0.0, 0.0, 12.0)])
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    data::Record,
    engine::{AnimationBuilder, AnimationEngine, FrameStatus},
    error::GridmorphError,
    gpu::{render_context::RenderContext, GpuPointRenderer},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    records: Vec<Record>,
    options: Option<Options>,
    shape: Vec<[f64; 2]>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Gridmorph", no
    /// records, default options).
    fn new() -> Self {
        Self {
            records: Vec::new(),
            options: None,
            shape: Vec::new(),
            title: "Gridmorph".into(),
        }
    }

    /// Set the records to animate.
    #[must_use]
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Point set for the shape layout.
    #[must_use]
    pub fn with_shape(mut self, shape: Vec<[f64; 2]>) -> Self {
        self.shape = shape;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            records: self.records,
            options: self.options,
            shape: self.shape,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that plays one animation.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    records: Vec<Record>,
    options: Option<Options>,
    shape: Vec<[f64; 2]>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::Viewer`] if the event loop cannot start.
    /// Engine construction errors are logged and close the window.
    pub fn run(self) -> Result<(), GridmorphError> {
        let event_loop = EventLoop::new()
            .map_err(|e| GridmorphError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            started: Instant::now(),
            pending: Some(self),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GridmorphError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<AnimationEngine<GpuPointRenderer>>,
    started: Instant,
    /// Inputs not yet handed to the engine.
    pending: Option<Viewer>,
}

/// Compute the wgpu surface size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Build a new GPU context once the engine has dropped the lost one.
    fn rebuild_context(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };
        let size = viewport_size(window.inner_size());
        match pollster::block_on(RenderContext::new(window.clone(), size)) {
            Ok(context) => {
                let capacity = engine.controller().points().len();
                let renderer = GpuPointRenderer::new(context, capacity);
                engine.restore_context(renderer);
            }
            Err(e) => log::error!("Failed to rebuild render context: {e}"),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now_ms();
        let Some(engine) = &mut self.engine else {
            return;
        };
        match engine.frame(now) {
            Ok(FrameStatus::Drawn(_)) => {
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            Ok(FrameStatus::Finished) => {
                // Nothing left to draw; keep the window until closed.
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            Err(GridmorphError::ContextLost) => {
                log::info!("rebuilding render context");
                self.rebuild_context();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            Err(e) => {
                log::error!("render error: {e}");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(viewer) = self.pending.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(&viewer.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let mut builder = AnimationBuilder::new()
            .with_records(viewer.records)
            .with_shape(viewer.shape);
        if let Some(options) = viewer.options {
            builder = builder.with_options(options);
        }

        let engine =
            match pollster::block_on(builder.build_gpu(window.clone(), size)) {
                Ok(e) => e,
                Err(e) => {
                    log::error!("Failed to initialize engine: {e}");
                    event_loop.exit();
                    return;
                }
            };

        window.request_redraw();
        self.started = Instant::now();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}
