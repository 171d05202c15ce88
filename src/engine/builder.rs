use glam::Vec2;

use super::AnimationEngine;
use crate::animation::{
    AnimationController, Collaborators, EasingFunction, Hooks,
};
use crate::data::Record;
use crate::error::{ConfigError, GridmorphError};
use crate::gpu::render_context::RenderContext;
use crate::gpu::{GpuPointRenderer, PointSink};
use crate::layout::Bin;
use crate::options::Options;

/// Assembles an [`AnimationEngine`] from records, options and host
/// callbacks.
///
/// ```no_run
/// # use gridmorph::{AnimationBuilder, data::Record, options::Options};
/// # async fn run(
/// #     window: impl Into<wgpu::SurfaceTarget<'static>>,
/// # ) -> Result<(), gridmorph::GridmorphError> {
/// let engine = AnimationBuilder::new()
///     .with_records(vec![Record::new(0.0, 0.0, 12.0)])
///     .with_options(Options::default())
///     .build_gpu(window, (800, 600))
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Default)]
pub struct AnimationBuilder {
    records: Vec<Record>,
    options: Options,
    collaborators: Collaborators,
}

impl AnimationBuilder {
    /// Builder with default options and no records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records to animate.
    #[must_use]
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Set the options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Map record coordinates with `projection` instead of the configured
    /// projection mode. It must return stage pixels; the result is used
    /// as-is, without padding or fitting.
    #[must_use]
    pub fn with_projection(
        mut self,
        projection: impl Fn(f64, f64) -> Vec2 + 'static,
    ) -> Self {
        self.collaborators.projection = Some(Box::new(projection));
        self
    }

    /// Point set for the shape layout.
    #[must_use]
    pub fn with_shape(mut self, shape: Vec<[f64; 2]>) -> Self {
        self.collaborators.shape = shape;
        self
    }

    /// Lifecycle callbacks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.collaborators.hooks = hooks;
        self
    }

    /// Override legend labels. Receives the class index and the full
    /// threshold list.
    #[must_use]
    pub fn with_legend_formatter(
        mut self,
        formatter: impl Fn(usize, &[f64]) -> String + 'static,
    ) -> Self {
        self.collaborators.legend_formatter = Some(Box::new(formatter));
        self
    }

    /// Override histogram bin label text. Receives the bin being
    /// labelled.
    #[must_use]
    pub fn with_bin_label_formatter(
        mut self,
        formatter: impl Fn(&Bin) -> String + 'static,
    ) -> Self {
        self.collaborators.bin_label_formatter = Some(Box::new(formatter));
        self
    }

    /// Easing curve for every transition.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.collaborators.easing = easing;
        self
    }

    /// Fix the random seed so scatter and random layouts repeat.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.sequence.seed = Some(seed);
        self
    }

    /// Build just the controller, for hosts that draw points themselves.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the options are inconsistent with each
    /// other or with the records.
    pub fn build_controller(
        self,
        viewport: (u32, u32),
    ) -> Result<AnimationController, ConfigError> {
        let stage = self.options.stage.resolve_size(viewport);
        AnimationController::new(
            self.records,
            self.options,
            stage,
            self.collaborators,
        )
    }

    /// Build an engine drawing into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::Config`] as [`build_controller`].
    ///
    /// [`build_controller`]: Self::build_controller
    pub fn build<S: PointSink>(
        self,
        sink: S,
        viewport: (u32, u32),
    ) -> Result<AnimationEngine<S>, GridmorphError> {
        let controller = self.build_controller(viewport)?;
        Ok(AnimationEngine::new(controller, sink))
    }

    /// Create a GPU context on `target` and build an engine drawing into
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::Gpu`] if the context cannot be created,
    /// otherwise as [`build`](Self::build).
    pub async fn build_gpu(
        self,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<AnimationEngine<GpuPointRenderer>, GridmorphError> {
        let capacity = self.options.point_count(self.records.len());
        // Validate before touching the GPU.
        let controller = self.build_controller(size)?;
        let context = RenderContext::new(target, size).await?;
        let renderer = GpuPointRenderer::new(context, capacity);
        Ok(AnimationEngine::new(controller, renderer))
    }
}
