//! The layout sequence driver.
//!
//! [`AnimationController`] owns the points and records for one animation
//! and is the only place that calls both a layout and the scheduler. It
//! knows nothing about the GPU: each [`tick`](AnimationController::tick)
//! returns a [`Frame`] saying what to draw and whether the point
//! attributes changed.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::easing::EasingFunction;
use super::hooks::{HookContext, Hooks};
use super::overlay::{
    self, BinLabel, BinLabelFormatter, LegendEntry, LegendFormatter,
    OverlayVisibility,
};
use super::point::{fill_vertices, Point, PointVertex};
use super::scheduler::{
    FrameUniforms, Interpolator, Phase, RenderScheduler, TransitionTiming,
};
use crate::classify::ClassScheme;
use crate::data::Record;
use crate::error::ConfigError;
use crate::layout::decorative::RandomLayout;
use crate::layout::{
    Arrangement, Layout, LayoutContext, LayoutKind, ProjectionFn,
};
use crate::options::Options;

/// Non-serializable pieces supplied by the host.
#[derive(Default)]
pub struct Collaborators {
    /// Coordinate mapper replacing the built-in projections.
    pub projection: Option<Box<ProjectionFn>>,
    /// Point set for the shape layout.
    pub shape: Vec<[f64; 2]>,
    /// Lifecycle callbacks.
    pub hooks: Hooks,
    /// Legend text override.
    pub legend_formatter: Option<Box<LegendFormatter>>,
    /// Bin label text override.
    pub bin_label_formatter: Option<Box<BinLabelFormatter>>,
    /// Easing curve for every transition.
    pub easing: EasingFunction,
}

/// What the host should draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Uniform block for this frame.
    pub uniforms: FrameUniforms,
    /// A transition began: point attributes must be re-uploaded.
    pub upload: bool,
    /// Transition phase.
    pub phase: Phase,
    /// Overlays to show.
    pub overlay: OverlayVisibility,
}

/// Drives points through the configured layout sequence.
pub struct AnimationController {
    records: Vec<Record>,
    points: Vec<Point>,
    sequence: Vec<LayoutKind>,
    layouts: Vec<Box<dyn Layout>>,
    /// Position of the first cycling layout (1 when an intro is set).
    cycle_start: usize,
    current: usize,
    loops_completed: u32,
    options: Options,
    scheme: ClassScheme,
    rng: StdRng,
    /// Stage the active transition was laid out on.
    stage: (f32, f32),
    /// Resize waiting for the next transition.
    next_stage: Option<(f32, f32)>,
    collaborators: Collaborators,
    scheduler: RenderScheduler,
    interpolator: Interpolator,
    arrangement: Arrangement,
    upload_pending: bool,
    initialized: bool,
    finished: bool,
}

impl AnimationController {
    /// Validate the configuration, scatter the points, and begin the first
    /// transition.
    ///
    /// `stage` is the resolved stage size in pixels. Only the first
    /// `options.stage.num_points` records are animated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the options are inconsistent with each
    /// other or with the data.
    pub fn new(
        mut records: Vec<Record>,
        options: Options,
        stage: (f32, f32),
        collaborators: Collaborators,
    ) -> Result<Self, ConfigError> {
        let scheme = options.validate(records.len())?;
        if !(stage.0 > 0.0 && stage.1 > 0.0) {
            return Err(ConfigError::InvalidStage {
                width: stage.0,
                height: stage.1,
            });
        }

        let sequence: Vec<LayoutKind> = options
            .sequence
            .initial_animation
            .into_iter()
            .chain(options.sequence.layouts.iter().copied())
            .collect();
        if sequence.contains(&LayoutKind::Shape)
            && collaborators.shape.is_empty()
        {
            return Err(ConfigError::MissingShape);
        }

        records.truncate(options.point_count(records.len()));
        let points = records
            .iter()
            .map(|r| Point::classified(scheme.classify(r.value)))
            .collect();

        let seed = options.sequence.seed.unwrap_or_else(rand::random);
        log::debug!(
            "controller: {} points, sequence {:?}, seed {seed}",
            records.len(),
            sequence
        );

        let timing = TransitionTiming::new(
            options.timing.duration_ms,
            options.timing.stagger_ms,
            records.len(),
            options.timing.delay_at_end.for_layout(0),
        );
        let mut controller = Self {
            records,
            points,
            layouts: sequence.iter().map(|k| k.build()).collect(),
            cycle_start: usize::from(
                options.sequence.initial_animation.is_some(),
            ),
            sequence,
            current: 0,
            loops_completed: 0,
            options,
            scheme,
            rng: StdRng::seed_from_u64(seed),
            stage,
            next_stage: None,
            interpolator: Interpolator {
                timing,
                easing: collaborators.easing,
            },
            collaborators,
            scheduler: RenderScheduler::new(),
            arrangement: Arrangement::default(),
            upload_pending: false,
            initialized: false,
            finished: false,
        };
        controller.scatter();
        controller.begin_transition(0);
        Ok(controller)
    }

    /// Random starting positions, already settled.
    fn scatter(&mut self) {
        let mut ctx = LayoutContext {
            width: self.stage.0,
            height: self.stage.1,
            options: &self.options,
            scheme: &self.scheme,
            projection: None,
            shape: &[],
            rng: &mut self.rng,
        };
        let _ = RandomLayout.arrange(&mut self.points, &self.records, &mut ctx);
        for point in &mut self.points {
            point.commit_layout();
            point.snapshot_start();
        }
    }

    /// Start the transition into layout `index` of the sequence.
    fn begin_transition(&mut self, index: usize) {
        self.scheduler.cancel();
        self.current = index;
        if let Some(stage) = self.next_stage.take() {
            log::debug!("stage resized to {}x{}", stage.0, stage.1);
            self.stage = stage;
        }

        for point in &mut self.points {
            point.snapshot_start();
        }
        let mut ctx = LayoutContext {
            width: self.stage.0,
            height: self.stage.1,
            options: &self.options,
            scheme: &self.scheme,
            projection: self.collaborators.projection.as_deref(),
            shape: &self.collaborators.shape,
            rng: &mut self.rng,
        };
        self.arrangement = self.layouts[index].arrange(
            &mut self.points,
            &self.records,
            &mut ctx,
        );
        for point in &mut self.points {
            point.commit_layout();
        }

        let timing = TransitionTiming::new(
            self.options.timing.duration_ms,
            self.options.timing.stagger_ms,
            self.points.len(),
            self.options.timing.delay_at_end.for_layout(index),
        );
        self.interpolator.timing = timing;
        self.scheduler.subscribe(timing);
        self.upload_pending = true;
        log::debug!(
            "transition {index} -> {} ({:.0} ms + {:.0} ms hold)",
            self.layouts[index].name(),
            timing.max_duration(),
            timing.delay_at_end_ms
        );
    }

    /// Advance to `now_ms` (host frame timestamp).
    ///
    /// Returns `None` once the loop limit has been reached; the end hook
    /// has fired by then and nothing further will be drawn.
    pub fn tick(&mut self, now_ms: f64) -> Option<Frame> {
        if self.finished {
            return None;
        }
        let mut state = self.scheduler.frame(now_ms)?;

        if !self.initialized {
            self.initialized = true;
            let ctx = self.hook_context(state.elapsed);
            self.collaborators.hooks.fire_init(&ctx);
        }

        if state.phase == Phase::Complete {
            self.scheduler.cancel();
            let ctx = self.hook_context(state.elapsed);
            self.collaborators.hooks.fire_transition(&ctx);

            let mut next = self.current + 1;
            if next >= self.layouts.len() {
                next = self.cycle_start;
                self.loops_completed += 1;
                log::debug!("loop {} complete", self.loops_completed);
                if self
                    .options
                    .timing
                    .loops
                    .is_some_and(|limit| self.loops_completed >= limit)
                {
                    self.finish(state.elapsed);
                    return None;
                }
            }
            self.begin_transition(next);
            state = self.scheduler.frame(now_ms)?;
        }

        let ctx = self.hook_context(state.elapsed);
        self.collaborators.hooks.fire_frame(&ctx);

        let frame = Frame {
            uniforms: FrameUniforms::new(
                self.stage,
                self.options.stage.point_width,
                &self.interpolator,
                state.elapsed,
            ),
            upload: std::mem::take(&mut self.upload_pending),
            phase: state.phase,
            overlay: self.overlay_at(state.elapsed),
        };
        Some(frame)
    }

    fn finish(&mut self, elapsed: f64) {
        self.finished = true;
        log::info!(
            "animation finished after {} loops",
            self.loops_completed
        );
        let ctx = self.hook_context(elapsed);
        self.collaborators.hooks.fire_end(&ctx);
    }

    fn hook_context(&self, elapsed_ms: f64) -> HookContext {
        HookContext {
            layout_index: self.current,
            layout_name: self.layouts[self.current].name(),
            loops_completed: self.loops_completed,
            elapsed_ms,
        }
    }

    fn overlay_at(&self, elapsed: f64) -> OverlayVisibility {
        let arrived = elapsed >= self.options.timing.duration_ms;
        let kind = self.sequence[self.current];
        OverlayVisibility {
            legend: arrived
                && self.options.legend.enabled
                && kind == LayoutKind::Map,
            bin_labels: arrived
                && self.options.bars.labels
                && kind == LayoutKind::Bars,
        }
    }

    /// Force the next frame to report `upload`, e.g. after the GPU context
    /// was rebuilt.
    pub fn request_upload(&mut self) {
        self.upload_pending = true;
    }

    /// Write the current point attributes into `out`.
    pub fn fill_vertices(&self, out: &mut Vec<PointVertex>) {
        fill_vertices(&self.points, out);
    }

    /// Change the stage size. Takes effect at the next transition; until
    /// then frames keep the stage the current targets were laid out on.
    pub fn set_stage_size(&mut self, stage: (f32, f32)) {
        if stage.0 > 0.0 && stage.1 > 0.0 {
            self.next_stage = Some(stage);
        }
    }

    /// Stage size of the active transition, in pixels.
    #[must_use]
    pub fn stage_size(&self) -> (f32, f32) {
        self.stage
    }

    /// Stage size the next transition will use.
    #[must_use]
    pub fn next_stage_size(&self) -> (f32, f32) {
        self.next_stage.unwrap_or(self.stage)
    }

    /// Points, in record order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Animated records.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Options in use.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parsed class scheme.
    #[must_use]
    pub fn scheme(&self) -> &ClassScheme {
        &self.scheme
    }

    /// Full layout sequence, intro first.
    #[must_use]
    pub fn sequence(&self) -> &[LayoutKind] {
        &self.sequence
    }

    /// Position of the active layout in [`sequence`](Self::sequence).
    #[must_use]
    pub fn current_layout(&self) -> usize {
        self.current
    }

    /// Completed passes through the cycling layouts.
    #[must_use]
    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    /// Whether the loop limit has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Interpolation parameters of the active transition.
    #[must_use]
    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    /// Side products of the last layout pass.
    #[must_use]
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Legend rows, highest class first.
    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        overlay::legend_entries(
            &self.scheme,
            self.collaborators.legend_formatter.as_deref(),
        )
    }

    /// Heading shown above the legend rows.
    #[must_use]
    pub fn legend_title(&self) -> &str {
        &self.options.legend.title
    }

    /// Labels for the bins of the last bars pass.
    #[must_use]
    pub fn bin_labels(&self) -> Vec<BinLabel> {
        overlay::bin_labels(
            &self.arrangement.bins,
            &self.options.bars,
            self.collaborators.bin_label_formatter.as_deref(),
        )
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("points", &self.points.len())
            .field("sequence", &self.sequence)
            .field("current", &self.current)
            .field("loops_completed", &self.loops_completed)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
