//! The host-facing engine: an [`AnimationController`] wired to a
//! [`PointSink`].
//!
//! # Frame loop
//!
//! Call [`frame`](AnimationEngine::frame) from the host's frame callback
//! with its timestamp in milliseconds. Call
//! [`resize`](AnimationEngine::resize) when the render target changes
//! size.
//!
//! # Context loss
//!
//! When the sink reports loss, `frame` drops it and returns
//! [`GridmorphError::ContextLost`], and keeps returning it until the host
//! passes a new sink to
//! [`restore_context`](AnimationEngine::restore_context). The old sink is
//! gone before the host builds the new one, so a window surface is never
//! configured twice. The animation resumes where it was, re-uploading its
//! points on the next frame.

mod builder;

pub use builder::AnimationBuilder;

use crate::animation::{
    AnimationController, BinLabel, Frame, LegendEntry, OverlayVisibility,
    PointVertex,
};
use crate::error::GridmorphError;
use crate::gpu::PointSink;
use crate::util::frame_timing::FrameTiming;

/// Result of one [`AnimationEngine::frame`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// A frame was drawn.
    Drawn(Frame),
    /// The loop limit was reached; the sink has been released.
    Finished,
}

/// Controller plus point sink, driven one frame at a time.
pub struct AnimationEngine<S: PointSink> {
    controller: AnimationController,
    sink: Option<S>,
    /// Set when the sink reported loss, cleared by `restore_context`.
    lost: bool,
    /// Reused upload staging.
    vertices: Vec<PointVertex>,
    overlay: OverlayVisibility,
    frame_timing: FrameTiming,
}

impl<S: PointSink> AnimationEngine<S> {
    /// Wire `controller` to `sink`. Prefer [`AnimationBuilder`].
    pub fn new(controller: AnimationController, sink: S) -> Self {
        let vertices = Vec::with_capacity(controller.points().len());
        Self {
            controller,
            sink: Some(sink),
            lost: false,
            vertices,
            overlay: OverlayVisibility::default(),
            frame_timing: FrameTiming::new(),
        }
    }

    /// Advance the animation to `now_ms` and draw it.
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::ContextLost`] once the sink's context is
    /// gone and until [`restore_context`](Self::restore_context) is called,
    /// or the sink's own draw error.
    pub fn frame(
        &mut self,
        now_ms: f64,
    ) -> Result<FrameStatus, GridmorphError> {
        let Some(sink) = self.sink.as_mut() else {
            return if self.lost {
                Err(GridmorphError::ContextLost)
            } else {
                Ok(FrameStatus::Finished)
            };
        };
        if sink.is_lost() {
            log::warn!("render context lost, releasing the sink");
            self.sink = None;
            self.lost = true;
            return Err(GridmorphError::ContextLost);
        }

        let Some(frame) = self.controller.tick(now_ms) else {
            log::info!("sequence finished, releasing GPU resources");
            self.sink = None;
            self.overlay = OverlayVisibility::default();
            return Ok(FrameStatus::Finished);
        };

        if frame.upload {
            self.controller.fill_vertices(&mut self.vertices);
            sink.upload(&self.vertices);
        }
        sink.draw(
            &frame.uniforms,
            self.controller.options().stage.background_color,
        )?;
        self.overlay = frame.overlay;

        if let Some(fps) = self.frame_timing.tick(now_ms) {
            log::debug!("{fps:.1} fps");
        }
        Ok(FrameStatus::Drawn(frame))
    }

    /// Resize the render target. Without a fixed stage size in the options
    /// the stage follows, from the next transition on.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.resize(width, height);
        }
        let stage =
            self.controller.options().stage.resolve_size((width, height));
        self.controller.set_stage_size(stage);
    }

    /// Replace a lost sink. Points are re-uploaded on the next frame; the
    /// sequence position, clock and loop count are kept.
    pub fn restore_context(&mut self, sink: S) {
        if self.controller.is_finished() {
            return;
        }
        log::info!("render context restored");
        self.sink = Some(sink);
        self.lost = false;
        self.controller.request_upload();
    }

    /// The layout sequence driver.
    #[must_use]
    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    /// The sink, until the sequence finishes or its context is lost.
    #[must_use]
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Whether a lost sink is waiting for
    /// [`restore_context`](Self::restore_context).
    #[must_use]
    pub fn is_context_lost(&self) -> bool {
        self.lost
    }

    /// Whether the loop limit has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.controller.is_finished()
    }

    /// Overlays to show, as of the last frame.
    #[must_use]
    pub fn overlay(&self) -> OverlayVisibility {
        self.overlay
    }

    /// Legend rows, highest class first.
    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.controller.legend()
    }

    /// Heading for the legend.
    #[must_use]
    pub fn legend_title(&self) -> &str {
        self.controller.legend_title()
    }

    /// Labels for the current histogram bins.
    #[must_use]
    pub fn bin_labels(&self) -> Vec<BinLabel> {
        self.controller.bin_labels()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::animation::FrameUniforms;
    use crate::data::Record;
    use crate::options::Options;

    #[derive(Debug, Default)]
    struct Calls {
        uploads: Vec<usize>,
        draws: Vec<(f32, [f32; 4])>,
        resizes: Vec<(u32, u32)>,
    }

    /// Sink that records what it is asked to do.
    #[derive(Clone, Default)]
    struct RecordingSink {
        calls: Rc<RefCell<Calls>>,
        lost: Rc<RefCell<bool>>,
    }

    impl RecordingSink {
        /// Clones alive, the test's own handle included.
        fn holders(&self) -> usize {
            Rc::strong_count(&self.calls)
        }
    }

    impl PointSink for RecordingSink {
        fn upload(&mut self, vertices: &[PointVertex]) {
            self.calls.borrow_mut().uploads.push(vertices.len());
        }

        fn draw(
            &mut self,
            uniforms: &FrameUniforms,
            clear: [f32; 4],
        ) -> Result<(), GridmorphError> {
            self.calls.borrow_mut().draws.push((uniforms.elapsed, clear));
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.calls.borrow_mut().resizes.push((width, height));
        }

        fn is_lost(&self) -> bool {
            *self.lost.borrow()
        }
    }

    fn records() -> Vec<Record> {
        (0..20)
            .map(|i| {
                let i = f64::from(i);
                Record::new(i % 5.0, (i / 5.0).floor(), i * 700.0)
            })
            .collect()
    }

    fn options() -> Options {
        let mut options = Options::default();
        options.timing.duration_ms = 100.0;
        options.timing.stagger_ms = 20.0;
        options.timing.delay_at_end = 30.0.into();
        options.sequence.seed = Some(11);
        options
    }

    /// 100 + 20 + 30.
    const END: f64 = 150.0;

    fn engine(
        options: Options,
    ) -> (AnimationEngine<RecordingSink>, RecordingSink) {
        let sink = RecordingSink::default();
        let engine = AnimationBuilder::new()
            .with_records(records())
            .with_options(options)
            .build(sink.clone(), (800, 600))
            .unwrap();
        (engine, sink)
    }

    #[test]
    fn uploads_once_per_transition() {
        let (mut engine, sink) = engine(options());
        for t in [0.0, 16.0, 32.0, 100.0] {
            let _ = engine.frame(t).unwrap();
        }
        assert_eq!(sink.calls.borrow().uploads, vec![20]);
        assert_eq!(sink.calls.borrow().draws.len(), 4);

        let _ = engine.frame(END + 1.0).unwrap();
        assert_eq!(sink.calls.borrow().uploads, vec![20, 20]);
    }

    #[test]
    fn clears_with_background_color() {
        let mut options = options();
        options.stage.background_color = [0.0, 0.0, 0.0, 1.0];
        let (mut engine, sink) = engine(options);
        let _ = engine.frame(0.0).unwrap();
        assert_eq!(sink.calls.borrow().draws[0].1, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn finishing_releases_the_sink() {
        let mut options = options();
        options.timing.loops = Some(1);
        let (mut engine, _sink) = engine(options);
        assert!(matches!(engine.frame(0.0), Ok(FrameStatus::Drawn(_))));
        assert!(matches!(engine.frame(END + 1.0), Ok(FrameStatus::Drawn(_))));
        assert!(matches!(
            engine.frame(2.0 * END + 2.0),
            Ok(FrameStatus::Finished)
        ));
        assert!(engine.sink().is_none());
        assert!(engine.is_finished());
        assert!(matches!(engine.frame(1e6), Ok(FrameStatus::Finished)));
    }

    #[test]
    fn context_loss_and_restore_keep_state() {
        let (mut engine, sink) = engine(options());
        let _ = engine.frame(0.0).unwrap();
        let _ = engine.frame(END + 1.0).unwrap();
        assert_eq!(engine.controller().current_layout(), 1);

        assert_eq!(sink.holders(), 2);
        *sink.lost.borrow_mut() = true;
        assert!(matches!(
            engine.frame(END + 20.0),
            Err(GridmorphError::ContextLost)
        ));
        // The lost sink is dropped before a replacement exists.
        assert!(engine.sink().is_none());
        assert_eq!(sink.holders(), 1);
        assert!(engine.is_context_lost());
        assert!(matches!(
            engine.frame(END + 30.0),
            Err(GridmorphError::ContextLost)
        ));

        let fresh = RecordingSink::default();
        engine.restore_context(fresh.clone());
        let status = engine.frame(END + 40.0).unwrap();
        let FrameStatus::Drawn(frame) = status else {
            panic!("expected a drawn frame");
        };
        assert!(frame.upload);
        // Same transition, same clock.
        assert_eq!(frame.uniforms.elapsed, 39.0);
        assert_eq!(engine.controller().current_layout(), 1);
        assert_eq!(fresh.calls.borrow().uploads, vec![20]);
        assert!(!engine.is_context_lost());
    }

    #[test]
    fn resize_reaches_sink_and_stage() {
        let (mut engine, sink) = engine(options());
        engine.resize(1024, 768);
        engine.resize(0, 10);
        assert_eq!(sink.calls.borrow().resizes, vec![(1024, 768)]);
        assert_eq!(engine.controller().stage_size(), (800.0, 600.0));
        assert_eq!(engine.controller().next_stage_size(), (1024.0, 768.0));

        let _ = engine.frame(0.0).unwrap();
        let FrameStatus::Drawn(frame) = engine.frame(END + 1.0).unwrap()
        else {
            panic!("expected a drawn frame");
        };
        assert_eq!(frame.uniforms.stage_size, [1024.0, 768.0]);
        assert_eq!(engine.controller().stage_size(), (1024.0, 768.0));
    }

    #[test]
    fn overlay_tracks_last_frame() {
        let (mut engine, _sink) = engine(options());
        let _ = engine.frame(0.0).unwrap();
        assert!(!engine.overlay().legend);
        let _ = engine.frame(100.0).unwrap();
        assert!(engine.overlay().legend);
        assert_eq!(engine.legend().len(), 4);
        assert_eq!(engine.legend_title(), "Legend");
    }
}
