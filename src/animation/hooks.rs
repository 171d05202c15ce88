//! Host lifecycle callbacks.

use std::fmt;

/// What a hook sees when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookContext {
    /// Position in the layout sequence of the transition concerned.
    pub layout_index: usize,
    /// Name of that layout.
    pub layout_name: &'static str,
    /// Completed passes through the cycling layouts.
    pub loops_completed: u32,
    /// Milliseconds since the transition's first frame.
    pub elapsed_ms: f64,
}

/// A host callback.
pub type Hook = Box<dyn FnMut(&HookContext)>;

/// Optional callbacks, each fired from the frame that triggers it.
///
/// - `init`: once, on the first frame of the first transition
/// - `frame`: every frame drawn
/// - `transition`: when a transition completes, before the next begins
/// - `end`: once, when the loop limit is reached
#[derive(Default)]
pub struct Hooks {
    pub(crate) init: Option<Hook>,
    pub(crate) frame: Option<Hook>,
    pub(crate) transition: Option<Hook>,
    pub(crate) end: Option<Hook>,
}

impl Hooks {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the init hook.
    #[must_use]
    pub fn on_init(mut self, hook: impl FnMut(&HookContext) + 'static) -> Self {
        self.init = Some(Box::new(hook));
        self
    }

    /// Set the per-frame hook.
    #[must_use]
    pub fn on_frame(
        mut self,
        hook: impl FnMut(&HookContext) + 'static,
    ) -> Self {
        self.frame = Some(Box::new(hook));
        self
    }

    /// Set the per-transition hook.
    #[must_use]
    pub fn on_transition(
        mut self,
        hook: impl FnMut(&HookContext) + 'static,
    ) -> Self {
        self.transition = Some(Box::new(hook));
        self
    }

    /// Set the end-of-sequence hook.
    #[must_use]
    pub fn on_end(mut self, hook: impl FnMut(&HookContext) + 'static) -> Self {
        self.end = Some(Box::new(hook));
        self
    }

    pub(crate) fn fire_init(&mut self, ctx: &HookContext) {
        fire(self.init.as_mut(), ctx);
    }

    pub(crate) fn fire_frame(&mut self, ctx: &HookContext) {
        fire(self.frame.as_mut(), ctx);
    }

    pub(crate) fn fire_transition(&mut self, ctx: &HookContext) {
        fire(self.transition.as_mut(), ctx);
    }

    pub(crate) fn fire_end(&mut self, ctx: &HookContext) {
        fire(self.end.as_mut(), ctx);
    }
}

fn fire(hook: Option<&mut Hook>, ctx: &HookContext) {
    if let Some(hook) = hook {
        hook(ctx);
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("init", &self.init.is_some())
            .field("frame", &self.frame.is_some())
            .field("transition", &self.transition.is_some())
            .field("end", &self.end.is_some())
            .finish()
    }
}
