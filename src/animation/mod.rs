//! Animation system: point state, transition timing and the layout
//! sequence driver.

pub mod controller;
pub mod easing;
pub mod hooks;
pub mod overlay;
pub mod point;
pub mod scheduler;

pub use controller::{AnimationController, Collaborators, Frame};
pub use easing::EasingFunction;
pub use hooks::{HookContext, Hooks};
pub use overlay::{BinLabel, LegendEntry, OverlayVisibility};
pub use point::{Point, PointVertex};
pub use scheduler::{FrameUniforms, Interpolator, Phase, TransitionTiming};
