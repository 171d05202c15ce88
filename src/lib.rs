// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-animated point transitions between gridded maps and classified
//! histograms.
//!
//! Gridmorph takes one point per grid cell (`x`, `y`, `value`), colors each
//! point by threshold class, and animates the whole set back and forth
//! between a map layout and a bar-chart layout, with optional decorative
//! intro layouts (phyllotaxis, spiral, sine, ...).
//!
//! # Key entry points
//!
//! - [`engine::AnimationEngine`] - controller plus GPU point pass, driven
//!   one frame at a time by the host
//! - [`engine::AnimationBuilder`] - fluent construction of an animation
//! - [`animation::AnimationController`] - the layout sequence and
//!   per-transition scheduling, independent of any GPU
//! - [`options::Options`] - serializable configuration (TOML presets)
//! - [`layout`] - map, bars and decorative layout engines
//!
//! # Architecture
//!
//! Everything runs on the host's frame callback. When a transition begins
//! the controller snapshots each point's previous target as its new start,
//! runs the active layout, and uploads start/end attributes once. Every
//! frame after that only updates a small uniform block; the vertex shader
//! eases each point from start to end with a per-index stagger.

pub mod animation;
pub mod classify;
pub mod data;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod layout;
pub mod options;
pub mod util;

#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{AnimationBuilder, AnimationEngine};
pub use error::GridmorphError;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
