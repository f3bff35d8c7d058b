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
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
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

//! Drag-driven annotations for underground vault digital twins.
//!
//! Holes (cable rings with a size label) and cross-sections (a rectangular
//! outline with dimension labels and draggable end markers) live in a
//! named scene graph. Every annotation node carries a structured name, so
//! related artifacts are found again by name rather than by reference.
//!
//! # Key entry points
//!
//! - [`view::TwinView`] - scene, orbit camera, and both drag sessions
//! - [`annotation`] - builders for hole, section, marker, and ranging nodes
//! - [`drag`] - gesture layer, session state machine, and the hole and plane
//!   controllers
//! - [`naming`] - the `{kind}-{qualifier}:{instance}-{role}` naming scheme
//! - [`options::Options`] - runtime configuration loaded from TOML presets
//!
//! # Architecture
//!
//! Input flows from the host into [`view::TwinView::handle_input`], through
//! each [`drag::DragSession`] and finally to the orbit camera. A session
//! closes the camera's [`camera::ControlsGate`] while a gesture is active.
//! State shared between the view and its controllers (selection, draggable
//! registries, committed section geometry) is held in [`reactive::Shared`]
//! cells.

pub mod annotation;
pub mod camera;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod input;
pub mod naming;
pub mod options;
pub mod reactive;
pub mod scene;
pub mod view;

pub use error::AnnotateError;
pub use naming::{ArtifactId, EventType, GroupKey, Role};
pub use view::TwinView;
