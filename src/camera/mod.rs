//! Camera system for the annotated scene.
//!
//! Provides a perspective camera with screen projection and unprojection,
//! and an orbital controller whose input can be gated off during drags.

/// Orbital camera controller and its enable gate.
pub mod controller;
/// Core camera struct and viewport.
pub mod core;

pub use controller::{ControlsGate, OrbitController};
pub use core::{Camera, Viewport};
