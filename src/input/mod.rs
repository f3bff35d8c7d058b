//! Host-agnostic pointer input shared by the orbit camera and the drag
//! gesture layers.

mod event;

pub use event::{InputEvent, MouseButton};
