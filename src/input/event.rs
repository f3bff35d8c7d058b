/// Pointer input forwarded by the host window.
///
/// [`TwinView::handle_input`](crate::view::TwinView::handle_input) offers
/// each event to the drag gesture layers before the orbit camera.
///
/// ```ignore
/// let moved = InputEvent::CursorMoved { x: 100.0, y: 200.0 };
/// let drag = view.handle_input(&moved);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer is now at this pixel position.
    CursorMoved {
        /// Pixels from the left edge.
        x: f32,
        /// Pixels from the top edge.
        y: f32,
    },
    /// A button went down or up.
    MouseButton {
        /// Button that changed.
        button: MouseButton,
        /// Down when `true`.
        pressed: bool,
    },
    /// Wheel motion; positive values zoom in.
    Scroll {
        /// Wheel steps.
        delta: f32,
    },
    /// Shift was pressed or released; shift-drag pans the camera.
    ModifiersChanged {
        /// Shift held.
        shift: bool,
    },
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; grabs handles and orbits.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}
