//! Shared crate-wide constants.

use std::time::Duration;

/// Grid spacing used when dragging or resizing surfaces in a design session.
pub const DESIGN_GRID_SIZE: f64 = 8.0;

/// Edge length of the design-mode resize handle shown for a single selection.
pub const DESIGN_HANDLE_SIZE: f64 = 8.0;

/// Thickness of the outline drawn around design selections. Half of it sits
/// outside the selected surface and half inside.
pub const DESIGN_OUTLINE_WIDTH: f64 = 2.0;

/// Debounce applied to activation side effects triggered from inside an input
/// event, so raising a window does not interrupt the event that caused it.
pub const ACTIVATION_DELAY: Duration = Duration::from_millis(111);

/// Size of the bottom-right resize grip inside a window's client area.
pub const RESIZE_GRIP_SIZE: f64 = 2.0;

/// Minimum outer width reserved for a window caption, before borders.
pub const CAPTION_MIN_WIDTH: f64 = 16.0;

/// Caption button metrics, measured from the right end of the caption.
pub const CAPTION_BUTTON_WIDTH: f64 = 3.0;
pub const CAPTION_BUTTON_GAP: f64 = 1.0;
pub const CAPTION_BUTTON_MARGIN: f64 = 1.0;
