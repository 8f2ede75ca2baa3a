//! Retained-mode surface tree and window manager for terminal desktops.
//!
//! A [`WindowManager`] owns every display, surface and menu. Surfaces form a
//! tree under a per-display desktop; windows add activation, focus, tab
//! selection, window states and interactive move/resize on top of that tree,
//! and any container can be put into design mode for on-screen layout
//! editing.

pub mod config;
pub mod constants;
pub mod design;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod menu;
pub mod ownership;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod tracing_sub;
pub mod tree;
pub mod window;

pub use config::WmConfig;
pub use error::{DisplayError, Result};
pub use events::{EventDispatcher, Key, Modifiers, PointerButton, SurfaceEvent, SurfaceEventKind};
pub use geometry::{Bounds, Padding, Point, Size};
pub use ownership::{DisplayKey, MenuId, MenuKey, SurfaceId, SurfaceKey};
pub use surface::{Capabilities, SurfaceKind};
pub use window::{Notification, WindowManager, WindowState, WindowStyle};
