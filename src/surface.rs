//! Surface nodes stored in the manager's arena.
//!
//! A surface's capabilities are decided once from its [`SurfaceKind`] at
//! construction and never re-derived. Children form an intrusive sibling chain
//! through the `links` of each node; there is no separate child vector.

use bitflags::bitflags;

use crate::geometry::{Bounds, Padding};
use crate::ownership::{DisplayKey, SurfaceId, SurfaceKey};
use crate::render::RenderKey;
use crate::window::{WindowData, WindowStyle};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const SELECTABLE = 0x01;
        const CONTAINER = 0x02;
        const WINDOW = 0x04;
        const DESKTOP = 0x08;
        const AUTO_SELECT = 0x10;
    }
}

/// What a surface is, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceKind {
    /// Generic leaf or container control. `WINDOW` and `DESKTOP` are
    /// stripped from the given set.
    Control(Capabilities),
    /// Container whose children hang off a separate client region inset by
    /// the padding.
    Panel,
    /// Container that positions children at `padding + bounds`.
    Workspace,
    Window(WindowStyle),
    Desktop,
}

impl SurfaceKind {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            SurfaceKind::Control(caps) => {
                *caps & (Capabilities::SELECTABLE | Capabilities::CONTAINER | Capabilities::AUTO_SELECT)
            }
            SurfaceKind::Panel | SurfaceKind::Workspace => Capabilities::CONTAINER,
            SurfaceKind::Window(_) => Capabilities::WINDOW | Capabilities::CONTAINER,
            SurfaceKind::Desktop => Capabilities::DESKTOP | Capabilities::CONTAINER,
        }
    }

    pub(crate) fn separate_client(&self) -> bool {
        matches!(self, SurfaceKind::Panel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    New,
    Created,
    Destroyed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Links {
    pub parent: Option<SurfaceKey>,
    pub last_parent: Option<SurfaceKey>,
    pub first_child: Option<SurfaceKey>,
    pub last_child: Option<SurfaceKey>,
    pub next_sibling: Option<SurfaceKey>,
    pub prev_sibling: Option<SurfaceKey>,
}

/// Renderer nodes backing a surface. `client == outer` unless the surface
/// has a separate client region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RenderNodes {
    pub outer: RenderKey,
    pub client: RenderKey,
}

impl RenderNodes {
    pub fn separate(&self) -> bool {
        self.outer != self.client
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceNode {
    pub(crate) id: SurfaceId,
    pub(crate) display: DisplayKey,
    pub(crate) kind: SurfaceKind,
    pub(crate) caps: Capabilities,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) bounds: Bounds,
    pub(crate) padding: Padding,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) design_mode: bool,
    pub(crate) navigation_keys: bool,
    pub(crate) text: String,
    pub(crate) links: Links,
    pub(crate) render: RenderNodes,
    pub(crate) window: Option<WindowData>,
}

impl SurfaceNode {
    pub(crate) fn new(
        id: SurfaceId,
        display: DisplayKey,
        kind: SurfaceKind,
        render: RenderNodes,
    ) -> Self {
        let window = match kind {
            SurfaceKind::Window(style) => Some(WindowData::new(style)),
            _ => None,
        };
        let padding = window
            .as_ref()
            .map(|w| w.style.padding())
            .unwrap_or(Padding::ZERO);
        Self {
            id,
            display,
            kind,
            caps: kind.capabilities(),
            lifecycle: Lifecycle::New,
            bounds: Bounds::ZERO,
            padding,
            visible: true,
            enabled: true,
            design_mode: false,
            navigation_keys: false,
            text: String::new(),
            links: Links::default(),
            render,
            window,
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn display(&self) -> DisplayKey {
        self.display
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn has_capability(&self, caps: Capabilities) -> bool {
        self.caps.contains(caps)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_created(&self) -> bool {
        self.lifecycle == Lifecycle::Created
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    pub fn is_window(&self) -> bool {
        self.window.is_some()
    }

    pub fn is_container(&self) -> bool {
        self.caps.contains(Capabilities::CONTAINER)
    }

    pub fn as_window(&self) -> Option<&WindowData> {
        self.window.as_ref()
    }

    pub(crate) fn as_window_mut(&mut self) -> Option<&mut WindowData> {
        self.window.as_mut()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The surface's own visibility flag, ignoring ancestors.
    pub fn visible_flag(&self) -> bool {
        self.visible
    }

    pub fn enabled_flag(&self) -> bool {
        self.enabled
    }

    pub fn design_mode(&self) -> bool {
        self.design_mode
    }
}
