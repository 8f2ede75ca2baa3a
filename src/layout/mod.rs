//! Absolute bounds + padding layout.
//!
//! A surface's bounds are relative to its parent's content origin. Every
//! geometry change funnels through [`WindowManager::set_bounds`] or
//! [`WindowManager::set_padding`], which re-derive the rendered position and
//! tell direct children of a container that their area changed.

pub mod floating;
pub mod snap;

use crate::error::{DisplayError, Result};
use crate::geometry::{self, Bounds, Padding, Point};
use crate::ownership::SurfaceKey;
use crate::render::Renderer;
use crate::surface::Capabilities;
use crate::window::{Notification, WindowManager, WindowState};

impl<R: Renderer> WindowManager<R> {
    pub fn bounds(&self, s: SurfaceKey) -> Bounds {
        self.nodes.get(s).map(|n| n.bounds).unwrap_or(Bounds::ZERO)
    }

    pub fn padding(&self, s: SurfaceKey) -> Padding {
        self.nodes.get(s).map(|n| n.padding).unwrap_or(Padding::ZERO)
    }

    /// The single geometry entry point for a surface's outer rectangle.
    /// Windows clamp to their style's minimum size.
    pub fn set_bounds(&mut self, s: SurfaceKey, bounds: Bounds) -> Result<()> {
        let bounds = bounds.validate()?;
        let node = self.live(s)?;
        let bounds = match node.as_window() {
            Some(w) => w.style.clamp_bounds(bounds),
            None => bounds,
        };
        let container = node.is_container();
        self.nodes[s].bounds = bounds;
        tracing::trace!(surface = ?s, ?bounds, "set bounds");
        self.apply_bounds(s);
        if container {
            self.container_resized(s);
        }
        Ok(())
    }

    /// Windows and the desktop keep their own padding and ignore this.
    pub fn set_padding(&mut self, s: SurfaceKey, padding: Padding) -> Result<()> {
        let padding = padding.validate()?;
        let node = self.live(s)?;
        if node.caps.intersects(Capabilities::WINDOW | Capabilities::DESKTOP) {
            return Ok(());
        }
        let old = node.padding;
        let separate = node.render.separate();
        let container = node.is_container();
        self.nodes[s].padding = padding;
        tracing::trace!(surface = ?s, ?padding, "set padding");
        if !separate && (old.left != padding.left || old.top != padding.top) {
            for child in self.children(s) {
                self.apply_bounds(child);
            }
        }
        self.apply_padding(s);
        if container {
            self.container_resized(s);
        }
        Ok(())
    }

    /// Push the stored geometry of `s` to the renderer: the client region
    /// first, then the outer node relative to the parent's content origin.
    pub(crate) fn apply_bounds(&mut self, s: SurfaceKey) {
        self.apply_padding(s);
        let Some(node) = self.nodes.get(s) else {
            return;
        };
        let bounds = node.bounds;
        let local = match node.links.parent.and_then(|p| self.nodes.get(p)) {
            Some(p) if !p.render.separate() => bounds.offset(p.padding.left, p.padding.top, 0.0, 0.0),
            _ => bounds,
        };
        let outer = node.render.outer;
        self.renderer.set_geometry(outer, local);
    }

    pub(crate) fn apply_padding(&mut self, s: SurfaceKey) {
        let Some(node) = self.nodes.get(s) else {
            return;
        };
        if node.render.separate() {
            let client = node.render.client;
            let rect = Bounds::new(node.padding.left, node.padding.top, 0.0, 0.0).with_size(
                node.bounds.width - node.padding.horizontal(),
                node.bounds.height - node.padding.vertical(),
            );
            self.renderer.set_geometry(client, rect);
        }
    }

    /// Tell each direct child its container's client area changed. Windows
    /// in a non-normal state re-apply their state bounds, which cascades one
    /// more level through their own `set_bounds`.
    pub(crate) fn container_resized(&mut self, s: SurfaceKey) {
        let area = self.client_bounds(s);
        for child in self.children(s) {
            self.emit(Notification::ContainerResized {
                surface: child,
                area,
            });
            let state = self.window(child).map(|w| w.state);
            if matches!(state, Some(WindowState::Maximized | WindowState::Minimized))
                && let Err(err) = self.apply_state_bounds(child)
            {
                tracing::debug!(surface = ?child, %err, "state bounds not applied");
            }
        }
    }

    /// Outer rectangle minus padding, in the parent's content frame.
    pub fn content_rect(&self, s: SurfaceKey) -> Bounds {
        self.bounds(s).content_rect(self.padding(s))
    }

    /// Zero-origin client area.
    pub fn client_bounds(&self, s: SurfaceKey) -> Bounds {
        geometry::client_bounds(self.bounds(s), self.padding(s))
    }

    /// Client area as if scrolling were enabled, using the renderer's extent
    /// once the surface is created.
    pub fn content_bounds(&self, s: SurfaceKey) -> Bounds {
        let Some(node) = self.nodes.get(s) else {
            return Bounds::ZERO;
        };
        let extent = if node.is_created() {
            self.renderer.scroll_extent(node.render.client)
        } else {
            None
        };
        let (cw, ch) = match extent {
            Some(size) => (size.width, size.height),
            None => (node.bounds.width, node.bounds.height),
        };
        if node.render.separate() {
            Bounds::new(0.0, 0.0, cw, ch)
        } else {
            Bounds::new(
                0.0,
                0.0,
                cw - node.padding.horizontal(),
                ch - node.padding.vertical(),
            )
        }
    }

    pub fn scroll_offset(&self, s: SurfaceKey) -> Point {
        match self.nodes.get(s) {
            Some(n) if n.is_created() => self.renderer.scroll_offset(n.render.client),
            _ => Point::ZERO,
        }
    }

    /// Ignored until the surface is created.
    pub fn set_scroll_offset(&mut self, s: SurfaceKey, offset: Point) -> Result<()> {
        let offset = offset.validate()?;
        let node = self.live(s)?;
        if !node.is_created() {
            return Ok(());
        }
        let client = node.render.client;
        self.renderer.set_scroll_offset(client, offset);
        Ok(())
    }

    /// Resize a window so its client area is `width` by `height`.
    pub fn set_client_size(&mut self, s: SurfaceKey, width: f64, height: f64) -> Result<()> {
        let style = self.live_window(s)?.style;
        let size = style.size_from_client(geometry::Size::new(width, height));
        let b = self.bounds(s).with_size(size.width, size.height);
        if !b.width.is_finite() || !b.height.is_finite() {
            return Err(DisplayError::InvalidGeometry(format!("{b:?}")));
        }
        self.set_bounds(s, b)
    }
}
