use std::time::Instant;

use slotmap::SlotMap;

use crate::config::WmConfig;
use crate::design::DesignSession;
use crate::error::{DisplayError, Result};
use crate::events::SurfaceEvent;
use crate::geometry::Bounds;
use crate::menu::Menu;
use crate::ownership::{Display, DisplayKey, MenuKey, SurfaceId, SurfaceKey};
use crate::render::{RenderTree, Renderer};
use crate::scheduler::{DeferredTask, Scheduler};
use crate::surface::SurfaceNode;

use super::activation::Switcher;
use super::drag::WindowDrag;
use super::{WindowData, WindowState};

/// Everything the manager tells the application, in the order it happened.
/// Drained with [`WindowManager::take_notifications`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Activated {
        window: SurfaceKey,
        other: Option<SurfaceKey>,
    },
    Deactivated {
        window: SurfaceKey,
        other: Option<SurfaceKey>,
    },
    FocusChanged {
        from: Option<SurfaceKey>,
        to: Option<SurfaceKey>,
    },
    /// Sent to each direct child of a container whose client area changed.
    ContainerResized {
        surface: SurfaceKey,
        area: Bounds,
    },
    WindowStateChanged {
        window: SurfaceKey,
        from: WindowState,
        to: WindowState,
    },
    Destroyed {
        surface: SurfaceKey,
        id: SurfaceId,
    },
    DefaultAction {
        window: SurfaceKey,
    },
    CancelAction {
        window: SurfaceKey,
    },
    DesignSelectionChanged {
        root: SurfaceKey,
    },
    DesignMoved {
        root: SurfaceKey,
        surface: SurfaceKey,
    },
    DesignResized {
        root: SurfaceKey,
        surface: SurfaceKey,
    },
    SwitcherPreview {
        window: SurfaceKey,
        on: bool,
    },
    /// Input the manager did not consume, for the target's own handler.
    Input(SurfaceEvent),
}

/// Single owner of every surface, display, menu and piece of process-wide
/// window state (active window, focused surface, drags, design sessions).
#[derive(Debug)]
pub struct WindowManager<R: Renderer = RenderTree> {
    pub(crate) nodes: SlotMap<SurfaceKey, SurfaceNode>,
    /// Live window surfaces in creation order.
    pub(crate) windows: Vec<SurfaceKey>,
    pub(crate) displays: SlotMap<DisplayKey, Display>,
    pub(crate) menus: SlotMap<MenuKey, Menu>,
    pub(crate) renderer: R,
    pub(crate) config: WmConfig,
    pub(crate) active: Option<SurfaceKey>,
    pub(crate) focused: Option<SurfaceKey>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) scheduler: Scheduler,
    pub(crate) window_drag: Option<WindowDrag>,
    pub(crate) designs: Vec<DesignSession>,
    pub(crate) switcher: Switcher,
}

impl Default for WindowManager<RenderTree> {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager<RenderTree> {
    pub fn new() -> Self {
        Self::with_renderer(RenderTree::new())
    }
}

impl<R: Renderer> WindowManager<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            windows: Vec::new(),
            displays: SlotMap::with_key(),
            menus: SlotMap::with_key(),
            renderer,
            config: WmConfig::default(),
            active: None,
            focused: None,
            notifications: Vec::new(),
            scheduler: Scheduler::new(),
            window_drag: None,
            designs: Vec::new(),
            switcher: Switcher::default(),
        }
    }

    pub fn with_config(mut self, config: WmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn create_display(&mut self, name: &str) -> Result<DisplayKey> {
        let display = Display::new(name)?;
        let key = self.displays.insert(display);
        tracing::debug!(display = ?key, name, "created display");
        Ok(key)
    }

    pub fn display(&self, key: DisplayKey) -> Option<&Display> {
        self.displays.get(key)
    }

    pub fn desktop(&self, display: DisplayKey) -> Option<SurfaceKey> {
        self.displays.get(display).and_then(|d| d.desktop())
    }

    /// Resolve a surface identity within a display; `-1` is the desktop.
    pub fn lookup(&self, display: DisplayKey, id: SurfaceId) -> Option<SurfaceKey> {
        self.displays.get(display).and_then(|d| d.surface(id))
    }

    /// Arena access. Destroyed surfaces stay readable as tombstones.
    pub fn surface(&self, key: SurfaceKey) -> Option<&SurfaceNode> {
        self.nodes.get(key)
    }

    pub fn window(&self, key: SurfaceKey) -> Option<&WindowData> {
        self.nodes.get(key).and_then(|n| n.as_window())
    }

    pub fn active_window(&self) -> Option<SurfaceKey> {
        self.active
    }

    pub fn focused(&self) -> Option<SurfaceKey> {
        self.focused
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub(crate) fn emit(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// A surface that exists and has not been destroyed.
    pub(crate) fn live(&self, key: SurfaceKey) -> Result<&SurfaceNode> {
        match self.nodes.get(key) {
            Some(n) if n.is_destroyed() => Err(DisplayError::InvalidState("surface was destroyed")),
            Some(n) => Ok(n),
            None => Err(DisplayError::InvalidState("unknown surface")),
        }
    }

    pub(crate) fn is_live(&self, key: SurfaceKey) -> bool {
        self.nodes.get(key).is_some_and(|n| !n.is_destroyed())
    }

    pub(crate) fn live_window(&self, key: SurfaceKey) -> Result<&WindowData> {
        self.live(key)?
            .as_window()
            .ok_or(DisplayError::InvalidState("surface is not a window"))
    }

    pub(crate) fn window_mut(&mut self, key: SurfaceKey) -> Option<&mut WindowData> {
        self.nodes.get_mut(key).and_then(|n| n.as_window_mut())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn has_deferred(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Run every deferred task due at `now`, including ones scheduled by the
    /// tasks themselves.
    pub fn run_deferred(&mut self, now: Instant) {
        loop {
            let due = self.scheduler.take_due(now);
            if due.is_empty() {
                break;
            }
            for task in due {
                self.run_task(task);
            }
        }
    }

    /// Run every pending deferred task regardless of due time.
    pub fn flush_deferred(&mut self) {
        while let Some(task) = self.scheduler.take_next() {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        tracing::trace!(?task, "running deferred task");
        let result = match task {
            DeferredTask::ActivateIfFront(window) => {
                if self.is_live(window) && self.is_front_child(window) {
                    self.activate(window, None)
                } else {
                    Ok(())
                }
            }
            DeferredTask::FinishActivation { window, target } => {
                self.finish_activation(window, target);
                Ok(())
            }
            DeferredTask::RaiseActive { window, target } => {
                if self.window(window).is_some_and(|w| w.active) {
                    self.bring_to_front(window).map(|_| {
                        if let Some(t) = target {
                            self.set_selected(window, t);
                        }
                    })
                } else {
                    Ok(())
                }
            }
            DeferredTask::DropOwnedRaise(window) => {
                if self.is_live(window) && !self.window(window).is_some_and(|w| w.active) {
                    self.set_owned_raise(window, false);
                }
                Ok(())
            }
            DeferredTask::SwitchTo(window) => self.switch_to(window),
        };
        if let Err(err) = result {
            tracing::debug!(?task, %err, "deferred task skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceKind;

    #[test]
    fn lookup_resolves_desktop_identity() {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        assert_eq!(wm.lookup(d, SurfaceId::DESKTOP), None);
        let desk = wm
            .create_surface(d, SurfaceId::DESKTOP, SurfaceKind::Desktop)
            .unwrap();
        assert_eq!(wm.lookup(d, SurfaceId::DESKTOP), Some(desk));
        assert_eq!(wm.desktop(d), Some(desk));
    }

    #[test]
    fn notifications_drain_once() {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let s = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Workspace)
            .unwrap();
        wm.destroy(s).unwrap();
        assert!(!wm.take_notifications().is_empty());
        assert!(wm.take_notifications().is_empty());
    }

    #[test]
    fn destroyed_surfaces_are_rejected() {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let s = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Workspace)
            .unwrap();
        wm.destroy(s).unwrap();
        assert!(wm.surface(s).is_some_and(|n| n.is_destroyed()));
        assert_eq!(
            wm.create(s),
            Err(DisplayError::InvalidState("surface was destroyed"))
        );
    }
}
