use crate::error::{DisplayError, Result};
use crate::geometry::Bounds;
use crate::ownership::SurfaceKey;
use crate::render::{PresentationFlag, Renderer};

use super::{CancelAction, Notification, WindowManager, WindowState, WindowStyleFlags};

impl<R: Renderer> WindowManager<R> {
    pub fn window_state(&self, w: SurfaceKey) -> Option<WindowState> {
        self.window(w).map(|d| d.state)
    }

    /// Change the window state without activating it.
    pub fn set_window_state(&mut self, w: SurfaceKey, state: WindowState) -> Result<()> {
        let current = self.live_window(w)?;
        let from = current.state;
        if from == state {
            return Ok(());
        }
        let bounds = self.bounds(w);
        let mut restore = None;
        if let Some(data) = self.window_mut(w) {
            if from == WindowState::Minimized {
                data.was_maximized = false;
            }
            match state {
                WindowState::Minimized => {
                    if data.restore_bounds.is_none() {
                        data.restore_bounds = Some(bounds);
                    }
                    if from == WindowState::Maximized {
                        data.was_maximized = true;
                    }
                }
                WindowState::Maximized => {
                    if data.restore_bounds.is_none() {
                        data.restore_bounds = Some(bounds);
                    }
                }
                WindowState::Normal => restore = data.restore_bounds.take(),
            }
            data.state = state;
        }
        tracing::debug!(window = ?w, ?from, to = ?state, "window state changed");
        if let Some(b) = restore {
            self.set_bounds(w, b)?;
        }
        self.apply_state_bounds(w)?;
        self.emit(Notification::WindowStateChanged {
            window: w,
            from,
            to: state,
        });
        Ok(())
    }

    /// Re-apply the bounds implied by a maximized or minimized state.
    pub(crate) fn apply_state_bounds(&mut self, w: SurfaceKey) -> Result<()> {
        let data = self.live_window(w)?;
        let style = data.style;
        let target = match data.state {
            WindowState::Normal => return Ok(()),
            WindowState::Minimized => style.minimized_bounds(),
            WindowState::Maximized => match self.parent(w) {
                Some(p) => style.maximized_bounds(self.client_bounds(p)),
                None => return Ok(()),
            },
        };
        if self.bounds(w) != target {
            self.set_bounds(w, target)?;
        }
        Ok(())
    }

    /// Bounds to return to after a maximize or minimize.
    pub fn normal_bounds(&self, w: SurfaceKey) -> Bounds {
        self.window(w)
            .and_then(|d| d.restore_bounds)
            .unwrap_or_else(|| self.bounds(w))
    }

    /// State `restore` would move to: a minimized window that was maximized
    /// goes back to maximized.
    pub fn restored_state(&self, w: SurfaceKey) -> WindowState {
        match self.window(w) {
            Some(d) if d.state == WindowState::Minimized && d.was_maximized => {
                WindowState::Maximized
            }
            _ => WindowState::Normal,
        }
    }

    /// Leave a minimized or maximized state. Does not activate.
    pub fn restore(&mut self, w: SurfaceKey) -> Result<()> {
        let state = self.restored_state(w);
        self.set_window_state(w, state)
    }

    pub fn set_topmost(&mut self, w: SurfaceKey, topmost: bool) -> Result<()> {
        self.live_window(w)?;
        let outer = self.nodes[w].render.outer;
        if let Some(data) = self.window_mut(w) {
            data.topmost = topmost;
        }
        self.renderer
            .set_flag(outer, PresentationFlag::Topmost, topmost);
        Ok(())
    }

    pub fn topmost(&self, w: SurfaceKey) -> bool {
        self.window(w).is_some_and(|d| d.topmost)
    }

    /// Owned windows are raised together with their owner while it is active,
    /// and deactivation prefers handing activation back to the owner.
    pub fn set_owner(&mut self, w: SurfaceKey, owner: Option<SurfaceKey>) -> Result<()> {
        self.live_window(w)?;
        if let Some(o) = owner {
            let onode = self.live(o)?;
            if onode.display != self.nodes[w].display {
                return Err(DisplayError::CrossDisplay);
            }
            if !onode.is_window() {
                return Err(DisplayError::InvalidParent("owner must be a window"));
            }
            if o == w {
                return Err(DisplayError::InvalidParent("a window cannot own itself"));
            }
        }
        if self.window(w).and_then(|d| d.owner) == owner {
            return Ok(());
        }
        let raise = owner.is_some_and(|o| self.window(o).is_some_and(|d| d.active));
        if let Some(data) = self.window_mut(w) {
            data.owner = owner;
        }
        self.set_window_owned_raise(w, raise);
        Ok(())
    }

    pub fn owner(&self, w: SurfaceKey) -> Option<SurfaceKey> {
        self.window(w).and_then(|d| d.owner)
    }

    pub fn owned_windows(&self, w: SurfaceKey) -> Vec<SurfaceKey> {
        self.windows
            .iter()
            .copied()
            .filter(|k| self.window(*k).is_some_and(|d| d.owner == Some(w)))
            .collect()
    }

    /// Raise or lower every window owned by `w`.
    pub(crate) fn set_owned_raise(&mut self, w: SurfaceKey, on: bool) {
        for owned in self.owned_windows(w) {
            self.set_window_owned_raise(owned, on);
        }
    }

    fn set_window_owned_raise(&mut self, w: SurfaceKey, on: bool) {
        let Some(outer) = self.nodes.get(w).map(|n| n.render.outer) else {
            return;
        };
        if let Some(data) = self.window_mut(w) {
            data.owned_raise = on;
        }
        self.renderer
            .set_flag(outer, PresentationFlag::OwnedRaise, on);
    }

    /// With a default action set, Enter inside the window queues
    /// `Notification::DefaultAction`.
    pub fn set_default_action(&mut self, w: SurfaceKey, enabled: bool) -> Result<()> {
        self.live_window(w)?;
        if let Some(data) = self.window_mut(w) {
            data.default_action = enabled;
        }
        Ok(())
    }

    pub fn set_cancel_action(&mut self, w: SurfaceKey, action: CancelAction) -> Result<()> {
        self.live_window(w)?;
        if let Some(data) = self.window_mut(w) {
            data.cancel_action = action;
        }
        Ok(())
    }

    pub(crate) fn perform_default_action(&mut self, w: SurfaceKey) -> bool {
        if !self.window(w).is_some_and(|d| d.default_action) {
            return false;
        }
        self.emit(Notification::DefaultAction { window: w });
        true
    }

    pub(crate) fn perform_cancel_action(&mut self, w: SurfaceKey) -> Result<bool> {
        let Some(data) = self.window(w) else {
            return Ok(false);
        };
        match data.cancel_action {
            CancelAction::Nothing => Ok(false),
            CancelAction::Notify => {
                self.emit(Notification::CancelAction { window: w });
                Ok(true)
            }
            CancelAction::CloseIfButton => {
                if data.style.flags().contains(WindowStyleFlags::CLOSE_BUTTON) {
                    self.close(w)?;
                }
                Ok(true)
            }
        }
    }

    /// What the close button does: destroy the window.
    pub fn close(&mut self, w: SurfaceKey) -> Result<()> {
        self.live_window(w)?;
        tracing::debug!(window = ?w, "closing window");
        self.destroy(w)
    }
}
