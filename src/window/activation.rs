//! Activation, deactivation and the window switcher.
//!
//! At most one window is active at a time. Activating a window first
//! deactivates the previous one, so `Deactivated` is always queued before the
//! matching `Activated`. Raising a window in response to a click on one of
//! its selectable children waits for the activation delay, letting a click
//! that starts a drag finish without the window jumping to the front first.

use std::time::Duration;

use crate::error::Result;
use crate::ownership::SurfaceKey;
use crate::render::{PresentationFlag, Renderer};
use crate::scheduler::DeferredTask;
use crate::surface::Capabilities;

use super::{Notification, WindowManager, WindowState};

/// Alt+` preview cycling over the desktop's window stack.
#[derive(Debug, Default, Clone)]
pub(crate) struct Switcher {
    current: Option<SurfaceKey>,
}

impl Switcher {
    pub(crate) fn current(&self) -> Option<SurfaceKey> {
        self.current
    }

    pub(crate) fn forget(&mut self, s: SurfaceKey) {
        if self.current == Some(s) {
            self.current = None;
        }
    }
}

impl<R: Renderer> WindowManager<R> {
    /// Activate `w`, optionally selecting `target` inside it. When `target`
    /// is a selectable descendant the raise is deferred by the activation
    /// delay; otherwise it happens immediately. Minimized windows are left
    /// alone.
    pub fn activate(&mut self, w: SurfaceKey, target: Option<SurfaceKey>) -> Result<()> {
        let data = self.live_window(w)?;
        if data.state == WindowState::Minimized {
            return Ok(());
        }
        let already = data.active;
        let donow = match target {
            None => true,
            Some(t) => {
                t == w
                    || !self
                        .nodes
                        .get(t)
                        .is_some_and(|n| n.caps.contains(Capabilities::SELECTABLE))
            }
        };
        let delay = self.config.activation_delay;

        if already {
            if self.is_front_child(w) {
                if let Some(t) = target {
                    self.set_selected(w, t);
                }
            } else if !donow {
                self.scheduler
                    .schedule(delay, DeferredTask::RaiseActive { window: w, target });
            } else {
                self.bring_to_front(w)?;
                if let Some(t) = target {
                    self.set_selected(w, t);
                }
            }
            return Ok(());
        }

        if self.parent(w).is_none() || !self.can_focus(w) {
            tracing::debug!(window = ?w, "window cannot be activated");
            return Ok(());
        }

        let old = self.active;
        if let Some(o) = old {
            self.mark_inactive(o, Some(w), donow);
        }
        self.mark_active(w, old);

        if donow {
            self.bring_to_front(w)?;
            self.finish_activation(w, target);
        } else {
            self.scheduler
                .schedule(delay, DeferredTask::FinishActivation { window: w, target });
        }
        Ok(())
    }

    /// Second half of activation: raise, select and focus. Skipped if the
    /// window lost activation in the meantime.
    pub(crate) fn finish_activation(&mut self, w: SurfaceKey, target: Option<SurfaceKey>) {
        if !self.window(w).is_some_and(|d| d.active) {
            return;
        }
        if let Err(err) = self.bring_to_front(w) {
            tracing::debug!(window = ?w, %err, "raise skipped");
            return;
        }
        if let Some(t) = target {
            self.set_selected(w, t);
        }
        let focus = if self.design_mode(w) {
            w
        } else {
            target
                .filter(|t| self.find_parent_window(*t) == Some(w) && self.can_focus(*t))
                .or_else(|| self.selected(w))
                .unwrap_or(w)
        };
        self.focus(focus);
    }

    fn mark_active(&mut self, w: SurfaceKey, other: Option<SurfaceKey>) {
        let outer = self.nodes[w].render.outer;
        if let Some(data) = self.window_mut(w) {
            data.active = true;
        }
        self.active = Some(w);
        self.renderer.set_flag(outer, PresentationFlag::Active, true);
        self.set_owned_raise(w, true);
        tracing::debug!(window = ?w, ?other, "activated window");
        self.emit(Notification::Activated { window: w, other });
    }

    fn mark_inactive(&mut self, w: SurfaceKey, other: Option<SurfaceKey>, donow: bool) {
        let Some(outer) = self.nodes.get(w).map(|n| n.render.outer) else {
            return;
        };
        if let Some(data) = self.window_mut(w) {
            data.active = false;
        }
        if self.active == Some(w) {
            self.active = None;
        }
        self.renderer
            .set_flag(outer, PresentationFlag::Active, false);
        if donow {
            self.set_owned_raise(w, false);
        } else {
            let delay = self.config.activation_delay;
            self.scheduler
                .schedule(delay, DeferredTask::DropOwnedRaise(w));
        }
        if let Some(f) = self.focused
            && (f == w || self.is_ancestor(w, f))
        {
            self.set_focus(None);
        }
        tracing::debug!(window = ?w, ?other, "deactivated window");
        self.emit(Notification::Deactivated { window: w, other });
    }

    /// Hand activation to the owner if it can take it, else to the nearest
    /// usable window below `w` in the stack. With no candidate nothing is
    /// active afterwards.
    pub fn deactivate(&mut self, w: SurfaceKey) -> Result<()> {
        let data = self.live_window(w)?;
        if !data.active {
            return Ok(());
        }
        let owner = data.owner.filter(|o| self.can_take_activation(*o));
        let candidate = owner.or_else(|| {
            let mut cur = self.previous_window(w);
            while let Some(c) = cur {
                if self.can_take_activation(c) {
                    return Some(c);
                }
                cur = self.previous_window(c);
            }
            None
        });
        match candidate {
            Some(c) => self.activate(c, None),
            None => {
                self.mark_inactive(w, None, true);
                Ok(())
            }
        }
    }

    fn can_take_activation(&self, w: SurfaceKey) -> bool {
        self.is_live(w)
            && self.parent(w).is_some()
            && self.can_focus(w)
            && self
                .window(w)
                .is_some_and(|d| d.state != WindowState::Minimized)
    }

    /// Leave no window active. Used when tearing a display down.
    pub fn deactivate_all(&mut self) {
        if let Some(a) = self.active {
            self.mark_inactive(a, None, true);
        }
        self.active = None;
    }

    /// Windows try to become active when they land in front of a parent and
    /// give activation up when detached.
    pub(crate) fn window_parent_changed(&mut self, s: SurfaceKey) {
        if !self.nodes.get(s).is_some_and(|n| n.is_window()) {
            return;
        }
        if self.can_take_activation(s) {
            if self.is_front_child(s) {
                self.scheduler
                    .schedule(Duration::ZERO, DeferredTask::ActivateIfFront(s));
            }
        } else if let Err(err) = self.deactivate(s) {
            tracing::debug!(window = ?s, %err, "deactivate skipped");
        }
    }

    /// Visibility or enablement of a window changed.
    pub(crate) fn window_availability_changed(&mut self, s: SurfaceKey, on: bool) -> Result<()> {
        if !self.nodes.get(s).is_some_and(|n| n.is_window()) || self.parent(s).is_none() {
            return Ok(());
        }
        if on {
            if self.is_front_child(s) && self.can_take_activation(s) {
                self.activate(s, None)?;
            }
            Ok(())
        } else {
            self.deactivate(s)
        }
    }

    pub fn first_window(&self, parent: SurfaceKey) -> Option<SurfaceKey> {
        let first = self.first_child(parent)?;
        if self.is_window_key(first) {
            Some(first)
        } else {
            self.next_window(first)
        }
    }

    pub fn last_window(&self, parent: SurfaceKey) -> Option<SurfaceKey> {
        let last = self.last_child(parent)?;
        if self.is_window_key(last) {
            Some(last)
        } else {
            self.previous_window(last)
        }
    }

    /// Next window sibling above `w` in the stack.
    pub fn next_window(&self, w: SurfaceKey) -> Option<SurfaceKey> {
        let mut cur = self.next_sibling(w);
        while let Some(c) = cur {
            if self.is_window_key(c) {
                return Some(c);
            }
            cur = self.next_sibling(c);
        }
        None
    }

    pub fn previous_window(&self, w: SurfaceKey) -> Option<SurfaceKey> {
        let mut cur = self.previous_sibling(w);
        while let Some(c) = cur {
            if self.is_window_key(c) {
                return Some(c);
            }
            cur = self.previous_sibling(c);
        }
        None
    }

    fn is_window_key(&self, s: SurfaceKey) -> bool {
        self.nodes.get(s).is_some_and(|n| n.is_window())
    }

    /// Window currently previewed by the switcher.
    pub fn switcher_preview(&self) -> Option<SurfaceKey> {
        self.switcher.current()
    }

    /// Move the switcher preview one step down the stack of `parent`,
    /// wrapping to the top. Returns the previewed window.
    pub fn switcher_advance(&mut self, parent: SurfaceKey) -> Option<SurfaceKey> {
        let start = self
            .switcher
            .current
            .or(self.active.filter(|a| self.parent(*a) == Some(parent)));
        let mut cur = start;
        let mut next = None;
        for _ in 0..self.children(parent).len() {
            cur = match cur {
                Some(c) => self
                    .previous_window(c)
                    .or_else(|| self.last_window(parent)),
                None => self.last_window(parent),
            };
            match cur {
                Some(c) if c != start.unwrap_or(c) || start.is_none() => {
                    if self.is_visible(c) && self.is_enabled(c) {
                        next = Some(c);
                        break;
                    }
                }
                _ => break,
            }
        }
        let next = next?;
        if let Some(old) = self.switcher.current.replace(next) {
            self.emit(Notification::SwitcherPreview {
                window: old,
                on: false,
            });
        }
        tracing::debug!(window = ?next, "switcher preview");
        self.emit(Notification::SwitcherPreview {
            window: next,
            on: true,
        });
        Some(next)
    }

    /// Activate the previewed window after the activation delay.
    pub fn switcher_commit(&mut self) {
        if let Some(w) = self.switcher.current.take() {
            let delay = self.config.activation_delay;
            self.scheduler.schedule(delay, DeferredTask::SwitchTo(w));
        }
    }

    pub fn switcher_cancel(&mut self) {
        if let Some(w) = self.switcher.current.take() {
            self.emit(Notification::SwitcherPreview {
                window: w,
                on: false,
            });
        }
    }

    pub(crate) fn switch_to(&mut self, w: SurfaceKey) -> Result<()> {
        let state = self.live_window(w)?.state;
        if state == WindowState::Minimized {
            self.restore(w)?;
        }
        self.activate(w, None)?;
        self.emit(Notification::SwitcherPreview {
            window: w,
            on: false,
        });
        Ok(())
    }
}
