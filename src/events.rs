//! Input boundary: surface-targeted events and the dispatcher that derives
//! them from terminal input.

use bitflags::bitflags;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::error::{DisplayError, Result};
use crate::geometry::{Bounds, Point};
use crate::ownership::{DisplayKey, SurfaceKey};
use crate::render::Renderer;
use crate::window::{Notification, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    BackTab,
    Enter,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Char(char),
    Other,
}

impl Key {
    /// Keys a window uses for traversal and its default/cancel actions.
    pub fn is_navigation(self) -> bool {
        !matches!(self, Key::Char(_) | Key::Other)
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0x01;
        const CTRL = 0x02;
        const ALT = 0x04;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(m: KeyModifiers) -> Self {
        let mut out = Modifiers::empty();
        out.set(Modifiers::SHIFT, m.contains(KeyModifiers::SHIFT));
        out.set(Modifiers::CTRL, m.contains(KeyModifiers::CONTROL));
        out.set(Modifiers::ALT, m.contains(KeyModifiers::ALT));
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

impl From<MouseButton> for PointerButton {
    fn from(b: MouseButton) -> Self {
        match b {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Middle => PointerButton::Middle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEventKind {
    Click,
    PointerDown,
    PointerUp,
    ContextAction,
    GainedFocus,
    LostFocus,
    KeyDown(Key),
    KeyUp(Key),
}

/// An input event aimed at one surface. `local` is in the target's client
/// coordinates, `screen` in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceEvent {
    pub target: SurfaceKey,
    pub kind: SurfaceEventKind,
    pub local: Point,
    pub screen: Point,
    pub button: Option<PointerButton>,
    pub modifiers: Modifiers,
}

impl<R: Renderer> WindowManager<R> {
    /// Let the manager react to `ev` first: window chrome, activation,
    /// keyboard traversal and the switcher. Events it does not consume are
    /// queued as `Notification::Input` for the target's own handler.
    pub fn handle_surface_event(&mut self, ev: SurfaceEvent) -> Result<bool> {
        self.live(ev.target)?;
        let consumed = match ev.kind {
            SurfaceEventKind::PointerDown => self.surface_pointer_down(&ev)?,
            SurfaceEventKind::PointerUp => ev.button.is_some_and(|b| self.window_pointer_up(b)),
            SurfaceEventKind::KeyDown(key) => self.surface_key_down(&ev, key)?,
            _ => false,
        };
        if !consumed {
            self.emit(Notification::Input(ev));
        }
        Ok(consumed)
    }

    fn surface_pointer_down(&mut self, ev: &SurfaceEvent) -> Result<bool> {
        let target = ev.target;
        if self.nodes[target].is_window()
            && let Some(button) = ev.button
            && self.window_pointer_down(target, ev.screen, button)?
        {
            return Ok(true);
        }
        if self.nodes[target].is_window() {
            self.activate(target, None)?;
        } else if let Some(w) = self.find_parent_window(target) {
            self.activate(w, Some(target))?;
        } else {
            self.focus(target);
        }
        Ok(false)
    }

    fn surface_key_down(&mut self, ev: &SurfaceEvent, key: Key) -> Result<bool> {
        let display = self.nodes[ev.target].display;
        if ev.modifiers.contains(Modifiers::ALT) && key == Key::Char('`') {
            if let Some(desk) = self.desktop(display) {
                self.switcher_advance(desk);
            }
            return Ok(true);
        }
        if self.switcher_preview().is_some() {
            // Terminals do not report Alt being released; the next key
            // without it ends the switch.
            self.switcher_commit();
        }
        if self.is_input_key(ev.target, key) {
            return Ok(false);
        }
        let window = if self.nodes[ev.target].is_window() {
            Some(ev.target)
        } else {
            self.find_parent_window(ev.target)
        };
        match window {
            Some(w) => self.window_key(w, key),
            None => Ok(false),
        }
    }

    /// Global pointer motion: feeds an active design drag or window drag.
    pub fn pointer_move(
        &mut self,
        screen: Point,
        buttons_held: bool,
        modifiers: Modifiers,
    ) -> Result<bool> {
        if let Some(root) = self.design_dragging() {
            return self.design_pointer_move(
                root,
                screen,
                buttons_held,
                modifiers.contains(Modifiers::CTRL),
            );
        }
        self.window_pointer_move(screen, buttons_held)
    }

    /// Point in root coordinates translated into `s`'s client coordinates.
    pub fn screen_to_local(&self, s: SurfaceKey, screen: Point) -> Point {
        match self.map_point(s, Point::ZERO, None) {
            Ok(origin) => Point::new(screen.x - origin.x, screen.y - origin.y),
            Err(_) => screen,
        }
    }
}

/// Turns terminal events for one display into surface events.
#[derive(Debug)]
pub struct EventDispatcher {
    display: DisplayKey,
    running: bool,
    pressed: Option<(SurfaceKey, PointerButton)>,
}

impl EventDispatcher {
    pub fn new(display: DisplayKey) -> Self {
        Self {
            display,
            running: false,
            pressed: None,
        }
    }

    pub fn display(&self) -> DisplayKey {
        self.display
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start<R: Renderer>(&mut self, wm: &WindowManager<R>) -> Result<()> {
        if self.running {
            return Err(DisplayError::InvalidState("dispatcher already running"));
        }
        if wm.desktop(self.display).is_none() {
            return Err(DisplayError::InvalidState("display has no desktop"));
        }
        self.running = true;
        tracing::debug!(display = ?self.display, "dispatcher started");
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.pressed = None;
    }

    /// Route one terminal event. Returns whether anything consumed it.
    pub fn dispatch<R: Renderer>(&mut self, wm: &mut WindowManager<R>, event: &Event) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        let Some(desk) = wm.desktop(self.display) else {
            return Ok(false);
        };
        match event {
            Event::Resize(width, height) => {
                let bounds = Bounds::new(0.0, 0.0, f64::from(*width), f64::from(*height));
                wm.set_bounds(desk, bounds)?;
                Ok(true)
            }
            Event::Mouse(mouse) => self.dispatch_mouse(wm, desk, mouse),
            Event::Key(key) => self.dispatch_key(wm, desk, key),
            _ => Ok(false),
        }
    }

    fn dispatch_mouse<R: Renderer>(
        &mut self,
        wm: &mut WindowManager<R>,
        desk: SurfaceKey,
        mouse: &MouseEvent,
    ) -> Result<bool> {
        let screen = Point::new(f64::from(mouse.column), f64::from(mouse.row));
        let modifiers = Modifiers::from(mouse.modifiers);
        let ctrl = modifiers.contains(Modifiers::CTRL);
        match mouse.kind {
            MouseEventKind::Down(b) => {
                let button = PointerButton::from(b);
                let Some(target) = wm.hit_test(desk, screen) else {
                    return Ok(false);
                };
                if let Some(root) = wm.design_root_for(target)
                    && button == PointerButton::Left
                    && wm.design_pointer_down(root, target, screen, ctrl)?
                {
                    return Ok(true);
                }
                if !wm.is_enabled(target) || wm.design_mode(target) {
                    tracing::trace!(surface = ?target, "pointer down filtered");
                    return Ok(false);
                }
                self.pressed = Some((target, button));
                let ev = self.event(wm, target, SurfaceEventKind::PointerDown, screen, Some(button), modifiers);
                let consumed = wm.handle_surface_event(ev)?;
                if !consumed && button == PointerButton::Right {
                    let ev = self.event(wm, target, SurfaceEventKind::ContextAction, screen, Some(button), modifiers);
                    wm.handle_surface_event(ev)?;
                }
                Ok(consumed)
            }
            MouseEventKind::Up(b) => {
                let button = PointerButton::from(b);
                let pressed = self.pressed.take();
                if let Some(root) = wm.design_dragging() {
                    return wm.design_pointer_up(root, ctrl);
                }
                if wm.window_pointer_up(button) {
                    return Ok(true);
                }
                let Some(target) = wm.hit_test(desk, screen) else {
                    return Ok(false);
                };
                if !wm.is_enabled(target) || wm.design_mode(target) {
                    return Ok(false);
                }
                let ev = self.event(wm, target, SurfaceEventKind::PointerUp, screen, Some(button), modifiers);
                let consumed = wm.handle_surface_event(ev)?;
                if pressed == Some((target, button)) && button == PointerButton::Left {
                    let ev = self.event(wm, target, SurfaceEventKind::Click, screen, Some(button), modifiers);
                    wm.handle_surface_event(ev)?;
                }
                Ok(consumed)
            }
            MouseEventKind::Drag(_) => wm.pointer_move(screen, true, modifiers),
            MouseEventKind::Moved => wm.pointer_move(screen, false, modifiers),
            _ => Ok(false),
        }
    }

    fn dispatch_key<R: Renderer>(
        &mut self,
        wm: &mut WindowManager<R>,
        desk: SurfaceKey,
        key: &KeyEvent,
    ) -> Result<bool> {
        let target = wm.focused().unwrap_or(desk);
        if !wm.is_enabled(target) {
            return Ok(false);
        }
        let k = Key::from(key.code);
        let kind = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => SurfaceEventKind::KeyDown(k),
            KeyEventKind::Release => SurfaceEventKind::KeyUp(k),
        };
        let screen = wm
            .screen_bounds(target)
            .map(|b| b.origin())
            .unwrap_or(Point::ZERO);
        let ev = self.event(wm, target, kind, screen, None, Modifiers::from(key.modifiers));
        wm.handle_surface_event(ev)
    }

    fn event<R: Renderer>(
        &self,
        wm: &WindowManager<R>,
        target: SurfaceKey,
        kind: SurfaceEventKind,
        screen: Point,
        button: Option<PointerButton>,
        modifiers: Modifiers,
    ) -> SurfaceEvent {
        SurfaceEvent {
            target,
            kind,
            local: wm.screen_to_local(target, screen),
            screen,
            button,
            modifiers,
        }
    }
}
