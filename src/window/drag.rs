//! Interactive window move and resize.
//!
//! Only one drag exists at a time. Moves follow the pointer incrementally;
//! resizes are recomputed from the bounds captured when the drag started.

use crate::error::Result;
use crate::events::PointerButton;
use crate::geometry::{Bounds, Point, Size};
use crate::layout::floating::{ResizeEdge, apply_resize, border_edge_at};
use crate::ownership::SurfaceKey;
use crate::render::Renderer;

use super::{CaptionButton, WindowManager, WindowState, WindowStyleFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize(ResizeEdge),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowDrag {
    pub window: SurfaceKey,
    pub kind: DragKind,
    pub button: PointerButton,
    last: Point,
    start_pointer: Point,
    start_bounds: Bounds,
}

impl<R: Renderer> WindowManager<R> {
    pub fn window_drag(&self) -> Option<&WindowDrag> {
        self.window_drag.as_ref()
    }

    /// Caption button under `pt`, given in window-outer coordinates.
    pub fn caption_button_at(&self, w: SurfaceKey, pt: Point) -> Option<CaptionButton> {
        let data = self.window(w)?;
        let width = self.bounds(w).width;
        data.style
            .caption_button_rects(width)
            .into_iter()
            .find(|(_, r)| r.contains(pt))
            .map(|(b, _)| b)
    }

    /// What clicking a caption button does. Ignored for disabled windows and
    /// windows in design mode.
    pub fn press_caption_button(&mut self, w: SurfaceKey, button: CaptionButton) -> Result<()> {
        let state = self.live_window(w)?.state;
        if !self.is_enabled(w) || self.design_mode(w) {
            return Ok(());
        }
        tracing::debug!(window = ?w, ?button, "caption button");
        match button {
            CaptionButton::Minimize => {
                if state == WindowState::Minimized {
                    self.restore(w)?;
                    self.activate(w, None)
                } else {
                    self.set_window_state(w, WindowState::Minimized)?;
                    self.deactivate(w)
                }
            }
            CaptionButton::Maximize => {
                let target = if state == WindowState::Maximized {
                    WindowState::Normal
                } else {
                    WindowState::Maximized
                };
                self.set_window_state(w, target)?;
                self.activate(w, None)
            }
            CaptionButton::Close => self.close(w),
        }
    }

    /// Pointer pressed over window `w` at `screen`. Handles caption buttons,
    /// the border and caption (move or resize) and the resize grip. Returns
    /// whether the press was consumed.
    pub fn window_pointer_down(
        &mut self,
        w: SurfaceKey,
        screen: Point,
        button: PointerButton,
    ) -> Result<bool> {
        let data = self.live_window(w)?;
        let style = data.style;
        let state = data.state;
        if !self.is_enabled(w) || self.design_mode(w) {
            return Ok(false);
        }
        let Some(outer) = self.screen_bounds(w) else {
            return Ok(false);
        };
        let local = Point::new(screen.x - outer.x, screen.y - outer.y);
        if button == PointerButton::Left
            && let Some(b) = self.caption_button_at(w, local)
        {
            self.press_caption_button(w, b)?;
            return Ok(true);
        }

        let padding = self.padding(w);
        let pt = Point::new(local.x - padding.left, local.y - padding.top);
        let client = self.client_bounds(w);
        let size = Size::new(client.width, client.height);
        let resizable = style.flags().contains(WindowStyleFlags::RESIZABLE);

        let kind = if client.contains(pt) {
            let grip = self.config.resize_grip;
            if style.has_grip()
                && state == WindowState::Normal
                && pt.x >= size.width - grip
                && pt.y >= size.height - grip
            {
                DragKind::Resize(ResizeEdge::BottomRight)
            } else {
                return Ok(false);
            }
        } else {
            self.activate(w, None)?;
            if state != WindowState::Normal || button != PointerButton::Left {
                return Ok(true);
            }
            match border_edge_at(pt, size) {
                Some(edge) if resizable => DragKind::Resize(edge),
                _ => DragKind::Move,
            }
        };
        if matches!(kind, DragKind::Resize(_)) {
            self.activate(w, None)?;
        }
        tracing::debug!(window = ?w, ?kind, "window drag started");
        self.window_drag = Some(WindowDrag {
            window: w,
            kind,
            button,
            last: screen,
            start_pointer: screen,
            start_bounds: self.bounds(w),
        });
        Ok(true)
    }

    /// Pointer moved to `screen`. A move with no buttons held ends the drag.
    pub fn window_pointer_move(&mut self, screen: Point, buttons_held: bool) -> Result<bool> {
        let Some(mut drag) = self.window_drag else {
            return Ok(false);
        };
        if !buttons_held {
            self.end_window_drag();
            return Ok(true);
        }
        let w = drag.window;
        let data = self.live_window(w)?;
        let min = data.style.min_size();
        match drag.kind {
            DragKind::Move => {
                let dx = screen.x - drag.last.x;
                let dy = screen.y - drag.last.y;
                drag.last = screen;
                if dx != 0.0 || dy != 0.0 {
                    let b = self.bounds(w).offset(dx, dy, 0.0, 0.0);
                    self.set_bounds(w, b)?;
                }
            }
            DragKind::Resize(edge) => {
                drag.last = screen;
                let delta = Point::new(
                    screen.x - drag.start_pointer.x,
                    screen.y - drag.start_pointer.y,
                );
                let b = apply_resize(drag.start_bounds, edge, delta, min);
                if b != self.bounds(w) {
                    self.set_bounds(w, b)?;
                }
            }
        }
        self.window_drag = Some(drag);
        Ok(true)
    }

    /// Pointer released. Only the button that started the drag ends it.
    pub fn window_pointer_up(&mut self, button: PointerButton) -> bool {
        match self.window_drag {
            Some(drag) if drag.button == button => {
                self.end_window_drag();
                true
            }
            _ => false,
        }
    }

    fn end_window_drag(&mut self) {
        if let Some(drag) = self.window_drag.take() {
            tracing::debug!(window = ?drag.window, kind = ?drag.kind, "window drag ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::{SurfaceId, SurfaceKey};
    use crate::surface::SurfaceKind;
    use crate::window::WindowStyle;

    fn setup() -> (WindowManager, SurfaceKey) {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let desk = wm
            .create_desktop(d, Bounds::new(0.0, 0.0, 80.0, 24.0))
            .unwrap();
        let w = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Window(WindowStyle::framed()))
            .unwrap();
        wm.set_parent(w, Some(desk)).unwrap();
        wm.set_bounds(w, Bounds::new(10.0, 5.0, 30.0, 10.0)).unwrap();
        wm.flush_deferred();
        (wm, w)
    }

    #[test]
    fn caption_drag_moves_incrementally() {
        let (mut wm, w) = setup();
        assert!(wm.window_pointer_down(w, Point::new(15.0, 6.0), PointerButton::Left).unwrap());
        assert_eq!(wm.window_drag().map(|d| d.kind), Some(DragKind::Move));
        wm.window_pointer_move(Point::new(18.0, 8.0), true).unwrap();
        wm.window_pointer_move(Point::new(19.0, 8.0), true).unwrap();
        assert_eq!(wm.bounds(w), Bounds::new(14.0, 7.0, 30.0, 10.0));
        assert!(!wm.window_pointer_up(PointerButton::Right));
        assert!(wm.window_pointer_up(PointerButton::Left));
        assert!(wm.window_drag().is_none());
    }

    #[test]
    fn border_drag_resizes_from_start_bounds() {
        let (mut wm, w) = setup();
        // Right border, below the caption.
        wm.window_pointer_down(w, Point::new(39.0, 9.0), PointerButton::Left)
            .unwrap();
        assert_eq!(
            wm.window_drag().map(|d| d.kind),
            Some(DragKind::Resize(ResizeEdge::Right))
        );
        wm.window_pointer_move(Point::new(44.0, 9.0), true).unwrap();
        wm.window_pointer_move(Point::new(42.0, 9.0), true).unwrap();
        assert_eq!(wm.bounds(w), Bounds::new(10.0, 5.0, 33.0, 10.0));
        wm.window_pointer_move(Point::new(0.0, 9.0), true).unwrap();
        assert_eq!(wm.bounds(w).width, WindowStyle::framed().min_size().width);
    }

    #[test]
    fn grip_resizes_and_move_without_buttons_ends() {
        let (mut wm, w) = setup();
        // Bottom-right cell of the client area.
        wm.window_pointer_down(w, Point::new(38.0, 13.0), PointerButton::Left)
            .unwrap();
        assert_eq!(
            wm.window_drag().map(|d| d.kind),
            Some(DragKind::Resize(ResizeEdge::BottomRight))
        );
        wm.window_pointer_move(Point::new(40.0, 15.0), true).unwrap();
        assert_eq!(wm.bounds(w), Bounds::new(10.0, 5.0, 32.0, 12.0));
        wm.window_pointer_move(Point::new(41.0, 15.0), false).unwrap();
        assert!(wm.window_drag().is_none());
    }

    #[test]
    fn client_clicks_are_not_consumed() {
        let (mut wm, w) = setup();
        assert!(!wm.window_pointer_down(w, Point::new(20.0, 9.0), PointerButton::Left).unwrap());
        assert!(wm.window_drag().is_none());
    }

    #[test]
    fn maximize_button_toggles() {
        let (mut wm, w) = setup();
        let rects = WindowStyle::framed().caption_button_rects(30.0);
        let max = rects
            .iter()
            .find(|(b, _)| *b == CaptionButton::Maximize)
            .map(|(_, r)| *r)
            .unwrap();
        let click = Point::new(10.0 + max.x + 1.0, 5.0 + max.y);
        wm.window_pointer_down(w, click, PointerButton::Left).unwrap();
        assert_eq!(wm.window_state(w), Some(WindowState::Maximized));
        assert!(wm.window_drag().is_none());
        assert!(wm.window_pointer_down(w, Point::new(5.0, 0.0), PointerButton::Left).unwrap());
        assert!(wm.window_drag().is_none());
    }
}
