pub mod decorator;
pub mod drag;

mod activation;
mod selection;
mod state;
mod window_manager;

use bitflags::bitflags;

use crate::constants::{
    CAPTION_BUTTON_GAP, CAPTION_BUTTON_MARGIN, CAPTION_BUTTON_WIDTH, CAPTION_MIN_WIDTH,
};
use crate::geometry::{Bounds, Padding, Size};
use crate::ownership::SurfaceKey;

pub use window_manager::{Notification, WindowManager};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowStyleFlags: u8 {
        const CLOSE_BUTTON = 0x01;
        const MIN_BUTTON = 0x02;
        const MAX_BUTTON = 0x04;
        const RESIZABLE = 0x08;
        const RESIZE_GRIP = 0x10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// What Esc does when nothing focused inside the window consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelAction {
    /// Close the window if its style has a close button.
    #[default]
    CloseIfButton,
    /// Queue a `Notification::CancelAction` for the application.
    Notify,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionButton {
    Minimize,
    Maximize,
    Close,
}

/// Reusable chrome description shared by any number of windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStyle {
    border_width: f64,
    caption_height: f64,
    flags: WindowStyleFlags,
}

impl WindowStyle {
    pub const PLAIN: WindowStyle = WindowStyle {
        border_width: 0.0,
        caption_height: 0.0,
        flags: WindowStyleFlags::empty(),
    };

    pub const fn new(border_width: f64, caption_height: f64, flags: WindowStyleFlags) -> Self {
        Self {
            border_width,
            caption_height,
            flags,
        }
    }

    /// One-cell border, one-row caption, every button, resizable with a grip.
    pub const fn framed() -> Self {
        Self::new(1.0, 1.0, WindowStyleFlags::all())
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    pub fn caption_height(&self) -> f64 {
        self.caption_height
    }

    pub fn flags(&self) -> WindowStyleFlags {
        self.flags
    }

    pub fn has_grip(&self) -> bool {
        self.flags
            .contains(WindowStyleFlags::RESIZABLE | WindowStyleFlags::RESIZE_GRIP)
    }

    pub fn padding(&self) -> Padding {
        let bw = self.border_width;
        Padding::new(bw, bw + self.caption_height, bw, bw)
    }

    pub fn min_size(&self) -> Size {
        let caption_w = if self.caption_height > 0.0 {
            CAPTION_MIN_WIDTH
        } else {
            0.0
        };
        Size::new(
            caption_w + self.border_width * 2.0,
            self.caption_height + self.border_width * 2.0,
        )
    }

    /// Outer size needed to show a client area of `client`.
    pub fn size_from_client(&self, client: Size) -> Size {
        if self.border_width == 0.0 && self.caption_height == 0.0 {
            return client;
        }
        Size::new(
            client.width + self.border_width * 2.0,
            client.height + self.border_width * 2.0 + self.caption_height,
        )
    }

    pub fn clamp_bounds(&self, b: Bounds) -> Bounds {
        let min = self.min_size();
        Bounds::new(b.x, b.y, b.width.max(min.width), b.height.max(min.height))
    }

    pub fn minimized_bounds(&self) -> Bounds {
        Bounds::from_parts(crate::geometry::Point::ZERO, self.min_size())
    }

    /// Parent client area grown so the border sits just outside it.
    pub fn maximized_bounds(&self, parent_client: Bounds) -> Bounds {
        let bw = self.border_width;
        parent_client.offset(-bw, -bw, bw * 2.0, bw * 2.0)
    }

    /// Caption buttons present in this style, left to right.
    pub fn caption_buttons(&self) -> Vec<CaptionButton> {
        if self.caption_height <= 0.0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        if self.flags.contains(WindowStyleFlags::MIN_BUTTON) {
            out.push(CaptionButton::Minimize);
        }
        if self.flags.contains(WindowStyleFlags::MAX_BUTTON) {
            out.push(CaptionButton::Maximize);
        }
        if self.flags.contains(WindowStyleFlags::CLOSE_BUTTON) {
            out.push(CaptionButton::Close);
        }
        out
    }

    /// Button rectangles in window-outer coordinates, laid out from the right
    /// end of the caption strip.
    pub fn caption_button_rects(&self, width: f64) -> Vec<(CaptionButton, Bounds)> {
        let buttons = self.caption_buttons();
        let mut out = Vec::with_capacity(buttons.len());
        let mut r = CAPTION_BUTTON_MARGIN;
        for button in buttons.into_iter().rev() {
            let x = width - self.border_width - r - CAPTION_BUTTON_WIDTH;
            out.push((
                button,
                Bounds::new(
                    x,
                    self.border_width,
                    CAPTION_BUTTON_WIDTH,
                    self.caption_height,
                ),
            ));
            r += CAPTION_BUTTON_WIDTH + CAPTION_BUTTON_GAP;
        }
        out.reverse();
        out
    }
}

/// Window extension of a surface node.
#[derive(Debug, Clone)]
pub struct WindowData {
    pub(crate) style: WindowStyle,
    pub(crate) state: WindowState,
    pub(crate) restore_bounds: Option<Bounds>,
    pub(crate) was_maximized: bool,
    pub(crate) active: bool,
    pub(crate) topmost: bool,
    pub(crate) owner: Option<SurfaceKey>,
    pub(crate) owned_raise: bool,
    pub(crate) selected: Option<SurfaceKey>,
    pub(crate) default_action: bool,
    pub(crate) cancel_action: CancelAction,
}

impl WindowData {
    pub(crate) fn new(style: WindowStyle) -> Self {
        Self {
            style,
            state: WindowState::Normal,
            restore_bounds: None,
            was_maximized: false,
            active: false,
            topmost: false,
            owner: None,
            owned_raise: false,
            selected: None,
            default_action: false,
            cancel_action: CancelAction::default(),
        }
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn restore_bounds(&self) -> Option<Bounds> {
        self.restore_bounds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_topmost(&self) -> bool {
        self.topmost
    }

    pub fn owner(&self) -> Option<SurfaceKey> {
        self.owner
    }

    pub fn owned_raise(&self) -> bool {
        self.owned_raise
    }

    pub fn cancel_action(&self) -> CancelAction {
        self.cancel_action
    }

    /// Paint layer among siblings: topmost above owned-raise above normal.
    pub(crate) fn layer(&self) -> u8 {
        if self.topmost {
            2
        } else if self.owned_raise {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_padding_reserves_caption() {
        let s = WindowStyle::framed();
        assert_eq!(s.padding(), Padding::new(1.0, 2.0, 1.0, 1.0));
        assert_eq!(
            s.size_from_client(Size::new(10.0, 5.0)),
            Size::new(12.0, 8.0)
        );
        assert_eq!(WindowStyle::PLAIN.size_from_client(Size::new(3.0, 4.0)), Size::new(3.0, 4.0));
    }

    #[test]
    fn bounds_clamp_to_minimum() {
        let s = WindowStyle::framed();
        let min = s.min_size();
        assert_eq!(min, Size::new(CAPTION_MIN_WIDTH + 2.0, 3.0));
        let b = s.clamp_bounds(Bounds::new(4.0, 4.0, 1.0, 1.0));
        assert_eq!(b, Bounds::new(4.0, 4.0, min.width, min.height));
        assert_eq!(s.minimized_bounds(), Bounds::new(0.0, 0.0, min.width, min.height));
    }

    #[test]
    fn maximized_hides_border_outside_parent() {
        let s = WindowStyle::framed();
        assert_eq!(
            s.maximized_bounds(Bounds::new(0.0, 0.0, 80.0, 24.0)),
            Bounds::new(-1.0, -1.0, 82.0, 26.0)
        );
    }

    #[test]
    fn caption_buttons_pack_from_the_right() {
        let s = WindowStyle::framed();
        let rects = s.caption_button_rects(30.0);
        let kinds: Vec<_> = rects.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![CaptionButton::Minimize, CaptionButton::Maximize, CaptionButton::Close]
        );
        let close = rects[2].1;
        assert_eq!(close.right(), 30.0 - 1.0 - CAPTION_BUTTON_MARGIN);
        assert!(rects[1].1.right() + CAPTION_BUTTON_GAP <= close.x);
        assert!(WindowStyle::PLAIN.caption_button_rects(30.0).is_empty());
    }
}
