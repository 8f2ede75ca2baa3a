use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::geometry::Bounds;

use super::{CaptionButton, WindowState, WindowStyle};

/// Everything a decorator needs to paint one window frame. `outer` is in
/// screen cells and may extend past `clip` (maximized windows hide their
/// border outside the parent).
#[derive(Debug, Clone)]
pub struct WindowChrome<'a> {
    pub outer: Bounds,
    pub clip: Rect,
    pub title: &'a str,
    pub active: bool,
    pub style: WindowStyle,
    pub state: WindowState,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, buffer: &mut Buffer, chrome: &WindowChrome<'_>);
}

#[derive(Debug)]
pub struct OpenStepDecorator;

fn put(buffer: &mut Buffer, clip: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < i32::from(clip.x)
        || y < i32::from(clip.y)
        || x >= i32::from(clip.x) + i32::from(clip.width)
        || y >= i32::from(clip.y) + i32::from(clip.height)
    {
        return;
    }
    if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
        && let Some(cell) = buffer.cell_mut((x, y))
    {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

impl WindowDecorator for OpenStepDecorator {
    fn render_window(&self, buffer: &mut Buffer, chrome: &WindowChrome<'_>) {
        let focused_header_style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let normal_header_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Reset);

        let header_style = if chrome.active {
            focused_header_style
        } else {
            normal_header_style
        };

        let clip = chrome.clip;
        let left = chrome.outer.x.floor() as i32;
        let top = chrome.outer.y.floor() as i32;
        let right = (chrome.outer.right().ceil() as i32) - 1;
        let bottom = (chrome.outer.bottom().ceil() as i32) - 1;
        if right < left || bottom < top {
            return;
        }
        let bw = chrome.style.border_width().round() as i32;
        let caption = chrome.style.caption_height().round() as i32;

        // Caption strip, title and buttons
        if caption > 0 {
            let inner_left = left + bw;
            let inner_right = right - bw;
            for y in (top + bw)..(top + bw + caption) {
                for x in inner_left..=inner_right {
                    put(buffer, clip, x, y, " ", header_style);
                }
            }
            let buttons = chrome.style.caption_button_rects(chrome.outer.width);
            let reserved = buttons
                .first()
                .map(|(_, b)| b.x.floor() as i32)
                .unwrap_or(chrome.outer.width as i32 - bw);
            let header_width = (reserved - bw).max(0);
            let title: String = chrome.title.chars().take(header_width as usize).collect();
            let title_len = title.chars().count() as i32;
            let start_x = inner_left + (header_width - title_len) / 2;
            for (idx, ch) in title.chars().enumerate() {
                put(buffer, clip, start_x + idx as i32, top + bw, &ch.to_string(), header_style);
            }
            for (button, rect) in buttons {
                let glyph = match (button, chrome.state) {
                    (CaptionButton::Minimize, WindowState::Minimized) => "[^]",
                    (CaptionButton::Minimize, _) => "[_]",
                    (CaptionButton::Maximize, WindowState::Maximized) => "[=]",
                    (CaptionButton::Maximize, _) => "[+]",
                    (CaptionButton::Close, _) => "[x]",
                };
                let bx = left + rect.x.floor() as i32;
                for (idx, ch) in glyph.chars().enumerate() {
                    put(buffer, clip, bx + idx as i32, top + bw, &ch.to_string(), header_style);
                }
            }
        }

        if bw <= 0 {
            return;
        }
        // Borders
        for x in left..=right {
            let (t, b) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            put(buffer, clip, x, top, t, border_style);
            put(buffer, clip, x, bottom, b, border_style);
        }
        for y in (top + 1)..bottom {
            put(buffer, clip, left, y, "│", border_style);
            put(buffer, clip, right, y, "│", border_style);
        }
        if chrome.style.has_grip() && chrome.state == WindowState::Normal {
            put(buffer, clip, right, bottom, "◢", border_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).map(|c| c.symbol()).unwrap_or("")
    }

    #[test]
    fn paints_frame_title_and_close_button() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        let chrome = WindowChrome {
            outer: Bounds::new(2.0, 1.0, 24.0, 6.0),
            clip: area,
            title: "Files",
            active: true,
            style: WindowStyle::framed(),
            state: WindowState::Normal,
        };
        OpenStepDecorator.render_window(&mut buf, &chrome);
        assert_eq!(symbol(&buf, 2, 1), "┌");
        assert_eq!(symbol(&buf, 25, 6), "◢");
        assert_eq!(symbol(&buf, 2, 6), "└");
        let row: String = (3..25).map(|x| symbol(&buf, x, 2).to_string()).collect();
        assert!(row.contains("Files"));
        assert!(row.ends_with("[x] "));
    }

    #[test]
    fn offscreen_border_is_clipped() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let chrome = WindowChrome {
            outer: Bounds::new(-1.0, -1.0, 22.0, 7.0),
            clip: area,
            title: "",
            active: false,
            style: WindowStyle::framed(),
            state: WindowState::Maximized,
        };
        OpenStepDecorator.render_window(&mut buf, &chrome);
        assert_eq!(symbol(&buf, 0, 0), " ");
        assert_ne!(symbol(&buf, 0, 1), "│");
    }
}
