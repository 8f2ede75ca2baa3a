//! Draw a display's surface tree into a `ratatui` buffer.
//!
//! Geometry comes from the window manager, so any [`Renderer`] works. Surfaces
//! paint back to front in paint order, each clipped to its parent's client
//! area. Design outlines, resize handles and open menus go on top.

use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::geometry::{Bounds, Point};
use crate::ownership::{DisplayKey, SurfaceKey};
use crate::window::WindowManager;
use crate::window::decorator::{WindowChrome, WindowDecorator};

use super::Renderer;

/// Cells of `b` that fall inside `clip`.
pub fn clip_rect(b: Bounds, clip: Rect) -> Option<Rect> {
    let x0 = b.x.floor().max(f64::from(clip.x));
    let y0 = b.y.floor().max(f64::from(clip.y));
    let x1 = b.right().ceil().min(f64::from(clip.right()));
    let y1 = b.bottom().ceil().min(f64::from(clip.bottom()));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

pub fn paint<R: Renderer>(
    wm: &WindowManager<R>,
    display: DisplayKey,
    area: Rect,
    buf: &mut Buffer,
    decorator: &dyn WindowDecorator,
) {
    let Some(desk) = wm.desktop(display) else {
        return;
    };
    paint_surface(wm, desk, area, buf, decorator);
    for session in wm.designs.iter() {
        paint_design(wm, session.root(), area, buf);
    }
    paint_menus(wm, display, area, buf);
}

fn paint_surface<R: Renderer>(
    wm: &WindowManager<R>,
    s: SurfaceKey,
    clip: Rect,
    buf: &mut Buffer,
    decorator: &dyn WindowDecorator,
) {
    let Some(node) = wm.surface(s) else {
        return;
    };
    if node.is_destroyed() || !node.visible_flag() {
        return;
    }
    let Some(outer) = wm.screen_bounds(s) else {
        return;
    };
    let Some(visible) = clip_rect(outer, clip) else {
        return;
    };
    let padding = node.padding();
    let client = outer.content_rect(padding);

    if let Some(window) = node.as_window() {
        if let Some(inner) = clip_rect(client, clip) {
            buf.set_style(inner, Style::reset());
            for y in inner.top()..inner.bottom() {
                for x in inner.left()..inner.right() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(" ");
                    }
                }
            }
        }
        let chrome = WindowChrome {
            outer,
            clip,
            title: node.text(),
            active: window.is_active(),
            style: window.style(),
            state: window.state(),
        };
        decorator.render_window(buf, &chrome);
    } else if !node.text().is_empty()
        && let Some(inner) = clip_rect(client, visible)
    {
        let mut style = Style::default();
        if !wm.is_enabled(s) {
            style = style.fg(Color::DarkGray);
        }
        if wm.has_focus(s) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let skip = (f64::from(inner.x) - client.x.floor()).max(0.0) as usize;
        let text: String = node.text().chars().skip(skip).collect();
        if f64::from(inner.y) <= client.y {
            buf.set_stringn(inner.x, inner.y, text, usize::from(inner.width), style);
        }
    }

    let Some(child_clip) = clip_rect(client, clip) else {
        return;
    };
    for child in wm.paint_order(s) {
        paint_surface(wm, child, child_clip, buf, decorator);
    }
}

fn frame(buf: &mut Buffer, b: Bounds, clip: Rect, style: Style) {
    let left = b.x.floor() as i32;
    let top = b.y.floor() as i32;
    let right = b.right().ceil() as i32 - 1;
    let bottom = b.bottom().ceil() as i32 - 1;
    let mut put = |x: i32, y: i32, symbol: &str| {
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
            && clip.contains(ratatui::layout::Position::new(x, y))
            && let Some(cell) = buf.cell_mut((x, y))
        {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    };
    for x in left..=right {
        put(x, top, "┄");
        put(x, bottom, "┄");
    }
    for y in top..=bottom {
        put(left, y, "┆");
        put(right, y, "┆");
    }
}

fn paint_design<R: Renderer>(wm: &WindowManager<R>, root: SurfaceKey, area: Rect, buf: &mut Buffer) {
    let Some(parent) = wm.parent(root) else {
        return;
    };
    let Ok(origin) = wm.map_point(parent, Point::ZERO, None) else {
        return;
    };
    let to_screen = |b: Bounds| b.offset(origin.x, origin.y, 0.0, 0.0);
    let style = Style::default().fg(Color::Yellow);
    for s in wm.design_selection(root) {
        if let Ok(outline) = wm.design_outline(root, s) {
            frame(buf, to_screen(outline), area, style);
        }
    }
    if let Some(handle) = wm.design_resize_handle(root)
        && let Some(rect) = clip_rect(to_screen(handle), area)
    {
        buf.set_style(rect, Style::default().bg(Color::Yellow));
    }
}

fn paint_menus<R: Renderer>(wm: &WindowManager<R>, display: DisplayKey, area: Rect, buf: &mut Buffer) {
    for (_, menu) in wm.menus.iter() {
        if menu.display() != display {
            continue;
        }
        let Some(at) = menu.shown_at() else {
            continue;
        };
        let width = menu
            .items
            .iter()
            .map(|i| i.text.chars().count())
            .max()
            .unwrap_or(0)
            + 4;
        let b = Bounds::new(at.x, at.y, width as f64, menu.items.len() as f64);
        let Some(rect) = clip_rect(b, area) else {
            continue;
        };
        buf.set_style(rect, Style::default().bg(Color::Gray).fg(Color::Black));
        for (row, item) in menu.items.iter().enumerate() {
            let y = rect.y + row as u16;
            if y >= rect.bottom() {
                break;
            }
            let mut style = Style::default().bg(Color::Gray).fg(Color::Black);
            if !item.enabled {
                style = style.fg(Color::DarkGray);
            }
            let line = if item.is_separator() {
                "─".repeat(width)
            } else if item.submenu.is_some() {
                format!(" {:<w$} ›", item.text, w = width - 3)
            } else {
                format!(" {}", item.text)
            };
            buf.set_stringn(rect.x, y, line, usize::from(rect.width), style);
        }
    }
}
