//! Resize math for free-floating windows.

use crate::geometry::{Bounds, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Border zone under a point given in client coordinates, for a pointer that
/// is outside the client area and below the caption. Returns `None` when the
/// point is inside the client area or above it.
pub fn border_edge_at(pt: Point, client: Size) -> Option<ResizeEdge> {
    if pt.y < 0.0 {
        return None;
    }
    let left = pt.x < 0.0;
    let right = pt.x >= client.width;
    let bottom = pt.y >= client.height;
    match (left, right, bottom) {
        (true, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, true) => Some(ResizeEdge::BottomRight),
        (true, _, false) => Some(ResizeEdge::Left),
        (_, true, false) => Some(ResizeEdge::Right),
        (false, false, true) => Some(ResizeEdge::Bottom),
        (false, false, false) => None,
    }
}

/// New bounds after dragging `edge` by `delta` from the drag start. The
/// opposite edge stays put when the minimum size kicks in.
pub fn apply_resize(start: Bounds, edge: ResizeEdge, delta: Point, min: Size) -> Bounds {
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width;
    let mut height = start.height;

    if edge.moves_left() {
        x += delta.x;
        width -= delta.x;
    } else if edge.moves_right() {
        width += delta.x;
    }
    if edge.moves_top() {
        y += delta.y;
        height -= delta.y;
    } else if edge.moves_bottom() {
        height += delta.y;
    }

    if width < min.width {
        if edge.moves_left() {
            x -= min.width - width;
        }
        width = min.width;
    }
    if height < min.height {
        if edge.moves_top() {
            y -= min.height - height;
        }
        height = min.height;
    }
    Bounds::new(x, y, width, height)
}
