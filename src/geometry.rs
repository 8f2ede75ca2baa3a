//! Immutable geometry values shared by the surface tree.
//!
//! Coordinates are `f64` so the same tree can sit on top of a pixel renderer
//! or a cell grid. All mutation entry points validate finiteness before a
//! value is stored.

use crate::error::{DisplayError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn validate(self) -> Result<Self> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(self)
        } else {
            Err(DisplayError::InvalidGeometry(format!("{self:?}")))
        }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Outer rectangle of a surface, relative to its parent's content origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn validate(self) -> Result<Self> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if finite {
            Ok(self)
        } else {
            Err(DisplayError::InvalidGeometry(format!("{self:?}")))
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Component-wise growth of the rectangle.
    pub fn offset(&self, dx: f64, dy: f64, dw: f64, dh: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width + dw, self.height + dh)
    }

    pub fn with_origin(&self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    pub fn with_size(&self, width: f64, height: f64) -> Self {
        Self::new(self.x, self.y, width, height)
    }

    /// Half-open containment test.
    pub fn contains(&self, pt: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        pt.x >= self.x && pt.x < self.right() && pt.y >= self.y && pt.y < self.bottom()
    }

    /// Outer rectangle minus `padding`, expressed in the same frame as `self`.
    pub fn content_rect(&self, padding: Padding) -> Self {
        Self::new(
            self.x + padding.left,
            self.y + padding.top,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    pub const ZERO: Padding = Padding {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(n: f64) -> Self {
        Self::new(n, n, n, n)
    }

    pub fn validate(self) -> Result<Self> {
        let finite = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite());
        if finite {
            Ok(self)
        } else {
            Err(DisplayError::InvalidGeometry(format!("{self:?}")))
        }
    }

    pub fn add(&self, other: Padding) -> Self {
        Self::new(
            self.left + other.left,
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
        )
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Zero-origin content rectangle of an entity with the given geometry.
pub fn client_bounds(bounds: Bounds, padding: Padding) -> Bounds {
    Bounds::new(
        0.0,
        0.0,
        bounds.width - padding.horizontal(),
        bounds.height - padding.vertical(),
    )
}
