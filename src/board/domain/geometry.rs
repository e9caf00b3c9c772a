//! Pointer coordinates and layout rectangles, in viewport pixels.

/// A pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the vector from `origin` to this point.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "pointer offsets are measured in fractional pixels"
    )]
    pub fn offset_from(self, origin: Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }

    /// Returns this point shifted back by `offset`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "pointer offsets are measured in fractional pixels"
    )]
    pub fn minus(self, offset: Self) -> Self {
        Self::new(self.x - offset.x, self.y - offset.y)
    }
}

/// Scan direction used when computing insertion indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Top to bottom; task cards inside a group.
    Vertical,
    /// Left to right; group columns.
    Horizontal,
}

impl Axis {
    /// Returns the component of `point` along this axis.
    #[must_use]
    pub const fn coordinate(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Returns `true` when `point` lies inside the rectangle. Left and top
    /// edges are inclusive, right and bottom edges exclusive.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "layout geometry is measured in fractional pixels"
    )]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }

    /// Returns the midpoint along `axis`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "layout geometry is measured in fractional pixels"
    )]
    pub fn center(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.top + self.height / 2.0,
            Axis::Horizontal => self.left + self.width / 2.0,
        }
    }
}
