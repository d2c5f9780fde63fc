#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Shrinks the rect by `amount` on every side. Never produces a negative extent.
    pub fn inset(self, amount: f64) -> Self {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Self::new(
            self.x + amount.min(self.width / 2.0),
            self.y + amount.min(self.height / 2.0),
            width,
            height,
        )
    }

    pub fn outset(self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Radius a circle centered at `center` needs to cover every corner of `size`.
///
/// Only the two corners on the far side of the horizontal midpoint can be the
/// farthest one, so the near side is never measured.
pub fn longest_radius(center: Point, size: Size) -> f64 {
    let far_x = if center.x > size.width / 2.0 {
        0.0
    } else {
        size.width
    };
    let top = center.distance_to(Point::new(far_x, 0.0));
    let bottom = center.distance_to(Point::new(far_x, size.height));
    top.max(bottom)
}

/// Derived drawing geometry, recomputed whenever the bounds change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameGeometry {
    pub size: Size,
    /// Rounded rect the shadow, base fill, and ripple are confined to.
    pub shadow_rect: Rect,
    pub corner_radius: f64,
}

impl FrameGeometry {
    pub fn new(size: Size, shadow_space: f64, corner_radius: f64) -> Self {
        let shadow_rect = Rect::from_size(size).inset(shadow_space.max(0.0));
        let max_corner = shadow_rect.width.min(shadow_rect.height) / 2.0;
        Self {
            size,
            shadow_rect,
            corner_radius: corner_radius.clamp(0.0, max_corner.max(0.0)),
        }
    }

    pub fn shadow_blur(shadow_space: f64) -> f64 {
        shadow_space.max(0.0) * 4.0 / 5.0
    }
}
