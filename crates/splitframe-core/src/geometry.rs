#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// Absolute tolerance used by [`Rect::approx_eq`].
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Orientation of a binary cut.
///
/// Named after the cut line: a horizontal cut stacks its children top and
/// bottom (it divides the height), a vertical cut places them left and right
/// (it divides the width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

impl SplitAxis {
    /// Extent of `rect` along the axis this cut divides.
    #[inline]
    pub const fn extent(self, rect: &Rect) -> f64 {
        match self {
            Self::Horizontal => rect.height,
            Self::Vertical => rect.width,
        }
    }
}

/// An axis-aligned rectangle in canvas pixels.
///
/// Every region shares one global coordinate space with the origin at the
/// top-left of the canvas, so a child's `x`/`y` are never relative to its
/// parent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in square pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check that every component is finite and the size is non-negative.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// All four edges are inclusive, so a point on a boundary shared by two
    /// siblings is contained by both.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Cut the rectangle in two along `axis`.
    ///
    /// The first part receives `extent * ratio`, the second the remainder, so
    /// the parts always add back up to `self`. `ratio` is not clamped: 0 or 1
    /// yields a zero-sized part.
    pub fn split(&self, axis: SplitAxis, ratio: f64) -> (Self, Self) {
        match axis {
            SplitAxis::Horizontal => {
                let first = self.height * ratio;
                (
                    Self::new(self.x, self.y, self.width, first),
                    Self::new(self.x, self.y + first, self.width, self.height - first),
                )
            }
            SplitAxis::Vertical => {
                let first = self.width * ratio;
                (
                    Self::new(self.x, self.y, first, self.height),
                    Self::new(self.x + first, self.y, self.width - first, self.height),
                )
            }
        }
    }

    /// Scale position and size independently per axis.
    #[inline]
    #[must_use]
    pub fn scaled(&self, width_ratio: f64, height_ratio: f64) -> Self {
        Self::new(
            self.x * width_ratio,
            self.y * height_ratio,
            self.width * width_ratio,
            self.height * height_ratio,
        )
    }

    /// Create a new rectangle that is the union of this rectangle and another.
    ///
    /// The result is the smallest rectangle that contains both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Compute the overlapping area with another rectangle, returning `None`
    /// when they only touch or are disjoint.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Component-wise comparison within [`GEOMETRY_EPSILON`].
    pub fn approx_eq(&self, other: &Rect) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.width, other.width)
            && approx_eq(self.height, other.height)
    }
}

/// Compare two coordinates within [`GEOMETRY_EPSILON`], scaled for large values.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= GEOMETRY_EPSILON * scale
}

#[cfg(test)]
mod tests {
    use super::{Rect, SplitAxis, approx_eq};
    use proptest::prelude::*;

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(40.0, 60.0));
        assert!(rect.contains(25.0, 20.0));
        assert!(!rect.contains(40.5, 30.0));
        assert!(!rect.contains(9.99, 30.0));
        assert!(!rect.contains(20.0, 60.01));
    }

    #[test]
    fn zero_sized_rect_contains_its_origin() {
        let rect = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(rect.contains(5.0, 5.0));
        assert!(rect.is_empty());
    }

    #[test]
    fn rect_edges_and_area() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.area(), 1200.0);
        assert_eq!(Rect::from_size(4.0, 2.0), Rect::new(0.0, 0.0, 4.0, 2.0));
    }

    #[test]
    fn horizontal_split_stacks_top_and_bottom() {
        let (top, bottom) = Rect::from_size(1440.0, 900.0).split(SplitAxis::Horizontal, 0.1);
        assert!(top.approx_eq(&Rect::new(0.0, 0.0, 1440.0, 90.0)));
        assert!(bottom.approx_eq(&Rect::new(0.0, 90.0, 1440.0, 810.0)));
    }

    #[test]
    fn vertical_split_places_left_and_right() {
        let (left, right) = Rect::new(0.0, 90.0, 1440.0, 729.0).split(SplitAxis::Vertical, 0.3);
        assert!(left.approx_eq(&Rect::new(0.0, 90.0, 432.0, 729.0)));
        assert!(right.approx_eq(&Rect::new(432.0, 90.0, 1008.0, 729.0)));
    }

    #[test]
    fn degenerate_ratio_yields_empty_part() {
        let (first, second) = Rect::from_size(100.0, 50.0).split(SplitAxis::Vertical, 0.0);
        assert!(first.is_empty());
        assert_eq!(second, Rect::from_size(100.0, 50.0));
    }

    #[test]
    fn scaled_is_per_axis() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).scaled(2.0, 0.5);
        assert_eq!(r, Rect::new(20.0, 10.0, 60.0, 20.0));
    }

    #[test]
    fn union_and_intersection() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(3.0, 3.0, 5.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(a.intersection_opt(&b), Some(Rect::new(3.0, 3.0, 2.0, 2.0)));

        let touching = Rect::new(5.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersection_opt(&touching), None);
    }

    #[test]
    fn well_formed_rejects_nan_and_negative() {
        assert!(Rect::from_size(1.0, 1.0).is_well_formed());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, -1.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 1.0, f64::INFINITY).is_well_formed());
    }

    #[test]
    fn axis_extent() {
        let r = Rect::from_size(30.0, 40.0);
        assert_eq!(SplitAxis::Horizontal.extent(&r), 40.0);
        assert_eq!(SplitAxis::Vertical.extent(&r), 30.0);
    }

    proptest! {
        #[test]
        fn split_parts_tile_the_parent(
            x in 0.0f64..2000.0,
            y in 0.0f64..2000.0,
            width in 0.0f64..4000.0,
            height in 0.0f64..4000.0,
            ratio in 0.0f64..=1.0,
            vertical in any::<bool>(),
        ) {
            let parent = Rect::new(x, y, width, height);
            let axis = if vertical { SplitAxis::Vertical } else { SplitAxis::Horizontal };
            let (first, second) = parent.split(axis, ratio);

            prop_assert!(parent.union(&first).approx_eq(&parent));
            prop_assert!(first.union(&second).approx_eq(&parent));
            prop_assert!(first.intersection_opt(&second).is_none());
            prop_assert!(approx_eq(axis.extent(&first), axis.extent(&parent) * ratio));
            prop_assert!(approx_eq(first.area() + second.area(), parent.area()));
        }
    }
}
