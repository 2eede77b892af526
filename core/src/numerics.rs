//! Small value types used for grid arithmetic and speed bookkeeping.

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while constructing numeric value types.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ValueError {
    /// A proportion was requested outside the closed unit interval.
    #[error("proportion {0} must be in range from 0 to 1")]
    ProportionOutOfBounds(f32),
    /// A range was requested whose bottom exceeds its top.
    #[error("range bottom cannot be greater than its top")]
    InvertedRange,
    /// A value was rescaled from a range that does not include it.
    #[error("value {0} is not included in the range")]
    NotInRange(f32),
    /// A value was rescaled from a range whose bounds coincide.
    #[error("cannot rescale from a range with equal bounds")]
    EmptyRange,
}

/// Integer two-dimensional vector used for grid positions and directions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Vector2i {
    x: i32,
    y: i32,
}

impl Vector2i {
    /// Vector with both components set to zero.
    pub const ZERO: Self = Self::new(0, 0);
    /// Vector with both components set to one.
    pub const ONE: Self = Self::new(1, 1);
    /// Unit step toward decreasing rows.
    pub const UP: Self = Self::new(0, -1);
    /// Unit step toward increasing rows.
    pub const DOWN: Self = Self::new(0, 1);
    /// Unit step toward decreasing columns.
    pub const LEFT: Self = Self::new(-1, 0);
    /// Unit step toward increasing columns.
    pub const RIGHT: Self = Self::new(1, 0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `value`.
    #[must_use]
    pub const fn splat(value: i32) -> Self {
        Self::new(value, value)
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Component-wise absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Dot product of two vectors.
    #[must_use]
    pub const fn dot(self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean length.
    #[must_use]
    pub const fn length_squared(self) -> i32 {
        self.dot(self)
    }

    /// Squared Euclidean distance between two points.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i32 {
        Self::new(self.x - other.x, self.y - other.y).length_squared()
    }

    /// Unit-length direction from `self` toward `target` as floating point components.
    ///
    /// Returns `None` when both points coincide.
    #[must_use]
    pub fn direction_to(self, target: Self) -> Option<(f32, f32)> {
        let delta = target - self;
        if delta == Self::ZERO {
            return None;
        }
        let length = (delta.length_squared() as f32).sqrt();
        Some((delta.x as f32 / length, delta.y as f32 / length))
    }
}

impl Add for Vector2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2i {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul for Vector2i {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Vector2i {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Mul<i32> for Vector2i {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        self * Self::splat(rhs)
    }
}

impl Div<i32> for Vector2i {
    type Output = Self;

    fn div(self, rhs: i32) -> Self {
        self / Self::splat(rhs)
    }
}

/// Ordered pair of bounds with `bottom <= top`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range<T> {
    bottom: T,
    top: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    /// Creates a range, rejecting inverted bounds.
    pub fn new(bottom: T, top: T) -> Result<Self, ValueError> {
        if bottom > top {
            return Err(ValueError::InvertedRange);
        }
        Ok(Self { bottom, top })
    }

    /// Lower inclusive bound.
    #[must_use]
    pub fn bottom(&self) -> T {
        self.bottom
    }

    /// Upper inclusive bound.
    #[must_use]
    pub fn top(&self) -> T {
        self.top
    }

    /// Reports whether `value` lies within the inclusive bounds.
    #[must_use]
    pub fn includes(&self, value: T) -> bool {
        self.bottom <= value && value <= self.top
    }
}

/// Scalar constrained to the closed interval `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Proportion(f32);

impl Proportion {
    /// Lowest representable proportion.
    pub const MIN: Self = Self(0.0);
    /// Highest representable proportion.
    pub const MAX: Self = Self(1.0);

    /// Wraps `value`, failing when it lies outside `[0, 1]`.
    pub fn new(value: f32) -> Result<Self, ValueError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValueError::ProportionOutOfBounds(value))
        }
    }

    /// Linearly rescales `number` from `range` into `[0, 1]`.
    pub fn from_range(number: f32, range: Range<f32>) -> Result<Self, ValueError> {
        if !range.includes(number) {
            return Err(ValueError::NotInRange(number));
        }
        let span = range.top() - range.bottom();
        if span == 0.0 {
            return Err(ValueError::EmptyRange);
        }
        Self::new((number - range.bottom()) / span)
    }

    /// Builds a proportion from a percentage in `[0, 100]`.
    pub fn from_percent(percent: f32) -> Result<Self, ValueError> {
        Self::new(percent / 100.0)
    }

    /// Complement of `other`, i.e. `1 - other`.
    #[must_use]
    pub fn opposite_of(other: Self) -> Self {
        Self((1.0 - other.0).clamp(0.0, 1.0))
    }

    /// Underlying value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Value expressed as a percentage.
    #[must_use]
    pub fn percent(&self) -> f32 {
        self.0 * 100.0
    }

    /// Reports whether the proportion is exactly zero.
    #[must_use]
    pub fn is_min(&self) -> bool {
        self.0 == 0.0
    }

    /// Reports whether the proportion is exactly one.
    #[must_use]
    pub fn is_max(&self) -> bool {
        self.0 == 1.0
    }

    /// Expands the proportion into the provided target range.
    #[must_use]
    pub fn in_range(&self, range: Range<f32>) -> f32 {
        self.0 * (range.top() - range.bottom()) + range.bottom()
    }
}

impl TryFrom<f32> for Proportion {
    type Error = ValueError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Proportion> for f32 {
    fn from(value: Proportion) -> Self {
        value.0
    }
}

/// Speed bounds a snake starts with unless configured otherwise.
pub const DEFAULT_SPEED_RANGE: Range<Proportion> = Range {
    bottom: Proportion(0.4),
    top: Proportion(0.8),
};

impl Range<Proportion> {
    /// Converts the bounds into plain floating point values.
    #[must_use]
    pub fn to_f32(&self) -> Range<f32> {
        Range {
            bottom: self.bottom.value(),
            top: self.top.value(),
        }
    }
}
