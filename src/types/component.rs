//! Numeric precision of feature vector components.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

/// A floating point type usable as a feature vector component.
///
/// Implemented for `f32` (reduced precision) and `f64` (double precision).
/// A clustering run uses one precision throughout.
pub trait Component:
    Copy
    + Default
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    /// Short name of the precision, used in logs.
    const NAME: &'static str;

    fn sqrt(self) -> Self;
    fn acos(self) -> Self;
    fn is_finite(self) -> bool;
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;

    /// Clamp into `[lo, hi]`.
    fn clamp_to(self, lo: Self, hi: Self) -> Self {
        if self < lo {
            lo
        } else if self > hi {
            hi
        } else {
            self
        }
    }
}

macro_rules! impl_component {
    ($t:ty, $name:literal) => {
        impl Component for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NAME: &'static str = $name;

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline]
            fn acos(self) -> Self {
                <$t>::acos(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    };
}

impl_component!(f32, "f32");
impl_component!(f64, "f64");

/// Dot product of two equally sized vectors.
pub fn dot<T: Component>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::ZERO, |acc, (&x, &y)| acc + x * y)
}
