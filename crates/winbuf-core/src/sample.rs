//! Numeric element abstraction for the windowed buffer
//!
//! This module defines the [`Sample`] trait which abstracts over the numeric
//! types a [`crate::WindowedBuffer`] can store. The buffer only needs a small
//! algebra: a zero for its initial storage, addition for [`sum`], and
//! division by the window length for [`mean`].
//!
//! [`sum`]: crate::WindowedBuffer::sum
//! [`mean`]: crate::WindowedBuffer::mean

use core::ops::{Add, Div};

/// Trait for numeric types storable in a windowed buffer.
///
/// Implemented for `f32`, `f64`, `i32` and `i64`. Integer windows use
/// truncating division in [`crate::WindowedBuffer::mean`], matching the
/// arithmetic of the element type.
///
/// # Example
///
/// ```rust
/// use winbuf_core::Sample;
///
/// fn average<T: Sample>(total: T, len: usize) -> T {
///     total / T::from_usize(len)
/// }
///
/// assert_eq!(average(15.0_f64, 5), 3.0);
/// assert_eq!(average(15_i64, 4), 3);
/// ```
pub trait Sample:
    Copy + PartialEq + Add<Output = Self> + Div<Output = Self> + core::fmt::Debug + 'static
{
    /// Additive identity; also the value of untouched backing storage.
    const ZERO: Self;

    /// Lossy conversion from a window length.
    #[must_use]
    fn from_usize(value: usize) -> Self;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }
}

impl Sample for i32 {
    const ZERO: Self = 0;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as i32
    }
}

impl Sample for i64 {
    const ZERO: Self = 0;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as i64
    }
}
