//! Error types and handling for the windowed buffer
//!
//! This module defines the `BufferError` enum which represents the caller
//! contract violations a [`crate::WindowedBuffer`] can surface. The error type
//! implements the standard `Error` trait for proper error handling and
//! propagation.
//!
//! The buffer has no internal recoverable-error states: every operation that
//! can fail does so because the caller broke a precondition (a zero window
//! length at construction, or an out-of-range logical index on access).

/// Error type for windowed buffer operations
///
/// All fallible operations on the buffer return `Result<T, BufferError>`.
/// Both variants describe caller contract violations; no retry is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Requested window capacity is invalid (zero)
    InvalidCapacity {
        /// The rejected capacity value
        capacity: usize,
    },

    /// Logical index is outside the window
    IndexOutOfBounds {
        /// The offending logical index
        index: usize,
        /// The logical capacity of the window the index was checked against
        capacity: usize,
    },
}

impl BufferError {
    /// Creates an InvalidCapacity error
    ///
    /// # Example
    ///
    /// ```rust
    /// use winbuf_core::error::BufferError;
    ///
    /// let err = BufferError::invalid_capacity(0);
    /// ```
    pub fn invalid_capacity(capacity: usize) -> Self {
        BufferError::InvalidCapacity { capacity }
    }

    /// Creates an IndexOutOfBounds error
    ///
    /// # Arguments
    ///
    /// * `index` - The offending logical index
    /// * `capacity` - The logical capacity it was checked against
    ///
    /// # Example
    ///
    /// ```rust
    /// use winbuf_core::error::BufferError;
    ///
    /// let err = BufferError::index_out_of_bounds(7, 5);
    /// ```
    pub fn index_out_of_bounds(index: usize, capacity: usize) -> Self {
        BufferError::IndexOutOfBounds { index, capacity }
    }
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BufferError::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity {}: window length must be greater than zero",
                    capacity
                )
            }
            BufferError::IndexOutOfBounds { index, capacity } => {
                write!(
                    f,
                    "Index {} out of bounds for window of length {}",
                    index, capacity
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// When std is not available, we need to provide a no_std compatible Error
// implementation. In Rust 1.81+, core::error::Error is available in core.
#[cfg(all(not(feature = "std"), feature = "core_error"))]
impl core::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        None
    }
}

/// Result type alias for windowed buffer operations
///
/// This is a convenience alias that uses `BufferError` as the error type.
///
/// # Example
///
/// ```rust
/// use winbuf_core::error::{BufferError, Result};
///
/// fn check_index(index: usize, capacity: usize) -> Result<usize> {
///     if index >= capacity {
///         return Err(BufferError::index_out_of_bounds(index, capacity));
///     }
///     Ok(index)
/// }
/// ```
pub type Result<T> = core::result::Result<T, BufferError>;
