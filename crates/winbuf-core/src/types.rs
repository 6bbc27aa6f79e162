//! Floating-point type configuration for conditional compilation
//!
//! This module defines a type alias that can be switched between `f32` and
//! `f64` using cargo features. Default is `f64`. Pipelines that run on tight
//! memory budgets (embedded targets, WASM) build with `f32`; everything else
//! keeps double precision.
//!
//! # Example
//!
//! ```rust,ignore
//! use winbuf_core::types::Float;
//!
//! let x: Float = 1.0;
//! let y: Float = 2.0;
//! assert_eq!(x + y, 3.0);
//! ```

/// Floating-point type used throughout the library
///
/// When the `f32` feature is enabled, this is `f32` (single-precision).
#[cfg(feature = "f32")]
pub type Float = f32;

/// Floating-point type used throughout the library
///
/// When the `f32` feature is NOT enabled, this is `f64` (double-precision).
/// This is the default configuration.
#[cfg(not(feature = "f32"))]
pub type Float = f64;
