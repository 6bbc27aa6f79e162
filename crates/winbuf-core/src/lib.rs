//! WinBuf-Core: fixed-capacity windowed buffer for streaming statistics
//!
//! This crate provides [`WindowedBuffer`], a fixed-capacity, allocation-free
//! (after construction) circular buffer designed as the storage substrate for
//! sliding-window statistics such as moving averages, rolling standard
//! deviation, and RSI-style oscillators. It is `no_std` compatible and offers
//! conditional float precision.
//!
//! The buffer's distinguishing feature is a *speculative overlay*: callers can
//! evaluate aggregate statistics as if the most recent element had a different
//! value, without mutating committed state and without reallocating. See
//! [`WindowedBuffer::test`].
//!
//! # Features
//!
//! - `f64` (default): Double-precision [`Float`] alias
//! - `f32`: Single-precision [`Float`] alias
//! - `std`: Standard library support (`std::error::Error` impl)
//! - `core_error`: `core::error::Error` impl for `no_std` builds (Rust 1.81+)
//!
//! # Modules
//!
//! - [`types`]: Floating-point type configuration
//! - [`sample`]: Numeric element trait for the buffer
//! - [`error`]: Error types
//! - [`window`]: The windowed buffer itself

#![no_std]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod sample;
pub mod types;
pub mod window;

pub use error::{BufferError, Result};
pub use sample::Sample;
pub use types::Float;
pub use window::{View, WindowedBuffer};
