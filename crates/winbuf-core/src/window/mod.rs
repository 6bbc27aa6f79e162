//! Windowed buffer storage
//!
//! This module contains the storage substrate for sliding-window statistics:
//! a fixed-capacity circular buffer with wraparound addressing and a
//! non-destructive speculative overlay. Streaming indicators (moving
//! averages, rolling standard deviation, oscillators) hold one of these per
//! input series and read their window through its query surface.
//!
//! The backing storage is sized up to the next power of two so that all
//! wraparound arithmetic is a single bitmask, never a general modulo.

mod buffer;

pub use buffer::{View, WindowedBuffer};
