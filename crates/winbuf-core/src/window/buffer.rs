//! Implementation of the fixed-capacity windowed buffer.

use aligned_vec::{avec, AVec};
use core::ops::Index;

use crate::error::{BufferError, Result};
use crate::sample::Sample;

/// Which backing array read accessors currently resolve against.
///
/// The buffer owns two identically sized arrays: the committed store and a
/// speculative copy. [`WindowedBuffer::test`] switches reads to the
/// speculative copy; the next [`WindowedBuffer::update`] switches them back.
/// Keeping this as an explicit enum (rather than a boolean buried in the
/// accessors) makes the committed/speculating state machine visible to
/// callers and to tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Reads resolve against committed state.
    Committed,
    /// A hypothetical last value is staged; reads resolve against the
    /// speculative copy.
    Speculating,
}

/// A fixed-capacity circular buffer with a speculative overlay.
///
/// `WindowedBuffer` stores the `capacity` most recent committed values and
/// serves aggregate queries (`sum`, `mean`) and positional reads over that
/// window. Two properties distinguish it from a plain ring buffer:
///
/// - **Power-of-two backing storage.** The physical arrays are sized to the
///   smallest power of two at or above the requested capacity, so every
///   wraparound address is computed with a bitmask instead of a modulo. The
///   cost is `physical_capacity() - capacity()` wasted slots; the payoff is a
///   constant, branch-light per-access cost that holds at high sample rates.
/// - **Speculative overlay.** [`test`] evaluates the window as if the most
///   recent committed value were replaced by a hypothetical one, without
///   touching committed state. Repeated probes before the next commit are
///   O(1). All read accessors transparently resolve against the overlay
///   while it is active, so indicator formulas run unchanged over committed
///   or hypothetical state.
///
/// Memory is allocated once at construction; steady-state operation is
/// allocation-free. The buffer is not thread-safe: concurrent access from
/// multiple threads must be serialized externally.
///
/// # Example
///
/// ```rust
/// use winbuf_core::WindowedBuffer;
///
/// let mut window: WindowedBuffer<f64> = WindowedBuffer::new(5)?;
/// for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     window.update(value);
/// }
/// assert!(window.is_full());
/// assert_eq!(window.sum(), 15.0);
/// assert_eq!(window.mean(), 3.0);
///
/// // Probe a hypothetical replacement of the newest value.
/// window.test(100.0);
/// assert_eq!(window.sum(), 110.0);
///
/// // Committing discards the overlay.
/// window.update(6.0);
/// assert_eq!(window.sum(), 20.0);
/// # Ok::<(), winbuf_core::BufferError>(())
/// ```
///
/// [`test`]: WindowedBuffer::test
#[derive(Clone, Debug)]
pub struct WindowedBuffer<T: Sample> {
    /// Committed backing store, `physical` slots.
    committed: AVec<T>,
    /// Speculative copy, synchronized lazily on the first `test` after a
    /// commit.
    speculative: AVec<T>,
    /// Window length requested by the caller.
    logical: usize,
    /// Backing store length; smallest power of two >= `logical`.
    physical: usize,
    /// `physical - logical`: slots of padding skipped by every logical
    /// address computation.
    pad: usize,
    /// `physical - 1`; wraps a running index into `[0, physical)`.
    mask: usize,
    /// Next physical slot to write.
    cursor: usize,
    /// Logical elements written so far, capped at `logical`.
    filled: usize,
    /// Which backing array reads currently resolve against.
    view: View,
}

/// Smallest power of two >= `value`, by bit smearing.
///
/// O(1) in the magnitude of `value`, unlike a doubling loop. Requires
/// `value >= 1` and representable headroom, both guaranteed by construction
/// (capacity is validated and far below `usize::MAX / 2`).
#[inline]
fn next_power_of_two(value: usize) -> usize {
    let mut x = value - 1;
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    #[cfg(target_pointer_width = "64")]
    {
        x |= x >> 32;
    }
    x + 1
}

#[inline]
fn is_power_of_two(value: usize) -> bool {
    value != 0 && value & (value - 1) == 0
}

impl<T: Sample> WindowedBuffer<T> {
    /// Create a buffer holding a window of `capacity` most recent values.
    ///
    /// Both backing arrays are allocated here, zero-initialized, and never
    /// reallocated. A non-power-of-two `capacity` is rounded up to the next
    /// power of two for the physical stores; the logical window length stays
    /// exactly `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCapacity`] when `capacity` is zero. A
    /// zero-length window has no meaningful `mean`, so it is rejected at
    /// construction rather than deferred to a divide-by-zero later.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::invalid_capacity(capacity));
        }
        let physical = if is_power_of_two(capacity) {
            capacity
        } else {
            next_power_of_two(capacity)
        };
        Ok(Self {
            committed: avec![T::ZERO; physical],
            speculative: avec![T::ZERO; physical],
            logical: capacity,
            physical,
            pad: physical - capacity,
            mask: physical - 1,
            cursor: 0,
            filled: 0,
            view: View::Committed,
        })
    }

    /// Logical window length requested at construction.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.logical
    }

    /// Backing store length; smallest power of two >= [`capacity`].
    ///
    /// [`capacity`]: WindowedBuffer::capacity
    #[must_use]
    #[inline]
    pub fn physical_capacity(&self) -> usize {
        self.physical
    }

    /// Slots of wasted storage, `physical_capacity() - capacity()`.
    ///
    /// Zero exactly when the capacity is a power of two.
    #[must_use]
    #[inline]
    pub fn padding(&self) -> usize {
        self.pad
    }

    /// Number of logical elements written so far, capped at the capacity.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.filled
    }

    /// Returns `true` if no value has been committed yet.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Returns `true` once `capacity` values have been committed.
    ///
    /// Stays `true` for every subsequent commit.
    #[must_use]
    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled >= self.logical
    }

    /// Which backing array reads currently resolve against.
    #[must_use]
    #[inline]
    pub fn view(&self) -> View {
        self.view
    }

    /// Map a logical offset (0 = oldest window position) to a physical slot.
    ///
    /// The padding in front of an oversized physical array is skipped by
    /// folding `pad` into the offset before masking; for power-of-two
    /// capacities `pad` is zero and the correction vanishes.
    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.cursor + self.pad + offset) & self.mask
    }

    /// Physical slot of the most recent write.
    #[inline]
    fn newest_slot(&self) -> usize {
        (self.cursor + self.physical - 1) & self.mask
    }

    /// The backing array selected by the current view.
    #[inline]
    fn active(&self) -> &[T] {
        match self.view {
            View::Committed => &self.committed,
            View::Speculating => &self.speculative,
        }
    }

    /// Write `value` at the cursor and advance the window.
    #[inline]
    fn push(&mut self, value: T) {
        self.committed[self.cursor] = value;
        self.cursor = (self.cursor + 1) & self.mask;
        if self.filled < self.logical {
            self.filled += 1;
        }
    }

    /// Commit a new value, permanently advancing the window.
    ///
    /// Any pending speculative overlay is discarded first, so the commit
    /// depends only on `value`, never on previously probed hypotheticals.
    /// O(1), never fails.
    ///
    /// Returns `true` when the window is full after the commit.
    pub fn update(&mut self, value: T) -> bool {
        self.view = View::Committed;
        self.push(value);
        self.is_full()
    }

    /// Stage a hypothetical replacement of the most recent committed value.
    ///
    /// Aggregate and positional reads then behave as if the newest element
    /// were `value`, while committed state stays untouched. The first probe
    /// after a commit copies the committed array into the speculative one
    /// (O(n), paid once per commit cycle); repeated probes before the next
    /// [`update`] only rewrite the single overlaid slot and are O(1).
    ///
    /// Returns `true` when the window would be full under the hypothetical
    /// state, which equals [`is_full`] since the overlay never advances the
    /// fill state machine.
    ///
    /// # Example
    ///
    /// ```rust
    /// use winbuf_core::WindowedBuffer;
    ///
    /// let mut window: WindowedBuffer<f64> = WindowedBuffer::new(3)?;
    /// window.update(1.0);
    /// window.update(2.0);
    /// window.update(3.0);
    ///
    /// window.test(9.0);
    /// assert_eq!(window.sum(), 12.0); // 1 + 2 + 9
    /// window.test(30.0);
    /// assert_eq!(window.sum(), 33.0); // repeated probes replace each other
    ///
    /// window.update(4.0);
    /// assert_eq!(window.sum(), 9.0); // 2 + 3 + 4, probes left no residue
    /// # Ok::<(), winbuf_core::BufferError>(())
    /// ```
    ///
    /// [`update`]: WindowedBuffer::update
    /// [`is_full`]: WindowedBuffer::is_full
    pub fn test(&mut self, value: T) -> bool {
        if self.view == View::Committed {
            self.speculative.copy_from_slice(&self.committed);
            self.view = View::Speculating;
        }
        let slot = self.newest_slot();
        self.speculative[slot] = value;
        self.is_full()
    }

    /// Overwrite every physical slot of the active array with `value`.
    ///
    /// Cursor and fill state are untouched: this reseeds the storage a
    /// window is computed over, it does not advance the window.
    pub fn fill(&mut self, value: T) {
        match self.view {
            View::Committed => self.committed.fill(value),
            View::Speculating => self.speculative.fill(value),
        }
    }

    /// Reset the buffer to its freshly constructed state.
    ///
    /// Storage is re-zeroed in place; no reallocation occurs. Useful when
    /// replaying a new series through an existing indicator.
    pub fn clear(&mut self) {
        self.committed.fill(T::ZERO);
        self.speculative.fill(T::ZERO);
        self.cursor = 0;
        self.filled = 0;
        self.view = View::Committed;
    }

    /// Get a window value by logical index (0 = oldest window position).
    ///
    /// Valid indices are `0..capacity()`. While the window is still filling,
    /// leading positions map to zero-initialized storage, so the window
    /// reads as zero-padded at the front; this mirrors what [`sum`] adds up.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfBounds`] when
    /// `index >= capacity()`.
    ///
    /// [`sum`]: WindowedBuffer::sum
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.logical {
            return Err(BufferError::index_out_of_bounds(index, self.logical));
        }
        Ok(&self.active()[self.slot(index)])
    }

    /// Oldest retained value.
    ///
    /// While the window is filling this is the earliest value actually
    /// committed, not the zero padding at `get(0)`; once the window is full
    /// the two coincide. On an empty buffer it reads zero-initialized
    /// storage and returns zero.
    #[must_use]
    pub fn front(&self) -> &T {
        &self.active()[self.slot(self.logical - self.filled)]
    }

    /// Most recently committed value, or the staged hypothetical while a
    /// speculative overlay is active. Zero on an empty buffer.
    #[must_use]
    pub fn back(&self) -> &T {
        &self.active()[self.newest_slot()]
    }

    /// Value at the middle of the window.
    ///
    /// Uses logical index `len() / 2` while the window is filling and
    /// `capacity() / 2` once full. During warm-up the middle can land in the
    /// zero-padded region, like any positional read.
    #[must_use]
    pub fn middle(&self) -> &T {
        let index = if self.is_full() {
            self.logical / 2
        } else {
            self.filled / 2
        };
        &self.active()[self.slot(index)]
    }

    /// Sum over the logical window of the active view.
    ///
    /// Iterates exactly `capacity()` logical positions. Physical padding
    /// slots, and the stale values wraparound leaves in them, are never
    /// included. While the window is filling, unwritten positions contribute
    /// their zero initialization, so an empty buffer deterministically sums
    /// to zero. O(capacity).
    #[must_use]
    pub fn sum(&self) -> T {
        let data = self.active();
        let mut acc = T::ZERO;
        for index in 0..self.logical {
            acc = acc + data[self.slot(index)];
        }
        acc
    }

    /// Arithmetic mean over the logical window: `sum() / capacity()`.
    ///
    /// The divisor is always the full window length, so a partially filled
    /// window averages its zero padding in, exactly as [`sum`] describes.
    ///
    /// [`sum`]: WindowedBuffer::sum
    #[must_use]
    pub fn mean(&self) -> T {
        self.sum() / T::from_usize(self.logical)
    }

    /// Iterator over the logical window, oldest position to newest.
    ///
    /// Yields exactly `capacity()` values; leading positions are zero while
    /// the window is still filling, matching [`get`].
    ///
    /// [`get`]: WindowedBuffer::get
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        WindowIter {
            buffer: self,
            index: 0,
        }
    }
}

impl<T: Sample> Index<usize> for WindowedBuffer<T> {
    type Output = T;

    /// Panicking counterpart of [`WindowedBuffer::get`].
    ///
    /// # Panics
    ///
    /// Panics when `index >= capacity()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(_) => panic!(
                "index {} out of bounds for window of length {}",
                index, self.logical
            ),
        }
    }
}

/// Iterator over the logical window of a buffer.
struct WindowIter<'a, T: Sample> {
    buffer: &'a WindowedBuffer<T>,
    index: usize,
}

impl<'a, T: Sample> Iterator for WindowIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index).ok()?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.logical.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Sample> ExactSizeIterator for WindowIter<'a, T> {}
