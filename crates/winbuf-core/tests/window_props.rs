//! Property tests for the windowed buffer.
//!
//! The buffer is checked against a naive model: a plain `Vec` holding the
//! zero-padded logical window, advanced by remove-front/push-back. The model
//! has none of the power-of-two padding or wraparound arithmetic, so any
//! divergence points at the index mapping.

use proptest::prelude::*;
use quickcheck::{quickcheck, TestResult};
use winbuf_core::{View, WindowedBuffer};

/// Naive reference model of the logical window.
#[derive(Clone, Debug)]
struct ModelWindow {
    window: Vec<f64>,
    filled: usize,
    capacity: usize,
    pending: Option<f64>,
}

impl ModelWindow {
    fn new(capacity: usize) -> Self {
        Self {
            window: vec![0.0; capacity],
            filled: 0,
            capacity,
            pending: None,
        }
    }

    fn update(&mut self, value: f64) {
        self.pending = None;
        self.window.remove(0);
        self.window.push(value);
        self.filled = (self.filled + 1).min(self.capacity);
    }

    fn test(&mut self, value: f64) {
        self.pending = Some(value);
    }

    /// The window as reads should see it, overlay applied.
    fn effective(&self) -> Vec<f64> {
        let mut window = self.window.clone();
        if let Some(value) = self.pending {
            window[self.capacity - 1] = value;
        }
        window
    }

    fn sum(&self) -> f64 {
        self.effective().iter().fold(0.0, |acc, &v| acc + v)
    }
}

#[derive(Clone, Debug)]
enum Op {
    Update(f64),
    Test(f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1.0e6..1.0e6f64).prop_map(Op::Update),
        (-1.0e6..1.0e6f64).prop_map(Op::Test),
    ]
}

proptest! {
    /// Any interleaving of commits and probes matches the naive model.
    #[test]
    fn prop_matches_naive_model(
        capacity in 1usize..64,
        ops in proptest::collection::vec(op_strategy(), 0..200),
    ) {
        let mut buffer: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();
        let mut model = ModelWindow::new(capacity);

        for op in &ops {
            match *op {
                Op::Update(value) => {
                    let full = buffer.update(value);
                    model.update(value);
                    prop_assert_eq!(full, model.filled >= capacity);
                    prop_assert_eq!(buffer.view(), View::Committed);
                }
                Op::Test(value) => {
                    buffer.test(value);
                    model.test(value);
                    prop_assert_eq!(buffer.view(), View::Speculating);
                }
            }

            // Identical accumulation order makes these bitwise comparisons.
            prop_assert_eq!(buffer.sum(), model.sum());
            prop_assert_eq!(buffer.len(), model.filled);
            prop_assert_eq!(buffer.is_full(), model.filled >= capacity);

            let effective = model.effective();
            for (index, expected) in effective.iter().enumerate() {
                prop_assert_eq!(*buffer.get(index).unwrap(), *expected);
            }
            prop_assert_eq!(*buffer.back(), effective[capacity - 1]);
            if model.filled > 0 {
                prop_assert_eq!(*buffer.front(), effective[capacity - model.filled]);
            }
        }
    }

    /// `sum` adds exactly the `capacity` most recent committed values,
    /// zero-padded while the window is filling. Padding slots and the stale
    /// values wraparound leaves behind never contribute.
    #[test]
    fn prop_sum_covers_exactly_the_window(
        capacity in 1usize..64,
        values in proptest::collection::vec(-1.0e6..1.0e6f64, 0..200),
    ) {
        let mut buffer: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();
        for &value in &values {
            buffer.update(value);
        }

        let retained = values.len().min(capacity);
        let mut expected = 0.0;
        for _ in 0..capacity - retained {
            expected += 0.0;
        }
        for &value in &values[values.len() - retained..] {
            expected += value;
        }
        prop_assert_eq!(buffer.sum(), expected);
        prop_assert_eq!(buffer.mean(), expected / capacity as f64);
    }

    /// Probing a value and then committing it is indistinguishable from
    /// committing it directly, bit for bit.
    #[test]
    fn prop_probe_then_commit_equals_direct_commit(
        capacity in 1usize..32,
        values in proptest::collection::vec(-1.0e6..1.0e6f64, 1..100),
        probes in proptest::collection::vec(-1.0e6..1.0e6f64, 1..8),
    ) {
        let mut probed: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();
        let mut direct: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();

        for &value in &values {
            // A burst of unrelated probes must leave no residue on the
            // following commit.
            for &probe in &probes {
                probed.test(probe);
            }
            probed.test(value);
            probed.update(value);
            direct.update(value);

            prop_assert_eq!(probed.sum().to_bits(), direct.sum().to_bits());
            prop_assert_eq!(probed.mean().to_bits(), direct.mean().to_bits());
            prop_assert_eq!(probed.front().to_bits(), direct.front().to_bits());
            prop_assert_eq!(probed.back().to_bits(), direct.back().to_bits());
        }
    }

    /// Out-of-window indices always error; in-window indices never do.
    #[test]
    fn prop_bounds_checked_access(
        capacity in 1usize..64,
        index in 0usize..256,
    ) {
        let buffer: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();
        prop_assert_eq!(buffer.get(index).is_ok(), index < capacity);
    }
}

quickcheck! {
    /// The physical capacity is the smallest power of two at or above the
    /// requested capacity, and equals it exactly for powers of two.
    fn qc_physical_capacity_is_next_power_of_two(capacity: usize) -> TestResult {
        if capacity == 0 || capacity > 1 << 24 {
            return TestResult::discard();
        }
        let buffer: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();
        let physical = buffer.physical_capacity();

        let smallest = capacity.next_power_of_two();
        TestResult::from_bool(
            physical == smallest
                && physical >= capacity
                && physical.is_power_of_two()
                && (physical == capacity) == capacity.is_power_of_two()
                && buffer.padding() == physical - capacity,
        )
    }

    /// `capacity` commits make the window full, and it stays full.
    fn qc_full_after_capacity_updates(capacity: usize, extra: u8) -> TestResult {
        if capacity == 0 || capacity > 4096 {
            return TestResult::discard();
        }
        let mut buffer: WindowedBuffer<f64> = WindowedBuffer::new(capacity).unwrap();
        for i in 0..capacity - 1 {
            if buffer.update(i as f64) {
                return TestResult::failed();
            }
        }
        if !buffer.update(0.0) {
            return TestResult::failed();
        }
        for i in 0..extra as usize {
            if !buffer.update(i as f64) {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
}
