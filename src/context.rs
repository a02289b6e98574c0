// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `context` module holds the process-wide active rounding mode.
//!
//! Per spec.md §5, the rounding mode is process-wide state with an
//! atomic-read/atomic-write contract: a top-level arithmetic call reads it
//! once and uses that value consistently for the call's duration, even if
//! another thread concurrently changes it. Grounded on the teacher's
//! `once_cell`/`Lazy` dependency (used there for lazily-built FFT tables in
//! `symphonia-core/src/dsp/fft/no_simd.rs`), adapted here to a mutable
//! `AtomicU8` cell rather than a one-shot computed constant.

use core::sync::atomic::{AtomicU8, Ordering};

/// The five IEEE 754-2008 rounding-direction attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to the nearest representable value; ties go to the value with
    /// an even last digit. The IEEE 754 default.
    ToNearestEven = 0,
    /// Round to the nearest representable value; ties round away from
    /// zero.
    ToNearestAway = 1,
    /// Truncate toward zero.
    TowardZero = 2,
    /// Round toward positive infinity.
    TowardPositive = 3,
    /// Round toward negative infinity.
    TowardNegative = 4,
}

impl RoundingMode {
    const fn from_u8(v: u8) -> RoundingMode {
        match v {
            0 => RoundingMode::ToNearestEven,
            1 => RoundingMode::ToNearestAway,
            2 => RoundingMode::TowardZero,
            3 => RoundingMode::TowardPositive,
            4 => RoundingMode::TowardNegative,
            _ => RoundingMode::ToNearestEven,
        }
    }
}

static ACTIVE_MODE: AtomicU8 = AtomicU8::new(RoundingMode::ToNearestEven as u8);

/// Sets the process-wide active rounding mode.
pub fn set_rounding_mode(mode: RoundingMode) {
    ACTIVE_MODE.store(mode as u8, Ordering::Relaxed);
}

/// Reads the process-wide active rounding mode. Arithmetic entry points
/// call this exactly once per top-level operation so that a single call
/// observes one consistent mode even under concurrent mutation.
pub fn rounding_mode() -> RoundingMode {
    RoundingMode::from_u8(ACTIVE_MODE.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test_helper::serial;

    mod serial_test_helper {
        use std::sync::Mutex;
        static LOCK: Mutex<()> = Mutex::new(());

        /// Tests that mutate process-wide rounding-mode state must not run
        /// concurrently with each other.
        pub fn serial<T>(f: impl FnOnce() -> T) -> T {
            let _guard = LOCK.lock().unwrap();
            f()
        }
    }

    #[test]
    fn default_mode_is_to_nearest_even() {
        serial(|| {
            set_rounding_mode(RoundingMode::ToNearestEven);
            assert_eq!(rounding_mode(), RoundingMode::ToNearestEven);
        });
    }

    #[test]
    fn set_then_get_round_trips_each_mode() {
        serial(|| {
            for mode in [
                RoundingMode::ToNearestEven,
                RoundingMode::ToNearestAway,
                RoundingMode::TowardZero,
                RoundingMode::TowardPositive,
                RoundingMode::TowardNegative,
            ] {
                set_rounding_mode(mode);
                assert_eq!(rounding_mode(), mode);
            }
            set_rounding_mode(RoundingMode::ToNearestEven);
        });
    }
}
