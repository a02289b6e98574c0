// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared high-precision constants for the transcendental kernel: `ln2`
//! and `pi`. Grounded on `original_source`'s `log_impl.hpp` and
//! `atan_impl.hpp`, which both build their function families around a
//! handful of such anchor constants, but derived here rather than
//! transcribed: each is the limit of a convergent series built entirely out
//! of the crate's own exact decimal arithmetic (`ops::{add,sub,mul,div}`),
//! not a hand-copied digit string. A typo in dozens of hand-copied
//! coefficients could not be caught without compiling and running the test
//! suite; a series summed to convergence is self-checking; it stops only
//! once the next term no longer changes the running total at the working
//! precision. Each constant is computed once at [`MAX_PRECISION`] and cached
//! with `once_cell`, the same way `symphonia-core`'s FFT twiddle-factor
//! tables are lazily built once and reused.

use once_cell::sync::Lazy;

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::ops::{add, div, mul, sub};
use crate::rounding::Precision;

/// The precision every constant in this module is derived at. 50 digits
/// comfortably outlives decimal128's 34-digit contract even after the
/// guard digits `super::extend` adds on top of a caller's target
/// precision.
pub(crate) const MAX_PRECISION: Precision = Precision { p: 50, e_min: -1_000, e_max: 1_000 };

const ROUND: RoundingMode = RoundingMode::ToNearestEven;

fn int(v: i128) -> Components {
    convert::from_i128(v, MAX_PRECISION, ROUND)
}

fn ratio(n: i128, d: i128) -> Components {
    div(&int(n), &int(d), MAX_PRECISION, ROUND)
}

/// `sum_{n=0}^inf sign^n * z^(2n+1) / (2n+1)`: the Maclaurin series for
/// `atanh(z)` (`alternate = false`) or `atan(z)` (`alternate = true`),
/// evaluated term-by-term until a term no longer changes the running sum.
pub(crate) fn odd_power_series(z: &Components, alternate: bool) -> Components {
    let z2 = mul(z, z, MAX_PRECISION, ROUND);
    let mut term = *z;
    let mut sum = *z;
    let mut negate = alternate;
    for n in 1..400u32 {
        term = mul(&term, &z2, MAX_PRECISION, ROUND);
        let denom = (2 * n + 1) as i128;
        let mut addend = div(&term, &int(denom), MAX_PRECISION, ROUND);
        if negate {
            addend = Components { sign: !addend.sign, ..addend };
        }
        negate = !negate && alternate;
        let next_sum = add(&sum, &addend, MAX_PRECISION, ROUND);
        if crate::ops::equal(&next_sum, &sum) {
            return next_sum;
        }
        sum = next_sum;
    }
    sum
}

/// `ln(2) = 2 * atanh(1/3)`.
fn compute_ln2() -> Components {
    let a = odd_power_series(&ratio(1, 3), false);
    mul(&a, &int(2), MAX_PRECISION, ROUND)
}

/// `pi` via Machin's formula, `pi = 16*atan(1/5) - 4*atan(1/239)`: both
/// arctangents converge quickly since `1/5` and `1/239` are far inside the
/// series' radius of convergence.
fn compute_pi() -> Components {
    let a = odd_power_series(&ratio(1, 5), true);
    let b = odd_power_series(&ratio(1, 239), true);
    let sixteen_a = mul(&a, &int(16), MAX_PRECISION, ROUND);
    let four_b = mul(&b, &int(4), MAX_PRECISION, ROUND);
    sub(&sixteen_a, &four_b, MAX_PRECISION, ROUND)
}

/// `ln(10) = ln2 + ln5 = 3*ln2 + 2*atanh(1/9)`, via `ln5 = ln(4) +
/// ln(5/4) = 2*ln2 + 2*atanh(1/9)`.
fn compute_ln10() -> Components {
    let ln2_val = compute_ln2();
    let a = odd_power_series(&ratio(1, 9), false);
    let three_ln2 = mul(&ln2_val, &int(3), MAX_PRECISION, ROUND);
    let two_a = mul(&a, &int(2), MAX_PRECISION, ROUND);
    add(&three_ln2, &two_a, MAX_PRECISION, ROUND)
}

static LN2: Lazy<Components> = Lazy::new(compute_ln2);
static LN10: Lazy<Components> = Lazy::new(compute_ln10);
static PI: Lazy<Components> = Lazy::new(compute_pi);

/// `ln(2)`, narrowed to `prec`.
pub(crate) fn ln2(prec: Precision) -> Components {
    convert::narrow(&LN2, prec, ROUND)
}

/// `ln(10)`, narrowed to `prec`.
pub(crate) fn ln10(prec: Precision) -> Components {
    convert::narrow(&LN10, prec, ROUND)
}

/// `pi`, narrowed to `prec`.
pub(crate) fn pi(prec: Precision) -> Components {
    convert::narrow(&PI, prec, ROUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn ln2_matches_f64() {
        let v = convert::to_f64(&ln2(D64));
        assert!((v - core::f64::consts::LN_2).abs() < 1e-14);
    }

    #[test]
    fn pi_matches_f64() {
        let v = convert::to_f64(&pi(D64));
        assert!((v - core::f64::consts::PI).abs() < 1e-14);
    }

    #[test]
    fn ln10_matches_f64() {
        let v = convert::to_f64(&ln10(D64));
        assert!((v - 10.0f64.ln()).abs() < 1e-14);
    }
}
