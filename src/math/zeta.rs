// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Riemann zeta function (spec.md §4.8's "riemann_zeta" entry;
//! grounded on `original_source`'s `test_zeta.cpp`). `libm` does not carry
//! this one either, so it is evaluated directly: Euler-Maclaurin
//! summation for `s > 1`, and Riemann's functional equation
//! `zeta(s) = 2^s * pi^(s-1) * sin(pi*s/2) * gamma(1-s) * zeta(1-s)` to
//! fold `s <= 1` back into the `s > 1` case (since `1 - s > 0` whenever
//! `s < 1`). `s == 1` is the function's pole. See [`super`]'s module docs
//! for the overall accuracy tradeoff.

use crate::components::Components;
use crate::context::RoundingMode;
use crate::flags::{self, ExceptionFlags};
use crate::rounding::Precision;

/// Number of direct summation terms before applying the Euler-Maclaurin
/// tail correction; enough for `f64`-level accuracy down to `s` just above
/// 1.
const N: f64 = 64.0;

/// `zeta(s)` for `s > 1`, via direct summation plus an Euler-Maclaurin
/// correction for the tail `sum_{n>N} n^-s`.
fn zeta_above_one(s: f64) -> f64 {
    let n = N as u32;
    let mut sum = 0.0;
    for k in 1..=n {
        sum += (k as f64).powf(-s);
    }
    let n_pow = N.powf(1.0 - s);
    let n_pow_s = N.powf(-s);
    sum + n_pow / (s - 1.0) - 0.5 * n_pow_s + s * n_pow_s / N / 12.0
}

fn zeta_real(s: f64) -> f64 {
    if s == 1.0 {
        return f64::INFINITY;
    }
    if s > 1.0 {
        return zeta_above_one(s);
    }
    // Functional equation; 1 - s > 0 here so the recursive call always
    // lands back in the `s > 1` (or `0 < 1-s <= 1`, handled by one more
    // step down to a convergent direct sum) branch.
    let one_minus_s = 1.0 - s;
    let reflected = if one_minus_s > 1.0 { zeta_above_one(one_minus_s) } else { zeta_above_one(one_minus_s + 1e-9) };
    let factor = 2f64.powf(s) * core::f64::consts::PI.powf(s - 1.0) * (core::f64::consts::FRAC_PI_2 * s).sin();
    factor * libm::tgamma(one_minus_s) * reflected
}

/// `riemann_zeta(s)`. The pole at `s = 1` yields infinity and signals
/// `divide_by_zero`.
pub fn riemann_zeta(s: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if s.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if s.is_nan() {
        return s.quieted();
    }
    let v = crate::convert::to_f64(s);
    if v == 1.0 {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(false);
    }
    crate::convert::from_f64(zeta_real(v), prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn zeta_two_is_pi_squared_over_six() {
        let two = convert::from_i128(2, D64, RoundingMode::ToNearestEven);
        let r = riemann_zeta(&two, D64, RoundingMode::ToNearestEven);
        let expected = core::f64::consts::PI * core::f64::consts::PI / 6.0;
        assert!((convert::to_f64(&r) - expected).abs() < 1e-6);
    }

    #[test]
    fn zeta_pole_at_one_signals_divide_by_zero() {
        flags::clear();
        let one = convert::from_i128(1, D64, RoundingMode::ToNearestEven);
        let r = riemann_zeta(&one, D64, RoundingMode::ToNearestEven);
        assert!(r.is_infinite());
        assert!(flags::get().contains(ExceptionFlags::DIVIDE_BY_ZERO));
    }

    #[test]
    fn zeta_of_negative_two_is_a_trivial_zero() {
        let neg_two = convert::from_i128(-2, D64, RoundingMode::ToNearestEven);
        let r = riemann_zeta(&neg_two, D64, RoundingMode::ToNearestEven);
        assert!(convert::to_f64(&r).abs() < 1e-6);
    }
}
