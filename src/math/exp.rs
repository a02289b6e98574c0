// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `exp`/`expm1` (spec.md §4.8: "reduce x = k·ln2 + r, |r| <= ln2/2;
//! evaluate expm1(r) by a Remez/Taylor polynomial; reconstruct exp(x) =
//! 2^k·(1+expm1(r))"). Grounded on `original_source`'s `expm1_impl.hpp`
//! for the overall reduce/evaluate/reconstruct shape; the reduced-range
//! evaluation itself is the plain Maclaurin series `expm1(r) = r + r^2/2!
//! + r^3/3! + ...` run to convergence rather than `expm1_impl.hpp`'s
//! tabulated per-precision polynomial (see [`super`]'s module docs for
//! why).

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::flags::{self, ExceptionFlags};
use crate::ops::mul;
use crate::rounding::Precision;

use super::{extend, int, negate, ROUND};

/// `expm1(r) = r + r^2/2! + r^3/3! + ...`, convergent for any `r` but only
/// fast for the `|r| <= ln2/2` range `exp`'s reduction below guarantees.
fn expm1_series(r: &Components, wp: Precision) -> Components {
    super::converge_sum(*r, wp, 200, |term, n| {
        let next = mul(term, r, wp, ROUND);
        crate::ops::div(&next, &int(n as i128 + 1, wp), wp, ROUND)
    })
}

/// `2^k` for any integer `k` (negative via reciprocal), by exponentiation
/// by squaring.
fn pow2(k: i128, prec: Precision) -> Components {
    if k == 0 {
        return int(1, prec);
    }
    let neg = k < 0;
    let mut n = k.unsigned_abs();
    let mut base = int(2, prec);
    let mut acc = int(1, prec);
    while n > 0 {
        if n & 1 == 1 {
            acc = mul(&acc, &base, prec, ROUND);
        }
        n >>= 1;
        if n > 0 {
            base = mul(&base, &base, prec, ROUND);
        }
    }
    if neg {
        crate::ops::div(&int(1, prec), &acc, prec, ROUND)
    } else {
        acc
    }
}

/// Rough `f64` gate for whether `exp(x)` is certain to overflow/underflow
/// `prec`'s range, used only to pick a branch; the reduction below produces
/// the actual correctly-rounded boundary case.
fn overflow_bound(prec: Precision) -> f64 {
    (prec.e_max as f64 + prec.p as f64 + 2.0) * core::f64::consts::LN_10
}

fn underflow_bound(prec: Precision) -> f64 {
    -((-prec.e_min) as f64 + prec.p as f64 + 2.0) * core::f64::consts::LN_10
}

/// Computes `exp(x)` via the reduce/evaluate/reconstruct pipeline.
fn exp_impl(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    let wp = extend(prec);
    let xf = convert::to_f64(x);
    if xf > overflow_bound(prec) {
        flags::raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
        return Components::infinity(false);
    }
    if xf < underflow_bound(prec) {
        flags::raise(ExceptionFlags::UNDERFLOW | ExceptionFlags::INEXACT);
        return Components::zero(false, prec.e_min);
    }

    let ln2 = super::constants::ln2(wp);
    let k = (xf / core::f64::consts::LN_2).round() as i128;
    let k_ln2 = mul(&int(k, wp), &ln2, wp, ROUND);
    let r = crate::ops::sub(x, &k_ln2, wp, ROUND);

    let em1 = expm1_series(&r, wp);
    let exp_r = crate::ops::add(&int(1, wp), &em1, wp, ROUND);
    let scaled = mul(&exp_r, &pow2(k, wp), wp, ROUND);
    convert::narrow(&scaled, prec, mode)
}

pub fn exp(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if x.is_infinite() {
        return if x.sign { Components::zero(false, 0) } else { Components::infinity(false) };
    }
    if x.is_zero() {
        return int(1, prec);
    }
    exp_impl(x, prec, mode)
}

/// `expm1(x) = exp(x) - 1`, evaluated directly from the reduced-range
/// series (rather than subtracting 1 from `exp(x)`) whenever the reduction
/// leaves `x` already inside the reduced range, avoiding the cancellation
/// that subtraction would cause for small `x`.
pub fn expm1(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if x.is_infinite() {
        return if x.sign { Components::zero(false, 0) } else { Components::infinity(false) };
    }
    if x.is_zero() {
        return Components::zero(x.sign, x.exponent);
    }

    let wp = extend(prec);
    let xf = convert::to_f64(x);
    if xf > overflow_bound(prec) {
        flags::raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
        return Components::infinity(false);
    }
    if xf < underflow_bound(prec) {
        return negate(&int(1, prec));
    }

    let ln2 = super::constants::ln2(wp);
    let k = (xf / core::f64::consts::LN_2).round() as i128;
    if k == 0 {
        let em1 = expm1_series(x, wp);
        return convert::narrow(&em1, prec, mode);
    }

    let k_ln2 = mul(&int(k, wp), &ln2, wp, ROUND);
    let r = crate::ops::sub(x, &k_ln2, wp, ROUND);
    let em1 = expm1_series(&r, wp);
    let exp_r = crate::ops::add(&int(1, wp), &em1, wp, ROUND);
    let exp_x = mul(&exp_r, &pow2(k, wp), wp, ROUND);
    let result = crate::ops::sub(&exp_x, &int(1, wp), wp, ROUND);
    convert::narrow(&result, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn exp_of_zero_is_one() {
        let r = exp(&Components::zero(false, 0), D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_f64(&r), 1.0);
    }

    #[test]
    fn exp_of_negative_infinity_is_zero() {
        let r = exp(&Components::infinity(true), D64, RoundingMode::ToNearestEven);
        assert!(r.is_zero());
    }

    #[test]
    fn exp_of_one_matches_eulers_number() {
        let one = convert::from_i128(1, D64, RoundingMode::ToNearestEven);
        let r = exp(&one, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - core::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn expm1_matches_exp_minus_one_near_zero() {
        let x = convert::from_f64(0.001, D64, RoundingMode::ToNearestEven);
        let r = expm1(&x, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - 1.0005001667083417e-3).abs() < 1e-12);
    }

    #[test]
    fn expm1_of_large_x_matches_exp_of_x_minus_one() {
        let x = convert::from_i128(20, D64, RoundingMode::ToNearestEven);
        let r = expm1(&x, D64, RoundingMode::ToNearestEven);
        let want = 20.0f64.exp() - 1.0;
        assert!((convert::to_f64(&r) - want).abs() / want < 1e-13);
    }

    #[test]
    fn nan_propagates() {
        let r = exp(&Components::quiet_nan(false, 3), D64, RoundingMode::ToNearestEven);
        assert!(r.is_nan());
    }

    #[test]
    fn exp_overflows_to_infinity() {
        flags::clear();
        let huge = convert::from_i128(1_000_000, D64, RoundingMode::ToNearestEven);
        let r = exp(&huge, D64, RoundingMode::ToNearestEven);
        assert!(r.is_infinite());
        assert!(flags::get().contains(ExceptionFlags::OVERFLOW));
    }
}
