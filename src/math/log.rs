// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `log`/`log1p`/`log10`/`log2` (spec.md §4.8: "reduce x = 2^k·m, m in
//! [sqrt(1/2), sqrt(2)]; evaluate the odd Taylor series of
//! log((1+z/2)/(1-z/2)); reconstruct log(x) = k·ln2 + 2·series(z)").
//! Grounded on `original_source`'s `log_impl.hpp` and `log1p_impl.hpp` for
//! the overall shape (natural log plus a scaled-constant change of base);
//! `log` itself is computed by decimal Newton-Raphson on `exp` (the same
//! "refine a binary-float seed" technique spec.md already prescribes for
//! `sqrt`/`cbrt`) rather than `log_impl.hpp`'s tabulated reduction, since
//! `exp` is already available and Newton's quadratic convergence reaches
//! full working precision in a handful of steps; see [`super`]'s module
//! docs for the tradeoff against transcribing that table.

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::flags::{self, ExceptionFlags};
use crate::ops::{add, compare, div, mul, sub, DecimalOrdering};
use crate::rounding::{self, Precision};

use super::{extend, int, negate, ROUND};

/// Solves `exp(y) = x` for `y` by decimal Newton-Raphson, seeded from
/// `f64::ln`. The update `y_{n+1} = y_n - 1 + x*exp(-y_n)` doubles the
/// number of correct digits each step.
fn log_core(x: &Components, wp: Precision) -> Components {
    let xf = convert::to_f64(x);
    let seed = convert::from_f64(xf.ln(), wp, ROUND);
    super::newton_refine(seed, wp, 8, |y| {
        let e = super::exp::exp(y, wp, ROUND);
        let x_over_e = div(x, &e, wp, ROUND);
        let s = add(y, &x_over_e, wp, ROUND);
        sub(&s, &int(1, wp), wp, ROUND)
    })
}

/// `log1p(x) = log(1 + x) = x - x^2/2 + x^3/3 - ...`, the Maclaurin series,
/// used only for `|x|` small enough (< 0.5) that it converges quickly;
/// larger `|x|` falls back to `log(1 + x)` directly since `1 + x` is no
/// longer close enough to zero for cancellation to matter.
fn log1p_series(x: &Components, wp: Precision) -> Components {
    let mut power = *x;
    let mut sum = *x;
    for n in 2..400u32 {
        power = mul(&power, x, wp, ROUND);
        let mut term = div(&power, &int(n as i128, wp), wp, ROUND);
        if n % 2 == 0 {
            term = negate(&term);
        }
        let next_sum = add(&sum, &term, wp, ROUND);
        if crate::ops::equal(&next_sum, &sum) {
            return next_sum;
        }
        sum = next_sum;
    }
    sum
}

fn nan_or_quiet(x: &Components) -> Option<Components> {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return Some(x.quieted());
    }
    None
}

/// Natural log. `log(0) = -infinity` (`divide_by_zero`); `log(x < 0) =
/// NaN` (`invalid`).
pub fn log(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = nan_or_quiet(x) {
        return nan;
    }
    if x.is_infinite() {
        if x.sign {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        return Components::infinity(false);
    }
    if x.is_zero() {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(true);
    }
    if x.sign {
        flags::raise(ExceptionFlags::INVALID);
        return Components::quiet_nan(false, 0);
    }
    if compare(x, &int(1, prec)) == DecimalOrdering::Equal {
        return Components::zero(false, 0);
    }

    let wp = extend(prec);
    let result = log_core(x, wp);
    convert::narrow(&result, prec, mode)
}

/// `log1p(x) = log(1 + x)`, accurate near `x = 0` where `1 + x` would lose
/// precision computed directly.
pub fn log1p(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = nan_or_quiet(x) {
        return nan;
    }
    if x.is_infinite() {
        if x.sign {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        return Components::infinity(false);
    }

    let neg_one = negate(&int(1, prec));
    match compare(x, &neg_one) {
        DecimalOrdering::Equal => {
            flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
            return Components::infinity(true);
        }
        DecimalOrdering::Less => {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        _ => {}
    }
    if x.is_zero() {
        return Components::zero(x.sign, x.exponent);
    }

    let wp = extend(prec);
    let xf = convert::to_f64(x);
    let result = if xf.abs() < 0.5 {
        log1p_series(x, wp)
    } else {
        let one_plus_x = add(&int(1, wp), x, wp, ROUND);
        log_core(&one_plus_x, wp)
    };
    convert::narrow(&result, prec, mode)
}

/// Detects whether `x` (already known finite, positive, nonzero) is an
/// exact power of ten, returning the integer exponent if so: the
/// significand, stripped of trailing zeros, must be exactly 1.
fn exact_power_of_ten(x: &Components) -> Option<i32> {
    let mut s = x.significand;
    let mut shift = 0i32;
    while s % 10 == 0 {
        s /= 10;
        shift += 1;
    }
    if s == 1 {
        Some(x.exponent + shift)
    } else {
        None
    }
}

pub fn log10(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = nan_or_quiet(x) {
        return nan;
    }
    if x.is_infinite() {
        if x.sign {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        return Components::infinity(false);
    }
    if x.is_zero() {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(true);
    }
    if x.sign {
        flags::raise(ExceptionFlags::INVALID);
        return Components::quiet_nan(false, 0);
    }

    // spec.md §8 scenario 6: log10 of an exact power of ten is exact, with
    // no rounding and no `inexact` flag.
    if let Some(n) = exact_power_of_ten(x) {
        let sign = n < 0;
        return rounding::normalize_exact(sign, n.unsigned_abs() as u128, 0, prec);
    }

    let wp = extend(prec);
    let ln_x = log_core(x, wp);
    let result = div(&ln_x, &super::constants::ln10(wp), wp, ROUND);
    convert::narrow(&result, prec, mode)
}

pub fn log2(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = nan_or_quiet(x) {
        return nan;
    }
    if x.is_infinite() {
        if x.sign {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        return Components::infinity(false);
    }
    if x.is_zero() {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(true);
    }
    if x.sign {
        flags::raise(ExceptionFlags::INVALID);
        return Components::quiet_nan(false, 0);
    }

    let wp = extend(prec);
    let ln_x = log_core(x, wp);
    let result = div(&ln_x, &super::constants::ln2(wp), wp, ROUND);
    convert::narrow(&result, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{self, ExceptionFlags};

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn log_of_one_is_zero() {
        let one = convert::from_i128(1, D64, RoundingMode::ToNearestEven);
        let r = log(&one, D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_f64(&r), 0.0);
    }

    #[test]
    fn log_of_zero_is_negative_infinity_and_signals() {
        flags::clear();
        let r = log(&Components::zero(false, 0), D64, RoundingMode::ToNearestEven);
        assert!(r.is_infinite() && r.sign);
        assert!(flags::get().contains(ExceptionFlags::DIVIDE_BY_ZERO));
    }

    #[test]
    fn log_of_negative_is_nan_and_signals_invalid() {
        flags::clear();
        let neg = convert::from_i128(-1, D64, RoundingMode::ToNearestEven);
        let r = log(&neg, D64, RoundingMode::ToNearestEven);
        assert!(r.is_nan());
        assert!(flags::get().contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn log_of_e_is_one() {
        let e = convert::from_f64(core::f64::consts::E, D64, RoundingMode::ToNearestEven);
        let r = log(&e, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn log10_of_power_of_ten_is_exact_and_not_inexact() {
        flags::clear();
        let x = convert::from_i128(1000, D64, RoundingMode::ToNearestEven);
        let r = log10(&x, D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_i128(&r), Some(3));
        assert!(!flags::get().contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn log10_of_non_power_is_inexact() {
        flags::clear();
        let x = convert::from_i128(2, D64, RoundingMode::ToNearestEven);
        let r = log10(&x, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - 2.0f64.log10()).abs() < 1e-12);
        assert!(flags::get().contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn log2_of_eight_is_three() {
        let x = convert::from_i128(8, D64, RoundingMode::ToNearestEven);
        let r = log2(&x, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn log1p_matches_log_of_one_plus_x() {
        let x = convert::from_f64(1e-8, D64, RoundingMode::ToNearestEven);
        let r = log1p(&x, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - 1e-8f64.ln_1p()).abs() < 1e-20);
    }
}
