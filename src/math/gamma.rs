// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `gamma`/`lgamma` (spec.md §4.8: "argument-range partition, pre-tabulated
//! Taylor/Chebyshev/rational coefficients, reflection or recurrence
//! formulas"). Grounded on `original_source`'s `lgamma_impl.hpp` for that
//! range-partition-plus-reflection shape, but built here on upward
//! recurrence (`lgamma(x) = lgamma(x+1) - ln(x)`, shifting the argument up
//! until it is large) followed by Stirling's asymptotic series, rather than
//! `lgamma_impl.hpp`'s own near-zero Taylor expansion around the
//! Euler-Mascheroni constant: Stirling's coefficients are small, exactly
//! known rationals (Bernoulli numbers), so no constant needs deriving or
//! transcribing to get this off the ground. Negative arguments use the
//! reflection formula, `gamma(x)*gamma(1-x) = pi/sin(pi*x)`.

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::flags::{self, ExceptionFlags};
use crate::ops::{add, div, mul, sub};
use crate::rounding::Precision;

use super::{abs, extend, int, ratio, ROUND};

/// The argument magnitude Stirling's series is evaluated at; upward
/// recurrence shifts any smaller positive `x` up to at least this before
/// applying it.
const STIRLING_THRESHOLD: f64 = 30.0;

/// Stirling's series coefficients `B_{2k} / (2k(2k-1))` for `k = 1..=7`,
/// as exact rationals (Bernoulli numbers `B2=1/6, B4=-1/30, B6=1/42,
/// B8=-1/30, B10=5/66, B12=-691/2730, B14=7/6`).
const STIRLING_COEFFICIENTS: [(i128, i128); 7] =
    [(1, 12), (-1, 360), (1, 1260), (-1, 1680), (1, 1188), (-691, 360360), (1, 156)];

fn is_integer(c: &Components) -> bool {
    if c.exponent >= 0 {
        return true;
    }
    let shift = (-c.exponent) as u32;
    if shift > 38 {
        return false;
    }
    c.significand % 10u128.pow(shift) == 0
}

fn is_nonpositive_integer(x: &Components) -> bool {
    x.is_zero() || (x.sign && is_integer(x))
}

/// `lgamma(y)` for `y` already known to be `>= STIRLING_THRESHOLD`:
/// `(y - 1/2)*ln(y) - y + (1/2)*ln(2*pi) + sum_k B_{2k}/(2k(2k-1) y^{2k-1})`.
fn stirling_series(y: &Components, wp: Precision) -> Components {
    let ln_y = super::log::log(y, wp, ROUND);
    let half = ratio(1, 2, wp);
    let y_minus_half = sub(y, &half, wp, ROUND);
    let leading = sub(&mul(&y_minus_half, &ln_y, wp, ROUND), y, wp, ROUND);

    let pi = super::constants::pi(wp);
    let ln_pi = super::log::log(&pi, wp, ROUND);
    let ln2 = super::constants::ln2(wp);
    let ln_2pi = add(&ln2, &ln_pi, wp, ROUND);
    let half_ln_2pi = mul(&ln_2pi, &half, wp, ROUND);

    let y2 = mul(y, y, wp, ROUND);
    let mut y_pow = *y;
    let mut series = Components::zero(false, 0);
    for (num, den) in STIRLING_COEFFICIENTS {
        let denom = mul(&int(den, wp), &y_pow, wp, ROUND);
        let term = div(&int(num, wp), &denom, wp, ROUND);
        series = add(&series, &term, wp, ROUND);
        y_pow = mul(&y_pow, &y2, wp, ROUND);
    }

    add(&add(&leading, &half_ln_2pi, wp, ROUND), &series, wp, ROUND)
}

/// `lgamma(x)` for `x > 0`: shift `x` up by whole integers until it clears
/// [`STIRLING_THRESHOLD`], subtracting the log of each shift (`lgamma(x) =
/// lgamma(x+n) - ln(x) - ln(x+1) - ... - ln(x+n-1)`), then evaluate
/// Stirling's series at the shifted argument.
fn lgamma_positive(x: &Components, wp: Precision) -> Components {
    let xf = convert::to_f64(x);
    let shift = ((STIRLING_THRESHOLD - xf).ceil().max(0.0)) as i128;

    let mut log_sum = Components::zero(false, 0);
    let mut xk = *x;
    for _ in 0..shift {
        log_sum = add(&log_sum, &super::log::log(&xk, wp, ROUND), wp, ROUND);
        xk = add(&xk, &int(1, wp), wp, ROUND);
    }

    let stirling = stirling_series(&xk, wp);
    sub(&stirling, &log_sum, wp, ROUND)
}

/// `lgamma(x) = ln(|gamma(x)|)`. Poles at the non-positive integers yield
/// infinity and signal `divide_by_zero`; the sign of `gamma(x)` itself
/// (needed by callers that also want it) is discarded, matching `lgamma`'s
/// traditional single-value contract.
pub fn lgamma(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if x.is_infinite() {
        return Components::infinity(false);
    }
    if is_nonpositive_integer(x) {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(false);
    }

    let wp = extend(prec);
    let result = if !x.sign {
        lgamma_positive(x, wp)
    } else {
        let pi = super::constants::pi(wp);
        let pi_x = mul(&pi, x, wp, ROUND);
        let sin_val = super::trig::sin(&pi_x, wp, ROUND);
        let ln_pi = super::log::log(&pi, wp, ROUND);
        let ln_sin = super::log::log(&abs(&sin_val), wp, ROUND);
        let one_minus_x = sub(&int(1, wp), x, wp, ROUND);
        let lg_1mx = lgamma_positive(&one_minus_x, wp);
        sub(&sub(&ln_pi, &ln_sin, wp, ROUND), &lg_1mx, wp, ROUND)
    };
    convert::narrow(&result, prec, mode)
}

/// `gamma(x)`. Poles at zero and the negative integers yield infinity and
/// signal `divide_by_zero`; `gamma(-infinity)` is outside the real domain
/// and yields NaN with `invalid` signaled.
pub fn gamma(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if x.is_infinite() {
        if x.sign {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        return Components::infinity(false);
    }
    if is_nonpositive_integer(x) {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(x.sign);
    }

    let wp = extend(prec);
    if !x.sign {
        let lg = lgamma_positive(x, wp);
        let result = super::exp::exp(&lg, wp, ROUND);
        return convert::narrow(&result, prec, mode);
    }

    let pi = super::constants::pi(wp);
    let pi_x = mul(&pi, x, wp, ROUND);
    let sin_val = super::trig::sin(&pi_x, wp, ROUND);
    let ln_pi = super::log::log(&pi, wp, ROUND);
    let ln_sin = super::log::log(&abs(&sin_val), wp, ROUND);
    let one_minus_x = sub(&int(1, wp), x, wp, ROUND);
    let lg_1mx = lgamma_positive(&one_minus_x, wp);
    let lg_mag = sub(&sub(&ln_pi, &ln_sin, wp, ROUND), &lg_1mx, wp, ROUND);
    let mag = super::exp::exp(&lg_mag, wp, ROUND);
    let result = Components { sign: sin_val.sign, ..mag };
    convert::narrow(&result, prec, mode)
}
