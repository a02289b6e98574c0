// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `erf`/`erfc`, the Gauss error function and its complement. Total over
//! the reals, so no domain signaling is needed. `erf` is the Maclaurin
//! series `erf(x) = (2/sqrt(pi)) * (x - x^3/3 + x^5/10 - x^7/42 + ...)`,
//! run to convergence in exact decimal arithmetic; `erfc(x) = 1 - erf(x)`
//! directly, which loses precision to cancellation once `erf(x)` is very
//! close to `+-1` (roughly `|x| > 6`) — a known, documented tradeoff rather
//! than a separate large-`|x|` asymptotic expansion.

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::flags::{self, ExceptionFlags};
use crate::ops::{div, mul, sub};
use crate::rounding::Precision;

use super::{abs, extend, int, negate, ROUND};

/// `erf(x)` for `x >= 0`, via the Maclaurin series. Consecutive terms
/// relate by `term_n = -term_{n-1} * x^2 * (2n-1) / (n*(2n+1))`, a ratio
/// expressible purely in terms of `n` (the `n!` in each term's denominator
/// cancels against the previous term's own `(n-1)!`), so no separate power
/// accumulator is needed here the way [`super::trig`]'s `atan` needs one.
fn erf_series(x: &Components, wp: Precision) -> Components {
    let x2 = mul(x, x, wp, ROUND);
    let sum = super::converge_sum(*x, wp, 2000, |term, n| {
        let scaled = mul(term, &x2, wp, ROUND);
        let scaled = mul(&scaled, &int(2 * n as i128 - 1, wp), wp, ROUND);
        let denom = int(n as i128 * (2 * n as i128 + 1), wp);
        negate(&div(&scaled, &denom, wp, ROUND))
    });
    let two_over_sqrt_pi = {
        let pi = super::constants::pi(wp);
        let sqrt_pi = super::root::sqrt(&pi, wp, ROUND);
        div(&int(2, wp), &sqrt_pi, wp, ROUND)
    };
    mul(&sum, &two_over_sqrt_pi, wp, ROUND)
}

pub fn erf(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if x.is_infinite() {
        return int(if x.sign { -1 } else { 1 }, prec);
    }
    if x.is_zero() {
        return Components::zero(x.sign, x.exponent);
    }
    let wp = extend(prec);
    let mag = erf_series(&abs(x), wp);
    let signed = Components { sign: x.sign, ..mag };
    convert::narrow(&signed, prec, mode)
}

pub fn erfc(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if x.is_infinite() {
        return int(if x.sign { 2 } else { 0 }, prec);
    }
    let wp = extend(prec);
    let e = erf(x, wp, ROUND);
    let result = sub(&int(1, wp), &e, wp, ROUND);
    convert::narrow(&result, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn erf_of_zero_is_zero() {
        let r = erf(&Components::zero(false, 0), D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_f64(&r), 0.0);
    }

    #[test]
    fn erfc_of_zero_is_one() {
        let r = erfc(&Components::zero(false, 0), D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_f64(&r), 1.0);
    }

    #[test]
    fn erf_of_one_matches_known_value() {
        let one = convert::from_i128(1, D64, RoundingMode::ToNearestEven);
        let r = erf(&one, D64, RoundingMode::ToNearestEven);
        assert!((convert::to_f64(&r) - 0.8427007929497149).abs() < 1e-12);
    }

    #[test]
    fn erf_plus_erfc_is_one() {
        let x = convert::from_f64(0.37, D64, RoundingMode::ToNearestEven);
        let a = convert::to_f64(&erf(&x, D64, RoundingMode::ToNearestEven));
        let b = convert::to_f64(&erfc(&x, D64, RoundingMode::ToNearestEven));
        assert!((a + b - 1.0).abs() < 1e-9);
    }
}
