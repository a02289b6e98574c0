// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `pow(x, y)` (spec.md §4.8: "decomposed as exp(y*log x)"). The IEEE
//! 754-2008 §9.2.1 special cases the spec calls out are handled explicitly
//! below (they are defined even where `log x` would not be, e.g.
//! `pow(-1, inf) = 1`); everything else is the decimal-native decomposition
//! `exp(y * log(x))` for positive `x` (built from [`super::exp`]/
//! [`super::log`] directly, as spec.md prescribes), with negative `x`
//! handled by `|x|^y` plus a sign flip for odd integer `y` (`pow(x, y)` is
//! only real-valued for negative `x` when `y` is an integer).

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::flags::{self, ExceptionFlags};
use crate::ops::mul;
use crate::rounding::Precision;

use super::{abs, extend, negate};

fn is_integer(v: f64) -> bool {
    v.is_finite() && v == v.trunc()
}

fn is_odd_integer(v: f64) -> bool {
    is_integer(v) && (v.trunc() as i64) % 2 != 0
}

pub fn pow(x: &Components, y: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if x.is_signaling_nan() || y.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if x.is_nan() {
        return x.quieted();
    }
    if y.is_nan() {
        return y.quieted();
    }

    let yf = convert::to_f64(y);

    // pow(x, +-0) = 1 for any x, including NaN (already handled above).
    if y.is_zero() {
        return convert::from_i128(1, prec, mode);
    }
    // pow(1, y) = 1 for any y, including infinity/NaN.
    if !x.sign && !x.is_infinite() && !x.is_zero() {
        let xf = convert::to_f64(x);
        if xf == 1.0 {
            return convert::from_i128(1, prec, mode);
        }
    }
    // pow(-1, +-inf) = 1.
    if x.sign && !x.is_infinite() && !x.is_zero() {
        let xf = convert::to_f64(x);
        if xf == -1.0 && y.is_infinite() {
            return convert::from_i128(1, prec, mode);
        }
    }
    // pow(+-0, y < 0) = +-infinity (sign negative only if x is -0 and y is
    // an odd integer, per IEEE 754 copysign convention).
    if x.is_zero() && yf < 0.0 {
        let neg = x.sign && is_odd_integer(yf);
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(neg);
    }
    // pow(+-0, y > 0) = +-0.
    if x.is_zero() && yf > 0.0 {
        let neg = x.sign && is_odd_integer(yf);
        return Components::zero(neg, 0);
    }
    // pow(+-infinity, y): magnitude diverges to 0 or infinity depending on
    // the sign of y; a negative, odd-integer-exponent base carries its
    // sign through.
    if x.is_infinite() {
        let neg = x.sign && is_odd_integer(yf);
        return if yf > 0.0 { Components::infinity(neg) } else { Components::zero(neg, 0) };
    }
    // pow(x, +-infinity): |x| > 1 diverges as y -> +infinity and vanishes
    // as y -> -infinity; |x| < 1 is the opposite. (|x| == 1 handled above.)
    if y.is_infinite() {
        let xf = convert::to_f64(x).abs();
        let diverges = (xf > 1.0) == (yf > 0.0);
        return if diverges { Components::infinity(false) } else { Components::zero(false, 0) };
    }
    // Negative base is only real-valued for an integer exponent.
    if x.sign && !is_integer(yf) {
        flags::raise(ExceptionFlags::INVALID);
        return Components::quiet_nan(false, 0);
    }

    let wp = extend(prec);
    let ln_mag = super::log::log(&abs(x), wp, RoundingMode::ToNearestEven);
    let exponent = mul(y, &ln_mag, wp, RoundingMode::ToNearestEven);
    let mag = super::exp::exp(&exponent, wp, RoundingMode::ToNearestEven);
    let result = if x.sign && is_odd_integer(yf) { negate(&mag) } else { mag };
    convert::narrow(&result, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn pow_x_zero_is_one() {
        let x = convert::from_i128(7, D64, RoundingMode::ToNearestEven);
        let zero = Components::zero(false, 0);
        let r = pow(&x, &zero, D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_i128(&r), Some(1));
    }

    #[test]
    fn pow_one_y_is_one() {
        let one = convert::from_i128(1, D64, RoundingMode::ToNearestEven);
        let y = convert::from_f64(12.5, D64, RoundingMode::ToNearestEven);
        let r = pow(&one, &y, D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_i128(&r), Some(1));
    }

    #[test]
    fn pow_zero_negative_is_infinity() {
        let zero = Components::zero(false, 0);
        let neg_one = convert::from_i128(-1, D64, RoundingMode::ToNearestEven);
        let r = pow(&zero, &neg_one, D64, RoundingMode::ToNearestEven);
        assert!(r.is_infinite() && !r.sign);
    }

    #[test]
    fn pow_two_ten_is_1024() {
        let two = convert::from_i128(2, D64, RoundingMode::ToNearestEven);
        let ten = convert::from_i128(10, D64, RoundingMode::ToNearestEven);
        let r = pow(&two, &ten, D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_i128(&r), Some(1024));
    }
}
