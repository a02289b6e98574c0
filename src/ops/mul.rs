// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Multiplication (spec.md §4.5): widen significands into the 256-bit
//! type, add exponents, XOR signs, normalize.

use crate::bigint::mul_u128_widening;
use crate::components::{Components, WideSignificand};
use crate::context::RoundingMode;
use crate::ops::special;
use crate::rounding::{self, Precision};

pub fn mul(a: &Components, b: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = special::propagate_nan(a, b) {
        return nan;
    }

    let sign = a.sign ^ b.sign;

    if a.is_infinite() || b.is_infinite() {
        let other_is_zero = if a.is_infinite() { b.is_zero() } else { a.is_zero() };
        return if other_is_zero { special::invalid_result() } else { Components::infinity(sign) };
    }

    if a.is_zero() || b.is_zero() {
        return Components::zero(sign, a.exponent + b.exponent);
    }

    let product = mul_u128_widening(a.significand, b.significand);
    let exponent = a.exponent + b.exponent;
    rounding::normalize(sign, WideSignificand::from(product), exponent, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D32: Precision = Precision { p: 7, e_min: -95, e_max: 96 };
    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn simple_product() {
        let a = Components::finite(false, 12, 0);
        let b = Components::finite(false, 3, 0);
        let r = mul(&a, &b, D64, RoundingMode::ToNearestEven);
        // 36, canonicalized up to 16 digits.
        assert_eq!(r.significand, 36 * 10u128.pow(14));
        assert_eq!(r.exponent, -14);
    }

    #[test]
    fn overflow_sets_overflow_and_inexact() {
        // decimal32::max() * decimal32(10): spec.md §8 scenario 5.
        let max = Components::finite(false, 9_999_999, 96);
        let ten = Components::finite(false, 10, 0);
        let r = mul(&max, &ten, D32, RoundingMode::ToNearestEven);
        assert!(r.is_infinite());
        assert!(crate::flags::get().contains(crate::flags::ExceptionFlags::OVERFLOW));
        crate::flags::clear();
    }

    #[test]
    fn signs_xor() {
        let a = Components::finite(true, 5, 0);
        let b = Components::finite(false, 5, 0);
        let r = mul(&a, &b, D64, RoundingMode::ToNearestEven);
        assert!(r.sign);
    }

    #[test]
    fn zero_times_infinity_is_invalid() {
        let z = Components::zero(false, 0);
        let inf = Components::infinity(false);
        let r = mul(&z, &inf, D64, RoundingMode::ToNearestEven);
        assert!(r.is_nan());
    }
}
