// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fused multiply-add (spec.md §4.5): widen `a * b`, accumulate `c` at
//! the widened exponent, and normalize once rather than rounding the
//! product before adding.

use crate::bigint::mul_u128_widening;
use crate::components::{Components, WideSignificand};
use crate::context::RoundingMode;
use crate::flags::{self, ExceptionFlags};
use crate::ops::align::{self, Combined};
use crate::ops::add;
use crate::rounding::{self, Precision};

pub fn fma(a: &Components, b: &Components, c: &Components, prec: Precision, mode: RoundingMode) -> Components {
    let mut first_nan = None;
    for v in [a, b, c] {
        if v.is_signaling_nan() {
            flags::raise(ExceptionFlags::INVALID);
        }
        if v.is_nan() && first_nan.is_none() {
            first_nan = Some(v.quieted());
        }
    }
    if let Some(n) = first_nan {
        return n;
    }

    let sign_p = a.sign ^ b.sign;

    if a.is_infinite() || b.is_infinite() {
        let other_zero = if a.is_infinite() { b.is_zero() } else { a.is_zero() };
        if other_zero {
            flags::raise(ExceptionFlags::INVALID);
            return Components::quiet_nan(false, 0);
        }
        return add::add(&Components::infinity(sign_p), c, prec, mode);
    }

    if a.is_zero() || b.is_zero() {
        return add::add(&Components::zero(sign_p, a.exponent + b.exponent), c, prec, mode);
    }

    if c.is_infinite() {
        return Components::infinity(c.sign);
    }

    let product = mul_u128_widening(a.significand, b.significand);
    let exponent_p = a.exponent + b.exponent;

    if c.is_zero() {
        return rounding::normalize(sign_p, WideSignificand::from(product), exponent_p, prec, mode);
    }

    let guard = 2 * prec.p + 4;
    let al = align::align(WideSignificand::from(product), exponent_p, WideSignificand::Narrow(c.significand), c.exponent, guard);

    match align::combine_signed(&al, sign_p, c.sign) {
        Combined::Value(raw, sign) => rounding::normalize(sign, raw, al.common_exp, prec, mode),
        Combined::Cancelled => {
            let zero_sign = matches!(mode, RoundingMode::TowardNegative);
            Components::zero(zero_sign, al.common_exp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn matches_separate_multiply_then_add_on_exact_values() {
        let a = Components::finite(false, 3, 0);
        let b = Components::finite(false, 4, 0);
        let c = Components::finite(false, 5, 0);
        let r = fma(&a, &b, &c, D64, RoundingMode::ToNearestEven);
        // 3*4+5 = 17, canonicalized to 16 digits.
        assert_eq!(r.significand, 17 * 10u128.pow(14));
        assert_eq!(r.exponent, -14);
    }

    #[test]
    fn zero_times_anything_plus_c_is_c() {
        let z = Components::zero(false, 0);
        let b = Components::finite(false, 9, 0);
        let c = Components::finite(false, 7, -2);
        let r = fma(&z, &b, &c, D64, RoundingMode::ToNearestEven);
        assert_eq!(r.significand, 7 * 10u128.pow(15));
        assert_eq!(r.exponent, -17);
    }

    #[test]
    fn nan_from_any_operand_propagates() {
        let nan = Components::quiet_nan(false, 3);
        let a = Components::finite(false, 1, 0);
        let b = Components::finite(false, 1, 0);
        let r = fma(&nan, &a, &b, D64, RoundingMode::ToNearestEven);
        assert!(r.is_nan());
    }
}
