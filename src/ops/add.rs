// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addition and subtraction (spec.md §4.5): align, combine, normalize.

use crate::components::{Components, WideSignificand};
use crate::context::RoundingMode;
use crate::ops::align::{self, Combined};
use crate::ops::special;
use crate::rounding::{self, Precision};

/// `a + b` at the given target precision and rounding mode.
pub fn add(a: &Components, b: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = special::propagate_nan(a, b) {
        return nan;
    }

    match (a.is_infinite(), b.is_infinite()) {
        (true, true) => {
            return if a.sign == b.sign { Components::infinity(a.sign) } else { special::invalid_result() };
        }
        (true, false) => return Components::infinity(a.sign),
        (false, true) => return Components::infinity(b.sign),
        (false, false) => {}
    }

    if a.is_zero() && b.is_zero() {
        // spec.md §3 invariant 7: (+0)+(+0)=+0, (+0)+(-0)=+0 (round-to-
        // nearest default), (-0)+(-0)=-0; only round-toward-negative picks
        // the negative zero when signs disagree.
        let sign = if a.sign == b.sign {
            a.sign
        } else {
            matches!(mode, RoundingMode::TowardNegative)
        };
        return Components::zero(sign, a.exponent.min(b.exponent));
    }
    if a.is_zero() {
        return rounding::normalize(b.sign, WideSignificand::Narrow(b.significand), b.exponent, prec, mode);
    }
    if b.is_zero() {
        return rounding::normalize(a.sign, WideSignificand::Narrow(a.significand), a.exponent, prec, mode);
    }

    let guard = prec.p + 2;
    let al = align::align_narrow(a.significand, a.exponent, b.significand, b.exponent, guard);

    match align::combine_signed(&al, a.sign, b.sign) {
        Combined::Value(raw, sign) => rounding::normalize(sign, raw, al.common_exp, prec, mode),
        Combined::Cancelled => {
            let zero_sign = matches!(mode, RoundingMode::TowardNegative);
            Components::zero(zero_sign, al.common_exp)
        }
    }
}

/// `a - b`, defined as `a + (-b)` with `b`'s sign flipped (spec.md §4.5).
pub fn sub(a: &Components, b: &Components, prec: Precision, mode: RoundingMode) -> Components {
    let neg_b = Components { sign: !b.sign, ..*b };
    add(a, &neg_b, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn cohort_equality_sum() {
        // decimal64(4,0) + decimal64(40,-1): same value (4 and 4.0), summed
        // to 8, then canonicalized to the full 16-digit fast-form.
        let a = Components::finite(false, 4, 0);
        let b = Components::finite(false, 40, -1);
        let r = add(&a, &b, D64, RoundingMode::ToNearestEven);
        assert_eq!(r.significand, 8_000_000_000_000_000);
        assert_eq!(r.exponent, -15);
    }

    #[test]
    fn signed_zero_subtraction_of_equal_values() {
        let a = Components::finite(false, 1, 0);
        let b = Components::finite(false, 1, 0);
        let r = sub(&a, &b, D64, RoundingMode::ToNearestEven);
        assert!(r.is_zero());
        assert!(!r.sign);
    }

    #[test]
    fn positive_and_negative_zero_sum_to_positive_zero() {
        let a = Components::zero(false, 0);
        let b = Components::zero(true, 0);
        let r = add(&a, &b, D64, RoundingMode::ToNearestEven);
        assert!(r.is_zero() && !r.sign);
    }

    #[test]
    fn infinity_minus_infinity_is_invalid_nan() {
        let inf = Components::infinity(false);
        let r = sub(&inf, &inf, D64, RoundingMode::ToNearestEven);
        assert!(r.is_nan());
    }

    #[test]
    fn adding_to_zero_preserves_the_other_operand_s_value() {
        let z = Components::zero(false, 5);
        let v = Components::finite(false, 42, -1);
        let r = add(&v, &z, D64, RoundingMode::ToNearestEven);
        // Same value as 42e-1, canonicalized to 16 significant digits.
        assert_eq!(r.significand, 4_200_000_000_000_000);
        assert_eq!(r.exponent, -15);
    }
}
