// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remainder / `fmod` (spec.md §4.5): align exponents, then take the
//! aligned significands' integer remainder; the result's sign always
//! matches the dividend.
//!
//! The distilled spec describes this as "repeated subtraction"; an
//! unbounded loop is impractical once the aligned significands can reach
//! tens of digits, so this computes the same result via a single
//! division-and-multiply-back, the standard `fmod` implementation
//! technique (e.g. `fmod` in any libm `fdlibm`-derived implementation).

use crate::components::{Components, WideSignificand};
use crate::ops::special;
use crate::rounding::{self, Precision};
use crate::context::RoundingMode;

pub fn rem(a: &Components, b: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = special::propagate_nan(a, b) {
        return nan;
    }

    if a.is_infinite() || b.is_zero() {
        return special::invalid_result();
    }
    if b.is_infinite() || a.is_zero() {
        return Components::finite(a.sign, a.significand, a.exponent);
    }

    let guard = prec.p + 2;
    let al = crate::ops::align::align_narrow(a.significand, a.exponent, b.significand, b.exponent, guard);

    let divisor = al.b.to_u256();
    let (_, remainder) = al.a.to_u256().div_rem(&divisor);
    let raw = WideSignificand::from(remainder);

    rounding::normalize(a.sign, raw, al.common_exp, prec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn basic_remainder() {
        let a = Components::finite(false, 7, 0);
        let b = Components::finite(false, 2, 0);
        let r = rem(&a, &b, D64, RoundingMode::ToNearestEven);
        assert_eq!(r.significand, 1 * 10u128.pow(15));
        assert_eq!(r.exponent, -15);
    }

    #[test]
    fn result_sign_matches_dividend() {
        let a = Components::finite(true, 7, 0);
        let b = Components::finite(false, 2, 0);
        let r = rem(&a, &b, D64, RoundingMode::ToNearestEven);
        assert!(r.sign);
    }

    #[test]
    fn exact_multiple_yields_signed_zero() {
        let a = Components::finite(false, 10, 0);
        let b = Components::finite(false, 5, 0);
        let r = rem(&a, &b, D64, RoundingMode::ToNearestEven);
        assert!(r.is_zero() && !r.sign);
    }
}
