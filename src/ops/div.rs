// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Division (spec.md §4.5): scale the dividend up by a guarded power of
//! ten, divide, and normalize the quotient with a sticky remainder bit.

use crate::bigint::U256;
use crate::components::{Components, WideSignificand};
use crate::context::RoundingMode;
use crate::flags::{self, ExceptionFlags};
use crate::ops::special;
use crate::rounding::{self, Precision};

pub fn div(a: &Components, b: &Components, prec: Precision, mode: RoundingMode) -> Components {
    if let Some(nan) = special::propagate_nan(a, b) {
        return nan;
    }

    let sign = a.sign ^ b.sign;

    if a.is_infinite() && b.is_infinite() {
        return special::invalid_result();
    }
    if a.is_infinite() {
        return Components::infinity(sign);
    }
    if b.is_infinite() {
        return Components::zero(sign, a.exponent);
    }
    if b.is_zero() {
        return if a.is_zero() {
            special::invalid_result()
        } else {
            flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
            Components::infinity(sign)
        };
    }
    if a.is_zero() {
        return Components::zero(sign, a.exponent - b.exponent);
    }

    // Scale the dividend up by `p + guard` digits so the quotient carries
    // `guard` extra digits of headroom before rounding down to `p`.
    let guard = prec.p + 2;
    let shift = prec.p + guard;
    let scaled = WideSignificand::Narrow(a.significand).mul_pow10(shift);

    let numerator = match scaled {
        WideSignificand::Narrow(v) => U256::from_u128(v),
        WideSignificand::Wide(v) => v,
    };
    let divisor = U256::from_u128(b.significand);
    let (quotient, remainder) = numerator.div_rem(&divisor);

    let mut raw = WideSignificand::from(quotient);
    if !remainder.is_zero() {
        raw = raw.add(&WideSignificand::Narrow(1));
    }

    let exponent = a.exponent - b.exponent - shift as i32;
    rounding::normalize(sign, raw, exponent, prec, mode)
}
