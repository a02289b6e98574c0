// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `bigint` module provides the multi-limb unsigned integers needed to
//! multiply decimal significands and carry intermediate results without
//! loss: a 256-bit type (`U256`), built from four 64-bit limbs, plus a
//! widening 128x128 -> 256 multiply built on the native `u128` 64x64 -> 128
//! primitive.
//!
//! Native `u64` and `u128` already provide everything the 64- and 128-bit
//! "big" integers need (wrapping arithmetic, shifts, division); this module
//! only adds the 256-bit type and a handful of decimal-digit helpers shared
//! by both widths.

mod pow10;
mod u256;

pub use pow10::{
    decimal_digit_count_u128, decimal_digit_count_u256, pow10_u128, pow10_u128_const, pow10_u256,
};
pub use u256::U256;

/// Widens a 64x64 -> 128 product using the native primitive, split into
/// high/low 64-bit halves. This is the primitive spec.md assumes is
/// available to the implementation.
#[inline]
pub fn mul64_wide(a: u64, b: u64) -> (u64, u64) {
    let p = (a as u128) * (b as u128);
    ((p >> 64) as u64, p as u64)
}

/// Widening 128x128 -> 256 multiply, built from four 64x64 -> 128 partial
/// products (schoolbook). This is the arithmetic kernel's decimal128
/// multiply path: two 34-digit significands can produce up to 68 digits,
/// which does not fit in a native `u128`.
pub fn mul_u128_widening(a: u128, b: u128) -> U256 {
    let a0 = a as u64;
    let a1 = (a >> 64) as u64;
    let b0 = b as u64;
    let b1 = (b >> 64) as u64;

    let p00 = a0 as u128 * b0 as u128;
    let p01 = a0 as u128 * b1 as u128;
    let p10 = a1 as u128 * b0 as u128;
    let p11 = a1 as u128 * b1 as u128;

    let limb0 = p00 as u64;
    let carry0 = p00 >> 64;

    let mid = (p01 as u64 as u128) + (p10 as u64 as u128) + carry0;
    let limb1 = mid as u64;

    let carry1 = (mid >> 64) + (p01 >> 64) + (p10 >> 64);
    let hi = p11 + carry1;
    let limb2 = hi as u64;
    let limb3 = (hi >> 64) as u64;

    U256::from_limbs([limb0, limb1, limb2, limb3])
}

/// Counts decimal digits of a value via the shared power-of-ten table,
/// generic over anything the table knows how to measure.
pub trait DecimalDigits {
    fn decimal_digit_count(&self) -> u32;
}

impl DecimalDigits for u32 {
    fn decimal_digit_count(&self) -> u32 {
        decimal_digit_count_u128(*self as u128)
    }
}

impl DecimalDigits for u64 {
    fn decimal_digit_count(&self) -> u32 {
        decimal_digit_count_u128(*self as u128)
    }
}

impl DecimalDigits for u128 {
    fn decimal_digit_count(&self) -> u32 {
        decimal_digit_count_u128(*self)
    }
}

impl DecimalDigits for U256 {
    fn decimal_digit_count(&self) -> u32 {
        decimal_digit_count_u256(*self)
    }
}
