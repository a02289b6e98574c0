// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Precomputed powers of ten, and the `decimal_digit_count` helpers built on
//! them. Tables are static read-only data, computed once lazily the same
//! way the teacher builds its FFT twiddle-factor tables
//! (`symphonia-core/src/dsp/fft/no_simd.rs`'s `Lazy` macro), since a custom
//! 256-bit type cannot be multiplied in a `const fn` as cheaply as the
//! teacher's `Complex<f32>` table entries.

use once_cell::sync::Lazy;

use super::U256;

/// 10^0 .. 10^38, the full range a `u128` can hold (10^38 still fits;
/// 10^39 would not).
const POW10_U128_TABLE: [u128; 39] = {
    let mut table = [1u128; 39];
    let mut i = 1;
    while i < 39 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// 10^0 .. 10^77, covering every widened-significand magnitude the
/// arithmetic kernel can produce (a decimal128 product has at most 68
/// digits; alignment shifts during addition can add a handful more).
static POW10_U256_TABLE: Lazy<[U256; 78]> = Lazy::new(|| {
    let mut table = [U256::ZERO; 78];
    table[0] = U256::ONE;
    for i in 1..78 {
        table[i] = table[i - 1].wrapping_mul(&U256::from_u64(10));
    }
    table
});

/// Returns 10^exp as a `u128`. Panics if `exp > 38` (callers must route
/// larger exponents through [`pow10_u256`]).
pub fn pow10_u128(exp: u32) -> u128 {
    POW10_U128_TABLE[exp as usize]
}

/// `const fn` twin of [`pow10_u128`], usable in `const` contexts (e.g. a
/// layout's maximum significand).
pub const fn pow10_u128_const(exp: u32) -> u128 {
    POW10_U128_TABLE[exp as usize]
}

/// Returns 10^exp as a `U256`. Panics if `exp > 77`.
pub fn pow10_u256(exp: u32) -> U256 {
    POW10_U256_TABLE[exp as usize]
}

/// `decimal_digit_count(x)`: the number of base-10 digits of `x`, i.e.
/// `ceil(log10(x + 1))`, with the convention that zero has one digit.
/// Found via binary search over the power-of-ten table rather than a
/// floating-point `log10` (which can be off-by-one near exact powers of
/// ten), matching the approach spec.md §4.1 calls for.
pub fn decimal_digit_count_u128(x: u128) -> u32 {
    let mut digits = 1u32;
    for (i, &p) in POW10_U128_TABLE.iter().enumerate().skip(1) {
        if x < p {
            break;
        }
        digits = i as u32 + 1;
    }
    digits
}

pub fn decimal_digit_count_u256(x: U256) -> u32 {
    if x.fits_u128() {
        return decimal_digit_count_u128(x.low_u128());
    }
    let table = &*POW10_U256_TABLE;
    let mut digits = 1u32;
    for (i, p) in table.iter().enumerate().skip(1) {
        if x.cmp(p) == core::cmp::Ordering::Less {
            break;
        }
        digits = i as u32 + 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow10_table_values() {
        assert_eq!(pow10_u128(0), 1);
        assert_eq!(pow10_u128(7), 10_000_000);
        assert_eq!(pow10_u256(38).low_u128(), pow10_u128(38));
        assert!(pow10_u256(68).cmp(&U256::from_u128(pow10_u128(38))) == core::cmp::Ordering::Greater);
    }

    #[test]
    fn digit_counts_boundaries() {
        assert_eq!(decimal_digit_count_u128(0), 1);
        assert_eq!(decimal_digit_count_u128(9), 1);
        assert_eq!(decimal_digit_count_u128(10), 2);
        assert_eq!(decimal_digit_count_u128(pow10_u128(33) - 1), 33);
        assert_eq!(decimal_digit_count_u128(pow10_u128(33)), 34);
        assert_eq!(decimal_digit_count_u256(pow10_u256(40)), 41);
    }
}
