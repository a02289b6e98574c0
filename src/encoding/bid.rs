// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary Integer Decimal (BID) encode/decode: the significand's trailing
//! `p - 1` digits are stored as a plain binary integer rather than
//! Densely Packed Decimal groups.
//!
//! Grounded on spec.md §4.2's description of the combination-field case
//! split, reconstructed from the BID/DPD relationship documented in
//! `examples/original_source/include/boost/decimal/dpd_conversion.hpp`
//! (which decodes through a BID intermediate). Bit access is exclusively
//! shift-and-mask (`unsafe_code = "forbid"`), following spec.md's REDESIGN
//! FLAGS note against memory-reinterpretation punning, and the teacher's
//! own `io::bit` module, which does the same for its bitstream reader.

use crate::components::{Components, Special};
use crate::encoding::layout::Layout;

fn bit(word: u128, index: u32) -> u32 {
    ((word >> index) & 1) as u32
}

fn bits(word: u128, hi: u32, lo: u32) -> u128 {
    let width = hi - lo + 1;
    let mask = if width >= 128 { u128::MAX } else { (1u128 << width) - 1 };
    (word >> lo) & mask
}

/// Decodes a BID-encoded `width`-bit word into [`Components`].
///
/// Bit numbering is MSB-first logical order: bit `width - 1` is the sign,
/// the next 5 bits (down) are the combination field, then the exponent
/// continuation field, then the trailing significand field — independent
/// of the host's memory endianness, per spec.md's REDESIGN FLAGS.
pub fn decode(layout: &Layout, word: u128) -> Components {
    let w = layout.width;
    let sign = bit(word, w - 1) == 1;

    let comb_lo = w - 1 - layout.combination_bits;
    let comb = bits(word, w - 2, comb_lo) as u32; // 5 bits

    let g0 = (comb >> 4) & 1;
    let g1 = (comb >> 3) & 1;

    let exp_cont_hi = comb_lo - 1;
    let exp_cont_lo = exp_cont_hi + 1 - layout.exponent_cont_bits;
    let exp_cont = bits(word, exp_cont_hi, exp_cont_lo) as u32;
    let trailing = bits(word, exp_cont_lo - 1, 0);

    if g0 == 1 && g1 == 1 {
        let g2 = (comb >> 2) & 1;
        let g3 = (comb >> 1) & 1;
        if g2 == 1 && g3 == 1 {
            let g4 = comb & 1;
            if g4 == 0 {
                return Components::infinity(sign);
            }
            // NaN: the bit immediately after the combination field (the
            // top bit of what would otherwise be the exponent
            // continuation) distinguishes signaling from quiet; the rest
            // is payload.
            let signaling_bit = bit(word, exp_cont_hi);
            let payload_bits = exp_cont_hi; // bits [exp_cont_hi-1 .. 0]
            let payload = bits(word, payload_bits - 1, 0);
            return if signaling_bit == 1 {
                Components::signaling_nan(sign, payload)
            } else {
                Components::quiet_nan(sign, payload)
            };
        }

        // Long form: leading digit is 8 or 9 (MSB forced to `100`).
        let leading_digit: u128 = 8 + (comb & 1) as u128;
        let exp_msbs = (g2 << 1) | g3;
        let biased = ((exp_msbs as i32) << layout.exponent_cont_bits) | exp_cont as i32;
        let exponent = biased - layout.bias;
        let significand = leading_digit * crate::bigint::pow10_u128(layout.p - 1) + trailing;
        Components::finite(sign, significand, exponent)
    } else {
        // Short form: leading digit is 0-7, taken directly from the low 3
        // bits of the combination field.
        let leading_digit = (comb & 0b111) as u128;
        let exp_msbs = (g0 << 1) | g1;
        let biased = ((exp_msbs as i32) << layout.exponent_cont_bits) | exp_cont as i32;
        let exponent = biased - layout.bias;
        let significand = leading_digit * crate::bigint::pow10_u128(layout.p - 1) + trailing;
        Components::finite(sign, significand, exponent)
    }
}

/// Encodes [`Components`] into a BID `width`-bit word, choosing the short
/// or long combination-field form based on whether the leading digit is
/// `>= 8`.
pub fn encode(layout: &Layout, value: &Components) -> u128 {
    let w = layout.width;
    let sign_bit: u128 = if value.sign { 1 } else { 0 };

    match value.special {
        Some(Special::Infinity) => {
            let comb: u128 = 0b11110;
            return (sign_bit << (w - 1)) | (comb << (w - 1 - layout.combination_bits));
        }
        Some(Special::QuietNan(payload)) | Some(Special::SignalingNan(payload)) => {
            let comb: u128 = 0b11111;
            let signaling = matches!(value.special, Some(Special::SignalingNan(_)));
            let comb_lo = w - 1 - layout.combination_bits;
            let mut word = (sign_bit << (w - 1)) | (comb << comb_lo);
            word |= (signaling as u128) << (comb_lo - 1);
            let payload_max = crate::bigint::pow10_u128(layout.p - 1) - 1;
            word |= payload.min(payload_max);
            return word;
        }
        None => {}
    }

    let biased = (value.exponent + layout.bias).max(0) as u128;
    let sig = value.significand;
    let low_mod = crate::bigint::pow10_u128(layout.p - 1);
    let leading_digit = sig / low_mod;
    let trailing = sig % low_mod;

    let comb_lo = w - 1 - layout.combination_bits;
    let exp_cont_hi = comb_lo - 1;
    let exp_cont_lo = exp_cont_hi + 1 - layout.exponent_cont_bits;

    let exp_msbs = (biased >> layout.exponent_cont_bits) & 0b11;
    let exp_cont = biased & ((1u128 << layout.exponent_cont_bits) - 1);

    let comb: u128 = if leading_digit >= 8 {
        0b11000 | (exp_msbs << 1) | (leading_digit - 8)
    } else {
        (exp_msbs << 3) | leading_digit
    };

    (sign_bit << (w - 1))
        | (comb << comb_lo)
        | (exp_cont << exp_cont_lo)
        | trailing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::layout::D32;

    #[test]
    fn round_trips_finite_values() {
        for (sig, exp) in [(0u128, 0i32), (1, 0), (9_999_999, 90), (1_000_000, -50), (7, -95)] {
            let c = Components::finite(false, sig, exp);
            let bits = encode(&D32, &c);
            let back = decode(&D32, bits);
            assert_eq!(back.significand, sig);
            assert_eq!(back.exponent, exp);
            assert!(back.is_finite());
        }
    }

    #[test]
    fn round_trips_infinity_and_nan() {
        let inf = Components::infinity(true);
        assert!(decode(&D32, encode(&D32, &inf)).is_infinite());

        let nan = Components::quiet_nan(false, 42);
        let back = decode(&D32, encode(&D32, &nan));
        assert!(back.is_nan() && !back.is_signaling_nan());
        assert_eq!(back.nan_payload(), Some(42));

        let snan = Components::signaling_nan(false, 7);
        let back = decode(&D32, encode(&D32, &snan));
        assert!(back.is_signaling_nan());
    }

    #[test]
    fn spec_bid_spot_check() {
        // spec.md §8 scenario 3: decimal32(9_999_999, 90): sign=0,
        // combination leading digit 9 (long form), biased exponent
        // 101 + 90 = 191, trailing significand = 999999.
        let c = Components::finite(false, 9_999_999, 90);
        let bits = encode(&D32, &c);
        assert_eq!(bit(bits, 31), 0);
        let comb = super::bits(bits, 30, 26) as u32;
        assert_eq!(comb & 0b11000, 0b11000);
        let back = decode(&D32, bits);
        assert_eq!(back.significand, 9_999_999);
        assert_eq!(back.exponent, 90);
    }
}
