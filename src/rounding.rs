// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `rounding` module implements spec.md §4.4: reducing a significand
//! with more than `p` digits down to `p` digits under the active rounding
//! mode, and the normalize/overflow/underflow bookkeeping that wraps it.
//!
//! Grounded on the shape of `symphonia-core/src/conv.rs`'s `dither` module
//! (reduce precision under a policy before narrowing a sample), adapted
//! from audio dithering to decimal rounding, and on
//! `examples/original_source`'s guard-digit/sticky-bit convention for
//! round-to-nearest. The overflow path's `log::debug!` trace follows
//! `formats/probe.rs`'s habit of logging a rare, caller-invisible
//! condition rather than silently absorbing it.

use crate::components::{Components, RoundBits, WideSignificand};
use crate::context::RoundingMode;
use crate::flags::{self, ExceptionFlags};

/// A target precision's shape, as needed by normalize/round. The six
/// public types (`src/types.rs`) each supply their own constants from
/// `encoding::layout`.
#[derive(Copy, Clone, Debug)]
pub struct Precision {
    pub p: u32,
    pub e_min: i32,
    pub e_max: i32,
}

/// Applies the rounding-mode decision to a quotient `q` given the digits
/// discarded below it. Returns whether `q` should be incremented.
fn should_round_up(mode: RoundingMode, sign: bool, q_is_odd: bool, bits: RoundBits) -> bool {
    match mode {
        RoundingMode::ToNearestEven => {
            bits.is_more_than_half() || (bits.is_exactly_half() && q_is_odd)
        }
        RoundingMode::ToNearestAway => bits.first_discarded >= 5,
        RoundingMode::TowardZero => false,
        RoundingMode::TowardPositive => bits.is_nonzero() && !sign,
        RoundingMode::TowardNegative => bits.is_nonzero() && sign,
    }
}

/// Reduces `raw` by exactly `k` decimal digits under `mode`, returning the
/// rounded quotient and whether any nonzero digit was discarded (for the
/// `inexact` flag).
fn round_off(
    raw: WideSignificand,
    k: u32,
    mode: RoundingMode,
    sign: bool,
) -> (WideSignificand, bool) {
    if k == 0 {
        return (raw, false);
    }
    let (q, bits) = raw.div_pow10(k);
    let inexact = bits.is_nonzero();
    let round_up = should_round_up(mode, sign, q.is_odd(), bits);
    let q = if round_up { q.increment() } else { q };
    (q, inexact)
}

/// Rounds `raw * 10^exponent` (with the given `sign`) down to `prec.p`
/// significant digits, handling overflow to infinity and underflow to a
/// subnormal or zero, and returns the resulting [`Components`].
///
/// This is the single entry point every arithmetic operation funnels its
/// raw (possibly overlong) result through before returning to the caller.
pub fn normalize(sign: bool, raw: WideSignificand, exponent: i32, prec: Precision, mode: RoundingMode) -> Components {
    if raw.is_zero() {
        let clamped_exp = exponent.clamp(prec.e_min - (prec.p as i32 - 1), prec.e_max);
        return Components::zero(sign, clamped_exp);
    }

    let mut sig = raw;
    let mut exp = exponent;
    let mut inexact = false;

    let d = sig.digit_count();
    if d > prec.p {
        let k = d - prec.p;
        let (rounded, was_inexact) = round_off(sig, k, mode, sign);
        inexact |= was_inexact;
        exp += k as i32;
        sig = rounded;

        // Rounding up e.g. 999 -> 1000 can push the digit count back over
        // `p`; shed exactly one more digit (the remainder of that extra
        // division is always zero, since the carry only ever adds a
        // single leading `1`).
        if sig.digit_count() > prec.p {
            let (rounded, _) = sig.div_pow10(1);
            sig = rounded;
            exp += 1;
        }
    }

    if exp > prec.e_max {
        log::debug!("normalize: exponent {exp} exceeds e_max {}, rounding to infinity", prec.e_max);
        flags::raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
        return Components::infinity(sign);
    }

    if exp < prec.e_min {
        let shift = (prec.e_min - exp) as u32;
        let (rounded, was_inexact) = round_off(sig, shift, mode, sign);
        inexact |= was_inexact;
        sig = rounded;
        exp = prec.e_min;

        if sig.digit_count() > prec.p {
            let (rounded, _) = sig.div_pow10(1);
            sig = rounded;
            exp += 1;
        }

        if sig.is_zero() {
            if inexact {
                flags::raise(ExceptionFlags::UNDERFLOW | ExceptionFlags::INEXACT);
            }
            return Components::zero(sign, exp);
        }
        if sig.digit_count() < prec.p {
            flags::raise(ExceptionFlags::UNDERFLOW);
            if inexact {
                flags::raise(ExceptionFlags::INEXACT);
            }
        }
    } else if sig.digit_count() < prec.p {
        // Canonicalize: shift the significand up while exponent headroom
        // allows it, matching spec.md §3 invariant 4's "no trailing zeros
        // unless required" canonical fast-form.
        let shift_up = (prec.p - sig.digit_count()).min((exp - prec.e_min).max(0) as u32);
        if shift_up > 0 {
            sig = sig.mul_pow10(shift_up);
            exp -= shift_up as i32;
        }
    }

    if inexact {
        flags::raise(ExceptionFlags::INEXACT);
    }

    Components::finite(sign, sig.to_u128_saturating(), exp)
}

/// Normalizes a value already known to be exactly representable (no
/// rounding can occur, e.g. `log10` of an exact power of ten). Used where
/// spec.md requires the result be produced "exactly, no rounding, no
/// inexact flag" (§8 scenario 6).
pub fn normalize_exact(sign: bool, significand: u128, exponent: i32, prec: Precision) -> Components {
    let saved = flags::get();
    let result = normalize(sign, WideSignificand::Narrow(significand), exponent, prec, RoundingMode::ToNearestEven);
    debug_assert!(
        flags::get() & ExceptionFlags::INEXACT == saved & ExceptionFlags::INEXACT,
        "normalize_exact caller asserted an exact value but rounding occurred"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn truncates_and_sets_inexact_on_overlong_significand() {
        flags::clear();
        let c = normalize(false, WideSignificand::Narrow(12_345_678_901_234_567), 0, D64, RoundingMode::ToNearestEven);
        assert_eq!(c.significand, 1_234_567_890_123_457);
        assert_eq!(c.exponent, 1);
        assert!(flags::get().contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn ties_round_to_even() {
        flags::clear();
        // 1234567890123450 has 16 digits already == p, no rounding needed.
        // Force a tie by rounding 16 digits down to 15: ...45 with the
        // discarded digit exactly 5 and the kept digit odd -> rounds up.
        let c = normalize(false, WideSignificand::Narrow(45), -2, Precision { p: 1, e_min: -10, e_max: 10 }, RoundingMode::ToNearestEven);
        // 45 with p=1: d=2 > p=1, k=1, discard '5' exactly, quotient 4 is
        // even -> stays 4.
        assert_eq!(c.significand, 4);
        assert_eq!(c.exponent, -1);
    }

    #[test]
    fn overflow_produces_infinity() {
        flags::clear();
        let c = normalize(false, WideSignificand::Narrow(9_999_999_999_999_999), 400, D64, RoundingMode::ToNearestEven);
        assert!(c.is_infinite());
        assert!(flags::get().contains(ExceptionFlags::OVERFLOW));
    }

    #[test]
    fn underflow_to_subnormal_then_zero() {
        flags::clear();
        let c = normalize(false, WideSignificand::Narrow(5), -400, D64, RoundingMode::ToNearestEven);
        assert!(c.is_zero() || c.significand < crate::bigint::pow10_u128(15));
    }

    #[test]
    fn canonicalizes_trailing_zero_significand_up_when_headroom_allows() {
        flags::clear();
        let c = normalize(false, WideSignificand::Narrow(5), 0, D64, RoundingMode::ToNearestEven);
        assert_eq!(c.significand, 5_000_000_000_000_000);
        assert_eq!(c.exponent, -15);
    }
}
