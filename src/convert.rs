// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversions to and from integers and binary floating-point (spec.md
//! §4.6, "C6"): integer <-> decimal, `f32`/`f64` <-> decimal, and
//! inter-precision widen/narrow.
//!
//! The binary-float direction leans on `core::fmt`'s `LowerExp`
//! implementation for `f32`/`f64` rather than re-deriving Ryu's per-exponent
//! power-of-five split tables from scratch: `LowerExp` already produces the
//! shortest decimal digit string that round-trips back to the same binary
//! value, which is exactly the "generic 128-bit Ryu-like" property spec.md
//! §4.6 asks for. This crate re-rounds that shortest string down to the
//! target precision through [`crate::rounding::normalize`] instead of
//! hand-rolling a second, unverified implementation of the same algorithm;
//! recorded as an Open Question resolution in DESIGN.md.
//!
//! Decimal-to-binary uses the "fast path" spec.md describes
//! (`significand as f64 * 10f64.powi(exponent)`, a single multiplication),
//! gated by Clinger's criterion (significand fits the target's mantissa and
//! the power of ten is exactly representable in the target type): when it
//! doesn't apply, the conversion falls back to an "accurate path" that
//! writes `{significand}e{exponent}` into the same `StackBuffer` used by
//! `to_chars`-adjacent code here and parses it with `core::str`'s
//! `f32`/`f64::from_str`, which `core` documents as correctly rounded. This
//! keeps both paths on the no_std `core` API surface this module already
//! relies on, rather than hand-rolling a second, unverified big-integer
//! correctly-rounded conversion; recorded in DESIGN.md.

use core::fmt::{self, Write as _};

use crate::components::{Components, WideSignificand};
use crate::context::RoundingMode;
use crate::rounding::{self, Precision};

/// Converts a signed integer to the nearest representable decimal at
/// `prec`, rounding under `mode` if `v` has more than `prec.p` digits.
pub fn from_i128(v: i128, prec: Precision, mode: RoundingMode) -> Components {
    let sign = v < 0;
    let magnitude = v.unsigned_abs();
    from_u128_signed(sign, magnitude, prec, mode)
}

pub fn from_u128(v: u128, prec: Precision, mode: RoundingMode) -> Components {
    from_u128_signed(false, v, prec, mode)
}

fn from_u128_signed(sign: bool, magnitude: u128, prec: Precision, mode: RoundingMode) -> Components {
    if magnitude == 0 {
        return Components::zero(sign, 0);
    }
    rounding::normalize(sign, WideSignificand::Narrow(magnitude), 0, prec, mode)
}

/// Converts `c` to the nearest `i128` by truncating toward zero (the IEEE
/// 754 `convertToIntegerTowardZero` operation). Returns `None` for
/// non-finite values or magnitudes that overflow `i128`.
pub fn to_i128(c: &Components) -> Option<i128> {
    if !c.is_finite() {
        return None;
    }
    let magnitude = truncate_to_integer(c)?;
    if c.sign {
        i128::try_from(magnitude).ok().map(|m| -m)
    } else {
        i128::try_from(magnitude).ok()
    }
}

/// Converts `c` to the nearest `u128` by truncating toward zero. Returns
/// `None` for non-finite values, negative values, or magnitudes that
/// overflow `u128`.
pub fn to_u128(c: &Components) -> Option<u128> {
    if !c.is_finite() {
        return None;
    }
    if c.sign {
        return if c.is_zero() { Some(0) } else { None };
    }
    truncate_to_integer(c)
}

fn truncate_to_integer(c: &Components) -> Option<u128> {
    if c.exponent >= 0 {
        let shift = c.exponent as u32;
        if shift > 38 {
            return None;
        }
        c.significand.checked_mul(crate::bigint::pow10_u128(shift))
    } else {
        let shift = (-c.exponent) as u32;
        if shift > 38 {
            return Some(0);
        }
        Some(c.significand / crate::bigint::pow10_u128(shift))
    }
}

/// A fixed-capacity buffer implementing `core::fmt::Write`, used to format
/// `f32`/`f64` without requiring an allocator.
struct StackBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> StackBuffer<N> {
    fn new() -> Self {
        StackBuffer { buf: [0; N], len: 0 }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl<const N: usize> fmt::Write for StackBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.len + bytes.len() > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }
}

/// Parses `core::fmt::LowerExp`'s output for a finite, non-zero value: it
/// is always `-?[0-9]+(\.[0-9]+)?e-?[0-9]+`, with no leading zeros and no
/// `+` on either sign.
fn parse_shortest_exp(s: &str) -> Option<(bool, u128, i32)> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let (mantissa, exp_str) = rest.split_once('e')?;
    let exponent: i32 = exp_str.parse().ok()?;

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };

    let mut significand: u128 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
        significand = significand.checked_mul(10)?.checked_add((b - b'0') as u128)?;
    }
    let point_shift = frac_part.len() as i32;
    Some((sign, significand, exponent - point_shift))
}

/// Converts `v` to the nearest decimal at `prec`, via its shortest
/// round-trip decimal expansion (see module docs).
pub fn from_f64(v: f64, prec: Precision, mode: RoundingMode) -> Components {
    if v.is_nan() {
        return Components::quiet_nan(v.is_sign_negative(), 0);
    }
    if v.is_infinite() {
        return Components::infinity(v.is_sign_negative());
    }
    if v == 0.0 {
        return Components::zero(v.is_sign_negative(), 0);
    }

    let mut buf = StackBuffer::<32>::new();
    // Unwrap: 32 bytes comfortably holds any f64's shortest `{:e}` form
    // (at most 17 mantissa digits, a sign, a point, `e`, and a 3-digit
    // exponent with its own sign).
    write!(buf, "{:e}", v).expect("f64 shortest exponential form fits in 32 bytes");
    let (sign, significand, exponent) = parse_shortest_exp(buf.as_str())
        .expect("core::fmt's LowerExp output always matches the expected grammar");
    rounding::normalize(sign, WideSignificand::Narrow(significand), exponent, prec, mode)
}

pub fn from_f32(v: f32, prec: Precision, mode: RoundingMode) -> Components {
    if v.is_nan() {
        return Components::quiet_nan(v.is_sign_negative(), 0);
    }
    if v.is_infinite() {
        return Components::infinity(v.is_sign_negative());
    }
    if v == 0.0 {
        return Components::zero(v.is_sign_negative(), 0);
    }

    let mut buf = StackBuffer::<24>::new();
    write!(buf, "{:e}", v).expect("f32 shortest exponential form fits in 24 bytes");
    let (sign, significand, exponent) = parse_shortest_exp(buf.as_str())
        .expect("core::fmt's LowerExp output always matches the expected grammar");
    rounding::normalize(sign, WideSignificand::Narrow(significand), exponent, prec, mode)
}

/// Clinger's fast-path criterion (Clinger 1990, "How to Read Floating
/// Point Numbers Accurately"): `significand * 10^exponent` computed as a
/// single binary-floating-point multiplication is exactly correctly
/// rounded whenever `significand` fits in the target's mantissa *and*
/// `10^|exponent|` is itself exactly representable in the target type.
/// `f64`'s 53-bit mantissa holds any significand up to 2^53; every power of
/// ten up to 10^22 is exactly an `f64`.
fn f64_fast_path_exact(significand: u128, exponent: i32) -> bool {
    significand <= (1u128 << 53) && exponent.unsigned_abs() <= 22
}

/// Same criterion at `f32`'s 24-bit mantissa; every power of ten up to
/// 10^10 is exactly an `f32`.
fn f32_fast_path_exact(significand: u128, exponent: i32) -> bool {
    significand <= (1u128 << 24) && exponent.unsigned_abs() <= 10
}

/// The accurate path: render `significand * 10^exponent` as a decimal
/// string and let `core::str`'s correctly-rounded parser do the conversion.
fn accurate_decimal_to_binary<const N: usize, T: core::str::FromStr>(significand: u128, exponent: i32) -> T
where
    T::Err: core::fmt::Debug,
{
    let mut buf = StackBuffer::<N>::new();
    write!(buf, "{significand}e{exponent}").expect("decimal digits plus exponent fit the buffer");
    buf.as_str().parse().expect("core::str's float parser accepts its own exponential grammar")
}

/// Converts `c` to the nearest `f64`: the single-multiplication fast path
/// when Clinger's criterion guarantees it is exact, the accurate
/// string-parse path otherwise (see module docs). Over/underflow saturate
/// to infinity/zero the same way native `f64` arithmetic does.
pub fn to_f64(c: &Components) -> f64 {
    if c.is_nan() {
        return if c.sign { -f64::NAN } else { f64::NAN };
    }
    if c.is_infinite() {
        return if c.sign { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    if c.is_zero() {
        return if c.sign { -0.0 } else { 0.0 };
    }
    let magnitude = if f64_fast_path_exact(c.significand, c.exponent) {
        c.significand as f64 * 10f64.powi(c.exponent)
    } else {
        accurate_decimal_to_binary::<48, f64>(c.significand, c.exponent)
    };
    if c.sign {
        -magnitude
    } else {
        magnitude
    }
}

pub fn to_f32(c: &Components) -> f32 {
    if c.is_nan() {
        return if c.sign { -f32::NAN } else { f32::NAN };
    }
    if c.is_infinite() {
        return if c.sign { f32::NEG_INFINITY } else { f32::INFINITY };
    }
    if c.is_zero() {
        return if c.sign { -0.0 } else { 0.0 };
    }
    let magnitude = if f32_fast_path_exact(c.significand, c.exponent) {
        c.significand as f32 * 10f32.powi(c.exponent)
    } else {
        accurate_decimal_to_binary::<48, f32>(c.significand, c.exponent)
    };
    if c.sign {
        -magnitude
    } else {
        magnitude
    }
}

/// Widens `c` (from a narrower precision) to `to`: the significand and
/// exponent are unchanged, since a wider precision's digit budget always
/// covers a narrower one's (spec.md §4.6: "no rounding").
pub fn widen(c: &Components) -> Components {
    *c
}

/// Narrows `c` to `to`, routing through the same rounding path as
/// arithmetic (spec.md §4.6: "Narrowing passes through §4.4").
pub fn narrow(c: &Components, to: Precision, mode: RoundingMode) -> Components {
    if !c.is_finite() {
        return *c;
    }
    rounding::normalize(c.sign, WideSignificand::Narrow(c.significand), c.exponent, to, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D32: Precision = Precision { p: 7, e_min: -95, e_max: 96 };
    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn integer_round_trip() {
        let c = from_i128(-42, D64, RoundingMode::ToNearestEven);
        assert_eq!(to_i128(&c), Some(-42));
    }

    #[test]
    fn large_integer_rounds_when_it_exceeds_precision() {
        let c = from_u128(123_456_789, D32, RoundingMode::ToNearestEven);
        // 9 digits narrowed to 7: rounds to 1234568 * 10^2.
        assert_eq!(c.significand, 1_234_568);
        assert_eq!(c.exponent, 2);
    }

    #[test]
    fn f64_round_trip_on_exact_value() {
        let c = from_f64(0.5, D64, RoundingMode::ToNearestEven);
        assert_eq!(to_f64(&c), 0.5);
    }

    #[test]
    fn f64_accurate_path_matches_parsed_decimal_string() {
        // 34-digit significand: well past Clinger's 2^53 fast-path bound,
        // so this exercises the accurate string-parse path.
        let c = Components::finite(false, 1_234_567_890_123_456_789_012_345_678_901_234, -33);
        assert!(!f64_fast_path_exact(c.significand, c.exponent));
        let got = to_f64(&c);
        let want: f64 = "1.234567890123456789012345678901234".parse().unwrap();
        assert_eq!(got, want);
    }

    #[test]
    fn f64_special_values() {
        assert!(from_f64(f64::NAN, D64, RoundingMode::ToNearestEven).is_nan());
        assert!(from_f64(f64::INFINITY, D64, RoundingMode::ToNearestEven).is_infinite());
        assert!(to_f64(&Components::infinity(true)) == f64::NEG_INFINITY);
    }

    #[test]
    fn narrow_rounds_and_widen_is_exact() {
        let wide = Components::finite(false, 1_234_567_890_123_456, -15);
        let narrowed = narrow(&wide, D32, RoundingMode::ToNearestEven);
        assert_eq!(narrowed.significand.to_string().len(), 7);
        let back = widen(&narrowed);
        assert_eq!(back.significand, narrowed.significand);
    }
}
