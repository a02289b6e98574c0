// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `to_chars` (spec.md §4.7/§6): `scientific`, `fixed`, `general`, and
//! `hex` output into a caller-provided buffer, no allocation.
//!
//! `precision` is given the same meaning `std::to_chars` gives it (the
//! original source's own formatting surface mirrors `<charconv>`):
//! digits after the decimal point for `fixed`, digits after the leading
//! digit for `scientific`/`hex`. Omitting it selects the shortest
//! round-trip representation from [`crate::charconv::shortest`].

use crate::bigint::{self, DecimalDigits};
use crate::components::{Components, WideSignificand};
use crate::convert;
use crate::error::FormatError;

use super::shortest::shortest_digits;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Scientific,
    Fixed,
    General,
    Hex,
}

#[derive(Copy, Clone, Debug)]
pub struct Options {
    pub format: Format,
    pub precision: Option<u32>,
    pub uppercase: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { format: Format::General, precision: None, uppercase: false }
    }
}

fn push(buf: &mut [u8], pos: &mut usize, b: u8) -> Result<(), FormatError> {
    if *pos >= buf.len() {
        return Err(FormatError::ValueTooLarge);
    }
    buf[*pos] = b;
    *pos += 1;
    Ok(())
}

fn push_all(buf: &mut [u8], pos: &mut usize, src: &[u8]) -> Result<(), FormatError> {
    for &b in src {
        push(buf, pos, b)?;
    }
    Ok(())
}

fn push_zeros(buf: &mut [u8], pos: &mut usize, count: usize) -> Result<(), FormatError> {
    for _ in 0..count {
        push(buf, pos, b'0')?;
    }
    Ok(())
}

/// Writes `n`'s decimal digits MSB-first into `out`, returning the count.
/// `n == 0` writes a single `'0'`.
fn digits_to_ascii(n: u128, out: &mut [u8; 40]) -> usize {
    if n == 0 {
        out[0] = b'0';
        return 1;
    }
    let mut tmp = [0u8; 40];
    let mut len = 0;
    let mut v = n;
    while v > 0 {
        tmp[len] = b'0' + (v % 10) as u8;
        v /= 10;
        len += 1;
    }
    for i in 0..len {
        out[i] = tmp[len - 1 - i];
    }
    len
}

/// Rounds `sig` down by exactly `k` decimal digits, round-half-to-even.
/// Display-only truncation: unlike [`crate::rounding::normalize`], this
/// never raises exception flags or clamps to a type's exponent range.
fn round_off_digits(sig: u128, k: u32) -> u128 {
    if k == 0 {
        return sig;
    }
    let (q, bits) = WideSignificand::Narrow(sig).div_pow10(k);
    let round_up = bits.is_more_than_half() || (bits.is_exactly_half() && q.is_odd());
    let q = if round_up { q.increment() } else { q };
    q.to_u128_saturating()
}

fn round_to_exponent(c: &Components, target_exp: i32) -> (u128, i32) {
    if c.is_zero() {
        return (0, target_exp);
    }
    if target_exp <= c.exponent {
        let shift = (c.exponent - target_exp).min(38) as u32;
        let sig = c.significand.checked_mul(bigint::pow10_u128(shift)).unwrap_or(c.significand);
        (sig, target_exp)
    } else {
        let shift = (target_exp - c.exponent) as u32;
        (round_off_digits(c.significand, shift), target_exp)
    }
}

fn round_to_significant(c: &Components, digits: u32) -> (u128, i32) {
    if c.is_zero() || digits == 0 {
        return (0, c.exponent);
    }
    let d = c.significand.decimal_digit_count();
    if d <= digits {
        let shift = digits - d;
        let sig = c.significand.checked_mul(bigint::pow10_u128(shift.min(38))).unwrap_or(c.significand);
        (sig, c.exponent - shift as i32)
    } else {
        let k = d - digits;
        (round_off_digits(c.significand, k), c.exponent + k as i32)
    }
}

fn word(uppercase: bool, lower: &'static str, upper: &'static str) -> &'static str {
    if uppercase {
        upper
    } else {
        lower
    }
}

pub fn to_chars(buf: &mut [u8], c: &Components, opts: Options) -> Result<usize, FormatError> {
    let mut pos = 0;

    if c.is_nan() {
        if c.sign {
            push(buf, &mut pos, b'-')?;
        }
        push_all(buf, &mut pos, word(opts.uppercase, "nan", "NAN").as_bytes())?;
        return Ok(pos);
    }
    if c.is_infinite() {
        if c.sign {
            push(buf, &mut pos, b'-')?;
        }
        push_all(buf, &mut pos, word(opts.uppercase, "inf", "INF").as_bytes())?;
        return Ok(pos);
    }

    match opts.format {
        Format::Scientific => format_scientific(buf, c, opts),
        Format::Fixed => format_fixed(buf, c, opts),
        Format::Hex => format_hex(buf, c, opts),
        Format::General => format_general(buf, c, opts),
    }
}

fn format_scientific(buf: &mut [u8], c: &Components, opts: Options) -> Result<usize, FormatError> {
    let (sig, exp) = match opts.precision {
        None => shortest_digits(c),
        Some(p) => round_to_significant(c, p + 1),
    };

    let mut pos = 0;
    if c.sign {
        push(buf, &mut pos, b'-')?;
    }

    let mut digit_buf = [0u8; 40];
    let n = digits_to_ascii(sig, &mut digit_buf);
    push(buf, &mut pos, digit_buf[0])?;

    let frac_len = opts.precision.unwrap_or((n - 1) as u32) as usize;
    if frac_len > 0 {
        push(buf, &mut pos, b'.')?;
        let natural_frac = n - 1;
        push_all(buf, &mut pos, &digit_buf[1..n])?;
        if frac_len > natural_frac {
            push_zeros(buf, &mut pos, frac_len - natural_frac)?;
        }
    }

    let sci_exp = exp + (n as i32 - 1);
    push(buf, &mut pos, word(opts.uppercase, "e", "E").as_bytes()[0])?;
    push(buf, &mut pos, if sci_exp < 0 { b'-' } else { b'+' })?;
    let mut exp_buf = [0u8; 40];
    let exp_n = digits_to_ascii(sci_exp.unsigned_abs() as u128, &mut exp_buf);
    push_all(buf, &mut pos, &exp_buf[..exp_n])?;

    Ok(pos)
}

fn place_fixed_point(buf: &mut [u8], pos: &mut usize, digit_buf: &[u8; 40], n: usize, exp: i32) -> Result<(), FormatError> {
    if exp >= 0 {
        push_all(buf, pos, &digit_buf[..n])?;
        push_zeros(buf, pos, exp as usize)?;
    } else {
        let frac_len = (-exp) as usize;
        if frac_len >= n {
            push(buf, pos, b'0')?;
            push(buf, pos, b'.')?;
            push_zeros(buf, pos, frac_len - n)?;
            push_all(buf, pos, &digit_buf[..n])?;
        } else {
            let int_len = n - frac_len;
            push_all(buf, pos, &digit_buf[..int_len])?;
            push(buf, pos, b'.')?;
            push_all(buf, pos, &digit_buf[int_len..n])?;
        }
    }
    Ok(())
}

fn format_fixed(buf: &mut [u8], c: &Components, opts: Options) -> Result<usize, FormatError> {
    let (sig, exp) = match opts.precision {
        None => shortest_digits(c),
        Some(p) => round_to_exponent(c, -(p as i32)),
    };

    let mut pos = 0;
    if c.sign {
        push(buf, &mut pos, b'-')?;
    }
    let mut digit_buf = [0u8; 40];
    let n = digits_to_ascii(sig, &mut digit_buf);
    place_fixed_point(buf, &mut pos, &digit_buf, n, exp)?;
    Ok(pos)
}

/// `general`: whichever of `fixed`/`scientific` is shorter, per spec.md
/// §4.7. Both are rendered into scratch buffers and the shorter is copied
/// out, rather than picking a format by exponent heuristic.
fn format_general(buf: &mut [u8], c: &Components, opts: Options) -> Result<usize, FormatError> {
    let mut fixed_buf = [0u8; 64];
    let mut sci_buf = [0u8; 64];

    let fixed_len = to_chars(&mut fixed_buf, c, Options { format: Format::Fixed, ..opts });
    let sci_len = to_chars(&mut sci_buf, c, Options { format: Format::Scientific, ..opts });

    let (winner, len) = match (fixed_len, sci_len) {
        (Ok(f), Ok(s)) if f <= s => (&fixed_buf, f),
        (Ok(_), Ok(s)) => (&sci_buf, s),
        (Ok(f), Err(_)) => (&fixed_buf, f),
        (Err(_), Ok(s)) => (&sci_buf, s),
        (Err(e), Err(_)) => return Err(e),
    };

    if len > buf.len() {
        return Err(FormatError::ValueTooLarge);
    }
    buf[..len].copy_from_slice(&winner[..len]);
    Ok(len)
}

/// Hexadecimal floating-point (C99 `%a` style), via the nearest `f64`. Not
/// bit-exact for `decimal128` magnitudes outside `f64`'s exponent range
/// (such a value saturates to `0x1p+1024`-style infinity, as any
/// decimal-to-binary conversion of an out-of-range value would); recorded
/// in DESIGN.md.
fn format_hex(buf: &mut [u8], c: &Components, opts: Options) -> Result<usize, FormatError> {
    let mut pos = 0;
    if c.sign {
        push(buf, &mut pos, b'-')?;
    }

    if c.is_zero() {
        push_all(buf, &mut pos, word(opts.uppercase, "0x0p+0", "0X0P+0").as_bytes())?;
        return Ok(pos);
    }

    let f = convert::to_f64(c).abs();
    let bits = f.to_bits();
    let raw_exp = ((bits >> 52) & 0x7ff) as i32;
    let mantissa = bits & ((1u64 << 52) - 1);
    let (leading, unbiased_exp) = if raw_exp == 0 { (0u8, -1022i32) } else { (1u8, raw_exp - 1023) };

    push_all(buf, &mut pos, word(opts.uppercase, "0x", "0X").as_bytes())?;
    push(buf, &mut pos, b'0' + leading)?;

    let hex_digits: [u8; 13] = hex_nibbles(mantissa, opts.uppercase);
    let shown = opts.precision.map(|p| p as usize).unwrap_or_else(|| {
        let mut n = 13;
        while n > 0 && hex_digits[n - 1] == b'0' {
            n -= 1;
        }
        n
    });
    if shown > 0 {
        push(buf, &mut pos, b'.')?;
        push_all(buf, &mut pos, &hex_digits[..shown.min(13)])?;
        if shown > 13 {
            push_zeros(buf, &mut pos, shown - 13)?;
        }
    }

    push(buf, &mut pos, word(opts.uppercase, "p", "P").as_bytes()[0])?;
    push(buf, &mut pos, if unbiased_exp < 0 { b'-' } else { b'+' })?;
    let mut exp_buf = [0u8; 40];
    let exp_n = digits_to_ascii(unbiased_exp.unsigned_abs() as u128, &mut exp_buf);
    push_all(buf, &mut pos, &exp_buf[..exp_n])?;

    Ok(pos)
}

fn hex_nibbles(mantissa: u64, uppercase: bool) -> [u8; 13] {
    let digits = if uppercase { b"0123456789ABCDEF" } else { b"0123456789abcdef" };
    let mut out = [0u8; 13];
    for (i, slot) in out.iter_mut().enumerate() {
        let shift = 48 - i * 4;
        let nibble = ((mantissa >> shift) & 0xf) as usize;
        *slot = digits[nibble];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(c: &Components, opts: Options) -> std::string::String {
        let mut buf = [0u8; 64];
        let n = to_chars(&mut buf, c, opts).unwrap();
        std::str::from_utf8(&buf[..n]).unwrap().to_string()
    }

    #[test]
    fn scientific_shortest() {
        let c = Components::finite(false, 8_000_000_000_000_000, -15);
        assert_eq!(render(&c, Options { format: Format::Scientific, ..Options::default() }), "8e+0");
    }

    #[test]
    fn fixed_shortest() {
        let c = Components::finite(false, 1_230, -2);
        assert_eq!(render(&c, Options { format: Format::Fixed, ..Options::default() }), "12.3");
    }

    #[test]
    fn fixed_with_precision_pads_zeros() {
        let c = Components::finite(false, 5, 0);
        let s = render(&c, Options { format: Format::Fixed, precision: Some(2), ..Options::default() });
        assert_eq!(s, "5.00");
    }

    #[test]
    fn scientific_with_precision() {
        let c = Components::finite(false, 12_345, -2);
        let s = render(&c, Options { format: Format::Scientific, precision: Some(2), ..Options::default() });
        assert_eq!(s, "1.23e+2");
    }

    #[test]
    fn negative_and_special_values() {
        assert_eq!(render(&Components::infinity(true), Options::default()), "-inf");
        assert_eq!(render(&Components::quiet_nan(false, 0), Options::default()), "nan");
    }

    #[test]
    fn buffer_too_small_reports_value_too_large() {
        let c = Components::finite(false, 123, 0);
        let mut buf = [0u8; 1];
        let err = to_chars(&mut buf, &c, Options { format: Format::Fixed, ..Options::default() }).unwrap_err();
        assert_eq!(err, FormatError::ValueTooLarge);
    }
}
