// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `from_chars` (spec.md §4.7/§6): the decimal/hex/inf/nan grammar, parsed
//! byte-at-a-time with no allocation.

use crate::components::{Components, WideSignificand};
use crate::context::RoundingMode;
use crate::convert;
use crate::error::ParseStatus;
use crate::flags;
use crate::rounding::{self, Precision};

/// The result of a [`from_chars`] call: the decoded value, the number of
/// input bytes consumed, and the outcome status. Mirrors the C++
/// `from_chars` convention of returning a pointer-past-last-consumed plus a
/// status, spelled out as a named struct rather than a tuple.
#[derive(Copy, Clone, Debug)]
pub struct ParseOutcome {
    pub value: Components,
    pub consumed: usize,
    pub status: ParseStatus,
}

/// Digits beyond this count no longer change the rounded result at any
/// supported precision (decimal128's guard band tops out well under this);
/// further digits are tracked only as a sticky/inexact signal.
const MAX_SIGNIFICANT_DIGITS: u32 = 40;

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek().map(|c| c.eq_ignore_ascii_case(&b)).unwrap_or(false) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `word` case-insensitively; rewinds on mismatch.
    fn eat_word(&mut self, word: &[u8]) -> bool {
        let start = self.pos;
        for &w in word {
            if !self.eat(w) {
                self.pos = start;
                return false;
            }
        }
        true
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

fn is_ascii_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_payload_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Parses a `number` per spec.md §6's grammar and rounds it to `prec` under
/// `mode`.
pub fn from_chars(input: &[u8], prec: Precision, mode: RoundingMode) -> ParseOutcome {
    let mut cur = Cursor::new(input);

    let sign = match cur.peek() {
        Some(b'+') => {
            cur.bump();
            false
        }
        Some(b'-') => {
            cur.bump();
            true
        }
        _ => false,
    };

    if cur.eat_word(b"infinity") || cur.eat_word(b"inf") {
        return ParseOutcome { value: Components::infinity(sign), consumed: cur.pos, status: ParseStatus::Success };
    }

    if cur.eat_word(b"nan") {
        let mut payload: u128 = 0;
        if cur.peek() == Some(b'(') {
            let paren_start = cur.pos;
            cur.bump();
            let payload_start = cur.pos;
            while cur.peek().map(is_payload_char).unwrap_or(false) {
                cur.bump();
            }
            if cur.peek() == Some(b')') && cur.pos > payload_start {
                for &b in &cur.bytes[payload_start..cur.pos] {
                    if b.is_ascii_digit() {
                        payload = payload.saturating_mul(10).saturating_add((b - b'0') as u128);
                    } else {
                        payload = 0;
                        break;
                    }
                }
                cur.bump(); // ')'
            } else {
                cur.pos = paren_start;
            }
        }
        return ParseOutcome {
            value: Components::quiet_nan(sign, payload),
            consumed: cur.pos,
            status: ParseStatus::Success,
        };
    }

    if cur.rest().first().map(|b| b.eq_ignore_ascii_case(&b'0')).unwrap_or(false)
        && cur.rest().get(1).map(|b| b.eq_ignore_ascii_case(&b'x')).unwrap_or(false)
    {
        return parse_hex(&mut cur, sign, prec, mode);
    }

    parse_decimal(&mut cur, sign, prec, mode)
}

fn parse_decimal(cur: &mut Cursor<'_>, sign: bool, prec: Precision, mode: RoundingMode) -> ParseOutcome {
    let digits_start = cur.pos;

    let mut acc = WideSignificand::Narrow(0);
    let mut digit_count = 0u32;
    let mut point_seen = false;
    // Digits consumed before the point but dropped once the accumulator
    // window filled: each still represents a higher power of ten, so it
    // shifts the exponent up exactly as if it had been kept and then
    // rounded away.
    let mut int_digits_dropped = 0i32;
    let mut frac_digits_kept = 0i32;
    let mut any_nonzero_discarded = false;
    let mut saw_any_digit = false;

    loop {
        match cur.peek() {
            Some(b) if is_ascii_digit(b) => {
                cur.bump();
                saw_any_digit = true;
                if digit_count < MAX_SIGNIFICANT_DIGITS {
                    acc = acc.mul_pow10(1).add(&WideSignificand::Narrow((b - b'0') as u128));
                    digit_count += 1;
                    if point_seen {
                        frac_digits_kept += 1;
                    }
                } else {
                    if b != b'0' {
                        any_nonzero_discarded = true;
                    }
                    if !point_seen {
                        int_digits_dropped += 1;
                    }
                }
            }
            Some(b'.') if !point_seen => {
                cur.bump();
                point_seen = true;
            }
            _ => break,
        }
    }

    if !saw_any_digit {
        cur.pos = digits_start;
        return ParseOutcome {
            value: Components::quiet_nan(sign, 0),
            consumed: cur.pos,
            status: ParseStatus::InvalidArgument,
        };
    }

    let mut exponent = int_digits_dropped - frac_digits_kept;
    if matches!(cur.peek(), Some(b'e') | Some(b'E')) {
        let exp_start = cur.pos;
        cur.bump();
        let exp_sign = match cur.peek() {
            Some(b'+') => {
                cur.bump();
                1i64
            }
            Some(b'-') => {
                cur.bump();
                -1i64
            }
            _ => 1i64,
        };
        let mut exp_digits = 0u32;
        let mut exp_value: i64 = 0;
        while let Some(b) = cur.peek() {
            if !is_ascii_digit(b) {
                break;
            }
            cur.bump();
            exp_value = (exp_value.saturating_mul(10)).saturating_add((b - b'0') as i64);
            exp_value = exp_value.min(1_000_000);
            exp_digits += 1;
        }
        if exp_digits == 0 {
            cur.pos = exp_start; // no digits after 'e': exponent not part of the match.
        } else {
            exponent = (exponent as i64).saturating_add(exp_sign * exp_value).clamp(-1_000_000, 1_000_000) as i32;
        }
    }

    if any_nonzero_discarded {
        acc = acc.add(&WideSignificand::Narrow(1));
    }

    let saved = flags::get();
    let value = rounding::normalize(sign, acc, exponent, prec, mode);
    let newly_raised = flags::get() & !saved;
    let status = if newly_raised.contains(flags::ExceptionFlags::OVERFLOW)
        || newly_raised.contains(flags::ExceptionFlags::UNDERFLOW)
    {
        ParseStatus::ResultOutOfRange
    } else {
        ParseStatus::Success
    };

    ParseOutcome { value, consumed: cur.pos, status }
}

fn parse_hex(cur: &mut Cursor<'_>, sign: bool, prec: Precision, mode: RoundingMode) -> ParseOutcome {
    let start = cur.pos;
    cur.bump(); // '0'
    cur.bump(); // 'x'/'X'

    let mut mantissa: u128 = 0;
    let mut point_seen = false;
    let mut frac_hex_digits = 0i32;
    let mut saw_any_digit = false;

    loop {
        match cur.peek() {
            Some(b) if b.is_ascii_hexdigit() => {
                cur.bump();
                saw_any_digit = true;
                let v = (b as char).to_digit(16).unwrap_or(0) as u128;
                mantissa = mantissa.saturating_mul(16).saturating_add(v);
                if point_seen {
                    frac_hex_digits += 1;
                }
            }
            Some(b'.') if !point_seen => {
                cur.bump();
                point_seen = true;
            }
            _ => break,
        }
    }

    if !saw_any_digit {
        cur.pos = start;
        return ParseOutcome {
            value: Components::quiet_nan(sign, 0),
            consumed: cur.pos,
            status: ParseStatus::InvalidArgument,
        };
    }

    let mut bin_exp: i32 = -4 * frac_hex_digits;
    if matches!(cur.peek(), Some(b'p') | Some(b'P')) {
        let p_start = cur.pos;
        cur.bump();
        let exp_sign = match cur.peek() {
            Some(b'+') => {
                cur.bump();
                1i32
            }
            Some(b'-') => {
                cur.bump();
                -1i32
            }
            _ => 1i32,
        };
        let mut exp_digits = 0u32;
        let mut exp_value: i32 = 0;
        while let Some(b) = cur.peek() {
            if !is_ascii_digit(b) {
                break;
            }
            cur.bump();
            exp_value = exp_value.saturating_mul(10).saturating_add((b - b'0') as i32);
            exp_digits += 1;
        }
        if exp_digits == 0 {
            cur.pos = p_start;
        } else {
            bin_exp = bin_exp.saturating_add(exp_sign * exp_value);
        }
    }

    let magnitude = mantissa as f64 * 2f64.powi(bin_exp.clamp(-1074, 1023));
    let signed = if sign { -magnitude } else { magnitude };
    let value = convert::from_f64(signed, prec, mode);
    ParseOutcome { value, consumed: cur.pos, status: ParseStatus::Success }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn parses_simple_decimal() {
        let r = from_chars(b"123.45", D64, RoundingMode::ToNearestEven);
        assert_eq!(r.status, ParseStatus::Success);
        assert_eq!(r.consumed, 6);
        // 123.45 has 5 significant digits, canonicalized up to 16.
        assert_eq!(r.value.significand, 12345 * 10u128.pow(11));
        assert_eq!(r.value.exponent, -13);
    }

    #[test]
    fn parses_exponent_and_sign() {
        let r = from_chars(b"-2.5e10", D64, RoundingMode::ToNearestEven);
        assert!(r.value.sign);
        assert_eq!(r.status, ParseStatus::Success);
    }

    #[test]
    fn parses_infinity_and_nan() {
        let r = from_chars(b"inf", D64, RoundingMode::ToNearestEven);
        assert!(r.value.is_infinite());
        let r = from_chars(b"-Infinity", D64, RoundingMode::ToNearestEven);
        assert!(r.value.is_infinite() && r.value.sign);
        let r = from_chars(b"nan(7)", D64, RoundingMode::ToNearestEven);
        assert!(r.value.is_nan());
        assert_eq!(r.value.nan_payload(), Some(7));
    }

    #[test]
    fn invalid_argument_on_no_digits() {
        let r = from_chars(b"abc", D64, RoundingMode::ToNearestEven);
        assert_eq!(r.status, ParseStatus::InvalidArgument);
        assert_eq!(r.consumed, 0);
    }

    #[test]
    fn trailing_garbage_is_not_consumed() {
        let r = from_chars(b"42xyz", D64, RoundingMode::ToNearestEven);
        assert_eq!(r.status, ParseStatus::Success);
        assert_eq!(r.consumed, 2);
    }
}
