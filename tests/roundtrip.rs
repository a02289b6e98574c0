// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Round-trip laws from spec.md §8.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use decimal754::charconv::Options;
use decimal754::{Decimal128, Decimal32, Decimal64};

#[test]
fn decode_encode_is_identity_for_finite_values() {
    for s in ["0", "1", "-1", "3.14159", "2.5e10", "-0.000001", "123456789012345"] {
        let v: Decimal64 = s.parse().unwrap();
        let bits = v.encode_bid();
        let back = Decimal64::decode_bid(bits);
        assert_eq!(v, back, "round trip failed for {s}");
        assert_eq!(bits, back.encode_bid());
    }
}

#[test]
fn to_chars_then_from_chars_is_identity() {
    for s in ["1", "-1", "3.14159", "100", "0.001", "9999999999999999"] {
        let v: Decimal64 = s.parse().unwrap();
        let mut buf = [0u8; 64];
        let n = v.to_chars(&mut buf, Options::default()).unwrap();
        let rendered = core::str::from_utf8(&buf[..n]).unwrap();
        let back: Decimal64 = rendered.parse().unwrap();
        assert_eq!(v, back, "{s} rendered as {rendered} does not round-trip");
    }
}

#[test]
fn encode_dpd_then_decode_dpd_is_identity() {
    for s in ["1", "-1", "3.14159", "0", "-0"] {
        let v: Decimal32 = s.parse().unwrap();
        let bits = v.encode_dpd();
        let back = Decimal32::decode_dpd(bits);
        assert_eq!(v.signbit(), back.signbit());
        assert_eq!(v, back);
    }
}

#[test]
fn bid_round_trip_holds_over_random_finite_values() {
    let mut rng = SmallRng::seed_from_u64(0x5ECD_1754);
    for _ in 0..1_000 {
        let v = Decimal64::from_f64(rng.random_range(-1e12..1e12));
        let bits = v.encode_bid();
        assert_eq!(Decimal64::decode_bid(bits), v);
    }
}

#[test]
fn decimal128_preserves_more_digits_than_decimal32() {
    let wide: Decimal128 = "1.234567890123456789012345678901234".parse().unwrap();
    let narrow: Decimal32 = "1.234567890123456789012345678901234".parse().unwrap();
    assert_eq!(Decimal128::DIGITS, 34);
    assert_eq!(Decimal32::DIGITS, 7);
    assert_ne!(wide.encode_bid(), 0);
    assert_ne!(narrow.encode_bid(), 0);
}
