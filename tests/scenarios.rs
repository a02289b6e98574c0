// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end scenarios from spec.md §8.

use decimal754::encoding::dpd;
use decimal754::{flags, Decimal32, Decimal64, ExceptionFlags};

#[test]
fn cohort_equality() {
    // decimal64(4,0) + decimal64(40,-1) == decimal64(8,0): same value
    // (4 and 4.0) summed to a canonical 8.
    let a: Decimal64 = "4".parse().unwrap();
    let b: Decimal64 = "40e-1".parse().unwrap();
    assert_eq!(a + b, "8".parse::<Decimal64>().unwrap());
}

#[test]
fn signed_zero_subtraction() {
    let one: Decimal32 = "1".parse().unwrap();
    let diff = one - one;
    assert_eq!(diff, "0".parse::<Decimal32>().unwrap());
    assert!(!diff.signbit());
}

#[test]
fn bid_round_trip_at_the_top_of_the_significand_range() {
    // decimal32(9_999_999, 90): exactly 7 digits, well within [e_min,
    // e_max], so from_chars should not need to round it at all.
    let v: Decimal32 = "9999999e90".parse().unwrap();
    let bits = v.encode_bid();
    let back = Decimal32::decode_bid(bits);
    assert_eq!(v, back);
    assert!(back.is_finite() && !back.is_zero());
}

#[test]
fn dpd_declet_table_3_4_entry() {
    // The three-digit group (7, 5, 0) packs to the 10-bit pattern
    // 1111010000 per IEEE 754-2008 Table 3.4.
    let packed = dpd::encode_declet(7, 5, 0);
    assert_eq!(packed, 0b1111010000);
    assert_eq!(dpd::decode_declet(packed), (7, 5, 0));
}

#[test]
fn overflow_to_infinity() {
    flags::clear();
    let r = Decimal32::max() * "10".parse::<Decimal32>().unwrap();
    assert!(r.is_infinite() && !r.signbit());
    assert!(flags::get().contains(ExceptionFlags::OVERFLOW));
    assert!(flags::get().contains(ExceptionFlags::INEXACT));
}
