// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Universal arithmetic invariants from spec.md §8.

use decimal754::{flags, Decimal64, ExceptionFlags};

fn d(s: &str) -> Decimal64 {
    s.parse().unwrap()
}

#[test]
fn additive_and_multiplicative_identity() {
    for s in ["0", "1", "-1", "3.5", "123456.789"] {
        let v = d(s);
        assert_eq!(v + d("0"), v);
        assert_eq!(v * d("1"), v);
        let diff = v - v;
        assert!(diff.is_zero());
    }
}

#[test]
fn comparison_is_total_for_non_nan_values() {
    let a = d("1");
    let b = d("2");
    assert!(a < b);
    assert!(b > a);
    assert!(a != b);
    assert_eq!(a.partial_cmp(&a), Some(core::cmp::Ordering::Equal));
}

#[test]
fn nan_is_unordered_and_unequal_to_itself() {
    let nan = Decimal64::quiet_nan();
    assert!(nan.partial_cmp(&nan).is_none());
    assert!(!(nan == nan));
    assert!(nan.is_nan());
}

#[test]
fn signbit_and_reciprocal_of_signed_zero() {
    let pos_zero = d("0");
    let neg_zero = d("-0");
    assert!(!pos_zero.signbit());
    assert!(neg_zero.signbit());
    assert_eq!(pos_zero, neg_zero);

    flags::clear();
    let one = d("1");
    let r = one / pos_zero;
    assert!(r.is_infinite() && !r.signbit());
    assert!(flags::get().contains(ExceptionFlags::DIVIDE_BY_ZERO));

    flags::clear();
    let r = one / neg_zero;
    assert!(r.is_infinite() && r.signbit());
}

#[test]
fn fma_matches_separate_multiply_add_on_exact_values() {
    let a = d("2");
    let b = d("3");
    let c = d("4");
    let separate = a * b + c;
    let fused = a.fma(&b, &c);
    assert_eq!(separate, fused);
}

#[test]
fn rem_matches_truncated_division_remainder() {
    let a = d("7");
    let b = d("2");
    let r = a % b;
    assert_eq!(r, d("1"));
}
