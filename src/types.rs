// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The six public concrete types (spec.md §4/"C9"): `Decimal32`,
//! `Decimal64`, `Decimal128` store their IEEE BID interchange bit pattern
//! directly (so `encode_bid`/`decode_bid` are free), while `Decimal32Fast`,
//! `Decimal64Fast`, `Decimal128Fast` store an already-decoded
//! [`Components`] (so arithmetic skips the encode/decode round trip on
//! every operation, at the cost of `encode_bid` needing to pack it first).
//!
//! The three packed types and the three fast types are otherwise identical
//! in behavior; [`decimal_type!`] generates both shapes from one
//! definition rather than hand-duplicating six near-identical
//! implementations, grounded on the teacher's `conv.rs`, which generates
//! its per-sample-format conversion impls the same way.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use core::str::FromStr;

use crate::components::Components;
use crate::context::{self, RoundingMode};
use crate::convert;
use crate::encoding::{self, Layout};
use crate::error::{FormatError, ParseError};
use crate::flags::ExceptionFlags;
use crate::math;
use crate::ops::{self, DecimalOrdering};
use crate::rounding::Precision;
use crate::{charconv, flags};

fn mode() -> RoundingMode {
    context::rounding_mode()
}

/// Numeric-limit constants every concrete type publishes (spec.md §6).
/// Built once from a [`Layout`] rather than hand-written per type.
const fn digits_of(layout: &Layout) -> u32 {
    layout.p
}

const fn min_normal(layout: &Layout) -> Components {
    Components::finite(false, crate::bigint::pow10_u128_const(layout.p - 1), layout.e_min)
}

const fn max_finite(layout: &Layout) -> Components {
    Components::finite(false, layout.max_significand(), layout.e_max)
}

const fn epsilon_of(layout: &Layout) -> Components {
    Components::finite(false, 1, 1 - layout.p as i32)
}

const fn denorm_min_of(layout: &Layout) -> Components {
    Components::finite(false, 1, layout.e_min - (layout.p as i32 - 1))
}

macro_rules! decimal_common {
    ($name:ident, $layout:expr) => {
        impl $name {
            const LAYOUT: Layout = $layout;

            /// Number of significant decimal digits (spec.md §6 `digits`).
            pub const DIGITS: u32 = digits_of(&Self::LAYOUT);

            fn precision() -> Precision {
                Self::LAYOUT.precision()
            }

            /// Smallest positive normal value.
            pub fn min() -> Self {
                Self::from_components(min_normal(&Self::LAYOUT))
            }

            /// Largest finite value.
            pub fn max() -> Self {
                Self::from_components(max_finite(&Self::LAYOUT))
            }

            /// The difference between 1 and the next representable value
            /// greater than 1 (`10^(1-p)`).
            pub fn epsilon() -> Self {
                Self::from_components(epsilon_of(&Self::LAYOUT))
            }

            /// Smallest positive subnormal value.
            pub fn denorm_min() -> Self {
                Self::from_components(denorm_min_of(&Self::LAYOUT))
            }

            pub fn infinity() -> Self {
                Self::from_components(Components::infinity(false))
            }

            pub fn neg_infinity() -> Self {
                Self::from_components(Components::infinity(true))
            }

            pub fn quiet_nan() -> Self {
                Self::from_components(Components::quiet_nan(false, 0))
            }

            pub fn signaling_nan() -> Self {
                Self::from_components(Components::signaling_nan(false, 0))
            }

            pub fn min_exponent() -> i32 {
                Self::LAYOUT.e_min
            }

            pub fn max_exponent() -> i32 {
                Self::LAYOUT.e_max
            }

            pub fn zero() -> Self {
                Self::from_components(Components::zero(false, 0))
            }

            pub fn is_nan(&self) -> bool {
                self.to_components().is_nan()
            }

            pub fn is_infinite(&self) -> bool {
                self.to_components().is_infinite()
            }

            pub fn is_finite(&self) -> bool {
                self.to_components().is_finite()
            }

            pub fn is_zero(&self) -> bool {
                self.to_components().is_zero()
            }

            pub fn signbit(&self) -> bool {
                self.to_components().sign
            }

            pub fn from_i64(v: i64) -> Self {
                Self::from_components(convert::from_i128(v as i128, Self::precision(), mode()))
            }

            pub fn from_u64(v: u64) -> Self {
                Self::from_components(convert::from_u128(v as u128, Self::precision(), mode()))
            }

            pub fn to_i64(&self) -> Option<i64> {
                convert::to_i128(&self.to_components()).and_then(|v| i64::try_from(v).ok())
            }

            pub fn to_u64(&self) -> Option<u64> {
                convert::to_u128(&self.to_components()).and_then(|v| u64::try_from(v).ok())
            }

            pub fn from_f64(v: f64) -> Self {
                Self::from_components(convert::from_f64(v, Self::precision(), mode()))
            }

            pub fn to_f64(&self) -> f64 {
                convert::to_f64(&self.to_components())
            }

            pub fn from_chars(input: &[u8]) -> Result<Self, ParseError> {
                let outcome = charconv::from_chars(input, Self::precision(), mode());
                match outcome.status {
                    crate::error::ParseStatus::InvalidArgument => {
                        Err(ParseError { status: outcome.status, consumed: outcome.consumed })
                    }
                    _ => Ok(Self::from_components(outcome.value)),
                }
            }

            pub fn to_chars(&self, buf: &mut [u8], opts: charconv::Options) -> Result<usize, FormatError> {
                charconv::to_chars(buf, &self.to_components(), opts)
            }

            pub fn fma(&self, b: &Self, c: &Self) -> Self {
                Self::from_components(ops::fma(&self.to_components(), &b.to_components(), &c.to_components(), Self::precision(), mode()))
            }

            pub fn sqrt(&self) -> Self {
                Self::from_components(math::root::sqrt(&self.to_components(), Self::precision(), mode()))
            }

            pub fn cbrt(&self) -> Self {
                Self::from_components(math::root::cbrt(&self.to_components(), Self::precision(), mode()))
            }

            pub fn exp(&self) -> Self {
                Self::from_components(math::exp::exp(&self.to_components(), Self::precision(), mode()))
            }

            pub fn ln(&self) -> Self {
                Self::from_components(math::log::log(&self.to_components(), Self::precision(), mode()))
            }

            pub fn log10(&self) -> Self {
                Self::from_components(math::log::log10(&self.to_components(), Self::precision(), mode()))
            }

            pub fn powd(&self, y: &Self) -> Self {
                Self::from_components(math::pow::pow(&self.to_components(), &y.to_components(), Self::precision(), mode()))
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self::from_components(ops::add(&self.to_components(), &rhs.to_components(), Self::precision(), mode()))
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self::from_components(ops::sub(&self.to_components(), &rhs.to_components(), Self::precision(), mode()))
            }
        }

        impl Mul for $name {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self::from_components(ops::mul(&self.to_components(), &rhs.to_components(), Self::precision(), mode()))
            }
        }

        impl Div for $name {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                Self::from_components(ops::div(&self.to_components(), &rhs.to_components(), Self::precision(), mode()))
            }
        }

        impl Rem for $name {
            type Output = Self;
            fn rem(self, rhs: Self) -> Self {
                Self::from_components(ops::rem(&self.to_components(), &rhs.to_components(), Self::precision(), mode()))
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                let c = self.to_components();
                Self::from_components(Components { sign: !c.sign, ..c })
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ops::equal(&self.to_components(), &other.to_components())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                match ops::compare(&self.to_components(), &other.to_components()) {
                    DecimalOrdering::Less => Some(Ordering::Less),
                    DecimalOrdering::Equal => Some(Ordering::Equal),
                    DecimalOrdering::Greater => Some(Ordering::Greater),
                    DecimalOrdering::Unordered => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut buf = [0u8; 48];
                match charconv::to_chars(&mut buf, &self.to_components(), charconv::Options::default()) {
                    Ok(n) => f.write_str(core::str::from_utf8(&buf[..n]).unwrap_or("?")),
                    Err(_) => f.write_str("?"),
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseError;
            fn from_str(s: &str) -> Result<Self, ParseError> {
                Self::from_chars(s.as_bytes())
            }
        }
    };
}

/// `Decimal32`/`Decimal64`/`Decimal128`: stores the IEEE BID interchange
/// bit pattern directly.
macro_rules! packed_decimal {
    ($name:ident, $word:ty, $layout:expr) => {
        #[derive(Copy, Clone, Debug)]
        pub struct $name($word);

        impl $name {
            /// The raw BID interchange bit pattern.
            pub fn encode_bid(&self) -> $word {
                self.0
            }

            pub fn decode_bid(bits: $word) -> Self {
                $name(bits)
            }

            /// The DPD interchange bit pattern (spec.md §4.2).
            pub fn encode_dpd(&self) -> $word {
                encoding::encode(&Self::LAYOUT, encoding::Encoding::Dpd, &self.to_components()) as $word
            }

            pub fn decode_dpd(bits: $word) -> Self {
                Self::from_components(encoding::decode(&Self::LAYOUT, encoding::Encoding::Dpd, bits as u128))
            }

            fn to_components(&self) -> Components {
                encoding::decode(&Self::LAYOUT, encoding::Encoding::Bid, self.0 as u128)
            }

            fn from_components(c: Components) -> Self {
                $name(encoding::encode(&Self::LAYOUT, encoding::Encoding::Bid, &c) as $word)
            }
        }

        decimal_common!($name, $layout);
    };
}

/// `Decimal32Fast`/`Decimal64Fast`/`Decimal128Fast`: stores the decoded
/// [`Components`] directly, trading `encode_bid`'s free-ness for
/// arithmetic that skips the encode/decode round trip.
macro_rules! fast_decimal {
    ($name:ident, $word:ty, $layout:expr) => {
        #[derive(Copy, Clone, Debug)]
        pub struct $name(Components);

        impl $name {
            pub fn encode_bid(&self) -> $word {
                encoding::encode(&Self::LAYOUT, encoding::Encoding::Bid, &self.0) as $word
            }

            pub fn decode_bid(bits: $word) -> Self {
                Self::from_components(encoding::decode(&Self::LAYOUT, encoding::Encoding::Bid, bits as u128))
            }

            pub fn encode_dpd(&self) -> $word {
                encoding::encode(&Self::LAYOUT, encoding::Encoding::Dpd, &self.0) as $word
            }

            pub fn decode_dpd(bits: $word) -> Self {
                Self::from_components(encoding::decode(&Self::LAYOUT, encoding::Encoding::Dpd, bits as u128))
            }

            fn to_components(&self) -> Components {
                self.0
            }

            fn from_components(c: Components) -> Self {
                $name(c)
            }
        }

        decimal_common!($name, $layout);
    };
}

packed_decimal!(Decimal32, u32, encoding::D32);
packed_decimal!(Decimal64, u64, encoding::D64);
packed_decimal!(Decimal128, u128, encoding::D128);

fast_decimal!(Decimal32Fast, u32, encoding::D32);
fast_decimal!(Decimal64Fast, u64, encoding::D64);
fast_decimal!(Decimal128Fast, u128, encoding::D128);
