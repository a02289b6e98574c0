// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Components` is the canonical `{sign, significand, exponent}` triple
//! that `encoding` decodes into and that `ops`/`rounding` operate on.
//!
//! spec.md §4.3 allows the significand width to vary per precision (u32 for
//! d32, u64 for d64, u128 for d128). This implementation instead always
//! stores the significand as a `u128`: it comfortably holds the 34-digit
//! d128 significand, costs nothing extra for d32/d64 (`Components` is a
//! transient value threaded through a single arithmetic call, never
//! stored), and lets `rounding`/`ops` be written once instead of three
//! times. Each public type (`src/types.rs`) still enforces its own
//! precision's digit-count invariant when it narrows a `Components` back
//! into its packed or fast-form representation. This is recorded as an
//! Open Question resolution in DESIGN.md.

use core::cmp::Ordering;

use crate::bigint::U256;

/// The non-finite tag of a value that is not a finite number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Special {
    Infinity,
    QuietNan(u128),
    SignalingNan(u128),
}

/// The canonical decomposed form of a decimal value at some precision.
///
/// `ZERO` is represented by `significand == 0`; the exponent of a zero is
/// preserved (the "cohort of zeros" spec.md §3 describes). Non-finite
/// values are represented by `special.is_some()`, in which case `exponent`
/// is meaningless and `significand` is ignored.
#[derive(Copy, Clone, Debug)]
pub struct Components {
    pub sign: bool,
    pub significand: u128,
    pub exponent: i32,
    pub special: Option<Special>,
}

impl Components {
    pub const fn finite(sign: bool, significand: u128, exponent: i32) -> Self {
        Components { sign, significand, exponent, special: None }
    }

    pub const fn zero(sign: bool, exponent: i32) -> Self {
        Components { sign, significand: 0, exponent, special: None }
    }

    pub const fn infinity(sign: bool) -> Self {
        Components { sign, significand: 0, exponent: 0, special: Some(Special::Infinity) }
    }

    pub const fn quiet_nan(sign: bool, payload: u128) -> Self {
        Components { sign, significand: 0, exponent: 0, special: Some(Special::QuietNan(payload)) }
    }

    pub const fn signaling_nan(sign: bool, payload: u128) -> Self {
        Components {
            sign,
            significand: 0,
            exponent: 0,
            special: Some(Special::SignalingNan(payload)),
        }
    }

    pub const fn is_finite(&self) -> bool {
        self.special.is_none()
    }

    pub const fn is_zero(&self) -> bool {
        self.special.is_none() && self.significand == 0
    }

    pub const fn is_infinite(&self) -> bool {
        matches!(self.special, Some(Special::Infinity))
    }

    pub const fn is_nan(&self) -> bool {
        matches!(self.special, Some(Special::QuietNan(_)) | Some(Special::SignalingNan(_)))
    }

    pub const fn is_signaling_nan(&self) -> bool {
        matches!(self.special, Some(Special::SignalingNan(_)))
    }

    /// Returns `self` with any signaling NaN converted to quiet (raising
    /// `invalid` is the caller's responsibility, per spec.md §3 invariant
    /// 5).
    pub fn quieted(&self) -> Components {
        match self.special {
            Some(Special::SignalingNan(payload)) => Components::quiet_nan(self.sign, payload),
            _ => *self,
        }
    }

    pub fn nan_payload(&self) -> Option<u128> {
        match self.special {
            Some(Special::QuietNan(p)) | Some(Special::SignalingNan(p)) => Some(p),
            _ => None,
        }
    }
}

/// A significand value still wide enough to need rounding down to a target
/// precision (spec.md §4.4): either it already fits in a `u128`, or it is
/// the result of a widened multiply and needs the 256-bit path.
#[derive(Copy, Clone, Debug)]
pub enum WideSignificand {
    Narrow(u128),
    Wide(U256),
}

impl WideSignificand {
    pub fn is_zero(&self) -> bool {
        match self {
            WideSignificand::Narrow(v) => *v == 0,
            WideSignificand::Wide(v) => v.is_zero(),
        }
    }

    pub fn digit_count(&self) -> u32 {
        use crate::bigint::DecimalDigits;
        match self {
            WideSignificand::Narrow(v) => v.decimal_digit_count(),
            WideSignificand::Wide(v) => v.decimal_digit_count(),
        }
    }

    /// Divides by `10^k`, returning the quotient (still a `WideSignificand`)
    /// and whether any nonzero digit was discarded (needed for sticky-bit
    /// tracking) plus the first discarded digit, for rounding decisions.
    pub fn div_pow10(&self, k: u32) -> (WideSignificand, RoundBits) {
        if k == 0 {
            return (*self, RoundBits { first_discarded: 0, sticky: false });
        }
        match self {
            WideSignificand::Narrow(v) => {
                let p = crate::bigint::pow10_u128(k.min(38));
                if k > 38 {
                    // Dividing a <=39-digit value by more than 10^38 always
                    // yields zero with everything discarded as sticky.
                    let sticky = *v != 0;
                    return (
                        WideSignificand::Narrow(0),
                        RoundBits { first_discarded: if sticky { 1 } else { 0 }, sticky },
                    );
                }
                let q = v / p;
                let r = v % p;
                let half = p / 2;
                let first_discarded = if r == 0 {
                    0
                } else if r < half {
                    1
                } else if r == half {
                    5
                } else {
                    9
                };
                let sticky = r != 0 && r != half;
                (WideSignificand::Narrow(q), RoundBits { first_discarded, sticky })
            }
            WideSignificand::Wide(v) => {
                let mut remaining = *v;
                let mut k_left = k;
                while k_left > 76 {
                    remaining = remaining.div_rem(&crate::bigint::pow10_u256(76)).0;
                    k_left -= 76;
                }
                let p = crate::bigint::pow10_u256(k_left);
                let (q, r) = remaining.div_rem(&p);
                let half = p.shr(1);
                let cmp_half = r.cmp(&half);
                let first_discarded = if r.is_zero() {
                    0
                } else {
                    match cmp_half {
                        Ordering::Less => 1,
                        Ordering::Equal => 5,
                        Ordering::Greater => 9,
                    }
                };
                let sticky = !(r.is_zero() || cmp_half == Ordering::Equal);
                let narrowed =
                    if q.fits_u128() { WideSignificand::Narrow(q.low_u128()) } else { WideSignificand::Wide(q) };
                (narrowed, RoundBits { first_discarded, sticky })
            }
        }
    }

    pub fn mul_pow10(&self, k: u32) -> WideSignificand {
        if k == 0 {
            return *self;
        }
        match self {
            WideSignificand::Narrow(v) => {
                if k <= 38 {
                    if let Some(product) = v.checked_mul(crate::bigint::pow10_u128(k)) {
                        return WideSignificand::Narrow(product);
                    }
                }
                WideSignificand::Wide(
                    U256::from_u128(*v).wrapping_mul(&crate::bigint::pow10_u256(k.min(77))),
                )
            }
            WideSignificand::Wide(v) => {
                WideSignificand::Wide(v.wrapping_mul(&crate::bigint::pow10_u256(k.min(77))))
            }
        }
    }

    pub fn increment(&self) -> WideSignificand {
        match self {
            WideSignificand::Narrow(v) => WideSignificand::Narrow(v + 1),
            WideSignificand::Wide(v) => WideSignificand::Wide(v.wrapping_add(&U256::ONE)),
        }
    }

    pub fn is_odd(&self) -> bool {
        match self {
            WideSignificand::Narrow(v) => v % 2 == 1,
            WideSignificand::Wide(v) => v.limbs()[0] % 2 == 1,
        }
    }

    /// Widens to a `U256`, used to add/subtract/compare two
    /// `WideSignificand`s uniformly regardless of which started narrow.
    pub(crate) fn to_u256(&self) -> U256 {
        match self {
            WideSignificand::Narrow(v) => U256::from_u128(*v),
            WideSignificand::Wide(v) => *v,
        }
    }

    /// Sum of two significands already expressed at the same power of ten.
    pub fn add(&self, other: &WideSignificand) -> WideSignificand {
        WideSignificand::from(self.to_u256().wrapping_add(&other.to_u256()))
    }

    /// `self - other`; the caller must ensure `self >= other` (the
    /// arithmetic kernel always subtracts the smaller magnitude from the
    /// larger, per spec.md §4.5).
    pub fn sub(&self, other: &WideSignificand) -> WideSignificand {
        WideSignificand::from(self.to_u256().wrapping_sub(&other.to_u256()))
    }

    pub fn cmp(&self, other: &WideSignificand) -> Ordering {
        self.to_u256().cmp(&other.to_u256())
    }

    /// Narrows to a `u128`, assuming the caller has already verified the
    /// value fits (true once rounding has reduced it to <= 34 digits).
    pub fn to_u128_saturating(&self) -> u128 {
        match self {
            WideSignificand::Narrow(v) => *v,
            WideSignificand::Wide(v) => {
                if v.fits_u128() {
                    v.low_u128()
                } else {
                    u128::MAX
                }
            }
        }
    }
}

impl From<u128> for WideSignificand {
    fn from(v: u128) -> Self {
        WideSignificand::Narrow(v)
    }
}

impl From<U256> for WideSignificand {
    fn from(v: U256) -> Self {
        if v.fits_u128() {
            WideSignificand::Narrow(v.low_u128())
        } else {
            WideSignificand::Wide(v)
        }
    }
}

/// The discarded tail of a division used to round a significand down to a
/// target precision: the decimal digit that represents the tail's rounding
/// direction (0 = nothing to round, 1-4/6-9 = round down/up, 5 = exactly at
/// the halfway point), plus whether any further nonzero digit was dropped
/// beyond that (the sticky bit).
#[derive(Copy, Clone, Debug)]
pub struct RoundBits {
    pub first_discarded: u8,
    pub sticky: bool,
}

impl RoundBits {
    pub const NONE: RoundBits = RoundBits { first_discarded: 0, sticky: false };

    pub const fn is_exactly_half(&self) -> bool {
        self.first_discarded == 5 && !self.sticky
    }

    pub const fn is_more_than_half(&self) -> bool {
        self.first_discarded > 5 || (self.first_discarded == 5 && self.sticky)
    }

    pub const fn is_nonzero(&self) -> bool {
        self.first_discarded != 0 || self.sticky
    }
}
