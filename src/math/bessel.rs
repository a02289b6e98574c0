// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bessel functions of the first and second kind, orders 0, 1, and
//! arbitrary integer `n` (spec.md §4.8's "Bessel" entry). `y0`/`y1`/`yn`
//! have a branch cut at `x <= 0`; see [`super`]'s module docs for the
//! evaluation strategy.

use crate::components::Components;
use crate::context::RoundingMode;
use crate::rounding::Precision;

pub fn j0(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    super::unary(x, prec, mode, libm::j0)
}

pub fn j1(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    super::unary(x, prec, mode, libm::j1)
}

pub fn jn(n: i32, x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    super::unary(x, prec, mode, move |v| libm::jn(n, v))
}

/// `y0(x)`; `x < 0` is outside the real domain and yields NaN with
/// `invalid` signaled. `x == 0` is the function's pole: `y0`, `y1`, and
/// `yn` for even `n` diverge to `-inf` there, which `unary_checked`
/// reports as `divide_by_zero` instead.
pub fn y0(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    super::unary_checked(x, prec, mode, libm::y0)
}

pub fn y1(x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    super::unary_checked(x, prec, mode, libm::y1)
}

pub fn yn(n: i32, x: &Components, prec: Precision, mode: RoundingMode) -> Components {
    super::unary_checked(x, prec, mode, move |v| libm::yn(n, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;
    use crate::flags::{self, ExceptionFlags};

    const D64: Precision = Precision { p: 16, e_min: -383, e_max: 384 };

    #[test]
    fn j0_of_zero_is_one() {
        let r = j0(&Components::zero(false, 0), D64, RoundingMode::ToNearestEven);
        assert_eq!(convert::to_f64(&r), 1.0);
    }

    #[test]
    fn jn_zero_matches_j0() {
        let x = convert::from_f64(2.5, D64, RoundingMode::ToNearestEven);
        let a = convert::to_f64(&j0(&x, D64, RoundingMode::ToNearestEven));
        let b = convert::to_f64(&jn(0, &x, D64, RoundingMode::ToNearestEven));
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn y0_of_negative_is_invalid() {
        flags::clear();
        let x = convert::from_i128(-1, D64, RoundingMode::ToNearestEven);
        let r = y0(&x, D64, RoundingMode::ToNearestEven);
        assert!(r.is_nan());
        assert!(flags::get().contains(ExceptionFlags::INVALID));
    }
}
