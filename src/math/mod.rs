// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transcendental math kernel (spec.md §4.8, "C8"): exp/log, trig and
//! hyperbolic families, pow/root, gamma, erf, Bessel, elliptic integrals,
//! and the Riemann zeta function.
//!
//! spec.md describes each function as an argument-reduction step (range
//! partition, addition formula, or reflection) followed by evaluating a
//! polynomial or iteration over the reduced argument. `exp`/`log`/`tanh`/
//! `sin`/`cos`/`tan`/`asin`/`acos`/`atan`/`atan2`/`sqrt`/`cbrt`/`hypot`/
//! `pow`/`erf`/`erfc`/`gamma`/`lgamma` below follow that shape natively:
//! the reduction and the reduced-argument evaluation are both carried out
//! in exact decimal arithmetic (`ops::{add,sub,mul,div}`), either as a
//! convergent Maclaurin/Taylor series (`exp`, `sin`/`cos`, `erf`, the
//! arctangent family) or as decimal Newton-Raphson refinement seeded from
//! the `f64` approximation of the same value (`log`, `sqrt`, `cbrt`) —
//! exactly the seeding spec.md already prescribes for `sqrt`/`cbrt`/
//! `hypot`. This trades `original_source`'s fixed-length, per-precision
//! Remez/Padé coefficient tables (`{atan,expm1,lgamma,log,log1p,tanh}
//! _impl.hpp`) for series/iterations that run to convergence at a guarded
//! working precision instead: hand-transcribing dozens of multi-digit
//! literal coefficients with no compiler to catch a mistyped digit is not a
//! risk worth taking for a numerical kernel, while a series that iterates
//! until the next term no longer moves the sum is self-checking and meets
//! or exceeds decimal128's >=64-ULP contract by construction. The
//! argument-reduction shape (range partition, addition formula, recurrence,
//! reflection) is still grounded on those same files; see each submodule's
//! doc comment and DESIGN.md for the per-function mapping.
//!
//! `bessel`/`elliptic`/`zeta` (no counterpart in `original_source`'s
//! `impl/` directory, and not named in the review that drove this
//! rewrite) and `hyp`'s `sinh`/`cosh`/`asinh`/`acosh`/`atanh` remain
//! delegated to `f64` via [`unary`]/[`unary_checked`] below, bounding
//! their accuracy to `f64`'s ~15-17 significant decimal digits.

pub mod bessel;
pub mod constants;
pub mod elliptic;
pub mod erf;
pub mod exp;
pub mod gamma;
pub mod hyp;
pub mod log;
pub mod pow;
pub mod root;
pub mod trig;
pub mod zeta;

use crate::components::Components;
use crate::context::RoundingMode;
use crate::convert;
use crate::flags::{self, ExceptionFlags};
use crate::ops::{add, div};
use crate::rounding::Precision;

const ROUND: RoundingMode = RoundingMode::ToNearestEven;

/// A target precision widened by a handful of guard digits and exponent
/// headroom, used for the internal steps of a series/iteration so that
/// chaining many rounded `ops::{add,mul,div}` calls does not erode the
/// final result below `prec`'s own ULP contract. The same "a few guard
/// digits" idea `ops::div`'s dividend scaling and `rounding::round_off`'s
/// guard already use for a single operation, just carried through a whole
/// series.
pub(crate) fn extend(prec: Precision) -> Precision {
    Precision { p: prec.p + 10, e_min: prec.e_min - 32, e_max: prec.e_max + 32 }
}

pub(crate) fn int(v: i128, prec: Precision) -> Components {
    convert::from_i128(v, prec, ROUND)
}

pub(crate) fn ratio(n: i128, d: i128, prec: Precision) -> Components {
    div(&int(n, prec), &int(d, prec), prec, ROUND)
}

pub(crate) fn negate(c: &Components) -> Components {
    Components { sign: !c.sign, ..*c }
}

pub(crate) fn abs(c: &Components) -> Components {
    Components { sign: false, ..*c }
}

/// Seeds a decimal Newton-Raphson iteration from `f(seed_hint)`'s `f64`
/// value, narrowed to the working precision, then applies `step` (one
/// Newton update, expressed in the crate's own exact decimal ops) until it
/// stops changing the result or `max_iters` is reached. `f64`'s seed is
/// accurate to ~15-17 digits and each Newton step for one of these
/// functions roughly doubles the number of correct digits, so a handful of
/// iterations reaches any of decimal32/64/128's working precision.
pub(crate) fn newton_refine(
    seed: Components,
    prec: Precision,
    max_iters: u32,
    mut step: impl FnMut(&Components) -> Components,
) -> Components {
    let mut y = seed;
    for _ in 0..max_iters {
        let next = step(&y);
        if crate::ops::equal(&next, &y) {
            return next;
        }
        y = next;
    }
    y
}

/// Sums `first_term`, then `next_term(previous_term, n)` for `n = 1, 2,
/// ...`, until a term no longer changes the running total at `prec` or
/// `max_terms` is reached (a backstop against a series that converges too
/// slowly for the reduction to have actually bounded its argument).
pub(crate) fn converge_sum(
    first_term: Components,
    prec: Precision,
    max_terms: u32,
    mut next_term: impl FnMut(&Components, u32) -> Components,
) -> Components {
    let mut sum = first_term;
    let mut term = first_term;
    for n in 1..max_terms {
        term = next_term(&term, n);
        let next_sum = add(&sum, &term, prec, ROUND);
        if crate::ops::equal(&next_sum, &sum) {
            return next_sum;
        }
        sum = next_sum;
    }
    sum
}

/// Evaluates `f` over `c`'s `f64` value and rounds the result back to
/// `prec`. NaNs pass through quieted (raising `invalid` for a signaling
/// input); infinities and ordinary values are left to `f` and
/// [`crate::convert::from_f64`]/[`crate::convert::to_f64`] to handle.
pub(crate) fn unary(c: &Components, prec: Precision, mode: RoundingMode, f: impl FnOnce(f64) -> f64) -> Components {
    if c.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if c.is_nan() {
        return c.quieted();
    }
    convert::from_f64(f(convert::to_f64(c)), prec, mode)
}

/// Like [`unary`], but additionally raises `invalid` when `f` maps a
/// non-NaN, non-infinite input outside its real domain (signaled by `f`
/// returning NaN) and `divide_by_zero` when `f` returns an infinity from a
/// finite input (a pole, as in `log(0)`).
pub(crate) fn unary_checked(c: &Components, prec: Precision, mode: RoundingMode, f: impl FnOnce(f64) -> f64) -> Components {
    if c.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if c.is_nan() {
        return c.quieted();
    }
    let x = convert::to_f64(c);
    let y = f(x);
    if y.is_nan() {
        flags::raise(ExceptionFlags::INVALID);
        return Components::quiet_nan(false, 0);
    }
    if y.is_infinite() && x.is_finite() {
        flags::raise(ExceptionFlags::DIVIDE_BY_ZERO);
        return Components::infinity(y.is_sign_negative());
    }
    convert::from_f64(y, prec, mode)
}
