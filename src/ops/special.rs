// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Non-finite dispatch shared by every binary operation in `ops`: NaN
//! propagation (spec.md §3 invariants 5-6) applied before any operation
//! looks at its operands' numeric value.

use crate::components::Components;
use crate::flags::{self, ExceptionFlags};

/// If either operand is a NaN, returns the propagated result per spec.md
/// §3 invariants 5 and 6: a signaling NaN is quieted and raises
/// `invalid`; otherwise the left operand's NaN (quieted) is preferred.
/// Returns `None` when neither operand is a NaN, so the caller can fall
/// through to its normal numeric path.
pub fn propagate_nan(a: &Components, b: &Components) -> Option<Components> {
    let a_snan = a.is_signaling_nan();
    let b_snan = b.is_signaling_nan();
    if a_snan || b_snan {
        flags::raise(ExceptionFlags::INVALID);
    }
    if a.is_nan() {
        return Some(a.quieted());
    }
    if b.is_nan() {
        return Some(b.quieted());
    }
    None
}

/// Quiets and flags a single-operand NaN (for unary operations like
/// `sqrt`, `ln`, trig functions).
pub fn propagate_nan_unary(a: &Components) -> Option<Components> {
    if a.is_signaling_nan() {
        flags::raise(ExceptionFlags::INVALID);
    }
    if a.is_nan() {
        return Some(a.quieted());
    }
    None
}

/// Produces the canonical quiet NaN used for an invalid-operation result
/// that has no payload to inherit from an operand (e.g. `inf - inf`),
/// raising `invalid`.
pub fn invalid_result() -> Components {
    flags::raise(ExceptionFlags::INVALID);
    Components::quiet_nan(false, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signaling_nan_is_quieted_and_flagged() {
        flags::clear();
        let s = Components::signaling_nan(false, 9);
        let f = Components::finite(false, 1, 0);
        let r = propagate_nan(&s, &f).unwrap();
        assert!(r.is_nan() && !r.is_signaling_nan());
        assert!(flags::get().contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn left_operand_payload_preferred() {
        let l = Components::quiet_nan(false, 1);
        let r = Components::quiet_nan(false, 2);
        let result = propagate_nan(&l, &r).unwrap();
        assert_eq!(result.nan_payload(), Some(1));
    }
}
