// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the status types returned by the parse and
//! format surfaces. Arithmetic itself never returns an error: IEEE
//! exceptions are recorded in [`crate::flags`] and a defined substitute
//! value (NaN, infinity, zero, or a rounded result) is always returned.
//!
//! Modeled on `symphonia-core::errors::SymphoniaError`: a plain enum with a
//! hand-written `Display` impl, no `thiserror`.

use core::fmt;

/// The outcome of a `from_chars` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseStatus {
    /// The input was fully or partially consumed and converted.
    Success,
    /// No convertible prefix was found (e.g. empty input, or a sign with no
    /// following digits).
    InvalidArgument,
    /// A convertible prefix was found but its value is outside the
    /// representable range; the result is the closest representable value
    /// (signed infinity on overflow, a signed zero or subnormal on
    /// underflow).
    ResultOutOfRange,
}

/// An error from `from_chars`, pairing a [`ParseStatus`] with the number of
/// input bytes consumed before the error was detected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub status: ParseStatus,
    pub consumed: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            ParseStatus::Success => write!(f, "success"),
            ParseStatus::InvalidArgument => write!(f, "invalid_argument: no convertible prefix"),
            ParseStatus::ResultOutOfRange => {
                write!(f, "result_out_of_range: value beyond representable range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// The outcome of a `to_chars` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The caller-provided buffer was too small; its contents are left
    /// unspecified.
    ValueTooLarge,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::ValueTooLarge => write!(f, "value_too_large: output buffer too small"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
