// Decimal754
// Copyright (c) 2024 The Project Decimal754 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `decimal754` implements the core of IEEE 754-2008 decimal floating-point
//! arithmetic: exact base-10 values at three precisions (32, 64, and 128
//! bits), their two interchange encodings (BID and DPD), a rounding and
//! normalization engine, an arithmetic kernel, binary/text conversions, and
//! a transcendental math kernel.
//!
//! The crate is organized leaves-first, matching the dependency order of
//! the components it implements:
//!
//! `bigint` -> `encoding` -> `components` -> `rounding` -> `ops` ->
//! { `convert`, `charconv`, `math` } -> `types`.
//!
//! Arithmetic never allocates and never panics on malformed input; IEEE
//! exceptions are recorded in [`flags`] rather than raised, and parse/format
//! failures are returned as status values.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bigint;
pub mod charconv;
pub mod components;
pub mod context;
pub mod convert;
pub mod encoding;
pub mod error;
pub mod flags;
pub mod math;
pub mod ops;
pub mod rounding;
pub mod types;

pub use components::Components;
pub use context::RoundingMode;
pub use error::{ParseError, ParseStatus};
pub use flags::ExceptionFlags;
pub use types::{
    Decimal128, Decimal128Fast, Decimal32, Decimal32Fast, Decimal64, Decimal64Fast,
};
