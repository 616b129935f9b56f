// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mark tests that currently fail as pending a fix.
//!
//! A marked test that fails is reported as skipped. A marked test that passes
//! is turned into a failure telling its author to remove the marker, so the
//! test can go back to failing loudly.
//!
//! ```rust,ignore
//! use pending_until_fixed::pending_until_fixed;
//!
//! #[test]
//! #[pending_until_fixed("RCRM-3943")]
//! fn rounding_is_fixed() {
//!     assert_eq!(round(2.5), 3.0);
//! }
//! ```
//!
//! The [`output`] module provides a small runner that executes marked tests
//! and reports their outcome as JSON lines.

pub mod extension;
pub mod output;
mod spec;

pub use extension::{run_pending, run_pending_async, PendingTestPassed, PendingUntilFixed};

#[cfg(feature = "macros")]
pub use pending_until_fixed_macros::pending_until_fixed;
