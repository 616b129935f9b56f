// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attribute macro for the `pending-until-fixed` crate.
//!
//! Use it through the re-export in `pending_until_fixed`, which the expanded
//! code refers to.

mod pending;

use proc_macro::TokenStream;

/// Marks a test which currently fails but will be fixed in the future.
///
/// The single argument is a free-text reference to the issue tracking the
/// fix. The test body is run through `pending_until_fixed::run_pending` (or
/// `run_pending_async` for an `async fn`):
///
/// * if the body fails, the test passes and a warning is logged;
/// * if the body passes, the test fails with
///   "Pending test passed, remove the `@PendingUntilFixed` annotation."
///
/// Every other attribute on the function is kept, so it composes with
/// `#[test]`, `#[tokio::test]` and `#[should_panic]`.
///
/// # Example
///
/// ```ignore
/// use pending_until_fixed::pending_until_fixed;
///
/// #[test]
/// #[pending_until_fixed("RCRM-3943")]
/// fn rounding_is_fixed() {
///     assert_eq!(round(2.5), 3.0);
/// }
/// ```
#[proc_macro_attribute]
pub fn pending_until_fixed(attr: TokenStream, item: TokenStream) -> TokenStream {
    pending::pending_impl(attr, item)
}
