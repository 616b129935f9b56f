// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use futures::FutureExt;
use tracing::warn;

use crate::extension::context::{ExecutionId, ExtensionContext};
use crate::extension::hooks::{ExecutionReturn, TestFailure};
use crate::extension::lifecycle::{Lifecycle, Verdict};
use crate::extension::pending::PendingUntilFixed;

/// Runs a test body marked as pending until `issue` gets fixed.
///
/// This is the function the `#[pending_until_fixed]` attribute expands to. It
/// is meant to be called from inside a `#[test]` function:
///
/// * if `body` panics or returns an `Err`, the failure is swallowed and the
///   test returns normally;
/// * if `body` succeeds, this panics with
///   "Pending test passed, remove the `@PendingUntilFixed` annotation."
///
/// # Examples
///
/// ```rust
/// use pending_until_fixed::run_pending;
///
/// run_pending("RCRM-3943", || {
///     assert_eq!(1 + 1, 3);
/// });
/// ```
///
/// ```rust,should_panic
/// use pending_until_fixed::run_pending;
///
/// // fixed in the meantime, the marker must go
/// run_pending("RCRM-3943", || {
///     assert_eq!(1 + 1, 2);
/// });
/// ```
pub fn run_pending<F, R>(issue: &str, body: F)
where
    F: FnOnce() -> R,
    R: ExecutionReturn,
{
    let failure = match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(ret) => ret.into_failure(),
        Err(payload) => Some(TestFailure::panic(payload)),
    };

    settle(issue, failure);
}

/// Async counterpart of [`run_pending`].
///
/// # Examples
///
/// ```rust
/// # tokio_test::block_on(async {
/// use pending_until_fixed::run_pending_async;
///
/// run_pending_async("RCRM-3943", async {
///     Err::<(), _>("still broken")
/// })
/// .await;
/// # });
/// ```
pub async fn run_pending_async<Fut, R>(issue: &str, body: Fut)
where
    Fut: Future<Output = R>,
    R: ExecutionReturn,
{
    let failure = match AssertUnwindSafe(body).catch_unwind().await {
        Ok(ret) => ret.into_failure(),
        Err(payload) => Some(TestFailure::panic(payload)),
    };

    settle(issue, failure);
}

fn settle(issue: &str, failure: Option<TestFailure>) {
    let marker = PendingUntilFixed::new(issue);
    let hooks = [marker.extension()];

    let ctx = current_context();
    let lifecycle = Lifecycle::new(&ctx, &hooks);

    let leftover = failure.and_then(|f| lifecycle.intercept(f));
    match lifecycle.finish(leftover) {
        Verdict::Passed => {}
        Verdict::Aborted(reason) => {
            warn!(test = %ctx.display_name(), "skipped, {reason}");
        }
        Verdict::Failed(message) => panic!("{message}"),
    }
}

/// Context of the test running on this thread.
///
/// libtest runs every test on a thread named after it, so the name identifies
/// the execution. Unnamed threads fall back to the thread id.
fn current_context() -> ExtensionContext {
    let current = thread::current();
    let id = match current.name() {
        Some(name) => name.to_owned(),
        None => format!("{:?}", current.id()),
    };

    ExtensionContext::new(ExecutionId::new(&id), &id)
}
