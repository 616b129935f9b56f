// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use tracing::debug;

use crate::extension::context::ExtensionContext;
use crate::extension::hooks::{ExecutionHooks, HookSignal, TestFailure};
use crate::extension::store::Namespace;
use crate::spec;

/// Marks a test which currently fails but will be fixed in the future.
///
/// If the test **fails**, the failure is swallowed and the test is reported as
/// skipped. If the test **passes**, it is reported as failed with
/// [`PendingTestPassed`], so that the marker gets removed and the test can
/// fail loudly again.
///
/// The issue reference is only carried for traceability.
///
/// # Examples
///
/// ```rust
/// # use pending_until_fixed::extension::*;
///
/// let marker = PendingUntilFixed::new("RCRM-3943");
/// assert_eq!(marker.issue(), "RCRM-3943");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUntilFixed {
    issue: String,
}

impl PendingUntilFixed {
    pub fn new(issue: &str) -> Self {
        PendingUntilFixed {
            issue: issue.to_owned(),
        }
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    /// The interceptor engaged by attaching this marker.
    pub(crate) fn extension(&self) -> Arc<dyn ExecutionHooks> {
        Arc::new(PendingUntilFixedExtension {
            issue: self.issue.clone(),
        })
    }

    pub(crate) fn to_spec(&self) -> spec::Marker {
        spec::Marker::PendingUntilFixed {
            issue: self.issue.clone(),
        }
    }
}

/// Raised when a test marked with [`PendingUntilFixed`] passes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Pending test passed, remove the `@PendingUntilFixed` annotation.")]
pub struct PendingTestPassed {
    issue: String,
}

impl PendingTestPassed {
    pub fn issue(&self) -> &str {
        &self.issue
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    TestHasThrownException,
    FirstFailureMessage,
}

impl AsRef<str> for Flag {
    fn as_ref(&self) -> &str {
        match self {
            Flag::TestHasThrownException => "TEST_HAS_THROWN_EXCEPTION",
            Flag::FirstFailureMessage => "FIRST_FAILURE_MESSAGE",
        }
    }
}

struct PendingUntilFixedExtension {
    issue: String,
}

impl ExecutionHooks for PendingUntilFixedExtension {
    fn handle_execution_exception(
        &self,
        ctx: &ExtensionContext,
        failure: TestFailure,
    ) -> Result<(), TestFailure> {
        // swallow the failure, only take note of it
        let store = ctx.store(Namespace::create(ctx.unique_id()));
        store.put(Flag::TestHasThrownException, true);

        // first failure wins
        store
            .get_or_compute_if_absent(Flag::FirstFailureMessage, |_| {
                failure.message().to_owned()
            })
            .map_err(|e| TestFailure::error(&e))?;

        debug!(
            execution = %ctx.unique_id(),
            issue = %self.issue,
            failure = %failure,
            "recorded expected failure"
        );
        Ok(())
    }

    fn after_execution(&self, ctx: &ExtensionContext) -> Result<(), HookSignal> {
        let store = ctx.store(Namespace::create(ctx.unique_id()));

        // absent flag: the test hasn't thrown
        let has_thrown = store
            .get_or_compute_if_absent(Flag::TestHasThrownException, |_| false)
            .map_err(|e| HookSignal::Failed(Box::new(e)))?;

        if has_thrown {
            let first = store
                .get::<String>(Flag::FirstFailureMessage)
                .map_err(|e| HookSignal::Failed(Box::new(e)))?;

            Err(HookSignal::Aborted {
                reason: match first {
                    Some(msg) => format!("pending until fixed ({}): {}", self.issue, msg),
                    None => format!("pending until fixed ({})", self.issue),
                },
            })
        } else {
            Err(HookSignal::Failed(Box::new(PendingTestPassed {
                issue: self.issue.clone(),
            })))
        }
    }
}
