// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use tracing::debug;

use crate::extension::context::ExtensionContext;
use crate::extension::hooks::{ExecutionHooks, HookSignal, TestFailure};

/// How an execution ended once every hook had its say.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Verdict {
    Passed,
    Aborted(String),
    Failed(String),
}

/// Drives the registered hooks of one execution.
pub(crate) struct Lifecycle<'a> {
    ctx: &'a ExtensionContext,
    hooks: &'a [Arc<dyn ExecutionHooks>],
}

impl<'a> Lifecycle<'a> {
    pub(crate) fn new(ctx: &'a ExtensionContext, hooks: &'a [Arc<dyn ExecutionHooks>]) -> Self {
        Lifecycle { ctx, hooks }
    }

    /// Offers `failure` to the exception handlers in registration order.
    /// Returns the failure nobody swallowed, if any.
    pub(crate) fn intercept(&self, failure: TestFailure) -> Option<TestFailure> {
        let mut pending = failure;
        for hook in self.hooks {
            match hook.handle_execution_exception(self.ctx, pending) {
                Ok(()) => return None,
                Err(rethrown) => pending = rethrown,
            }
        }
        Some(pending)
    }

    /// Runs every after-execution callback, last registered first, and
    /// settles the verdict. The first signal raised wins.
    pub(crate) fn finish(&self, leftover: Option<TestFailure>) -> Verdict {
        let mut first: Option<HookSignal> = None;
        for hook in self.hooks.iter().rev() {
            if let Err(signal) = hook.after_execution(self.ctx) {
                if first.is_none() {
                    first = Some(signal);
                } else {
                    debug!(
                        execution = %self.ctx.unique_id(),
                        %signal,
                        "dropping additional after-execution signal"
                    );
                }
            }
        }

        match (leftover, first) {
            (Some(failure), _) => Verdict::Failed(failure.message().to_owned()),
            (None, Some(HookSignal::Aborted { reason })) => Verdict::Aborted(reason),
            (None, Some(HookSignal::Failed(err))) => Verdict::Failed(err.to_string()),
            (None, None) => Verdict::Passed,
        }
    }
}
