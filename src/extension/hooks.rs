// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use crate::extension::context::ExtensionContext;

/// How a test body failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The body panicked, e.g. on a failed `assert!`.
    Panic,
    /// The body returned an `Err`.
    Error,
}

/// Whatever a test body raised instead of returning normally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TestFailure {
    kind: FailureKind,
    message: String,
}

impl TestFailure {
    /// Builds a failure out of a caught panic payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pending_until_fixed::extension::*;
    ///
    /// let payload = std::panic::catch_unwind(|| -> () { panic!("boom") }).unwrap_err();
    /// let failure = TestFailure::panic(payload);
    /// assert_eq!(failure.kind(), FailureKind::Panic);
    /// assert_eq!(failure.message(), "boom");
    /// ```
    pub fn panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_owned()
        };

        TestFailure {
            kind: FailureKind::Panic,
            message,
        }
    }

    pub fn error<E: fmt::Display + ?Sized>(err: &E) -> Self {
        TestFailure {
            kind: FailureKind::Error,
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Return types a test body may have.
///
/// `()` never fails on its own; `Result<(), E>` fails with the error
/// formatted as `{:?}`, the way libtest reports an `Err` from a test.
pub trait ExecutionReturn {
    fn into_failure(self) -> Option<TestFailure>;
}

impl ExecutionReturn for () {
    fn into_failure(self) -> Option<TestFailure> {
        None
    }
}

impl<E: fmt::Debug> ExecutionReturn for Result<(), E> {
    fn into_failure(self) -> Option<TestFailure> {
        self.err().map(|e| TestFailure {
            kind: FailureKind::Error,
            message: format!("{e:?}"),
        })
    }
}

/// Signal raised by an after-execution callback. It replaces the outcome the
/// test would otherwise have.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HookSignal {
    /// The execution is reported as skipped, neither passed nor failed.
    #[error("test execution aborted: {reason}")]
    Aborted { reason: String },

    /// The execution is reported as failed with this error.
    #[error(transparent)]
    Failed(Box<dyn StdError + Send + Sync + 'static>),
}

/// Callbacks a test execution invokes on its registered extensions.
///
/// Both methods have pass-through defaults, so an extension only implements
/// the events it cares about.
pub trait ExecutionHooks: Send + Sync {
    /// Called when the test body failed. Returning `Ok(())` swallows the
    /// failure; returning `Err` hands it (or a replacement) to the next
    /// handler, and eventually to the report.
    fn handle_execution_exception(
        &self,
        _ctx: &ExtensionContext,
        failure: TestFailure,
    ) -> Result<(), TestFailure> {
        Err(failure)
    }

    /// Called once the body has finished, whether it failed or not.
    fn after_execution(&self, _ctx: &ExtensionContext) -> Result<(), HookSignal> {
        Ok(())
    }
}
