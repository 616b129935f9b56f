// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use tracing::debug;

use crate::extension::lifecycle::{Lifecycle, Verdict};
use crate::extension::{
    ExecutionHooks, ExecutionId, ExecutionReturn, ExtensionContext, PendingUntilFixed, TestFailure,
};
use crate::output as pu;
use crate::spec::{self, TestExecutionArtifactImpl};
use pu::emitter::JsonEmitter;

/// The outcome of a [`TestExecution`], as reported in its end artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Reports the execution status of the test
    pub status: spec::TestStatus,
    /// Reports the result of the test
    pub result: spec::TestResult,
    /// Failure message, or the reason the test was skipped
    pub message: Option<String>,
}

impl ExecutionOutcome {
    pub fn is_passed(&self) -> bool {
        self.status == spec::TestStatus::Complete && self.result == spec::TestResult::Pass
    }

    pub fn is_skipped(&self) -> bool {
        self.status == spec::TestStatus::Skip
    }

    pub fn is_failed(&self) -> bool {
        self.result == spec::TestResult::Fail
    }

    fn from_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Passed => ExecutionOutcome {
                status: spec::TestStatus::Complete,
                result: spec::TestResult::Pass,
                message: None,
            },
            Verdict::Aborted(reason) => ExecutionOutcome {
                status: spec::TestStatus::Skip,
                result: spec::TestResult::NotApplicable,
                message: Some(reason),
            },
            Verdict::Failed(message) => ExecutionOutcome {
                status: spec::TestStatus::Complete,
                result: spec::TestResult::Fail,
                message: Some(message),
            },
        }
    }
}

/// A single test unit run under the [`StartedTestRunner`].
///
/// Markers and hooks are attached before the body runs. Hooks are offered the
/// failure of the body in the order they were registered.
///
/// [`StartedTestRunner`]: crate::output::StartedTestRunner
pub struct TestExecution {
    id: ExecutionId,
    name: String,
    markers: Vec<spec::Marker>,
    hooks: Vec<Arc<dyn ExecutionHooks>>,

    emitter: Arc<ExecutionEmitter>,
}

impl TestExecution {
    pub(crate) fn new(id: ExecutionId, name: &str, runner_emitter: Arc<JsonEmitter>) -> Self {
        TestExecution {
            name: name.to_owned(),
            markers: vec![],
            hooks: vec![],
            emitter: Arc::new(ExecutionEmitter {
                execution_id: id.as_str().to_owned(),
                runner_emitter,
            }),
            id,
        }
    }

    /// Marks this execution as pending until `marker`'s issue is fixed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # tokio_test::block_on(async {
    /// # use pending_until_fixed::output::*;
    /// use pending_until_fixed::PendingUntilFixed;
    ///
    /// let runner = TestRunner::new().start().await?;
    /// let outcome = runner
    ///     .add_execution("rounding")
    ///     .with_marker(PendingUntilFixed::new("RCRM-3943"))
    ///     .run(|| assert_eq!(2.5f64.round(), 2.0))
    ///     .await?;
    ///
    /// assert_eq!(outcome.status, TestStatus::Skip);
    ///
    /// # Ok::<(), PendingError>(())
    /// # });
    /// ```
    pub fn with_marker(mut self, marker: PendingUntilFixed) -> Self {
        self.markers.push(marker.to_spec());
        self.hooks.push(marker.extension());
        self
    }

    pub fn register_hooks(mut self, hooks: Arc<dyn ExecutionHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn id(&self) -> &ExecutionId {
        &self.id
    }

    /// Runs a synchronous test body and reports its outcome.
    ///
    /// A panic or an `Err` returned by `body` counts as a failure.
    pub async fn run<F, R>(self, body: F) -> Result<ExecutionOutcome, pu::PendingError>
    where
        F: FnOnce() -> R + Send,
        R: ExecutionReturn,
    {
        let ctx = self.start().await?;

        let failure = match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(ret) => ret.into_failure(),
            Err(payload) => Some(TestFailure::panic(payload)),
        };

        self.end(ctx, failure).await
    }

    /// Builds a scope for an asynchronous test body, taking care of emitting
    /// the start and end artifacts around it. The body receives a
    /// [`ScopedTestExecution`] to add logs with.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # tokio_test::block_on(async {
    /// # use futures::FutureExt;
    /// # use pending_until_fixed::output::*;
    ///
    /// let runner = TestRunner::new().start().await?;
    /// let outcome = runner
    ///     .add_execution("fan speed")
    ///     .scope(|s| {
    ///         async move {
    ///             s.add_log(LogSeverity::Info, "reading fan speed").await?;
    ///             Ok::<(), PendingError>(())
    ///         }
    ///         .boxed()
    ///     })
    ///     .await?;
    ///
    /// assert!(outcome.is_passed());
    ///
    /// # Ok::<(), PendingError>(())
    /// # });
    /// ```
    pub async fn scope<F, R, T>(self, func: F) -> Result<ExecutionOutcome, pu::PendingError>
    where
        R: Future<Output = T> + Send + 'static,
        F: FnOnce(ScopedTestExecution) -> R + Send + 'static,
        T: ExecutionReturn,
    {
        let ctx = self.start().await?;

        let scoped = ScopedTestExecution {
            emitter: Arc::clone(&self.emitter),
        };
        let failure = match AssertUnwindSafe(func(scoped)).catch_unwind().await {
            Ok(ret) => ret.into_failure(),
            Err(payload) => Some(TestFailure::panic(payload)),
        };

        self.end(ctx, failure).await
    }

    async fn start(&self) -> Result<ExtensionContext, pu::PendingError> {
        let markers = if self.markers.is_empty() {
            None
        } else {
            Some(self.markers.clone())
        };

        self.emitter
            .emit(&TestExecutionArtifactImpl::TestExecutionStart(
                spec::TestExecutionStart {
                    name: self.name.clone(),
                    markers,
                },
            ))
            .await?;

        Ok(ExtensionContext::new(self.id.clone(), &self.name))
    }

    async fn end(
        &self,
        ctx: ExtensionContext,
        failure: Option<TestFailure>,
    ) -> Result<ExecutionOutcome, pu::PendingError> {
        let outcome = {
            let lifecycle = Lifecycle::new(&ctx, &self.hooks);
            let leftover = failure.and_then(|f| lifecycle.intercept(f));
            ExecutionOutcome::from_verdict(lifecycle.finish(leftover))
        };
        // the store goes away with the context
        drop(ctx);

        debug!(
            execution = %self.id,
            status = ?outcome.status,
            result = ?outcome.result,
            "execution finished"
        );

        self.emitter
            .emit(&TestExecutionArtifactImpl::TestExecutionEnd(
                spec::TestExecutionEnd {
                    status: outcome.status,
                    result: outcome.result,
                    message: outcome.message.clone(),
                },
            ))
            .await?;

        Ok(outcome)
    }
}

/// Handle given to the body of [`TestExecution::scope`].
pub struct ScopedTestExecution {
    emitter: Arc<ExecutionEmitter>,
}

impl ScopedTestExecution {
    /// Emits a log message with the given severity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # tokio_test::block_on(async {
    /// # use futures::FutureExt;
    /// # use pending_until_fixed::output::*;
    ///
    /// let runner = TestRunner::new().start().await?;
    /// runner
    ///     .add_execution("logs")
    ///     .scope(|s| {
    ///         async move {
    ///             s.add_log(LogSeverity::Warning, "sensor reads zero").await?;
    ///             Ok::<(), PendingError>(())
    ///         }
    ///         .boxed()
    ///     })
    ///     .await?;
    ///
    /// # Ok::<(), PendingError>(())
    /// # });
    /// ```
    pub async fn add_log(
        &self,
        severity: spec::LogSeverity,
        msg: &str,
    ) -> Result<(), pu::PendingError> {
        let log = pu::Log::builder(msg).severity(severity).build();
        self.add_log_with_details(&log).await
    }

    /// Emits a log message built with [`Log::builder`].
    ///
    /// [`Log::builder`]: crate::output::Log::builder
    pub async fn add_log_with_details(&self, log: &pu::Log) -> Result<(), pu::PendingError> {
        self.emitter
            .emit(&TestExecutionArtifactImpl::Log(log.to_artifact()))
            .await
    }
}

struct ExecutionEmitter {
    execution_id: String,
    runner_emitter: Arc<JsonEmitter>,
}

impl ExecutionEmitter {
    async fn emit(&self, object: &TestExecutionArtifactImpl) -> Result<(), pu::PendingError> {
        let root = spec::RootImpl::TestExecutionArtifact(spec::TestExecutionArtifact {
            id: self.execution_id.clone(),
            artifact: object.clone(),
        });
        self.runner_emitter.emit(&root).await
    }
}
