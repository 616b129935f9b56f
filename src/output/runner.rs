// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runner entry point
//!
//! This module contains the object the user starts from: it owns the output
//! configuration and hands out test executions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::extension::ExecutionId;
use crate::output as pu;
use crate::spec;
use pu::emitter::JsonEmitter;
use pu::execution::TestExecution;

/// Reports a batch of test executions on a single output stream.
pub struct TestRunner {
    emitter: Arc<JsonEmitter>,
}

impl TestRunner {
    /// Creates a new [`TestRunnerBuilder`] object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pending_until_fixed::output::*;
    ///
    /// let builder = TestRunner::builder();
    /// ```
    pub fn builder() -> TestRunnerBuilder {
        TestRunnerBuilder::new()
    }

    /// Creates a runner writing to stdout, with UTC timestamps.
    pub fn new() -> TestRunner {
        TestRunnerBuilder::new().build()
    }

    /// Starts the runner and emits the schema version.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # tokio_test::block_on(async {
    /// # use pending_until_fixed::output::*;
    ///
    /// let runner = TestRunner::new().start().await?;
    ///
    /// # Ok::<(), PendingError>(())
    /// # });
    /// ```
    pub async fn start(self) -> Result<StartedTestRunner, pu::PendingError> {
        let version = spec::RootImpl::SchemaVersion(spec::SchemaVersion::default());
        self.emitter.emit(&version).await?;

        Ok(StartedTestRunner {
            emitter: self.emitter,
            execution_seqno: AtomicU64::new(0),
        })
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestRunnerBuilder {
    config: Option<pu::Config>,
}

impl TestRunnerBuilder {
    fn new() -> Self {
        TestRunnerBuilder { config: None }
    }

    pub fn config(mut self, value: pu::Config) -> TestRunnerBuilder {
        self.config = Some(value);
        self
    }

    pub fn build(self) -> TestRunner {
        let config = self.config.unwrap_or_else(|| pu::Config::builder().build());

        TestRunner {
            emitter: Arc::new(JsonEmitter::new(config)),
        }
    }
}

/// A runner that already emitted its preamble and accepts executions.
///
/// Can be shared between tasks: every execution it hands out gets its own
/// identity and its own store.
pub struct StartedTestRunner {
    emitter: Arc<JsonEmitter>,
    execution_seqno: AtomicU64,
}

impl StartedTestRunner {
    fn next_execution_id(&self) -> ExecutionId {
        let n = self.execution_seqno.fetch_add(1, Ordering::AcqRel);
        ExecutionId::new(&format!("execution{}", n))
    }

    /// Creates a new execution named `name`. Nothing is emitted until it runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # tokio_test::block_on(async {
    /// # use pending_until_fixed::output::*;
    ///
    /// let runner = TestRunner::new().start().await?;
    /// let execution = runner.add_execution("fan speed within range");
    ///
    /// # Ok::<(), PendingError>(())
    /// # });
    /// ```
    pub fn add_execution(&self, name: &str) -> TestExecution {
        TestExecution::new(self.next_execution_id(), name, Arc::clone(&self.emitter))
    }
}
