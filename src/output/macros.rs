// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Log macros exported from the crate root.

macro_rules! pending_log {
    ($name:ident, $severity:ident) => {
        /// Emit a log artifact on a running test execution.
        ///
        /// Equivalent to [`ScopedTestExecution::add_log_with_details`], with
        /// the source file and line filled in automatically.
        ///
        /// There is one macro for each severity level: DEBUG, INFO, WARNING,
        /// ERROR and FATAL.
        ///
        /// # Examples
        ///
        /// ```rust
        /// # tokio_test::block_on(async {
        /// # use futures::FutureExt;
        /// # use pending_until_fixed::output::*;
        /// use pending_until_fixed::pending_log_info;
        ///
        /// let runner = TestRunner::new().start().await?;
        /// runner
        ///     .add_execution("with logs")
        ///     .scope(|s| {
        ///         async move {
        ///             pending_log_info!(s, "probing sensor").await?;
        ///             Ok::<(), PendingError>(())
        ///         }
        ///         .boxed()
        ///     })
        ///     .await?;
        ///
        /// # Ok::<(), PendingError>(())
        /// # });
        /// ```
        ///
        /// [`ScopedTestExecution::add_log_with_details`]: crate::output::ScopedTestExecution::add_log_with_details
        #[macro_export]
        macro_rules! $name {
            ($artifact:expr, $msg:expr) => {
                $artifact.add_log_with_details(
                    &$crate::output::Log::builder($msg)
                        .severity($crate::output::LogSeverity::$severity)
                        .source(file!(), line!() as i32)
                        .build(),
                )
            };
        }
    };
}

pending_log!(pending_log_debug, Debug);
pending_log!(pending_log_info, Info);
pending_log!(pending_log_warning, Warning);
pending_log!(pending_log_error, Error);
pending_log!(pending_log_fatal, Fatal);
