// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outcome reporting for test executions, as JSON lines.

mod config;
mod emitter;
mod error;
mod execution;
mod log;
mod macros;
mod runner;
mod writer;

pub use config::*;
pub use error::*;
pub use execution::*;
pub use log::*;
pub use runner::*;
pub use writer::*;

pub use crate::spec::LogSeverity;
pub use crate::spec::TestResult;
pub use crate::spec::TestStatus;
pub use crate::spec::SPEC_VERSION;
