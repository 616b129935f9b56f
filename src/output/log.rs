// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::spec;

/// A free-form log line attached to a test execution.
///
/// # Examples
///
/// ```rust
/// # use pending_until_fixed::output::*;
///
/// let log = Log::builder("flaky fan controller")
///     .severity(LogSeverity::Warning)
///     .source("file.rs", 12)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct Log {
    severity: spec::LogSeverity,
    message: String,
    source_location: Option<spec::SourceLocation>,
}

impl Log {
    pub fn builder(message: &str) -> LogBuilder {
        LogBuilder::new(message)
    }

    pub(crate) fn to_artifact(&self) -> spec::Log {
        spec::Log {
            severity: self.severity,
            message: self.message.clone(),
            source_location: self.source_location.clone(),
        }
    }
}

#[derive(Debug)]
pub struct LogBuilder {
    severity: spec::LogSeverity,
    message: String,
    source_location: Option<spec::SourceLocation>,
}

impl LogBuilder {
    fn new(message: &str) -> Self {
        LogBuilder {
            severity: spec::LogSeverity::Info,
            message: message.to_owned(),
            source_location: None,
        }
    }

    pub fn severity(mut self, value: spec::LogSeverity) -> LogBuilder {
        self.severity = value;
        self
    }

    pub fn source(mut self, file: &str, line: i32) -> LogBuilder {
        self.source_location = Some(spec::SourceLocation {
            file: file.to_owned(),
            line,
        });
        self
    }

    pub fn build(self) -> Log {
        Log {
            severity: self.severity,
            message: self.message,
            source_location: self.source_location,
        }
    }
}
