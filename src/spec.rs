// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::DateTime;
use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;

pub const SPEC_VERSION: (i8, i8) = (1, 0);

mod rfc3339_format {
    use chrono::DateTime;
    use chrono::SecondsFormat;
    use serde::Deserialize;

    pub fn serialize<S>(date: &DateTime<chrono_tz::Tz>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = date.to_rfc3339_opts(SecondsFormat::Millis, true);
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<chrono_tz::Tz>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let dt = DateTime::parse_from_rfc3339(&s).map_err(serde::de::Error::custom)?;
        Ok(dt.with_timezone(&chrono_tz::Tz::UTC))
    }
}

/// Represents the final execution status of a test.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename = "testStatus")]
#[non_exhaustive]
pub enum TestStatus {
    #[serde(rename = "COMPLETE")]
    Complete,
    #[serde(rename = "SKIP")]
    Skip,
}

/// Represents the final outcome of a test execution.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename = "testResult")]
#[non_exhaustive]
pub enum TestResult {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "NOT_APPLICABLE")]
    NotApplicable,
}

/// Known log severity variants.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogSeverity {
    #[serde(rename = "DEBUG")]
    Debug,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "FATAL")]
    Fatal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Root {
    #[serde(flatten)]
    pub artifact: RootImpl,

    #[serde(rename = "timestamp")]
    #[serde(with = "rfc3339_format")]
    pub timestamp: DateTime<chrono_tz::Tz>,

    #[serde(rename = "sequenceNumber")]
    pub seqno: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub enum RootImpl {
    #[serde(rename = "schemaVersion")]
    SchemaVersion(SchemaVersion),

    #[serde(rename = "testExecutionArtifact")]
    TestExecutionArtifact(TestExecutionArtifact),
}

/// Low-level model for the `schemaVersion` object.
/// Specifies the version that should be used to interpret following json outputs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename = "schemaVersion")]
pub struct SchemaVersion {
    #[serde(rename = "major")]
    pub major: i8,

    #[serde(rename = "minor")]
    pub minor: i8,
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion {
            major: SPEC_VERSION.0,
            minor: SPEC_VERSION.1,
        }
    }
}

/// Low-level model for the `testExecutionArtifact` object.
/// Container for everything reported about a single test execution.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TestExecutionArtifact {
    #[serde(rename = "testExecutionId")]
    pub id: String,

    #[serde(flatten)]
    pub artifact: TestExecutionArtifactImpl,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub enum TestExecutionArtifactImpl {
    #[serde(rename = "testExecutionStart")]
    TestExecutionStart(TestExecutionStart),

    #[serde(rename = "testExecutionEnd")]
    TestExecutionEnd(TestExecutionEnd),

    #[serde(rename = "log")]
    Log(Log),
}

/// Low-level model for the `testExecutionStart` object.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename = "testExecutionStart")]
pub struct TestExecutionStart {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "markers")]
    pub markers: Option<Vec<Marker>>,
}

/// Markers attached to a test execution, echoed for traceability only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Marker {
    #[serde(rename = "pendingUntilFixed")]
    PendingUntilFixed {
        #[serde(rename = "issue")]
        issue: String,
    },
}

/// Low-level model for the `testExecutionEnd` object.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename = "testExecutionEnd")]
pub struct TestExecutionEnd {
    #[serde(rename = "status")]
    pub status: TestStatus,

    #[serde(rename = "result")]
    pub result: TestResult,

    #[serde(rename = "message")]
    pub message: Option<String>,
}

/// Low-level model for the `log` object.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename = "log")]
pub struct Log {
    #[serde(rename = "severity")]
    pub severity: LogSeverity,

    #[serde(rename = "message")]
    pub message: String,

    #[serde(rename = "sourceLocation")]
    pub source_location: Option<SourceLocation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename = "sourceLocation")]
pub struct SourceLocation {
    #[serde(rename = "file")]
    pub file: String,

    #[serde(rename = "line")]
    pub line: i32,
}
