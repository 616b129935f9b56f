// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use assert_json_diff::assert_json_include;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::json;
use tokio::sync::Mutex;

use pending_until_fixed::output::{PendingError, ScopedTestExecution, TestRunner};
use pending_until_fixed::{
    pending_log_debug, pending_log_error, pending_log_fatal, pending_log_info, pending_log_warning,
};

use super::fixture::buffered_config;

async fn check_log<F>(expected: &serde_json::Value, func: F) -> Result<()>
where
    F: FnOnce(ScopedTestExecution) -> BoxFuture<'static, Result<(), PendingError>>
        + Send
        + 'static,
{
    let buffer: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(vec![]));
    let runner = TestRunner::builder()
        .config(buffered_config(&buffer))
        .build()
        .start()
        .await?;

    runner.add_execution("macros").scope(func).await?;

    // schemaVersion, testExecutionStart, then the log
    let lines = buffer.lock().await;
    let actual = serde_json::from_str::<serde_json::Value>(
        lines.get(2).ok_or(anyhow!("buffer is missing macro output item"))?,
    )?;
    assert_json_include!(actual: actual.clone(), expected: expected);

    let source = actual
        .get("testExecutionArtifact")
        .ok_or(anyhow!("testExecutionArtifact key does not exist"))?
        .get("log")
        .ok_or(anyhow!("log key does not exist"))?
        .get("sourceLocation")
        .ok_or(anyhow!("sourceLocation is not present in the serialized object"))?;
    assert_eq!(
        source.get("file").and_then(|f| f.as_str()),
        Some(file!()),
        "sourceLocation points outside of the calling file"
    );

    Ok(())
}

#[tokio::test]
async fn test_pending_log_debug() -> Result<()> {
    let expected = json!({
        "testExecutionArtifact": {
            "testExecutionId": "execution0",
            "log": {
                "message": "log message",
                "severity": "DEBUG"
            }
        },
        "sequenceNumber": 2
    });

    check_log(&expected, |s| {
        async move { pending_log_debug!(s, "log message").await }.boxed()
    })
    .await
}

#[tokio::test]
async fn test_pending_log_info() -> Result<()> {
    let expected = json!({
        "testExecutionArtifact": {
            "log": {
                "message": "log message",
                "severity": "INFO"
            }
        }
    });

    check_log(&expected, |s| {
        async move { pending_log_info!(s, "log message").await }.boxed()
    })
    .await
}

#[tokio::test]
async fn test_pending_log_warning() -> Result<()> {
    let expected = json!({
        "testExecutionArtifact": {
            "log": {
                "message": "log message",
                "severity": "WARNING"
            }
        }
    });

    check_log(&expected, |s| {
        async move { pending_log_warning!(s, "log message").await }.boxed()
    })
    .await
}

#[tokio::test]
async fn test_pending_log_error() -> Result<()> {
    let expected = json!({
        "testExecutionArtifact": {
            "log": {
                "message": "log message",
                "severity": "ERROR"
            }
        }
    });

    check_log(&expected, |s| {
        async move { pending_log_error!(s, "log message").await }.boxed()
    })
    .await
}

#[tokio::test]
async fn test_pending_log_fatal() -> Result<()> {
    let expected = json!({
        "testExecutionArtifact": {
            "log": {
                "message": "log message",
                "severity": "FATAL"
            }
        }
    });

    check_log(&expected, |s| {
        async move { pending_log_fatal!(s, "log message").await }.boxed()
    })
    .await
}
