// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use pending_until_fixed::output::{Config, PendingError, TestRunner, Writer};
use pending_until_fixed::PendingUntilFixed;

use super::fixture::*;

struct CollectingWriter {
    lines: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Writer for CollectingWriter {
    async fn write(&self, s: &str) -> Result<(), io::Error> {
        self.lines.lock().await.push(s.to_owned());
        Ok(())
    }
}

/// Accepts the preamble, then refuses every write.
struct FullDiskWriter {
    writes: Mutex<usize>,
}

#[async_trait]
impl Writer for FullDiskWriter {
    async fn write(&self, _s: &str) -> Result<(), io::Error> {
        let mut writes = self.writes.lock().await;
        *writes += 1;
        if *writes > 1 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_custom_writer_receives_every_line() -> Result<()> {
    let lines = Arc::new(Mutex::new(vec![]));

    let runner = TestRunner::builder()
        .config(
            Config::builder()
                .with_timestamp_provider(Box::new(FixedTsProvider {}))
                .with_custom_output(Box::new(CollectingWriter {
                    lines: Arc::clone(&lines),
                }))
                .build(),
        )
        .build()
        .start()
        .await?;

    runner
        .add_execution("known bug")
        .with_marker(PendingUntilFixed::new("RCRM-3943"))
        .run(|| Err::<(), _>("still broken"))
        .await?;

    let lines = lines.lock().await;
    assert_eq!(lines.len(), 3);
    assert!(lines[2].contains("\"status\":\"SKIP\""));

    Ok(())
}

#[tokio::test]
async fn test_writer_failure_surfaces_from_execution() -> Result<()> {
    let runner = TestRunner::builder()
        .config(
            Config::builder()
                .with_custom_output(Box::new(FullDiskWriter {
                    writes: Mutex::new(0),
                }))
                .build(),
        )
        .build()
        .start()
        .await?;

    let result = runner.add_execution("unreported").run(|| {}).await;
    match result {
        Err(PendingError::IoError(e)) => assert_eq!(e.kind(), io::ErrorKind::WriteZero),
        other => panic!("unexpected result: {other:?}"),
    }

    Ok(())
}
