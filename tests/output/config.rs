// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;

use anyhow::Result;
use assert_fs::prelude::*;
use assert_json_diff::assert_json_eq;
use predicates::prelude::*;

use pending_until_fixed::output::{Config, TestRunner};
use pending_until_fixed::PendingUntilFixed;

use super::fixture::*;

#[tokio::test]
async fn test_config_builder_with_file() -> Result<()> {
    let expected = [
        json_schema_version(),
        json_pending_start("execution0", "rounding", "RCRM-3943", 1),
        json_execution_skip(
            "execution0",
            "pending until fixed (RCRM-3943): rounds half to even",
            2,
        ),
    ];

    let fs = assert_fs::TempDir::new()?;
    let output_file = fs.child("output.jsonl");

    let runner = TestRunner::builder()
        .config(
            Config::builder()
                .timezone(chrono_tz::Europe::Rome)
                .with_timestamp_provider(Box::new(FixedTsProvider {}))
                .with_file_output(output_file.path())
                .await?
                .build(),
        )
        .build()
        .start()
        .await?;

    runner
        .add_execution("rounding")
        .with_marker(PendingUntilFixed::new("RCRM-3943"))
        .run(|| assert!(2.5f64.round() == 2.0, "rounds half to even"))
        .await?;

    output_file.assert(predicate::path::exists());
    let content = fs::read_to_string(output_file.path())?;

    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), expected.len());
    for (i, entry) in lines.iter().enumerate() {
        let value = serde_json::from_str::<serde_json::Value>(entry)?;
        assert_json_eq!(value, expected[i]);
    }

    Ok(())
}

#[tokio::test]
async fn test_file_output_truncates_existing_file() -> Result<()> {
    let fs = assert_fs::TempDir::new()?;
    let output_file = fs.child("output.jsonl");
    output_file.write_str("stale line\n")?;

    TestRunner::builder()
        .config(
            Config::builder()
                .with_timestamp_provider(Box::new(FixedTsProvider {}))
                .with_file_output(output_file.path())
                .await?
                .build(),
        )
        .build()
        .start()
        .await?;

    output_file.assert(predicate::str::contains("stale line").not());
    output_file.assert(predicate::str::starts_with("{\"schemaVersion\""));

    Ok(())
}

#[tokio::test]
async fn test_file_output_in_missing_directory_fails() -> Result<()> {
    let fs = assert_fs::TempDir::new()?;
    let output_file = fs.child("missing").child("output.jsonl");

    let result = Config::builder().with_file_output(output_file.path()).await;
    assert!(result.is_err());
    output_file.assert(predicate::path::missing());

    Ok(())
}
