// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::env;

use anyhow::Result;

use pending_until_fixed::output::{Config, TestRunner};
use pending_until_fixed::PendingUntilFixed;

/// Writes the report of a marked execution to a file.
#[tokio::main]
async fn main() -> Result<()> {
    let path = env::temp_dir().join("pending_until_fixed.jsonl");

    let config = Config::builder()
        .timezone(chrono_tz::Europe::Rome)
        .with_file_output(&path)
        .await?
        .build();

    let runner = TestRunner::builder().config(config).build().start().await?;
    runner
        .add_execution("memory training")
        .with_marker(PendingUntilFixed::new("RCRM-3943"))
        .run(|| assert!(1 + 1 == 3, "training timed out"))
        .await?;

    println!("report written to {}", path.display());
    print!("{}", tokio::fs::read_to_string(&path).await?);

    Ok(())
}
