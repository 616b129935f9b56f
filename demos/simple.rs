// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;
use futures::FutureExt;

use pending_until_fixed::output::{self as pu, PendingError, TestRunner};
use pending_until_fixed::{pending_log_info, pending_log_warning, PendingUntilFixed};

macro_rules! run_demo {
    ($name: ident) => {
        println!("{}", format!("{:->width$}", "", width = 80));
        println!("{}", stringify!($name));
        println!("{}", format!("{:->width$}", "", width = 80));

        let _ = $name().await;
        println!();
    };
}

fn fan_rpm(duty_cycle: u32) -> u32 {
    // known bug: the curve saturates early
    (duty_cycle * 60).min(3000)
}

/// A marked test that still fails is reported as skipped.
async fn demo_pending_failure_is_skipped() -> Result<()> {
    let runner = TestRunner::new().start().await?;

    let outcome = runner
        .add_execution("fan curve at full duty")
        .with_marker(PendingUntilFixed::new("RCRM-3943"))
        .run(|| assert_eq!(fan_rpm(100), 6000))
        .await?;

    eprintln!("status: {:?}, result: {:?}", outcome.status, outcome.result);
    Ok(())
}

/// A marked test that passes fails, asking for the marker to be removed.
async fn demo_pending_pass_fails() -> Result<()> {
    let runner = TestRunner::new().start().await?;

    let outcome = runner
        .add_execution("fan curve at half duty")
        .with_marker(PendingUntilFixed::new("RCRM-3943"))
        .run(|| assert_eq!(fan_rpm(50), 3000))
        .await?;

    eprintln!("message: {}", outcome.message.unwrap_or_default());
    Ok(())
}

/// Scoped executions can log while they run, marked or not.
async fn demo_scoped_with_logs() -> Result<()> {
    let runner = TestRunner::new().start().await?;

    runner
        .add_execution("healthy fan")
        .scope(|s| {
            async move {
                pending_log_info!(s, "spinning up fan0").await?;
                s.add_log(pu::LogSeverity::Debug, "fan0 at 1200rpm").await?;
                Ok::<(), PendingError>(())
            }
            .boxed()
        })
        .await?;

    runner
        .add_execution("fan curve at full duty")
        .with_marker(PendingUntilFixed::new("RCRM-3943"))
        .scope(|s| {
            async move {
                pending_log_warning!(s, "fan curve is known to saturate").await?;
                assert_eq!(fan_rpm(100), 6000);
                Ok::<(), PendingError>(())
            }
            .boxed()
        })
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    run_demo!(demo_pending_failure_is_skipped);
    run_demo!(demo_pending_pass_fails);
    run_demo!(demo_scoped_with_logs);
}
