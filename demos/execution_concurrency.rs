// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use futures::FutureExt;

use pending_until_fixed::output::TestRunner;
use pending_until_fixed::PendingUntilFixed;

/// Marked executions running in parallel each keep their own flags: the
/// failing ones are skipped, the passing ones fail.
#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> Result<()> {
    let runner = Arc::new(TestRunner::new().start().await?);

    let tasks = (0..6)
        .map(|i| {
            tokio::spawn({
                let runner = Arc::clone(&runner);
                async move {
                    runner
                        .add_execution(&format!("fan{}", i))
                        .with_marker(PendingUntilFixed::new("RCRM-3943"))
                        .scope(move |_s| {
                            async move {
                                let offset = rand::random::<u64>() % 10000;
                                tokio::time::sleep(Duration::from_micros(offset)).await;

                                // odd fans are already fixed
                                assert!(i % 2 == 1, "fan{} stalled", i);
                            }
                            .boxed()
                        })
                        .await
                }
            })
        })
        .collect::<Vec<_>>();

    for t in tasks {
        let outcome = t.await??;
        eprintln!("{:?}: {:?}", outcome.status, outcome.message);
    }

    Ok(())
}
