// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::io;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use pending_until_fixed::output::{Config, TestRunner, Writer};
use pending_until_fixed::PendingUntilFixed;

struct Channel {
    tx: mpsc::Sender<String>,
}

#[async_trait]
impl Writer for Channel {
    async fn write(&self, s: &str) -> Result<(), io::Error> {
        self.tx.send(s.to_owned()).await.map_err(io::Error::other)?;
        Ok(())
    }
}

/// Forwards every output line through a channel to another task.
#[tokio::main]
async fn main() -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<String>(1);
    let task = tokio::spawn(async move {
        while let Some(s) = rx.recv().await {
            println!("received: {}", s);
        }
    });

    {
        let config = Config::builder()
            .with_custom_output(Box::new(Channel { tx }))
            .build();

        let runner = TestRunner::builder().config(config).build().start().await?;
        runner
            .add_execution("channel")
            .with_marker(PendingUntilFixed::new("RCRM-3943"))
            .run(|| Err::<(), _>("sensor offline"))
            .await?;
    }

    // the runner is gone, so is the sender
    task.await?;
    Ok(())
}
