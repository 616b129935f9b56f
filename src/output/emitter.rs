// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::output::config::{Config, TimestampProvider};
use crate::output::error::PendingError;
use crate::output::writer::WriterType;
use crate::spec;

/// Serializes artifacts into JSON lines, stamping each one with the
/// current time and the next sequence number.
pub(crate) struct JsonEmitter {
    timestamp_provider: Box<dyn TimestampProvider + Send + Sync + 'static>,
    writer: WriterType,
    seqno: AtomicU64,
}

impl JsonEmitter {
    pub(crate) fn new(config: Config) -> Self {
        JsonEmitter {
            timestamp_provider: config.timestamp_provider,
            writer: config.writer,
            seqno: AtomicU64::new(0),
        }
    }

    fn next_seqno(&self) -> u64 {
        self.seqno.fetch_add(1, Ordering::AcqRel)
    }

    fn serialize(&self, object: &spec::RootImpl) -> Result<String, PendingError> {
        let root = spec::Root {
            artifact: object.clone(),
            timestamp: self.timestamp_provider.now(),
            seqno: self.next_seqno(),
        };

        Ok(serde_json::to_string(&root)?)
    }

    pub(crate) async fn emit(&self, object: &spec::RootImpl) -> Result<(), PendingError> {
        let line = self.serialize(object)?;
        self.writer.write(&line).await?;
        Ok(())
    }
}
