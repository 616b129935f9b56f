// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::output as pu;
use pu::writer::{self, BufferWriter, FileWriter, StdoutWriter, WriterType};

/// Source of the timestamps attached to every emitted artifact.
pub trait TimestampProvider {
    fn now(&self) -> chrono::DateTime<chrono_tz::Tz>;
}

struct ConfiguredTzProvider {
    tz: chrono_tz::Tz,
}

impl TimestampProvider for ConfiguredTzProvider {
    fn now(&self) -> chrono::DateTime<chrono_tz::Tz> {
        chrono::Utc::now().with_timezone(&self.tz)
    }
}

/// The configuration repository for the [`TestRunner`].
///
/// [`TestRunner`]: crate::output::TestRunner
pub struct Config {
    pub(crate) timestamp_provider: Box<dyn TimestampProvider + Send + Sync + 'static>,
    pub(crate) writer: WriterType,
}

impl Config {
    /// Creates a new [`ConfigBuilder`]
    ///
    /// # Examples
    /// ```rust
    /// # use pending_until_fixed::output::*;
    ///
    /// let builder = Config::builder();
    /// ```
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// The builder for the [`Config`] object.
pub struct ConfigBuilder {
    timezone: Option<chrono_tz::Tz>,
    timestamp_provider: Option<Box<dyn TimestampProvider + Send + Sync + 'static>>,
    writer: Option<WriterType>,
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            timezone: None,
            timestamp_provider: None,
            writer: None,
        }
    }

    /// Timezone of the emitted timestamps. Ignored when a custom
    /// [`TimestampProvider`] is set.
    pub fn timezone(mut self, timezone: chrono_tz::Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    pub fn with_timestamp_provider(
        mut self,
        timestamp_provider: Box<dyn TimestampProvider + Send + Sync + 'static>,
    ) -> Self {
        self.timestamp_provider = Some(timestamp_provider);
        self
    }

    pub fn with_buffer_output(mut self, buffer: Arc<Mutex<Vec<String>>>) -> Self {
        self.writer = Some(WriterType::Buffer(BufferWriter::new(buffer)));
        self
    }

    /// Sends the output to `path`, truncating the file if it exists.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # tokio_test::block_on(async {
    /// # use pending_until_fixed::output::*;
    ///
    /// let config = Config::builder()
    ///     .with_file_output("/tmp/pending.jsonl")
    ///     .await?
    ///     .build();
    ///
    /// # Ok::<(), PendingError>(())
    /// # });
    /// ```
    pub async fn with_file_output<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, pu::PendingError> {
        self.writer = Some(WriterType::File(FileWriter::new(path).await?));
        Ok(self)
    }

    pub fn with_custom_output(
        mut self,
        custom: Box<dyn writer::Writer + Send + Sync + 'static>,
    ) -> Self {
        self.writer = Some(WriterType::Custom(custom));
        self
    }

    pub fn build(self) -> Config {
        let timezone = self.timezone.unwrap_or(chrono_tz::UTC);

        Config {
            timestamp_provider: self
                .timestamp_provider
                .unwrap_or_else(|| Box::new(ConfiguredTzProvider { tz: timezone })),
            writer: self
                .writer
                .unwrap_or_else(|| WriterType::Stdout(StdoutWriter::new())),
        }
    }
}
