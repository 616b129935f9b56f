// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::convert::Infallible;
use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Destination for the serialized artifacts, one line per call.
#[async_trait]
pub trait Writer {
    async fn write(&self, s: &str) -> Result<(), io::Error>;
}

pub enum WriterType {
    // static dispatch for the writers shipped with the crate
    Stdout(StdoutWriter),
    File(FileWriter),
    Buffer(BufferWriter),

    Custom(Box<dyn Writer + Send + Sync + 'static>),
}

impl WriterType {
    pub(crate) async fn write(&self, s: &str) -> Result<(), io::Error> {
        use unwrap_infallible::UnwrapInfallible;

        match self {
            WriterType::Stdout(stdout) => stdout.write(s).await.unwrap_infallible(),
            WriterType::Buffer(buffer) => buffer.write(s).await.unwrap_infallible(),
            WriterType::File(file) => file.write(s).await?,
            WriterType::Custom(custom) => custom.write(s).await?,
        }
        Ok(())
    }
}

pub struct FileWriter {
    file: Mutex<fs::File>,
}

impl FileWriter {
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = fs::File::create(path).await?;
        Ok(FileWriter {
            file: Mutex::new(file),
        })
    }

    pub async fn write(&self, s: &str) -> Result<(), io::Error> {
        let mut line = String::with_capacity(s.len() + 1);
        line.push_str(s);
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

/// Collects every line in memory. Mostly useful in tests.
#[derive(Debug)]
pub struct BufferWriter {
    buffer: Arc<Mutex<Vec<String>>>,
}

impl BufferWriter {
    pub fn new(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        Self { buffer }
    }

    pub async fn write(&self, s: &str) -> Result<(), Infallible> {
        self.buffer.lock().await.push(s.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdoutWriter {}

impl StdoutWriter {
    pub fn new() -> Self {
        StdoutWriter {}
    }

    pub async fn write(&self, s: &str) -> Result<(), Infallible> {
        println!("{}", s);
        Ok(())
    }
}
