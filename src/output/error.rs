// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::error::Error as StdError;
use std::io;

/// Errors raised while reporting test executions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PendingError {
    #[error("failed to write to output stream")]
    IoError(#[from] io::Error),

    #[error("failed to format input object")]
    Format(Box<dyn StdError + Send + Sync + 'static>),
}

impl From<serde_json::Error> for PendingError {
    fn from(value: serde_json::Error) -> Self {
        PendingError::Format(Box::new(value))
    }
}
