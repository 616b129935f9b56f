// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt;

use crate::extension::store::{ExecutionStore, Namespace, Store};

/// Stable unique identity of one test execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExecutionId(String);

impl ExecutionId {
    pub fn new(id: &str) -> Self {
        ExecutionId(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle given to the hooks of a single test execution.
///
/// Each context owns the [`ExecutionStore`] of its execution. Hooks reach it
/// through [`ExtensionContext::store`], and it is dropped together with the
/// context once the execution has been finalized.
#[derive(Debug)]
pub struct ExtensionContext {
    unique_id: ExecutionId,
    display_name: String,
    store: ExecutionStore,
}

impl ExtensionContext {
    /// Creates the context of a new execution, with an empty store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pending_until_fixed::extension::*;
    ///
    /// let ctx = ExtensionContext::new(ExecutionId::new("execution0"), "known bug");
    /// assert_eq!(ctx.unique_id().as_str(), "execution0");
    /// assert_eq!(ctx.display_name(), "known bug");
    /// ```
    pub fn new(unique_id: ExecutionId, display_name: &str) -> Self {
        ExtensionContext {
            unique_id,
            display_name: display_name.to_owned(),
            store: ExecutionStore::new(),
        }
    }

    pub fn unique_id(&self) -> &ExecutionId {
        &self.unique_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the part of this execution's store reserved for `namespace`.
    pub fn store(&self, namespace: Namespace) -> Store<'_> {
        self.store.namespace(namespace)
    }

    #[cfg(test)]
    pub(crate) fn execution_store(&self) -> &ExecutionStore {
        &self.store
    }
}
