// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

type Entries = HashMap<(Namespace, String), Box<dyn Any + Send + Sync>>;

/// Partition of an [`ExecutionStore`].
///
/// Extensions pick their own namespace so that keys of different extensions
/// never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace from any displayable part, usually the unique id
    /// of the running execution.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pending_until_fixed::extension::*;
    ///
    /// let ns = Namespace::create(ExecutionId::new("execution0"));
    /// assert_eq!(ns.as_str(), "execution0");
    /// ```
    pub fn create<T: fmt::Display>(part: T) -> Self {
        Namespace(part.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("value stored under `{key}` in namespace `{namespace}` is not a `{expected}`")]
    TypeMismatch {
        namespace: String,
        key: String,
        expected: &'static str,
    },
}

/// Key/value storage owned by a single test execution.
///
/// The store is created together with its [`ExtensionContext`] and dropped with
/// it, so nothing written here outlives the execution or leaks into another one.
///
/// [`ExtensionContext`]: crate::extension::ExtensionContext
#[derive(Default)]
pub struct ExecutionStore {
    entries: Mutex<Entries>,
}

impl ExecutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of this store restricted to `namespace`.
    pub fn namespace(&self, namespace: Namespace) -> Store<'_> {
        Store {
            namespace,
            entries: &self.entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl fmt::Debug for ExecutionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionStore")
            .field("len", &lock(&self.entries).len())
            .finish()
    }
}

// entries are only ever replaced whole, a poisoned lock still guards consistent data
fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A namespaced view over an [`ExecutionStore`].
pub struct Store<'a> {
    namespace: Namespace,
    entries: &'a Mutex<Entries>,
}

impl Store<'_> {
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Looks up the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing was stored yet and
    /// [`StoreError::TypeMismatch`] when the stored value is not a `V`.
    pub fn get<V>(&self, key: impl AsRef<str>) -> Result<Option<V>, StoreError>
    where
        V: Clone + 'static,
    {
        let key = key.as_ref();
        let entries = lock(self.entries);

        match entries.get(&(self.namespace.clone(), key.to_owned())) {
            None => Ok(None),
            Some(value) => self.downcast(key, &**value).map(Some),
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put<V>(&self, key: impl AsRef<str>, value: V)
    where
        V: Send + Sync + 'static,
    {
        lock(self.entries).insert(
            (self.namespace.clone(), key.as_ref().to_owned()),
            Box::new(value),
        );
    }

    /// Returns the value stored under `key`, computing and storing it with
    /// `default` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pending_until_fixed::extension::*;
    ///
    /// let store = ExecutionStore::new();
    /// let ns = store.namespace(Namespace::create("execution0"));
    ///
    /// assert!(!ns.get_or_compute_if_absent("flag", |_| false)?);
    /// ns.put("flag", true);
    /// assert!(ns.get_or_compute_if_absent("flag", |_| false)?);
    ///
    /// # Ok::<(), StoreError>(())
    /// ```
    pub fn get_or_compute_if_absent<V, F>(
        &self,
        key: impl AsRef<str>,
        default: F,
    ) -> Result<V, StoreError>
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce(&str) -> V,
    {
        let key = key.as_ref();
        let mut entries = lock(self.entries);

        let value = entries
            .entry((self.namespace.clone(), key.to_owned()))
            .or_insert_with(|| Box::new(default(key)));

        self.downcast(key, &**value)
    }

    fn downcast<V>(&self, key: &str, value: &(dyn Any + Send + Sync)) -> Result<V, StoreError>
    where
        V: Clone + 'static,
    {
        value
            .downcast_ref::<V>()
            .cloned()
            .ok_or_else(|| StoreError::TypeMismatch {
                namespace: self.namespace.to_string(),
                key: key.to_owned(),
                expected: any::type_name::<V>(),
            })
    }
}
