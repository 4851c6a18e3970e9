//! Structural hashing and hash-once sharing.
//!
//! Every node derives `Hash`, so hashing is structural and deterministic for
//! a given process. Hashing a large resource walks the whole tree; when a
//! node is used repeatedly as a map key, wrap it in [`Frozen`] to pay that
//! cost once.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Hashes `value` with the standard library's default hasher.
pub fn structural_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A shared immutable node together with its precomputed structural hash.
///
/// ```
/// use atrius_fhir_model::frozen::{Frozen, structural_hash};
/// use atrius_fhir_model::prelude::*;
///
/// let coding = Coding::builder().code(Code::from("login")).build().unwrap();
/// let frozen = Frozen::new(coding.clone());
/// assert_eq!(frozen.hash_value(), structural_hash(&coding));
/// assert_eq!(*frozen, coding);
/// ```
pub struct Frozen<T> {
    inner: Arc<T>,
    hash: u64,
}

impl<T: Hash> Frozen<T> {
    pub fn new(value: T) -> Self {
        let hash = structural_hash(&value);
        Self {
            inner: Arc::new(value),
            hash,
        }
    }
}

impl<T> Frozen<T> {
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    /// Returns the node, cloning it only if other handles still share it.
    pub fn into_inner(self) -> T
    where
        T: Clone,
    {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            hash: self.hash,
        }
    }
}

impl<T: PartialEq> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && (Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner)
    }
}

impl<T: Eq> Eq for Frozen<T> {}

impl<T> Hash for Frozen<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frozen")
            .field("hash", &self.hash)
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::collections::HashSet;

    fn coding(code: &str) -> Coding {
        Coding::builder().code(Code::from(code)).build().unwrap()
    }

    #[test]
    fn test_equal_nodes_hash_equal() {
        assert_eq!(structural_hash(&coding("a")), structural_hash(&coding("a")));
        assert_ne!(structural_hash(&coding("a")), structural_hash(&coding("b")));
    }

    #[test]
    fn test_frozen_as_set_key() {
        let mut set = HashSet::new();
        set.insert(Frozen::new(coding("a")));
        set.insert(Frozen::new(coding("a")));
        set.insert(Frozen::new(coding("b")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_into_inner_when_shared() {
        let frozen = Frozen::new(coding("a"));
        let other = frozen.clone();
        assert_eq!(frozen.into_inner(), coding("a"));
        assert_eq!(other.code().and_then(|c| c.as_str()), Some("a"));
    }
}
