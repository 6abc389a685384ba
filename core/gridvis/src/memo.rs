//! FILENAME: core/gridvis/src/memo.rs
//! PURPOSE: Single-value memo slots keyed by their exact inputs.
//! CONTEXT: Each derived value of the pipeline lives in one slot. The slot
//! keeps an owned copy of the inputs it was computed from together with
//! their fingerprint. The fingerprint is checked first; a hit additionally
//! requires the inputs to compare equal, so a hash collision recomputes
//! instead of handing out a stale value.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use gridvis_model::{fingerprint, Fingerprint};

use crate::logging::log_debug;

/// Borrowed memo inputs that can be compared with, and turned into, the
/// owned key stored in a slot.
pub trait MemoKey: Hash {
    type Owned;

    fn matches(&self, owned: &Self::Owned) -> bool;

    fn to_owned_key(&self) -> Self::Owned;
}

impl<A> MemoKey for &A
where
    A: ?Sized + ToOwned + PartialEq + Hash,
{
    type Owned = A::Owned;

    fn matches(&self, owned: &A::Owned) -> bool {
        *self == Borrow::<A>::borrow(owned)
    }

    fn to_owned_key(&self) -> A::Owned {
        A::to_owned(*self)
    }
}

impl<A, B> MemoKey for (&A, &B)
where
    A: ?Sized + ToOwned + PartialEq + Hash,
    B: ?Sized + ToOwned + PartialEq + Hash,
{
    type Owned = (A::Owned, B::Owned);

    fn matches(&self, owned: &Self::Owned) -> bool {
        self.0 == Borrow::<A>::borrow(&owned.0) && self.1 == Borrow::<B>::borrow(&owned.1)
    }

    fn to_owned_key(&self) -> Self::Owned {
        (A::to_owned(self.0), B::to_owned(self.1))
    }
}

impl<A, B, C> MemoKey for (&A, &B, &C)
where
    A: ?Sized + ToOwned + PartialEq + Hash,
    B: ?Sized + ToOwned + PartialEq + Hash,
    C: ?Sized + ToOwned + PartialEq + Hash,
{
    type Owned = (A::Owned, B::Owned, C::Owned);

    fn matches(&self, owned: &Self::Owned) -> bool {
        self.0 == Borrow::<A>::borrow(&owned.0)
            && self.1 == Borrow::<B>::borrow(&owned.1)
            && self.2 == Borrow::<C>::borrow(&owned.2)
    }

    fn to_owned_key(&self) -> Self::Owned {
        (A::to_owned(self.0), B::to_owned(self.1), C::to_owned(self.2))
    }
}

#[derive(Debug)]
pub struct Memo<K, T> {
    name: &'static str,
    key: Option<(Fingerprint, K)>,
    value: Option<Arc<T>>,
}

impl<K, T> Memo<K, T> {
    pub fn new(name: &'static str) -> Self {
        Memo {
            name,
            key: None,
            value: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when the slot holds a value computed from exactly `key`.
    pub fn is_fresh<Q>(&self, key: &Q) -> bool
    where
        Q: MemoKey<Owned = K>,
    {
        self.value.is_some() && self.holds(fingerprint(key), key)
    }

    fn holds<Q>(&self, fp: Fingerprint, key: &Q) -> bool
    where
        Q: MemoKey<Owned = K>,
    {
        match &self.key {
            Some((cached_fp, cached)) => *cached_fp == fp && key.matches(cached),
            None => false,
        }
    }

    /// Returns the cached value for `key`, computing it first when the
    /// inputs changed. The flag reports whether `compute` ran.
    pub fn get_or_compute<Q, F>(&mut self, key: Q, compute: F) -> (Arc<T>, bool)
    where
        Q: MemoKey<Owned = K>,
        F: FnOnce() -> T,
    {
        match self.get_or_try_compute::<_, _, std::convert::Infallible>(key, || Ok(compute())) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Like `get_or_compute`, for computations that can fail. A failure
    /// leaves the slot empty.
    pub fn get_or_try_compute<Q, F, E>(&mut self, key: Q, compute: F) -> Result<(Arc<T>, bool), E>
    where
        Q: MemoKey<Owned = K>,
        F: FnOnce() -> Result<T, E>,
    {
        let fp = fingerprint(&key);
        if let Some(value) = &self.value {
            if self.holds(fp, &key) {
                log_debug!("MEMO", "{} reused", self.name);
                return Ok((Arc::clone(value), false));
            }
        }

        self.invalidate();
        let value = Arc::new(compute()?);
        self.key = Some((fp, key.to_owned_key()));
        self.value = Some(Arc::clone(&value));
        log_debug!("MEMO", "{} recomputed", self.name);
        Ok((value, true))
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.value = None;
    }
}
