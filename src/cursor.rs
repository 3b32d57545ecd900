//! Opaque server-issued cursors.
//!
//! The server hands out two kinds of cursor: continuation cursors that scope a
//! running products query, and share cursors that address a frozen result. Both
//! are plain strings on the wire, but mixing them up is a bug, so the kind is
//! carried in the type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for cursor namespaces.
pub trait CursorKind: sealed::Sealed {
    const NAME: &'static str;
}

/// Continuation cursors: initiate and continue.
#[derive(Debug)]
pub enum Continuation {}

/// Share cursors: share and get shared.
#[derive(Debug)]
pub enum Share {}

impl sealed::Sealed for Continuation {}
impl sealed::Sealed for Share {}

impl CursorKind for Continuation {
    const NAME: &'static str = "QueryCursor";
}

impl CursorKind for Share {
    const NAME: &'static str = "ShareCursor";
}

pub struct Cursor<K> {
    value: String,
    kind: PhantomData<fn() -> K>,
}

pub type QueryCursor = Cursor<Continuation>;
pub type ShareCursor = Cursor<Share>;

impl<K> Cursor<K> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl ShareCursor {
    /// Shared results are addressed by the query's initial cursor.
    pub fn for_query(initial: &QueryCursor) -> Self {
        Self::new(initial.as_str())
    }
}

impl<K> Clone for Cursor<K> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<K> PartialEq for Cursor<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Cursor<K> {}

impl<K> Hash for Cursor<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K: CursorKind> fmt::Debug for Cursor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::NAME).field(&self.value).finish()
    }
}

impl<K> fmt::Display for Cursor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K> From<String> for Cursor<K> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<K> From<&str> for Cursor<K> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<K> AsRef<str> for Cursor<K> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<K> Serialize for Cursor<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, K> Deserialize<'de> for Cursor<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
