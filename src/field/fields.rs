//! Persistent field sequence.
//!
//! `Fields` is a chain of immutable segments shared through `Arc`. Appending
//! creates one new segment pointing at the previous tail, so a derived
//! logger costs one allocation no matter how many fields its ancestors
//! carry, and the ancestors are never touched.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::field::{Field, Value};

struct Segment {
    parent: Option<Arc<Segment>>,
    items: Box<[Field]>,
    /// Raw field count up to and including this segment.
    total: usize,
}

impl Drop for Segment {
    fn drop(&mut self) {
        // Unlink iteratively so long derivation chains cannot overflow the stack.
        let mut next = self.parent.take();
        while let Some(segment) = next {
            match Arc::try_unwrap(segment) {
                Ok(mut segment) => next = segment.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Ordered, append-only collection of fields with last-write-wins reads.
#[derive(Clone, Default)]
pub struct Fields {
    tail: Option<Arc<Segment>>,
}

impl Fields {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new collection with `fields` appended; `self` is unchanged.
    pub fn appended<I>(&self, fields: I) -> Fields
    where
        I: IntoIterator<Item = Field>,
    {
        let items: Box<[Field]> = fields.into_iter().collect();
        if items.is_empty() {
            return self.clone();
        }
        let total = self.raw_len() + items.len();
        Fields {
            tail: Some(Arc::new(Segment {
                parent: self.tail.clone(),
                items,
                total,
            })),
        }
    }

    /// Number of stored fields, shadowed duplicates included.
    pub fn raw_len(&self) -> usize {
        self.tail.as_ref().map(|s| s.total).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.resolved().len()
    }

    /// Every stored field in insertion order, shadowed duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &Field> + '_ {
        let mut segments = Vec::new();
        let mut current = self.tail.as_deref();
        while let Some(segment) = current {
            segments.push(segment);
            current = segment.parent.as_deref();
        }
        segments.into_iter().rev().flat_map(|s| s.items.iter())
    }

    fn iter_rev(&self) -> impl Iterator<Item = &Field> + '_ {
        let mut current = self.tail.as_deref();
        std::iter::from_fn(move || {
            let segment = current?;
            current = segment.parent.as_deref();
            Some(segment)
        })
        .flat_map(|s| s.items.iter().rev())
    }

    /// The effective field for `key` (the last one written).
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.iter_rev().find(|f| f.key() == key)
    }

    /// The effective value for `key`.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).map(Field::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Effective fields in insertion order; for a duplicated key only the
    /// last write is kept, at the position it was written.
    pub fn resolved(&self) -> Vec<&Field> {
        let mut seen = HashSet::new();
        let mut out: Vec<&Field> = self.iter_rev().filter(|f| seen.insert(f.key())).collect();
        out.reverse();
        out
    }

    /// Effective keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.resolved().into_iter().map(Field::key).collect()
    }

    /// Owned copy of the effective fields.
    pub fn to_vec(&self) -> Vec<Field> {
        self.resolved().into_iter().cloned().collect()
    }

    /// Whether both collections share the same backing storage.
    pub fn ptr_eq(&self, other: &Fields) -> bool {
        match (&self.tail, &other.tail) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for Fields {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.resolved() == other.resolved()
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.resolved().into_iter().map(|field| (field.key(), field.value())))
            .finish()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Fields::new().appended(iter)
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Fields::new().appended(fields)
    }
}
