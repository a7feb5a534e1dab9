//! Trace-id ancestry.
//!
//! A request that fans out into sub-requests appends a new id for each hop.
//! Everything logged downstream can then be tied back to every trace that
//! causally contributed to it.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use uuid::Uuid;

/// One distributed trace identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(Arc<str>);

impl TraceId {
    pub fn new(id: impl AsRef<str>) -> Self {
        TraceId(Arc::from(id.as_ref()))
    }

    /// Fresh random id.
    pub fn generate() -> Self {
        TraceId::new(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TraceId {
    fn from(id: &str) -> Self {
        TraceId::new(id)
    }
}

impl From<String> for TraceId {
    fn from(id: String) -> Self {
        TraceId(Arc::from(id))
    }
}

impl From<Uuid> for TraceId {
    fn from(id: Uuid) -> Self {
        TraceId::new(id.to_string())
    }
}

impl Serialize for TraceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Ordered set of trace ids, shared between derivations.
///
/// Ids keep the order they were first added in; adding an id that is
/// already present changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceIds {
    ids: Arc<[TraceId]>,
}

impl TraceIds {
    pub fn new() -> Self {
        Self {
            ids: Arc::from(Vec::new()),
        }
    }

    /// A set with `ids` appended after the current ones.
    pub fn with<I>(&self, ids: I) -> TraceIds
    where
        I: IntoIterator,
        I::Item: Into<TraceId>,
    {
        let mut merged: Vec<TraceId> = self.ids.to_vec();
        for id in ids {
            let id = id.into();
            if !merged.contains(&id) {
                merged.push(id);
            }
        }
        if merged.len() == self.ids.len() {
            return self.clone();
        }
        TraceIds {
            ids: Arc::from(merged),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|t| t.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceId> + '_ {
        self.ids.iter()
    }

    /// The most recently added id.
    pub fn last(&self) -> Option<&TraceId> {
        self.ids.last()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.ids.iter().map(ToString::to_string).collect()
    }
}

impl Default for TraceIds {
    fn default() -> Self {
        TraceIds::new()
    }
}

impl Serialize for TraceIds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter())
    }
}

impl<T: Into<TraceId>> FromIterator<T> for TraceIds {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TraceIds::new().with(iter)
    }
}
