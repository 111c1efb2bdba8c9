use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;

/// Id of the virtual root container every document hangs off
pub const CANVAS_ID: &str = "canvas";

/// Id of the palette surface; dropping onto it is never a valid target
pub const PALETTE_SURFACE_ID: &str = "sidebar-container";

/// Ids that belong to the editor chrome and can never name a node
pub const RESERVED_IDS: &[&str] = &[
    CANVAS_ID,
    PALETTE_SURFACE_ID,
    "heading",
    "button",
    "paragraph",
    "container",
    "2-columns",
    "3-columns",
];

/// Opaque node identifier, unique across the whole document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_reserved(&self) -> bool {
        RESERVED_IDS.contains(&self.0.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of fresh node ids
pub trait IdGenerator {
    fn next_id(&mut self) -> NodeId;
}

/// Random v4 UUIDs. Safe across sessions since nothing is derived from
/// the template or the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> NodeId {
        NodeId(Uuid::new_v4().to_string())
    }
}

/// Sequential `seed-N` ids, for deterministic fixtures
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    seed: String,
    count: u32,
}

impl SequentialIdGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId(format!("{}-{}", self.seed, self.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let mut gen = SequentialIdGenerator::new("node");

        let id1 = gen.next_id();
        let id2 = gen.next_id();
        let id3 = gen.next_id();

        assert_eq!(id1.as_str(), "node-1");
        assert_eq!(id2.as_str(), "node-2");
        assert_eq!(id3.as_str(), "node-3");
        assert!(id1.as_str().starts_with(gen.seed()));
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let mut gen = UuidGenerator;
        let ids: HashSet<NodeId> = (0..256).map(|_| gen.next_id()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn test_reserved_ids() {
        assert!(NodeId::from(CANVAS_ID).is_reserved());
        assert!(NodeId::from(PALETTE_SURFACE_ID).is_reserved());
        assert!(NodeId::from("2-columns").is_reserved());
        assert!(!NodeId::from("node-1").is_reserved());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = NodeId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
