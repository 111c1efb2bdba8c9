//! JSON wire format for documents.
//!
//! A document is stored as a JSON array of root nodes:
//!
//! ```json
//! [
//!   { "id": "…", "type": "container", "content": "", "styles": {},
//!     "children": [ { "id": "…", "type": "button", "content": "Go", "styles": { "color": null } } ] }
//! ]
//! ```
//!
//! Deserialization checks the forest invariants (unique ids, no reserved
//! ids, only containers own children, nesting within [`MAX_DEPTH`]) so
//! callers never see a broken tree.

use crate::error::{ModelError, ModelResult};
use crate::node::{Node, MAX_DEPTH};
use serde_json::Value;
use std::collections::HashSet;

/// Serialize root nodes to a JSON value
pub fn serialize(nodes: &[Node]) -> ModelResult<Value> {
    Ok(serde_json::to_value(nodes)?)
}

/// Serialize root nodes to a JSON string
pub fn serialize_to_string(nodes: &[Node], pretty: bool) -> ModelResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(nodes)?
    } else {
        serde_json::to_string(nodes)?
    };
    Ok(json)
}

/// Deserialize and validate root nodes from a JSON value
pub fn deserialize(value: Value) -> ModelResult<Vec<Node>> {
    let mut nodes: Vec<Node> = serde_json::from_value(value)?;
    validate_forest(&mut nodes)?;
    Ok(nodes)
}

/// Deserialize and validate root nodes from a JSON string
pub fn deserialize_str(source: &str) -> ModelResult<Vec<Node>> {
    let mut nodes: Vec<Node> = serde_json::from_str(source)?;
    validate_forest(&mut nodes)?;
    Ok(nodes)
}

fn validate_forest(roots: &mut [Node]) -> ModelResult<()> {
    let mut seen = HashSet::new();
    let mut stack: Vec<(&mut Node, usize)> = roots.iter_mut().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_DEPTH {
            return Err(ModelError::TooDeep {
                id: node.id.to_string(),
                max: MAX_DEPTH,
            });
        }
        if node.id.is_reserved() {
            return Err(ModelError::reserved_id(node.id.as_str()));
        }
        if !seen.insert(node.id.clone()) {
            return Err(ModelError::duplicate_id(node.id.as_str()));
        }

        node.normalize()?;
        if let Some(children) = node.children.as_mut() {
            stack.extend(children.iter_mut().map(|child| (child, depth + 1)));
        }
    }

    Ok(())
}
