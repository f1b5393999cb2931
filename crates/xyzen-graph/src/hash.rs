use std::hash::{Hash, Hasher};

use serde_json::json;
use xyzen_core::GraphConfig;

/// Hash the topology-relevant fields of a config.
///
/// Only node (id, type, name) triples, edge (from, to) pairs and the entry
/// point contribute. Metadata, node payloads, positions, labels and
/// conditions are deliberately excluded so cosmetic edits do not register
/// as structural changes.
pub fn structural_hash(config: &GraphConfig) -> u64 {
    let view = json!({
        "nodes": config
            .nodes
            .iter()
            .map(|n| json!([n.id, n.node_type.as_str(), n.name]))
            .collect::<Vec<_>>(),
        "edges": config
            .edges
            .iter()
            .map(|e| json!([e.from_node, e.to_node]))
            .collect::<Vec<_>>(),
        "entry": config.entry_point,
    });

    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    view.to_string().hash(&mut hasher);
    hasher.finish()
}
