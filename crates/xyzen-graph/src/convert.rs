//! Pure conversions between the canonical `GraphConfig` document and the
//! node/edge arrays consumed by the interactive editor.

use xyzen_core::{
    EdgeConfig, GraphConfig, NodeConfig, Position, DEFAULT_ENTRY_POINT,
};

use crate::visual::{edge_id, VisualEdge, VisualNode};
use crate::{END, START};

/// Default canvas position for the `index`-th node of a config that carries
/// no explicit placement: left to right, staggered on two rows.
pub fn default_node_position(index: usize) -> Position {
    Position {
        x: 220.0 + index as f64 * 180.0,
        y: 150.0 + (index % 2) as f64 * 120.0,
    }
}

fn sentinel_to_pseudo(id: &str) -> String {
    match id {
        EdgeConfig::START => START.to_string(),
        EdgeConfig::END => END.to_string(),
        other => other.to_string(),
    }
}

fn pseudo_to_sentinel(id: &str) -> String {
    match id {
        START => EdgeConfig::START.to_string(),
        END => EdgeConfig::END.to_string(),
        other => other.to_string(),
    }
}

/// Build the editor's node/edge arrays from a canonical config.
///
/// Deterministic and pure. The synthetic START/END markers are always
/// present; a missing or empty config yields just those two markers on an
/// otherwise empty canvas.
pub fn config_to_visual(config: Option<&GraphConfig>) -> (Vec<VisualNode>, Vec<VisualEdge>) {
    let mut nodes = vec![VisualNode::start()];

    let Some(config) = config.filter(|c| !c.nodes.is_empty()) else {
        nodes.push(VisualNode::end());
        return (nodes, Vec::new());
    };

    for (index, node) in config.nodes.iter().enumerate() {
        let position = node
            .position
            .unwrap_or_else(|| default_node_position(index));
        nodes.push(
            VisualNode::new(&node.id, &node.name, node.node_type, position)
                .with_config(node.config.clone()),
        );
    }
    nodes.push(VisualNode::end());

    let edges = config
        .edges
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            let source = sentinel_to_pseudo(&edge.from_node);
            let target = sentinel_to_pseudo(&edge.to_node);
            VisualEdge {
                id: edge_id(&source, &target, index),
                source,
                target,
                label: edge.label.clone(),
                condition: edge.condition.clone(),
                priority: edge.priority,
                animated: edge.condition.is_some(),
            }
        })
        .collect();

    (nodes, edges)
}

/// Rebuild a canonical config from the editor's node/edge arrays.
///
/// The synthetic markers are stripped and sentinel endpoints restored. Two
/// guards protect against a not-yet-rendered canvas erasing real data:
/// an empty real node set with a non-empty `previous` returns `previous`
/// unchanged, and an empty derived edge set keeps the previous edges when
/// the previous config had some. Auxiliary fields always come from
/// `previous` when present.
pub fn visual_to_config(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    previous: Option<&GraphConfig>,
) -> GraphConfig {
    let real_nodes: Vec<&VisualNode> = nodes.iter().filter(|n| !n.is_pseudo()).collect();

    if real_nodes.is_empty() {
        if let Some(previous) = previous.filter(|p| !p.nodes.is_empty()) {
            return previous.clone();
        }
    }

    let mut config = previous.cloned().unwrap_or_default();

    config.nodes = real_nodes
        .iter()
        .map(|n| NodeConfig {
            id: n.id.clone(),
            name: n.label.clone(),
            node_type: n.node_type.unwrap_or_default(),
            config: n.config.clone(),
            position: Some(n.position),
        })
        .collect();

    let derived_edges: Vec<EdgeConfig> = edges
        .iter()
        .filter(|e| !(e.source == START && e.target == END))
        .map(|e| EdgeConfig {
            from_node: pseudo_to_sentinel(&e.source),
            to_node: pseudo_to_sentinel(&e.target),
            condition: e.condition.clone(),
            label: e.label.clone(),
            priority: e.priority,
        })
        .collect();

    let previous_had_edges = previous.is_some_and(|p| !p.edges.is_empty());
    if !derived_edges.is_empty() || !previous_had_edges {
        config.edges = derived_edges;
    }

    config.entry_point = edges
        .iter()
        .find(|e| e.source == START && e.target != END)
        .map(|e| e.target.clone())
        .or_else(|| previous.map(|p| p.entry_point.clone()))
        .or_else(|| config.nodes.first().map(|n| n.id.clone()))
        .unwrap_or_else(|| DEFAULT_ENTRY_POINT.to_string());

    config
}
