use serde_json::json;
use xyzen_core::{EdgeConfig, GraphConfig, NodeConfig, NodeType, Position};
use xyzen_graph::structural_hash;

fn base_config() -> GraphConfig {
    GraphConfig::new(
        vec![
            NodeConfig::new("agent", "Agent", NodeType::Llm),
            NodeConfig::new("tools", "Tools", NodeType::Tool),
        ],
        vec![
            EdgeConfig::new(EdgeConfig::START, "agent"),
            EdgeConfig::new("agent", "tools"),
        ],
    )
    .with_entry_point("agent")
}

#[test]
fn hash_is_stable() {
    assert_eq!(structural_hash(&base_config()), structural_hash(&base_config()));
}

#[test]
fn metadata_changes_do_not_affect_hash() {
    let a = base_config();
    let b = base_config().with_metadata("updated_at", json!("2024-06-01"));
    assert_eq!(structural_hash(&a), structural_hash(&b));
}

#[test]
fn position_and_payload_changes_do_not_affect_hash() {
    let a = base_config();
    let mut b = base_config();
    b.nodes[0].position = Some(Position::new(500.0, 500.0));
    b.nodes[1].config = json!({"tool_name": "search"});
    b.edges[1].label = Some("custom".to_string());
    assert_eq!(structural_hash(&a), structural_hash(&b));
}

#[test]
fn edge_endpoint_changes_affect_hash() {
    let a = base_config();
    let mut b = base_config();
    b.edges[1].to_node = EdgeConfig::END.to_string();
    assert_ne!(structural_hash(&a), structural_hash(&b));
}

#[test]
fn node_identity_changes_affect_hash() {
    let a = base_config();

    let mut renamed = base_config();
    renamed.nodes[0].name = "Planner".to_string();
    assert_ne!(structural_hash(&a), structural_hash(&renamed));

    let mut retyped = base_config();
    retyped.nodes[1].node_type = NodeType::Router;
    assert_ne!(structural_hash(&a), structural_hash(&retyped));
}

#[test]
fn entry_point_changes_affect_hash() {
    let a = base_config();
    let mut b = base_config();
    b.entry_point = "tools".to_string();
    assert_ne!(structural_hash(&a), structural_hash(&b));
}
