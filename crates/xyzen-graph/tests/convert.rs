use serde_json::json;
use xyzen_core::{
    EdgeCondition, EdgeConfig, GraphConfig, NodeConfig, NodeType, Position,
};
use xyzen_graph::{
    config_to_visual, default_node_position, structural_hash, visual_to_config, END, START,
    END_POSITION, START_POSITION,
};

fn sample_config() -> GraphConfig {
    let mut config = GraphConfig::new(
        vec![
            NodeConfig::new("agent", "Agent", NodeType::Llm),
            NodeConfig::new("tools", "Tools", NodeType::Tool),
        ],
        vec![
            EdgeConfig::new(EdgeConfig::START, "agent"),
            EdgeConfig::new("agent", "tools")
                .with_condition(EdgeCondition::tag("has_tool_calls")),
            EdgeConfig::new("tools", "agent"),
            EdgeConfig::new("agent", EdgeConfig::END)
                .with_condition(EdgeCondition::branch("END"))
                .with_priority(1),
        ],
    )
    .with_entry_point("agent")
    .with_metadata("owner", json!("demo"));
    config.execution_timeout = Some(60);
    config
}

#[test]
fn null_config_yields_empty_canvas() {
    let (nodes, edges) = config_to_visual(None);

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, START);
    assert_eq!(nodes[1].id, END);
    assert!(!nodes[0].deletable);
    assert!(!nodes[1].deletable);
    assert_eq!(nodes[0].position, START_POSITION);
    assert_eq!(nodes[1].position, END_POSITION);
    assert!(edges.is_empty());
}

#[test]
fn empty_config_yields_empty_canvas() {
    let (nodes, edges) = config_to_visual(Some(&GraphConfig::default()));
    assert_eq!(nodes.len(), 2);
    assert!(edges.is_empty());
}

#[test]
fn config_maps_to_markers_plus_real_nodes() {
    let config = sample_config();
    let (nodes, edges) = config_to_visual(Some(&config));

    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0].id, START);
    assert_eq!(nodes[1].id, "agent");
    assert_eq!(nodes[2].id, "tools");
    assert_eq!(nodes[3].id, END);
    assert_eq!(nodes[1].node_type, Some(NodeType::Llm));
    assert_eq!(nodes[1].label, "Agent");

    assert_eq!(edges.len(), 4);
    assert_eq!(edges[0].source, START);
    assert_eq!(edges[0].target, "agent");
    assert_eq!(edges[3].target, END);
    assert!(edges[1].animated, "conditional edge should be animated");
    assert!(!edges[0].animated);
}

#[test]
fn missing_positions_get_staggered_defaults() {
    let config = sample_config();
    let (nodes, _) = config_to_visual(Some(&config));

    assert_eq!(nodes[1].position, default_node_position(0));
    assert_eq!(nodes[2].position, default_node_position(1));
    assert_ne!(nodes[1].position, nodes[2].position);

    // an explicit position wins over the default
    let mut config = config;
    config.nodes[0].position = Some(Position::new(42.0, 7.0));
    let (nodes, _) = config_to_visual(Some(&config));
    assert_eq!(nodes[1].position, Position::new(42.0, 7.0));
}

#[test]
fn display_label_prefers_explicit_label() {
    let mut config = sample_config();
    config.edges[1].label = Some("Custom".to_string());
    let (_, edges) = config_to_visual(Some(&config));

    assert_eq!(edges[1].display_label(), Some("Custom"));
    // without an explicit label the condition tag shows through
    assert_eq!(edges[3].display_label(), Some("END"));
    assert_eq!(edges[0].display_label(), None);
}

#[test]
fn round_trip_preserves_structure_and_aux_fields() {
    let config = sample_config();
    let (nodes, edges) = config_to_visual(Some(&config));
    let back = visual_to_config(&nodes, &edges, Some(&config));

    assert_eq!(structural_hash(&back), structural_hash(&config));
    assert_eq!(back.entry_point, "agent");
    assert_eq!(back.edges, config.edges);
    assert_eq!(
        back.nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
        vec!["agent", "tools"]
    );
    // aux passthrough
    assert_eq!(back.version, config.version);
    assert_eq!(back.metadata, config.metadata);
    assert_eq!(back.execution_timeout, Some(60));
    // positions materialize on the way back
    assert_eq!(back.nodes[0].position, Some(default_node_position(0)));
}

#[test]
fn empty_canvas_never_wipes_previous_config() {
    let previous = sample_config();
    let (nodes, edges) = config_to_visual(None);

    let result = visual_to_config(&nodes, &edges, Some(&previous));
    assert_eq!(result, previous);
}

#[test]
fn empty_derived_edges_keep_previous_edges() {
    let previous = sample_config();
    let (nodes, _) = config_to_visual(Some(&previous));

    let result = visual_to_config(&nodes, &[], Some(&previous));
    assert_eq!(result.edges, previous.edges);
    assert_eq!(result.nodes.len(), 2);
}

#[test]
fn start_end_shortcut_edges_are_dropped() {
    let config = sample_config();
    let (nodes, mut edges) = config_to_visual(Some(&config));
    edges.push(xyzen_graph::VisualEdge::new("shortcut", START, END));

    let back = visual_to_config(&nodes, &edges, Some(&config));
    assert_eq!(back.edges.len(), config.edges.len());
    assert!(!back.edges.iter().any(|e| e.is_shortcut()));
}

#[test]
fn entry_point_resolution_order() {
    // 1. START edge target wins
    let config = sample_config();
    let (nodes, edges) = config_to_visual(Some(&config));
    assert_eq!(visual_to_config(&nodes, &edges, Some(&config)).entry_point, "agent");

    // 2. no START edge: previous entry point
    let no_start: Vec<_> = edges.iter().filter(|e| e.source != START).cloned().collect();
    let mut previous = config.clone();
    previous.entry_point = "tools".to_string();
    assert_eq!(
        visual_to_config(&nodes, &no_start, Some(&previous)).entry_point,
        "tools"
    );

    // 3. no previous: first real node
    assert_eq!(visual_to_config(&nodes, &no_start, None).entry_point, "agent");

    // 4. nothing at all: fixed fallback
    let (empty_nodes, empty_edges) = config_to_visual(None);
    assert_eq!(
        visual_to_config(&empty_nodes, &empty_edges, None).entry_point,
        "agent"
    );
}

#[test]
fn spec_scenario_three_nodes_two_edges() {
    let config = GraphConfig::new(
        vec![NodeConfig::new("agent", "Agent", NodeType::Llm)],
        vec![
            EdgeConfig::new(EdgeConfig::START, "agent"),
            EdgeConfig::new("agent", EdgeConfig::END),
        ],
    )
    .with_entry_point("agent");

    let (nodes, edges) = config_to_visual(Some(&config));
    assert_eq!(nodes.len(), 3);
    assert_eq!(edges.len(), 2);
}
