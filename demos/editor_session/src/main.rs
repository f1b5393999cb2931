//! Builds an agent graph, edits it through a session, and prints the
//! Mermaid rendering of the result.

use xyzen_core::{EdgeCondition, EdgeConfig, NodeConfig, NodeType};
use xyzen_graph::{GraphBuilder, GraphSession, Visualize};

fn main() {
    tracing_subscriber::fmt().init();

    let config = GraphBuilder::new()
        .add_node(NodeConfig::new("agent", "Agent", NodeType::Llm))
        .add_node(NodeConfig::new("tools", "Tools", NodeType::Tool))
        .add_edge(EdgeConfig::START, "agent")
        .add_conditional_edge("agent", "tools", EdgeCondition::tag("has_tool_calls"))
        .add_edge("tools", "agent")
        .add_conditional_edge("agent", EdgeConfig::END, EdgeCondition::tag("done"))
        .set_entry_point("agent")
        .build()
        .expect("valid graph");

    let mut session = GraphSession::new(
        Some(config),
        Box::new(|updated| {
            println!(
                "-- pushed: {} nodes, {} edges, entry '{}'",
                updated.nodes.len(),
                updated.edges.len(),
                updated.entry_point
            );
        }),
    );

    let router_id = session.add_node(NodeType::Router, None);
    session.connect("agent", &router_id).expect("known nodes");

    println!("{}", session.current_config().draw_mermaid());
    println!();
    println!("{}", session.current_config().draw_ascii());
}
