//! Xyzen — graph engine for the Xyzen agent platform.
//!
//! This crate re-exports the Xyzen sub-crates for convenient single-import
//! usage.
//!
//! # Quick Start
//!
//! ```rust
//! use xyzen::core::{EdgeConfig, NodeConfig, NodeType};
//! use xyzen::graph::{GraphBuilder, GraphSession, Visualize};
//!
//! let config = GraphBuilder::new()
//!     .add_node(NodeConfig::new("agent", "Agent", NodeType::Llm))
//!     .add_edge(EdgeConfig::START, "agent")
//!     .add_edge("agent", EdgeConfig::END)
//!     .set_entry_point("agent")
//!     .build()
//!     .unwrap();
//!
//! let mut session = GraphSession::new(Some(config), Box::new(|updated| {
//!     println!("graph changed: {} nodes", updated.nodes.len());
//! }));
//! let tool_id = session.add_node(xyzen::core::NodeType::Tool, None);
//! session.connect("agent", &tool_id).unwrap();
//! println!("{}", session.current_config().draw_mermaid());
//! ```

/// Core data contracts: GraphConfig, NodeConfig, EdgeConfig, XyzenError.
pub use xyzen_core as core;

/// Graph engine: conversion, hashing, sessions, builder, visualization.
pub use xyzen_graph as graph;
