use std::collections::HashSet;

use serde_json::{Map, Value};
use xyzen_core::{
    is_sentinel, EdgeCondition, EdgeConfig, GraphConfig, NodeConfig, XyzenError,
};

/// Builder for constructing a validated graph configuration.
pub struct GraphBuilder {
    nodes: Vec<NodeConfig>,
    edges: Vec<EdgeConfig>,
    entry_point: Option<String>,
    exit_points: Vec<String>,
    metadata: Map<String, Value>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            entry_point: None,
            exit_points: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Add a node to the graph.
    pub fn add_node(mut self, node: NodeConfig) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add a plain edge from source to target (real ids or START/END).
    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.push(EdgeConfig::new(from, to));
        self
    }

    /// Add a conditional edge.
    pub fn add_conditional_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: EdgeCondition,
    ) -> Self {
        self.edges.push(EdgeConfig::new(from, to).with_condition(condition));
        self
    }

    /// Set the entry point node.
    pub fn set_entry_point(mut self, id: impl Into<String>) -> Self {
        self.entry_point = Some(id.into());
        self
    }

    /// Mark a node as terminal.
    pub fn add_exit_point(mut self, id: impl Into<String>) -> Self {
        self.exit_points.push(id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<GraphConfig, XyzenError> {
        let entry = self
            .entry_point
            .clone()
            .or_else(|| {
                // an explicit START edge also names the entry
                self.edges
                    .iter()
                    .find(|e| e.is_start_edge() && !e.is_end_edge())
                    .map(|e| e.to_node.clone())
            })
            .ok_or_else(|| XyzenError::Validation("no entry point set".to_string()))?;

        let mut config = GraphConfig::new(self.nodes, self.edges).with_entry_point(entry);
        config.exit_points = self.exit_points;
        config.metadata = self.metadata;
        validate(&config)?;
        Ok(config)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the structural invariants of a graph configuration.
///
/// Node ids must be unique, the entry point must name a known node, and
/// every edge endpoint (and conditional branch target) must resolve to a
/// known node or a sentinel.
pub fn validate(config: &GraphConfig) -> Result<(), XyzenError> {
    let mut seen = HashSet::new();
    for node in &config.nodes {
        if is_sentinel(&node.id) {
            return Err(XyzenError::Validation(format!(
                "node id '{}' collides with a sentinel",
                node.id
            )));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(XyzenError::Validation(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
    }

    if !seen.contains(config.entry_point.as_str()) {
        return Err(XyzenError::Validation(format!(
            "entry point node '{}' not found",
            config.entry_point
        )));
    }

    for edge in &config.edges {
        if !edge.is_start_edge() && !seen.contains(edge.from_node.as_str()) {
            return Err(XyzenError::Validation(format!(
                "edge source '{}' not found",
                edge.from_node
            )));
        }
        if !edge.is_end_edge() && !seen.contains(edge.to_node.as_str()) {
            return Err(XyzenError::Validation(format!(
                "edge target '{}' not found",
                edge.to_node
            )));
        }
        if let Some(EdgeCondition::Branch(branch)) = &edge.condition {
            if branch.target != EdgeConfig::END && !seen.contains(branch.target.as_str()) {
                return Err(XyzenError::Validation(format!(
                    "condition target '{}' not found",
                    branch.target
                )));
            }
        }
    }

    if let Some(start_edge) = config
        .edges
        .iter()
        .find(|e| e.is_start_edge() && !e.is_shortcut())
    {
        if start_edge.to_node != config.entry_point {
            return Err(XyzenError::Validation(format!(
                "entry point '{}' disagrees with START edge target '{}'",
                config.entry_point, start_edge.to_node
            )));
        }
    }

    for exit in &config.exit_points {
        if exit != EdgeConfig::END && !seen.contains(exit.as_str()) {
            return Err(XyzenError::Validation(format!(
                "exit point '{exit}' not found"
            )));
        }
    }

    Ok(())
}
