use serde::{Deserialize, Serialize};
use serde_json::Value;
use xyzen_core::{EdgeCondition, NodeType, Position};

use crate::{END, START};

/// Fixed canvas position of the synthetic start marker.
pub const START_POSITION: Position = Position { x: 50.0, y: 200.0 };
/// Fixed canvas position of the synthetic end marker.
pub const END_POSITION: Position = Position { x: 850.0, y: 200.0 };

/// A node as rendered by the interactive graph editor.
///
/// The two synthetic markers carry `node_type: None` and are not deletable;
/// every other visual node mirrors one `NodeConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    pub position: Position,
    pub deletable: bool,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
}

impl VisualNode {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        node_type: NodeType,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type: Some(node_type),
            position,
            deletable: true,
            config: Value::Null,
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// The synthetic start marker.
    pub fn start() -> Self {
        Self {
            id: START.to_string(),
            label: "START".to_string(),
            node_type: None,
            position: START_POSITION,
            deletable: false,
            config: Value::Null,
        }
    }

    /// The synthetic end marker.
    pub fn end() -> Self {
        Self {
            id: END.to_string(),
            label: "END".to_string(),
            node_type: None,
            position: END_POSITION,
            deletable: false,
            config: Value::Null,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        crate::is_pseudo_node(&self.id)
    }
}

/// An edge as rendered by the interactive graph editor.
///
/// `label`, `condition` and `priority` are carried verbatim from the source
/// `EdgeConfig` so a later conversion back to config form loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<EdgeCondition>,
    #[serde(default)]
    pub priority: i32,
    pub animated: bool,
}

impl VisualEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            condition: None,
            priority: 0,
            animated: false,
        }
    }

    /// The label the editor shows for this edge: an explicit label wins,
    /// otherwise the condition supplies one.
    pub fn display_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .or_else(|| self.condition.as_ref().map(|c| c.display_label()))
    }
}

/// Deterministic id for the visual edge at `index` between two endpoints.
pub(crate) fn edge_id(source: &str, target: &str, index: usize) -> String {
    format!("{source}->{target}:{index}")
}
