use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Fallback entry point id used when a graph carries no explicit entry edge.
pub const DEFAULT_ENTRY_POINT: &str = "agent";

/// Version tag written into newly created configurations.
pub const CONFIG_VERSION: &str = "1.0";

/// A 2D position in the graph editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The closed set of node kinds an execution graph can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Llm,
    Tool,
    Router,
    Condition,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Llm => "llm",
            NodeType::Tool => "tool",
            NodeType::Router => "router",
            NodeType::Condition => "condition",
        }
    }

    /// Human-readable label for newly created nodes of this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeType::Llm => "LLM",
            NodeType::Tool => "Tool",
            NodeType::Router => "Router",
            NodeType::Condition => "Condition",
        }
    }

    /// Default configuration payload for a freshly created node of this kind.
    pub fn default_config(&self) -> Value {
        match self {
            NodeType::Llm => json!({
                "model": "gpt-4o-mini",
                "temperature": 0.7,
                "system_prompt": "",
            }),
            NodeType::Tool => json!({
                "tool_name": "",
                "arguments": {},
            }),
            NodeType::Router => json!({
                "routes": {},
            }),
            NodeType::Condition => json!({
                "expression": "",
            }),
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node of the canonical execution graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NodeConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            config: node_type.default_config(),
            position: None,
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// A structured routing branch: the `target` names the label the consuming
/// engine routes on. Any other fields are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionBranch {
    pub target: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An edge condition: either a plain tag string or a structured branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeCondition {
    Tag(String),
    Branch(ConditionBranch),
}

impl EdgeCondition {
    pub fn tag(tag: impl Into<String>) -> Self {
        EdgeCondition::Tag(tag.into())
    }

    pub fn branch(target: impl Into<String>) -> Self {
        EdgeCondition::Branch(ConditionBranch {
            target: target.into(),
            extra: Map::new(),
        })
    }

    /// The label shown for this condition when the edge has no explicit label.
    pub fn display_label(&self) -> &str {
        match self {
            EdgeCondition::Tag(tag) => tag,
            EdgeCondition::Branch(branch) => &branch.target,
        }
    }
}

/// A single edge of the canonical execution graph.
///
/// `from_node`/`to_node` hold either a real node id or one of the sentinel
/// strings [`EdgeConfig::START`] / [`EdgeConfig::END`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub from_node: String,
    pub to_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<EdgeCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub priority: i32,
}

impl EdgeConfig {
    /// Sentinel source marking the edge that enters the graph.
    pub const START: &'static str = "START";
    /// Sentinel target marking an edge that leaves the graph.
    pub const END: &'static str = "END";

    pub fn new(from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self {
            from_node: from_node.into(),
            to_node: to_node.into(),
            condition: None,
            label: None,
            priority: 0,
        }
    }

    pub fn with_condition(mut self, condition: EdgeCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_start_edge(&self) -> bool {
        self.from_node == Self::START
    }

    pub fn is_end_edge(&self) -> bool {
        self.to_node == Self::END
    }

    /// True for the degenerate START -> END shortcut, which carries no meaning.
    pub fn is_shortcut(&self) -> bool {
        self.is_start_edge() && self.is_end_edge()
    }
}

/// Returns true if `id` is one of the sentinel endpoint strings.
pub fn is_sentinel(id: &str) -> bool {
    id == EdgeConfig::START || id == EdgeConfig::END
}

/// The canonical, persisted description of an agent execution graph.
///
/// Sentinel START/END markers never appear in `nodes`; they exist only as
/// edge endpoints. Fields beyond `nodes`/`edges`/`entry_point` are carried
/// through conversions untouched even when an editor does not render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub edges: Vec<EdgeConfig>,
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exit_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub state_schema: Value,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub prompt_templates: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_timeout: Option<u64>,
    #[serde(default)]
    pub enable_checkpoints: bool,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

fn default_entry_point() -> String {
    DEFAULT_ENTRY_POINT.to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            nodes: Vec::new(),
            edges: Vec::new(),
            entry_point: default_entry_point(),
            exit_points: Vec::new(),
            state_schema: Value::Null,
            prompt_templates: Map::new(),
            metadata: Map::new(),
            execution_timeout: None,
            enable_checkpoints: false,
        }
    }
}

impl GraphConfig {
    pub fn new(nodes: Vec<NodeConfig>, edges: Vec<EdgeConfig>) -> Self {
        let entry_point = nodes
            .first()
            .map(|n| n.id.clone())
            .unwrap_or_else(default_entry_point);
        Self {
            nodes,
            edges,
            entry_point,
            ..Self::default()
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&NodeConfig> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// The edges leaving `id` (sentinels allowed).
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeConfig> {
        self.edges.iter().filter(move |e| e.from_node == id)
    }
}

#[derive(Debug, Error)]
pub enum XyzenError {
    #[error("graph error: {0}")]
    Graph(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("config error: {0}")]
    Config(String),
}
