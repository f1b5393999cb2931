//! Stateful editor session that keeps a visual canvas and an externally
//! owned `GraphConfig` in step without echo loops.

use serde_json::Value;
use uuid::Uuid;
use xyzen_core::{GraphConfig, NodeType, Position, XyzenError};

use crate::convert::{config_to_visual, default_node_position, visual_to_config};
use crate::hash::structural_hash;
use crate::visual::{edge_id, VisualEdge, VisualNode};
use crate::is_pseudo_node;

/// Callback invoked with each outward config push.
pub type ChangeHandler = Box<dyn FnMut(GraphConfig) + Send>;

/// An editing session over one agent graph.
///
/// The session owns the visual node/edge state; the canonical config is
/// owned by the caller and fed in through [`sync_external`]. Both sides may
/// be edited concurrently (a canvas and a raw JSON editor), so every
/// crossing of the boundary is gated on the structural hash: an update whose
/// hash matches the last one seen in either direction is an echo and is
/// dropped. While an external update is being applied, outward pushes are
/// suppressed.
///
/// [`sync_external`]: GraphSession::sync_external
pub struct GraphSession {
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    external: Option<GraphConfig>,
    last_external_hash: Option<u64>,
    last_pushed_hash: Option<u64>,
    syncing_from_external: bool,
    on_change: ChangeHandler,
}

impl GraphSession {
    pub fn new(initial: Option<GraphConfig>, on_change: ChangeHandler) -> Self {
        let (nodes, edges) = config_to_visual(initial.as_ref());
        let last_external_hash = initial.as_ref().map(structural_hash);
        Self {
            nodes,
            edges,
            external: initial,
            last_external_hash,
            last_pushed_hash: None,
            syncing_from_external: false,
            on_change,
        }
    }

    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    /// The config the current visual state denotes.
    pub fn current_config(&self) -> GraphConfig {
        visual_to_config(&self.nodes, &self.edges, self.external.as_ref())
    }

    /// Feed in a new externally owned config.
    ///
    /// A `None` config falls back to the empty canvas and suppresses outward
    /// pushes until a config reappears. A config whose structural hash
    /// matches the last external or last pushed hash is adopted for its
    /// auxiliary fields but triggers no rebuild, so an update the session
    /// itself emitted does not bounce back as a visual reset.
    pub fn sync_external(&mut self, config: Option<GraphConfig>) {
        let Some(config) = config else {
            tracing::debug!("external config cleared, resetting to empty canvas");
            self.external = None;
            self.last_external_hash = None;
            let (nodes, edges) = config_to_visual(None);
            self.nodes = nodes;
            self.edges = edges;
            return;
        };

        let hash = structural_hash(&config);
        let unchanged =
            Some(hash) == self.last_external_hash || Some(hash) == self.last_pushed_hash;

        self.last_external_hash = Some(hash);
        self.external = Some(config);

        if unchanged {
            tracing::debug!(hash, "external config structurally unchanged, skipping rebuild");
            return;
        }

        tracing::debug!(hash, "applying external config to canvas");
        self.syncing_from_external = true;
        let (nodes, edges) = config_to_visual(self.external.as_ref());
        self.nodes = nodes;
        self.edges = edges;
        self.visual_changed();
        self.syncing_from_external = false;
    }

    /// Discard local edits and rebuild the canvas from the last external config.
    pub fn reset(&mut self) {
        self.syncing_from_external = true;
        let (nodes, edges) = config_to_visual(self.external.as_ref());
        self.nodes = nodes;
        self.edges = edges;
        self.visual_changed();
        self.syncing_from_external = false;
    }

    /// Add a node of the given kind with a generated id and the kind's
    /// default payload. Returns the new id.
    pub fn add_node(&mut self, node_type: NodeType, position: Option<Position>) -> String {
        let real_count = self.nodes.iter().filter(|n| !n.is_pseudo()).count();
        let id = format!("{}-{}", node_type.as_str(), Uuid::new_v4());
        let label = format!("{} {}", node_type.display_name(), real_count + 1);
        let position = position.unwrap_or_else(|| default_node_position(real_count));

        let node = VisualNode::new(&id, label, node_type, position)
            .with_config(node_type.default_config());
        // keep the END marker last
        let insert_at = self.nodes.len().saturating_sub(1);
        self.nodes.insert(insert_at, node);
        self.visual_changed();
        id
    }

    /// Apply an in-place update to a node. Pseudo-nodes are left untouched.
    pub fn update_node(&mut self, id: &str, update: impl FnOnce(&mut VisualNode)) {
        if is_pseudo_node(id) {
            return;
        }
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            update(node);
            self.visual_changed();
        }
    }

    /// Update a node's config payload.
    pub fn update_node_config(&mut self, id: &str, config: Value) {
        self.update_node(id, |n| n.config = config);
    }

    /// Remove a node and every edge touching it. No-op for the START/END
    /// markers and for unknown ids.
    pub fn delete_node(&mut self, id: &str) {
        if is_pseudo_node(id) || !self.nodes.iter().any(|n| n.id == id) {
            return;
        }
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
        self.visual_changed();
    }

    /// Connect two nodes with a plain edge (no condition, priority 0).
    /// Endpoints may be real node ids or the START/END marker ids.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<(), XyzenError> {
        for endpoint in [source, target] {
            if !self.nodes.iter().any(|n| n.id == endpoint) {
                return Err(XyzenError::Graph(format!(
                    "cannot connect: node '{endpoint}' not found"
                )));
            }
        }
        let id = edge_id(source, target, self.edges.len());
        self.edges.push(VisualEdge::new(id, source, target));
        self.visual_changed();
        Ok(())
    }

    /// Remove an edge by its visual id.
    pub fn disconnect(&mut self, edge_id: &str) {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        if self.edges.len() != before {
            self.visual_changed();
        }
    }

    /// Push the derived config outward if it represents a genuine change.
    fn visual_changed(&mut self) {
        if self.syncing_from_external {
            tracing::debug!("visual change during external sync, push suppressed");
            return;
        }
        let Some(external) = self.external.as_ref() else {
            return;
        };

        let derived = visual_to_config(&self.nodes, &self.edges, Some(external));
        let hash = structural_hash(&derived);
        if Some(hash) == self.last_pushed_hash || Some(hash) == self.last_external_hash {
            return;
        }

        tracing::debug!(hash, "pushing config change outward");
        self.last_pushed_hash = Some(hash);
        (self.on_change)(derived);
    }
}

impl std::fmt::Debug for GraphSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSession")
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edges.len())
            .field("syncing_from_external", &self.syncing_from_external)
            .finish()
    }
}
