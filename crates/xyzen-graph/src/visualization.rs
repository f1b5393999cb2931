//! Renderers for graph configurations: Mermaid, ASCII, Graphviz DOT, and
//! image output via mermaid.ink or a local `dot` binary.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use xyzen_core::{EdgeConfig, GraphConfig, XyzenError};

use crate::{END, START};

fn endpoint_name(id: &str) -> &str {
    match id {
        EdgeConfig::START => START,
        EdgeConfig::END => END,
        other => other,
    }
}

/// Rendering over a graph configuration.
#[async_trait]
pub trait Visualize {
    /// Render as a Mermaid flowchart string.
    ///
    /// - START/END markers are rendered as rounded nodes `([...])`
    /// - Real nodes are rendered as rectangles `[...]`
    /// - Plain edges use solid arrows `-->`
    /// - Conditional edges use dashed arrows `-.->` with their display label
    fn draw_mermaid(&self) -> String;

    /// Render as a simple ASCII text summary.
    fn draw_ascii(&self) -> String;

    /// Render in Graphviz DOT format.
    fn draw_dot(&self) -> String;

    /// Render as a PNG using the Graphviz `dot` command.
    ///
    /// Requires `dot` to be installed and available in `$PATH`.
    fn draw_png(&self, path: &Path) -> Result<(), XyzenError>;

    /// Render the Mermaid diagram as a JPEG via the mermaid.ink API and
    /// write it to `path`. Requires internet access.
    async fn draw_mermaid_png(&self, path: &Path) -> Result<(), XyzenError>;

    /// Render the Mermaid diagram as an SVG via the mermaid.ink API and
    /// write it to `path`. Requires internet access.
    async fn draw_mermaid_svg(&self, path: &Path) -> Result<(), XyzenError>;
}

#[async_trait]
impl Visualize for GraphConfig {
    fn draw_mermaid(&self) -> String {
        let mut lines = vec!["graph TD".to_string()];

        let mut node_ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        node_ids.sort();

        lines.push(format!("    {START}([\"{START}\"])"));
        for id in &node_ids {
            let name = self.node(id).map(|n| n.name.as_str()).unwrap_or(id);
            lines.push(format!("    {id}[\"{name}\"]"));
        }
        lines.push(format!("    {END}([\"{END}\"])"));

        if !self.edges.iter().any(|e| e.is_start_edge()) {
            lines.push(format!("    {START} --> {}", self.entry_point));
        }

        for (source, target, label, conditional) in sorted_edges(self) {
            match (conditional, label) {
                (true, Some(label)) => {
                    lines.push(format!("    {source} -.-> |{label}| {target}"))
                }
                (true, None) => lines.push(format!("    {source} -.-> {target}")),
                (false, Some(label)) => {
                    lines.push(format!("    {source} --> |{label}| {target}"))
                }
                (false, None) => lines.push(format!("    {source} --> {target}")),
            }
        }

        lines.join("\n")
    }

    fn draw_ascii(&self) -> String {
        let mut lines = vec!["Graph:".to_string()];

        let mut node_ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        node_ids.sort();
        lines.push(format!("  Nodes: {}", node_ids.join(", ")));
        lines.push(format!("  Entry: {START} -> {}", self.entry_point));
        lines.push("  Edges:".to_string());

        for (source, target, label, conditional) in sorted_edges(self) {
            match (conditional, label) {
                (true, Some(label)) => {
                    lines.push(format!("    {source} -> {target}  [conditional: {label}]"))
                }
                (true, None) => lines.push(format!("    {source} -> {target}  [conditional]")),
                (false, Some(label)) => {
                    lines.push(format!("    {source} -> {target}  [{label}]"))
                }
                (false, None) => lines.push(format!("    {source} -> {target}")),
            }
        }

        lines.join("\n")
    }

    fn draw_dot(&self) -> String {
        let mut lines = vec!["digraph G {".to_string(), "    rankdir=TD;".to_string()];

        let mut node_ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        node_ids.sort();

        lines.push(format!("    \"{START}\" [shape=oval];"));
        for id in &node_ids {
            lines.push(format!("    \"{id}\" [shape=box];"));
        }
        lines.push(format!("    \"{END}\" [shape=oval];"));

        if !self.edges.iter().any(|e| e.is_start_edge()) {
            lines.push(format!(
                "    \"{START}\" -> \"{}\" [style=solid];",
                self.entry_point
            ));
        }

        for (source, target, label, conditional) in sorted_edges(self) {
            let style = if conditional { "dashed" } else { "solid" };
            match label {
                Some(label) => lines.push(format!(
                    "    \"{source}\" -> \"{target}\" [style={style}, label=\"{label}\"];"
                )),
                None => lines.push(format!("    \"{source}\" -> \"{target}\" [style={style}];")),
            }
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    fn draw_png(&self, path: &Path) -> Result<(), XyzenError> {
        let dot = self.draw_dot();

        let mut child = std::process::Command::new("dot")
            .args(["-Tpng"])
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| {
                XyzenError::Graph(format!(
                    "failed to run 'dot' command (is Graphviz installed?): {e}"
                ))
            })?;

        child
            .stdin
            .take()
            .ok_or_else(|| XyzenError::Graph("dot stdin unavailable".to_string()))?
            .write_all(dot.as_bytes())
            .map_err(|e| XyzenError::Graph(format!("failed to write to dot stdin: {e}")))?;

        let output = child
            .wait_with_output()
            .map_err(|e| XyzenError::Graph(format!("dot command failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(XyzenError::Graph(format!("dot command failed: {stderr}")));
        }

        std::fs::write(path, &output.stdout)
            .map_err(|e| XyzenError::Graph(format!("failed to write PNG file: {e}")))?;

        Ok(())
    }

    async fn draw_mermaid_png(&self, path: &Path) -> Result<(), XyzenError> {
        fetch_mermaid_ink(self, "img", path).await
    }

    async fn draw_mermaid_svg(&self, path: &Path) -> Result<(), XyzenError> {
        fetch_mermaid_ink(self, "svg", path).await
    }
}

/// Edges in deterministic render order: endpoints, display label, and
/// whether the edge is conditional.
fn sorted_edges(config: &GraphConfig) -> Vec<(&str, &str, Option<&str>, bool)> {
    let mut edges: Vec<(&str, &str, Option<&str>, bool)> = config
        .edges
        .iter()
        .map(|e| {
            let label = e
                .label
                .as_deref()
                .or_else(|| e.condition.as_ref().map(|c| c.display_label()));
            (
                endpoint_name(&e.from_node),
                endpoint_name(&e.to_node),
                label,
                e.condition.is_some(),
            )
        })
        .collect();
    edges.sort();
    edges
}

async fn fetch_mermaid_ink(
    config: &GraphConfig,
    endpoint: &str,
    path: &Path,
) -> Result<(), XyzenError> {
    use base64::Engine;

    let mermaid = config.draw_mermaid();
    let encoded = base64::engine::general_purpose::URL_SAFE.encode(mermaid.as_bytes());
    let url = format!("https://mermaid.ink/{endpoint}/{encoded}");

    let response = reqwest::get(&url)
        .await
        .map_err(|e| XyzenError::Graph(format!("mermaid.ink request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(XyzenError::Graph(format!(
            "mermaid.ink returned status {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| XyzenError::Graph(format!("failed to read mermaid.ink response: {e}")))?;

    std::fs::write(path, &bytes)
        .map_err(|e| XyzenError::Graph(format!("failed to write image file: {e}")))?;

    Ok(())
}
