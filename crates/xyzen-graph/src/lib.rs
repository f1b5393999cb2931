mod builder;
mod convert;
mod hash;
mod session;
mod visual;
mod visualization;

pub use builder::{validate, GraphBuilder};
pub use convert::{config_to_visual, default_node_position, visual_to_config};
pub use hash::structural_hash;
pub use session::{ChangeHandler, GraphSession};
pub use visual::{VisualEdge, VisualNode, END_POSITION, START_POSITION};
pub use visualization::Visualize;

/// Id of the synthetic start marker shown in the editor canvas.
pub const START: &str = "__start__";
/// Id of the synthetic end marker shown in the editor canvas.
pub const END: &str = "__end__";

/// Returns true if `id` names one of the synthetic canvas markers.
pub fn is_pseudo_node(id: &str) -> bool {
    id == START || id == END
}
