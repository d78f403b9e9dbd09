mod component;
mod error;
mod highlight;
mod interaction;
mod layout;
mod normalize;
mod render;
mod state;
mod types;
mod viewport;

pub use component::RegimenGraphCanvas;
pub use error::DatasetError;
pub use highlight::{Adjacency, EdgeVisual, LabelVisual, NodeVisual, Scene};
pub use interaction::{Gesture, GraphEvent, InteractionState};
pub use layout::{CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, LayoutConfig};
pub use state::{RegimenGraphState, ViewRetention};
pub use types::{Category, GraphData, GraphLink, GraphNode, LinkEndpoint, Point, RawLink, RawNode};
pub use viewport::{IdentityMapper, ViewportMapper, ViewportTransform};
