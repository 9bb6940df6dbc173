//! Sketchwire Core Library
//!
//! Platform-agnostic interaction engine for the sketchwire diagram editor:
//! anchor-handle adjustment of graph primitives, selection transforms, and
//! the scene/viewport/attract collaborators they drive.

pub mod adjust;
pub mod anchor;
pub mod attract;
pub mod graphs;
pub mod scene;
pub mod selection;
pub mod viewport;

pub use adjust::{AdjustState, GraphAdjustController};
pub use anchor::{
    AdjustType, AnchorDescriptor, AnchorHandle, AnchorSource, CornerAnchor, Cursor, EdgeAnchor,
    HandlePaint, create_anchor_handle,
};
pub use attract::{ATTRACT_THRESHOLD, AlignGuide, AttractTool, GRID_SIZE, GuideAxis};
pub use graphs::{Circle, Geometry, Graph, GraphKind, Line, MIN_EXTENT, NodeId, Rectangle};
pub use scene::{GraphNode, Layer, Scene, SceneError, SceneEvent};
pub use selection::{SELECTED_OPACITY_FACTOR, SelectionController};
pub use viewport::Viewport;
