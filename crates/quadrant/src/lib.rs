pub mod dataset;
pub mod geom;
pub mod place;
pub mod rings;
pub mod svg;
pub mod tool;

pub use geom::Point;
pub use place::{PlacedTool, Placement, assign_positions};
pub use rings::{Extent, RingBounds, RingTable};
pub use tool::{Category, Reviewer, Tool, ToolId};
