mod edges;
mod params;

pub use edges::{EdgeGroups, LABEL_SPACING, label_position};
pub use params::{LayoutParams, NodeStyle};
