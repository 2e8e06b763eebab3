//! Axis arrangement: measurement, label rows and pixel rectangles.

pub mod axis_layout;
pub mod label_layout;
pub mod measurer;

pub use axis_layout::{AxisEdge, AxisLayout, AxisLayoutEngine, EdgeSizes, LayoutPhase};
pub use label_layout::AxisLabelLayout;
pub use measurer::{ApproximateLabelMeasurer, LabelMeasurer};
