pub mod animation;
pub mod area_series;
pub mod axis;
pub mod axis_labels;
pub mod box_whisker_series;
pub mod bubble_series;
pub mod candlestick;
pub mod category_axis;
pub mod color;
pub mod column_series;
pub mod date_time_axis;
pub mod empty_point;
pub mod error_bar_series;
pub mod fast_series;
pub mod line_series;
pub mod log_axis;
pub mod numeric_axis;
pub mod pie_series;
pub mod primitives;
pub mod range;
pub mod scatter_series;
pub mod segment;
pub mod segment_builder;
pub mod series;
pub mod transform;
pub mod triangular_series;
pub mod types;
pub mod zoom;

pub use axis::{Axis, AxisConfig, AxisId, AxisKind};
pub use axis_labels::{AxisLabel, AxisLabelStyle, LabelFormat};
pub use color::Color;
pub use empty_point::EmptyPointMode;
pub use range::DoubleRange;
pub use segment::{Segment, SegmentData, SegmentGeometry};
pub use series::{Series, SeriesConfig, SeriesId, SeriesKind, SeriesPoint, XValue};
pub use transform::{CoordinateSystem, PolarFrame, SeriesTransform};
pub use types::{DataPoint, Point, Rect, Size};
pub use zoom::ZoomState;
