//! chart-kit: geometry core of a 2D charting widget.
//!
//! The crate computes axis ranges and intervals, zoom/pan windows, the
//! data-to-pixel transform, axis layout, per-series segment geometry and
//! data-label placement. Drawing belongs to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod labels;
pub mod layout;
pub mod telemetry;

pub use api::{ChartArea, ChartAreaConfig, ChartAreaKind};
pub use error::{ChartError, ChartResult};
