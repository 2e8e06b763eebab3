use thiserror::Error;

use crate::core::{AxisId, SeriesId};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid size: width={width}, height={height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown or disposed axis: {0:?}")]
    UnknownAxis(AxisId),

    #[error("unknown series: {0:?}")]
    UnknownSeries(SeriesId),
}
