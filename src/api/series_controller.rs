use tracing::{debug, trace};

use crate::core::series::{PointMapper, PointsChange, Series, SeriesConfig, SeriesId, SeriesPoint};
use crate::error::{ChartError, ChartResult};
use crate::labels::DataLabel;

use super::ChartArea;

impl ChartArea {
    pub fn add_series(&mut self, config: SeriesConfig) -> ChartResult<SeriesId> {
        self.validate_series_config(&config)?;
        let id = SeriesId(self.series.len());
        debug!(series = %id, name = %config.name, kind = config.kind.name(), "series added");
        self.series.push(Some(Series::new(id, config)));
        self.placed_labels.push(Vec::new());
        Ok(id)
    }

    /// Removes a series and drops its axis registrations.
    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<Series> {
        let series = self
            .series
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(ChartError::UnknownSeries(id))?;
        for axis in &mut self.axes {
            axis.unregister_series(id);
        }
        if let Some(labels) = self.placed_labels.get_mut(id.0) {
            labels.clear();
        }
        debug!(series = %id, "series removed");
        Ok(series)
    }

    pub fn series(&self, id: SeriesId) -> ChartResult<&Series> {
        self.series
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(ChartError::UnknownSeries(id))
    }

    pub(super) fn series_mut(&mut self, id: SeriesId) -> ChartResult<&mut Series> {
        self.series
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(ChartError::UnknownSeries(id))
    }

    /// Every live series in registration order.
    pub fn series_iter(&self) -> impl DoubleEndedIterator<Item = &Series> {
        self.series.iter().flatten()
    }

    pub fn set_series_config(&mut self, id: SeriesId, config: SeriesConfig) -> ChartResult<()> {
        self.validate_series_config(&config)?;
        self.series_mut(id)?.set_config(config);
        Ok(())
    }

    pub fn set_series_points(&mut self, id: SeriesId, points: Vec<SeriesPoint>) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        trace!(series = %id, count = points.len(), "series points replaced");
        series.set_points(points);
        Ok(())
    }

    /// Applies one insert/remove/replace/reset event to a series.
    pub fn apply_points_change(&mut self, id: SeriesId, change: PointsChange) -> ChartResult<()> {
        self.series_mut(id)?.apply_change(change)
    }

    /// Replaces a series' points from caller items through `mapper`.
    pub fn bind_series<T>(
        &mut self,
        id: SeriesId,
        items: &[T],
        mapper: &PointMapper<T>,
    ) -> ChartResult<()> {
        self.series_mut(id)?.bind(items, mapper);
        Ok(())
    }

    /// Flips the legend toggle of a series; returns the new toggle state.
    pub fn toggle_series(&mut self, id: SeriesId) -> ChartResult<bool> {
        let series = self.series_mut(id)?;
        let is_toggled = !series.is_toggled();
        series.set_toggled(is_toggled);
        debug!(series = %id, is_toggled, "series toggled");
        Ok(is_toggled)
    }

    /// Data labels placed for a series by the last pass.
    pub fn data_labels(&self, id: SeriesId) -> ChartResult<&[DataLabel]> {
        self.series(id)?;
        Ok(self
            .placed_labels
            .get(id.0)
            .map_or(&[][..], Vec::as_slice))
    }
}
