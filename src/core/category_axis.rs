//! Category axis rules and cross-series grouping.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::DoubleRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryLabelPlacement {
    OnTicks,
    /// Labels sit between ticks; the range grows by half a category per side.
    #[default]
    BetweenTicks,
}

/// Distinct categories shared by every series on a category axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryGrouping {
    /// Distinct category labels in first-seen order.
    pub grouped_x_values: Vec<String>,
    /// Per series, the grouped index of each point.
    pub indices: Vec<Vec<f64>>,
}

impl CategoryGrouping {
    #[must_use]
    pub fn label(&self, index: f64) -> Option<&str> {
        if !index.is_finite() || index < -0.5 {
            return None;
        }
        self.grouped_x_values
            .get(index.round() as usize)
            .map(String::as_str)
    }
}

/// Groups the distinct X values of several series into one ordered list and
/// remaps every point onto it.
///
/// Grouping the same inputs twice produces the same ordering.
#[must_use]
pub fn group_data<S: AsRef<str>>(series_categories: &[&[S]]) -> CategoryGrouping {
    let mut distinct: IndexSet<&str> = IndexSet::new();
    for categories in series_categories {
        for category in categories.iter() {
            distinct.insert(category.as_ref());
        }
    }

    let indices = series_categories
        .iter()
        .map(|categories| {
            categories
                .iter()
                .map(|category| {
                    distinct
                        .get_index_of(category.as_ref())
                        .map_or(f64::NAN, |index| index as f64)
                })
                .collect()
        })
        .collect();

    CategoryGrouping {
        grouped_x_values: distinct.into_iter().map(str::to_owned).collect(),
        indices,
    }
}

/// Category intervals are whole categories.
#[must_use]
pub fn calculate_interval(range: DoubleRange, desired_count: f64) -> f64 {
    let delta = range.delta();
    if !delta.is_finite() || delta <= 0.0 {
        return 1.0;
    }
    (delta / desired_count.max(1.0)).floor().max(1.0)
}

#[must_use]
pub fn apply_range_padding(range: DoubleRange, placement: CategoryLabelPlacement) -> DoubleRange {
    let padded = match placement {
        CategoryLabelPlacement::BetweenTicks if !range.is_empty() => {
            DoubleRange::new(range.start() - 0.5, range.end() + 0.5)
        }
        _ => range,
    };
    if padded.is_empty() {
        DoubleRange::add_default_range(0.0)
    } else if padded.is_degenerate() {
        DoubleRange::add_default_range(padded.start())
    } else {
        padded
    }
}

/// Whole-number category positions inside `range`, stepping by `interval`.
#[must_use]
pub fn generate_ticks(range: DoubleRange, interval: f64, max_ticks: usize) -> Vec<f64> {
    if range.is_empty() {
        return Vec::new();
    }
    let interval = interval.round().max(1.0);
    let mut value = range.start().ceil().max(0.0);
    let mut ticks = Vec::new();
    while value <= range.end() + 1e-9 && ticks.len() < max_ticks {
        ticks.push(value);
        value += interval;
    }
    ticks
}
