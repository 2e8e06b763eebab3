//! Axis label collision handling.
//!
//! Labels are first measured and laid along the axis with their cross
//! coordinate at zero; [`AxisLabelLayout::place`] later moves each row to
//! its final band once the axis line is known.

use ordered_float::OrderedFloat;

use crate::core::axis::Axis;
use crate::core::axis_labels::{
    AxisLabel, EdgeLabelsDrawingMode, LabelAlignment, LabelsIntersectAction,
};
use crate::core::types::{Rect, Size};
use crate::layout::axis_layout::AxisEdge;
use crate::layout::measurer::LabelMeasurer;

/// Rows (columns on vertical axes) produced for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLabelLayout {
    /// Cross-axis extent of each row, nearest to the axis line first.
    pub row_extents: Vec<f64>,
    pub margin: f64,
}

impl AxisLabelLayout {
    /// Measures, aligns and de-overlaps the axis' visible labels.
    pub fn compute(axis: &mut Axis, measurer: &dyn LabelMeasurer) -> Self {
        let style = axis.config().labels.clone();
        let is_vertical = axis.is_vertical();
        let rect = axis.rendered_rect();
        let bounds = if is_vertical {
            (rect.top, rect.bottom())
        } else {
            (rect.left, rect.right())
        };
        let positions: Vec<f64> = axis
            .visible_labels()
            .iter()
            .map(|label| axis.value_to_point(label.value))
            .collect();

        let labels = axis.visible_labels_mut();
        for (label, position) in labels.iter_mut().zip(positions) {
            label.size = measurer.measure(&label.text, style.font_size);
            label.position = position;
            label.row = 0;
            label.visible = position.is_finite();
            let along = along_extent(label.size, is_vertical);
            let start = position - alignment_shift(style.alignment, along);
            label.rect = along_rect(start, label.size, is_vertical);
        }

        apply_edge_mode(labels, style.edge_labels, bounds, is_vertical);
        let rows = resolve_intersections(labels, style.intersect_action, style.margin, is_vertical);

        let mut row_extents = vec![0.0_f64; rows];
        for label in labels.iter().filter(|label| label.visible) {
            let extent = cross_extent(label.size, is_vertical);
            if let Some(slot) = row_extents.get_mut(label.row) {
                *slot = slot.max(extent);
            }
        }
        Self {
            row_extents,
            margin: style.margin,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_extents.len()
    }

    /// Cross-axis thickness of the whole label band.
    #[must_use]
    pub fn band_extent(&self) -> f64 {
        self.row_extents
            .iter()
            .map(|extent| extent + self.margin)
            .sum()
    }

    /// Moves every label to its row, `offset` pixels outward from `line`.
    pub fn place(&self, labels: &mut [AxisLabel], edge: AxisEdge, line: f64, offset: f64) {
        let mut row_starts = Vec::with_capacity(self.row_extents.len());
        let mut cursor = offset;
        for extent in &self.row_extents {
            cursor += self.margin;
            row_starts.push(cursor);
            cursor += extent;
        }

        for label in labels.iter_mut().filter(|label| label.visible) {
            let Some(start) = row_starts.get(label.row).copied() else {
                continue;
            };
            let size = label.size;
            label.rect = match edge {
                AxisEdge::Bottom => Rect::new(label.rect.left, line + start, size.width, size.height),
                AxisEdge::Top => Rect::new(
                    label.rect.left,
                    line - start - size.height,
                    size.width,
                    size.height,
                ),
                // Vertical labels hug the axis line: right-aligned on the left edge.
                AxisEdge::Left => Rect::new(
                    line - start - size.width,
                    label.rect.top,
                    size.width,
                    size.height,
                ),
                AxisEdge::Right => Rect::new(line + start, label.rect.top, size.width, size.height),
            };
        }
    }
}

fn along_extent(size: Size, is_vertical: bool) -> f64 {
    if is_vertical { size.height } else { size.width }
}

fn cross_extent(size: Size, is_vertical: bool) -> f64 {
    if is_vertical { size.width } else { size.height }
}

fn along_rect(start: f64, size: Size, is_vertical: bool) -> Rect {
    if is_vertical {
        Rect::new(0.0, start, size.width, size.height)
    } else {
        Rect::new(start, 0.0, size.width, size.height)
    }
}

fn along_span(rect: Rect, is_vertical: bool) -> (f64, f64) {
    if is_vertical {
        (rect.top, rect.bottom())
    } else {
        (rect.left, rect.right())
    }
}

/// Anchor shift: none, half or the full label extent.
fn alignment_shift(alignment: LabelAlignment, along: f64) -> f64 {
    match alignment {
        LabelAlignment::Start => 0.0,
        LabelAlignment::Center => along / 2.0,
        LabelAlignment::End => along,
    }
}

fn apply_edge_mode(
    labels: &mut [AxisLabel],
    mode: EdgeLabelsDrawingMode,
    (lower, upper): (f64, f64),
    is_vertical: bool,
) {
    if mode == EdgeLabelsDrawingMode::Center || !lower.is_finite() || !upper.is_finite() {
        return;
    }
    let visible: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.visible)
        .map(|(index, _)| index)
        .collect();
    let first = visible
        .iter()
        .copied()
        .min_by_key(|index| OrderedFloat(along_span(labels[*index].rect, is_vertical).0));
    let last = visible
        .iter()
        .copied()
        .max_by_key(|index| OrderedFloat(along_span(labels[*index].rect, is_vertical).1));

    for index in [first, last].into_iter().flatten() {
        let label = &mut labels[index];
        let (start, end) = along_span(label.rect, is_vertical);
        let shift = if start < lower {
            lower - start
        } else if end > upper {
            upper - end
        } else {
            continue;
        };
        match mode {
            EdgeLabelsDrawingMode::Hide => label.visible = false,
            EdgeLabelsDrawingMode::Shift => {
                label.rect = if is_vertical {
                    label.rect.translate(0.0, shift)
                } else {
                    label.rect.translate(shift, 0.0)
                };
            }
            EdgeLabelsDrawingMode::Center => {}
        }
    }
}

/// Assigns rows and hides overlapping labels; returns the row count.
fn resolve_intersections(
    labels: &mut [AxisLabel],
    action: LabelsIntersectAction,
    margin: f64,
    is_vertical: bool,
) -> usize {
    let mut order: Vec<usize> = (0..labels.len())
        .filter(|index| labels[*index].visible)
        .collect();
    if order.is_empty() {
        return 0;
    }
    order.sort_by_key(|index| OrderedFloat(along_span(labels[*index].rect, is_vertical).0));

    let expand = |rect: Rect| {
        if is_vertical {
            rect.inflate(0.0, margin / 2.0)
        } else {
            rect.inflate(margin / 2.0, 0.0)
        }
    };

    match action {
        LabelsIntersectAction::None => 1,
        LabelsIntersectAction::Hide => {
            let mut last_kept: Option<Rect> = None;
            for index in order {
                let rect = expand(labels[index].rect);
                match last_kept {
                    Some(kept) if kept.intersects(rect) => labels[index].visible = false,
                    _ => last_kept = Some(rect),
                }
            }
            1
        }
        LabelsIntersectAction::MultipleRows => {
            let mut rows: Vec<Vec<Rect>> = Vec::new();
            for index in order {
                let rect = expand(labels[index].rect);
                let row = rows
                    .iter()
                    .position(|row| row.iter().all(|placed| !placed.intersects(rect)));
                let row = match row {
                    Some(row) => row,
                    None => {
                        rows.push(Vec::new());
                        rows.len() - 1
                    }
                };
                rows[row].push(rect);
                labels[index].row = row;
            }
            rows.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisLabelLayout, resolve_intersections};
    use crate::core::axis_labels::{AxisLabel, LabelsIntersectAction};
    use crate::core::types::{Rect, Size};
    use crate::layout::axis_layout::AxisEdge;

    fn label(left: f64, width: f64) -> AxisLabel {
        let mut label = AxisLabel::new(left, format!("{left}"));
        label.size = Size::new(width, 10.0);
        label.rect = Rect::new(left, 0.0, width, 10.0);
        label
    }

    #[test]
    fn overlapping_labels_move_to_a_second_row() {
        let mut labels = vec![label(0.0, 30.0), label(20.0, 30.0), label(60.0, 30.0)];
        let rows =
            resolve_intersections(&mut labels, LabelsIntersectAction::MultipleRows, 0.0, false);
        assert_eq!(rows, 2);
        assert_eq!(labels[1].row, 1);
        assert_eq!(labels[2].row, 0);
    }

    #[test]
    fn hide_keeps_the_first_of_two_colliding_labels() {
        let mut labels = vec![label(0.0, 30.0), label(20.0, 30.0)];
        resolve_intersections(&mut labels, LabelsIntersectAction::Hide, 0.0, false);
        assert!(labels[0].visible);
        assert!(!labels[1].visible);
    }

    #[test]
    fn bottom_rows_stack_downward() {
        let layout = AxisLabelLayout {
            row_extents: vec![10.0, 10.0],
            margin: 2.0,
        };
        let mut labels = vec![label(0.0, 30.0), label(20.0, 30.0)];
        labels[1].row = 1;
        layout.place(&mut labels, AxisEdge::Bottom, 100.0, 5.0);
        assert_eq!(labels[0].rect.top, 107.0);
        assert_eq!(labels[1].rect.top, 119.0);
        assert_eq!(layout.band_extent(), 24.0);
    }
}
