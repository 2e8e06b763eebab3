use serde::{Deserialize, Serialize};

/// How NaN y values are treated before segments are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyPointMode {
    /// Keep NaN; the segment is flagged empty and not drawn.
    #[default]
    None,
    Zero,
    /// Average of the neighbouring values.
    Average,
}

/// Replaces NaN entries of `values` according to `mode`.
///
/// `Average` walks left to right: a gap uses the already replaced value on
/// its left and the raw value on its right (0 when that is also NaN). The
/// first and last entries only have one neighbour and take half of it.
#[must_use]
pub fn replace_empty_points(values: &[f64], mode: EmptyPointMode) -> Vec<f64> {
    match mode {
        EmptyPointMode::None => values.to_vec(),
        EmptyPointMode::Zero => values
            .iter()
            .map(|value| if value.is_nan() { 0.0 } else { *value })
            .collect(),
        EmptyPointMode::Average => average_fill(values),
    }
}

fn average_fill(values: &[f64]) -> Vec<f64> {
    let mut filled = values.to_vec();
    let count = filled.len();
    if count == 0 {
        return filled;
    }
    if count == 1 {
        if filled[0].is_nan() {
            filled[0] = 0.0;
        }
        return filled;
    }

    let or_zero = |value: f64| if value.is_nan() { 0.0 } else { value };
    for index in 0..count {
        if !filled[index].is_nan() {
            continue;
        }
        filled[index] = if index == 0 {
            or_zero(values[1]) / 2.0
        } else if index == count - 1 {
            filled[index - 1] / 2.0
        } else {
            (filled[index - 1] + or_zero(values[index + 1])) / 2.0
        };
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::{EmptyPointMode, replace_empty_points};

    #[test]
    fn leading_gap_takes_half_of_next_value() {
        let filled = replace_empty_points(&[f64::NAN, 4.0, 5.0], EmptyPointMode::Average);
        assert_eq!(filled, vec![2.0, 4.0, 5.0]);
    }

    #[test]
    fn consecutive_gaps_chain_through_replaced_values() {
        let filled = replace_empty_points(&[1.0, f64::NAN, f64::NAN, 4.0], EmptyPointMode::Average);
        assert_eq!(filled, vec![1.0, 0.5, 2.25, 4.0]);
    }

    #[test]
    fn none_keeps_gaps() {
        let filled = replace_empty_points(&[1.0, f64::NAN], EmptyPointMode::None);
        assert!(filled[1].is_nan());
    }
}
