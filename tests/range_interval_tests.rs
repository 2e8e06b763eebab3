use approx::assert_relative_eq;
use chart_kit::core::axis::{Axis, AxisConfig, AxisId, AxisKind, LogarithmicAxisParams, NumericAxisParams};
use chart_kit::core::category_axis::group_data;
use chart_kit::core::log_axis::{get_log_value, get_pow_value};
use chart_kit::core::numeric_axis;
use chart_kit::core::{DoubleRange, Size};
use proptest::prelude::*;

#[test]
fn vertical_axis_over_zero_to_hundred_uses_interval_twenty() {
    let mut axis = Axis::new(AxisId(0), AxisConfig::numeric("y"), true);
    axis.update_range(DoubleRange::new(0.0, 100.0), Size::new(500.0, 500.0));

    assert_eq!(axis.actual_interval(), 20.0);
    assert_eq!(axis.actual_range(), DoubleRange::new(0.0, 100.0));
    let values: Vec<f64> = axis.visible_labels().iter().map(|label| label.value).collect();
    assert_eq!(values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
}

#[test]
fn explicit_interval_wins_over_nice_interval() {
    let config = AxisConfig::numeric("y").with_interval(7.0);
    let mut axis = Axis::new(AxisId(0), config, true);
    axis.update_range(DoubleRange::new(0.0, 100.0), Size::new(500.0, 500.0));
    assert_eq!(axis.actual_interval(), 7.0);
}

#[test]
fn non_positive_interval_is_treated_as_auto() {
    assert_eq!(numeric_axis::explicit_interval(Some(0.0)), None);
    assert_eq!(numeric_axis::explicit_interval(Some(-2.0)), None);
    assert_eq!(numeric_axis::explicit_interval(Some(f64::NAN)), None);
}

#[test]
fn degenerate_data_is_repaired_to_a_unit_range() {
    let repaired = numeric_axis::calculate_actual_range(DoubleRange::new(4.0, 4.0), None, None);
    assert_eq!(repaired, DoubleRange::new(4.0, 5.0));

    let nothing = numeric_axis::calculate_actual_range(DoubleRange::EMPTY, None, None);
    assert_eq!(nothing, DoubleRange::new(0.0, 1.0));
}

#[test]
fn overrides_replace_only_the_side_they_set() {
    let range = numeric_axis::calculate_actual_range(DoubleRange::new(3.0, 97.0), Some(-10.0), None);
    assert_eq!(range, DoubleRange::new(-10.0, 97.0));

    let config = AxisConfig::new(
        "y",
        AxisKind::Numeric(NumericAxisParams {
            maximum: Some(50.0),
            ..NumericAxisParams::default()
        }),
    );
    let axis = Axis::new(AxisId(0), config, true);
    assert_eq!(
        axis.calculate_actual_range(DoubleRange::new(3.0, 97.0)),
        DoubleRange::new(3.0, 50.0)
    );
}

#[test]
fn logarithmic_axis_keeps_exponents_and_shows_raw_values() {
    let config = AxisConfig::new("log", AxisKind::Logarithmic(LogarithmicAxisParams::default()));
    let mut axis = Axis::new(AxisId(0), config, true);
    axis.update_range(DoubleRange::new(1.0, 1000.0), Size::new(500.0, 500.0));

    assert_eq!(axis.visible_range(), DoubleRange::new(0.0, 3.0));
    let shown = axis.visible_value_range();
    assert_relative_eq!(shown.start(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(shown.end(), 1000.0, epsilon = 1e-6);
}

#[test]
fn non_positive_values_have_no_logarithm() {
    assert!(get_log_value(0.0, 10.0).is_nan());
    assert!(get_log_value(-5.0, 10.0).is_nan());
}

#[test]
fn category_grouping_is_idempotent() {
    let first = ["Jan", "Feb", "Mar"];
    let second = ["Feb", "Apr", "Jan"];
    let once = group_data(&[&first[..], &second[..]]);
    let twice = group_data(&[&first[..], &second[..]]);

    assert_eq!(once.grouped_x_values, twice.grouped_x_values);
    assert_eq!(once.grouped_x_values, vec!["Jan", "Feb", "Mar", "Apr"]);
    assert_eq!(once.indices[1], vec![1.0, 3.0, 0.0]);
}

proptest! {
    #[test]
    fn log_pow_round_trip_property(exponent in -300.0f64..300.0) {
        let recovered = get_log_value(get_pow_value(exponent, 10.0), 10.0);
        prop_assert!((recovered - exponent).abs() <= 1e-9);
    }

    #[test]
    fn log_round_trip_any_base_property(exponent in -50.0f64..50.0, base in 1.5f64..20.0) {
        let recovered = get_log_value(get_pow_value(exponent, base), base);
        prop_assert!((recovered - exponent).abs() <= 1e-9 * exponent.abs().max(1.0));
    }

    #[test]
    fn padded_range_contains_the_data_property(
        start in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        length in 50.0f64..2000.0,
    ) {
        let data = DoubleRange::new(start, start + span);
        let mut axis = Axis::new(AxisId(0), AxisConfig::numeric("y"), true);
        axis.update_range(data, Size::new(length, length));

        let actual = axis.actual_range();
        prop_assert!(axis.actual_interval() > 0.0);
        let tolerance = 1e-9 * data.start().abs().max(data.end().abs()).max(1.0);
        prop_assert!(actual.start() <= data.start() + tolerance);
        prop_assert!(actual.end() >= data.end() - tolerance);
    }
}
