use approx::assert_relative_eq;
use chart_kit::core::axis::{Axis, AxisConfig, AxisId};
use chart_kit::core::zoom::{AutoScrollingMode, DEFAULT_ZOOM_STEP, ZoomState, auto_scrolling_state};
use chart_kit::core::{DoubleRange, Size};
use proptest::prelude::*;

#[test]
fn zoom_by_range_shows_the_requested_window() {
    let actual = DoubleRange::new(0.0, 200.0);
    let state = ZoomState::zoom_by_range(actual, 50.0, 150.0, 0.01);
    assert_relative_eq!(state.factor(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(state.position(), 0.25, epsilon = 1e-12);

    let visible = state.visible_range(actual);
    assert_relative_eq!(visible.start(), 50.0, epsilon = 1e-9);
    assert_relative_eq!(visible.end(), 150.0, epsilon = 1e-9);
}

#[test]
fn zoom_by_range_on_a_flat_axis_resets() {
    let actual = DoubleRange::new(5.0, 5.0);
    assert_eq!(ZoomState::zoom_by_range(actual, 1.0, 2.0, 0.01), ZoomState::full());
}

#[test]
fn nan_zoom_inputs_fall_back_to_full_view() {
    assert_eq!(ZoomState::clamped(f64::NAN, f64::NAN, 0.01), ZoomState::full());
}

#[test]
fn zoom_in_stops_at_minimum_factor() {
    let mut state = ZoomState::full();
    for _ in 0..100 {
        state = state.zoom_in(DEFAULT_ZOOM_STEP, 0.1);
    }
    assert_relative_eq!(state.factor(), 0.1, epsilon = 1e-12);
}

#[test]
fn pan_stops_at_the_range_end() {
    let state = ZoomState::clamped(0.25, 0.5, 0.01).pan_by(10.0, 0.01);
    assert_relative_eq!(state.position(), 0.75, epsilon = 1e-12);
    let state = state.pan_by(-10.0, 0.01);
    assert_eq!(state.position(), 0.0);
}

#[test]
fn start_auto_scrolling_pins_the_first_window() {
    let actual = DoubleRange::new(0.0, 100.0);
    let state = auto_scrolling_state(actual, 10.0, AutoScrollingMode::Start, 0.01)
        .expect("delta is smaller than the range");
    let visible = state.visible_range(actual);
    assert_relative_eq!(visible.start(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(visible.end(), 10.0, epsilon = 1e-9);
}

#[test]
fn auto_scrolling_delta_covering_the_range_is_ignored() {
    let actual = DoubleRange::new(0.0, 100.0);
    assert!(auto_scrolling_state(actual, 100.0, AutoScrollingMode::End, 0.01).is_none());
    assert!(auto_scrolling_state(actual, -1.0, AutoScrollingMode::End, 0.01).is_none());
}

#[test]
fn axis_with_auto_scrolling_shows_the_latest_window() {
    let config = AxisConfig::numeric("x").with_auto_scrolling(20.0, AutoScrollingMode::End);
    let mut axis = Axis::new(AxisId(0), config, false);
    axis.update_range(DoubleRange::new(0.0, 100.0), Size::new(400.0, 300.0));

    let visible = axis.visible_range();
    assert_relative_eq!(visible.start(), 80.0, epsilon = 1e-9);
    assert_relative_eq!(visible.end(), 100.0, epsilon = 1e-9);
}

#[test]
fn user_zoom_is_kept_over_auto_scrolling() {
    let config = AxisConfig::numeric("x").with_auto_scrolling(20.0, AutoScrollingMode::End);
    let mut axis = Axis::new(AxisId(0), config, false);
    axis.set_zoom_state(ZoomState::clamped(0.5, 0.0, 0.01));
    axis.update_range(DoubleRange::new(0.0, 100.0), Size::new(400.0, 300.0));

    assert_relative_eq!(axis.visible_range().end(), 50.0, epsilon = 1e-9);
}

#[test]
fn zooming_recomputes_the_visible_interval() {
    let mut axis = Axis::new(AxisId(0), AxisConfig::numeric("x"), false);
    axis.update_range(DoubleRange::new(0.0, 100.0), Size::new(500.0, 500.0));
    let full_interval = axis.visible_interval();

    axis.set_zoom_state(ZoomState::clamped(0.1, 0.0, 0.01));
    assert!(axis.visible_interval() < full_interval);
    assert_eq!(axis.actual_interval(), full_interval);
}

proptest! {
    #[test]
    fn zoom_in_then_out_restores_the_window_property(factor in 0.2f64..0.8) {
        let start = ZoomState::clamped(factor, (1.0 - factor) / 2.0, 0.01);
        let restored = start
            .zoom_in(DEFAULT_ZOOM_STEP, 0.01)
            .zoom_out(DEFAULT_ZOOM_STEP, 0.01);
        prop_assert!((restored.factor() - start.factor()).abs() <= 1e-12);
        prop_assert!((restored.position() - start.position()).abs() <= 1e-12);
    }

    #[test]
    fn visible_range_stays_inside_actual_property(
        start in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        factor in -1.0f64..2.0,
        position in -1.0f64..2.0,
        min_factor in 0.0f64..0.5,
    ) {
        let actual = DoubleRange::new(start, start + span);
        let state = ZoomState::clamped(factor, position, min_factor);
        let visible = state.visible_range(actual);
        let tolerance = 1e-9 * span.max(start.abs());

        prop_assert!(state.factor() > 0.0 && state.factor() <= 1.0);
        prop_assert!(visible.start() >= actual.start() - tolerance);
        prop_assert!(visible.end() <= actual.end() + tolerance);
    }

    #[test]
    fn zoom_at_keeps_the_focal_value_property(
        factor in 0.1f64..1.0,
        origin in 0.0f64..1.0,
        step in 1.01f64..3.0,
    ) {
        let state = ZoomState::clamped(factor, (1.0 - factor) / 2.0, 0.001);
        let focal = state.position() + origin * state.factor();
        let zoomed = state.zoom_at(state.zoom_level() * step, origin, 0.001);
        let after = zoomed.position() + origin * zoomed.factor();
        prop_assert!((focal - after).abs() <= 1e-9);
    }
}
