use approx::assert_relative_eq;
use chart_kit::ChartError;
use chart_kit::api::{AxisRole, ChartArea, ChartAreaConfig, ChartAreaKind, LegendIcon};
use chart_kit::core::axis::AxisConfig;
use chart_kit::core::{Point, SeriesConfig, SeriesId, SeriesKind, SeriesPoint, Size};
use chart_kit::interaction::{InteractionMode, ZoomMode, ZoomPanBehavior};
use chart_kit::layout::AxisEdge;

fn column_area() -> (ChartArea, SeriesId) {
    let mut area =
        ChartArea::new(ChartAreaConfig::new(Size::new(640.0, 480.0))).expect("valid config");
    let id = area
        .add_series(SeriesConfig::new("sales", SeriesKind::column()))
        .expect("add series");
    let points = (1..=5)
        .map(|x| SeriesPoint::xy(f64::from(x), f64::from(x) * 10.0))
        .collect();
    area.set_series_points(id, points).expect("set points");
    area.update();
    (area, id)
}

fn center_of(area: &ChartArea, id: SeriesId, index: usize) -> Point {
    area.series(id)
        .expect("series")
        .segments()
        .iter()
        .find(|segment| segment.index == index)
        .expect("segment exists")
        .geometry
        .bounds()
        .center()
}

#[test]
fn update_lays_out_plot_segments_and_labels() {
    let (area, id) = column_area();

    let plot = area.plot_rect();
    assert!(plot.is_finite());
    assert!(plot.width > 0.0 && plot.height > 0.0);
    assert!(plot.right() <= 640.0 + 1e-9);
    assert!(plot.bottom() <= 480.0 + 1e-9);

    let series = area.series(id).expect("series");
    assert_eq!(series.segments().len(), 5);
    for segment in series.segments() {
        assert!(plot.inflate(1e-6, 1e-6).contains_rect(segment.geometry.bounds()));
    }
    assert_eq!(area.data_labels(id).expect("labels").len(), 5);
}

#[test]
fn hit_test_and_tooltip_find_the_bar_under_the_pointer() {
    let (area, id) = column_area();
    let center = center_of(&area, id, 2);

    let hit = area.hit_test(center).expect("bar under pointer");
    assert_eq!(hit.series, id);
    assert_eq!(hit.index, 2);
    assert_eq!(area.series_point_at(id, center).expect("series"), Some(2));

    let tooltip = area.tooltip_at(center).expect("tooltip");
    assert_eq!(tooltip.y_value, 30.0);
    assert!(tooltip.text.contains(" : "));
    assert!(tooltip.text.ends_with("30"));

    let outside = Point::new(-10.0, -10.0);
    assert!(area.hit_test(outside).is_none());
    assert!(area.tooltip_at(outside).is_none());
}

#[test]
fn category_tooltip_uses_the_category_label() {
    let config = ChartAreaConfig::new(Size::new(640.0, 480.0))
        .with_primary_axes(AxisConfig::category("month"), AxisConfig::numeric("sales"));
    let mut area = ChartArea::new(config).expect("valid config");
    let id = area
        .add_series(SeriesConfig::new("sales", SeriesKind::column()))
        .expect("add series");
    area.set_series_points(
        id,
        vec![
            SeriesPoint::xy("Jan", 20.0),
            SeriesPoint::xy("Feb", 40.0),
            SeriesPoint::xy("Mar", 30.0),
        ],
    )
    .expect("set points");
    area.update();

    let tooltip = area.tooltip_at(center_of(&area, id, 1)).expect("tooltip");
    assert_eq!(tooltip.index, 1);
    assert!(tooltip.text.starts_with("Feb : "));
}

#[test]
fn point_to_values_inverts_the_primary_axes() {
    let (area, id) = column_area();
    let series = area.series(id).expect("series");
    let x_axis = area.axis(area.primary_x_axis()).expect("x axis");
    let y_axis = area.axis(area.primary_y_axis()).expect("y axis");
    let pixel = Point::new(x_axis.value_to_point(3.0), y_axis.value_to_point(25.0));

    let (x, y) = area.point_to_values(pixel);
    assert_relative_eq!(x, 3.0, epsilon = 1e-9);
    assert_relative_eq!(y, 25.0, epsilon = 1e-9);
    assert_eq!(series.x_axis(), Some(area.primary_x_axis()));
}

#[test]
fn unknown_axis_name_falls_back_to_the_primary_axis() {
    let mut area =
        ChartArea::new(ChartAreaConfig::new(Size::new(400.0, 300.0))).expect("valid config");
    let id = area
        .add_series(
            SeriesConfig::new("orphan", SeriesKind::line()).with_axes("missing", "primaryYAxis"),
        )
        .expect("add series");
    area.set_series_points(id, vec![SeriesPoint::xy(0.0, 1.0), SeriesPoint::xy(1.0, 2.0)])
        .expect("set points");
    area.update();

    let series = area.series(id).expect("series");
    assert_eq!(series.x_axis(), Some(area.primary_x_axis()));
    assert_eq!(series.y_axis(), Some(area.primary_y_axis()));
    assert!(!series.segments().is_empty());
}

#[test]
fn secondary_axis_carries_its_own_range() {
    let mut area =
        ChartArea::new(ChartAreaConfig::new(Size::new(640.0, 480.0))).expect("valid config");
    let volume = area
        .add_axis(AxisRole::Y, AxisConfig::numeric("volume").with_opposed(true))
        .expect("add axis");
    let prices = area
        .add_series(SeriesConfig::new("price", SeriesKind::line()))
        .expect("add series");
    let traded = area
        .add_series(
            SeriesConfig::new("volume", SeriesKind::column()).with_axes("primaryXAxis", "volume"),
        )
        .expect("add series");
    area.set_series_points(prices, vec![SeriesPoint::xy(1.0, 10.0), SeriesPoint::xy(2.0, 12.0)])
        .expect("set points");
    area.set_series_points(
        traded,
        vec![SeriesPoint::xy(1.0, 5_000.0), SeriesPoint::xy(2.0, 9_000.0)],
    )
    .expect("set points");
    area.update();

    assert_eq!(area.series(traded).expect("series").y_axis(), Some(volume));
    let range = area.axis(volume).expect("volume axis").actual_range();
    assert!(range.inside(9_000.0));
    assert!(!area.axis(area.primary_y_axis()).expect("y axis").actual_range().inside(9_000.0));
    let layout = area.layout().layout_of(volume).expect("volume axis was arranged");
    assert_eq!(layout.edge, AxisEdge::Right);
}

#[test]
fn toggled_series_is_not_drawn_or_hit() {
    let (mut area, id) = column_area();
    let center = center_of(&area, id, 0);

    assert!(area.toggle_series(id).expect("toggle"));
    area.update();

    let series = area.series(id).expect("series");
    assert!(!series.is_drawn());
    assert!(series.segments().is_empty());
    assert!(area.hit_test(center).is_none());
    assert!(area.legend_items()[0].is_toggled);

    assert!(!area.toggle_series(id).expect("toggle"));
}

#[test]
fn circular_area_lists_one_legend_item_per_point() {
    let config = ChartAreaConfig::new(Size::new(300.0, 300.0)).with_kind(ChartAreaKind::Circular);
    let mut area = ChartArea::new(config).expect("valid config");
    let pie = area
        .add_series(SeriesConfig::new("share", SeriesKind::pie()))
        .expect("add series");
    let line = area
        .add_series(SeriesConfig::new("ignored", SeriesKind::line()))
        .expect("add series");
    area.set_series_points(
        pie,
        vec![
            SeriesPoint::xy("North", 1.0),
            SeriesPoint::xy("South", 1.0),
            SeriesPoint::xy("West", 2.0),
        ],
    )
    .expect("set points");
    area.set_series_points(line, vec![SeriesPoint::xy(0.0, 1.0)])
        .expect("set points");
    area.update();

    let items = area.legend_items();
    let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(texts, vec!["North", "South", "West"]);
    assert!(items.iter().all(|item| item.icon == LegendIcon::Pie));
    assert_eq!(items[2].point, Some(2));

    assert_eq!(area.series(pie).expect("pie").segments().len(), 3);
    assert!(area.series(line).expect("line").segments().is_empty());
    assert_eq!(area.plot_rect().width, 300.0);
}

#[test]
fn config_survives_a_json_round_trip() {
    let config = ChartAreaConfig::new(Size::new(800.0, 600.0))
        .with_transposed(true)
        .with_secondary_axis(AxisRole::Y, AxisConfig::numeric("volume").with_opposed(true))
        .with_zoom_pan(
            ZoomPanBehavior::default()
                .with_zoom_mode(ZoomMode::X)
                .with_maximum_zoom_level(20.0),
        );
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartAreaConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);

    let area = ChartArea::new(parsed).expect("valid config");
    assert_eq!(area.config(), config);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        ChartAreaConfig::from_json_str("{\"size\": 3"),
        Err(ChartError::InvalidConfig(_))
    ));
}

#[test]
fn invalid_size_is_rejected() {
    assert!(matches!(
        ChartArea::new(ChartAreaConfig::new(Size::new(-1.0, 100.0))),
        Err(ChartError::InvalidSize { .. })
    ));

    let (mut area, _) = column_area();
    assert!(matches!(
        area.set_size(Size::new(f64::NAN, 100.0)),
        Err(ChartError::InvalidSize { .. })
    ));
    assert_eq!(area.size(), Size::new(640.0, 480.0));
}

#[test]
fn wheel_over_the_plot_zooms_and_outside_does_nothing() {
    let (mut area, _) = column_area();
    let x_axis = area.primary_x_axis();
    let plot = area.plot_rect();

    assert!(!area.mouse_wheel(Point::new(plot.left - 5.0, plot.top + 5.0), 1.0));
    assert!(!area.axis(x_axis).expect("x axis").zoom_state().is_zoomed());

    assert!(area.mouse_wheel(plot.center(), 1.0));
    let zoom = area.axis(x_axis).expect("x axis").zoom_state();
    assert!(zoom.is_zoomed());
    assert!(zoom.factor() < 1.0);

    assert!(area.reset_zoom());
    assert!(!area.axis(x_axis).expect("x axis").zoom_state().is_zoomed());
    assert!(!area.reset_zoom());
}

#[test]
fn zoom_mode_limits_gestures_to_one_direction() {
    let (mut area, _) = column_area();
    area.set_zoom_pan_behavior(ZoomPanBehavior::default().with_zoom_mode(ZoomMode::X))
        .expect("valid behavior");

    assert!(area.zoom_step(true));
    assert!(area.axis(area.primary_x_axis()).expect("x").zoom_state().is_zoomed());
    assert!(!area.axis(area.primary_y_axis()).expect("y").zoom_state().is_zoomed());
}

#[test]
fn pan_needs_an_active_pan_gesture() {
    let (mut area, _) = column_area();
    let x_axis = area.primary_x_axis();
    area.zoom_axis_to_range(x_axis, 2.0, 3.0).expect("zoom");
    let before = area.axis(x_axis).expect("x axis").visible_range();

    assert!(!area.pan(Point::new(40.0, 0.0)));
    assert_eq!(area.interaction_mode(), InteractionMode::Idle);

    area.pan_start();
    assert_eq!(area.interaction_mode(), InteractionMode::Panning);
    assert!(area.pan(Point::new(40.0, 0.0)));
    area.pan_end();

    // Dragging right reveals smaller values.
    let after = area.axis(x_axis).expect("x axis").visible_range();
    assert!(after.start() < before.start());
    assert_relative_eq!(after.delta(), before.delta(), epsilon = 1e-9);
    assert_eq!(area.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn zoom_axis_to_range_shows_the_requested_window() {
    let (mut area, _) = column_area();
    let x_axis = area.primary_x_axis();
    area.zoom_axis_to_range(x_axis, 2.0, 4.0).expect("zoom");

    let visible = area.axis(x_axis).expect("x axis").visible_range();
    assert_relative_eq!(visible.start(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(visible.end(), 4.0, epsilon = 1e-9);
}

#[test]
fn double_tap_zooms_in_then_resets() {
    let (mut area, _) = column_area();
    let center = area.plot_rect().center();

    assert!(area.double_tap(center));
    assert!(area.axis(area.primary_x_axis()).expect("x").zoom_state().is_zoomed());
    assert!(area.double_tap(center));
    assert!(!area.axis(area.primary_x_axis()).expect("x").zoom_state().is_zoomed());
}

#[test]
fn selection_zoom_narrows_to_the_dragged_rect() {
    let (mut area, _) = column_area();
    let x_axis = area.primary_x_axis();
    let (left, right) = {
        let axis = area.axis(x_axis).expect("x axis");
        (axis.value_to_point(2.0), axis.value_to_point(4.0))
    };
    let plot = area.plot_rect();
    assert!(area.selection_zoom(Point::new(left, plot.top), Point::new(right, plot.bottom())));

    let visible = area.axis(x_axis).expect("x axis").visible_range();
    assert_relative_eq!(visible.start(), 2.0, epsilon = 1e-6);
    assert_relative_eq!(visible.end(), 4.0, epsilon = 1e-6);
}

#[test]
fn primary_axes_cannot_be_removed_but_secondary_ones_can() {
    let mut area =
        ChartArea::new(ChartAreaConfig::new(Size::new(400.0, 300.0))).expect("valid config");
    assert!(matches!(
        area.remove_axis(area.primary_y_axis()),
        Err(ChartError::InvalidConfig(_))
    ));

    let volume = area
        .add_axis(AxisRole::Y, AxisConfig::numeric("volume"))
        .expect("add axis");
    assert_eq!(area.axis_role(volume).expect("role"), AxisRole::Y);
    area.remove_axis(volume).expect("remove axis");
    assert!(matches!(area.axis(volume), Err(ChartError::UnknownAxis(_))));
    assert_eq!(area.axes().count(), 2);
}

#[test]
fn transposed_area_draws_bars_horizontally() {
    let (mut area, id) = column_area();
    let upright = area.series(id).expect("series").segments()[4].geometry.bounds();
    assert!(upright.height > upright.width);

    area.set_transposed(true);
    area.update();

    assert!(area.is_transposed());
    let sideways = area.series(id).expect("series").segments()[4].geometry.bounds();
    assert!(sideways.width > sideways.height);
}

#[test]
fn removed_series_leave_the_legend() {
    let (mut area, id) = column_area();
    assert_eq!(area.legend_items().len(), 1);
    area.remove_series(id).expect("remove");
    area.update();
    assert!(area.legend_items().is_empty());
    assert!(matches!(
        area.data_labels(id),
        Err(ChartError::UnknownSeries(_))
    ));
}

#[test]
fn polar_area_accepts_only_kinds_with_polar_geometry() {
    let config = ChartAreaConfig::new(Size::new(400.0, 400.0)).with_kind(ChartAreaKind::Polar);
    let mut area = ChartArea::new(config).expect("valid config");

    for kind in [SeriesKind::column(), SeriesKind::candle()] {
        assert!(matches!(
            area.add_series(SeriesConfig::new("bars", kind)),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    let id = area
        .add_series(SeriesConfig::new("radar", SeriesKind::line()))
        .expect("line is polar");
    area.set_series_points(
        id,
        (0..4).map(|x| SeriesPoint::xy(f64::from(x), 10.0)).collect(),
    )
    .expect("set points");
    area.update();
    assert!(!area.series(id).expect("series").segments().is_empty());

    assert!(matches!(
        area.set_series_config(id, SeriesConfig::new("radar", SeriesKind::column())),
        Err(ChartError::InvalidConfig(_))
    ));
}
