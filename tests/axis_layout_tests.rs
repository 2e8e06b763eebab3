use approx::assert_relative_eq;
use chart_kit::core::axis::{Axis, AxisConfig, AxisId};
use chart_kit::core::axis_labels::EdgeLabelsDrawingMode;
use chart_kit::core::{AxisLabelStyle, DoubleRange, Rect};
use chart_kit::layout::{ApproximateLabelMeasurer, AxisEdge, AxisLayoutEngine, LayoutPhase};

const AREA: Rect = Rect::new(0.0, 0.0, 640.0, 480.0);

fn ranged(id: usize, config: AxisConfig, is_vertical: bool, range: DoubleRange) -> Axis {
    let mut axis = Axis::new(AxisId(id), config, is_vertical);
    axis.update_range(range, AREA.size());
    axis
}

fn arrange(axes: &mut [Axis]) -> (AxisLayoutEngine, Rect) {
    let measurer = ApproximateLabelMeasurer::default();
    let mut engine = AxisLayoutEngine::new();
    engine.begin();
    engine.measure(axes, AREA, &measurer);
    let plot = engine.arrange(axes, AREA, &measurer);
    (engine, plot)
}

fn desired(engine: &AxisLayoutEngine, id: usize) -> f64 {
    engine
        .layout_of(AxisId(id))
        .expect("axis was measured")
        .desired_size
}

#[test]
fn edge_axes_reserve_their_bands() {
    let mut axes = vec![
        ranged(0, AxisConfig::numeric("x"), false, DoubleRange::new(0.0, 10.0)),
        ranged(1, AxisConfig::numeric("y"), true, DoubleRange::new(0.0, 1000.0)),
    ];
    let (engine, plot) = arrange(&mut axes);

    assert_eq!(engine.phase(), LayoutPhase::Complete);
    assert_relative_eq!(plot.left, desired(&engine, 1), epsilon = 1e-9);
    assert_relative_eq!(plot.bottom(), AREA.bottom() - desired(&engine, 0), epsilon = 1e-9);
    assert_eq!(plot.top, 0.0);
    assert_relative_eq!(plot.right(), AREA.right(), epsilon = 1e-9);

    assert_relative_eq!(axes[0].rendered_rect().width, plot.width, epsilon = 1e-9);
    assert_relative_eq!(axes[1].rendered_rect().height, plot.height, epsilon = 1e-9);
    assert_eq!(engine.plot_rect(), Some(plot));
}

#[test]
fn opposed_vertical_axis_sits_on_the_right() {
    let mut axes = vec![
        ranged(0, AxisConfig::numeric("x"), false, DoubleRange::new(0.0, 10.0)),
        ranged(
            1,
            AxisConfig::numeric("y").with_opposed(true),
            true,
            DoubleRange::new(0.0, 100.0),
        ),
    ];
    let (engine, plot) = arrange(&mut axes);

    let layout = engine.layout_of(AxisId(1)).expect("axis was measured");
    assert_eq!(layout.edge, AxisEdge::Right);
    assert_relative_eq!(layout.line, plot.right(), epsilon = 1e-9);
    assert_relative_eq!(plot.right(), AREA.right() - layout.desired_size, epsilon = 1e-9);
    assert_eq!(plot.left, 0.0);
}

#[test]
fn axes_on_one_edge_stack_outward() {
    let mut axes = vec![
        ranged(0, AxisConfig::numeric("x"), false, DoubleRange::new(0.0, 10.0)),
        ranged(1, AxisConfig::numeric("y"), true, DoubleRange::new(0.0, 100.0)),
        ranged(2, AxisConfig::numeric("volume"), true, DoubleRange::new(0.0, 5.0)),
    ];
    let (engine, plot) = arrange(&mut axes);

    let inner = engine.layout_of(AxisId(1)).expect("axis was measured");
    let outer = engine.layout_of(AxisId(2)).expect("axis was measured");
    assert_relative_eq!(inner.line, plot.left, epsilon = 1e-9);
    assert_relative_eq!(outer.line, plot.left - inner.desired_size, epsilon = 1e-9);
    assert_relative_eq!(
        plot.left,
        inner.desired_size + outer.desired_size,
        epsilon = 1e-9
    );
}

#[test]
fn crossing_axis_sits_on_the_orthogonal_value() {
    let mut axes = vec![
        ranged(
            0,
            AxisConfig::numeric("x").with_crossing_value(0.0),
            false,
            DoubleRange::new(0.0, 10.0),
        ),
        ranged(
            1,
            AxisConfig::numeric("y").with_bounds(Some(-50.0), Some(50.0)),
            true,
            DoubleRange::EMPTY,
        ),
    ];
    let (engine, plot) = arrange(&mut axes);

    let layout = engine.layout_of(AxisId(0)).expect("axis was measured");
    assert!(layout.is_crossing());
    assert_relative_eq!(plot.bottom(), AREA.bottom(), epsilon = 1e-9);
    assert_relative_eq!(layout.line, axes[1].value_to_point(0.0), epsilon = 1e-9);
    assert_relative_eq!(layout.line, plot.top + plot.height / 2.0, epsilon = 1e-9);
}

#[test]
fn crossing_value_outside_the_range_falls_back_to_the_edge() {
    let mut axes = vec![
        ranged(
            0,
            AxisConfig::numeric("x").with_crossing_value(500.0),
            false,
            DoubleRange::new(0.0, 10.0),
        ),
        ranged(
            1,
            AxisConfig::numeric("y").with_bounds(Some(-50.0), Some(50.0)),
            true,
            DoubleRange::EMPTY,
        ),
    ];
    let (engine, plot) = arrange(&mut axes);

    let layout = engine.layout_of(AxisId(0)).expect("axis was measured");
    assert!(!layout.is_crossing());
    assert_relative_eq!(layout.line, plot.bottom(), epsilon = 1e-9);
}

#[test]
fn shifted_bottom_labels_stay_below_the_plot() {
    let style = AxisLabelStyle {
        edge_labels: EdgeLabelsDrawingMode::Shift,
        ..AxisLabelStyle::default()
    };
    let mut axes = vec![
        ranged(
            0,
            AxisConfig::numeric("x").with_labels(style),
            false,
            DoubleRange::new(0.0, 100.0),
        ),
        ranged(1, AxisConfig::numeric("y"), true, DoubleRange::new(0.0, 100.0)),
    ];
    let (_, plot) = arrange(&mut axes);

    let visible: Vec<_> = axes[0]
        .visible_labels()
        .iter()
        .filter(|label| label.visible)
        .collect();
    assert!(!visible.is_empty());
    for label in visible {
        assert!(label.rect.top >= plot.bottom());
        assert!(label.rect.left >= plot.left - 1e-9);
        assert!(label.rect.right() <= plot.right() + 1e-9);
    }
}

#[test]
fn titles_add_to_the_reserved_band() {
    let mut plain = vec![
        ranged(0, AxisConfig::numeric("x"), false, DoubleRange::new(0.0, 10.0)),
        ranged(1, AxisConfig::numeric("y"), true, DoubleRange::new(0.0, 100.0)),
    ];
    let mut titled = vec![
        ranged(
            0,
            AxisConfig::numeric("x").with_title("Month"),
            false,
            DoubleRange::new(0.0, 10.0),
        ),
        ranged(1, AxisConfig::numeric("y"), true, DoubleRange::new(0.0, 100.0)),
    ];
    let (plain_engine, _) = arrange(&mut plain);
    let (titled_engine, _) = arrange(&mut titled);

    assert!(desired(&titled_engine, 0) > desired(&plain_engine, 0));
    let title = titled_engine
        .layout_of(AxisId(0))
        .and_then(|layout| layout.title_rect)
        .expect("titled axis has a title rect");
    assert!(title.top > titled_engine.plot_rect().expect("arranged").bottom());
}
