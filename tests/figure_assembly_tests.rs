use chan_chart::config::DisplayConfig;
use chan_chart::core::{SignalSide, SwingDirection};
use chan_chart::render::{
    CandleSeries, ChartLayer, FigureSpec, PivotPolygon, SignalMarker, SwingLine,
    VisualizationBundle, assemble_figure,
};

fn full_bundle() -> VisualizationBundle {
    let mut candles = CandleSeries::default();
    for (i, close) in [10.0, 11.0, 12.0].iter().enumerate() {
        candles.timestamps.push(format!("2024-01-{:02}", i + 1));
        candles.open.push(close - 0.5);
        candles.high.push(close + 1.0);
        candles.low.push(close - 1.0);
        candles.close.push(*close);
    }
    VisualizationBundle {
        candles,
        strokes: vec![SwingLine {
            x: [0, 2],
            y: [10.0, 12.0],
            kind: "stroke".to_owned(),
            direction: SwingDirection::Up,
        }],
        segments: vec![SwingLine {
            x: [0, 2],
            y: [10.0, 12.0],
            kind: "segment".to_owned(),
            direction: SwingDirection::Up,
        }],
        pivot_zones: vec![PivotPolygon::closed_rect(0, 1, 9.5, 11.5, "pivot")],
        signals: vec![SignalMarker {
            index: 2,
            price: 12.0,
            side: SignalSide::Buy,
            kind: "1st".to_owned(),
        }],
    }
}

#[test]
fn layers_are_stacked_in_fixed_draw_order() {
    let figure = assemble_figure(&full_bundle(), &DisplayConfig::default());
    assert_eq!(
        figure.layer_names(),
        vec!["k_lines", "pivot_zones", "strokes", "segments", "signal_points"]
    );
}

#[test]
fn base_layer_survives_every_visibility_combination() {
    let config = DisplayConfig {
        show_strokes: false,
        show_segments: false,
        show_pivot_zones: false,
        show_signal_points: false,
        ..DisplayConfig::default()
    };
    let figure = assemble_figure(&full_bundle(), &config);
    assert_eq!(figure.layer_names(), vec!["k_lines"]);
    assert!(matches!(
        figure.layers[0],
        ChartLayer::CandlestickSeries { .. }
    ));
}

#[test]
fn empty_layer_is_omitted_even_when_enabled() {
    let mut bundle = full_bundle();
    bundle.signals.clear();
    let figure = assemble_figure(&bundle, &DisplayConfig::default());
    assert!(!figure.layer_names().contains(&"signal_points"));
    assert!(figure.layer_names().contains(&"strokes"));
}

#[test]
fn assembly_does_not_consume_or_alter_the_bundle() {
    let bundle = full_bundle();
    let before = bundle.clone();
    let _ = assemble_figure(&bundle, &DisplayConfig::default());
    assert_eq!(bundle, before);
}

#[test]
fn figure_spec_round_trips_through_json() {
    let figure = assemble_figure(&full_bundle(), &DisplayConfig::default());
    let encoded = serde_json::to_string(&figure).expect("serialize");
    let decoded: FigureSpec = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, figure);
}

#[test]
fn marker_side_stays_data_not_geometry() {
    let figure = assemble_figure(&full_bundle(), &DisplayConfig::default());
    let markers = figure
        .layers
        .iter()
        .find_map(|layer| match layer {
            ChartLayer::MarkerPoints { markers, .. } => Some(markers),
            _ => None,
        })
        .expect("marker layer present");
    assert_eq!(markers[0].side, SignalSide::Buy);
}
