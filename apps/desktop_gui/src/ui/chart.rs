//! Paints a [`ChartSpec`] with plain egui shapes.

use dashboard_core::chart::{ChartSpec, SeriesSpec, StrokeStyle};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};
use shared::protocol::BenchmarkRecord;

const GRID_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
const AXIS_COLOR: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
const READOUT_BG: Color32 = Color32::from_rgb(0x16, 0x1B, 0x22);
const READOUT_BORDER: Color32 = Color32::from_rgb(0x30, 0x36, 0x3D);

const LEFT_GUTTER: f32 = 64.0;
const RIGHT_GUTTER: f32 = 16.0;
const TOP_GUTTER: f32 = 8.0;
const BOTTOM_GUTTER: f32 = 40.0;
const LEGEND_HEIGHT: f32 = 24.0;
const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

pub fn benchmark_chart(
    ui: &mut egui::Ui,
    spec: &ChartSpec,
    records: &[BenchmarkRecord],
    height: f32,
) {
    let (response, painter) =
        ui.allocate_painter(egui::vec2(ui.available_width(), height), Sense::hover());
    let outer = response.rect;
    let plot = Rect::from_min_max(
        egui::pos2(outer.left() + LEFT_GUTTER, outer.top() + TOP_GUTTER),
        egui::pos2(
            outer.right() - RIGHT_GUTTER,
            outer.bottom() - BOTTOM_GUTTER - LEGEND_HEIGHT,
        ),
    );
    if plot.width() <= 0.0 || plot.height() <= 0.0 {
        return;
    }

    let to_screen = |x: f64, y: f64| -> Option<Pos2> {
        let tx = spec.x_axis.normalize(x)?;
        let ty = spec.y_axis.normalize(y)?;
        Some(egui::pos2(
            plot.left() + tx as f32 * plot.width(),
            plot.bottom() - ty as f32 * plot.height(),
        ))
    };

    let font = FontId::proportional(11.0);
    let grid = Stroke::new(1.0, GRID_COLOR);
    let axis = Stroke::new(1.0, AXIS_COLOR);

    for tick in spec.y_axis.ticks(Y_TICKS) {
        let Some(t) = spec.y_axis.normalize(tick) else {
            continue;
        };
        let y = plot.bottom() - t as f32 * plot.height();
        painter.extend(Shape::dashed_line(
            &[egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            grid,
            3.0,
            3.0,
        ));
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            spec.y_axis.format_tick(tick),
            font.clone(),
            AXIS_COLOR,
        );
    }

    for tick in spec.x_axis.ticks(X_TICKS) {
        let Some(t) = spec.x_axis.normalize(tick) else {
            continue;
        };
        let x = plot.left() + t as f32 * plot.width();
        painter.extend(Shape::dashed_line(
            &[egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())],
            grid,
            3.0,
            3.0,
        ));
        painter.text(
            egui::pos2(x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            spec.x_axis.format_tick(tick),
            font.clone(),
            AXIS_COLOR,
        );
    }

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
    painter.line_segment([plot.left_bottom(), plot.left_top()], axis);
    if let Some(label) = spec.x_axis.label {
        painter.text(
            egui::pos2(plot.center().x, plot.bottom() + 20.0),
            Align2::CENTER_TOP,
            label,
            font.clone(),
            AXIS_COLOR,
        );
    }

    for series in &spec.series {
        paint_series(&painter, series, &to_screen);
    }

    paint_legend(
        &painter,
        spec,
        egui::pos2(plot.left(), outer.bottom() - LEGEND_HEIGHT / 2.0),
    );

    if let Some(pointer) = response.hover_pos() {
        if plot.contains(pointer) {
            paint_readout(&painter, spec, records, plot, pointer);
        }
    }
}

fn series_color(series: &SeriesSpec) -> Color32 {
    let [r, g, b] = series.color;
    Color32::from_rgb(r, g, b)
}

fn paint_series(
    painter: &egui::Painter,
    series: &SeriesSpec,
    to_screen: &dyn Fn(f64, f64) -> Option<Pos2>,
) {
    let color = series_color(series);
    let stroke = Stroke::new(series.width, color);
    let points: Vec<Pos2> = series
        .points
        .iter()
        .filter_map(|point| to_screen(point.x, point.y))
        .collect();

    if points.len() >= 2 {
        match series.stroke {
            StrokeStyle::Solid => {
                painter.add(Shape::line(points.clone(), stroke));
            }
            StrokeStyle::Dashed { dash, gap } => {
                painter.extend(Shape::dashed_line(&points, stroke, dash, gap));
            }
        }
    }
    for point in &points {
        painter.circle_filled(*point, series.width.max(2.0), color);
    }
}

fn paint_legend(painter: &egui::Painter, spec: &ChartSpec, origin: Pos2) {
    let font = FontId::proportional(12.0);
    let mut x = origin.x;
    for series in &spec.series {
        let color = series_color(series);
        let stroke = Stroke::new(series.width.min(3.0), color);
        let sample = [egui::pos2(x, origin.y), egui::pos2(x + 18.0, origin.y)];
        match series.stroke {
            StrokeStyle::Solid => {
                painter.line_segment(sample, stroke);
            }
            StrokeStyle::Dashed { .. } => {
                painter.extend(Shape::dashed_line(&sample, stroke, 4.0, 3.0));
            }
        }
        let label = painter.text(
            egui::pos2(x + 24.0, origin.y),
            Align2::LEFT_CENTER,
            series.name,
            font.clone(),
            color,
        );
        x = label.right() + 18.0;
    }
}

/// Vertical guide plus the values of the record nearest to the pointer.
fn paint_readout(
    painter: &egui::Painter,
    spec: &ChartSpec,
    records: &[BenchmarkRecord],
    plot: Rect,
    pointer: Pos2,
) {
    let nearest = records
        .iter()
        .filter_map(|record| {
            let t = spec.x_axis.normalize(record.digits as f64)?;
            Some((record, plot.left() + t as f32 * plot.width()))
        })
        .min_by(|a, b| (a.1 - pointer.x).abs().total_cmp(&(b.1 - pointer.x).abs()));
    let Some((record, x)) = nearest else {
        return;
    };

    painter.line_segment(
        [egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())],
        Stroke::new(1.0, AXIS_COLOR),
    );

    let text = format!(
        "Digits: {}\nVedic Engine: {:.3e} s\nNumPy Baseline: {:.3e} s",
        record.digits, record.vedic, record.numpy
    );
    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), Color32::WHITE);
    let size = galley.size() + egui::vec2(12.0, 8.0);
    let left = if x + 10.0 + size.x > plot.right() {
        x - 10.0 - size.x
    } else {
        x + 10.0
    };
    let frame = Rect::from_min_size(egui::pos2(left, plot.top() + 8.0), size);
    painter.rect_filled(frame, egui::CornerRadius::same(4), READOUT_BG);
    painter.line_segment([frame.left_top(), frame.right_top()], Stroke::new(1.0, READOUT_BORDER));
    painter.line_segment(
        [frame.left_bottom(), frame.right_bottom()],
        Stroke::new(1.0, READOUT_BORDER),
    );
    painter.galley(frame.min + egui::vec2(6.0, 4.0), galley, Color32::WHITE);
}
