//! Benchmark series -> chart description.
//!
//! The renderer only needs to draw lines against two axes; all scale math
//! (domains, tick placement, log mapping) lives here.

use shared::{domain::Engine, protocol::BenchmarkRecord};

pub const CHART_TITLE: &str = "Performance Benchmark (Log Scale)";
pub const X_AXIS_LABEL: &str = "Digits";

/// Used when the series has no x values at all.
pub const DEFAULT_LINEAR_DOMAIN: (f64, f64) = (0.0, 1.0);
/// Used when no value can be placed on a log axis (empty or all-zero data).
pub const DEFAULT_LOG_DOMAIN: (f64, f64) = (1e-6, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub label: Option<&'static str>,
    pub data_key: Option<&'static str>,
    pub scale: ScaleKind,
    pub domain: (f64, f64),
}

impl AxisSpec {
    /// Position of `value` along the axis, 0.0 at the domain start and 1.0 at
    /// its end. `None` for values the scale cannot place.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let (lo, hi) = self.domain;
        let t = match self.scale {
            ScaleKind::Linear => (value - lo) / (hi - lo),
            ScaleKind::Log10 => {
                if value <= 0.0 {
                    return None;
                }
                (value.log10() - lo.log10()) / (hi.log10() - lo.log10())
            }
        };
        t.is_finite().then_some(t)
    }

    /// Tick values inside the domain. Log axes tick on whole decades and fall
    /// back to the domain ends when the domain spans less than one.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.domain;
        match self.scale {
            ScaleKind::Linear => {
                let count = count.max(2);
                let step = (hi - lo) / (count - 1) as f64;
                (0..count).map(|i| lo + step * i as f64).collect()
            }
            ScaleKind::Log10 => {
                let (lo_exp, hi_exp) = (lo.log10(), hi.log10());
                if !lo_exp.is_finite() || !hi_exp.is_finite() {
                    return vec![lo, hi];
                }
                let first = (lo_exp - 1e-9).ceil() as i32;
                let last = (hi_exp + 1e-9).floor() as i32;
                if first > last {
                    return vec![lo, hi];
                }
                // Wide domains tick every few decades so at most `count` come out.
                let decades = (last - first) as usize + 1;
                let step = decades.div_ceil(count.max(1));
                let ticks: Vec<f64> = (first..=last)
                    .step_by(step)
                    .map(|exp| 10f64.powf(f64::from(exp)))
                    .filter(|tick| tick.is_finite() && *tick > 0.0)
                    .collect();
                if ticks.is_empty() {
                    vec![lo, hi]
                } else {
                    ticks
                }
            }
        }
    }

    pub fn format_tick(&self, value: f64) -> String {
        match self.scale {
            ScaleKind::Linear => {
                if value.fract().abs() < 1e-9 {
                    format!("{value:.0}")
                } else {
                    format!("{value:.1}")
                }
            }
            ScaleKind::Log10 => {
                let exp = value.log10().round() as i32;
                if (10f64.powi(exp) - value).abs() <= value.abs() * 1e-9 {
                    format!("1e{exp}")
                } else {
                    format!("{value:.1e}")
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeStyle {
    Solid,
    Dashed { dash: f32, gap: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub engine: Engine,
    pub name: &'static str,
    pub data_key: &'static str,
    /// sRGB.
    pub color: [u8; 3],
    pub width: f32,
    pub stroke: StrokeStyle,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

pub fn to_chart_spec(records: &[BenchmarkRecord]) -> ChartSpec {
    let series: Vec<SeriesSpec> = Engine::ALL
        .iter()
        .map(|&engine| series_for(engine, records))
        .collect();

    let x_domain = linear_domain(records.iter().map(|record| record.digits as f64));
    let y_domain = log_domain(
        series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.y)),
    );

    ChartSpec {
        title: CHART_TITLE,
        x_axis: AxisSpec {
            label: Some(X_AXIS_LABEL),
            data_key: Some("digits"),
            scale: ScaleKind::Linear,
            domain: x_domain,
        },
        y_axis: AxisSpec {
            label: None,
            data_key: None,
            scale: ScaleKind::Log10,
            domain: y_domain,
        },
        series,
    }
}

fn series_for(engine: Engine, records: &[BenchmarkRecord]) -> SeriesSpec {
    let (color, width, stroke) = match engine {
        Engine::Vedic => ([0xFF, 0xD7, 0x00], 3.0, StrokeStyle::Solid),
        Engine::Numpy => (
            [0x88, 0x84, 0xD8],
            1.0,
            StrokeStyle::Dashed { dash: 5.0, gap: 5.0 },
        ),
    };

    // A log axis has no place for zero, negative or non-finite timings.
    let points = records
        .iter()
        .filter_map(|record| {
            let y = record.timing(engine);
            (y.is_finite() && y > 0.0).then_some(ChartPoint {
                x: record.digits as f64,
                y,
            })
        })
        .collect();

    SeriesSpec {
        engine,
        name: engine.label(),
        data_key: engine.data_key(),
        color,
        width,
        stroke,
        points,
    }
}

fn linear_domain(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match min_max(values.filter(|value| value.is_finite())) {
        None => DEFAULT_LINEAR_DOMAIN,
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 0.5, hi + 0.5),
        Some(bounds) => bounds,
    }
}

fn log_domain(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match min_max(values.filter(|value| value.is_finite() && *value > 0.0)) {
        None => DEFAULT_LOG_DOMAIN,
        Some((lo, hi)) if lo == hi => {
            // Padding must not underflow to zero or overflow to infinity.
            let below = lo / 10.0;
            let above = hi * 10.0;
            (
                if below.is_normal() { below } else { lo },
                if above.is_finite() { above } else { hi },
            )
        }
        Some(bounds) => bounds,
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    })
}

#[cfg(test)]
#[path = "tests/chart_tests.rs"]
mod tests;
