// src/charts.rs
//
// Geometria dos gráficos em SVG. Aqui só se calculam coordenadas e rótulos;
// o markup fica nos templates.

use chrono::NaiveDate;

use crate::{
    common::format::format_count,
    models::dashboard::{BrandQuantity, DateQuantity},
};

// Área útil (viewBox) e margens
pub const BAR_WIDTH: f64 = 480.0;
pub const BAR_HEIGHT: f64 = 360.0;
pub const LINE_WIDTH: f64 = 960.0;
pub const LINE_HEIGHT: f64 = 480.0;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;

/// Paletas (escuro -> claro), no estilo "Blues_d" / "Greens_d".
#[derive(Debug, Clone, Copy)]
pub enum Palette {
    Blues,
    Greens,
}

impl Palette {
    fn endpoints(self) -> ((u8, u8, u8), (u8, u8, u8)) {
        match self {
            Palette::Blues => ((0x1f, 0x3a, 0x5f), (0x8f, 0xb8, 0xde)),
            Palette::Greens => ((0x1e, 0x4d, 0x2b), (0x8e, 0xcf, 0x97)),
        }
    }

    /// Cor da i-ésima barra de n.
    pub fn shade(self, index: usize, count: usize) -> String {
        let (dark, light) = self.endpoints();
        let t = if count <= 1 { 0.0 } else { index as f64 / (count - 1) as f64 };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            mix(dark.0, light.0),
            mix(dark.1, light.1),
            mix(dark.2, light.2)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Tick {
    pub pos: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label_x: f64,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: f64,
    pub height: f64,
    pub plot: PlotArea,
    pub bars: Vec<Bar>,
    pub y_ticks: Vec<Tick>,
}

#[derive(Debug, Clone)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub points: Vec<Point>,
    // "x1,y1 x2,y2 ..." para o <polyline>
    pub polyline: String,
    pub legend_y: f64,
}

#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: f64,
    pub height: f64,
    pub plot: PlotArea,
    pub series: Vec<Series>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

impl LineChart {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

/// Retângulo de plotagem dentro do viewBox.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: width - MARGIN_RIGHT,
            bottom: height - MARGIN_BOTTOM,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height() / 2.0
    }

    /// Converte um valor [0, y_max] para a coordenada vertical.
    fn scale_y(&self, value: i64, y_max: i64) -> f64 {
        if y_max <= 0 {
            return self.bottom;
        }
        self.bottom - (value as f64 / y_max as f64) * self.height()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Passo "redondo" (1, 2, 5 × 10^k) para chegar em até ~5 divisões.
fn nice_step(max: i64) -> i64 {
    if max <= 5 {
        return 1;
    }
    let raw = max as f64 / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    step.max(1.0) as i64
}

/// Topo do eixo Y (múltiplo do passo, nunca zero) e os ticks correspondentes.
fn y_axis(max: i64, plot: &PlotArea) -> (i64, Vec<Tick>) {
    let max = max.max(0);
    let step = nice_step(max);
    // Arredonda pra cima sem somar (max perto de i64::MAX estouraria)
    let top = if max == 0 {
        step
    } else {
        ((max - 1) / step + 1).checked_mul(step).unwrap_or(max)
    };

    let ticks = (0..=top / step)
        .map(|i| {
            let value = i * step;
            Tick {
                pos: round1(plot.scale_y(value, top)),
                label: format_count(value),
            }
        })
        .collect();

    (top, ticks)
}

pub fn bar_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    data: &[BrandQuantity],
    palette: Palette,
) -> BarChart {
    let plot = PlotArea::for_canvas(BAR_WIDTH, BAR_HEIGHT);
    let max = data.iter().map(|d| d.quantity).max().unwrap_or(0);
    let (y_max, y_ticks) = y_axis(max, &plot);

    let slot = if data.is_empty() { 0.0 } else { plot.width() / data.len() as f64 };
    let bar_width = slot * 0.8;

    let bars = data
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            // Quantidade negativa (devolução) fica colada no zero
            let top = plot.scale_y(entry.quantity.max(0), y_max);
            let x = plot.left + slot * i as f64 + (slot - bar_width) / 2.0;
            Bar {
                label: entry.brand.clone(),
                value: format_count(entry.quantity),
                x: round1(x),
                y: round1(top),
                width: round1(bar_width),
                height: round1(plot.bottom - top),
                label_x: round1(x + bar_width / 2.0),
                color: palette.shade(i, data.len()),
            }
        })
        .collect();

    BarChart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        width: BAR_WIDTH,
        height: BAR_HEIGHT,
        plot,
        bars,
        y_ticks,
    }
}

/// Duas (ou mais) séries no mesmo eixo de tempo.
pub fn time_series_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[(&str, &str, &[DateQuantity])],
) -> LineChart {
    let plot = PlotArea::for_canvas(LINE_WIDTH, LINE_HEIGHT);

    let all_points = series.iter().flat_map(|(_, _, data)| data.iter());
    let first = all_points.clone().map(|p| p.date).min();
    let last = all_points.clone().map(|p| p.date).max();
    let max = all_points.map(|p| p.quantity).max().unwrap_or(0);
    let (y_max, y_ticks) = y_axis(max, &plot);

    let x_ticks = match (first, last) {
        (Some(first), Some(last)) => date_ticks(first, last, &plot),
        _ => Vec::new(),
    };

    let series = series
        .iter()
        .enumerate()
        .map(|(i, (label, color, data))| {
            let points: Vec<Point> = data
                .iter()
                .map(|p| Point {
                    x: round1(scale_date(p.date, first, last, &plot)),
                    y: round1(plot.scale_y(p.quantity.max(0), y_max)),
                    tooltip: format!("{} {}: {}", label, p.date, format_count(p.quantity)),
                })
                .collect();
            let polyline = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            Series {
                label: label.to_string(),
                color: color.to_string(),
                points,
                polyline,
                legend_y: plot.top + 12.0 + 20.0 * i as f64,
            }
        })
        .collect();

    LineChart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        width: LINE_WIDTH,
        height: LINE_HEIGHT,
        plot,
        series,
        x_ticks,
        y_ticks,
    }
}

fn scale_date(date: NaiveDate, first: Option<NaiveDate>, last: Option<NaiveDate>, plot: &PlotArea) -> f64 {
    let (Some(first), Some(last)) = (first, last) else {
        return plot.center_x();
    };
    let span = (last - first).num_days();
    if span == 0 {
        return plot.center_x();
    }
    let offset = (date - first).num_days();
    plot.left + (offset as f64 / span as f64) * plot.width()
}

// No máximo 6 rótulos de data, distribuídos uniformemente no intervalo
fn date_ticks(first: NaiveDate, last: NaiveDate, plot: &PlotArea) -> Vec<Tick> {
    let span = (last - first).num_days();
    if span == 0 {
        return vec![Tick {
            pos: round1(plot.center_x()),
            label: first.format("%Y-%m-%d").to_string(),
        }];
    }

    let divisions = span.min(5);
    (0..=divisions)
        .map(|i| {
            let date = first + chrono::Duration::days(span * i / divisions);
            Tick {
                pos: round1(scale_date(date, Some(first), Some(last), plot)),
                label: date.format("%Y-%m-%d").to_string(),
            }
        })
        .collect()
}
