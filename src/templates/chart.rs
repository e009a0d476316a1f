use maud::{html, Markup};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::forecast::{group_records, RecordGroup};
use crate::domain::ForecastRecord;
use crate::errors::Result;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;
const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 260.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const Y_TICKS: usize = 5;

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Linear mapping from data space into the plot area.
struct Scale {
    year_min: f64,
    year_span: f64,
    price_min: f64,
    price_span: f64,
}

impl Scale {
    fn from_records(records: &[ForecastRecord]) -> Self {
        let years = records.iter().map(|r| r.year as f64);
        let prices = records.iter().map(|r| r.predicted_price);

        let year_min = years.clone().fold(f64::INFINITY, f64::min);
        let year_max = years.fold(f64::NEG_INFINITY, f64::max);
        let mut price_min = prices.clone().fold(f64::INFINITY, f64::min);
        let mut price_max = prices.fold(f64::NEG_INFINITY, f64::max);

        if !price_min.is_finite() || !price_max.is_finite() {
            price_min = 0.0;
            price_max = 1.0;
        }
        // Pad so flat lines don't sit on the frame.
        let pad = ((price_max - price_min) * 0.05).max(price_max.abs() * 0.01).max(1.0);

        Self {
            year_min: if year_min.is_finite() { year_min } else { 0.0 },
            year_span: if year_max > year_min { year_max - year_min } else { 0.0 },
            price_min: price_min - pad,
            price_span: (price_max - price_min) + 2.0 * pad,
        }
    }

    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, year: f64) -> f64 {
        if self.year_span == 0.0 {
            return MARGIN_LEFT + Self::plot_width() / 2.0;
        }
        MARGIN_LEFT + (year - self.year_min) / self.year_span * Self::plot_width()
    }

    fn y(&self, price: f64) -> f64 {
        let share = (price - self.price_min) / self.price_span;
        MARGIN_TOP + Self::plot_height() - share * Self::plot_height()
    }
}

fn points(scale: &Scale, group: &RecordGroup<'_>) -> String {
    group
        .records
        .iter()
        .map(|r| format!("{:.1},{:.1}", scale.x(r.year as f64), scale.y(r.predicted_price)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line chart of predicted price per year, one line per (type, location).
pub fn forecast_chart(records: &[ForecastRecord]) -> Markup {
    let scale = Scale::from_records(records);
    let groups = group_records(records);

    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let price_ticks: Vec<f64> = (0..=Y_TICKS)
        .map(|i| scale.price_min + scale.price_span * i as f64 / Y_TICKS as f64)
        .collect();

    let bottom = MARGIN_TOP + Scale::plot_height();
    let right = MARGIN_LEFT + Scale::plot_width();
    let mid_y = MARGIN_TOP + Scale::plot_height() / 2.0;

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(WIDTH) height=(HEIGHT)
            viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) font-family="sans-serif" {
            rect x="0" y="0" width=(WIDTH) height=(HEIGHT) fill="white" {}
            text x=(WIDTH / 2.0) y="32" text-anchor="middle" font-size="20" {
                "Property Price Predictions by Type and Location"
            }

            // Grid and axes
            @for tick in &price_ticks {
                @let y = scale.y(*tick);
                line x1=(MARGIN_LEFT) x2=(right) y1=(y) y2=(y) stroke="#dddddd" {}
                text x=(MARGIN_LEFT - 8.0) y=(y + 4.0) text-anchor="end" font-size="12" {
                    (format!("{:.0}", tick))
                }
            }
            @for year in &years {
                @let x = scale.x(*year as f64);
                line x1=(x) x2=(x) y1=(MARGIN_TOP) y2=(bottom) stroke="#dddddd" {}
                text x=(x) y=(bottom + 20.0) text-anchor="middle" font-size="12" {
                    (year)
                }
            }
            line x1=(MARGIN_LEFT) x2=(right) y1=(bottom) y2=(bottom) stroke="black" {}
            line x1=(MARGIN_LEFT) x2=(MARGIN_LEFT) y1=(MARGIN_TOP) y2=(bottom) stroke="black" {}
            text x=(MARGIN_LEFT + Scale::plot_width() / 2.0) y=(HEIGHT - 20.0)
                text-anchor="middle" font-size="14" {
                "Year"
            }
            text x="24" y=(mid_y) text-anchor="middle" font-size="14"
                transform=(format!("rotate(-90 24 {mid_y})")) {
                "Predicted Price (USD)"
            }

            // Series
            @for (i, group) in groups.iter().enumerate() {
                @let color = PALETTE[i % PALETTE.len()];
                @let label = group.label();
                @let legend_y = MARGIN_TOP + 22.0 * i as f64;
                g class="series" data-label=(label) {
                    polyline points=(points(&scale, group)) fill="none" stroke=(color)
                        stroke-width="2" {}
                    @for r in &group.records {
                        circle cx=(scale.x(r.year as f64)) cy=(scale.y(r.predicted_price))
                            r="4" fill=(color) {}
                    }
                }
                // Legend
                rect x=(right + 20.0) y=(legend_y) width="14" height="14" fill=(color) {}
                text x=(right + 40.0) y=(legend_y + 12.0) font-size="12" {
                    (label)
                }
            }
        }
    }
}

pub fn write_forecast_chart(path: &Path, records: &[ForecastRecord]) -> Result<()> {
    fs::write(path, forecast_chart(records).into_string())?;
    info!(path = %path.display(), "wrote forecast chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, kind: &str, loc: &str, price: f64) -> ForecastRecord {
        ForecastRecord {
            year,
            property_type: kind.into(),
            location: loc.into(),
            predicted_price: price,
        }
    }

    #[test]
    fn one_polyline_per_group() {
        let records = vec![
            rec(2026, "Villa", "Cairo", 500000.0),
            rec(2027, "Villa", "Cairo", 520000.0),
            rec(2026, "Flat", "Giza", 90000.0),
            rec(2027, "Flat", "Giza", 95000.0),
        ];
        let svg = forecast_chart(&records).into_string();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("Villa in Cairo"));
        assert!(svg.contains("Flat in Giza"));
    }

    #[test]
    fn pairs_sharing_a_label_get_separate_lines() {
        let records = vec![
            rec(2026, "Villa in Old", "Town", 1.0),
            rec(2027, "Villa in Old", "Town", 2.0),
            rec(2026, "Villa", "Old in Town", 3.0),
            rec(2027, "Villa", "Old in Town", 4.0),
        ];
        let svg = forecast_chart(&records).into_string();
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn labels_are_escaped() {
        let svg = forecast_chart(&[rec(2026, "A&B", "<Old Town>", 1.0)]).into_string();
        assert!(svg.contains("A&amp;B in &lt;Old Town&gt;"));
    }

    #[test]
    fn single_point_and_empty_input_render() {
        let one = forecast_chart(&[rec(2026, "Villa", "Cairo", 1.0)]).into_string();
        assert!(!one.contains("NaN"));
        let empty = forecast_chart(&[]).into_string();
        assert!(empty.contains("</svg>"));
        assert!(!empty.contains("<polyline"));
    }

    #[test]
    fn points_map_years_left_to_right() {
        let records = vec![rec(2026, "V", "C", 1.0), rec(2031, "V", "C", 2.0)];
        let scale = Scale::from_records(&records);
        assert_eq!(scale.x(2026.0), MARGIN_LEFT);
        assert_eq!(scale.x(2031.0), MARGIN_LEFT + Scale::plot_width());
        assert!(scale.y(2.0) < scale.y(1.0));
    }
}
