//! PNG bar, line and scatter figures drawn with plotters.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::info;

use crate::error::AnalysisError;
use crate::stats::LinearFit;

const SIZE: (u32, u32) = (1000, 480);
const MAX_X_LABELS: usize = 14;
/// Labels longer than this are drawn vertically.
const SHORT_LABEL: usize = 4;

const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);
const FIT_COLOR: RGBColor = RGBColor(221, 132, 82);

type DrawResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Clone)]
pub struct Chart {
    title: String,
    x_label: String,
    y_label: String,
}

impl Chart {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }

    pub fn bar(&self, path: &Path, labels: &[String], values: &[f64]) -> Result<(), AnalysisError> {
        self.save(path, self.draw_bar(path, labels, values))
    }

    pub fn line(&self, path: &Path, labels: &[String], values: &[f64]) -> Result<(), AnalysisError> {
        self.save(path, self.draw_line(path, labels, values))
    }

    /// Points plus the fitted line across the observed distance range.
    pub fn scatter(
        &self,
        path: &Path,
        points: &[(f64, f64)],
        fit: Option<&LinearFit>,
    ) -> Result<(), AnalysisError> {
        self.save(path, self.draw_scatter(path, points, fit))
    }

    fn save(&self, path: &Path, drawn: DrawResult) -> Result<(), AnalysisError> {
        drawn.map_err(|source| AnalysisError::Chart {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;
        info!(path = %path.display(), "saved");
        Ok(())
    }

    fn draw_bar(&self, path: &Path, labels: &[String], values: &[f64]) -> DrawResult {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let slots = values.len().max(1) as u32;
        let vertical = labels.iter().any(|l| l.chars().count() > SHORT_LABEL);
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(if vertical { 140 } else { 40 })
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..upper_bound(values))?;

        let format_x = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(index) => {
                labels.get(*index as usize).cloned().unwrap_or_default()
            }
            _ => String::new(),
        };
        let label_style = if vertical {
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90)
        } else {
            ("sans-serif", 12).into_font()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(&self.x_label)
            .y_desc(&self.y_label)
            .x_labels(labels.len().max(1))
            .x_label_style(label_style)
            .x_label_formatter(&format_x)
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(4)
                .data(values.iter().enumerate().map(|(i, v)| (i as u32, *v))),
        )?;
        root.present()?;
        Ok(())
    }

    fn draw_line(&self, path: &Path, labels: &[String], values: &[f64]) -> DrawResult {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let last = values.len().saturating_sub(1).max(1);
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0usize..last, 0f64..upper_bound(values))?;

        let format_x = |index: &usize| labels.get(*index).cloned().unwrap_or_default();
        chart
            .configure_mesh()
            .x_desc(&self.x_label)
            .y_desc(&self.y_label)
            .x_labels(MAX_X_LABELS)
            .x_label_formatter(&format_x)
            .draw()?;

        chart.draw_series(LineSeries::new(
            values.iter().copied().enumerate(),
            BAR_COLOR.stroke_width(2),
        ))?;
        root.present()?;
        Ok(())
    }

    fn draw_scatter(
        &self,
        path: &Path,
        points: &[(f64, f64)],
        fit: Option<&LinearFit>,
    ) -> DrawResult {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
        let ys: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..upper_bound(&xs), 0f64..upper_bound(&ys))?;
        chart
            .configure_mesh()
            .x_desc(&self.x_label)
            .y_desc(&self.y_label)
            .draw()?;

        chart.draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 2, BAR_COLOR.mix(0.4).filled())),
        )?;

        let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if let Some(fit) = fit.filter(|_| lo.is_finite() && hi.is_finite()) {
            chart.draw_series(LineSeries::new(
                [lo, hi].map(|x| (x, fit.predict(x))),
                FIT_COLOR.stroke_width(2),
            ))?;
        }
        root.present()?;
        Ok(())
    }
}

/// Top of the value axis with some headroom; 1 for empty or non-positive data.
fn upper_bound(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG";

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn is_png(path: &Path) -> bool {
        fs::read(path).map(|b| b.starts_with(PNG_MAGIC)).unwrap_or(false)
    }

    #[test]
    fn bars_are_written_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders_by_hour.png");

        Chart::new("Orders by Hour", "Hour", "Orders")
            .bar(&path, &labels(&["0", "1", "2"]), &[3.0, 0.0, 7.0])
            .unwrap();
        assert!(is_png(&path));
    }

    #[test]
    fn long_labels_still_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top10_vendors_revenue.png");

        Chart::new("Top 10 Vendors by Revenue", "Vendor", "Revenue")
            .bar(&path, &labels(&["Slice & Bake - Karada", "Masgouf Abu Ali"]), &[120.5, 80.0])
            .unwrap();
        assert!(is_png(&path));
    }

    #[test]
    fn empty_series_still_render() {
        let dir = tempfile::tempdir().unwrap();
        let chart = Chart::new("Daily Orders", "Date", "Orders");

        let line = dir.path().join("daily_orders.png");
        chart.line(&line, &[], &[]).unwrap();
        assert!(is_png(&line));

        let bars = dir.path().join("orders_per_customer_dist.png");
        chart.bar(&bars, &[], &[]).unwrap();
        assert!(is_png(&bars));

        let scatter = dir.path().join("distance_vs_minutes_fit.png");
        chart.scatter(&scatter, &[], None).unwrap();
        assert!(is_png(&scatter));
    }

    #[test]
    fn scatter_draws_points_and_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distance_vs_minutes_fit.png");
        let fit = LinearFit {
            slope: 5.0,
            intercept: 2.0,
        };

        Chart::new("Distance vs Delivery Minutes", "Distance (km)", "Minutes")
            .scatter(&path, &[(1.0, 7.0), (2.0, 12.0), (4.0, 22.0)], Some(&fit))
            .unwrap();
        assert!(is_png(&path));
    }

    #[test]
    fn unwritable_path_is_a_chart_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("daily_orders.png");

        let err = Chart::new("Daily Orders", "Date", "Orders")
            .line(&path, &labels(&["2025-03-01"]), &[4.0])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Chart { .. }));
    }

    #[test]
    fn axis_bound_leaves_headroom() {
        assert_eq!(upper_bound(&[]), 1.0);
        assert_eq!(upper_bound(&[0.0, -2.0]), 1.0);
        assert!((upper_bound(&[10.0]) - 11.0).abs() < 1e-9);
        assert_eq!(upper_bound(&[f64::NAN, 5.0]), 5.5);
    }
}
