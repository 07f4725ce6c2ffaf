//! SVG plots of a kink series with its trend line.

use std::path::Path;

use log::debug;
use plotters::prelude::*;

use super::OutputError;
use crate::fit::TrendFit;
use crate::scale::PotentialScale;

/// Cosmetic settings of one plot
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Chart caption
    pub title: String,
    /// y-axis description
    pub y_label: String,
    /// Series colour
    pub color: RGBColor,
    /// Canvas size in pixels
    pub size: (u32, u32),
}

impl PlotStyle {
    /// Default style for a scale (blue for RHE, green for SHE)
    pub fn for_scale(scale: PotentialScale) -> Self {
        let color = match scale {
            PotentialScale::Rhe => BLUE,
            PotentialScale::She => RGBColor(0, 128, 0),
        };
        Self {
            title: "with field".to_string(),
            y_label: format!("Potential kink vs. {} / V", scale.electrode()),
            color,
            size: (800, 600),
        }
    }
}

/// Render `points` and the line of `fit` to an SVG file.
pub fn render_series_plot(
    path: &Path,
    style: &PlotStyle,
    points: &[(f64, f64)],
    fit: &TrendFit,
) -> Result<(), OutputError> {
    draw(path, style, points, fit).map_err(|e| OutputError::Plot(e.to_string()))?;
    debug!("Rendered plot: {}", path.display());
    Ok(())
}

/// Padded axis bounds covering all values
fn axis_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.5 };
    (lo - pad, hi + pad)
}

fn draw(
    path: &Path,
    style: &PlotStyle,
    points: &[(f64, f64)],
    fit: &TrendFit,
) -> Result<(), Box<dyn std::error::Error>> {
    let fit_points: Vec<(f64, f64)> = points.iter().map(|&(x, _)| (x, fit.predict(x))).collect();

    let (x_min, x_max) = axis_bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = axis_bounds(
        points
            .iter()
            .map(|p| p.1)
            .chain(fit_points.iter().map(|p| p.1)),
    );

    let root = SVGBackend::new(path, style.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.title, ("serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("pH")
        .y_desc(style.y_label.as_str())
        .x_labels(15)
        .draw()?;

    let color = style.color;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &color))?
        .label("Potential kink vs pH")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(fit_points, &RED))?
        .label(format!("Linear fit: {}", fit))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_bounds_pad_range() {
        let (lo, hi) = axis_bounds([0.0, 10.0].into_iter());
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_axis_bounds_degenerate() {
        assert_eq!(axis_bounds([2.0].into_iter()), (1.5, 2.5));
        assert_eq!(axis_bounds(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn test_style_labels() {
        let style = PlotStyle::for_scale(PotentialScale::She);
        assert_eq!(style.y_label, "Potential kink vs. SHE / V");
        assert_eq!(PlotStyle::for_scale(PotentialScale::Rhe).color, BLUE);
    }

    #[test]
    fn test_render_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("URHE_vs_pH.svg");
        let points: Vec<(f64, f64)> = (0..=14).map(|i| (i as f64, 2.25 - 0.0147 * i as f64)).collect();
        let fit = TrendFit {
            slope: -0.0147,
            intercept: 2.25,
            r_squared: 1.0,
        };
        render_series_plot(&path, &PlotStyle::for_scale(PotentialScale::Rhe), &points, &fit).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }
}
