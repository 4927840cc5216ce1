//! Static Chart Renderer
//! Exports the dashboard charts as PNG images using plotters.
//!
//! Layout:
//! 1. Pie chart: title, slices with percentage labels, country legend
//! 2. Line chart: title, year axis, average duration axis

use super::geometry::{padded_range, polar, PieSlice, PALETTE};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Not enough data to draw the chart")]
    NoData,
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

const FONT: &str = "sans-serif";

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    fn slice_color(index: usize) -> RGBColor {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        RGBColor(r, g, b)
    }

    /// Render the top-countries pie chart to a PNG file.
    pub fn render_pie_png(
        path: &Path,
        slices: &[PieSlice],
        title: &str,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if slices.is_empty() {
            return Err(RenderError::NoData);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        let area = root.titled(title, (FONT, 28)).map_err(drawing_error)?;

        let (width, height) = area.dim_in_pixel();
        let legend_w = (width as f64 * 0.28) as i32;
        let center = (
            (width as f64 - legend_w as f64) / 2.0,
            height as f64 / 2.0,
        );
        let radius = (center.0.min(center.1) * 0.8).max(1.0);

        // Pixel rows grow downwards; flip y so slices run counter-clockwise
        let to_pixel = |(x, y): (f64, f64)| -> (i32, i32) {
            (x.round() as i32, (2.0 * center.1 - y).round() as i32)
        };

        for (i, slice) in slices.iter().enumerate() {
            let outline: Vec<(i32, i32)> = slice
                .outline(center, radius)
                .into_iter()
                .map(to_pixel)
                .collect();
            area.draw(&Polygon::new(outline, Self::slice_color(i).filled()))
                .map_err(drawing_error)?;
        }

        let label_style = (FONT, 16).into_font().color(&WHITE);
        for slice in slices {
            let anchor = to_pixel(polar(center, radius * 0.65, slice.mid_angle()));
            let label = slice.percent_label();
            let (label_w, label_h) = area
                .estimate_text_size(&label, &label_style)
                .map_err(drawing_error)?;
            area.draw(&Text::new(
                label,
                (anchor.0 - label_w as i32 / 2, anchor.1 - label_h as i32 / 2),
                label_style.clone(),
            ))
            .map_err(drawing_error)?;
        }

        let legend_x = width as i32 - legend_w;
        let legend_style = (FONT, 16).into_font().color(&BLACK);
        for (i, slice) in slices.iter().enumerate() {
            let y = 20 + i as i32 * 26;
            area.draw(&Rectangle::new(
                [(legend_x, y), (legend_x + 16, y + 16)],
                Self::slice_color(i).filled(),
            ))
            .map_err(drawing_error)?;
            area.draw(&Text::new(
                format!("{} ({})", slice.label, slice.count),
                (legend_x + 24, y),
                legend_style.clone(),
            ))
            .map_err(drawing_error)?;
        }

        root.present().map_err(drawing_error)?;
        info!(path = %path.display(), slices = slices.len(), "Exported pie chart");
        Ok(())
    }

    /// Render the average duration line chart to a PNG file.
    pub fn render_duration_png(
        path: &Path,
        series: &[(i64, f64)],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let (y_min, y_max) =
            padded_range(series.iter().map(|&(_, m)| m), 0.1).ok_or(RenderError::NoData)?;
        let x_min = series.iter().map(|&(year, _)| year).min().ok_or(RenderError::NoData)?;
        let x_max = series.iter().map(|&(year, _)| year).max().ok_or(RenderError::NoData)?;
        let x_max = if x_max == x_min { x_max + 1 } else { x_max };

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Average duration of movies per year", (FONT, 28))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Average duration (minutes)")
            .x_label_formatter(&|year| year.to_string())
            .draw()
            .map_err(drawing_error)?;

        let line_color = Self::slice_color(0);
        chart
            .draw_series(LineSeries::new(series.iter().copied(), line_color.stroke_width(2)))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
        info!(path = %path.display(), years = series.len(), "Exported duration chart");
        Ok(())
    }
}
