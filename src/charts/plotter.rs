//! Chart Plotter Module
//! Draws the interactive pie and line charts using egui_plot.

use super::geometry::{padded_range, polar, PieSlice, PALETTE};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

const PIE_RADIUS: f64 = 1.0;
/// Percentage labels sit inside the slice, names just outside.
const PERCENT_RADIUS: f64 = 0.6;
const NAME_RADIUS: f64 = 1.15;

pub const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Draws dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get fill color for the slice at `index`.
    pub fn slice_color(index: usize) -> Color32 {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        Color32::from_rgb(r, g, b)
    }

    /// Draw a pie chart of country shares with percentage labels.
    pub fn draw_pie_chart(ui: &mut egui::Ui, slices: &[PieSlice], title: &str) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(title).size(16.0).strong());
        });

        Plot::new("top_countries_pie")
            .height(420.0)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(-1.6)
            .include_x(1.6)
            .include_y(-1.3)
            .include_y(1.3)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, slice) in slices.iter().enumerate() {
                    let color = Self::slice_color(i);
                    let outline: PlotPoints = slice
                        .outline((0.0, 0.0), PIE_RADIUS)
                        .into_iter()
                        .map(|(x, y)| [x, y])
                        .collect();

                    plot_ui.polygon(
                        Polygon::new(outline)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(&slice.label),
                    );

                    let (px, py) = polar((0.0, 0.0), PERCENT_RADIUS, slice.mid_angle());
                    plot_ui.text(Text::new(
                        PlotPoint::new(px, py),
                        RichText::new(slice.percent_label())
                            .size(11.0)
                            .color(Color32::WHITE),
                    ));

                    let (nx, ny) = polar((0.0, 0.0), NAME_RADIUS, slice.mid_angle());
                    plot_ui.text(Text::new(
                        PlotPoint::new(nx, ny),
                        RichText::new(&slice.label).size(11.0),
                    ));
                }
            });
    }

    /// Draw the average movie duration per year as a line chart.
    pub fn draw_duration_chart(ui: &mut egui::Ui, series: &[(i64, f64)]) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Average duration of movies per year")
                    .size(16.0)
                    .strong(),
            );
        });

        let points: Vec<[f64; 2]> = series
            .iter()
            .map(|&(year, minutes)| [year as f64, minutes])
            .collect();
        let (y_min, y_max) =
            padded_range(series.iter().map(|&(_, m)| m), 0.1).unwrap_or((0.0, 1.0));

        Plot::new("avg_duration_line")
            .height(360.0)
            .x_axis_label("Year")
            .y_axis_label("Average duration (minutes)")
            .allow_scroll(false)
            .include_y(y_min)
            .include_y(y_max)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .label_formatter(|_name, value| {
                format!("{:.0}: {:.1} min", value.x, value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name("Avg duration"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(2.5)
                        .color(LINE_COLOR),
                );
            });
    }
}
