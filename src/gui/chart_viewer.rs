//! Chart Viewer Widget
//! Central scrollable panel: dataset browser, metrics row, the top
//! countries pie chart and the movie duration line chart.

use egui::{Color32, RichText, ScrollArea};
use netflix_dashboard::charts::{top_countries_title, ChartPlotter, PieSlice};
use netflix_dashboard::stats::{DashboardSummary, StatsError};
use polars::prelude::*;

const SECTION_SPACING: f32 = 25.0;
const CELL_MAX_CHARS: usize = 40;
const TABLE_ROW_HEIGHT: f32 = 18.0;

/// Everything the viewer needs for one frame.
pub struct ViewerInput<'a> {
    pub df: &'a DataFrame,
    pub summary: &'a DashboardSummary,
    pub top_countries: &'a Result<Vec<PieSlice>, StatsError>,
    /// Year the `top_countries` slices were computed for
    pub top_countries_year: i64,
    pub top_countries_limit: usize,
}

impl ViewerInput<'_> {
    /// Pie chart title, matching the year of the slices on screen.
    pub fn pie_title(&self) -> String {
        top_countries_title(self.top_countries_year, self.top_countries_limit)
    }
}

/// Scrollable dashboard body.
pub struct ChartViewer {
    /// Year driving the pie chart
    pub year: i64,
}

impl ChartViewer {
    pub fn new(year: i64) -> Self {
        Self { year }
    }

    /// Draw the dashboard
    pub fn show(&mut self, ui: &mut egui::Ui, input: &ViewerInput<'_>) -> ViewerAction {
        let mut action = ViewerAction::None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("🎬 Netflix Data Analysis").size(26.0));
                ui.separator();

                egui::CollapsingHeader::new("Check the complete dataset:")
                    .default_open(false)
                    .show(ui, |ui| Self::draw_dataset(ui, input.df));

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Basic Information").size(20.0).strong());
                ui.add_space(8.0);
                Self::draw_metrics(ui, input.summary);

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Top Year Producer Countries").size(20.0).strong());
                ui.add_space(8.0);
                if let Some(a) = self.draw_top_countries(ui, input) {
                    action = a;
                }

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Avg Duration of Movies by Year").size(20.0).strong());
                ui.add_space(8.0);
                if Self::draw_duration(ui, &input.summary.avg_duration_by_year) {
                    action = ViewerAction::ExportDuration;
                }
            });

        action
    }

    /// Metric cards: label above a large value
    fn draw_metrics(ui: &mut egui::Ui, summary: &DashboardSummary) {
        let metrics = [
            ("Min Release Year", summary.min_year_label()),
            ("Max Release Year", summary.max_year_label()),
            ("Missing Dir. Names", summary.missing_directors_label()),
            ("Countries", summary.countries_label()),
            ("Avg Title Length", summary.avg_title_length_label()),
        ];

        ui.columns(metrics.len(), |columns| {
            for (column, (label, value)) in columns.iter_mut().zip(metrics.iter()) {
                column.label(RichText::new(*label).size(12.0).color(Color32::GRAY));
                column.label(RichText::new(value).size(28.0));
            }
        });
    }

    /// Year selector and pie chart. Returns an action when the year
    /// changed or an export was requested.
    fn draw_top_countries(
        &mut self,
        ui: &mut egui::Ui,
        input: &ViewerInput<'_>,
    ) -> Option<ViewerAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Select a year:");
            match &input.summary.year_range {
                Ok((min_year, max_year)) => {
                    let response = ui.add(
                        egui::DragValue::new(&mut self.year)
                            .range(*min_year..=*max_year)
                            .speed(0.2),
                    );
                    if response.changed() {
                        action = Some(ViewerAction::YearChanged(self.year));
                    }
                }
                Err(_) => {
                    ui.label(RichText::new("-").color(Color32::GRAY));
                }
            }
        });

        ui.add_space(8.0);

        match input.top_countries {
            Ok(slices) if !slices.is_empty() => {
                ChartPlotter::draw_pie_chart(ui, slices, &input.pie_title());
                if ui.button("💾 Export PNG").clicked() {
                    action = Some(ViewerAction::ExportTopCountries);
                }
            }
            Ok(_) => {
                let detail = format!("No titles released in {}.", input.top_countries_year);
                Self::not_enough_data(ui, &detail)
            }
            Err(e) => Self::not_enough_data(ui, &e.to_string()),
        }

        action
    }

    /// Line chart. Returns true when an export was requested.
    fn draw_duration(ui: &mut egui::Ui, series: &Result<Vec<(i64, f64)>, StatsError>) -> bool {
        match series {
            Ok(series) if !series.is_empty() => {
                ChartPlotter::draw_duration_chart(ui, series);
                ui.button("💾 Export PNG").clicked()
            }
            Ok(_) => {
                Self::not_enough_data(ui, "No movies in the dataset.");
                false
            }
            Err(e) => {
                Self::not_enough_data(ui, &e.to_string());
                false
            }
        }
    }

    fn not_enough_data(ui: &mut egui::Ui, detail: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("⚠️ Not enough data to draw this chart.")
                        .size(15.0)
                        .color(Color32::from_rgb(255, 193, 7)),
                );
                ui.label(RichText::new(detail).size(12.0).color(Color32::GRAY));
            });
    }

    /// Scrollable table of the loaded records
    fn draw_dataset(ui: &mut egui::Ui, df: &DataFrame) {
        let columns = df.get_columns();
        let col_width = 140.0;

        ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("dataset_header")
                .min_col_width(col_width)
                .max_col_width(col_width)
                .show(ui, |ui| {
                    for column in columns {
                        ui.label(RichText::new(column.name().as_str()).strong());
                    }
                    ui.end_row();
                });

            ScrollArea::vertical()
                .max_height(300.0)
                .auto_shrink([false, true])
                .show_rows(ui, TABLE_ROW_HEIGHT, df.height(), |ui, row_range| {
                    egui::Grid::new("dataset_rows")
                        .striped(true)
                        .min_col_width(col_width)
                        .max_col_width(col_width)
                        .show(ui, |ui| {
                            for row in row_range {
                                for column in columns {
                                    ui.label(cell_text(column, row));
                                }
                                ui.end_row();
                            }
                        });
                });
        });
    }
}

/// Display text for one cell; empty for nulls, long text truncated.
fn cell_text(column: &Column, row: usize) -> String {
    let text = match column.get(row) {
        Ok(AnyValue::Null) | Err(_) => return String::new(),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(value) => value.to_string(),
    };

    if text.chars().count() > CELL_MAX_CHARS {
        let truncated: String = text.chars().take(CELL_MAX_CHARS - 1).collect();
        format!("{}…", truncated)
    } else {
        text
    }
}

/// Actions triggered by the dashboard body
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    None,
    YearChanged(i64),
    ExportTopCountries,
    ExportDuration,
}
