//! Dashboard Main Application
//! Main window with the sidebar and the dashboard body.

use crate::gui::{ChartViewer, Sidebar, SidebarAction, ViewerAction, ViewerInput};
use egui::SidePanel;
use netflix_dashboard::charts::{pie_slices, top_countries_title, PieSlice, StaticChartRenderer};
use netflix_dashboard::data::DataLoader;
use netflix_dashboard::stats::{Aggregator, DashboardSummary, StatsError};
use netflix_dashboard::DashboardConfig;
use polars::prelude::DataFrame;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Loaded table and the aggregates computed from it.
struct LoadedDashboard {
    df: Arc<DataFrame>,
    summary: DashboardSummary,
    /// Pie slices for `top_countries_year`
    top_countries: Result<Vec<PieSlice>, StatsError>,
    top_countries_year: i64,
}

enum TableState {
    /// Nothing cached; load on the next frame
    Pending,
    Ready(Box<LoadedDashboard>),
    Failed(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    loader: DataLoader,
    state: TableState,
    sidebar: Sidebar,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        Self {
            loader: DataLoader::new(config.data_path.clone()),
            chart_viewer: ChartViewer::new(config.default_year),
            sidebar: Sidebar::new(),
            state: TableState::Pending,
            config,
        }
    }

    /// Load the table if needed and compute the aggregates.
    fn refresh(&mut self) {
        if !matches!(self.state, TableState::Pending) {
            return;
        }

        match self.loader.table() {
            Ok(df) => {
                let summary = DashboardSummary::compute(&df);
                if let Ok(range) = &summary.year_range {
                    self.chart_viewer.year =
                        Aggregator::clamp_year(*range, self.config.default_year);
                }
                let year = self.chart_viewer.year;
                let top_countries = self.top_countries(&df, year);

                self.sidebar
                    .set_status(&format!("Loaded {} titles", df.height()));
                self.state = TableState::Ready(Box::new(LoadedDashboard {
                    df,
                    summary,
                    top_countries,
                    top_countries_year: year,
                }));
            }
            Err(e) => {
                error!(
                    path = %self.loader.path().display(),
                    error = %e,
                    "Failed to load dataset"
                );
                self.sidebar.set_error(&format!("Error: {}", e));
                self.state = TableState::Failed(e.to_string());
            }
        }
    }

    fn top_countries(&self, df: &DataFrame, year: i64) -> Result<Vec<PieSlice>, StatsError> {
        DashboardSummary::top_countries(df, year, self.config.top_countries_limit)
            .map(|counts| pie_slices(&counts))
    }

    /// Recompute the pie chart when the selected year changed.
    fn handle_year_changed(&mut self, year: i64) {
        let TableState::Ready(dashboard) = &self.state else {
            return;
        };
        if dashboard.top_countries_year == year {
            return;
        }

        let top_countries = self.top_countries(&dashboard.df, year);
        if let TableState::Ready(dashboard) = &mut self.state {
            dashboard.top_countries = top_countries;
            dashboard.top_countries_year = year;
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            info!(path = %path.display(), "Selected dataset");
            self.loader.set_path(path);
            self.chart_viewer.year = self.config.default_year;
            self.state = TableState::Pending;
        }
    }

    fn handle_reload(&mut self) {
        self.loader.invalidate();
        self.state = TableState::Pending;
    }

    /// Ask for an output file and export a chart as PNG
    fn handle_export(&mut self, action: &ViewerAction) {
        let TableState::Ready(dashboard) = &self.state else {
            return;
        };

        let year = dashboard.top_countries_year;
        let default_name = match action {
            ViewerAction::ExportTopCountries => format!("top_countries_{}.png", year),
            ViewerAction::ExportDuration => "avg_movie_duration.png".to_string(),
            _ => return,
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&default_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let result = match action {
            ViewerAction::ExportTopCountries => match &dashboard.top_countries {
                Ok(slices) => {
                    let title = top_countries_title(year, self.config.top_countries_limit);
                    StaticChartRenderer::render_pie_png(
                        &path,
                        slices,
                        &title,
                        self.config.export_size,
                    )
                    .map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            },
            ViewerAction::ExportDuration => match &dashboard.summary.avg_duration_by_year {
                Ok(series) => {
                    StaticChartRenderer::render_duration_png(&path, series, self.config.export_size)
                        .map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            },
            _ => return,
        };

        match result {
            Ok(()) => {
                self.sidebar
                    .set_status(&format!("Exported {}", Self::file_label(&path)));
                if let Err(e) = open::that(&path) {
                    warn!(path = %path.display(), error = %e, "Could not open exported chart");
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Chart export failed");
                self.sidebar.set_error(&format!("Export error: {}", e));
            }
        }
    }

    fn file_label(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh();

        // Left panel - Sidebar
        let row_count = self.loader.get_row_count();
        let sidebar_action = SidePanel::left("sidebar")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.sidebar.show(ui, self.loader.path(), row_count))
                    .inner
            })
            .inner;

        match sidebar_action {
            SidebarAction::BrowseCsv => self.handle_browse_csv(),
            SidebarAction::Reload => self.handle_reload(),
            SidebarAction::None => {}
        }

        // Central panel - Dashboard
        let viewer_action = egui::CentralPanel::default()
            .show(ctx, |ui| match &self.state {
                TableState::Ready(dashboard) => {
                    let input = ViewerInput {
                        df: &dashboard.df,
                        summary: &dashboard.summary,
                        top_countries: &dashboard.top_countries,
                        top_countries_year: dashboard.top_countries_year,
                        top_countries_limit: self.config.top_countries_limit,
                    };
                    self.chart_viewer.show(ui, &input)
                }
                TableState::Failed(message) => {
                    ui.centered_and_justified(|ui| {
                        let text = format!("⚠️ Could not load the dataset\n\n{}", message);
                        ui.label(
                            egui::RichText::new(text)
                                .size(18.0)
                                .color(egui::Color32::from_rgb(220, 53, 69)),
                        );
                    });
                    ViewerAction::None
                }
                TableState::Pending => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    ViewerAction::None
                }
            })
            .inner;

        match viewer_action {
            ViewerAction::YearChanged(year) => self.handle_year_changed(year),
            ViewerAction::ExportTopCountries | ViewerAction::ExportDuration => {
                self.handle_export(&viewer_action)
            }
            ViewerAction::None => {}
        }
    }
}
