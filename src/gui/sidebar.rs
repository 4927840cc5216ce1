//! Sidebar Widget
//! Left side panel with the project description, dataset selection and
//! status line.

use egui::{Color32, RichText};
use std::path::Path;

const ABOUT: &str = "Interactive project to load a dataset with information about \
Netflix movies and series, extract some insights and display them as \
metrics and charts.";

const DATA_SOURCE: &str = "Data extracted from: \
https://www.kaggle.com/datasets/shivamb/netflix-shows (with some cleaning \
and modifications)";

/// Left side panel with dataset controls.
pub struct Sidebar {
    pub status: String,
    pub is_error: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            is_error: false,
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the sidebar
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        data_path: &Path,
        row_count: usize,
    ) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎬 Netflix Data Analysis")
                    .size(20.0)
                    .color(Color32::from_rgb(229, 9, 20)),
            );
        });
        ui.add_space(10.0);
        ui.label(RichText::new(ABOUT).size(12.0));
        ui.add_space(5.0);
        ui.label(RichText::new(DATA_SOURCE).size(11.0).color(Color32::GRAY));

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = data_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| data_path.display().to_string());
                ui.label(RichText::new(file_name).size(12.0))
                    .on_hover_text(data_path.display().to_string());

                if row_count > 0 {
                    ui.label(
                        RichText::new(format!("{} titles loaded", row_count))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }

                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = SidebarAction::BrowseCsv;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = SidebarAction::Reload;
                    }
                });
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Status =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = true;
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    None,
    BrowseCsv,
    Reload,
}
