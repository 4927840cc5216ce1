//! GUI module - User interface components

mod app;
mod chart_viewer;
mod sidebar;

pub use app::DashboardApp;
pub use chart_viewer::{ChartViewer, ViewerAction, ViewerInput};
pub use sidebar::{Sidebar, SidebarAction};
