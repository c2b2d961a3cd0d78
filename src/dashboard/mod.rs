//! The dashboard page: an overview of the current month.

mod handlers;
mod view;

pub use handlers::{DashboardState, get_dashboard_page};
