//! GUI module - Dashboard window, tab panels and notifications

mod app;
mod breakdown;
mod bubble;
mod calculators;
mod categories;
mod chart_viewer;
mod import;
mod predictions;
mod task;
#[cfg(test)]
pub(crate) mod test_support;
mod toast;
mod well_panel;

pub use app::DrillCostApp;
