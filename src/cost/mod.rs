//! Cost module - Rig cost taxonomy, totals and derived calculators

pub mod calculators;
mod format;
mod model;
mod taxonomy;

pub use format::format_currency;
pub use model::{parse_cost, Category, CostEntry, RigBook};
