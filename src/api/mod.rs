//! API module - Remote cost service client

mod client;
mod error;
mod types;

pub use client::{CostApi, HttpCostApi};
pub use error::ApiError;
pub use types::{CostCategory, QueryRequest, ServiceResponse, UNPARSEABLE_ANSWER};
