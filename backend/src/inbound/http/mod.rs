//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod service_info;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, ErrorResponse};
