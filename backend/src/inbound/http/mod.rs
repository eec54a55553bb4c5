//! HTTP inbound adapter exposing REST endpoints.

pub mod body;
pub mod documents;
pub mod error;
pub mod health;
pub mod index;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
