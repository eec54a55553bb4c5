//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed document repository and connection
//!   lifecycle.

pub mod persistence;
