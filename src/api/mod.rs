//! Backend API layer - typed access to the bot management HTTP endpoints
//!
//! This layer contains:
//! - Wire types for the status, tools and test endpoints
//! - A reqwest-based client behind the `Backend` trait
//! - The `ApiError` type shared by all calls

mod client;
mod error;
mod types;

pub use client::{Backend, BackendClient};
pub use error::ApiError;
pub use types::{ErrorBody, SystemStatus, TestReply, TestRequest, Tool, ToolsResponse};

/// Endpoint paths, relative to the API base
pub mod endpoints {
    pub const STATUS: &str = "/api/status";
    /// Served by the backend but not read by the dashboard
    pub const CONFIG: &str = "/api/config";
    pub const TOOLS: &str = "/api/tools";
    pub const TEST: &str = "/api/test";
}
