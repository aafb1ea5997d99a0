pub mod client;

pub use client::{ApiClient, ApiResponse, find_endpoint};
