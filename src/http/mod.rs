//! HTTP client layer — `DashboardHttp`.

pub mod client;

pub use client::DashboardHttp;
