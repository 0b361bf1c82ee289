//! Network defaults for the dashboard backend.

/// Default REST API base URL (local backend).
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable that overrides [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";

/// Request timeout applied to every HTTP call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
