//! Constants for the hubgate GitHub gateway

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("hubgate/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Environment variable holding the default API token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API base URL (GitHub Enterprise)
pub const API_URL_ENV_VAR: &str = "HUBGATE_API_URL";

/// Timestamp layout GitHub uses for `created_at`/`updated_at`
pub const GITHUB_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Message of the synthetic response returned when labels are missing
pub const LABELS_MISSING_MESSAGE: &str = "One or more labels do not exist.";
