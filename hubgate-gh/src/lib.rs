//! # GitHub API Gateway
//!
//! A declarative table of GitHub REST routes, an HTTP transport that speaks
//! the GitHub v3 JSON API, and a repository-scoped gateway that dispatches
//! named operations and caches branch-scoped lookups.

pub mod client;
pub mod config;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod models;
pub mod routes;
pub mod transport;

#[cfg(test)]
mod test_support;

// Re-export the client and configuration
pub use client::GitHubClient;
pub use config::GatewayConfig;
pub use endpoints::comments::group_comments_by_user;
pub use error::GatewayError;
pub use gateway::GitHubGateway;
// Re-export models
pub use models::{
  CommentSummary, CommentsByUser, GitHubLabel, GitHubUser, PullRequestRef, PullRequestSummary, TimestampedComment,
  parse_github_timestamp,
};
pub use reqwest::StatusCode;
pub use routes::{CallParams, ROUTES, Route, find_route};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
