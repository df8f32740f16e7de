//! # GitHub API Endpoints
//!
//! Convenience operations layered on [`crate::GitHubGateway::call`], grouped by
//! resource: issues, pull requests, comments, labels, and users.

pub mod comments;
pub mod issues;
pub mod labels;
pub mod pulls;
pub mod users;
