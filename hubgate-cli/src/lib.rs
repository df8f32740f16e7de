//! # Hubgate CLI Library
//!
//! Argument definitions and command handlers for the `hubgate` binary.

pub mod cli;
