//! # Claude Dashboard
//!
//! A single-line statusline for Claude Code sessions. Each invocation reads the
//! session snapshot Claude Code pipes to stdin and prints one colored line:
//! model, context usage, OAuth rate-limit utilization and git project state.
//!
//! ## Overview
//!
//! - [`widgets`]: the closed set of status widgets, each fetching its own data
//!   and rendering its own fragment
//! - [`composer`]: fetches all widgets concurrently and joins their fragments
//! - [`cache`]: memory → disk → network lookup for rate-limit data
//! - [`credentials`]: OAuth token lookup (env, Keychain, credentials file)
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Tiered usage-limit cache
pub mod cache;

/// Command-line argument parsing
pub mod cli;

/// ANSI color helpers and threshold colors
pub mod colors;

/// Widget orchestration and the top-level render
pub mod composer;

/// User configuration file
pub mod config;

/// OAuth credential chain
pub mod credentials;

/// Git probes via the git CLI
pub mod git;

/// Translation tables
pub mod i18n;

/// Data models for the stdin snapshot, usage limits and git state
pub mod models;

/// Subprocess execution with a deadline
pub mod process;

/// Client for the Claude OAuth usage endpoint
pub mod usage_api;

/// Formatting helpers and well-known paths
pub mod utils;

/// Status widgets
pub mod widgets;
