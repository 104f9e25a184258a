//! Common utilities shared across Tweedle crates.
//!
//! Kept deliberately small so every crate in the workspace can depend on it.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use tweedle_common::observability::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     emit_stderr: true,
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert_eq!(cfg.app_name, "tweedle");
//! assert_eq!(cfg.default_filter, "info");
//! ```
pub mod observability;
