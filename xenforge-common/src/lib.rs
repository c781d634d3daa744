//! # XenForge Common
//!
//! Shared utilities for the XenForge build core.
//!
//! ## Logging
//!
//! The build core itself reports failures through returned error values; the
//! surrounding harness decides how to present them. This crate provides the
//! tracing initialization the harness (and the test suites) use for the
//! diagnostic channel:
//!
//! ```rust
//! use xenforge_common::init_logging;
//!
//! init_logging("info").unwrap();
//! ```

pub mod logging;

// Re-export logging functions
pub use logging::{init_logging, init_logging_json};
