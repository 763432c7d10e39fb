//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All command output goes through this module so the quiet flag and the
//! stdout/stderr split are handled in one place.

pub mod output;
