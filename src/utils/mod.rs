//! Utility functions for URL processing, client classification, and request handling.
//!
//! This module provides helpers used across the engine:
//!
//! - [`url_norm`] - Destination normalization and validation
//! - [`client`] - User-Agent classification
//! - [`rewrite`] - In-app browser escapes and deep links
//! - [`reserved`] - Reserved short-code set
//! - [`extract_domain`] - Host extraction from HTTP headers

pub mod client;
pub mod extract_domain;
pub mod reserved;
pub mod rewrite;
pub mod url_norm;
