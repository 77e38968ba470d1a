//! Application layer services implementing the resolution pipeline.
//!
//! This layer orchestrates domain operations over the store traits and
//! provides a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resolver::Resolver`] - Per-visit resolution state machine
//! - [`services::cycle_detector::CycleDetector`] - Bounded redirect-loop walk
//! - [`services::access_control`] - Password digests, tokens and cookies

pub mod services;
