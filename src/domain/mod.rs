//! Domain layer containing the engine's entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Durable store trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler emits its response
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] persists events with retry logic
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits define contracts the infrastructure layer
//! implements.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
