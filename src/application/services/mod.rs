//! Business logic services for the application layer.

pub mod access_control;
pub mod cycle_detector;
pub mod resolver;

pub use cycle_detector::CycleDetector;
pub use resolver::{Resolution, Resolver, Visit};
