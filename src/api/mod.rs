//! HTTP layer translating requests into resolver invocations.

pub mod handlers;
