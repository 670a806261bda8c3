//! Ports - Trait definitions for external collaborators.

pub mod fetcher;
pub mod renderer;
pub mod transcriber;
