//! Application layer - Generic services that use ports.

// Per-marker fetch/transcribe/render orchestration
pub mod pipeline;

// Archive assembly
pub mod packager;

// Process-wide job records
pub mod store;

// Job submission and task spawning
pub mod runner;
