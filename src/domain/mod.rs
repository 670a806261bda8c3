//! Domain layer - Pure business logic.

// Marker extraction from raw event text
pub mod markers;

// Download window arithmetic
pub mod window;

// Static rendering profiles
pub mod profiles;

// Job records and per-clip results
pub mod jobs;
