// TabForge CLI - headless parse/export operations
// Reusable pieces live here so integration tests can drive the pipeline
// without spawning the binary.

pub mod exit_codes;
pub mod export;
pub mod pipeline;
pub mod util;
