/// Command-line parsing and per-file processing
pub mod cli;
/// Runtime configuration defaults
pub mod configuration;
/// Error types and constructors
pub mod error;
/// PNG decoding and encoding
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress bar display
pub mod progress;
