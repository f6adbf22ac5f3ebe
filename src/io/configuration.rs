//! Runtime configuration defaults

/// Default quantization threshold (1 keeps all 256 levels per channel)
pub const DEFAULT_THRESHOLD: u8 = 1;

/// The only file extension accepted as input and written as output
pub const SUPPORTED_EXTENSION: &str = "png";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_markov";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Number of assigned pixels between progress callbacks
pub const PROGRESS_UPDATE_INTERVAL: usize = 4096;

/// Tracing filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "warn";
