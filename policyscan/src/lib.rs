pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_output_path, parse_url_line, scan_options_from_matches};

// Re-export scan functionality from policyscan-core
pub use policyscan_core::scan::{ScanOptions, ScanSummary, execute_scan};
