pub mod artifact;
pub mod report;
pub mod scan;

pub use artifact::{read_page_resources, write_artifact, write_page_resources, write_word_frequencies};
pub use report::generate_scan_report;
pub use scan::{ScanOptions, ScanProgressCallback, ScanSummary, execute_scan};

pub fn print_banner() {
    println!(
        "policyscan v{} - external resources & privacy policy word counts\n",
        env!("CARGO_PKG_VERSION")
    );
}
