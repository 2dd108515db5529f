use crate::artifact::{
    DEFAULT_FREQUENCIES_PATH, DEFAULT_RESOURCES_PATH, write_page_resources, write_word_frequencies,
};
use indicatif::{ProgressBar, ProgressStyle};
use policyscan_scanner::classify::{ClassifierOptions, enumerate_external_resources};
use policyscan_scanner::dom::Page;
use policyscan_scanner::error::Result;
use policyscan_scanner::fetch::{DEFAULT_TIMEOUT_SECS, Fetcher};
use policyscan_scanner::links::{LinkOptions, fetch_privacy_policy};
use policyscan_scanner::result::{ExternalResource, PageResources, WordFrequency};
use policyscan_scanner::words::{CounterOptions, count_words};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_URL: &str = "https://www.cfcunderwriting.com/en-gb/";

/// Options for configuring a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub url: String,
    pub resources_path: PathBuf,
    pub frequencies_path: PathBuf,
    pub timeout_secs: u64,
    pub classifier: ClassifierOptions,
    pub links: LinkOptions,
    pub counter: CounterOptions,
    pub show_progress_bars: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            resources_path: PathBuf::from(DEFAULT_RESOURCES_PATH),
            frequencies_path: PathBuf::from(DEFAULT_FREQUENCIES_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            classifier: ClassifierOptions::default(),
            links: LinkOptions::default(),
            counter: CounterOptions::default(),
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting scan progress
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything a completed scan produced
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub url: String,
    pub status_code: u16,
    pub response_time: Duration,
    pub external_resources: Vec<ExternalResource>,
    pub privacy_policy_url: String,
    pub word_frequencies: WordFrequency,
    pub resources_path: PathBuf,
    pub frequencies_path: PathBuf,
}

impl ScanSummary {
    pub fn total_words(&self) -> usize {
        self.word_frequencies.values().sum()
    }
}

struct Stage {
    progress_bar: Option<ProgressBar>,
    callback: Option<ScanProgressCallback>,
}

impl Stage {
    fn report(&self, msg: impl Into<String>) {
        let msg = msg.into();
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(msg.clone());
            pb.tick();
        }
        if let Some(ref callback) = self.callback {
            callback(msg);
        }
    }
}

/// Run the whole pipeline once: fetch the target, record its external
/// resources, follow the privacy policy link and count its words.
///
/// The first failure aborts the run. An artifact already written by an
/// earlier stage is left on disk.
pub async fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<ScanSummary> {
    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };
    let stage = Stage {
        progress_bar,
        callback: progress_callback,
    };

    let result = run_stages(&stage, &options).await;

    if let Some(ref pb) = stage.progress_bar {
        match result {
            Ok(_) => pb.finish_with_message("Scan complete!"),
            Err(_) => pb.finish_and_clear(),
        }
    }

    result
}

async fn run_stages(stage: &Stage, options: &ScanOptions) -> Result<ScanSummary> {
    let ScanOptions {
        url,
        resources_path,
        frequencies_path,
        timeout_secs,
        classifier,
        links,
        counter,
        ..
    } = options;

    let fetcher = Fetcher::with_timeout(*timeout_secs)?;

    stage.report(format!("Fetching {}", url));
    let primary = fetcher.fetch(url).await?;
    let page = Page::parse(&primary.body);

    stage.report("Classifying external resources...");
    let external_resources = enumerate_external_resources(&page, classifier)?;
    info!(
        "Found {} external resources on {}",
        external_resources.len(),
        url
    );

    let mut resources = PageResources::new(url.as_str());
    for resource in &external_resources {
        resources.add_web_resource(resource.clone());
    }
    write_page_resources(&resources, resources_path)?;
    stage.report(format!(
        "Wrote {} external resources to {}",
        external_resources.len(),
        resources_path.display()
    ));

    stage.report("Following privacy policy link...");
    let policy = fetch_privacy_policy(&fetcher, &page, links).await?;
    let policy_page = Page::parse(&policy.body);

    stage.report("Counting words...");
    let word_frequencies = count_words(&policy_page.visible_text(), counter);
    write_word_frequencies(&word_frequencies, frequencies_path)?;
    info!(
        "Counted {} distinct words on {}",
        word_frequencies.len(),
        policy.url
    );
    stage.report(format!(
        "Wrote {} word frequencies to {}",
        word_frequencies.len(),
        frequencies_path.display()
    ));

    Ok(ScanSummary {
        url: url.clone(),
        status_code: primary.status_code,
        response_time: primary.response_time,
        external_resources,
        privacy_policy_url: policy.url,
        word_frequencies,
        resources_path: resources_path.clone(),
        frequencies_path: frequencies_path.clone(),
    })
}
