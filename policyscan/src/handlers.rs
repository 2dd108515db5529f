use clap::ArgMatches;
use colored::Colorize;
use policyscan_core::report::{DEFAULT_TOP_WORDS, generate_scan_report};
use policyscan_core::scan::{ScanOptions, execute_scan};
use policyscan_scanner::classify::ClassifierOptions;
use policyscan_scanner::links::LinkOptions;
use policyscan_scanner::words::CounterOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use url::Url;

/// Parse user input as a URL, assuming https:// when no scheme is given
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Try to parse as-is
    if let Ok(url) = Url::parse(line)
        && matches!(url.scheme(), "http" | "https")
    {
        return Some(line.to_string());
    }

    // Try adding https://
    let with_scheme = format!("https://{}", line);
    if let Ok(url) = Url::parse(&with_scheme)
        && url.host_str().is_some_and(|host| !host.is_empty())
        && !line.contains("://")
        && !line.contains(' ')
    {
        return Some(with_scheme);
    }

    None
}

/// Expand a leading `~` in an output path
pub fn expand_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn print_prompt(msg: &str) -> io::Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_string())
}

/// Ask for the URL on stdin; an empty answer keeps `default`
pub fn prompt_for_url(default: &str) -> Result<String, String> {
    let answer = print_prompt(&format!("URL to scan [{}]:", default))
        .map_err(|e| format!("Failed to read URL from stdin: {}", e))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Build scan options from parsed arguments. `url` overrides `--url` when given.
pub fn scan_options_from_matches(
    args: &ArgMatches,
    url: Option<&str>,
) -> Result<ScanOptions, String> {
    let raw_url = match url {
        Some(url) => url,
        None => args
            .get_one::<String>("url")
            .map(String::as_str)
            .ok_or("--url is required")?,
    };
    let url = parse_url_line(raw_url).ok_or_else(|| format!("Invalid URL '{}'", raw_url))?;

    let defaults = ScanOptions::default();
    let resources_path = args
        .get_one::<String>("output")
        .map(|p| expand_output_path(p))
        .unwrap_or(defaults.resources_path);
    let frequencies_path = args
        .get_one::<String>("words-output")
        .map(|p| expand_output_path(p))
        .unwrap_or(defaults.frequencies_path);

    let classifier = ClassifierOptions {
        exclude_same_origin: args.get_flag("exclude-same-origin"),
        domain: args
            .get_one::<String>("domain")
            .cloned()
            .unwrap_or(defaults.classifier.domain),
    };
    let links = LinkOptions {
        base_url: args
            .get_one::<String>("base-url")
            .cloned()
            .unwrap_or(defaults.links.base_url),
        ..defaults.links
    };
    let counter = CounterOptions {
        discard_non_ascii: !args.get_flag("keep-non-ascii"),
    };

    Ok(ScanOptions {
        url,
        resources_path,
        frequencies_path,
        timeout_secs: *args
            .get_one::<u64>("timeout")
            .unwrap_or(&defaults.timeout_secs),
        classifier,
        links,
        counter,
        show_progress_bars: !args.get_flag("quiet"),
    })
}

/// How many words the summary lists; `--top` or the report default
pub fn top_words_from_matches(args: &ArgMatches) -> usize {
    args.get_one::<usize>("top")
        .copied()
        .unwrap_or(DEFAULT_TOP_WORDS)
}

/// Install the stderr log subscriber
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

pub async fn handle_scan(args: &ArgMatches) {
    let quiet = args.get_flag("quiet");
    let top_n = top_words_from_matches(args);

    let prompted = if args.get_flag("interactive") {
        let default = args
            .get_one::<String>("url")
            .map(String::as_str)
            .unwrap_or_default();
        match prompt_for_url(default) {
            Ok(url) => Some(url),
            Err(e) => {
                eprintln!("{} {}", "✗".red().bold(), e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let options = match scan_options_from_matches(args, prompted.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("{} Scanning {}", "→".blue(), options.url.bright_white());
        println!(
            "Same-origin exclusion: {}",
            if options.classifier.exclude_same_origin {
                format!("on ({})", options.classifier.domain)
            } else {
                "off".to_string()
            }
        );
        println!("Timeout: {}s\n", options.timeout_secs);
    }

    match execute_scan(options, None).await {
        Ok(summary) => {
            if !quiet {
                println!("\n{} Scan complete!\n", "✓".green().bold());
                print!("{}", generate_scan_report(&summary, top_n));
            }
        }
        Err(e) => {
            eprintln!(
                "{} Scan failed [{}]: {}",
                "✗".red().bold(),
                e.kind().to_string().yellow(),
                e
            );
            std::process::exit(1);
        }
    }
}

