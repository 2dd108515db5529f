use clap::arg;
use policyscan_core::artifact::{DEFAULT_FREQUENCIES_PATH, DEFAULT_RESOURCES_PATH};
use policyscan_core::report::DEFAULT_TOP_WORDS;
use policyscan_core::scan::DEFAULT_URL;
use policyscan_scanner::classify::DEFAULT_DOMAIN;
use policyscan_scanner::fetch::DEFAULT_TIMEOUT_SECS;
use policyscan_scanner::links::DEFAULT_BASE_URL;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("policyscan")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("policyscan")
        .about(
            "Lists the external resources a page loads, then follows its Privacy Policy \
            link and counts the words on that page.",
        )
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner, progress and summary output").required(false))
        .arg(
            arg!(-v --"verbose" "Enable debug logging")
                .required(false)
                .conflicts_with("quiet"),
        )
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("The page to scan")
                .default_value(DEFAULT_URL),
        )
        .arg(
            arg!(-i --"interactive")
                .required(false)
                .help("Prompt for the URL to scan (empty answer keeps --url)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Where to write the external resources JSON")
                .default_value(DEFAULT_RESOURCES_PATH),
        )
        .arg(
            arg!(-w --"words-output" <PATH>)
                .required(false)
                .help("Where to write the word frequency JSON")
                .default_value(DEFAULT_FREQUENCIES_PATH),
        )
        .arg(
            arg!(--"base-url" <URL>)
                .required(false)
                .help("Prefix for privacy policy links that are not absolute")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            arg!(--"exclude-same-origin")
                .required(false)
                .help("Do not report resources whose host is --domain or ends in .<DOMAIN>")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"domain" <DOMAIN>)
                .required(false)
                .help("Domain treated as same-origin by --exclude-same-origin")
                .default_value(DEFAULT_DOMAIN),
        )
        .arg(
            arg!(--"keep-non-ascii")
                .required(false)
                .help("Count tokens made only of non-ASCII characters instead of discarding them")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help(format!("Request timeout in seconds [default: {}]", DEFAULT_TIMEOUT_SECS))
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            arg!(--"top" <N>)
                .required(false)
                .help(format!(
                    "Number of most frequent words shown in the summary [default: {}]",
                    DEFAULT_TOP_WORDS
                ))
                .value_parser(clap::value_parser!(usize)),
        )
}
