use policyscan::commands::command_argument_builder;
use policyscan::handlers::{handle_scan, init_logging};
use policyscan_core::print_banner;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = command_argument_builder().get_matches();
    let quiet = matches.get_flag("quiet");

    init_logging(matches.get_flag("verbose"), quiet);

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    handle_scan(&matches).await;
}
