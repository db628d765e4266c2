//! Domainer - find .se domains that become available on a given date
//!
//! Downloads and caches the bardate feed, filters it by date and optionally
//! asks a chat-completions service for an analysis of the matches.

use clap::Parser;
use domainer::app::{self, Query};
use domainer::cli::Cli;
use domainer::logging;
use domainer::presenter::Presenter;
use domainer_common::error::EXIT_SUCCESS;
use domainer_common::DomainerError;
use std::io::Write;

fn main() {
    // Invalid --date values are rejected here, before any data is touched
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<(), DomainerError> {
    let config = app::load_config(cli)?;
    let fetcher = app::build_fetcher(&config);
    let advisor = cli.chatgpt.then(|| app::build_advisor(&config));

    let stdout = std::io::stdout();
    let mut presenter = Presenter::new(stdout.lock());

    app::run(
        &config,
        &Query::from(cli),
        fetcher.as_ref(),
        advisor.as_deref(),
        &mut presenter,
    )?;

    presenter.into_inner().flush()?;
    Ok(())
}
